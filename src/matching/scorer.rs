//! Weighted similarity scorer: candidate skills vs job requirements
//!
//! Exact lexical matches decide whether a requirement is satisfied; semantic
//! similarity alone is never enough to mark a requirement as covered. This
//! keeps behavior predictable while still exposing similarity values in the
//! per-requirement details.

use crate::embedding::EmbeddingProvider;
use crate::matching::types::{CandidateSkill, MatchResult, Requirement, SimilarityDetail};
use ndarray::Array2;

/// Fraction of the combined raw score mass that inferred requirements may
/// contribute when they are enabled. Downstream consumers depend on this
/// exact constant.
const INFERRED_CAP_RATIO: f32 = 0.2;

/// Epsilon added to row norms so all-zero vectors divide cleanly.
const NORM_EPSILON: f32 = 1e-8;

pub struct SimilarityScorer<'a> {
    provider: &'a dyn EmbeddingProvider,
}

impl<'a> SimilarityScorer<'a> {
    pub fn new(provider: &'a dyn EmbeddingProvider) -> Self {
        Self { provider }
    }

    /// Compute the weighted coverage summary between candidate skills and job
    /// requirements.
    ///
    /// `threshold` gates coverage classification, not similarity computation.
    /// `use_inferred` controls whether inferred requirements contribute to the
    /// score; their contribution is capped at 20% of the combined mass either
    /// way.
    pub fn score(
        &self,
        candidate_skills: &[CandidateSkill],
        requirements: &[Requirement],
        threshold: f32,
        use_inferred: bool,
    ) -> MatchResult {
        if requirements.is_empty() {
            // No requirements means no meaningful score.
            return MatchResult::empty();
        }

        // Lower-case both lists, dropping entries with no usable name.
        let requirements: Vec<&Requirement> = requirements
            .iter()
            .filter(|r| !r.skill.trim().is_empty())
            .collect();
        let requirement_texts: Vec<String> =
            requirements.iter().map(|r| r.skill.to_lowercase()).collect();
        let skill_texts: Vec<String> = candidate_skills
            .iter()
            .map(|s| s.skill.to_lowercase())
            .filter(|s| !s.trim().is_empty())
            .collect();

        if requirements.is_empty() {
            return MatchResult::empty();
        }

        // The two encode calls are independent; similarity is only computed
        // between vectors produced together (rows = requirements, columns =
        // candidate skills).
        let requirement_vectors = self.provider.encode_matrix(&requirement_texts);
        let skill_vectors = self.provider.encode_matrix(&skill_texts);
        let similarity = cosine_similarity_matrix(&requirement_vectors, &skill_vectors);

        let mut strengths = Vec::new();
        let mut gaps = Vec::new();
        let mut details = Vec::new();

        let mut explicit_weighted_sum = 0.0_f32;
        let mut inferred_weighted_sum = 0.0_f32;
        let mut explicit_total_weight = 0.0_f32;
        let mut inferred_total_weight = 0.0_f32;

        for (idx, requirement) in requirements.iter().enumerate() {
            let weight = requirement.importance;
            if requirement.inferred {
                inferred_total_weight += weight;
            } else {
                explicit_total_weight += weight;
            }

            // Leftmost argmax over this requirement's similarity row.
            let (best_sim, matched_skill) = if skill_texts.is_empty() {
                (0.0, None)
            } else {
                let row = similarity.row(idx);
                let mut best_idx = 0;
                let mut best = f32::NEG_INFINITY;
                for (col, value) in row.iter().enumerate() {
                    if *value > best {
                        best = *value;
                        best_idx = col;
                    }
                }
                (best, Some(skill_texts[best_idx].clone()))
            };

            // Coverage gate: only an exact lexical match counts. High cosine
            // similarity against an unrelated term must not satisfy a
            // requirement.
            let req_norm = &requirement_texts[idx];
            let effective_sim = match &matched_skill {
                Some(matched) if matched == req_norm => best_sim,
                _ => 0.0,
            };

            let detail = SimilarityDetail {
                requirement: requirement.skill.clone(),
                importance: weight,
                similarity: round3(effective_sim),
                matched_skill,
                inferred: requirement.inferred,
            };
            details.push(detail.clone());

            if effective_sim >= threshold {
                strengths.push(detail);
                if requirement.inferred {
                    inferred_weighted_sum += weight * effective_sim;
                } else {
                    explicit_weighted_sum += weight * effective_sim;
                }
            } else {
                gaps.push(detail);
            }
        }

        let score = if use_inferred {
            let total = explicit_total_weight + inferred_total_weight;
            if total > 0.0 {
                let raw_explicit = explicit_weighted_sum / total;
                let raw_inferred = inferred_weighted_sum / total;
                // Inferred requirements are speculative and must never
                // dominate the score even when heavily weighted.
                let cap = INFERRED_CAP_RATIO * (raw_explicit + raw_inferred);
                raw_explicit + raw_inferred.min(cap)
            } else {
                0.0
            }
        } else {
            let denom = if explicit_total_weight > 0.0 {
                explicit_total_weight
            } else {
                1.0
            };
            explicit_weighted_sum / denom
        };

        MatchResult {
            score: round3(score),
            strengths,
            gaps,
            details,
        }
    }
}

/// Cosine similarity matrix between row vectors of `a` and `b`.
///
/// Rows are pre-normalized by their L2 norm (plus epsilon) so the dot product
/// is cosine similarity. Empty axes produce a correctly shaped empty matrix.
fn cosine_similarity_matrix(a: &Array2<f32>, b: &Array2<f32>) -> Array2<f32> {
    if a.nrows() == 0 || b.nrows() == 0 {
        return Array2::zeros((a.nrows(), b.nrows()));
    }
    let a_norm = normalize_rows(a);
    let b_norm = normalize_rows(b);
    a_norm.dot(&b_norm.t())
}

fn normalize_rows(m: &Array2<f32>) -> Array2<f32> {
    let mut out = m.clone();
    for mut row in out.rows_mut() {
        let norm = row.iter().map(|x| x * x).sum::<f32>().sqrt() + NORM_EPSILON;
        row.mapv_inplace(|x| x / norm);
    }
    out
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Maps each text to a fixed 2D vector so cosine similarity stays
    /// deterministic: "python" matches itself exactly, "kubernetes" is closest
    /// to "aws" without being equal to it.
    struct StubProvider;

    impl EmbeddingProvider for StubProvider {
        fn encode(&self, texts: &[String]) -> Vec<Vec<f32>> {
            texts
                .iter()
                .map(|text| match text.as_str() {
                    t if t.contains("python") => vec![1.0, 0.0],
                    t if t.contains("aws") => vec![0.8, 0.6],
                    t if t.contains("kubernetes") => vec![0.2, 1.0],
                    t if t.contains("golang") => vec![0.0, 1.0],
                    _ => vec![0.0, 0.0],
                })
                .collect()
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    fn skills(names: &[&str]) -> Vec<CandidateSkill> {
        names.iter().map(|n| CandidateSkill::new(*n)).collect()
    }

    #[test]
    fn test_empty_requirements_yield_zero_score() {
        let scorer = SimilarityScorer::new(&StubProvider);
        let result = scorer.score(&skills(&["python"]), &[], 0.5, false);
        assert_eq!(result.score, 0.0);
        assert!(result.strengths.is_empty());
        assert!(result.gaps.is_empty());
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_exact_match_single_requirement() {
        // Scenario: candidate python vs requirement python at importance 0.7.
        let scorer = SimilarityScorer::new(&StubProvider);
        let requirements = vec![Requirement::explicit("python", 0.7)];
        let result = scorer.score(&skills(&["python"]), &requirements, 0.5, false);
        assert!((result.score - 0.7).abs() < 1e-6);
        assert_eq!(result.strengths.len(), 1);
        assert_eq!(result.strengths[0].matched_skill.as_deref(), Some("python"));
    }

    #[test]
    fn test_mixed_strength_and_gap() {
        // kubernetes's best cosine match is "aws", which fails the exact gate.
        let scorer = SimilarityScorer::new(&StubProvider);
        let requirements = vec![
            Requirement::explicit("Python", 0.7),
            Requirement::explicit("Kubernetes", 0.3),
        ];
        let result = scorer.score(&skills(&["Python", "AWS"]), &requirements, 0.5, false);

        assert!(result.strengths.iter().any(|d| d.requirement == "Python"));
        assert!(result.gaps.iter().any(|d| d.requirement == "Kubernetes"));
        assert!((result.score - 0.7).abs() < 1e-6);

        let kube = result
            .details
            .iter()
            .find(|d| d.requirement == "Kubernetes")
            .unwrap();
        assert_eq!(kube.similarity, 0.0);
        assert_eq!(kube.matched_skill.as_deref(), Some("aws"));
    }

    #[test]
    fn test_inferred_ignored_by_default() {
        let scorer = SimilarityScorer::new(&StubProvider);
        let requirements = vec![
            Requirement::explicit("python", 0.5),
            Requirement::inferred("golang", 0.5),
        ];
        let result = scorer.score(&skills(&["python"]), &requirements, 0.5, false);
        // explicit_weighted_sum 0.5 / explicit_total_weight 0.5
        assert!((result.score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_inferred_capped_when_enabled() {
        let scorer = SimilarityScorer::new(&StubProvider);
        let requirements = vec![
            Requirement::explicit("python", 0.5),
            Requirement::inferred("golang", 0.5),
        ];
        let result = scorer.score(&skills(&["python", "golang"]), &requirements, 0.5, true);
        // raw_explicit 0.5, raw_inferred 0.5, cap 0.2 -> 0.7
        assert!((result.score - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_all_inferred_with_flag_off_scores_zero() {
        let scorer = SimilarityScorer::new(&StubProvider);
        let requirements = vec![Requirement::inferred("golang", 0.8)];
        let result = scorer.score(&skills(&["golang"]), &requirements, 0.5, false);
        assert_eq!(result.score, 0.0);
        // Classification is independent of the inferred toggle.
        assert_eq!(result.strengths.len(), 1);
    }

    #[test]
    fn test_partition_law() {
        let scorer = SimilarityScorer::new(&StubProvider);
        let requirements = vec![
            Requirement::explicit("python", 0.7),
            Requirement::explicit("kubernetes", 0.3),
            Requirement::inferred("golang", 0.4),
        ];
        let result = scorer.score(&skills(&["python", "aws"]), &requirements, 0.5, true);

        assert_eq!(
            result.strengths.len() + result.gaps.len(),
            result.details.len()
        );
        for detail in &result.strengths {
            assert!(detail.similarity >= 0.5);
        }
        for detail in &result.gaps {
            assert!(detail.similarity < 0.5);
        }
    }

    #[test]
    fn test_weight_scaling_does_not_change_score() {
        let scorer = SimilarityScorer::new(&StubProvider);
        let base = vec![
            Requirement::explicit("python", 0.4),
            Requirement::explicit("kubernetes", 0.2),
        ];
        let scaled = vec![
            Requirement::explicit("python", 0.8),
            Requirement::explicit("kubernetes", 0.4),
        ];
        let candidates = skills(&["python"]);
        let a = scorer.score(&candidates, &base, 0.5, false);
        let b = scorer.score(&candidates, &scaled, 0.5, false);
        assert!((a.score - b.score).abs() < 1e-6);
    }

    #[test]
    fn test_empty_candidate_list_leaves_all_gaps() {
        let scorer = SimilarityScorer::new(&StubProvider);
        let requirements = vec![Requirement::explicit("python", 0.7)];
        let result = scorer.score(&[], &requirements, 0.5, false);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.gaps.len(), 1);
        assert!(result.gaps[0].matched_skill.is_none());
    }

    #[test]
    fn test_blank_requirement_names_are_dropped() {
        let scorer = SimilarityScorer::new(&StubProvider);
        let requirements = vec![
            Requirement::explicit("  ", 0.5),
            Requirement::explicit("python", 0.5),
        ];
        let result = scorer.score(&skills(&["python"]), &requirements, 0.5, false);
        assert_eq!(result.details.len(), 1);
        assert_eq!(result.details[0].requirement, "python");
    }

    #[test]
    fn test_similarity_bounded_and_rounded() {
        let scorer = SimilarityScorer::new(&StubProvider);
        let requirements = vec![
            Requirement::explicit("python", 0.7),
            Requirement::explicit("kubernetes", 0.3),
        ];
        let result = scorer.score(&skills(&["python", "aws"]), &requirements, 0.5, false);
        for detail in &result.details {
            assert!(detail.similarity >= 0.0 && detail.similarity <= 1.0);
            let scaled = detail.similarity * 1000.0;
            assert!((scaled - scaled.round()).abs() < 1e-3);
        }
    }
}
