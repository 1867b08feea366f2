//! End-to-end aggregation and scoring flow

use async_trait::async_trait;
use skill_match::clients::{
    ClientResult, ExtractedSkill, GenerativeExtractor, TaxonomyClient, TaxonomySkill,
};
use skill_match::embedding::HashEmbedder;
use skill_match::matching::types::CandidateSkill;
use skill_match::matching::{RequirementAggregator, SimilarityScorer};
use std::sync::Arc;

struct FixedTaxonomy {
    codes: Vec<String>,
    technology: Vec<TaxonomySkill>,
    soft: Vec<TaxonomySkill>,
}

#[async_trait]
impl TaxonomyClient for FixedTaxonomy {
    fn is_enabled(&self) -> bool {
        true
    }

    fn importance_threshold(&self) -> Option<f32> {
        Some(0.5)
    }

    async fn search_codes(&self, _title: &str) -> ClientResult<Vec<String>> {
        Ok(self.codes.clone())
    }

    async fn technology_skills(&self, _code: &str) -> ClientResult<Vec<TaxonomySkill>> {
        Ok(self.technology.clone())
    }

    async fn knowledge_skills(&self, _code: &str) -> ClientResult<Vec<TaxonomySkill>> {
        Ok(Vec::new())
    }

    async fn soft_skills(&self, _code: &str) -> ClientResult<Vec<TaxonomySkill>> {
        Ok(self.soft.clone())
    }
}

struct FixedExtractor {
    skills: Vec<ExtractedSkill>,
}

#[async_trait]
impl GenerativeExtractor for FixedExtractor {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn extract_technologies(&self, _text: &str) -> ClientResult<Vec<ExtractedSkill>> {
        Ok(self.skills.clone())
    }
}

fn tax(skill: &str, importance: f32) -> TaxonomySkill {
    TaxonomySkill {
        skill: skill.to_string(),
        importance,
    }
}

fn candidates(names: &[&str]) -> Vec<CandidateSkill> {
    names.iter().map(|n| CandidateSkill::new(*n)).collect()
}

const JOB_TEXT: &str = "We are hiring a backend engineer. Python is required, and Python \
experience with Docker is a strong plus. Familiarity with PostgreSQL helps.";

#[tokio::test]
async fn test_aggregate_then_score_with_taxonomy_enrichment() {
    let aggregator = RequirementAggregator::new(
        Arc::new(FixedTaxonomy {
            codes: vec!["15-1252.00".to_string()],
            technology: vec![tax("Terraform", 0.9), tax("Docker", 0.8)],
            soft: vec![tax("Adaptability", 0.7)],
        }),
        Arc::new(FixedExtractor {
            skills: vec![ExtractedSkill {
                skill: "fastapi".to_string(),
                importance: 0.8,
            }],
        }),
    );
    let aggregated = aggregator.aggregate(JOB_TEXT, Some("Software Developer")).await;

    // Text-evidenced names stay explicit, taxonomy leftovers become inferred.
    let names: Vec<(&str, bool)> = aggregated
        .requirements
        .iter()
        .map(|r| (r.skill.as_str(), r.inferred))
        .collect();
    assert!(names.contains(&("python", false)));
    assert!(names.contains(&("docker", false)));
    assert!(names.contains(&("postgresql", false)));
    assert!(names.contains(&("fastapi", false)));
    assert!(names.contains(&("Terraform", true)));
    assert_eq!(aggregated.soft_skills.len(), 1);

    // Python is mentioned twice, so it carries the max frequency importance.
    let python = aggregated
        .requirements
        .iter()
        .find(|r| r.skill == "python")
        .unwrap();
    assert_eq!(python.importance, 1.0);

    // The hash provider scores identical names at cosine 1.0, so coverage
    // follows exact matches only.
    let provider = HashEmbedder::new();
    let scorer = SimilarityScorer::new(&provider);
    let result = scorer.score(
        &candidates(&["Python", "Docker", "Terraform"]),
        &aggregated.requirements,
        0.5,
        false,
    );

    assert!(result.strengths.iter().any(|d| d.requirement == "python"));
    assert!(result.strengths.iter().any(|d| d.requirement == "docker"));
    assert!(result.gaps.iter().any(|d| d.requirement == "fastapi"));
    // Terraform is matched exactly but inferred, so it is a strength without
    // contributing to the default (explicit-only) score.
    assert!(result.strengths.iter().any(|d| d.requirement == "Terraform"));
    assert!(result.score > 0.0 && result.score <= 1.0);
}

#[tokio::test]
async fn test_inferred_toggle_changes_score_but_not_partition() {
    let aggregator = RequirementAggregator::new(
        Arc::new(FixedTaxonomy {
            codes: vec!["15-1252.00".to_string()],
            technology: vec![tax("terraform", 0.9)],
            soft: Vec::new(),
        }),
        Arc::new(FixedExtractor { skills: Vec::new() }),
    );
    let aggregated = aggregator.aggregate(JOB_TEXT, Some("Software Developer")).await;

    let provider = HashEmbedder::new();
    let scorer = SimilarityScorer::new(&provider);
    let skills = candidates(&["python", "docker", "postgresql", "terraform"]);

    let without = scorer.score(&skills, &aggregated.requirements, 0.5, false);
    let with = scorer.score(&skills, &aggregated.requirements, 0.5, true);

    assert_eq!(without.strengths.len(), with.strengths.len());
    // All explicit requirements are covered exactly, so the explicit-only
    // score is 1.0; enabling inferred redistributes mass under the 20% cap.
    assert!((without.score - 1.0).abs() < 1e-3);
    assert!(with.score < without.score);
    assert!(with.score > 0.0);
}

#[tokio::test]
async fn test_unavailable_collaborators_still_produce_a_result() {
    struct DownTaxonomy;

    #[async_trait]
    impl TaxonomyClient for DownTaxonomy {
        fn is_enabled(&self) -> bool {
            true
        }
        fn importance_threshold(&self) -> Option<f32> {
            None
        }
        async fn search_codes(&self, _title: &str) -> ClientResult<Vec<String>> {
            Err(skill_match::clients::Unavailable)
        }
        async fn technology_skills(&self, _code: &str) -> ClientResult<Vec<TaxonomySkill>> {
            Err(skill_match::clients::Unavailable)
        }
        async fn knowledge_skills(&self, _code: &str) -> ClientResult<Vec<TaxonomySkill>> {
            Err(skill_match::clients::Unavailable)
        }
        async fn soft_skills(&self, _code: &str) -> ClientResult<Vec<TaxonomySkill>> {
            Err(skill_match::clients::Unavailable)
        }
    }

    struct DownExtractor;

    #[async_trait]
    impl GenerativeExtractor for DownExtractor {
        fn is_enabled(&self) -> bool {
            true
        }
        async fn extract_technologies(&self, _text: &str) -> ClientResult<Vec<ExtractedSkill>> {
            Err(skill_match::clients::Unavailable)
        }
    }

    let aggregator = RequirementAggregator::new(Arc::new(DownTaxonomy), Arc::new(DownExtractor));
    let aggregated = aggregator.aggregate(JOB_TEXT, Some("Software Developer")).await;

    // Falls back to dictionary-only explicit matching.
    assert!(!aggregated.requirements.is_empty());
    assert!(aggregated.requirements.iter().all(|r| !r.inferred));
    assert!(aggregated.soft_skills.is_empty());

    let provider = HashEmbedder::new();
    let scorer = SimilarityScorer::new(&provider);
    let result = scorer.score(
        &candidates(&["python"]),
        &aggregated.requirements,
        0.5,
        false,
    );
    assert!(result.score > 0.0);
    assert!(result.strengths.iter().any(|d| d.requirement == "python"));
}
