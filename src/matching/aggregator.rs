//! Multi-source requirement aggregation
//!
//! Builds the requirement list the scorer consumes by merging three candidate
//! sources: a text-matched explicit pool, a model-extracted explicit pool,
//! and an occupational-taxonomy inferred pool. Each step may short-circuit to
//! a narrower fallback; collaborator failures are treated as "no data from
//! that source", never as hard failures — partial enrichment beats erroring.

use crate::clients::{GenerativeExtractor, TaxonomyClient, TaxonomySkill};
use crate::matching::dictionary::{static_skill_terms, SkillScanner};
use crate::matching::types::{
    AggregatedRequirements, CandidatePoolItem, PoolCategory, Requirement, SoftSkill,
};
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub struct RequirementAggregator {
    taxonomy: Arc<dyn TaxonomyClient>,
    extractor: Arc<dyn GenerativeExtractor>,
}

impl RequirementAggregator {
    pub fn new(taxonomy: Arc<dyn TaxonomyClient>, extractor: Arc<dyn GenerativeExtractor>) -> Self {
        Self { taxonomy, extractor }
    }

    /// Aggregate explicit and inferred requirements from job text plus an
    /// optional occupation-title hint.
    ///
    /// Output order: explicit requirements in detection order, then inferred.
    /// A given normalized skill name appears at most once; explicit entries
    /// win over later inferred entries of the same name.
    pub async fn aggregate(&self, text: &str, title_hint: Option<&str>) -> AggregatedRequirements {
        let codes = self.resolve_codes(title_hint).await;
        let (pool, soft_skills) = self.fetch_candidate_pools(&codes).await;

        let mut requirements = self.scan_explicit(text, &pool);
        let mut seen: HashSet<String> = requirements
            .iter()
            .map(|r| r.skill.to_lowercase())
            .collect();

        // Independent explicit pool from the generative extractor; names the
        // text scan already produced keep their frequency-derived importance.
        if self.extractor.is_enabled() {
            let extracted = self
                .extractor
                .extract_technologies(text)
                .await
                .unwrap_or_default();
            for item in extracted {
                let key = item.skill.to_lowercase();
                if key.trim().is_empty() || seen.contains(&key) {
                    continue;
                }
                seen.insert(key);
                requirements.push(Requirement::explicit(item.skill, item.importance));
            }
        }

        // Taxonomy candidates without textual evidence become inferred
        // requirements carrying the pool's importance.
        for item in &pool {
            let key = item.skill.to_lowercase();
            if key.trim().is_empty() || seen.contains(&key) {
                continue;
            }
            seen.insert(key);
            requirements.push(Requirement::inferred(item.skill.clone(), item.importance));
        }

        info!(
            "Aggregated {} requirements ({} inferred), {} soft skills",
            requirements.len(),
            requirements.iter().filter(|r| r.inferred).count(),
            soft_skills.len()
        );
        AggregatedRequirements {
            requirements,
            soft_skills,
        }
    }

    async fn resolve_codes(&self, title_hint: Option<&str>) -> Vec<String> {
        let title = match title_hint {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Vec::new(),
        };
        if !self.taxonomy.is_enabled() {
            return Vec::new();
        }
        self.taxonomy.search_codes(title).await.unwrap_or_default()
    }

    /// Fetch the technology pool across all codes; only when no code yields
    /// any technology item above threshold does the run fall back to the
    /// knowledge pool. Soft skills are fetched per code unconditionally and
    /// deduplicated by name keeping the maximum value.
    async fn fetch_candidate_pools(
        &self,
        codes: &[String],
    ) -> (Vec<CandidatePoolItem>, Vec<SoftSkill>) {
        if codes.is_empty() {
            return (Vec::new(), Vec::new());
        }
        let threshold = self.taxonomy.importance_threshold();

        let mut technology = Vec::new();
        let mut soft: HashMap<String, SoftSkill> = HashMap::new();
        for code in codes {
            let items = self.taxonomy.technology_skills(code).await.unwrap_or_default();
            technology.extend(filter_relevant(items, threshold, PoolCategory::Technology));

            for item in self.taxonomy.soft_skills(code).await.unwrap_or_default() {
                let key = item.skill.to_lowercase();
                if key.trim().is_empty() {
                    continue;
                }
                soft.entry(key)
                    .and_modify(|existing| {
                        if item.importance > existing.value {
                            existing.value = item.importance;
                        }
                    })
                    .or_insert(SoftSkill {
                        skill: item.skill,
                        value: item.importance,
                    });
            }
        }

        let pool = if !technology.is_empty() {
            technology
        } else {
            debug!("No technology candidates above threshold; falling back to knowledge pool");
            let mut knowledge = Vec::new();
            for code in codes {
                let items = self.taxonomy.knowledge_skills(code).await.unwrap_or_default();
                knowledge.extend(filter_relevant(items, threshold, PoolCategory::Knowledge));
            }
            knowledge
        };

        let mut soft_skills: Vec<SoftSkill> = soft.into_values().collect();
        soft_skills.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.skill.cmp(&b.skill))
        });
        (dedupe_max_importance(pool), soft_skills)
    }

    /// Scan the source text with the pool-term ∪ static-dictionary
    /// vocabulary. When a taxonomy-derived vocabulary yields zero matches,
    /// retry with the static dictionary alone — narrowing, never widening.
    fn scan_explicit(&self, text: &str, pool: &[CandidatePoolItem]) -> Vec<Requirement> {
        let static_terms = static_skill_terms();
        let merged = pool
            .iter()
            .map(|item| item.skill.clone())
            .chain(static_terms.iter().cloned());

        let mentions = SkillScanner::new(merged)
            .map(|scanner| scanner.scan(text))
            .unwrap_or_default();
        let mentions = if mentions.is_empty() && !pool.is_empty() {
            SkillScanner::new(static_terms.iter().cloned())
                .map(|scanner| scanner.scan(text))
                .unwrap_or_default()
        } else {
            mentions
        };

        mentions
            .into_iter()
            .filter(|m| !m.term.trim().is_empty())
            .map(|m| Requirement::explicit(m.term, m.importance))
            .collect()
    }
}

fn filter_relevant(
    items: Vec<TaxonomySkill>,
    threshold: Option<f32>,
    category: PoolCategory,
) -> Vec<CandidatePoolItem> {
    items
        .into_iter()
        .filter(|item| !item.skill.trim().is_empty())
        .filter(|item| match threshold {
            Some(t) if t > 0.0 => item.importance >= t,
            _ => true,
        })
        .map(|item| CandidatePoolItem {
            skill: item.skill,
            importance: item.importance,
            category,
        })
        .collect()
}

/// Dedupe by normalized skill name, keeping the entry with the maximum
/// importance; first-seen order is preserved.
fn dedupe_max_importance(items: Vec<CandidatePoolItem>) -> Vec<CandidatePoolItem> {
    let mut order: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, CandidatePoolItem> = HashMap::new();
    for item in items {
        let key = item.skill.to_lowercase();
        match by_name.get_mut(&key) {
            Some(existing) => {
                if item.importance > existing.importance {
                    *existing = item;
                }
            }
            None => {
                order.push(key.clone());
                by_name.insert(key, item);
            }
        }
    }
    order
        .into_iter()
        .filter_map(|key| by_name.remove(&key))
        .collect()
}
