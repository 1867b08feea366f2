//! Core data model shared by the scorer and the requirement aggregator

use serde::{Deserialize, Serialize};

/// A skill claimed by the candidate being matched.
///
/// `experience_years` and `proficiency` are informational only; they are
/// retained for future weighting strategies and never consumed in scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSkill {
    #[serde(alias = "name")]
    pub skill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<f32>,
}

impl CandidateSkill {
    pub fn new(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            experience_years: None,
            proficiency: None,
        }
    }
}

/// A weighted skill need derived from a job description.
///
/// `inferred = false` means the requirement is text-evidenced (lexical match
/// or generative extraction from the job text); `inferred = true` means it was
/// added from an occupational-taxonomy candidate pool without direct textual
/// evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(alias = "name")]
    pub skill: String,
    #[serde(default = "default_importance")]
    pub importance: f32,
    #[serde(default)]
    pub inferred: bool,
}

fn default_importance() -> f32 {
    0.5
}

impl Requirement {
    pub fn explicit(skill: impl Into<String>, importance: f32) -> Self {
        Self {
            skill: skill.into(),
            importance,
            inferred: false,
        }
    }

    pub fn inferred(skill: impl Into<String>, importance: f32) -> Self {
        Self {
            skill: skill.into(),
            importance,
            inferred: true,
        }
    }
}

/// Per-requirement breakdown entry produced by the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityDetail {
    pub requirement: String,
    pub importance: f32,
    /// Effective similarity, rounded to 3 decimals. Zero whenever the best
    /// candidate is not an exact (case-insensitive) name match.
    pub similarity: f32,
    pub matched_skill: Option<String>,
    pub inferred: bool,
}

/// Final match outcome: normalized score plus an explainable breakdown.
///
/// `strengths` and `gaps` partition `details` at the coverage threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f32,
    pub strengths: Vec<SimilarityDetail>,
    pub gaps: Vec<SimilarityDetail>,
    pub details: Vec<SimilarityDetail>,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            strengths: Vec::new(),
            gaps: Vec::new(),
            details: Vec::new(),
        }
    }
}

/// A soft-skill observation from the occupational taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftSkill {
    pub skill: String,
    pub value: f32,
}

/// Which taxonomy report a candidate-pool item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolCategory {
    Technology,
    Knowledge,
}

/// Aggregation-internal: one taxonomy candidate with its source importance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePoolItem {
    pub skill: String,
    pub importance: f32,
    pub category: PoolCategory,
}

/// Output of one aggregation run: the requirement list the scorer consumes
/// plus the deduplicated soft-skill list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedRequirements {
    pub requirements: Vec<Requirement>,
    pub soft_skills: Vec<SoftSkill>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_defaults_from_json() {
        let req: Requirement = serde_json::from_str(r#"{"skill": "python"}"#).unwrap();
        assert_eq!(req.skill, "python");
        assert_eq!(req.importance, 0.5);
        assert!(!req.inferred);
    }

    #[test]
    fn test_name_alias_accepted_at_boundary() {
        let req: Requirement = serde_json::from_str(r#"{"name": "rust", "importance": 0.9}"#).unwrap();
        assert_eq!(req.skill, "rust");

        let skill: CandidateSkill = serde_json::from_str(r#"{"name": "go"}"#).unwrap();
        assert_eq!(skill.skill, "go");
    }

    #[test]
    fn test_candidate_skill_optional_fields() {
        let skill: CandidateSkill =
            serde_json::from_str(r#"{"skill": "aws", "experience_years": 3}"#).unwrap();
        assert_eq!(skill.experience_years, Some(3));
        assert!(skill.proficiency.is_none());
    }
}
