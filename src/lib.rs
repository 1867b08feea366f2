//! Skill/requirement matching library

pub mod cli;
pub mod clients;
pub mod config;
pub mod embedding;
pub mod error;
pub mod matching;
pub mod output;

pub use config::Config;
pub use error::{Result, SkillMatchError};
pub use matching::types::{CandidateSkill, MatchResult, Requirement, SimilarityDetail};
