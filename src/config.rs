//! Configuration management for the skill matcher

use crate::error::{Result, SkillMatchError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub taxonomy: TaxonomyConfig,
    pub extractor: ExtractorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Coverage threshold splitting strengths from gaps.
    pub threshold: f32,
    /// Whether inferred requirements contribute to scoring by default.
    /// Overridden by the SKILL_MATCH_USE_INFERRED environment variable.
    pub use_inferred: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    pub enabled: bool,
    /// Minimum importance for a candidate-pool item to count as relevant.
    /// None or 0 disables filtering.
    pub relevance_threshold: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub enabled: bool,
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig {
                threshold: 0.5,
                use_inferred: false,
            },
            taxonomy: TaxonomyConfig {
                enabled: true,
                relevance_threshold: Some(0.5),
            },
            extractor: ExtractorConfig {
                enabled: true,
                model: "gemini-2.5-flash".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)
                .map_err(|e| SkillMatchError::Configuration(format!("Failed to parse config: {}", e)))?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-match")
            .join("config.toml")
    }

    /// Process-wide environment toggles win over the config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("SKILL_MATCH_USE_INFERRED") {
            self.matching.use_inferred = matches!(value.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.matching.threshold, 0.5);
        assert!(!config.matching.use_inferred);
        assert_eq!(config.taxonomy.relevance_threshold, Some(0.5));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = Config::default();
        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.matching.threshold, config.matching.threshold);
        assert_eq!(parsed.extractor.model, config.extractor.model);
    }
}
