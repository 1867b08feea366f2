//! Skill matcher: weighted skill/requirement matching with taxonomy enrichment

mod cli;
mod clients;
mod config;
mod embedding;
mod error;
mod matching;
mod output;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use clients::{GeminiExtractor, GenerativeExtractor, OnetClient, TaxonomyClient};
use config::Config;
use error::{Result, SkillMatchError};
use log::{error, info};
use matching::types::CandidateSkill;
use matching::{RequirementAggregator, SimilarityScorer};
use output::MatchReport;
use std::path::Path;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            job,
            skills,
            title,
            threshold,
            use_inferred,
            output,
        } => {
            let output_format =
                cli::parse_output_format(&output).map_err(SkillMatchError::InvalidInput)?;
            let threshold = threshold.unwrap_or(config.matching.threshold);
            let use_inferred = use_inferred || config.matching.use_inferred;

            let job_text = std::fs::read_to_string(&job)?;
            let candidate_skills = load_candidate_skills(&skills)?;
            info!(
                "Matching {} candidate skills against job text ({} chars)",
                candidate_skills.len(),
                job_text.len()
            );

            let taxonomy: Arc<dyn TaxonomyClient> = if config.taxonomy.enabled {
                Arc::new(OnetClient::from_env(config.taxonomy.relevance_threshold))
            } else {
                Arc::new(OnetClient::disabled())
            };
            let extractor: Arc<dyn GenerativeExtractor> = if config.extractor.enabled {
                Arc::new(GeminiExtractor::from_env_with_default_model(
                    &config.extractor.model,
                ))
            } else {
                Arc::new(GeminiExtractor::disabled())
            };

            let aggregator = RequirementAggregator::new(taxonomy, extractor);
            let aggregated = aggregator.aggregate(&job_text, title.as_deref()).await;

            let scorer = SimilarityScorer::new(embedding::global_provider());
            let result = scorer.score(&candidate_skills, &aggregated.requirements, threshold, use_inferred);

            let report = MatchReport::new(
                result,
                aggregated.soft_skills,
                title,
                threshold,
                use_inferred,
            );
            println!(
                "{}",
                report.render(output_format, output_format == output::OutputFormat::Console)?
            );
            Ok(())
        }
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| SkillMatchError::Configuration(e.to_string()))?;
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Reset => {
                let defaults = Config::default();
                defaults.save()?;
                println!("Configuration reset to defaults");
                Ok(())
            }
        },
    }
}

fn load_candidate_skills(path: &Path) -> Result<Vec<CandidateSkill>> {
    let content = std::fs::read_to_string(path)?;
    let skills: Vec<CandidateSkill> = serde_json::from_str(&content)?;
    if skills.is_empty() {
        return Err(SkillMatchError::InvalidInput(
            "candidate skills file is empty".to_string(),
        ));
    }
    Ok(skills)
}
