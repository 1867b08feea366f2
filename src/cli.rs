//! CLI interface for the skill matcher

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-match")]
#[command(about = "Match candidate skills against job requirements")]
#[command(long_about = "Aggregate weighted requirements from a job description (text scan, \
generative extraction, occupational taxonomy) and score candidate skill coverage against them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate requirements from a job description and score candidate skills
    Match {
        /// Path to job description text file
        #[arg(short, long)]
        job: PathBuf,

        /// Path to candidate skills JSON file (array of {skill, experience_years?, proficiency?})
        #[arg(short, long)]
        skills: PathBuf,

        /// Job title hint for occupational-taxonomy lookup
        #[arg(short, long)]
        title: Option<String>,

        /// Coverage threshold splitting strengths from gaps
        #[arg(long)]
        threshold: Option<f32>,

        /// Let inferred (taxonomy-only) requirements contribute to the score
        #[arg(long)]
        use_inferred: bool,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::output::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::output::OutputFormat::Console),
        "json" => Ok(crate::output::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}
