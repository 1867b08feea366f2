//! Console and JSON formatters for match results

use crate::error::Result;
use crate::matching::types::{MatchResult, SimilarityDetail, SoftSkill};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

/// Full report handed to formatters: the scorer's result plus aggregation
/// context the caller may want to surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub generated_at: DateTime<Utc>,
    pub title_hint: Option<String>,
    pub threshold: f32,
    pub use_inferred: bool,
    pub result: MatchResult,
    pub soft_skills: Vec<SoftSkill>,
}

impl MatchReport {
    pub fn new(
        result: MatchResult,
        soft_skills: Vec<SoftSkill>,
        title_hint: Option<String>,
        threshold: f32,
        use_inferred: bool,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            title_hint,
            threshold,
            use_inferred,
            result,
            soft_skills,
        }
    }

    pub fn render(&self, format: OutputFormat, use_colors: bool) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Console => Ok(self.render_console(use_colors)),
        }
    }

    fn render_console(&self, use_colors: bool) -> String {
        let mut out = String::new();
        let score_line = format!("Overall match score: {:.3}", self.result.score);
        out.push_str(&paint(&score_line, use_colors, |s| {
            if self.result.score >= 0.7 {
                s.green().bold().to_string()
            } else if self.result.score >= 0.4 {
                s.yellow().bold().to_string()
            } else {
                s.red().bold().to_string()
            }
        }));
        out.push('\n');
        if let Some(title) = &self.title_hint {
            out.push_str(&format!("Title hint: {}\n", title));
        }
        out.push_str(&format!(
            "Threshold: {:.2}  Inferred requirements: {}\n",
            self.threshold,
            if self.use_inferred { "counted (capped)" } else { "ignored" }
        ));

        out.push_str(&format!("\nStrengths ({}):\n", self.result.strengths.len()));
        for detail in &self.result.strengths {
            out.push_str(&detail_line(detail, use_colors, true));
        }
        out.push_str(&format!("\nGaps ({}):\n", self.result.gaps.len()));
        for detail in &self.result.gaps {
            out.push_str(&detail_line(detail, use_colors, false));
        }

        if !self.soft_skills.is_empty() {
            out.push_str(&format!("\nSoft skills ({}):\n", self.soft_skills.len()));
            for soft in &self.soft_skills {
                out.push_str(&format!("  {} ({:.2})\n", soft.skill, soft.value));
            }
        }
        out
    }
}

fn detail_line(detail: &SimilarityDetail, use_colors: bool, strength: bool) -> String {
    let marker = if strength { "+" } else { "-" };
    let inferred = if detail.inferred { " [inferred]" } else { "" };
    let matched = detail
        .matched_skill
        .as_deref()
        .map(|m| format!(" <- {}", m))
        .unwrap_or_default();
    let line = format!(
        "  {} {} (importance {:.2}, similarity {:.3}){}{}\n",
        marker, detail.requirement, detail.importance, detail.similarity, matched, inferred
    );
    paint(&line, use_colors, |s| {
        if strength {
            s.green().to_string()
        } else {
            s.red().to_string()
        }
    })
}

fn paint(text: &str, use_colors: bool, f: impl Fn(&str) -> String) -> String {
    if use_colors {
        f(text)
    } else {
        text.to_string()
    }
}
