//! Generative technology-skill extractor (Gemini-style REST service)
//!
//! Failures never raise into the aggregation arithmetic; they log and map to
//! `Unavailable` so upstream parsing continues.

use crate::clients::{ClientResult, Unavailable};
use async_trait::async_trait;
use log::{info, warn};
use serde_json::{json, Value};
use std::time::Duration;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest prefix of the source text sent to the model.
const MAX_PROMPT_CHARS: usize = 15_000;

const INSTRUCTIONS: &str = "You will be given a job description or resume. Extract every explicit \
technology, programming language, framework, library, database, cloud platform, devops tool, \
machine learning tool, or similar technical skill mentioned. Return ONLY valid JSON array of \
objects. Each object must have: skill (lowercase single term or phrase), importance (1.0 or 0.8). \
Rules: If the mention is clearly optional, phrased with adjectives like 'nice to have', \
'preferred', 'a plus', 'bonus', 'optional', assign 0.8. Otherwise 1.0. Do not infer unstated \
technologies. Do not include soft skills or generic terms like 'team player'. Do not include \
versions.";

const JSON_REMINDER: &str = "Output strictly as JSON array, no markdown, no commentary. \
Example: [ {\"skill\": \"python\", \"importance\": 1.0} ]";

/// One extracted skill with the model's importance heuristic in [0,1].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSkill {
    pub skill: String,
    pub importance: f32,
}

/// Generative text-extraction collaborator.
#[async_trait]
pub trait GenerativeExtractor: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Independent explicit-requirement list extracted from the job text.
    async fn extract_technologies(&self, text: &str) -> ClientResult<Vec<ExtractedSkill>>;
}

/// Gemini generateContent client, enabled only when an API key is present.
pub struct GeminiExtractor {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiExtractor {
    pub fn from_env() -> Self {
        Self::from_env_with_default_model(DEFAULT_MODEL)
    }

    /// `GEMINI_MODEL` wins over the configured default model name.
    pub fn from_env_with_default_model(default_model: &str) -> Self {
        Self::new(
            GEMINI_ENDPOINT.to_string(),
            std::env::var("GEMINI_API_KEY").ok(),
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| default_model.to_string()),
        )
    }

    /// A client that reports itself disabled and never issues requests.
    pub fn disabled() -> Self {
        Self::new(GEMINI_ENDPOINT.to_string(), None, DEFAULT_MODEL.to_string())
    }

    pub fn new(endpoint: String, api_key: Option<String>, model: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            endpoint,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl GenerativeExtractor for GeminiExtractor {
    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn extract_technologies(&self, text: &str) -> ClientResult<Vec<ExtractedSkill>> {
        let api_key = self.api_key.as_ref().ok_or(Unavailable)?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let capped: String = text.chars().take(MAX_PROMPT_CHARS).collect();
        let prompt = format!("{}\n\n{}\n\nTarget Text:\n{}", INSTRUCTIONS, JSON_REMINDER, capped);
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, api_key
        );
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}]
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Extractor request failed: {}", e);
                Unavailable
            })?;
        if !response.status().is_success() {
            warn!("Extractor request -> HTTP {}", response.status());
            return Err(Unavailable);
        }
        let payload: Value = response.json().await.map_err(|e| {
            warn!("Extractor response was not valid JSON: {}", e);
            Unavailable
        })?;

        let raw = response_text(&payload);
        if raw.trim().is_empty() {
            info!("Extractor returned an empty model response");
            return Ok(Vec::new());
        }
        let skills = parse_extraction(&raw);
        info!("Extractor produced {} skills", skills.len());
        Ok(skills)
    }
}

/// Concatenate candidate part texts from a generateContent response.
fn response_text(payload: &Value) -> String {
    let mut parts = Vec::new();
    if let Some(candidates) = payload.get("candidates").and_then(Value::as_array) {
        for candidate in candidates {
            if let Some(content_parts) = candidate
                .get("content")
                .and_then(|c| c.get("parts"))
                .and_then(Value::as_array)
            {
                for part in content_parts {
                    if let Some(text) = part.get("text").and_then(Value::as_str) {
                        parts.push(text.to_string());
                    }
                }
            }
        }
    }
    parts.join("\n")
}

/// Parse the model's JSON array output, stripping markdown code fences and
/// cleaning each entry: lowercase trimmed names, importance clamped to [0,1]
/// and rounded to 2 decimals. Malformed output yields an empty list.
pub(crate) fn parse_extraction(raw: &str) -> Vec<ExtractedSkill> {
    let mut cleaned = raw.trim();
    if cleaned.starts_with("```") {
        cleaned = cleaned.trim_matches('`');
        if let Some(rest) = cleaned.strip_prefix("json") {
            cleaned = rest;
        }
        cleaned = cleaned.trim();
    }

    let data: Value = match serde_json::from_str(cleaned) {
        Ok(v) => v,
        Err(_) => {
            warn!("Extractor output was not parseable JSON ({} chars)", raw.len());
            return Vec::new();
        }
    };
    let items = match data.as_array() {
        Some(items) => items,
        None => return Vec::new(),
    };

    let mut skills = Vec::new();
    for item in items {
        let name = item
            .get("skill")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_lowercase();
        if name.is_empty() {
            continue;
        }
        let importance = item
            .get("importance")
            .and_then(Value::as_f64)
            .unwrap_or(1.0)
            .clamp(0.0, 1.0) as f32;
        skills.push(ExtractedSkill {
            skill: name,
            importance: (importance * 100.0).round() / 100.0,
        });
    }
    skills
}
