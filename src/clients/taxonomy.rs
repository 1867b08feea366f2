//! Occupational taxonomy client (O*NET-style REST service)

use crate::clients::{ClientResult, Unavailable};
use async_trait::async_trait;
use log::{info, warn};
use serde_json::Value;
use std::time::Duration;

const ONET_ENDPOINT: &str = "https://services.onetcenter.org/ws/online";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// One (skill, importance) pair from a taxonomy report, importance in [0,1].
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomySkill {
    pub skill: String,
    pub importance: f32,
}

/// Occupational-taxonomy collaborator consumed by the requirement aggregator.
#[async_trait]
pub trait TaxonomyClient: Send + Sync {
    /// Whether callers should attempt taxonomy lookups at all.
    fn is_enabled(&self) -> bool;

    /// Minimum importance a candidate-pool item must carry to be considered
    /// relevant. `None` disables filtering.
    fn importance_threshold(&self) -> Option<f32>;

    /// Resolve a job-title hint to zero or more occupation codes.
    async fn search_codes(&self, title: &str) -> ClientResult<Vec<String>>;

    /// Technology candidate pool for an occupation code.
    async fn technology_skills(&self, code: &str) -> ClientResult<Vec<TaxonomySkill>>;

    /// Knowledge candidate pool for an occupation code.
    async fn knowledge_skills(&self, code: &str) -> ClientResult<Vec<TaxonomySkill>>;

    /// Soft-skill (work-style) observations for an occupation code.
    async fn soft_skills(&self, code: &str) -> ClientResult<Vec<TaxonomySkill>>;
}

/// O*NET OnLine web-services client with basic-auth credentials.
pub struct OnetClient {
    http: reqwest::Client,
    endpoint: String,
    username: Option<String>,
    password: Option<String>,
    threshold: Option<f32>,
    max_codes: usize,
}

impl OnetClient {
    /// Build from `ONET_USER` / `ONET_PASSWORD`; absent credentials leave the
    /// client disabled rather than failing.
    pub fn from_env(threshold: Option<f32>) -> Self {
        Self::new(
            ONET_ENDPOINT.to_string(),
            std::env::var("ONET_USER").ok(),
            std::env::var("ONET_PASSWORD").ok(),
            threshold,
        )
    }

    /// A client that reports itself disabled and never issues requests.
    pub fn disabled() -> Self {
        Self::new(ONET_ENDPOINT.to_string(), None, None, None)
    }

    pub fn new(
        endpoint: String,
        username: Option<String>,
        password: Option<String>,
        threshold: Option<f32>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            endpoint,
            username,
            password,
            threshold,
            max_codes: 3,
        }
    }

    async fn get_json(&self, url: &str) -> ClientResult<Value> {
        let (user, password) = match (&self.username, &self.password) {
            (Some(u), Some(p)) => (u, p),
            _ => return Err(Unavailable),
        };
        let response = self
            .http
            .get(url)
            .basic_auth(user, Some(password))
            .header("Accept", "application/json")
            .header("User-Agent", "skill-match")
            .send()
            .await
            .map_err(|e| {
                warn!("Taxonomy request failed for {}: {}", url, e);
                Unavailable
            })?;
        let status = response.status();
        if !status.is_success() {
            warn!("Taxonomy request {} -> HTTP {}", url, status);
            return Err(Unavailable);
        }
        response.json::<Value>().await.map_err(|e| {
            warn!("Taxonomy response for {} was not valid JSON: {}", url, e);
            Unavailable
        })
    }
}

#[async_trait]
impl TaxonomyClient for OnetClient {
    fn is_enabled(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    fn importance_threshold(&self) -> Option<f32> {
        self.threshold
    }

    async fn search_codes(&self, title: &str) -> ClientResult<Vec<String>> {
        if title.trim().is_empty() {
            return Ok(Vec::new());
        }
        let url = format!(
            "{}/search?keyword={}&start=1&end={}",
            self.endpoint,
            urlencode(title),
            self.max_codes
        );
        let data = self.get_json(&url).await?;
        let codes = parse_occupation_codes(&data);
        if codes.is_empty() {
            info!("Taxonomy search returned no matches for title={:?}", title);
        } else {
            info!("Taxonomy search resolved title={:?} to codes {:?}", title, codes);
        }
        Ok(codes)
    }

    async fn technology_skills(&self, code: &str) -> ClientResult<Vec<TaxonomySkill>> {
        let url = format!("{}/occupations/{}/summary/technology?display=long", self.endpoint, code);
        let data = self.get_json(&url).await?;
        Ok(parse_technology_payload(&data))
    }

    async fn knowledge_skills(&self, code: &str) -> ClientResult<Vec<TaxonomySkill>> {
        let url = format!("{}/occupations/{}/details/knowledge?display=long", self.endpoint, code);
        let data = self.get_json(&url).await?;
        Ok(parse_importance_payload(&data))
    }

    async fn soft_skills(&self, code: &str) -> ClientResult<Vec<TaxonomySkill>> {
        let url = format!("{}/occupations/{}/details/work_styles?display=long", self.endpoint, code);
        let data = self.get_json(&url).await?;
        Ok(parse_importance_payload(&data))
    }
}

fn urlencode(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') {
                c.to_string()
            } else if c == ' ' {
                "%20".to_string()
            } else {
                c.to_string()
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect()
}

fn parse_occupation_codes(data: &Value) -> Vec<String> {
    data.get("occupation")
        .and_then(Value::as_array)
        .map(|occupations| {
            occupations
                .iter()
                .filter_map(|o| o.get("code").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Collect candidate `element` arrays from the wrapper shapes the service
/// uses: direct, under `report`/`summary`/`details`, under a nested `skills`
/// object, or inside `category` lists.
fn element_lists(data: &Value) -> Vec<&Vec<Value>> {
    let mut lists = Vec::new();

    fn add<'a>(lists: &mut Vec<&'a Vec<Value>>, obj: &'a Value) {
        if let Some(elems) = obj.get("element").and_then(Value::as_array) {
            lists.push(elems);
        }
    }

    add(&mut lists, data);
    for key in ["report", "summary", "details"] {
        if let Some(wrapper) = data.get(key) {
            add(&mut lists, wrapper);
            if let Some(skills) = wrapper.get("skills") {
                add(&mut lists, skills);
            }
            for cat_key in ["category", "categories", "groups"] {
                if let Some(cats) = wrapper.get(cat_key).and_then(Value::as_array) {
                    for cat in cats {
                        add(&mut lists, cat);
                    }
                }
            }
        }
    }
    lists
}

fn element_name(el: &Value) -> Option<&str> {
    el.get("name")
        .and_then(Value::as_str)
        .or_else(|| el.get("element_name").and_then(Value::as_str))
}

/// Parse importance-scored reports (knowledge, work styles), scaling the
/// service's 0-100 values to [0,1].
pub(crate) fn parse_importance_payload(data: &Value) -> Vec<TaxonomySkill> {
    let mut results = Vec::new();
    for elements in element_lists(data) {
        for el in elements {
            let name = match element_name(el) {
                Some(n) => n,
                None => continue,
            };
            // Details endpoints carry a score object; some responses label
            // importance inside a data array instead.
            let mut value = el
                .get("score")
                .and_then(|s| s.get("value").or_else(|| s.get("score")))
                .and_then(Value::as_f64);
            if value.is_none() {
                if let Some(entries) = el.get("data").and_then(Value::as_array) {
                    for d in entries {
                        let label = d
                            .get("name")
                            .or_else(|| d.get("label"))
                            .or_else(|| d.get("id"))
                            .and_then(Value::as_str)
                            .unwrap_or("")
                            .to_lowercase();
                        if label.contains("importance") || label == "im" {
                            value = d
                                .get("value")
                                .or_else(|| d.get("score"))
                                .and_then(Value::as_f64);
                            break;
                        }
                    }
                }
            }
            if let Some(raw) = value {
                results.push(TaxonomySkill {
                    skill: name.to_string(),
                    importance: ((raw / 100.0) as f32).clamp(0.0, 1.0),
                });
            }
        }
    }
    results
}

/// Parse the technology summary: each category name becomes a skill at 1.0,
/// each hot-technology example gets a tiered score from the example-list
/// length (1-2 examples -> 1.0, 3-4 -> 0.9, ... floor 0.1).
pub(crate) fn parse_technology_payload(data: &Value) -> Vec<TaxonomySkill> {
    let mut results = Vec::new();
    for elements in element_lists(data) {
        for el in elements {
            if let Some(name) = element_name(el) {
                results.push(TaxonomySkill {
                    skill: name.to_string(),
                    importance: 1.0,
                });
            }
            let examples = el
                .get("example")
                .or_else(|| el.get("examples"))
                .and_then(Value::as_array);
            if let Some(examples) = examples {
                let tiered = tiered_score(examples.len());
                for ex in examples {
                    let hot = ex
                        .get("hot_technology")
                        .map(|h| !h.is_null() && h != &Value::Bool(false))
                        .unwrap_or(false);
                    if !hot {
                        continue;
                    }
                    if let Some(ex_name) = element_name(ex) {
                        results.push(TaxonomySkill {
                            skill: ex_name.to_string(),
                            importance: tiered,
                        });
                    }
                }
            }
        }
    }
    results
}

fn tiered_score(examples: usize) -> f32 {
    let bucket = ((examples + 1) / 2).max(1);
    let raw = (110_i64 - bucket as i64 * 10).max(10);
    raw as f32 / 100.0
}
