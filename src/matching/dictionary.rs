//! Cross-domain skill dictionary and phrase scanning
//!
//! The static term list keeps dictionary-only aggregation useful when no
//! taxonomy data is available. `SkillScanner` turns a vocabulary into an
//! Aho-Corasick phrase matcher and derives importance from relative mention
//! frequency.

use aho_corasick::AhoCorasick;
use log::debug;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Fallback list kept for runs without taxonomy enrichment. Lowercase terms,
/// broad cross-industry coverage.
const FALLBACK_SKILL_TERMS: &[&str] = &[
    // Software engineering & programming languages
    "python", "java", "javascript", "typescript", "node.js", "react", "angular", "vue",
    "c#", ".net", "c++", "go", "golang", "rust", "php", "ruby", "scala", "swift", "kotlin",
    "sql", "postgresql", "mysql", "sqlite", "mongodb", "cassandra", "redis",
    "graphql", "rest api", "grpc", "soap", "xml", "json",
    "spring", "spring boot", "hibernate", "django", "flask", "fastapi", "express", "rails",
    "next.js", "svelte", "jquery", "redux", "websocket",
    "android", "ios", "flutter", "react native",
    // Cloud & infrastructure
    "aws", "azure", "gcp", "cloudformation", "terraform", "ansible", "puppet",
    "kubernetes", "docker", "openshift", "helm", "istio",
    "serverless", "lambda", "devops", "sre", "infrastructure as code",
    "prometheus", "grafana", "datadog", "splunk", "elasticsearch", "kibana", "logstash",
    "network security", "firewalls", "vpn", "load balancing", "dns", "tcp/ip",
    // Data engineering, analytics, ai/ml
    "data engineering", "data analytics", "data science", "etl", "data warehousing",
    "hadoop", "spark", "hive", "flink", "airflow", "dbt",
    "power bi", "tableau", "looker",
    "machine learning", "deep learning", "mlops", "nlp", "natural language processing",
    "computer vision", "pandas", "numpy", "scikit-learn", "tensorflow", "keras", "pytorch",
    "statistics", "predictive modeling", "time series",
    "bigquery", "redshift", "snowflake", "databricks",
    // Cybersecurity & compliance
    "cybersecurity", "penetration testing", "threat modeling", "incident response",
    "iam", "zero trust", "siem", "owasp", "nist", "gdpr", "hipaa", "pci dss", "soc 2",
    "vulnerability management", "digital forensics",
    // QA, testing, automation
    "quality assurance", "test automation", "unit testing", "integration testing",
    "tdd", "bdd", "selenium", "cypress", "playwright", "pytest", "jmeter",
    "performance testing", "chaos engineering",
    // Product & project management
    "product management", "scrum master", "agile", "scrum", "kanban", "lean",
    "jira", "confluence", "stakeholder management", "user stories",
    "project management", "pmp", "prince2", "risk management", "budgeting",
    // UX/UI & creative
    "user experience", "ux research", "wireframing", "prototyping",
    "figma", "sketch", "adobe xd", "design systems", "accessibility", "usability testing",
    // Business, finance, operations
    "business analysis", "requirements gathering", "process improvement", "six sigma",
    "finance", "accounting", "financial modeling", "ifrs", "gaap", "auditing",
    "supply chain", "logistics", "procurement", "erp", "sap",
    "crm", "salesforce", "hubspot",
    // Marketing & communications
    "digital marketing", "seo", "sem", "content marketing", "email marketing",
    "google analytics", "google ads", "campaign management", "copywriting",
    "social media", "market research", "ab testing",
    // Human resources
    "talent acquisition", "recruiting", "hris", "workday",
    "performance management", "compensation", "payroll", "change management",
    // Healthcare & life sciences
    "clinical research", "gmp", "fda compliance", "electronic medical records",
    "hl7", "nursing", "patient care", "medical coding", "biostatistics", "clinical trials",
    // Engineering disciplines
    "mechanical engineering", "electrical engineering", "civil engineering",
    "autocad", "solidworks", "revit", "manufacturing", "lean manufacturing",
    "root cause analysis", "hvac", "plc", "scada",
    // Legal, education, sales
    "legal research", "contracts", "negotiation", "intellectual property", "compliance",
    "curriculum development", "instructional design", "e-learning",
    "account management", "business development", "lead generation", "sales forecasting",
    // Soft skills & leadership
    "leadership", "mentoring", "coaching", "team building", "communication",
    "strategic planning", "problem solving", "critical thinking", "analytical skills",
    "conflict resolution", "time management", "adaptability",
    "object oriented programming", "oop",
    // Emerging technologies
    "blockchain", "smart contracts", "web3", "iot", "edge computing",
    "robotics", "rpa", "chatbots", "ar", "vr", "data privacy",
];

static STATIC_TERMS: OnceLock<Vec<String>> = OnceLock::new();

/// Static dictionary terms, built once per process and read-only thereafter.
pub fn static_skill_terms() -> &'static [String] {
    STATIC_TERMS.get_or_init(|| {
        let mut terms: Vec<String> = FALLBACK_SKILL_TERMS.iter().map(|s| s.to_string()).collect();
        terms.sort();
        terms.dedup();
        terms
    })
}

/// One vocabulary hit with its mention count and derived importance.
#[derive(Debug, Clone)]
pub struct TermMention {
    pub term: String,
    pub count: usize,
    pub importance: f32,
}

/// Phrase matcher over a fixed vocabulary.
pub struct SkillScanner {
    matcher: AhoCorasick,
    vocabulary: Vec<String>,
}

impl SkillScanner {
    /// Build a scanner from lowercase vocabulary terms. Blank terms are
    /// discarded; duplicates are collapsed.
    pub fn new(terms: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut vocabulary: Vec<String> = terms
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        vocabulary.sort();
        vocabulary.dedup();
        // Longest-first so overlapping phrases prefer the longer term.
        vocabulary.sort_by(|a, b| b.len().cmp(&a.len()));
        if vocabulary.is_empty() {
            return None;
        }
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&vocabulary)
            .ok()?;
        Some(Self { matcher, vocabulary })
    }

    /// Scan text for vocabulary mentions, deriving importance from relative
    /// mention frequency: `0.5 + 0.5 * freq / max_freq`, capped at 1.0 and
    /// rounded to 2 decimals. Results are ordered most-frequent first.
    pub fn scan(&self, text: &str) -> Vec<TermMention> {
        let mut counter: HashMap<String, usize> = HashMap::new();
        for mat in self.matcher.find_iter(text) {
            // Token-level matching: reject hits glued to surrounding
            // word characters ("go" inside "google").
            if !word_bounded(text, mat.start(), mat.end()) {
                continue;
            }
            let term = self.vocabulary[mat.pattern().as_usize()].clone();
            *counter.entry(term).or_insert(0) += 1;
        }
        if counter.is_empty() {
            return Vec::new();
        }
        let max_freq = counter.values().copied().max().unwrap_or(1).max(1);
        let mut mentions: Vec<TermMention> = counter
            .into_iter()
            .map(|(term, count)| {
                let score = 0.5 + 0.5 * (count as f32 / max_freq as f32);
                TermMention {
                    term,
                    count,
                    importance: round2(score.min(1.0)),
                }
            })
            .collect();
        mentions.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
        debug!("Skill scan found {} distinct terms", mentions.len());
        mentions
    }
}

fn word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    let is_word = |c: char| c.is_alphanumeric();
    !before.map_or(false, is_word) && !after.map_or(false, is_word)
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
