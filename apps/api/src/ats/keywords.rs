//! Keyword engine — tokenizes free text, counts keyword frequency and ranks a
//! role's tracked keywords against a narrative.
//!
//! Matching is token based: a multi-word keyword such as "Zero Trust" is
//! looked up as a single token and therefore never counts as present.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::sanitize;

/// Lowercased token → occurrence count.
pub type KeywordCount = BTreeMap<String, u32>;

/// Tracked keywords per target role (role names lowercased).
pub const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "cloud security engineer",
        &[
            "IAM",
            "CSPM",
            "KMS",
            "AWS",
            "Azure",
            "GCP",
            "SIEM",
            "EDR",
            "Kubernetes",
            "Terraform",
            "Zero Trust",
            "Key Management",
        ],
    ),
    (
        "soc analyst",
        &["SIEM", "SOAR", "MITRE ATT&CK", "UEBA", "EDR", "SOPs", "KPIs"],
    ),
    (
        "penetration tester",
        &[
            "Burp Suite",
            "Nmap",
            "Metasploit",
            "OWASP",
            "Exploit",
            "CVE",
            "Red Team",
            "Reporting",
        ],
    ),
    (
        "grc",
        &["NIST", "ISO 27001", "Risk", "Policy", "Audit", "Controls", "Evidence"],
    ),
];

static TOKEN_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9+]+").unwrap());

/// A tracked keyword ranked against a narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityItem {
    pub keyword: String,
    pub present: bool,
    pub frequency: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthSuggestions {
    pub missing: Vec<String>,
    pub low_frequency: Vec<String>,
    pub recommendation: String,
}

const GOOD_COVERAGE: &str =
    "Great coverage. Consider adding specific outcomes or metrics to strengthen impact.";

/// Tracked keywords for `role` (case-insensitive). Unknown roles have none.
pub fn role_keywords(role: &str) -> &'static [&'static str] {
    let key = role.to_lowercase();
    ROLE_KEYWORDS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, keywords)| *keywords)
        .unwrap_or_default()
}

/// Counts lowercase tokens, splitting on anything outside `[a-z0-9+]`.
pub fn extract_keywords(text: &str) -> KeywordCount {
    let normalized = sanitize(text).to_lowercase();
    let mut counts = KeywordCount::new();
    for token in TOKEN_SEPARATOR
        .split(&normalized)
        .filter(|token| !token.is_empty())
    {
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Ranks the role's tracked keywords by frequency in `narrative`, highest
/// first; equal frequencies put present keywords first. The sort is stable,
/// so remaining ties keep table order.
pub fn prioritize(role: &str, narrative: &str) -> Vec<PriorityItem> {
    let counts = extract_keywords(narrative);
    let mut ranked: Vec<PriorityItem> = role_keywords(role)
        .iter()
        .map(|keyword| {
            let frequency = counts.get(&keyword.to_lowercase()).copied().unwrap_or(0);
            PriorityItem {
                keyword: keyword.to_string(),
                present: frequency > 0,
                frequency,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| b.present.cmp(&a.present))
    });
    ranked
}

/// Missing and once-mentioned keywords for `role`, with a recommendation line.
pub fn strength_suggestions(role: &str, content: &str) -> StrengthSuggestions {
    let ranked = prioritize(role, content);
    let missing: Vec<String> = ranked
        .iter()
        .filter(|item| !item.present)
        .map(|item| item.keyword.clone())
        .collect();
    let low_frequency: Vec<String> = ranked
        .iter()
        .filter(|item| item.frequency == 1)
        .map(|item| item.keyword.clone())
        .collect();

    let recommendation = if missing.is_empty() && low_frequency.is_empty() {
        GOOD_COVERAGE.to_string()
    } else {
        format!(
            "Consider weaving in these priority terms: {}. Reinforce limited mentions: {}.",
            missing.join(", "),
            low_frequency.join(", ")
        )
    };

    StrengthSuggestions {
        missing,
        low_frequency,
        recommendation,
    }
}
