//! Fallback achievement bullets — used when a generation request carries no
//! experience. Base bullets depend on seniority, specialty bullets on track.

use serde::{Deserialize, Serialize};

/// Seniority of the generated profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Entry,
    Mid,
    Senior,
}

impl ExperienceLevel {
    /// Exact, case-sensitive lookup; unknown labels resolve to `Entry`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "mid" => Self::Mid,
            "senior" => Self::Senior,
            _ => Self::Entry,
        }
    }
}

/// Security specialty of the generated profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Red,
    Blue,
    Grc,
}

impl Track {
    /// Exact, case-sensitive lookup; unknown labels have no specialty.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "red" => Some(Self::Red),
            "blue" => Some(Self::Blue),
            "grc" => Some(Self::Grc),
            _ => None,
        }
    }
}

fn base_achievements(level: ExperienceLevel) -> &'static [&'static str] {
    match level {
        ExperienceLevel::Entry => &[
            "Coordinated triage of security alerts and escalated incidents to Tier 2 analysts.",
            "Documented runbooks that reduced response time by 20% and improved shift handoffs.",
        ],
        ExperienceLevel::Mid => &[
            "Implemented detection use cases aligned to MITRE ATT&CK, improving detection coverage by 25%.",
            "Automated evidence collection with Python, cutting investigation time by 30%.",
        ],
        ExperienceLevel::Senior => &[
            "Led purple team exercises that validated controls and reduced false positives by 18%.",
            "Designed log enrichment pipeline to increase context for incident responders and auditors.",
        ],
    }
}

fn specialty_achievements(track: Track) -> &'static [&'static str] {
    match track {
        Track::Red => &[
            "Executed adversary emulation leveraging MITRE ATT&CK TTPs with documented findings and fixes.",
            "Delivered exploit chain reports with CVSS scoring to inform prioritized remediation.",
        ],
        Track::Blue => &[
            "Built SIEM dashboards for SOC KPIs and delivered weekly threat trend summaries to leadership.",
            "Orchestrated containment workflows via SOAR, lowering mean time to respond (MTTR) by 22%.",
        ],
        Track::Grc => &[
            "Mapped controls to NIST 800-53 and ISO 27001, closing audit gaps and strengthening evidence trails.",
            "Facilitated risk workshops that reclassified critical assets and refined RTO/RPO targets.",
        ],
    }
}

/// Base bullets for `level`, followed by the `track` specialty bullets.
pub fn build_achievements(level: ExperienceLevel, track: Option<Track>) -> Vec<String> {
    base_achievements(level)
        .iter()
        .chain(track.map(specialty_achievements).unwrap_or_default())
        .map(|line| line.to_string())
        .collect()
}
