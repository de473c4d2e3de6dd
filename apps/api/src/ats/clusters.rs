//! Skill clustering into fixed domain buckets.
//!
//! Rules are data: an ordered (cluster, pattern) table evaluated
//! first-match-wins against the sanitized, lowercased skill.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::sanitize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillCluster {
    Cloud,
    SecurityOps,
    Governance,
    Development,
    Tooling,
    Other,
}

/// Precedence order matters: "cloud incident response" is a cloud skill.
const CLUSTER_RULES: &[(SkillCluster, &str)] = &[
    (SkillCluster::Cloud, r"aws|azure|gcp|kubernetes|terraform|cloud"),
    (SkillCluster::SecurityOps, r"siem|soar|edr|soc|incident|mitre"),
    (SkillCluster::Governance, r"nist|iso|policy|audit|risk|governance"),
    (
        SkillCluster::Development,
        r"python|javascript|bash|automation|scripting|development",
    ),
    (SkillCluster::Tooling, r"burp|nmap|wireshark|metasploit|nessus"),
];

static COMPILED_RULES: Lazy<Vec<(SkillCluster, Regex)>> = Lazy::new(|| {
    CLUSTER_RULES
        .iter()
        .map(|(cluster, pattern)| (*cluster, Regex::new(pattern).unwrap()))
        .collect()
});

/// Skills grouped by domain, original spelling preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillClusters {
    pub cloud: Vec<String>,
    pub security_ops: Vec<String>,
    pub governance: Vec<String>,
    pub development: Vec<String>,
    pub tooling: Vec<String>,
    pub other: Vec<String>,
}

impl SkillClusters {
    #[cfg(test)]
    pub fn bucket(&self, cluster: SkillCluster) -> &[String] {
        match cluster {
            SkillCluster::Cloud => &self.cloud,
            SkillCluster::SecurityOps => &self.security_ops,
            SkillCluster::Governance => &self.governance,
            SkillCluster::Development => &self.development,
            SkillCluster::Tooling => &self.tooling,
            SkillCluster::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, cluster: SkillCluster) -> &mut Vec<String> {
        match cluster {
            SkillCluster::Cloud => &mut self.cloud,
            SkillCluster::SecurityOps => &mut self.security_ops,
            SkillCluster::Governance => &mut self.governance,
            SkillCluster::Development => &mut self.development,
            SkillCluster::Tooling => &mut self.tooling,
            SkillCluster::Other => &mut self.other,
        }
    }

    pub fn total(&self) -> usize {
        self.cloud.len()
            + self.security_ops.len()
            + self.governance.len()
            + self.development.len()
            + self.tooling.len()
            + self.other.len()
    }
}

/// First matching cluster for a single skill, or `Other`.
pub fn classify_skill(skill: &str) -> SkillCluster {
    let normalized = sanitize(skill).to_lowercase();
    COMPILED_RULES
        .iter()
        .find(|(_, pattern)| pattern.is_match(&normalized))
        .map(|(cluster, _)| *cluster)
        .unwrap_or(SkillCluster::Other)
}

/// Partitions `skills` into buckets; every skill lands in exactly one.
pub fn cluster_skills<S: AsRef<str>>(skills: &[S]) -> SkillClusters {
    let mut clusters = SkillClusters::default();
    for skill in skills {
        let skill = skill.as_ref();
        clusters
            .bucket_mut(classify_skill(skill))
            .push(skill.to_string());
    }
    clusters
}
