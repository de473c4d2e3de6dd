//! ATS score aggregation.
//!
//! Combines keyword coverage, impact density, a length-based readability
//! tier, skill count and role relevance into a composite score in 0..=100.
//!
//! Weights and thresholds are fixed for compatibility with existing scores:
//!   total = 0.35*coverage + 0.25*impact + 0.15*readability
//!         + min(5*skills, 25) + 0.2*relevance

use serde::{Deserialize, Serialize};

use crate::ats::keywords::{extract_keywords, prioritize, KeywordCount};
use crate::models::resume::{ExperienceEntry, ScorableResume};
use crate::text::sanitize;

/// Coverage used when the target role has no tracked keywords.
const UNTRACKED_COVERAGE: u32 = 70;
/// Role relevance used when the target role has no tracked keywords.
const UNTRACKED_RELEVANCE: u32 = 65;
const MAX_SKILLS_POINTS: usize = 25;
const POINTS_PER_SKILL: usize = 5;

const WEAK_COVERAGE: &str = "Increase role-specific keywords and framework references.";
const WEAK_IMPACT: &str = "Add metrics to achievements using %, $, or quantitative outcomes.";
const WEAK_READABILITY: &str = "Tighten phrasing and remove fluff to improve readability.";
const WEAK_SKILLS: &str = "Expand skills section with clustered, ATS-friendly keywords.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub coverage_score: u32,
    pub impact_score: u32,
    pub readability_score: u32,
    pub role_relevance: u32,
    pub skills_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// 0 – 100
    pub total: u32,
    pub breakdown: ScoreBreakdown,
    pub weaknesses: Vec<String>,
    pub keyword_counts: KeywordCount,
}

/// An achievement carries a quantitative signal if it has a digit, `%` or `$`.
fn has_metric(line: &str) -> bool {
    line.chars()
        .any(|c| c.is_ascii_digit() || c == '%' || c == '$')
}

/// Share of achievement bullets with a quantitative signal, 0 – 100.
/// Zero when there are no entries or no bullets.
pub fn compute_impact_density(experience: &[ExperienceEntry]) -> u32 {
    let bullet_count: usize = experience.iter().map(|e| e.achievements.len()).sum();
    if bullet_count == 0 {
        return 0;
    }

    let metric_bullets = experience
        .iter()
        .flat_map(|e| e.achievements.iter())
        .filter(|line| has_metric(line))
        .count();

    let density = (metric_bullets as f64 / bullet_count as f64 * 100.0).round() as u32;
    density.min(100)
}

/// Length tiers: thin (<400) 60, balanced (<1200) 80, verbose 70.
/// Length is measured in UTF-16 code units to keep historical tiers stable.
pub fn compute_readability(text: &str) -> u32 {
    let length = sanitize(text).encode_utf16().count();
    if length < 400 {
        60
    } else if length < 1200 {
        80
    } else {
        70
    }
}

/// Scores a resume against the tracked keywords of its target role.
pub fn score_resume<R: ScorableResume>(resume: &R) -> ScoreResult {
    let narrative = serde_json::to_string(resume).unwrap_or_default();
    let keyword_counts = extract_keywords(&narrative);
    let targeted = prioritize(resume.target_role(), &narrative);

    let coverage_score = if targeted.is_empty() {
        UNTRACKED_COVERAGE
    } else {
        let present = targeted.iter().filter(|item| item.present).count();
        (present as f64 / targeted.len() as f64 * 100.0).round() as u32
    };
    let impact_score = compute_impact_density(resume.experience());
    let readability_score = compute_readability(&narrative);
    let skills_count = resume.skills().len();
    let role_relevance = if targeted.is_empty() {
        UNTRACKED_RELEVANCE
    } else {
        (coverage_score as f64 * 0.7 + impact_score as f64 * 0.3).round() as u32
    };

    let skills_points = skills_count
        .saturating_mul(POINTS_PER_SKILL)
        .min(MAX_SKILLS_POINTS);
    let total = (coverage_score as f64 * 0.35
        + impact_score as f64 * 0.25
        + readability_score as f64 * 0.15
        + skills_points as f64
        + role_relevance as f64 * 0.2)
        .round() as u32;

    let mut weaknesses = Vec::new();
    if coverage_score < 80 {
        weaknesses.push(WEAK_COVERAGE.to_string());
    }
    if impact_score < 60 {
        weaknesses.push(WEAK_IMPACT.to_string());
    }
    if readability_score < 70 {
        weaknesses.push(WEAK_READABILITY.to_string());
    }
    if skills_count < 8 {
        weaknesses.push(WEAK_SKILLS.to_string());
    }

    ScoreResult {
        total: total.min(100),
        breakdown: ScoreBreakdown {
            coverage_score,
            impact_score,
            readability_score,
            role_relevance,
            skills_count,
        },
        weaknesses,
        keyword_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeInput;

    fn entry(achievements: &[&str]) -> ExperienceEntry {
        ExperienceEntry {
            achievements: achievements.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_impact_density_empty_is_zero() {
        assert_eq!(compute_impact_density(&[]), 0);
        assert_eq!(compute_impact_density(&[entry(&[]), entry(&[])]), 0);
    }

    #[test]
    fn test_impact_density_all_metrics_is_100() {
        let experience = [entry(&["Cut MTTR by 22 minutes", "Closed 14 findings"]), entry(&["Saved 3 FTEs"])];
        assert_eq!(compute_impact_density(&experience), 100);
    }

    #[test]
    fn test_impact_density_rounds() {
        let experience = [entry(&["Cut cost by 20%", "Led audits", "Wrote docs"])];
        assert_eq!(compute_impact_density(&experience), 33);
        let experience = [entry(&["Cut cost by 20%", "Saved $5k"]), entry(&["Wrote docs"])];
        assert_eq!(compute_impact_density(&experience), 67);
    }

    #[test]
    fn test_impact_density_signals() {
        assert!(has_metric("40% faster"));
        assert!(has_metric("$ savings"));
        assert!(has_metric("v2 rollout"));
        assert!(!has_metric("Improved the user experience"));
    }

    #[test]
    fn test_readability_tiers() {
        assert_eq!(compute_readability(""), 60);
        assert_eq!(compute_readability(&"a".repeat(399)), 60);
        assert_eq!(compute_readability(&"a".repeat(400)), 80);
        assert_eq!(compute_readability(&"a".repeat(1199)), 80);
        assert_eq!(compute_readability(&"a".repeat(1200)), 70);
    }

    #[test]
    fn test_readability_measures_sanitized_length() {
        let padded = format!("{}{}", "a".repeat(399), " ".repeat(50));
        assert_eq!(compute_readability(&padded), 60);
    }

    #[test]
    fn test_readability_counts_utf16_units() {
        // Each emoji is two UTF-16 units.
        assert_eq!(compute_readability(&"🔒".repeat(200)), 80);
        assert_eq!(compute_readability(&"é".repeat(400)), 80);
        assert_eq!(compute_readability(&"🔒".repeat(199)), 60);
    }

    #[test]
    fn test_null_achievement_counts_as_bullet() {
        let input: ResumeInput = serde_json::from_value(serde_json::json!({
            "experience": [{ "achievements": ["Cut 20%", null] }]
        }))
        .unwrap();
        assert_eq!(compute_impact_density(&input.experience), 50);
    }

    #[test]
    fn test_cloud_security_engineer_example() {
        let resume = ResumeInput {
            target_role: Some("cloud security engineer".to_string()),
            skills: strings(&["AWS", "IAM", "Terraform", "KMS"]),
            experience: vec![entry(&["Delivered IAM hardening"])],
            ..Default::default()
        };
        let score = score_resume(&resume);

        assert!(score.breakdown.coverage_score > 0);
        assert!(score.total <= 100);
        // 4 of 12 tracked keywords present.
        assert_eq!(score.breakdown.coverage_score, 33);
        assert_eq!(score.breakdown.impact_score, 0);
        assert_eq!(score.breakdown.readability_score, 60);
        assert_eq!(score.breakdown.skills_count, 4);
        assert_eq!(score.breakdown.role_relevance, 23);
        assert_eq!(score.total, 45);
        assert_eq!(
            score.weaknesses,
            vec![WEAK_COVERAGE, WEAK_IMPACT, WEAK_READABILITY, WEAK_SKILLS]
        );
        assert_eq!(score.keyword_counts.get("iam"), Some(&2));
    }

    #[test]
    fn test_untracked_role_uses_fixed_defaults() {
        let score = score_resume(&ResumeInput {
            target_role: Some("astronaut".to_string()),
            ..Default::default()
        });
        assert_eq!(score.breakdown.coverage_score, 70);
        assert_eq!(score.breakdown.role_relevance, 65);
        assert_eq!(score.breakdown.impact_score, 0);
        assert_eq!(score.breakdown.skills_count, 0);
    }

    #[test]
    fn test_missing_role_and_fields_tolerated() {
        let score = score_resume(&ResumeInput::default());
        assert!(score.total <= 100);
        assert_eq!(score.breakdown.coverage_score, 70);
        assert_eq!(score.weaknesses.len(), 4);
    }

    #[test]
    fn test_total_is_clamped_to_100() {
        let achievements: Vec<String> = (0..8)
            .map(|i| format!("Rolled out IAM KMS CSPM guardrails across {i} AWS Azure GCP accounts"))
            .collect();
        let resume = ResumeInput {
            target_role: Some("Cloud Security Engineer".to_string()),
            skills: strings(&[
                "AWS", "Azure", "GCP", "IAM", "KMS", "CSPM", "SIEM", "EDR", "Kubernetes",
                "Terraform",
            ]),
            experience: vec![ExperienceEntry {
                achievements,
                ..Default::default()
            }],
            ..Default::default()
        };
        let score = score_resume(&resume);

        assert_eq!(score.breakdown.impact_score, 100);
        // "Zero Trust" and "Key Management" are multi-word and never match.
        assert_eq!(score.breakdown.coverage_score, 83);
        assert_eq!(score.breakdown.readability_score, 80);
        assert_eq!(score.total, 100);
        assert!(score.weaknesses.is_empty());
    }

    #[test]
    fn test_total_always_within_bounds() {
        let roles = ["", "grc", "soc analyst", "penetration tester", "unknown"];
        let skill_sets: [&[&str]; 3] = [&[], &["Nmap"], &["a", "b", "c", "d", "e", "f", "g", "h", "i"]];
        let bullet_sets: [&[&str]; 3] = [&[], &["Wrote docs"], &["Closed 40% of CVE backlog"]];
        for role in roles {
            for skills in skill_sets {
                for bullets in bullet_sets {
                    let score = score_resume(&ResumeInput {
                        target_role: Some(role.to_string()),
                        skills: strings(skills),
                        experience: vec![entry(bullets)],
                        ..Default::default()
                    });
                    assert!(score.total <= 100);
                    assert!(score.breakdown.coverage_score <= 100);
                    assert!(score.breakdown.role_relevance <= 100);
                }
            }
        }
    }

    #[test]
    fn test_unrecognized_fields_feed_keyword_coverage() {
        let input: ResumeInput = serde_json::from_value(serde_json::json!({
            "targetRole": "grc",
            "certifications": ["NIST", "Audit"],
            "education": [{ "degree": "BS", "coursework": "Risk Policy Controls Evidence" }],
            "experience": [{ "role": "Analyst", "description": "NIST audit" }]
        }))
        .unwrap();
        let score = score_resume(&input);

        // Everything but "ISO 27001" is present.
        assert_eq!(score.breakdown.coverage_score, 86);
        assert_eq!(score.breakdown.impact_score, 0);
        assert_eq!(score.breakdown.role_relevance, 60);
        assert_eq!(score.total, 51);
        assert_eq!(score.keyword_counts.get("nist"), Some(&2));
        assert_eq!(score.keyword_counts.get("risk"), Some(&1));
    }

    #[test]
    fn test_absent_collections_add_no_tokens() {
        let input: ResumeInput =
            serde_json::from_value(serde_json::json!({ "targetRole": "grc" })).unwrap();
        let counts = score_resume(&input).keyword_counts;
        let tokens: Vec<&str> = counts.keys().map(String::as_str).collect();
        assert_eq!(tokens, vec!["grc", "targetrole"]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(score_resume(&ResumeInput::default())).unwrap();
        assert!(value["breakdown"]["coverageScore"].is_number());
        assert!(value["keywordCounts"].is_object());
    }
}
