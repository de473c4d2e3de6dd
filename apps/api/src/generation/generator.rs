//! Resume Generation — orchestrates the full generation pipeline.
//!
//! Flow: default + normalize input → cluster skills → score → keyword
//!       suggestions → render HTML layout.
//!
//! Every free-text field is sanitized and HTML-escaped before it reaches a
//! template.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::clusters::cluster_skills;
use crate::ats::keywords::{strength_suggestions, StrengthSuggestions};
use crate::ats::scorer::{score_resume, ScoreResult};
use crate::errors::AppError;
use crate::generation::achievements::{build_achievements, ExperienceLevel, Track};
use crate::layout::{render, TemplateStore};
use crate::models::lenient::{self, non_empty_or};
use crate::models::resume::{EducationEntry, ExperienceEntry, Resume};
use crate::text::{escape_html, normalize_list, sanitize, sentence_case};

const DEFAULT_NAME: &str = "Alex Candidate";
const DEFAULT_HEADLINE: &str = "Cybersecurity Professional";
const DEFAULT_SUMMARY: &str =
    "Security practitioner focused on resilient architectures and measurable outcomes.";
const DEFAULT_TARGET_ROLE: &str = "Cloud Security Engineer";
const DEFAULT_LEVEL: &str = "mid";
const DEFAULT_TRACK: &str = "blue";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for resume generation. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub target_role: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::object_list")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "lenient::object_list")]
    pub education: Vec<EducationEntry>,
    /// Layout name; the configured default when absent.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub layout: Option<String>,
    /// entry | mid | senior
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub level: Option<String>,
    /// red | blue | grc
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub track: Option<String>,
    /// Write the rendered HTML to the output directory.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub export: bool,
}

/// Output of the generation pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResume {
    pub resume: Resume,
    pub html: String,
    pub score: ScoreResult,
    pub suggestions: StrengthSuggestions,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Builds, scores and renders a resume.
///
/// Missing experience is replaced by a single fallback role whose bullets
/// come from `level` and `track`; missing education by a fallback degree.
/// Template loading is the only fallible step.
pub async fn generate_resume(
    templates: &dyn TemplateStore,
    default_layout: &str,
    request: GenerateRequest,
) -> Result<GeneratedResume, AppError> {
    let resume = build_resume(&request);
    info!("Generating resume for target role: {}", resume.target_role);

    let score = score_resume(&resume);
    let narrative = serde_json::to_string(&resume).unwrap_or_default();
    let suggestions = strength_suggestions(&resume.target_role, &narrative);

    let layout = non_empty_or(request.layout.as_deref(), default_layout);
    let data = template_data(&resume, &score, &suggestions);
    let html = render(templates, &layout, &data).await?;

    info!("Generated resume with score {}", score.total);

    Ok(GeneratedResume {
        resume,
        html,
        score,
        suggestions,
    })
}

/// Applies defaults and normalization to the request.
fn build_resume(request: &GenerateRequest) -> Resume {
    let name = non_empty_or(request.name.as_deref(), DEFAULT_NAME);
    let headline = non_empty_or(request.headline.as_deref(), DEFAULT_HEADLINE);
    let summary = non_empty_or(request.summary.as_deref(), DEFAULT_SUMMARY);
    let target_role = non_empty_or(request.target_role.as_deref(), DEFAULT_TARGET_ROLE);

    let skills = normalize_list(&request.skills);
    let clustered_skills = cluster_skills(&skills);

    let experience = if request.experience.is_empty() {
        let level = ExperienceLevel::from_label(request.level.as_deref().unwrap_or(DEFAULT_LEVEL));
        let track = Track::from_label(request.track.as_deref().unwrap_or(DEFAULT_TRACK));
        vec![ExperienceEntry {
            role: Some("Security Analyst".to_string()),
            company: Some("Fictional Corp".to_string()),
            period: Some("2021 - Present".to_string()),
            achievements: build_achievements(level, track),
            ..Default::default()
        }]
    } else {
        request.experience.clone()
    };

    let education = if request.education.is_empty() {
        vec![EducationEntry {
            degree: Some("B.S. Cybersecurity".to_string()),
            institution: Some("Example University".to_string()),
            period: Some("2017 - 2021".to_string()),
            ..Default::default()
        }]
    } else {
        request.education.clone()
    };

    Resume {
        name: sanitize(&name),
        headline: sentence_case(&headline),
        summary: sentence_case(&summary),
        target_role,
        skills,
        clustered_skills,
        experience,
        education,
    }
}

/// Placeholder values for the layout. All text is escaped here.
fn template_data(
    resume: &Resume,
    score: &ScoreResult,
    suggestions: &StrengthSuggestions,
) -> HashMap<&'static str, String> {
    let skills = resume
        .skills
        .iter()
        .map(|skill| format!(r#"<span class="pill">{}</span>"#, escape_html(skill)))
        .collect::<Vec<_>>()
        .join(" ");

    let experience = resume
        .experience
        .iter()
        .map(render_experience)
        .collect::<String>();

    let education = resume
        .education
        .iter()
        .map(render_education)
        .collect::<String>();

    let breakdown = &score.breakdown;
    HashMap::from([
        ("name", escape_html(&resume.name)),
        ("headline", escape_html(&resume.headline)),
        ("summary", escape_html(&resume.summary)),
        ("skills", skills),
        ("experience", experience),
        ("education", education),
        ("score", score.total.to_string()),
        (
            "scoreBreakdown",
            format!(
                "{}% coverage · {}% impact · {}% readability",
                breakdown.coverage_score, breakdown.impact_score, breakdown.readability_score
            ),
        ),
        ("suggestions", escape_html(&suggestions.recommendation)),
    ])
}

fn escape_opt(value: &Option<String>) -> String {
    escape_html(value.as_deref().unwrap_or_default())
}

fn render_experience(entry: &ExperienceEntry) -> String {
    let bullets = entry
        .achievements
        .iter()
        .map(|line| format!("<li>{}</li>", escape_html(&sentence_case(line))))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"
        <div class="experience-item">
          <div class="title-row">
            <span class="role">{role}</span>
            <span class="period">{period}</span>
          </div>
          <div class="company">{company}</div>
          <ul>{bullets}</ul>
        </div>
      "#,
        role = escape_opt(&entry.role),
        period = escape_opt(&entry.period),
        company = escape_opt(&entry.company),
    )
}

fn render_education(entry: &EducationEntry) -> String {
    format!(
        r#"
        <div class="education-item">
          <div class="degree">{degree}</div>
          <div class="institution">{institution}</div>
          <div class="period">{period}</div>
        </div>
      "#,
        degree = escape_opt(&entry.degree),
        institution = escape_opt(&entry.institution),
        period = escape_opt(&entry.period),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
