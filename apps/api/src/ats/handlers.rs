//! Axum route handlers for the ATS scoring API.
//!
//! The scoring core never fails, so these handlers only reject bodies that
//! are not JSON at all (axum's `Json` extractor does that).

use axum::Json;
use serde::Deserialize;

use crate::ats::clusters::{cluster_skills, SkillClusters};
use crate::ats::keywords::{
    extract_keywords, prioritize, strength_suggestions, KeywordCount, PriorityItem,
    StrengthSuggestions,
};
use crate::ats::scorer::{score_resume, ScoreResult};
use crate::models::lenient;
use crate::models::resume::ResumeInput;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PrioritizeRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub narrative: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClustersRequest {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub content: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/score
pub async fn handle_score(Json(resume): Json<ResumeInput>) -> Json<ScoreResult> {
    Json(score_resume(&resume))
}

/// POST /api/v1/ats/keywords
pub async fn handle_keywords(Json(request): Json<KeywordsRequest>) -> Json<KeywordCount> {
    Json(extract_keywords(request.text.as_deref().unwrap_or_default()))
}

/// POST /api/v1/ats/prioritize
pub async fn handle_prioritize(
    Json(request): Json<PrioritizeRequest>,
) -> Json<Vec<PriorityItem>> {
    Json(prioritize(
        request.role.as_deref().unwrap_or_default(),
        request.narrative.as_deref().unwrap_or_default(),
    ))
}

/// POST /api/v1/ats/clusters
pub async fn handle_clusters(Json(request): Json<ClustersRequest>) -> Json<SkillClusters> {
    Json(cluster_skills(&request.skills))
}

/// POST /api/v1/ats/suggestions
pub async fn handle_suggestions(
    Json(request): Json<SuggestionsRequest>,
) -> Json<StrengthSuggestions> {
    Json(strength_suggestions(
        request.role.as_deref().unwrap_or_default(),
        request.content.as_deref().unwrap_or_default(),
    ))
}
