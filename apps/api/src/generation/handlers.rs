//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ats::keywords::StrengthSuggestions;
use crate::ats::scorer::ScoreResult;
use crate::errors::AppError;
use crate::export::{export_html, export_markdown};
use crate::generation::generator::{generate_resume, GenerateRequest};
use crate::models::lenient;
use crate::models::resume::Resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub resume_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub resume: Resume,
    pub html: String,
    pub score: ScoreResult,
    pub suggestions: StrengthSuggestions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_path: Option<String>,
}

/// POST /api/v1/resumes/generate
///
/// Builds, scores and renders a resume. With `export: true` the HTML is also
/// written to `{OUTPUT_DIR}/{resume_id}.html`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let resume_id = Uuid::new_v4();
    let export = request.export;

    let generated = generate_resume(
        state.templates.as_ref(),
        &state.config.default_layout,
        request,
    )
    .await?;

    let export_path = if export {
        let path = state.config.output_dir.join(format!("{resume_id}.html"));
        let written = export_html(&generated.html, path).await?;
        Some(written.display().to_string())
    } else {
        None
    };

    Ok(Json(GenerateResponse {
        resume_id,
        generated_at: Utc::now(),
        resume: generated.resume,
        html: generated.html,
        score: generated.score,
        suggestions: generated.suggestions,
        export_path,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ExportMarkdownRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub markdown: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub export_id: Uuid,
    pub exported_at: DateTime<Utc>,
    pub export_path: String,
}

/// POST /api/v1/resumes/export/markdown
///
/// Converts a Markdown resume to HTML and writes it to
/// `{OUTPUT_DIR}/{export_id}.html`.
pub async fn handle_export_markdown(
    State(state): State<AppState>,
    Json(request): Json<ExportMarkdownRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    let export_id = Uuid::new_v4();
    let path = state.config.output_dir.join(format!("{export_id}.html"));
    let written = export_markdown(request.markdown.as_deref().unwrap_or_default(), path).await?;

    Ok(Json(ExportResponse {
        export_id,
        exported_at: Utc::now(),
        export_path: written.display().to_string(),
    }))
}
