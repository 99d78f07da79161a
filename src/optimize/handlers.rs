// src/optimize/handlers.rs

use axum::{
    extract::{Extension, Multipart},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tracing::{info, warn};

use super::models::{AnalyzeResponse, HealthResponse, OptimizeRequest};
use super::validators::OptimizeRequestValidator;
use crate::common::{ApiError, AppState, Validator};
use crate::services::extract::{self, ExtractError};
use crate::services::{keywords, pdf};

const OUTPUT_FILENAME: &str = "Optimized_Resume.pdf";

/// POST /api/optimize - Run the full pipeline and return the optimized PDF
pub async fn optimize_resume(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_multipart(multipart).await?;

    let validation = OptimizeRequestValidator.validate(&request);
    if !validation.is_valid() {
        return Err(validation.into());
    }

    let resume_text = extract_resume_text(&request)?;
    let keyword_set = state.keyword_extractor.extract(&request.job_description);
    let matched_skills = keywords::match_skills(&resume_text, &keyword_set);

    info!(
        resume_chars = resume_text.chars().count(),
        keyword_count = keyword_set.len(),
        matched_count = matched_skills.len(),
        strategy = state.rewrite_strategy.name(),
        "Optimizing resume"
    );

    let optimized_text = state
        .rewrite_strategy
        .rewrite(&resume_text, &matched_skills)
        .await;

    let pdf_bytes =
        pdf::render_pdf(&optimized_text).map_err(|e| ApiError::RenderError(e.to_string()))?;

    let disposition = format!("attachment; filename=\"{}\"", OUTPUT_FILENAME);
    Ok((
        StatusCode::OK,
        [
            (
                axum::http::header::CONTENT_TYPE,
                "application/pdf".to_string(),
            ),
            (axum::http::header::CONTENT_DISPOSITION, disposition),
        ],
        pdf_bytes,
    ))
}

/// POST /api/analyze - Run ingestion, extraction, and matching only
pub async fn analyze_resume(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let request = parse_multipart(multipart).await?;

    let validation = OptimizeRequestValidator.validate(&request);
    if !validation.is_valid() {
        return Err(validation.into());
    }

    let resume_text = extract_resume_text(&request)?;
    let resume_chars = resume_text.chars().count();
    let keyword_set = state.keyword_extractor.extract(&request.job_description);
    let matched_set = keywords::match_skills(&resume_text, &keyword_set);

    info!(
        resume_chars,
        keyword_count = keyword_set.len(),
        matched_count = matched_set.len(),
        "Analyzed resume against job description"
    );

    // Sets carry no ordering; sort for a stable response body
    let mut keywords: Vec<String> = keyword_set.into_iter().collect();
    keywords.sort_unstable();
    let mut matched_skills: Vec<String> = matched_set.into_iter().collect();
    matched_skills.sort_unstable();

    Ok(Json(AnalyzeResponse {
        keywords,
        matched_skills,
        resume_chars,
    }))
}

/// GET /api/health - Liveness probe reporting the active rewrite strategy
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        rewrite_strategy: state.rewrite_strategy.name(),
    })
}

/// Collect the `resume` and `job_description` fields from a multipart body.
async fn parse_multipart(mut multipart: Multipart) -> Result<OptimizeRequest, ApiError> {
    let mut request = OptimizeRequest::default();
    let mut has_resume = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("resume") => {
                request.resume_filename = field.file_name().unwrap_or("resume.pdf").to_string();
                request.resume = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::BadRequest("Invalid resume file".to_string()))?
                    .to_vec();
                has_resume = true;
            }
            Some("job_description") => {
                request.job_description = field
                    .text()
                    .await
                    .map_err(|_| ApiError::BadRequest("Invalid job description".to_string()))?;
            }
            _ => {}
        }
    }

    if !has_resume {
        return Err(ApiError::BadRequest("No resume file provided".to_string()));
    }

    Ok(request)
}

fn extract_resume_text(request: &OptimizeRequest) -> Result<String, ApiError> {
    extract::extract_text(&request.resume).map_err(|e| {
        warn!(
            error = %e,
            filename = %request.resume_filename,
            "Resume ingestion failed"
        );
        match e {
            ExtractError::NoText => ApiError::NoText("No text found in PDF".to_string()),
            ExtractError::Unreadable(msg) => {
                ApiError::BadRequest(format!("Could not read PDF: {}", msg))
            }
        }
    })
}
