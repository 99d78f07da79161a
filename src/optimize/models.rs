// src/optimize/models.rs

use serde::Serialize;

/// Parsed multipart request: one resume PDF and one job description.
#[derive(Debug, Default)]
pub struct OptimizeRequest {
    pub resume: Vec<u8>,
    pub resume_filename: String,
    pub job_description: String,
}

/// Result of the analysis stages (ingestion, extraction, matching) without
/// rewriting or rendering.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub keywords: Vec<String>,
    pub matched_skills: Vec<String>,
    pub resume_chars: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub rewrite_strategy: &'static str,
}
