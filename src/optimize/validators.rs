// src/optimize/validators.rs

use super::models::OptimizeRequest;
use crate::common::{ValidationResult, Validator};

const MAX_JOB_DESCRIPTION_CHARS: usize = 20_000;

pub struct OptimizeRequestValidator;

impl Validator<OptimizeRequest> for OptimizeRequestValidator {
    fn validate(&self, data: &OptimizeRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.resume.is_empty() {
            result.add_error("resume", "Resume file is required");
        } else if !data.resume.starts_with(b"%PDF-") {
            result.add_error("resume", "Only PDF files are allowed");
        }

        // An empty job description is allowed: it yields an empty keyword
        // set and an unmodified rewrite, not an error.
        if data.job_description.chars().count() > MAX_JOB_DESCRIPTION_CHARS {
            result.add_error(
                "job_description",
                "Job description must be less than 20000 characters",
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> OptimizeRequest {
        OptimizeRequest {
            resume: b"%PDF-1.4 fake content".to_vec(),
            resume_filename: "resume.pdf".to_string(),
            job_description: "Python developer".to_string(),
        }
    }

    #[test]
    fn accepts_valid_request() {
        let result = OptimizeRequestValidator.validate(&valid_request());
        assert!(result.is_valid());
    }

    #[test]
    fn rejects_missing_resume() {
        let mut request = valid_request();
        request.resume.clear();
        let result = OptimizeRequestValidator.validate(&request);
        assert!(!result.is_valid());
        assert_eq!(result.errors[0].field, "resume");
    }

    #[test]
    fn rejects_non_pdf_bytes() {
        let mut request = valid_request();
        request.resume = b"PK\x03\x04 this is a zip".to_vec();
        let result = OptimizeRequestValidator.validate(&request);
        assert!(!result.is_valid());
    }

    #[test]
    fn accepts_empty_job_description() {
        let mut request = valid_request();
        request.job_description.clear();
        let result = OptimizeRequestValidator.validate(&request);
        assert!(result.is_valid());
    }

    #[test]
    fn rejects_oversized_job_description() {
        let mut request = valid_request();
        request.job_description = "x".repeat(20_001);
        let result = OptimizeRequestValidator.validate(&request);
        assert!(!result.is_valid());
        assert_eq!(result.errors[0].field, "job_description");
    }
}
