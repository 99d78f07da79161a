// src/services/keywords.rs
// Keyword extraction from job descriptions and skill matching against resumes

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use tracing::debug;

/// Tokenizes, filters, and stems a job description into candidate skill
/// tokens. Constructed once at startup and shared read-only across requests.
pub struct KeywordExtractor {
    stemmer: Stemmer,
    stop_words: HashSet<String>,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        let stop_words = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .collect();

        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stop_words,
        }
    }

    /// Extract a deduplicated, unordered set of lowercase stems from a job
    /// description. Stop words, single characters, and purely numeric tokens
    /// are dropped. Re-running on the same input yields the same set.
    pub fn extract(&self, job_description: &str) -> HashSet<String> {
        let keywords: HashSet<String> = job_description
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.len() >= 2)
            .filter(|token| token.chars().any(|c| c.is_alphabetic()))
            .filter(|token| !self.stop_words.contains(*token))
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect();

        debug!(keyword_count = keywords.len(), "Extracted job keywords");
        keywords
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Return the subset of keywords that occur anywhere in the lowercased
/// resume text. This is a naive substring presence test, not semantic
/// matching; partial-word overlaps ("java" matching "javascript") are a
/// known limitation of the approach.
pub fn match_skills(resume_text: &str, keywords: &HashSet<String>) -> HashSet<String> {
    let haystack = resume_text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| haystack.contains(keyword.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB_DESCRIPTION: &str =
        "Looking for a Python developer with strong communication and leadership skills";

    #[test]
    fn extracts_skill_tokens_and_drops_stop_words() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract(JOB_DESCRIPTION);

        assert!(keywords.contains("python"));
        assert!(keywords.contains("leadership"));
        // "for", "a", "with", "and" are stop words
        assert!(!keywords.contains("for"));
        assert!(!keywords.contains("and"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = KeywordExtractor::new();
        let first = extractor.extract(JOB_DESCRIPTION);
        let second = extractor.extract(JOB_DESCRIPTION);
        assert_eq!(first, second);
    }

    #[test]
    fn extraction_is_order_independent() {
        let extractor = KeywordExtractor::new();
        let forward = extractor.extract("python leadership communication");
        let reversed = extractor.extract("communication leadership python");
        assert_eq!(forward, reversed);
    }

    #[test]
    fn empty_description_yields_empty_sets() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("");
        assert!(keywords.is_empty());

        let matched = match_skills("ten years of python experience", &keywords);
        assert!(matched.is_empty());
    }

    #[test]
    fn numeric_and_single_char_tokens_are_dropped() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("5 years of C 2024 experience");
        assert!(!keywords.contains("5"));
        assert!(!keywords.contains("2024"));
        assert!(!keywords.contains("c"));
    }

    #[test]
    fn matched_skills_follow_resume_content() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract(JOB_DESCRIPTION);
        let matched = match_skills("Skills: python, leadership", &keywords);

        assert!(matched.contains("python"));
        assert!(matched.contains("leadership"));
        // Nothing stemming from "communication" is in the resume text
        assert!(!matched.iter().any(|k| k.starts_with("commun")));
    }

    #[test]
    fn matched_set_is_subset_of_keyword_set() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract(JOB_DESCRIPTION);
        let matched = match_skills(
            "Python developer with leadership experience and strong skills",
            &keywords,
        );
        assert!(matched.is_subset(&keywords));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let mut keywords = HashSet::new();
        keywords.insert("python".to_string());
        let matched = match_skills("Expert in PYTHON programming", &keywords);
        assert!(matched.contains("python"));
    }
}
