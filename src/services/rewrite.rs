// src/services/rewrite.rs
// Resume rewriting: remote (OpenAI) strategy with a deterministic local fallback

use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{error, info};

use crate::services::openai::OpenAIService;

/// Capability shared by both rewrite strategies. Implementations never fail:
/// a remote error is surfaced as a tagged error string in the output text so
/// the request still completes.
#[async_trait]
pub trait Rewrite {
    async fn rewrite(&self, resume_text: &str, skills: &HashSet<String>) -> String;
}

/// Rewrite strategy selected once at startup, depending on whether an OpenAI
/// API key is configured.
pub enum RewriteStrategy {
    Remote(OpenAIRewriter),
    Local(LocalRewriter),
}

impl RewriteStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            RewriteStrategy::Remote(_) => "remote",
            RewriteStrategy::Local(_) => "local",
        }
    }

    pub async fn rewrite(&self, resume_text: &str, skills: &HashSet<String>) -> String {
        match self {
            RewriteStrategy::Remote(rewriter) => rewriter.rewrite(resume_text, skills).await,
            RewriteStrategy::Local(rewriter) => rewriter.rewrite(resume_text, skills).await,
        }
    }
}

/// Joins a skill set into a stable, comma-separated list for prompts and
/// headers.
fn skill_list(skills: &HashSet<String>) -> String {
    let mut sorted: Vec<&str> = skills.iter().map(|s| s.as_str()).collect();
    sorted.sort_unstable();
    sorted.join(", ")
}

// ============================================================================
// Remote strategy
// ============================================================================

pub struct OpenAIRewriter {
    service: OpenAIService,
}

impl OpenAIRewriter {
    pub fn new(service: OpenAIService) -> Self {
        Self { service }
    }

    fn system_prompt() -> &'static str {
        "You are an expert resume writer. Rewrite resumes to be professional, \
         concise, and formal, and optimize them for ATS compliance."
    }

    fn user_prompt(resume_text: &str, skills: &HashSet<String>) -> String {
        format!(
            "Here is a resume text:\n{}\n\nPlease rewrite it to emphasize these skills: {}.\n\
             Keep it professional, concise, and in a formal tone. Optimize for ATS compliance.",
            resume_text,
            skill_list(skills)
        )
    }
}

#[async_trait]
impl Rewrite for OpenAIRewriter {
    async fn rewrite(&self, resume_text: &str, skills: &HashSet<String>) -> String {
        let prompt = Self::user_prompt(resume_text, skills);

        match self.service.complete(Self::system_prompt(), &prompt).await {
            Ok(text) => {
                info!(
                    model = %self.service.model(),
                    output_chars = text.len(),
                    "Resume rewritten via OpenAI"
                );
                text
            }
            Err(e) => {
                // Per-request recoverable: the caller still gets a document,
                // with the failure tagged at the top.
                error!(error = %e, "Remote rewrite failed, returning tagged original text");
                format!("[rewrite unavailable: {}]\n\n{}", e, resume_text)
            }
        }
    }
}

// ============================================================================
// Local fallback strategy
// ============================================================================

/// Deterministic substitute used when no OpenAI credential is configured.
/// Upper-cases every occurrence of a matched skill in the resume text and
/// prepends a header listing the emphasized skills.
pub struct LocalRewriter;

impl LocalRewriter {
    fn highlight(text: &str, skill: &str) -> String {
        if skill.is_empty() {
            return text.to_string();
        }

        // Skills are lowercase ASCII stems, so ASCII case folding keeps byte
        // offsets aligned between the haystack and the original text.
        let haystack = text.to_ascii_lowercase();
        let needle = skill.to_ascii_lowercase();

        let mut result = String::with_capacity(text.len());
        let mut cursor = 0;
        while let Some(pos) = haystack[cursor..].find(&needle) {
            let start = cursor + pos;
            let end = start + needle.len();
            result.push_str(&text[cursor..start]);
            result.push_str(&text[start..end].to_ascii_uppercase());
            cursor = end;
        }
        result.push_str(&text[cursor..]);
        result
    }
}

#[async_trait]
impl Rewrite for LocalRewriter {
    async fn rewrite(&self, resume_text: &str, skills: &HashSet<String>) -> String {
        let mut text = resume_text.to_string();
        for skill in skills {
            text = Self::highlight(&text, skill);
        }

        if skills.is_empty() {
            text
        } else {
            format!("Emphasized skills: {}\n\n{}", skill_list(skills), text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::openai::OpenAIConfig;

    fn skills(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn local_fallback_produces_non_empty_output() {
        let rewriter = LocalRewriter;
        let output = rewriter
            .rewrite("Experienced python developer", &skills(&["python"]))
            .await;
        assert!(!output.is_empty());
        assert!(output.contains("PYTHON"));
    }

    #[tokio::test]
    async fn local_fallback_preserves_text_with_no_skills() {
        let rewriter = LocalRewriter;
        let output = rewriter.rewrite("Plain resume text", &HashSet::new()).await;
        assert_eq!(output, "Plain resume text");
    }

    #[tokio::test]
    async fn local_fallback_is_deterministic() {
        let rewriter = LocalRewriter;
        let skill_set = skills(&["python", "leadership"]);
        let first = rewriter.rewrite("python and leadership", &skill_set).await;
        let second = rewriter.rewrite("python and leadership", &skill_set).await;
        assert_eq!(first, second);
        assert!(first.starts_with("Emphasized skills: leadership, python"));
    }

    #[test]
    fn highlight_uppercases_all_case_insensitive_occurrences() {
        let result = LocalRewriter::highlight("Python, python, PYTHON", "python");
        assert_eq!(result, "PYTHON, PYTHON, PYTHON");
    }

    #[test]
    fn highlight_leaves_unrelated_text_untouched() {
        let result = LocalRewriter::highlight("rust and go", "python");
        assert_eq!(result, "rust and go");
    }

    #[tokio::test]
    async fn remote_failure_yields_tagged_error_string() {
        // Connection refused locally; exercises the per-request recoverable
        // error contract without a real credential.
        let service = OpenAIService::new(OpenAIConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "gpt-4-turbo".to_string(),
        });
        let rewriter = OpenAIRewriter::new(service);

        let output = rewriter
            .rewrite("Original resume body", &skills(&["python"]))
            .await;
        assert!(output.starts_with("[rewrite unavailable:"));
        assert!(output.contains("Original resume body"));
    }
}
