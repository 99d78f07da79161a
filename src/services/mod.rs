// src/services/mod.rs
//
// Pipeline services: PDF ingestion, keyword extraction, resume rewriting,
// and PDF rendering

pub mod extract;
pub mod keywords;
pub mod openai;
pub mod pdf;
pub mod rewrite;

// Re-export commonly used types for convenience
pub use keywords::KeywordExtractor;
pub use openai::{OpenAIConfig, OpenAIService};
pub use rewrite::{LocalRewriter, OpenAIRewriter, RewriteStrategy};
