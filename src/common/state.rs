// Application state shared across all modules

use crate::services::{KeywordExtractor, RewriteStrategy};

/// Read-only application state: the keyword extractor and the rewrite
/// strategy are both constructed once at startup and never mutated, so the
/// state is shared as a plain `Arc<AppState>` without a lock.
pub struct AppState {
    pub keyword_extractor: KeywordExtractor,
    pub rewrite_strategy: RewriteStrategy,
    pub max_upload_bytes: usize,
}
