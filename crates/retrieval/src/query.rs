use crate::intent::Intent;
use crate::retriever::{DEFAULT_EXPAND_DEPTH, DEFAULT_TOP_K};
use serde::{Deserialize, Serialize};

/// One retrieval request.
///
/// `repo_name` scopes every read the retriever performs; no fragment from
/// another repository can appear in the result at any layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalQuery {
    /// Free-text question
    pub text: String,

    /// Repository to retrieve from
    pub repo_name: String,

    /// Classified (or caller-chosen) intent
    pub intent: Intent,

    /// Nearest-neighbor seeds for the semantic path
    pub top_k: usize,

    /// BFS rounds over the dependency graph
    pub expand_depth: usize,
}

impl RetrievalQuery {
    pub fn new(text: impl Into<String>, repo_name: impl Into<String>, intent: Intent) -> Self {
        Self {
            text: text.into(),
            repo_name: repo_name.into(),
            intent,
            top_k: DEFAULT_TOP_K,
            expand_depth: DEFAULT_EXPAND_DEPTH,
        }
    }

    /// Builder: override the nearest-neighbor count
    #[must_use]
    pub const fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Builder: override the graph expansion depth
    #[must_use]
    pub const fn expand_depth(mut self, expand_depth: usize) -> Self {
        self.expand_depth = expand_depth;
        self
    }
}
