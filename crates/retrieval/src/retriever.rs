use crate::error::Result;
use crate::heuristics;
use crate::intent::Intent;
use crate::query::RetrievalQuery;
use assistant_chunks::Chunk;
use assistant_graph::DependencyGraph;
use assistant_vector_store::{Embedder, VectorIndex};
use std::collections::HashSet;
use std::sync::Arc;

/// Nearest-neighbor seeds when the caller does not say otherwise
pub const DEFAULT_TOP_K: usize = 5;

/// Graph expansion rounds when the caller does not say otherwise
pub const DEFAULT_EXPAND_DEPTH: usize = 2;

/// Result cap for every strategy except the two below
const RESULT_CAP: usize = 15;

/// The api strategy returns synthesized summaries, which are cheaper per
/// entry, so it gets a little more room
const API_RESULT_CAP: usize = 20;

/// Manifest files are few and dense; ten is plenty
const MANIFEST_RESULT_CAP: usize = 10;

/// The hybrid retrieval engine.
///
/// Holds its collaborators by explicit injection: the vector index and the
/// embedder come in as shared handles, the dependency graph is whatever the
/// last successful [`DependencyGraph::load_or_empty`] produced. One
/// `retrieve` call runs sequentially to completion; the retriever itself
/// keeps no per-request state.
pub struct HybridRetriever {
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn Embedder>,
    graph: DependencyGraph,
}

impl HybridRetriever {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn Embedder>,
        graph: DependencyGraph,
    ) -> Self {
        log::info!("Hybrid retriever ready ({} graph nodes)", graph.len());
        Self {
            index,
            embedder,
            graph,
        }
    }

    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Swap in a freshly built graph after re-ingestion
    pub fn set_graph(&mut self, graph: DependencyGraph) {
        self.graph = graph;
    }

    /// Retrieve ranked, deduplicated code fragments for a query.
    ///
    /// Dispatches on intent, first match wins. Flow, specific, and general
    /// all take the semantic + graph path; routing them explicitly here
    /// keeps the classifier vocabulary and the dispatch table in sync
    /// instead of relying on silent fallthrough.
    pub async fn retrieve(&self, query: &RetrievalQuery) -> Result<Vec<String>> {
        log::debug!(
            "retrieve: repo='{}', intent={}, top_k={}, expand_depth={}",
            query.repo_name,
            query.intent,
            query.top_k,
            query.expand_depth
        );

        match query.intent {
            Intent::Overview => self.overview(&query.repo_name).await,
            Intent::Setup => self.setup(&query.repo_name).await,
            Intent::Api => self.api(&query.repo_name).await,
            Intent::Architecture => self.architecture(&query.repo_name).await,
            Intent::Dependency => self.dependency(&query.repo_name).await,
            Intent::Flow | Intent::Specific | Intent::General => {
                self.semantic_with_graph(query).await
            }
        }
    }

    // ---- heuristic strategies -------------------------------------------

    async fn overview(&self, repo_name: &str) -> Result<Vec<String>> {
        let chunks = self.repo_chunks(repo_name).await?;
        let fragments = chunks
            .iter()
            .filter(|c| c.chunk_type.is_structural() || heuristics::is_overview_file(&c.file_name))
            .map(|c| c.code.clone());
        Ok(dedup_cap(fragments, RESULT_CAP))
    }

    async fn setup(&self, repo_name: &str) -> Result<Vec<String>> {
        let chunks = self.repo_chunks(repo_name).await?;
        let fragments = chunks
            .iter()
            .filter(|c| heuristics::is_setup_file(&c.file_name))
            .map(|c| c.code.clone());
        Ok(dedup_cap(fragments, RESULT_CAP))
    }

    async fn api(&self, repo_name: &str) -> Result<Vec<String>> {
        let chunks = self.repo_chunks(repo_name).await?;
        let fragments = chunks
            .iter()
            .filter(|c| c.is_api || heuristics::is_api_file(&c.file_name))
            .map(synthesize_api_fragment);
        Ok(dedup_cap(fragments, API_RESULT_CAP))
    }

    async fn architecture(&self, repo_name: &str) -> Result<Vec<String>> {
        let chunks = self.repo_chunks(repo_name).await?;
        let fragments = chunks
            .iter()
            .filter(|c| c.chunk_type.is_structural())
            .map(|c| c.code.clone());
        Ok(dedup_cap(fragments, RESULT_CAP))
    }

    async fn dependency(&self, repo_name: &str) -> Result<Vec<String>> {
        let chunks = self.repo_chunks(repo_name).await?;
        let fragments = chunks
            .iter()
            .filter(|c| heuristics::is_manifest_file(&c.file_name))
            .map(|c| c.code.clone());
        Ok(dedup_cap(fragments, MANIFEST_RESULT_CAP))
    }

    // ---- the default: semantic + graph ----------------------------------

    async fn semantic_with_graph(&self, query: &RetrievalQuery) -> Result<Vec<String>> {
        // 1. Repo-filtered nearest neighbors
        let embedding = self.embedder.embed(&query.text).await?;
        let matches = self
            .index
            .query(&embedding, Some(&query.repo_name), query.top_k)
            .await?;
        log::debug!("Semantic matches: {}", matches.len());

        // 2. Seed component ids, in hit order
        let seeds: Vec<String> = matches
            .iter()
            .map(|m| m.chunk.component_id.clone())
            .collect();

        // 3. Bounded BFS over the dependency graph
        let visited = self.graph.expand(&seeds, query.expand_depth);
        log::debug!("Expanded components: {}", visited.len());

        // 4./5. One scan serves both the expansion fetch and the priority set
        let repo_chunks = self.repo_chunks(&query.repo_name).await?;

        let visited_set: HashSet<&str> = visited.iter().map(String::as_str).collect();
        let expanded: Vec<&Chunk> = repo_chunks
            .iter()
            .filter(|c| visited_set.contains(c.component_id.as_str()))
            .collect();

        let priority: Vec<&Chunk> = repo_chunks
            .iter()
            .filter(|c| heuristics::is_priority_chunk(c))
            .collect();
        log::debug!("Priority chunks: {}", priority.len());

        // 6. Merge with strict precedence, dedup by exact text, cap
        let fragments = priority
            .into_iter()
            .map(|c| c.code.clone())
            .chain(matches.into_iter().map(|m| m.chunk.code))
            .chain(expanded.into_iter().map(|c| c.code.clone()));

        let final_fragments = dedup_cap(fragments, RESULT_CAP);
        log::debug!("Fragments returned: {}", final_fragments.len());
        Ok(final_fragments)
    }

    /// Full scan filtered to one repository, in stable scan order
    async fn repo_chunks(&self, repo_name: &str) -> Result<Vec<Chunk>> {
        let mut chunks = self.index.scan_all().await?;
        chunks.retain(|c| c.repo_name == repo_name);
        Ok(chunks)
    }
}

/// Drop exact-text duplicates (first seen wins) and truncate
fn dedup_cap(fragments: impl Iterator<Item = String>, cap: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::new();

    for fragment in fragments {
        if result.len() == cap {
            break;
        }
        if seen.insert(fragment.clone()) {
            result.push(fragment);
        }
    }

    result
}

/// One api-strategy fragment: file name, route list, then the code
fn synthesize_api_fragment(chunk: &Chunk) -> String {
    let mut fragment = format!("File: {}\n", chunk.file_name);

    if !chunk.api_routes.is_empty() {
        fragment.push_str("Routes:\n");
        for route in &chunk.api_routes {
            fragment.push_str("  ");
            fragment.push_str(&route.to_string());
            fragment.push('\n');
        }
    }

    fragment.push('\n');
    fragment.push_str(&chunk.code);
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_chunks::{ApiRoute, ChunkType};

    #[test]
    fn dedup_keeps_first_occurrence_and_caps() {
        let fragments = vec![
            "a".to_string(),
            "b".to_string(),
            "a".to_string(),
            "c".to_string(),
        ];
        assert_eq!(
            dedup_cap(fragments.clone().into_iter(), 10),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert_eq!(
            dedup_cap(fragments.into_iter(), 2),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn api_fragment_embeds_file_routes_and_code() {
        let chunk = Chunk::new("r1", "src/app.py", "health", "def health(): return ok")
            .unwrap()
            .chunk_type(ChunkType::Function)
            .api_routes(vec![ApiRoute::new("GET", "/health")]);

        let fragment = synthesize_api_fragment(&chunk);
        assert!(fragment.contains("File: app.py"));
        assert!(fragment.contains("GET /health"));
        assert!(fragment.contains("def health(): return ok"));
    }
}
