use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Directed call-dependency graph keyed by component id.
///
/// Adjacency lists keep the order the builder resolved them in, and the
/// whole structure round-trips through a plain JSON object, so a graph file
/// written by one session is readable by any later one. The graph is
/// rebuilt from scratch on every ingestion batch; it is never merged with a
/// previous graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node and its resolved callees. Overwrites an existing entry
    /// for the same component id (the documented collision limitation).
    pub fn insert(&mut self, component_id: impl Into<String>, callees: Vec<String>) {
        self.nodes.insert(component_id.into(), callees);
    }

    /// Outgoing neighbors of a component; empty for unknown ids
    #[must_use]
    pub fn neighbors(&self, component_id: &str) -> &[String] {
        self.nodes.get(component_id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, component_id: &str) -> bool {
        self.nodes.contains_key(component_id)
    }

    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounded breadth-first expansion from a set of seed components.
    ///
    /// Seeds count as visited before any round runs: at `depth` 0 the result
    /// is exactly the (deduplicated) seed list. Each round then visits the
    /// not-yet-visited neighbors of the current frontier; a node visited
    /// once is never re-expanded, so cycles terminate. The result is the
    /// visited set in discovery order, which makes expansion monotonic in
    /// `depth`.
    #[must_use]
    pub fn expand(&self, seeds: &[String], depth: usize) -> Vec<String> {
        let mut visited: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for seed in seeds {
            if seen.insert(seed.clone()) {
                visited.push(seed.clone());
            }
        }

        let mut frontier: Vec<String> = visited.clone();

        for _ in 0..depth {
            if frontier.is_empty() {
                break;
            }

            let mut next = Vec::new();
            for node in &frontier {
                for neighbor in self.neighbors(node) {
                    if seen.insert(neighbor.clone()) {
                        visited.push(neighbor.clone());
                        next.push(neighbor.clone());
                    }
                }
            }
            frontier = next;
        }

        visited
    }

    /// Persist the graph as a JSON object. Write failure is fatal to the
    /// ingestion batch that triggered it.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_string_pretty(&self.nodes)?;
        tokio::fs::write(path, data).await?;

        log::info!("Graph saved to {} ({} nodes)", path.display(), self.len());
        Ok(())
    }

    /// Load a persisted graph
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = tokio::fs::read_to_string(path.as_ref()).await?;
        let nodes: BTreeMap<String, Vec<String>> = serde_json::from_str(&data)?;
        Ok(Self { nodes })
    }

    /// Load a persisted graph, degrading to an empty graph on any failure.
    ///
    /// A missing or corrupt graph file must never take retrieval down;
    /// expansion simply contributes nothing until the next ingestion
    /// rewrites the file.
    pub async fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()).await {
            Ok(graph) => {
                log::info!(
                    "Graph loaded from {} ({} nodes)",
                    path.as_ref().display(),
                    graph.len()
                );
                graph
            }
            Err(err) => {
                log::warn!(
                    "Graph load failed ({}): {err}; continuing with an empty graph",
                    path.as_ref().display()
                );
                Self::new()
            }
        }
    }
}
