use crate::graph::DependencyGraph;
use crate::scanner::LexicalCallScanner;
use assistant_chunks::Chunk;
use std::collections::{HashMap, HashSet};

/// Builds a [`DependencyGraph`] from an ingestion batch in two lexical
/// passes.
///
/// Pass one registers call targets: only chunks carrying **both** a class
/// name and a function/method name are addressable as `"Class.method"`.
/// Pass two scans every chunk's code for call candidates and resolves them
/// against that lookup; candidates with no match are dropped without a
/// trace. Every chunk gets a graph entry, including chunks that call
/// nothing, so the graph's node set mirrors the batch exactly.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Build the graph for one ingestion batch
    #[must_use]
    pub fn build(chunks: &[Chunk]) -> DependencyGraph {
        let lookup = Self::build_lookup(chunks);
        let mut graph = DependencyGraph::new();

        for chunk in chunks {
            let candidates = LexicalCallScanner::scan(&chunk.code);
            let resolved = Self::resolve(&candidates, &lookup);
            graph.insert(chunk.component_id.clone(), resolved);
        }

        log::info!(
            "Built dependency graph: {} nodes from {} chunks",
            graph.len(),
            chunks.len()
        );
        graph
    }

    /// `"Class.method" -> componentId` for every chunk that qualifies as a
    /// call target
    fn build_lookup(chunks: &[Chunk]) -> HashMap<String, String> {
        let mut lookup = HashMap::new();

        for chunk in chunks {
            if let (Some(class_name), Some(function_name)) =
                (chunk.class_name.as_deref(), chunk.function_name.as_deref())
            {
                let key = format!("{class_name}.{function_name}");
                lookup.insert(key, chunk.component_id.clone());
            }
        }

        log::debug!("Registered {} call targets", lookup.len());
        lookup
    }

    /// Keep candidates the lookup can resolve, first occurrence wins
    fn resolve(candidates: &[String], lookup: &HashMap<String, String>) -> Vec<String> {
        let mut resolved = Vec::new();
        let mut seen = HashSet::new();

        for candidate in candidates {
            if let Some(component_id) = lookup.get(candidate) {
                if seen.insert(component_id.as_str()) {
                    resolved.push(component_id.clone());
                }
            }
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn target_chunk(component: &str, class: &str, method: &str, code: &str) -> Chunk {
        Chunk::new("r1", format!("src/{class}.py"), component, code)
            .unwrap()
            .class_name(class)
            .function_name(method)
    }

    #[test]
    fn resolves_calls_to_registered_targets() {
        let caller = target_chunk("A.foo", "A", "foo", "def foo():\n    bar.baz()\n");
        let callee = target_chunk("B.baz", "B", "baz", "def baz(): pass");
        // The caller references `bar.baz`, which is not a registered target;
        // `B.baz` only becomes an edge when the code actually says so.
        let graph = GraphBuilder::build(&[caller, callee]);
        assert_eq!(graph.neighbors("A.foo"), &[] as &[String]);

        let caller = target_chunk("A.foo", "A", "foo", "def foo():\n    B.baz()\n");
        let callee = target_chunk("B.baz", "B", "baz", "def baz(): pass");
        let graph = GraphBuilder::build(&[caller, callee]);
        assert_eq!(graph.neighbors("A.foo"), &["B.baz".to_string()]);
    }

    #[test]
    fn chunks_without_class_and_method_are_not_targets() {
        let caller = target_chunk("A.foo", "A", "foo", "def foo():\n    B.baz()\n");
        // Carries a class but no method name, so it never enters the lookup
        let mislabeled = Chunk::new("r1", "src/B.py", "B.baz", "def baz(): pass")
            .unwrap()
            .class_name("B");

        let graph = GraphBuilder::build(&[caller, mislabeled]);
        assert_eq!(graph.neighbors("A.foo"), &[] as &[String]);
    }

    #[test]
    fn every_chunk_gets_a_node() {
        let quiet = Chunk::new("r1", "src/util.py", "helper", "x = 1").unwrap();
        let graph = GraphBuilder::build(&[quiet]);
        assert!(graph.contains("helper"));
        assert_eq!(graph.neighbors("helper"), &[] as &[String]);
    }

    #[test]
    fn edges_only_point_at_indexed_targets() {
        let caller = target_chunk(
            "A.foo",
            "A",
            "foo",
            "def foo():\n    B.baz()\n    ghost.call()\n    C.run()\n",
        );
        let b = target_chunk("B.baz", "B", "baz", "def baz(): pass");
        let c = target_chunk("C.run", "C", "run", "def run(): pass");

        let graph = GraphBuilder::build(&[caller.clone(), b, c]);
        assert_eq!(
            graph.neighbors("A.foo"),
            &["B.baz".to_string(), "C.run".to_string()]
        );
    }

    #[test]
    fn repeated_calls_produce_one_edge() {
        let caller = target_chunk("A.foo", "A", "foo", "B.baz()\nB.baz()\n");
        let callee = target_chunk("B.baz", "B", "baz", "def baz(): pass");

        let graph = GraphBuilder::build(&[caller, callee]);
        assert_eq!(graph.neighbors("A.foo"), &["B.baz".to_string()]);
    }
}
