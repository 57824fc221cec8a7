//! # Assistant Graph
//!
//! Heuristic call-dependency graph over chunk component ids.
//!
//! The graph is built from lexical call-site candidates, not from an AST:
//! [`LexicalCallScanner`] finds `identifier.identifier(` tokens in chunk
//! code, and [`GraphBuilder`] resolves them against the chunks that carry
//! both a class and a method name. Candidates that resolve to nothing are
//! dropped; shadowed names can resolve to the wrong target. Both are
//! accepted properties of the design, not bugs to eliminate.
//!
//! ```text
//! Chunk[]
//!     │
//!     ├──> lookup pass: "Class.method" -> componentId (call targets only)
//!     │
//!     ├──> extraction pass: scan code, resolve candidates, drop the rest
//!     │
//!     └──> DependencyGraph: componentId -> [callee componentId]
//!            ├─ persisted as a JSON object (fatal on write failure)
//!            ├─ loaded best-effort (missing/corrupt -> empty, never fatal)
//!            └─ bounded BFS expansion for retrieval
//! ```

mod builder;
mod error;
mod graph;
mod scanner;

pub use builder::GraphBuilder;
pub use error::{GraphError, Result};
pub use graph::DependencyGraph;
pub use scanner::LexicalCallScanner;
