use crate::error::{ChunkError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of code chunk based on the logical unit it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    /// Whole-file chunk (no finer unit was extracted)
    File,
    /// Class definition
    Class,
    /// Standalone function
    Function,
    /// Method inside a class
    Method,
    /// Function/method that serves an HTTP route
    Api,
}

impl ChunkType {
    /// Structural chunk types are favored by the overview/architecture
    /// strategies and by the priority filter.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::File | Self::Class)
    }
}

/// A single HTTP route served by an API chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRoute {
    /// HTTP method (GET, POST, ...)
    pub method: String,
    /// Route path ("/health", "/ask", ...)
    pub path: String,
}

impl ApiRoute {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for ApiRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// A unit of source text plus metadata, the atomic retrievable item.
///
/// `chunk_id` is `"{repo_name}:{file_path}:{component_id}"` and is globally
/// unique. `component_id` is only unique within a file: two classes with the
/// same simple name in different files collide in the dependency graph. That
/// is a documented limitation of the lexical pipeline, not corrected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Globally unique id, derived at construction
    pub chunk_id: String,

    /// Repository the chunk was ingested under
    pub repo_name: String,

    /// Source file path within the repository
    pub file_path: String,

    /// Final path segment, derived at construction
    pub file_name: String,

    /// Programming language, if the front end detected one
    pub language: Option<String>,

    /// Logical unit id: `Class.method`, a bare function name, or a file name
    pub component_id: String,

    /// What kind of unit this chunk covers
    pub chunk_type: ChunkType,

    /// The chunk's source text
    pub code: String,

    /// Class name, when the unit lives inside a class
    pub class_name: Option<String>,

    /// Function or method name, when the unit is one
    pub function_name: Option<String>,

    /// Whether the chunk serves HTTP routes
    pub is_api: bool,

    /// Routes served, ordered as detected; empty unless `is_api`
    #[serde(default)]
    pub api_routes: Vec<ApiRoute>,
}

fn file_name_of(path: &str) -> String {
    path.rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
        .to_string()
}

impl Chunk {
    /// Create a chunk, validating identity fields and deriving
    /// `chunk_id`/`file_name`.
    pub fn new(
        repo_name: impl Into<String>,
        file_path: impl Into<String>,
        component_id: impl Into<String>,
        code: impl Into<String>,
    ) -> Result<Self> {
        let repo_name = repo_name.into();
        let file_path = file_path.into();
        let component_id = component_id.into();

        if repo_name.trim().is_empty() {
            return Err(ChunkError::MissingField("repo_name"));
        }
        if file_path.trim().is_empty() {
            return Err(ChunkError::MissingField("file_path"));
        }
        if component_id.trim().is_empty() {
            return Err(ChunkError::MissingField("component_id"));
        }

        let chunk_id = format!("{repo_name}:{file_path}:{component_id}");
        let file_name = file_name_of(&file_path);

        Ok(Self {
            chunk_id,
            repo_name,
            file_path,
            file_name,
            language: None,
            component_id,
            chunk_type: ChunkType::File,
            code: code.into(),
            class_name: None,
            function_name: None,
            is_api: false,
            api_routes: Vec::new(),
        })
    }

    /// Builder: set chunk type
    #[must_use]
    pub const fn chunk_type(mut self, chunk_type: ChunkType) -> Self {
        self.chunk_type = chunk_type;
        self
    }

    /// Builder: set language
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builder: set class name
    #[must_use]
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Builder: set function/method name
    #[must_use]
    pub fn function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    /// Builder: attach API routes.
    ///
    /// A non-empty route list makes the chunk an API chunk: `is_api` and
    /// `chunk_type` are kept consistent with the list.
    #[must_use]
    pub fn api_routes(mut self, routes: Vec<ApiRoute>) -> Self {
        self.is_api = !routes.is_empty();
        if self.is_api {
            self.chunk_type = ChunkType::Api;
        }
        self.api_routes = routes;
        self
    }

    /// Whether the chunk carries both a class and a function/method name,
    /// making it addressable as a `Class.method` call target.
    #[must_use]
    pub fn is_call_target(&self) -> bool {
        self.class_name.is_some() && self.function_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derives_chunk_id_and_file_name() {
        let chunk = Chunk::new("repo1", "src/api/main.py", "ApiService.health", "def health(): ...")
            .unwrap();
        assert_eq!(chunk.chunk_id, "repo1:src/api/main.py:ApiService.health");
        assert_eq!(chunk.file_name, "main.py");
        assert_eq!(chunk.chunk_type, ChunkType::File);
        assert!(!chunk.is_api);
    }

    #[test]
    fn rejects_empty_identity_fields() {
        assert!(Chunk::new("", "a.py", "a", "").is_err());
        assert!(Chunk::new("r", "", "a", "").is_err());
        assert!(Chunk::new("r", "a.py", " ", "").is_err());
    }

    #[test]
    fn api_routes_flip_api_markers() {
        let chunk = Chunk::new("r", "app.py", "health", "def health(): ...")
            .unwrap()
            .chunk_type(ChunkType::Function)
            .api_routes(vec![ApiRoute::new("GET", "/health")]);
        assert!(chunk.is_api);
        assert_eq!(chunk.chunk_type, ChunkType::Api);
        assert_eq!(chunk.api_routes[0].to_string(), "GET /health");

        let plain = Chunk::new("r", "app.py", "util", "def util(): ...")
            .unwrap()
            .chunk_type(ChunkType::Function)
            .api_routes(Vec::new());
        assert!(!plain.is_api);
        assert_eq!(plain.chunk_type, ChunkType::Function);
    }

    #[test]
    fn call_target_requires_class_and_method() {
        let full = Chunk::new("r", "svc.py", "Svc.run", "def run(): ...")
            .unwrap()
            .class_name("Svc")
            .function_name("run");
        assert!(full.is_call_target());

        let bare = Chunk::new("r", "svc.py", "run", "def run(): ...")
            .unwrap()
            .function_name("run");
        assert!(!bare.is_call_target());
    }
}
