use anyhow::{Context, Result};
use assistant_chunks::{ApiRoute, Chunk, ChunkType};
use serde::Deserialize;
use std::path::Path;

/// One entry of a chunk input file, as produced by the extraction front end.
///
/// Identity fields (`chunk_id`, `file_name`) are derived on load, so input
/// files stay small and cannot disagree with the derivation rules.
#[derive(Debug, Deserialize)]
pub struct ChunkSpec {
    pub file_path: String,
    pub component_id: String,
    pub code: String,
    #[serde(default)]
    pub chunk_type: Option<ChunkType>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub function_name: Option<String>,
    #[serde(default)]
    pub api_routes: Vec<ApiRoute>,
}

impl ChunkSpec {
    pub fn into_chunk(self, repo_name: &str) -> Result<Chunk> {
        let mut chunk = Chunk::new(repo_name, self.file_path, self.component_id, self.code)
            .context("invalid chunk record")?;

        if let Some(chunk_type) = self.chunk_type {
            chunk = chunk.chunk_type(chunk_type);
        }
        if let Some(language) = self.language {
            chunk = chunk.language(language);
        }
        if let Some(class_name) = self.class_name {
            chunk = chunk.class_name(class_name);
        }
        if let Some(function_name) = self.function_name {
            chunk = chunk.function_name(function_name);
        }
        if !self.api_routes.is_empty() {
            chunk = chunk.api_routes(self.api_routes);
        }

        Ok(chunk)
    }
}

/// Load a JSON array of chunk specs and bind them to one repository
pub async fn load_chunks(path: &Path, repo_name: &str) -> Result<Vec<Chunk>> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read chunk file {}", path.display()))?;
    let specs: Vec<ChunkSpec> =
        serde_json::from_str(&data).with_context(|| format!("parse {}", path.display()))?;

    specs
        .into_iter()
        .map(|spec| spec.into_chunk(repo_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spec_round_trips_into_a_chunk() {
        let spec: ChunkSpec = serde_json::from_str(
            r#"{
                "file_path": "src/app.py",
                "component_id": "Api.health",
                "code": "def health(): return ok",
                "chunk_type": "method",
                "class_name": "Api",
                "function_name": "health",
                "api_routes": [{"method": "GET", "path": "/health"}]
            }"#,
        )
        .unwrap();

        let chunk = spec.into_chunk("r1").unwrap();
        assert_eq!(chunk.chunk_id, "r1:src/app.py:Api.health");
        assert_eq!(chunk.file_name, "app.py");
        assert!(chunk.is_api);
        assert_eq!(chunk.chunk_type, ChunkType::Api);
    }

    #[test]
    fn minimal_spec_defaults_to_a_file_chunk() {
        let spec: ChunkSpec = serde_json::from_str(
            r##"{"file_path": "README.md", "component_id": "README.md", "code": "# hi"}"##,
        )
        .unwrap();

        let chunk = spec.into_chunk("r1").unwrap();
        assert_eq!(chunk.chunk_type, ChunkType::File);
        assert!(!chunk.is_api);
    }
}
