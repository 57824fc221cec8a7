//! Filename heuristics behind the non-semantic strategies.
//!
//! All matching is case-insensitive over the chunk's `file_name`. Like the
//! call scanner these are tolerant-by-design lexical filters: they trade
//! precision for having zero knowledge of any build system or framework.

use assistant_chunks::Chunk;

/// `name` is `stem` or `stem.<ext>`, e.g. `main` / `main.py` but not
/// `domain.py`
fn has_stem(name: &str, stem: &str) -> bool {
    name == stem || name.strip_prefix(stem).is_some_and(|rest| rest.starts_with('.'))
}

/// README / entrypoint-ish files for the overview strategy
#[must_use]
pub fn is_overview_file(file_name: &str) -> bool {
    let name = file_name.to_ascii_lowercase();
    name.contains("readme")
        || has_stem(&name, "main")
        || has_stem(&name, "app")
        || has_stem(&name, "server")
}

/// Install/run/deploy files for the setup strategy
#[must_use]
pub fn is_setup_file(file_name: &str) -> bool {
    let name = file_name.to_ascii_lowercase();
    name.contains("readme")
        || name.contains("requirements")
        || name.contains("dockerfile")
        || name.contains("config")
        || name == ".env"
        || name.ends_with(".env")
}

/// Route/controller-ish files for the api strategy, a fallback for chunks
/// the front end did not flag
#[must_use]
pub fn is_api_file(file_name: &str) -> bool {
    let name = file_name.to_ascii_lowercase();
    name.contains("route") || name.contains("controller") || has_stem(&name, "api")
}

/// Dependency manifests and build files for the dependency strategy
#[must_use]
pub fn is_manifest_file(file_name: &str) -> bool {
    let name = file_name.to_ascii_lowercase();
    name.contains("requirements")
        || name == "pom.xml"
        || name == "package.json"
        || name == "cargo.toml"
        || name == "pyproject.toml"
        || name == "pipfile"
        || name == "go.mod"
        || name == "gemfile"
        || name == "makefile"
        || has_stem(&name, "build")
}

/// Priority chunks bias the default strategy toward structural/overview
/// content regardless of what was asked: README/entrypoint files plus
/// file- and class-level chunks.
#[must_use]
pub fn is_priority_chunk(chunk: &Chunk) -> bool {
    let name = chunk.file_name.to_ascii_lowercase();
    name.contains("readme")
        || has_stem(&name, "main")
        || has_stem(&name, "app")
        || chunk.chunk_type.is_structural()
}

#[cfg(test)]
mod tests {
    use assistant_chunks::{Chunk, ChunkType};

    use super::*;

    #[test]
    fn overview_matches_entrypoints_not_lookalikes() {
        assert!(is_overview_file("README.md"));
        assert!(is_overview_file("main.py"));
        assert!(is_overview_file("server.js"));
        assert!(!is_overview_file("domain.py"));
        assert!(!is_overview_file("mainframe_client.py"));
    }

    #[test]
    fn setup_matches_install_files() {
        assert!(is_setup_file("requirements.txt"));
        assert!(is_setup_file("Dockerfile"));
        assert!(is_setup_file("config.yaml"));
        assert!(is_setup_file(".env"));
        assert!(!is_setup_file("main.py"));
    }

    #[test]
    fn api_matches_route_files() {
        assert!(is_api_file("routes.py"));
        assert!(is_api_file("UserController.java"));
        assert!(is_api_file("api.py"));
        assert!(!is_api_file("rapid.py"));
    }

    #[test]
    fn manifest_matches_package_files() {
        assert!(is_manifest_file("requirements.txt"));
        assert!(is_manifest_file("pom.xml"));
        assert!(is_manifest_file("package.json"));
        assert!(is_manifest_file("build.gradle"));
        assert!(!is_manifest_file("main.py"));
    }

    #[test]
    fn priority_includes_structural_chunks() {
        let class_chunk = Chunk::new("r", "src/deep/service.py", "Service", "class Service: ...")
            .unwrap()
            .chunk_type(ChunkType::Class);
        assert!(is_priority_chunk(&class_chunk));

        let function_chunk = Chunk::new("r", "src/deep/service.py", "run", "def run(): ...")
            .unwrap()
            .chunk_type(ChunkType::Function);
        assert!(!is_priority_chunk(&function_chunk));

        let readme = Chunk::new("r", "README.md", "README.md", "# Title").unwrap();
        assert!(is_priority_chunk(&readme));
    }
}
