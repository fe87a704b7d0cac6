//! Rendering and persisting the assembled document.

use super::types::SpecDocument;
use crate::error::DocError;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Output encoding of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocFormat {
    #[default]
    Json,
    Yaml,
}

impl DocFormat {
    /// YAML for `.yaml`/`.yml` destinations, JSON otherwise.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocFormat::Yaml
            }
            _ => DocFormat::Json,
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            DocFormat::Json => "application/json",
            DocFormat::Yaml => "application/yaml",
        }
    }
}

/// Serialize `doc` with stable key order.
///
/// # Errors
///
/// Returns a serialization error if the document cannot be encoded.
pub fn render(doc: &SpecDocument, format: DocFormat) -> Result<Vec<u8>, DocError> {
    let bytes = match format {
        DocFormat::Json => {
            let mut out = serde_json::to_vec_pretty(doc)?;
            out.push(b'\n');
            out
        }
        DocFormat::Yaml => serde_yaml::to_string(doc)?.into_bytes(),
    };
    Ok(bytes)
}

/// Render `doc` in the format implied by `path` and replace the file.
///
/// The bytes go to a temporary file next to the destination which is then
/// renamed into place, so `path` only ever holds a complete document.
///
/// # Errors
///
/// Serialization errors, or [`DocError::Write`] with the underlying I/O error.
pub fn write_document(doc: &SpecDocument, path: &Path) -> Result<(), DocError> {
    let bytes = render(doc, DocFormat::from_path(path))?;
    let write_err = |source: std::io::Error| DocError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!(path = %path.display(), bytes = bytes.len(), "Wrote OpenAPI document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_models;
    use crate::openapi::{assemble, DocInfo};
    use crate::router::app_routes;
    use std::path::PathBuf;

    fn doc() -> SpecDocument {
        assemble(&app_routes(), &default_models(), &DocInfo::default()).unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocFormat::from_path(Path::new("docs/swagger.json")), DocFormat::Json);
        assert_eq!(DocFormat::from_path(Path::new("openapi.YAML")), DocFormat::Yaml);
        assert_eq!(DocFormat::from_path(Path::new("openapi.yml")), DocFormat::Yaml);
        assert_eq!(DocFormat::from_path(Path::new("swagger")), DocFormat::Json);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/docs/swagger.json");
        write_document(&doc(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["openapi"], "3.0.0");
        // no temp files left behind
        let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagger.json");
        fs::write(&path, "stale").unwrap();
        write_document(&doc(), &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with('{'));
    }

    #[test]
    fn test_yaml_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");
        write_document(&doc(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let back: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back["openapi"].as_str(), Some("3.0.0"));
        assert!(back["components"]["schemas"]["User"].is_mapping());
    }

    #[test]
    fn test_write_error_names_destination() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        // parent is a regular file, so the directory cannot be created
        let path: PathBuf = blocker.join("swagger.json");
        let err = write_document(&doc(), &path).unwrap_err();
        match err {
            DocError::Write { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
