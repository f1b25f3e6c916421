//! Loading the proposed schema from disk.

use std::path::Path;

use jsonschema::{Retrieve, Uri};
use serde_json::Value;

use crate::error::LoadError;

/// Load a JSON document from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::ReadError` if it can't be read,
/// or `LoadError::InvalidJson` if the file isn't valid JSON.
pub fn load_schema(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Refuses every external `$ref`, so the check never leaves the process.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external reference not resolved offline: {}", uri.as_str()).into())
    }
}

/// Check that a document compiles as a JSON Schema.
///
/// Returns the compile error message if it doesn't. External `$ref`s are
/// never fetched and show up here as unresolved. The Strands API is the
/// judge of validity, so callers only report this.
pub fn check_json_schema(schema: &Value) -> Option<String> {
    jsonschema::options()
        .with_retriever(OfflineRetriever)
        .build(schema)
        .err()
        .map(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_schema_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"some": "schema"}}"#).unwrap();

        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema, json!({"some": "schema"}));
    }

    #[test]
    fn load_schema_preserves_key_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type": "object", "title": "Strand", "$id": "x"}}"#).unwrap();

        let schema = load_schema(file.path()).unwrap();
        assert_eq!(
            serde_json::to_string(&schema).unwrap(),
            r#"{"type":"object","title":"Strand","$id":"x"}"#
        );
    }

    #[test]
    fn load_schema_file_not_found() {
        let result = load_schema(Path::new("/nonexistent/path.json"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn load_schema_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let result = load_schema(file.path());
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn check_json_schema_accepts_valid_schema() {
        let schema = json!({
            "type": "object",
            "properties": { "name": { "type": "string" } }
        });
        assert!(check_json_schema(&schema).is_none());
    }

    #[test]
    fn check_json_schema_reports_external_ref_without_fetching() {
        let schema = json!({ "$ref": "https://example.invalid/defs.json" });
        let problem = check_json_schema(&schema).unwrap();
        assert!(problem.contains("example.invalid"));
    }

    #[test]
    fn check_json_schema_resolves_internal_refs() {
        let schema = json!({
            "$defs": { "name": { "type": "string" } },
            "properties": { "name": { "$ref": "#/$defs/name" } }
        });
        assert!(check_json_schema(&schema).is_none());
    }

    #[test]
    fn check_json_schema_reports_invalid_schema() {
        let schema = json!({ "type": "not-a-type" });
        assert!(check_json_schema(&schema).is_some());
    }
}
