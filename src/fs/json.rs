//! JSON file operations with schema validation
//!
//! Provides functions to read JSON files and stdin with serde validation.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::{ClaimGuardError, Result};

/// Deserialize JSON text, naming `source` in any error.
pub fn parse_json<T: DeserializeOwned>(content: &str, source: &str) -> Result<T> {
    serde_json::from_str(content)
        .map_err(|e| ClaimGuardError::InvalidJson(format!("Invalid JSON in {}: {}", source, e)))
}

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match the
///   expected schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ClaimGuardError::FileNotFound(path.display().to_string())
        } else {
            ClaimGuardError::Io(e)
        }
    })?;

    parse_json(&content, &path.display().to_string())
}

/// Read JSON from a file, or from `reader` when `path` is `-`.
pub fn read_json_input<T: DeserializeOwned, R: Read>(path: &Path, mut reader: R) -> Result<T> {
    if path.as_os_str() != "-" {
        return read_json(path);
    }
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_json(&content, "stdin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{ClaimState, GuardPolicy, TransitionContext};
    use tempfile::TempDir;

    const CONTEXT: &str = r#"{
        "claim_id": "claim_123",
        "current_state": "submitted",
        "target_state": "under_review",
        "requester_id": "steward_456",
        "requester_role": "steward",
        "priority": "medium",
        "status_changed_at": "2026-03-02T09:00:00Z"
    }"#;

    #[test]
    fn test_read_json_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("context.json");
        fs::write(&path, CONTEXT).unwrap();

        let ctx: TransitionContext = read_json(&path).unwrap();
        assert_eq!(ctx.target_state, ClaimState::UnderReview);
    }

    #[test]
    fn test_read_json_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = read_json::<GuardPolicy>(&temp.path().join("nope.json")).unwrap_err();
        assert_eq!(err.code(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_read_json_invalid_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("policy.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<GuardPolicy>(&path).unwrap_err();
        assert_eq!(err.code(), "INVALID_JSON");
        assert!(err.to_string().contains("policy.json"));
    }

    #[test]
    fn test_read_json_input_from_reader() {
        let ctx: TransitionContext =
            read_json_input(Path::new("-"), CONTEXT.as_bytes()).unwrap();
        assert_eq!(ctx.claim_id, "claim_123");
    }

    #[test]
    fn test_read_json_input_reports_stdin() {
        let err = read_json_input::<TransitionContext, _>(Path::new("-"), "[]".as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }
}
