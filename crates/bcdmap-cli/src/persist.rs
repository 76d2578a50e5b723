//! Reading and writing compat data files.
//!
//! Files are two-space pretty-printed JSON with one trailing newline. Key
//! order is preserved, so an unchanged document renders byte-for-byte.

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::CliError;

pub fn read_document(path: &Path) -> Result<Value, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| CliError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

pub fn render_document(document: &Value) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}

pub fn write_document(path: &Path, document: &Value) -> Result<(), CliError> {
    let text = render_document(document).map_err(|source| CliError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, text).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CLIPBOARD: &str = include_str!("../../../testing/fixtures/bcd/api/Clipboard.json");

    #[test]
    fn test_render_format() {
        let doc = json!({ "a": { "b": [1, 2] }, "c": {} });
        assert_eq!(
            render_document(&doc).unwrap(),
            "{\n  \"a\": {\n    \"b\": [\n      1,\n      2\n    ]\n  },\n  \"c\": {}\n}\n"
        );
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let doc: Value = serde_json::from_str(CLIPBOARD).unwrap();
        assert_eq!(render_document(&doc).unwrap(), CLIPBOARD);
    }

    #[test]
    fn test_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"api\": ").unwrap();

        assert!(matches!(read_document(&path), Err(CliError::Malformed { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_document(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(CliError::Io { .. })));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let doc = json!({ "__compat": { "support": {} } });

        write_document(&path, &doc).unwrap();

        assert_eq!(read_document(&path).unwrap(), doc);
        assert!(fs::read_to_string(&path).unwrap().ends_with("}\n"));
    }
}
