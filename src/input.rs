use crate::mcp::contracts::MAX_INPUT_BYTES;
use crate::schema::SchemaError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct InputPayload {
    pub text: String,
    pub source: String,
}

const SOURCES: [&str; 3] = ["path", "base64", "text"];

/// Resolves exactly one of `path`, `base64` or `text` into document text.
pub fn load_input(args: &Value) -> Result<InputPayload, SchemaError> {
    let obj = args
        .as_object()
        .ok_or_else(|| SchemaError::invalid_input("arguments must be an object"))?;

    let present: Vec<&str> = SOURCES
        .into_iter()
        .filter(|key| obj.contains_key(*key))
        .collect();
    match present.as_slice() {
        [] => {
            return Err(SchemaError::invalid_input(
                "one of path, base64 or text is required",
            ));
        }
        [_] => {}
        _ => {
            return Err(SchemaError::invalid_input(format!(
                "only one input may be set (got {})",
                present.join(", ")
            )));
        }
    }

    if let Some(value) = obj.get("path") {
        let path = value
            .as_str()
            .ok_or_else(|| SchemaError::invalid_input("path must be a string"))?;
        return load_path(path);
    }

    if let Some(value) = obj.get("base64") {
        let encoded = value
            .as_str()
            .ok_or_else(|| SchemaError::invalid_input("base64 must be a string"))?;
        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|_| SchemaError::read("base64 must be valid"))?;
        check_size(bytes.len() as u64)?;
        return Ok(InputPayload {
            text: decode_utf8(bytes)?,
            source: "base64".to_string(),
        });
    }

    let text = obj
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::invalid_input("text must be a string"))?;
    check_size(text.len() as u64)?;
    Ok(InputPayload {
        text: text.to_string(),
        source: "text".to_string(),
    })
}

fn load_path(path: &str) -> Result<InputPayload, SchemaError> {
    let path_ref = Path::new(path);
    let metadata = fs::metadata(path_ref)
        .map_err(|err| SchemaError::read(format!("cannot access {path}: {err}")))?;
    if !metadata.is_file() {
        return Err(SchemaError::read(format!("{path} is not a file")));
    }
    check_size(metadata.len())?;
    let bytes = fs::read(path_ref)
        .map_err(|err| SchemaError::read(format!("failed to read {path}: {err}")))?;
    Ok(InputPayload {
        text: decode_utf8(bytes)?,
        source: format!("path:{path}"),
    })
}

fn check_size(len: u64) -> Result<(), SchemaError> {
    if len > MAX_INPUT_BYTES {
        return Err(SchemaError::TooLarge(format!(
            "input exceeds limit: {len} bytes (max {MAX_INPUT_BYTES})"
        )));
    }
    Ok(())
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String, SchemaError> {
    String::from_utf8(bytes).map_err(|_| SchemaError::read("input is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::errors;
    use serde_json::json;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn base64_ok() {
        let encoded = STANDARD.encode(b"[]");
        let payload = load_input(&json!({"base64": encoded})).expect("payload");
        assert_eq!(payload.text, "[]");
        assert_eq!(payload.source, "base64");
    }

    #[test]
    fn base64_invalid() {
        let err = load_input(&json!({"base64": "not@@@"})).expect_err("error");
        assert_eq!(err.kind(), errors::READ_ERROR);
    }

    #[test]
    fn inline_text_ok() {
        let payload = load_input(&json!({"text": "[1]"})).expect("payload");
        assert_eq!(payload.text, "[1]");
        assert_eq!(payload.source, "text");
    }

    #[test]
    fn missing_input() {
        let err = load_input(&json!({})).expect_err("error");
        assert_eq!(err.kind(), errors::INVALID_INPUT);
    }

    #[test]
    fn several_inputs() {
        let err = load_input(&json!({"path": "./tool_schema.json", "text": "[]"}))
            .expect_err("error");
        assert_eq!(err.kind(), errors::INVALID_INPUT);
    }

    #[test]
    fn path_ok() {
        let dir = tempdir().expect("tempdir");
        let file_path = dir.path().join("tool_schema.json");
        fs::write(&file_path, "[]").expect("write");
        let payload = load_input(&json!({"path": file_path.to_string_lossy()})).expect("payload");
        assert_eq!(payload.text, "[]");
        assert!(payload.source.starts_with("path:"));
    }

    #[test]
    fn path_not_found() {
        let args = json!({"path": "/tmp/definitely-missing-tool-schema.json"});
        let err = load_input(&args).expect_err("error");
        assert_eq!(err.kind(), errors::READ_ERROR);
    }

    #[test]
    fn path_is_dir() {
        let dir = tempdir().expect("tempdir");
        let err = load_input(&json!({"path": dir.path().to_string_lossy()})).expect_err("error");
        assert_eq!(err.kind(), errors::READ_ERROR);
    }

    #[test]
    fn non_utf8_file() {
        let dir = tempdir().expect("tempdir");
        let file_path = dir.path().join("binary.json");
        fs::write(&file_path, [0xff, 0xfe, 0x00]).expect("write");
        let err = load_input(&json!({"path": file_path.to_string_lossy()})).expect_err("error");
        assert_eq!(err.kind(), errors::READ_ERROR);
    }

    #[test]
    fn too_large() {
        let dir = tempdir().expect("tempdir");
        let file_path = dir.path().join("large.json");
        let file = File::create(&file_path).expect("file");
        file.set_len(MAX_INPUT_BYTES + 1).expect("set_len");
        let err = load_input(&json!({"path": file_path.to_string_lossy()})).expect_err("error");
        assert_eq!(err.kind(), errors::TOO_LARGE);
    }
}
