use crate::commands::{args, schema_error_result, state_result};
use crate::editor::Editor;
use crate::input::load_input;
use crate::schema::SchemaError;
use crate::schema::export::EXPORT_FILE_NAME;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

pub fn export(editor: &mut Editor, args: &Value) -> Value {
    let output_path = match args::optional_str(args, "output_path") {
        Ok(path) => path,
        Err(err) => return schema_error_result(&err, None),
    };

    let text = editor.export_text();
    let document = editor.export_document();
    let bytes_len = text.len() as u64;

    match output_path {
        Some(path) => match write_output(Path::new(path), &text) {
            Ok(output) => {
                tracing::info!(path = %output.path, bytes_len, "exported tool schema");
                json!({
                    "content": output.content,
                    "structuredContent": {
                        "path": output.path,
                        "uri": output.uri,
                        "bytes_len": bytes_len
                    },
                    "isError": false
                })
            }
            Err(err) => schema_error_result(&err, Some(path)),
        },
        None => json!({
            "content": [{"type": "text", "text": text}],
            "structuredContent": {
                "document": document,
                "bytes_len": bytes_len
            },
            "isError": false
        }),
    }
}

pub fn import(editor: &mut Editor, args: &Value) -> Value {
    let payload = match load_input(args) {
        Ok(payload) => payload,
        Err(err) => {
            if matches!(err, SchemaError::Read(_) | SchemaError::TooLarge(_)) {
                editor.report_read_failure(&err);
            }
            return schema_error_result(&err, None);
        }
    };

    match editor.import_text(&payload.text) {
        Ok(report) => {
            let mut result = state_result(
                editor,
                format!(
                    "imported {} tool(s), {} parameter(s)",
                    report.tools, report.parameters
                ),
            );
            if let Some(structured) = result
                .get_mut("structuredContent")
                .and_then(Value::as_object_mut)
            {
                structured.insert("import".to_string(), json!(report));
            }
            result
        }
        Err(err) => schema_error_result(&err, Some(payload.source.as_str())),
    }
}

pub fn dismiss_notification(editor: &mut Editor, _args: &Value) -> Value {
    let summary = match editor.dismiss_notification() {
        Some(notification) => format!("dismissed: {}", notification.message),
        None => "no notification".to_string(),
    };
    state_result(editor, summary)
}

struct OutputResource {
    path: String,
    uri: String,
    content: Vec<Value>,
}

/// A directory target resolves to `tool_schema.json` inside it.
pub fn resolve_output_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(EXPORT_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

fn write_output(path: &Path, text: &str) -> Result<OutputResource, SchemaError> {
    let target = resolve_output_path(path);
    fs::write(&target, text)
        .map_err(|err| SchemaError::Internal(format!("failed to write output: {err}")))?;

    let path = target.to_string_lossy().to_string();
    let uri = format!("file://{path}");
    let name = target
        .file_name()
        .and_then(|value| value.to_str())
        .unwrap_or(EXPORT_FILE_NAME);

    let content = vec![
        json!({
            "type": "text",
            "text": format!("tool schema written to {path}")
        }),
        json!({
            "type": "resource_link",
            "uri": uri,
            "name": name,
            "mimeType": "application/json"
        }),
    ];

    Ok(OutputResource { path, uri, content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::errors;
    use tempfile::tempdir;

    #[test]
    fn export_into_directory_uses_default_name() {
        let dir = tempdir().expect("tempdir");
        let mut editor = Editor::new();
        let result = export(
            &mut editor,
            &json!({"output_path": dir.path().to_string_lossy()}),
        );
        assert_eq!(result["isError"], json!(false));
        let written = fs::read_to_string(dir.path().join(EXPORT_FILE_NAME)).expect("read");
        assert_eq!(written, "[]");
    }

    #[test]
    fn inline_export_returns_document() {
        let mut editor = Editor::new();
        editor.add_tool();
        let result = export(&mut editor, &json!({}));
        assert_eq!(
            result["structuredContent"]["document"][0]["type"],
            json!("function")
        );
    }

    #[test]
    fn unreadable_path_sets_generic_notification() {
        let mut editor = Editor::new();
        let result = import(
            &mut editor,
            &json!({"path": "/tmp/definitely-missing-tool-schema.json"}),
        );
        assert_eq!(
            result["structuredContent"]["error"]["kind"],
            json!(errors::READ_ERROR)
        );
        assert_eq!(
            editor.notification().map(|n| n.message.as_str()),
            Some("Failed to read the file.")
        );
    }

    #[test]
    fn bad_document_reports_source_and_keeps_state() {
        let mut editor = Editor::new();
        editor.add_tool();
        let result = import(&mut editor, &json!({"text": "[{\"type\":\"notfunction\"}]"}));
        let error = &result["structuredContent"]["error"];
        assert_eq!(error["kind"], json!(errors::FORMAT_ERROR));
        assert_eq!(error["message"], json!("Invalid structure for tool at index 0."));
        assert_eq!(error["source"], json!("text"));
        assert_eq!(editor.tools().len(), 1);
    }

    #[test]
    fn dismiss_clears_notification() {
        let mut editor = Editor::new();
        import(&mut editor, &json!({"text": "{}"}));
        assert!(editor.notification().is_some());
        let result = dismiss_notification(&mut editor, &json!({}));
        assert_eq!(result["structuredContent"]["state"]["notification"], Value::Null);
    }
}
