use crate::editor::Editor;
use crate::schema::SchemaError;
use serde_json::json;

pub mod args;
pub mod collection;
pub mod document;
pub mod parameters;

pub fn error_result(
    kind: &'static str,
    message: impl Into<String>,
    source: Option<&str>,
) -> serde_json::Value {
    let message = message.into();
    let mut error = json!({
        "kind": kind,
        "message": message,
    });

    if let Some(source) = source
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("source".to_string(), json!(source));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": error},
        "isError": true
    })
}

pub fn schema_error_result(err: &SchemaError, source: Option<&str>) -> serde_json::Value {
    error_result(err.kind(), err.to_string(), source)
}

/// Successful edit: a short summary plus the re-rendered state.
pub fn state_result(editor: &Editor, summary: impl Into<String>) -> serde_json::Value {
    json!({
        "content": [{"type": "text", "text": summary.into()}],
        "structuredContent": {"state": editor.render()},
        "isError": false
    })
}
