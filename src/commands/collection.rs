use crate::commands::{args, schema_error_result, state_result};
use crate::editor::Editor;
use crate::schema::{SchemaError, ToolEdit};
use serde_json::Value;

pub fn state(editor: &mut Editor, _args: &Value) -> Value {
    let count = editor.tools().len();
    state_result(editor, format!("{count} tool(s)"))
}

pub fn add_tool(editor: &mut Editor, _args: &Value) -> Value {
    let index = editor.add_tool();
    state_result(editor, format!("added tool {index}"))
}

pub fn update_tool(editor: &mut Editor, args: &Value) -> Value {
    match apply_update(editor, args) {
        Ok(index) => state_result(editor, format!("updated tool {index}")),
        Err(err) => schema_error_result(&err, None),
    }
}

pub fn remove_tool(editor: &mut Editor, args: &Value) -> Value {
    let index = match args::index(args, "index") {
        Ok(index) => index,
        Err(err) => return schema_error_result(&err, None),
    };
    match editor.remove_tool(index) {
        Ok(removed) => {
            let label = if removed.name.is_empty() {
                "unnamed tool".to_string()
            } else {
                removed.name
            };
            state_result(editor, format!("removed {label}"))
        }
        Err(err) => schema_error_result(&err, None),
    }
}

pub fn set_tool_field(editor: &mut Editor, args: &Value) -> Value {
    let (index, edit) = match parse_tool_edit(args) {
        Ok(parsed) => parsed,
        Err(err) => return schema_error_result(&err, None),
    };
    match editor.edit_tool(index, edit) {
        Ok(()) => state_result(editor, format!("updated tool {index}")),
        Err(err) => schema_error_result(&err, None),
    }
}

fn apply_update(editor: &mut Editor, args: &Value) -> Result<usize, SchemaError> {
    let index = args::index(args, "index")?;
    let tool = args::object(args)?
        .get("tool")
        .ok_or_else(|| SchemaError::invalid_input("tool is required"))?;
    let draft = args::tool_draft(tool)?;
    editor.update_tool(index, draft)?;
    Ok(index)
}

fn parse_tool_edit(args: &Value) -> Result<(usize, ToolEdit), SchemaError> {
    let index = args::index(args, "index")?;
    let field = args::required_str(args, "field")?;
    let value = args::required_str(args, "value")?.to_string();
    let edit = match field {
        "name" => ToolEdit::Name(value),
        "description" => ToolEdit::Description(value),
        other => {
            return Err(SchemaError::invalid_input(format!(
                "field must be name or description (got {other})"
            )));
        }
    };
    Ok((index, edit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::errors;
    use serde_json::json;

    #[test]
    fn set_tool_field_then_state() {
        let mut editor = Editor::new();
        add_tool(&mut editor, &json!({}));
        let result = set_tool_field(
            &mut editor,
            &json!({"index": 0, "field": "name", "value": "get_weather"}),
        );
        assert_eq!(result["isError"], json!(false));
        assert_eq!(
            result["structuredContent"]["state"]["tools"][0]["name"],
            json!("get_weather")
        );
    }

    #[test]
    fn out_of_range_remove_is_reported() {
        let mut editor = Editor::new();
        let result = remove_tool(&mut editor, &json!({"index": 3}));
        assert_eq!(result["isError"], json!(true));
        assert_eq!(
            result["structuredContent"]["error"]["kind"],
            json!(errors::INDEX_OUT_OF_RANGE)
        );
    }

    #[test]
    fn unknown_tool_field_is_rejected() {
        let mut editor = Editor::new();
        add_tool(&mut editor, &json!({}));
        let result = set_tool_field(
            &mut editor,
            &json!({"index": 0, "field": "parameters", "value": "x"}),
        );
        assert_eq!(
            result["structuredContent"]["error"]["kind"],
            json!(errors::INVALID_INPUT)
        );
    }

    #[test]
    fn update_tool_replaces_record() {
        let mut editor = Editor::new();
        add_tool(&mut editor, &json!({}));
        let result = update_tool(
            &mut editor,
            &json!({
                "index": 0,
                "tool": {
                    "name": "search",
                    "description": "Search the web",
                    "parameters": [{"name": "query", "required": true}]
                }
            }),
        );
        assert_eq!(result["isError"], json!(false));
        let tool = &result["structuredContent"]["state"]["tools"][0];
        assert_eq!(tool["name"], json!("search"));
        assert_eq!(tool["parameters"][0]["required"], json!(true));
    }
}
