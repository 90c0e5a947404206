use crate::editor::{ParameterDraft, ToolDraft};
use crate::schema::model::parse_enum_text;
use crate::schema::{ParamType, SchemaError};
use serde_json::{Map, Value};

type ArgResult<T> = Result<T, SchemaError>;

pub fn object(args: &Value) -> ArgResult<&Map<String, Value>> {
    args.as_object()
        .ok_or_else(|| SchemaError::invalid_input("arguments must be an object"))
}

pub fn index(args: &Value, key: &str) -> ArgResult<usize> {
    let Some(value) = object(args)?.get(key) else {
        return Err(SchemaError::invalid_input(format!("{key} is required")));
    };
    value
        .as_u64()
        .and_then(|index| usize::try_from(index).ok())
        .ok_or_else(|| {
            SchemaError::invalid_input(format!("{key} must be a non-negative integer"))
        })
}

pub fn required_str<'a>(args: &'a Value, key: &str) -> ArgResult<&'a str> {
    let Some(value) = object(args)?.get(key) else {
        return Err(SchemaError::invalid_input(format!("{key} is required")));
    };
    value
        .as_str()
        .ok_or_else(|| SchemaError::invalid_input(format!("{key} must be a string")))
}

pub fn optional_str<'a>(args: &'a Value, key: &str) -> ArgResult<Option<&'a str>> {
    let Some(value) = object(args)?.get(key) else {
        return Ok(None);
    };
    let text = value
        .as_str()
        .ok_or_else(|| SchemaError::invalid_input(format!("{key} must be a string")))?;
    if text.trim().is_empty() {
        return Err(SchemaError::invalid_input(format!("{key} must not be empty")));
    }
    Ok(Some(text))
}

pub fn string_value(value: &Value, key: &str) -> ArgResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SchemaError::invalid_input(format!("{key} must be a string")))
}

pub fn bool_value(value: &Value, key: &str) -> ArgResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| SchemaError::invalid_input(format!("{key} must be a boolean")))
}

pub fn param_type_value(value: &Value) -> ArgResult<ParamType> {
    value
        .as_str()
        .and_then(ParamType::parse)
        .ok_or_else(|| {
            SchemaError::invalid_input("type must be string, number, boolean, object, or array")
        })
}

/// Enum values arrive either as the comma-separated text of the editor field
/// or as a ready-made list; both are normalized the same way.
pub fn enum_value(value: &Value) -> ArgResult<Vec<String>> {
    match value {
        Value::String(text) => Ok(parse_enum_text(text)),
        Value::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let text = item.as_str().ok_or_else(|| {
                    SchemaError::invalid_input("enum entries must be strings")
                })?;
                let text = text.trim();
                if !text.is_empty() {
                    values.push(text.to_string());
                }
            }
            Ok(values)
        }
        _ => Err(SchemaError::invalid_input(
            "enum must be a string or an array of strings",
        )),
    }
}

pub fn parameter_draft(value: &Value) -> ArgResult<ParameterDraft> {
    let obj = value
        .as_object()
        .ok_or_else(|| SchemaError::invalid_input("parameter must be an object"))?;
    let mut draft = ParameterDraft::default();
    for (key, field) in obj {
        match key.as_str() {
            "id" => {
                draft.id = Some(field.as_u64().filter(|id| *id > 0).ok_or_else(|| {
                    SchemaError::invalid_input("id must be a positive integer")
                })?);
            }
            "name" => draft.name = string_value(field, "name")?,
            "description" => draft.description = string_value(field, "description")?,
            "type" => draft.param_type = param_type_value(field)?,
            "required" => draft.required = bool_value(field, "required")?,
            "enum" => draft.enum_values = enum_value(field)?,
            "default" => draft.default_value = string_value(field, "default")?,
            other => {
                return Err(SchemaError::invalid_input(format!(
                    "unknown parameter field: {other}"
                )));
            }
        }
    }
    Ok(draft)
}

pub fn tool_draft(value: &Value) -> ArgResult<ToolDraft> {
    let obj = value
        .as_object()
        .ok_or_else(|| SchemaError::invalid_input("tool must be an object"))?;
    let mut draft = ToolDraft::default();
    for (key, field) in obj {
        match key.as_str() {
            "name" => draft.name = string_value(field, "name")?,
            "description" => draft.description = string_value(field, "description")?,
            "parameters" => {
                let items = field.as_array().ok_or_else(|| {
                    SchemaError::invalid_input("parameters must be an array")
                })?;
                draft.parameters = items
                    .iter()
                    .map(parameter_draft)
                    .collect::<ArgResult<Vec<_>>>()?;
            }
            other => {
                return Err(SchemaError::invalid_input(format!(
                    "unknown tool field: {other}"
                )));
            }
        }
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn index_rejects_negative_and_missing() {
        assert_eq!(index(&json!({"index": 2}), "index"), Ok(2));
        assert!(index(&json!({"index": -1}), "index").is_err());
        assert!(index(&json!({}), "index").is_err());
    }

    #[test]
    fn enum_accepts_text_and_list() {
        assert_eq!(
            enum_value(&json!("a, b ,,c")).expect("text"),
            vec!["a", "b", "c"]
        );
        assert_eq!(
            enum_value(&json!([" a", "", "b"])).expect("list"),
            vec!["a", "b"]
        );
        assert!(enum_value(&json!(3)).is_err());
    }

    #[test]
    fn parameter_draft_reads_fields() {
        let draft = parameter_draft(&json!({
            "name": "units",
            "type": "string",
            "required": true,
            "enum": "metric,imperial",
            "default": "metric"
        }))
        .expect("draft");
        assert_eq!(draft.name, "units");
        assert!(draft.required);
        assert_eq!(draft.enum_values, vec!["metric", "imperial"]);
        assert_eq!(draft.default_value, "metric");
        assert_eq!(draft.id, None);
    }

    #[test]
    fn parameter_draft_rejects_unknown_type() {
        let err = parameter_draft(&json!({"type": "integer"})).expect_err("error");
        assert_eq!(err.kind(), crate::mcp::errors::INVALID_INPUT);
    }

    #[test]
    fn parameter_draft_rejects_zero_id() {
        assert!(parameter_draft(&json!({"id": 0})).is_err());
        assert_eq!(
            parameter_draft(&json!({"id": 4})).expect("draft").id,
            Some(4)
        );
    }

    #[test]
    fn tool_draft_rejects_unknown_field() {
        assert!(tool_draft(&json!({"name": "f", "color": "red"})).is_err());
    }
}
