use super::error::{Result, SchemaError};
use super::model::{IdGenerator, ParamType, Parameter, Tool, ToolCollection};
use serde_json::{Map, Value};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub collection: ToolCollection,
    pub warnings: Vec<String>,
}

impl ImportOutcome {
    pub fn parameter_count(&self) -> usize {
        self.collection
            .tools()
            .iter()
            .map(|tool| tool.parameters.len())
            .sum()
    }
}

/// Parses exported text back into an editable collection.
pub fn parse_document(text: &str, ids: &mut IdGenerator) -> Result<ImportOutcome> {
    let document: Value =
        serde_json::from_str(text).map_err(|err| SchemaError::format(err.to_string()))?;
    from_document(&document, ids)
}

/// Validates the whole document before building anything; the first failing
/// element aborts the import.
pub fn from_document(document: &Value, ids: &mut IdGenerator) -> Result<ImportOutcome> {
    let Some(entries) = document.as_array() else {
        return Err(SchemaError::format("JSON must be an array."));
    };

    let mut functions = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let function = validate_entry(entry).ok_or_else(|| {
            SchemaError::format(format!("Invalid structure for tool at index {index}."))
        })?;
        functions.push(function);
    }

    let mut warnings = Vec::new();
    let tools = functions
        .into_iter()
        .enumerate()
        .map(|(index, function)| build_tool(index, function, ids, &mut warnings))
        .collect();

    Ok(ImportOutcome {
        collection: ToolCollection::from_tools(tools),
        warnings,
    })
}

struct FunctionEntry<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Map<String, Value>,
}

fn validate_entry(entry: &Value) -> Option<FunctionEntry<'_>> {
    if entry.get("type").and_then(Value::as_str) != Some("function") {
        return None;
    }
    let function = entry.get("function")?.as_object()?;
    let name = function.get("name")?.as_str()?;
    if name.is_empty() {
        return None;
    }
    let parameters = function.get("parameters")?.as_object()?;
    let description = function
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("");
    Some(FunctionEntry {
        name,
        description,
        parameters,
    })
}

fn build_tool(
    index: usize,
    function: FunctionEntry<'_>,
    ids: &mut IdGenerator,
    warnings: &mut Vec<String>,
) -> Tool {
    let id = ids.next_id();

    let required: HashSet<&str> = function
        .parameters
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let empty = Map::new();
    let properties = function
        .parameters
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let parameters = properties
        .iter()
        .map(|(name, details)| Parameter {
            name: name.clone(),
            description: details
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            param_type: param_type(index, name, details.get("type"), warnings),
            required: required.contains(name.as_str()),
            enum_values: details
                .get("enum")
                .and_then(Value::as_array)
                .map(|values| values.iter().filter_map(scalar_text).collect())
                .unwrap_or_default(),
            default_value: details
                .get("default")
                .and_then(scalar_text)
                .unwrap_or_default(),
            ..Parameter::new(ids.next_id())
        })
        .collect();

    Tool {
        id,
        name: function.name.to_string(),
        description: function.description.to_string(),
        parameters,
    }
}

fn param_type(
    index: usize,
    name: &str,
    value: Option<&Value>,
    warnings: &mut Vec<String>,
) -> ParamType {
    let Some(value) = value else {
        return ParamType::String;
    };
    match value.as_str().and_then(ParamType::parse) {
        Some(param_type) => param_type,
        None => {
            let warning = format!(
                "tool {index} parameter {name}: unsupported type {value}, using {}",
                ParamType::String
            );
            tracing::warn!(tool = index, parameter = name, "{warning}");
            warnings.push(warning);
            ParamType::String
        }
    }
}

/// Strings are kept verbatim; numbers and booleans keep their JSON text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::export::to_pretty_string;
    use serde_json::json;

    fn import(document: Value) -> Result<ImportOutcome> {
        from_document(&document, &mut IdGenerator::new())
    }

    #[test]
    fn minimal_function_imports_with_defaults() {
        let outcome = import(json!([{
            "type": "function",
            "function": {"name": "f", "parameters": {"properties": {"x": {"type": "number"}}}}
        }]))
        .expect("import");

        let tools = outcome.collection.tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "f");
        assert_eq!(tools[0].description, "");
        let x = &tools[0].parameters[0];
        assert_eq!(x.name, "x");
        assert_eq!(x.param_type, ParamType::Number);
        assert!(!x.required);
        assert!(x.enum_values.is_empty());
        assert_eq!(x.default_value, "");
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn non_array_root_is_rejected() {
        let err = import(json!({})).expect_err("error");
        assert_eq!(err, SchemaError::format("JSON must be an array."));
    }

    #[test]
    fn wrong_type_cites_index() {
        let err = import(json!([{"type": "notfunction"}])).expect_err("error");
        assert_eq!(err.to_string(), "Invalid structure for tool at index 0.");
    }

    #[test]
    fn first_failing_element_wins() {
        let valid = json!({"type": "function", "function": {"name": "ok", "parameters": {}}});
        let err = import(json!([valid, {"type": "function"}, {"type": "nope"}]))
            .expect_err("error");
        assert_eq!(err.to_string(), "Invalid structure for tool at index 1.");
    }

    #[test]
    fn empty_name_and_missing_parameters_are_structural_errors() {
        let empty_name =
            json!([{"type": "function", "function": {"name": "", "parameters": {}}}]);
        assert!(import(empty_name).is_err());
        let missing = json!([{"type": "function", "function": {"name": "f"}}]);
        assert!(import(missing).is_err());
    }

    #[test]
    fn invalid_json_is_a_format_error() {
        let err = parse_document("[{", &mut IdGenerator::new()).expect_err("error");
        assert_eq!(err.kind(), crate::mcp::errors::FORMAT_ERROR);
    }

    #[test]
    fn required_membership_and_optional_fields() {
        let outcome = import(json!([{
            "type": "function",
            "function": {
                "name": "convert",
                "description": "Convert units",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "value": {"type": "number", "description": "Amount"},
                        "unit": {"type": "string", "enum": ["metric", "imperial"], "default": "metric"}
                    },
                    "required": ["value", "ghost"]
                }
            }
        }]))
        .expect("import");

        let tool = &outcome.collection.tools()[0];
        assert_eq!(tool.description, "Convert units");
        assert!(tool.parameters[0].required);
        assert!(!tool.parameters[1].required);
        assert_eq!(tool.parameters[1].enum_values, vec!["metric", "imperial"]);
        assert_eq!(tool.parameters[1].default_value, "metric");
    }

    #[test]
    fn ids_are_fresh_and_distinct() {
        let mut ids = IdGenerator::new();
        let document = json!([
            {"type": "function", "function": {"name": "a", "parameters": {"properties": {"p": {}, "q": {}}}}},
            {"type": "function", "function": {"name": "b", "parameters": {"properties": {"r": {}}}}}
        ]);
        let outcome = from_document(&document, &mut ids).expect("import");
        let mut seen = HashSet::new();
        for tool in outcome.collection.tools() {
            assert!(seen.insert(tool.id));
            for parameter in &tool.parameters {
                assert!(seen.insert(parameter.id));
            }
        }
        assert_eq!(seen.len(), 5);
        assert_eq!(outcome.parameter_count(), 3);
    }

    #[test]
    fn unknown_type_falls_back_with_warning() {
        let outcome = import(json!([{
            "type": "function",
            "function": {"name": "f", "parameters": {"properties": {"n": {"type": "integer", "default": 3, "enum": [1, 2, null]}}}}
        }]))
        .expect("import");
        let n = &outcome.collection.tools()[0].parameters[0];
        assert_eq!(n.param_type, ParamType::String);
        assert_eq!(n.default_value, "3");
        assert_eq!(n.enum_values, vec!["1", "2"]);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("integer"));
        assert!(outcome.warnings[0].ends_with("using string"));
    }

    #[test]
    fn falsy_scalar_defaults_survive_export() {
        let outcome = import(json!([{
            "type": "function",
            "function": {"name": "f", "parameters": {"properties": {
                "verbose": {"type": "boolean", "default": false},
                "offset": {"type": "number", "default": 0}
            }}}
        }]))
        .expect("import");
        let parameters = &outcome.collection.tools()[0].parameters;
        assert_eq!(parameters[0].default_value, "false");
        assert_eq!(parameters[1].default_value, "0");

        let exported = crate::schema::export::to_document(&outcome.collection);
        let properties = &exported[0]["function"]["parameters"]["properties"];
        assert_eq!(properties["verbose"]["default"], json!("false"));
        assert_eq!(properties["offset"]["default"], json!("0"));
    }

    #[test]
    fn export_import_export_is_stable() {
        let original = json!([
            {
                "type": "function",
                "function": {
                    "name": "get_weather",
                    "description": "Look up weather",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "city": {"type": "string", "description": "City name"},
                            "units": {"type": "string", "description": "", "enum": ["c", "f"], "default": "c"},
                            "days": {"type": "number", "description": ""}
                        },
                        "required": ["city"]
                    }
                }
            },
            {
                "type": "function",
                "function": {
                    "name": "noop",
                    "description": "",
                    "parameters": {"type": "object", "properties": {}}
                }
            }
        ]);
        let first = import(original.clone()).expect("import");
        let exported = to_pretty_string(&first.collection);
        assert_eq!(exported, format!("{original:#}"));

        let second = parse_document(&exported, &mut IdGenerator::new()).expect("reimport");
        assert_eq!(to_pretty_string(&second.collection), exported);
    }
}
