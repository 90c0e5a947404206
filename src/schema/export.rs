use super::model::{Parameter, Tool, ToolCollection};
use serde_json::{Map, Value, json};

pub const EXPORT_FILE_NAME: &str = "tool_schema.json";

/// Builds the function-calling document for every tool, in collection order.
pub fn to_document(collection: &ToolCollection) -> Value {
    Value::Array(collection.tools().iter().map(tool_entry).collect())
}

/// The document as written to `tool_schema.json`: two-space indented JSON.
pub fn to_pretty_string(collection: &ToolCollection) -> String {
    format!("{:#}", to_document(collection))
}

fn tool_entry(tool: &Tool) -> Value {
    let mut properties = Map::new();
    for parameter in tool.parameters.iter().filter(|p| !p.name.is_empty()) {
        properties.insert(parameter.name.clone(), property_schema(parameter));
    }

    let required: Vec<&str> = tool
        .parameters
        .iter()
        .filter(|p| p.required && !p.name.is_empty())
        .map(|p| p.name.as_str())
        .collect();

    let mut parameters = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty()
        && let Some(obj) = parameters.as_object_mut()
    {
        obj.insert("required".to_string(), json!(required));
    }

    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": parameters,
        }
    })
}

fn property_schema(parameter: &Parameter) -> Value {
    let mut schema = Map::new();
    schema.insert("type".to_string(), json!(parameter.param_type.as_str()));
    schema.insert("description".to_string(), json!(parameter.description));
    if !parameter.enum_values.is_empty() {
        schema.insert("enum".to_string(), json!(parameter.enum_values));
    }
    if !parameter.default_value.is_empty() {
        schema.insert("default".to_string(), json!(parameter.default_value));
    }
    Value::Object(schema)
}
