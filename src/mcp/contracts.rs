use serde_json::json;

pub const TOOL_STATE: &str = "schema.state";
pub const TOOL_ADD_TOOL: &str = "schema.add_tool";
pub const TOOL_UPDATE_TOOL: &str = "schema.update_tool";
pub const TOOL_REMOVE_TOOL: &str = "schema.remove_tool";
pub const TOOL_SET_TOOL_FIELD: &str = "schema.set_tool_field";
pub const TOOL_ADD_PARAMETER: &str = "schema.add_parameter";
pub const TOOL_UPDATE_PARAMETER: &str = "schema.update_parameter";
pub const TOOL_REMOVE_PARAMETER: &str = "schema.remove_parameter";
pub const TOOL_SET_PARAMETER_FIELD: &str = "schema.set_parameter_field";
pub const TOOL_EXPORT: &str = "schema.export";
pub const TOOL_IMPORT: &str = "schema.import";
pub const TOOL_DISMISS_NOTIFICATION: &str = "schema.dismiss_notification";

pub const MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

const PARAM_TYPES: [&str; 5] = ["string", "number", "boolean", "object", "array"];

fn index_schema() -> serde_json::Value {
    json!({ "type": "integer", "minimum": 0 })
}

fn parameter_record_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer", "minimum": 1 },
            "name": { "type": "string" },
            "description": { "type": "string" },
            "type": { "type": "string", "enum": PARAM_TYPES },
            "required": { "type": "boolean" },
            "enum": {
                "oneOf": [
                    { "type": "array", "items": { "type": "string" } },
                    { "type": "string" }
                ]
            },
            "default": { "type": "string" }
        },
        "additionalProperties": false
    })
}

pub fn no_arguments_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false
    })
}

pub fn update_tool_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "index": index_schema(),
            "tool": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "description": { "type": "string" },
                    "parameters": {
                        "type": "array",
                        "items": parameter_record_schema()
                    }
                },
                "additionalProperties": false
            }
        },
        "required": ["index", "tool"],
        "additionalProperties": false
    })
}

pub fn remove_tool_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "index": index_schema()
        },
        "required": ["index"],
        "additionalProperties": false
    })
}

pub fn set_tool_field_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "index": index_schema(),
            "field": { "type": "string", "enum": ["name", "description"] },
            "value": { "type": "string" }
        },
        "required": ["index", "field", "value"],
        "additionalProperties": false
    })
}

pub fn add_parameter_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "tool_index": index_schema()
        },
        "required": ["tool_index"],
        "additionalProperties": false
    })
}

pub fn update_parameter_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "tool_index": index_schema(),
            "index": index_schema(),
            "parameter": parameter_record_schema()
        },
        "required": ["tool_index", "index", "parameter"],
        "additionalProperties": false
    })
}

pub fn remove_parameter_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "tool_index": index_schema(),
            "index": index_schema()
        },
        "required": ["tool_index", "index"],
        "additionalProperties": false
    })
}

pub fn set_parameter_field_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "tool_index": index_schema(),
            "index": index_schema(),
            "field": {
                "type": "string",
                "enum": ["name", "description", "type", "required", "enum", "default"]
            },
            "value": {}
        },
        "required": ["tool_index", "index", "field", "value"],
        "additionalProperties": false
    })
}

pub fn export_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "output_path": { "type": "string" }
        },
        "additionalProperties": false
    })
}

pub fn import_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "path": { "type": "string" },
            "base64": { "type": "string" },
            "text": { "type": "string" }
        },
        "oneOf": [
            { "required": ["path"] },
            { "required": ["base64"] },
            { "required": ["text"] }
        ],
        "additionalProperties": false
    })
}
