use serde_json::json;

pub mod contracts;
pub mod errors;

pub fn tool_definitions() -> Vec<serde_json::Value> {
    vec![
        json!({
            "name": contracts::TOOL_STATE,
            "description": "Render the current tool collection and notification.",
            "inputSchema": contracts::no_arguments_schema()
        }),
        json!({
            "name": contracts::TOOL_ADD_TOOL,
            "description": "Append an empty tool.",
            "inputSchema": contracts::no_arguments_schema()
        }),
        json!({
            "name": contracts::TOOL_UPDATE_TOOL,
            "description": "Replace the tool at an index with a full record.",
            "inputSchema": contracts::update_tool_schema()
        }),
        json!({
            "name": contracts::TOOL_REMOVE_TOOL,
            "description": "Remove the tool at an index.",
            "inputSchema": contracts::remove_tool_schema()
        }),
        json!({
            "name": contracts::TOOL_SET_TOOL_FIELD,
            "description": "Set the name or description of a tool.",
            "inputSchema": contracts::set_tool_field_schema()
        }),
        json!({
            "name": contracts::TOOL_ADD_PARAMETER,
            "description": "Append a default string parameter to a tool.",
            "inputSchema": contracts::add_parameter_schema()
        }),
        json!({
            "name": contracts::TOOL_UPDATE_PARAMETER,
            "description": "Replace a parameter of a tool with a full record.",
            "inputSchema": contracts::update_parameter_schema()
        }),
        json!({
            "name": contracts::TOOL_REMOVE_PARAMETER,
            "description": "Remove a parameter from a tool.",
            "inputSchema": contracts::remove_parameter_schema()
        }),
        json!({
            "name": contracts::TOOL_SET_PARAMETER_FIELD,
            "description": "Set one field of a parameter. Enum accepts comma-separated text.",
            "inputSchema": contracts::set_parameter_field_schema()
        }),
        json!({
            "name": contracts::TOOL_EXPORT,
            "description": "Export the function-calling schema document.",
            "inputSchema": contracts::export_schema()
        }),
        json!({
            "name": contracts::TOOL_IMPORT,
            "description": "Replace the collection with a previously exported document.",
            "inputSchema": contracts::import_schema()
        }),
        json!({
            "name": contracts::TOOL_DISMISS_NOTIFICATION,
            "description": "Dismiss the current notification.",
            "inputSchema": contracts::no_arguments_schema()
        }),
    ]
}
