use crate::commands::{args, schema_error_result, state_result};
use crate::editor::Editor;
use crate::schema::{ParameterEdit, SchemaError};
use serde_json::Value;

pub fn add_parameter(editor: &mut Editor, args: &Value) -> Value {
    let tool_index = match args::index(args, "tool_index") {
        Ok(index) => index,
        Err(err) => return schema_error_result(&err, None),
    };
    match editor.add_parameter(tool_index) {
        Ok(position) => state_result(
            editor,
            format!("added parameter {position} to tool {tool_index}"),
        ),
        Err(err) => schema_error_result(&err, None),
    }
}

pub fn update_parameter(editor: &mut Editor, args: &Value) -> Value {
    match apply_update(editor, args) {
        Ok((tool_index, index)) => state_result(
            editor,
            format!("updated parameter {index} of tool {tool_index}"),
        ),
        Err(err) => schema_error_result(&err, None),
    }
}

pub fn remove_parameter(editor: &mut Editor, args: &Value) -> Value {
    let (tool_index, index) = match parse_position(args) {
        Ok(position) => position,
        Err(err) => return schema_error_result(&err, None),
    };
    match editor.remove_parameter(tool_index, index) {
        Ok(()) => state_result(
            editor,
            format!("removed parameter {index} from tool {tool_index}"),
        ),
        Err(err) => schema_error_result(&err, None),
    }
}

pub fn set_parameter_field(editor: &mut Editor, args: &Value) -> Value {
    match apply_field_edit(editor, args) {
        Ok((tool_index, index)) => state_result(
            editor,
            format!("updated parameter {index} of tool {tool_index}"),
        ),
        Err(err) => schema_error_result(&err, None),
    }
}

fn parse_position(args: &Value) -> Result<(usize, usize), SchemaError> {
    Ok((args::index(args, "tool_index")?, args::index(args, "index")?))
}

fn apply_update(editor: &mut Editor, args: &Value) -> Result<(usize, usize), SchemaError> {
    let (tool_index, index) = parse_position(args)?;
    let parameter = args::object(args)?
        .get("parameter")
        .ok_or_else(|| SchemaError::invalid_input("parameter is required"))?;
    let draft = args::parameter_draft(parameter)?;
    editor.update_parameter(tool_index, index, draft)?;
    Ok((tool_index, index))
}

fn apply_field_edit(editor: &mut Editor, args: &Value) -> Result<(usize, usize), SchemaError> {
    let (tool_index, index) = parse_position(args)?;
    let edit = parse_parameter_edit(args)?;
    editor.edit_parameter(tool_index, index, edit)?;
    Ok((tool_index, index))
}

fn parse_parameter_edit(args: &Value) -> Result<ParameterEdit, SchemaError> {
    let field = args::required_str(args, "field")?;
    let Some(value) = args::object(args)?.get("value") else {
        return Err(SchemaError::invalid_input("value is required"));
    };
    let edit = match field {
        "name" => ParameterEdit::Name(args::string_value(value, "value")?),
        "description" => ParameterEdit::Description(args::string_value(value, "value")?),
        "type" => ParameterEdit::Type(args::param_type_value(value)?),
        "required" => ParameterEdit::Required(args::bool_value(value, "value")?),
        "enum" => ParameterEdit::Enum(args::enum_value(value)?),
        "default" => ParameterEdit::Default(args::string_value(value, "value")?),
        other => {
            return Err(SchemaError::invalid_input(format!(
                "unknown parameter field: {other}"
            )));
        }
    };
    Ok(edit)
}
