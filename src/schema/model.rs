use super::error::{Result, SchemaError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type EntityId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl ParamType {
    pub const ALL: [ParamType; 5] = [
        ParamType::String,
        ParamType::Number,
        ParamType::Boolean,
        ParamType::Object,
        ParamType::Array,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "string" => Some(ParamType::String),
            "number" => Some(ParamType::Number),
            "boolean" => Some(ParamType::Boolean),
            "object" => Some(ParamType::Object),
            "array" => Some(ParamType::Array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
            ParamType::Array => "array",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hands out session-unique identifiers. Tools and parameters share one
/// sequence, so a parameter never collides with its parent or siblings.
#[derive(Debug)]
pub struct IdGenerator {
    next: EntityId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub required: bool,
    #[serde(rename = "enum")]
    pub enum_values: Vec<String>,
    #[serde(rename = "default")]
    pub default_value: String,
}

/// A single field change on a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterEdit {
    Name(String),
    Description(String),
    Type(ParamType),
    Required(bool),
    Enum(Vec<String>),
    Default(String),
}

impl Parameter {
    /// A fresh row: string typed, optional, no enum and no default.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            param_type: ParamType::String,
            required: false,
            enum_values: Vec::new(),
            default_value: String::new(),
        }
    }

    pub fn edited(&self, edit: ParameterEdit) -> Parameter {
        let mut next = self.clone();
        match edit {
            ParameterEdit::Name(name) => next.name = name,
            ParameterEdit::Description(description) => next.description = description,
            ParameterEdit::Type(param_type) => next.param_type = param_type,
            ParameterEdit::Required(required) => next.required = required,
            ParameterEdit::Enum(values) => next.enum_values = values,
            ParameterEdit::Default(value) => next.default_value = value,
        }
        next
    }

    pub fn enum_text(&self) -> String {
        join_enum_text(&self.enum_values)
    }
}

/// Splits the comma-separated enum text into trimmed, non-empty tokens.
pub fn parse_enum_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_enum_text(values: &[String]) -> String {
    values.join(",")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolEdit {
    Name(String),
    Description(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
}

impl Tool {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            parameters: Vec::new(),
        }
    }

    pub fn edited(&self, edit: ToolEdit) -> Tool {
        let mut next = self.clone();
        match edit {
            ToolEdit::Name(name) => next.name = name,
            ToolEdit::Description(description) => next.description = description,
        }
        next
    }

    pub fn with_parameter_added(&self, parameter: Parameter) -> Tool {
        let mut next = self.clone();
        next.parameters.push(parameter);
        next
    }

    pub fn with_parameter_replaced(&self, index: usize, parameter: Parameter) -> Result<Tool> {
        self.parameter(index)?;
        let mut next = self.clone();
        next.parameters[index] = parameter;
        Ok(next)
    }

    pub fn with_parameter_removed(&self, index: usize) -> Result<Tool> {
        self.parameter(index)?;
        let mut next = self.clone();
        next.parameters.remove(index);
        Ok(next)
    }

    pub fn parameter(&self, index: usize) -> Result<&Parameter> {
        self.parameters
            .get(index)
            .ok_or(SchemaError::IndexOutOfRange {
                what: "parameter",
                index,
                len: self.parameters.len(),
            })
    }
}

/// The root of editor state. Every mutation swaps whole records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ToolCollection {
    tools: Vec<Tool>,
}

impl ToolCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tools(tools: Vec<Tool>) -> Self {
        Self { tools }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn get(&self, index: usize) -> Result<&Tool> {
        self.tools.get(index).ok_or(SchemaError::IndexOutOfRange {
            what: "tool",
            index,
            len: self.tools.len(),
        })
    }

    pub fn push(&mut self, tool: Tool) {
        self.tools.push(tool);
    }

    pub fn replace(&mut self, index: usize, tool: Tool) -> Result<()> {
        self.get(index)?;
        self.tools[index] = tool;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Tool> {
        self.get(index)?;
        Ok(self.tools.remove(index))
    }
}
