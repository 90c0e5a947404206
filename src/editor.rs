use crate::schema::import::{self, ImportOutcome};
use crate::schema::{
    EntityId, IdGenerator, ParamType, Parameter, ParameterEdit, Result, SchemaError, Tool,
    ToolCollection, ToolEdit, export,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashSet;

pub const NOTIFICATION_TITLE: &str = "Notification";
pub const READ_FAILURE_MESSAGE: &str = "Failed to read the file.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub tools: usize,
    pub parameters: usize,
    pub warnings: Vec<String>,
}

impl From<&ImportOutcome> for ImportReport {
    fn from(outcome: &ImportOutcome) -> Self {
        Self {
            tools: outcome.collection.len(),
            parameters: outcome.parameter_count(),
            warnings: outcome.warnings.clone(),
        }
    }
}

/// A parameter row as supplied by a caller, before it has an identity.
#[derive(Debug, Clone, Default)]
pub struct ParameterDraft {
    pub id: Option<EntityId>,
    pub name: String,
    pub description: String,
    pub param_type: ParamType,
    pub required: bool,
    pub enum_values: Vec<String>,
    pub default_value: String,
}

#[derive(Debug, Clone, Default)]
pub struct ToolDraft {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterDraft>,
}

/// One editing session: the tool collection, its id source and the
/// notification currently shown to the user.
#[derive(Debug, Default)]
pub struct Editor {
    tools: ToolCollection,
    ids: IdGenerator,
    notification: Option<Notification>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tools(&self) -> &ToolCollection {
        &self.tools
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn add_tool(&mut self) -> usize {
        let tool = Tool::new(self.ids.next_id());
        tracing::debug!(id = tool.id, "add tool");
        self.tools.push(tool);
        self.tools.len() - 1
    }

    /// Replaces the tool at `index` wholesale. The slot keeps its identity.
    /// A supplied parameter id is kept only if it belongs to a parameter
    /// already in this slot and is claimed once; anything else gets a fresh id.
    pub fn update_tool(&mut self, index: usize, draft: ToolDraft) -> Result<()> {
        let current = self.tools.get(index)?;
        let id = current.id;
        let mut reusable: HashSet<EntityId> =
            current.parameters.iter().map(|parameter| parameter.id).collect();
        let parameters = draft
            .parameters
            .into_iter()
            .map(|mut parameter| {
                parameter.id = parameter.id.filter(|id| reusable.remove(id));
                self.materialize(parameter)
            })
            .collect();
        let tool = Tool {
            id,
            name: draft.name,
            description: draft.description,
            parameters,
        };
        tracing::debug!(index, id, "update tool");
        self.tools.replace(index, tool)
    }

    pub fn remove_tool(&mut self, index: usize) -> Result<Tool> {
        let removed = self.tools.remove(index)?;
        tracing::debug!(index, id = removed.id, "remove tool");
        Ok(removed)
    }

    pub fn edit_tool(&mut self, index: usize, edit: ToolEdit) -> Result<()> {
        tracing::debug!(index, edit = ?edit, "edit tool");
        let next = self.tools.get(index)?.edited(edit);
        self.tools.replace(index, next)
    }

    pub fn add_parameter(&mut self, tool_index: usize) -> Result<usize> {
        let tool = self.tools.get(tool_index)?;
        let next = tool.with_parameter_added(Parameter::new(self.ids.next_id()));
        let position = next.parameters.len() - 1;
        self.tools.replace(tool_index, next)?;
        tracing::debug!(tool_index, position, "add parameter");
        Ok(position)
    }

    pub fn update_parameter(
        &mut self,
        tool_index: usize,
        index: usize,
        draft: ParameterDraft,
    ) -> Result<()> {
        let existing = self.tools.get(tool_index)?.parameter(index)?.id;
        let parameter = self.materialize(ParameterDraft {
            id: Some(existing),
            ..draft
        });
        let next = self.tools.get(tool_index)?.with_parameter_replaced(index, parameter)?;
        self.tools.replace(tool_index, next)
    }

    pub fn remove_parameter(&mut self, tool_index: usize, index: usize) -> Result<()> {
        let next = self.tools.get(tool_index)?.with_parameter_removed(index)?;
        tracing::debug!(tool_index, index, "remove parameter");
        self.tools.replace(tool_index, next)
    }

    pub fn edit_parameter(
        &mut self,
        tool_index: usize,
        index: usize,
        edit: ParameterEdit,
    ) -> Result<()> {
        tracing::debug!(tool_index, index, edit = ?edit, "edit parameter");
        let tool = self.tools.get(tool_index)?;
        let parameter = tool.parameter(index)?.edited(edit);
        let next = tool.with_parameter_replaced(index, parameter)?;
        self.tools.replace(tool_index, next)
    }

    pub fn export_document(&self) -> Value {
        export::to_document(&self.tools)
    }

    pub fn export_text(&self) -> String {
        export::to_pretty_string(&self.tools)
    }

    /// Replaces the whole collection with the parsed document. On failure the
    /// collection is left as it was and the error is shown as a notification.
    pub fn import_text(&mut self, text: &str) -> Result<ImportReport> {
        match import::parse_document(text, &mut self.ids) {
            Ok(outcome) => {
                let report = ImportReport::from(&outcome);
                tracing::info!(
                    tools = report.tools,
                    parameters = report.parameters,
                    "imported tool schema"
                );
                self.tools = outcome.collection;
                Ok(report)
            }
            Err(err) => {
                tracing::info!(error = %err, "import rejected");
                self.notify(format!("Invalid JSON Format: {err}"));
                Err(err)
            }
        }
    }

    pub fn report_read_failure(&mut self, err: &SchemaError) {
        tracing::info!(error = %err, "import read failed");
        self.notify(READ_FAILURE_MESSAGE);
    }

    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    /// The view of the current state handed back after every command.
    pub fn render(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .tools()
            .iter()
            .map(|tool| {
                let parameters: Vec<Value> = tool
                    .parameters
                    .iter()
                    .map(|parameter| {
                        let mut row = json!(parameter);
                        if let Some(obj) = row.as_object_mut() {
                            obj.insert("enum_text".to_string(), json!(parameter.enum_text()));
                        }
                        row
                    })
                    .collect();
                json!({
                    "id": tool.id,
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": parameters,
                })
            })
            .collect();

        json!({
            "tools": tools,
            "notification": self.notification,
        })
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification {
            title: NOTIFICATION_TITLE.to_string(),
            message: message.into(),
        });
    }

    fn materialize(&mut self, draft: ParameterDraft) -> Parameter {
        let id = draft.id.unwrap_or_else(|| self.ids.next_id());
        Parameter {
            id,
            name: draft.name,
            description: draft.description,
            param_type: draft.param_type,
            required: draft.required,
            enum_values: draft.enum_values,
            default_value: draft.default_value,
        }
    }
}
