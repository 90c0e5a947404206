//! The editable tool model and its mapping to and from the
//! function-calling JSON document.

pub mod error;
pub mod export;
pub mod import;
pub mod model;

pub use error::{Result, SchemaError};
pub use model::{
    EntityId, IdGenerator, ParamType, Parameter, ParameterEdit, Tool, ToolCollection, ToolEdit,
};
