//! Editor core for function-calling tool schemas: an editable tool model,
//! its export/import transform, and the command surface used by the
//! `tool-schema-builder` binary.

pub mod commands;
pub mod editor;
pub mod input;
pub mod mcp;
pub mod schema;
