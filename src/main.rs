use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::EnvFilter;

use tool_schema_builder::commands::{self, collection, document, parameters};
use tool_schema_builder::editor::Editor;
use tool_schema_builder::mcp::{self, contracts};

#[derive(Parser)]
#[command(name = "tool-schema-builder")]
#[command(
    version,
    about = "Build, import and export function-calling tool schemas"
)]
struct Cli {
    /// Log filter directive (written to stderr)
    #[arg(long, global = true, env = "TOOL_SCHEMA_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
#[command(
    group(
        clap::ArgGroup::new("input")
            .required(true)
            .multiple(false)
            .args(["path", "base64"])
    )
)]
struct InputArgs {
    /// Path to an exported tool schema document
    #[arg(long)]
    path: Option<String>,
    /// Base64-encoded document bytes
    #[arg(long)]
    base64: Option<String>,
}

#[derive(Args, Clone)]
struct ImportArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct NormalizeArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Write the document here instead of stdout (a directory gets tool_schema.json)
    #[arg(long)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the editing session server
    Serve {
        /// Serve over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
    },
    /// Validate a document and summarize what it contains
    Import(ImportArgs),
    /// Import a document and export it again in canonical form.
    ///
    /// Unsupported parameter types are rewritten to string; each rewrite is
    /// reported as a warning on stderr.
    Normalize(NormalizeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Serve { stdio } => {
            if stdio {
                run_stdio_server()
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::Import(args) => run_import(args),
        Commands::Normalize(args) => run_normalize(args),
    }
}

fn init_tracing(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter: {directive}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn run_import(args: ImportArgs) -> Result<()> {
    let mut editor = Editor::new();
    let map = build_input_args(&args.input);
    let result = document::import(&mut editor, &Value::Object(map));
    print_tool_result(result, args.json)
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let mut editor = Editor::new();
    let map = build_input_args(&args.input);
    let imported = document::import(&mut editor, &Value::Object(map));
    if is_error(&imported) {
        return print_tool_result(imported, false);
    }

    let mut export_args = Map::new();
    if let Some(output) = &args.output {
        export_args.insert("output_path".to_string(), json!(output));
    }
    let result = document::export(&mut editor, &Value::Object(export_args));
    print_tool_result(result, false)
}

fn build_input_args(input: &InputArgs) -> Map<String, Value> {
    let mut map = Map::new();
    if let Some(path) = &input.path {
        map.insert("path".to_string(), json!(path));
    }
    if let Some(base64) = &input.base64 {
        map.insert("base64".to_string(), json!(base64));
    }
    map
}

fn is_error(result: &Value) -> bool {
    result
        .get("isError")
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

fn print_tool_result(result: Value, json_output: bool) -> Result<()> {
    if is_error(&result) {
        let message = result
            .get("structuredContent")
            .and_then(|value| value.get("error"))
            .and_then(|value| value.get("message"))
            .and_then(|value| value.as_str())
            .unwrap_or("command failed");
        eprintln!("{message}");
        process::exit(1);
    }

    if json_output {
        let structured = result
            .get("structuredContent")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let output = serde_json::to_string_pretty(&structured)?;
        println!("{output}");
        return Ok(());
    }

    let text = result
        .get("content")
        .and_then(|value| value.as_array())
        .and_then(|arr| arr.first())
        .and_then(|value| value.get("text"))
        .and_then(|value| value.as_str())
        .unwrap_or("");
    println!("{text}");
    Ok(())
}

fn run_stdio_server() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock().lines();
    let mut writer = io::BufWriter::new(stdout.lock());
    let mut editor = Editor::new();
    tracing::info!("editing session started");

    for line in reader {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed request");
                continue;
            }
        };

        let method = request.get("method").and_then(|value| value.as_str());
        let id = request.get("id").cloned();
        let response = match (method, id) {
            (Some("initialize"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": "2025-11-25",
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }
            })),
            (Some("tools/list"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "tools": mcp::tool_definitions()
                }
            })),
            (Some("tools/call"), Some(id)) => {
                let result = handle_tool_call(&mut editor, &request);
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": result
                }))
            }
            (method, _) => {
                tracing::debug!(method = ?method, "ignoring request");
                None
            }
        };

        if let Some(response) = response {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush response")?;
        }
    }

    Ok(())
}

fn handle_tool_call(editor: &mut Editor, request: &Value) -> Value {
    let params = request.get("params");
    let Some(params) = params.and_then(|value| value.as_object()) else {
        return commands::error_result(mcp::errors::INVALID_INPUT, "params must be an object", None);
    };

    let name = params.get("name").and_then(|value| value.as_str());
    let Some(name) = name else {
        return commands::error_result(
            mcp::errors::INVALID_INPUT,
            "params.name must be a string",
            None,
        );
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));
    tracing::debug!(command = name, "tools/call");

    match name {
        contracts::TOOL_STATE => collection::state(editor, &args),
        contracts::TOOL_ADD_TOOL => collection::add_tool(editor, &args),
        contracts::TOOL_UPDATE_TOOL => collection::update_tool(editor, &args),
        contracts::TOOL_REMOVE_TOOL => collection::remove_tool(editor, &args),
        contracts::TOOL_SET_TOOL_FIELD => collection::set_tool_field(editor, &args),
        contracts::TOOL_ADD_PARAMETER => parameters::add_parameter(editor, &args),
        contracts::TOOL_UPDATE_PARAMETER => parameters::update_parameter(editor, &args),
        contracts::TOOL_REMOVE_PARAMETER => parameters::remove_parameter(editor, &args),
        contracts::TOOL_SET_PARAMETER_FIELD => parameters::set_parameter_field(editor, &args),
        contracts::TOOL_EXPORT => document::export(editor, &args),
        contracts::TOOL_IMPORT => document::import(editor, &args),
        contracts::TOOL_DISMISS_NOTIFICATION => document::dismiss_notification(editor, &args),
        _ => commands::error_result(
            mcp::errors::INVALID_INPUT,
            format!("unknown command: {name}"),
            Some(name),
        ),
    }
}
