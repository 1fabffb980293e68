//! Output formatting for the CLI.
//!
//! Results go to stdout after the forwarded forge output; warnings and errors
//! go to stderr.

use clap::ValueEnum;
use forge_workflow::{ConfigError, ToolchainError, WorkflowError};
use process_runner::ProcessError;
use serde::Serialize;
use serde_json::Value;

/// Output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a result in the specified format.
pub fn print<T: Serialize + std::fmt::Display>(value: &T, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(_) => println!("{}", value),
        },
    }
}

/// Print a warning that does not change the exit status.
pub fn print_warning(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("Warning: {}", message),
        OutputFormat::Json => eprintln!("{}", warning_json(message)),
    }
}

/// Print a command failure.
pub fn print_error(err: &anyhow::Error, format: &OutputFormat) {
    let message = format!("{:#}", err);
    match format {
        OutputFormat::Text => eprintln!("Error: {}", message),
        OutputFormat::Json => eprintln!("{}", error_json(&message, error_code(err))),
    }
}

/// Code of the outermost workspace error in the chain.
pub fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<WorkflowError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<ConfigError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<ToolchainError>() {
            Some(e.code())
        } else {
            cause.downcast_ref::<ProcessError>().map(ProcessError::code)
        }
    })
}

fn warning_json(message: &str) -> Value {
    serde_json::json!({ "status": "warning", "message": message })
}

fn error_json(message: &str, code: Option<&str>) -> Value {
    let mut value = serde_json::json!({ "status": "error", "message": message });
    if let Some(code) = code {
        value["code"] = Value::from(code);
    }
    value
}
