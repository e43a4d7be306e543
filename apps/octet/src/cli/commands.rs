//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::Output;
use crate::config::AppConfig;
use crate::script::{Bindings, IntegerJson, OperandJson, ScriptRunner, ValueJson};
use octet_core::{Facade, OctetError, Operand, Operation};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum script file size (16 MB).
///
/// Buffers travel inside scripts as Base64, so this also bounds the data a
/// script can carry.
const MAX_SCRIPT_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), OctetError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| OctetError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(OctetError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve `path` to a canonical path naming an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, OctetError> {
    let canonical = path.canonicalize().map_err(|e| {
        OctetError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(OctetError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read a script file after path and size validation.
pub fn read_script_file(path: &Path) -> Result<String, OctetError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_SCRIPT_FILE_SIZE)?;
    std::fs::read_to_string(&validated)
        .map_err(|e| OctetError::IoError(format!("Cannot read script: {}", e)))
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Human-readable rendering of a result.
pub fn render_value(value: &ValueJson) -> String {
    match value {
        ValueJson::Buffer(base64) => base64.clone(),
        ValueJson::Text(text) => text.clone(),
        ValueJson::List(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        ValueJson::Integer(IntegerJson::Signed(v)) => v.to_string(),
        ValueJson::Integer(IntegerJson::Unsigned(v)) => v.to_string(),
        ValueJson::Integer(IntegerJson::Text(v)) => v.clone(),
        ValueJson::Decimal(v) => format!("{:?}", v),
    }
}

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// CALL COMMAND
// =============================================================================

/// Parse operand arguments given on the command line.
pub fn parse_operands(args: &[String]) -> Result<Vec<OperandJson>, OctetError> {
    args.iter()
        .enumerate()
        .map(|(index, arg)| {
            serde_json::from_str(arg).map_err(|e| {
                OctetError::SerializationError(format!("Operand {} is not valid JSON: {}", index, e))
            })
        })
        .collect()
}

/// Run a single operation and print its result.
pub fn cmd_call(
    config: &AppConfig,
    output: Output,
    operation: &str,
    args: &[String],
) -> Result<(), OctetError> {
    let operation: Operation = operation.parse()?;
    let facade = Facade::with_limits(config.limits());

    let mut no_bindings = Bindings::new();
    let operands = parse_operands(args)?
        .into_iter()
        .map(|arg| arg.into_operand(config.limits(), &mut no_bindings))
        .collect::<Result<Vec<Operand>, _>>()?;

    if output.verbose {
        tracing::info!(
            operation = operation.name(),
            operands = operands.len(),
            "calling operation"
        );
    }

    let value = facade.call(operation, operands)?;
    let json = ValueJson::from(&value);

    if output.json_mode {
        print_json(&serde_json::json!({
            "operation": operation.name(),
            "result": json,
        }));
    } else {
        println!("{}", render_value(&json));
    }

    Ok(())
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Run a script file and print each step's result.
pub fn cmd_run(config: &AppConfig, output: Output, file: &Path) -> Result<(), OctetError> {
    tracing::info!("Running script {:?}", file);

    let text = read_script_file(file)?;
    let steps = ScriptRunner::parse(&text)?;
    let step_count = steps.len();

    let mut runner = ScriptRunner::new(Facade::with_limits(config.limits()));
    let outcomes = runner.run(steps).map_err(|failure| {
        tracing::error!(step = failure.step, op = %failure.op, "script step failed");
        failure.source
    })?;

    if output.json_mode {
        print_json(&serde_json::json!({
            "steps": outcomes,
            "bindings": runner.bindings().keys().collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    for outcome in &outcomes {
        let rendered = render_value(&outcome.value);
        match (&outcome.bind, output.verbose) {
            (Some(name), _) if !output.quiet => {
                println!("[{}] {} -> {} = {}", outcome.step, outcome.op, name, rendered);
            }
            (_, true) => println!("[{}] {} -> {}", outcome.step, outcome.op, rendered),
            (None, false) => println!("{}", rendered),
            _ => {}
        }
    }

    if !output.quiet {
        println!();
        println!("Script completed: {} steps", step_count);
    }

    Ok(())
}

// =============================================================================
// OPS COMMAND
// =============================================================================

/// List every operation with its operand signature.
pub fn cmd_ops(output: Output) -> Result<(), OctetError> {
    if output.json_mode {
        let ops: Vec<_> = Operation::ALL
            .iter()
            .map(|op| {
                let signature = op.signature();
                serde_json::json!({
                    "name": op.name(),
                    "min_operands": signature.min(),
                    "max_operands": signature.max(),
                    "signature": signature.to_string(),
                })
            })
            .collect();
        print_json(&serde_json::json!({ "operations": ops }));
        return Ok(());
    }

    if !output.quiet {
        println!("Operations:");
        println!();
    }
    for op in Operation::ALL {
        println!("  {:<22} {}", op.name(), op.signature());
    }

    Ok(())
}
