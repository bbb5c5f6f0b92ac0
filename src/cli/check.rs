//! Validate expressions and evaluate them against JSON input

use super::{CliError, convert::parse_any};
use crate::Value;

/// Options for the check and eval commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Expression in text grammar or array (JSON) form
    pub expression: String,
    /// JSON document to evaluate against
    pub input: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Expression evaluated against the input document
    Evaluated(bool),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = parse_any(&options.expression)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;
    let document = Value::from_json(json_value);

    Ok(CheckResult::Evaluated(expr.evaluate(&document)))
}
