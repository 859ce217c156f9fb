//! Validation pipeline for tool arguments.
//!
//! Every tool call arrives as an untyped JSON object. This module turns it
//! into the tool's typed argument struct or a `ValidationError` that the
//! calling model can act on — the error names the tool and every violated
//! constraint with its field path, so the model can fix its arguments and
//! retry.
//!
//! Key concepts:
//! - **Strict decode**: argument structs use `deny_unknown_fields`, so a
//!   misspelled or misplaced field is an error rather than silently dropped
//! - **Constraint checks**: range, pattern and cross-field rules that serde
//!   cannot express live in `ToolArgs::check`
//! - Nothing here panics; the result is always a tagged success/failure.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// One violated constraint: which field, and what rule it broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field path as the caller spelled it (e.g. "options[2].color").
    pub path: String,
    /// What the field was required to be.
    pub constraint: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            constraint: constraint.into(),
        }
    }
}

/// Arguments that failed to parse against a tool's input contract.
#[derive(Debug, Error)]
#[error("{}", self.render())]
pub struct ValidationError {
    /// Which tool's arguments failed.
    pub tool: &'static str,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    fn render(&self) -> String {
        let detail: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.path, v.constraint))
            .collect();
        format!(
            "Invalid arguments for {}: {}",
            self.tool,
            detail.join("; ")
        )
    }
}

/// Typed tool arguments: a strict serde decode plus extra constraint checks.
pub trait ToolArgs: DeserializeOwned {
    /// Constraint checks beyond what the serde derive enforces.
    /// An empty vec means the arguments are valid.
    fn check(&self) -> Vec<Violation> {
        Vec::new()
    }
}

/// Parse and validate raw tool-call arguments.
///
/// Never panics. On failure the error carries the tool name and the full
/// list of violations found.
pub fn parse_args<T: ToolArgs>(
    tool: &'static str,
    raw: serde_json::Value,
) -> Result<T, ValidationError> {
    let args: T = serde_json::from_value(raw).map_err(|e| ValidationError {
        tool,
        violations: vec![Violation::new("arguments", e.to_string())],
    })?;

    let violations = args.check();
    if violations.is_empty() {
        Ok(args)
    } else {
        Err(ValidationError { tool, violations })
    }
}
