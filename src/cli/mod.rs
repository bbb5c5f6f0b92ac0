//! CLI support for fieldexpr
//!
//! Provides programmatic access to the `fieldexpr` commands so other tools
//! can embed them without spawning the binary.

mod check;
mod convert;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::{compile_to_sql, decode_array, encode_text, parse_any};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed text or array expression
    #[error("{0}")]
    Codec(#[from] crate::CodecError),

    /// Expression cannot be compiled to SQL
    #[error("Compile error: {0}")]
    Compile(#[from] crate::CompileError),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'fieldexpr docs' to see available categories.")]
    UnknownCategory(String),
}
