//! Conversions between the text grammar, the array format and SQL

use super::CliError;
use crate::{ArrayCodec, CodecOptions, Expr, QueryCompiler, SqlQuery, TextCodec};

/// Parse an expression given either as text grammar or as array JSON.
///
/// Input starting with `{` is read as the array format.
pub fn parse_any(input: &str) -> Result<Expr, CliError> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') {
        let json: serde_json::Value = serde_json::from_str(trimmed)?;
        Ok(ArrayCodec::new().decode(&json)?)
    } else {
        Ok(TextCodec::decode(input)?)
    }
}

/// Text grammar to array format
pub fn encode_text(text: &str, options: CodecOptions) -> Result<serde_json::Value, CliError> {
    let expr = TextCodec::decode(text)?;
    Ok(ArrayCodec::with_options(options).encode(&expr)?)
}

/// Array format (JSON string) to text grammar
pub fn decode_array(json_str: &str) -> Result<String, CliError> {
    let json: serde_json::Value = serde_json::from_str(json_str)?;
    let expr = ArrayCodec::new().decode(&json)?;
    Ok(TextCodec::encode(&expr)?)
}

/// Either expression form to a SQL select
pub fn compile_to_sql(input: &str, table: &str, alias: &str) -> Result<String, CliError> {
    let expr = parse_any(input)?;
    let mut query = SqlQuery::new(table, alias);
    QueryCompiler::new(alias).apply(&expr, &mut query)?;
    Ok(query.to_sql())
}
