//! Wire formats for expression trees.
//!
//! - **[array]** - nested `serde_json::Value` maps discriminated by a
//!   `logic`, `selector` or `constraint` key
//! - **[text]** - function-call grammar, `and(key(name, equals("x")), ...)`
//!
//! Both formats recognize the same node kinds; constraint names come from
//! [`ConstraintKind::name`](crate::ast::ConstraintKind::name).

pub mod array;
pub mod text;

pub use array::ArrayCodec;
pub use text::TextCodec;

use thiserror::Error;

use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Malformed or unrecognized serialized input, carrying the offending
    /// fragment.
    #[error("unsupported serialized expression: {0}")]
    UnsupportedSerialized(String),

    /// The text grammar could not be parsed.
    #[error("unsupported serialized expression: {0}")]
    Parse(#[from] ParseError),

    /// A compared value or method argument has no wire representation
    /// (objects, NaN, infinities).
    #[error("value cannot be serialized: {0}")]
    UnrepresentableValue(String),
}

impl CodecError {
    /// True for errors about the serialized input itself, as opposed to
    /// trees that cannot be written out.
    pub fn is_unsupported_serialized(&self) -> bool {
        matches!(self, CodecError::UnsupportedSerialized(_) | CodecError::Parse(_))
    }
}

/// Behaviour switches shared by the codecs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Write `count: 0` for every quantifier, as older producers of the
    /// array format did. Decoding such output cannot recover the real count.
    pub lossy_quantifier_counts: bool,
}
