//! # Filter Expressions - Abstract Syntax Tree
//!
//! This module defines the expression tree shared by every transform in the
//! crate: the array codec, the text codec, the query compiler and the
//! evaluator all consume or produce an [`Expr`].
//!
//! ## Architecture Overview
//!
//! - **[expressions]** - Tree nodes: logic leaves, junctions, selectors,
//!   quantifiers
//! - **[constraints]** - Comparison leaves and their wire-name table
//! - **[tokens]** - Lexical tokens of the text grammar
//! - **display** - Default rendering used in diagnostics
//!
//! ## Node Families
//!
//! - **Logic** - `true()`, `false()`
//! - **Junctions** - `and(...)`, `or(...)`, `not(...)`
//! - **Selectors** - `key`, `property`, `propertyPath`, `method` narrow the
//!   value in scope before applying their child
//! - **Quantifiers** - `all`, `atLeast`, `atMost`, `exactly`, `count` apply
//!   their child per element of a collection
//! - **Constraints** - `equals`, `startsWith`, `in`, ... compare the value in
//!   scope
//!
//! ## Example
//!
//! ```text
//! and(key(firstname, equals("John")), key(lastname, equals("Doe")))
//! ```
//!
//! ## Rendering
//!
//! `Display` produces a compact operator-style form:
//!
//! ```text
//! name{>10 && endsWith(".css")}
//! ```
pub mod constraints;
mod display;
pub mod expressions;
pub mod tokens;

pub use constraints::{Constraint, ConstraintKind};
pub use expressions::Expr;
pub use tokens::Token;
