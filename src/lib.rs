pub mod access;
pub mod ast;
pub mod cli;
pub mod codec;
pub mod compiler;
pub mod evaluator;
pub mod lexer;
pub mod literal;
pub mod parser;
pub mod sql;
pub mod value;

pub use access::PropertyAccess;
pub use ast::{Constraint, ConstraintKind, Expr, Token};
pub use codec::{ArrayCodec, CodecError, CodecOptions, TextCodec};
pub use compiler::{CompileError, QueryBuilder, QueryCompiler};
pub use evaluator::Evaluator;
pub use lexer::{LexError, Lexer, Position};
pub use parser::{ParseError, Parser};
pub use sql::{SqlPredicate, SqlQuery};
pub use value::Value;
