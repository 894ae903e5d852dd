//! Error types for the type-expression algebra.
//!
//! Every fallible entry point returns one of these as a recoverable value.
//! Subtyping and equivalence checks are total and never fail.

use thiserror::Error;

use crate::String;

/// Malformed textual type syntax.
///
/// Messages carry the offending s-expression so the caller can report it
/// without holding on to the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The reader could not turn the text into an s-expression.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("procedure type expression without -> - {texp}")]
    MissingArrow { texp: String },

    #[error("no param types in proc texp - {texp}")]
    NoParameters { texp: String },

    #[error("no return type in proc texp - {texp}")]
    NoReturnType { texp: String },

    #[error("only one -> allowed in a procexp - {texp}")]
    MultipleArrows { texp: String },

    #[error("parameters of procedure type must be separated by '*': {texp}")]
    MissingSeparator { texp: String },

    #[error("dangling '*' at the end of procedure parameters: {texp}")]
    DanglingSeparator { texp: String },

    #[error("unexpected tokens after the return type - {texp}")]
    TrailingTokens { texp: String },

    /// `is?` used in a procedure that is not shaped `(... any -> is? T)`.
    #[error("type predicate must have the form (... any -> is? T) - {texp}")]
    InvalidTypePredicate { texp: String },

    /// `(is? ...)` list without exactly one payload.
    #[error("is? expects exactly one type - {texp}")]
    MalformedTypePredicate { texp: String },

    #[error("type expression nesting depth exceeds maximum of {max_depth} levels")]
    MaxDepthExceeded { max_depth: usize },
}

/// Failure to render a type expression as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrintError {
    /// The variable resolves (directly or through its binding) back to itself.
    #[error("type variable {name} is bound to a type that contains itself")]
    CyclicVariable { name: String },
}

/// Type-environment lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("type variable not found: {name}")]
    NotFound { name: String },

    #[error("cannot extend type environment with {vars} names and {types} types")]
    ArityMismatch { vars: usize, types: usize },
}

/// Misuse of a type-variable cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeVarError {
    #[error("type variable {name} is already bound")]
    AlreadyBound { name: String },

    #[error("cycle detected while dereferencing type variable {name}")]
    Cycle { name: String },
}
