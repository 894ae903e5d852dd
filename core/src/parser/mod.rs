//! Textual type syntax.
//!
//! Source text is first read into an s-expression tree ([`Sexp`]), which is
//! then interpreted as a type expression by [`parse_texp`].

pub mod reader;
pub mod sexp;
pub mod texp;


pub use reader::{read, read_with_options};
pub use sexp::Sexp;
pub use texp::{parse_te, parse_te_with_options, parse_texp, parse_texp_with_options};

/// Default bound on list nesting accepted by the parser.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth of parenthesized lists.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
