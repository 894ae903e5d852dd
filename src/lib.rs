//! # texpr
//!
//! A structural type-expression algebra. Types are built through a
//! [`TypeManager`], which interns every value in a bump arena and keeps
//! unions, intersections and differences in disjunctive normal form. Two
//! types built from the same components are therefore the same pointer.
//!
//! The textual syntax is a small s-expression language:
//!
//! ```
//! use texpr::{Bump, TypeManager, parse_te, unparse};
//!
//! let arena = Bump::new();
//! let manager = TypeManager::new(&arena);
//!
//! let ty = parse_te(manager, "(inter (union number string) boolean)").unwrap();
//! assert_eq!(
//!     unparse(ty).unwrap(),
//!     "(union (boolean & number) (boolean & string))"
//! );
//! ```
//!
//! Subtyping and alpha-equivalence work on interned types:
//!
//! ```
//! use texpr::{Bump, TypeManager, equivalent, is_subtype, parse_te};
//!
//! let arena = Bump::new();
//! let manager = TypeManager::new(&arena);
//!
//! let wide = parse_te(manager, "((union number string) -> number)").unwrap();
//! let narrow = parse_te(manager, "(number -> number)").unwrap();
//! assert!(is_subtype(wide, narrow));
//!
//! let f = parse_te(manager, "(T1 -> T1)").unwrap();
//! let g = parse_te(manager, "(T2 -> T2)").unwrap();
//! assert!(equivalent(f, g));
//! ```

pub use bumpalo::Bump;

// Re-export the public API from texpr_core
pub use texpr_core::errors::{LookupError, ParseError, PrintError, TypeVarError};
pub use texpr_core::parser::{
    self, DEFAULT_MAX_DEPTH, ParseOptions, Sexp, parse_te, parse_te_with_options, parse_texp,
    parse_texp_with_options, read, read_with_options,
};
pub use texpr_core::type_env::TypeEnv;
pub use texpr_core::types::{
    self, Type, TypeManager, TypeVar, compare, contains_type, deref, equivalent, is_subset,
    is_subtype, unparse,
};
