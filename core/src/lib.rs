#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod errors;
pub mod parser;
pub mod type_env;
pub mod types;

pub use errors::{LookupError, ParseError, PrintError, TypeVarError};
pub use types::Type;
