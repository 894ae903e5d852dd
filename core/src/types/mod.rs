pub mod alpha_equivalence;
pub mod manager;
mod normalize;
pub mod printer;
pub mod subtype;
pub mod type_var;
mod types;


pub use alpha_equivalence::equivalent;
pub use manager::TypeManager;
pub use printer::unparse;
pub use subtype::{compare, contains_type, is_subset, is_subtype};
pub use type_var::{TypeVar, deref};
pub use types::Type;
