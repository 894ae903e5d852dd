use core::fmt::Display;

use crate::types::{printer, type_var::TypeVar};

/// A node of the type-expression algebra.
///
/// Types are allocated and hash-consed by
/// [`TypeManager`](crate::types::manager::TypeManager), so two structurally
/// equal types from the same manager are the same reference.
///
/// `Union`, `Intersection` and `Difference` are always in canonical form:
/// flattened, sorted, deduplicated and (for intersections) in disjunctive
/// normal form. Only the manager's constructors may build them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(C, u8)]
pub enum Type<'a> {
    // Atomic types.
    Number = 0,
    Boolean = 1,
    Str = 2,
    Void = 3,
    Any = 4,
    Never = 5,

    // Procedures. `pred` is the type a predicate narrows its argument to,
    // `Never` for ordinary procedures.
    Procedure {
        params: &'a [&'a Type<'a>],
        ret: &'a Type<'a>,
        pred: &'a Type<'a>,
    } = 6,

    // Tuples. The empty slice is the Empty tuple. Elements are never tuples.
    Tuple(&'a [&'a Type<'a>]) = 7,

    // Set-algebraic types.
    Union(&'a [&'a Type<'a>]) = 8,
    Intersection(&'a [&'a Type<'a>]) = 9,
    Difference(&'a [&'a Type<'a>]) = 10,

    // Type variables.
    Var(&'a TypeVar<'a>) = 11,
}

pub(crate) const NUMBER: &str = "number";
pub(crate) const BOOLEAN: &str = "boolean";
pub(crate) const STRING: &str = "string";
pub(crate) const VOID: &str = "void";
pub(crate) const ANY: &str = "any";
pub(crate) const NEVER: &str = "never";

impl<'a> Type<'a> {
    /// Keyword of an atomic type, `None` for every other variant.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Type::Number => Some(NUMBER),
            Type::Boolean => Some(BOOLEAN),
            Type::Str => Some(STRING),
            Type::Void => Some(VOID),
            Type::Any => Some(ANY),
            Type::Never => Some(NEVER),
            Type::Procedure { .. }
            | Type::Tuple(_)
            | Type::Union(_)
            | Type::Intersection(_)
            | Type::Difference(_)
            | Type::Var(_) => None,
        }
    }

    pub fn is_atomic(&self) -> bool {
        self.keyword().is_some()
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Type::Never)
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, Type::Procedure { .. })
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Type::Tuple(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self, Type::Intersection(_))
    }

    pub fn is_difference(&self) -> bool {
        matches!(self, Type::Difference(_))
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Type::Var(_))
    }

    /// The variable cell, if this is a type variable.
    pub fn as_var(&self) -> Option<&'a TypeVar<'a>> {
        match self {
            Type::Var(var) => Some(*var),
            _ => None,
        }
    }

    /// Members of a union, intersection or difference; empty for other variants.
    pub fn components(&self) -> &'a [&'a Type<'a>] {
        match self {
            Type::Union(members) | Type::Intersection(members) | Type::Difference(members) => {
                *members
            }
            _ => &[],
        }
    }
}

impl Display for Type<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match printer::unparse(self) {
            Ok(text) => f.write_str(&text),
            Err(err) => write!(f, "<{}>", err),
        }
    }
}
