//! Type-variable cells.
//!
//! A `TypeVar` is allocated once per name in the manager's arena and holds a
//! single write-once binding. Bindings may point at other variables, forming
//! a deref chain that is followed by [`deref`].

use core::cell::Cell;
use core::fmt;
use core::hash::{Hash, Hasher};

use hashbrown::HashSet;

use crate::{ToString, errors::TypeVarError, types::Type};

pub struct TypeVar<'a> {
    /// Slot index in the owning manager.
    id: u32,
    name: &'a str,
    contents: Cell<Option<&'a Type<'a>>>,
}

impl<'a> TypeVar<'a> {
    pub(crate) fn new(id: u32, name: &'a str) -> Self {
        Self {
            id,
            name,
            contents: Cell::new(None),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The direct binding of this variable (not dereferenced).
    pub fn contents(&self) -> Option<&'a Type<'a>> {
        self.contents.get()
    }

    pub fn is_bound(&self) -> bool {
        self.contents.get().is_some()
    }

    /// Bind this variable. A variable can be bound exactly once.
    pub fn bind(&self, ty: &'a Type<'a>) -> Result<(), TypeVarError> {
        if self.is_bound() {
            return Err(TypeVarError::AlreadyBound {
                name: self.name.to_string(),
            });
        }
        tracing::trace!(var = self.name, "binding type variable");
        self.contents.set(Some(ty));
        Ok(())
    }
}

impl PartialEq for TypeVar<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for TypeVar<'_> {}

impl Hash for TypeVar<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeVar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bindings are not followed: a bound chain may be long.
        f.debug_struct("TypeVar")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// Follow variable bindings until reaching a non-variable or an unbound variable.
///
/// Non-variables are returned unchanged. Chains that revisit a variable are
/// rejected with [`TypeVarError::Cycle`].
pub fn deref<'t, 'a: 't>(ty: &'t Type<'a>) -> Result<&'t Type<'a>, TypeVarError> {
    let mut seen = HashSet::new();
    let mut current = ty;
    while let Type::Var(var) = current {
        if !seen.insert(var.id()) {
            return Err(TypeVarError::Cycle {
                name: var.name().to_string(),
            });
        }
        match var.contents() {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(current)
}
