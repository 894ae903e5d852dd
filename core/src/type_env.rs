//! Lexically scoped bindings from variable names to types.

use bumpalo::Bump;

use crate::{
    ToString,
    errors::LookupError,
    types::{Type, TypeManager},
};

/// A chain of frames, innermost first. Frames are allocated in an arena and
/// never mutated, so an environment can be shared by every scope that
/// extends it.
#[derive(Debug, Clone, Copy)]
pub enum TypeEnv<'a> {
    Empty,
    Extend {
        vars: &'a [&'a str],
        types: &'a [&'a Type<'a>],
        enclosing: &'a TypeEnv<'a>,
    },
}

impl<'a> TypeEnv<'a> {
    pub fn empty(arena: &'a Bump) -> &'a TypeEnv<'a> {
        arena.alloc(TypeEnv::Empty)
    }

    /// A new frame binding `vars[i]` to `types[i]` on top of `self`.
    pub fn extend(
        &'a self,
        arena: &'a Bump,
        vars: &[&str],
        types: &[&'a Type<'a>],
    ) -> Result<&'a TypeEnv<'a>, LookupError> {
        if vars.len() != types.len() {
            return Err(LookupError::ArityMismatch {
                vars: vars.len(),
                types: types.len(),
            });
        }
        let vars = arena.alloc_slice_fill_iter(vars.iter().map(|var| &*arena.alloc_str(var)));
        let types = arena.alloc_slice_copy(types);
        Ok(arena.alloc(TypeEnv::Extend {
            vars,
            types,
            enclosing: self,
        }))
    }

    /// Resolve `name`.
    ///
    /// Atomic keywords resolve to their types before any frame is consulted.
    /// Otherwise the innermost binding wins.
    pub fn apply(&self, manager: &TypeManager<'a>, name: &str) -> Result<&'a Type<'a>, LookupError> {
        if let Some(builtin) = manager.atomic(name) {
            return Ok(builtin);
        }
        let mut env = self;
        loop {
            match env {
                TypeEnv::Empty => {
                    tracing::debug!(name, "type variable not found");
                    return Err(LookupError::NotFound {
                        name: name.to_string(),
                    });
                }
                TypeEnv::Extend {
                    vars,
                    types,
                    enclosing,
                } => {
                    if let Some(pos) = vars.iter().position(|var| *var == name) {
                        return Ok(types[pos]);
                    }
                    env = *enclosing;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtins_resolve_in_empty_env() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);
        let env = TypeEnv::empty(&bump);

        assert!(core::ptr::eq(env.apply(manager, "number").unwrap(), manager.number()));
        assert!(core::ptr::eq(env.apply(manager, "never").unwrap(), manager.never()));
    }

    #[test]
    fn test_not_found() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);
        let env = TypeEnv::empty(&bump);

        assert_eq!(
            env.apply(manager, "T"),
            Err(LookupError::NotFound {
                name: "T".to_string()
            })
        );
    }

    #[test]
    fn test_innermost_binding_wins() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let outer = TypeEnv::empty(&bump)
            .extend(&bump, &["T", "U"], &[manager.number(), manager.str()])
            .unwrap();
        let inner = outer.extend(&bump, &["T"], &[manager.boolean()]).unwrap();

        assert!(core::ptr::eq(inner.apply(manager, "T").unwrap(), manager.boolean()));
        assert!(core::ptr::eq(inner.apply(manager, "U").unwrap(), manager.str()));
        assert!(core::ptr::eq(outer.apply(manager, "T").unwrap(), manager.number()));
    }

    #[test]
    fn test_builtins_cannot_be_shadowed() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let env = TypeEnv::empty(&bump)
            .extend(&bump, &["number"], &[manager.str()])
            .unwrap();
        assert!(core::ptr::eq(env.apply(manager, "number").unwrap(), manager.number()));
    }

    #[test]
    fn test_extend_arity_mismatch() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let result = TypeEnv::empty(&bump).extend(&bump, &["T", "U"], &[manager.number()]);
        assert_eq!(
            result.unwrap_err(),
            LookupError::ArityMismatch { vars: 2, types: 1 }
        );
    }

    #[test]
    fn test_names_outlive_caller_strings() {
        use alloc::format;

        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let name = format!("T{}", 1);
        let env = TypeEnv::empty(&bump)
            .extend(&bump, &[name.as_str()], &[manager.void()])
            .unwrap();
        drop(name);

        assert!(core::ptr::eq(env.apply(manager, "T1").unwrap(), manager.void()));
    }
}
