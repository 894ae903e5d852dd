//! Structural subtyping and the canonical comparator.
//!
//! `is_subtype` is total: incomparable pairs yield `false`, never an error.

use core::cmp::Ordering;

use crate::types::{printer::sort_key, types::Type};

/// Whether `a <: b`.
///
/// The first matching rule decides:
/// 1. union / union: every member of `a` is contained in `b`;
/// 2. `b` union: `a` is contained in `b`;
/// 3. `a` union: every member of `a` is a subtype of `b`;
/// 4. intersection / intersection: `b`'s members are contained in `a`'s;
/// 5. `b` intersection: `a` is a subtype of every member of `b`;
/// 6. `a` intersection: some member of `a` is a subtype of `b`;
/// 7. tuple / tuple: same length, pointwise covariant;
/// 8. difference / difference: identical member lists;
/// 9. procedure / procedure: same arity, covariant return, contravariant
///    parameters (the predicate slot is not compared);
/// 10. `a` variable: `b` is the same variable;
/// 11. atomic / atomic: same keyword.
pub fn is_subtype<'a>(a: &Type<'a>, b: &Type<'a>) -> bool {
    match (a, b) {
        (Type::Union(xs), Type::Union(ys)) => is_subset(xs, ys),
        (_, Type::Union(ys)) => contains_type(ys, a),
        (Type::Union(xs), _) => xs.iter().all(|x| is_subtype(x, b)),
        (Type::Intersection(xs), Type::Intersection(ys)) => is_subset(ys, xs),
        (_, Type::Intersection(ys)) => ys.iter().all(|y| is_subtype(a, y)),
        (Type::Intersection(xs), _) => xs.iter().any(|x| is_subtype(x, b)),
        (Type::Tuple(xs), Type::Tuple(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(x, y)| is_subtype(x, y))
        }
        (Type::Difference(xs), Type::Difference(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(x, y)| x == y)
        }
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
                && is_subtype(a_ret, b_ret)
                && a_params
                    .iter()
                    .zip(b_params.iter())
                    .all(|(a_param, b_param)| is_subtype(b_param, a_param))
        }
        (Type::Var(var), _) => matches!(b, Type::Var(other) if core::ptr::eq(*var, *other)),
        (a, b) if a.is_atomic() && b.is_atomic() => a == b,
        _ => false,
    }
}

/// Whether `ty` is a subtype of some member of `set`.
pub fn contains_type<'a>(set: &[&'a Type<'a>], ty: &Type<'a>) -> bool {
    set.iter().any(|member| is_subtype(ty, member))
}

/// Whether every member of `xs` is contained in `ys`.
pub fn is_subset<'a>(xs: &[&'a Type<'a>], ys: &[&'a Type<'a>]) -> bool {
    xs.iter().all(|x| contains_type(ys, x))
}

/// Canonical ordering used to sort members of compound types.
///
/// Equal types compare equal; a strict supertype sorts after its subtype;
/// incomparable types fall back to their printed forms, with variables
/// bound to themselves printed by name. Not a total order
/// in general, so it is only suitable for stable insertion sorting.
pub fn compare<'a>(a: &Type<'a>, b: &Type<'a>) -> Ordering {
    if core::ptr::eq(a, b) || a == b {
        return Ordering::Equal;
    }
    if is_subtype(b, a) {
        return Ordering::Greater;
    }
    if is_subtype(a, b) {
        return Ordering::Less;
    }
    sort_key(a).cmp(&sort_key(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::manager::TypeManager;
    use bumpalo::Bump;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_atomic_subtyping_is_tag_equality() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        assert!(is_subtype(manager.number(), manager.number()));
        assert!(!is_subtype(manager.number(), manager.str()));
        // `any` is not a top type for atomics.
        assert!(!is_subtype(manager.number(), manager.any()));
        assert!(!is_subtype(manager.never(), manager.number()));
    }

    #[test]
    fn test_member_of_union() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let ns = manager.union(&[manager.number(), manager.str()]);
        assert!(is_subtype(manager.number(), ns));
        assert!(is_subtype(manager.str(), ns));
        assert!(!is_subtype(manager.boolean(), ns));
        assert!(!is_subtype(ns, manager.number()));
    }

    #[test]
    fn test_union_subset() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let (n, s, b) = (manager.number(), manager.str(), manager.boolean());
        let ns = manager.union(&[n, s]);
        let nsb = manager.union(&[n, s, b]);
        assert!(is_subtype(ns, nsb));
        assert!(!is_subtype(nsb, ns));
    }

    #[test]
    fn test_intersection_rules() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let (n, s, b) = (manager.number(), manager.str(), manager.boolean());
        let ns = manager.intersection(&[n, s]);
        let nsb = manager.intersection(&[n, s, b]);

        assert!(is_subtype(ns, n));
        assert!(is_subtype(nsb, ns));
        assert!(!is_subtype(ns, nsb));
        assert!(!is_subtype(n, ns));
    }

    #[test]
    fn test_procedure_contravariance() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let n = manager.number();
        let wide = manager.union(&[n, manager.str()]);
        let accepts_wide = manager.procedure(&[wide], n);
        let accepts_number = manager.procedure(&[n], n);

        assert!(is_subtype(accepts_wide, accepts_number));
        assert!(!is_subtype(accepts_number, accepts_wide));
    }

    #[test]
    fn test_procedure_covariant_return() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let n = manager.number();
        let wide = manager.union(&[n, manager.str()]);
        let narrow_ret = manager.procedure(&[n], n);
        let wide_ret = manager.procedure(&[n], wide);

        assert!(is_subtype(narrow_ret, wide_ret));
        assert!(!is_subtype(wide_ret, narrow_ret));
    }

    #[test]
    fn test_procedure_arity_mismatch() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let n = manager.number();
        let unary = manager.procedure(&[n], n);
        let binary = manager.procedure(&[n, n], n);
        assert!(!is_subtype(unary, binary));
        assert!(!is_subtype(binary, unary));
    }

    #[test]
    fn test_tuples_are_pointwise() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let n = manager.number();
        let ns = manager.union(&[n, manager.str()]);
        let narrow = manager.tuple(&[n, n]);
        let wide = manager.tuple(&[n, ns]);

        assert!(is_subtype(narrow, narrow));
        assert!(is_subtype(narrow, wide));
        assert!(!is_subtype(wide, narrow));
        assert!(!is_subtype(narrow, manager.tuple(&[n])));
        assert!(is_subtype(manager.empty_tuple(), manager.empty_tuple()));
    }

    #[test]
    fn test_variables_by_identity() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let t = manager.type_var("T");
        let u = manager.type_var("U");
        assert!(is_subtype(t, t));
        assert!(!is_subtype(t, u));
        assert!(!is_subtype(t, manager.number()));
        assert!(!is_subtype(manager.number(), t));
    }

    #[test]
    fn test_reflexivity() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let (n, s, b) = (manager.number(), manager.str(), manager.boolean());
        let samples = [
            n,
            manager.any(),
            manager.never(),
            manager.union(&[n, s]),
            manager.intersection(&[n, s]),
            manager.intersection(&[manager.union(&[n, s]), b]),
            manager.difference(&[n, s]),
            manager.procedure(&[n, s], b),
            manager.type_predicate(&[manager.any()], n),
            manager.tuple(&[n, s]),
            manager.type_var("T"),
        ];
        for ty in samples {
            assert!(is_subtype(ty, ty), "{} should be a subtype of itself", ty);
        }
    }

    #[test]
    fn test_compare() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let (n, s) = (manager.number(), manager.str());
        let ns = manager.union(&[n, s]);

        assert_eq!(compare(n, n), Ordering::Equal);
        assert_eq!(compare(n, ns), Ordering::Less);
        assert_eq!(compare(ns, n), Ordering::Greater);
        assert_eq!(compare(n, s), Ordering::Less);
        assert_eq!(compare(s, n), Ordering::Greater);
    }

    #[test]
    fn test_contains_and_subset() {
        let bump = Bump::new();
        let manager = TypeManager::new(&bump);

        let (n, s, b) = (manager.number(), manager.str(), manager.boolean());
        assert!(contains_type(&[n, s], s));
        assert!(!contains_type(&[n, s], b));
        assert!(!contains_type(&[], n));
        assert!(is_subset(&[n], &[s, n]));
        assert!(is_subset(&[], &[n]));
        assert!(!is_subset(&[n, b], &[n, s]));
    }
}
