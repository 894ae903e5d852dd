//! Smart constructors for unions, intersections and differences.
//!
//! Every compound value leaves these constructors flattened, sorted with the
//! canonical comparator, free of subtype-equivalent duplicates and, for
//! intersections, in disjunctive normal form. Unions also absorb members
//! that are subtypes of another member.

use core::cmp::Ordering;

use crate::{
    Vec,
    types::{
        manager::TypeManager,
        printer::sort_key,
        subtype::{compare, is_subtype},
        types::Type,
    },
};

impl<'a> TypeManager<'a> {
    /// Canonical union of `members`.
    ///
    /// Members that are subtypes of another member are absorbed, so
    /// `(union number (number & string))` is `number`. `never` members are
    /// dropped, an empty union is `never` and an `any` member makes the whole
    /// union `any`.
    pub fn union(&self, members: &[&'a Type<'a>]) -> &'a Type<'a> {
        let flat = flatten(members, Type::is_union);
        let mut items = sort_and_absorb(flat);
        items.retain(|ty| !ty.is_never());
        tracing::trace!(input = members.len(), output = items.len(), "union");

        if items.is_empty() {
            return self.never();
        }
        if items.iter().any(|ty| ty.is_any()) {
            return self.any();
        }
        if let [single] = items.as_slice() {
            return *single;
        }
        self.intern(Type::Union(self.alloc_slice(&items)))
    }

    /// Canonical intersection of `members`, distributed over any union
    /// members.
    ///
    /// An empty intersection is `never`, as is one with a `never` member.
    /// `any` members are dropped unless nothing else remains.
    pub fn intersection(&self, members: &[&'a Type<'a>]) -> &'a Type<'a> {
        let flat = flatten(members, Type::is_intersection);
        let items = sort_and_dedupe(flat);
        tracing::trace!(input = members.len(), output = items.len(), "intersection");

        if items.is_empty() || items.iter().any(|ty| ty.is_never()) {
            return self.never();
        }
        if let [single] = items.as_slice() {
            return *single;
        }
        if items.iter().any(|ty| ty.is_any()) {
            let rest: Vec<&'a Type<'a>> = items.into_iter().filter(|ty| !ty.is_any()).collect();
            return self.intersection(&rest);
        }

        let (unions, factors): (Vec<&'a Type<'a>>, Vec<&'a Type<'a>>) =
            items.iter().copied().partition(|ty| ty.is_union());
        if unions.is_empty() {
            return self.intern(Type::Intersection(self.alloc_slice(&items)));
        }
        self.distribute(&unions, &factors)
    }

    /// `factors & (u1 | ...) & (v1 | ...)` rewritten as the union of every
    /// product term.
    fn distribute(&self, unions: &[&'a Type<'a>], factors: &[&'a Type<'a>]) -> &'a Type<'a> {
        let mut products: Vec<Vec<&'a Type<'a>>> = Vec::from([Vec::new()]);
        for union in unions {
            let mut next = Vec::with_capacity(products.len() * union.components().len());
            for product in &products {
                for disjunct in union.components() {
                    let mut term = product.clone();
                    term.push(*disjunct);
                    next.push(term);
                }
            }
            products = next;
        }
        tracing::debug!(terms = products.len(), factors = factors.len(), "dnf expansion");

        let terms: Vec<&'a Type<'a>> = products
            .into_iter()
            .map(|mut term| {
                term.extend_from_slice(factors);
                self.intersection(&term)
            })
            .collect();
        self.union(&terms)
    }

    /// Canonical difference of `members`.
    ///
    /// Shares the flatten, sort and dedupe steps of the other constructors.
    /// An empty difference is `never` and an `any` member makes it `any`.
    pub fn difference(&self, members: &[&'a Type<'a>]) -> &'a Type<'a> {
        let flat = flatten(members, Type::is_difference);
        let items = sort_and_dedupe(flat);
        tracing::trace!(input = members.len(), output = items.len(), "difference");

        if items.is_empty() {
            return self.never();
        }
        if items.iter().any(|ty| ty.is_any()) {
            return self.any();
        }
        if let [single] = items.as_slice() {
            return *single;
        }
        self.intern(Type::Difference(self.alloc_slice(&items)))
    }
}

/// Inline members of the kind selected by `same_kind`, keeping their order.
///
/// Members built by the constructors are already flat, so one level suffices
/// for them; the loop still handles arbitrary nesting.
fn flatten<'a>(members: &[&'a Type<'a>], same_kind: fn(&Type<'a>) -> bool) -> Vec<&'a Type<'a>> {
    let mut out = Vec::with_capacity(members.len());
    let mut stack: Vec<&'a Type<'a>> = members.iter().rev().copied().collect();
    while let Some(ty) = stack.pop() {
        if same_kind(ty) {
            stack.extend(ty.components().iter().rev());
        } else {
            out.push(ty);
        }
    }
    out
}

/// Canonical order of `items`: printed form first so the result does not
/// depend on input order, then the subtype-aware comparator. The comparator
/// is not transitive, so the second pass is a plain stable insertion sort.
fn sort_members<'a>(mut items: Vec<&'a Type<'a>>) -> Vec<&'a Type<'a>> {
    items.sort_by_cached_key(|ty| sort_key(ty));
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(items[j - 1], items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
    items
}

/// Sorts and keeps the first of every group of mutual subtypes.
fn sort_and_dedupe<'a>(items: Vec<&'a Type<'a>>) -> Vec<&'a Type<'a>> {
    let mut kept: Vec<&'a Type<'a>> = Vec::with_capacity(items.len());
    for ty in sort_members(items) {
        let duplicate = kept.iter().any(|k| subsumed(k, ty) && subsumed(ty, k));
        if !duplicate {
            kept.push(ty);
        }
    }
    kept
}

/// Sorts and drops every member that is a subtype of another member. Of
/// mutual subtypes only the first in canonical order survives.
fn sort_and_absorb<'a>(items: Vec<&'a Type<'a>>) -> Vec<&'a Type<'a>> {
    let items = sort_members(items);
    let absorbed: Vec<bool> = items
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            items.iter().enumerate().any(|(j, other)| {
                j != i && subsumed(ty, other) && (j < i || !subsumed(other, ty))
            })
        })
        .collect();
    items
        .into_iter()
        .zip(absorbed)
        .filter_map(|(ty, absorbed)| (!absorbed).then_some(ty))
        .collect()
}

fn subsumed<'a>(a: &Type<'a>, b: &Type<'a>) -> bool {
    core::ptr::eq(a, b) || is_subtype(a, b)
}
