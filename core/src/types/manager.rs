use crate::{
    Vec, format,
    types::{
        type_var::{TypeVar, deref},
        types::Type,
    },
};
use bumpalo::Bump;
use core::cell::{Cell, Ref, RefCell};
use core::hash::{Hash, Hasher};
use hashbrown::{DefaultHashBuilder, HashMap};

/// Interning key: compares a type one level deep.
///
/// Children are already interned, so comparing them by address is enough to
/// decide structural equality.
#[derive(Clone, Copy)]
pub(crate) struct CompareTypeArgs<'a>(pub(crate) Type<'a>);

fn same_slice<'a>(a: &[&'a Type<'a>], b: &[&'a Type<'a>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| core::ptr::eq(*x, *y))
}

fn hash_slice<H: Hasher>(items: &[&Type<'_>], state: &mut H) {
    items.len().hash(state);
    for item in items {
        core::ptr::hash(*item, state);
    }
}

impl PartialEq for CompareTypeArgs<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (
                Type::Procedure { params, ret, pred },
                Type::Procedure {
                    params: other_params,
                    ret: other_ret,
                    pred: other_pred,
                },
            ) => {
                same_slice(params, other_params)
                    && core::ptr::eq(*ret, *other_ret)
                    && core::ptr::eq(*pred, *other_pred)
            }
            (Type::Tuple(a), Type::Tuple(b))
            | (Type::Union(a), Type::Union(b))
            | (Type::Intersection(a), Type::Intersection(b))
            | (Type::Difference(a), Type::Difference(b)) => same_slice(a, b),
            (Type::Var(a), Type::Var(b)) => core::ptr::eq(*a, *b),
            (a, b) => a.is_atomic() && a == b,
        }
    }
}

impl Eq for CompareTypeArgs<'_> {}

impl Hash for CompareTypeArgs<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(&self.0).hash(state);
        match &self.0 {
            Type::Procedure { params, ret, pred } => {
                hash_slice(params, state);
                core::ptr::hash(*ret, state);
                core::ptr::hash(*pred, state);
            }
            Type::Tuple(items)
            | Type::Union(items)
            | Type::Intersection(items)
            | Type::Difference(items) => hash_slice(items, state),
            Type::Var(var) => core::ptr::hash(*var, state),
            _ => {}
        }
    }
}

pub struct TypeManager<'a> {
    // Arena holding all types from this TypeManager.
    pub(crate) arena: &'a Bump,
    interned_strs: RefCell<HashMap<&'a str, &'a str, DefaultHashBuilder, &'a Bump>>,
    interned: RefCell<HashMap<CompareTypeArgs<'a>, &'a Type<'a>, DefaultHashBuilder, &'a Bump>>,
    // One cell per variable name.
    vars: RefCell<HashMap<&'a str, &'a Type<'a>, DefaultHashBuilder, &'a Bump>>,
    next_fresh_var: Cell<u32>,
}

impl<'a> TypeManager<'a> {
    pub fn new(arena: &'a Bump) -> &'a Self {
        arena.alloc(Self {
            arena,
            interned_strs: RefCell::new(HashMap::new_in(arena)),
            interned: RefCell::new(HashMap::new_in(arena)),
            vars: RefCell::new(HashMap::new_in(arena)),
            next_fresh_var: Cell::new(1),
        })
    }

    pub(crate) fn intern_str(&self, s: &str) -> &'a str {
        if let Some(&interned_str) = self.interned_strs.borrow().get(s) {
            return interned_str;
        }
        let arena_str = self.arena.alloc_str(s);
        self.interned_strs.borrow_mut().insert(arena_str, arena_str);
        arena_str
    }

    fn intern_map(
        &self,
    ) -> Ref<'_, HashMap<CompareTypeArgs<'a>, &'a Type<'a>, DefaultHashBuilder, &'a Bump>> {
        self.interned.borrow()
    }

    /// Returns the canonical reference for `ty`, allocating it on first use.
    pub(crate) fn intern(&self, ty: Type<'a>) -> &'a Type<'a> {
        if let Some(&interned_ty) = self.intern_map().get(&CompareTypeArgs(ty)) {
            return interned_ty;
        }
        let arena_ty = self.arena.alloc(ty);
        self.interned
            .borrow_mut()
            .insert(CompareTypeArgs(ty), arena_ty);
        arena_ty
    }

    pub(crate) fn alloc_slice(&self, items: &[&'a Type<'a>]) -> &'a [&'a Type<'a>] {
        self.arena.alloc_slice_copy(items)
    }

    // Factory methods for atomic types.
    pub fn number(&self) -> &'a Type<'a> {
        self.intern(Type::Number)
    }
    pub fn boolean(&self) -> &'a Type<'a> {
        self.intern(Type::Boolean)
    }
    pub fn str(&self) -> &'a Type<'a> {
        self.intern(Type::Str)
    }
    pub fn void(&self) -> &'a Type<'a> {
        self.intern(Type::Void)
    }
    pub fn any(&self) -> &'a Type<'a> {
        self.intern(Type::Any)
    }
    pub fn never(&self) -> &'a Type<'a> {
        self.intern(Type::Never)
    }

    /// Atomic type for a keyword such as `number`, or `None` for any other word.
    pub fn atomic(&self, keyword: &str) -> Option<&'a Type<'a>> {
        use crate::types::types::{ANY, BOOLEAN, NEVER, NUMBER, STRING, VOID};
        let ty = match keyword {
            NUMBER => self.number(),
            BOOLEAN => self.boolean(),
            STRING => self.str(),
            VOID => self.void(),
            ANY => self.any(),
            NEVER => self.never(),
            _ => return None,
        };
        Some(ty)
    }

    /// Ordinary procedure type. Its predicate type is `never`.
    pub fn procedure(&self, params: &[&'a Type<'a>], ret: &'a Type<'a>) -> &'a Type<'a> {
        self.procedure_with_predicate(params, ret, self.never())
    }

    /// Type predicate: a procedure returning `boolean` that narrows its
    /// argument to `pred` when it returns true.
    pub fn type_predicate(&self, params: &[&'a Type<'a>], pred: &'a Type<'a>) -> &'a Type<'a> {
        self.procedure_with_predicate(params, self.boolean(), pred)
    }

    pub fn procedure_with_predicate(
        &self,
        params: &[&'a Type<'a>],
        ret: &'a Type<'a>,
        pred: &'a Type<'a>,
    ) -> &'a Type<'a> {
        self.intern(Type::Procedure {
            params: self.alloc_slice(params),
            ret,
            pred,
        })
    }

    pub fn empty_tuple(&self) -> &'a Type<'a> {
        self.intern(Type::Tuple(&[]))
    }

    /// Tuple of `elems`. Elements that are themselves tuples are spliced in,
    /// so `tuple([a, tuple([b, c])])` is the same as `tuple([a, b, c])`.
    pub fn tuple(&self, elems: &[&'a Type<'a>]) -> &'a Type<'a> {
        if !elems.iter().any(|elem| elem.is_tuple()) {
            return self.intern(Type::Tuple(self.alloc_slice(elems)));
        }
        let mut flat = Vec::with_capacity(elems.len());
        for elem in elems {
            match elem {
                Type::Tuple(inner) => flat.extend_from_slice(inner),
                _ => flat.push(*elem),
            }
        }
        self.intern(Type::Tuple(self.alloc_slice(&flat)))
    }

    /// The type variable called `name`. Every call with the same name returns
    /// the same cell.
    pub fn type_var(&self, name: &str) -> &'a Type<'a> {
        if let Some(&var) = self.vars.borrow().get(name) {
            return var;
        }
        let name = self.intern_str(name);
        let id = u32::try_from(self.vars.borrow().len()).expect("TypeVar id overflowed");
        let cell: &'a TypeVar<'a> = self.arena.alloc(TypeVar::new(id, name));
        let ty = self.intern(Type::Var(cell));
        self.vars.borrow_mut().insert(name, ty);
        ty
    }

    /// Generate a fresh, unbound type variable named `T_<n>`.
    ///
    /// Names already taken in this manager are skipped.
    pub fn fresh_type_var(&self) -> &'a Type<'a> {
        loop {
            let n = self.next_fresh_var.get();
            self.next_fresh_var
                .set(n.checked_add(1).expect("TypeVar id overflowed"));
            let name = format!("T_{}", n);
            if !self.vars.borrow().contains_key(name.as_str()) {
                tracing::trace!(name = %name, "fresh type variable");
                return self.type_var(&name);
            }
        }
    }

    /// Number of distinct type variables created by this manager.
    pub fn var_count(&self) -> usize {
        self.vars.borrow().len()
    }

    /// Renames every unbound type variable in `ty` to a fresh one.
    ///
    /// Occurrences of the same variable map to the same fresh variable.
    /// Bound variables are replaced by their converted binding.
    pub fn alpha_convert(&self, ty: &'a Type<'a>) -> &'a Type<'a> {
        fn inner<'a>(
            this: &TypeManager<'a>,
            ty: &'a Type<'a>,
            var_map: &mut HashMap<u32, &'a Type<'a>>,
        ) -> &'a Type<'a> {
            match ty {
                Type::Number
                | Type::Boolean
                | Type::Str
                | Type::Void
                | Type::Any
                | Type::Never => ty,
                Type::Var(var) => {
                    if var.is_bound() {
                        // Cyclic bindings cannot be rebuilt; keep the variable.
                        return match deref(ty) {
                            Ok(target) => inner(this, target, var_map),
                            Err(_) => ty,
                        };
                    }
                    if let Some(&mapped) = var_map.get(&var.id()) {
                        mapped
                    } else {
                        let fresh = this.fresh_type_var();
                        var_map.insert(var.id(), fresh);
                        fresh
                    }
                }
                Type::Procedure { params, ret, pred } => {
                    let converted_params: Vec<&'a Type<'a>> =
                        params.iter().map(|p| inner(this, p, var_map)).collect();
                    let converted_ret = inner(this, ret, var_map);
                    let converted_pred = inner(this, pred, var_map);
                    this.procedure_with_predicate(&converted_params, converted_ret, converted_pred)
                }
                Type::Tuple(elems) => {
                    let converted: Vec<&'a Type<'a>> =
                        elems.iter().map(|e| inner(this, e, var_map)).collect();
                    this.tuple(&converted)
                }
                Type::Union(members) => {
                    let converted: Vec<&'a Type<'a>> =
                        members.iter().map(|m| inner(this, m, var_map)).collect();
                    this.union(&converted)
                }
                Type::Intersection(members) => {
                    let converted: Vec<&'a Type<'a>> =
                        members.iter().map(|m| inner(this, m, var_map)).collect();
                    this.intersection(&converted)
                }
                Type::Difference(members) => {
                    let converted: Vec<&'a Type<'a>> =
                        members.iter().map(|m| inner(this, m, var_map)).collect();
                    this.difference(&converted)
                }
            }
        }
        let mut var_map = HashMap::new();
        inner(self, ty, &mut var_map)
    }
}
