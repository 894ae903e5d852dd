//! Textual form of type expressions.
//!
//! The output is accepted by [`parse_te`](crate::parser::parse_te), so
//! printing then re-parsing a canonical type yields the same type.

use crate::{
    String, ToString, Vec,
    errors::PrintError,
    types::{type_var::deref, types::Type},
};

/// Print `ty` in s-expression syntax.
///
/// Bound variables print as their target; unbound ones print as their name.
pub fn unparse(ty: &Type<'_>) -> Result<String, PrintError> {
    let mut printer = Printer::default();
    let mut out = String::new();
    printer.print(ty, &mut out)?;
    Ok(out)
}

/// Printed form used to order members of compound types.
///
/// Same as [`unparse`], except that a variable whose binding is cyclic
/// prints as its name instead of failing, so every type gets a key.
pub(crate) fn sort_key(ty: &Type<'_>) -> String {
    let mut printer = Printer {
        lossy: true,
        ..Printer::default()
    };
    let mut out = String::new();
    match printer.print(ty, &mut out) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

#[derive(Default)]
struct Printer {
    // Variables whose binding is being printed.
    active: Vec<u32>,
    // Print cyclic variables by name.
    lossy: bool,
}

impl Printer {
    fn print<'a>(&mut self, ty: &Type<'a>, out: &mut String) -> Result<(), PrintError> {
        match ty {
            Type::Number | Type::Boolean | Type::Str | Type::Void | Type::Any | Type::Never => {
                out.push_str(ty.keyword().unwrap_or_default());
            }
            Type::Var(var) => {
                let cyclic = |printer: &Self, out: &mut String| {
                    if printer.lossy {
                        out.push_str(var.name());
                        Ok(())
                    } else {
                        Err(PrintError::CyclicVariable {
                            name: var.name().to_string(),
                        })
                    }
                };
                let Ok(target) = deref(ty) else {
                    return cyclic(self, out);
                };
                match target {
                    Type::Var(unbound) => out.push_str(unbound.name()),
                    _ => {
                        if self.active.contains(&var.id()) {
                            return cyclic(self, out);
                        }
                        self.active.push(var.id());
                        let result = self.print(target, out);
                        self.active.pop();
                        result?;
                    }
                }
            }
            Type::Procedure { params, ret, pred } => {
                out.push('(');
                if params.is_empty() {
                    out.push_str("Empty");
                } else {
                    self.print_separated(params, " * ", out)?;
                }
                out.push_str(" -> ");
                if pred.is_never() {
                    self.print(ret, out)?;
                } else {
                    out.push_str("is? ");
                    self.print(pred, out)?;
                }
                out.push(')');
            }
            Type::Tuple(elems) => {
                if elems.is_empty() {
                    out.push_str("Empty");
                } else {
                    out.push('(');
                    self.print_separated(elems, " * ", out)?;
                    out.push(')');
                }
            }
            Type::Union(members) => self.print_fold(members, "union ", " ", out)?,
            Type::Intersection(members) => self.print_fold(members, "", " & ", out)?,
            Type::Difference(members) => self.print_fold(members, "", " / ", out)?,
        }
        Ok(())
    }

    fn print_separated<'a>(
        &mut self,
        items: &[&'a Type<'a>],
        separator: &str,
        out: &mut String,
    ) -> Result<(), PrintError> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.print(item, out)?;
        }
        Ok(())
    }

    /// Right fold: `[a, b, c]` prints as `(<head>a<sep>(<head>b<sep>c))`.
    fn print_fold<'a>(
        &mut self,
        members: &[&'a Type<'a>],
        head: &str,
        separator: &str,
        out: &mut String,
    ) -> Result<(), PrintError> {
        match members {
            [] => Ok(()),
            [last] => self.print(last, out),
            [first, rest @ ..] => {
                out.push('(');
                out.push_str(head);
                self.print(first, out)?;
                out.push_str(separator);
                self.print_fold(rest, head, separator, out)?;
                out.push(')');
                Ok(())
            }
        }
    }
}
