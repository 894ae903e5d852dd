//! Interpretation of s-expressions as type expressions.
//!
//! ```text
//! <texp>      ::= number | boolean | string | void | any | never | <var>
//!               | (union <texp>*) | (inter <texp>*) | (<texp> & <texp> ...)
//!               | (is? <texp>)
//!               | (<params> -> <texp>)
//!               | (<params> any -> is? <texp>)
//! <params>    ::= Empty | <texp> [* <texp>]*
//! ```
//!
//! Unions and intersections go through the normalizing constructors, so the
//! parsed value is already canonical.

use crate::{
    ToString, Vec,
    errors::ParseError,
    parser::{ParseOptions, reader::read_with_options, sexp::Sexp},
    types::{Type, TypeManager},
};

const ARROW: &str = "->";
const SEPARATOR: &str = "*";
const EMPTY: &str = "Empty";
const UNION: &str = "union";
const INTER: &str = "inter";
const INFIX_INTER: &str = "&";
const IS: &str = "is?";
const ANY: &str = "any";

/// Parse textual type syntax with default options.
pub fn parse_te<'a>(manager: &TypeManager<'a>, source: &str) -> Result<&'a Type<'a>, ParseError> {
    parse_te_with_options(manager, source, &ParseOptions::default())
}

pub fn parse_te_with_options<'a>(
    manager: &TypeManager<'a>,
    source: &str,
    options: &ParseOptions,
) -> Result<&'a Type<'a>, ParseError> {
    let sexp = read_with_options(source, options)?;
    parse_texp_with_options(manager, &sexp, options)
}

/// Interpret an already-read s-expression as a type expression.
pub fn parse_texp<'a>(
    manager: &TypeManager<'a>,
    sexp: &Sexp<'_>,
) -> Result<&'a Type<'a>, ParseError> {
    parse_texp_with_options(manager, sexp, &ParseOptions::default())
}

pub fn parse_texp_with_options<'a>(
    manager: &TypeManager<'a>,
    sexp: &Sexp<'_>,
    options: &ParseOptions,
) -> Result<&'a Type<'a>, ParseError> {
    let mut parser = TExpParser {
        manager,
        max_depth: options.max_depth,
        depth: 0,
    };
    parser.parse(sexp)
}

struct TExpParser<'m, 'a> {
    manager: &'m TypeManager<'a>,
    max_depth: usize,
    depth: usize,
}

impl<'a> TExpParser<'_, 'a> {
    fn parse(&mut self, sexp: &Sexp<'_>) -> Result<&'a Type<'a>, ParseError> {
        match sexp {
            Sexp::Atom(text) => Ok(self.parse_atom(text)),
            Sexp::List(items) => {
                if self.depth >= self.max_depth {
                    return Err(ParseError::MaxDepthExceeded {
                        max_depth: self.max_depth,
                    });
                }
                self.depth += 1;
                let result = self.parse_list(sexp, items);
                self.depth -= 1;
                result
            }
        }
    }

    fn parse_atom(&self, text: &str) -> &'a Type<'a> {
        self.manager
            .atomic(text)
            .unwrap_or_else(|| self.manager.type_var(text))
    }

    fn parse_all(&mut self, items: &[Sexp<'_>]) -> Result<Vec<&'a Type<'a>>, ParseError> {
        items.iter().map(|item| self.parse(item)).collect()
    }

    fn parse_list(&mut self, sexp: &Sexp<'_>, items: &[Sexp<'_>]) -> Result<&'a Type<'a>, ParseError> {
        match items {
            [head, rest @ ..] if head.is_atom(UNION) => {
                let members = self.parse_all(rest)?;
                Ok(self.manager.union(&members))
            }
            [head, rest @ ..] if head.is_atom(INTER) => {
                let members = self.parse_all(rest)?;
                Ok(self.manager.intersection(&members))
            }
            [head, payload] if head.is_atom(IS) => self.parse(payload),
            [head, ..] if head.is_atom(IS) => Err(ParseError::MalformedTypePredicate {
                texp: sexp.to_string(),
            }),
            _ if is_infix_intersection(items) => {
                let members = items
                    .iter()
                    .step_by(2)
                    .map(|item| self.parse(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.manager.intersection(&members))
            }
            _ => self.parse_procedure(sexp, items),
        }
    }

    fn parse_procedure(
        &mut self,
        sexp: &Sexp<'_>,
        items: &[Sexp<'_>],
    ) -> Result<&'a Type<'a>, ParseError> {
        let texp = || sexp.to_string();

        let Some(pos) = items.iter().position(|item| item.is_atom(ARROW)) else {
            return Err(ParseError::MissingArrow { texp: texp() });
        };
        if pos == 0 {
            return Err(ParseError::NoParameters { texp: texp() });
        }
        if pos == items.len() - 1 {
            return Err(ParseError::NoReturnType { texp: texp() });
        }
        let (lhs, rhs) = (&items[..pos], &items[pos + 1..]);
        if rhs.iter().any(|item| item.is_atom(ARROW)) {
            return Err(ParseError::MultipleArrows { texp: texp() });
        }
        if lhs.iter().any(|item| item.is_atom(IS)) {
            return Err(ParseError::InvalidTypePredicate { texp: texp() });
        }

        match rhs {
            [marker] if marker.is_atom(IS) => Err(ParseError::NoReturnType { texp: texp() }),
            [marker, payload] if marker.is_atom(IS) => {
                if !lhs.last().is_some_and(|last| last.is_atom(ANY)) {
                    return Err(ParseError::InvalidTypePredicate { texp: texp() });
                }
                let params = self.parse_params(sexp, lhs)?;
                let pred = self.parse(payload)?;
                Ok(self.manager.type_predicate(&params, pred))
            }
            [ret] => {
                let params = self.parse_params(sexp, lhs)?;
                let ret = self.parse(ret)?;
                Ok(self.manager.procedure(&params, ret))
            }
            _ if rhs.iter().any(|item| item.is_atom(IS)) => {
                Err(ParseError::InvalidTypePredicate { texp: texp() })
            }
            _ => Err(ParseError::TrailingTokens { texp: texp() }),
        }
    }

    /// `Empty` or `t1 * t2 * ... * tn`.
    fn parse_params(
        &mut self,
        sexp: &Sexp<'_>,
        items: &[Sexp<'_>],
    ) -> Result<Vec<&'a Type<'a>>, ParseError> {
        if let [only] = items {
            if only.is_atom(EMPTY) {
                return Ok(Vec::new());
            }
        }
        for (i, item) in items.iter().enumerate().skip(1).step_by(2) {
            if !item.is_atom(SEPARATOR) {
                tracing::debug!(position = i, "missing separator between parameters");
                return Err(ParseError::MissingSeparator {
                    texp: sexp.to_string(),
                });
            }
        }
        if items.len() % 2 == 0 {
            return Err(ParseError::DanglingSeparator {
                texp: sexp.to_string(),
            });
        }
        items.iter().step_by(2).map(|item| self.parse(item)).collect()
    }
}

/// `(a & b & ...)`: odd length of at least three with `&` at every odd index.
fn is_infix_intersection(items: &[Sexp<'_>]) -> bool {
    items.len() >= 3
        && items.len() % 2 == 1
        && items
            .iter()
            .skip(1)
            .step_by(2)
            .all(|item| item.is_atom(INFIX_INTER))
}
