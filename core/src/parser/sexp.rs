use core::fmt;

use crate::Vec;

/// A parsed s-expression: an atom or a parenthesized list.
///
/// Atoms borrow from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sexp<'s> {
    Atom(&'s str),
    List(Vec<Sexp<'s>>),
}

impl<'s> Sexp<'s> {
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Sexp<'s>>,
    {
        Sexp::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_atom(&self) -> Option<&'s str> {
        match self {
            Sexp::Atom(text) => Some(*text),
            Sexp::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexp<'s>]> {
        match self {
            Sexp::Atom(_) => None,
            Sexp::List(items) => Some(items),
        }
    }

    /// Whether this is the atom `text`.
    pub fn is_atom(&self, text: &str) -> bool {
        self.as_atom() == Some(text)
    }
}

impl<'s> From<&'s str> for Sexp<'s> {
    fn from(text: &'s str) -> Self {
        Sexp::Atom(text)
    }
}

impl fmt::Display for Sexp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Atom(text) => f.write_str(text),
            Sexp::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}
