use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::{Vec, errors::ParseError, format, parser::ParseOptions, parser::sexp::Sexp};

#[derive(Parser)]
#[grammar = "parser/sexp.pest"]
pub struct SexpParser;

/// Read a single s-expression from `source` with default options.
pub fn read(source: &str) -> Result<Sexp<'_>, ParseError> {
    read_with_options(source, &ParseOptions::default())
}

pub fn read_with_options<'s>(
    source: &'s str,
    options: &ParseOptions,
) -> Result<Sexp<'s>, ParseError> {
    // Bound the nesting before handing the text to the recursive grammar.
    check_depth(source, options.max_depth)?;

    let mut pairs = SexpParser::parse(Rule::main, source).map_err(convert_pest_error)?;
    let sexp = pairs
        .next()
        .and_then(|main| main.into_inner().next())
        .ok_or_else(|| missing_pair(source))?;
    let result = build(sexp, source);
    if let Ok(sexp) = &result {
        tracing::trace!(%sexp, "read s-expression");
    }
    result
}

fn build<'s>(pair: Pair<'s, Rule>, source: &str) -> Result<Sexp<'s>, ParseError> {
    match pair.as_rule() {
        Rule::atom => Ok(Sexp::Atom(pair.as_str())),
        Rule::list => {
            let items = pair
                .into_inner()
                .map(|item| build(item, source))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Sexp::List(items))
        }
        _ => Err(missing_pair(source)),
    }
}

/// Reject sources whose parentheses nest deeper than `max_depth`. Comments are skipped.
fn check_depth(source: &str, max_depth: usize) -> Result<(), ParseError> {
    let mut depth = 0usize;
    let mut in_comment = false;
    for ch in source.chars() {
        match ch {
            '\n' => in_comment = false,
            _ if in_comment => {}
            ';' => in_comment = true,
            '(' => {
                depth += 1;
                if depth > max_depth {
                    return Err(ParseError::MaxDepthExceeded { max_depth });
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn convert_pest_error(err: pest::error::Error<Rule>) -> ParseError {
    let (line, column) = match err.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };
    ParseError::Syntax {
        line,
        column,
        message: err.variant.message().into_owned(),
    }
}

fn missing_pair(source: &str) -> ParseError {
    ParseError::Syntax {
        line: 1,
        column: 1,
        message: format!("missing expected pair in rule: {}", source),
    }
}
