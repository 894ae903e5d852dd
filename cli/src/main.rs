use std::cmp::Ordering;
use std::io::{BufRead, BufReader};

use clap::{Parser, Subcommand};
use miette::{Diagnostic, IntoDiagnostic, NamedSource, SourceSpan, WrapErr};
use texpr::{
    Bump, DEFAULT_MAX_DEPTH, ParseError, ParseOptions, PrintError, Type, TypeManager, compare,
    equivalent, is_subtype, parse_te_with_options, read_with_options, unparse,
};
use thiserror::Error;

/// texpr - normalize and compare structural type expressions
#[derive(Parser, Debug)]
#[command(name = "texpr")]
#[command(about = "Normalize and compare type expressions", long_about = None)]
struct Args {
    /// Maximum nesting depth accepted by the parser
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the s-expression read from each input (for debugging)
    #[arg(long)]
    debug_sexp: bool,

    /// Without a command, each line of stdin is normalized and printed
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical form of a type expression
    Normalize { texp: String },
    /// Check whether A is a subtype of B
    Subtype { a: String, b: String },
    /// Check whether A and B are equal up to renaming of type variables
    Equiv { a: String, b: String },
    /// Show how A and B are ordered inside a union
    Compare { a: String, b: String },
}

#[derive(Error, Debug, Diagnostic)]
enum CliError {
    #[error("{message}")]
    #[diagnostic(code(texpr::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("{0}")]
    #[diagnostic(code(texpr::parse))]
    Parse(ParseError),

    #[error("{0}")]
    #[diagnostic(code(texpr::print))]
    Print(#[from] PrintError),
}

impl CliError {
    fn from_parse(source: &str, err: ParseError) -> Self {
        match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => {
                let offset = offset_of(source, line, column);
                let len = usize::from(offset < source.len());
                CliError::Syntax {
                    message,
                    src: NamedSource::new("<input>", source.to_string()),
                    span: (offset, len).into(),
                }
            }
            other => CliError::Parse(other),
        }
    }
}

/// Byte offset of a 1-based line and character column.
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let rest = &source[line_start..];
    line_start
        + rest
            .char_indices()
            .nth(column.saturating_sub(1))
            .map_or(rest.len(), |(i, _)| i)
}

struct Session<'m, 'a> {
    manager: &'m TypeManager<'a>,
    options: ParseOptions,
    debug_sexp: bool,
}

impl<'a> Session<'_, 'a> {
    fn parse(&self, source: &str) -> Result<&'a Type<'a>, CliError> {
        if self.debug_sexp {
            let sexp = read_with_options(source, &self.options)
                .map_err(|err| CliError::from_parse(source, err))?;
            println!("=== S-expression ===");
            println!("{:#?}", sexp);
            println!();
        }
        parse_te_with_options(self.manager, source, &self.options)
            .map_err(|err| CliError::from_parse(source, err))
    }

    fn run(&self, command: &Command) -> Result<String, CliError> {
        match command {
            Command::Normalize { texp } => Ok(unparse(self.parse(texp)?)?),
            Command::Subtype { a, b } => {
                Ok(is_subtype(self.parse(a)?, self.parse(b)?).to_string())
            }
            Command::Equiv { a, b } => Ok(equivalent(self.parse(a)?, self.parse(b)?).to_string()),
            Command::Compare { a, b } => {
                let ordering = match compare(self.parse(a)?, self.parse(b)?) {
                    Ordering::Less => "less",
                    Ordering::Equal => "equal",
                    Ordering::Greater => "greater",
                };
                Ok(ordering.to_string())
            }
        }
    }

    /// Normalizes each line of `reader`. Bad expressions are reported and
    /// skipped; a failed read ends the loop with an error.
    fn run_lines(&self, reader: impl BufRead) -> miette::Result<()> {
        for line in reader.lines() {
            let line = line
                .into_diagnostic()
                .wrap_err("failed to read a line from stdin")?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') {
                continue;
            }

            tracing::debug!(input = trimmed, "normalizing");
            let command = Command::Normalize {
                texp: trimmed.to_string(),
            };
            match self.run(&command) {
                Ok(output) => println!("{}", output),
                Err(err) => eprintln!("{:?}", miette::Report::new(err)),
            }
        }

        Ok(())
    }
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG to control the log level, WARN by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let arena = Bump::new();
    let manager = TypeManager::new(&arena);
    let session = Session {
        manager,
        options: ParseOptions {
            max_depth: args.max_depth,
        },
        debug_sexp: args.debug_sexp,
    };

    if let Some(command) = &args.command {
        let output = session.run(command).map_err(miette::Report::new)?;
        println!("{}", output);
        return Ok(());
    }

    // Pipe/stdin mode
    let stdin = std::io::stdin();
    session.run_lines(BufReader::new(stdin.lock()))
}
