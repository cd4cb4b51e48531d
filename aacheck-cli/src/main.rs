use std::fs;
use std::io::{self, Read, Write};

use aacheck::{AnalyzeOptions, Diagnostics};
use facet::Facet;
use facet_args as args;
use tracing_subscriber::EnvFilter;

/// Check Unicode box-drawing diagrams for alignment defects
#[derive(Facet, Debug)]
struct Args {
    /// Input file (reads from stdin if not provided)
    #[facet(default, args::positional)]
    input: Option<String>,

    /// Report file (writes to stdout if not provided)
    #[facet(default, args::named, args::short = 'o')]
    output: Option<String>,

    /// Input is Markdown; check the first ```text block
    #[facet(args::named)]
    markdown: bool,

    /// Print the report as JSON
    #[facet(args::named)]
    json: bool,

    /// Do not charge an error when no rectangle is found
    #[facet(args::named)]
    allow_empty: bool,

    /// Skip the centered-track check for stacked boxes
    #[facet(args::named)]
    no_centering: bool,

    /// Exit with status 3 when any defect is found
    #[facet(args::named)]
    strict: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no ```text block found in the document")]
    MissingFence,

    #[error("unsupported box-drawing characters: {0}")]
    Disallowed(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Read { .. } | CliError::Write { .. } | CliError::Json(_) => 1,
            CliError::MissingFence | CliError::Disallowed(_) => 2,
        }
    }
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_string(),
            source,
        }),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Read {
                    path: "stdin".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn render_report(diagnostics: &Diagnostics, json: bool) -> Result<String, CliError> {
    if json {
        let mut out = serde_json::to_string_pretty(diagnostics)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(format!(
        "correct_rectangles: {}\n\
         rectangle_errors:   {}\n\
         connector_errors:   {}\n\
         arrow_errors:       {}\n\
         misaligned:         {}\n\
         score:              {:.3}\n",
        diagnostics.correct_rectangles,
        diagnostics.rectangle_errors,
        diagnostics.connector_errors,
        diagnostics.arrow_errors,
        diagnostics.misaligned,
        diagnostics.alignment_score(),
    ))
}

fn run(args: &Args) -> Result<Diagnostics, CliError> {
    let raw = read_input(args.input.as_deref())?;
    let diagram = if args.markdown {
        aacheck::text_block(&raw).ok_or(CliError::MissingFence)?
    } else {
        raw.as_str()
    };

    let disallowed = aacheck::disallowed_chars(diagram);
    if !disallowed.is_empty() {
        return Err(CliError::Disallowed(disallowed.into_iter().collect()));
    }

    let options = AnalyzeOptions::new()
        .with_require_rectangle(!args.allow_empty)
        .with_stack_centering(!args.no_centering);
    let diagnostics = aacheck::analyze_with_options(diagram, &options);
    tracing::info!(?diagnostics, "analysis finished");

    let report = render_report(&diagnostics, args.json)?;
    match &args.output {
        Some(path) => fs::write(path, &report).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?,
        None => io::stdout()
            .write_all(report.as_bytes())
            .map_err(|source| CliError::Write {
                path: "stdout".to_string(),
                source,
            })?,
    }
    Ok(diagnostics)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Args = match args::from_std_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    match run(&args) {
        Ok(diagnostics) if args.strict && !diagnostics.is_clean() => std::process::exit(3),
        Ok(_) => {}
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}
