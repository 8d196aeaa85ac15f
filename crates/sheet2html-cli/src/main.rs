//! sheet2html CLI - spreadsheet to HTML conversion tool

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use sheet2html::prelude::*;
use sheet2html::{DateFormatter, NumberLocale};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheet2html")]
#[command(
    author,
    version,
    about = "Convert a spreadsheet to HTML tables, preserving merged cells"
)]
struct Cli {
    /// Input workbook (xlsx)
    input: Option<PathBuf>,

    /// Output HTML file ("std" or omitted: stdout)
    output: Option<String>,

    /// Document title (default: input file name without extension)
    title: Option<String>,

    /// Render only the first sheet
    #[arg(long)]
    first_sheet: bool,

    /// Emit only the tables, without the surrounding document
    #[arg(long)]
    fragment: bool,

    /// Write cell text into the HTML as-is
    #[arg(long)]
    no_escape: bool,

    /// Decimal separator for numbers
    #[arg(long, default_value = ".")]
    decimal_separator: char,

    /// Digit grouping separator for numbers (empty: no grouping)
    #[arg(long, default_value = ",")]
    grouping_separator: String,

    /// Maximum number of fraction digits for numbers
    #[arg(long, default_value = "3")]
    max_fraction_digits: usize,

    /// strftime-style pattern for date cells
    #[arg(long, default_value = sheet2html::DEFAULT_DATE_PATTERN)]
    date_format: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(input) = cli.input.clone() else {
        // stdout is reserved for the document
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::from(1);
    };

    match run(&cli, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli, input: PathBuf) -> Result<()> {
    let converter = Converter::new(html_options(cli)).with_formatter(cell_formatter(cli)?);
    let title = cli.title.as_deref();

    if is_stdout_target(cli.output.as_deref()) {
        let html = converter
            .convert_file(&input, title)
            .with_context(|| format!("Failed to convert '{}'", input.display()))?;
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(html.as_bytes())
            .and_then(|()| stdout.flush())
            .context("Failed to write to stdout")?;
    } else {
        // is_stdout_target is false only for a non-empty path
        let output = PathBuf::from(cli.output.as_deref().unwrap_or_default());
        converter
            .convert_to_file(&input, &output, title)
            .with_context(|| format!("Failed to convert '{}'", input.display()))?;
        tracing::info!(output = %output.display(), "wrote html");
        println!("SUCCESS");
    }

    Ok(())
}

fn html_options(cli: &Cli) -> HtmlOptions {
    HtmlOptions {
        sheets: if cli.first_sheet {
            SheetSelection::First
        } else {
            SheetSelection::All
        },
        emit_boilerplate: !cli.fragment,
        escape_html: !cli.no_escape,
        ..HtmlOptions::default()
    }
}

fn cell_formatter(cli: &Cli) -> Result<DefaultCellFormatter> {
    let mut chars = cli.grouping_separator.chars();
    let grouping_separator = match (chars.next(), chars.next()) {
        (None, _) => None,
        (Some(c), None) => Some(c),
        _ => bail!(
            "Grouping separator must be a single character, got '{}'",
            cli.grouping_separator
        ),
    };
    if grouping_separator == Some(cli.decimal_separator) {
        bail!("Grouping and decimal separators must differ");
    }

    let date = DateFormatter::new(&cli.date_format)
        .with_context(|| format!("Invalid date format '{}'", cli.date_format))?;
    log::debug!("date pattern '{}'", date.pattern());

    Ok(DefaultCellFormatter::new(
        date,
        NumberLocale {
            grouping_separator,
            decimal_separator: cli.decimal_separator,
            max_fraction_digits: cli.max_fraction_digits,
        },
    ))
}
