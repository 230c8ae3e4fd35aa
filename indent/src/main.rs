//! # indent
//!
//! A CLI tool for computing procurement indents from order exports.
//!
//! ## Overview
//!
//! indent is built on top of indentlib. It loads one or more order files,
//! keeps delivered orders, aggregates them per SKU, applies the indent
//! formula with the given parameters, and prints the SKUs ranked by indent.
//!
//! ## Usage
//!
//! ```bash
//! # Rank SKUs using the default parameters
//! indent orders.csv
//!
//! # Several files are concatenated before aggregation
//! indent jan.csv feb.csv mar.csv
//!
//! # Tune parameters (each within 0..=20)
//! indent orders.csv --buffer 1.1 --closing-stock 12
//!
//! # Load parameters from JSON, then override one
//! indent orders.csv --params params.json --festival-offer 1.5
//!
//! # Show the bar chart and write updated_dataframe.csv
//! indent orders.csv --chart --export
//! indent orders.csv --export=report.csv
//!
//! # Machine-readable output
//! indent orders.csv --output json
//! indent orders.csv --output csv > indent.csv
//!
//! # Show the effective parameters
//! indent params --buffer 1.2
//! ```

mod render;

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use indentlib::output::DEFAULT_CHART_WIDTH;
use indentlib::query::{PARAM_MAX, PARAM_MIN};
use indentlib::{
    compute_indent, load_orders_files, load_params_file, to_csv_bytes, write_csv_export,
    IndentChart, IndentParams, IndentReport, IndentTable, LoadOptions, EXPORT_FILE_NAME,
};
use tracing::info;

use render::OutputMode;

/// Output format selected with `--output`
#[derive(Clone, Copy)]
enum Format {
    Render(OutputMode),
    Json,
    Csv,
}

/// Turn a parameter name into its flag, e.g. `closing_stock` -> `closing-stock`
fn flag_name(param: &str) -> String {
    param.replace('_', "-")
}

/// Parse a parameter value and check it lies within the accepted range
fn parse_param_value(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !value.is_finite() || !(PARAM_MIN..=PARAM_MAX).contains(&value) {
        return Err(format!(
            "{} is outside the range {}..={}",
            value, PARAM_MIN, PARAM_MAX
        ));
    }
    Ok(value)
}

/// Args shared by every command: parameter file, parameter flags, output
fn param_args() -> Vec<Arg> {
    let defaults = IndentParams::default();
    let mut args = vec![Arg::new("params_file")
        .long("params")
        .value_name("FILE")
        .help("Load parameters from a JSON object of name -> number")];

    for (name, default) in defaults.iter() {
        args.push(
            Arg::new(name)
                .long(flag_name(name))
                .value_name("VALUE")
                .value_parser(parse_param_value)
                .help(format!("Set {} (default {})", name, default)),
        );
    }

    args.push(
        Arg::new("output")
            .short('o')
            .long("output")
            .value_parser(["auto", "term", "text", "json", "csv"])
            .default_value("auto")
            .help("Output format"),
    );
    args
}

/// Args for computing indents
fn compute_args() -> Vec<Arg> {
    let mut args = vec![
        Arg::new("files")
            .value_name("FILES")
            .num_args(1..)
            .required(true)
            .help("Order files to load (concatenated in order)"),
        Arg::new("tsv")
            .long("tsv")
            .action(ArgAction::SetTrue)
            .help("Read input files as tab-separated"),
        Arg::new("chart")
            .long("chart")
            .action(ArgAction::SetTrue)
            .help("Also print the ranked bar chart"),
        Arg::new("export")
            .long("export")
            .value_name("PATH")
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value(EXPORT_FILE_NAME)
            .help("Write the result table as CSV (default: updated_dataframe.csv)"),
    ];
    args.extend(param_args());
    args
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("indent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Procurement indent calculator: ranks SKUs by replenishment quantity")
        .args_conflicts_with_subcommands(true)
        .subcommand_negates_reqs(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
        .args(compute_args())
        .subcommand(
            Command::new("compute")
                .about("Compute indents from order files (default command)")
                .args(compute_args()),
        )
        .subcommand(
            Command::new("params")
                .about("Show the effective parameter set")
                .args(param_args()),
        )
}

/// Initialize logging; RUST_LOG takes precedence over -v
fn init_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Extract the output format from matches
fn extract_format(matches: &ArgMatches) -> Format {
    match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => Format::Json,
        Some("csv") => Format::Csv,
        Some("term") => Format::Render(OutputMode::Term),
        Some("text") => Format::Render(OutputMode::Text),
        _ => Format::Render(OutputMode::Auto),
    }
}

/// Build parameters: defaults, then the params file, then individual flags
fn build_params(matches: &ArgMatches) -> anyhow::Result<IndentParams> {
    let mut params = match matches.get_one::<String>("params_file") {
        Some(path) => load_params_file(path)
            .with_context(|| format!("failed to load parameters from '{}'", path))?,
        None => IndentParams::default(),
    };

    for name in IndentParams::NAMES {
        if let Some(&value) = matches.get_one::<f64>(name) {
            params.set(name, value)?;
        }
    }

    Ok(params)
}

/// Handler for the compute command
fn compute_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let files: Vec<PathBuf> = matches
        .get_many::<String>("files")
        .map(|v| v.map(PathBuf::from).collect())
        .unwrap_or_default();
    let params = build_params(matches)?;
    let format = extract_format(matches);

    let options = if matches.get_flag("tsv") {
        LoadOptions::new().delimiter(b'\t')
    } else {
        LoadOptions::new()
    };

    let orders = load_orders_files(&files, &options)?;
    info!(files = files.len(), rows = orders.len(), "loaded order files");

    let report = compute_indent(&orders, &params)?;
    if report.is_empty() {
        eprintln!("Warning: no delivered orders found; result is empty");
    }

    if let Some(path) = matches.get_one::<String>("export") {
        export_report(&report, path)?;
    }

    let mut stdout = std::io::stdout().lock();
    match format {
        Format::Json => {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        Format::Csv => {
            stdout.write_all(&to_csv_bytes(&report)?)?;
        }
        Format::Render(mode) => {
            let table = IndentTable::from_report(&report);
            let rendered = render::render_indent_table(&table, mode)
                .map_err(|e| anyhow::anyhow!("failed to render table: {e}"))?;
            write_rendered(&mut stdout, &rendered)?;

            if matches.get_flag("chart") {
                let chart = IndentChart::from_report(&report, DEFAULT_CHART_WIDTH);
                writeln!(stdout)?;
                write!(stdout, "{}", chart.render_text())?;
            }
        }
    }

    Ok(())
}

/// Write the CSV export to a file
fn export_report(report: &IndentReport, path: &str) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create '{}'", path))?;
    write_csv_export(report, file).with_context(|| format!("failed to write '{}'", path))?;
    info!(path, rows = report.len(), "wrote export");
    Ok(())
}

/// Handler for the params command
fn params_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let params = build_params(matches)?;
    let mut stdout = std::io::stdout().lock();

    match extract_format(matches) {
        Format::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(&params)?)?,
        Format::Csv => {
            writeln!(stdout, "parameter,value")?;
            for (name, value) in params.iter() {
                writeln!(stdout, "{},{}", name, value)?;
            }
        }
        Format::Render(mode) => {
            let rendered = render::render_params_table(&params, mode)
                .map_err(|e| anyhow::anyhow!("failed to render table: {e}"))?;
            write_rendered(&mut stdout, &rendered)?;
        }
    }
    Ok(())
}

fn write_rendered(out: &mut impl Write, rendered: &str) -> std::io::Result<()> {
    if rendered.ends_with('\n') {
        write!(out, "{}", rendered)
    } else {
        writeln!(out, "{}", rendered)
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    let verbosity = match matches.subcommand() {
        Some((_, sub)) => sub.get_count("verbose").max(matches.get_count("verbose")),
        None => matches.get_count("verbose"),
    };
    init_logging(verbosity);

    let result = match matches.subcommand() {
        Some(("compute", sub)) => compute_handler(sub),
        Some(("params", sub)) => params_handler(sub),
        _ => compute_handler(&matches),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
