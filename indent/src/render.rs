//! Template rendering for CLI output using outstanding

use console::Style;
use indentlib::{IndentParams, IndentTable};
use outstanding::{render_with_output, Theme};
use serde::Serialize;

/// Include template at compile time
const TABLE_TEMPLATE: &str = include_str!("../templates/table.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Widest label column before names get truncated
const MAX_LABEL_WIDTH: usize = 60;

/// Width of each numeric cell
const CELL_WIDTH: usize = 14;

/// Row data for template rendering (pre-formatted)
#[derive(Debug, Serialize)]
struct TemplateRow {
    /// Pre-padded label (left-aligned, padded to label_width)
    label: String,
    /// Pre-padded cells (right-aligned, padded to CELL_WIDTH)
    cells: Vec<String>,
}

/// Data context for the table template
#[derive(Debug, Serialize)]
struct TableContext {
    title: String,
    /// Pre-padded header line
    header: String,
    /// Separator line (dashes)
    separator: String,
    rows: Vec<TemplateRow>,
    /// Footer row, if the table has one
    total: Option<TemplateRow>,
}

/// Truncate a label to fit within max_len chars, adding ".." prefix if needed
fn truncate_label(label: &str, max_len: usize) -> String {
    let len = label.chars().count();
    if len > max_len {
        let tail: String = label.chars().skip(len - max_len + 2).collect();
        format!("..{}", tail)
    } else {
        label.to_string()
    }
}

fn to_template_row(label: &str, values: &[String], label_width: usize) -> TemplateRow {
    TemplateRow {
        label: format!(
            "{:<width$}",
            truncate_label(label, label_width),
            width = label_width
        ),
        cells: values
            .iter()
            .map(|v| format!("{:>width$}", v, width = CELL_WIDTH))
            .collect(),
    }
}

/// Build the template context for a labelled table.
fn build_context(
    title: &str,
    headers: &[String],
    rows: &[(String, Vec<String>)],
    total: Option<(String, Vec<String>)>,
) -> TableContext {
    let label_header = headers.first().map(String::as_str).unwrap_or("");
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .chain(total.iter().map(|(label, _)| label.chars().count()))
        .chain(std::iter::once(label_header.chars().count()))
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH);

    let mut header = format!("{:<width$}", label_header, width = label_width);
    for name in headers.iter().skip(1) {
        header.push_str(&format!(" {:>width$}", name, width = CELL_WIDTH));
    }

    let separator = "-".repeat(label_width + (CELL_WIDTH + 1) * headers.len().saturating_sub(1));

    TableContext {
        title: title.to_string(),
        header,
        separator,
        rows: rows
            .iter()
            .map(|(label, values)| to_template_row(label, values, label_width))
            .collect(),
        total: total.map(|(label, values)| to_template_row(&label, &values, label_width)),
    }
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new()
        .add("title", Style::new().bold())
        .add("header", Style::new().bold())
        .add("total", Style::new().bold())
}

fn render_context(
    context: &TableContext,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let theme = create_theme();
    let rendered = render_with_output(TABLE_TEMPLATE, context, &theme, output_mode)?;
    Ok(rendered)
}

/// Render the ranked indent table
pub fn render_indent_table(
    table: &IndentTable,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let rows: Vec<(String, Vec<String>)> = table
        .rows
        .iter()
        .map(|r| (r.label.clone(), r.values.clone()))
        .collect();
    let total = Some((table.footer.label.clone(), table.footer.values.clone()));
    let title = table.title.as_deref().unwrap_or("Total Indent");

    let context = build_context(title, &table.headers, &rows, total);
    render_context(&context, output_mode)
}

/// Render the parameter set next to its defaults
pub fn render_params_table(
    params: &IndentParams,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let defaults = IndentParams::default();
    let headers = vec![
        "Parameter".to_string(),
        "Value".to_string(),
        "Default".to_string(),
    ];
    let rows: Vec<(String, Vec<String>)> = params
        .iter()
        .map(|(name, value)| {
            let default = defaults.get(name).unwrap_or_default();
            (
                name.to_string(),
                vec![format!("{:.2}", value), format!("{:.2}", default)],
            )
        })
        .collect();
    let total = Some((
        "demand multiplier".to_string(),
        vec![
            format!("{:.4}", params.demand_multiplier()),
            format!("{:.4}", defaults.demand_multiplier()),
        ],
    ));

    let context = build_context("Indent Parameters", &headers, &rows, total);
    render_context(&context, output_mode)
}
