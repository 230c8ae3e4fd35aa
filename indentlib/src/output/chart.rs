//! Ranked bar data for the "Total Indent by SKU" chart.
//!
//! Each bar carries its label, the raw value, the value formatted to two
//! decimals, and a length scaled against the largest positive indent. Bars
//! for zero or negative indents have length zero. Renderers decide how to
//! draw them; the text renderer here uses block characters.

use serde::{Deserialize, Serialize};

use crate::data::result::IndentReport;

/// Default bar width in characters.
pub const DEFAULT_CHART_WIDTH: usize = 40;

/// One horizontal bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    /// `"SKU - Name"`
    pub label: String,
    /// Unformatted total indent
    pub value: f64,
    /// Total indent to two decimals
    pub text: String,
    /// Bar length in cells, `0..=width`
    pub length: usize,
}

/// A horizontal bar chart, one bar per SKU in report order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndentChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: usize,
    pub bars: Vec<ChartBar>,
}

impl IndentChart {
    /// Build chart data from a report, scaling bars to `width` cells.
    pub fn from_report(report: &IndentReport, width: usize) -> Self {
        let max = report
            .iter()
            .map(|r| r.total_indent)
            .fold(0.0_f64, f64::max);

        let bars = report
            .iter()
            .map(|r| ChartBar {
                label: r.sku_name.clone(),
                value: r.total_indent,
                text: format!("{:.2}", r.total_indent),
                length: bar_length(r.total_indent, max, width),
            })
            .collect();

        IndentChart {
            title: "Total Indent by SKU".to_string(),
            x_label: "Total Indent".to_string(),
            y_label: "SKU - Product Name".to_string(),
            width,
            bars,
        }
    }

    /// Render as plain text, one line per bar.
    pub fn render_text(&self) -> String {
        let label_width = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);
        let mut out = format!("{}\n", self.title);
        for bar in &self.bars {
            out.push_str(&format!(
                "{:<label_width$} | {}{} {}\n",
                bar.label,
                "█".repeat(bar.length),
                " ".repeat(self.width.saturating_sub(bar.length)),
                bar.text,
                label_width = label_width,
            ));
        }
        out
    }
}

fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if value <= 0.0 || max <= 0.0 {
        return 0;
    }
    let scaled = (value / max * width as f64).round() as usize;
    scaled.min(width)
}
