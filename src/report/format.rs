use crate::config::{precision, MISSING_MARKER};
use crate::types::{EdgeCell, EdgeReport, FormattedReport, FormattedRow, PropRow, Tone};

/// Turn an ordered report into display rows. Order is preserved.
pub fn format_report(title: &str, date: &str, report: &EdgeReport) -> FormattedReport {
    FormattedReport {
        title: title.to_string(),
        date: date.to_string(),
        positive: report.positive.iter().map(format_row).collect(),
        negative: report.negative.iter().map(format_row).collect(),
        coercion_skips: report.coercion_skips,
    }
}

pub fn format_row(row: &PropRow) -> FormattedRow {
    FormattedRow {
        date: row.date.clone(),
        bookmaker: row.bookmaker.clone(),
        pitcher_name: row.pitcher_name.clone(),
        line: format_fixed(row.line, precision::LINE),
        over_odds: row.over_odds.clone(),
        under_odds: row.under_odds.clone(),
        expected_innings: format_fixed(row.expected_innings, precision::INNINGS),
        projected_ks: format_fixed(row.projected_ks, precision::PROJECTED_KS),
        edge_over: edge_cell(row.edge_over),
        edge_under: edge_cell(row.edge_under),
    }
}

pub fn format_fixed(value: f64, places: u32) -> String {
    format!("{:.*}", places as usize, value)
}

pub fn edge_cell(value: Option<f64>) -> EdgeCell {
    match value {
        Some(v) => EdgeCell {
            text: format!("{}%", format_fixed(v, precision::EDGE)),
            tone: tone(v),
        },
        None => EdgeCell {
            text: MISSING_MARKER.to_string(),
            tone: Tone::Missing,
        },
    }
}

pub fn tone(value: f64) -> Tone {
    if value > 0.0 {
        Tone::Positive
    } else {
        Tone::Negative
    }
}
