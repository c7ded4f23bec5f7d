use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ingested rows
// ---------------------------------------------------------------------------

/// One CSV record as read from the daily dataset, before edge coercion.
/// Edge columns stay as raw text: upstream writes "N/A", blanks and other
/// non-numeric values there.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPropRow {
    #[serde(rename = "Date")]
    pub date: String,
    pub bookmaker: String,
    pub pitcher_name: String,
    pub line: f64,
    pub over_odds: String,
    pub under_odds: String,
    pub expected_innings: f64,
    pub projected_ks: f64,
    pub edge_over: String,
    pub edge_under: String,
}

/// Header names the dataset must carry, in display order.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Date",
    "bookmaker",
    "pitcher_name",
    "line",
    "over_odds",
    "under_odds",
    "expected_innings",
    "projected_ks",
    "edge_over",
    "edge_under",
];

/// A coerced, rounded row. Edges are percentages; `None` means the source
/// value was not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct PropRow {
    pub date: String,
    pub bookmaker: String,
    pub pitcher_name: String,
    pub line: f64,
    pub over_odds: String,
    pub under_odds: String,
    pub expected_innings: f64,
    pub projected_ks: f64,
    pub edge_over: Option<f64>,
    pub edge_under: Option<f64>,
}

/// Builder output: both partitions already ordered by descending max edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeReport {
    pub positive: Vec<PropRow>,
    pub negative: Vec<PropRow>,
    /// Edge cells that failed numeric parsing and show the missing marker.
    pub coercion_skips: usize,
}

impl EdgeReport {
    pub fn total_rows(&self) -> usize {
        self.positive.len() + self.negative.len()
    }
}

// ---------------------------------------------------------------------------
// Display rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// value > 0, rendered green
    Positive,
    /// value <= 0, rendered red
    Negative,
    /// no value, rendered without colour
    Missing,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tone::Positive => "positive",
            Tone::Negative => "negative",
            Tone::Missing => "missing",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCell {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedRow {
    pub date: String,
    pub bookmaker: String,
    pub pitcher_name: String,
    pub line: String,
    pub over_odds: String,
    pub under_odds: String,
    pub expected_innings: String,
    pub projected_ks: String,
    pub edge_over: EdgeCell,
    pub edge_under: EdgeCell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedReport {
    /// Page title configured on the server, shown by every client.
    pub title: String,
    pub date: String,
    pub positive: Vec<FormattedRow>,
    pub negative: Vec<FormattedRow>,
    pub coercion_skips: usize,
}
