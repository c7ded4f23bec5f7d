use std::cmp::Ordering;

use tracing::debug;

use crate::config::precision;
use crate::types::{EdgeReport, PropRow, RawPropRow};

/// Build the two ordered partitions from a day's raw rows.
/// Pure: the input is not modified and equal input gives equal output.
pub fn build_report(rows: &[RawPropRow]) -> EdgeReport {
    let mut coercion_skips = 0;
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for raw in rows {
        let edge_over = coerce_edge(&raw.edge_over);
        let edge_under = coerce_edge(&raw.edge_under);
        for (column, value, parsed) in [
            ("edge_over", &raw.edge_over, edge_over),
            ("edge_under", &raw.edge_under, edge_under),
        ] {
            if parsed.is_none() {
                coercion_skips += 1;
                debug!(
                    pitcher = %raw.pitcher_name,
                    bookmaker = %raw.bookmaker,
                    column,
                    raw = %value,
                    "edge value is not numeric, showing as missing"
                );
            }
        }

        let row = PropRow {
            date: raw.date.clone(),
            bookmaker: raw.bookmaker.clone(),
            pitcher_name: raw.pitcher_name.clone(),
            line: round_to(raw.line, precision::LINE),
            over_odds: raw.over_odds.clone(),
            under_odds: raw.under_odds.clone(),
            expected_innings: round_to(raw.expected_innings, precision::INNINGS),
            projected_ks: round_to(raw.projected_ks, precision::PROJECTED_KS),
            edge_over: edge_over.map(|v| round_to(v, precision::EDGE)),
            edge_under: edge_under.map(|v| round_to(v, precision::EDGE)),
        };

        if is_positive_edge(&row) {
            positive.push(row);
        } else {
            negative.push(row);
        }
    }

    // sort_by is stable: equal keys keep file order.
    positive.sort_by(by_max_edge_desc);
    negative.sort_by(by_max_edge_desc);

    EdgeReport {
        positive,
        negative,
        coercion_skips,
    }
}

/// Parse a fractional edge and scale it to a percentage.
/// Anything that is not a finite number becomes `None`.
pub fn coerce_edge(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * 100.0)
}

/// Round half away from zero to `places` decimals. Negative zero is folded
/// into zero so it never displays as "-0.00".
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// The greater of the two edges; a missing edge never wins over a present one.
pub fn max_edge(over: Option<f64>, under: Option<f64>) -> Option<f64> {
    match (over, under) {
        (Some(o), Some(u)) => Some(o.max(u)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

pub fn is_positive_edge(row: &PropRow) -> bool {
    row.edge_over.is_some_and(|v| v > 0.0) || row.edge_under.is_some_and(|v| v > 0.0)
}

pub fn row_max_edge(row: &PropRow) -> Option<f64> {
    max_edge(row.edge_over, row.edge_under)
}

/// Descending by max edge, rows without any edge last.
fn by_max_edge_desc(a: &PropRow, b: &PropRow) -> Ordering {
    match (row_max_edge(a), row_max_edge(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pitcher: &str, line: f64, edge_over: &str, edge_under: &str) -> RawPropRow {
        RawPropRow {
            date: "2025-06-01".to_string(),
            bookmaker: "draftkings".to_string(),
            pitcher_name: pitcher.to_string(),
            line,
            over_odds: "-115".to_string(),
            under_odds: "-105".to_string(),
            expected_innings: 5.8333,
            projected_ks: 6.0471,
            edge_over: edge_over.to_string(),
            edge_under: edge_under.to_string(),
        }
    }

    fn slate() -> Vec<RawPropRow> {
        vec![
            raw("Gerrit Cole", 6.5, "0.031", "-0.06"),
            raw("Zack Wheeler", 5.5, "-0.02", "0.085"),
            raw("Logan Webb", 4.5, "N/A", "abc"),
            raw("Tarik Skubal", 7.5, "-0.11", "0.0"),
            raw("Chris Sale", 6.5, "0.12", "-0.15"),
            raw("Corbin Burnes", 5.5, "", "-0.01"),
            raw("Blake Snell", 6.5, "0.0", "0.0"),
        ]
    }

    fn assert_non_increasing(rows: &[PropRow]) {
        for pair in rows.windows(2) {
            match (row_max_edge(&pair[0]), row_max_edge(&pair[1])) {
                (Some(a), Some(b)) => assert!(a >= b, "{a} before {b}"),
                (None, Some(b)) => panic!("missing edge sorted before {b}"),
                _ => {}
            }
        }
    }

    #[test]
    fn scenario_scales_rounds_and_classifies() {
        let report = build_report(&[raw("Spencer Strider", 5.55, "0.1023", "-0.05")]);
        assert_eq!(report.positive.len(), 1);
        assert!(report.negative.is_empty());

        let row = &report.positive[0];
        assert!((row.line - 5.6).abs() < 1e-9, "line={}", row.line);
        assert!((row.edge_over.unwrap() - 10.23).abs() < 1e-9);
        assert!((row.edge_under.unwrap() + 5.0).abs() < 1e-9);
        assert!((row_max_edge(row).unwrap() - 10.23).abs() < 1e-9);
        assert_eq!(report.coercion_skips, 0);
    }

    #[test]
    fn partitions_are_disjoint_and_exhaustive() {
        let input = slate();
        let report = build_report(&input);
        assert_eq!(report.total_rows(), input.len());

        let mut names: Vec<&str> = report
            .positive
            .iter()
            .chain(report.negative.iter())
            .map(|r| r.pitcher_name.as_str())
            .collect();
        names.sort_unstable();
        let mut expected: Vec<&str> = input.iter().map(|r| r.pitcher_name.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(names, expected);
    }

    #[test]
    fn partition_follows_positive_criterion() {
        let report = build_report(&slate());
        assert!(report.positive.iter().all(is_positive_edge));
        for row in &report.negative {
            assert!(!row.edge_over.is_some_and(|v| v > 0.0));
            assert!(!row.edge_under.is_some_and(|v| v > 0.0));
        }
    }

    #[test]
    fn partitions_ordered_by_descending_max_edge() {
        let report = build_report(&slate());
        assert_non_increasing(&report.positive);
        assert_non_increasing(&report.negative);

        let order: Vec<&str> = report.positive.iter().map(|r| r.pitcher_name.as_str()).collect();
        assert_eq!(order, vec!["Chris Sale", "Zack Wheeler", "Gerrit Cole"]);
    }

    #[test]
    fn both_edges_missing_sorts_last_as_non_positive() {
        let report = build_report(&slate());
        let last = report.negative.last().expect("negative partition is empty");
        assert_eq!(last.pitcher_name, "Logan Webb");
        assert_eq!(last.edge_over, None);
        assert_eq!(last.edge_under, None);
        // "N/A", "abc" and the blank edge_over for Burnes
        assert_eq!(report.coercion_skips, 3);
    }

    #[test]
    fn missing_over_with_positive_under_ranks_by_under() {
        let report = build_report(&[
            raw("A", 5.5, "0.04", "-0.04"),
            raw("B", 5.5, "garbage", "0.07"),
            raw("C", 5.5, "0.09", "-0.09"),
        ]);
        let order: Vec<&str> = report.positive.iter().map(|r| r.pitcher_name.as_str()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
        let b = &report.positive[1];
        assert_eq!(b.edge_over, None);
        assert!((row_max_edge(b).unwrap() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_input_order() {
        let report = build_report(&[
            raw("First", 5.5, "0.05", "-0.05"),
            raw("Second", 6.5, "0.05", "-0.05"),
        ]);
        assert_eq!(report.positive[0].pitcher_name, "First");
        assert_eq!(report.positive[1].pitcher_name, "Second");
    }

    #[test]
    fn build_is_idempotent_and_leaves_input_untouched() {
        let input = slate();
        let before = input.clone();
        let first = build_report(&input);
        let second = build_report(&input);
        assert_eq!(first, second);
        assert_eq!(input, before);
    }

    #[test]
    fn empty_dataset_gives_empty_partitions() {
        let report = build_report(&[]);
        assert!(report.positive.is_empty());
        assert!(report.negative.is_empty());
        assert_eq!(report.coercion_skips, 0);
    }

    #[test]
    fn coerce_rejects_non_finite_and_text() {
        assert_eq!(coerce_edge("N/A"), None);
        assert_eq!(coerce_edge(""), None);
        assert_eq!(coerce_edge("NaN"), None);
        assert_eq!(coerce_edge("inf"), None);
        assert!((coerce_edge(" 0.25 ").unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn round_to_is_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert!((round_to(5.8333, 2) - 5.83).abs() < 1e-9);
        assert!((round_to(6.0471, 2) - 6.05).abs() < 1e-9);
    }

    #[test]
    fn rounding_near_zero_can_move_a_row_to_non_positive() {
        // 0.00004 -> 0.004% -> rounds to 0.00%
        let report = build_report(&[raw("Tiny", 5.5, "0.00004", "-0.01")]);
        assert!(report.positive.is_empty());
        assert_eq!(report.negative.len(), 1);
    }
}
