//! Self-contained HTML page for a day's edge report.
//!
//! Page settings come from the caller; nothing here reads the environment.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::config::{PageConfig, PageLayout};
use crate::types::{EdgeCell, FormattedReport, FormattedRow, Tone, REQUIRED_COLUMNS};

pub fn render_report_page(page: &PageConfig, report: &FormattedReport) -> String {
    let body = html! {
        h1 { (page.title) " — " (report.date) }
        (render_section(
            "Today's Plays (Positive Edges)",
            "No positive edges today.",
            &report.positive,
        ))
        (render_section(
            "Leans Against (Negative or Neutral Edges)",
            "No neutral/negative edges today.",
            &report.negative,
        ))
        @if report.coercion_skips > 0 {
            p.note {
                (report.coercion_skips) " edge value(s) were not numeric and are shown as missing."
            }
        }
    };
    render_document(page, &report.date, body).into_string()
}

/// Blocking notice shown instead of any report content.
pub fn render_error_page(page: &PageConfig, date: &str, message: &str) -> String {
    let body = html! {
        h1 { (page.title) " — " (date) }
        div.notice { (message) }
    };
    render_document(page, date, body).into_string()
}

fn render_document(page: &PageConfig, date: &str, body: Markup) -> Markup {
    let container_class = match page.layout {
        PageLayout::Wide => "container wide",
        PageLayout::Centered => "container centered",
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.title) " — " (date) }
                style { (PreEscaped(INLINE_CSS)) }
            }
            body {
                div class=(container_class) { (body) }
            }
        }
    }
}

const INLINE_CSS: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; color: #262730; }
.container { padding: 1.5rem 2rem; }
.container.wide { max-width: none; }
.container.centered { max-width: 960px; margin: 0 auto; }
h1 { font-size: 1.8rem; }
h2 { font-size: 1.3rem; margin-top: 2rem; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border: 1px solid #e6e9ef; padding: 0.3rem 0.6rem; text-align: right; }
th { background: #f0f2f6; }
td.text { text-align: left; }
td.positive { color: green; }
td.negative { color: red; }
.notice { background: #ffe0e0; border: 1px solid #ff4b4b; padding: 1rem; border-radius: 4px; }
.note { color: #808495; font-size: 0.85rem; }
"#;

fn render_section(heading: &str, empty_message: &str, rows: &[FormattedRow]) -> Markup {
    html! {
        h2 { (heading) }
        @if rows.is_empty() {
            p { (empty_message) }
        } @else {
            table {
                thead {
                    tr {
                        @for col in REQUIRED_COLUMNS {
                            th { (col) }
                        }
                    }
                }
                tbody {
                    @for row in rows {
                        (render_row(row))
                    }
                }
            }
        }
    }
}

fn render_row(row: &FormattedRow) -> Markup {
    html! {
        tr {
            td.text { (row.date) }
            td.text { (row.bookmaker) }
            td.text { (row.pitcher_name) }
            td { (row.line) }
            td { (row.over_odds) }
            td { (row.under_odds) }
            td { (row.expected_innings) }
            td { (row.projected_ks) }
            (edge_td(&row.edge_over))
            (edge_td(&row.edge_under))
        }
    }
}

fn edge_td(cell: &EdgeCell) -> Markup {
    match cell.tone {
        Tone::Missing => html! { td { (cell.text) } },
        tone => html! { td class=(tone.to_string()) { (cell.text) } },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, over: EdgeCell, under: EdgeCell) -> FormattedRow {
        FormattedRow {
            date: "2025-06-01".into(),
            bookmaker: "draftkings".into(),
            pitcher_name: name.into(),
            line: "6.5".into(),
            over_odds: "-115".into(),
            under_odds: "-105".into(),
            expected_innings: "5.83".into(),
            projected_ks: "6.41".into(),
            edge_over: over,
            edge_under: under,
        }
    }

    fn cell(text: &str, tone: Tone) -> EdgeCell {
        EdgeCell { text: text.into(), tone }
    }

    fn report(positive: Vec<FormattedRow>, negative: Vec<FormattedRow>, skips: usize) -> FormattedReport {
        FormattedReport {
            title: "Pitcher K Edge Dashboard".into(),
            date: "2025-06-01".into(),
            positive,
            negative,
            coercion_skips: skips,
        }
    }

    #[test]
    fn empty_sections_show_messages() {
        let html = render_report_page(&PageConfig::default(), &report(vec![], vec![], 0));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p>No positive edges today.</p>"));
        assert!(html.contains("<p>No neutral/negative edges today.</p>"));
        assert!(html.contains("Pitcher K Edge Dashboard — 2025-06-01"));
        assert!(!html.contains("<table>"));
        assert!(!html.contains("class=\"note\""));
    }

    #[test]
    fn edge_cells_carry_tone_classes() {
        let html = render_report_page(
            &PageConfig::default(),
            &report(
                vec![row(
                    "Gerrit Cole",
                    cell("3.10%", Tone::Positive),
                    cell("-6.00%", Tone::Negative),
                )],
                vec![row("Logan Webb", cell("—", Tone::Missing), cell("—", Tone::Missing))],
                2,
            ),
        );
        assert!(html.contains(r#"<td class="positive">3.10%</td>"#));
        assert!(html.contains(r#"<td class="negative">-6.00%</td>"#));
        assert!(html.contains("<td>—</td>"));
        assert!(html.contains(r#"<td class="text">Gerrit Cole</td>"#));
        assert!(html.contains("<th>pitcher_name</th>"));
        assert!(html.contains("2 edge value(s)"));
        assert!(html.contains(r#"class="container wide""#));
    }

    #[test]
    fn text_is_escaped() {
        let html = render_report_page(
            &PageConfig {
                title: "Edges & <Leans>".into(),
                layout: PageLayout::Wide,
            },
            &report(
                vec![row(
                    "<script>O'Neil</script>",
                    cell("1.00%", Tone::Positive),
                    cell("0.00%", Tone::Negative),
                )],
                vec![],
                0,
            ),
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;O'Neil&lt;/script&gt;"));
        assert!(html.contains("Edges &amp; &lt;Leans&gt; — 2025-06-01"));
    }

    #[test]
    fn error_page_uses_layout_and_message() {
        let page = PageConfig {
            title: "K Props".into(),
            layout: PageLayout::Centered,
        };
        let html = render_error_page(&page, "2025-06-01", "File not found: data/<x>.csv");
        assert!(html.contains(r#"class="container centered""#));
        assert!(html.contains(r#"<div class="notice">File not found: data/&lt;x&gt;.csv</div>"#));
        assert!(html.contains("K Props — 2025-06-01"));
    }
}
