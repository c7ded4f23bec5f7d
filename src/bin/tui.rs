mod tui_app;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use tui_app::{header_title, truncate, AppState, ConnectionStatus, EdgeCell, Pane, RowResponse, Tone};

const REFRESH_SECS: u64 = 5;

const COLUMNS: [&str; 10] = [
    "Date", "Book", "Pitcher", "Line", "Over", "Under", "Exp IP", "Proj K", "Edge O", "Edge U",
];

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> io::Result<()> {
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:8501".to_string());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .map_err(io::Error::other)?;

    let mut app = AppState::new(base_url);

    // Initial fetch before rendering
    app.refresh(&client).await;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut positive_state = TableState::default();
    let mut negative_state = TableState::default();

    let result = run_loop(
        &mut terminal,
        &mut app,
        &client,
        &mut positive_state,
        &mut negative_state,
    )
    .await;

    // Restore terminal regardless of result
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    client: &reqwest::Client,
    positive_state: &mut TableState,
    negative_state: &mut TableState,
) -> io::Result<()> {
    let refresh_interval = Duration::from_secs(REFRESH_SECS);
    let mut last_tick = std::time::Instant::now();

    loop {
        terminal.draw(|f| render(f, app, positive_state, negative_state))?;

        let timeout = refresh_interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let state = match app.focus {
                        Pane::Positive => &mut *positive_state,
                        Pane::Negative => &mut *negative_state,
                    };
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            app.refresh(client).await;
                            last_tick = std::time::Instant::now();
                        }
                        KeyCode::Tab => app.focus = app.focus.toggle(),
                        KeyCode::Down | KeyCode::Char('j') => {
                            let max = app.focused_len().saturating_sub(1);
                            let next = state.selected().map_or(0, |i| (i + 1).min(max));
                            state.select(Some(next));
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            let prev = state.selected().map_or(0, |i| i.saturating_sub(1));
                            state.select(Some(prev));
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= refresh_interval {
            app.refresh(client).await;
            last_tick = std::time::Instant::now();
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(
    f: &mut Frame,
    app: &AppState,
    positive_state: &mut TableState,
    negative_state: &mut TableState,
) {
    let area = f.area();

    // Outer vertical split: header | positive | negative | footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // header
            Constraint::Percentage(50), // positive edges
            Constraint::Min(0),         // negative edges
            Constraint::Length(1),      // footer
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_edges_table(
        f,
        " TODAY'S PLAYS (POSITIVE EDGES) ",
        "No positive edges today.",
        &app.report.positive,
        app.focus == Pane::Positive,
        positive_state,
        chunks[1],
    );
    render_edges_table(
        f,
        " LEANS AGAINST (NEGATIVE OR NEUTRAL) ",
        "No neutral/negative edges today.",
        &app.report.negative,
        app.focus == Pane::Negative,
        negative_state,
        chunks[2],
    );
    render_footer(f, chunks[3]);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let (status_text, status_color) = match &app.status {
        ConnectionStatus::Connected => ("● connected".to_string(), Color::Green),
        ConnectionStatus::Connecting => ("◌ connecting".to_string(), Color::Yellow),
        ConnectionStatus::NoData(msg) => (format!("⚠ {}", truncate(msg, 60)), Color::Yellow),
        ConnectionStatus::Error(e) => (format!("✗ {}", truncate(e, 40)), Color::Red),
    };

    let mut title_spans = vec![
        Span::styled(
            format!(" {}  ", header_title(&app.report)),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("  │  "),
        Span::styled(
            format!("{} plays", app.report.positive.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("{} leans against", app.report.negative.len()),
            Style::default().fg(Color::White),
        ),
    ];
    if app.report.coercion_skips > 0 {
        title_spans.push(Span::raw("  │  "));
        title_spans.push(Span::styled(
            format!("{} missing edges", app.report.coercion_skips),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(title_spans))
        .block(Block::default().borders(Borders::ALL).border_style(
            Style::default().fg(Color::DarkGray),
        ));

    f.render_widget(paragraph, area);
}

fn render_edges_table(
    f: &mut Frame,
    title: &str,
    empty_message: &str,
    rows: &[RowResponse],
    focused: bool,
    state: &mut TableState,
    area: Rect,
) {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    if rows.is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            format!(" {empty_message}"),
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let header_cells = COLUMNS
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.date.clone()).style(Style::default().fg(Color::DarkGray)),
                Cell::from(truncate(&r.bookmaker, 12)),
                Cell::from(truncate(&r.pitcher_name, 22)),
                Cell::from(r.line.clone()),
                Cell::from(r.over_odds.clone()),
                Cell::from(r.under_odds.clone()),
                Cell::from(r.expected_innings.clone()),
                Cell::from(r.projected_ks.clone()),
                edge_cell(&r.edge_over),
                edge_cell(&r.edge_under),
            ])
        })
        .collect();

    let table = Table::new(
        table_rows,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Min(12),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(table, area, state);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" [q] ", Style::default().fg(Color::Yellow)),
        Span::raw("quit  "),
        Span::styled("[r] ", Style::default().fg(Color::Yellow)),
        Span::raw("refresh  "),
        Span::styled("[tab] ", Style::default().fg(Color::Yellow)),
        Span::raw("switch table  "),
        Span::styled("[↑↓ / j k] ", Style::default().fg(Color::Yellow)),
        Span::raw("scroll  "),
        Span::styled(
            format!("auto-refresh: {REFRESH_SECS}s"),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn edge_cell(cell: &EdgeCell) -> Cell<'static> {
    let color = match cell.tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
        Tone::Missing => Color::DarkGray,
    };
    Cell::from(cell.text.clone()).style(Style::default().fg(color))
}
