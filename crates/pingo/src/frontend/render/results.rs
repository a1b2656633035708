use crate::frontend::tui_app::TuiApp;
use pingo_core::stats::Summary;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

const HEADER: &str =
    "[Num] <Dest IP>: Average RTT, Reached ping rate, Unreached ping count";

/// Render the results of all completed and running probe sessions.
pub fn render(f: &mut Frame<'_>, rect: Rect, app: &TuiApp) {
    let block = Block::default()
        .title(" Pingo ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let records = app.records();
    let header = Line::from(Span::styled(
        HEADER,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let rows = records
        .list()
        .iter()
        .enumerate()
        .map(|(i, record)| Line::raw(format_row(i + 1, &Summary::from(record))));
    let pending = app.pending_targets().map(|target| {
        Line::from(Span::styled(
            format!("[..] {target}: probing"),
            Style::default().fg(Color::DarkGray),
        ))
    });
    let lines = std::iter::once(header)
        .chain(rows)
        .chain(pending)
        .collect::<Vec<_>>();
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

/// Format the 1-based `number` result row.
pub fn format_row(number: usize, summary: &Summary) -> String {
    let avg = summary
        .avg_ms()
        .map_or_else(|| String::from("???"), |avg| format!("{avg:.3}ms"));
    let rate = summary
        .success_rate
        .map_or_else(|| String::from("???"), |rate| format!("{rate:.2}%"));
    format!(
        "[{number}] {}: avg_rtt={avg}, rate={rate}, received={}, error={}",
        summary.target, summary.received, summary.errors
    )
}
