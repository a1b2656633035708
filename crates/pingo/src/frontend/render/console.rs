use crate::frontend::tui_app::{Status, TuiApp};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

const PROMPT: &str = "> ";

/// Render the key controls, the input prompt and the last status.
pub fn render(f: &mut Frame<'_>, rect: Rect, app: &TuiApp) {
    let title = app
        .prompt
        .as_ref()
        .map_or("Console", |prompt| prompt.kind.title());
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let mut lines = vec![];
    if let Some(prompt) = &app.prompt {
        lines.push(Line::raw(format!("{PROMPT}{}", prompt.input)));
        let cursor_x = rect.x + 1 + (PROMPT.len() + prompt.input.chars().count()) as u16;
        f.set_cursor_position(Position::new(cursor_x, rect.y + 1));
        lines.push(help_line(&[
            (app.bindings.submit.to_string(), "submit"),
            (app.bindings.cancel.to_string(), "cancel"),
        ]));
    } else {
        lines.push(help_line(&[
            (app.bindings.new_target.to_string(), "new target"),
            (app.bindings.delete_result.to_string(), "delete result"),
            (app.bindings.quit.to_string(), "quit"),
        ]));
    }
    match &app.status {
        Some(Status::Info(msg)) => lines.push(Line::raw(msg.as_str())),
        Some(Status::Error(msg)) => lines.push(Line::from(Span::styled(
            msg.as_str(),
            Style::default().fg(Color::Red),
        ))),
        None => {}
    }
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn help_line(items: &[(String, &'static str)]) -> Line<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::raw("input: ")];
    for (i, (key, action)) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(", "));
        }
        spans.push(Span::styled(key.clone(), bold));
        spans.push(Span::raw(format!(" ({action})")));
    }
    Line::from(spans)
}
