use crate::frontend::render::{console, results};
use crate::frontend::tui_app::TuiApp;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// Render the application main screen.
///
/// The layout of the TUI is as follows:
///
///  ____________________________________
/// |               Pingo                |
/// |                                    |
/// |              Results               |
/// |                                    |
///  ------------------------------------
/// |              Console               |
///  ------------------------------------
///
/// - Results: one row per completed probe session, followed by any sessions still running
/// - Console: the key controls, the input prompt (when open) and the outcome of the last action
pub fn render(f: &mut Frame<'_>, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(LAYOUT.as_ref())
        .split(f.area());
    results::render(f, chunks[0], app);
    console::render(f, chunks[1], app);
}

const LAYOUT: [Constraint; 2] = [Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)];
