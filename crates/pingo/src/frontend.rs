use crate::config::constants::TUI_REFRESH_RATE;
use crate::frontend::binding::CTRL_C;
use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pingo_core::Builder;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::net::Ipv4Addr;
use tui_app::{PromptKind, TuiApp};

mod binding;
mod render;
mod tui_app;

/// Run the frontend TUI.
///
/// A probe session is started for each of the initial `targets`.
pub fn run_frontend(builder: Builder, targets: &[Ipv4Addr]) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        disable_raw_mode().expect("disable_raw_mode");
        execute!(io::stdout(), LeaveAlternateScreen).expect("execute LeaveAlternateScreen");
        original_hook(panic);
    }));
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut app = TuiApp::new(builder);
    app.start_sessions(targets);
    let res = run_app(&mut terminal, &mut app);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    if let Err(err) = res {
        println!("{err:?}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp) -> io::Result<()> {
    loop {
        app.collect_finished();
        terminal.draw(|f| render::app::render(f, app))?;
        if event::poll(TUI_REFRESH_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let bindings = app.bindings;
                    if CTRL_C.check(key) {
                        return Ok(());
                    } else if app.prompt.is_some() {
                        if bindings.submit.check(key) {
                            app.submit();
                        } else if bindings.cancel.check(key) {
                            app.cancel_prompt();
                        } else if bindings.delete_char.check(key) {
                            app.pop_input();
                        } else if let KeyCode::Char(c) = key.code {
                            app.push_input(c);
                        }
                    } else if bindings.new_target.check(key) {
                        app.open_prompt(PromptKind::Target);
                    } else if bindings.delete_result.check(key) {
                        app.open_prompt(PromptKind::ResultNumber);
                    } else if bindings.quit.check(key) {
                        return Ok(());
                    }
                }
            }
        }
    }
}
