use anyhow::Result;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Stdout},
    time::Duration,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;
use weatherview_core::{Event, Session, WeatherView, session::CLOCK_PERIOD};

use crate::ui;

const FRAME_PERIOD: Duration = Duration::from_millis(120);

#[derive(Debug, PartialEq, Eq)]
enum Action {
    None,
    Submit,
    Quit,
}

pub async fn run(
    mut view: WeatherView,
    mut session: Session,
    mut events: UnboundedReceiver<Event>,
) -> Result<()> {
    let mut terminal = setup_terminal()?;

    let res = event_loop(&mut terminal, &mut view, &mut session, &mut events).await;

    restore_terminal(&mut terminal)?;
    res
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    view: &mut WeatherView,
    session: &mut Session,
    events: &mut UnboundedReceiver<Event>,
) -> Result<()> {
    let _clock = session.start_clock(CLOCK_PERIOD);
    let mut keys = spawn_key_reader();
    let mut frames = tokio::time::interval(FRAME_PERIOD);
    let mut spinner = 0usize;

    loop {
        terminal.draw(|f| ui::draw(f, view, spinner))?;

        tokio::select! {
            Some(event) = events.recv() => {
                if let Some(command) = view.apply(event) {
                    session.dispatch(command);
                }
            }
            Some(key) = keys.recv() => match handle_key(view, key) {
                Action::Quit => return Ok(()),
                Action::Submit => {
                    if let Some(command) = view.submit() {
                        session.dispatch(command);
                    }
                }
                Action::None => {}
            },
            _ = frames.tick() => spinner = spinner.wrapping_add(1),
        }
    }
}

fn handle_key(view: &mut WeatherView, key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => {
            view.pop_char();
            Action::None
        }
        KeyCode::Char(c) => {
            view.push_char(c);
            Action::None
        }
        _ => Action::None,
    }
}

/// Terminal input is blocking, so it is read on its own thread.
fn spawn_key_reader() -> UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(TermEvent::Key(key)) => {
                    if tx.send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("Stopped reading terminal input: {e}");
                    break;
                }
            }
        }
    });
    rx
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_edits_the_input() {
        let mut view = WeatherView::new();

        for c in "Parix".chars() {
            assert_eq!(handle_key(&mut view, press(KeyCode::Char(c))), Action::None);
        }
        handle_key(&mut view, press(KeyCode::Backspace));
        handle_key(&mut view, press(KeyCode::Char('s')));

        assert_eq!(view.input(), "Paris");
    }

    #[test]
    fn enter_submits_and_escape_quits() {
        let mut view = WeatherView::new();

        assert_eq!(handle_key(&mut view, press(KeyCode::Enter)), Action::Submit);
        assert_eq!(handle_key(&mut view, press(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            handle_key(
                &mut view,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Action::Quit
        );
        assert_eq!(view.input(), "");
    }
}
