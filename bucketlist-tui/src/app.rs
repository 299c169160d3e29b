//! Key mapping and the event loop driving the detail screen.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use log::{debug, info, warn};

use crate::render::render;
use crate::screen::{Action, DetailScreen, Flow, Mode};
use crate::terminal::TerminalGuard;

/// Translate a key press into a screen action for the given mode.
pub fn action_for(key: KeyEvent, mode: Mode) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match mode {
        Mode::Loading => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('x') => Some(Action::DismissBanner),
            _ => None,
        },
        Mode::List => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::RevealMore),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::RevealLess),
            KeyCode::Enter => Some(Action::Activate),
            KeyCode::Char('a') => Some(Action::Add),
            KeyCode::Char('e') => Some(Action::EditSelected),
            KeyCode::Char('d') => Some(Action::DeleteSelected),
            KeyCode::Char('x') => Some(Action::DismissBanner),
            _ => None,
        },
        Mode::Form => match key.code {
            KeyCode::Esc => Some(Action::FormClose),
            KeyCode::Enter => Some(Action::FormSubmit),
            KeyCode::Tab => Some(Action::FormNextField),
            KeyCode::BackTab => Some(Action::FormPreviousField),
            KeyCode::Backspace => Some(Action::FormBackspace),
            KeyCode::Char(c) => Some(Action::FormChar(c)),
            _ => None,
        },
        Mode::Confirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmYes),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::ConfirmNo),
            _ => None,
        },
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Run until the user quits. The terminal is restored on return.
pub async fn run(mut screen: DetailScreen) -> std::io::Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let mut events = EventStream::new();
    info!("Screen open for list {}", screen.route().list_id);

    loop {
        let (width, height) = terminal.size()?;
        terminal.draw(&render(&screen, width, height))?;

        let Some(event) = events.next().await else {
            debug!("Event stream ended");
            break;
        };
        let key = match event {
            Ok(Event::Key(key)) => key,
            Ok(Event::Resize(width, height)) => {
                debug!("Resized to {width}x{height}");
                continue;
            }
            Ok(_) => continue,
            Err(e) => {
                warn!("Failed to read terminal event: {e}");
                return Err(e);
            }
        };

        if is_interrupt(&key) {
            break;
        }
        let Some(action) = action_for(key, screen.mode()) else {
            continue;
        };
        debug!("Dispatching {action:?}");
        if screen.dispatch(action).await == Flow::Quit {
            break;
        }
    }

    info!("Screen closed");
    Ok(())
}
