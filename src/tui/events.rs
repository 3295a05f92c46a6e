use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    ClearSearch,
    Submit,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    OpenJump,
    CopyLink,
    ToggleFocus,
    Refresh,
    UpdateSearch(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::ClearSearch,

        // Selection (Emacs style or arrows)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,

        // Pagination
        (KeyCode::PageUp, _) => Action::PrevPage,
        (KeyCode::PageDown, _) => Action::NextPage,
        (KeyCode::Char('g'), KeyModifiers::CONTROL) => Action::OpenJump,

        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyLink,
        (KeyCode::Tab, _) => Action::ToggleFocus,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Refresh,

        // Search input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::UpdateSearch(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
