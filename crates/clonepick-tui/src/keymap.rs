use crossterm::event::{KeyCode, KeyEvent};

pub(crate) fn is_back(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
}

pub(crate) fn is_confirm(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter)
}

pub(crate) fn is_up(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Up | KeyCode::Char('k'))
}

pub(crate) fn is_down(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Down | KeyCode::Char('j'))
}

pub(crate) fn is_arrow_up(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Up)
}

pub(crate) fn is_arrow_down(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Down)
}

pub(crate) fn is_next_focus(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Tab)
}

pub(crate) fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
}

pub(crate) fn is_char(key: KeyEvent, expected: char) -> bool {
    key.code == KeyCode::Char(expected)
}
