use crossterm::event::{KeyCode, KeyEvent};

pub(crate) fn is_back(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
}

pub(crate) fn is_confirm(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter)
}

pub(crate) fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
}

pub(crate) fn is_play_pause(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(' '))
}

pub(crate) fn is_skip_forward(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l'))
}

pub(crate) fn is_skip_back(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h'))
}
