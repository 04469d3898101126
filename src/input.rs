use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::mode::Command;
use crate::snake::Direction::*;

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let cmd = match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Command::Steer(Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Command::Steer(Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Command::Steer(Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Command::Steer(Right),
        KeyCode::Enter => Command::Start,
        KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Esc => Command::Menu,
        KeyCode::F(11) | KeyCode::Char('f') | KeyCode::Char('F') => Command::ToggleFullscreen,
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
