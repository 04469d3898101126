use crate::snake::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Running,
    Paused,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Start,
    TogglePause,
    Restart,
    Menu,
    ToggleFullscreen,
    Quit,
}

/// Result of feeding a command to the current mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Enter(Mode),
    /// Fresh game, then `Running`.
    NewGame,
}

impl Mode {
    pub fn on(self, cmd: Command) -> Transition {
        use Mode::*;

        match (self, cmd) {
            (_, Command::Menu) => Transition::Enter(Menu),
            (_, Command::Restart) => Transition::NewGame,
            (Menu, Command::Start) => Transition::NewGame,
            (Running, Command::TogglePause) => Transition::Enter(Paused),
            (Paused, Command::TogglePause) => Transition::Enter(Running),
            _ => Transition::Stay,
        }
    }

    /// A collision only ends a running game.
    pub fn on_collision(self) -> Mode {
        match self {
            Mode::Running => Mode::GameOver,
            other => other,
        }
    }

    pub fn is_playing(self) -> bool {
        self == Mode::Running
    }
}
