//! Keyboard → paddle intent.
//!
//! The game step only ever sees an [`InputLatch`]: two booleans read once
//! per frame.  Everything about physical keys lives here.

use crossterm::event::KeyCode;

use crate::config::ControlScheme;

/// Logical paddle commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
}

impl ControlScheme {
    /// Map a key to the action it drives under this scheme, if any.
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        match (self, code) {
            (ControlScheme::Wasd, KeyCode::Char('w' | 'W')) => Some(Action::Up),
            (ControlScheme::Wasd, KeyCode::Char('s' | 'S')) => Some(Action::Down),
            (ControlScheme::Arrows, KeyCode::Up) => Some(Action::Up),
            (ControlScheme::Arrows, KeyCode::Down) => Some(Action::Down),
            _ => None,
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            ControlScheme::Wasd => "W S : Move   Q : Quit",
            ControlScheme::Arrows => "↑ ↓ : Move   Q : Quit",
        }
    }
}

/// Current hold state of the two movement keys.  Last event wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputLatch {
    pub up_held: bool,
    pub down_held: bool,
}

impl InputLatch {
    pub fn key_down(&mut self, action: Action) {
        match action {
            Action::Up => self.up_held = true,
            Action::Down => self.down_held = true,
        }
    }

    pub fn key_up(&mut self, action: Action) {
        match action {
            Action::Up => self.up_held = false,
            Action::Down => self.down_held = false,
        }
    }
}

/// Synthesizes key releases for terminals that never report them.
///
/// Classic terminals only deliver presses (OS key-repeat shows up as more
/// presses).  A key counts as held while its last press is recent enough;
/// past that, [`HoldWindow::expire`] releases it.  Until a key's first repeat
/// arrives the long `initial` window applies, since the OS waits up to ~660 ms
/// before repeating.  Once repeats flow, the short `repeat` window lets a
/// released key stop quickly.
#[derive(Clone, Debug)]
pub struct HoldWindow {
    initial: u64,
    repeat: u64,
    up: Option<Seen>,
    down: Option<Seen>,
}

#[derive(Clone, Copy, Debug)]
struct Seen {
    last: u64,
    repeating: bool,
}

impl HoldWindow {
    pub fn new(initial: u64, repeat: u64) -> Self {
        Self {
            initial,
            repeat,
            up: None,
            down: None,
        }
    }

    fn slot(&mut self, action: Action) -> &mut Option<Seen> {
        match action {
            Action::Up => &mut self.up,
            Action::Down => &mut self.down,
        }
    }

    /// Record a press or repeat of `action` seen on `frame`.  Any press of a
    /// key already held counts as a repeat.
    pub fn touch(&mut self, action: Action, frame: u64) {
        let slot = self.slot(action);
        *slot = Some(Seen {
            last: frame,
            repeating: slot.is_some(),
        });
    }

    pub fn forget(&mut self, action: Action) {
        *self.slot(action) = None;
    }

    /// Release every key in `latch` whose last press is older than its window.
    pub fn expire(&mut self, latch: &mut InputLatch, frame: u64) {
        let (initial, repeat) = (self.initial, self.repeat);
        for action in [Action::Up, Action::Down] {
            let slot = self.slot(action);
            let stale = match *slot {
                Some(seen) => {
                    let window = if seen.repeating { repeat } else { initial };
                    frame.saturating_sub(seen.last) > window
                }
                None => true,
            };
            if stale {
                latch.key_up(action);
                *slot = None;
            }
        }
    }
}
