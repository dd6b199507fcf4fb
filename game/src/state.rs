use serde::{Deserialize, Serialize};

use crate::input::InputState;
use crate::player::Player;
use crate::view::ViewState;

/// Everything the frame loop mutates, passed into and returned from each step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub player: Player,
    pub input: InputState,
    pub view: ViewState,
    /// Ticks that advanced the simulation (paused ticks are not counted).
    pub frame: u64,
    /// Bumped on every quit; 0 for the session started at launch.
    pub session: u32,
}

impl SimState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session: default player, nothing held, overlay hidden.
    pub fn restarted(&self) -> Self {
        Self {
            session: self.session.wrapping_add(1),
            ..Self::default()
        }
    }

    pub fn paused(&self) -> bool {
        self.view.paused
    }
}
