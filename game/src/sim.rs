use engine::GameLogic;

use crate::command::Command;
use crate::settings::InputSettings;
use crate::state::SimState;
use crate::view::ViewEffect;

/// The frame update: drain queued commands, then move the player unless paused.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrimsonLogic {
    pub input: InputSettings,
}

impl CrimsonLogic {
    pub fn new(input: InputSettings) -> Self {
        Self { input }
    }

    pub fn apply_command(&self, state: &mut SimState, command: Command) {
        match command {
            Command::KeyDown(key) => {
                let press = state.input.press(&key);
                if press.is_pause() && !(press.repeat && self.input.ignore_pause_key_repeat) {
                    self.apply_view_command(state, Command::TogglePause);
                } else if press.is_restart() && !press.repeat && !state.paused() {
                    self.apply_view_command(state, Command::Quit);
                    // The key is still physically down in the new session.
                    state.input.press(&press.key);
                }
            }
            Command::KeyUp(key) => state.input.release(&key),
            other => self.apply_view_command(state, other),
        }
    }

    fn apply_view_command(&self, state: &mut SimState, command: Command) {
        let Some(event) = command.view_event() else {
            return;
        };
        let (view, effect) = state.view.handle(event);
        match effect {
            ViewEffect::None => state.view = view,
            ViewEffect::RestartSession => *state = state.restarted(),
        }
    }
}

impl GameLogic for CrimsonLogic {
    type State = SimState;
    type Input = Vec<Command>;

    fn initial_state(&self) -> SimState {
        SimState::new()
    }

    fn step(&self, state: &SimState, commands: Vec<Command>) -> SimState {
        let mut next = state.clone();
        for command in commands {
            self.apply_command(&mut next, command);
        }
        if !next.paused() {
            next.player.apply_movement(&next.input);
            next.frame += 1;
        }
        next
    }
}
