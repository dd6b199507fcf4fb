use serde::{Deserialize, Serialize};

/// Pause/help flags. The frame loop only ever reads these; overlay buttons and the pause key
/// change them through `ViewState::handle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub paused: bool,
    pub help_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    TogglePause,
    ToggleHelp,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEffect {
    None,
    RestartSession,
}

impl ViewState {
    /// Pure transition function for the overlay flags.
    ///
    /// Restarting the session is reported as an effect; the caller owns the rest of the state.
    pub fn handle(self, event: ViewEvent) -> (ViewState, ViewEffect) {
        match event {
            ViewEvent::TogglePause => (
                ViewState {
                    paused: !self.paused,
                    ..self
                },
                ViewEffect::None,
            ),
            ViewEvent::ToggleHelp => (
                ViewState {
                    help_visible: !self.help_visible,
                    ..self
                },
                ViewEffect::None,
            ),
            ViewEvent::Quit => (ViewState::default(), ViewEffect::RestartSession),
        }
    }

    /// The pause overlay is shown exactly while paused.
    pub fn overlay_visible(self) -> bool {
        self.paused
    }
}
