use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::view::ViewEvent;

/// One queued input or overlay message. Producers (window callbacks, overlay clicks, tests)
/// push these; the frame loop drains the queue once per tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    KeyDown(String),
    KeyUp(String),
    TogglePause,
    ToggleHelp,
    Quit,
}

impl Command {
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown(key.into())
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp(key.into())
    }

    pub fn view_event(&self) -> Option<ViewEvent> {
        match self {
            Command::TogglePause => Some(ViewEvent::TogglePause),
            Command::ToggleHelp => Some(ViewEvent::ToggleHelp),
            Command::Quit => Some(ViewEvent::Quit),
            Command::KeyDown(_) | Command::KeyUp(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Everything queued so far, oldest first. The queue is empty afterwards.
    pub fn drain(&mut self) -> Vec<Command> {
        self.pending.drain(..).collect()
    }
}

impl Extend<Command> for CommandQueue {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}
