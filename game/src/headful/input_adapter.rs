use engine::app::{FrameEvent, KeyEvent};
use winit::event::VirtualKeyCode;

use crate::command::Command;
use crate::overlay::OverlayAction;

/// Name a key is tracked under, in the same lowercase form `InputState` stores.
pub fn key_name(key: VirtualKeyCode) -> Option<&'static str> {
    use VirtualKeyCode as K;

    let name = match key {
        K::A => "a",
        K::B => "b",
        K::C => "c",
        K::D => "d",
        K::E => "e",
        K::F => "f",
        K::G => "g",
        K::H => "h",
        K::I => "i",
        K::J => "j",
        K::K => "k",
        K::L => "l",
        K::M => "m",
        K::N => "n",
        K::O => "o",
        K::P => "p",
        K::Q => "q",
        K::R => "r",
        K::S => "s",
        K::T => "t",
        K::U => "u",
        K::V => "v",
        K::W => "w",
        K::X => "x",
        K::Y => "y",
        K::Z => "z",
        K::Key0 => "0",
        K::Key1 => "1",
        K::Key2 => "2",
        K::Key3 => "3",
        K::Key4 => "4",
        K::Key5 => "5",
        K::Key6 => "6",
        K::Key7 => "7",
        K::Key8 => "8",
        K::Key9 => "9",
        K::Escape => "escape",
        K::Space => " ",
        K::Return => "enter",
        K::Tab => "tab",
        K::Back => "backspace",
        K::Left => "arrowleft",
        K::Right => "arrowright",
        K::Up => "arrowup",
        K::Down => "arrowdown",
        K::LShift | K::RShift => "shift",
        K::LControl | K::RControl => "control",
        K::LAlt | K::RAlt => "alt",
        _ => return None,
    };
    Some(name)
}

/// Turns one tick's window events into simulation commands, keeping arrival order.
pub fn commands_from_events(events: Vec<FrameEvent<OverlayAction>>) -> Vec<Command> {
    events
        .into_iter()
        .filter_map(|event| match event {
            FrameEvent::Key(KeyEvent::Pressed(code)) => key_name(code).map(Command::key_down),
            FrameEvent::Key(KeyEvent::Released(code)) => key_name(code).map(Command::key_up),
            FrameEvent::Action(action) => Some(action.command()),
        })
        .collect()
}
