use serde::{Deserialize, Serialize};

use crate::input::InputState;

pub const MOVE_UP_KEY: &str = "w";
pub const MOVE_DOWN_KEY: &str = "s";
pub const MOVE_LEFT_KEY: &str = "a";
pub const MOVE_RIGHT_KEY: &str = "d";

pub const DEFAULT_X: f64 = 400.0;
pub const DEFAULT_Y: f64 = 300.0;
pub const DEFAULT_HP: i32 = 100;
/// Pixels per frame.
pub const DEFAULT_SPEED: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    /// Nothing clamps or changes this yet; the HUD just shows it.
    pub hp: i32,
    pub speed: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: DEFAULT_X,
            y: DEFAULT_Y,
            hp: DEFAULT_HP,
            speed: DEFAULT_SPEED,
        }
    }
}

impl Player {
    /// One frame of straight-line movement.
    ///
    /// Each held direction applies on its own: opposite keys cancel out, and diagonals move
    /// `speed` on both axes (not normalized).
    pub fn apply_movement(&mut self, input: &InputState) {
        if input.is_held(MOVE_UP_KEY) {
            self.y -= self.speed;
        }
        if input.is_held(MOVE_DOWN_KEY) {
            self.y += self.speed;
        }
        if input.is_held(MOVE_LEFT_KEY) {
            self.x -= self.speed;
        }
        if input.is_held(MOVE_RIGHT_KEY) {
            self.x += self.speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(keys: &[&str]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.press(key);
        }
        input
    }

    #[test]
    fn defaults_match_startup_values() {
        let p = Player::default();
        assert_eq!((p.x, p.y, p.hp, p.speed), (400.0, 300.0, 100, 2.0));
    }

    #[test]
    fn each_direction_moves_by_speed() {
        for (key, dx, dy) in [("w", 0.0, -2.0), ("s", 0.0, 2.0), ("a", -2.0, 0.0), ("d", 2.0, 0.0)] {
            let mut p = Player::default();
            p.apply_movement(&holding(&[key]));
            assert_eq!((p.x - DEFAULT_X, p.y - DEFAULT_Y), (dx, dy), "key {key}");
        }
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut p = Player::default();
        p.apply_movement(&holding(&["w", "s", "a", "d"]));
        assert_eq!((p.x, p.y), (DEFAULT_X, DEFAULT_Y));
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let mut p = Player::default();
        p.apply_movement(&holding(&["w", "d"]));
        assert_eq!((p.x, p.y), (402.0, 298.0));
    }

    #[test]
    fn far_positions_still_step_exactly() {
        let start = 16_777_217.0;
        let mut p = Player {
            x: start,
            ..Player::default()
        };
        let held = holding(&["d"]);
        for _ in 0..1000 {
            p.apply_movement(&held);
        }
        assert_eq!(p.x, start + 2.0 * 1000.0);
    }

    #[test]
    fn unrelated_keys_do_nothing() {
        let mut p = Player::default();
        p.apply_movement(&holding(&["q", "escape", "arrowup"]));
        assert_eq!(p, Player::default());
    }
}
