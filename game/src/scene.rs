use engine::graphics::{Color, GLYPH_H, Renderer2d};
use engine::surface::SurfaceSize;
use engine::ui::Rect;

use crate::state::SimState;

pub const CANVAS_SIZE: SurfaceSize = SurfaceSize::new(800, 600);

pub const COLOR_BACKGROUND: Color = [0x0a, 0x0a, 0x0a, 255];
pub const COLOR_PLAYER: Color = [0xb3, 0x00, 0x00, 255];
pub const COLOR_ENEMY: Color = [0x44, 0x44, 0x44, 255];
pub const COLOR_HUD_TEXT: Color = [255, 255, 255, 255];

pub const PLAYER_RADIUS: f32 = 15.0;

/// Static stand-in for a future enemy. It has no behavior.
pub const ENEMY_RECT: Rect = Rect {
    x: 350,
    y: 250,
    w: 30,
    h: 30,
};

pub const HUD_TEXT_SCALE: u32 = 2;
pub const HUD_TEXT_X: u32 = 20;
/// Bottom edge of the HP readout.
pub const HUD_BASELINE_Y: u32 = 30;

pub fn hp_text(state: &SimState) -> String {
    format!("HP: {}", state.player.hp)
}

/// Top-left of the HP readout.
pub fn hud_text_origin() -> (u32, u32) {
    (
        HUD_TEXT_X,
        HUD_BASELINE_Y.saturating_sub(GLYPH_H * HUD_TEXT_SCALE),
    )
}

/// Draws one full frame of the world: background, player, placeholder enemy, HP readout.
pub fn render_scene(gfx: &mut dyn Renderer2d, state: &SimState) {
    gfx.clear(COLOR_BACKGROUND);

    let player = &state.player;
    gfx.fill_circle(player.x as f32, player.y as f32, PLAYER_RADIUS, COLOR_PLAYER);

    gfx.fill_rect(ENEMY_RECT, COLOR_ENEMY);

    let (x, y) = hud_text_origin();
    gfx.draw_text_scaled(x, y, &hp_text(state), COLOR_HUD_TEXT, HUD_TEXT_SCALE);
}
