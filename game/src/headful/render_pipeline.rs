use engine::graphics::{CpuRenderer, Renderer2d};
use engine::surface::{RgbaBuffer, SurfaceSize};
use engine::view_tree::{ButtonNode, ViewTree};

use crate::overlay::{OverlayAction, render_view};
use crate::scene::render_scene;
use crate::state::SimState;

/// Last rendered scene. While paused the scene is frozen, so it is drawn once and then reused
/// underneath the overlay.
#[derive(Debug, Clone)]
pub struct SceneLayer {
    buffer: RgbaBuffer,
    valid: bool,
    renders: u64,
}

impl SceneLayer {
    pub fn new(canvas: SurfaceSize) -> Self {
        Self {
            buffer: RgbaBuffer::new(canvas),
            valid: false,
            renders: 0,
        }
    }

    pub fn buffer(&self) -> &RgbaBuffer {
        &self.buffer
    }

    /// How many times the scene has actually been drawn.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Redraws the scene unless the game is paused and a frozen copy already exists.
    /// Returns whether it redrew.
    pub fn refresh(&mut self, state: &SimState) -> bool {
        if state.paused() && self.valid {
            return false;
        }
        let size = self.buffer.size();
        let mut gfx = CpuRenderer::new(self.buffer.frame_mut(), size);
        gfx.begin_frame(size);
        render_scene(&mut gfx, state);
        self.valid = true;
        self.renders += 1;
        true
    }
}

/// Composes one presented frame: scene layer first, overlay on top.
pub fn render_frame(
    gfx: &mut dyn Renderer2d,
    scene: &mut SceneLayer,
    state: &SimState,
    view: &ViewTree<OverlayAction>,
    hovered: Option<&ButtonNode<OverlayAction>>,
) {
    scene.refresh(state);
    gfx.blit(scene.buffer());
    render_view(gfx, view, hovered);
}
