//! Pause overlay and help panel.
//!
//! Both are described as a `ViewTree` built from the current flags, so the same tree serves for
//! drawing and for click hit-testing. Nothing here mutates simulation state; clicks come back
//! as `OverlayAction`s that the app turns into queued commands.

use engine::graphics::{Color, DEFAULT_TEXT_SCALE, GLYPH_H, Renderer2d, text_width};
use engine::surface::SurfaceSize;
use engine::ui::{Anchor, Insets, Rect, Size};
use engine::view_tree::{ButtonNode, PanelNode, TextNode, ViewNode, ViewTree};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::StartupError;
use crate::state::SimState;

pub const BUTTON_RESUME: u32 = 1;
pub const BUTTON_QUIT: u32 = 2;
pub const BUTTON_HELP: u32 = 3;

pub const PAUSED_TITLE: &str = "PAUSED";
pub const PAUSED_HINT: &str = "ESC TO RESUME";
pub const HELP_LINES: [&str; 4] = ["CONTROLS", "W A S D: MOVE", "ESC: PAUSE", "R: RESTART"];

const MARGIN: u32 = 32;
const PAD: u32 = 18;
const HEADER_H: u32 = 48;
const BUTTON_GAP: u32 = 12;
const PANEL_SIZE: Size = Size { w: 360, h: 260 };
const BUTTON_SIZE: Size = Size { w: 240, h: 40 };
const HELP_PANEL_SIZE: Size = Size { w: 360, h: 96 };

const COLOR_DIM: Color = [0, 0, 0, 255];
const DIM_ALPHA: u8 = 170;
const COLOR_PANEL_BG: Color = [16, 16, 22, 255];
const COLOR_PANEL_BORDER: Color = [60, 20, 20, 255];
const COLOR_BUTTON_BG: Color = [80, 20, 20, 255];
const COLOR_BUTTON_HOVER: Color = [120, 30, 30, 255];
const COLOR_BUTTON_BORDER: Color = [150, 50, 50, 255];
const COLOR_TEXT: Color = [235, 235, 245, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayAction {
    Resume,
    Quit,
    Help,
}

impl OverlayAction {
    pub fn command(self) -> Command {
        match self {
            OverlayAction::Resume => Command::TogglePause,
            OverlayAction::Quit => Command::Quit,
            OverlayAction::Help => Command::ToggleHelp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    pub canvas: Rect,
    pub panel: Rect,
    pub resume_button: Rect,
    pub quit_button: Rect,
    pub help_button: Rect,
    pub help_panel: Rect,
}

impl OverlayLayout {
    /// Lays the overlay out for a canvas, failing if any element would be squeezed.
    pub fn compute(canvas: SurfaceSize) -> Result<Self, StartupError> {
        if canvas.is_empty() {
            return Err(StartupError::EmptyCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }
        let does_not_fit = |element| StartupError::OverlayDoesNotFit {
            element,
            canvas_w: canvas.width,
            canvas_h: canvas.height,
        };

        let screen = Rect::from_size(canvas.width, canvas.height);
        let safe = screen.inset(Insets::all(MARGIN));

        let panel = safe.place(PANEL_SIZE, Anchor::Center);
        if panel.size() != PANEL_SIZE {
            return Err(does_not_fit("pause panel"));
        }

        let stack = Size::new(BUTTON_SIZE.w, BUTTON_SIZE.h * 3 + BUTTON_GAP * 2);
        let buttons_area = panel
            .inset(Insets::all(PAD))
            .inset(Insets::top(HEADER_H))
            .place(stack, Anchor::BottomCenter);
        if buttons_area.size() != stack {
            return Err(does_not_fit("pause buttons"));
        }
        let rows = buttons_area.rows(3, BUTTON_GAP);

        let help_panel = safe.place(HELP_PANEL_SIZE, Anchor::BottomCenter);
        if help_panel.size() != HELP_PANEL_SIZE {
            return Err(does_not_fit("help panel"));
        }

        Ok(Self {
            canvas: screen,
            panel,
            resume_button: rows[0],
            quit_button: rows[1],
            help_button: rows[2],
            help_panel,
        })
    }
}

fn text(pos: (u32, u32), text: &str) -> ViewNode<OverlayAction> {
    ViewNode::Text(TextNode {
        pos,
        text: text.to_string(),
    })
}

fn button(id: u32, rect: Rect, label: &str, action: OverlayAction) -> ViewNode<OverlayAction> {
    ViewNode::Button(ButtonNode {
        id,
        rect,
        label: label.to_string(),
        action,
        enabled: true,
    })
}

pub fn build_overlay_view(layout: &OverlayLayout, state: &SimState) -> ViewTree<OverlayAction> {
    let mut view = ViewTree::new();

    if state.view.overlay_visible() {
        let panel = layout.panel;
        view.push(ViewNode::Panel(PanelNode {
            rect: layout.canvas,
            scrim: true,
        }));
        view.push(ViewNode::Panel(PanelNode {
            rect: panel,
            scrim: false,
        }));
        view.push(text((panel.x + PAD, panel.y + PAD), PAUSED_TITLE));
        view.push(text((panel.x + PAD, panel.y + PAD + 20), PAUSED_HINT));
        view.push(button(BUTTON_RESUME, layout.resume_button, "RESUME", OverlayAction::Resume));
        view.push(button(BUTTON_QUIT, layout.quit_button, "QUIT", OverlayAction::Quit));
        view.push(button(BUTTON_HELP, layout.help_button, "HELP", OverlayAction::Help));
    }

    if state.view.help_visible {
        let panel = layout.help_panel;
        view.push(ViewNode::Panel(PanelNode {
            rect: panel,
            scrim: false,
        }));
        view.push(text((panel.x + PAD, panel.y + PAD), &HELP_LINES.join("\n")));
    }

    view
}

pub fn render_view<A>(
    gfx: &mut dyn Renderer2d,
    view: &ViewTree<A>,
    hovered: Option<&ButtonNode<A>>,
) {
    for node in &view.nodes {
        match node {
            ViewNode::Panel(panel) if panel.scrim => {
                gfx.blend_rect(panel.rect, COLOR_DIM, DIM_ALPHA);
            }
            ViewNode::Panel(panel) => {
                gfx.fill_rect(panel.rect, COLOR_PANEL_BG);
                gfx.rect_outline(panel.rect, COLOR_PANEL_BORDER);
            }
            ViewNode::Text(node) => {
                gfx.draw_text(node.pos.0, node.pos.1, &node.text, COLOR_TEXT);
            }
            ViewNode::Button(button) => {
                let is_hovered = hovered.is_some_and(|h| h.id == button.id);
                let fill = if is_hovered {
                    COLOR_BUTTON_HOVER
                } else {
                    COLOR_BUTTON_BG
                };
                gfx.fill_rect(button.rect, fill);
                gfx.rect_outline(button.rect, COLOR_BUTTON_BORDER);

                let label_size = Size::new(
                    text_width(&button.label, DEFAULT_TEXT_SCALE),
                    GLYPH_H * DEFAULT_TEXT_SCALE,
                );
                let at = button.rect.place(label_size, Anchor::Center);
                gfx.draw_text(at.x, at.y, &button.label, COLOR_TEXT);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::CANVAS_SIZE;
    use engine::view_tree::{UiInput, hit_test_actions};

    fn layout() -> OverlayLayout {
        OverlayLayout::compute(CANVAS_SIZE).expect("overlay fits default canvas")
    }

    #[test]
    fn layout_keeps_buttons_inside_panel_and_panels_apart() {
        let layout = layout();
        for rect in [layout.resume_button, layout.quit_button, layout.help_button] {
            assert!(layout.panel.encloses(rect));
            assert_eq!(rect.size(), BUTTON_SIZE);
        }
        assert!(layout.resume_button.bottom() < layout.quit_button.y);
        assert!(layout.panel.bottom() <= layout.help_panel.y);
        assert!(layout.canvas.encloses(layout.help_panel));
    }

    #[test]
    fn tiny_canvas_fails_fast() {
        assert!(matches!(
            OverlayLayout::compute(SurfaceSize::new(200, 150)),
            Err(StartupError::OverlayDoesNotFit {
                element: "pause panel",
                ..
            })
        ));
        assert!(matches!(
            OverlayLayout::compute(SurfaceSize::new(0, 600)),
            Err(StartupError::EmptyCanvas { .. })
        ));
    }

    #[test]
    fn running_without_help_has_no_overlay() {
        let view = build_overlay_view(&layout(), &SimState::new());
        assert!(view.is_empty());
    }

    #[test]
    fn paused_view_offers_three_buttons() {
        let mut state = SimState::new();
        state.view.paused = true;
        let view = build_overlay_view(&layout(), &state);

        let actions: Vec<OverlayAction> = view.buttons().map(|b| b.action).collect();
        assert_eq!(
            actions,
            vec![OverlayAction::Resume, OverlayAction::Quit, OverlayAction::Help]
        );
    }

    #[test]
    fn clicks_only_hit_buttons_while_paused() {
        let layout = layout();
        let click = UiInput {
            mouse_pos: Some((layout.quit_button.x + 5, layout.quit_button.y + 5)),
            mouse_up: true,
        };

        let hidden = build_overlay_view(&layout, &SimState::new());
        assert!(hit_test_actions(&hidden, click).is_empty());

        let mut state = SimState::new();
        state.view.paused = true;
        let shown = build_overlay_view(&layout, &state);
        assert_eq!(hit_test_actions(&shown, click), vec![OverlayAction::Quit]);
    }

    #[test]
    fn help_panel_shows_without_pause() {
        let mut state = SimState::new();
        state.view.help_visible = true;
        let view = build_overlay_view(&layout(), &state);

        assert_eq!(view.buttons().count(), 0);
        assert!(view.nodes.iter().any(|node| matches!(
            node,
            ViewNode::Text(t) if t.text.contains("W A S D: MOVE")
        )));
    }

    #[test]
    fn actions_map_to_commands() {
        assert_eq!(OverlayAction::Resume.command(), Command::TogglePause);
        assert_eq!(OverlayAction::Quit.command(), Command::Quit);
        assert_eq!(OverlayAction::Help.command(), Command::ToggleHelp);
    }
}
