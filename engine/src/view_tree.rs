use serde::{Deserialize, Serialize};

use crate::ui::Rect;

/// Mouse state sampled for one frame, in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiInput {
    pub mouse_pos: Option<(u32, u32)>,
    pub mouse_up: bool,
}

/// A flat, back-to-front list of drawable/clickable nodes built fresh every frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewTree<A> {
    pub nodes: Vec<ViewNode<A>>,
}

impl<A> Default for ViewTree<A> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<A> ViewTree<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: ViewNode<A>) {
        self.nodes.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ButtonNode<A>> {
        self.nodes.iter().filter_map(|node| match node {
            ViewNode::Button(button) => Some(button),
            _ => None,
        })
    }

    /// Topmost enabled button under `pos`.
    pub fn button_at(&self, pos: (u32, u32)) -> Option<&ButtonNode<A>> {
        self.nodes.iter().rev().find_map(|node| match node {
            ViewNode::Button(button) if button.enabled && button.rect.contains(pos.0, pos.1) => {
                Some(button)
            }
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ViewNode<A> {
    Button(ButtonNode<A>),
    Text(TextNode),
    Panel(PanelNode),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonNode<A> {
    pub id: u32,
    pub rect: Rect,
    pub label: String,
    pub action: A,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextNode {
    pub pos: (u32, u32),
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelNode {
    pub rect: Rect,
    /// Dims everything underneath the panel's rect instead of filling it opaquely.
    pub scrim: bool,
}

/// Actions of the topmost enabled button released over this frame.
pub fn hit_test_actions<A: Clone>(view: &ViewTree<A>, input: UiInput) -> Vec<A> {
    if !input.mouse_up {
        return Vec::new();
    }
    let Some(pos) = input.mouse_pos else {
        return Vec::new();
    };
    view.button_at(pos)
        .map(|button| vec![button.action.clone()])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(id: u32, rect: Rect, action: &'static str, enabled: bool) -> ViewNode<&'static str> {
        ViewNode::Button(ButtonNode {
            id,
            rect,
            label: action.to_string(),
            action,
            enabled,
        })
    }

    #[test]
    fn click_requires_mouse_up_inside_enabled_button() {
        let mut view = ViewTree::new();
        view.push(button(1, Rect::new(0, 0, 10, 10), "a", true));
        view.push(button(2, Rect::new(20, 0, 10, 10), "b", false));

        let click = |x, y| UiInput {
            mouse_pos: Some((x, y)),
            mouse_up: true,
        };
        assert_eq!(hit_test_actions(&view, click(5, 5)), vec!["a"]);
        assert!(hit_test_actions(&view, click(25, 5)).is_empty());
        assert!(hit_test_actions(&view, click(50, 50)).is_empty());

        let hover = UiInput {
            mouse_pos: Some((5, 5)),
            ..UiInput::default()
        };
        assert!(hit_test_actions(&view, hover).is_empty());
    }

    #[test]
    fn overlapping_buttons_resolve_to_topmost() {
        let mut view = ViewTree::new();
        view.push(button(1, Rect::new(0, 0, 10, 10), "under", true));
        view.push(button(2, Rect::new(0, 0, 10, 10), "over", true));
        assert_eq!(view.button_at((1, 1)).map(|b| b.id), Some(2));
        assert_eq!(view.buttons().count(), 2);
    }
}
