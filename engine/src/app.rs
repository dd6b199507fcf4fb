use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use thiserror::Error;
use tracing::{debug, info, warn};
use winit::dpi::PhysicalSize;
use winit::error::OsError;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;
use crate::view_tree::{ButtonNode, UiInput, ViewTree, hit_test_actions};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] pixels::Error),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Fixed size of the drawing canvas; the window may be larger or smaller.
    pub canvas: SurfaceSize,
    /// Initial window size as a multiple of the canvas.
    pub window_scale: u32,
}

/// Limits simulation ticks to one per display refresh. Presentation is vsynced too, but a
/// driver may not block on present, so the loop also waits on its own deadline.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
    next_redraw: Instant,
}

impl FramePacer {
    pub const FALLBACK_REFRESH_HZ: u32 = 60;

    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_redraw: now,
        }
    }

    /// Interval from a monitor refresh rate; unknown or zero rates fall back to 60 Hz.
    pub fn from_refresh_millihertz(millihertz: Option<u32>, now: Instant) -> Self {
        let millihertz = millihertz
            .filter(|mhz| *mhz > 0)
            .unwrap_or(Self::FALLBACK_REFRESH_HZ * 1000);
        Self::new(Duration::from_secs_f64(1000.0 / millihertz as f64), now)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Earliest instant the next tick may run. Allows a quarter interval of jitter so a
    /// vsynced present that returns slightly early does not drop a frame.
    pub fn deadline(&self) -> Instant {
        self.next_redraw
            .checked_sub(self.interval / 4)
            .unwrap_or(self.next_redraw)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline()
    }

    /// Takes the current tick slot. Returns false if the slot was already taken.
    pub fn claim(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next_redraw += self.interval;
        if self.next_redraw < now {
            // Fell behind; do not try to catch up with a burst of ticks.
            self.next_redraw = now + self.interval;
        }
        true
    }
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(VirtualKeyCode),
    Released(VirtualKeyCode),
}

/// Everything that happened since the previous tick, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent<A> {
    Key(KeyEvent),
    /// A button in the previous frame's view was clicked.
    Action(A),
}

pub trait GameApp {
    type State;
    type Action: Clone;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    /// Clickable overlay for the current state. Rebuilt every tick.
    fn build_view(&self, state: &Self::State) -> ViewTree<Self::Action>;

    fn update_state(
        &mut self,
        state: &mut Self::State,
        events: Vec<FrameEvent<Self::Action>>,
        dt: Duration,
    );

    fn render(
        &mut self,
        state: &Self::State,
        view: &ViewTree<Self::Action>,
        hovered: Option<&ButtonNode<Self::Action>>,
        renderer: &mut dyn Renderer2d,
    );
}

/// Pending input between two ticks. Key presses and clicks share one queue so their relative
/// order survives until the game drains it.
#[derive(Debug)]
struct PendingInput {
    mouse_pos: Option<(u32, u32)>,
    queue: Vec<PendingEvent>,
}

#[derive(Debug, Clone, Copy)]
enum PendingEvent {
    Key(KeyEvent),
    MouseUp((u32, u32)),
}

impl PendingInput {
    fn new() -> Self {
        Self {
            mouse_pos: None,
            queue: Vec::new(),
        }
    }

    fn drain_resolved<A: Clone>(&mut self, view: &ViewTree<A>) -> Vec<FrameEvent<A>> {
        self.queue
            .drain(..)
            .flat_map(|event| match event {
                PendingEvent::Key(key) => vec![FrameEvent::Key(key)],
                PendingEvent::MouseUp(pos) => hit_test_actions(
                    view,
                    UiInput {
                        mouse_pos: Some(pos),
                        mouse_up: true,
                    },
                )
                .into_iter()
                .map(FrameEvent::Action)
                .collect(),
            })
            .collect()
    }
}

pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), AppError> {
    let event_loop = EventLoop::new();
    let scale = config.window_scale.max(1);
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(
            config.canvas.width.saturating_mul(scale),
            config.canvas.height.saturating_mul(scale),
        ))
        .with_min_inner_size(PhysicalSize::new(config.canvas.width, config.canvas.height))
        .build(&event_loop)
        .map_err(AppError::CreateWindow)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let pixels = PixelsBuilder::new(config.canvas.width, config.canvas.height, surface_texture)
        .enable_vsync(true)
        .build()
        .map_err(AppError::CreateRenderer)?;
    let renderer =
        PixelsRenderer2d::new(pixels, config.canvas).map_err(AppError::CreateRenderer)?;
    info!(
        title = %config.title,
        canvas_w = config.canvas.width,
        canvas_h = config.canvas.height,
        "window created"
    );

    let refresh_mhz = window
        .current_monitor()
        .and_then(|monitor| monitor.refresh_rate_millihertz());
    let mut pacer = FramePacer::from_refresh_millihertz(refresh_mhz, Instant::now());
    debug!(
        refresh_mhz,
        interval_us = pacer.interval().as_micros() as u64,
        "frame pacing"
    );

    let mut ctx = AppContext { window, renderer };
    let mut state = game.init_state(&mut ctx);
    let mut pending = PendingInput::new();
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(pacer.deadline());

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("close requested; exiting");
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    debug!(width = size.width, height = size.height, "window resized");
                    if let Err(err) = ctx
                        .renderer
                        .resize_surface(SurfaceSize::new(size.width, size.height))
                    {
                        warn!(%err, "resize failed");
                    }
                    ctx.window.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: key_state,
                            virtual_keycode: Some(code),
                            ..
                        },
                    ..
                } => {
                    let key = match key_state {
                        ElementState::Pressed => KeyEvent::Pressed(code),
                        ElementState::Released => KeyEvent::Released(code),
                    };
                    pending.queue.push(PendingEvent::Key(key));
                }
                WindowEvent::CursorMoved { position, .. } => {
                    pending.mouse_pos = ctx.renderer.window_to_canvas((position.x, position.y));
                }
                WindowEvent::CursorLeft { .. } => {
                    pending.mouse_pos = None;
                }
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    button: MouseButton::Left,
                    ..
                } => {
                    if let Some(pos) = pending.mouse_pos {
                        pending.queue.push(PendingEvent::MouseUp(pos));
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                if !pacer.claim(now) {
                    // System-initiated redraw between ticks: show the last frame again.
                    if let Err(err) = ctx.renderer.present() {
                        warn!(%err, "present failed");
                    }
                    return;
                }
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                let view_for_input = game.build_view(&state);
                let events = pending.drain_resolved(&view_for_input);
                game.update_state(&mut state, events, dt);

                let view_for_render = game.build_view(&state);
                let hovered = pending
                    .mouse_pos
                    .and_then(|pos| view_for_render.button_at(pos));
                ctx.renderer.draw_frame(|gfx| {
                    game.render(&state, &view_for_render, hovered, gfx);
                });
                if let Err(err) = ctx.renderer.present() {
                    warn!(%err, "present failed");
                }
            }
            Event::MainEventsCleared => {
                if pacer.is_due(Instant::now()) {
                    ctx.window.request_redraw();
                }
            }
            _ => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Rect;
    use crate::view_tree::ViewNode;

    #[test]
    fn frame_pacer_allows_one_tick_per_interval() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(Duration::from_millis(16), start);

        assert!(pacer.claim(start));
        assert!(!pacer.claim(start));
        assert!(!pacer.claim(start + Duration::from_millis(5)));
        assert!(pacer.claim(start + Duration::from_millis(15)));

        // Polling every 100us for 160ms still yields one tick per 16ms.
        let ticks = (0..1600u64)
            .map(|i| start + Duration::from_millis(16) + Duration::from_micros(i * 100))
            .filter(|now| pacer.claim(*now))
            .count();
        assert!((9..=11).contains(&ticks), "got {ticks} ticks in 160ms");
    }

    #[test]
    fn frame_pacer_does_not_burst_after_a_stall() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(Duration::from_millis(10), start);
        assert!(pacer.claim(start));

        let late = start + Duration::from_millis(100);
        assert!(pacer.claim(late));
        assert!(!pacer.claim(late + Duration::from_millis(1)));
    }

    #[test]
    fn frame_pacer_follows_monitor_refresh_rate() {
        let now = Instant::now();
        let hz144 = FramePacer::from_refresh_millihertz(Some(144_000), now);
        assert_eq!(hz144.interval(), Duration::from_secs_f64(1.0 / 144.0));

        for unknown in [None, Some(0)] {
            let pacer = FramePacer::from_refresh_millihertz(unknown, now);
            assert_eq!(pacer.interval(), Duration::from_secs_f64(1.0 / 60.0));
        }
    }

    #[test]
    fn pending_input_keeps_keys_and_clicks_in_arrival_order() {
        let mut view = ViewTree::new();
        view.push(ViewNode::Button(ButtonNode {
            id: 1,
            rect: Rect::new(0, 0, 10, 10),
            label: "OK".to_string(),
            action: 7u8,
            enabled: true,
        }));

        let mut pending = PendingInput::new();
        pending
            .queue
            .push(PendingEvent::Key(KeyEvent::Pressed(VirtualKeyCode::A)));
        pending.queue.push(PendingEvent::MouseUp((5, 5)));
        pending.queue.push(PendingEvent::MouseUp((50, 50)));
        pending
            .queue
            .push(PendingEvent::Key(KeyEvent::Released(VirtualKeyCode::A)));

        let events = pending.drain_resolved(&view);
        assert_eq!(
            events,
            vec![
                FrameEvent::Key(KeyEvent::Pressed(VirtualKeyCode::A)),
                FrameEvent::Action(7),
                FrameEvent::Key(KeyEvent::Released(VirtualKeyCode::A)),
            ]
        );
        assert!(pending.queue.is_empty());
    }
}
