use std::time::Duration;

use engine::HeadlessRunner;
use engine::app::{AppConfig, AppContext, FrameEvent, GameApp};
use engine::graphics::Renderer2d;
use engine::profiling::TracingProfiler;
use engine::view_tree::{ButtonNode, ViewTree};
use tracing::{debug, info};

use crate::command::CommandQueue;
use crate::error::StartupError;
use crate::headful::input_adapter::commands_from_events;
use crate::headful::render_pipeline::{SceneLayer, render_frame};
use crate::overlay::{OverlayAction, OverlayLayout, build_overlay_view};
use crate::scene::CANVAS_SIZE;
use crate::settings::{Settings, SettingsStore};
use crate::sim::CrimsonLogic;
use crate::state::SimState;

pub const WINDOW_TITLE: &str = "Crimson";

/// Windowed front end. Owns everything that is not simulation state.
pub struct CrimsonApp {
    settings: Settings,
    layout: OverlayLayout,
    queue: CommandQueue,
    profiler: TracingProfiler,
    scene: SceneLayer,
}

impl CrimsonApp {
    pub fn new(settings: Settings) -> Result<Self, StartupError> {
        let layout = OverlayLayout::compute(CANVAS_SIZE)?;
        Ok(Self {
            settings,
            layout,
            queue: CommandQueue::new(),
            profiler: TracingProfiler::default(),
            scene: SceneLayer::new(CANVAS_SIZE),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scene(&self) -> &SceneLayer {
        &self.scene
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            title: WINDOW_TITLE.to_string(),
            canvas: CANVAS_SIZE,
            window_scale: self.settings.video.window_scale,
        }
    }

    pub fn new_runner(&self) -> HeadlessRunner<CrimsonLogic> {
        HeadlessRunner::new(CrimsonLogic::new(self.settings.input))
    }
}

/// Loads settings and validates the layout before any window exists.
pub fn startup(store: &SettingsStore) -> Result<CrimsonApp, StartupError> {
    let settings = store.load()?;
    debug!(?settings, "settings resolved");
    CrimsonApp::new(settings)
}

fn log_transitions(before: &SimState, after: &SimState) {
    if after.session != before.session {
        info!(session = after.session, "session restarted");
        return;
    }
    if after.view.paused != before.view.paused {
        info!(
            paused = after.view.paused,
            frame = after.frame,
            held = ?after.input.held_keys(),
            "pause toggled"
        );
    }
    if after.view.help_visible != before.view.help_visible {
        debug!(visible = after.view.help_visible, "help toggled");
    }
}

impl GameApp for CrimsonApp {
    type State = HeadlessRunner<CrimsonLogic>;
    type Action = OverlayAction;

    fn init_state(&mut self, _ctx: &mut AppContext) -> Self::State {
        self.scene.invalidate();
        self.new_runner()
    }

    fn build_view(&self, runner: &Self::State) -> ViewTree<OverlayAction> {
        build_overlay_view(&self.layout, runner.state())
    }

    fn update_state(
        &mut self,
        runner: &mut Self::State,
        events: Vec<FrameEvent<OverlayAction>>,
        _dt: Duration,
    ) {
        self.queue.extend(commands_from_events(events));

        let before = runner.state().clone();
        runner.step_profiled(self.queue.drain(), &mut self.profiler);
        let after = runner.state();

        if after.session != before.session {
            self.scene.invalidate();
        }
        log_transitions(&before, after);
    }

    fn render(
        &mut self,
        runner: &Self::State,
        view: &ViewTree<OverlayAction>,
        hovered: Option<&ButtonNode<OverlayAction>>,
        renderer: &mut dyn Renderer2d,
    ) {
        render_frame(renderer, &mut self.scene, runner.state(), view, hovered);
    }
}
