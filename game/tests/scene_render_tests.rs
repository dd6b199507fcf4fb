use crimson::command::Command;
use crimson::scene::{
    CANVAS_SIZE, COLOR_BACKGROUND, COLOR_ENEMY, COLOR_HUD_TEXT, COLOR_PLAYER, render_scene,
};
use crimson::sim::CrimsonLogic;
use crimson::state::SimState;
use engine::HeadlessRunner;
use engine::graphics::{CpuRenderer, Renderer2d};
use engine::regression::render_hashes;
use engine::surface::RgbaBuffer;

fn render(state: &SimState) -> RgbaBuffer {
    let mut buffer = RgbaBuffer::new(CANVAS_SIZE);
    let mut gfx = CpuRenderer::new(buffer.frame_mut(), CANVAS_SIZE);
    gfx.begin_frame(CANVAS_SIZE);
    render_scene(&mut gfx, state);
    buffer
}

#[test]
fn initial_scene_has_background_player_enemy_and_hp() {
    let frame = render(&SimState::new());

    assert_eq!(frame.pixel(0, 0), Some(COLOR_BACKGROUND));
    assert_eq!(frame.pixel(799, 599), Some(COLOR_BACKGROUND));
    assert_eq!(frame.pixel(400, 300), Some(COLOR_PLAYER));
    assert_eq!(frame.pixel(400, 300 - 14), Some(COLOR_PLAYER));
    assert_eq!(frame.pixel(400, 300 - 20), Some(COLOR_BACKGROUND));
    assert_eq!(frame.pixel(365, 265), Some(COLOR_ENEMY));
    assert_eq!(frame.pixel(349, 265), Some(COLOR_BACKGROUND));

    let hud_has_text = (20..100)
        .flat_map(|x| (20..30).map(move |y| (x, y)))
        .any(|(x, y)| frame.pixel(x, y) == Some(COLOR_HUD_TEXT));
    assert!(hud_has_text, "HP readout should paint white pixels above its baseline");
    assert_eq!(frame.pixel(25, 31), Some(COLOR_BACKGROUND));
}

#[test]
fn moved_player_is_drawn_at_new_position() {
    let mut state = SimState::new();
    state.player.x = 100.0;
    state.player.y = 500.0;
    let frame = render(&state);

    assert_eq!(frame.pixel(100, 500), Some(COLOR_PLAYER));
    assert_eq!(frame.pixel(400, 300), Some(COLOR_BACKGROUND));
}

#[test]
fn frame_hashes_are_deterministic() {
    let script = || {
        vec![
            vec![Command::key_down("d")],
            Vec::new(),
            vec![Command::key_up("d"), Command::key_down("s")],
            Vec::new(),
        ]
    };
    let hashes = |inputs: Vec<Vec<Command>>| {
        let mut runner = HeadlessRunner::new(CrimsonLogic::default());
        render_hashes(&mut runner, CANVAS_SIZE, inputs, |state, gfx| {
            render_scene(gfx, state)
        })
    };

    let first = hashes(script());
    let second = hashes(script());
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
    assert_ne!(first[0], first[1]);
}

#[test]
fn paused_frames_hash_identically() {
    let mut runner = HeadlessRunner::new(CrimsonLogic::default());
    let hashes = render_hashes(
        &mut runner,
        CANVAS_SIZE,
        vec![
            vec![Command::TogglePause, Command::key_down("d")],
            Vec::new(),
            Vec::new(),
        ],
        |state, gfx| render_scene(gfx, state),
    );

    assert!(hashes.windows(2).all(|pair| pair[0] == pair[1]));
}
