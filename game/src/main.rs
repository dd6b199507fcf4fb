use anyhow::Context;
use engine::app::run_game;
use tracing::info;

use crimson::headful::app::startup;
use crimson::settings::SettingsStore;
use crimson::telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    init_telemetry();

    let store = SettingsStore::from_env();
    let app = startup(&store)
        .with_context(|| format!("startup failed (settings: {})", store.path().display()))?;
    let config = app.app_config();
    info!(window_scale = app.settings().video.window_scale, "starting");

    run_game(config, app).context("window loop failed")?;
    Ok(())
}
