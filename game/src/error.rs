use thiserror::Error;

use crate::settings::SettingsError;

/// Fail-fast errors raised before the first frame is drawn.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("canvas size {width}x{height} has a zero dimension")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("overlay element `{element}` does not fit inside the {canvas_w}x{canvas_h} canvas")]
    OverlayDoesNotFit {
        element: &'static str,
        canvas_w: u32,
        canvas_h: u32,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
