pub mod command;
pub mod error;
pub mod headful;
pub mod input;
pub mod overlay;
pub mod player;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod state;
pub mod telemetry;
pub mod view;
