pub mod app;
pub mod input_adapter;
pub mod render_pipeline;
