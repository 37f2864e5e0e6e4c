pub mod backend;
pub mod document;
pub mod features;
pub mod models;
pub mod python_renderer;
pub mod render_provider;
