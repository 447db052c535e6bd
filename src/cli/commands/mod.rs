//! CLI command implementations.

mod config;
mod explain;
mod serve;

pub use config::run_config;
pub use explain::{run_pdf, run_text, run_youtube};
pub use serve::run_serve;
