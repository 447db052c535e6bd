//! Configuration module for Explain This.
//!
//! Handles loading application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ComplexityLevel, Prompts};
pub use settings::{
    GeneralSettings, LimitSettings, OpenAISettings, ServerSettings, Settings, YoutubeSettings,
};
