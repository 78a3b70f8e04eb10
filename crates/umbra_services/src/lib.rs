//! Umbra Services Layer
//!
//! Platform-facing state the engine exposes to scripts (input) and the
//! settings file that configures the runtime.

pub mod input;
pub mod settings;

pub use input::{InputState, KeyCode};
pub use settings::{Settings, SettingsError};
