//! LabelKit Settings Crate
//!
//! Editor tunables (snap threshold, merge window, frame padding, ...) and
//! their persistence as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    AlignmentSettings, EditingSettings, EditorConfig, HistorySettings, SelectionSettings,
};
pub use error::{SettingsError, SettingsResult};
