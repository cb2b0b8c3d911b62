//! Editor configuration
//!
//! Every tunable of the editing core lives here instead of in code:
//! - Alignment (snap threshold, global enable)
//! - History (merge distance, merge window, undo limit)
//! - Selection (frame padding, hit margins, handle size)
//! - Editing (minimum item size, paste offset)
//!
//! Files are read and written as JSON or TOML depending on the extension.

use labelkit_core::error::ensure_finite;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "labelkit";
const CONFIG_FILE: &str = "editor.toml";

/// Snapping and guide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentSettings {
    /// Global switch for snapping and guides
    pub enabled: bool,
    /// Distance in scene units below which an edge or centre snaps
    pub threshold: f64,
}

impl Default for AlignmentSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 5.0,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Squared distance a merged move may cover from its original start
    pub merge_distance_sq: f64,
    /// Inactivity after which a new command no longer merges
    pub merge_window_ms: u64,
    /// Maximum number of history entries, 0 for unlimited
    pub undo_limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            merge_distance_sq: 100.0,
            merge_window_ms: 500,
            undo_limit: 0,
        }
    }
}

impl HistorySettings {
    pub fn merge_window(&self) -> Duration {
        Duration::from_millis(self.merge_window_ms)
    }
}

/// Selection frame and handle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Margin added around the union of the selected items
    pub frame_padding: f64,
    /// Stroke width of the frame outline
    pub frame_stroke_width: f64,
    /// Width of the band along the frame border that grabs the frame
    pub frame_hit_margin: f64,
    /// Edge length of a resize handle
    pub handle_size: f64,
    /// Pick radius for polygon vertices
    pub vertex_hit_radius: f64,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            frame_padding: 6.0,
            frame_stroke_width: 1.0,
            frame_hit_margin: 8.0,
            handle_size: 8.0,
            vertex_hit_radius: 6.0,
        }
    }
}

/// Direct manipulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingSettings {
    /// Smallest width or height a handle resize can produce
    pub min_item_size: f64,
    /// Offset from the paste point to the pasted item
    pub paste_offset: f64,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            min_item_size: 10.0,
            paste_offset: 20.0,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub alignment: AlignmentSettings,
    pub history: HistorySettings,
    pub selection: SelectionSettings,
    pub editing: EditingSettings,
}

impl EditorConfig {
    /// Default location: `<config dir>/labelkit/editor.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        positive("alignment.threshold", self.alignment.threshold)?;

        non_negative("history.merge_distance_sq", self.history.merge_distance_sq)?;

        non_negative("selection.frame_padding", self.selection.frame_padding)?;
        non_negative(
            "selection.frame_stroke_width",
            self.selection.frame_stroke_width,
        )?;
        non_negative("selection.frame_hit_margin", self.selection.frame_hit_margin)?;
        positive("selection.handle_size", self.selection.handle_size)?;
        positive("selection.vertex_hit_radius", self.selection.vertex_hit_radius)?;

        positive("editing.min_item_size", self.editing.min_item_size)?;
        non_negative("editing.paste_offset", self.editing.paste_offset)?;

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn non_negative(key: &str, value: f64) -> SettingsResult<()> {
    ensure_finite(key, value).map_err(|e| SettingsError::invalid(key, e.to_string()))?;
    if value < 0.0 {
        return Err(SettingsError::invalid(key, "must not be negative"));
    }
    Ok(())
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    non_negative(key, value)?;
    if value == 0.0 {
        return Err(SettingsError::invalid(key, "must be greater than zero"));
    }
    Ok(())
}
