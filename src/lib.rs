//! # LabelKit
//!
//! Editing core of a 2D label layout editor:
//! - Undo/redo history with merging of rapid edits, macros and saved-state tracking
//! - Snapping to the label and to sibling items, with transient guides
//! - Selection frame for dragging a multi-selection as one block
//! - Pointer gesture state machine that turns drags into history commands
//!
//! ## Architecture
//!
//! LabelKit is organized as a workspace with multiple crates:
//!
//! 1. **labelkit-core** - Geometry primitives, item transform, core errors
//! 2. **labelkit-settings** - Editor configuration and its persistence
//! 3. **labelkit-designer** - Items, scene, commands, history, alignment, gestures
//! 4. **labelkit** - Umbrella crate and the headless demo binary
//!
//! Rendering, file formats and printing are left to the host application.

pub use labelkit_core as core;
pub use labelkit_designer as designer;
pub use labelkit_settings as settings;

pub use labelkit_core::{ItemTransform, Point, Rect, Size};

pub use labelkit_settings::{
    AlignmentSettings, EditingSettings, EditorConfig, HistorySettings, SelectionSettings,
    SettingsError,
};

pub use labelkit_designer::{
    Alignable, DesignerCommand, DesignerError, DesignerState, DragState, Element, ElementKind,
    ItemId, LabelItem, LabelScene, Modifiers, PointerEvent, SceneSnapshot, SelectionFrame,
    StackListener, ToolMode, UndoStack,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
