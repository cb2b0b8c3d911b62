//! Error types for the designer crate.
//!
//! Only session-level calls return these. Commands, drag steps and snapping
//! treat stale references as no-ops instead.

use labelkit_settings::SettingsError;
use thiserror::Error;

use crate::item::ItemId;
use crate::model::ElementKind;

#[derive(Error, Debug)]
pub enum DesignerError {
    /// The id does not name an item in the scene.
    #[error("Item {0} not found")]
    ItemNotFound(ItemId),

    /// The item exists but is not of the kind the operation edits.
    #[error("Item {id} is not a {}", .expected.display_name())]
    KindMismatch { id: ItemId, expected: ElementKind },

    /// The item has no outline to style.
    #[error("Item {0} has no pen style")]
    NoPen(ItemId),

    /// The operation needs a closed history macro.
    #[error("A history macro is still open")]
    MacroOpen,

    /// Paste with nothing on the clipboard.
    #[error("Clipboard is empty")]
    ClipboardEmpty,

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type DesignerResult<T> = Result<T, DesignerError>;
