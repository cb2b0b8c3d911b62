//! Command stack
//!
//! Linear undo history with an index into it. Commands below the index are
//! done, commands at and above it can be redone. Pushing a command executes
//! it and drops the redo tail. Consecutive compatible commands pushed within
//! the merge window fold into one entry; macros group several commands into
//! one entry. A clean index remembers which state was saved last.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use labelkit_settings::HistorySettings;

use crate::commands::{DesignerCommand, MacroCommand, MergePolicy};
use crate::document::Document;

/// Handle for a registered stack listener, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Change notifications for hosts that mirror the stack state (menus,
/// title bar modified marker). Every method fires only when its value
/// actually changed.
pub trait StackListener: Send + Sync {
    fn on_can_undo_changed(&self, _can_undo: bool) {}

    fn on_can_redo_changed(&self, _can_redo: bool) {}

    fn on_clean_changed(&self, _clean: bool) {}

    fn on_undo_text_changed(&self, _text: &str) {}

    fn on_redo_text_changed(&self, _text: &str) {}

    fn on_index_changed(&self, _index: usize) {}
}

#[derive(Debug, Clone, PartialEq)]
struct StackStatus {
    can_undo: bool,
    can_redo: bool,
    clean: bool,
    undo_text: String,
    redo_text: String,
    index: usize,
}

pub struct UndoStack {
    commands: Vec<DesignerCommand>,
    index: usize,
    /// `None` once the saved state can no longer be reached.
    clean_index: Option<usize>,
    open_macro: Option<MacroCommand>,
    macro_depth: usize,
    last_push: Option<Instant>,
    policy: MergePolicy,
    merge_window: Duration,
    /// 0 keeps everything.
    undo_limit: usize,
    listeners: Vec<(ListenerHandle, Arc<dyn StackListener>)>,
    next_listener: u64,
}

impl fmt::Debug for UndoStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoStack")
            .field("len", &self.commands.len())
            .field("index", &self.index)
            .field("clean_index", &self.clean_index)
            .field("macro_depth", &self.macro_depth)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(&HistorySettings::default())
    }
}

impl UndoStack {
    pub fn new(settings: &HistorySettings) -> Self {
        Self {
            commands: Vec::new(),
            index: 0,
            clean_index: Some(0),
            open_macro: None,
            macro_depth: 0,
            last_push: None,
            policy: MergePolicy::from(settings),
            merge_window: settings.merge_window(),
            undo_limit: settings.undo_limit,
            listeners: Vec::new(),
            next_listener: 1,
        }
    }

    /// Execute `cmd` and record it, timestamped now.
    pub fn push(&mut self, cmd: DesignerCommand, doc: &mut Document) {
        self.push_at(cmd, doc, Instant::now());
    }

    /// Execute `cmd` and record it. `at` is the time of the event that
    /// produced the command; it decides whether merging is still allowed.
    pub fn push_at(&mut self, mut cmd: DesignerCommand, doc: &mut Document, at: Instant) {
        cmd.redo(doc);

        let in_window = self
            .last_push
            .is_some_and(|last| at.saturating_duration_since(last) <= self.merge_window);
        self.last_push = Some(at);

        if let Some(open) = self.open_macro.as_mut() {
            let merged = in_window
                && open.children.last_mut().is_some_and(|last| {
                    last.kind() == cmd.kind() && last.merge_with(&cmd, &self.policy)
                });
            if !merged {
                open.children.push(cmd);
            }
            return;
        }

        let before = self.status();
        self.truncate_redo_tail();

        let can_merge = in_window && self.index > 0 && self.clean_index != Some(self.index);
        if can_merge {
            if let Some(prev) = self.commands.get_mut(self.index - 1) {
                if prev.kind() == cmd.kind() && prev.merge_with(&cmd, &self.policy) {
                    tracing::trace!("Merged into '{}'", prev.label());
                    self.notify(&before);
                    return;
                }
            }
        }

        self.append(cmd);
        self.notify(&before);
    }

    /// Open a macro. Nested calls only deepen the current one.
    pub fn begin_macro(&mut self, label: impl Into<String>) {
        let before = self.status();
        if self.open_macro.is_none() {
            self.open_macro = Some(MacroCommand {
                label: label.into(),
                children: Vec::new(),
            });
        }
        self.macro_depth += 1;
        self.notify(&before);
    }

    /// Close the innermost macro. Closing the outermost one records it as a
    /// single entry; an empty macro leaves no trace.
    pub fn end_macro(&mut self) {
        if self.macro_depth == 0 {
            tracing::warn!("end_macro without a matching begin_macro");
            return;
        }
        self.macro_depth -= 1;
        if self.macro_depth > 0 {
            return;
        }

        let before = self.status();
        if let Some(open) = self.open_macro.take() {
            if open.children.is_empty() {
                tracing::debug!("Dropping empty macro '{}'", open.label);
            } else {
                self.truncate_redo_tail();
                self.append(DesignerCommand::Macro(open));
            }
        }
        self.last_push = None;
        self.notify(&before);
    }

    pub fn undo(&mut self, doc: &mut Document) -> bool {
        if self.is_macro_open() {
            tracing::warn!("Undo refused while a macro is open");
            return false;
        }
        if self.index == 0 {
            return false;
        }
        let before = self.status();
        self.index -= 1;
        self.commands[self.index].undo(doc);
        self.last_push = None;
        self.notify(&before);
        true
    }

    pub fn redo(&mut self, doc: &mut Document) -> bool {
        if self.is_macro_open() {
            tracing::warn!("Redo refused while a macro is open");
            return false;
        }
        if self.index >= self.commands.len() {
            return false;
        }
        let before = self.status();
        self.commands[self.index].redo(doc);
        self.index += 1;
        self.last_push = None;
        self.notify(&before);
        true
    }

    /// Drop every command, including an open macro. The document is left as
    /// it is and counts as clean.
    pub fn clear(&mut self) {
        let before = self.status();
        self.commands.clear();
        self.index = 0;
        self.clean_index = Some(0);
        self.open_macro = None;
        self.macro_depth = 0;
        self.last_push = None;
        self.notify(&before);
    }

    /// Mark the current state as saved.
    pub fn set_clean(&mut self) {
        if self.is_macro_open() {
            tracing::warn!("set_clean refused while a macro is open");
            return;
        }
        let before = self.status();
        self.clean_index = Some(self.index);
        self.notify(&before);
    }

    pub fn is_clean(&self) -> bool {
        !self.is_macro_open() && self.clean_index == Some(self.index)
    }

    pub fn clean_index(&self) -> Option<usize> {
        self.clean_index
    }

    pub fn can_undo(&self) -> bool {
        !self.is_macro_open() && self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.is_macro_open() && self.index < self.commands.len()
    }

    pub fn undo_text(&self) -> &str {
        if !self.can_undo() {
            return "";
        }
        self.command_label(self.index - 1).unwrap_or_default()
    }

    pub fn redo_text(&self) -> &str {
        if !self.can_redo() {
            return "";
        }
        self.command_label(self.index).unwrap_or_default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn command(&self, index: usize) -> Option<&DesignerCommand> {
        self.commands.get(index)
    }

    pub fn command_label(&self, index: usize) -> Option<&str> {
        self.commands.get(index).map(|c| c.label())
    }

    pub fn is_macro_open(&self) -> bool {
        self.macro_depth > 0
    }

    pub fn macro_depth(&self) -> usize {
        self.macro_depth
    }

    pub fn undo_limit(&self) -> usize {
        self.undo_limit
    }

    pub fn add_listener(&mut self, listener: Arc<dyn StackListener>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((handle, listener));
        handle
    }

    pub fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    fn truncate_redo_tail(&mut self) {
        if self.index < self.commands.len() {
            tracing::trace!(
                "Discarding {} redoable command(s)",
                self.commands.len() - self.index
            );
            self.commands.truncate(self.index);
            if self.clean_index.is_some_and(|clean| clean > self.index) {
                self.clean_index = None;
            }
        }
    }

    fn append(&mut self, cmd: DesignerCommand) {
        tracing::debug!("Pushed '{}'", cmd.label());
        self.commands.push(cmd);
        self.index += 1;

        if self.undo_limit > 0 && self.commands.len() > self.undo_limit {
            let excess = self.commands.len() - self.undo_limit;
            self.commands.drain(..excess);
            self.index -= excess;
            self.clean_index = self.clean_index.and_then(|clean| clean.checked_sub(excess));
        }
    }

    fn status(&self) -> StackStatus {
        StackStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            clean: self.is_clean(),
            undo_text: self.undo_text().to_string(),
            redo_text: self.redo_text().to_string(),
            index: self.index,
        }
    }

    fn notify(&self, before: &StackStatus) {
        if self.listeners.is_empty() {
            return;
        }
        let after = self.status();
        if after == *before {
            return;
        }
        for (_, listener) in &self.listeners {
            if after.can_undo != before.can_undo {
                listener.on_can_undo_changed(after.can_undo);
            }
            if after.can_redo != before.can_redo {
                listener.on_can_redo_changed(after.can_redo);
            }
            if after.clean != before.clean {
                listener.on_clean_changed(after.clean);
            }
            if after.undo_text != before.undo_text {
                listener.on_undo_text_changed(&after.undo_text);
            }
            if after.redo_text != before.redo_text {
                listener.on_redo_text_changed(&after.redo_text);
            }
            if after.index != before.index {
                listener.on_index_changed(after.index);
            }
        }
    }
}
