use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use labelkit::{
    init_logging, DesignerState, EditorConfig, ElementKind, Point, PointerEvent, Rect,
    StackListener, BUILD_DATE, VERSION,
};
use tracing::info;

/// Mirrors the stack state into the log, the way a menu or title bar would.
struct LogListener;

impl StackListener for LogListener {
    fn on_can_undo_changed(&self, can_undo: bool) {
        info!("can undo: {}", can_undo);
    }

    fn on_clean_changed(&self, clean: bool) {
        info!("document {}", if clean { "saved" } else { "modified" });
    }

    fn on_undo_text_changed(&self, text: &str) {
        info!("undo text: {:?}", text);
    }
}

/// Scripted pointer input with strictly increasing timestamps.
struct Script {
    now: Instant,
}

impl Script {
    fn at(&mut self, x: f64, y: f64) -> PointerEvent {
        self.now += Duration::from_millis(16);
        PointerEvent::new(Point::new(x, y), self.now)
    }

    fn pause(&mut self) {
        self.now += Duration::from_secs(1);
    }

    fn drag(&mut self, state: &mut DesignerState, from: (f64, f64), to: (f64, f64)) {
        state.pointer_press(&self.at(from.0, from.1));
        state.pointer_drag(&self.at(to.0, to.1));
        state.pointer_release(&self.at(to.0, to.1));
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("LabelKit {} (built {})", VERSION, BUILD_DATE);

    let path = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => EditorConfig::default_path()?,
    };
    let mut state = DesignerState::from_config_file(&path)?;
    state.history.add_listener(Arc::new(LogListener));
    state.set_label_rect(Some(Rect::new(0.0, 0.0, 400.0, 200.0)));

    let mut script = Script {
        now: Instant::now(),
    };

    let title = state.add_element(ElementKind::Text, Point::new(20.0, 20.0));
    let code = state.add_element(ElementKind::QrCode, Point::new(250.0, 40.0));
    state.change_text(title, "Shipping label")?;
    state.mark_saved()?;

    // Drag the title close to the label centre; it snaps onto it.
    script.pause();
    script.drag(&mut state, (30.0, 30.0), (152.0, 30.0));
    if let Some(item) = state.item(title) {
        info!("title at {:?}", item.pos);
    }

    // Move both items together.
    script.pause();
    state.document.scene.select_all();
    script.drag(&mut state, (150.0, 30.0), (150.0, 60.0));

    info!(
        "{} history entries, modified: {}",
        state.history.len(),
        state.is_modified()
    );
    while state.undo() {}
    info!("after undoing everything, modified: {}", state.is_modified());
    while state.redo() {}
    if let Some(item) = state.item(code) {
        info!("QR code back at {:?}", item.pos);
    }

    Ok(())
}
