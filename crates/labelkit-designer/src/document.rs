use labelkit_settings::EditorConfig;

use crate::clipboard::Clipboard;
use crate::scene::LabelScene;

/// What commands mutate: the scene plus the document clipboard.
#[derive(Debug, Clone)]
pub struct Document {
    pub scene: LabelScene,
    pub clipboard: Clipboard,
}

impl Document {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            scene: LabelScene::new(config),
            clipboard: Clipboard::new(),
        }
    }
}
