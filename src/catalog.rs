//! Applications the desktop can launch, with their preferred window sizes.

use crate::geometry::Size;
use crate::window::{AppKey, OpenDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppEntry {
    pub app: &'static str,
    /// Caption under the desktop icon.
    pub label: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub default_size: Size,
    pub min_size: Size,
}

impl AppEntry {
    pub fn descriptor(&self) -> OpenDescriptor {
        OpenDescriptor::new(AppKey::app(self.app), self.title)
            .with_icon(self.icon)
            .with_size(self.default_size)
            .with_min_size(self.min_size)
    }

    /// Descriptor for one document of this app. Each document gets its own
    /// window; reopening the same document focuses the existing one.
    pub fn document_descriptor(&self, document: &str, title: &str) -> OpenDescriptor {
        OpenDescriptor::new(AppKey::document(self.app, document), title)
            .with_icon(self.icon)
            .with_size(self.default_size)
            .with_min_size(self.min_size)
    }
}

const STOCK_APPS: &[AppEntry] = &[
    AppEntry {
        app: "my-computer",
        label: "My Computer",
        title: "My Computer",
        icon: "my-computer",
        default_size: Size::new(680, 480),
        min_size: Size::new(300, 200),
    },
    AppEntry {
        app: "my-documents",
        label: "My Documents",
        title: "My Documents",
        icon: "folder",
        default_size: Size::new(680, 480),
        min_size: Size::new(300, 200),
    },
    AppEntry {
        app: "recycle-bin",
        label: "Recycle Bin",
        title: "Recycle Bin",
        icon: "recycle-bin",
        default_size: Size::new(500, 380),
        min_size: Size::new(300, 200),
    },
    AppEntry {
        app: "notepad",
        label: "Notepad",
        title: "Notepad",
        icon: "notepad",
        default_size: Size::new(520, 400),
        min_size: Size::new(280, 180),
    },
    AppEntry {
        app: "paint",
        label: "Paint",
        title: "Paint",
        icon: "paint",
        default_size: Size::new(700, 520),
        min_size: Size::new(400, 320),
    },
    AppEntry {
        app: "calculator",
        label: "Calculator",
        title: "Calculator",
        icon: "calculator",
        default_size: Size::new(240, 310),
        min_size: Size::new(220, 280),
    },
    AppEntry {
        app: "control-panel",
        label: "Control Panel",
        title: "Display Properties",
        icon: "control-panel",
        default_size: Size::new(600, 460),
        min_size: Size::new(400, 320),
    },
    AppEntry {
        app: "snake",
        label: "Snake",
        title: "Snake Game",
        icon: "snake",
        default_size: Size::new(500, 500),
        min_size: Size::new(400, 400),
    },
];

/// Single-cell glyph drawn for an icon name in title bars, desktop icons and
/// taskbar buttons.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "my-computer" => "▣",
        "folder" => "▤",
        "recycle-bin" => "♻",
        "notepad" => "✎",
        "paint" => "✿",
        "calculator" => "▦",
        "control-panel" => "⚙",
        "snake" => "§",
        _ => "■",
    }
}

#[derive(Debug, Clone)]
pub struct AppCatalog {
    entries: Vec<AppEntry>,
}

impl Default for AppCatalog {
    fn default() -> Self {
        Self::stock()
    }
}

impl AppCatalog {
    /// The stock desktop icons.
    pub fn stock() -> Self {
        Self {
            entries: STOCK_APPS.to_vec(),
        }
    }

    pub fn from_entries(entries: Vec<AppEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    pub fn get(&self, app: &str) -> Option<&AppEntry> {
        self.entries.iter().find(|entry| entry.app == app)
    }

    pub fn descriptor(&self, app: &str) -> Option<OpenDescriptor> {
        self.get(app).map(AppEntry::descriptor)
    }

    pub fn document_descriptor(
        &self,
        app: &str,
        document: &str,
        title: &str,
    ) -> Option<OpenDescriptor> {
        self.get(app)
            .map(|entry| entry.document_descriptor(document, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_catalog_has_every_desktop_icon() {
        let catalog = AppCatalog::stock();
        let apps: Vec<&str> = catalog.entries().iter().map(|e| e.app).collect();
        assert_eq!(
            apps,
            vec![
                "my-computer",
                "my-documents",
                "recycle-bin",
                "notepad",
                "paint",
                "calculator",
                "control-panel",
                "snake",
            ]
        );
    }

    #[test]
    fn stock_sizes_respect_their_minimums() {
        for entry in AppCatalog::stock().entries() {
            assert!(entry.default_size.width >= entry.min_size.width, "{}", entry.app);
            assert!(entry.default_size.height >= entry.min_size.height, "{}", entry.app);
        }
    }

    #[test]
    fn descriptor_carries_sizes() {
        let d = AppCatalog::stock().descriptor("control-panel").unwrap();
        assert_eq!(d.title, "Display Properties");
        assert_eq!(d.size, Some(Size::new(600, 460)));
        assert_eq!(d.min_size, Some(Size::new(400, 320)));
        assert!(AppCatalog::stock().descriptor("solitaire").is_none());
    }

    #[test]
    fn unknown_icons_fall_back_to_a_block() {
        assert_eq!(icon_glyph("notepad"), "✎");
        assert_eq!(icon_glyph("nope"), "■");
    }

    #[test]
    fn document_descriptor_uses_document_key() {
        let d = AppCatalog::stock()
            .document_descriptor("notepad", "todo", "todo.txt - Notepad")
            .unwrap();
        assert_eq!(d.app, AppKey::document("notepad", "todo"));
        assert_eq!(d.title, "todo.txt - Notepad");
    }
}
