pub mod decorator;

mod registry;

use std::fmt;

use crate::geometry::{Point, Rect, Size};

pub use registry::{Intent, IntentOutcome, WindowRegistry};

/// Session-unique window identity. Issued once by the registry and never
/// reused, even after the window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Logical application identity used for single-instance enforcement.
///
/// A bare key (`notepad`) allows one window for the app. A document key
/// (`notepad:readme`) allows one window per document, so several editors of
/// the same app can be open side by side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppKey {
    app: String,
    document: Option<String>,
}

impl AppKey {
    pub fn app(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            document: None,
        }
    }

    pub fn document(app: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            document: Some(document.into()),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl fmt::Display for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.document {
            Some(doc) => write!(f, "{}:{}", self.app, doc),
            None => f.write_str(&self.app),
        }
    }
}

impl From<&str> for AppKey {
    fn from(app: &str) -> Self {
        AppKey::app(app)
    }
}

impl From<String> for AppKey {
    fn from(app: String) -> Self {
        AppKey::app(app)
    }
}

/// Request to open (or re-activate) an application window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDescriptor {
    pub app: AppKey,
    pub title: String,
    pub icon: Option<String>,
    pub size: Option<Size>,
    pub min_size: Option<Size>,
    pub position: Option<Point>,
}

impl OpenDescriptor {
    pub fn new(app: impl Into<AppKey>, title: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            title: title.into(),
            icon: None,
            size: None,
            min_size: None,
            position: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = Some(min_size);
        self
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }
}

/// One open application window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    id: WindowId,
    app: AppKey,
    title: String,
    icon: Option<String>,
    position: Point,
    size: Size,
    min_size: Size,
    minimized: bool,
    maximized: bool,
    focused: bool,
    z_index: u64,
}

impl WindowRecord {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn app(&self) -> &AppKey {
        &self.app
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Stored top-left corner. Preserved while maximized.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Stored size. Preserved while maximized.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// Stored (restored) rectangle, ignoring the maximized override.
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    /// Rectangle the window occupies on screen, if it is painted at all.
    ///
    /// Minimized windows are not painted; maximized windows fill `work_area`.
    pub fn frame_rect(&self, work_area: Rect) -> Option<Rect> {
        if self.minimized {
            None
        } else if self.maximized {
            Some(work_area)
        } else {
            Some(self.rect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_key_display_includes_document() {
        assert_eq!(AppKey::app("paint").to_string(), "paint");
        assert_eq!(
            AppKey::document("notepad", "readme").to_string(),
            "notepad:readme"
        );
    }

    #[test]
    fn bare_and_document_keys_differ() {
        assert_ne!(AppKey::app("notepad"), AppKey::document("notepad", "a"));
        assert_ne!(
            AppKey::document("notepad", "a"),
            AppKey::document("notepad", "b")
        );
    }

    #[test]
    fn descriptor_builder_sets_optionals() {
        let d = OpenDescriptor::new("paint", "Paint")
            .with_icon("paint.png")
            .with_size(Size::new(700, 520))
            .with_min_size(Size::new(400, 320))
            .at(Point::new(5, 6));
        assert_eq!(d.app, AppKey::app("paint"));
        assert_eq!(d.icon.as_deref(), Some("paint.png"));
        assert_eq!(d.size, Some(Size::new(700, 520)));
        assert_eq!(d.min_size, Some(Size::new(400, 320)));
        assert_eq!(d.position, Some(Point::new(5, 6)));
    }
}
