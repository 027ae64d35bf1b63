/// Distance from the content bottom, in pixels, at which the next page is requested.
pub const SCROLL_THRESHOLD: f64 = 200.0;

/// Snapshot of a scrollable view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollViewport {
    /// Height of the visible area
    pub viewport_height: f64,
    /// Distance scrolled from the top
    pub scroll_offset: f64,
    /// Total height of the scrolled content
    pub content_height: f64,
}

impl ScrollViewport {
    pub fn new(viewport_height: f64, scroll_offset: f64, content_height: f64) -> Self {
        Self {
            viewport_height,
            scroll_offset,
            content_height,
        }
    }

    /// Whether the bottom of the viewport is within [`SCROLL_THRESHOLD`] of the content bottom.
    pub fn near_bottom(&self) -> bool {
        self.viewport_height + self.scroll_offset >= self.content_height - SCROLL_THRESHOLD
    }
}
