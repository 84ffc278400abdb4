//! Page geometry and the rendered artifact
//!
//! Documents render onto a fixed monospace page grid. Geometry is counted
//! in character cells: `width` columns by `height` rows, with side margins
//! applied when pages are assembled and the bottom margin carrying a
//! centered page-number footer.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Fixed page dimensions and margins, in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width: usize,
    pub height: usize,
    pub margin_x: usize,
    pub margin_y: usize,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            width: 92,
            height: 64,
            margin_x: 4,
            margin_y: 3,
        }
    }
}

impl PageSpec {
    /// Validates that the geometry leaves a printable area
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.content_width() < 20 {
            return Err(RenderError::InvalidPageSpec(format!(
                "content width {} is below the 20-cell minimum",
                self.content_width()
            )));
        }
        if self.body_capacity() < 4 {
            return Err(RenderError::InvalidPageSpec(format!(
                "body capacity {} is below the 4-line minimum",
                self.body_capacity()
            )));
        }
        Ok(())
    }

    /// Printable width between the side margins
    pub fn content_width(&self) -> usize {
        self.width.saturating_sub(2 * self.margin_x)
    }

    /// Printable lines between the vertical margins
    pub fn body_capacity(&self) -> usize {
        self.height.saturating_sub(2 * self.margin_y)
    }
}

/// A fully assembled, deterministic document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pages: Vec<String>,
}

impl RenderedDocument {
    pub(crate) fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Individual page texts
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Full document text, pages separated by form feeds
    pub fn text(&self) -> String {
        self.pages.join("\u{0C}")
    }

    /// The artifact bytes handed to the caller
    pub fn into_bytes(self) -> Vec<u8> {
        self.text().into_bytes()
    }
}
