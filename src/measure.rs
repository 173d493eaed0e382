//! Text measurement capability injected into the axis layout engine.
//!
//! The engine never rasterizes text itself; hosts provide a measurer backed
//! by whatever text stack they render with. Measurement may fail (e.g. an
//! unavailable font), in which case the affected label contributes nothing
//! to the axis box.

use crate::core::types::Size;

/// Bounding-box measurement for tick labels and axis titles.
///
/// Called once per distinct label per axis per layout pass; hosts with an
/// expensive backend should cache measurements themselves.
pub trait TextMeasurer {
    fn measure(&self, text: &str, padding: f64, font_size: f64, font_family: &str)
    -> Option<Size>;
}

/// Deterministic measurer approximating each glyph as a fixed fraction of
/// the font size. Used by the test suites and useful for headless layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGlyphMeasurer {
    /// Glyph advance as a fraction of the font size.
    pub glyph_aspect: f64,
}

impl Default for FixedGlyphMeasurer {
    fn default() -> Self {
        Self { glyph_aspect: 0.6 }
    }
}

impl TextMeasurer for FixedGlyphMeasurer {
    fn measure(
        &self,
        text: &str,
        padding: f64,
        font_size: f64,
        _font_family: &str,
    ) -> Option<Size> {
        let glyphs = text.chars().count() as f64;
        Some(Size::new(
            glyphs * font_size * self.glyph_aspect + padding * 2.0,
            font_size + padding * 2.0,
        ))
    }
}
