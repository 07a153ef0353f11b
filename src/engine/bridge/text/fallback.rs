use super::{SizedFont, TextMeasureError, TextMeasurer, TextSize};
use crate::engine::text::script::is_wide_char;

/// Fallback text measurer.
///
/// This implementation does not rely on any font engine.
/// It uses a simple heuristic based on font size and character class.
/// Used for the built-in placeholder font, for testing, and for
/// environments without any usable font file.
#[derive(Debug, Clone)]
pub struct FallbackTextMeasurer {
    /// Advance of a Latin (narrow) character relative to the font size
    pub narrow_ratio: f32,
    /// Advance of a CJK/kana (wide) character relative to the font size
    pub wide_ratio: f32,
}

impl Default for FallbackTextMeasurer {
    fn default() -> Self {
        Self {
            narrow_ratio: 0.6,
            wide_ratio: 1.0,
        }
    }
}

impl FallbackTextMeasurer {
    /// Horizontal advance of one character at `font_size`, snapped to 1/64 px.
    pub fn char_advance(&self, ch: char, font_size: f32) -> f32 {
        let ratio = if ch.is_control() {
            0.0
        } else if is_wide_char(ch) {
            self.wide_ratio
        } else {
            self.narrow_ratio
        };
        (font_size * ratio * 64.0).round() / 64.0
    }
}

impl<F: SizedFont> TextMeasurer<F> for FallbackTextMeasurer {
    fn measure(&self, text: &str, font: &F) -> Result<TextSize, TextMeasureError> {
        let font_size = font.size_px().max(1.0);

        // 空文字は何も描かれないので 0 を返す
        if text.is_empty() {
            return Ok(TextSize::default());
        }

        let width = text
            .chars()
            .map(|ch| self.char_advance(ch, font_size))
            .sum();

        Ok(TextSize {
            width,
            height: font_size,
        })
    }
}
