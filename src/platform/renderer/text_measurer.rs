use crate::engine::bridge::text::{
    FallbackTextMeasurer, SizedFont, TextMeasureError, TextMeasurer, TextSize,
};
use crate::platform::renderer::glyph::FontHandle;
use std::collections::HashMap;

/// テキスト計測のプラットフォーム側実装
///
/// 幅はグリフの advance の合計、高さはインクの上端から下端まで
/// （ベースラインより下に出る部分も含む）。
/// グリフを持たない組み込みフォントはヒューリスティックで計測する。
#[derive(Debug, Default)]
pub struct PlatformTextMeasurer {
    fallback: FallbackTextMeasurer,
}

impl PlatformTextMeasurer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextMeasurer<FontHandle> for PlatformTextMeasurer {
    fn measure(&self, text: &str, font: &FontHandle) -> Result<TextSize, TextMeasureError> {
        let Some(face) = font.metrics_face() else {
            return self.fallback.measure(text, font);
        };

        let font_size = font.size_px();

        // 空文字は高さも 0
        if text.is_empty() {
            return Ok(TextSize::default());
        }

        // 文字メトリクスcache
        let mut metrics_cache: HashMap<char, fontdue::Metrics> = HashMap::new();
        let mut metrics_of = |ch: char| *metrics_cache.entry(ch).or_insert_with(|| face.metrics(ch, font_size));

        let space_advance = metrics_of(' ').advance_width;

        let mut width: f32 = 0.0;
        let mut ink_top = f32::MIN;
        let mut ink_bottom = f32::MAX;

        for ch in text.chars() {
            if ch == '\t' {
                // タブはスペース4個分で扱う
                width += space_advance * 4.0;
                continue;
            }
            if ch.is_control() {
                continue;
            }

            let m = metrics_of(ch);
            width += m.advance_width;

            if m.height > 0 {
                ink_bottom = ink_bottom.min(m.ymin as f32);
                ink_top = ink_top.max(m.ymin as f32 + m.height as f32);
            }
        }

        let height = if ink_top > ink_bottom {
            ink_top - ink_bottom
        } else {
            0.0
        };

        if !width.is_finite() || !height.is_finite() {
            return Err(TextMeasureError::Internal(format!(
                "non-finite extent for {:?} in {}",
                text,
                font.origin()
            )));
        }

        Ok(TextSize {
            width: width.max(0.0),
            height,
        })
    }
}
