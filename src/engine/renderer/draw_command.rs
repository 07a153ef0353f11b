use crate::engine::config::Rgb;

/// 装飾枠の色（背景・文字色の設定とは独立）
pub const BORDER_COLOR: Rgb = Rgb(220, 220, 220);
/// 装飾枠の線幅
pub const BORDER_STROKE: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `(x, y)` is the top-left of the line box (ascender line), not the baseline.
    DrawText {
        x: f32,
        y: f32,
        text: String,
        color: Rgb,
    },
    /// Rectangle outline covering `left..=right` × `top..=bottom`;
    /// the stroke grows inward.
    DrawBorder {
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
        stroke: u32,
        color: Rgb,
    },
}
