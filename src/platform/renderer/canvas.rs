//! DrawCommand を RGB ラスタ画像に描画する

use std::path::Path;

use ab_glyph::{Font as _, ScaleFont as _, point};
use image::{ImageFormat, RgbImage};

use crate::engine::bridge::text::{FallbackTextMeasurer, SizedFont as _};
use crate::engine::config::{LayoutConfig, Rgb};
use crate::engine::renderer::DrawCommand;
use crate::platform::renderer::glyph::FontHandle;

/// 1枚分のキャンバス
///
/// 途中で失敗してもロールバックはしない。失敗したキャンバスは破棄する前提。
pub struct QuoteCanvas {
    image: RgbImage,
    placeholder: FallbackTextMeasurer,
}

impl QuoteCanvas {
    /// 背景色で塗りつぶしたキャンバスを作る
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, to_pixel(background)),
            placeholder: FallbackTextMeasurer::default(),
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.image_width, config.image_height, config.background_color)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// コマンドを順番に描画する
    pub fn execute(&mut self, commands: &[DrawCommand], font: &FontHandle) {
        for command in commands {
            match command {
                DrawCommand::DrawText { x, y, text, color } => {
                    self.draw_text(*x, *y, text, *color, font);
                }
                DrawCommand::DrawBorder {
                    left,
                    top,
                    right,
                    bottom,
                    stroke,
                    color,
                } => {
                    self.draw_border(*left, *top, *right, *bottom, *stroke, *color);
                }
            }
        }
    }

    /// PNG で保存する
    pub fn save_png(&self, path: &Path) -> Result<(), image::ImageError> {
        self.image.save_with_format(path, ImageFormat::Png)
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Rgb, font: &FontHandle) {
        let (Some(face), Some(scale)) = (font.outline_face(), font.px_scale()) else {
            self.draw_placeholder_text(x, y, text, color, font.size_px());
            return;
        };

        let scaled = face.as_scaled(scale);
        // (x, y) は行の上端なので ascent 分下げてベースラインにする
        let baseline = y + scaled.ascent();
        let mut cursor_x = x;

        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            let glyph_id = scaled.glyph_id(ch);
            let advance = scaled.h_advance(glyph_id);
            let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline));

            if let Some(outline) = face.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                outline.draw(|gx, gy, coverage| {
                    self.blend_pixel(
                        bounds.min.x + gx as f32,
                        bounds.min.y + gy as f32,
                        color,
                        coverage,
                    );
                });
            }
            cursor_x += advance;
        }
    }

    /// 組み込みフォント用：文字ごとに中抜きの四角（豆腐）を描く
    fn draw_placeholder_text(&mut self, x: f32, y: f32, text: &str, color: Rgb, font_size: f32) {
        let mut cursor_x = x;
        let inset = (font_size * 0.1).max(1.0);

        for ch in text.chars() {
            let advance = self.placeholder.char_advance(ch, font_size);
            if !ch.is_whitespace() && advance > inset * 2.0 {
                let left = (cursor_x + inset).floor() as i64;
                let right = (cursor_x + advance - inset).floor() as i64;
                let top = (y + inset).floor() as i64;
                let bottom = (y + font_size - inset).floor() as i64;
                self.stroke_rect(left, top, right, bottom, color);
            }
            cursor_x += advance;
        }
    }

    fn draw_border(&mut self, left: u32, top: u32, right: u32, bottom: u32, stroke: u32, color: Rgb) {
        let (mut l, mut t, mut r, mut b) = (
            i64::from(left),
            i64::from(top),
            i64::from(right),
            i64::from(bottom),
        );

        for _ in 0..stroke {
            if l > r || t > b {
                break;
            }
            self.stroke_rect(l, t, r, b, color);
            l += 1;
            t += 1;
            r -= 1;
            b -= 1;
        }
    }

    /// `left..=right` × `top..=bottom` の外周1pxを描く
    fn stroke_rect(&mut self, left: i64, top: i64, right: i64, bottom: i64, color: Rgb) {
        for x in left..=right {
            self.put_pixel(x, top, color);
            self.put_pixel(x, bottom, color);
        }
        for y in top..=bottom {
            self.put_pixel(left, y, color);
            self.put_pixel(right, y, color);
        }
    }

    fn put_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, to_pixel(color));
    }

    fn blend_pixel(&mut self, x: f32, y: f32, color: Rgb, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        let (xi, yi) = (x.floor() as i64, y.floor() as i64);
        if xi < 0 || yi < 0 || xi >= i64::from(self.width()) || yi >= i64::from(self.height()) {
            return;
        }

        let alpha = coverage.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(xi as u32, yi as u32);
        for (dst, src) in pixel.0.iter_mut().zip(color.channels()) {
            *dst = (f32::from(src) * alpha + f32::from(*dst) * (1.0 - alpha)).round() as u8;
        }
    }
}

fn to_pixel(color: Rgb) -> image::Rgb<u8> {
    image::Rgb(color.channels())
}
