//! Text measurement abstraction for wrapping and layout.
//!
//! # Overview
//!
//! This module defines the interface between the layout engine and
//! font-backed text measurement implementations.
//!
//! Backends disagree about what a bounding box is (ink extents,
//! ascent/descent offsets, advance sums). Those differences stay behind
//! [`TextMeasurer`]; callers only see a non-negative width and height.
//!
//! The engine never looks inside a font. It only needs the size a font
//! was loaded at ([`SizedFont`]) and a way to load one at a given size
//! ([`FontProvider`]); everything else is owned by the backend.
//!
//! # Responsibilities
//!
//! - Measure a single line of text in a given font
//! - Sum line heights of a wrapped block with the fixed line spacing
//!
//! # Non-Responsibilities
//!
//! - Choosing fonts or font sizes
//! - Line breaking
//! - Rasterization
//!
//! # Data Flow
//!
//! ```text
//! FontProvider::load(size) → F
//! F + text → TextMeasurer<F> → TextSize
//! ```

use std::fmt;

/// Multiplier applied to every line height when stacking lines.
pub const LINE_SPACING: f32 = 1.2;

/* ============================
 * Font
 * ============================ */

/// A font bound to one size.
pub trait SizedFont {
    /// 1em in pixels
    fn size(&self) -> u32;

    fn size_px(&self) -> f32 {
        self.size() as f32
    }
}

/// Creates fonts of a single face at any requested size.
pub trait FontProvider {
    type Font: SizedFont;
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self, size: u32) -> Result<Self::Font, Self::Error>;
}

/* ============================
 * Measure Result
 * ============================ */

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    /// Logical width in pixels
    pub width: f32,

    /// Logical height in pixels
    pub height: f32,
}

/* ============================
 * Errors
 * ============================ */

#[derive(Debug, Clone)]
pub enum TextMeasureError {
    Internal(String),
}

impl fmt::Display for TextMeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(s) => write!(f, "Internal error: {s}"),
        }
    }
}

impl std::error::Error for TextMeasureError {}

/* ============================
 * Trait
 * ============================ */

pub trait TextMeasurer<F>: Send + Sync {
    /// Measures one line. `text` must not contain line breaks.
    fn measure(&self, text: &str, font: &F) -> Result<TextSize, TextMeasureError>;

    /// Height of a wrapped block: each line contributes `height * LINE_SPACING`.
    fn measure_block(&self, lines: &[String], font: &F) -> Result<f32, TextMeasureError> {
        lines.iter().try_fold(0.0, |total, line| {
            Ok(total + self.measure(line, font)?.height * LINE_SPACING)
        })
    }
}

/* ============================
 * Fallback
 * ============================ */

pub mod fallback;
pub use fallback::FallbackTextMeasurer;
