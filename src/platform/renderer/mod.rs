pub mod canvas;
pub mod glyph;
pub mod text_measurer;

pub use canvas::QuoteCanvas;
pub use text_measurer::PlatformTextMeasurer;
