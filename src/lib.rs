//! Renders one bordered image per quote: the font size is searched so the
//! wrapped text fits the canvas, then the block is centered and rasterized.

pub mod app;
pub mod engine;
pub mod platform;
