pub mod fonts;

pub use fonts::{FontError, FontHandle, FontOrigin, FontSource};
