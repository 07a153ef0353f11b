//! Script detection and line breaking for quote text.

pub mod script;
pub mod wrap;

pub use script::{Script, has_wide_script, is_wide_char};
pub use wrap::{join_lines, wrap};
