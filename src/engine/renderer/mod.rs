pub mod compose;
pub mod draw_command;

pub use compose::{border, compose};
pub use draw_command::{BORDER_COLOR, BORDER_STROKE, DrawCommand};
