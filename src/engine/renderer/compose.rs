//! WrapResult → DrawCommand
//!
//! The block is centered vertically using its measured height, each line
//! is centered horizontally on its own width, and the decorative border is
//! emitted last.

use super::draw_command::{BORDER_COLOR, BORDER_STROKE, DrawCommand};
use crate::engine::bridge::text::{LINE_SPACING, TextMeasureError, TextMeasurer};
use crate::engine::config::LayoutConfig;
use crate::engine::layouter::WrapResult;

pub fn compose<F>(
    wrap: &WrapResult<F>,
    measurer: &dyn TextMeasurer<F>,
    config: &LayoutConfig,
) -> Result<Vec<DrawCommand>, TextMeasureError> {
    let canvas_width = config.image_width as f32;
    let canvas_height = config.image_height as f32;

    let total_height = measurer.measure_block(&wrap.lines, &wrap.font)?;
    let mut y = ((canvas_height - total_height) / 2.0).floor();

    let mut commands = Vec::with_capacity(wrap.lines.len() + 1);
    for line in &wrap.lines {
        let size = measurer.measure(line, &wrap.font)?;
        let x = ((canvas_width - size.width) / 2.0).floor();

        commands.push(DrawCommand::DrawText {
            x,
            y,
            text: line.clone(),
            color: config.text_color,
        });
        y += size.height * LINE_SPACING;
    }

    commands.push(border(config));
    Ok(commands)
}

/// Border inset by the configured padding on every side.
pub fn border(config: &LayoutConfig) -> DrawCommand {
    let padding = config.padding;
    DrawCommand::DrawBorder {
        left: padding,
        top: padding,
        right: config.image_width.saturating_sub(padding),
        bottom: config.image_height.saturating_sub(padding),
        stroke: BORDER_STROKE,
        color: BORDER_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bridge::text::FallbackTextMeasurer;
    use crate::engine::config::Rgb;
    use crate::engine::bridge::text::testing::PlainFont;

    fn wrap_of(lines: &[&str], size: u32) -> WrapResult<PlainFont> {
        WrapResult {
            font: PlainFont(size),
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn single_line_is_centered() {
        let config = LayoutConfig::default();
        let wrap = wrap_of(&["Be yourself; everyone else is already taken."], 40);

        let commands = compose(&wrap, &FallbackTextMeasurer::default(), &config).unwrap();
        assert_eq!(commands.len(), 2);

        // width 44 * 24 = 1056, block height 40 * 1.2 = 48
        match &commands[0] {
            DrawCommand::DrawText { x, y, color, .. } => {
                assert_eq!(*x, 72.0);
                assert_eq!(*y, 376.0);
                assert_eq!(*color, Rgb(50, 50, 50));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn lines_advance_by_spaced_height() {
        let config = LayoutConfig::default();
        let wrap = wrap_of(&["abc", "defgh"], 10);

        let commands = compose(&wrap, &FallbackTextMeasurer::default(), &config).unwrap();
        let positions: Vec<(f32, f32)> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DrawText { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect();

        // block = 2 * 12 = 24 → start (800 - 24) / 2 = 388
        assert_eq!(positions, vec![(591.0, 388.0), (585.0, 400.0)]);
    }

    #[test]
    fn empty_wrap_draws_only_the_border() {
        let config = LayoutConfig::default();
        let commands = compose(&wrap_of(&[], 40), &FallbackTextMeasurer::default(), &config).unwrap();

        assert_eq!(
            commands,
            vec![DrawCommand::DrawBorder {
                left: 50,
                top: 50,
                right: 1150,
                bottom: 750,
                stroke: 2,
                color: Rgb(220, 220, 220),
            }]
        );
    }

    #[test]
    fn border_ignores_configured_colors() {
        let config = LayoutConfig::default().with_colors(Rgb(0, 0, 0), Rgb(255, 0, 0));
        assert!(matches!(
            border(&config),
            DrawCommand::DrawBorder { color: Rgb(220, 220, 220), stroke: 2, .. }
        ));
    }
}
