//! Font-size search.
//!
//! Candidates start at the base size (clamped to the maximum) and shrink
//! by [`FONT_SIZE_STEP`] down to the minimum. The first candidate whose
//! wrapped text stays within the line limit and below the height limit
//! wins. Sizes above the base size are never tried.
//!
//! When nothing fits, the text is wrapped at the minimum size anyway and
//! returned even though it overflows: a quote always produces an image.

use thiserror::Error;

use crate::engine::bridge::text::{FontProvider, SizedFont, TextMeasureError, TextMeasurer};
use crate::engine::config::LayoutConfig;
use crate::engine::text::{join_lines, wrap};

pub const FONT_SIZE_STEP: u32 = 2;

type BoxedFontError = Box<dyn std::error::Error + Send + Sync>;

/// The winning font paired with the wrapped lines.
#[derive(Debug)]
pub struct WrapResult<F> {
    pub font: F,
    pub lines: Vec<String>,
}

impl<F: SizedFont> WrapResult<F> {
    pub fn font_size(&self) -> u32 {
        self.font.size()
    }
}

impl<F> WrapResult<F> {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with `'\n'`.
    pub fn text(&self) -> String {
        join_lines(&self.lines)
    }
}

/// Limits a candidate must satisfy, derived from a [`LayoutConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConstraints {
    pub max_width: f32,
    pub max_lines: usize,
    /// Exclusive upper bound for the block height
    pub max_height: f32,
}

impl FitConstraints {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            max_width: config.text_width(),
            max_lines: config.max_lines,
            max_height: config.text_height_limit(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FitError {
    #[error("fallback font size {size} could not be loaded: {source}")]
    Font {
        size: u32,
        #[source]
        source: BoxedFontError,
    },

    #[error("text could not be measured at fallback font size {size}: {source}")]
    Measure {
        size: u32,
        #[source]
        source: TextMeasureError,
    },
}

#[derive(Debug, Error)]
enum CandidateError {
    #[error("{0}")]
    Font(BoxedFontError),
    #[error(transparent)]
    Measure(#[from] TextMeasureError),
}

/// Sizes the search tries, largest first.
pub fn candidate_sizes(config: &LayoutConfig) -> impl Iterator<Item = u32> + use<> {
    let start = config.base_font_size.min(config.max_font_size);
    let min = config.min_font_size;

    std::iter::successors(Some(start), |size| size.checked_sub(FONT_SIZE_STEP))
        .take_while(move |size| *size >= min && *size > 0)
}

pub fn resolve<P: FontProvider>(
    text: &str,
    fonts: &P,
    measurer: &dyn TextMeasurer<P::Font>,
    config: &LayoutConfig,
) -> Result<WrapResult<P::Font>, FitError> {
    let constraints = FitConstraints::from_config(config);

    for size in candidate_sizes(config) {
        match try_candidate(text, fonts, measurer, &constraints, size) {
            Ok(Some(result)) => {
                log::debug!(target: "Fit::Accept", "font size {size} fits in {} line(s)", result.line_count());
                return Ok(result);
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!(target: "Fit::Candidate", "font size {size} rejected: {e}");
            }
        }
    }

    let size = config.min_font_size;
    log::debug!(target: "Fit::Fallback", "no candidate fits; using minimum font size {size}");

    let font = fonts.load(size).map_err(|e| FitError::Font {
        size,
        source: Box::new(e),
    })?;
    let lines = wrap(text, &font, constraints.max_width, measurer)
        .map_err(|source| FitError::Measure { size, source })?;

    Ok(WrapResult { font, lines })
}

fn try_candidate<P: FontProvider>(
    text: &str,
    fonts: &P,
    measurer: &dyn TextMeasurer<P::Font>,
    constraints: &FitConstraints,
    size: u32,
) -> Result<Option<WrapResult<P::Font>>, CandidateError> {
    let font = fonts
        .load(size)
        .map_err(|e| CandidateError::Font(Box::new(e)))?;
    let lines = wrap(text, &font, constraints.max_width, measurer)?;

    if lines.len() > constraints.max_lines {
        log::debug!(target: "Fit::Candidate", "font size {size}: {} lines > {}", lines.len(), constraints.max_lines);
        return Ok(None);
    }

    let height = measurer.measure_block(&lines, &font)?;
    if height >= constraints.max_height {
        log::debug!(target: "Fit::Candidate", "font size {size}: height {height} >= {}", constraints.max_height);
        return Ok(None);
    }

    Ok(Some(WrapResult { font, lines }))
}
