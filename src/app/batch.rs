//! Batch driver: one input text in, one PNG per quote out.
//!
//! Each quote gets the font matching its own script, so its image does not
//! depend on the rest of the batch. A font is parsed at most once per
//! script and shared read-only between workers. Every quote is rendered on
//! a blocking worker with its own config snapshot, so a failing quote only
//! affects its own image.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use image::RgbImage;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::engine::bridge::text::{TextMeasureError, TextMeasurer};
use crate::engine::config::LayoutConfig;
use crate::engine::layouter::{FitError, resolve};
use crate::engine::renderer::compose;
use crate::engine::text::Script;
use crate::platform::font::{FontLocator, resolve_script_font};
use crate::platform::io;
use crate::platform::renderer::glyph::{FontHandle, FontSource};
use crate::platform::renderer::{PlatformTextMeasurer, QuoteCanvas};

/// Quotes offered by `--example`.
pub const EXAMPLE_QUOTES: &str = "人生は、大いなる戦場である
道可道，非常道
Be yourself; everyone else is already taken.
三人行，必有我师焉
天将降大任于是人也，必先苦其心志
The journey of a thousand miles begins with one step";

/// One trimmed, non-empty input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// 0-based position among the parsed quotes
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("no quotes found in input")]
    NoQuotes,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Fit(#[from] FitError),

    #[error("layout failed: {0}")]
    Measure(#[from] TextMeasureError),

    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone)]
pub struct QuoteFailure {
    pub index: usize,
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: Vec<QuoteFailure>,
    pub output_dir: PathBuf,
}

impl BatchReport {
    pub fn status_message(&self) -> String {
        let mut message = format!(
            "generated {} of {} image(s) in {}",
            self.succeeded,
            self.total,
            self.output_dir.display()
        );
        if !self.failed.is_empty() {
            let names: Vec<&str> = self.failed.iter().map(|f| f.file_name.as_str()).collect();
            message.push_str(&format!(" ({} failed: {})", self.failed.len(), names.join(", ")));
        }
        message
    }
}

pub fn parse_quotes(content: &str) -> Vec<Quote> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, text)| Quote {
            index,
            text: text.to_string(),
        })
        .collect()
}

/// `quote_001.png` for index 0.
pub fn output_file_name(index: usize) -> String {
    format!("quote_{:03}.png", index + 1)
}

/// Fonts resolved per script, each at most once.
#[derive(Debug, Default, Clone)]
pub struct ScriptFonts {
    fonts: HashMap<Script, FontSource>,
}

impl ScriptFonts {
    /// Resolves a font for every script that occurs among `quotes`.
    pub fn resolve(quotes: &[Quote], custom: Option<&Path>, locator: &dyn FontLocator) -> Self {
        let mut fonts = HashMap::new();
        for quote in quotes {
            fonts
                .entry(Script::detect(&quote.text))
                .or_insert_with_key(|script| resolve_script_font(custom, *script, locator));
        }
        Self { fonts }
    }

    /// Font for `text`; the built-in font if its script was never resolved.
    pub fn for_text(&self, text: &str) -> FontSource {
        self.fonts
            .get(&Script::detect(text))
            .cloned()
            .unwrap_or_else(FontSource::builtin)
    }
}

/// Fits, lays out and rasterizes one quote.
pub fn render_quote(
    text: &str,
    source: &FontSource,
    measurer: &dyn TextMeasurer<FontHandle>,
    config: &LayoutConfig,
) -> Result<RgbImage, RenderError> {
    Ok(render_canvas(text, source, measurer, config)?.into_image())
}

/// Renders one quote and writes it to `path` as PNG.
pub fn save_quote(
    text: &str,
    path: &Path,
    source: &FontSource,
    measurer: &dyn TextMeasurer<FontHandle>,
    config: &LayoutConfig,
) -> Result<(), RenderError> {
    let canvas = render_canvas(text, source, measurer, config)?;
    canvas.save_png(path).map_err(|source| RenderError::Save {
        path: path.to_path_buf(),
        source,
    })
}

fn render_canvas(
    text: &str,
    source: &FontSource,
    measurer: &dyn TextMeasurer<FontHandle>,
    config: &LayoutConfig,
) -> Result<QuoteCanvas, RenderError> {
    let wrap = resolve(text, source, measurer, config)?;
    log::debug!(
        target: "Batch::Render",
        "font size {} with {} line(s)",
        wrap.font_size(),
        wrap.line_count()
    );

    let commands = compose(&wrap, measurer, config)?;
    let mut canvas = QuoteCanvas::from_config(config);
    canvas.execute(&commands, &wrap.font);
    Ok(canvas)
}

/// Reads `input`, splits it into quotes and renders them into `output_dir`.
pub async fn run_batch(
    input: &Path,
    output_dir: &Path,
    config: &LayoutConfig,
    locator: &dyn FontLocator,
    jobs: usize,
) -> anyhow::Result<BatchReport> {
    if !input.is_file() {
        return Err(BatchError::InputNotFound(input.to_path_buf()).into());
    }

    let content = io::read_input(input).await?;
    render_quotes(parse_quotes(&content), output_dir, config, locator, jobs).await
}

/// Renders already-parsed quotes with at most `jobs` workers at a time.
pub async fn render_quotes(
    quotes: Vec<Quote>,
    output_dir: &Path,
    config: &LayoutConfig,
    locator: &dyn FontLocator,
    jobs: usize,
) -> anyhow::Result<BatchReport> {
    if quotes.is_empty() {
        return Err(BatchError::NoQuotes.into());
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let fonts = ScriptFonts::resolve(&quotes, config.font_path.as_deref(), locator);

    let total = quotes.len();
    let config = Arc::new(config.clone());
    let measurer = Arc::new(PlatformTextMeasurer::new());
    let permits = Arc::new(Semaphore::new(jobs.max(1)));

    let mut tasks = Vec::with_capacity(total);
    for quote in quotes {
        let permit = permits.clone().acquire_owned().await?;
        let file_name = output_file_name(quote.index);
        let path = output_dir.join(&file_name);
        let source = fonts.for_text(&quote.text);
        let (config, measurer) = (config.clone(), measurer.clone());

        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let preview: String = quote.text.chars().take(30).collect();
            log::info!(target: "Batch::Quote", "processing {}/{}: {preview}", quote.index + 1, total);
            save_quote(&quote.text, &path, &source, measurer.as_ref(), &config)
        });
        tasks.push((quote.index, file_name, handle));
    }

    let mut succeeded = 0;
    let mut failed = Vec::new();
    for (index, file_name, handle) in tasks {
        let reason = match handle.await {
            Ok(Ok(())) => {
                succeeded += 1;
                continue;
            }
            Ok(Err(e)) => e.to_string(),
            Err(e) => format!("worker panicked: {e}"),
        };
        log::error!(target: "Batch::Quote", "quote {} failed: {reason}", index + 1);
        failed.push(QuoteFailure {
            index,
            file_name,
            reason,
        });
    }

    let report = BatchReport {
        total,
        succeeded,
        failed,
        output_dir: output_dir.to_path_buf(),
    };
    log::info!(target: "Batch", "{}", report.status_message());
    Ok(report)
}
