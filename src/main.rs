use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use quote_card::app::{self, EXAMPLE_QUOTES};
use quote_card::engine::config::{LayoutConfig, Rgb};
use quote_card::platform::font::SystemFontLocator;

/// Render each line of a text file as a centered quote image.
#[derive(Debug, Parser)]
#[command(name = "quote-card", version, about)]
struct Cli {
    /// Text file with one quote per line (UTF-8, GBK or Latin-1)
    input: Option<PathBuf>,

    /// Directory the PNG files are written to
    #[arg(short, long, default_value = "quote_images")]
    output: PathBuf,

    /// JSON settings file applied on top of the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file tried before any system font
    #[arg(long, env = "QUOTE_CARD_FONT")]
    font: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    padding: Option<u32>,

    #[arg(long)]
    base_size: Option<u32>,

    #[arg(long)]
    min_size: Option<u32>,

    #[arg(long)]
    max_size: Option<u32>,

    #[arg(long)]
    max_lines: Option<usize>,

    /// Background color as `R,G,B` or `#RRGGBB`
    #[arg(long)]
    background: Option<Rgb>,

    /// Text color as `R,G,B` or `#RRGGBB`
    #[arg(long)]
    text_color: Option<Rgb>,

    /// Number of quotes rendered at the same time
    #[arg(short, long)]
    jobs: Option<NonZeroUsize>,

    /// Render the built-in demonstration quotes instead of reading INPUT
    #[arg(long)]
    example: bool,

    /// Write the effective settings to this file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// 設定ファイル → コマンドライン引数の順に上書きする
    fn layout_config(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => LayoutConfig::load(path)?,
            None => LayoutConfig::default(),
        };

        if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(config.image_width);
            let height = self.height.unwrap_or(config.image_height);
            config = config.with_image_size(width, height);
        }
        if let Some(padding) = self.padding {
            config = config.with_padding(padding);
        }
        if self.base_size.is_some() || self.min_size.is_some() || self.max_size.is_some() {
            let base = self.base_size.unwrap_or(config.base_font_size);
            let min = self.min_size.unwrap_or(config.min_font_size);
            let max = self.max_size.unwrap_or(config.max_font_size);
            config = config.with_font_sizes(base, min, max);
        }
        if let Some(max_lines) = self.max_lines {
            config = config.with_max_lines(max_lines);
        }
        if self.background.is_some() || self.text_color.is_some() {
            let background = self.background.unwrap_or(config.background_color);
            let text = self.text_color.unwrap_or(config.text_color);
            config = config.with_colors(background, text);
        }
        if self.font.is_some() {
            config = config.with_font_path(self.font.clone());
        }

        config.validate().context("invalid layout settings")?;
        Ok(config)
    }

    fn jobs(&self) -> usize {
        self.jobs
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.layout_config()?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if let Some(path) = &cli.save_config {
        config.save(path)?;
        log::info!(target: "Main", "settings saved to {}", path.display());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let locator = SystemFontLocator;
    let report = runtime.block_on(async {
        if cli.example {
            let quotes = app::parse_quotes(EXAMPLE_QUOTES);
            app::render_quotes(quotes, &cli.output, &config, &locator, cli.jobs()).await
        } else if let Some(input) = &cli.input {
            app::run_batch(input, &cli.output, &config, &locator, cli.jobs()).await
        } else {
            bail!("no input file given (pass a path or --example)")
        }
    })?;

    println!("{}", report.status_message());
    Ok(())
}
