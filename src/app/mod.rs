pub mod batch;

pub use batch::{
    BatchError, BatchReport, EXAMPLE_QUOTES, Quote, QuoteFailure, RenderError, ScriptFonts,
    output_file_name, parse_quotes, render_quote, render_quotes, run_batch, save_quote,
};
