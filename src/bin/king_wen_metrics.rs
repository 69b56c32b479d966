//! Compute the King Wen transition metrics and write `king_wen_metrics.pdf`
//! into the working directory.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::process::ExitCode;

use king_wen_metrics::render::{self, PdfRenderer, OUTPUT_FILE_NAME};
use king_wen_metrics::{analyze_king_wen, ChartLayout};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "failed to produce metrics chart");
            ExitCode::FAILURE
        }
    }
}

fn run() -> king_wen_metrics::Result<()> {
    let series = analyze_king_wen()?;
    render::render_to_file(
        &PdfRenderer::default(),
        &series,
        &ChartLayout::king_wen(),
        OUTPUT_FILE_NAME,
    )
}
