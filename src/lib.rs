//! # king-wen-metrics: Transition Metrics over the King Wen Sequence
//!
//! Computes distance, similarity, and surprise between consecutive hexagrams
//! of the King Wen ordering and hands the resulting series to a chart
//! renderer.
//!
//! ## Design Principles
//!
//! 1. **Validated input**: a [`Code`] is always exactly six `0`/`1` lines
//! 2. **Pure engine**: every metric is a function of two codes, nothing else
//! 3. **Column hand-off**: [`MetricSeries`] is the only thing renderers see
//! 4. **Renderer-agnostic**: layout is data, drawing sits behind [`ChartRenderer`]
//!
//! ## Quick Start
//!
//! Drawing the chart needs the `pdf` feature (on by default):
//!
//! ```rust,no_run
//! # #[cfg(feature = "pdf")]
//! # fn example() -> king_wen_metrics::Result<()> {
//! use king_wen_metrics::{analyze_king_wen, render, ChartLayout};
//!
//! let series = analyze_king_wen()?;
//! assert_eq!(series.len(), 63);
//!
//! render::render_to_file(
//!     &render::PdfRenderer::default(),
//!     &series,
//!     &ChartLayout::king_wen(),
//!     render::OUTPUT_FILE_NAME,
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//!
//! | Metric | Function | Range |
//! |--------|----------|-------|
//! | Hamming | [`engine::hamming_distance`] | 0..=6 |
//! | Trigram | [`engine::trigram_distance`] | 0..=6 |
//! | Nuclear | [`engine::nuclear_distance`] | 0..=4 |
//! | Similarity | [`engine::pattern_similarity`] | 0.1..=0.9 |
//! | Surprise | [`engine::surprise`] | ≈0.105..=≈2.303 |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod engine;
pub mod sequence;
pub mod render;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Code, Metric, MetricSeries, TransitionDistances, TransitionMetrics, LINES};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use engine::{
    nuclear_distance, pattern_similarity, pattern_similarity_with, similarity_breakdown,
    surprise, surprise_with, transition_metrics, SimilarityBreakdown, SimilarityParams,
};

// ============================================================================
// Re-exports: Sequence driver
// ============================================================================

pub use sequence::{
    analyze_king_wen, analyze_sequence, analyze_sequence_with, king_wen_sequence, transitions,
    Transition, KING_WEN_TABLE,
};

// ============================================================================
// Re-exports: Rendering
// ============================================================================

pub use render::{ChartLayout, ChartRenderer, Panel, Rgb};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid code length: expected {expected} lines, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Invalid symbol {symbol:?} at position {position}: expected '0' or '1'")]
    InvalidSymbol { position: usize, symbol: char },

    #[error("Surprise undefined for similarity {0}: logarithm needs a positive finite value")]
    LogDomain(f64),

    #[error("Invalid similarity parameters: {0}")]
    InvalidParams(String),

    #[error("Render error: {0}")]
    Render(String),

    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
