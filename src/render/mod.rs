//! # Rendering Collaborator
//!
//! The contract between the metric pipeline and whatever draws the charts.
//! A renderer receives the computed [`MetricSeries`] and a [`ChartLayout`]
//! describing which columns to plot and how to label them.
//!
//! ## Implementations
//!
//! | Renderer | Feature | Description |
//! |----------|---------|-------------|
//! | `PdfRenderer` | `pdf` (default) | Single-page vector PDF, one panel per metric |
//!
//! ## The King Wen layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Hamming Distances in King Wen Sequence        │  Distance
//! ├──────────────────────────────────────────────┤
//! │ Pattern Similarities in King Wen Sequence     │  Similarity
//! ├──────────────────────────────────────────────┤
//! │ Surprises in King Wen Sequence                │  Surprise
//! └──────────────────────────────────────────────┘
//!                 x: Transition Index
//! ```

#[cfg(feature = "pdf")]
pub mod pdf;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{Metric, MetricSeries};
use crate::Result;

#[cfg(feature = "pdf")]
pub use pdf::PdfRenderer;

/// File name of the chart artifact.
pub const OUTPUT_FILE_NAME: &str = "king_wen_metrics.pdf";

// ============================================================================
// Layout
// ============================================================================

/// 8-bit RGB stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Default first-series blue.
    pub const BLUE: Rgb = Rgb(0x1f, 0x77, 0xb4);
    pub const ORANGE: Rgb = Rgb(0xff, 0xa5, 0x00);
    pub const GREEN: Rgb = Rgb(0x00, 0x80, 0x00);

    /// Components scaled to `[0, 1]`.
    pub fn unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.0) / 255.0,
            f64::from(self.1) / 255.0,
            f64::from(self.2) / 255.0,
        )
    }
}

/// One chart panel: a single metric plotted against transition index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub metric: Metric,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Legend entry for the plotted line.
    pub legend: String,
    pub color: Rgb,
}

impl Panel {
    pub fn new(metric: Metric, title: impl Into<String>) -> Self {
        Self {
            metric,
            title: title.into(),
            x_label: "Transition Index".into(),
            y_label: String::new(),
            legend: String::new(),
            color: Rgb::BLUE,
        }
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = legend.into();
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

/// Figure size plus vertically stacked panels, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width_in: f64,
    pub height_in: f64,
    pub panels: Vec<Panel>,
}

impl ChartLayout {
    /// Hamming / Similarity / Surprise on a 12 × 8 inch page.
    pub fn king_wen() -> Self {
        Self {
            width_in: 12.0,
            height_in: 8.0,
            panels: vec![
                Panel::new(Metric::Hamming, "Hamming Distances in King Wen Sequence")
                    .with_y_label("Distance")
                    .with_legend("Hamming Distance"),
                Panel::new(Metric::Similarity, "Pattern Similarities in King Wen Sequence")
                    .with_y_label("Similarity")
                    .with_legend("Pattern Similarity")
                    .with_color(Rgb::ORANGE),
                Panel::new(Metric::Surprise, "Surprises in King Wen Sequence")
                    .with_y_label("Surprise")
                    .with_legend("Surprise")
                    .with_color(Rgb::GREEN),
            ],
        }
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::king_wen()
    }
}

// ============================================================================
// ChartRenderer Trait
// ============================================================================

/// Draws a [`MetricSeries`] according to a [`ChartLayout`].
pub trait ChartRenderer {
    /// Write the finished artifact to `out`.
    fn render(&self, series: &MetricSeries, layout: &ChartLayout, out: &mut dyn Write) -> Result<()>;
}

/// Render into a newly created file at `path`.
///
/// The file is buffered and flushed before returning; it is closed on every
/// path when the writer drops.
pub fn render_to_file<R>(
    renderer: &R,
    series: &MetricSeries,
    layout: &ChartLayout,
    path: impl AsRef<Path>,
) -> Result<()>
where
    R: ChartRenderer + ?Sized,
{
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    renderer.render(series, layout, &mut out)?;
    out.flush()?;
    tracing::info!(path = %path.display(), panels = layout.panels.len(), "chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_wen_layout_has_three_labelled_panels() {
        let layout = ChartLayout::king_wen();
        let metrics: Vec<_> = layout.panels.iter().map(|p| p.metric).collect();
        assert_eq!(metrics, vec![Metric::Hamming, Metric::Similarity, Metric::Surprise]);
        for panel in &layout.panels {
            assert_eq!(panel.x_label, "Transition Index");
            assert!(!panel.y_label.is_empty());
            assert!(!panel.legend.is_empty());
        }
        assert_eq!(layout.panels[1].color, Rgb::ORANGE);
        assert_eq!(layout.panels[2].color, Rgb::GREEN);
    }

    #[test]
    fn rgb_unit_scaling() {
        assert_eq!(Rgb::BLACK.unit(), (0.0, 0.0, 0.0));
        assert_eq!(Rgb(255, 0, 255).unit(), (1.0, 0.0, 1.0));
    }
}
