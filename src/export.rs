//! Series export: serialize computed metrics for other tools.
//!
//! Two formats:
//!
//! ```text
//! MetricSeries → export_json() → { "hamming_distances": [...], ... }
//! [TransitionMetrics] → export_csv() → index,from,to,hamming,... rows
//! ```

use std::io::Write;

use crate::model::{MetricSeries, TransitionMetrics};
use crate::Result;

/// Header row written by [`export_csv`].
pub const CSV_HEADER: &str = "index,from,to,hamming,trigram,nuclear,similarity,surprise";

/// Export the five series as pretty-printed JSON.
///
/// Keys are the column names from [`crate::Metric::name`].
pub fn export_json(series: &MetricSeries, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, series)?;
    writeln!(writer)?;
    Ok(())
}

/// Export per-transition records as CSV, one row per transition.
///
/// Codes are written in their six-character form; floats use full
/// round-trip precision.
pub fn export_csv(records: &[TransitionMetrics], writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for m in records {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{}",
            m.index, m.from, m.to, m.hamming, m.trigram, m.nuclear, m.similarity, m.surprise,
        )?;
    }
    Ok(())
}
