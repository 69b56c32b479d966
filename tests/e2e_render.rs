//! End-to-end rendering and export: canonical series → PDF / JSON / CSV.

#![cfg(feature = "pdf")]

use lopdf::content::Content;
use lopdf::{Document, Object};

use king_wen_metrics::export::{export_csv, export_json, CSV_HEADER};
use king_wen_metrics::render::{render_to_file, PdfRenderer, OUTPUT_FILE_NAME};
use king_wen_metrics::sequence::analyze_transitions;
use king_wen_metrics::{
    analyze_king_wen, king_wen_sequence, ChartLayout, ChartRenderer, MetricSeries,
    SimilarityParams,
};

// ============================================================================
// Helper: a scratch directory unique to this test process + test name.
// ============================================================================

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "king-wen-metrics-{}-{}",
        std::process::id(),
        name
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Every string shown with `Tj` on the document's single page.
fn shown_text(pdf: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(pdf).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);
    let page_id = *pages.values().next().unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_render_to_file_writes_pdf() {
    let dir = scratch_dir("pdf");
    let path = dir.join(OUTPUT_FILE_NAME);
    let series = analyze_king_wen().unwrap();

    render_to_file(&PdfRenderer::default(), &series, &ChartLayout::king_wen(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    let text = shown_text(&bytes);
    assert!(text.iter().any(|t| t == "Hamming Distances in King Wen Sequence"));
    // x-axis end tick is the last transition index
    assert!(text.iter().any(|t| t == "62"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_render_to_missing_directory_fails() {
    let dir = scratch_dir("missing");
    let path = dir.join("no-such-dir").join(OUTPUT_FILE_NAME);
    let err = render_to_file(
        &PdfRenderer::default(),
        &MetricSeries::default(),
        &ChartLayout::king_wen(),
        &path,
    )
    .unwrap_err();
    assert!(matches!(err, king_wen_metrics::Error::Io(_)));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_renderer_is_object_safe() {
    let renderer: Box<dyn ChartRenderer> = Box::new(PdfRenderer::default());
    let mut buf = Vec::new();
    renderer
        .render(&analyze_king_wen().unwrap(), &ChartLayout::default(), &mut buf)
        .unwrap();
    assert!(!buf.is_empty());
}

#[test]
fn test_rendering_is_deterministic() {
    let series = analyze_king_wen().unwrap();
    let layout = ChartLayout::king_wen();
    let (mut a, mut b) = (Vec::new(), Vec::new());
    PdfRenderer::default().render(&series, &layout, &mut a).unwrap();
    PdfRenderer::default().render(&series, &layout, &mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_json_export_round_trip() {
    let series = analyze_king_wen().unwrap();
    let mut buf = Vec::new();
    export_json(&series, &mut buf).unwrap();
    let back: MetricSeries = serde_json::from_slice(&buf).unwrap();
    assert_eq!(back.hamming_distances, series.hamming_distances);
    assert_eq!(back.trigram_distances, series.trigram_distances);
    assert_eq!(back.nuclear_distances, series.nuclear_distances);
    for (got, want) in back.surprises.iter().zip(&series.surprises) {
        assert!((got - want).abs() < 1e-12);
    }
    for (got, want) in back.pattern_similarities.iter().zip(&series.pattern_similarities) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn test_csv_export_has_one_row_per_transition() {
    let records = analyze_transitions(
        &king_wen_sequence().unwrap(),
        &SimilarityParams::CANONICAL,
    )
    .unwrap();
    let mut buf = Vec::new();
    export_csv(&records, &mut buf).unwrap();
    let csv = String::from_utf8(buf).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 64);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[1].starts_with("0,111111,000000,6,6,4,"));
    assert!(lines[63].starts_with("62,011011,011000,2,2,1,"));
}
