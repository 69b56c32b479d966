//! Single-page vector PDF renderer.
//!
//! Builds the chart as a `lopdf` document: one page, one content stream of
//! drawing operations, and the built-in Helvetica font.
//!
//! ```text
//! Catalog → Pages → Page ─┬─ Contents (panels)
//!                         └─ Resources /Font /F1 → Helvetica
//! ```

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::{ChartLayout, ChartRenderer, Panel, Rgb};
use crate::model::MetricSeries;
use crate::{Error, Result};

/// Points per inch.
const PT_PER_IN: f64 = 72.0;

// Space reserved around each plot box, in points.
const PAGE_MARGIN: f64 = 24.0;
const TITLE_SPACE: f64 = 20.0;
const X_AXIS_SPACE: f64 = 30.0;
const Y_AXIS_SPACE: f64 = 52.0;

/// Resource name of the page font.
const FONT: &str = "F1";

/// Renders each layout panel as a framed line plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfRenderer {
    /// Stroke width of data lines, in points.
    pub line_width: f64,
    /// Title font size; labels use 80% of it.
    pub font_size: f64,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self { line_width: 1.2, font_size: 11.0 }
    }
}

/// Axis-aligned rectangle in page coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    fn right(&self) -> f64 {
        self.x + self.w
    }

    fn top(&self) -> f64 {
        self.y + self.h
    }
}

// ============================================================================
// Canvas: content-stream operations
// ============================================================================

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

/// Accumulates drawing operations for one content stream.
#[derive(Default)]
struct Canvas {
    ops: Vec<Operation>,
}

impl Canvas {
    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }

    fn stroke_color(&mut self, color: Rgb) {
        let (r, g, b) = color.unit();
        self.op("RG", vec![real(r), real(g), real(b)]);
    }

    fn fill_color(&mut self, color: Rgb) {
        let (r, g, b) = color.unit();
        self.op("rg", vec![real(r), real(g), real(b)]);
    }

    fn line_width(&mut self, w: f64) {
        self.op("w", vec![real(w)]);
    }

    fn rect(&mut self, r: Rect) {
        self.op("re", vec![real(r.x), real(r.y), real(r.w), real(r.h)]);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.op("m", vec![real(x), real(y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.op("l", vec![real(x), real(y)]);
    }

    fn stroke(&mut self) {
        self.op("S", vec![]);
    }

    fn text(&mut self, size: f64, x: f64, y: f64, s: &str) {
        self.op("BT", vec![]);
        self.op("Tf", vec![Object::Name(FONT.into()), real(size)]);
        self.op("Td", vec![real(x), real(y)]);
        self.op("Tj", vec![Object::string_literal(standard_text(s))]);
        self.op("ET", vec![]);
    }

    /// Text rotated 90° counter-clockwise, baseline running upwards from (x, y).
    fn text_vertical(&mut self, size: f64, x: f64, y: f64, s: &str) {
        self.op("BT", vec![]);
        self.op("Tf", vec![Object::Name(FONT.into()), real(size)]);
        self.op("Tm", vec![real(0.0), real(1.0), real(-1.0), real(0.0), real(x), real(y)]);
        self.op("Tj", vec![Object::string_literal(standard_text(s))]);
        self.op("ET", vec![]);
    }
}

// ============================================================================
// Renderer
// ============================================================================

impl ChartRenderer for PdfRenderer {
    fn render(&self, series: &MetricSeries, layout: &ChartLayout, out: &mut dyn Write) -> Result<()> {
        if layout.panels.is_empty() {
            return Err(Error::Render("layout has no panels".into()));
        }
        if !(layout.width_in > 0.0 && layout.height_in > 0.0) {
            return Err(Error::Render(format!(
                "page size must be positive, got {} x {} in",
                layout.width_in, layout.height_in
            )));
        }

        let width = layout.width_in * PT_PER_IN;
        let height = layout.height_in * PT_PER_IN;
        let slot_h = (height - 2.0 * PAGE_MARGIN) / layout.panels.len() as f64;

        let mut canvas = Canvas::default();
        for (slot, panel) in layout.panels.iter().enumerate() {
            // Panels stack top to bottom
            let slot_top = height - PAGE_MARGIN - slot as f64 * slot_h;
            let plot = Rect {
                x: PAGE_MARGIN + Y_AXIS_SPACE,
                y: slot_top - slot_h + X_AXIS_SPACE,
                w: width - 2.0 * PAGE_MARGIN - Y_AXIS_SPACE,
                h: slot_h - X_AXIS_SPACE - TITLE_SPACE,
            };
            self.draw_panel(&mut canvas, panel, &series.values(panel.metric), plot);
        }

        let mut doc = build_document(width, height, canvas.ops)?;
        let mut sink = out;
        doc.save_to(&mut sink)?;
        Ok(())
    }
}

impl PdfRenderer {
    fn draw_panel(&self, canvas: &mut Canvas, panel: &Panel, values: &[f64], plot: Rect) {
        let label_size = self.font_size * 0.8;

        // Frame
        canvas.stroke_color(Rgb::BLACK);
        canvas.fill_color(Rgb::BLACK);
        canvas.line_width(0.6);
        canvas.rect(plot);
        canvas.stroke();

        // Title, centered above the frame
        let title_x = plot.x + (plot.w - text_width(&panel.title, self.font_size)) / 2.0;
        canvas.text(self.font_size, title_x, plot.top() + 6.0, &panel.title);

        // Axis labels
        let x_label_x = plot.x + (plot.w - text_width(&panel.x_label, label_size)) / 2.0;
        canvas.text(label_size, x_label_x, plot.y - X_AXIS_SPACE + 4.0, &panel.x_label);
        let y_label_y = plot.y + (plot.h - text_width(&panel.y_label, label_size)) / 2.0;
        canvas.text_vertical(label_size, PAGE_MARGIN + label_size, y_label_y, &panel.y_label);

        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return;
        }

        // Value range with 5% headroom; flat series get a unit band
        let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (lo_axis, hi_axis) = if hi - lo < f64::EPSILON {
            (lo - 0.5, hi + 0.5)
        } else {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        };
        let to_y = |v: f64| plot.y + (v - lo_axis) / (hi_axis - lo_axis) * plot.h;
        let last = values.len().saturating_sub(1);
        let to_x = |i: usize| {
            if last == 0 {
                plot.x + plot.w / 2.0
            } else {
                plot.x + i as f64 / last as f64 * plot.w
            }
        };

        // Tick labels: data min/max on y, first/last index on x
        for v in [lo, hi] {
            let label = format_tick(v);
            let x = plot.x - 4.0 - text_width(&label, label_size);
            canvas.text(label_size, x, to_y(v) - label_size / 3.0, &label);
        }
        canvas.text(label_size, to_x(0) - 2.0, plot.y - label_size - 2.0, "0");
        if last > 0 {
            let label = last.to_string();
            let x = to_x(last) - text_width(&label, label_size) / 2.0;
            canvas.text(label_size, x, plot.y - label_size - 2.0, &label);
        }

        // Data line; non-finite points break the path
        canvas.stroke_color(panel.color);
        canvas.line_width(self.line_width);
        canvas.op("J", vec![1.into()]);
        canvas.op("j", vec![1.into()]);
        let mut pen_down = false;
        for (i, &v) in values.iter().enumerate() {
            if !v.is_finite() {
                if pen_down {
                    canvas.stroke();
                }
                pen_down = false;
                continue;
            }
            if pen_down {
                canvas.line_to(to_x(i), to_y(v));
            } else {
                canvas.move_to(to_x(i), to_y(v));
            }
            pen_down = true;
        }
        if pen_down {
            canvas.stroke();
        }
        if finite.len() == 1 {
            // A lone point has no segment to stroke
            let (i, v) = values
                .iter()
                .copied()
                .enumerate()
                .find(|(_, v)| v.is_finite())
                .unwrap_or((0, lo));
            let d = self.line_width * 1.5;
            canvas.fill_color(panel.color);
            canvas.rect(Rect { x: to_x(i) - d / 2.0, y: to_y(v) - d / 2.0, w: d, h: d });
            canvas.op("f", vec![]);
        }

        if !panel.legend.is_empty() {
            self.draw_legend(canvas, panel, plot, label_size);
        }
    }

    fn draw_legend(&self, canvas: &mut Canvas, panel: &Panel, plot: Rect, size: f64) {
        let swatch = 18.0;
        let frame = Rect {
            x: 0.0,
            y: 0.0,
            w: swatch + 12.0 + text_width(&panel.legend, size),
            h: size + 8.0,
        };
        let frame = Rect {
            x: plot.right() - frame.w - 6.0,
            y: plot.top() - frame.h - 6.0,
            ..frame
        };

        canvas.fill_color(Rgb(255, 255, 255));
        canvas.stroke_color(Rgb::BLACK);
        canvas.line_width(0.4);
        canvas.rect(frame);
        canvas.op("B", vec![]);

        let mid = frame.y + frame.h / 2.0;
        canvas.stroke_color(panel.color);
        canvas.line_width(self.line_width);
        canvas.move_to(frame.x + 4.0, mid);
        canvas.line_to(frame.x + 4.0 + swatch, mid);
        canvas.stroke();

        canvas.fill_color(Rgb::BLACK);
        canvas.text(size, frame.x + swatch + 8.0, mid - size / 3.0, &panel.legend);
    }
}

// ============================================================================
// Document assembly
// ============================================================================

fn build_document(width: f64, height: f64, ops: Vec<Operation>) -> Result<Document> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT => font_id,
        },
    });

    let content = Content { operations: ops };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), real(width), real(height)],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

// ============================================================================
// Text helpers
// ============================================================================

/// Rough Helvetica advance width; good enough for centering labels.
fn text_width(s: &str, size: f64) -> f64 {
    s.chars().count() as f64 * size * 0.52
}

/// The standard fonts have no mapping for non-ASCII without an encoding
/// dictionary; those characters become `?`.
fn standard_text(s: &str) -> String {
    s.chars()
        .map(|ch| if (' '..='~').contains(&ch) { ch } else { '?' })
        .collect()
}

fn format_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
