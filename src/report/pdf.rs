//! PDF drawing for a computed [`TableLayout`].

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

use super::layout::{Column, PlacedRow, ReportDocument, TableLayout};
use super::{RenderError, ReportOptions};

const PT_TO_MM: f32 = 25.4 / 72.0;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;
const CELL_PADDING_MM: f32 = 2.0;
const BORDER_THICKNESS: f32 = 0.3;
const MARK_THICKNESS: f32 = 0.8;
const FOOTER_FONT_PT: f32 = 8.0;

const HEADER_LABELS: [&str; 3] = ["Checklist Item", "YES", "NO"];

/// Approximate rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    text.chars().count() as f32 * font_size_pt * AVG_GLYPH_WIDTH * PT_TO_MM
}

fn pdf_err<E: std::fmt::Debug>(e: E) -> RenderError {
    RenderError::Pdf(format!("{e:?}"))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Page writer that flips top-down layout coordinates into PDF space.
struct PageCanvas<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
    options: &'a ReportOptions,
}

impl PageCanvas<'_> {
    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(Mm(x), Mm(self.options.page_height - y))
    }

    fn rect(&self, x: f32, top: f32, width: f32, height: f32) {
        let points = vec![
            (self.point(x, top), false),
            (self.point(x + width, top), false),
            (self.point(x + width, top + height), false),
            (self.point(x, top + height), false),
        ];
        self.layer.add_line(Line {
            points,
            is_closed: true,
        });
    }

    /// Draw text with its vertical middle at `center_y`.
    fn text(&self, text: &str, x: f32, center_y: f32, size_pt: f32, bold: bool) {
        let font = if bold { &self.fonts.bold } else { &self.fonts.regular };
        let baseline = center_y + size_pt * PT_TO_MM * 0.35;
        self.layer.use_text(
            text,
            size_pt,
            Mm(x),
            Mm(self.options.page_height - baseline),
            font,
        );
    }

    fn centered_text(&self, text: &str, column: Column, center_y: f32, size_pt: f32, bold: bool) {
        let width = text_width_mm(text, size_pt);
        let x = (column.center() - width / 2.0).max(column.x);
        self.text(text, x, center_y, size_pt, bold);
    }

    /// Check mark centred at `(cx, cy)`.
    fn check_mark(&self, cx: f32, cy: f32, size: f32) {
        let half = size / 2.0;
        let points = vec![
            (self.point(cx - half, cy), false),
            (self.point(cx - half / 3.0, cy + half * 0.8), false),
            (self.point(cx + half, cy - half * 0.8), false),
        ];
        self.layer.set_outline_thickness(MARK_THICKNESS);
        self.layer.add_line(Line {
            points,
            is_closed: false,
        });
        self.layer.set_outline_thickness(BORDER_THICKNESS);
    }

    fn header_row(&self, layout: &TableLayout, top: f32) {
        let h = layout.line_height;
        let cols = layout.columns;
        let center_y = top + h / 2.0;
        let size = self.options.font_size_pt;

        for col in [cols.item, cols.yes, cols.no] {
            self.rect(col.x, top, col.width, h);
        }
        self.text(HEADER_LABELS[0], cols.item.x + CELL_PADDING_MM, center_y, size, true);
        self.centered_text(HEADER_LABELS[1], cols.yes, center_y, size, true);
        self.centered_text(HEADER_LABELS[2], cols.no, center_y, size, true);
    }

    fn body_row(&self, layout: &TableLayout, document: &ReportDocument, placed: &PlacedRow) {
        let row = &document.rows[placed.index];
        let cols = layout.columns;
        let h = layout.line_height;

        for col in [cols.item, cols.yes, cols.no] {
            self.rect(col.x, placed.top, col.width, placed.height);
        }
        let lines = row.lines.iter().skip(placed.first_line).take(placed.line_count);
        for (i, line) in lines.enumerate() {
            let center_y = placed.top + h * i as f32 + h / 2.0;
            self.text(line, cols.item.x + CELL_PADDING_MM, center_y, self.options.font_size_pt, false);
        }

        if placed.carries_mark() {
            let mark_col = cols.mark(row.answer);
            self.check_mark(mark_col.center(), placed.center_y(), h * 0.5);
        }
    }

    fn footer(&self, page_number: usize, page_count: usize) {
        let text = format!(
            "Generated {} | Page {page_number} of {page_count}",
            self.options.generated_at.format("%Y-%m-%d %H:%M")
        );
        let center_y = self.options.page_height - self.options.margin - super::layout::FOOTER_BAND_MM / 2.0;
        let width = text_width_mm(&text, FOOTER_FONT_PT);
        let x = self.options.page_width - self.options.margin - width;
        self.text(&text, x, center_y, FOOTER_FONT_PT, false);
    }
}

/// Draw every page of `layout` and return the serialized PDF.
pub fn write_pdf(
    document: &ReportDocument,
    layout: &TableLayout,
    options: &ReportOptions,
) -> Result<Vec<u8>, RenderError> {
    let page_w = Mm(options.page_width);
    let page_h = Mm(options.page_height);

    let (doc, first_page, first_layer) = PdfDocument::new(document.title.as_str(), page_w, page_h, "Page 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
    };

    let page_count = layout.pages.len();
    for (i, page) in layout.pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(page_w, page_h, format!("Page {}", i + 1));
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        layer.set_outline_thickness(BORDER_THICKNESS);

        let canvas = PageCanvas {
            layer,
            fonts: &fonts,
            options,
        };

        if let Some(title_top) = page.title_top {
            canvas.centered_text(
                &document.title,
                layout.title,
                title_top + layout.line_height / 2.0,
                options.font_size_pt,
                true,
            );
        }
        canvas.header_row(layout, page.header_top);
        for placed in &page.rows {
            canvas.body_row(layout, document, placed);
        }
        canvas.footer(i + 1, page_count);
    }

    doc.save_to_bytes().map_err(pdf_err)
}
