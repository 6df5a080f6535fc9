//! Extended element implementations built on top of `genpdf` primitives.
//!
//! This module adds the pieces the upstream crate does not ship with: exact
//! millimetre spacers, ruled divider lines, fixed-box image scaling, and a
//! table with a colored header band and striped data rows.

use image::GenericImageView;

use genpdf::elements::{CellDecorator, Image, Paragraph, TableLayout};
use genpdf::error::{Context as _, Error};
use genpdf::style::{Color, Style};
use genpdf::{render, Alignment, Element, Margins, Mm, Position, RenderResult, Scale, Size};

use crate::config::Palette;
use crate::model::TableSpec;
use crate::styles::{StyleId, StyleSet};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

/// Vertical distance between the strokes used to emulate filled regions.
/// Strokes are about 0.35 mm wide, so this spacing leaves no gaps.
const FILL_STEP_MM: f64 = 0.3;

const CELL_PADDING_VERTICAL_MM: f64 = 1.8;
const CELL_PADDING_HORIZONTAL_MM: f64 = 2.5;

fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// Covers the top `height` of `area` with horizontal strokes in `color`.
///
/// `genpdf` only exposes stroked lines, so solid regions are drawn as a
/// dense band of full-width strokes.
fn fill_band(mut area: render::Area<'_>, height: Mm, color: Color) {
    let width = area.size().width;
    let mut line_style = Style::new();
    line_style = line_style.with_color(color);
    let step = mm_from_f64(FILL_STEP_MM);

    let mut y = Mm::default();
    while y < height {
        area.draw_line(
            vec![Position::new(0, y), Position::new(width, y)],
            line_style,
        );
        y += step;
    }
    area.draw_line(
        vec![Position::new(0, height), Position::new(width, height)],
        line_style,
    );
}

/// A vertical gap with an exact height in millimetres.
///
/// Unlike [`genpdf::elements::Break`], the gap is independent of the current
/// font size. A gap that does not fit at the bottom of a page is clamped
/// instead of spilling onto the next one.
pub struct VerticalGap {
    height: Mm,
}

impl VerticalGap {
    /// Creates a gap of `height_mm` millimetres.
    pub fn new(height_mm: f64) -> Self {
        Self {
            height: mm_from_f64(height_mm),
        }
    }
}

impl Element for VerticalGap {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };
        result.size = Size::new(0, height);
        Ok(result)
    }
}

/// A horizontal ruled line spanning the available width.
pub struct RuledLine {
    color: Color,
    thickness: Mm,
}

impl RuledLine {
    /// Creates a rule with the given color and thickness in millimetres.
    pub fn new(color: Color, thickness_mm: f64) -> Self {
        Self {
            color,
            thickness: mm_from_f64(thickness_mm),
        }
    }
}

impl Element for RuledLine {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.thickness > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        fill_band(area, self.thickness, self.color);
        result.size = Size::new(width, self.thickness);
        Ok(result)
    }
}

/// Scales encoded image bytes into a fixed box of `width_mm` x `height_mm`.
///
/// The horizontal and vertical scale factors are computed independently, so
/// the aspect ratio is not preserved: every screenshot occupies the same
/// region of the page.
pub fn fixed_box_image(bytes: &[u8], width_mm: f64, height_mm: f64) -> Result<Image, Error> {
    let dynamic =
        image::load_from_memory(bytes).context("Failed to decode embedded image bytes")?;
    let (px_width, px_height) = dynamic.dimensions();
    let natural_width = MM_PER_INCH * f64::from(px_width) / DEFAULT_IMAGE_DPI;
    let natural_height = MM_PER_INCH * f64::from(px_height) / DEFAULT_IMAGE_DPI;

    let mut image = Image::from_dynamic_image(dynamic)?;
    if natural_width > f64::EPSILON && natural_height > f64::EPSILON {
        image.set_scale(Scale::new(
            width_mm / natural_width,
            height_mm / natural_height,
        ));
    }
    image.set_alignment(Alignment::Center);
    Ok(image)
}

/// Cell decorator that paints the header band and the alternating data-row
/// shading. Decorators run after the cell content, so this decorator only
/// makes sense on the sacrificial first pass of [`StripedTable`].
struct BandFill {
    header_bg: Color,
    stripe: Color,
}

impl CellDecorator for BandFill {
    fn decorate_cell(
        &mut self,
        _column: usize,
        row: usize,
        _has_more: bool,
        area: render::Area<'_>,
        _style: Style,
    ) {
        let row_height = area.size().height;
        let fill = if row == 0 {
            Some(self.header_bg)
        } else if row >= 2 && row % 2 == 0 {
            Some(self.stripe)
        } else {
            None
        };
        if let Some(color) = fill {
            fill_band(area, row_height, color);
        }
    }
}

/// Cell decorator that strokes a uniform grid around every cell.
struct GridLines {
    color: Color,
}

impl CellDecorator for GridLines {
    fn decorate_cell(
        &mut self,
        _column: usize,
        _row: usize,
        _has_more: bool,
        area: render::Area<'_>,
        _style: Style,
    ) {
        let row_height = area.size().height;
        let width = area.size().width;
        let line_style = Style::new().with_color(self.color);
        area.draw_line(
            vec![Position::new(0, 0), Position::new(width, 0)],
            line_style,
        );
        area.draw_line(
            vec![Position::new(0, row_height), Position::new(width, row_height)],
            line_style,
        );
        area.draw_line(
            vec![Position::new(0, 0), Position::new(0, row_height)],
            line_style,
        );
        area.draw_line(
            vec![Position::new(width, 0), Position::new(width, row_height)],
            line_style,
        );
    }
}

/// A table with a colored header band, striped data rows and a uniform grid.
///
/// Cell decorators draw after the cell text, so a fill painted in a single
/// pass would cover its own row. The element therefore lays the table out
/// twice over the same area: the first pass computes row heights and paints
/// the fills (covering its own sacrificial text), the second pass redraws
/// the text and strokes the grid on top.
pub struct StripedTable {
    fill_pass: TableLayout,
    line_pass: TableLayout,
}

impl StripedTable {
    /// Builds the renderable table from its model description.
    pub fn from_spec(
        spec: &TableSpec,
        styles: &StyleSet,
        palette: &Palette,
    ) -> Result<Self, Error> {
        let mut fill_pass = build_layout(spec, styles)?;
        fill_pass.set_cell_decorator(BandFill {
            header_bg: spec.header_bg(),
            stripe: palette.row_stripe,
        });

        let mut line_pass = build_layout(spec, styles)?;
        line_pass.set_cell_decorator(GridLines {
            color: palette.neutral_border,
        });

        Ok(Self {
            fill_pass,
            line_pass,
        })
    }
}

impl Element for StripedTable {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        self.fill_pass.render(context, area.clone(), style)?;
        self.line_pass.render(context, area, style)
    }
}

fn build_layout(spec: &TableSpec, styles: &StyleSet) -> Result<TableLayout, Error> {
    let mut table = TableLayout::new(spec.column_weights().to_vec());

    let header_style = styles.get(StyleId::TableHeader).to_style();
    let mut row = table.row();
    for text in spec.header() {
        row.push_element(cell_paragraph(text, header_style));
    }
    row.push()?;

    let cell_base = styles.get(StyleId::TableCell).to_style();
    for cells in spec.rows() {
        let mut row = table.row();
        for cell in cells {
            let mut style = cell_base;
            if let Some(color) = cell.color() {
                style.set_color(color);
            }
            if cell.is_bold() {
                style.set_bold();
            }
            row.push_element(cell_paragraph(cell.text(), style));
        }
        row.push()?;
    }

    Ok(table)
}

fn cell_paragraph(text: &str, style: Style) -> impl Element {
    let mut paragraph = Paragraph::default();
    paragraph.push_styled(text, style);
    paragraph.padded(Margins::trbl(
        CELL_PADDING_VERTICAL_MM,
        CELL_PADDING_HORIZONTAL_MM,
        CELL_PADDING_VERTICAL_MM,
        CELL_PADDING_HORIZONTAL_MM,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::TableCell;

    fn sample_spec(rows: usize) -> TableSpec {
        let mut spec = TableSpec::new(vec![2, 1], vec!["Name", "Value"], Color::Rgb(46, 134, 171));
        for index in 0..rows {
            spec = spec.with_row(vec![
                TableCell::new(format!("row {}", index)),
                TableCell::new("x"),
            ]);
        }
        spec
    }

    #[test]
    fn striped_table_builds_for_any_row_count() {
        let styles = StyleSet::new(&Palette::default());
        let palette = Palette::default();
        for rows in [0, 1, 5] {
            assert!(StripedTable::from_spec(&sample_spec(rows), &styles, &palette).is_ok());
        }
    }

    #[test]
    fn fixed_box_image_rejects_garbage() {
        assert!(fixed_box_image(b"definitely not an image", 150.0, 92.0).is_err());
    }
}
