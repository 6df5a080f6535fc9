//! Data structures describing the logical content of the report.
//!
//! The types in this module form a layout-engine-agnostic model of the
//! document: an ordered list of flowables plus the document metadata. The
//! values are produced once by the assembler, consumed once by the
//! renderer, and never mutated in between, so the flowable order written
//! here is exactly the order laid out on the page.

use genpdf::style::Color;

use crate::styles::StyleId;

/// Horizontal alignment of textual and visual flowables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

/// A block of text rendered with one of the registered styles.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    text: String,
    style: StyleId,
}

impl TextBlock {
    /// Creates a text block with the given style reference.
    pub fn new(text: impl Into<String>, style: StyleId) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Returns the raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the referenced style.
    pub fn style(&self) -> StyleId {
        self.style
    }
}

/// A single table cell with optional emphasis overrides.
#[derive(Clone, Debug, PartialEq)]
pub struct TableCell {
    text: String,
    color: Option<Color>,
    bold: bool,
}

impl TableCell {
    /// Creates a plain cell rendered in the table cell style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: false,
        }
    }

    /// Overrides the text color and returns the updated cell.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Marks the cell text as bold and returns the updated cell.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Returns the cell text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the color override, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns whether the cell text is bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }
}

/// Description of one styled table: a header row plus zero or more data rows.
///
/// All three report tables (project info, deliverables, metrics) are built
/// through this one type so the header treatment, row striping, grid color
/// and padding cannot drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSpec {
    column_weights: Vec<usize>,
    header: Vec<String>,
    rows: Vec<Vec<TableCell>>,
    header_bg: Color,
}

impl TableSpec {
    /// Creates a table with the given relative column widths and header row.
    pub fn new<S: Into<String>>(
        column_weights: Vec<usize>,
        header: Vec<S>,
        header_bg: Color,
    ) -> Self {
        Self {
            column_weights,
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            header_bg,
        }
    }

    /// Appends a data row and returns the updated table.
    pub fn with_row(mut self, cells: Vec<TableCell>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Returns the relative column widths.
    pub fn column_weights(&self) -> &[usize] {
        &self.column_weights
    }

    /// Returns the header cells.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Returns the data rows.
    pub fn rows(&self) -> &[Vec<TableCell>] {
        &self.rows
    }

    /// Returns the header background color.
    pub fn header_bg(&self) -> Color {
        self.header_bg
    }
}

/// Screenshot bytes validated at build time plus the fixed target box.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBlock {
    bytes: Vec<u8>,
    width_mm: f64,
    height_mm: f64,
}

impl ImageBlock {
    /// Creates an image block from already-validated encoded image bytes.
    pub fn new(bytes: Vec<u8>, width_mm: f64, height_mm: f64) -> Self {
        Self {
            bytes,
            width_mm,
            height_mm,
        }
    }

    /// Returns the encoded image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the target box width in millimetres.
    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    /// Returns the target box height in millimetres.
    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }
}

/// One unit of layout content in the order it appears on the page.
#[derive(Clone, Debug, PartialEq)]
pub enum Flowable {
    /// Styled paragraph content.
    Text(TextBlock),
    /// A striped table with a colored header row.
    Table(TableSpec),
    /// A screenshot scaled into the fixed box.
    Image(ImageBlock),
    /// Vertical gap in millimetres.
    Spacer(f64),
    /// A horizontal ruled line.
    Divider {
        /// Stroke color.
        color: Color,
        /// Rule thickness in millimetres.
        thickness_mm: f64,
    },
    /// Explicit page break.
    PageBreak,
}

impl Flowable {
    /// Convenience helper for building a text flowable.
    pub fn text(text: impl Into<String>, style: StyleId) -> Self {
        Self::Text(TextBlock::new(text, style))
    }

    /// Convenience helper for a vertical gap of `mm` millimetres.
    pub fn spacer(mm: f64) -> Self {
        Self::Spacer(mm)
    }

    /// Convenience helper for a ruled line.
    pub fn divider(color: Color, thickness_mm: f64) -> Self {
        Self::Divider {
            color,
            thickness_mm,
        }
    }
}

/// The fully assembled document: metadata plus the ordered flowables.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    title: String,
    author: String,
    flowables: Vec<Flowable>,
}

impl Report {
    /// Creates a report from its metadata and flowable sequence.
    pub fn new(title: impl Into<String>, author: impl Into<String>, flowables: Vec<Flowable>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            flowables,
        }
    }

    /// Returns the document title embedded in the PDF metadata.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the document author embedded in the PDF metadata.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the flowables in layout order.
    pub fn flowables(&self) -> &[Flowable] {
        &self.flowables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_keeps_header_separate_from_rows() {
        let table = TableSpec::new(vec![1, 1], vec!["A", "B"], Color::Rgb(0, 0, 0))
            .with_row(vec![TableCell::new("a"), TableCell::new("b")]);
        assert_eq!(table.header().len(), 2);
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn cell_overrides_are_preserved() {
        let cell = TableCell::new("Done").colored(Color::Rgb(1, 2, 3)).bold();
        assert_eq!(cell.color(), Some(Color::Rgb(1, 2, 3)));
        assert!(cell.is_bold());
    }
}
