//! Renders an assembled report to PDF bytes or a file on disk.
//!
//! This is the outermost boundary of the program: every layout,
//! serialization or I/O failure is converted into [`RenderError`] instead
//! of propagating a raw panic or library error across the call.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::elements::{PageBreak, Paragraph};
use genpdf::style::Style;
use genpdf::{Alignment, Element, Margins, PaperSize};

use crate::builder::DocumentBuilder;
use crate::config::{ConfigError, ReportConfig};
use crate::elements::{fixed_box_image, RuledLine, StripedTable, VerticalGap};
use crate::metadata::{self, MetadataError};
use crate::model::{Align, Flowable, Report};
use crate::styles::StyleSet;

/// Height reserved for the page footer, in millimetres.
const FOOTER_HEIGHT_MM: f64 = 10.0;

const FOOTER_FONT_SIZE: u8 = 9;

/// Failures during layout or serialization of the whole document.
#[derive(Debug)]
pub enum RenderError {
    /// The configuration failed validation before layout started.
    Config(ConfigError),
    /// Font loading, layout or PDF serialization failed.
    Pdf(genpdf::error::Error),
    /// The metadata post-pass failed.
    Metadata(MetadataError),
    /// The finished bytes could not be written to the output path.
    Write {
        /// The rejected output path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

impl From<ConfigError> for RenderError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<genpdf::error::Error> for RenderError {
    fn from(err: genpdf::error::Error) -> Self {
        Self::Pdf(err)
    }
}

impl From<MetadataError> for RenderError {
    fn from(err: MetadataError) -> Self {
        Self::Metadata(err)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid report configuration: {err}"),
            Self::Pdf(err) => write!(f, "failed to lay out the PDF document: {err}"),
            Self::Metadata(err) => write!(f, "failed to embed document metadata: {err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Pdf(err) => Some(err),
            Self::Metadata(err) => Some(err),
            Self::Write { source, .. } => Some(source),
        }
    }
}

/// Lays out the report and returns the finished PDF bytes.
pub fn render_to_bytes(report: &Report, config: &ReportConfig) -> Result<Vec<u8>, RenderError> {
    config.validate()?;

    let styles = StyleSet::new(&config.palette);
    let margin = config.page.margin_mm;
    let footer_style = Style::new()
        .with_font_size(FOOTER_FONT_SIZE)
        .with_color(config.palette.neutral_muted);

    let mut document = DocumentBuilder::new()
        .with_title(report.title())
        .with_paper_size(PaperSize::A4)
        .with_margins(Margins::trbl(margin, margin, margin, margin))
        .with_footer(FOOTER_HEIGHT_MM, move |page| {
            let mut line = Paragraph::default();
            line.push_styled(format!("Page {}", page), footer_style);
            line.set_alignment(Alignment::Right);
            line
        })
        .build()?;

    for flowable in report.flowables() {
        push_flowable(&mut document, flowable, &styles, config)?;
    }

    let mut buffer = Vec::new();
    document.render(&mut buffer)?;

    let stamped = metadata::apply_document_info(&buffer, report.title(), report.author())?;
    Ok(stamped)
}

/// Renders the report and writes it to `path` in one pass.
///
/// On failure the output file is left unwritten.
pub fn render_to_file(
    report: &Report,
    config: &ReportConfig,
    path: &Path,
) -> Result<(), RenderError> {
    let bytes = render_to_bytes(report, config)?;
    fs::write(path, &bytes).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn push_flowable(
    document: &mut genpdf::Document,
    flowable: &Flowable,
    styles: &StyleSet,
    config: &ReportConfig,
) -> Result<(), genpdf::error::Error> {
    match flowable {
        Flowable::Text(block) => {
            let spec = styles.get(block.style());
            let mut paragraph = Paragraph::default();
            paragraph.push_styled(block.text(), spec.to_style());
            paragraph.set_alignment(alignment(spec.alignment()));
            if spec.padding_mm() > 0.0 {
                let pad = spec.padding_mm();
                document.push(paragraph.padded(Margins::trbl(pad, pad, pad, pad)));
            } else {
                document.push(paragraph);
            }
            if spec.space_after_mm() > 0.0 {
                document.push(VerticalGap::new(spec.space_after_mm()));
            }
        }
        Flowable::Table(spec) => {
            document.push(StripedTable::from_spec(spec, styles, &config.palette)?);
        }
        Flowable::Image(block) => {
            document.push(fixed_box_image(
                block.bytes(),
                block.width_mm(),
                block.height_mm(),
            )?);
        }
        Flowable::Spacer(mm) => document.push(VerticalGap::new(*mm)),
        Flowable::Divider {
            color,
            thickness_mm,
        } => document.push(RuledLine::new(*color, *thickness_mm)),
        Flowable::PageBreak => document.push(PageBreak::new()),
    }
    Ok(())
}

fn alignment(align: Align) -> Alignment {
    match align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
        Align::Right => Alignment::Right,
    }
}
