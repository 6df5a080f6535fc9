//! Assembles the fixed report structure into an ordered flowable sequence.
//!
//! For fixed content the assembler is deterministic: the sections always
//! appear as cover, executive summary, requirements, implementation
//! details, testing & verification, conclusion, with page breaks between
//! the top-level section boundaries. Missing screenshots shrink to
//! placeholder paragraphs but never change the section structure.

use genpdf::style::Color;

use crate::config::{Palette, ReportConfig};
use crate::content::{Deliverable, Metric, ProjectInfo, ReportContent};
use crate::model::{Flowable, Report, TableCell, TableSpec};
use crate::screenshots::{self, ScreenshotError};
use crate::styles::StyleId;

/// Thickness of the rule under each section heading, in millimetres (1.2 pt).
const HEADER_RULE_MM: f64 = 0.42;

/// Converts a point value to millimetres; the source layout used points.
fn pt(value: f64) -> f64 {
    value * 25.4 / 72.0
}

/// Result of one assembly pass: the document plus the non-fatal failures.
#[derive(Debug)]
pub struct AssembledReport {
    /// The complete document, ready for rendering.
    pub report: Report,
    /// Screenshot references that were replaced by placeholders.
    pub missing: Vec<ScreenshotError>,
}

/// Builds the full flowable sequence for the given content.
pub fn assemble(content: &ReportContent, config: &ReportConfig) -> AssembledReport {
    let palette = &config.palette;
    let mut flowables = Vec::new();
    let mut missing = Vec::new();

    // Cover page.
    flowables.push(Flowable::text(&content.project.title, StyleId::Title));
    flowables.push(Flowable::text(&content.project.subtitle, StyleId::Subtitle));
    flowables.push(Flowable::spacer(pt(12.0)));
    flowables.push(Flowable::Table(info_table(&content.project, palette)));
    flowables.push(Flowable::spacer(pt(18.0)));
    flowables.push(Flowable::text(
        "Corporate-ready PDF report generated with modern styling.",
        StyleId::Small,
    ));
    flowables.push(Flowable::PageBreak);

    section_header("Executive Summary", palette.primary, &mut flowables);
    flowables.push(Flowable::text(&content.summary, StyleId::Body));

    section_header("Requirements", palette.secondary, &mut flowables);
    flowables.push(Flowable::text("Original Task Description", StyleId::Heading));
    flowables.push(Flowable::text(&content.task_description, StyleId::Callout));
    flowables.push(Flowable::spacer(pt(6.0)));
    flowables.push(Flowable::Table(deliverables_table(
        &content.deliverables,
        palette,
    )));
    flowables.push(Flowable::PageBreak);

    section_header("Implementation Details", palette.primary, &mut flowables);
    for point in &content.implementation_points {
        flowables.push(Flowable::text(format!("\u{2022} {}", point), StyleId::Body));
    }
    flowables.push(Flowable::spacer(pt(10.0)));

    section_header("Testing & Verification", palette.secondary, &mut flowables);
    for shot in &content.screenshots {
        let (mut items, error) = screenshots::embed(
            shot,
            config.page.screenshot_width_mm,
            config.page.screenshot_height_mm,
        );
        flowables.append(&mut items);
        if let Some(error) = error {
            missing.push(error);
        }
        flowables.push(Flowable::spacer(pt(16.0)));
    }
    flowables.push(Flowable::PageBreak);

    section_header("Conclusion", palette.primary, &mut flowables);
    flowables.push(Flowable::text(&content.conclusion, StyleId::Body));
    flowables.push(Flowable::Table(metrics_table(&content.metrics, palette)));
    flowables.push(Flowable::spacer(pt(18.0)));
    flowables.push(Flowable::text("Technical Summary", StyleId::Heading));
    flowables.push(Flowable::text(&content.technical_summary, StyleId::Body));

    let title = format!("{} Report", content.project.title);
    AssembledReport {
        report: Report::new(title, content.project.author.clone(), flowables),
        missing,
    }
}

/// Emits the fixed heading group: gap, accent heading, gap, rule, gap.
fn section_header(title: &str, accent: Color, out: &mut Vec<Flowable>) {
    out.push(Flowable::spacer(pt(10.0)));
    out.push(Flowable::text(title, StyleId::AccentHeading));
    out.push(Flowable::spacer(pt(4.0)));
    out.push(Flowable::divider(accent, HEADER_RULE_MM));
    out.push(Flowable::spacer(pt(8.0)));
}

fn info_table(project: &ProjectInfo, palette: &Palette) -> TableSpec {
    TableSpec::new(vec![17, 46], vec!["Field", "Details"], palette.primary)
        .with_row(vec![
            TableCell::new("Project"),
            TableCell::new(&project.title),
        ])
        .with_row(vec![
            TableCell::new("Repository"),
            TableCell::new(&project.repository),
        ])
        .with_row(vec![TableCell::new("Author"), TableCell::new(&project.author)])
        .with_row(vec![TableCell::new("Date"), TableCell::new(&project.date)])
        .with_row(vec![
            TableCell::new("Live URL"),
            TableCell::new(&project.live_url).colored(palette.primary),
        ])
        .with_row(vec![TableCell::new("Stack"), TableCell::new(&project.stack)])
}

fn deliverables_table(deliverables: &[Deliverable], palette: &Palette) -> TableSpec {
    let mut table = TableSpec::new(
        vec![45, 18],
        vec!["Deliverable", "Status"],
        palette.secondary,
    );
    for deliverable in deliverables {
        table = table.with_row(vec![
            TableCell::new(&deliverable.description),
            TableCell::new(&deliverable.status)
                .colored(status_color(&deliverable.status, palette))
                .bold(),
        ]);
    }
    table
}

fn metrics_table(metrics: &[Metric], palette: &Palette) -> TableSpec {
    let mut table = TableSpec::new(
        vec![22, 16, 25],
        vec!["Metric", "Value", "Notes"],
        palette.primary,
    );
    for metric in metrics {
        table = table.with_row(vec![
            TableCell::new(&metric.name),
            TableCell::new(&metric.value),
            TableCell::new(&metric.notes),
        ]);
    }
    table
}

/// Maps a deliverable status label to its fixed display color.
pub fn status_color(status: &str, palette: &Palette) -> Color {
    match status {
        "Done" => palette.primary,
        "In Progress" => palette.secondary,
        _ => palette.accent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_map_to_three_distinct_colors() {
        let palette = Palette::default();
        let done = status_color("Done", &palette);
        let in_progress = status_color("In Progress", &palette);
        let other = status_color("Blocked", &palette);
        assert_ne!(done, in_progress);
        assert_ne!(done, other);
        assert_ne!(in_progress, other);

        // Stable across repeated lookups.
        assert_eq!(done, status_color("Done", &palette));
        assert_eq!(other, status_color("Deferred", &palette));
    }

    #[test]
    fn section_header_emits_heading_and_rule() {
        let mut out = Vec::new();
        section_header("Conclusion", Palette::default().primary, &mut out);
        assert_eq!(out.len(), 5);
        assert!(matches!(&out[1], Flowable::Text(block) if block.text() == "Conclusion"));
        assert!(matches!(out[3], Flowable::Divider { .. }));
    }
}
