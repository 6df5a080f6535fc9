use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb};
use sha2::{Digest, Sha256};

use deploy_report::config::ReportConfig;
use deploy_report::content::ReportContent;
use deploy_report::render::{render_to_bytes, render_to_file, RenderError};
use deploy_report::report::assemble;
use deploy_report::{fonts, report};

const SCREENSHOT_FILES: [&str; 5] = [
    "s3-settings.png",
    "bucket-policy.png",
    "cloudfront-distribution.png",
    "website-live.png",
    "week_8.png",
];

fn skip_notice(test: &str) {
    eprintln!(
        "Skipping {}: no usable font family found. Set DEPLOY_REPORT_FONTS_DIR or copy the \
         Liberation fonts into assets/fonts.",
        test
    );
}

fn png_bytes(seed: u8) -> Vec<u8> {
    let buffer = ImageBuffer::from_fn(24, 16, |x, y| Rgb([seed, x as u8 * 9, y as u8 * 13]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("encode test image");
    bytes
}

fn write_screenshots(dir: &Path) {
    for (index, file) in SCREENSHOT_FILES.iter().enumerate() {
        fs::write(dir.join(file), png_bytes(index as u8)).expect("write screenshot");
    }
}

fn render_standard(screenshots_dir: &Path) -> (Vec<u8>, report::AssembledReport) {
    let config = ReportConfig::default();
    let content = ReportContent::standard(screenshots_dir);
    let assembled = assemble(&content, &config);
    let bytes = render_to_bytes(&assembled.report, &config).expect("render report");
    (bytes, assembled)
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            if let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            {
                let start_index = offset + start_pos + start.len();
                if let Some(end_pos) = data[start_index..]
                    .windows(end.len())
                    .position(|window| window == end)
                {
                    for byte in &mut data[start_index..start_index + end_pos] {
                        if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                            *byte = b'0';
                        }
                    }
                    offset = start_index + end_pos + end.len();
                } else {
                    break;
                }
            } else {
                break;
            }
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(
        &mut normalized,
        b"<xmp:MetadataDate>",
        b"</xmp:MetadataDate>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:DocumentID>",
        b"</xmpMM:DocumentID>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:InstanceID>",
        b"</xmpMM:InstanceID>",
    );
    scrub_xml(&mut normalized, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    Sha256::digest(&normalized).into()
}

#[test]
fn renders_non_empty_output_without_screenshots() {
    if !fonts::default_fonts_available() {
        skip_notice("renders_non_empty_output_without_screenshots");
        return;
    }

    let dir = tempfile::tempdir().expect("create temp dir");
    let (bytes, assembled) = render_standard(dir.path());

    assert_eq!(assembled.missing.len(), 5);
    assert!(!bytes.is_empty(), "rendered PDF should not be empty");
    assert!(bytes.starts_with(b"%PDF"), "output should be a PDF file");
}

#[test]
fn rendering_is_deterministic() {
    if !fonts::default_fonts_available() {
        skip_notice("rendering_is_deterministic");
        return;
    }

    let dir = tempfile::tempdir().expect("create temp dir");
    write_screenshots(dir.path());
    let (bytes_a, _) = render_standard(dir.path());
    let (bytes_b, _) = render_standard(dir.path());

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn embedded_screenshots_grow_the_document() {
    if !fonts::default_fonts_available() {
        skip_notice("embedded_screenshots_grow_the_document");
        return;
    }

    let empty_dir = tempfile::tempdir().expect("create temp dir");
    let full_dir = tempfile::tempdir().expect("create temp dir");
    write_screenshots(full_dir.path());

    let (without, _) = render_standard(empty_dir.path());
    let (with, assembled) = render_standard(full_dir.path());

    assert!(assembled.missing.is_empty());
    assert!(
        with.len() > without.len(),
        "five embedded images should enlarge the document ({} vs {} bytes)",
        with.len(),
        without.len()
    );
}

#[test]
fn render_to_file_writes_the_output_file() {
    if !fonts::default_fonts_available() {
        skip_notice("render_to_file_writes_the_output_file");
        return;
    }

    let shots = tempfile::tempdir().expect("create temp dir");
    let out_dir = tempfile::tempdir().expect("create temp dir");
    let output = out_dir.path().join("deployment_report.pdf");

    let config = ReportConfig::default();
    let content = ReportContent::standard(shots.path());
    let assembled = assemble(&content, &config);

    render_to_file(&assembled.report, &config, &output).expect("write report");
    let written = fs::metadata(&output).expect("output file exists");
    assert!(written.len() > 0);
}

#[test]
fn unwritable_output_path_returns_an_error() {
    if !fonts::default_fonts_available() {
        skip_notice("unwritable_output_path_returns_an_error");
        return;
    }

    let shots = tempfile::tempdir().expect("create temp dir");
    let out_dir = tempfile::tempdir().expect("create temp dir");

    let config = ReportConfig::default();
    let content = ReportContent::standard(shots.path());
    let assembled = assemble(&content, &config);

    // The output path is an existing directory, so the write must fail.
    let result = render_to_file(&assembled.report, &config, out_dir.path());
    match result {
        Err(RenderError::Write { .. }) => {}
        other => panic!("expected a write error, got {:?}", other),
    }
}
