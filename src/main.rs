use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use deploy_report::config::{self, ReportConfig};
use deploy_report::content::ReportContent;
use deploy_report::{render, report};

/// Generates the deployment report PDF for the current repository.
///
/// Screenshots are read from the screenshots directory; any that are
/// missing render as placeholders instead of failing the run.
#[derive(Parser)]
#[command(author, version, about = "Generates a styled PDF deployment report")]
struct Cli {
    /// Output PDF path; defaults to <current-dir>_Modern_Report.pdf.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Directory containing the verification screenshots.
    #[arg(long, value_name = "DIR", default_value = "screenshots")]
    screenshots_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = ReportConfig::default();
    let content = ReportContent::standard(&cli.screenshots_dir);
    let assembled = report::assemble(&content, &config);

    if !assembled.missing.is_empty() {
        let names: Vec<_> = assembled
            .missing
            .iter()
            .map(|err| err.path().display().to_string())
            .collect();
        eprintln!(
            "Warning: {} screenshot(s) replaced by placeholders: {}",
            names.len(),
            names.join(", ")
        );
    }

    let output = cli.output.unwrap_or_else(config::default_output_name);
    match render::render_to_file(&assembled.report, &config, &output) {
        Ok(()) => println!("PDF successfully created: {}", output.display()),
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
