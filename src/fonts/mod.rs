//! Font loading utilities for the deploy-report crate.
//!
//! The renderer needs a regular/bold/italic/bold-italic TrueType family.
//! Lookup order: the `DEPLOY_REPORT_FONTS_DIR` override, an `assets/fonts`
//! directory next to the executable, the crate's own `assets/fonts`, and
//! finally well-known system font locations (DejaVu Sans or Liberation
//! Sans on Unix, Arial on Windows).

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};
use log::warn;

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "LiberationSans";

/// Environment variable overriding the bundled font directory.
pub const FONTS_DIR_ENV: &str = "DEPLOY_REPORT_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "LiberationSans-Regular.ttf",
    "LiberationSans-Bold.ttf",
    "LiberationSans-Italic.ttf",
    "LiberationSans-BoldItalic.ttf",
];

/// A complete family somewhere on the system, with per-style file names.
struct SystemFamily {
    name: &'static str,
    directories: &'static [&'static str],
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

#[cfg(not(windows))]
const SYSTEM_FAMILIES: &[SystemFamily] = &[
    SystemFamily {
        name: "DejaVu Sans",
        directories: &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu-sans-fonts",
            "/usr/share/fonts/TTF",
        ],
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
        italic: "DejaVuSans-Oblique.ttf",
        bold_italic: "DejaVuSans-BoldOblique.ttf",
    },
    SystemFamily {
        name: "Liberation Sans",
        directories: &[
            "/usr/share/fonts/truetype/liberation",
            "/usr/share/fonts/truetype/liberation2",
            "/usr/share/fonts/liberation-sans-fonts",
        ],
        regular: "LiberationSans-Regular.ttf",
        bold: "LiberationSans-Bold.ttf",
        italic: "LiberationSans-Italic.ttf",
        bold_italic: "LiberationSans-BoldItalic.ttf",
    },
];

#[cfg(windows)]
const SYSTEM_FAMILIES: &[SystemFamily] = &[SystemFamily {
    name: "Arial",
    directories: &[],
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
}];

fn bundled_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(path) = env::var(FONTS_DIR_ENV) {
        if !path.trim().is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.iter().any(|existing| existing == &candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates
        .iter()
        .any(|existing| existing == &manifest_candidate)
    {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn describe_candidate(candidate: &Path) -> String {
    if !candidate.is_dir() {
        format!("{} (directory missing)", candidate.display())
    } else {
        let missing = missing_font_files(candidate)
            .iter()
            .map(|path| path.file_name().unwrap_or_default().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} (missing files [{}])", candidate.display(), missing)
    }
}

fn load_bundled_family() -> Result<FontFamily<FontData>, Vec<String>> {
    let mut attempts = Vec::new();

    for candidate in bundled_directory_candidates() {
        if candidate.is_dir() && missing_font_files(&candidate).is_empty() {
            return fonts::from_files(&candidate, DEFAULT_FONT_FAMILY_NAME, None).map_err(|err| {
                vec![format!(
                    "{} (failed to load '{}': {})",
                    candidate.display(),
                    DEFAULT_FONT_FAMILY_NAME,
                    err
                )]
            });
        }
        attempts.push(describe_candidate(&candidate));
    }

    Err(attempts)
}

fn load_font(directory: &Path, file: &str, style: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load {} font at {}: {}",
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

#[cfg(windows)]
fn family_directories(family: &SystemFamily) -> Vec<PathBuf> {
    let _ = family;
    ["WINDIR", "SystemRoot"]
        .iter()
        .filter_map(|var| env::var_os(var))
        .map(|root| PathBuf::from(root).join("Fonts"))
        .collect()
}

#[cfg(not(windows))]
fn family_directories(family: &SystemFamily) -> Vec<PathBuf> {
    family.directories.iter().copied().map(PathBuf::from).collect()
}

fn load_system_family(family: &SystemFamily) -> Option<FontFamily<FontData>> {
    for directory in family_directories(family) {
        if !directory.join(family.regular).is_file() {
            continue;
        }
        let loaded = (|| -> Result<FontFamily<FontData>, Error> {
            Ok(FontFamily {
                regular: load_font(&directory, family.regular, "regular")?,
                bold: load_font(&directory, family.bold, "bold")?,
                italic: load_font(&directory, family.italic, "italic")?,
                bold_italic: load_font(&directory, family.bold_italic, "bold italic")?,
            })
        })();
        match loaded {
            Ok(loaded) => return Some(loaded),
            Err(err) => warn!(
                "System family '{}' in {} is unusable: {}",
                family.name,
                directory.display(),
                err
            ),
        }
    }
    None
}

/// Returns the default font family.
///
/// Prefers the bundled Liberation Sans directory and falls back to the
/// first usable system family. Errors list every location that was tried.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    let attempts = match load_bundled_family() {
        Ok(family) => return Ok(family),
        Err(attempts) => attempts,
    };

    for family in SYSTEM_FAMILIES {
        if let Some(loaded) = load_system_family(family) {
            warn!(
                "Bundled fonts unavailable; falling back to system family '{}'.",
                family.name
            );
            return Ok(loaded);
        }
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };
    Err(Error::new(
        format!(
            "Unable to locate a usable font family. Checked: {}; no system fallback found. \
             See assets/fonts/README.md or set {}.",
            summary, FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "no usable fonts found"),
    ))
}

/// Indicates whether a usable font family can be resolved right now.
pub fn default_fonts_available() -> bool {
    default_font_family().is_ok()
}
