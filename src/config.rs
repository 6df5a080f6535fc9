//! Fixed configuration for the generated report.
//!
//! All colors, page geometry and derived output paths live here so the
//! builder and renderer receive one immutable value instead of reading
//! ambient globals.

use std::env;
use std::fmt;
use std::path::PathBuf;

use genpdf::style::Color;

/// Suffix appended to the repository name to form the default output file.
const OUTPUT_SUFFIX: &str = "_Modern_Report.pdf";

/// Color palette shared by every styled element in the report.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Primary brand color used for the title and most section accents.
    pub primary: Color,
    /// Secondary accent used for the requirements and verification sections.
    pub secondary: Color,
    /// Warning accent used for missing-screenshot placeholders.
    pub accent: Color,
    /// Near-black used for plain headings.
    pub neutral_dark: Color,
    /// Default body text color.
    pub neutral_text: Color,
    /// Muted gray for subtitles, captions and small print.
    pub neutral_muted: Color,
    /// Light gray used for table grids and divider rules.
    pub neutral_border: Color,
    /// Shading applied to every other table data row.
    pub row_stripe: Color,
    /// Header row text color.
    pub white: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(0x2e, 0x86, 0xab),
            secondary: Color::Rgb(0xa2, 0x3b, 0x72),
            accent: Color::Rgb(0xf1, 0x8f, 0x01),
            neutral_dark: Color::Rgb(0x2d, 0x2d, 0x2d),
            neutral_text: Color::Rgb(0x3a, 0x3a, 0x3a),
            neutral_muted: Color::Rgb(0x6f, 0x6f, 0x6f),
            neutral_border: Color::Rgb(0xdd, 0xdd, 0xdd),
            row_stripe: Color::Rgb(0xf5, 0xf5, 0xf5),
            white: Color::Rgb(0xff, 0xff, 0xff),
        }
    }
}

/// Page geometry: ISO A4 with uniform margins and a fixed screenshot box.
///
/// The screenshot box is applied to every embedded image without preserving
/// the aspect ratio, so all verification figures occupy the same region.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSetup {
    /// Margin applied to all four page edges, in millimetres.
    pub margin_mm: f64,
    /// Width of the fixed screenshot box, in millimetres.
    pub screenshot_width_mm: f64,
    /// Height of the fixed screenshot box, in millimetres.
    pub screenshot_height_mm: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            // 72 pt margins.
            margin_mm: 25.4,
            screenshot_width_mm: 150.0,
            screenshot_height_mm: 92.0,
        }
    }
}

/// Immutable configuration passed explicitly into assembly and rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportConfig {
    pub palette: Palette,
    pub page: PageSetup,
}

impl ReportConfig {
    /// Checks the geometry for values that would render garbage.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("margin", self.page.margin_mm),
            ("screenshot width", self.page.screenshot_width_mm),
            ("screenshot height", self.page.screenshot_height_mm),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension {
                    name,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Validation errors raised before any layout work starts.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A geometry value is non-positive or not finite.
    InvalidDimension {
        /// Name of the offending dimension.
        name: &'static str,
        /// The rejected value in millimetres.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { name, value } => {
                write!(f, "invalid {} of {} mm; expected a positive value", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Basename of the current working directory, or `project` when unavailable.
pub fn repo_basename() -> String {
    env::current_dir()
        .ok()
        .and_then(|dir| dir.file_name().map(|name| name.to_string_lossy().into_owned()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "project".to_owned())
}

/// Default output path derived from the current directory name.
pub fn default_output_name() -> PathBuf {
    PathBuf::from(format!("{}{}", repo_basename(), OUTPUT_SUFFIX))
}
