//! The fixed style registry used by every text flowable.
//!
//! Styles are referenced through the typed [`StyleId`] enum and resolved by
//! exhaustive match, so a flowable can never name a style that does not
//! exist. [`StyleSet::new`] takes no runtime input and is deterministic:
//! building the registry twice yields equal definitions in every attribute.

use genpdf::style::{Color, Style};

use crate::config::Palette;
use crate::model::Align;

/// Identifier of one registered paragraph style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleId {
    /// Cover page title.
    Title,
    /// Cover page subtitle.
    Subtitle,
    /// Plain dark sub-heading.
    Heading,
    /// Section heading in the primary accent color.
    AccentHeading,
    /// Default body text.
    Body,
    /// Centered italic screenshot caption.
    Caption,
    /// Muted small print.
    Small,
    /// Bold white text on the table header band.
    TableHeader,
    /// Regular table cell text.
    TableCell,
    /// Indented callout block for quoted task text.
    Callout,
    /// Placeholder text for missing or unreadable screenshots.
    Warning,
}

/// One paragraph style record: text attributes plus block-level layout.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlockStyle {
    font_size: u8,
    line_spacing: f64,
    bold: bool,
    italic: bool,
    color: Color,
    alignment: Align,
    space_after_mm: f64,
    padding_mm: f64,
}

impl TextBlockStyle {
    fn new(font_size: u8, line_spacing: f64, color: Color) -> Self {
        Self {
            font_size,
            line_spacing,
            bold: false,
            italic: false,
            color,
            alignment: Align::Left,
            space_after_mm: 0.0,
            padding_mm: 0.0,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn aligned(mut self, alignment: Align) -> Self {
        self.alignment = alignment;
        self
    }

    fn space_after(mut self, mm: f64) -> Self {
        self.space_after_mm = mm;
        self
    }

    fn padded(mut self, mm: f64) -> Self {
        self.padding_mm = mm;
        self
    }

    /// Builds the [`Style`] representation for text rendering.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new()
            .with_font_size(self.font_size)
            .with_line_spacing(self.line_spacing)
            .with_color(self.color);
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }

    /// Returns the block alignment.
    pub fn alignment(&self) -> Align {
        self.alignment
    }

    /// Returns the vertical gap emitted after the block, in millimetres.
    pub fn space_after_mm(&self) -> f64 {
        self.space_after_mm
    }

    /// Returns the uniform padding around the block, in millimetres.
    pub fn padding_mm(&self) -> f64 {
        self.padding_mm
    }

    /// Returns the text color.
    pub fn color(&self) -> Color {
        self.color
    }
}

/// The complete style registry, constructed once per render.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSet {
    title: TextBlockStyle,
    subtitle: TextBlockStyle,
    heading: TextBlockStyle,
    accent_heading: TextBlockStyle,
    body: TextBlockStyle,
    caption: TextBlockStyle,
    small: TextBlockStyle,
    table_header: TextBlockStyle,
    table_cell: TextBlockStyle,
    callout: TextBlockStyle,
    warning: TextBlockStyle,
}

impl StyleSet {
    /// Builds the fixed registry from the palette.
    pub fn new(palette: &Palette) -> Self {
        Self {
            title: TextBlockStyle::new(28, 1.2, palette.primary)
                .bold()
                .space_after(5.6),
            subtitle: TextBlockStyle::new(12, 1.33, palette.neutral_muted).space_after(4.2),
            heading: TextBlockStyle::new(18, 1.22, palette.neutral_dark)
                .bold()
                .space_after(2.8),
            accent_heading: TextBlockStyle::new(18, 1.22, palette.primary)
                .bold()
                .space_after(1.4),
            body: TextBlockStyle::new(10, 1.5, palette.neutral_text).space_after(2.8),
            caption: TextBlockStyle::new(9, 1.33, palette.neutral_muted)
                .italic()
                .aligned(Align::Center)
                .space_after(4.2),
            small: TextBlockStyle::new(9, 1.33, palette.neutral_muted),
            table_header: TextBlockStyle::new(10, 1.4, palette.white).bold(),
            table_cell: TextBlockStyle::new(10, 1.4, palette.neutral_text),
            callout: TextBlockStyle::new(10, 1.5, palette.neutral_dark)
                .padded(2.8)
                .space_after(3.5),
            warning: TextBlockStyle::new(10, 1.4, palette.accent).space_after(1.4),
        }
    }

    /// Resolves a style reference; total over [`StyleId`], so it cannot fail.
    pub fn get(&self, id: StyleId) -> &TextBlockStyle {
        match id {
            StyleId::Title => &self.title,
            StyleId::Subtitle => &self.subtitle,
            StyleId::Heading => &self.heading,
            StyleId::AccentHeading => &self.accent_heading,
            StyleId::Body => &self.body,
            StyleId::Caption => &self.caption,
            StyleId::Small => &self.small,
            StyleId::TableHeader => &self.table_header,
            StyleId::TableCell => &self.table_cell,
            StyleId::Callout => &self.callout,
            StyleId::Warning => &self.warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_deterministic() {
        let palette = Palette::default();
        assert_eq!(StyleSet::new(&palette), StyleSet::new(&palette));
    }

    #[test]
    fn caption_is_centered_italic() {
        let styles = StyleSet::new(&Palette::default());
        let caption = styles.get(StyleId::Caption);
        assert_eq!(caption.alignment(), Align::Center);
        assert!(caption.to_style().is_italic());
    }

    #[test]
    fn header_style_is_bold_white() {
        let palette = Palette::default();
        let styles = StyleSet::new(&palette);
        let header = styles.get(StyleId::TableHeader).to_style();
        assert!(header.is_bold());
        assert_eq!(header.color(), Some(palette.white));
    }
}
