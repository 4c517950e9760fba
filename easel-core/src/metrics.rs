//! Font metrics for the standard PDF Base-14 families.
//!
//! Widths are the standard PostScript metrics in 1/1000 em, enough to
//! measure text without loading any font file. Oblique/italic variants
//! share their upright widths. Unknown characters measure as 500/1000 em.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Line spacing multiplier applied between wrapped text lines.
pub const LINE_SPACING: f32 = 1.2;

/// A concrete Base-14 font variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontVariant {
    /// Helvetica regular.
    Helvetica,
    /// Helvetica bold.
    HelveticaBold,
    /// Helvetica oblique.
    HelveticaOblique,
    /// Helvetica bold oblique.
    HelveticaBoldOblique,
    /// Times roman.
    TimesRoman,
    /// Times bold.
    TimesBold,
    /// Times italic.
    TimesItalic,
    /// Times bold italic.
    TimesBoldItalic,
    /// Courier regular.
    Courier,
    /// Courier bold.
    CourierBold,
    /// Courier oblique.
    CourierOblique,
    /// Courier bold oblique.
    CourierBoldOblique,
}

impl FontVariant {
    /// Resolve an element's font family and style flags to a variant.
    ///
    /// Family matching is loose: anything naming a serif face maps to
    /// Times, monospace faces map to Courier, and everything else
    /// (Arial, Helvetica, unknown families) maps to Helvetica.
    #[must_use]
    pub fn resolve(family: &str, bold: bool, italic: bool) -> Self {
        let family = family.to_lowercase();
        if family.contains("times") || (family.contains("serif") && !family.contains("sans")) {
            match (bold, italic) {
                (false, false) => Self::TimesRoman,
                (true, false) => Self::TimesBold,
                (false, true) => Self::TimesItalic,
                (true, true) => Self::TimesBoldItalic,
            }
        } else if family.contains("courier") || family.contains("mono") {
            match (bold, italic) {
                (false, false) => Self::Courier,
                (true, false) => Self::CourierBold,
                (false, true) => Self::CourierOblique,
                (true, true) => Self::CourierBoldOblique,
            }
        } else {
            match (bold, italic) {
                (false, false) => Self::Helvetica,
                (true, false) => Self::HelveticaBold,
                (false, true) => Self::HelveticaOblique,
                (true, true) => Self::HelveticaBoldOblique,
            }
        }
    }

    /// The PostScript name of this variant.
    #[must_use]
    pub fn postscript_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::TimesItalic => "Times-Italic",
            Self::TimesBoldItalic => "Times-BoldItalic",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Whether the variant is a bold face.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        matches!(
            self,
            Self::HelveticaBold
                | Self::HelveticaBoldOblique
                | Self::TimesBold
                | Self::TimesBoldItalic
                | Self::CourierBold
                | Self::CourierBoldOblique
        )
    }

    /// Whether the variant is an italic/oblique face.
    #[must_use]
    pub fn is_italic(&self) -> bool {
        matches!(
            self,
            Self::HelveticaOblique
                | Self::HelveticaBoldOblique
                | Self::TimesItalic
                | Self::TimesBoldItalic
                | Self::CourierOblique
                | Self::CourierBoldOblique
        )
    }
}

/// Character width data for one font variant.
#[derive(Debug, Clone)]
enum FontWidths {
    /// Proportional font with per-character widths.
    Proportional(HashMap<char, f32>),
    /// Monospace font with a fixed advance.
    Monospace(f32),
}

impl FontWidths {
    fn width_for_char(&self, ch: char) -> f32 {
        match self {
            // Unknown characters fall back to a half-em advance.
            FontWidths::Proportional(widths) => *widths.get(&ch).unwrap_or(&500.0),
            FontWidths::Monospace(width) => *width,
        }
    }
}

/// Measured glyph widths for one Base-14 variant.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    variant: FontVariant,
    widths: FontWidths,
}

impl FontMetrics {
    /// Build the width table for a variant.
    #[must_use]
    pub fn new(variant: FontVariant) -> Self {
        let widths = match variant {
            FontVariant::Courier
            | FontVariant::CourierBold
            | FontVariant::CourierOblique
            | FontVariant::CourierBoldOblique => FontWidths::Monospace(600.0),
            FontVariant::Helvetica | FontVariant::HelveticaOblique => {
                FontWidths::Proportional(build_widths(HELVETICA, 556.0))
            }
            FontVariant::HelveticaBold | FontVariant::HelveticaBoldOblique => {
                FontWidths::Proportional(build_widths(HELVETICA_BOLD, 556.0))
            }
            FontVariant::TimesRoman | FontVariant::TimesItalic => {
                FontWidths::Proportional(build_widths(TIMES_ROMAN, 500.0))
            }
            FontVariant::TimesBold | FontVariant::TimesBoldItalic => {
                FontWidths::Proportional(build_widths(TIMES_BOLD, 500.0))
            }
        };
        Self { variant, widths }
    }

    /// Resolve a family name and style flags, then build the table.
    #[must_use]
    pub fn for_family(family: &str, bold: bool, italic: bool) -> Self {
        Self::new(FontVariant::resolve(family, bold, italic))
    }

    /// The variant these metrics describe.
    #[must_use]
    pub fn variant(&self) -> FontVariant {
        self.variant
    }

    /// Width of a string at the given font size, in the same unit as the
    /// size (canvas px / PDF points).
    #[must_use]
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| self.widths.width_for_char(c)).sum();
        units * font_size / 1000.0
    }

    /// Width of a single character in 1/1000 em units.
    #[must_use]
    pub fn char_width(&self, ch: char) -> f32 {
        self.widths.width_for_char(ch)
    }
}

fn build_widths(table: &[(char, f32)], digit_width: f32) -> HashMap<char, f32> {
    let mut widths: HashMap<char, f32> = table.iter().copied().collect();
    // Digits share one advance within each Base-14 proportional face.
    for digit in '0'..='9' {
        widths.insert(digit, digit_width);
    }
    widths
}

/// Helvetica regular, standard AFM widths.
const HELVETICA: &[(char, f32)] = &[
    (' ', 278.0),
    ('!', 278.0),
    ('"', 355.0),
    ('#', 556.0),
    ('$', 556.0),
    ('%', 889.0),
    ('&', 667.0),
    ('\'', 191.0),
    ('(', 333.0),
    (')', 333.0),
    ('*', 389.0),
    ('+', 584.0),
    (',', 278.0),
    ('-', 333.0),
    ('.', 278.0),
    ('/', 278.0),
    (':', 278.0),
    (';', 278.0),
    ('<', 584.0),
    ('=', 584.0),
    ('>', 584.0),
    ('?', 556.0),
    ('@', 1015.0),
    ('A', 667.0),
    ('B', 667.0),
    ('C', 722.0),
    ('D', 722.0),
    ('E', 667.0),
    ('F', 611.0),
    ('G', 778.0),
    ('H', 722.0),
    ('I', 278.0),
    ('J', 500.0),
    ('K', 667.0),
    ('L', 556.0),
    ('M', 833.0),
    ('N', 722.0),
    ('O', 778.0),
    ('P', 667.0),
    ('Q', 778.0),
    ('R', 722.0),
    ('S', 667.0),
    ('T', 611.0),
    ('U', 722.0),
    ('V', 667.0),
    ('W', 944.0),
    ('X', 667.0),
    ('Y', 667.0),
    ('Z', 611.0),
    ('[', 278.0),
    ('\\', 278.0),
    (']', 278.0),
    ('^', 469.0),
    ('_', 556.0),
    ('`', 333.0),
    ('a', 556.0),
    ('b', 556.0),
    ('c', 500.0),
    ('d', 556.0),
    ('e', 556.0),
    ('f', 278.0),
    ('g', 556.0),
    ('h', 556.0),
    ('i', 222.0),
    ('j', 222.0),
    ('k', 500.0),
    ('l', 222.0),
    ('m', 833.0),
    ('n', 556.0),
    ('o', 556.0),
    ('p', 556.0),
    ('q', 556.0),
    ('r', 333.0),
    ('s', 500.0),
    ('t', 278.0),
    ('u', 556.0),
    ('v', 500.0),
    ('w', 722.0),
    ('x', 500.0),
    ('y', 500.0),
    ('z', 500.0),
    ('{', 334.0),
    ('|', 260.0),
    ('}', 334.0),
    ('~', 584.0),
];

/// Helvetica bold, standard AFM widths.
const HELVETICA_BOLD: &[(char, f32)] = &[
    (' ', 278.0),
    ('!', 333.0),
    ('"', 474.0),
    ('#', 556.0),
    ('$', 556.0),
    ('%', 889.0),
    ('&', 722.0),
    ('\'', 238.0),
    ('(', 333.0),
    (')', 333.0),
    ('*', 389.0),
    ('+', 584.0),
    (',', 278.0),
    ('-', 333.0),
    ('.', 278.0),
    ('/', 278.0),
    (':', 333.0),
    (';', 333.0),
    ('<', 584.0),
    ('=', 584.0),
    ('>', 584.0),
    ('?', 611.0),
    ('@', 975.0),
    ('A', 722.0),
    ('B', 722.0),
    ('C', 722.0),
    ('D', 722.0),
    ('E', 667.0),
    ('F', 611.0),
    ('G', 778.0),
    ('H', 722.0),
    ('I', 278.0),
    ('J', 556.0),
    ('K', 722.0),
    ('L', 611.0),
    ('M', 833.0),
    ('N', 722.0),
    ('O', 778.0),
    ('P', 667.0),
    ('Q', 778.0),
    ('R', 722.0),
    ('S', 667.0),
    ('T', 611.0),
    ('U', 722.0),
    ('V', 667.0),
    ('W', 944.0),
    ('X', 667.0),
    ('Y', 667.0),
    ('Z', 611.0),
    ('[', 333.0),
    ('\\', 278.0),
    (']', 333.0),
    ('^', 584.0),
    ('_', 556.0),
    ('`', 333.0),
    ('a', 556.0),
    ('b', 611.0),
    ('c', 556.0),
    ('d', 611.0),
    ('e', 556.0),
    ('f', 333.0),
    ('g', 611.0),
    ('h', 611.0),
    ('i', 278.0),
    ('j', 278.0),
    ('k', 556.0),
    ('l', 278.0),
    ('m', 889.0),
    ('n', 611.0),
    ('o', 611.0),
    ('p', 611.0),
    ('q', 611.0),
    ('r', 389.0),
    ('s', 556.0),
    ('t', 333.0),
    ('u', 611.0),
    ('v', 556.0),
    ('w', 778.0),
    ('x', 556.0),
    ('y', 556.0),
    ('z', 500.0),
    ('{', 389.0),
    ('|', 280.0),
    ('}', 389.0),
    ('~', 584.0),
];

/// Times roman, standard AFM widths.
const TIMES_ROMAN: &[(char, f32)] = &[
    (' ', 250.0),
    ('!', 333.0),
    ('"', 408.0),
    ('#', 500.0),
    ('$', 500.0),
    ('%', 833.0),
    ('&', 778.0),
    ('\'', 180.0),
    ('(', 333.0),
    (')', 333.0),
    ('*', 500.0),
    ('+', 564.0),
    (',', 250.0),
    ('-', 333.0),
    ('.', 250.0),
    ('/', 278.0),
    (':', 278.0),
    (';', 278.0),
    ('<', 564.0),
    ('=', 564.0),
    ('>', 564.0),
    ('?', 444.0),
    ('@', 921.0),
    ('A', 722.0),
    ('B', 667.0),
    ('C', 667.0),
    ('D', 722.0),
    ('E', 611.0),
    ('F', 556.0),
    ('G', 722.0),
    ('H', 722.0),
    ('I', 333.0),
    ('J', 389.0),
    ('K', 722.0),
    ('L', 611.0),
    ('M', 889.0),
    ('N', 722.0),
    ('O', 722.0),
    ('P', 556.0),
    ('Q', 722.0),
    ('R', 667.0),
    ('S', 556.0),
    ('T', 611.0),
    ('U', 722.0),
    ('V', 722.0),
    ('W', 944.0),
    ('X', 722.0),
    ('Y', 722.0),
    ('Z', 611.0),
    ('[', 333.0),
    ('\\', 278.0),
    (']', 333.0),
    ('^', 469.0),
    ('_', 500.0),
    ('`', 333.0),
    ('a', 444.0),
    ('b', 500.0),
    ('c', 444.0),
    ('d', 500.0),
    ('e', 444.0),
    ('f', 333.0),
    ('g', 500.0),
    ('h', 500.0),
    ('i', 278.0),
    ('j', 278.0),
    ('k', 500.0),
    ('l', 278.0),
    ('m', 778.0),
    ('n', 500.0),
    ('o', 500.0),
    ('p', 500.0),
    ('q', 500.0),
    ('r', 333.0),
    ('s', 389.0),
    ('t', 278.0),
    ('u', 500.0),
    ('v', 500.0),
    ('w', 722.0),
    ('x', 500.0),
    ('y', 500.0),
    ('z', 444.0),
    ('{', 480.0),
    ('|', 200.0),
    ('}', 480.0),
    ('~', 541.0),
];

/// Times bold, standard AFM widths.
const TIMES_BOLD: &[(char, f32)] = &[
    (' ', 250.0),
    ('!', 333.0),
    ('"', 555.0),
    ('#', 500.0),
    ('$', 500.0),
    ('%', 1000.0),
    ('&', 833.0),
    ('\'', 278.0),
    ('(', 333.0),
    (')', 333.0),
    ('*', 500.0),
    ('+', 570.0),
    (',', 250.0),
    ('-', 333.0),
    ('.', 250.0),
    ('/', 278.0),
    (':', 333.0),
    (';', 333.0),
    ('<', 570.0),
    ('=', 570.0),
    ('>', 570.0),
    ('?', 500.0),
    ('@', 930.0),
    ('A', 722.0),
    ('B', 667.0),
    ('C', 722.0),
    ('D', 722.0),
    ('E', 667.0),
    ('F', 611.0),
    ('G', 778.0),
    ('H', 778.0),
    ('I', 389.0),
    ('J', 500.0),
    ('K', 778.0),
    ('L', 667.0),
    ('M', 944.0),
    ('N', 722.0),
    ('O', 778.0),
    ('P', 611.0),
    ('Q', 778.0),
    ('R', 722.0),
    ('S', 556.0),
    ('T', 667.0),
    ('U', 722.0),
    ('V', 722.0),
    ('W', 1000.0),
    ('X', 722.0),
    ('Y', 722.0),
    ('Z', 667.0),
    ('[', 333.0),
    ('\\', 278.0),
    (']', 333.0),
    ('^', 581.0),
    ('_', 500.0),
    ('`', 333.0),
    ('a', 500.0),
    ('b', 556.0),
    ('c', 444.0),
    ('d', 556.0),
    ('e', 444.0),
    ('f', 333.0),
    ('g', 500.0),
    ('h', 556.0),
    ('i', 278.0),
    ('j', 333.0),
    ('k', 556.0),
    ('l', 278.0),
    ('m', 833.0),
    ('n', 556.0),
    ('o', 500.0),
    ('p', 556.0),
    ('q', 556.0),
    ('r', 444.0),
    ('s', 389.0),
    ('t', 333.0),
    ('u', 556.0),
    ('v', 500.0),
    ('w', 722.0),
    ('x', 500.0),
    ('y', 500.0),
    ('z', 444.0),
    ('{', 394.0),
    ('|', 220.0),
    ('}', 394.0),
    ('~', 520.0),
];
