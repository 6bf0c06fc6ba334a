// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich styling support.

mod builder;
mod paragraph;

use core::fmt;
use std::sync::Arc;

use attributed_text::Merge;
use peniko::Color;

use crate::font::FontHandle;

pub use builder::AttributedStringBuilder;
pub use paragraph::ParagraphStyle;

/// Font size used when no run specifies one.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Font weight used when no run specifies one.
pub const DEFAULT_FONT_WEIGHT: u16 = 400;

/// Horizontal alignment of a line within its fragment rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Align content to the left edge.
    #[default]
    Left,
    /// Center content.
    Center,
    /// Align content to the right edge.
    Right,
    /// Stretch or shrink content to fill the rectangle.
    Justify,
}

/// Where content is removed when a line is ellipsized.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TruncationMode {
    /// Remove content at the start of the line.
    Left,
    /// Remove content around the middle of the line.
    Center,
    /// Remove content at the end of the line.
    Right,
}

/// Stroke style of an underline or strikethrough.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DecorationStyle {
    /// A continuous line.
    #[default]
    Solid,
    /// A dashed line.
    Dashed,
    /// A dotted line.
    Dotted,
    /// A wavy line.
    Wavy,
    /// Two parallel lines.
    Double,
}

/// How text following a tab is aligned to the tab stop.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TabAlignment {
    /// Text starts at the stop.
    #[default]
    Left,
    /// Text is centered on the stop.
    Center,
    /// Text ends at the stop.
    Right,
    /// The decimal point is centered on the stop.
    Decimal,
}

/// An ISO 15924 script tag, such as `Latn` or `Arab`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptTag(pub [u8; 4]);

impl ScriptTag {
    /// Characters shared by several scripts.
    pub const COMMON: Self = Self(*b"Zyyy");
    /// Characters inheriting the script of the preceding character.
    pub const INHERITED: Self = Self(*b"Zinh");
    /// Unassigned or unknown characters.
    pub const UNKNOWN: Self = Self(*b"Zzzz");

    /// Creates a tag from its four letter name.
    ///
    /// Returns `None` if `name` is not four ASCII bytes long.
    pub fn from_name(name: &str) -> Option<Self> {
        let bytes: [u8; 4] = name.as_bytes().try_into().ok()?;
        bytes.is_ascii().then_some(Self(bytes))
    }

    /// Returns the four letter name of the script.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap_or("Zzzz")
    }

    /// Whether the script continues the script of its neighbors rather than starting a run.
    pub fn is_neutral(self) -> bool {
        matches!(self, Self::COMMON | Self::INHERITED | Self::UNKNOWN)
    }
}

impl fmt::Debug for ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptTag({})", self.as_str())
    }
}

impl fmt::Display for ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An OpenType feature setting passed to the shaper.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontFeature {
    /// The four byte feature tag, such as `liga`.
    pub tag: [u8; 4],
    /// Feature value; `0` disables, `1` enables.
    pub value: u16,
}

impl FontFeature {
    /// Creates a feature setting.
    pub const fn new(tag: &[u8; 4], value: u16) -> Self {
        Self { tag: *tag, value }
    }
}

/// An inline object that occupies the slot of an object replacement character (U+FFFC).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attachment {
    /// Width in pixels; becomes the glyph's advance.
    pub width: f32,
    /// Height in pixels; the line ascent grows to at least this value.
    pub height: f32,
}

/// A set of style attributes applied to a range of text.
///
/// Every attribute is optional. When runs overlap, attributes set by later runs take
/// precedence key by key (see [`Merge`]); unset attributes fall back to defaults at use.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// Explicit font, bypassing the font provider.
    pub font: Option<FontHandle>,
    /// Font family name.
    pub font_family: Option<Arc<str>>,
    /// Font weight, `400` is regular.
    pub font_weight: Option<u16>,
    /// Whether an italic face is requested.
    pub italic: Option<bool>,
    /// Font size in pixels.
    pub font_size: Option<f32>,
    /// Shaper feature settings.
    pub features: Option<Arc<[FontFeature]>>,
    /// Script override.
    pub script: Option<ScriptTag>,
    /// Bidi embedding level override.
    pub bidi_level: Option<u8>,
    /// Fill color.
    pub color: Option<Color>,
    /// Horizontal alignment of lines.
    pub align: Option<Alignment>,
    /// Alignment of the last line of a paragraph.
    pub align_last_line: Option<Alignment>,
    /// Fixed line height in pixels.
    pub line_height: Option<f32>,
    /// Extra space between lines of a paragraph.
    pub line_spacing: Option<f32>,
    /// Extra space after a paragraph.
    pub paragraph_spacing: Option<f32>,
    /// First line indent.
    pub indent: Option<f32>,
    /// Left margin.
    pub margin_left: Option<f32>,
    /// Right margin.
    pub margin_right: Option<f32>,
    /// Ellipsis placement when a paragraph does not fit.
    pub truncation_mode: Option<TruncationMode>,
    /// Maximum number of lines in a paragraph.
    pub max_lines: Option<usize>,
    /// Fraction of the line width below which hyphenation is attempted.
    pub hyphenation_factor: Option<f32>,
    /// Fraction of the natural stretch available to justification.
    pub justification_factor: Option<f32>,
    /// Whether punctuation may hang outside the line box.
    pub hanging_punctuation: Option<bool>,
    /// Underline decoration.
    pub underline: Option<bool>,
    /// Underline color.
    pub underline_color: Option<Color>,
    /// Underline stroke style.
    pub underline_style: Option<DecorationStyle>,
    /// Strikethrough decoration.
    pub strike: Option<bool>,
    /// Strikethrough color.
    pub strike_color: Option<Color>,
    /// Strikethrough stroke style.
    pub strike_style: Option<DecorationStyle>,
    /// Extra advance added to whitespace glyphs.
    pub word_spacing: Option<f32>,
    /// Extra advance added to every glyph.
    pub character_spacing: Option<f32>,
    /// Inline object for U+FFFC characters.
    pub attachment: Option<Attachment>,
    /// Vertical shift of glyphs, positive raises.
    pub y_offset: Option<f32>,
}

macro_rules! merge_fields {
    ($dst:ident, $src:ident; $($field:ident),* $(,)?) => {
        $( $dst.$field.merge(&$src.$field); )*
    };
}

impl Merge for Style {
    fn merge(&mut self, other: &Self) {
        merge_fields!(
            self, other;
            font, font_family, font_weight, italic, font_size, features, script, bidi_level,
            color, align, align_last_line, line_height, line_spacing, paragraph_spacing,
            indent, margin_left, margin_right, truncation_mode, max_lines, hyphenation_factor,
            justification_factor, hanging_punctuation, underline, underline_color,
            underline_style, strike, strike_color, strike_style, word_spacing,
            character_spacing, attachment, y_offset,
        );
    }
}

impl Style {
    /// Sets one attribute.
    pub fn apply(&mut self, property: StyleProperty) {
        use StyleProperty as P;
        match property {
            P::Font(value) => self.font = Some(value),
            P::FontFamily(value) => self.font_family = Some(value),
            P::FontWeight(value) => self.font_weight = Some(value),
            P::Italic(value) => self.italic = Some(value),
            P::FontSize(value) => self.font_size = Some(value),
            P::Features(value) => self.features = Some(value),
            P::Script(value) => self.script = Some(value),
            P::BidiLevel(value) => self.bidi_level = Some(value),
            P::Color(value) => self.color = Some(value),
            P::Align(value) => self.align = Some(value),
            P::AlignLastLine(value) => self.align_last_line = Some(value),
            P::LineHeight(value) => self.line_height = Some(value),
            P::LineSpacing(value) => self.line_spacing = Some(value),
            P::ParagraphSpacing(value) => self.paragraph_spacing = Some(value),
            P::Indent(value) => self.indent = Some(value),
            P::MarginLeft(value) => self.margin_left = Some(value),
            P::MarginRight(value) => self.margin_right = Some(value),
            P::TruncationMode(value) => self.truncation_mode = Some(value),
            P::MaxLines(value) => self.max_lines = Some(value),
            P::HyphenationFactor(value) => self.hyphenation_factor = Some(value),
            P::JustificationFactor(value) => self.justification_factor = Some(value),
            P::HangingPunctuation(value) => self.hanging_punctuation = Some(value),
            P::Underline(value) => self.underline = Some(value),
            P::UnderlineColor(value) => self.underline_color = Some(value),
            P::UnderlineStyle(value) => self.underline_style = Some(value),
            P::Strike(value) => self.strike = Some(value),
            P::StrikeColor(value) => self.strike_color = Some(value),
            P::StrikeStyle(value) => self.strike_style = Some(value),
            P::WordSpacing(value) => self.word_spacing = Some(value),
            P::CharacterSpacing(value) => self.character_spacing = Some(value),
            P::Attachment(value) => self.attachment = Some(value),
            P::YOffset(value) => self.y_offset = Some(value),
        }
    }

    /// Returns a style with a single attribute set.
    pub fn from_property(property: StyleProperty) -> Self {
        let mut style = Self::default();
        style.apply(property);
        style
    }

    /// The font size, or [`DEFAULT_FONT_SIZE`].
    pub fn resolved_font_size(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Checks the attributes that are restricted to `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if let Some(value) = self.hyphenation_factor {
            crate::Error::check_factor("hyphenation_factor", value)?;
        }
        if let Some(value) = self.justification_factor {
            crate::Error::check_factor("justification_factor", value)?;
        }
        Ok(())
    }
}

/// A single style attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleProperty {
    /// Explicit font.
    Font(FontHandle),
    /// Font family name.
    FontFamily(Arc<str>),
    /// Font weight.
    FontWeight(u16),
    /// Italic face.
    Italic(bool),
    /// Font size in pixels.
    FontSize(f32),
    /// Shaper feature settings.
    Features(Arc<[FontFeature]>),
    /// Script override.
    Script(ScriptTag),
    /// Bidi embedding level.
    BidiLevel(u8),
    /// Fill color.
    Color(Color),
    /// Line alignment.
    Align(Alignment),
    /// Alignment of the last line.
    AlignLastLine(Alignment),
    /// Fixed line height.
    LineHeight(f32),
    /// Space between lines.
    LineSpacing(f32),
    /// Space after paragraphs.
    ParagraphSpacing(f32),
    /// First line indent.
    Indent(f32),
    /// Left margin.
    MarginLeft(f32),
    /// Right margin.
    MarginRight(f32),
    /// Ellipsis placement.
    TruncationMode(TruncationMode),
    /// Maximum line count.
    MaxLines(usize),
    /// Hyphenation threshold.
    HyphenationFactor(f32),
    /// Justification stretch fraction.
    JustificationFactor(f32),
    /// Hanging punctuation.
    HangingPunctuation(bool),
    /// Underline.
    Underline(bool),
    /// Underline color.
    UnderlineColor(Color),
    /// Underline style.
    UnderlineStyle(DecorationStyle),
    /// Strikethrough.
    Strike(bool),
    /// Strikethrough color.
    StrikeColor(Color),
    /// Strikethrough style.
    StrikeStyle(DecorationStyle),
    /// Extra whitespace advance.
    WordSpacing(f32),
    /// Extra advance per glyph.
    CharacterSpacing(f32),
    /// Inline object.
    Attachment(Attachment),
    /// Vertical glyph shift.
    YOffset(f32),
}

#[cfg(test)]
mod tests {
    use super::{Alignment, ScriptTag, Style, StyleProperty};
    use attributed_text::Merge;

    #[test]
    fn merge_prefers_values_from_other() {
        let mut base = Style::from_property(StyleProperty::FontSize(10.0));
        base.apply(StyleProperty::Align(Alignment::Center));
        let overlay = Style::from_property(StyleProperty::FontSize(14.0));
        base.merge(&overlay);
        assert_eq!(base.font_size, Some(14.0));
        assert_eq!(base.align, Some(Alignment::Center));
    }

    #[test]
    fn script_tags() {
        let latin = ScriptTag::from_name("Latn").unwrap();
        assert_eq!(latin.as_str(), "Latn");
        assert!(!latin.is_neutral());
        assert!(ScriptTag::INHERITED.is_neutral());
        assert!(ScriptTag::from_name("Latin").is_none());
    }

    #[test]
    fn validation_checks_factors() {
        let style = Style::from_property(StyleProperty::JustificationFactor(2.0));
        assert!(style.validate().is_err());
        let style = Style::from_property(StyleProperty::HyphenationFactor(0.5));
        assert!(style.validate().is_ok());
    }
}
