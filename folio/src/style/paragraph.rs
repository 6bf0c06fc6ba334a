// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Alignment, Style, TruncationMode};

/// Paragraph level attributes with defaults filled in.
///
/// Resolved from the style of the first run of a paragraph.
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphStyle {
    /// Alignment of every line but the last.
    pub align: Alignment,
    /// Alignment of the last line.
    pub align_last_line: Alignment,
    /// Fixed line height; `None` derives it from the fonts of the paragraph.
    pub line_height: Option<f64>,
    /// Extra space between lines.
    pub line_spacing: f64,
    /// Extra space after the paragraph.
    pub paragraph_spacing: f64,
    /// First line indent.
    pub indent: f64,
    /// Left margin.
    pub margin_left: f64,
    /// Right margin.
    pub margin_right: f64,
    /// Ellipsis placement for content that does not fit.
    pub truncation_mode: Option<TruncationMode>,
    /// Maximum number of lines.
    pub max_lines: usize,
    /// Hyphenation threshold in `0.0..=1.0`.
    pub hyphenation_factor: f32,
    /// Justification stretch fraction in `0.0..=1.0`.
    pub justification_factor: f32,
    /// Whether punctuation may hang outside the line box.
    pub hanging_punctuation: bool,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self::resolve(&Style::default())
    }
}

impl ParagraphStyle {
    /// Resolves the paragraph attributes of `style`.
    pub fn resolve(style: &Style) -> Self {
        let align = style.align.unwrap_or_default();
        let align_last_line = style.align_last_line.unwrap_or(match align {
            Alignment::Justify => Alignment::Left,
            other => other,
        });
        Self {
            align,
            align_last_line,
            line_height: style.line_height.map(f64::from),
            line_spacing: style.line_spacing.map_or(0.0, f64::from),
            paragraph_spacing: style.paragraph_spacing.map_or(0.0, f64::from),
            indent: style.indent.map_or(0.0, f64::from),
            margin_left: style.margin_left.map_or(0.0, f64::from),
            margin_right: style.margin_right.map_or(0.0, f64::from),
            truncation_mode: style.truncation_mode,
            max_lines: style.max_lines.unwrap_or(usize::MAX),
            hyphenation_factor: style.hyphenation_factor.unwrap_or(0.0),
            justification_factor: style.justification_factor.unwrap_or(1.0),
            hanging_punctuation: style.hanging_punctuation.unwrap_or(false),
        }
    }
}
