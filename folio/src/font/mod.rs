// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font capabilities consumed by layout.
//!
//! Folio does not parse font files or shape text itself. A [`Font`] implementation
//! supplies shaped glyphs and metrics; a [`FontProvider`] resolves style attributes to
//! fonts and offers fallbacks for characters the resolved font lacks.

mod cache;
mod collection;

use core::fmt;
use core::ops::Deref;
use std::sync::Arc;

use icu_properties::props::{GeneralCategory, GeneralCategoryGroup};
use icu_properties::CodePointMapData;
use peniko::kurbo::BezPath;
use smallvec::SmallVec;

use crate::style::{FontFeature, ScriptTag, Style};
use crate::Error;

pub use cache::FontCache;
pub use collection::FontCollection;

/// Identifier of a glyph within its font.
pub type GlyphId = u32;

/// Vertical metrics of a font, in font units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the line box, positive.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box, negative below the baseline.
    pub descent: f32,
    /// Recommended gap between lines.
    pub line_gap: f32,
    /// Number of font units per em.
    pub units_per_em: f32,
}

/// A glyph produced by shaping.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    /// Glyph identifier in its font.
    pub id: GlyphId,
    /// The characters this glyph was shaped from. More than one for ligatures.
    pub code_points: SmallVec<[char; 2]>,
    /// Nominal advance in font units.
    pub advance_width: f32,
}

impl Glyph {
    /// Creates a glyph for a single character.
    pub fn new(id: GlyphId, ch: char, advance_width: f32) -> Self {
        Self {
            id,
            code_points: SmallVec::from_slice(&[ch]),
            advance_width,
        }
    }

    /// Whether every source character of the glyph is whitespace.
    pub fn is_whitespace(&self) -> bool {
        !self.code_points.is_empty() && self.code_points.iter().all(|ch| ch.is_whitespace())
    }

    /// Whether the glyph is a combining mark.
    pub fn is_mark(&self) -> bool {
        self.code_points.first().is_some_and(|&ch| {
            GeneralCategoryGroup::Mark.contains(CodePointMapData::<GeneralCategory>::new().get(ch))
        })
    }

    /// Whether the glyph stands for more than one character.
    pub fn is_ligature(&self) -> bool {
        self.code_points.len() > 1
    }

    /// Whether the glyph was shaped from exactly the character `ch`.
    pub fn is_char(&self, ch: char) -> bool {
        self.code_points.as_slice() == [ch]
    }
}

/// Placement of a glyph relative to the pen position.
///
/// Shapers report these in font units; glyph runs store them scaled to pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GlyphPosition {
    /// Horizontal pen advance.
    pub x_advance: f32,
    /// Vertical pen advance.
    pub y_advance: f32,
    /// Horizontal displacement of the glyph from the pen.
    pub x_offset: f32,
    /// Vertical displacement of the glyph from the pen, positive raises.
    pub y_offset: f32,
}

impl GlyphPosition {
    /// A position that only advances the pen.
    pub fn advance(x_advance: f32) -> Self {
        Self {
            x_advance,
            ..Self::default()
        }
    }
}

/// Output of [`Font::layout`].
///
/// The three vectors are parallel. Glyphs are in logical order, so `string_indices` is
/// non-decreasing. Each string index is the byte offset, relative to the shaped text, of
/// the first character of the cluster the glyph belongs to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedText {
    /// Shaped glyphs.
    pub glyphs: Vec<Glyph>,
    /// Glyph positions in font units.
    pub positions: Vec<GlyphPosition>,
    /// Cluster start offset of each glyph.
    pub string_indices: Vec<usize>,
}

/// A shaping-capable font.
pub trait Font: fmt::Debug + Send + Sync {
    /// Vertical metrics in font units.
    fn metrics(&self) -> FontMetrics;

    /// Shapes `text` into glyphs in logical order.
    fn layout(&self, text: &str, features: &[FontFeature], script: Option<ScriptTag>)
        -> ShapedText;

    /// Returns the nominal glyph for `ch`, which may be the notdef glyph.
    fn glyph_for_code_point(&self, ch: char) -> Glyph;

    /// Whether the font maps `ch` to a real glyph.
    fn has_glyph_for_code_point(&self, ch: char) -> bool;

    /// Outline of a glyph in font units with y pointing up, if it has one.
    fn glyph_outline(&self, id: GlyphId) -> Option<BezPath>;
}

/// A shared handle to a [`Font`].
///
/// Handles compare equal when they point to the same font instance.
#[derive(Clone)]
pub struct FontHandle(Arc<dyn Font>);

impl FontHandle {
    /// Wraps a font.
    pub fn new(font: impl Font + 'static) -> Self {
        Self(Arc::new(font))
    }

    /// Factor converting font units to pixels at `font_size`.
    pub fn scale(&self, font_size: f32) -> f32 {
        let units_per_em = self.0.metrics().units_per_em;
        if units_per_em > 0.0 {
            font_size / units_per_em
        } else {
            0.0
        }
    }
}

impl From<Arc<dyn Font>> for FontHandle {
    fn from(value: Arc<dyn Font>) -> Self {
        Self(value)
    }
}

impl Deref for FontHandle {
    type Target = dyn Font;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for FontHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontHandle").field(&self.0).finish()
    }
}

/// Attributes identifying a font face within a provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontDescriptor {
    /// Family name.
    pub family: Arc<str>,
    /// Weight, `400` is regular.
    pub weight: u16,
    /// Whether the face is italic.
    pub italic: bool,
}

impl FontDescriptor {
    /// Creates a descriptor.
    pub fn new(family: impl Into<Arc<str>>, weight: u16, italic: bool) -> Self {
        Self {
            family: family.into(),
            weight,
            italic,
        }
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.weight)?;
        if self.italic {
            f.write_str(" italic")?;
        }
        Ok(())
    }
}

/// Resolves style attributes to fonts.
pub trait FontProvider {
    /// Builds the descriptor requested by `style`.
    fn find_descriptor(&self, style: &Style) -> FontDescriptor;

    /// Suggests a descriptor of a font that may cover `ch`, which `descriptor` does not.
    fn substitute(&mut self, descriptor: &FontDescriptor, ch: char) -> Option<FontDescriptor>;

    /// Loads the font for `descriptor`.
    fn load(&mut self, descriptor: &FontDescriptor) -> Result<FontHandle, Error>;
}
