// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::font::FontDescriptor;

/// Errors reported by glyph generation and layout.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A factor that must lie in `0.0..=1.0` did not.
    ///
    /// Raised before any container or glyph string is mutated.
    InvalidFactor {
        /// Name of the offending style key.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// The font provider could not load a font for the descriptor.
    FontNotFound(FontDescriptor),
    /// A glyph index was past the end of a glyph string.
    GlyphIndexOutOfBounds {
        /// The rejected index.
        index: usize,
        /// Number of glyphs in the string.
        len: usize,
    },
    /// A glyph was inserted into a glyph string that has no run to carry its style.
    EmptyGlyphString,
    /// A text range did not fit the attributed string.
    Text(attributed_text::Error),
}

impl Error {
    pub(crate) fn check_factor(name: &'static str, value: f32) -> Result<(), Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::InvalidFactor { name, value })
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFactor { name, value } => {
                write!(f, "{name} must be within 0..=1, got {value}")
            }
            Self::FontNotFound(descriptor) => write!(f, "no font found for {descriptor}"),
            Self::GlyphIndexOutOfBounds { index, len } => {
                write!(f, "glyph index {index} out of bounds for {len} glyphs")
            }
            Self::EmptyGlyphString => f.write_str("cannot insert into an empty glyph string"),
            Self::Text(err) => write!(f, "invalid text range: {err}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Text(err) => Some(err),
            _ => None,
        }
    }
}

impl From<attributed_text::Error> for Error {
    fn from(value: attributed_text::Error) -> Self {
        Self::Text(value)
    }
}
