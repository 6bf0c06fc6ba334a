// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The glyph text model.
//!
//! [`generate_glyphs`] turns an attributed paragraph into a [`GlyphString`]: a sequence
//! of [`GlyphRun`]s, each shaped with one font and style, which line breaking then slices
//! and mutates.

mod generate;
mod itemize;
mod run;
mod string;

pub use generate::generate_glyphs;
pub use run::GlyphRun;
pub use string::GlyphString;

pub(crate) use run::OBJECT_REPLACEMENT;
