// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio is a headless rich text typesetting engine.
//!
//! Text styled with [`Style`] runs is converted into a [`GlyphString`] through a
//! caller-supplied [`FontProvider`], then flowed into one or more [`Container`]s:
//! arbitrary polygons with optional exclusion holes, split into columns. The result is a
//! list of [`Block`]s per container, each holding [`LineFragment`]s with positioned glyphs,
//! justification adjustments, ellipsis truncation and decoration geometry.
//!
//! Font parsing and shaping, Unicode segmentation and hyphenation dictionaries are
//! external collaborators reached through the traits in [`font`] and [`analysis`].
//! [`Capabilities::default`] wires ICU4X segmenters, `unicode-script`, `unicode-bidi`
//! and `hypher` for the latter.
//!
//! The layout entry point is [`LayoutEngine::layout`]; [`render`] walks the finished
//! containers for drawing.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use attributed_text;
pub use peniko;
pub use peniko::kurbo;

mod error;
mod render;
mod util;

pub mod analysis;
pub mod font;
pub mod geometry;
pub mod glyph;
pub mod layout;
pub mod style;

#[cfg(test)]
mod tests;

pub use analysis::Capabilities;
pub use error::Error;
pub use font::{Font, FontCollection, FontDescriptor, FontHandle, FontProvider};
pub use geometry::{LineFragmentGenerator, Polygon};
pub use glyph::{generate_glyphs, GlyphRun, GlyphString};
pub use layout::{
    Block, Container, DecorationEngine, DecorationLine, JustificationEngine, LayoutEngine,
    LineBreak, LineBreaker, LineFragment, TabEngine, TabStop, TruncationEngine,
};
pub use render::{render, Renderer};
pub use style::{
    Alignment, Attachment, AttributedStringBuilder, DecorationStyle, ParagraphStyle, ScriptTag,
    Style, StyleProperty, TabAlignment, TruncationMode,
};
