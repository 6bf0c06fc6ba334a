// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod env;
mod font;
mod renderer;

pub(crate) use env::{
    container, TestEnv, ADVANCE, ASCENT, LIGATURE_FAMILY, LINE_HEIGHT, MISSING,
};
pub(crate) use font::TestFont;
pub(crate) use renderer::RecordingRenderer;

/// Asserts that two lengths are equal up to rounding.
#[track_caller]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

/// Characters of the glyphs of a glyph string, in glyph order.
pub(crate) fn glyph_text(glyphs: &crate::GlyphString) -> String {
    glyphs
        .glyphs()
        .flat_map(|glyph| glyph.code_points.iter())
        .collect()
}
