// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use attributed_text::AttributedString;
use peniko::kurbo::Rect;

use super::TestFont;
use crate::font::{FontCollection, FontHandle};
use crate::glyph::{generate_glyphs, GlyphString};
use crate::layout::{Container, LayoutEngine, LineFragment};
use crate::style::{AttributedStringBuilder, Style, StyleProperty};
use crate::{Capabilities, Error};

/// Font size at which the test font advances exactly 8 pixels per character.
pub(crate) const FONT_SIZE: f32 = 16.0;
/// Advance of one character at [`FONT_SIZE`].
pub(crate) const ADVANCE: f64 = 8.0;
/// Line height at [`FONT_SIZE`].
pub(crate) const LINE_HEIGHT: f64 = 16.0;
/// Ascent at [`FONT_SIZE`].
pub(crate) const ASCENT: f64 = 12.0;

/// Characters only the fallback family supports.
pub(crate) const MISSING: &str = "\u{2603}";

pub(crate) const DEFAULT_FAMILY: &str = "Test";
pub(crate) const FALLBACK_FAMILY: &str = "Fallback";
pub(crate) const LIGATURE_FAMILY: &str = "Ligatures";

pub(crate) struct TestEnv {
    collection: FontCollection,
    capabilities: Capabilities,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        let mut collection = FontCollection::new(DEFAULT_FAMILY);
        collection
            .register(
                DEFAULT_FAMILY,
                400,
                false,
                FontHandle::new(TestFont::new().with_missing(MISSING)),
            )
            .register(FALLBACK_FAMILY, 400, false, FontHandle::new(TestFont::new()))
            .register(
                LIGATURE_FAMILY,
                400,
                false,
                FontHandle::new(TestFont::new().with_ligatures()),
            )
            .add_fallback(FALLBACK_FAMILY);
        Self {
            collection,
            capabilities: Capabilities::default(),
        }
    }

    pub(crate) fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// A builder with the test font size applied to the whole text.
    pub(crate) fn builder(&self, text: &str) -> AttributedStringBuilder {
        let mut builder = AttributedStringBuilder::new(text);
        builder.push_default(StyleProperty::FontSize(FONT_SIZE));
        builder
    }

    pub(crate) fn attributed(&self, text: &str) -> AttributedString<Style> {
        self.builder(text).build().unwrap()
    }

    pub(crate) fn glyphs(&mut self, text: &str) -> GlyphString {
        let text = self.attributed(text);
        self.shape(&text)
    }

    pub(crate) fn shape(&mut self, text: &AttributedString<Style>) -> GlyphString {
        self.try_shape(text).unwrap()
    }

    pub(crate) fn try_shape(
        &mut self,
        text: &AttributedString<Style>,
    ) -> Result<GlyphString, Error> {
        generate_glyphs(text, &mut self.collection, &self.capabilities)
    }

    /// A line fragment at the origin holding `text`.
    pub(crate) fn line(&mut self, text: &str, width: f64) -> LineFragment {
        let glyphs = self.glyphs(text);
        LineFragment::new(Rect::new(0.0, 0.0, width, LINE_HEIGHT), glyphs)
    }

    pub(crate) fn engine(self) -> LayoutEngine<FontCollection> {
        LayoutEngine::with_capabilities(self.collection, self.capabilities)
    }
}

/// A rectangular container at the origin.
pub(crate) fn container(width: f64, height: f64) -> Container {
    Container::new(Rect::new(0.0, 0.0, width, height))
}
