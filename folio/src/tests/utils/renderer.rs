// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{Point, Rect};

use crate::glyph::GlyphRun;
use crate::layout::DecorationLine;
use crate::render::Renderer;
use crate::style::Attachment;

/// Records everything it is asked to draw.
#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    /// Origin and characters of every glyph run.
    pub(crate) runs: Vec<(Point, String)>,
    pub(crate) decorations: Vec<DecorationLine>,
    pub(crate) attachments: Vec<Rect>,
}

impl Renderer for RecordingRenderer {
    fn glyph_run(&mut self, origin: Point, run: &GlyphRun) {
        let text = run
            .glyphs()
            .iter()
            .flat_map(|glyph| glyph.code_points.iter())
            .collect();
        self.runs.push((origin, text));
    }

    fn decoration(&mut self, line: &DecorationLine) {
        self.decorations.push(line.clone());
    }

    fn attachment(&mut self, rect: Rect, _attachment: &Attachment) {
        self.attachments.push(rect);
    }
}
