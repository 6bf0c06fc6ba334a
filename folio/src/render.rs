// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing laid out containers.

use peniko::kurbo::{Point, Rect, Vec2};

use crate::glyph::{GlyphRun, OBJECT_REPLACEMENT};
use crate::layout::{Container, DecorationLine};
use crate::style::Attachment;

/// Receives the drawable parts of laid out text.
///
/// All coordinates are absolute, in the space of the containers.
pub trait Renderer {
    /// Draws a glyph run with its pen starting at `origin`, on the baseline.
    fn glyph_run(&mut self, origin: Point, run: &GlyphRun);

    /// Fills an underline or strikethrough.
    fn decoration(&mut self, line: &DecorationLine);

    /// Draws an inline object into `rect`.
    fn attachment(&mut self, rect: Rect, attachment: &Attachment) {
        let _ = (rect, attachment);
    }
}

/// Walks the blocks of `containers` and hands every line to `renderer`.
pub fn render(containers: &[Container], renderer: &mut impl Renderer) {
    for line in containers
        .iter()
        .flat_map(Container::blocks)
        .flat_map(|block| block.lines())
    {
        let origin = line.origin();
        let mut x = origin.x;
        for run in line.glyphs().runs() {
            renderer.glyph_run(Point::new(x, origin.y), run);
            if let Some(attachment) = &run.style().attachment {
                draw_attachments(renderer, Point::new(x, origin.y), run, attachment);
            }
            x += run.advance_width();
        }
        let offset = Vec2::new(origin.x, line.rect().y0);
        for decoration in line.decoration_lines() {
            renderer.decoration(&DecorationLine {
                rect: decoration.rect + offset,
                ..decoration.clone()
            });
        }
    }
}

fn draw_attachments(
    renderer: &mut impl Renderer,
    origin: Point,
    run: &GlyphRun,
    attachment: &Attachment,
) {
    let mut x = origin.x;
    for (glyph, position) in run.glyphs().iter().zip(run.positions()) {
        if glyph.is_char(OBJECT_REPLACEMENT) {
            let bottom = origin.y - f64::from(position.y_offset);
            let rect = Rect::new(
                x + f64::from(position.x_offset),
                bottom - f64::from(attachment.height),
                x + f64::from(position.x_offset) + f64::from(attachment.width),
                bottom,
            );
            renderer.attachment(rect, attachment);
        }
        x += f64::from(position.x_advance);
    }
}
