// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph and column flow.

use core::ops::Range;

use attributed_text::AttributedString;
use peniko::kurbo::Rect;

use super::line_break::HYPHEN;
use super::{
    Block, Container, DecorationEngine, JustificationEngine, LineBreaker, LineFragment, TabEngine,
    TruncationEngine,
};
use crate::analysis::Capabilities;
use crate::font::{FontProvider, Glyph};
use crate::geometry::LineFragmentGenerator;
use crate::glyph::{generate_glyphs, GlyphRun, GlyphString};
use crate::style::{Alignment, ParagraphStyle, Style, TruncationMode};
use crate::util::{is_closing_punctuation, is_opening_punctuation, nearly_eq, EPSILON};
use crate::Error;

/// Lower bound for band heights, so that flow always makes progress.
const MIN_LINE_HEIGHT: f64 = 1.0;

/// Lays out attributed text into containers.
///
/// The engine owns the font provider, which typically caches loaded fonts across
/// layouts, and the analysis capabilities.
#[derive(Debug)]
pub struct LayoutEngine<P> {
    provider: P,
    capabilities: Capabilities,
}

impl<P: FontProvider> LayoutEngine<P> {
    /// Creates an engine with the default [`Capabilities`].
    pub fn new(provider: P) -> Self {
        Self::with_capabilities(provider, Capabilities::default())
    }

    /// Creates an engine with custom analysis capabilities.
    pub fn with_capabilities(provider: P, capabilities: Capabilities) -> Self {
        Self {
            provider,
            capabilities,
        }
    }

    /// The font provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the font provider.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// The analysis capabilities.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Consumes the engine, returning the font provider.
    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Lays out `text` into `containers`, replacing their previous blocks.
    ///
    /// Each line of text separated by `\n` is a paragraph. Paragraphs fill the columns of
    /// the first container from top to bottom, then continue in the next container.
    /// Content that does not fit the last container is either ellipsized into the last
    /// line, when the paragraph has a truncation mode, or dropped. Either way the last
    /// block and line are marked truncated.
    ///
    /// Attribute values are validated before anything is laid out.
    pub fn layout(
        &mut self,
        text: &AttributedString<Style>,
        containers: &mut [Container],
    ) -> Result<(), Error> {
        for run in text.runs() {
            run.attributes.validate()?;
        }
        for container in containers.iter_mut() {
            container.clear();
        }
        if text.is_empty() || containers.is_empty() {
            return Ok(());
        }
        let mut typesetter = Typesetter {
            provider: &mut self.provider,
            capabilities: &self.capabilities,
            flow: Flow::new(containers),
        };
        let mut start = 0;
        for paragraph in text.text().split('\n') {
            let range = start..start + paragraph.len();
            start = range.end + 1;
            if typesetter.flow.is_exhausted(containers) {
                log::debug!("Containers are full, skipping text from byte {}", range.start);
                mark_truncated(containers);
                break;
            }
            typesetter.paragraph(text, range, containers)?;
        }
        Ok(())
    }
}

/// A line waiting for finalization.
struct PendingLine {
    container: usize,
    start: usize,
    line: LineFragment,
}

struct Typesetter<'a> {
    provider: &'a mut dyn FontProvider,
    capabilities: &'a Capabilities,
    flow: Flow,
}

impl Typesetter<'_> {
    fn paragraph(
        &mut self,
        text: &AttributedString<Style>,
        range: Range<usize>,
        containers: &mut [Container],
    ) -> Result<(), Error> {
        let style = paragraph_source_style(text, range.start);
        let paragraph = ParagraphStyle::resolve(&style);
        log::debug!("Laying out paragraph {range:?}");
        let source = text.slice(range.clone())?;
        let mut glyphs = generate_glyphs(&source, &mut *self.provider, self.capabilities)?;

        if glyphs.is_empty() {
            let height = match paragraph.line_height {
                Some(height) => height,
                None => font_line_height(&mut *self.provider, &style)?,
            };
            let height = height.max(MIN_LINE_HEIGHT);
            let Some((container, slab)) = self.flow.next_band(containers, height, 0.0) else {
                log::debug!("No room left for empty paragraph at byte {}", range.start);
                return Ok(());
            };
            let x0 = slab.x0 + paragraph.margin_left + paragraph.indent;
            let x1 = (slab.x1 - paragraph.margin_right).max(x0);
            let mut line = LineFragment::new(Rect::new(x0, slab.y0, x1, slab.y1), glyphs);
            line.text_range = range.start..range.start;
            place(
                containers,
                &range,
                vec![PendingLine {
                    container,
                    start: 0,
                    line,
                }],
            );
            self.flow.add_spacing(paragraph.paragraph_spacing);
            return Ok(());
        }

        let breaker = LineBreaker::from_capabilities(self.capabilities);
        let height = paragraph
            .line_height
            .unwrap_or_else(|| glyphs.height())
            .max(MIN_LINE_HEIGHT);
        let mut lines: Vec<PendingLine> = Vec::new();
        let mut hyphens: Vec<usize> = Vec::new();
        let mut last_hyphenated = false;
        let mut start = 0;
        let mut bands = 0;
        while start < glyphs.len() && bands < paragraph.max_lines {
            let spacing = if lines.is_empty() {
                0.0
            } else {
                paragraph.line_spacing
            };
            let Some((container, slab)) = self.flow.next_band(containers, height, spacing) else {
                break;
            };
            let indent = if lines.is_empty() {
                paragraph.indent
            } else {
                0.0
            };
            let band = Rect::new(
                slab.x0 + paragraph.margin_left + indent,
                slab.y0,
                slab.x1 - paragraph.margin_right,
                slab.y1,
            );
            let rects = if band.width() > EPSILON {
                LineFragmentGenerator::generate(band, &containers[container])
            } else {
                Vec::new()
            };
            let unobstructed = rects.len() == 1 && nearly_eq(rects[0].width(), band.width());

            let mut filled = false;
            for rect in rects {
                if start >= glyphs.len() {
                    break;
                }
                let suggested = breaker.suggest_line_break(
                    &mut glyphs,
                    start,
                    rect.width(),
                    paragraph.hyphenation_factor,
                );
                let line_break = match suggested {
                    Some(line_break) => line_break,
                    None if unobstructed => match breaker.force_break(&glyphs, start) {
                        Some(line_break) => line_break,
                        None => break,
                    },
                    None => {
                        log::trace!("Glyph {start} does not fit fragment {rect:?}");
                        continue;
                    }
                };
                if line_break.hyphenated {
                    hyphens.push(glyphs.string_index_for_glyph_index(line_break.glyph_index - 1));
                }
                last_hyphenated = line_break.hyphenated;
                let end = line_break.glyph_index;
                let mut line = LineFragment::new(rect, glyphs.slice(start..end)?);
                line.text_range = source_range(&glyphs, &hyphens, range.start, start..end);
                TabEngine::process_line_fragment(&mut line, &containers[container]);
                log::trace!("Line of glyphs {start}..{end} in {rect:?}");
                lines.push(PendingLine {
                    container,
                    start,
                    line,
                });
                start = end;
                filled = true;
                if line_break.required {
                    break;
                }
            }
            if filled {
                bands += 1;
            } else {
                log::trace!("Skipping band at y {}", band.y0);
            }
        }

        let remainder = start < glyphs.len();
        let mut truncation = None;
        if remainder {
            match (paragraph.truncation_mode, lines.last_mut()) {
                (Some(mode), Some(last)) => {
                    // The last line absorbs the rest of the paragraph and loses its hyphen.
                    if last_hyphenated {
                        glyphs.delete_glyph(start - 1)?;
                        hyphens.pop();
                    }
                    let end = glyphs.len();
                    last.line.glyphs = glyphs.slice(last.start..end)?;
                    last.line.text_range =
                        source_range(&glyphs, &hyphens, range.start, last.start..end);
                    TabEngine::process_line_fragment(&mut last.line, &containers[last.container]);
                    truncation = Some(mode);
                }
                _ => log::debug!(
                    "Dropping {} glyphs of paragraph {range:?} that do not fit",
                    glyphs.len() - start
                ),
            }
        }

        let count = lines.len();
        for (index, pending) in lines.iter_mut().enumerate() {
            let is_last = index + 1 == count;
            finalize(
                &mut pending.line,
                &paragraph,
                self.capabilities,
                truncation.filter(|_| is_last),
                is_last && !remainder,
            )?;
        }
        log::debug!("Paragraph {range:?} laid out in {count} lines");
        place(containers, &range, lines);
        if remainder {
            mark_truncated(containers);
        }
        self.flow.add_spacing(paragraph.paragraph_spacing);
        Ok(())
    }
}

/// Truncates, aligns, reorders and decorates a line.
fn finalize(
    line: &mut LineFragment,
    paragraph: &ParagraphStyle,
    capabilities: &Capabilities,
    truncation: Option<TruncationMode>,
    last_line: bool,
) -> Result<(), Error> {
    if let Some(mode) = truncation {
        TruncationEngine::from_capabilities(capabilities).truncate(line, mode);
    }
    apply_overflow(line, paragraph.hanging_punctuation);

    let align = if last_line && !line.truncated {
        paragraph.align_last_line
    } else {
        paragraph.align
    };
    let width = line.rect.width();
    let advance = line.advance_width();
    if advance > width + EPSILON {
        JustificationEngine::new(1.0)?.justify(line);
    } else if align == Alignment::Justify {
        JustificationEngine::new(paragraph.justification_factor)?.justify(line);
    } else {
        let factor = match align {
            Alignment::Left | Alignment::Justify => 0.0,
            Alignment::Center => 0.5,
            Alignment::Right => 1.0,
        };
        line.offset_x = (width - advance) * factor;
    }

    if let Some(bidi) = &capabilities.bidi {
        let levels: Vec<u8> = line.glyphs.runs().iter().map(GlyphRun::level).collect();
        if levels.iter().any(|level| level % 2 == 1) {
            let order = bidi.visual_order(&levels);
            line.glyphs.reorder_runs(&order);
        }
    }
    DecorationEngine::create_decoration_lines(line);
    Ok(())
}

/// Widens the line rectangle by the content allowed to hang past its edges.
///
/// Trailing whitespace always hangs. With hanging punctuation, so do a leading opening
/// and a trailing closing punctuation mark.
fn apply_overflow(line: &mut LineFragment, hanging_punctuation: bool) {
    let glyphs: Vec<(&Glyph, f64)> = line
        .glyphs
        .glyphs()
        .zip(line.glyphs.positions())
        .map(|(glyph, position)| (glyph, f64::from(position.x_advance)))
        .collect();
    let mut end = glyphs.len();
    let mut right = 0.0;
    while end > 0 && glyphs[end - 1].0.is_whitespace() {
        end -= 1;
        right += glyphs[end].1;
    }
    let mut left = 0.0;
    if hanging_punctuation && end > 0 {
        if single_char(glyphs[end - 1].0).is_some_and(is_closing_punctuation) {
            end -= 1;
            right += glyphs[end].1;
        }
        if end > 0 && single_char(glyphs[0].0).is_some_and(is_opening_punctuation) {
            left = glyphs[0].1;
        }
    }
    line.overflow_left = left;
    line.overflow_right = right;
    line.rect.x0 -= left;
    line.rect.x1 += right;
}

fn single_char(glyph: &Glyph) -> Option<char> {
    match glyph.code_points.as_slice() {
        [ch] => Some(*ch),
        _ => None,
    }
}

/// Appends the lines of a paragraph to the blocks of their containers.
fn place(containers: &mut [Container], range: &Range<usize>, lines: Vec<PendingLine>) {
    let mut current = None;
    for PendingLine {
        container, line, ..
    } in lines
    {
        let Some(target) = containers.get_mut(container) else {
            continue;
        };
        if current != Some(container) {
            target.blocks.push(Block {
                text_range: range.clone(),
                lines: Vec::new(),
                truncated: false,
            });
            current = Some(container);
        }
        if let Some(block) = target.blocks.last_mut() {
            block.lines.push(line);
        }
    }
}

/// Flags the most recently placed block and its last line as cut short.
fn mark_truncated(containers: &mut [Container]) {
    let Some(block) = containers
        .iter_mut()
        .rev()
        .find_map(|container| container.blocks.last_mut())
    else {
        return;
    };
    block.truncated = true;
    if let Some(line) = block.lines.last_mut() {
        line.truncated = true;
    }
}

/// Maps a glyph range of a paragraph to a byte range of the laid out text, discounting
/// inserted hyphens.
fn source_range(
    glyphs: &GlyphString,
    hyphens: &[usize],
    offset: usize,
    range: Range<usize>,
) -> Range<usize> {
    let inserted = |index: usize| {
        hyphens.iter().filter(|&&hyphen| hyphen < index).count() * HYPHEN.len_utf8()
    };
    let start = glyphs.string_index_for_glyph_index(range.start);
    let end = glyphs.string_index_for_glyph_index(range.end);
    offset + start - inserted(start)..offset + end - inserted(end)
}

/// Style governing the paragraph starting at byte `start`.
fn paragraph_source_style(text: &AttributedString<Style>, start: usize) -> Style {
    text.attributes_at(start)
        .or_else(|| text.runs().last().map(|run| &run.attributes))
        .cloned()
        .unwrap_or_default()
}

/// Natural line height of the font selected by `style`.
fn font_line_height(provider: &mut dyn FontProvider, style: &Style) -> Result<f64, Error> {
    let font = match &style.font {
        Some(font) => font.clone(),
        None => {
            let descriptor = provider.find_descriptor(style);
            provider.load(&descriptor)?
        }
    };
    let metrics = font.metrics();
    let scale = font.scale(style.resolved_font_size());
    Ok(f64::from(
        (metrics.ascent - metrics.descent + metrics.line_gap) * scale,
    ))
}

/// Position of the layout cursor across containers and columns.
#[derive(Debug)]
struct Flow {
    container: usize,
    column: usize,
    y: f64,
    at_top: bool,
}

impl Flow {
    fn new(containers: &[Container]) -> Self {
        let mut flow = Self {
            container: 0,
            column: 0,
            y: 0.0,
            at_top: true,
        };
        if let Some(column) = flow.column(containers) {
            flow.y = column.y0;
        }
        flow
    }

    fn column(&self, containers: &[Container]) -> Option<Rect> {
        containers
            .get(self.container)?
            .column_rects()
            .get(self.column)
            .copied()
    }

    fn is_exhausted(&self, containers: &[Container]) -> bool {
        self.container >= containers.len()
    }

    /// Reserves the next slab of `height`, moving on to the next column or container
    /// when the current one is full. `spacing` is skipped at the top of a column.
    fn next_band(
        &mut self,
        containers: &[Container],
        height: f64,
        spacing: f64,
    ) -> Option<(usize, Rect)> {
        while let Some(column) = self.column(containers) {
            let y = if self.at_top { self.y } else { self.y + spacing };
            if y + height <= column.y1 + EPSILON {
                self.y = y + height;
                self.at_top = false;
                return Some((self.container, Rect::new(column.x0, y, column.x1, y + height)));
            }
            self.advance(containers);
        }
        None
    }

    fn advance(&mut self, containers: &[Container]) {
        self.column += 1;
        self.at_top = true;
        let columns = containers.get(self.container).map_or(0, Container::columns);
        if self.column >= columns {
            self.container += 1;
            self.column = 0;
            log::debug!("Continuing in container {}", self.container);
        } else {
            log::debug!("Continuing in column {}", self.column);
        }
        if let Some(column) = self.column(containers) {
            self.y = column.y0;
        }
    }

    fn add_spacing(&mut self, spacing: f64) {
        if !self.at_top {
            self.y += spacing;
        }
    }
}
