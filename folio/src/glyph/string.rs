// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use attributed_text::TextRange;

use super::GlyphRun;
use crate::font::{Glyph, GlyphPosition};
use crate::Error;

/// A paragraph, or a slice of one, converted to positioned glyphs.
///
/// Runs are ordered and cover consecutive glyph indices starting at zero. Their text
/// ranges partition the text of the string. Until a line is finalized, glyphs are in
/// logical order, so string indices never decrease with the glyph index.
///
/// The mapping between glyph indices and string indices is not a bijection: a ligature
/// maps one glyph to several characters and a multi-glyph cluster maps several glyphs to
/// one character. [`glyph_index_for_string_index`](Self::glyph_index_for_string_index)
/// returns the earliest glyph of the cluster containing a string index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphString {
    text: String,
    runs: Vec<GlyphRun>,
}

impl GlyphString {
    pub(crate) fn from_runs(text: String, runs: Vec<GlyphRun>) -> Self {
        let mut string = Self { text, runs };
        string.reindex();
        string
    }

    /// Recomputes the glyph ranges of the runs from their lengths.
    fn reindex(&mut self) {
        let mut start = 0;
        for run in &mut self.runs {
            run.range = start..start + run.glyphs.len();
            start = run.range.end;
        }
    }

    /// The text the glyphs were shaped from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The glyph runs.
    pub fn runs(&self) -> &[GlyphRun] {
        &self.runs
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.runs.last().map_or(0, |run| run.range.end)
    }

    /// Returns `true` if the string has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All glyphs in order.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.runs.iter().flat_map(|run| run.glyphs.iter())
    }

    /// All glyph positions in order.
    pub fn positions(&self) -> impl Iterator<Item = &GlyphPosition> + '_ {
        self.runs.iter().flat_map(|run| run.positions.iter())
    }

    /// The glyph at `index`.
    pub fn glyph(&self, index: usize) -> Option<&Glyph> {
        let (run, local) = self.locate(index)?;
        self.runs[run].glyphs.get(local)
    }

    /// The position of the glyph at `index`.
    pub fn position(&self, index: usize) -> Option<&GlyphPosition> {
        let (run, local) = self.locate(index)?;
        self.runs[run].positions.get(local)
    }

    /// Mutable access to the position of the glyph at `index`.
    pub fn position_mut(&mut self, index: usize) -> Option<&mut GlyphPosition> {
        let (run, local) = self.locate(index)?;
        self.runs[run].positions.get_mut(local)
    }

    /// Index of the run containing the glyph at `index`.
    pub fn run_index_at_glyph_index(&self, index: usize) -> Option<usize> {
        let run = self.runs.partition_point(|run| run.range.end <= index);
        (run < self.runs.len() && self.runs[run].range.contains(&index)).then_some(run)
    }

    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let run = self.run_index_at_glyph_index(index)?;
        Some((run, index - self.runs[run].range.start))
    }

    /// Sum of all advances in pixels.
    pub fn advance_width(&self) -> f64 {
        self.runs.iter().map(GlyphRun::advance_width).sum()
    }

    /// Sum of the advances of the glyphs in `range`, in pixels.
    pub fn advance_width_of(&self, range: Range<usize>) -> f64 {
        self.positions()
            .skip(range.start)
            .take(range.len())
            .map(|position| f64::from(position.x_advance))
            .sum()
    }

    /// Largest ascent of all runs.
    pub fn ascent(&self) -> f64 {
        self.runs.iter().map(GlyphRun::ascent).fold(0.0, f64::max)
    }

    /// Lowest descent of all runs, negative below the baseline.
    pub fn descent(&self) -> f64 {
        self.runs.iter().map(GlyphRun::descent).fold(0.0, f64::min)
    }

    /// Largest line gap of all runs.
    pub fn line_gap(&self) -> f64 {
        self.runs.iter().map(GlyphRun::line_gap).fold(0.0, f64::max)
    }

    /// Largest line height of all runs.
    pub fn height(&self) -> f64 {
        self.runs.iter().map(GlyphRun::height).fold(0.0, f64::max)
    }

    /// Byte offset of the cluster of the glyph at `index`.
    ///
    /// Returns the text length for `index >= len()`.
    pub fn string_index_for_glyph_index(&self, index: usize) -> usize {
        match self.locate(index) {
            Some((run, local)) => self.runs[run].string_indices[local],
            None => self.text.len(),
        }
    }

    /// Index of the earliest glyph of the cluster containing the byte at `index`.
    ///
    /// Returns `len()` for `index >= text().len()`.
    pub fn glyph_index_for_string_index(&self, index: usize) -> usize {
        if index >= self.text.len() {
            return self.len();
        }
        let run_ix = self.runs.partition_point(|run| run.text_range.end <= index);
        let Some(run) = self.runs.get(run_ix) else {
            return self.len();
        };
        let indices = &run.string_indices;
        let covered = indices.partition_point(|&start| start <= index);
        if covered == 0 {
            return run.range.start;
        }
        let cluster = indices[covered - 1];
        run.range.start + indices.partition_point(|&start| start < cluster)
    }

    /// Index of the first glyph whose right edge lies beyond `offset` pixels.
    ///
    /// `0` means not even the first glyph fits; `len()` means every glyph fits.
    pub fn glyph_index_at_offset(&self, offset: f64) -> usize {
        let mut x = 0.0;
        for (index, position) in self.positions().enumerate() {
            x += f64::from(position.x_advance);
            if x > offset {
                return index;
            }
        }
        self.len()
    }

    /// Distance in pixels from the start of the string to the glyph at `index`.
    pub fn offset_at_glyph_index(&self, index: usize) -> f64 {
        self.advance_width_of(0..index)
    }

    /// Returns the glyphs in `range` as an independent string.
    ///
    /// The range is converted to the string indices of its bounding clusters and sliced
    /// with [`slice_text`](Self::slice_text).
    pub fn slice(&self, range: Range<usize>) -> Result<Self, Error> {
        let len = self.len();
        if range.end > len || range.start > range.end {
            return Err(Error::GlyphIndexOutOfBounds {
                index: range.end.max(range.start),
                len,
            });
        }
        let start = self.string_index_for_glyph_index(range.start);
        let end = self.string_index_for_glyph_index(range.end);
        self.slice_text(start..end.max(start))
    }

    /// Returns the glyphs for the text in `range` as an independent string.
    ///
    /// Indices of the result are rebased to zero. A cluster cut by either edge of the
    /// range is split into the nominal glyphs of its characters, so slicing inside a
    /// ligature yields separate glyphs for the characters that remain.
    pub fn slice_text(&self, range: Range<usize>) -> Result<Self, Error> {
        let range = TextRange::new(&self.text, range)?.as_range();
        let mut runs = Vec::new();
        for run in &self.runs {
            let start = run.text_range.start.max(range.start);
            let end = run.text_range.end.min(range.end);
            if start >= end {
                continue;
            }
            let mut sliced = GlyphRun {
                range: 0..0,
                text_range: start - range.start..end - range.start,
                style: run.style.clone(),
                font: run.font.clone(),
                font_size: run.font_size,
                glyphs: Vec::new(),
                positions: Vec::new(),
                string_indices: Vec::new(),
            };
            for cluster in clusters(run) {
                let cluster_start = run.string_indices[cluster.start];
                let cluster_end = run
                    .string_indices
                    .get(cluster.end)
                    .copied()
                    .unwrap_or(run.text_range.end);
                if cluster_start >= range.start && cluster_end <= range.end {
                    sliced.glyphs.extend_from_slice(&run.glyphs[cluster.clone()]);
                    sliced
                        .positions
                        .extend_from_slice(&run.positions[cluster.clone()]);
                    sliced.string_indices.extend(
                        run.string_indices[cluster]
                            .iter()
                            .map(|index| index - range.start),
                    );
                } else if cluster_start < range.end && cluster_end > range.start {
                    let lo = cluster_start.max(range.start);
                    let hi = cluster_end.min(range.end);
                    for (offset, ch) in self.text[lo..hi].char_indices() {
                        let (glyph, position) = run.synthesize(ch);
                        sliced.glyphs.push(glyph);
                        sliced.positions.push(position);
                        sliced.string_indices.push(lo + offset - range.start);
                    }
                }
            }
            runs.push(sliced);
        }
        Ok(Self::from_runs(self.text[range].to_owned(), runs))
    }

    /// Inserts the nominal glyph for `ch` before the glyph at `index`.
    ///
    /// The glyph takes the style of the preceding glyph (of the first run at index `0`)
    /// and `ch` is inserted into the text at the matching cluster boundary. An index inside
    /// a multi-glyph cluster is moved to the end of that cluster.
    pub fn insert_glyph(&mut self, index: usize, ch: char) -> Result<(), Error> {
        if self.runs.is_empty() {
            return Err(Error::EmptyGlyphString);
        }
        let len = self.len();
        if index > len {
            return Err(Error::GlyphIndexOutOfBounds { index, len });
        }
        let mut index = index;
        while index > 0
            && index < len
            && self.string_index_for_glyph_index(index)
                == self.string_index_for_glyph_index(index - 1)
        {
            index += 1;
        }
        let run_ix = match index {
            0 => 0,
            _ => self.run_index_at_glyph_index(index - 1).unwrap_or(0),
        };
        let text_pos = if index < len {
            self.string_index_for_glyph_index(index)
        } else {
            self.runs[run_ix].text_range.end
        };
        let (glyph, position) = self.runs[run_ix].synthesize(ch);
        let shift = ch.len_utf8();
        self.text.insert(text_pos, ch);
        for (ix, run) in self.runs.iter_mut().enumerate() {
            for string_index in &mut run.string_indices {
                if *string_index >= text_pos {
                    *string_index += shift;
                }
            }
            if ix == run_ix {
                run.text_range.end += shift;
            } else if ix > run_ix {
                run.text_range.start += shift;
                run.text_range.end += shift;
            }
        }
        let run = &mut self.runs[run_ix];
        let local = index.saturating_sub(run.range.start).min(run.glyphs.len());
        run.glyphs.insert(local, glyph);
        run.positions.insert(local, position);
        run.string_indices.insert(local, text_pos);
        self.reindex();
        Ok(())
    }

    /// Removes the glyph at `index`.
    ///
    /// When it was the last glyph of its cluster, the cluster's text is removed as well.
    /// Runs left without glyphs are removed together with their text.
    pub fn delete_glyph(&mut self, index: usize) -> Result<(), Error> {
        let len = self.len();
        let (run_ix, local) = self
            .locate(index)
            .ok_or(Error::GlyphIndexOutOfBounds { index, len })?;
        let run = &mut self.runs[run_ix];
        let cluster_start = run.string_indices[local];
        run.glyphs.remove(local);
        run.positions.remove(local);
        run.string_indices.remove(local);
        let shared = run.string_indices.contains(&cluster_start);
        let removed = if run.glyphs.is_empty() {
            run.text_range.clone()
        } else if shared {
            cluster_start..cluster_start
        } else {
            let cluster_end = run
                .string_indices
                .iter()
                .copied()
                .find(|&start| start > cluster_start)
                .unwrap_or(run.text_range.end);
            cluster_start..cluster_end
        };
        if run.glyphs.is_empty() {
            self.runs.remove(run_ix);
        }
        self.remove_text(removed);
        self.reindex();
        Ok(())
    }

    /// Removes the glyphs in `range`, see [`delete_glyph`](Self::delete_glyph).
    pub fn delete_glyphs(&mut self, range: Range<usize>) -> Result<(), Error> {
        for index in range.rev() {
            self.delete_glyph(index)?;
        }
        Ok(())
    }

    /// Removes `range` from the text and shifts every index past it.
    fn remove_text(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let shift = range.len();
        self.text.replace_range(range.clone(), "");
        for run in &mut self.runs {
            for string_index in &mut run.string_indices {
                if *string_index >= range.end {
                    *string_index -= shift;
                }
            }
            run.text_range = clip_shift(run.text_range.clone(), &range);
        }
    }

    /// Reorders runs, `order[visual] == logical`, and reverses the glyphs of right-to-left
    /// runs. Used once per line at finalization; afterwards string indices are no longer
    /// monotonic.
    ///
    /// Ignored unless `order` is a permutation of the run indices.
    pub fn reorder_runs(&mut self, order: &[usize]) {
        let count = self.runs.len();
        let mut seen = vec![false; count];
        let is_permutation = order.len() == count
            && order
                .iter()
                .all(|&ix| ix < count && !core::mem::replace(&mut seen[ix], true));
        if !is_permutation {
            log::debug!("Ignoring run order {order:?}, not a permutation of {count} runs");
            return;
        }
        let mut slots: Vec<Option<GlyphRun>> = self.runs.drain(..).map(Some).collect();
        self.runs = order
            .iter()
            .filter_map(|&ix| slots[ix].take())
            .map(|mut run| {
                if run.level() % 2 == 1 {
                    run.reverse();
                }
                run
            })
            .collect();
        self.reindex();
    }
}

/// Removes `removed` from `range`, shifting it left when it lies after the removal.
fn clip_shift(range: Range<usize>, removed: &Range<usize>) -> Range<usize> {
    let map = |index: usize| {
        if index >= removed.end {
            index - removed.len()
        } else if index > removed.start {
            removed.start
        } else {
            index
        }
    };
    map(range.start)..map(range.end)
}

/// Glyph ranges of the clusters of a run in logical order.
fn clusters(run: &GlyphRun) -> impl Iterator<Item = Range<usize>> + '_ {
    let indices = &run.string_indices;
    let mut start = 0;
    core::iter::from_fn(move || {
        if start >= indices.len() {
            return None;
        }
        let cluster = indices[start];
        let end = start
            + indices[start..]
                .iter()
                .take_while(|&&index| index == cluster)
                .count();
        let range = start..end;
        start = end;
        Some(range)
    })
}
