// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::flatten::clip_runs;
use crate::text_range::validate_range;
use crate::{fill_gaps, flatten, Error, Merge, Run};

/// A text buffer paired with a gap-free partition of attribute runs.
///
/// Runs supplied at construction may overlap and need not cover the whole text; they are
/// flattened so that later runs win, and uncovered regions receive `A::default()`. The
/// stored runs are ordered, disjoint, non-empty and cover `0..text.len()` exactly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributedString<A> {
    text: String,
    runs: Vec<Run<A>>,
}

impl<A> AttributedString<A>
where
    A: Merge + Default + Clone + PartialEq,
{
    /// Creates an attributed string from text and possibly overlapping runs.
    ///
    /// Fails if any run range is reversed, reaches past the end of `text` or splits a
    /// UTF-8 character.
    pub fn new(
        text: impl Into<String>,
        runs: impl IntoIterator<Item = Run<A>>,
    ) -> Result<Self, Error> {
        let text = text.into();
        let runs: Vec<Run<A>> = runs.into_iter().collect();
        for run in &runs {
            validate_range(&text, &run.range)?;
        }
        let runs = fill_gaps(flatten(&runs), text.len());
        Ok(Self { text, runs })
    }

    /// Creates an attributed string by concatenating styled fragments.
    pub fn from_fragments<S: AsRef<str>>(fragments: impl IntoIterator<Item = (S, A)>) -> Self {
        let mut text = String::new();
        let mut runs = Vec::new();
        for (fragment, attributes) in fragments {
            let start = text.len();
            text.push_str(fragment.as_ref());
            if text.len() > start {
                runs.push(Run::new(start..text.len(), attributes));
            }
        }
        let runs = fill_gaps(runs, text.len());
        Self { text, runs }
    }

    /// Returns the substring covered by `range` with runs clipped and rebased to zero.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, Error> {
        validate_range(&self.text, &range)?;
        let runs = clip_runs(&self.runs, range.clone());
        Ok(Self {
            text: self.text[range].into(),
            runs,
        })
    }
}

impl<A> AttributedString<A> {
    /// The underlying text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The ordered, disjoint runs covering the text.
    pub fn runs(&self) -> &[Run<A>] {
        &self.runs
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the run containing the byte at `index`, if any.
    pub fn run_at(&self, index: usize) -> Option<&Run<A>> {
        let ix = self.runs.partition_point(|run| run.range.end <= index);
        self.runs.get(ix).filter(|run| run.contains(index))
    }

    /// Returns the attributes applied to the byte at `index`, if any.
    pub fn attributes_at(&self, index: usize) -> Option<&A> {
        self.run_at(index).map(|run| &run.attributes)
    }

    /// Consumes the string, returning its text and runs.
    pub fn into_parts(self) -> (String, Vec<Run<A>>) {
        (self.text, self.runs)
    }
}
