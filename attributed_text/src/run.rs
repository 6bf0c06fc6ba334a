// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Attribute values that can be layered on top of each other.
///
/// Flattening overlapping runs folds their attributes oldest to newest with this
/// operation, so values supplied by `other` must take precedence over the ones
/// already in `self`.
pub trait Merge {
    /// Overlays `other` on top of `self`.
    fn merge(&mut self, other: &Self);
}

impl<T: Clone> Merge for Option<T> {
    fn merge(&mut self, other: &Self) {
        if other.is_some() {
            self.clone_from(other);
        }
    }
}

/// A half-open byte range of text sharing one set of attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Run<A> {
    /// The byte range covered by this run.
    pub range: Range<usize>,
    /// The attributes applied to the range.
    pub attributes: A,
}

impl<A> Run<A> {
    /// Creates a new run.
    pub fn new(range: Range<usize>, attributes: A) -> Self {
        debug_assert!(
            range.start <= range.end,
            "run range {range:?} must not be reversed"
        );
        Self { range, attributes }
    }

    /// Start of the run.
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// End (exclusive) of the run.
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Number of bytes covered by the run.
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    /// Returns `true` if the run covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// Returns `true` if `index` lies inside the run.
    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }

    /// Returns a copy of this run moved by `-delta` bytes.
    pub(crate) fn rebased(&self, delta: usize) -> Self
    where
        A: Clone,
    {
        Self {
            range: self.range.start - delta..self.range.end - delta,
            attributes: self.attributes.clone(),
        }
    }
}
