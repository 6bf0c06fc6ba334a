// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use icu_segmenter::{GraphemeClusterSegmenter, GraphemeClusterSegmenterBorrowed};

use super::GraphemeOracle;

/// Extended grapheme cluster boundaries from the ICU4X segmenter (UAX #29).
#[derive(Clone, Copy)]
pub struct IcuGraphemes {
    segmenter: GraphemeClusterSegmenterBorrowed<'static>,
}

impl IcuGraphemes {
    /// Creates a grapheme segmenter.
    pub fn new() -> Self {
        Self {
            segmenter: GraphemeClusterSegmenter::new(),
        }
    }
}

impl Default for IcuGraphemes {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IcuGraphemes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcuGraphemes").finish_non_exhaustive()
    }
}

impl GraphemeOracle for IcuGraphemes {
    fn previous_break(&self, text: &str, index: usize) -> usize {
        self.segmenter
            .segment_str(text)
            .take_while(|&boundary| boundary < index)
            .last()
            .unwrap_or(0)
    }

    fn next_break(&self, text: &str, index: usize) -> usize {
        self.segmenter
            .segment_str(text)
            .find(|&boundary| boundary > index)
            .unwrap_or(text.len())
    }
}
