// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use icu_properties::props::LineBreak;
use icu_properties::CodePointMapData;
use icu_segmenter::options::LineBreakOptions;
use icu_segmenter::{LineSegmenter, LineSegmenterBorrowed};

use super::{BreakOpportunity, LineBreakOracle};

/// Line break opportunities from the ICU4X line segmenter (UAX #14).
#[derive(Clone, Copy)]
pub struct IcuLineBreaks {
    segmenter: LineSegmenterBorrowed<'static>,
}

impl IcuLineBreaks {
    /// Creates a segmenter with default options and complex script support.
    pub fn new() -> Self {
        Self {
            segmenter: LineSegmenter::new_auto(LineBreakOptions::default()),
        }
    }
}

impl Default for IcuLineBreaks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IcuLineBreaks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcuLineBreaks").finish_non_exhaustive()
    }
}

/// Whether a break after `ch` is mandatory.
fn is_mandatory_break(ch: char) -> bool {
    // See: https://github.com/unicode-org/icu4x/blob/ee5399a77a6b94efb5d4b60678bb458c5eedb25d/components/segmenter/src/line.rs#L338-L351
    matches!(
        CodePointMapData::<LineBreak>::new().get(ch),
        LineBreak::MandatoryBreak
            | LineBreak::CarriageReturn
            | LineBreak::LineFeed
            | LineBreak::NextLine
    )
}

impl LineBreakOracle for IcuLineBreaks {
    fn break_opportunities(&self, text: &str) -> Vec<BreakOpportunity> {
        self.segmenter
            .segment_str(text)
            .filter(|&position| position > 0)
            .map(|position| BreakOpportunity {
                position,
                required: position == text.len()
                    || text[..position]
                        .chars()
                        .next_back()
                        .is_some_and(is_mandatory_break),
            })
            .collect()
    }
}
