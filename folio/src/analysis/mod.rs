// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unicode analysis capabilities.
//!
//! Layout consults external oracles for scripts, line break opportunities, grapheme
//! boundaries, bidi levels and hyphenation. Each is a trait so callers can substitute
//! their own; [`Capabilities::default`] provides implementations backed by ICU4X,
//! `unicode-script`, `unicode-bidi` and `hypher`.
//!
//! All offsets exchanged with oracles are UTF-8 byte offsets on character boundaries.

mod bidi;
mod grapheme;
mod hyphenate;
mod line;
mod script;

use core::fmt;

use attributed_text::Run;

use crate::style::ScriptTag;

pub use bidi::UnicodeBidi;
pub use grapheme::IcuGraphemes;
pub use hyphenate::{HypherHyphenator, NoHyphenation};
pub use line::IcuLineBreaks;
pub use script::UnicodeScripts;

/// Classifies characters by script.
pub trait ScriptOracle {
    /// Returns the script of `ch`.
    ///
    /// [`ScriptTag::COMMON`], [`ScriptTag::INHERITED`] and [`ScriptTag::UNKNOWN`] continue
    /// the surrounding script.
    fn script_of(&self, ch: char) -> ScriptTag;
}

/// A position where a line may end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BreakOpportunity {
    /// Byte offset of the first character of the next line.
    pub position: usize,
    /// Whether the line must end here.
    pub required: bool,
}

/// Finds line break opportunities.
pub trait LineBreakOracle {
    /// Returns the break opportunities of `text` in increasing order.
    ///
    /// The start of the text is never an opportunity; the end always is, as a required
    /// break.
    fn break_opportunities(&self, text: &str) -> Vec<BreakOpportunity>;
}

/// Finds grapheme cluster boundaries.
pub trait GraphemeOracle {
    /// The last boundary strictly before `index`, or `0`.
    fn previous_break(&self, text: &str, index: usize) -> usize;

    /// The first boundary strictly after `index`, or the text length.
    fn next_break(&self, text: &str, index: usize) -> usize;
}

/// Resolves bidi embedding levels.
pub trait BidiOracle {
    /// Splits `text` into runs of equal embedding level.
    fn level_runs(&self, text: &str) -> Vec<Run<u8>>;

    /// Returns the visual order of runs with the given levels, as indices into `levels`.
    fn visual_order(&self, levels: &[u8]) -> Vec<usize>;
}

/// Splits words into syllables.
pub trait Hyphenator {
    /// Returns the syllables of `word`, which concatenate back to `word`.
    fn hyphenate<'a>(&self, word: &'a str) -> Vec<&'a str>;
}

/// The set of analysis oracles used by layout.
pub struct Capabilities {
    /// Script classification.
    pub script: Box<dyn ScriptOracle>,
    /// Line break opportunities.
    pub line_breaks: Box<dyn LineBreakOracle>,
    /// Grapheme cluster boundaries.
    pub graphemes: Box<dyn GraphemeOracle>,
    /// Bidi level resolution; `None` lays all text out left to right.
    pub bidi: Option<Box<dyn BidiOracle>>,
    /// Syllable splitting for hyphenation.
    pub hyphenator: Box<dyn Hyphenator>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            script: Box::new(UnicodeScripts),
            line_breaks: Box::new(IcuLineBreaks::new()),
            graphemes: Box::new(IcuGraphemes::new()),
            bidi: Some(Box::new(UnicodeBidi::default())),
            hyphenator: Box::new(HypherHyphenator::default()),
        }
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("bidi", &self.bidi.is_some())
            .finish_non_exhaustive()
    }
}
