// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

pub(crate) const EPSILON: f64 = 1e-6;

pub(crate) fn nearly_eq(x: f64, y: f64) -> bool {
    (x - y).abs() < EPSILON
}

pub(crate) fn nearly_zero(x: f64) -> bool {
    nearly_eq(x, 0.)
}

/// Opening punctuation allowed to hang into the left margin.
pub(crate) fn is_opening_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '"' | '\'' | '(' | '[' | '{' | '\u{2018}' | '\u{201C}' | '\u{00AB}' | '\u{2039}'
    )
}

/// Closing punctuation allowed to hang into the right margin.
pub(crate) fn is_closing_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '.' | ','
            | ':'
            | ';'
            | '-'
            | '\u{2010}'
            | '\u{2013}'
            | '\u{2014}'
            | '"'
            | '\''
            | ')'
            | ']'
            | '}'
            | '\u{2019}'
            | '\u{201D}'
            | '\u{00BB}'
            | '\u{203A}'
    )
}
