// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::analysis::{Hyphenator, IcuGraphemes, IcuLineBreaks, NoHyphenation};
use crate::layout::{LineBreak, LineBreaker, HYPHEN, HYPHENATION_TOLERANCE};

use super::utils::{glyph_text, TestEnv, ADVANCE};

fn soft(glyph_index: usize) -> Option<LineBreak> {
    Some(LineBreak {
        glyph_index,
        required: false,
        hyphenated: false,
    })
}

/// Splits words into syllables of three letters.
struct Triples;

impl Hyphenator for Triples {
    fn hyphenate<'a>(&self, word: &'a str) -> Vec<&'a str> {
        let mut syllables = Vec::new();
        let mut rest = word;
        while rest.len() > 3 {
            let (head, tail) = rest.split_at(3);
            syllables.push(head);
            rest = tail;
        }
        syllables.push(rest);
        syllables
    }
}

#[test]
fn everything_fits() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("hello world");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    assert_eq!(
        breaker.suggest_line_break(&mut glyphs, 0, 200.0, 0.0),
        Some(LineBreak {
            glyph_index: 11,
            required: true,
            hyphenated: false,
        })
    );
    assert_eq!(breaker.suggest_line_break(&mut glyphs, 11, 200.0, 0.0), None);
}

#[test]
fn breaks_at_the_last_opportunity() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("hello world");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    assert_eq!(breaker.suggest_line_break(&mut glyphs, 0, 60.0, 0.0), soft(6));
    // The line may start anywhere.
    assert_eq!(
        breaker
            .suggest_line_break(&mut glyphs, 6, 60.0, 0.0)
            .map(|b| b.glyph_index),
        Some(11)
    );
}

#[test]
fn trailing_whitespace_does_not_overflow() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("ab cd");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    assert_eq!(breaker.suggest_line_break(&mut glyphs, 0, 2.0 * ADVANCE, 0.0), soft(3));
}

#[test]
fn first_glyph_too_wide() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("hello world");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    assert_eq!(breaker.suggest_line_break(&mut glyphs, 0, 5.0, 0.0), None);
}

#[test]
fn emergency_break_inside_a_word() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("abcdefghij");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    assert_eq!(breaker.suggest_line_break(&mut glyphs, 0, 30.0, 0.0), soft(3));
}

#[test]
fn emergency_break_keeps_clusters() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("abe\u{301}fg");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    // The mark has no advance, so "abe" plus its mark fit into 24 pixels.
    assert_eq!(breaker.suggest_line_break(&mut glyphs, 0, 24.0, 0.0), soft(4));
    // Cutting before the "e" keeps the mark with it.
    assert_eq!(breaker.suggest_line_break(&mut glyphs, 0, 20.0, 0.0), soft(2));
}

#[test]
fn mandatory_breaks_win() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("ab\u{2028}cd");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    assert_eq!(
        breaker.suggest_line_break(&mut glyphs, 0, 200.0, 0.0),
        Some(LineBreak {
            glyph_index: 3,
            required: true,
            hyphenated: false,
        })
    );
}

#[test]
fn force_break_takes_one_grapheme() {
    let mut env = TestEnv::new();
    let glyphs = env.glyphs("abc");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    assert_eq!(breaker.force_break(&glyphs, 0), soft(1));
    assert_eq!(breaker.force_break(&glyphs, 3), None);

    let glyphs = env.glyphs("e\u{301}x");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    assert_eq!(breaker.force_break(&glyphs, 0), soft(2));
}

#[test]
fn hyphenates_short_lines() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("go hyphenation");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    let width = 80.0;
    let line_break = breaker
        .suggest_line_break(&mut glyphs, 0, width, 0.5)
        .unwrap();
    assert!(line_break.hyphenated);
    assert!(line_break.glyph_index > 3);
    assert!(glyphs.glyph(line_break.glyph_index - 1).unwrap().is_char(HYPHEN));
    assert!(
        glyphs.advance_width_of(0..line_break.glyph_index)
            <= width * (1.0 + HYPHENATION_TOLERANCE)
    );
    assert_eq!(glyphs.text().len(), "go hyphenation".len() + 1);
}

#[test]
fn hyphenation_factor_zero_disables_hyphenation() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("go hyphenation");
    let breaker = LineBreaker::from_capabilities(env.capabilities());
    assert_eq!(breaker.suggest_line_break(&mut glyphs, 0, 80.0, 0.0), soft(3));
    assert_eq!(glyphs.text(), "go hyphenation");
}

#[test]
fn hyphenation_picks_the_last_fitting_syllable() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("a abcdefghi");
    let (line_breaks, graphemes) = (IcuLineBreaks::new(), IcuGraphemes::new());
    let breaker = LineBreaker::new(&line_breaks, &graphemes, &Triples);
    // Syllables end at 5 and 8; "a abcdef-" is 72 pixels wide.
    let line_break = breaker.suggest_line_break(&mut glyphs, 0, 72.0, 1.0);
    assert_eq!(
        line_break,
        Some(LineBreak {
            glyph_index: 9,
            required: false,
            hyphenated: true,
        })
    );
    assert_eq!(glyph_text(&glyphs), "a abcdef-ghi");
    assert_eq!(glyphs.text(), "a abcdef-ghi");
}

#[test]
fn hyphenation_tolerates_a_small_overflow() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("a abcdefghi");
    let (line_breaks, graphemes) = (IcuLineBreaks::new(), IcuGraphemes::new());
    let breaker = LineBreaker::new(&line_breaks, &graphemes, &Triples);
    // 72 pixels exceed 70 by less than the tolerance.
    let line_break = breaker
        .suggest_line_break(&mut glyphs, 0, 70.0, 1.0)
        .unwrap();
    assert!(line_break.hyphenated);
    assert_eq!(line_break.glyph_index, 9);
}

#[test]
fn unbreakable_words_fall_back() {
    let mut env = TestEnv::new();
    let mut glyphs = env.glyphs("a abcdefghi");
    let (line_breaks, graphemes) = (IcuLineBreaks::new(), IcuGraphemes::new());
    let breaker = LineBreaker::new(&line_breaks, &graphemes, &NoHyphenation);
    assert_eq!(breaker.suggest_line_break(&mut glyphs, 0, 72.0, 1.0), soft(2));
    assert_eq!(glyphs.text(), "a abcdefghi");
}
