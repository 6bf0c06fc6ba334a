// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::layout::{TruncationEngine, ELLIPSIS};
use crate::style::TruncationMode;

use super::utils::{assert_close, glyph_text, TestEnv};

fn truncated(text: &str, width: f64, mode: TruncationMode) -> String {
    let mut env = TestEnv::new();
    let mut line = env.line(text, width);
    TruncationEngine::from_capabilities(env.capabilities()).truncate(&mut line, mode);
    assert!(line.is_truncated());
    assert!(line.advance_width() <= width);
    assert_eq!(line.glyphs().text(), glyph_text(line.glyphs()));
    glyph_text(line.glyphs())
}

#[test]
fn right() {
    assert_eq!(truncated("hello world", 40.0, TruncationMode::Right), "hell\u{2026}");
}

#[test]
fn left() {
    assert_eq!(truncated("hello world", 40.0, TruncationMode::Left), "\u{2026}orld");
}

#[test]
fn center() {
    assert_eq!(truncated("hello world", 56.0, TruncationMode::Center), "hello\u{2026}d");
}

#[test]
fn whitespace_next_to_the_ellipsis_is_removed() {
    assert_eq!(truncated("hello world", 48.0, TruncationMode::Right), "hello\u{2026}");
    assert_eq!(truncated("ab cdef", 40.0, TruncationMode::Left), "\u{2026}cdef");
}

#[test]
fn clusters_are_removed_whole() {
    assert_eq!(truncated("abe\u{301}", 24.0, TruncationMode::Right), "ab\u{2026}");
}

#[test]
fn only_the_ellipsis_remains() {
    let text = truncated("hello", 8.0, TruncationMode::Right);
    assert_eq!(text, ELLIPSIS.to_string());
}

#[test]
fn ellipsis_takes_the_adjacent_style() {
    let mut env = TestEnv::new();
    let mut line = env.line("hello world", 40.0);
    TruncationEngine::from_capabilities(env.capabilities())
        .truncate(&mut line, TruncationMode::Right);
    let glyphs = line.glyphs();
    assert_eq!(glyphs.runs().len(), 1);
    assert_close(glyphs.advance_width(), 40.0);
}
