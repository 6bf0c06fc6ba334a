// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::layout::{JustificationEngine, Priority, StretchFactor};
use crate::Error;

use super::utils::{assert_close, TestEnv, ADVANCE};

fn advances(env: &mut TestEnv, text: &str, width: f64, factor: f32) -> Vec<f32> {
    let mut line = env.line(text, width);
    JustificationEngine::new(factor).unwrap().justify(&mut line);
    line.glyphs().positions().map(|p| p.x_advance).collect()
}

#[test]
fn grows_to_the_line_width() {
    let mut env = TestEnv::new();
    let mut line = env.line("ab cd ef", 100.0);
    JustificationEngine::new(1.0).unwrap().justify(&mut line);
    assert_close(line.advance_width(), 100.0);
    // Whitespace absorbs more than letters.
    let advances: Vec<f32> = line.glyphs().positions().map(|p| p.x_advance).collect();
    assert!(advances[2] > advances[0]);
    assert!(advances[5] > advances[3]);
}

#[test]
fn shrinks_to_the_line_width() {
    let mut env = TestEnv::new();
    let mut line = env.line("ab cd ef", 60.0);
    JustificationEngine::new(1.0).unwrap().justify(&mut line);
    assert_close(line.advance_width(), 60.0);
    // Shrinking within the whitespace budget only touches the space around whitespace.
    let advances: Vec<f32> = line.glyphs().positions().map(|p| p.x_advance).collect();
    assert_eq!(advances[0], ADVANCE as f32);
    assert_eq!(advances[7], ADVANCE as f32);
    assert_close(f64::from(advances[1]), ADVANCE - 1.0);
    assert_close(f64::from(advances[2]), ADVANCE - 1.0);
}

#[test]
fn zero_factor_leaves_the_line_alone() {
    let mut env = TestEnv::new();
    let advances = advances(&mut env, "ab cd ef", 100.0, 0.0);
    assert!(advances.iter().all(|&advance| advance == ADVANCE as f32));
}

#[test]
fn trailing_whitespace_does_not_stretch() {
    let mut env = TestEnv::new();
    let advances = advances(&mut env, "ab ", 40.0, 1.0);
    assert_eq!(advances[2], ADVANCE as f32);
    assert_eq!(advances[1], ADVANCE as f32);
    assert_close(advances.iter().copied().map(f64::from).sum(), 40.0);
}

#[test]
fn factors_follow_the_glyph_classes() {
    let mut env = TestEnv::new();
    let glyphs = env.glyphs("a b ");
    let engine = JustificationEngine::new(1.0).unwrap();
    let factors = engine.factors(&glyphs, true);
    assert_eq!(factors.len(), 4);
    assert_eq!(factors[0].before, 0.0);
    assert_eq!(factors[0].priority, Priority::Letter);
    assert_eq!(factors[1].priority, Priority::Whitespace);
    assert_close(f64::from(factors[1].before), 4.0);
    assert_eq!(factors[2].after, 0.0);
    assert_eq!(factors[3], StretchFactor::NULL);

    let shrink = engine.factors(&glyphs, false);
    assert!(shrink[1].after < 0.0);
}

#[test]
fn marks_carry_the_stretch_of_their_base() {
    let mut env = TestEnv::new();
    let glyphs = env.glyphs("e\u{301}x");
    let factors = JustificationEngine::new(1.0).unwrap().factors(&glyphs, true);
    assert_eq!(factors[0].after, 0.0);
    assert_eq!(factors[1].before, 0.0);
    assert!(factors[1].after > 0.0);
    assert_eq!(factors[1].priority, Priority::Letter);
    assert_eq!(factors[2].after, 0.0);
}

#[test]
fn factor_is_validated() {
    assert!(matches!(
        JustificationEngine::new(2.0),
        Err(Error::InvalidFactor { .. })
    ));
    assert!(JustificationEngine::new(-0.1).is_err());
    assert_eq!(JustificationEngine::new(0.5).unwrap().factor(), 0.5);
}
