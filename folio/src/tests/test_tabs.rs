// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::layout::{TabEngine, TabStop};
use crate::style::TabAlignment;

use super::utils::{assert_close, container, TestEnv};

/// Lays out `text` as a single line against `stops` and returns the pen position of
/// the glyph at `index`.
fn pen_at(text: &str, stops: &[TabStop], index: usize) -> f64 {
    let mut env = TestEnv::new();
    let container = container(500.0, 100.0).with_tab_stops(stops.iter().copied());
    let mut line = env.line(text, 500.0);
    TabEngine::process_line_fragment(&mut line, &container);
    line.glyphs().offset_at_glyph_index(index)
}

#[test]
fn left_stop() {
    let stops = [TabStop::new(50.0, TabAlignment::Left)];
    assert_close(pen_at("A\tB", &stops, 2), 50.0);
}

#[test]
fn right_stop() {
    let stops = [TabStop::new(100.0, TabAlignment::Right)];
    assert_close(pen_at("A\tBC", &stops, 2), 84.0);
    assert_close(pen_at("A\tBC", &stops, 4), 100.0);
}

#[test]
fn center_stop() {
    let stops = [TabStop::new(100.0, TabAlignment::Center)];
    assert_close(pen_at("A\tBC", &stops, 2), 92.0);
}

#[test]
fn decimal_stop_centers_the_point() {
    let stops = [TabStop::new(100.0, TabAlignment::Decimal)];
    // "12" ends at 96 and the full stop spans 96..104.
    assert_close(pen_at("A\t12.5", &stops, 4), 96.0);
}

#[test]
fn alignment_stops_at_the_next_tab() {
    let stops = [
        TabStop::new(50.0, TabAlignment::Center),
        TabStop::new(150.0, TabAlignment::Left),
    ];
    assert_close(pen_at("A\tBC\tD", &stops, 2), 42.0);
    assert_close(pen_at("A\tBC\tD", &stops, 5), 150.0);
}

#[test]
fn implicit_stops() {
    assert_close(pen_at("A\tB", &[], 2), 80.0);
    assert_close(pen_at("A\tB\tC", &[], 4), 160.0);
}

#[test]
fn implicit_stops_past_the_last_explicit_one() {
    let stops = [TabStop::new(50.0, TabAlignment::Left)];
    assert_close(pen_at("AAAAAAAAAAA\tB", &stops, 12), 160.0);
}

#[test]
fn content_wider_than_the_stop_gets_no_advance() {
    let stops = [TabStop::new(20.0, TabAlignment::Right)];
    assert_close(pen_at("A\tBCDE", &stops, 2), 8.0);
}

#[test]
fn custom_interval() {
    let mut env = TestEnv::new();
    let container = container(500.0, 100.0).with_tab_interval(30.0);
    let mut line = env.line("A\tB", 500.0);
    TabEngine::process_line_fragment(&mut line, &container);
    assert_close(line.glyphs().offset_at_glyph_index(2), 30.0);
}
