// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of overlapping runs into a disjoint partition.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::Range;

use crate::{Merge, Run};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EventKind {
    Start,
    End,
}

#[derive(Clone, Copy, Debug)]
struct Event {
    offset: usize,
    kind: EventKind,
    /// Index of the input run that produced the event.
    run: usize,
}

/// Flattens possibly overlapping runs into ordered, non-overlapping runs.
///
/// The output covers exactly the union of the input ranges. Each output run carries the
/// attributes of every input run covering it, folded in input order so that later runs
/// win on conflicting keys. Adjacent output runs with equal attributes are coalesced and
/// empty input runs are ignored.
///
/// ```
/// use attributed_text::{flatten, Merge, Run};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Attrs {
///     strike: Option<bool>,
///     color: Option<&'static str>,
/// }
///
/// impl Merge for Attrs {
///     fn merge(&mut self, other: &Self) {
///         self.strike.merge(&other.strike);
///         self.color.merge(&other.color);
///     }
/// }
///
/// let strike = Attrs { strike: Some(true), color: None };
/// let red = Attrs { strike: None, color: Some("red") };
/// let flat = flatten(&[Run::new(0..10, strike), Run::new(5..15, red)]);
/// assert_eq!(flat.len(), 3);
/// assert_eq!(
///     flat[1],
///     Run::new(5..10, Attrs { strike: Some(true), color: Some("red") })
/// );
/// assert_eq!(flat[2].range, 10..15);
/// ```
pub fn flatten<A>(runs: &[Run<A>]) -> Vec<Run<A>>
where
    A: Merge + Default + Clone + PartialEq,
{
    let mut events = Vec::with_capacity(runs.len() * 2);
    for (run, input) in runs.iter().enumerate() {
        if input.is_empty() {
            continue;
        }
        events.push(Event {
            offset: input.range.start,
            kind: EventKind::Start,
            run,
        });
        events.push(Event {
            offset: input.range.end,
            kind: EventKind::End,
            run,
        });
    }
    // Ties on offset are broken by input index so the sweep is deterministic.
    events.sort_by(|a, b| match a.offset.cmp(&b.offset) {
        Ordering::Equal => a.run.cmp(&b.run),
        ordering => ordering,
    });

    // Active input runs, kept sorted by input index.
    let mut active: Vec<usize> = Vec::new();
    let mut merged = A::default();
    let mut output: Vec<Run<A>> = Vec::new();
    let mut previous: Option<usize> = None;

    for event in events {
        if let Some(previous) = previous {
            if event.offset > previous && !active.is_empty() {
                push_coalesced(&mut output, Run::new(previous..event.offset, merged.clone()));
            }
        }
        match event.kind {
            EventKind::Start => {
                let ix = active.partition_point(|&id| id < event.run);
                active.insert(ix, event.run);
                if ix + 1 == active.len() {
                    merged.merge(&runs[event.run].attributes);
                } else {
                    merged = fold(runs, &active);
                }
            }
            EventKind::End => {
                if let Ok(ix) = active.binary_search(&event.run) {
                    active.remove(ix);
                }
                // Another active run may supply the same keys, so rebuild from scratch.
                merged = fold(runs, &active);
            }
        }
        previous = Some(event.offset);
    }
    output
}

/// Completes ordered, disjoint `runs` into a partition of `0..len`.
///
/// Uncovered regions receive runs with default attributes, runs are clipped to `len` and
/// adjacent runs with equal attributes are coalesced.
pub fn fill_gaps<A>(runs: Vec<Run<A>>, len: usize) -> Vec<Run<A>>
where
    A: Default + PartialEq,
{
    let mut output = Vec::with_capacity(runs.len() + 1);
    let mut cursor = 0;
    for mut run in runs {
        if run.range.start >= len {
            break;
        }
        run.range.end = run.range.end.min(len);
        if run.range.start > cursor {
            push_coalesced(&mut output, Run::new(cursor..run.range.start, A::default()));
        }
        cursor = run.range.end;
        push_coalesced(&mut output, run);
    }
    if cursor < len {
        push_coalesced(&mut output, Run::new(cursor..len, A::default()));
    }
    output
}

fn fold<A: Merge + Default>(runs: &[Run<A>], active: &[usize]) -> A {
    let mut merged = A::default();
    for &id in active {
        merged.merge(&runs[id].attributes);
    }
    merged
}

fn push_coalesced<A: PartialEq>(output: &mut Vec<Run<A>>, run: Run<A>) {
    if run.is_empty() {
        return;
    }
    if let Some(last) = output.last_mut() {
        if last.range.end == run.range.start && last.attributes == run.attributes {
            last.range.end = run.range.end;
            return;
        }
    }
    output.push(run);
}

/// Clips ordered, disjoint `runs` to `range` and rebases them to start at zero.
pub(crate) fn clip_runs<A: Clone>(runs: &[Run<A>], range: Range<usize>) -> Vec<Run<A>> {
    let first = runs.partition_point(|run| run.range.end <= range.start);
    runs[first..]
        .iter()
        .take_while(|run| run.range.start < range.end)
        .map(|run| {
            let mut clipped = run.rebased(0);
            clipped.range.start = clipped.range.start.max(range.start);
            clipped.range.end = clipped.range.end.min(range.end);
            clipped.rebased(range.start)
        })
        .filter(|run| !run.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{fill_gaps, flatten};
    use crate::{Merge, Run};
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Attrs {
        strike: Option<bool>,
        color: Option<&'static str>,
    }

    impl Merge for Attrs {
        fn merge(&mut self, other: &Self) {
            self.strike.merge(&other.strike);
            self.color.merge(&other.color);
        }
    }

    fn strike() -> Attrs {
        Attrs {
            strike: Some(true),
            ..Attrs::default()
        }
    }

    fn color(color: &'static str) -> Attrs {
        Attrs {
            color: Some(color),
            ..Attrs::default()
        }
    }

    #[test]
    fn overlapping_runs_split_into_three() {
        let flat = flatten(&[Run::new(0..10, strike()), Run::new(5..15, color("red"))]);
        assert_eq!(
            flat,
            vec![
                Run::new(0..5, strike()),
                Run::new(
                    5..10,
                    Attrs {
                        strike: Some(true),
                        color: Some("red"),
                    }
                ),
                Run::new(10..15, color("red")),
            ]
        );
    }

    #[test]
    fn later_runs_win_conflicts() {
        let flat = flatten(&[
            Run::new(0..10, color("red")),
            Run::new(2..4, color("blue")),
        ]);
        let colors: Vec<_> = flat
            .iter()
            .map(|run| (run.range.clone(), run.attributes.color))
            .collect();
        assert_eq!(
            colors,
            vec![
                (0..2, Some("red")),
                (2..4, Some("blue")),
                (4..10, Some("red")),
            ]
        );
    }

    #[test]
    fn ending_run_does_not_strip_keys_of_others() {
        // Both runs set `color`; when the newer one ends the older value must come back.
        let flat = flatten(&[
            Run::new(0..6, color("red")),
            Run::new(0..3, color("green")),
        ]);
        assert_eq!(flat[0], Run::new(0..3, color("green")));
        assert_eq!(flat[1], Run::new(3..6, color("red")));
    }

    #[test]
    fn earlier_index_starting_later_is_still_folded_first() {
        let flat = flatten(&[Run::new(4..8, color("red")), Run::new(0..6, color("blue"))]);
        assert_eq!(flat[0], Run::new(0..6, color("blue")));
        assert_eq!(flat[1], Run::new(6..8, color("red")));
    }

    #[test]
    fn output_is_disjoint_and_covers_union() {
        let input = [
            Run::new(3..9, strike()),
            Run::new(0..2, color("a")),
            Run::new(7..12, color("b")),
            Run::new(20..25, color("c")),
            Run::new(5..5, color("ignored")),
        ];
        let flat = flatten(&input);
        for pair in flat.windows(2) {
            assert!(pair[0].range.end <= pair[1].range.start, "runs overlap");
        }
        for offset in 0..30 {
            let covered_in = input.iter().any(|run| run.contains(offset));
            let covered_out = flat.iter().any(|run| run.contains(offset));
            assert_eq!(covered_in, covered_out, "coverage differs at {offset}");
        }
    }

    #[test]
    fn gaps_are_filled_with_default_runs() {
        let filled = fill_gaps(vec![Run::new(2..4, strike())], 6);
        assert_eq!(
            filled,
            vec![
                Run::new(0..2, Attrs::default()),
                Run::new(2..4, strike()),
                Run::new(4..6, Attrs::default()),
            ]
        );
    }
}
