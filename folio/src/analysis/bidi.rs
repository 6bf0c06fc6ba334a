// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use attributed_text::Run;
use unicode_bidi::{BidiInfo, Level, LTR_LEVEL};

use super::BidiOracle;

/// Bidi level resolution with the `unicode-bidi` implementation of UAX #9.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeBidi {
    /// Paragraph embedding level; `None` detects it from the first strong character.
    pub base_level: Option<u8>,
}

impl UnicodeBidi {
    /// Creates an oracle with a fixed paragraph level.
    pub fn with_base_level(level: u8) -> Self {
        Self {
            base_level: Some(level),
        }
    }
}

impl BidiOracle for UnicodeBidi {
    fn level_runs(&self, text: &str) -> Vec<Run<u8>> {
        let base = self.base_level.and_then(|level| Level::new(level).ok());
        let info = BidiInfo::new(text, base);
        let mut runs: Vec<Run<u8>> = Vec::new();
        for (index, level) in info.levels.iter().enumerate() {
            let level = level.number();
            match runs.last_mut() {
                Some(run) if run.attributes == level => run.range.end = index + 1,
                _ => runs.push(Run::new(index..index + 1, level)),
            }
        }
        runs
    }

    fn visual_order(&self, levels: &[u8]) -> Vec<usize> {
        let levels: Vec<Level> = levels
            .iter()
            .map(|&level| Level::new(level).unwrap_or(LTR_LEVEL))
            .collect();
        BidiInfo::reorder_visual(&levels)
    }
}

#[cfg(test)]
mod tests {
    use super::UnicodeBidi;
    use crate::analysis::BidiOracle;

    #[test]
    fn mixed_text_has_rtl_run() {
        let text = "abc \u{05D0}\u{05D1} def";
        let runs = UnicodeBidi::with_base_level(0).level_runs(text);
        let levels: Vec<_> = runs.iter().map(|run| run.attributes).collect();
        assert_eq!(levels, vec![0, 1, 0]);
        assert_eq!(runs[1].range, 4..8);
    }

    #[test]
    fn rtl_runs_swap_visually() {
        let order = UnicodeBidi::default().visual_order(&[0, 1, 1, 0]);
        assert_eq!(order, vec![0, 2, 1, 3]);
    }
}
