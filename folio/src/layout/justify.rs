// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Priority based distribution of extra or missing space across a line.

use super::LineFragment;
use crate::glyph::GlyphString;
use crate::util::nearly_zero;
use crate::Error;

const WHITESPACE_GROW: f32 = 0.5;
const WHITESPACE_SHRINK: f32 = -0.5;
const LETTER_GROW: f32 = 37.0 / 256.0;
const LETTER_SHRINK: f32 = -11.0 / 256.0;

/// Stretch classes, consumed in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Elongation of connected scripts. No glyph is assigned this class by default.
    Kashida = 0,
    /// Space between words.
    Whitespace = 1,
    /// Space between letters.
    Letter = 2,
    /// Never stretched.
    Null = 3,
}

impl Priority {
    const COUNT: usize = 4;
}

/// How much space a glyph can absorb on each side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StretchFactor {
    /// Stretch before the glyph, applied to the advance of the previous glyph.
    pub before: f32,
    /// Stretch after the glyph, applied to its own advance.
    pub after: f32,
    /// Class the stretch belongs to.
    pub priority: Priority,
}

impl StretchFactor {
    /// A glyph that absorbs nothing.
    pub const NULL: Self = Self {
        before: 0.0,
        after: 0.0,
        priority: Priority::Null,
    };
}

/// Fills lines to the width of their rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JustificationEngine {
    factor: f32,
}

impl JustificationEngine {
    /// Creates an engine using `factor` of the natural stretch of each glyph.
    ///
    /// Fails unless `factor` is within `0.0..=1.0`.
    pub fn new(factor: f32) -> Result<Self, Error> {
        Error::check_factor("justification_factor", factor)?;
        Ok(Self { factor })
    }

    /// The stretch fraction.
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Adjusts the advances of the line so that it is exactly as wide as its rectangle.
    pub fn justify(&self, line: &mut LineFragment) {
        let gap = line.rect.width() - line.glyphs.advance_width();
        if nearly_zero(gap) || line.glyphs.is_empty() {
            return;
        }
        let factors = self.factors(&line.glyphs, gap > 0.0);
        let adjustments = Self::assign(gap, &factors);
        for (index, adjustment) in adjustments.into_iter().enumerate() {
            if let Some(position) = line.glyphs.position_mut(index) {
                position.x_advance += adjustment;
            }
        }
    }

    /// Computes the stretch factors of every glyph for growing or shrinking.
    ///
    /// Combining marks move the stretch of their base glyph after themselves so they stay
    /// attached. Trailing whitespace does not stretch, nor does the space before the first
    /// glyph or after the last visible one.
    pub fn factors(&self, glyphs: &GlyphString, grow: bool) -> Vec<StretchFactor> {
        let (whitespace, letter) = if grow {
            (WHITESPACE_GROW, LETTER_GROW)
        } else {
            (WHITESPACE_SHRINK, LETTER_SHRINK)
        };
        let all: Vec<_> = glyphs.glyphs().zip(glyphs.positions()).collect();
        let visible = all
            .iter()
            .rposition(|(glyph, _)| !glyph.is_whitespace())
            .map_or(0, |index| index + 1);

        let mut factors: Vec<StretchFactor> = Vec::with_capacity(all.len());
        for (index, (glyph, position)) in all.iter().enumerate() {
            if index >= visible {
                factors.push(StretchFactor::NULL);
                continue;
            }
            if glyph.is_mark() {
                if let Some(base) = factors.last_mut() {
                    let after = core::mem::replace(&mut base.after, 0.0);
                    let priority = base.priority;
                    factors.push(StretchFactor {
                        before: 0.0,
                        after,
                        priority,
                    });
                    continue;
                }
            }
            let (constant, priority) = if glyph.is_whitespace() {
                (whitespace, Priority::Whitespace)
            } else {
                (letter, Priority::Letter)
            };
            let stretch = position.x_advance * constant * self.factor;
            factors.push(StretchFactor {
                before: stretch,
                after: stretch,
                priority,
            });
        }
        if let Some(first) = factors.first_mut() {
            first.before = 0.0;
        }
        if let Some(last) = visible.checked_sub(1).and_then(|index| factors.get_mut(index)) {
            last.after = 0.0;
        }
        factors
    }

    /// Distributes `gap` over the glyphs and returns the advance change of each.
    ///
    /// Classes are consumed from [`Priority::Kashida`] to [`Priority::Null`]: a class that
    /// can absorb the rest of the gap is scaled to do so, otherwise it is applied fully and
    /// the remainder carries over. If the gap is still not closed afterwards, the
    /// remainder is forced onto the first class with any stretch, even past its natural
    /// amount.
    pub fn assign(gap: f64, factors: &[StretchFactor]) -> Vec<f32> {
        let mut totals = [0.0_f64; Priority::COUNT];
        for factor in factors {
            totals[factor.priority as usize] += f64::from(factor.before + factor.after);
        }
        let mut scales = [0.0_f64; Priority::COUNT];
        let mut remaining = gap;
        for (total, scale) in totals.iter().zip(&mut scales) {
            if nearly_zero(remaining) {
                break;
            }
            if nearly_zero(*total) {
                continue;
            }
            let ratio = remaining / total;
            if ratio <= 1.0 {
                *scale = ratio;
                remaining = 0.0;
                break;
            }
            *scale = 1.0;
            remaining -= total;
        }
        if !nearly_zero(remaining) {
            if let Some(class) = totals.iter().position(|total| !nearly_zero(*total)) {
                log::trace!("Over-justifying class {class} by {remaining}");
                scales[class] += remaining / totals[class];
            }
        }

        let scaled = |factor: &StretchFactor, value: f32| {
            f64::from(value) * scales[factor.priority as usize]
        };
        factors
            .iter()
            .enumerate()
            .map(|(index, factor)| {
                let after = scaled(factor, factor.after);
                let next_before = factors
                    .get(index + 1)
                    .map_or(0.0, |next| scaled(next, next.before));
                (after + next_before) as f32
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{JustificationEngine, Priority, StretchFactor};

    fn factor(before: f32, after: f32, priority: Priority) -> StretchFactor {
        StretchFactor {
            before,
            after,
            priority,
        }
    }

    #[test]
    fn factor_must_be_a_fraction() {
        assert!(JustificationEngine::new(1.5).is_err());
        assert!(JustificationEngine::new(-0.1).is_err());
        assert!(JustificationEngine::new(f32::NAN).is_err());
        assert!(JustificationEngine::new(0.0).is_ok());
    }

    #[test]
    fn whitespace_is_consumed_before_letters() {
        let factors = [
            factor(0.0, 1.0, Priority::Letter),
            factor(2.0, 2.0, Priority::Whitespace),
            factor(1.0, 0.0, Priority::Letter),
        ];
        let adjustments = JustificationEngine::assign(2.0, &factors);
        assert_eq!(adjustments, vec![1.0, 1.0, 0.0]);

        let adjustments = JustificationEngine::assign(5.0, &factors);
        let total: f32 = adjustments.iter().sum();
        assert!((total - 5.0).abs() < 1e-5);
        assert_eq!(adjustments[1], 2.0 + 0.5);
    }

    #[test]
    fn exhausted_stretch_over_justifies() {
        let factors = [
            factor(0.0, 1.0, Priority::Letter),
            factor(1.0, 0.0, Priority::Letter),
        ];
        let adjustments = JustificationEngine::assign(10.0, &factors);
        assert_eq!(adjustments, vec![10.0, 0.0]);
    }

    #[test]
    fn null_factors_absorb_nothing() {
        let factors = [StretchFactor::NULL, StretchFactor::NULL];
        assert_eq!(JustificationEngine::assign(4.0, &factors), vec![0.0, 0.0]);
    }
}
