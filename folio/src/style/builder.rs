// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Range based style application.

use core::ops::{Bound, Range, RangeBounds};

use attributed_text::{AttributedString, Run};

use super::{Style, StyleProperty};

/// Builder for an [`AttributedString`] styled with ranged [`StyleProperty`] values.
///
/// Properties pushed later take precedence over earlier ones where their ranges overlap;
/// default properties apply to the whole text beneath every ranged property.
#[derive(Clone, Debug)]
pub struct AttributedStringBuilder {
    text: String,
    root: Style,
    runs: Vec<Run<Style>>,
}

impl AttributedStringBuilder {
    /// Starts building styles for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            root: Style::default(),
            runs: Vec::new(),
        }
    }

    /// Sets a property of the root style, which covers the full range of text.
    pub fn push_default(&mut self, property: StyleProperty) -> &mut Self {
        self.root.apply(property);
        self
    }

    /// Overrides a property for the specified byte range of text.
    ///
    /// Ranges are validated by [`build`](Self::build).
    pub fn push(&mut self, property: StyleProperty, range: impl RangeBounds<usize>) -> &mut Self {
        let range = resolve_range(range, self.text.len());
        self.runs.push(Run::new(range, Style::from_property(property)));
        self
    }

    /// Overrides a whole set of attributes for the specified byte range of text.
    pub fn push_style(&mut self, style: Style, range: impl RangeBounds<usize>) -> &mut Self {
        let range = resolve_range(range, self.text.len());
        self.runs.push(Run::new(range, style));
        self
    }

    /// Flattens the pushed properties into an attributed string.
    ///
    /// Fails if a pushed range does not fit the text or splits a character.
    pub fn build(self) -> Result<AttributedString<Style>, attributed_text::Error> {
        let root = Run::new(0..self.text.len(), self.root);
        AttributedString::new(self.text, core::iter::once(root).chain(self.runs))
    }
}

/// Resolves `RangeBounds` against a text length.
///
/// Reversed ranges are kept reversed so they fail validation at build time.
fn resolve_range(range: impl RangeBounds<usize>, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(n) => *n,
        Bound::Excluded(n) => n.saturating_add(1),
    };
    let end = match range.end_bound() {
        Bound::Unbounded => len,
        Bound::Included(n) => n.saturating_add(1),
        Bound::Excluded(n) => *n,
    };
    Range { start, end }
}

#[cfg(test)]
mod tests {
    use super::AttributedStringBuilder;
    use crate::style::{Alignment, StyleProperty};

    #[test]
    fn ranged_properties_override_defaults() {
        let mut builder = AttributedStringBuilder::new("Hello world");
        builder
            .push_default(StyleProperty::FontSize(10.0))
            .push(StyleProperty::FontSize(20.0), 6..)
            .push(StyleProperty::Underline(true), 3..8);
        let text = builder.build().unwrap();
        let sizes: Vec<_> = text
            .runs()
            .iter()
            .map(|run| (run.range.clone(), run.attributes.font_size, run.attributes.underline))
            .collect();
        assert_eq!(
            sizes,
            vec![
                (0..3, Some(10.0), None),
                (3..6, Some(10.0), Some(true)),
                (6..8, Some(20.0), Some(true)),
                (8..11, Some(20.0), None),
            ]
        );
    }

    #[test]
    fn defaults_cover_unstyled_text() {
        let mut builder = AttributedStringBuilder::new("abc");
        builder.push_default(StyleProperty::Align(Alignment::Right));
        let text = builder.build().unwrap();
        assert_eq!(text.runs().len(), 1);
        assert_eq!(text.runs()[0].attributes.align, Some(Alignment::Right));
    }

    #[test]
    fn out_of_range_property_fails() {
        let mut builder = AttributedStringBuilder::new("abc");
        builder.push(StyleProperty::Underline(true), 1..9);
        assert!(builder.build().is_err());
    }
}
