// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use attributed_text::{flatten, AttributedString, Run};

use super::itemize::{font_runs, script_runs};
use super::{GlyphRun, GlyphString};
use crate::analysis::Capabilities;
use crate::font::FontProvider;
use crate::style::Style;
use crate::Error;

/// Shapes an attributed paragraph into a [`GlyphString`].
///
/// Detected script runs and bidi level runs are layered beneath the caller's style runs,
/// and resolved font runs above them, so explicit `script` and `bidi_level` attributes win
/// over detection. Each resulting run is shaped separately and the glyphs are
/// concatenated in logical order.
pub fn generate_glyphs(
    text: &AttributedString<Style>,
    provider: &mut dyn FontProvider,
    capabilities: &Capabilities,
) -> Result<GlyphString, Error> {
    let source = text.text();
    if source.is_empty() {
        return Ok(GlyphString::default());
    }
    let mut layers = script_runs(source, &*capabilities.script);
    if let Some(bidi) = &capabilities.bidi {
        layers.extend(bidi.level_runs(source).into_iter().map(|run| {
            Run::new(
                run.range,
                Style {
                    bidi_level: Some(run.attributes),
                    ..Style::default()
                },
            )
        }));
    }
    layers.extend(text.runs().iter().cloned());
    for run in text.runs() {
        layers.extend(font_runs(source, run, provider)?);
    }

    let mut runs = Vec::new();
    for run in flatten(&layers) {
        // Font runs cover every style run, so every resolved run has a font.
        let Some(font) = run.attributes.font.clone() else {
            log::warn!("Skipping run {:?} resolved without a font", run.range);
            continue;
        };
        let features = run.attributes.features.as_deref().unwrap_or(&[]);
        let shaped = font.layout(&source[run.range.clone()], features, run.attributes.script);
        runs.push(GlyphRun::from_shaped(
            run.range,
            run.attributes,
            font,
            shaped,
        ));
    }
    log::trace!("Generated {} glyph runs for {} bytes", runs.len(), source.len());
    Ok(GlyphString::from_runs(source.to_owned(), runs))
}
