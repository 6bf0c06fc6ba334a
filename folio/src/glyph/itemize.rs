// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Script and font itemization.

use attributed_text::Run;

use crate::analysis::ScriptOracle;
use crate::font::{FontHandle, FontProvider};
use crate::style::{ScriptTag, Style};
use crate::Error;

/// Splits `text` into runs of one script.
///
/// Neutral characters (common, inherited, unknown) continue the current run; leading
/// neutral characters join the first run with a real script.
pub(crate) fn script_runs(text: &str, oracle: &dyn ScriptOracle) -> Vec<Run<Style>> {
    let mut runs: Vec<Run<ScriptTag>> = Vec::new();
    for (index, ch) in text.char_indices() {
        let end = index + ch.len_utf8();
        let script = oracle.script_of(ch);
        match runs.last_mut() {
            Some(run) if script.is_neutral() || script == run.attributes => run.range.end = end,
            Some(run) if run.attributes.is_neutral() => {
                run.attributes = script;
                run.range.end = end;
            }
            _ => runs.push(Run::new(index..end, script)),
        }
    }
    runs.into_iter()
        .map(|run| {
            Run::new(
                run.range,
                Style {
                    script: Some(run.attributes),
                    ..Style::default()
                },
            )
        })
        .collect()
}

/// Resolves the fonts covering the text of one style run.
///
/// Characters the primary font lacks are looked up through the provider's substitution;
/// without a usable substitute the primary font's notdef glyph is kept. Whitespace the
/// current font supports stays in the current font.
pub(crate) fn font_runs(
    text: &str,
    run: &Run<Style>,
    provider: &mut dyn FontProvider,
) -> Result<Vec<Run<Style>>, Error> {
    let descriptor = provider.find_descriptor(&run.attributes);
    let primary = match &run.attributes.font {
        Some(font) => font.clone(),
        None => provider.load(&descriptor)?,
    };
    let mut fallback: Option<FontHandle> = None;
    let mut runs: Vec<Run<FontHandle>> = Vec::new();
    for (offset, ch) in text[run.range.clone()].char_indices() {
        let start = run.range.start + offset;
        let end = start + ch.len_utf8();
        let current = runs.last().map(|run| &run.attributes);
        let font = if ch.is_whitespace() && current.is_some_and(|f| f.has_glyph_for_code_point(ch))
        {
            current.cloned().unwrap_or_else(|| primary.clone())
        } else if primary.has_glyph_for_code_point(ch) {
            primary.clone()
        } else if let Some(font) = fallback
            .as_ref()
            .filter(|font| font.has_glyph_for_code_point(ch))
        {
            font.clone()
        } else {
            match substitute(provider, &descriptor, ch) {
                Some(font) => {
                    fallback = Some(font.clone());
                    font
                }
                None => primary.clone(),
            }
        };
        match runs.last_mut() {
            Some(last) if last.attributes == font => last.range.end = end,
            _ => runs.push(Run::new(start..end, font)),
        }
    }
    Ok(runs
        .into_iter()
        .map(|run| {
            Run::new(
                run.range,
                Style {
                    font: Some(run.attributes),
                    ..Style::default()
                },
            )
        })
        .collect())
}

fn substitute(
    provider: &mut dyn FontProvider,
    descriptor: &crate::font::FontDescriptor,
    ch: char,
) -> Option<FontHandle> {
    let candidate = provider.substitute(descriptor, ch)?;
    match provider.load(&candidate) {
        Ok(font) if font.has_glyph_for_code_point(ch) => {
            log::trace!("Substituted {candidate} for U+{:04X}", u32::from(ch));
            Some(font)
        }
        Ok(_) => None,
        Err(err) => {
            log::debug!("Substitute for U+{:04X} failed to load: {err}", u32::from(ch));
            None
        }
    }
}
