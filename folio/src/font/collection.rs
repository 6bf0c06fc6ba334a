// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use hashbrown::HashMap;

use super::{FontCache, FontDescriptor, FontHandle, FontProvider};
use crate::style::{Style, DEFAULT_FONT_WEIGHT};
use crate::Error;

#[derive(Clone, Debug)]
struct Face {
    weight: u16,
    italic: bool,
    font: FontHandle,
}

/// A [`FontProvider`] over an in-memory set of registered fonts.
///
/// Faces are grouped by family. Requests resolve to the face of the family with matching
/// slant and the closest weight; characters missing from that face are looked up in the
/// fallback families, in registration order.
#[derive(Clone, Debug)]
pub struct FontCollection {
    families: HashMap<Arc<str>, Vec<Face>>,
    default_family: Arc<str>,
    fallbacks: Vec<Arc<str>>,
    cache: FontCache,
}

impl FontCollection {
    /// Creates an empty collection whose unstyled text uses `default_family`.
    pub fn new(default_family: impl Into<Arc<str>>) -> Self {
        Self {
            families: HashMap::new(),
            default_family: default_family.into(),
            fallbacks: Vec::new(),
            cache: FontCache::new(),
        }
    }

    /// Registers a face of `family`.
    pub fn register(
        &mut self,
        family: impl Into<Arc<str>>,
        weight: u16,
        italic: bool,
        font: FontHandle,
    ) -> &mut Self {
        self.families.entry(family.into()).or_default().push(Face {
            weight,
            italic,
            font,
        });
        self.cache.clear();
        self
    }

    /// Appends `family` to the families searched for missing characters.
    pub fn add_fallback(&mut self, family: impl Into<Arc<str>>) -> &mut Self {
        self.fallbacks.push(family.into());
        self
    }

    /// The fonts loaded so far.
    pub fn cache(&self) -> &FontCache {
        &self.cache
    }
}

fn best_match(faces: &[Face], descriptor: &FontDescriptor) -> Option<FontHandle> {
    faces
        .iter()
        .min_by_key(|face| {
            (
                face.italic != descriptor.italic,
                face.weight.abs_diff(descriptor.weight),
            )
        })
        .map(|face| face.font.clone())
}

impl FontProvider for FontCollection {
    fn find_descriptor(&self, style: &Style) -> FontDescriptor {
        FontDescriptor {
            family: style
                .font_family
                .clone()
                .unwrap_or_else(|| self.default_family.clone()),
            weight: style.font_weight.unwrap_or(DEFAULT_FONT_WEIGHT),
            italic: style.italic.unwrap_or(false),
        }
    }

    fn substitute(&mut self, descriptor: &FontDescriptor, ch: char) -> Option<FontDescriptor> {
        for family in self.fallbacks.clone() {
            if family == descriptor.family {
                continue;
            }
            let candidate = FontDescriptor {
                family,
                ..descriptor.clone()
            };
            match self.load(&candidate) {
                Ok(font) if font.has_glyph_for_code_point(ch) => return Some(candidate),
                Ok(_) => {}
                Err(err) => log::debug!("Skipping fallback: {err}"),
            }
        }
        None
    }

    fn load(&mut self, descriptor: &FontDescriptor) -> Result<FontHandle, Error> {
        let Self {
            families, cache, ..
        } = self;
        cache.get_or_try_insert_with(descriptor, || {
            families
                .get(&descriptor.family)
                .and_then(|faces| best_match(faces, descriptor))
                .ok_or_else(|| Error::FontNotFound(descriptor.clone()))
        })
    }
}
