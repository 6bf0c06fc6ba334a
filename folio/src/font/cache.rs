// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;

use super::{FontDescriptor, FontHandle};
use crate::Error;

/// Loaded fonts keyed by descriptor.
///
/// Owned by a [`FontProvider`](super::FontProvider) so its lifetime follows the caller's
/// provider rather than the process.
#[derive(Clone, Debug, Default)]
pub struct FontCache {
    fonts: HashMap<FontDescriptor, FontHandle>,
}

impl FontCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached font for `descriptor`.
    pub fn get(&self, descriptor: &FontDescriptor) -> Option<&FontHandle> {
        self.fonts.get(descriptor)
    }

    /// Returns the cached font for `descriptor`, loading it with `load` on a miss.
    ///
    /// Failed loads are not cached.
    pub fn get_or_try_insert_with(
        &mut self,
        descriptor: &FontDescriptor,
        load: impl FnOnce() -> Result<FontHandle, Error>,
    ) -> Result<FontHandle, Error> {
        if let Some(font) = self.fonts.get(descriptor) {
            return Ok(font.clone());
        }
        let font = load()?;
        log::trace!("Cached font for {descriptor}");
        self.fonts.insert(descriptor.clone(), font.clone());
        Ok(font)
    }

    /// Number of cached fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Drops every cached font.
    pub fn clear(&mut self) {
        self.fonts.clear();
    }
}
