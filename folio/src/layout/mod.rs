// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line layout: containers, line breaking and line finalization.
//!
//! [`LayoutEngine`] drives the individual engines. They are public so that callers can
//! run them on their own line fragments.

mod container;
mod decoration;
mod engine;
mod justify;
mod line_break;
mod tabs;
mod truncate;

pub use container::{
    Block, Container, DecorationLine, LineFragment, TabStop, DEFAULT_COLUMN_GAP,
    DEFAULT_TAB_INTERVAL,
};
pub use decoration::DecorationEngine;
pub use engine::LayoutEngine;
pub use justify::{JustificationEngine, Priority, StretchFactor};
pub use line_break::{LineBreak, LineBreaker, HYPHEN, HYPHENATION_TOLERANCE};
pub use tabs::TabEngine;
pub use truncate::{TruncationEngine, ELLIPSIS};
