// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributed Text provides the interval model underneath Folio's rich text layout.
//!
//! Text is styled by [`Run`]s: half-open byte ranges carrying an attribute value. Runs
//! supplied by a caller may overlap; [`flatten`] resolves them into a disjoint, ordered
//! partition where later runs take precedence over earlier ones, key by key, as defined
//! by the [`Merge`] implementation of the attribute type.
//!
//! [`AttributedString`] owns a text buffer together with such a partition, covering the
//! whole text without gaps.
//!
//! ```
//! use attributed_text::{AttributedString, Merge, Run};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Attrs {
//!     bold: Option<bool>,
//!     size: Option<u32>,
//! }
//!
//! impl Merge for Attrs {
//!     fn merge(&mut self, other: &Self) {
//!         self.bold = other.bold.or(self.bold);
//!         self.size = other.size.or(self.size);
//!     }
//! }
//!
//! let text = AttributedString::new(
//!     "Hello world",
//!     [
//!         Run::new(0..5, Attrs { bold: Some(true), size: None }),
//!         Run::new(3..8, Attrs { bold: None, size: Some(12) }),
//!     ],
//! )
//! .unwrap();
//! let ranges: Vec<_> = text.runs().iter().map(|run| run.range.clone()).collect();
//! assert_eq!(ranges, vec![0..3, 3..5, 5..8, 8..11]);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod attributed_string;
mod error;
mod flatten;
mod run;
mod text_range;

pub use crate::attributed_string::AttributedString;
pub use crate::error::{BoundaryInfo, Endpoint, Error, ErrorKind};
pub use crate::flatten::{fill_gaps, flatten};
pub use crate::run::{Merge, Run};
pub use crate::text_range::TextRange;
