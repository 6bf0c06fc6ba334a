// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container geometry and line fragment generation.

mod fragments;
mod polygon;

pub use fragments::{LineFragmentGenerator, Pass};
pub(crate) use polygon::DEFAULT_TOLERANCE;
pub use polygon::Polygon;
