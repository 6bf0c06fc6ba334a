// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_justify;
mod test_line_break;
mod test_tabs;
mod test_truncate;
mod utils;
