// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use unicode_script::UnicodeScript;

use super::ScriptOracle;
use crate::style::ScriptTag;

/// Script classification from the `unicode-script` tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeScripts;

impl ScriptOracle for UnicodeScripts {
    fn script_of(&self, ch: char) -> ScriptTag {
        ScriptTag::from_name(ch.script().short_name()).unwrap_or(ScriptTag::UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::UnicodeScripts;
    use crate::analysis::ScriptOracle;
    use crate::style::ScriptTag;

    #[test]
    fn classifies_scripts() {
        let scripts = UnicodeScripts;
        assert_eq!(scripts.script_of('a'), ScriptTag(*b"Latn"));
        assert_eq!(scripts.script_of('\u{05D0}'), ScriptTag(*b"Hebr"));
        assert_eq!(scripts.script_of(' '), ScriptTag::COMMON);
        assert_eq!(scripts.script_of('\u{301}'), ScriptTag::INHERITED);
    }
}
