// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Built-in test label payloads.
//
// One boxed TEST label per control language, byte-for-byte the forms
// the legacy module shipped. CPCL and line-print devices share the
// CPCL form.

use etikett_core::error::{EtikettError, Result};
use etikett_core::types::ControlLanguage;

/// ZPL test label: a 380-dot box with centred TEST text.
pub const ZPL_TEST_LABEL: &[u8] =
    b"^XA^FO17,16^GB379,371,8^FS^FT65,255^A0N,135,134^FDTEST^FS^XZ";

/// CPCL test label: the same box, in CPCL framing.
pub const CPCL_TEST_LABEL: &[u8] = b"! 0 200 200 406 1\r\nON-FEED IGNORE\r\nBOX 20 20 380 380 8\r\nT 0 6 137 177 TEST\r\nPRINT\r\n";

/// The test payload for `language`.
pub fn test_label(language: ControlLanguage) -> Result<&'static [u8]> {
    match language {
        ControlLanguage::Zpl => Ok(ZPL_TEST_LABEL),
        ControlLanguage::Cpcl | ControlLanguage::LinePrint => Ok(CPCL_TEST_LABEL),
        ControlLanguage::Unknown => Err(EtikettError::Capability(
            "no test label for an unrecognised control language".into(),
        )),
    }
}
