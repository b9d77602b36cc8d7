// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Device settings probe (SGD getvar).
//
// Zebra-family printers expose configuration through Set-Get-Do: the
// request `! U1 getvar "key"\r\n` answers with the value in double
// quotes. Unknown keys answer the literal `"?"`.

use tracing::{debug, instrument};

use etikett_core::error::{EtikettError, Result};
use etikett_core::types::ControlLanguage;

use crate::connection::Connection;

/// Settings key for the PDF virtual device.
pub const PDF_CAPABILITY_KEY: &str = "apl.enable";

/// Value of [`PDF_CAPABILITY_KEY`] on PDF-capable firmware.
pub const PDF_CAPABILITY_VALUE: &str = "pdf";

/// Settings key naming the firmware's control language.
pub const LANGUAGES_KEY: &str = "device.languages";

/// Read one device setting.
///
/// Returns `None` when the device does not know the key or reports an
/// empty value. Transport faults and unparseable replies are
/// capability errors: we asked a question and got no usable answer.
#[instrument(skip(conn), fields(addr = %conn.address()))]
pub async fn get_setting(conn: &mut Connection, key: &str) -> Result<Option<String>> {
    let request = format!("! U1 getvar \"{key}\"\r\n");
    let response = conn
        .exchange(request.as_bytes())
        .await
        .map_err(|e| EtikettError::Capability(format!("getvar {key}: {e}")))?;

    let value = parse_getvar_reply(&response).ok_or_else(|| {
        EtikettError::Capability(format!(
            "getvar {key}: unparseable reply ({} bytes)",
            response.len()
        ))
    })?;

    debug!(key, value = %value, "setting read");
    if value == "?" || value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

/// Whether the printer can render PDF documents on-device.
///
/// True only for the exact value `pdf`; case variants and absent keys
/// mean the virtual device is off or the firmware predates it.
pub async fn supports_pdf_rendering(conn: &mut Connection) -> Result<bool> {
    let value = get_setting(conn, PDF_CAPABILITY_KEY).await?;
    Ok(value.as_deref() == Some(PDF_CAPABILITY_VALUE))
}

/// Determine which control language the firmware expects.
///
/// An undeterminable language is an error, not a guess: ZPL sent to a
/// CPCL-only device prints garbage labels.
pub async fn query_control_language(conn: &mut Connection) -> Result<ControlLanguage> {
    let value = get_setting(conn, LANGUAGES_KEY).await?.ok_or_else(|| {
        EtikettError::Capability("printer did not report a control language".into())
    })?;
    Ok(ControlLanguage::from_device_languages(&value))
}

// -- helpers ----------------------------------------------------------------

/// Extract the quoted value from a getvar reply.
///
/// Replies look like `"pdf"\r\n`, sometimes padded with NULs. A reply
/// without a quoted section is unparseable.
fn parse_getvar_reply(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    let inner = trimmed.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.to_owned())
}
