// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document loading for the host bridge.
//
// The host hands over a resolved filesystem path; URI resolution and
// temp-file management stay on the host side.

use std::path::Path;

use tracing::debug;

use etikett_core::error::{EtikettError, Result};

/// Read the document bytes for a print job.
///
/// Empty files are rejected here, before a connection is ever opened.
pub async fn load_document(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    if bytes.is_empty() {
        return Err(EtikettError::EmptyDocument);
    }
    debug!(path = %path.display(), len = bytes.len(), "document loaded");
    Ok(bytes)
}
