// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub scanner for desktop/CI builds where no Bluetooth stack is
// available. Mobile hosts inject their own `PrinterScanner` over the
// platform radio.

use async_trait::async_trait;
use tokio::sync::mpsc;

use etikett_core::error::{EtikettError, Result};
use etikett_link::discovery::{DiscoveryEvent, PrinterScanner};

/// No-op scanner returned by the TCP wiring.
pub struct StubScanner;

#[async_trait]
impl PrinterScanner for StubScanner {
    async fn start_scan(&self, _events: mpsc::UnboundedSender<DiscoveryEvent>) -> Result<()> {
        tracing::warn!("PrinterScanner::start_scan called on stub scanner");
        Err(EtikettError::PlatformUnavailable)
    }
}
