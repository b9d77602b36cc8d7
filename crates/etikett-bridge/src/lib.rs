// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host-runtime surface of the label-printer engine.
//
// The bridge exposes discovery and printing as a handful of
// string-result operations, matching the message contract the legacy
// mobile module kept with its host. Failures cross the boundary as one
// human-readable message each; the technical detail stays in the logs.

pub mod document;
pub mod stub;

use std::sync::Arc;

use tracing::{instrument, warn};

use etikett_core::error::{EtikettError, Result};
use etikett_core::human_errors::humanize_error;
use etikett_core::types::PrinterAddress;
use etikett_link::discovery;
use etikett_link::session::PrintSession;
use etikett_link::tcp::TcpTransportFactory;

pub use etikett_core::config::LinkConfig;
pub use etikett_core::human_errors::{HumanError, Severity};
pub use etikett_core::types::{DiscoveredPrinter, ProgressEvent};
pub use etikett_link::discovery::PrinterScanner;
pub use etikett_link::session::ProgressSink;
pub use etikett_link::transport::TransportFactory;
pub use stub::StubScanner;

/// Result crossing the host boundary: success and failure are both
/// plain strings, per the legacy module contract.
pub type HostResult<T> = std::result::Result<T, String>;

/// The host runtime's handle on the printer engine.
///
/// Mobile hosts construct it with their platform's Bluetooth transport
/// factory and scanner; [`PrinterModule::over_tcp`] wires the raw TCP
/// transport for desktop and CI use.
pub struct PrinterModule {
    factory: Arc<dyn TransportFactory>,
    scanner: Arc<dyn PrinterScanner>,
    config: LinkConfig,
}

impl PrinterModule {
    pub fn new(
        factory: Arc<dyn TransportFactory>,
        scanner: Arc<dyn PrinterScanner>,
        config: LinkConfig,
    ) -> Self {
        Self {
            factory,
            scanner,
            config,
        }
    }

    /// Desktop/CI wiring: raw TCP transport, no printer scanner.
    pub fn over_tcp(config: LinkConfig) -> Self {
        let connect_timeout = config.connect_timeout();
        Self::new(
            Arc::new(TcpTransportFactory::new(connect_timeout)),
            Arc::new(StubScanner),
            config,
        )
    }

    /// Scan for printers, returned in arrival order.
    pub async fn discover(&self) -> HostResult<Vec<DiscoveredPrinter>> {
        discovery::discover(self.scanner.as_ref())
            .await
            .map_err(|e| report(&e))
    }

    /// Scan for printers and marshal the result as the JSON array the
    /// legacy host parsed.
    pub async fn discover_json(&self) -> HostResult<String> {
        let printers = self.discover().await?;
        serde_json::to_string(&printers).map_err(|e| report(&EtikettError::from(e)))
    }

    /// Print a document from a filesystem path.
    #[instrument(skip(self))]
    pub async fn print_document(&self, address: &str, path: &str) -> HostResult<String> {
        self.run_document(address, path, None)
            .await
            .map_err(|e| report(&e))
    }

    /// Print a document with per-chunk progress callbacks.
    #[instrument(skip(self, progress))]
    pub async fn print_document_with_progress(
        &self,
        address: &str,
        path: &str,
        progress: ProgressSink,
    ) -> HostResult<String> {
        self.run_document(address, path, Some(progress))
            .await
            .map_err(|e| report(&e))
    }

    /// Send the built-in test label in the printer's own language.
    #[instrument(skip(self))]
    pub async fn print_test_label(&self, address: &str) -> HostResult<String> {
        self.run_test_label(address).await.map_err(|e| report(&e))
    }

    async fn run_document(
        &self,
        address: &str,
        path: &str,
        progress: Option<ProgressSink>,
    ) -> Result<String> {
        let bytes = document::load_document(path).await?;
        let mut session = self.session(address)?;
        if let Some(sink) = progress {
            session = session.with_progress(sink);
        }
        session.print_document(&bytes).await
    }

    async fn run_test_label(&self, address: &str) -> Result<String> {
        self.session(address)?.print_test_label().await
    }

    fn session(&self, address: &str) -> Result<PrintSession> {
        let address = PrinterAddress::from(address);
        let transport = self.factory.create(&address)?;
        Ok(PrintSession::new(transport, &self.config))
    }
}

/// Log the technical failure and produce the message that crosses the
/// host boundary.
fn report(err: &EtikettError) -> String {
    warn!(error = %err, "printer operation failed");
    humanize_error(err).message
}
