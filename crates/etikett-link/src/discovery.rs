// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer discovery coordination.
//
// The platform owns the radio; we own the bookkeeping. A scanner
// implementation forwards its raw scan callbacks as `DiscoveryEvent`s
// into a channel, and the coordinator folds the stream into one
// terminal outcome: a device list, the distinguished nothing-found
// case, or the scan error.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use etikett_core::error::{EtikettError, Result};
use etikett_core::types::DiscoveredPrinter;

/// One scan callback, as relayed by a [`PrinterScanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryEvent {
    /// A printer answered the inquiry. Duplicates are possible and
    /// kept; callers see the scan exactly as the radio reported it.
    DeviceFound(DiscoveredPrinter),
    /// The scan window elapsed normally.
    Finished,
    /// The radio gave up; devices already reported are void.
    Error(String),
}

/// Driver for a platform discovery mechanism.
///
/// `start_scan` returns once scanning is underway; events then flow
/// through the sender from whatever task or thread the platform uses.
/// Dropping the sender without a terminal event counts as a failed
/// scan.
#[async_trait]
pub trait PrinterScanner: Send + Sync {
    async fn start_scan(&self, events: mpsc::UnboundedSender<DiscoveryEvent>) -> Result<()>;
}

/// Discovery lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
    Completed,
    Failed,
}

/// Folds scan events into a single outcome.
///
/// A coordinator runs one scan and is then spent, mirroring the
/// one-job-per-connection rule on the session side.
pub struct DiscoveryCoordinator {
    state: ScanState,
    found: Vec<DiscoveredPrinter>,
}

impl DiscoveryCoordinator {
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            found: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Run one scan through to its terminal outcome.
    #[instrument(skip(self, scanner))]
    pub async fn run(&mut self, scanner: &dyn PrinterScanner) -> Result<Vec<DiscoveredPrinter>> {
        if self.state != ScanState::Idle {
            return Err(EtikettError::Discovery(
                "coordinator has already run a scan".into(),
            ));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.state = ScanState::Scanning;
        if let Err(e) = scanner.start_scan(tx).await {
            self.state = ScanState::Failed;
            return Err(e);
        }
        self.drain(rx).await
    }

    /// Consume events until a terminal one arrives.
    async fn drain(
        &mut self,
        mut events: mpsc::UnboundedReceiver<DiscoveryEvent>,
    ) -> Result<Vec<DiscoveredPrinter>> {
        while let Some(event) = events.recv().await {
            match event {
                DiscoveryEvent::DeviceFound(printer) => {
                    debug!(
                        addr = %printer.address,
                        name = %printer.friendly_name,
                        "printer found"
                    );
                    self.found.push(printer);
                }
                DiscoveryEvent::Finished => {
                    self.state = ScanState::Completed;
                    info!(count = self.found.len(), "scan finished");
                    return if self.found.is_empty() {
                        Err(EtikettError::NoPrintersFound)
                    } else {
                        Ok(std::mem::take(&mut self.found))
                    };
                }
                DiscoveryEvent::Error(message) => {
                    // Partial results from a failed scan are not
                    // trustworthy; discard them.
                    self.found.clear();
                    self.state = ScanState::Failed;
                    warn!(error = %message, "scan failed");
                    return Err(EtikettError::Discovery(message));
                }
            }
        }

        self.state = ScanState::Failed;
        Err(EtikettError::Discovery(
            "scanner stopped without reporting an outcome".into(),
        ))
    }
}

impl Default for DiscoveryCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a scan on a fresh coordinator.
pub async fn discover(scanner: &dyn PrinterScanner) -> Result<Vec<DiscoveredPrinter>> {
    let mut coordinator = DiscoveryCoordinator::new();
    coordinator.run(scanner).await
}
