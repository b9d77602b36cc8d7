// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer session protocol core: transport seam, connection lifecycle,
// capability probing, status interpretation, discovery coordination and
// the print session itself.

pub mod connection;
pub mod discovery;
pub mod labels;
pub mod outcome;
pub mod session;
pub mod sgd;
pub mod status;
pub mod tcp;
pub mod transport;

#[cfg(test)]
pub(crate) mod testkit;

pub use connection::{Connection, ConnectionState};
pub use discovery::{DiscoveryCoordinator, DiscoveryEvent, PrinterScanner, ScanState, discover};
pub use session::{PRINT_FINISHED, PrintSession, ProgressSink, TEST_LABEL_SENT};
pub use tcp::{RAW_PORT, TcpTransport, TcpTransportFactory};
pub use transport::{Transport, TransportFactory};
