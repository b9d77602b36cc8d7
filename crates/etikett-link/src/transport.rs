// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transport abstraction over the printer byte stream.
//
// A transport is the raw, already-addressed channel to one printer:
// Bluetooth RFCOMM on mobile platforms, TCP on desktop and in tests.
// Nothing above this trait sees the medium.

use async_trait::async_trait;

use etikett_core::error::Result;
use etikett_core::types::PrinterAddress;

/// Bidirectional byte stream to a single printer.
///
/// Implementations are not required to survive `open` being called
/// twice; the connection layer guarantees it never is.
#[async_trait]
pub trait Transport: Send {
    /// Establish the underlying channel.
    async fn open(&mut self) -> Result<()>;

    /// Whether the channel is currently usable. Must not perform I/O.
    fn is_connected(&self) -> bool;

    /// Write the whole buffer.
    async fn write(&mut self, buf: &[u8]) -> Result<()>;

    /// Read available bytes into `buf`. Returns 0 at end of stream.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Release the channel. Safe to call more than once.
    async fn close(&mut self) -> Result<()>;

    /// The address this transport is bound to.
    fn address(&self) -> &PrinterAddress;
}

/// Creates transports for printer addresses.
///
/// Mobile hosts register a factory backed by their Bluetooth stack;
/// desktop builds use [`TcpTransportFactory`](crate::tcp::TcpTransportFactory).
pub trait TransportFactory: Send + Sync {
    fn create(&self, address: &PrinterAddress) -> Result<Box<dyn Transport>>;
}
