// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raw TCP transport (JetDirect-style, port 9100).
//
// Networked label printers expose the same raw channel on TCP that
// their Bluetooth siblings expose over RFCOMM, so this transport
// doubles as the desktop/CI implementation and the integration-test
// harness.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

use etikett_core::error::{EtikettError, Result};
use etikett_core::types::PrinterAddress;

use crate::transport::{Transport, TransportFactory};

/// Default raw print port.
pub const RAW_PORT: u16 = 9100;

/// TCP-backed [`Transport`].
pub struct TcpTransport {
    address: PrinterAddress,
    connect_timeout: Duration,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    pub fn new(address: PrinterAddress, connect_timeout: Duration) -> Self {
        Self {
            address,
            connect_timeout,
            stream: None,
        }
    }

    /// `host` or `host:port`; bare hosts get [`RAW_PORT`].
    fn socket_addr(&self) -> String {
        let raw = self.address.as_str();
        if raw.contains(':') {
            raw.to_owned()
        } else {
            format!("{raw}:{RAW_PORT}")
        }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn open(&mut self) -> Result<()> {
        let addr = self.socket_addr();
        info!(addr = %addr, "connecting via raw TCP");

        let stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| {
                EtikettError::Connection(format!(
                    "TCP connect to {addr} timed out after {:?}",
                    self.connect_timeout
                ))
            })?
            .map_err(|e| EtikettError::Connection(format!("TCP connect to {addr}: {e}")))?;

        self.stream = Some(stream);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn write(&mut self, buf: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or_else(not_open)?;
        stream
            .write_all(buf)
            .await
            .map_err(|e| EtikettError::Connection(format!("TCP write: {e}")))?;
        stream
            .flush()
            .await
            .map_err(|e| EtikettError::Connection(format!("TCP flush: {e}")))?;
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let stream = self.stream.as_mut().ok_or_else(not_open)?;
        stream
            .read(buf)
            .await
            .map_err(|e| EtikettError::Connection(format!("TCP read: {e}")))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            // Shutdown flushes buffered output before the FIN.
            stream
                .shutdown()
                .await
                .map_err(|e| EtikettError::Connection(format!("TCP shutdown: {e}")))?;
            debug!(addr = %self.address, "TCP transport closed");
        }
        Ok(())
    }

    fn address(&self) -> &PrinterAddress {
        &self.address
    }
}

fn not_open() -> EtikettError {
    EtikettError::Connection("TCP transport is not open".into())
}

/// Factory producing [`TcpTransport`]s.
pub struct TcpTransportFactory {
    connect_timeout: Duration,
}

impl TcpTransportFactory {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl TransportFactory for TcpTransportFactory {
    fn create(&self, address: &PrinterAddress) -> Result<Box<dyn Transport>> {
        Ok(Box::new(TcpTransport::new(
            address.clone(),
            self.connect_timeout,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_the_default_port() {
        let transport = TcpTransport::new("192.168.1.50".into(), Duration::from_secs(1));
        assert_eq!(transport.socket_addr(), "192.168.1.50:9100");
    }

    #[test]
    fn explicit_port_is_kept() {
        let transport = TcpTransport::new("192.168.1.50:6101".into(), Duration::from_secs(1));
        assert_eq!(transport.socket_addr(), "192.168.1.50:6101");
    }

    #[tokio::test]
    async fn io_before_open_fails_and_close_is_a_no_op() {
        let mut transport = TcpTransport::new("localhost".into(), Duration::from_secs(1));
        assert!(!transport.is_connected());
        assert!(transport.write(b"^XA^XZ").await.is_err());
        let mut buf = [0u8; 4];
        assert!(transport.read(&mut buf).await.is_err());
        assert!(transport.close().await.is_ok());
    }

    #[tokio::test]
    async fn round_trip_against_a_local_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 64];
            loop {
                let n = sock.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            received
        });

        let address = PrinterAddress::from(format!("127.0.0.1:{port}"));
        let mut transport = TcpTransport::new(address, Duration::from_secs(5));
        transport.open().await.unwrap();
        assert!(transport.is_connected());
        transport.write(b"^XA^XZ").await.unwrap();
        transport.close().await.unwrap();
        assert!(!transport.is_connected());

        assert_eq!(server.await.unwrap(), b"^XA^XZ");
    }
}
