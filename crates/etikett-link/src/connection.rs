// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Connection lifecycle for a single printer link.
//
// One connection serves at most one job. The state machine only moves
// forward: Closed -> Open -> Closed, with Failed absorbing transport
// faults along the way. A connection that has been opened once is
// never reopened.

use std::time::Duration;

use tracing::{debug, instrument};

use etikett_core::LinkConfig;
use etikett_core::error::{EtikettError, Result};
use etikett_core::types::PrinterAddress;

use crate::transport::Transport;

/// Lifecycle states of a printer connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Closed,
    Open,
    Failed,
}

/// A stateful link to one printer over an arbitrary transport.
pub struct Connection {
    transport: Box<dyn Transport>,
    state: ConnectionState,
    /// Set on the first `open` and never cleared; a finished
    /// connection must not be revived for another job.
    opened_once: bool,
    response_timeout: Duration,
    quiet_window: Duration,
}

impl Connection {
    pub fn new(transport: Box<dyn Transport>, config: &LinkConfig) -> Self {
        Self {
            transport,
            state: ConnectionState::Closed,
            opened_once: false,
            response_timeout: config.response_timeout(),
            quiet_window: config.quiet_window(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn address(&self) -> &PrinterAddress {
        self.transport.address()
    }

    /// Whether the link is open and the transport still reports a
    /// live channel. Performs no I/O.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Open && self.transport.is_connected()
    }

    /// Open the link. Valid exactly once, from the initial state.
    #[instrument(skip(self), fields(addr = %self.transport.address()))]
    pub async fn open(&mut self) -> Result<()> {
        if self.opened_once {
            return Err(EtikettError::Connection(
                "connection cannot be reopened".into(),
            ));
        }
        self.opened_once = true;
        match self.transport.open().await {
            Ok(()) => {
                self.state = ConnectionState::Open;
                debug!("connection open");
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Failed;
                Err(e)
            }
        }
    }

    /// Write the whole buffer to the printer.
    pub async fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.require_open()?;
        if let Err(e) = self.transport.write(buf).await {
            self.state = ConnectionState::Failed;
            return Err(e);
        }
        Ok(())
    }

    /// Send a request and collect the printer's reply.
    ///
    /// The first byte must arrive within the response timeout; after
    /// that the reply is complete once the line stays quiet for the
    /// quiet window. Printers do not frame their settings replies, so
    /// silence is the only end-of-message signal.
    #[instrument(skip(self, request), fields(addr = %self.transport.address(), request_len = request.len()))]
    pub async fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.write(request).await?;

        let mut response = Vec::new();
        let mut buf = [0u8; 512];
        let mut deadline = self.response_timeout;
        loop {
            match tokio::time::timeout(deadline, self.transport.read(&mut buf)).await {
                // Quiet line: the reply, if any, is complete.
                Err(_) => break,
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => {
                    response.extend_from_slice(&buf[..n]);
                    deadline = self.quiet_window;
                }
                Ok(Err(e)) => {
                    self.state = ConnectionState::Failed;
                    return Err(e);
                }
            }
        }

        if response.is_empty() {
            return Err(EtikettError::Connection(format!(
                "no response within {:?}",
                self.response_timeout
            )));
        }
        debug!(response_len = response.len(), "exchange complete");
        Ok(response)
    }

    /// Close the link and release the transport.
    ///
    /// Idempotent and safe in every state, including after a failure
    /// or before a successful open. The link counts as closed even
    /// when the release itself fails; the error is returned for the
    /// caller to report.
    pub async fn close(&mut self) -> Result<()> {
        match self.state {
            ConnectionState::Closed => Ok(()),
            ConnectionState::Open | ConnectionState::Failed => {
                self.state = ConnectionState::Closed;
                self.transport.close().await
            }
        }
    }

    fn require_open(&self) -> Result<()> {
        if self.state == ConnectionState::Open {
            Ok(())
        } else {
            Err(EtikettError::Connection(format!(
                "connection is not open (state: {:?})",
                self.state
            )))
        }
    }
}
