// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scripted in-memory transport for exercising the link layers without
// hardware.
//
// The mock behaves like a request/response device: each write arms the
// next canned reply, reads serve the armed reply and then report a
// quiet line. Opens, closes, and written bytes are recorded so tests
// can assert the lifecycle properties.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use etikett_core::LinkConfig;
use etikett_core::error::{EtikettError, Result};
use etikett_core::types::PrinterAddress;

use crate::transport::Transport;

/// Everything the mock observed, shared with the test.
#[derive(Debug, Default)]
pub(crate) struct TransportLog {
    /// Successful opens.
    pub opens: usize,
    /// Close attempts (counted even when scripted to fail).
    pub closes: usize,
    /// Every buffer passed to `write`, in order.
    pub writes: Vec<Vec<u8>>,
}

pub(crate) struct MockTransport {
    address: PrinterAddress,
    /// One canned reply per request write, served in order.
    replies: VecDeque<Vec<u8>>,
    /// Bytes of the reply currently being served.
    pending: Vec<u8>,
    fail_open: bool,
    fail_close: bool,
    /// 1-based index of the write that should fail; 0 disables.
    fail_write_at: usize,
    connected: bool,
    log: Arc<Mutex<TransportLog>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            address: PrinterAddress::from("AC:3F:A4:12:34:56"),
            replies: VecDeque::new(),
            pending: Vec::new(),
            fail_open: false,
            fail_close: false,
            fail_write_at: 0,
            connected: false,
            log: Arc::new(Mutex::new(TransportLog::default())),
        }
    }

    pub fn with_replies<T: AsRef<[u8]>>(mut self, replies: &[T]) -> Self {
        self.replies = replies.iter().map(|r| r.as_ref().to_vec()).collect();
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Fail the `nth` write (1-based).
    pub fn failing_write(mut self, nth: usize) -> Self {
        self.fail_write_at = nth;
        self
    }

    pub fn log_handle(&self) -> Arc<Mutex<TransportLog>> {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn open(&mut self) -> Result<()> {
        if self.fail_open {
            return Err(EtikettError::Connection("scripted open refusal".into()));
        }
        self.connected = true;
        self.log.lock().unwrap().opens += 1;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn write(&mut self, buf: &[u8]) -> Result<()> {
        let write_no = {
            let mut log = self.log.lock().unwrap();
            log.writes.push(buf.to_vec());
            log.writes.len()
        };
        if self.fail_write_at != 0 && write_no == self.fail_write_at {
            return Err(EtikettError::Connection("scripted write failure".into()));
        }
        // Treat the write as a request: arm the next reply if none is
        // being served.
        if self.pending.is_empty() {
            if let Some(reply) = self.replies.pop_front() {
                self.pending = reply;
            }
        }
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.pending.is_empty() {
            // Nothing queued: the device has gone quiet.
            return Ok(0);
        }
        let n = self.pending.len().min(buf.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }

    async fn close(&mut self) -> Result<()> {
        self.connected = false;
        self.log.lock().unwrap().closes += 1;
        if self.fail_close {
            return Err(EtikettError::Connection("scripted close failure".into()));
        }
        Ok(())
    }

    fn address(&self) -> &PrinterAddress {
        &self.address
    }
}

/// Short timeouts and a tiny chunk size so tests run instantly.
pub(crate) fn test_config() -> LinkConfig {
    LinkConfig {
        response_timeout_ms: 200,
        quiet_window_ms: 20,
        settle_delay_ms: 0,
        connect_timeout_ms: 200,
        chunk_size: 4,
    }
}

/// Frame a getvar reply the way the firmware does: quoted, CRLF tail.
pub(crate) fn getvar_reply(value: &str) -> Vec<u8> {
    format!("\"{value}\"\r\n").into_bytes()
}

/// Build a `~HS` reply from the three framed status strings.
pub(crate) fn host_status_reply(s1: &str, s2: &str, s3: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for s in [s1, s2, s3] {
        out.push(0x02);
        out.extend_from_slice(s.as_bytes());
        out.push(0x03);
        out.extend_from_slice(b"\r\n");
    }
    out
}

/// `~HS` reply from an idle, ready printer.
pub(crate) fn ready_status_reply() -> Vec<u8> {
    host_status_reply(
        "030,0,0,1245,000,0,0,0,000,0,0,0",
        "001,0,0,0,1,2,6,0,00000000,1,000",
        "1234,0",
    )
}

/// `~HS` reply with chosen fields of string 1 and string 2 overridden.
///
/// Field indexes follow the wire layout: string 1 carries paper-out at
/// 1, pause at 2, buffer-full at 5 and the temperature flags at 10/11;
/// string 2 carries head-open at 2 and ribbon-out at 3.
pub(crate) fn status_reply_with(s1_flags: &[(usize, &str)], s2_flags: &[(usize, &str)]) -> Vec<u8> {
    let mut s1: Vec<String> = "030,0,0,1245,000,0,0,0,000,0,0,0"
        .split(',')
        .map(String::from)
        .collect();
    let mut s2: Vec<String> = "001,0,0,0,1,2,6,0,00000000,1,000"
        .split(',')
        .map(String::from)
        .collect();
    for &(index, value) in s1_flags {
        s1[index] = value.to_owned();
    }
    for &(index, value) in s2_flags {
        s2[index] = value.to_owned();
    }
    host_status_reply(&s1.join(","), &s2.join(","), "1234,0")
}
