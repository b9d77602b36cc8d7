// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Link configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing and framing parameters for printer links.
///
/// The legacy stack hard-coded all of these inside its SDK; they are
/// surfaced here so hosts can tune them per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// How long to wait for the first byte of a settings or status
    /// reply (milliseconds).
    pub response_timeout_ms: u64,
    /// A reply is complete once the line has stayed quiet this long
    /// (milliseconds). Printers do not frame their replies; silence is
    /// the only end-of-message signal.
    pub quiet_window_ms: u64,
    /// Pause between a fully transmitted job and closing the
    /// connection (milliseconds). Closing on the heels of the last
    /// byte loses label data on some firmware revisions.
    pub settle_delay_ms: u64,
    /// Transport connect timeout (milliseconds).
    pub connect_timeout_ms: u64,
    /// Write chunk size for document transmission (bytes). Progress is
    /// reported once per chunk.
    pub chunk_size: usize,
}

impl LinkConfig {
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    pub fn quiet_window(&self) -> Duration {
        Duration::from_millis(self.quiet_window_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            response_timeout_ms: 5_000,
            quiet_window_ms: 500,
            settle_delay_ms: 500,
            connect_timeout_ms: 10_000,
            chunk_size: 4096,
        }
    }
}
