// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Etikett label-printer engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a print job, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque printer address.
///
/// Bluetooth transports carry a MAC address here; the TCP transport a
/// `host[:port]` string. The session layer never interprets it, only
/// hands it to whichever transport it was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrinterAddress(String);

impl PrinterAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PrinterAddress {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PrinterAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for PrinterAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A printer reported by a discovery scan.
///
/// Serializes with the field names of the legacy host interface
/// (`address`, `friendlyName`) so existing callers keep parsing the
/// JSON hand-off unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredPrinter {
    pub address: PrinterAddress,
    pub friendly_name: String,
}

/// Command language a label printer expects on its raw channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlLanguage {
    Zpl,
    Cpcl,
    /// Line-print mode; accepts CPCL framing but is reported separately.
    LinePrint,
    /// Reported value not recognised as any supported language.
    Unknown,
}

impl ControlLanguage {
    /// Map a `device.languages` setting value onto a control language.
    ///
    /// Hybrid values such as `hybrid_xml_zpl` count as ZPL.
    pub fn from_device_languages(value: &str) -> Self {
        let v = value.trim().to_ascii_lowercase();
        if v == "line_print" {
            Self::LinePrint
        } else if v.contains("cpcl") {
            Self::Cpcl
        } else if v.contains("zpl") {
            Self::Zpl
        } else {
            Self::Unknown
        }
    }
}

impl std::fmt::Display for ControlLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Zpl => "zpl",
            Self::Cpcl => "cpcl",
            Self::LinePrint => "line_print",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Coarse classification of a print payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Rendered PDF document; needs the printer's PDF virtual device.
    Pdf,
    /// Raw command bytes in the printer's own control language.
    Raw,
}

impl DocumentKind {
    /// Sniff the payload. PDF files open with `%PDF`.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF") {
            Self::Pdf
        } else {
            Self::Raw
        }
    }
}

/// Why a printer refused a job.
///
/// When several faults are present at once the diagnosis order is
/// fixed: paused wins over head open wins over paper out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotReadyReason {
    Paused,
    HeadOpen,
    PaperOut,
    /// Not ready, but none of the three reportable faults is set
    /// (ribbon out, buffer full, head temperature and the like).
    Unknown,
}

impl std::fmt::Display for NotReadyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Paused => "paused",
            Self::HeadOpen => "head open",
            Self::PaperOut => "paper out",
            Self::Unknown => "unknown error",
        };
        write!(f, "{text}")
    }
}

/// Snapshot of a printer's readiness at one point in time.
///
/// Parsed from a single host-status exchange and never cached across
/// operations; every job re-reads status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterStatus {
    /// No fault flag set; the device will accept a job right now.
    pub is_ready_to_print: bool,
    pub is_paused: bool,
    pub is_head_open: bool,
    pub is_paper_out: bool,
    /// Ribbon out (thermal-transfer models only).
    pub is_ribbon_out: bool,
    pub is_receive_buffer_full: bool,
    pub is_head_too_hot: bool,
    pub is_head_cold: bool,
}

impl PrinterStatus {
    /// Diagnose why the printer is not ready, or `None` when it is.
    ///
    /// First match wins: a paused printer with the head open is
    /// reported as paused.
    pub fn not_ready_reason(&self) -> Option<NotReadyReason> {
        if self.is_ready_to_print {
            return None;
        }
        if self.is_paused {
            Some(NotReadyReason::Paused)
        } else if self.is_head_open {
            Some(NotReadyReason::HeadOpen)
        } else if self.is_paper_out {
            Some(NotReadyReason::PaperOut)
        } else {
            Some(NotReadyReason::Unknown)
        }
    }
}

/// Progress of a document transmission.
///
/// Emitted after every chunk write; `bytes_written` never decreases
/// within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub bytes_written: usize,
    pub bytes_total: usize,
}

impl ProgressEvent {
    /// Whole-number progress percentage, rounded half up.
    pub fn percent(&self) -> u8 {
        if self.bytes_total == 0 {
            return 100;
        }
        let written = self.bytes_written as u64;
        let total = self.bytes_total as u64;
        ((written * 100 + total / 2) / total) as u8
    }

    /// Whether this event signals a fully transmitted document.
    ///
    /// Completion is byte equality, never a rounded percentage: a
    /// (999, 1000) event rounds to 100 yet is not complete.
    pub fn is_complete(&self) -> bool {
        self.bytes_written == self.bytes_total
    }
}
