// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the host UI.
//
// Every technical error is mapped to plain English with a clear
// suggestion. The severity levels drive how the host presents the
// failure (toast, dialog, blocking banner).

use crate::error::EtikettError;
use crate::types::NotReadyReason;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Radio blip, timeout — retrying has a fair chance of working.
    Transient,
    /// User must do something (load labels, close the head, unpause).
    ActionRequired,
    /// Cannot be fixed by retrying or user action — wrong format,
    /// missing firmware feature, etc.
    Permanent,
}

/// A human-readable error with plain English message and suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether trying again without any other change can help.
    pub retriable: bool,
    /// Severity level (drives icon/colour in the host UI).
    pub severity: Severity,
}

/// Convert an `EtikettError` into a `HumanError` for display.
pub fn humanize_error(err: &EtikettError) -> HumanError {
    match err {
        // -- Connection --
        EtikettError::Connection(detail) => humanize_connection_error(detail),

        // -- Capability --
        EtikettError::Capability(_) => HumanError {
            message: "We couldn't check what this printer supports.".into(),
            suggestion: "Make sure the printer is switched on and in range, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        EtikettError::UnsupportedFormat(_) => HumanError {
            message: "This printer can't print PDF files directly.".into(),
            suggestion: "Print a test label instead, or use a printer whose firmware supports direct PDF printing.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Readiness --
        EtikettError::NotReady(reason) => humanize_not_ready(*reason),

        // -- Discovery --
        EtikettError::Discovery(detail) => {
            if detail.contains("bluetooth") || detail.contains("adapter") {
                HumanError {
                    message: "We can't search for printers right now.".into(),
                    suggestion: "Make sure Bluetooth is turned on, then try again.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            } else {
                HumanError {
                    message: "Searching for printers didn't finish.".into(),
                    suggestion: "Move closer to the printer and scan again.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        EtikettError::NoPrintersFound => HumanError {
            message: "We couldn't find any printers.".into(),
            suggestion: "Make sure the printer is switched on, charged, and within a few metres, then scan again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Job --
        EtikettError::EmptyDocument => HumanError {
            message: "There's nothing to print in this file.".into(),
            suggestion: "The file is empty. Choose a different file and try again.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Storage --
        EtikettError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to read that file.".into(),
                    suggestion: "Check the file permissions, or copy the file somewhere else first.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading a file.".into(),
                    suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        EtikettError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Platform --
        EtikettError::PlatformUnavailable => HumanError {
            message: "This feature isn't available on your device.".into(),
            suggestion: "Printer scanning needs a device with Bluetooth.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

/// Map a readiness diagnosis to instructions for fixing the printer.
fn humanize_not_ready(reason: NotReadyReason) -> HumanError {
    match reason {
        NotReadyReason::Paused => HumanError {
            message: "The printer is paused.".into(),
            suggestion: "Press the feed or pause button on the printer to resume, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        NotReadyReason::HeadOpen => HumanError {
            message: "The printer's head is open.".into(),
            suggestion: "Close the printhead latch until it clicks, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        NotReadyReason::PaperOut => HumanError {
            message: "The printer is out of labels.".into(),
            suggestion: "Load a new roll of labels, close the head, and try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        NotReadyReason::Unknown => HumanError {
            message: "The printer reported a problem it couldn't name.".into(),
            suggestion: "Check the printer's own display, or turn it off and on again, then retry.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

/// Parse connection error details into human-readable messages.
fn humanize_connection_error(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("timed out") || lower.contains("no response") {
        HumanError {
            message: "The printer didn't respond in time.".into(),
            suggestion: "The printer might be busy, asleep, or out of range. Wake it up, move closer, and try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        }
    } else if lower.contains("refused") {
        HumanError {
            message: "The printer refused our connection.".into(),
            suggestion: "Another device may be connected to it. Close other printing apps, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        }
    } else if lower.contains("reset") || lower.contains("broken pipe") {
        HumanError {
            message: "The connection to the printer was interrupted.".into(),
            suggestion: "This sometimes happens when the printer moves out of range. Try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        }
    } else {
        HumanError {
            message: "We couldn't talk to the printer.".into(),
            suggestion: format!(
                "Check the printer is on and in range, then try again. (Detail: {detail})"
            ),
            retriable: true,
            severity: Severity::Transient,
        }
    }
}
