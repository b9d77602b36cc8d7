// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Etikett.

use thiserror::Error;

use crate::types::NotReadyReason;

/// Top-level error type for all Etikett operations.
#[derive(Debug, Error)]
pub enum EtikettError {
    // -- Connection errors --
    #[error("printer connection failed: {0}")]
    Connection(String),

    // -- Capability errors --
    #[error("capability probe failed: {0}")]
    Capability(String),

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    // -- Status errors --
    #[error("printer is not ready: {0}")]
    NotReady(NotReadyReason),

    // -- Discovery errors --
    #[error("printer discovery failed: {0}")]
    Discovery(String),

    #[error("no printers found")]
    NoPrintersFound,

    // -- Job errors --
    #[error("document is empty")]
    EmptyDocument,

    // -- Storage / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, EtikettError>;
