// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-shot job outcome cell.
//
// A print job has exactly one terminal result. Every place that can
// produce one (completion, a stage failure, a close failure) offers
// its value to the slot; only the first write sticks.

use std::sync::OnceLock;

/// Write-once cell holding a job's terminal value.
///
/// `Sync`, so completion detection may run on whatever task drives
/// the transport.
#[derive(Debug)]
pub struct OutcomeSlot<T> {
    cell: OnceLock<T>,
}

impl<T> OutcomeSlot<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Offer a value. Returns true when this call decided the
    /// outcome, false when one was already recorded.
    pub fn resolve(&self, value: T) -> bool {
        self.cell.set(value).is_ok()
    }

    /// Whether an outcome has been recorded.
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Consume the slot, yielding the recorded outcome if any.
    pub fn into_inner(self) -> Option<T> {
        self.cell.into_inner()
    }
}

impl<T> Default for OutcomeSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
