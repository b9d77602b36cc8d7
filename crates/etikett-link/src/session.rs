// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One print job, start to finish.
//
// A session owns its connection and is consumed by the job it runs:
// open, gate on capability and readiness, transmit, settle, close.
// After a successful open the connection is closed on every exit path,
// and a close failure never replaces the job's primary outcome.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use etikett_core::LinkConfig;
use etikett_core::error::{EtikettError, Result};
use etikett_core::types::{DocumentKind, JobId, ProgressEvent};

use crate::connection::Connection;
use crate::labels;
use crate::outcome::OutcomeSlot;
use crate::sgd;
use crate::status;
use crate::transport::Transport;

/// Success message of a completed document job.
pub const PRINT_FINISHED: &str = "Print finished";
/// Success message of a delivered test label.
pub const TEST_LABEL_SENT: &str = "Test label sent";

/// Callback invoked after every transmitted chunk, on the task doing
/// the transmitting.
pub type ProgressSink = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// A single print job against one printer.
pub struct PrintSession {
    connection: Connection,
    job_id: JobId,
    settle_delay: Duration,
    chunk_size: usize,
    progress: Option<ProgressSink>,
}

impl PrintSession {
    pub fn new(transport: Box<dyn Transport>, config: &LinkConfig) -> Self {
        Self {
            connection: Connection::new(transport, config),
            job_id: JobId::new(),
            settle_delay: config.settle_delay(),
            chunk_size: config.chunk_size.max(1),
            progress: None,
        }
    }

    /// Attach a progress callback for document transmission.
    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Print one document, consuming the session.
    ///
    /// PDF payloads are gated on the printer's rendering capability;
    /// raw command payloads go straight to the readiness check.
    #[instrument(
        skip(self, document),
        fields(job = %self.job_id, addr = %self.connection.address(), len = document.len())
    )]
    pub async fn print_document(mut self, document: &[u8]) -> Result<String> {
        // A zero-byte transmission could never reach the completion
        // boundary, so reject it before any I/O.
        if document.is_empty() {
            return Err(EtikettError::EmptyDocument);
        }

        // An open that never succeeded leaves nothing to close.
        self.connection.open().await?;

        let outcome = OutcomeSlot::new();
        if let Err(e) = self.run_document_stages(document, &outcome).await {
            outcome.resolve(Err(e));
        }
        self.teardown(outcome).await
    }

    /// Send the built-in test label, consuming the session.
    #[instrument(skip(self), fields(job = %self.job_id, addr = %self.connection.address()))]
    pub async fn print_test_label(mut self) -> Result<String> {
        self.connection.open().await?;

        let outcome = OutcomeSlot::new();
        if let Err(e) = self.run_test_label_stages(&outcome).await {
            outcome.resolve(Err(e));
        }
        self.teardown(outcome).await
    }

    async fn run_document_stages(
        &mut self,
        document: &[u8],
        outcome: &OutcomeSlot<Result<String>>,
    ) -> Result<()> {
        if DocumentKind::detect(document) == DocumentKind::Pdf
            && !sgd::supports_pdf_rendering(&mut self.connection).await?
        {
            return Err(EtikettError::UnsupportedFormat(
                "printer firmware cannot render PDF documents".into(),
            ));
        }

        let printer = status::read_status(&mut self.connection).await?;
        if let Some(reason) = printer.not_ready_reason() {
            return Err(EtikettError::NotReady(reason));
        }

        self.transmit(document, outcome).await?;
        self.settle().await;
        Ok(())
    }

    async fn run_test_label_stages(&mut self, outcome: &OutcomeSlot<Result<String>>) -> Result<()> {
        let language = sgd::query_control_language(&mut self.connection).await?;
        info!(language = %language, "control language identified");

        let label = labels::test_label(language)?;
        self.connection.write(label).await?;
        outcome.resolve(Ok(TEST_LABEL_SENT.to_owned()));

        self.settle().await;
        Ok(())
    }

    /// Stream the document in chunks, emitting a progress event after
    /// every write.
    ///
    /// The outcome resolves with success exactly when a progress event
    /// reaches byte equality with the total. Fractional events never
    /// resolve, whatever they round to.
    async fn transmit(
        &mut self,
        document: &[u8],
        outcome: &OutcomeSlot<Result<String>>,
    ) -> Result<()> {
        let total = document.len();
        let mut written = 0usize;
        for chunk in document.chunks(self.chunk_size) {
            self.connection.write(chunk).await?;
            written += chunk.len();

            let event = ProgressEvent {
                bytes_written: written,
                bytes_total: total,
            };
            if let Some(sink) = &self.progress {
                sink(event);
            }
            debug!(written, total, percent = event.percent(), "chunk written");
            if event.is_complete() && outcome.resolve(Ok(PRINT_FINISHED.to_owned())) {
                info!(total, "document transmitted");
            }
        }
        Ok(())
    }

    /// Wait for the transport to flush buffered bytes before teardown.
    /// Some firmware discards data still in flight when the link drops.
    async fn settle(&self) {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
    }

    /// Close the connection and hand back the job's outcome.
    ///
    /// A close failure resolves the outcome only when the job has none
    /// of its own yet; it never overwrites a primary error or an
    /// already-recorded success.
    async fn teardown(mut self, outcome: OutcomeSlot<Result<String>>) -> Result<String> {
        if let Err(close_err) = self.connection.close().await {
            warn!(job = %self.job_id, error = %close_err, "connection close failed");
            outcome.resolve(Err(close_err));
        }
        outcome.into_inner().unwrap_or_else(|| {
            Err(EtikettError::Connection(
                "job ended without an outcome".into(),
            ))
        })
    }
}
