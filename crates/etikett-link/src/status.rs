// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host status interpretation (~HS).
//
// One round trip, three framed strings. Each string arrives between
// STX and ETX as comma-separated fields; string 1 carries the media
// and engine flags, string 2 the head and ribbon flags. String 3 is
// firmware housekeeping we don't read.

use tracing::{debug, instrument};

use etikett_core::error::{EtikettError, Result};
use etikett_core::types::PrinterStatus;

use crate::connection::Connection;

/// Host-status request command.
pub const HOST_STATUS_REQUEST: &[u8] = b"~HS";

/// Start-of-text framing byte.
const STX: u8 = 0x02;
/// End-of-text framing byte.
const ETX: u8 = 0x03;

/// Request `~HS` and interpret the reply.
#[instrument(skip(conn), fields(addr = %conn.address()))]
pub async fn read_status(conn: &mut Connection) -> Result<PrinterStatus> {
    let response = conn.exchange(HOST_STATUS_REQUEST).await?;
    let status = parse_host_status(&response)?;
    debug!(ready = status.is_ready_to_print, "printer status read");
    Ok(status)
}

/// Parse a raw `~HS` reply into a [`PrinterStatus`].
///
/// Readiness is computed, not reported: the printer is ready exactly
/// when none of the fault flags is set.
pub fn parse_host_status(raw: &[u8]) -> Result<PrinterStatus> {
    let strings = framed_strings(raw);
    if strings.len() < 2 {
        return Err(EtikettError::Connection(format!(
            "malformed host status: {} framed strings",
            strings.len()
        )));
    }

    let s1: Vec<&str> = strings[0].split(',').collect();
    let s2: Vec<&str> = strings[1].split(',').collect();
    if s1.len() < 12 || s2.len() < 4 {
        return Err(EtikettError::Connection(
            "malformed host status: short field list".into(),
        ));
    }

    let mut status = PrinterStatus {
        is_ready_to_print: false,
        is_paper_out: flag(&s1, 1),
        is_paused: flag(&s1, 2),
        is_receive_buffer_full: flag(&s1, 5),
        is_head_cold: flag(&s1, 10),
        is_head_too_hot: flag(&s1, 11),
        is_head_open: flag(&s2, 2),
        is_ribbon_out: flag(&s2, 3),
    };
    status.is_ready_to_print = !(status.is_paper_out
        || status.is_paused
        || status.is_head_open
        || status.is_ribbon_out
        || status.is_receive_buffer_full
        || status.is_head_cold
        || status.is_head_too_hot);
    Ok(status)
}

/// Extract every STX..ETX framed string from the reply.
fn framed_strings(raw: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    for &byte in raw {
        match byte {
            STX => current = Some(Vec::new()),
            ETX => {
                if let Some(body) = current.take() {
                    out.push(String::from_utf8_lossy(&body).into_owned());
                }
            }
            _ => {
                if let Some(body) = current.as_mut() {
                    body.push(byte);
                }
            }
        }
    }
    out
}

/// Whether the field at `index` is the character `1`.
fn flag(fields: &[&str], index: usize) -> bool {
    fields.get(index).map(|f| f.trim() == "1").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{
        MockTransport, ready_status_reply, status_reply_with, test_config,
    };
    use etikett_core::types::NotReadyReason;

    #[test]
    fn ready_printer_parses_clean() {
        let status = parse_host_status(&ready_status_reply()).unwrap();
        assert!(status.is_ready_to_print);
        assert_eq!(status.not_ready_reason(), None);
    }

    #[test]
    fn paper_out_clears_readiness() {
        let status = parse_host_status(&status_reply_with(&[(1, "1")], &[])).unwrap();
        assert!(status.is_paper_out);
        assert!(!status.is_ready_to_print);
        assert_eq!(status.not_ready_reason(), Some(NotReadyReason::PaperOut));
    }

    #[test]
    fn paused_beats_head_open_and_paper_out() {
        let reply = status_reply_with(&[(1, "1"), (2, "1")], &[(2, "1")]);
        let status = parse_host_status(&reply).unwrap();
        assert!(status.is_paused && status.is_head_open && status.is_paper_out);
        assert_eq!(status.not_ready_reason(), Some(NotReadyReason::Paused));
    }

    #[test]
    fn head_open_is_read_from_the_second_string() {
        let status = parse_host_status(&status_reply_with(&[], &[(2, "1")])).unwrap();
        assert!(status.is_head_open);
        assert_eq!(status.not_ready_reason(), Some(NotReadyReason::HeadOpen));
    }

    #[test]
    fn ribbon_out_diagnoses_as_unknown() {
        let status = parse_host_status(&status_reply_with(&[], &[(3, "1")])).unwrap();
        assert!(status.is_ribbon_out);
        assert!(!status.is_ready_to_print);
        assert_eq!(status.not_ready_reason(), Some(NotReadyReason::Unknown));
    }

    #[test]
    fn over_temperature_clears_readiness() {
        let status = parse_host_status(&status_reply_with(&[(11, "1")], &[])).unwrap();
        assert!(status.is_head_too_hot);
        assert_eq!(status.not_ready_reason(), Some(NotReadyReason::Unknown));
    }

    #[test]
    fn unframed_garbage_is_rejected() {
        assert!(parse_host_status(b"PAPER OUT").is_err());
        assert!(parse_host_status(b"").is_err());
    }

    #[test]
    fn short_field_list_is_rejected() {
        let reply = crate::testkit::host_status_reply("030,0,0", "001,0", "1234,0");
        assert!(parse_host_status(&reply).is_err());
    }

    #[tokio::test]
    async fn read_status_round_trips_over_a_connection() {
        let mock = MockTransport::new().with_replies(&[ready_status_reply()]);
        let log = mock.log_handle();
        let mut conn = Connection::new(Box::new(mock), &test_config());
        conn.open().await.unwrap();

        let status = read_status(&mut conn).await.unwrap();
        assert!(status.is_ready_to_print);
        assert_eq!(log.lock().unwrap().writes[0], b"~HS");
    }
}
