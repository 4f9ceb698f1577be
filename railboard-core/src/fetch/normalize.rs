//! Payload normalization
//!
//! Deterministic, so never retried. Consumes the decoded payload so nothing
//! of it outlives the returned snapshot.

use alloc::string::String;
use alloc::vec::Vec;

use railboard_protocol::{DepartureBoard, RawService};

use crate::model::{ServiceEntry, Snapshot};

/// Turn a decoded payload into at most `rows` entries
///
/// A payload without a services collection is a no-data snapshot carrying
/// any operator notice. Records missing a scheduled time, destination or
/// status are dropped.
pub fn normalize(board: DepartureBoard, rows: usize) -> Snapshot {
    let notice = board.notice_text();
    let Some(services) = board.train_services else {
        debug!("No services collection in payload");
        return Snapshot::no_data(notice);
    };

    let mut entries = Vec::with_capacity(services.len().min(rows));
    for (index, raw) in services.into_iter().enumerate() {
        if entries.len() == rows {
            break;
        }
        match entry_from_raw(raw) {
            Some(entry) => entries.push(entry),
            None => warn!("Dropping service {}: missing field", index),
        }
    }
    Snapshot::with_entries(entries)
}

fn entry_from_raw(raw: RawService) -> Option<ServiceEntry> {
    let destination = String::from(raw.destination_name().filter(|n| !n.is_empty())?);
    let scheduled_time = non_empty(raw.std)?;
    let status = non_empty(raw.etd)?;
    let delay_message = non_empty(raw.delay_reason).or_else(|| non_empty(raw.cancel_reason));
    Some(ServiceEntry::new(
        scheduled_time,
        destination,
        status,
        delay_message,
    ))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}
