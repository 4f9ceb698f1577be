//! Departure records
//!
//! The normalized form of one poll cycle, independent of the upstream wire
//! format.

use alloc::string::String;
use alloc::vec::Vec;

use railboard_display::Column;

/// Status meaning the service needs no further annotation
pub const ON_TIME: &str = "On time";

/// One upcoming departure
///
/// A delay message is only ever attached to a service that is not
/// on time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    scheduled_time: String,
    destination: String,
    status: String,
    delay_message: Option<String>,
}

impl ServiceEntry {
    /// Create an entry
    ///
    /// A delay message on an on-time service is discarded.
    pub fn new(
        scheduled_time: impl Into<String>,
        destination: impl Into<String>,
        status: impl Into<String>,
        delay_message: Option<String>,
    ) -> Self {
        let status = status.into();
        let delay_message = if status == ON_TIME {
            None
        } else {
            delay_message
        };
        Self {
            scheduled_time: scheduled_time.into(),
            destination: destination.into(),
            status,
            delay_message,
        }
    }

    /// Scheduled time of day ("14:32")
    pub fn scheduled_time(&self) -> &str {
        &self.scheduled_time
    }

    /// Destination name
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Free-text status ("On time", "14:40", "Delayed", "Cancelled")
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Delay or cancellation reason
    pub fn delay_message(&self) -> Option<&str> {
        self.delay_message.as_deref()
    }

    /// Whether the service runs on time
    pub fn is_on_time(&self) -> bool {
        self.status == ON_TIME
    }

    /// Text shown in a board cell
    pub fn cell(&self, column: Column) -> &str {
        match column {
            Column::Time => &self.scheduled_time,
            Column::Destination => &self.destination,
            Column::Expected => &self.status,
        }
    }

    /// Banner line for a delayed or cancelled service ("10:15: Signal failure")
    pub fn banner_text(&self) -> Option<String> {
        if self.is_on_time() {
            return None;
        }
        let message = self.delay_message.as_deref()?;
        let mut text = String::with_capacity(self.scheduled_time.len() + 2 + message.len());
        text.push_str(&self.scheduled_time);
        text.push_str(": ");
        text.push_str(message);
        Some(text)
    }
}

/// Board contents for one poll cycle
///
/// `has_data == false` means upstream reported no services for the journey,
/// which is distinct from failing to reach upstream. Entries are always
/// empty in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<ServiceEntry>,
    has_data: bool,
    notice: Option<String>,
}

impl Snapshot {
    /// Snapshot with services
    pub fn with_entries(entries: Vec<ServiceEntry>) -> Self {
        Self {
            entries,
            has_data: true,
            notice: None,
        }
    }

    /// Snapshot for a journey with no services
    ///
    /// `notice` is operator text explaining why, if upstream sent any.
    pub fn no_data(notice: Option<String>) -> Self {
        Self {
            entries: Vec::new(),
            has_data: false,
            notice,
        }
    }

    /// Services in departure order
    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }

    /// Whether upstream returned a services collection
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    /// Operator notice accompanying an empty board
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}
