use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::ParcelStatus;

/// One row of the backend-written tracking history.
///
/// The status is kept as the raw wire string so an entry written by a
/// newer backend still renders (degraded) instead of failing
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    pub status: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub completed: bool,
    pub active: bool,
}

impl TimelineEntry {
    pub fn parsed_status(&self) -> Option<ParcelStatus> {
        ParcelStatus::parse(&self.status).ok()
    }
}

/// Inconsistencies found while interpreting a timeline
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineIssue {
    OutOfOrderTimestamp {
        index: usize,
    },
    IllegalTransition {
        index: usize,
        from: ParcelStatus,
        to: ParcelStatus,
    },
    UnrecognizedStatus {
        index: usize,
        raw: String,
    },
}

/// Insertion-ordered tracking history for one parcel.
///
/// The backend is the only writer; this side only interprets. Append-only
/// from our perspective, so interpretation never mutates entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn new(entries: Vec<TimelineEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry the parcel is currently at: the active one, or failing
    /// that the last row
    pub fn current(&self) -> Option<&TimelineEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.active)
            .or_else(|| self.entries.last())
    }

    /// Current status, when the feed's raw value is recognized
    pub fn current_status(&self) -> Option<ParcelStatus> {
        self.current().and_then(TimelineEntry::parsed_status)
    }

    pub fn completed_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.completed).count()
    }

    /// Check the history against the transition graph and clock order.
    ///
    /// Every issue is collected rather than stopping at the first one, so
    /// schema-drift monitoring sees the whole picture. An empty result
    /// means the timeline is consistent.
    pub fn issues(&self) -> Vec<TimelineIssue> {
        let mut found = Vec::new();

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.parsed_status().is_none() {
                found.push(TimelineIssue::UnrecognizedStatus {
                    index,
                    raw: entry.status.clone(),
                });
            }
        }

        for (index, pair) in self.entries.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                found.push(TimelineIssue::OutOfOrderTimestamp { index: index + 1 });
            }
            if let (Some(from), Some(to)) = (pair[0].parsed_status(), pair[1].parsed_status()) {
                if from != to && !from.can_transition(to) {
                    found.push(TimelineIssue::IllegalTransition {
                        index: index + 1,
                        from,
                        to,
                    });
                }
            }
        }

        found
    }

    pub fn is_consistent(&self) -> bool {
        self.issues().is_empty()
    }
}
