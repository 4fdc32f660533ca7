//! Connectivity debouncing.
//!
//! Raw connectivity flaps while the radio switches networks. Every sample
//! restarts a fixed quiet period and only the sample that survives a full
//! period is acted upon. The timer itself runs in the shell; this module owns
//! the bookkeeping that decides which timer answer still counts.

use serde::{Deserialize, Serialize};

use crate::capabilities::TimerId;
use crate::model::ConnectivitySample;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSettle {
    pub id: TimerId,
    pub sample: ConnectivitySample,
}

/// Result of scheduling a sample: the timer to start, and the one to clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub id: TimerId,
    pub superseded: Option<TimerId>,
}

#[derive(Debug, Default)]
pub struct Debouncer {
    next_id: u64,
    pending: Option<PendingSettle>,
}

impl Debouncer {
    pub fn pending(&self) -> Option<&PendingSettle> {
        self.pending.as_ref()
    }

    /// Last write wins: any earlier pending sample is dropped.
    pub fn schedule(&mut self, sample: ConnectivitySample) -> Scheduled {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let superseded = self.pending.replace(PendingSettle { id, sample }).map(|p| p.id);
        Scheduled { id, superseded }
    }

    /// Consumes the pending sample if `id` is the timer still being waited on.
    pub fn elapse(&mut self, id: TimerId) -> Option<ConnectivitySample> {
        match self.pending {
            Some(pending) if pending.id == id => {
                self.pending = None;
                Some(pending.sample)
            }
            _ => None,
        }
    }

    /// Drops the pending sample, returning the timer that must be cleared.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending.take().map(|p| p.id)
    }

    pub(crate) fn into_next_session(self) -> Self {
        Self {
            next_id: self.next_id,
            pending: None,
        }
    }
}
