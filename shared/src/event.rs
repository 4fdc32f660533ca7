use serde::{Deserialize, Serialize};

use crate::capabilities::TimerOutput;
use crate::fetcher::{FetchGeneration, HitsResponse};
use crate::model::ConnectivitySample;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Event {
    // Shell lifecycle
    Mounted,
    Unmounted,

    // User
    RetryRequested,

    // Capability answers
    ConnectivityChanged(ConnectivitySample),
    DebounceTimer(TimerOutput),
    #[serde(skip)]
    FetchCompleted {
        generation: FetchGeneration,
        result: HitsResponse,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mounted => "mounted",
            Self::Unmounted => "unmounted",
            Self::RetryRequested => "retry_requested",
            Self::ConnectivityChanged(_) => "connectivity_changed",
            Self::DebounceTimer(_) => "debounce_timer",
            Self::FetchCompleted { .. } => "fetch_completed",
        }
    }

    pub fn is_user_initiated(&self) -> bool {
        matches!(self, Self::RetryRequested)
    }
}
