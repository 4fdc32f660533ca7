use serde::{Deserialize, Serialize};

use crate::model::SettledConnectivity;

/// What caused the gate to be re-evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateTrigger {
    ConnectivitySettled,
    RetryRaised,
    RetryCleared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldReason {
    NotVisited,
    Disconnected,
    Unreachable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateDecision {
    Fetch,
    Hold(HoldReason),
}

/// Fetch iff connectivity has settled at least once and is connected and reachable.
/// Raising or clearing the retry flag re-runs this check; the flag is never a
/// precondition.
pub const fn evaluate(settled: &SettledConnectivity) -> GateDecision {
    if !settled.visited() {
        GateDecision::Hold(HoldReason::NotVisited)
    } else if !settled.connected() {
        GateDecision::Hold(HoldReason::Disconnected)
    } else if !settled.reachable() {
        GateDecision::Hold(HoldReason::Unreachable)
    } else {
        GateDecision::Fetch
    }
}
