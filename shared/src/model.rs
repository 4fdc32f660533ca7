use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::debounce::Debouncer;
use crate::fetcher::{FetchError, FetchTracker};

/// Raw connectivity as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectivitySample {
    pub connected: bool,
    // Platforms report reachability as unknown while probing; unknown is not reachable.
    #[serde(default, deserialize_with = "null_as_false")]
    pub reachable: bool,
}

impl ConnectivitySample {
    pub const fn new(connected: bool, reachable: bool) -> Self {
        Self {
            connected,
            reachable,
        }
    }

    pub const fn online() -> Self {
        Self::new(true, true)
    }

    pub const fn offline() -> Self {
        Self::new(false, false)
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// The debounced connectivity the screen acts upon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledConnectivity {
    visited: bool,
    connected: bool,
    reachable: bool,
}

impl Default for SettledConnectivity {
    fn default() -> Self {
        Self {
            visited: false,
            connected: true,
            reachable: true,
        }
    }
}

impl SettledConnectivity {
    pub const fn visited(&self) -> bool {
        self.visited
    }

    pub const fn connected(&self) -> bool {
        self.connected
    }

    pub const fn reachable(&self) -> bool {
        self.reachable
    }

    pub const fn is_favorable(&self) -> bool {
        self.connected && self.reachable
    }

    /// Adopts a settled sample. Returns whether anything observable changed.
    pub fn settle(&mut self, sample: ConnectivitySample) -> bool {
        let next = Self {
            visited: true,
            connected: sample.connected,
            reachable: sample.reachable,
        };
        let changed = next != *self;
        *self = next;
        changed
    }
}

/// Item identifiers arrive as either JSON numbers or strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HitId {
    Number(i64),
    Text(String),
}

impl fmt::Display for HitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitId::Number(n) => write!(f, "{n}"),
            HitId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for HitId {
    fn from(n: i64) -> Self {
        HitId::Number(n)
    }
}

impl From<&str> for HitId {
    fn from(s: &str) -> Self {
        HitId::Text(s.to_string())
    }
}

/// One grid entry. Unknown payload fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHit {
    pub id: HitId,
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
}

impl ImageHit {
    pub fn new(id: impl Into<HitId>, large_image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            large_image_url: large_image_url.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Idle,
    Mounted,
    TornDown,
}

/// Session state for one screen lifetime. Only `App::update` mutates it.
#[derive(Debug)]
pub struct Model {
    pub lifecycle: Lifecycle,
    pub settled: SettledConnectivity,
    pub loading: bool,
    pub retry: bool,
    pub results: Vec<ImageHit>,
    pub debouncer: Debouncer,
    pub fetches: FetchTracker,
    /// Diagnostic only; never rendered.
    pub last_fetch_error: Option<FetchError>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            lifecycle: Lifecycle::Idle,
            settled: SettledConnectivity::default(),
            loading: true,
            retry: false,
            results: Vec::new(),
            debouncer: Debouncer::default(),
            fetches: FetchTracker::default(),
            last_fetch_error: None,
        }
    }
}

impl Model {
    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// Fresh session defaults. Timer ids and fetch generations keep counting so
    /// answers addressed to a previous session can never match.
    pub fn begin_session(&mut self) {
        let debouncer = std::mem::take(&mut self.debouncer).into_next_session();
        let fetches = std::mem::take(&mut self.fetches).into_next_session();
        *self = Self {
            lifecycle: Lifecycle::Mounted,
            debouncer,
            fetches,
            ..Self::default()
        };
    }
}
