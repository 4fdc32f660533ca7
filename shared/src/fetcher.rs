//! Remote retrieval of the image list and normalization of its outcome.

use crux_http::{Error as HttpError, Response};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

use crate::config::ConfigError;
use crate::model::ImageHit;

pub const HITS_FIELD: &str = "hits";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Endpoint body. Only `hits` is read; a missing or null `hits` is a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitsPayload {
    #[serde(default)]
    pub hits: Option<Vec<ImageHit>>,
}

impl HitsPayload {
    pub fn new(hits: Vec<ImageHit>) -> Self {
        Self { hits: Some(hits) }
    }
}

pub type HitsResponse = crux_http::Result<Response<HitsPayload>>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("transport error: {reason}")]
    Transport { reason: String },

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("response body could not be decoded: {reason}")]
    Decode { reason: String },

    #[error("response has no `{field}` collection")]
    MissingField { field: &'static str },
}

impl From<HttpError> for FetchError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Http(error) => Self::Status {
                status: error.code.into(),
            },
            HttpError::Json(reason) => Self::Decode { reason },
            other => Self::Transport {
                reason: other.to_string(),
            },
        }
    }
}

/// Monotonic fetch counter; only the latest issued fetch may commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FetchGeneration(pub u64);

#[derive(Debug, Default)]
pub struct FetchTracker {
    issued: u64,
    in_flight: Option<FetchGeneration>,
}

impl FetchTracker {
    pub fn begin(&mut self) -> FetchGeneration {
        self.issued += 1;
        let generation = FetchGeneration(self.issued);
        self.in_flight = Some(generation);
        generation
    }

    /// True when `generation` is the latest issued fetch and still outstanding.
    pub fn complete(&mut self, generation: FetchGeneration) -> bool {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self) -> Option<FetchGeneration> {
        self.in_flight
    }

    pub fn latest(&self) -> Option<FetchGeneration> {
        (self.issued > 0).then_some(FetchGeneration(self.issued))
    }

    pub(crate) fn into_next_session(self) -> Self {
        Self {
            issued: self.issued,
            in_flight: None,
        }
    }
}

/// Extracts the `hits` collection. Duplicate ids keep their first occurrence.
pub fn decode_hits(result: HitsResponse) -> Result<Vec<ImageHit>, FetchError> {
    let mut response = result?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.into(),
        });
    }

    let hits = response
        .take_body()
        .and_then(|payload| payload.hits)
        .ok_or(FetchError::MissingField { field: HITS_FIELD })?;

    let mut seen = HashSet::with_capacity(hits.len());
    let total = hits.len();
    let unique: Vec<ImageHit> = hits
        .into_iter()
        .filter(|hit| seen.insert(hit.id.clone()))
        .collect();

    if unique.len() != total {
        warn!(
            dropped = total - unique.len(),
            "duplicate hit ids in response"
        );
    }

    Ok(unique)
}

/// A completed fetch, with failures already collapsed to an empty result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub hits: Vec<ImageHit>,
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    pub fn from_result(result: HitsResponse) -> Self {
        match decode_hits(result) {
            Ok(hits) => Self { hits, error: None },
            Err(error) => Self::failed(error),
        }
    }

    pub fn failed(error: FetchError) -> Self {
        Self {
            hits: Vec::new(),
            error: Some(error),
        }
    }
}
