//! Projection from the session state to what the shell renders.
//!
//! Nothing here is stored: `Mode` is recomputed from the model on every
//! `view` call so it cannot drift from the flags it is derived from.

use serde::{Deserialize, Serialize};

use crate::model::{ImageHit, Model, SettledConnectivity};
use crate::GRID_COLUMNS;

pub const NO_INTERNET_MESSAGE: &str = "No Internet Connection";
pub const SOMETHING_WENT_WRONG_MESSAGE: &str = "Something went wrong";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetryReason {
    /// No network association at all. Nothing to retry against.
    Offline,
    /// Associated with a network that does not answer.
    Unreachable,
}

impl RetryReason {
    pub const fn of(settled: &SettledConnectivity) -> Self {
        if settled.connected() && !settled.reachable() {
            Self::Unreachable
        } else {
            Self::Offline
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Offline => NO_INTERNET_MESSAGE,
            Self::Unreachable => SOMETHING_WENT_WRONG_MESSAGE,
        }
    }

    pub const fn offers_retry(self) -> bool {
        matches!(self, Self::Unreachable)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Loading,
    Content,
    Retry(RetryReason),
}

impl Mode {
    pub const fn project(loading: bool, settled: &SettledConnectivity) -> Self {
        if loading {
            Self::Loading
        } else if settled.is_favorable() {
            Self::Content
        } else {
            Self::Retry(RetryReason::of(settled))
        }
    }

    pub fn of(model: &Model) -> Self {
        Self::project(model.loading, &model.settled)
    }

    /// The retry control is shown and a request from it would be honoured.
    pub fn accepts_retry(self) -> bool {
        matches!(self, Self::Retry(reason) if reason.offers_retry())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTile {
    pub key: String,
    pub image_url: String,
}

impl From<&ImageHit> for ImageTile {
    fn from(hit: &ImageHit) -> Self {
        Self {
            key: hit.id.to_string(),
            image_url: hit.large_image_url.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreenView {
    Loading,
    Content {
        columns: u8,
        tiles: Vec<ImageTile>,
    },
    Retry {
        message: String,
        can_retry: bool,
        retry_enabled: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub screen: ScreenView,
}

impl ViewModel {
    pub fn project(model: &Model) -> Self {
        let screen = match Mode::of(model) {
            Mode::Loading => ScreenView::Loading,
            Mode::Content => ScreenView::Content {
                columns: GRID_COLUMNS,
                tiles: model.results.iter().map(ImageTile::from).collect(),
            },
            Mode::Retry(reason) => ScreenView::Retry {
                message: reason.message().to_string(),
                can_retry: reason.offers_retry(),
                retry_enabled: reason.offers_retry() && !model.retry,
            },
        };
        Self { screen }
    }
}
