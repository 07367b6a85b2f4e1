use std::fmt;

use listing_core::{ItemId, PageResult, UploadId};

#[derive(Debug, Clone, PartialEq)]
pub enum ListingEvent {
    PageFetched {
        page: u32,
        result: Result<PageResult, FetchError>,
    },
    RemovalFinished {
        id: ItemId,
        result: Result<(), FetchError>,
    },
    UploadFinished {
        local_id: UploadId,
        result: Result<(), FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Forbidden,
    Rejected,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::Forbidden => write!(f, "forbidden"),
            FailureKind::Rejected => write!(f, "rejected"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
