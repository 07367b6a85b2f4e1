//! Listing engine: collaborator seams and asynchronous effect execution.
mod bridge;
mod collaborators;
mod engine;
mod types;

pub use bridge::event_to_msg;
pub use collaborators::{execute_effect, Collaborators, PageFetcher, RemovalRequester, Uploader};
pub use engine::ListingHandle;
pub use types::{FailureKind, FetchError, ListingEvent};
