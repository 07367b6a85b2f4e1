use std::sync::Arc;

use listing_core::{Effect, FileType, ItemId, PageResult, UploadId};

use crate::{FetchError, ListingEvent};

/// Supplies pages of a listing. Retries and timeouts belong to implementors.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, file_type: &FileType, page: u32) -> Result<PageResult, FetchError>;
}

/// Deletes a record server-side. The listing never waits on the outcome.
#[async_trait::async_trait]
pub trait RemovalRequester: Send + Sync {
    async fn remove(&self, id: &ItemId) -> Result<(), FetchError>;
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        local_id: UploadId,
        file_name: &str,
        file_type: &FileType,
    ) -> Result<(), FetchError>;
}

#[derive(Clone)]
pub struct Collaborators {
    pub fetcher: Arc<dyn PageFetcher>,
    pub remover: Arc<dyn RemovalRequester>,
    pub uploader: Arc<dyn Uploader>,
}

impl Collaborators {
    /// Uses one value for every role, e.g. an in-memory store.
    pub fn from_shared<T>(shared: Arc<T>) -> Self
    where
        T: PageFetcher + RemovalRequester + Uploader + 'static,
    {
        Self {
            fetcher: shared.clone(),
            remover: shared.clone(),
            uploader: shared,
        }
    }
}

/// Runs one effect against its collaborator and reports how it went.
pub async fn execute_effect(collaborators: &Collaborators, effect: Effect) -> ListingEvent {
    match effect {
        Effect::FetchPage { file_type, page } => ListingEvent::PageFetched {
            page,
            result: collaborators.fetcher.fetch(&file_type, page).await,
        },
        Effect::RemoveFile { id } => {
            let result = collaborators.remover.remove(&id).await;
            ListingEvent::RemovalFinished { id, result }
        }
        Effect::Upload {
            local_id,
            file_name,
            file_type,
        } => ListingEvent::UploadFinished {
            local_id,
            result: collaborators
                .uploader
                .upload(local_id, &file_name, &file_type)
                .await,
        },
    }
}
