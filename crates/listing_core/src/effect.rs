use crate::{FileType, ItemId, UploadId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the page fetcher for one page of the current listing.
    FetchPage { file_type: FileType, page: u32 },
    /// Fire-and-forget server-side delete; the outcome is never folded back.
    RemoveFile { id: ItemId },
    Upload {
        local_id: UploadId,
        file_name: String,
        file_type: FileType,
    },
}
