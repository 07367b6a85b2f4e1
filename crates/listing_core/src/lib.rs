//! Listing core: paged-list reconciliation and the pure listing state machine.
mod effect;
mod error;
mod file_type;
mod msg;
mod page;
mod paged_list;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::ListError;
pub use file_type::FileType;
pub use msg::Msg;
pub use page::{Item, ItemId, PageResult, PendingState};
pub use paged_list::{ListEntry, PagedList, Reconciliation};
pub use state::{ListingState, UploadId};
pub use update::update;
pub use view_model::{ListingViewModel, RowView, UPLOAD_DENIED_NOTICE};
