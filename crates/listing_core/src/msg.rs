use crate::{ItemId, PageResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Host mounted the listing; the first page is requested.
    Mounted,
    /// A page fetch completed.
    PageLoaded(PageResult),
    /// A page fetch failed; the host may retry with `LoadMore` or `RequestPage`.
    PageFailed { page: u32, message: String },
    /// Renderer scrolled to the end of the known rows.
    LoadMore,
    /// Explicit request for a page, e.g. page 1 after a filter change.
    RequestPage(u32),
    /// User clicked remove on a row.
    RemoveClicked(ItemId),
    /// Files dropped onto the upload bar.
    FilesDropped(Vec<String>),
    /// Upload capability changed for the current account.
    PermissionsChanged { can_upload: bool },
    /// Host tore the listing down. Everything after this is ignored.
    Unmounted,
    /// A blank command line from the host; leaves the listing as it is.
    NoOp,
}
