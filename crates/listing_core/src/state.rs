use crate::view_model::{ListingViewModel, RowView, UPLOAD_DENIED_NOTICE};
use crate::{FileType, ItemId, ListError, PageResult, PagedList, Reconciliation};

pub type UploadId = u64;

/// Everything the listing host keeps between messages.
///
/// `list` stays `None` until the first page lands, which the view renders as
/// a loading placeholder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingState {
    file_type: FileType,
    can_upload: bool,
    list: Option<PagedList>,
    next_page_loading: bool,
    load_error: Option<String>,
    torn_down: bool,
    next_upload_id: UploadId,
    dirty: bool,
}

impl ListingState {
    pub fn new(file_type: FileType, can_upload: bool) -> Self {
        Self {
            file_type,
            can_upload,
            ..Self::default()
        }
    }

    /// Starts from a page the host already holds instead of the loading state.
    pub fn with_snapshot(
        file_type: FileType,
        can_upload: bool,
        snapshot: PageResult,
    ) -> Result<Self, ListError> {
        let list = PagedList::from_snapshot(snapshot)?;
        Ok(Self {
            list: Some(list),
            ..Self::new(file_type, can_upload)
        })
    }

    pub fn file_type(&self) -> &FileType {
        &self.file_type
    }

    pub fn can_upload(&self) -> bool {
        self.can_upload
    }

    pub fn list(&self) -> Option<&PagedList> {
        self.list.as_ref()
    }

    pub fn is_next_page_loading(&self) -> bool {
        self.next_page_loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn view(&self) -> ListingViewModel {
        let upload_notice = (!self.can_upload).then(|| UPLOAD_DENIED_NOTICE.to_string());
        let base = ListingViewModel {
            loading: self.list.is_none(),
            title: self.file_type.title(),
            is_next_page_loading: self.next_page_loading,
            load_error: self.load_error.clone(),
            can_upload: self.can_upload,
            upload_notice,
            ..ListingViewModel::default()
        };

        let Some(list) = &self.list else {
            return base;
        };

        let rows = (0..list.total_known_count())
            .map(|index| list.visible_row(index).map(RowView::from_item))
            .collect();

        ListingViewModel {
            page: list.current_page(),
            count: list.current_page_items().len(),
            found_count: list.found_count(),
            total_count: list.total_count(),
            has_next_page: list.has_next_page(),
            none_found: list.current_page_items().is_empty(),
            rows,
            ..base
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn tear_down(&mut self) {
        self.torn_down = true;
        self.list = None;
        self.next_page_loading = false;
        self.load_error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_can_upload(&mut self, can_upload: bool) {
        if self.can_upload != can_upload {
            self.can_upload = can_upload;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_page_request(&mut self) {
        self.next_page_loading = true;
        self.load_error = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_page(&mut self, result: PageResult) -> Result<Reconciliation, ListError> {
        let counts_before = self.list.as_ref().map(page_counts);
        let outcome = match self.list.as_mut() {
            Some(list) => list.apply(result),
            None => {
                let mut list = PagedList::empty();
                let outcome = list.apply(result);
                if outcome.is_ok() {
                    self.list = Some(list);
                }
                outcome
            }
        };

        let counts_changed = self.list.as_ref().map(page_counts) != counts_before;
        let flags_changed =
            self.next_page_loading || self.load_error.is_some() || counts_changed;
        self.next_page_loading = false;
        match &outcome {
            Ok(Reconciliation::Unchanged) => {
                self.load_error = None;
                if flags_changed {
                    self.mark_dirty();
                }
            }
            Ok(_) => {
                self.load_error = None;
                self.mark_dirty();
            }
            Err(err) => {
                self.load_error = Some(err.to_string());
                self.mark_dirty();
            }
        }
        outcome
    }

    pub(crate) fn apply_failure(&mut self, page: u32, message: String) {
        self.load_error = Some(format!("failed to load page {page}: {message}"));
        self.next_page_loading = false;
        self.mark_dirty();
    }

    pub(crate) fn mark_removed(&mut self, id: &ItemId) -> bool {
        let removed = self
            .list
            .as_mut()
            .is_some_and(|list| list.mark_removed(id));
        if removed {
            self.mark_dirty();
        }
        removed
    }

    pub(crate) fn allocate_upload_id(&mut self) -> UploadId {
        self.next_upload_id += 1;
        self.next_upload_id
    }
}

fn page_counts(list: &PagedList) -> (u32, u64, u64) {
    (list.page_count(), list.found_count(), list.total_count())
}
