use crate::{Item, ItemId};

pub const UPLOAD_DENIED_NOTICE: &str =
    "You do not have permission to upload files. Contact an administrator.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingViewModel {
    pub loading: bool,
    pub title: String,
    pub page: u32,
    /// Items on the most recently fetched page.
    pub count: usize,
    pub found_count: u64,
    pub total_count: u64,
    pub has_next_page: bool,
    pub is_next_page_loading: bool,
    pub load_error: Option<String>,
    pub can_upload: bool,
    pub upload_notice: Option<String>,
    pub none_found: bool,
    /// One slot per master-list entry; hidden entries are `None` so indices
    /// stay stable for a windowed renderer.
    pub rows: Vec<Option<RowView>>,
}

impl ListingViewModel {
    pub fn visible_rows(&self) -> impl Iterator<Item = &RowView> {
        self.rows.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: ItemId,
    pub name: String,
    pub size: Option<u64>,
    pub uploaded_at: Option<String>,
}

impl RowView {
    pub fn from_item(item: &Item) -> Self {
        let name = item
            .field("name")
            .and_then(|value| value.as_str())
            .map_or_else(|| item.id.to_string(), ToOwned::to_owned);
        Self {
            id: item.id.clone(),
            name,
            size: item.field("size").and_then(|value| value.as_u64()),
            uploaded_at: item
                .field("uploaded_at")
                .and_then(|value| value.as_str())
                .map(ToOwned::to_owned),
        }
    }
}
