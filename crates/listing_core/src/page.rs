use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ListError;

/// Server-assigned identifier of a listed record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One record as the server returns it: a stable id plus opaque fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            payload: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

/// Reconciler-owned marker carried next to an item in the master list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingState {
    Remove,
}

/// One fetched page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    #[serde(alias = "documents")]
    pub items: Vec<Item>,
    pub page: u32,
    pub page_count: u32,
    #[serde(default)]
    pub found_count: u64,
    #[serde(default)]
    pub total_count: u64,
}

impl PageResult {
    pub fn new(items: Vec<Item>, page: u32, page_count: u32) -> Self {
        let found_count = items.len() as u64;
        Self {
            items,
            page,
            page_count,
            found_count,
            total_count: found_count,
        }
    }

    pub fn with_counts(mut self, found_count: u64, total_count: u64) -> Self {
        self.found_count = found_count;
        self.total_count = total_count;
        self
    }

    /// Rejects results that would corrupt the master list if merged.
    pub fn validate(&self) -> Result<(), ListError> {
        if self.page == 0 {
            return Err(ListError::InvalidPageResult(
                "page numbers start at 1, got 0".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for (position, item) in self.items.iter().enumerate() {
            if item.id.is_empty() {
                return Err(ListError::InvalidPageResult(format!(
                    "item at position {position} of page {} has no id",
                    self.page
                )));
            }
            if !seen.insert(&item.id) {
                return Err(ListError::InvalidPageResult(format!(
                    "duplicate id {} in page {}",
                    item.id, self.page
                )));
            }
        }
        Ok(())
    }
}
