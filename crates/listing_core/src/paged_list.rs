use std::collections::HashMap;

use listing_logging::listing_debug;

use crate::{Item, ItemId, ListError, PageResult, PendingState};

/// A master-list slot: the last known copy of an item and its local marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub item: Item,
    pub pending: Option<PendingState>,
}

impl ListEntry {
    pub fn is_pending_removal(&self) -> bool {
        self.pending == Some(PendingState::Remove)
    }
}

/// Which reconciliation branch a page result took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Page 1 arrived: the session restarted from this result.
    Reset,
    /// A page beyond the current one was appended.
    Extend { added: usize },
    /// The current (or an earlier) page came back with different items.
    Refresh { added: usize, updated: usize },
    /// Same page, same items.
    Unchanged,
}

/// Accumulates successive page fetches into one growing list.
///
/// Entries are never spliced out within a session, so an index handed to a
/// windowed renderer keeps pointing at the same item until the next page-1
/// reset.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList {
    entries: Vec<ListEntry>,
    positions: HashMap<ItemId, usize>,
    current_page_items: Vec<Item>,
    current_page: u32,
    page_count: u32,
    found_count: u64,
    total_count: u64,
}

impl Default for PagedList {
    fn default() -> Self {
        Self::empty()
    }
}

impl PagedList {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
            current_page_items: Vec::new(),
            current_page: 1,
            page_count: 0,
            found_count: 0,
            total_count: 0,
        }
    }

    pub fn from_snapshot(snapshot: PageResult) -> Result<Self, ListError> {
        let mut list = Self::empty();
        list.apply(snapshot)?;
        Ok(list)
    }

    /// Folds a fetched page into the list.
    ///
    /// Branches are tried in priority order: reset, extend, refresh, no-op.
    /// Invalid input is rejected before anything is touched. Counts always
    /// follow the latest valid result, even when its items are unchanged.
    pub fn apply(&mut self, result: PageResult) -> Result<Reconciliation, ListError> {
        result.validate()?;
        let PageResult {
            items,
            page,
            page_count,
            found_count,
            total_count,
        } = result;

        self.page_count = page_count;
        self.found_count = found_count;
        self.total_count = total_count;

        let outcome = if page == 1 {
            self.reset(&items);
            self.current_page = 1;
            Reconciliation::Reset
        } else if self.current_page < page {
            let (added, _) = self.merge(&items);
            self.current_page = page;
            Reconciliation::Extend { added }
        } else if items != self.current_page_items {
            let (added, updated) = self.merge(&items);
            Reconciliation::Refresh { added, updated }
        } else {
            listing_debug!("page {} unchanged; skipping", page);
            return Ok(Reconciliation::Unchanged);
        };

        self.current_page_items = items;
        listing_debug!(
            "page {} applied as {:?}; {} entries known",
            page,
            outcome,
            self.entries.len()
        );
        Ok(outcome)
    }

    /// Hides an entry until the next reset. Returns false when the id is
    /// unknown or already hidden.
    pub fn mark_removed(&mut self, id: &ItemId) -> bool {
        let Some(&position) = self.positions.get(id) else {
            return false;
        };
        let entry = &mut self.entries[position];
        if entry.is_pending_removal() {
            return false;
        }
        entry.pending = Some(PendingState::Remove);
        true
    }

    /// The item at `index`, or `None` for an out-of-range or hidden slot.
    pub fn visible_row(&self, index: usize) -> Option<&Item> {
        self.entries
            .get(index)
            .filter(|entry| !entry.is_pending_removal())
            .map(|entry| &entry.item)
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_pending_removal())
            .map(|entry| &entry.item)
    }

    pub fn entry(&self, index: usize) -> Option<&ListEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn total_known_count(&self) -> usize {
        self.entries.len()
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.page_count
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn current_page_items(&self) -> &[Item] {
        &self.current_page_items
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn found_count(&self) -> u64 {
        self.found_count
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    fn reset(&mut self, items: &[Item]) {
        self.entries.clear();
        self.positions.clear();
        self.merge(items);
    }

    /// Order-preserving union keyed by id. Known ids take the fresh payload
    /// in place; unknown ids are appended in page order.
    fn merge(&mut self, items: &[Item]) -> (usize, usize) {
        let mut added = 0;
        let mut updated = 0;
        for item in items {
            match self.positions.get(&item.id) {
                Some(&position) => {
                    let entry = &mut self.entries[position];
                    if entry.item != *item {
                        entry.item = item.clone();
                        updated += 1;
                    }
                }
                None => {
                    self.positions.insert(item.id.clone(), self.entries.len());
                    self.entries.push(ListEntry {
                        item: item.clone(),
                        pending: None,
                    });
                    added += 1;
                }
            }
        }
        (added, updated)
    }
}
