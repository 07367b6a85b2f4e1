use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use listing_core::{FileType, Item, ItemId, PageResult, UploadId};
use listing_engine::{FailureKind, FetchError, PageFetcher, RemovalRequester, Uploader};

#[derive(Debug, Clone)]
struct StoredFile {
    id: String,
    name: String,
    file_type: FileType,
    size: u64,
    uploaded_at: String,
}

impl StoredFile {
    fn to_item(&self) -> Item {
        Item::new(self.id.as_str())
            .with_field("name", self.name.as_str())
            .with_field("type", self.file_type.as_str())
            .with_field("size", self.size)
            .with_field("uploaded_at", self.uploaded_at.as_str())
    }
}

/// In-memory stand-in for the file service, newest files first.
pub struct MemoryFileStore {
    files: Mutex<Vec<StoredFile>>,
    per_page: u32,
    latency: Duration,
    next_id: AtomicU64,
}

impl MemoryFileStore {
    pub fn new(per_page: u32, latency: Duration) -> Self {
        Self {
            files: Mutex::new(Vec::new()),
            per_page: per_page.max(1),
            latency,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn seeded(per_page: u32, latency: Duration, file_type: &FileType, count: usize) -> Self {
        let store = Self::new(per_page, latency);
        let now = Utc::now();
        {
            let mut files = store.lock();
            for n in 0..count {
                files.push(StoredFile {
                    id: store.allocate_id(),
                    name: format!("sample_{:03}_R1.fq.gz", n + 1),
                    file_type: file_type.clone(),
                    size: 1_048_576 * (n as u64 % 7 + 1),
                    uploaded_at: (now - chrono::Duration::minutes(n as i64)).to_rfc3339(),
                });
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StoredFile>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn allocate_id(&self) -> String {
        format!("file-{:04}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait::async_trait]
impl PageFetcher for MemoryFileStore {
    async fn fetch(&self, file_type: &FileType, page: u32) -> Result<PageResult, FetchError> {
        self.simulate_latency().await;
        if page == 0 {
            return Err(FetchError::new(FailureKind::Rejected, "page must be at least 1"));
        }

        let files = self.lock();
        let total_count = files.len() as u64;
        let matching: Vec<&StoredFile> = files
            .iter()
            .filter(|file| &file.file_type == file_type)
            .collect();
        let found_count = matching.len() as u64;
        let page_count = u32::try_from(found_count.div_ceil(u64::from(self.per_page)))
            .unwrap_or(u32::MAX);

        let per_page = self.per_page as usize;
        let start = (page as usize - 1).saturating_mul(per_page);
        let items = matching
            .into_iter()
            .skip(start)
            .take(per_page)
            .map(StoredFile::to_item)
            .collect();

        Ok(PageResult::new(items, page, page_count).with_counts(found_count, total_count))
    }
}

#[async_trait::async_trait]
impl RemovalRequester for MemoryFileStore {
    async fn remove(&self, id: &ItemId) -> Result<(), FetchError> {
        self.simulate_latency().await;
        let mut files = self.lock();
        let before = files.len();
        files.retain(|file| file.id != id.as_str());
        if files.len() == before {
            return Err(FetchError::new(
                FailureKind::NotFound,
                format!("file {id} does not exist"),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Uploader for MemoryFileStore {
    async fn upload(
        &self,
        _local_id: UploadId,
        file_name: &str,
        file_type: &FileType,
    ) -> Result<(), FetchError> {
        self.simulate_latency().await;
        if file_name.trim().is_empty() {
            return Err(FetchError::new(FailureKind::Rejected, "file name is empty"));
        }
        let file = StoredFile {
            id: self.allocate_id(),
            name: file_name.trim().to_string(),
            file_type: file_type.clone(),
            size: 0,
            uploaded_at: Utc::now().to_rfc3339(),
        };
        self.lock().insert(0, file);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(count: usize) -> MemoryFileStore {
        MemoryFileStore::seeded(25, Duration::ZERO, &FileType::Reads, count)
    }

    #[tokio::test]
    async fn pages_slice_matching_files() {
        let store = store(60);

        let first = store.fetch(&FileType::Reads, 1).await.unwrap();
        assert_eq!(first.items.len(), 25);
        assert_eq!(first.page_count, 3);
        assert_eq!(first.found_count, 60);
        assert_eq!(first.items[0].id.as_str(), "file-0001");

        let last = store.fetch(&FileType::Reads, 3).await.unwrap();
        assert_eq!(last.items.len(), 10);
        assert_eq!(last.items[0].id.as_str(), "file-0051");

        let beyond = store.fetch(&FileType::Reads, 4).await.unwrap();
        assert!(beyond.items.is_empty());
    }

    #[tokio::test]
    async fn other_types_are_counted_but_not_listed() {
        let store = store(3);
        let page = store.fetch(&FileType::Hmm, 1).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.page_count, 0);
        assert_eq!(page.found_count, 0);
        assert_eq!(page.total_count, 3);
    }

    #[tokio::test]
    async fn remove_and_upload_change_the_listing() {
        let store = store(2);

        store.remove(&ItemId::from("file-0001")).await.unwrap();
        let err = store.remove(&ItemId::from("file-0001")).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::NotFound);

        store
            .upload(1, "new_R1.fq.gz", &FileType::Reads)
            .await
            .unwrap();
        let page = store.fetch(&FileType::Reads, 1).await.unwrap();
        let names: Vec<_> = page
            .items
            .iter()
            .filter_map(|item| item.field("name").and_then(|v| v.as_str()))
            .collect();
        assert_eq!(names, vec!["new_R1.fq.gz", "sample_002_R1.fq.gz"]);
        assert_eq!(store.len(), 2);
    }
}
