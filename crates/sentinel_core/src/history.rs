/// One confirmed manifest. Immutable once created; a re-detection replaces
/// the record wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub url: String,
    pub domain: String,
    pub content: String,
}

/// Bounded, deduplicated history of confirmed manifests, most recent first.
///
/// Invariants: no two entries share `url`, and the length never exceeds the
/// capacity. Upserting an already-known `url` moves it to the front with the
/// fresh content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryList {
    records: Vec<ManifestRecord>,
    capacity: usize,
}

impl HistoryList {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }

    /// Restores a persisted history, enforcing dedup and capacity on the way in.
    pub fn from_records(records: Vec<ManifestRecord>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        for record in records.into_iter().rev() {
            history.upsert(record);
        }
        history
    }

    pub fn upsert(&mut self, record: ManifestRecord) {
        self.records.retain(|existing| existing.url != record.url);
        self.records.insert(0, record);
        self.records.truncate(self.capacity);
    }

    /// Removes the entry with that exact `url`. Returns whether anything changed.
    pub fn remove_by_url(&mut self, url: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|existing| existing.url != url);
        self.records.len() != before
    }

    /// Most recent entry for the domain, if any.
    pub fn find_by_domain(&self, domain: &str) -> Option<&ManifestRecord> {
        self.records.iter().find(|record| record.domain == domain)
    }

    pub fn list(&self) -> &[ManifestRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Applies a new capacity, evicting oldest entries beyond it.
    /// Returns whether any entries were evicted.
    pub fn set_capacity(&mut self, capacity: usize) -> bool {
        self.capacity = capacity;
        if self.records.len() > capacity {
            self.records.truncate(capacity);
            true
        } else {
            false
        }
    }
}
