use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use super::models::HistoryEntry;
use super::{slots, KeyValueStore, StoreError};

/// Upload history kept as one JSON array in a single slot, newest first.
///
/// Every mutation is a read-modify-write of the whole array.
#[derive(Clone)]
pub struct HistoryStore {
    kv: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// All entries, newest first. Absent or corrupt data reads as empty; a failed
    /// store read is an error.
    pub fn load(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let raw = self.kv.get(slots::HISTORY)?;
        Ok(parse_entries(raw.as_deref()))
    }

    /// Like [`HistoryStore::load`], but unreadable data also reads as empty.
    pub fn list(&self) -> Vec<HistoryEntry> {
        match self.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read upload history, treating as empty");
                Vec::new()
            }
        }
    }

    /// Record an upload at the front of the list, stamped with the current time.
    pub fn append(&self, name: &str, url: &str) -> Result<HistoryEntry, StoreError> {
        let entry = HistoryEntry {
            name: name.to_string(),
            url: url.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let mut entries = self.load()?;
        entries.insert(0, entry.clone()); // newest first
        self.write(&entries)?;
        Ok(entry)
    }

    /// Remove the entry at `index`. Out-of-range indexes leave the list untouched.
    /// Returns the removed entry, if any.
    pub fn remove_at(&self, index: usize) -> Result<Option<HistoryEntry>, StoreError> {
        let mut entries = self.load()?;
        if index >= entries.len() {
            return Ok(None);
        }
        let removed = entries.remove(index);
        self.write(&entries)?;
        Ok(Some(removed))
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        self.kv.set(slots::HISTORY, &json)
    }
}

fn parse_entries(raw: Option<&str>) -> Vec<HistoryEntry> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testutil::FaultyStore;

    fn store() -> (Arc<MemoryStore>, HistoryStore) {
        let kv = Arc::new(MemoryStore::new());
        (kv.clone(), HistoryStore::new(kv))
    }

    fn names(history: &HistoryStore) -> Vec<String> {
        history.list().into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn empty_store_lists_nothing() {
        let (_, history) = store();
        assert!(history.list().is_empty());
    }

    #[test]
    fn corrupt_slot_lists_nothing() {
        let (kv, history) = store();
        kv.set("github_upload_history", "{not json").unwrap();
        assert!(history.list().is_empty());

        kv.set("github_upload_history", r#"{"name":"x"}"#).unwrap();
        assert!(history.list().is_empty());
    }

    #[test]
    fn append_puts_newest_first() {
        let (_, history) = store();
        history.append("a.txt", "https://example.com/a").unwrap();
        history.append("b.txt", "https://example.com/b").unwrap();
        assert_eq!(names(&history), vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn append_allows_duplicates() {
        let (_, history) = store();
        history.append("a.txt", "https://example.com/a").unwrap();
        history.append("a.txt", "https://example.com/a").unwrap();
        assert_eq!(history.list().len(), 2);
    }

    #[test]
    fn append_after_corruption_starts_fresh() {
        let (kv, history) = store();
        kv.set("github_upload_history", "garbage").unwrap();
        history.append("a.txt", "https://example.com/a").unwrap();
        assert_eq!(names(&history), vec!["a.txt"]);
    }

    #[test]
    fn append_stamps_iso8601_utc() {
        let (_, history) = store();
        let entry = history.append("a.txt", "https://example.com/a").unwrap();
        let parsed = chrono::DateTime::parse_from_rfc3339(&entry.timestamp).unwrap();
        let age = Utc::now().signed_duration_since(parsed);
        assert!(age.num_seconds() < 5);
        assert!(entry.timestamp.ends_with('Z'));
    }

    #[test]
    fn reads_entries_written_by_the_page() {
        let (kv, history) = store();
        kv.set(
            "github_upload_history",
            r#"[{"name":"x.txt","url":"https://raw.example/x.txt","date":"2025-01-01T00:00:00.000Z"}]"#,
        )
        .unwrap();
        let entries = history.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp, "2025-01-01T00:00:00.000Z");
    }

    #[test]
    fn remove_at_preserves_order_of_others() {
        let (_, history) = store();
        for name in ["a", "b", "c", "d"] {
            history.append(name, "https://example.com").unwrap();
        }
        // list is [d, c, b, a]
        let removed = history.remove_at(1).unwrap();
        assert_eq!(removed.map(|e| e.name).as_deref(), Some("c"));
        assert_eq!(names(&history), vec!["d", "b", "a"]);
    }

    #[test]
    fn remove_at_out_of_range_is_noop() {
        let (_, history) = store();
        history.append("a", "https://example.com").unwrap();
        assert_eq!(history.remove_at(1).unwrap(), None);
        assert_eq!(history.remove_at(usize::MAX).unwrap(), None);
        assert_eq!(names(&history), vec!["a"]);
    }

    #[test]
    fn failed_read_keeps_existing_entries() {
        let kv = Arc::new(FaultyStore::new());
        let history = HistoryStore::new(kv.clone());
        history.append("a", "https://example.com/a").unwrap();
        history.append("b", "https://example.com/b").unwrap();

        kv.fail_reads(true);
        assert!(history.load().is_err());
        assert!(history.list().is_empty());
        assert!(history.append("c", "https://example.com/c").is_err());
        assert!(history.remove_at(0).is_err());

        kv.fail_reads(false);
        assert_eq!(names(&history), vec!["b", "a"]);
    }
}
