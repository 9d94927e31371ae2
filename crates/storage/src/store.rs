use std::sync::Arc;

use csv::{QuoteStyle, WriterBuilder};
use time::OffsetDateTime;

use crate::error::StorageError;
use crate::record::FarmRecord;
use crate::traits::KeyValueStore;

/// Result of an append attempt.
///
/// Persistence is best-effort: a failed storage write still leaves the
/// record in the in-memory sequence for the rest of the session, so
/// `persisted` is informational, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Append {
    Added { id: i64, persisted: bool },
    SkippedBlankKey,
}

/// An append-only, insertion-ordered list of farm records mirrored to
/// durable storage.
///
/// Loading treats absent or unparsable stored data as "no data". The
/// only mutation is [`RecordStore::append`]; there is no update-in-place
/// and no user-facing delete.
pub struct RecordStore<R: FarmRecord> {
    store: Arc<dyn KeyValueStore>,
    records: Vec<R>,
}

impl<R: FarmRecord> RecordStore<R> {
    /// Load the list from `store`, starting empty when the key is absent
    /// or holds something unparsable.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let records = match store.get(R::STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("could not read {}: {e}", R::STORAGE_KEY);
                Vec::new()
            }
        };
        RecordStore { store, records }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record.
    ///
    /// A blank key field (after trimming) is a silent no-op. Otherwise
    /// the record gets a fresh identifier, lands at the end of the
    /// sequence, and the whole list is re-serialized to storage.
    pub fn append(&mut self, mut record: R) -> Append {
        if record.key_field().trim().is_empty() {
            return Append::SkippedBlankKey;
        }
        let id = self.next_id();
        record.set_id(id);
        self.records.push(record);
        let persisted = self.persist();
        Append::Added { id, persisted }
    }

    /// Current-time-millisecond identifier, kept strictly increasing so
    /// rapid appends within one millisecond cannot collide.
    fn next_id(&self) -> i64 {
        let now_ms = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        match self.records.last() {
            Some(last) if last.id() >= now_ms => last.id() + 1,
            _ => now_ms,
        }
    }

    fn persist(&self) -> bool {
        let serialized = match serde_json::to_string(&self.records) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("could not serialize {}: {e}", R::STORAGE_KEY);
                return false;
            }
        };
        match self.store.set(R::STORAGE_KEY, &serialized) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("could not persist {}: {e}", R::STORAGE_KEY);
                false
            }
        }
    }

    /// Render the list as CSV: fixed header, one row per record, every
    /// value double-quoted with embedded quotes doubled.
    pub fn export_csv(&self) -> Result<String, StorageError> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(Vec::new());
        writer.write_record(R::CSV_HEADER)?;
        for record in &self.records {
            let mut row = vec![R::SECTION.to_string()];
            row.extend(record.csv_row());
            writer.write_record(&row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| StorageError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::record::{Employee, SeedStock};

    fn employee(name: &str) -> Employee {
        Employee {
            full_name: name.to_string(),
            role: "picker".to_string(),
            pay_frequency: "monthly".to_string(),
            pay_amount: "45000".to_string(),
            ..Employee::default()
        }
    }

    #[test]
    fn empty_store_exports_header_only() {
        let store = RecordStore::<Employee>::load(Arc::new(MemoryStore::new()));
        let csv = store.export_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("\"Section\",\"Name\""));
    }

    #[test]
    fn append_grows_by_one_and_survives_reload() {
        let kv = Arc::new(MemoryStore::new());
        let mut store = RecordStore::<Employee>::load(kv.clone());
        let outcome = store.append(employee("Jean"));
        assert!(matches!(outcome, Append::Added { persisted: true, .. }));
        assert_eq!(store.len(), 1);

        // Simulated reload: a fresh store over the same backing data.
        let reloaded = RecordStore::<Employee>::load(kv);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.records()[0].full_name, "Jean");
    }

    #[test]
    fn blank_key_field_is_a_no_op() {
        let mut store = RecordStore::<Employee>::load(Arc::new(MemoryStore::new()));
        assert_eq!(store.append(employee("   ")), Append::SkippedBlankKey);
        assert_eq!(store.append(employee("")), Append::SkippedBlankKey);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn appended_record_is_last_in_iteration_order() {
        let mut store = RecordStore::<Employee>::load(Arc::new(MemoryStore::new()));
        store.append(employee("Jean"));
        store.append(employee("Aline"));
        store.append(employee("Claude"));
        let names: Vec<&str> = store
            .records()
            .iter()
            .map(|e| e.full_name.as_str())
            .collect();
        assert_eq!(names, ["Jean", "Aline", "Claude"]);
    }

    #[test]
    fn ids_are_strictly_increasing_even_within_one_millisecond() {
        let mut store = RecordStore::<Employee>::load(Arc::new(MemoryStore::new()));
        let mut ids = Vec::new();
        for i in 0..5 {
            match store.append(employee(&format!("worker {i}"))) {
                Append::Added { id, .. } => ids.push(id),
                Append::SkippedBlankKey => panic!("unexpected skip"),
            }
        }
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0], "ids not increasing: {ids:?}");
        }
    }

    #[test]
    fn unparsable_stored_data_loads_as_empty() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(Employee::STORAGE_KEY, "{not json").unwrap();
        let store = RecordStore::<Employee>::load(kv);
        assert!(store.is_empty());
    }

    #[test]
    fn failed_persist_keeps_the_in_memory_append() {
        let kv = Arc::new(MemoryStore::new());
        let mut store = RecordStore::<Employee>::load(kv.clone());
        kv.fail_writes(true);
        let outcome = store.append(employee("Jean"));
        assert!(matches!(outcome, Append::Added { persisted: false, .. }));
        assert_eq!(store.len(), 1);

        // Nothing reached the backing store.
        kv.fail_writes(false);
        let reloaded = RecordStore::<Employee>::load(kv);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn csv_quotes_every_value_and_doubles_embedded_quotes() {
        let mut store = RecordStore::<Employee>::load(Arc::new(MemoryStore::new()));
        let mut tricky = employee(r#"Jean "JB" Bosco, Sr."#);
        tricky.pay_frequency = "monthly".to_string();
        store.append(tricky);
        let csv = store.export_csv().unwrap();
        assert!(csv.contains(r#""Jean ""JB"" Bosco, Sr.""#));
        assert!(csv.contains("\"monthly\""));
        assert!(csv.contains("\"Employee\""));
    }

    #[test]
    fn seed_stock_uses_its_own_key_and_columns() {
        let kv = Arc::new(MemoryStore::new());
        let mut store = RecordStore::<SeedStock>::load(kv.clone());
        store.append(SeedStock {
            name: "Maize hybrid".to_string(),
            variety: "SC403".to_string(),
            quantity: "40".to_string(),
            unit: "kg".to_string(),
            ..SeedStock::default()
        });
        assert!(kv.get("farm-seed-stock").unwrap().is_some());
        assert!(kv.get("farm-employees").unwrap().is_none());
        let csv = store.export_csv().unwrap();
        assert!(csv.starts_with("\"Section\",\"Name\",\"Variety\",\"Quantity\",\"Unit\""));
        assert!(csv.contains("\"SeedStock\",\"Maize hybrid\""));
    }
}
