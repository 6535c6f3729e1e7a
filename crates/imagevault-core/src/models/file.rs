//! File records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One accepted upload and its per-store persistence status.
///
/// Created per upload; the `stored` set is filled in by the storage
/// orchestration as each store's write completes. Variants of one file
/// complete independently and in no particular order, so a name missing
/// from `stored` means "not yet / never produced", not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    pub name: String,
    pub collection: String,
    pub uploaded_at: DateTime<Utc>,
    /// Store names whose write has completed.
    pub stored: HashSet<String>,
}

impl FileRecord {
    pub fn new(name: impl Into<String>, collection: impl Into<String>) -> Self {
        FileRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            collection: collection.into(),
            uploaded_at: Utc::now(),
            stored: HashSet::new(),
        }
    }

    /// Whether the named store's write has completed for this file.
    pub fn is_stored(&self, store: &str) -> bool {
        self.stored.contains(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_nothing_stored() {
        let record = FileRecord::new("photo.jpg", "avatars");
        assert!(!record.is_stored("avatars-original"));
        assert!(record.stored.is_empty());
    }

    #[test]
    fn test_is_stored_after_marking() {
        let mut record = FileRecord::new("photo.jpg", "avatars");
        record.stored.insert("avatars-thumb".to_string());
        assert!(record.is_stored("avatars-thumb"));
        assert!(!record.is_stored("avatars-original"));
    }
}
