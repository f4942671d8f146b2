//! SQLite implementation of the RegistrationStore trait.
//!
//! This is the persistent backend for the registration cache. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use truthchain_core::{Fingerprint, RegistrationReceipt};

use crate::entry::{storage_key, StoredEntry};
use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{RegisterOutcome, RegistrationStore};

/// SQLite-based cache implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl RegistrationStore for SqliteStore {
    async fn try_register(&self, entry: StoredEntry) -> Result<RegisterOutcome> {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("mutex poisoned: {}", e)))?;

            let key = entry.storage_key();
            let value = serde_json::to_string(&entry)?;

            // One conditional write: either this insert takes the key or an
            // existing row stays untouched. Winner selection happens under
            // the same connection lock, so no other task interleaves.
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO entries (key, value, created_at) VALUES (?1, ?2, ?3)",
                params![key, value, now_millis()],
            )?;

            if inserted == 1 {
                return Ok(RegisterOutcome::Registered(entry.receipt));
            }

            let existing: String = conn.query_row(
                "SELECT value FROM entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )?;
            let existing: StoredEntry = serde_json::from_str(&existing)?;

            Ok(RegisterOutcome::Existing(existing.receipt))
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("spawn_blocking failed: {}", e)))?
    }

    async fn lookup_entry(&self, fingerprint: &Fingerprint) -> Result<Option<StoredEntry>> {
        let key = storage_key(fingerprint);
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("mutex poisoned: {}", e)))?;

            let value: Option<String> = conn
                .query_row(
                    "SELECT value FROM entries WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;

            match value {
                Some(json) => Ok(Some(serde_json::from_str(&json)?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("spawn_blocking failed: {}", e)))?
    }

    async fn batch_lookup(
        &self,
        fingerprints: &[Fingerprint],
    ) -> Result<HashMap<Fingerprint, Option<RegistrationReceipt>>> {
        let fingerprints = fingerprints.to_vec();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("mutex poisoned: {}", e)))?;

            let mut stmt = conn.prepare("SELECT value FROM entries WHERE key = ?1")?;

            let mut results = HashMap::with_capacity(fingerprints.len());
            for fingerprint in fingerprints {
                let value: Option<String> = stmt
                    .query_row(params![storage_key(&fingerprint)], |row| row.get(0))
                    .optional()?;

                let receipt = match value {
                    Some(json) => Some(serde_json::from_str::<StoredEntry>(&json)?.receipt),
                    None => None,
                };
                results.insert(fingerprint, receipt);
            }

            Ok(results)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("spawn_blocking failed: {}", e)))?
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(fingerprint: Fingerprint, tag: &str) -> StoredEntry {
        StoredEntry::new(RegistrationReceipt::new(
            fingerprint,
            format!("2024-01-01T00:00:00.{}Z", tag),
            format!("0xtx-{}", tag),
            "0xWallet",
        ))
    }

    #[tokio::test]
    async fn test_sqlite_store_basic() {
        let store = SqliteStore::open_memory().unwrap();
        let fingerprint = Fingerprint::from_bytes([0x41; 32]);

        let outcome = store.try_register(make_entry(fingerprint, "001")).await.unwrap();
        assert!(outcome.is_new());

        let receipt = store.lookup(&fingerprint).await.unwrap().unwrap();
        assert_eq!(receipt.transaction_id, "0xtx-001");
    }

    #[tokio::test]
    async fn test_sqlite_store_first_write_wins() {
        let store = SqliteStore::open_memory().unwrap();
        let fingerprint = Fingerprint::from_bytes([0x42; 32]);

        let first = store.try_register(make_entry(fingerprint, "first")).await.unwrap();
        assert!(first.is_new());

        let second = store.try_register(make_entry(fingerprint, "second")).await.unwrap();
        assert!(!second.is_new());
        assert_eq!(second.receipt().transaction_id, "0xtx-first");

        let stored = store.lookup(&fingerprint).await.unwrap().unwrap();
        assert_eq!(stored.transaction_id, "0xtx-first");
    }

    #[tokio::test]
    async fn test_sqlite_store_absent_is_none() {
        let store = SqliteStore::open_memory().unwrap();
        assert!(store.lookup(&Fingerprint::ZERO).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sqlite_store_batch_lookup() {
        let store = SqliteStore::open_memory().unwrap();
        let f1 = Fingerprint::from_bytes([0x01; 32]);
        let f2 = Fingerprint::from_bytes([0x02; 32]);
        let f3 = Fingerprint::from_bytes([0x03; 32]);

        store.try_register(make_entry(f2, "only")).await.unwrap();

        let results = store.batch_lookup(&[f1, f2, f3]).await.unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[&f1].is_none());
        assert_eq!(results[&f2].as_ref().unwrap().transaction_id, "0xtx-only");
        assert!(results[&f3].is_none());
    }

    #[tokio::test]
    async fn test_sqlite_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");
        let fingerprint = Fingerprint::from_bytes([0x44; 32]);

        {
            let store = SqliteStore::open(&path).unwrap();
            store.try_register(make_entry(fingerprint, "keep")).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let receipt = store.lookup(&fingerprint).await.unwrap().unwrap();
        assert_eq!(receipt.transaction_id, "0xtx-keep");
    }

    #[tokio::test]
    async fn test_persisted_layout_is_literal_key_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");
        let fingerprint = Fingerprint::from_bytes([0x45; 32]);

        {
            let store = SqliteStore::open(&path).unwrap();
            store.try_register(make_entry(fingerprint, "layout")).await.unwrap();
        }

        // Inspect the raw table: key and value must match the layout
        // earlier deployments wrote.
        let conn = Connection::open(&path).unwrap();
        let (key, value): (String, String) = conn
            .query_row("SELECT key, value FROM entries", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();

        assert_eq!(key, format!("registration_{}", fingerprint.to_hex()));

        let parsed: serde_json::Value = serde_json::from_str(&value).unwrap();
        assert_eq!(parsed["fingerprint"], fingerprint.to_hex());
        assert_eq!(parsed["transactionId"], "0xtx-layout");
        assert_eq!(parsed["submitterIdentity"], "0xWallet");
    }

    #[tokio::test]
    async fn test_reads_entries_written_by_earlier_deployments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");
        let fingerprint = Fingerprint::from_bytes([0x46; 32]);

        // Create the schema, then seed a bare-receipt value directly.
        {
            SqliteStore::open(&path).unwrap();
        }
        {
            let conn = Connection::open(&path).unwrap();
            let value = format!(
                r#"{{"fingerprint":"{}","timestamp":"2022-03-03T03:03:03.000Z","transactionId":"0xlegacy","submitterIdentity":"0xOld"}}"#,
                fingerprint.to_hex()
            );
            conn.execute(
                "INSERT INTO entries (key, value, created_at) VALUES (?1, ?2, 0)",
                params![storage_key(&fingerprint), value],
            )
            .unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let entry = store.lookup_entry(&fingerprint).await.unwrap().unwrap();
        assert_eq!(entry.receipt.transaction_id, "0xlegacy");
        assert!(entry.record.is_none());

        // And re-registration still defers to the seeded entry
        let outcome = store.try_register(make_entry(fingerprint, "new")).await.unwrap();
        assert!(!outcome.is_new());
        assert_eq!(outcome.receipt().transaction_id, "0xlegacy");
    }

    #[tokio::test]
    async fn test_retained_record_roundtrips() {
        use truthchain_core::ContentRecord;

        let store = SqliteStore::open_memory().unwrap();
        let fingerprint = Fingerprint::from_bytes([0x47; 32]);
        let record = ContentRecord::new("Title", "Body", "https://x.example", "ts");
        let entry = StoredEntry::with_record(
            RegistrationReceipt::new(fingerprint, "ts", "0x1", "0xW"),
            record.clone(),
        );

        store.try_register(entry).await.unwrap();

        let stored = store.lookup_entry(&fingerprint).await.unwrap().unwrap();
        assert_eq!(stored.record, Some(record));
    }
}
