// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence for the ledger and the PIN.
//!
//! Everything lives in a flat string key-value store. The ledger is kept as
//! one JSON array under [`TRANSACTIONS_KEY`] and rewritten in full on every
//! save; the PIN is a raw string under [`PIN_KEY`].

use crate::models::Transaction;
use rusqlite::{Connection, OptionalExtension, params};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

pub const TRANSACTIONS_KEY: &str = "cashflow-transactions";
pub const PIN_KEY: &str = "cashflow-pin";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Key-value store backed by a single SQLite table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
        )
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()
            .map_err(|e| StoreError::Read(e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO kv(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
                params![key, value],
            )
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }
}

/// In-memory store, mainly for tests. Reads and writes can be made to fail
/// to simulate an unavailable or full backing store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Raw stored value, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.get() {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Write("quota exceeded".into()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Write("quota exceeded".into()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Typed access to the two persisted values. Cheap to clone; clones share
/// the same backing store.
#[derive(Clone)]
pub struct LedgerStore {
    kv: Rc<dyn KeyValueStore>,
}

impl LedgerStore {
    pub fn new(kv: Rc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the saved ledger. A missing, unreadable or malformed blob is
    /// treated as an empty ledger.
    pub fn load(&self) -> Vec<Transaction> {
        let raw = match self.kv.get(TRANSACTIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no saved transactions");
                return Vec::new();
            }
            Err(err) => {
                debug!(error = %err, "could not read saved transactions");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Transaction>>(&raw) {
            Ok(list) => list,
            Err(err) => {
                debug!(error = %err, "saved transactions are malformed, starting empty");
                Vec::new()
            }
        }
    }

    pub fn save(&self, list: &[Transaction]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(list).map_err(|e| StoreError::Write(e.to_string()))?;
        self.kv.set(TRANSACTIONS_KEY, &blob)
    }

    /// Read the saved PIN. An empty value counts as no PIN.
    pub fn load_pin(&self) -> Result<Option<String>, StoreError> {
        Ok(self.kv.get(PIN_KEY)?.filter(|pin| !pin.is_empty()))
    }

    pub fn save_pin(&self, pin: &str) -> Result<(), StoreError> {
        self.kv.set(PIN_KEY, pin)
    }
}
