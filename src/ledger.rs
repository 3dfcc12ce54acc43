// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategoryTotal, DailyPoint, Filter, Totals, Transaction, TransactionInput};
use crate::reports;
use crate::store::{LedgerStore, StoreError};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),
    #[error("transaction {0} not found")]
    NotFound(i64),
    #[error("no transaction ids left above {0}")]
    IdsExhausted(i64),
}

/// Largest accepted amount, in rupiah (one quadrillion).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Parse a user-entered amount. Non-numeric input is a validation failure,
/// same as a non-positive amount.
pub fn parse_amount(s: &str) -> Result<Decimal, LedgerError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| LedgerError::Validation("amount must be a positive number".into()))
}

fn validate(input: &TransactionInput) -> Result<(), LedgerError> {
    if input.amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(
            "amount must be a positive number".into(),
        ));
    }
    if input.amount > Decimal::from(MAX_AMOUNT) {
        return Err(LedgerError::Validation(format!(
            "amount must not exceed {MAX_AMOUNT}"
        )));
    }
    if input.category.kind() != input.kind {
        return Err(LedgerError::Validation(format!(
            "category '{}' is not a {} category",
            input.category, input.kind
        )));
    }
    Ok(())
}

/// Hands out millisecond timestamps, bumped so that every id is strictly
/// greater than the previous one and than any id already in the ledger.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(list: &[Transaction]) -> Self {
        Self {
            last: list.iter().map(|t| t.id).max().unwrap_or(0),
        }
    }

    /// Fails once the previous id is `i64::MAX`; the generator is left
    /// unchanged.
    pub fn next_id(&mut self) -> Result<i64, LedgerError> {
        let floor = self
            .last
            .checked_add(1)
            .ok_or(LedgerError::IdsExhausted(self.last))?;
        let now = chrono::Utc::now().timestamp_millis();
        self.last = now.max(floor);
        Ok(self.last)
    }
}

/// The in-memory ledger. Newest insertions first; every mutation rewrites
/// the whole list to the store.
pub struct Ledger {
    store: LedgerStore,
    transactions: Vec<Transaction>,
    ids: IdGenerator,
    last_write_error: Option<StoreError>,
}

impl Ledger {
    pub fn open(store: LedgerStore) -> Self {
        let transactions = store.load();
        debug!(count = transactions.len(), "ledger loaded");
        Self {
            ids: IdGenerator::seeded(&transactions),
            store,
            transactions,
            last_write_error: None,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, input: TransactionInput) -> Result<Transaction, LedgerError> {
        validate(&input)?;
        let tx = Transaction {
            id: self.ids.next_id()?,
            date: input.date,
            kind: input.kind,
            category: input.category,
            amount: input.amount,
            description: input.description,
        };
        self.transactions.insert(0, tx.clone());
        info!(id = tx.id, kind = %tx.kind, amount = %tx.amount, "transaction added");
        self.persist();
        Ok(tx)
    }

    /// Replace the fields of an existing transaction, keeping its id and
    /// position.
    pub fn edit(&mut self, id: i64, input: TransactionInput) -> Result<Transaction, LedgerError> {
        validate(&input)?;
        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        *slot = Transaction {
            id,
            date: input.date,
            kind: input.kind,
            category: input.category,
            amount: input.amount,
            description: input.description,
        };
        let tx = slot.clone();
        info!(id, "transaction edited");
        self.persist();
        Ok(tx)
    }

    /// Remove a transaction. Callers confirm with the user beforehand.
    /// Unknown ids are ignored.
    pub fn delete(&mut self, id: i64) -> Option<Transaction> {
        let pos = self.transactions.iter().position(|t| t.id == id)?;
        let removed = self.transactions.remove(pos);
        info!(id, "transaction deleted");
        self.persist();
        Some(removed)
    }

    pub fn totals(&self) -> Totals {
        reports::totals(&self.transactions)
    }

    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        reports::category_breakdown(&self.transactions)
    }

    pub fn daily_series(&self) -> Vec<DailyPoint> {
        reports::daily_series(&self.transactions)
    }

    pub fn filter(&self, f: &Filter) -> Vec<&Transaction> {
        reports::filter(&self.transactions, f)
    }

    /// The error from the most recent save, cleared by the next successful
    /// one. The in-memory list stays authoritative either way.
    pub fn last_write_error(&self) -> Option<&StoreError> {
        self.last_write_error.as_ref()
    }

    fn persist(&mut self) {
        match self.store.save(&self.transactions) {
            Ok(()) => self.last_write_error = None,
            Err(err) => {
                warn!(error = %err, "failed to save transactions");
                self.last_write_error = Some(err);
            }
        }
    }
}
