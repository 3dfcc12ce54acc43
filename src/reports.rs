// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Views derived from the transaction list. Nothing here is cached; every
//! call scans the list it is given. Sums saturate at `Decimal::MAX` so a
//! hand-edited store with absurd amounts still renders.

use crate::models::{CategoryTotal, DailyPoint, Filter, Totals, Transaction, TxType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Number of most recent dates kept by [`daily_series`].
pub const DAILY_WINDOW: usize = 10;

pub fn totals(list: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in list {
        match t.kind {
            TxType::Income => income = income.saturating_add(t.amount),
            TxType::Expense => expense = expense.saturating_add(t.amount),
        }
    }
    Totals {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}

/// Sum of amounts per category across both types, in first-seen order.
pub fn category_breakdown(list: &[Transaction]) -> Vec<CategoryTotal> {
    let mut out: Vec<CategoryTotal> = Vec::new();
    for t in list {
        match out.iter_mut().find(|c| c.category == t.category) {
            Some(entry) => entry.total = entry.total.saturating_add(t.amount),
            None => out.push(CategoryTotal {
                category: t.category,
                total: t.amount,
            }),
        }
    }
    out
}

/// Per-date income and expense for the last [`DAILY_WINDOW`] distinct dates,
/// oldest first.
pub fn daily_series(list: &[Transaction]) -> Vec<DailyPoint> {
    let mut map: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for t in list {
        let entry = map.entry(t.date).or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            TxType::Income => entry.0 = entry.0.saturating_add(t.amount),
            TxType::Expense => entry.1 = entry.1.saturating_add(t.amount),
        }
    }
    let skip = map.len().saturating_sub(DAILY_WINDOW);
    map.into_iter()
        .skip(skip)
        .map(|(date, (income, expense))| DailyPoint {
            date,
            income,
            expense,
        })
        .collect()
}

pub fn matches(t: &Transaction, f: &Filter) -> bool {
    let needle = f.search.to_lowercase();
    let matches_search = needle.is_empty()
        || t.description.to_lowercase().contains(&needle)
        || t.category.name().to_lowercase().contains(&needle);
    let matches_category = f.category.is_none_or(|c| c == t.category);
    let matches_type = f.kind.is_none_or(|k| k == t.kind);
    matches_search && matches_category && matches_type
}

/// Transactions matching every predicate of `f`, in ledger order.
pub fn filter<'a>(list: &'a [Transaction], f: &Filter) -> Vec<&'a Transaction> {
    list.iter().filter(|t| matches(t, f)).collect()
}

/// Share of each category in the combined total, as a percentage rounded to
/// one decimal place.
pub fn category_shares(breakdown: &[CategoryTotal]) -> Vec<Decimal> {
    let sum = breakdown
        .iter()
        .fold(Decimal::ZERO, |acc, c| acc.saturating_add(c.total));
    breakdown
        .iter()
        .map(|c| {
            c.total
                .checked_div(sum)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map(|pct| pct.round_dp(1))
                .unwrap_or(Decimal::ZERO)
        })
        .collect()
}
