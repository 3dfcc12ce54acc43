// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} '{value}'")]
pub struct ParseEnumError {
    what: &'static str,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }

    /// Human readable label used in tables and reports.
    pub fn label(&self) -> &'static str {
        match self {
            TxType::Income => "Income",
            TxType::Expense => "Expense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            _ => Err(ParseEnumError {
                what: "transaction type",
                value: s.to_string(),
            }),
        }
    }
}

/// Fixed category vocabulary. The serialized names are what the stored
/// ledger blob carries, so they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Gaji")]
    Salary,
    #[serde(rename = "Pendapatan lainnya")]
    OtherIncome,
    #[serde(rename = "Makanan/Minuman")]
    FoodAndDrink,
    #[serde(rename = "Ngopi")]
    Coffee,
    #[serde(rename = "Hiburan")]
    Entertainment,
    #[serde(rename = "Service")]
    Service,
    #[serde(rename = "Lainnya")]
    Other,
}

pub const INCOME_CATEGORIES: [Category; 2] = [Category::Salary, Category::OtherIncome];

pub const EXPENSE_CATEGORIES: [Category; 5] = [
    Category::FoodAndDrink,
    Category::Coffee,
    Category::Entertainment,
    Category::Service,
    Category::Other,
];

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Salary,
        Category::OtherIncome,
        Category::FoodAndDrink,
        Category::Coffee,
        Category::Entertainment,
        Category::Service,
        Category::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Salary => "Gaji",
            Category::OtherIncome => "Pendapatan lainnya",
            Category::FoodAndDrink => "Makanan/Minuman",
            Category::Coffee => "Ngopi",
            Category::Entertainment => "Hiburan",
            Category::Service => "Service",
            Category::Other => "Lainnya",
        }
    }

    /// The transaction type this category belongs to.
    pub fn kind(&self) -> TxType {
        match self {
            Category::Salary | Category::OtherIncome => TxType::Income,
            _ => TxType::Expense,
        }
    }

    pub fn for_type(kind: TxType) -> &'static [Category] {
        match kind {
            TxType::Income => &INCOME_CATEGORIES,
            TxType::Expense => &EXPENSE_CATEGORIES,
        }
    }

    /// First entry of the type's vocabulary; what the entry form falls back
    /// to whenever the type changes.
    pub fn default_for(kind: TxType) -> Category {
        Category::for_type(kind)[0]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .find(|c| c.name() == wanted)
            .or_else(|| {
                Category::ALL
                    .iter()
                    .find(|c| c.name().eq_ignore_ascii_case(wanted))
            })
            .copied()
            .ok_or_else(|| ParseEnumError {
                what: "category",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TxType,
    pub category: Category,
    #[serde(with = "amount_number")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

/// Field values for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub date: NaiveDate,
    pub kind: TxType,
    pub category: Category,
    pub amount: Decimal,
    pub description: String,
}

impl TransactionInput {
    pub fn new(date: NaiveDate, kind: TxType, category: Category, amount: Decimal) -> Self {
        Self {
            date,
            kind,
            category,
            amount,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Switch the type, resetting the category to the new type's default
    /// when the current one no longer fits.
    pub fn with_kind(mut self, kind: TxType) -> Self {
        if self.category.kind() != kind {
            self.category = Category::default_for(kind);
        }
        self.kind = kind;
        self
    }
}

impl Default for TransactionInput {
    fn default() -> Self {
        Self::new(
            chrono::Local::now().date_naive(),
            TxType::Income,
            Category::Salary,
            Decimal::ZERO,
        )
    }
}

impl From<&Transaction> for TransactionInput {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t.date,
            kind: t.kind,
            category: t.category,
            amount: t.amount,
            description: t.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Table filter. `None` stands for "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub search: String,
    pub category: Option<Category>,
    pub kind: Option<TxType>,
}

impl Filter {
    /// Parse a category filter value where `all` disables the predicate.
    pub fn parse_category(s: &str) -> Result<Option<Category>, ParseEnumError> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }

    pub fn parse_kind(s: &str) -> Result<Option<TxType>, ParseEnumError> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }
}

// Amounts are JSON numbers in the stored blob; whole amounts stay integers.
mod amount_number {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &Decimal, s: S) -> Result<S::Ok, S::Error> {
        if amount.fract().is_zero() {
            if let Some(whole) = amount.to_i64() {
                return s.serialize_i64(whole);
            }
        }
        rust_decimal::serde::float::serialize(amount, s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::float::deserialize(d)
    }
}
