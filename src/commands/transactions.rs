// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::ledger::parse_amount;
use crate::models::{Category, Filter, Transaction, TransactionInput, TxType};
use crate::utils::{confirm, fmt_idr, maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => remove(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let input = input_from_args(TransactionInput::default(), sub)?;
    let ledger = app.ledger_mut()?;
    let tx = ledger.add(input)?;
    println!(
        "Recorded {} {} on {} ({}) as #{}",
        tx.kind,
        fmt_idr(&tx.amount),
        tx.date,
        tx.category,
        tx.id
    );
    Ok(())
}

fn edit(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("missing id")?;
    let ledger = app.ledger_mut()?;
    let existing = ledger
        .get(id)
        .with_context(|| format!("No transaction with id {}", id))?;
    let input = input_from_args(TransactionInput::from(existing), sub)?;
    let tx = ledger.edit(id, input)?;
    println!(
        "Updated #{}: {} {} on {} ({})",
        tx.id,
        tx.kind,
        fmt_idr(&tx.amount),
        tx.date,
        tx.category
    );
    Ok(())
}

fn remove(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("missing id")?;
    let ledger = app.ledger_mut()?;
    let Some(existing) = ledger.get(id) else {
        println!("No transaction with id {}", id);
        return Ok(());
    };
    let prompt = format!(
        "Delete {} {} on {} ({})?",
        existing.kind,
        fmt_idr(&existing.amount),
        existing.date,
        existing.category
    );
    if !sub.get_flag("yes") && !confirm(&prompt)? {
        println!("Kept #{}", id);
        return Ok(());
    }
    if ledger.delete(id).is_some() {
        println!("Deleted #{}", id);
    }
    Ok(())
}

/// Overlay command-line fields on `base`. A new `--type` without
/// `--category` resets the category, the way the entry form does; a
/// `--category` alone implies its type.
pub fn input_from_args(base: TransactionInput, sub: &clap::ArgMatches) -> Result<TransactionInput> {
    let mut input = base;
    let kind = sub
        .get_one::<String>("type")
        .map(|k| k.parse::<TxType>())
        .transpose()?;
    let category = sub
        .get_one::<String>("category")
        .map(|c| c.parse::<Category>())
        .transpose()?;
    match (kind, category) {
        (Some(kind), Some(category)) => {
            input.kind = kind;
            input.category = category;
        }
        (Some(kind), None) => input = input.with_kind(kind),
        (None, Some(category)) => {
            input.kind = category.kind();
            input.category = category;
        }
        (None, None) => {}
    }
    if let Some(date) = sub.get_one::<String>("date") {
        input.date = parse_date(date)?;
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        input.amount = parse_amount(amount)?;
    }
    if let Some(desc) = sub.get_one::<String>("desc") {
        input.description = desc.clone();
    }
    Ok(input)
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id,
            date: t.date.to_string(),
            r#type: t.kind.to_string(),
            category: t.category.to_string(),
            amount: t.amount,
            description: t.description.clone(),
        }
    }
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<Filter> {
    let search = sub
        .get_one::<String>("search")
        .cloned()
        .unwrap_or_default();
    let category = match sub.get_one::<String>("category") {
        Some(c) => Filter::parse_category(c)?,
        None => None,
    };
    let kind = match sub.get_one::<String>("type") {
        Some(k) => Filter::parse_kind(k)?,
        None => None,
    };
    Ok(Filter {
        search,
        category,
        kind,
    })
}

pub fn query_rows(app: &App, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = filter_from_args(sub)?;
    let ledger = app.ledger()?;
    Ok(ledger
        .filter(&filter)
        .into_iter()
        .map(TransactionRow::from)
        .collect())
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(app, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions match");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    fmt_idr(&r.amount),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Description"],
                rows,
            )
        );
    }
    Ok(())
}
