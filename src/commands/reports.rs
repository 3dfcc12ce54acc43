// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::reports::category_shares;
use crate::utils::{fmt_idr, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(app, sub)?,
        Some(("categories", sub)) => categories(app, sub)?,
        Some(("daily", sub)) => daily(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let totals = app.ledger()?.totals();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        let data = vec![
            vec!["Income".to_string(), fmt_idr(&totals.income)],
            vec!["Expense".to_string(), fmt_idr(&totals.expense)],
            vec!["Balance".to_string(), fmt_idr(&totals.balance)],
        ];
        println!("{}", pretty_table(&["", "Amount"], data));
    }
    Ok(())
}

fn categories(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let breakdown = app.ledger()?.category_breakdown();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &breakdown)? {
        let shares = category_shares(&breakdown);
        let data = breakdown
            .iter()
            .zip(shares)
            .map(|(c, share)| {
                vec![
                    c.category.to_string(),
                    c.category.kind().label().to_string(),
                    fmt_idr(&c.total),
                    format!("{}%", share),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Type", "Total", "Share"], data)
        );
    }
    Ok(())
}

fn daily(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let series = app.ledger()?.daily_series();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        let data = series
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    fmt_idr(&p.income),
                    fmt_idr(&p.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Income", "Expense"], data));
    }
    Ok(())
}
