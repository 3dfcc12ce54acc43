// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::exporter::{ExportError, write_export};
use crate::utils::today;
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let out = m.get_one::<String>("out").map(String::as_str).unwrap_or(".");
    let ledger = app.ledger()?;
    match write_export(
        Path::new(out),
        today(),
        ledger.transactions(),
        &ledger.totals(),
    ) {
        Ok(path) => {
            println!(
                "Exported {} transactions to {}",
                ledger.len(),
                path.display()
            );
            Ok(())
        }
        Err(ExportError::Empty) => {
            println!("No transactions to export yet");
            Ok(())
        }
        Err(err) => Err(err).with_context(|| format!("Export to {} failed", out)),
    }
}
