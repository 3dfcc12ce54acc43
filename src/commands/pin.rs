// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::read_pin;
use crate::config::Config;
use crate::gate::{AccessGate, GateState};
use anyhow::{Context, Result, bail};

pub fn handle(config: &Config, m: &clap::ArgMatches) -> Result<()> {
    let mut app = config.open_app()?;
    match m.subcommand() {
        Some(("setup", sub)) => {
            let pin = sub.get_one::<String>("new_pin").context("missing PIN")?;
            let confirm = sub.get_one::<String>("confirm").context("missing PIN")?;
            setup(app.gate_mut(), pin, confirm)?;
            println!("PIN saved. Use --pin or ARUSKAS_PIN to unlock the ledger.");
        }
        Some(("status", _)) => {
            if app.gate().has_pin() {
                println!("PIN is set");
            } else {
                println!("No PIN set yet");
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn setup(gate: &mut AccessGate, pin: &str, confirm: &str) -> Result<()> {
    if gate.state() != GateState::SettingPin {
        bail!("A PIN is already set. It cannot be changed or recovered.");
    }
    gate.submit_new_pin(read_pin(pin)?, read_pin(confirm)?)?;
    if let Some(err) = gate.last_write_error() {
        eprintln!("warning: PIN could not be saved ({}); it only lasts for this session", err);
    }
    Ok(())
}
