// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod exporter;
pub mod pin;
pub mod reports;
pub mod shell;
pub mod transactions;

use crate::app::App;
use crate::config::Config;
use crate::gate::{GateState, sanitize_pin_input};
use anyhow::{Context, Result, bail};

/// Open a fresh session and unlock it with `pin`. Every one-shot command
/// starts locked.
pub fn unlocked_app(config: &Config, pin: Option<&String>) -> Result<App> {
    let mut app = config.open_app()?;
    if app.gate().state() == GateState::SettingPin {
        bail!("No PIN set yet. Run `aruskas pin setup <PIN> <CONFIRM>` first");
    }
    let pin = pin.context("This ledger is PIN protected; pass --pin or set ARUSKAS_PIN")?;
    let pin = read_pin(pin)?;
    app.gate_mut().unlock(pin)?;
    Ok(app)
}

/// Reject PIN input that the entry field would not accept.
pub fn read_pin(raw: &str) -> Result<&str> {
    sanitize_pin_input(raw).context("PIN entry accepts up to 6 digits only")
}
