// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-oriented session that keeps one [`App`] alive, so lock and unlock
//! carry across commands.

use crate::app::App;
use crate::cli;
use crate::commands::{exporter, pin, read_pin, reports, transactions};
use crate::gate::GateState;
use anyhow::{Context, Result, bail};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run(mut app: App) -> Result<()> {
    if app.gate().state() == GateState::SettingPin {
        println!("No PIN yet. Create one with: setup <PIN> <CONFIRM>");
    }
    let stdin = io::stdin();
    loop {
        print!("aruskas ({})> ", app.gate().state());
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        match execute(&mut app, &line) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => eprintln!("error: {:#}", err),
        }
    }
    Ok(())
}

/// Run one shell line against the session.
pub fn execute(app: &mut App, line: &str) -> Result<Flow> {
    let words = split_words(line)?;
    if words.is_empty() {
        return Ok(Flow::Continue);
    }
    let matches = match cli::build_shell().try_get_matches_from(words) {
        Ok(m) => m,
        Err(err) => {
            err.print()?;
            return Ok(Flow::Continue);
        }
    };
    match matches.subcommand() {
        Some(("setup", sub)) => {
            let new_pin = sub.get_one::<String>("new_pin").context("missing PIN")?;
            let confirm = sub.get_one::<String>("confirm").context("missing PIN")?;
            pin::setup(app.gate_mut(), new_pin, confirm)?;
            println!("PIN saved, ledger unlocked");
        }
        Some(("unlock", sub)) => {
            let entered = sub.get_one::<String>("pin").context("missing PIN")?;
            app.gate_mut().unlock(read_pin(entered)?)?;
            println!("Unlocked");
        }
        Some(("lock", _)) => {
            app.gate_mut().lock();
            println!("Locked");
        }
        Some(("status", _)) => println!("{}", app.gate().state()),
        Some(("tx", sub)) => transactions::handle(app, sub)?,
        Some(("report", sub)) => reports::handle(app, sub)?,
        Some(("export", sub)) => exporter::handle(app, sub)?,
        Some(("quit", _)) => return Ok(Flow::Quit),
        _ => {}
    }
    Ok(Flow::Continue)
}

/// Split on whitespace, keeping double-quoted runs together.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        bail!("unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
