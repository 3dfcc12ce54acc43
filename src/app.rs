// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gate::{AccessGate, GateState};
use crate::ledger::Ledger;
use crate::store::{KeyValueStore, LedgerStore};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("ledger is locked; unlock it with your PIN first")]
    Locked,
    #[error("no PIN set yet; create one first")]
    PinNotSet,
}

/// One running session: the gate and the ledger share a single store, and
/// the ledger is only reachable while the gate is open.
pub struct App {
    gate: AccessGate,
    ledger: Ledger,
}

impl App {
    pub fn open(kv: Rc<dyn KeyValueStore>) -> Self {
        let store = LedgerStore::new(kv);
        Self {
            gate: AccessGate::open(store.clone()),
            ledger: Ledger::open(store),
        }
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut AccessGate {
        &mut self.gate
    }

    pub fn ledger(&self) -> Result<&Ledger, AppError> {
        self.check_open()?;
        Ok(&self.ledger)
    }

    pub fn ledger_mut(&mut self) -> Result<&mut Ledger, AppError> {
        self.check_open()?;
        Ok(&mut self.ledger)
    }

    fn check_open(&self) -> Result<(), AppError> {
        match self.gate.state() {
            GateState::Unlocked => Ok(()),
            GateState::Locked => Err(AppError::Locked),
            GateState::SettingPin => Err(AppError::PinNotSet),
        }
    }
}
