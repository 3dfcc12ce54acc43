// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! PIN lock in front of the ledger.
//!
//! The PIN is the only thing persisted; the lock flag is not, so every new
//! session starts [`GateState::Locked`] (or [`GateState::SettingPin`] when no
//! PIN exists). There is no reset flow: a forgotten PIN keeps the ledger
//! locked for good.

use crate::store::{LedgerStore, StoreError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

pub const PIN_LEN: usize = 6;

static PIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("PIN pattern is a valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No PIN stored yet; a new one must be created before anything else.
    SettingPin,
    Locked,
    Unlocked,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GateState::SettingPin => "setting PIN",
            GateState::Locked => "locked",
            GateState::Unlocked => "unlocked",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("PIN must be 6 digits")]
    InvalidFormat,
    #[error("PINs do not match")]
    Mismatch,
    #[error("incorrect PIN")]
    IncorrectPin,
    #[error("not allowed while {0}")]
    WrongState(GateState),
}

pub fn is_valid_pin(pin: &str) -> bool {
    PIN_RE.is_match(pin)
}

/// Boundary filter for PIN entry: accepts the edited value only when it is
/// all digits and at most six long, otherwise the edit is dropped.
pub fn sanitize_pin_input(value: &str) -> Option<&str> {
    if value.len() <= PIN_LEN && value.bytes().all(|b| b.is_ascii_digit()) {
        Some(value)
    } else {
        None
    }
}

pub struct AccessGate {
    store: LedgerStore,
    pin: Option<String>,
    state: GateState,
    last_write_error: Option<StoreError>,
}

impl AccessGate {
    pub fn open(store: LedgerStore) -> Self {
        let (pin, state) = match store.load_pin() {
            Ok(Some(pin)) => (Some(pin), GateState::Locked),
            Ok(None) => (None, GateState::SettingPin),
            // Never offer setup when the stored PIN could not be read, or a
            // new PIN would silently replace the real one.
            Err(err) => {
                warn!(error = %err, "could not read saved PIN, staying locked");
                (None, GateState::Locked)
            }
        };
        Self {
            store,
            pin,
            state,
            last_write_error: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    pub fn has_pin(&self) -> bool {
        self.pin.is_some()
    }

    /// Create the PIN. Only valid while [`GateState::SettingPin`]; on success
    /// the PIN is saved and the gate opens.
    pub fn submit_new_pin(&mut self, pin: &str, confirm: &str) -> Result<(), GateError> {
        if self.state != GateState::SettingPin {
            return Err(GateError::WrongState(self.state));
        }
        if !is_valid_pin(pin) {
            return Err(GateError::InvalidFormat);
        }
        if pin != confirm {
            return Err(GateError::Mismatch);
        }
        match self.store.save_pin(pin) {
            Ok(()) => self.last_write_error = None,
            Err(err) => {
                warn!(error = %err, "failed to save PIN");
                self.last_write_error = Some(err);
            }
        }
        self.pin = Some(pin.to_string());
        self.state = GateState::Unlocked;
        info!("PIN created, gate unlocked");
        Ok(())
    }

    pub fn unlock(&mut self, pin: &str) -> Result<(), GateError> {
        if self.state != GateState::Locked {
            return Err(GateError::WrongState(self.state));
        }
        if self.pin.as_deref() != Some(pin) {
            info!("unlock rejected");
            return Err(GateError::IncorrectPin);
        }
        self.state = GateState::Unlocked;
        info!("gate unlocked");
        Ok(())
    }

    /// Lock an unlocked gate. Any other state is left as is.
    pub fn lock(&mut self) {
        if self.state == GateState::Unlocked {
            self.state = GateState::Locked;
            info!("gate locked");
        }
    }

    pub fn last_write_error(&self) -> Option<&StoreError> {
        self.last_write_error.as_ref()
    }
}
