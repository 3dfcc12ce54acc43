// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use aruskas::gate::{AccessGate, GateError, GateState, is_valid_pin, sanitize_pin_input};
use aruskas::store::{LedgerStore, MemoryStore, PIN_KEY, StoreError};
use std::rc::Rc;

fn fresh() -> (Rc<MemoryStore>, AccessGate) {
    let kv = Rc::new(MemoryStore::new());
    let gate = AccessGate::open(LedgerStore::new(kv.clone()));
    (kv, gate)
}

fn with_pin(pin: &str) -> (Rc<MemoryStore>, AccessGate) {
    let kv = Rc::new(MemoryStore::new().with_entry(PIN_KEY, pin));
    let gate = AccessGate::open(LedgerStore::new(kv.clone()));
    (kv, gate)
}

#[test]
fn first_run_sets_pin_and_unlocks() {
    let (kv, mut gate) = fresh();
    assert_eq!(gate.state(), GateState::SettingPin);
    assert!(!gate.has_pin());

    gate.submit_new_pin("123456", "123456").unwrap();
    assert_eq!(gate.state(), GateState::Unlocked);
    assert_eq!(kv.raw(PIN_KEY).as_deref(), Some("123456"));
}

#[test]
fn bad_new_pins_stay_in_setup() {
    let (kv, mut gate) = fresh();
    for (pin, confirm, expected) in [
        ("12345", "12345", GateError::InvalidFormat),
        ("1234567", "1234567", GateError::InvalidFormat),
        ("12a456", "12a456", GateError::InvalidFormat),
        ("", "", GateError::InvalidFormat),
        ("١٢٣٤٥٦", "١٢٣٤٥٦", GateError::InvalidFormat),
        ("123456", "654321", GateError::Mismatch),
    ] {
        assert_eq!(gate.submit_new_pin(pin, confirm), Err(expected));
        assert_eq!(gate.state(), GateState::SettingPin);
    }
    assert!(kv.raw(PIN_KEY).is_none());
}

#[test]
fn format_is_checked_before_match() {
    let (_kv, mut gate) = fresh();
    assert_eq!(
        gate.submit_new_pin("12", "34"),
        Err(GateError::InvalidFormat)
    );
}

#[test]
fn stored_pin_starts_locked() {
    let (_kv, gate) = with_pin("123456");
    assert_eq!(gate.state(), GateState::Locked);
    assert!(gate.has_pin());
}

#[test]
fn unlock_requires_the_stored_pin() {
    let (_kv, mut gate) = with_pin("123456");
    assert_eq!(gate.unlock("000000"), Err(GateError::IncorrectPin));
    assert_eq!(gate.state(), GateState::Locked);
    gate.unlock("123456").unwrap();
    assert!(gate.is_unlocked());
}

#[test]
fn lock_then_unlock_again() {
    let (_kv, mut gate) = with_pin("123456");
    gate.unlock("123456").unwrap();
    gate.lock();
    assert_eq!(gate.state(), GateState::Locked);
    gate.unlock("123456").unwrap();
    assert_eq!(gate.state(), GateState::Unlocked);
}

#[test]
fn lock_does_not_skip_setup() {
    let (_kv, mut gate) = fresh();
    gate.lock();
    assert_eq!(gate.state(), GateState::SettingPin);
}

#[test]
fn transitions_are_state_checked() {
    let (_kv, mut gate) = with_pin("123456");
    assert_eq!(
        gate.submit_new_pin("654321", "654321"),
        Err(GateError::WrongState(GateState::Locked))
    );
    let (_kv, mut gate) = fresh();
    assert_eq!(
        gate.unlock("123456"),
        Err(GateError::WrongState(GateState::SettingPin))
    );
}

#[test]
fn a_new_session_never_starts_unlocked() {
    let (kv, mut gate) = fresh();
    gate.submit_new_pin("123456", "123456").unwrap();
    assert!(gate.is_unlocked());

    let next = AccessGate::open(LedgerStore::new(kv.clone()));
    assert_eq!(next.state(), GateState::Locked);
}

#[test]
fn pin_write_failure_still_unlocks_this_session() {
    let (kv, mut gate) = fresh();
    kv.set_fail_writes(true);
    gate.submit_new_pin("123456", "123456").unwrap();
    assert!(gate.is_unlocked());
    assert!(matches!(gate.last_write_error(), Some(StoreError::Write(_))));

    gate.lock();
    gate.unlock("123456").unwrap();
}

#[test]
fn unreadable_pin_keeps_gate_locked() {
    let kv = Rc::new(MemoryStore::new().with_entry(PIN_KEY, "123456"));
    kv.set_fail_reads(true);
    let mut gate = AccessGate::open(LedgerStore::new(kv.clone()));
    assert_eq!(gate.state(), GateState::Locked);
    assert_eq!(gate.unlock("123456"), Err(GateError::IncorrectPin));
}

#[test]
fn pin_validation_and_input_sanitizing() {
    assert!(is_valid_pin("000000"));
    assert!(!is_valid_pin("00000"));
    assert!(!is_valid_pin(" 123456"));

    assert_eq!(sanitize_pin_input(""), Some(""));
    assert_eq!(sanitize_pin_input("123"), Some("123"));
    assert_eq!(sanitize_pin_input("123456"), Some("123456"));
    assert_eq!(sanitize_pin_input("1234567"), None);
    assert_eq!(sanitize_pin_input("12-4"), None);
    assert_eq!(sanitize_pin_input("١٢٣"), None);
}
