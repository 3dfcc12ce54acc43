// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use aruskas::app::{App, AppError};
use aruskas::commands::shell::{Flow, execute, split_words};
use aruskas::gate::GateState;
use aruskas::models::{Category, TransactionInput, TxType};
use aruskas::store::{MemoryStore, PIN_KEY, TRANSACTIONS_KEY};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::rc::Rc;

fn salary() -> TransactionInput {
    TransactionInput::new(
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        TxType::Income,
        Category::Salary,
        Decimal::from(5_000_000),
    )
}

#[test]
fn empty_store_goes_through_setup() {
    let kv = Rc::new(MemoryStore::new());
    let mut app = App::open(kv.clone());
    assert_eq!(app.gate().state(), GateState::SettingPin);
    assert_eq!(app.ledger().err(), Some(AppError::PinNotSet));

    app.gate_mut().submit_new_pin("123456", "123456").unwrap();
    assert_eq!(app.gate().state(), GateState::Unlocked);
    assert_eq!(kv.raw(PIN_KEY).as_deref(), Some("123456"));
    assert!(app.ledger().unwrap().is_empty());
}

#[test]
fn ledger_is_hidden_while_locked() {
    let kv = Rc::new(MemoryStore::new().with_entry(PIN_KEY, "123456"));
    let mut app = App::open(kv);
    assert_eq!(app.ledger_mut().err(), Some(AppError::Locked));

    app.gate_mut().unlock("123456").unwrap();
    app.ledger_mut().unwrap().add(salary()).unwrap();

    app.gate_mut().lock();
    assert!(app.ledger().is_err());
    app.gate_mut().unlock("123456").unwrap();
    assert_eq!(app.ledger().unwrap().len(), 1);
}

#[test]
fn shell_session_locks_and_unlocks() {
    let kv = Rc::new(MemoryStore::new());
    let mut app = App::open(kv.clone());

    assert_eq!(execute(&mut app, "setup 123456 123456\n").unwrap(), Flow::Continue);
    assert!(app.gate().is_unlocked());

    execute(
        &mut app,
        r#"tx add --type expense --category Ngopi --amount 50000 --date 2024-01-06 --desc "kopi pagi""#,
    )
    .unwrap();
    let ledger = app.ledger().unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.transactions()[0].description, "kopi pagi");
    assert!(kv.raw(TRANSACTIONS_KEY).unwrap().contains("kopi pagi"));

    execute(&mut app, "lock").unwrap();
    assert_eq!(app.gate().state(), GateState::Locked);
    assert!(execute(&mut app, "report summary").is_err());
    assert!(execute(&mut app, "unlock 000000").is_err());
    execute(&mut app, "unlock 123456").unwrap();
    execute(&mut app, "report summary --json").unwrap();

    assert_eq!(execute(&mut app, "quit").unwrap(), Flow::Quit);
    assert_eq!(execute(&mut app, "exit").unwrap(), Flow::Quit);
}

#[test]
fn shell_rejects_invalid_amounts_without_changes() {
    let kv = Rc::new(MemoryStore::new());
    let mut app = App::open(kv);
    execute(&mut app, "setup 123456 123456").unwrap();
    assert!(execute(&mut app, "tx add --amount 0").is_err());
    assert!(execute(&mut app, "tx add --amount -5").is_err());
    assert!(execute(&mut app, "tx add --amount lots").is_err());
    assert!(app.ledger().unwrap().is_empty());
}

#[test]
fn shell_edit_and_delete() {
    let kv = Rc::new(MemoryStore::new());
    let mut app = App::open(kv);
    execute(&mut app, "setup 123456 123456").unwrap();
    let id = app.ledger_mut().unwrap().add(salary()).unwrap().id;

    execute(&mut app, &format!("tx edit {} --type expense --amount 20000", id)).unwrap();
    let edited = app.ledger().unwrap().get(id).unwrap().clone();
    assert_eq!(edited.kind, TxType::Expense);
    assert_eq!(edited.category, Category::FoodAndDrink);
    assert_eq!(edited.amount, Decimal::from(20_000));
    assert_eq!(edited.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

    assert!(execute(&mut app, "tx edit 1 --amount 5").is_err());

    execute(&mut app, &format!("tx rm {} --yes", id)).unwrap();
    assert!(app.ledger().unwrap().is_empty());
}

#[test]
fn unknown_shell_input_is_not_fatal() {
    let kv = Rc::new(MemoryStore::new());
    let mut app = App::open(kv);
    assert_eq!(execute(&mut app, "   ").unwrap(), Flow::Continue);
    assert_eq!(execute(&mut app, "frobnicate").unwrap(), Flow::Continue);
    assert!(execute(&mut app, "unlock \"123").is_err());
}

#[test]
fn split_words_handles_quotes() {
    assert_eq!(
        split_words(r#"tx add --desc "kopi  pagi" --amount 5"#).unwrap(),
        vec!["tx", "add", "--desc", "kopi  pagi", "--amount", "5"]
    );
    assert_eq!(split_words(r#"--desc """#).unwrap(), vec!["--desc", ""]);
    assert!(split_words("").unwrap().is_empty());
    assert!(split_words(r#"say "hi"#).is_err());
}
