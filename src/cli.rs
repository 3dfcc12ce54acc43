// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{DB_ENV, PIN_ENV};
use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn field_args(cmd: Command, editing: bool) -> Command {
    let kind = Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("Transaction type (default: income, or the category's type)");
    cmd.arg(
        Arg::new("date")
            .long("date")
            .help("Date as YYYY-MM-DD (default: today)"),
    )
    .arg(kind)
    .arg(
        Arg::new("category")
            .long("category")
            .help("Category (default: first category of the type)"),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .required(!editing)
            .allow_hyphen_values(true)
            .help("Positive amount in rupiah"),
    )
    .arg(
        Arg::new("desc")
            .long("desc")
            .help("Free-text description"),
    )
}

pub fn tx_command() -> Command {
    Command::new("tx")
        .about("Record, edit, remove and list transactions")
        .subcommand_required(true)
        .subcommand(field_args(
            Command::new("add").about("Record a transaction"),
            false,
        ))
        .subcommand(field_args(
            Command::new("edit")
                .about("Replace fields of a transaction")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
            true,
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Case-insensitive text in description or category"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .default_value("all"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["all", "income", "expense"])
                        .default_value("all"),
                ),
        ))
}

pub fn report_command() -> Command {
    Command::new("report")
        .about("Summaries derived from the ledger")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("summary").about("Total income, expense and balance"),
        ))
        .subcommand(json_flags(
            Command::new("categories").about("Totals per category"),
        ))
        .subcommand(json_flags(
            Command::new("daily").about("Income and expense for the last 10 dates"),
        ))
}

pub fn export_command() -> Command {
    Command::new("export")
        .about("Write today's CSV report (arus-kas-YYYY-MM-DD.csv)")
        .arg(
            Arg::new("out")
                .long("out")
                .default_value(".")
                .help("Directory to write the report into"),
        )
}

pub fn build_cli() -> Command {
    Command::new("aruskas")
        .version(clap::crate_version!())
        .about("PIN-protected personal cash flow ledger")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env(DB_ENV)
                .help("Path to the ledger store"),
        )
        .arg(
            Arg::new("pin")
                .long("pin")
                .global(true)
                .env(PIN_ENV)
                .hide_env_values(true)
                .help("PIN used to unlock the ledger"),
        )
        .subcommand(Command::new("init").about("Create the ledger store"))
        .subcommand(
            Command::new("pin")
                .about("Manage the access PIN")
                .subcommand_required(true)
                .subcommand(
                    Command::new("setup")
                        .about("Create the 6-digit PIN (first run only)")
                        .arg(Arg::new("new_pin").required(true))
                        .arg(Arg::new("confirm").required(true)),
                )
                .subcommand(Command::new("status").about("Show whether a PIN is set")),
        )
        .subcommand(tx_command())
        .subcommand(report_command())
        .subcommand(export_command())
        .subcommand(Command::new("shell").about("Interactive session with lock/unlock"))
}

/// Parser for lines typed into `aruskas shell`.
pub fn build_shell() -> Command {
    Command::new("shell")
        .no_binary_name(true)
        .disable_version_flag(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("setup")
                .about("Create the PIN")
                .arg(Arg::new("new_pin").required(true))
                .arg(Arg::new("confirm").required(true)),
        )
        .subcommand(
            Command::new("unlock")
                .about("Unlock with the PIN")
                .arg(Arg::new("pin").required(true)),
        )
        .subcommand(Command::new("lock").about("Lock the ledger"))
        .subcommand(Command::new("status").about("Show the lock state"))
        .subcommand(tx_command())
        .subcommand(report_command())
        .subcommand(export_command())
        .subcommand(Command::new("quit").alias("exit").about("Leave the shell"))
}
