// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use aruskas::{cli, commands, config::Config, logging};

fn main() -> Result<()> {
    logging::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    let config = Config::from_matches(&matches)?;
    let pin = matches.get_one::<String>("pin");

    match matches.subcommand() {
        Some(("init", _)) => {
            config.open_store()?;
            println!("Ledger store initialized at {}", config.db_path.display());
        }
        Some(("pin", sub)) => commands::pin::handle(&config, sub)?,
        Some(("tx", sub)) => {
            let mut app = commands::unlocked_app(&config, pin)?;
            commands::transactions::handle(&mut app, sub)?
        }
        Some(("report", sub)) => {
            let app = commands::unlocked_app(&config, pin)?;
            commands::reports::handle(&app, sub)?
        }
        Some(("export", sub)) => {
            let app = commands::unlocked_app(&config, pin)?;
            commands::exporter::handle(&app, sub)?
        }
        Some(("shell", _)) => commands::shell::run(config.open_app()?)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
