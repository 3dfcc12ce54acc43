// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::store::SqliteStore;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Aruskas", "aruskas"));

pub const DB_ENV: &str = "ARUSKAS_DB";
pub const PIN_ENV: &str = "ARUSKAS_PIN";

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().join("aruskas.sqlite"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// `--db` (which also reads `ARUSKAS_DB`) wins over the platform data dir.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        match m.get_one::<String>("db") {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(default_db_path()?)),
        }
    }

    pub fn open_store(&self) -> Result<SqliteStore> {
        if let Some(dir) = self.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data dir {}", dir.display()))?;
        }
        SqliteStore::open(&self.db_path)
            .with_context(|| format!("Open store at {}", self.db_path.display()))
    }

    pub fn open_app(&self) -> Result<App> {
        Ok(App::open(Rc::new(self.open_store()?)))
    }
}
