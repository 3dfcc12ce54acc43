// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod exporter;
pub mod gate;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod reports;
pub mod store;
pub mod utils;
