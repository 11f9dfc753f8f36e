//! Terminal front-end for the KRX chat assistant.
//!
//! Runs a single question, an interactive session, or one of the
//! maintenance commands (`--history`, `--clear`, `--health`).

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod terminal;
