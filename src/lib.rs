//! # BioFlow - Bioinformatics Workflow Helper
//!
//! A bilingual (English/Chinese) terminal toolkit for everyday
//! bioinformatics chores: reformatting FASTA files and installing common
//! tools through conda.
//!
//! ## Architecture
//!
//! The core is UI-independent and shared by both front ends:
//! - `fasta`: FASTA parsing, line wrapping and formatting
//! - `seq_task`: validated formatting jobs (read, format, write)
//! - `tools`: tool inventory, `PATH` detection and conda installs
//! - `config`: the JSON config store and its one-time legacy migration
//! - `i18n`: message catalogs and the active-language translator
//! - `envvars`: integer settings read from the environment
//!
//! Front ends:
//! - `cli`: the non-interactive `seq` and `env` subcommands
//! - `model`, `event`, `ui`, `controller`: the interactive menu, split the
//!   same way as an event-driven TUI (state, key mapping, rendering, loop)

pub mod cli;
pub mod config;
pub mod controller;
pub mod envvars;
pub mod event;
pub mod fasta;
pub mod i18n;
pub mod model;
pub mod seq_task;
pub mod tools;
pub mod ui;
