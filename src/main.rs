//! BioFlow - bioinformatics workflow helper
//!
//! ## Usage
//!
//! ```bash
//! bioflow                                   # interactive menu
//! bioflow seq -i reads.fasta -w 60          # reformat a FASTA file
//! bioflow env --list                        # tool status
//! bioflow --json env --install samtools     # install through conda
//! ```
//!
//! ## Interactive menu
//!
//! - `Up/Down` or `j/k`: move
//! - `Enter`: select
//! - `Esc`: back
//! - `Ctrl+C`: back to the main menu, or quit from it

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use bioflow::cli::{self, Cli};
use bioflow::config::ConfigStore;
use bioflow::controller::run_app;
use bioflow::i18n::Translator;
use bioflow::model::AppState;

/// `[LEVEL] message` on stderr; `RUST_LOG` overrides the default level.
fn init_logging(quiet: bool) {
    let level = if quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet || cli.json);

    let store = ConfigStore::from_environment();

    if cli.command.is_some() {
        let translator = Translator::from_config(&store.load());
        let mut out = io::stdout().lock();
        let code = cli::run(&cli, &translator, &mut out);
        out.flush()?;
        std::process::exit(code);
    }

    let farewell = run_app(AppState::new(store))?;
    if let Some(farewell) = farewell {
        println!("{farewell}");
    }

    Ok(())
}
