//! Bioinformatics tool inventory and installer.
//!
//! Tools are detected by looking their executable up on `PATH` and
//! installed through `conda` from the bioconda channel. Installation is a
//! blocking subprocess with no timeout.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

use serde::Serialize;
use thiserror::Error;

/// A known external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BioTool {
    /// Display name
    pub name: &'static str,
    /// Executable probed on `PATH`
    pub executable: &'static str,
    /// Command line used to install it
    pub install_command: &'static [&'static str],
}

/// Every tool the environment manager knows about, in menu order.
pub const BIO_TOOLS: &[BioTool] = &[
    BioTool {
        name: "FastQC",
        executable: "fastqc",
        install_command: &["conda", "install", "-y", "-c", "bioconda", "fastqc"],
    },
    BioTool {
        name: "SAMtools",
        executable: "samtools",
        install_command: &["conda", "install", "-y", "-c", "bioconda", "samtools"],
    },
    BioTool {
        name: "BWA",
        executable: "bwa",
        install_command: &["conda", "install", "-y", "-c", "bioconda", "bwa"],
    },
    BioTool {
        name: "BLAST+",
        executable: "blastn",
        install_command: &["conda", "install", "-y", "-c", "bioconda", "blast"],
    },
    BioTool {
        name: "Trimmomatic",
        executable: "trimmomatic",
        install_command: &["conda", "install", "-y", "-c", "bioconda", "trimmomatic"],
    },
];

/// Errors that can occur while installing a tool.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Empty install command")]
    EmptyCommand,

    #[error("Failed to run `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` returned non-zero exit status ({status})")]
    Failed { command: String, status: ExitStatus },
}

/// Installation state of one tool, as reported by `env --list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub name: &'static str,
    pub executable: &'static str,
    pub installed: bool,
}

/// Returns true if `executable` resolves on `PATH`.
pub fn is_installed(executable: &str) -> bool {
    which::which(executable).is_ok()
}

/// Returns true if `conda` is available.
pub fn conda_available() -> bool {
    is_installed("conda")
}

/// Finds a tool by display name, ignoring ASCII case.
pub fn find_tool(name: &str) -> Option<&'static BioTool> {
    BIO_TOOLS
        .iter()
        .find(|tool| tool.name.eq_ignore_ascii_case(name))
}

/// Display names of all known tools.
pub fn tool_names() -> Vec<&'static str> {
    BIO_TOOLS.iter().map(|tool| tool.name).collect()
}

/// Probes every known tool.
pub fn tool_statuses() -> Vec<ToolStatus> {
    BIO_TOOLS
        .iter()
        .map(|tool| ToolStatus {
            name: tool.name,
            executable: tool.executable,
            installed: is_installed(tool.executable),
        })
        .collect()
}

/// Runs the tool's install command and waits for it.
///
/// With `quiet`, the installer's stdout is discarded.
pub fn install(tool: &BioTool, quiet: bool) -> Result<(), ToolError> {
    log::info!("Installing {}", tool.name);
    run_command(tool.install_command, quiet)
}

fn run_command(argv: &[&str], quiet: bool) -> Result<(), ToolError> {
    let (program, args) = argv.split_first().ok_or(ToolError::EmptyCommand)?;
    let command = argv.join(" ");

    let mut cmd = Command::new(program);
    cmd.args(args);
    if quiet {
        cmd.stdout(Stdio::null());
    }

    let status = cmd.status().map_err(|source| ToolError::Launch {
        command: command.clone(),
        source,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(ToolError::Failed { command, status })
    }
}
