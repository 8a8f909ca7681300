//! Non-interactive command line.
//!
//! ```bash
//! bioflow seq -i reads.fasta -o clean.fasta -w 60
//! bioflow --json env --list
//! bioflow env --install bwa
//! ```
//!
//! Results go to stdout (one JSON object per invocation with `--json`);
//! progress, warnings and errors go to stderr. `--json` implies `--quiet`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use serde_json::{json, Value};

use crate::envvars;
use crate::i18n::Translator;
use crate::seq_task::{SeqError, SeqJob};
use crate::t;
use crate::tools::{self, BioTool};
use crate::ui::glyphs::{self, Glyphs};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_RUNTIME_ERROR: i32 = 1;
pub const EXIT_ARGUMENT_ERROR: i32 = 2;
pub const EXIT_DEPENDENCY_MISSING: i32 = 3;

/// BioFlow - bioinformatics workflow helper
///
/// Without a subcommand, opens the interactive menu.
#[derive(Parser, Debug)]
#[command(name = "bioflow", author, version, about, long_about = None)]
pub struct Cli {
    /// Suppress progress messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output results in JSON format (implies --quiet)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Format FASTA sequences
    Seq(SeqArgs),
    /// Manage bioinformatics tools
    Env(EnvArgs),
}

#[derive(Args, Debug)]
pub struct SeqArgs {
    /// Input FASTA file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file (default: <input>.formatted.fasta)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Line width
    #[arg(short, long, default_value_t = 80, allow_negative_numbers = true)]
    pub width: i64,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct EnvArgs {
    /// List all tools and their status
    #[arg(short, long)]
    pub list: bool,

    /// Install a specific tool
    #[arg(short, long, value_name = "TOOL")]
    pub install: Option<String>,
}

/// Where command output goes and how verbose it is.
struct Reporter<'a> {
    tr: &'a Translator,
    quiet: bool,
    json: bool,
    glyphs: Glyphs,
}

impl Reporter<'_> {
    fn progress(&self, message: String) {
        if !self.quiet {
            eprintln!("{}", message.cyan());
        }
    }

    fn success(&self, message: String) {
        if !self.quiet {
            eprintln!("{}", message.green().bold());
        }
    }

    fn warning(&self, message: String) {
        if !self.quiet {
            eprintln!("{}", message.yellow().bold());
        }
    }

    /// Errors are shown even in quiet mode.
    fn error(&self, message: String) {
        eprintln!("{}", message.red().bold());
    }
}

fn emit<W: Write>(out: &mut W, value: Value) -> io::Result<()> {
    writeln!(out, "{value}")
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Runs a subcommand and returns the process exit code.
///
/// `out` receives results (JSON objects or the tool list).
pub fn run<W: Write>(cli: &Cli, tr: &Translator, out: &mut W) -> i32 {
    let reporter = Reporter {
        tr,
        quiet: cli.quiet || cli.json,
        json: cli.json,
        glyphs: glyphs::detect(),
    };

    let result = match &cli.command {
        Some(Command::Seq(args)) => cmd_seq(args, &reporter, out),
        Some(Command::Env(args)) => match &args.install {
            Some(tool) => cmd_env_install(tool, &reporter, out),
            None => cmd_env_list(&reporter, out),
        },
        None => Ok(EXIT_ARGUMENT_ERROR),
    };

    result.unwrap_or_else(|err| {
        log::error!("Cannot write output: {err}");
        EXIT_RUNTIME_ERROR
    })
}

fn cmd_seq<W: Write>(args: &SeqArgs, r: &Reporter<'_>, out: &mut W) -> io::Result<i32> {
    let tr = r.tr;

    let job = match SeqJob::prepare(&args.input, args.output.clone(), args.width) {
        Ok(job) => job,
        Err(SeqError::FileNotFound(path)) => {
            if r.json {
                emit(out, json!({"error": "file_not_found", "path": display(&path)}))?;
            } else {
                r.error(t!(tr, "seq_file_not_found", path = path.display()));
            }
            return Ok(EXIT_ARGUMENT_ERROR);
        }
        Err(SeqError::InvalidWidth(width)) => {
            if r.json {
                emit(out, json!({"error": "invalid_width", "width": width}))?;
            } else {
                r.error(t!(tr, "seq_invalid_width", width = width));
            }
            return Ok(EXIT_ARGUMENT_ERROR);
        }
        Err(err) => return runtime_error(&err, r, out),
    };

    if let Some(size) = job.large_file_warning(envvars::large_file_warning_mb()) {
        r.warning(t!(tr, "seq_large_file_warn", size = format!("{size:.0}")));
    }
    r.progress(t!(tr, "seq_processing"));

    match job.run() {
        Ok(summary) => {
            if r.json {
                emit(
                    out,
                    json!({
                        "status": "success",
                        "input": display(&summary.input),
                        "output": display(&summary.output),
                        "records": summary.records,
                        "width": summary.width,
                    }),
                )?;
            } else {
                r.success(t!(
                    tr,
                    "seq_done",
                    count = summary.records,
                    path = summary.output.display()
                ));
            }
            Ok(EXIT_SUCCESS)
        }
        Err(SeqError::InvalidFormat(path)) => {
            if r.json {
                emit(out, json!({"error": "invalid_format", "path": display(&path)}))?;
            } else {
                r.error(t!(tr, "seq_invalid_format"));
            }
            Ok(EXIT_RUNTIME_ERROR)
        }
        Err(err) => runtime_error(&err, r, out),
    }
}

fn runtime_error<W: Write>(err: &SeqError, r: &Reporter<'_>, out: &mut W) -> io::Result<i32> {
    if r.json {
        emit(out, json!({"error": "runtime_error", "message": err.to_string()}))?;
    } else {
        r.error(t!(r.tr, "error_unexpected", err = err));
    }
    Ok(EXIT_RUNTIME_ERROR)
}

/// Lists tool status. Does not require conda.
fn cmd_env_list<W: Write>(r: &Reporter<'_>, out: &mut W) -> io::Result<i32> {
    let statuses = tools::tool_statuses();

    if r.json {
        emit(out, json!({ "tools": statuses }))?;
    } else {
        for status in &statuses {
            let symbol = if status.installed { r.glyphs.ok } else { r.glyphs.fail };
            writeln!(out, "{symbol} {}", status.name)?;
        }
    }

    Ok(EXIT_SUCCESS)
}

fn cmd_env_install<W: Write>(name: &str, r: &Reporter<'_>, out: &mut W) -> io::Result<i32> {
    let tr = r.tr;

    if !tools::conda_available() {
        if r.json {
            emit(out, json!({"error": "conda_missing"}))?;
        } else {
            r.error(t!(tr, "env_conda_missing"));
            eprintln!("{}", t!(tr, "env_conda_hint"));
        }
        return Ok(EXIT_DEPENDENCY_MISSING);
    }

    let Some(tool) = tools::find_tool(name) else {
        if r.json {
            emit(out, json!({"error": "unknown_tool", "tool": name}))?;
        } else {
            r.error(t!(tr, "env_unknown_tool", tool = name));
            eprintln!(
                "{}",
                t!(tr, "env_available_tools", tools = tools::tool_names().join(", "))
            );
        }
        return Ok(EXIT_ARGUMENT_ERROR);
    };

    if tools::is_installed(tool.executable) {
        if r.json {
            emit(out, json!({"status": "already_installed", "tool": tool.name}))?;
        } else {
            r.warning(t!(tr, "env_already", tool = tool.name));
        }
        return Ok(EXIT_SUCCESS);
    }

    install_tool(tool, r, out)
}

fn install_tool<W: Write>(tool: &BioTool, r: &Reporter<'_>, out: &mut W) -> io::Result<i32> {
    let tr = r.tr;
    r.progress(t!(tr, "env_installing", tool = tool.name));

    match tools::install(tool, r.quiet) {
        Ok(()) => {
            if r.json {
                emit(out, json!({"status": "success", "tool": tool.name}))?;
            } else {
                r.success(t!(tr, "env_install_ok", tool = tool.name));
            }
            Ok(EXIT_SUCCESS)
        }
        Err(err) => {
            if r.json {
                emit(
                    out,
                    json!({"error": "install_failed", "tool": tool.name, "message": err.to_string()}),
                )?;
            } else {
                r.error(t!(tr, "env_install_fail", tool = tool.name, err = err));
            }
            Ok(EXIT_RUNTIME_ERROR)
        }
    }
}
