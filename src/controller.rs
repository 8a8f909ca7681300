//! Application controller.
//!
//! This module orchestrates the interactive menu:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - Running the tasks the state model queues (installs, formatting)

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    style::Stylize,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::event::{apply_action, handle_event, poll_event};
use crate::fasta;
use crate::model::{AppState, PendingTask};
use crate::seq_task::{SeqJob, SeqResult, SeqSummary};
use crate::t;
use crate::tools;
use crate::ui::render;

/// Redraw the progress gauge at most this many times per job.
const PROGRESS_STEPS: usize = 100;

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.terminal.draw(|frame| {
                render(frame, &self.state);
            })?;

            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event, &self.state.screen);
                if !apply_action(&mut self.state, action) {
                    break;
                }
            }

            if let Some(task) = self.state.pending.take() {
                self.run_task(task)?;
            }
        }

        Ok(())
    }

    /// Consumes the app, restoring the terminal, and returns the farewell line.
    pub fn finish(mut self) -> Option<String> {
        self.state.farewell.take()
    }

    fn run_task(&mut self, task: PendingTask) -> Result<()> {
        match task {
            PendingTask::Install(tool) => {
                let banner = t!(self.state.translator, "env_installing", tool = tool.name);
                let result = self.suspended(|| {
                    println!("{}", banner.cyan());
                    tools::install(tool, false)
                })?;
                self.state.finish_install(tool, result);
            }
            PendingTask::FormatFasta(job) => {
                let result = self.format(&job);
                self.state.finish_format(result);
            }
        }
        Ok(())
    }

    /// Runs `f` on the normal screen so a subprocess can use the terminal.
    fn suspended<T>(&mut self, f: impl FnOnce() -> T) -> Result<T> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;

        let value = f();
        io::stdout().flush()?;

        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.clear()?;
        Ok(value)
    }

    /// Formats a file while showing a progress gauge.
    fn format(&mut self, job: &SeqJob) -> SeqResult<SeqSummary> {
        let records = job.load_records()?;
        let total = records.len();
        let step = (total / PROGRESS_STEPS).max(1);

        let terminal = &mut self.terminal;
        let state = &mut self.state;
        state.progress = Some((0, total));

        let formatted = fasta::format_fasta_with_progress(&records, job.width(), |done, total| {
            if done % step == 0 || done == total {
                state.progress = Some((done, total));
                if let Err(err) = terminal.draw(|frame| render(frame, state)) {
                    log::debug!("progress redraw failed: {err}");
                }
            }
        });

        job.write(&formatted)?;
        Ok(job.summary(total))
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the interactive menu until the user quits.
///
/// Returns the farewell message, printed by the caller once the terminal is
/// back to normal.
pub fn run_app(state: AppState) -> Result<Option<String>> {
    let mut app = App::new(state)?;
    app.run()?;
    Ok(app.finish())
}
