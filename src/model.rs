//! State model for the interactive menu.
//!
//! This module contains everything the menu needs to remember between key
//! presses:
//! - which screen is shown and what is selected on it
//! - the active language and the config store it is persisted to
//! - work queued for the controller (tool installs, FASTA formatting)
//!
//! All state transitions are plain methods so they can be tested without a
//! terminal. Anything that blocks or needs the terminal is queued as a
//! [`PendingTask`] and carried out by the controller.

use std::path::PathBuf;

use crate::config::ConfigStore;
use crate::envvars;
use crate::fasta::LineWidth;
use crate::i18n::{Language, Translator};
use crate::seq_task::{default_output_path, parse_width_input, SeqError, SeqJob, SeqResult, SeqSummary};
use crate::t;
use crate::tools::{self, BioTool, ToolError, BIO_TOOLS};
use crate::ui::glyphs::{self, Glyphs};

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Environment,
    Sequence,
    Settings,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Environment,
        MenuItem::Sequence,
        MenuItem::Settings,
        MenuItem::Exit,
    ];

    /// Catalog key of the entry label.
    pub fn label_key(self) -> &'static str {
        match self {
            MenuItem::Environment => "menu_env",
            MenuItem::Sequence => "menu_seq",
            MenuItem::Settings => "menu_settings",
            MenuItem::Exit => "menu_exit",
        }
    }
}

/// Field with keyboard focus in the sequence form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeqField {
    #[default]
    Input,
    Output,
    Width,
}

/// The sequence formatting form. Fields are filled one after the other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeqForm {
    pub field: SeqField,
    pub input: String,
    pub output: String,
    pub width: String,
    /// Large-file warning for the chosen input
    pub warning: Option<String>,
}

impl SeqForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            SeqField::Input => &mut self.input,
            SeqField::Output => &mut self.output,
            SeqField::Width => &mut self.width,
        }
    }
}

/// Severity of a message screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Screens of the interactive menu.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// First-run language picker
    Welcome { selected: usize },
    MainMenu { selected: usize },
    /// Tool list with installed flags; the last entry is "back"
    Environment { selected: usize, installed: Vec<bool> },
    Sequence(SeqForm),
    Language { selected: usize },
    ConfirmExit { yes: bool },
    /// Result screen, dismissed with Enter
    Message(Message),
}

impl Screen {
    /// Whether typed characters go into a text field.
    pub fn accepts_text(&self) -> bool {
        matches!(self, Screen::Sequence(_))
    }
}

/// Work the controller must carry out outside the pure state model.
#[derive(Debug)]
pub enum PendingTask {
    Install(&'static BioTool),
    FormatFasta(SeqJob),
}

/// Function used to check whether an executable is on `PATH`.
pub type Probe = fn(&str) -> bool;

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub translator: Translator,
    pub glyphs: Glyphs,
    config: ConfigStore,
    probe: Probe,
    /// Work queued for the controller
    pub pending: Option<PendingTask>,
    /// Formatting progress as (done, total)
    pub progress: Option<(usize, usize)>,
    /// Printed after the terminal is restored
    pub farewell: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    /// Creates the state from the persisted configuration.
    ///
    /// Without a stored language, the first-run language picker is shown.
    pub fn new(config: ConfigStore) -> Self {
        let doc = config.load();
        let translator = Translator::from_config(&doc);
        let screen = if doc.language().is_none() {
            Screen::Welcome { selected: 0 }
        } else {
            Screen::MainMenu { selected: 0 }
        };

        Self {
            screen,
            translator,
            glyphs: glyphs::detect(),
            config,
            probe: tools::is_installed,
            pending: None,
            progress: None,
            farewell: None,
            should_quit: false,
        }
    }

    /// Replaces the `PATH` probe (used by tests).
    pub fn with_probe(mut self, probe: Probe) -> Self {
        self.probe = probe;
        self
    }

    pub fn text(&self, key: &str) -> String {
        t!(self.translator, key)
    }

    fn show_message(&mut self, kind: MessageKind, text: String) {
        self.screen = Screen::Message(Message::new(kind, text));
    }

    fn go_to_main_menu(&mut self) {
        self.screen = Screen::MainMenu { selected: 0 };
    }

    /// Number of selectable entries on list screens.
    fn entry_count(&self) -> usize {
        match &self.screen {
            Screen::Welcome { .. } | Screen::Language { .. } => Language::ALL.len(),
            Screen::MainMenu { .. } => MenuItem::ALL.len(),
            Screen::Environment { installed, .. } => installed.len() + 1,
            _ => 0,
        }
    }

    fn selected_mut(&mut self) -> Option<&mut usize> {
        match &mut self.screen {
            Screen::Welcome { selected }
            | Screen::MainMenu { selected }
            | Screen::Environment { selected, .. }
            | Screen::Language { selected } => Some(selected),
            _ => None,
        }
    }

    /// Moves the selection up, wrapping around.
    pub fn move_up(&mut self) {
        let count = self.entry_count();
        if let Some(selected) = self.selected_mut() {
            *selected = if *selected == 0 { count - 1 } else { *selected - 1 };
        }
    }

    /// Moves the selection down, wrapping around.
    pub fn move_down(&mut self) {
        let count = self.entry_count();
        if let Some(selected) = self.selected_mut() {
            *selected = (*selected + 1) % count;
        }
    }

    /// Left/right toggle the exit confirmation.
    pub fn toggle(&mut self) {
        if let Screen::ConfirmExit { yes } = &mut self.screen {
            *yes = !*yes;
        }
    }

    /// Handles Enter on the current screen.
    pub fn select(&mut self) {
        match self.screen.clone() {
            Screen::Welcome { selected } => {
                self.choose_language(selected);
                self.go_to_main_menu();
            }
            Screen::MainMenu { selected } => self.open(MenuItem::ALL[selected]),
            Screen::Environment { selected, installed } => self.select_tool(selected, &installed),
            Screen::Sequence(form) => self.advance_form(form),
            Screen::Language { selected } => {
                self.choose_language(selected);
                let saved = self.text("lang_saved");
                self.show_message(MessageKind::Success, saved);
            }
            Screen::ConfirmExit { yes } => {
                if yes {
                    self.quit();
                } else {
                    self.go_to_main_menu();
                }
            }
            Screen::Message(_) => self.go_to_main_menu(),
        }
    }

    /// Handles Esc: leave the current screen without doing anything.
    pub fn back(&mut self) {
        match self.screen {
            Screen::MainMenu { .. } => {
                self.screen = Screen::ConfirmExit { yes: true };
            }
            _ => self.go_to_main_menu(),
        }
    }

    /// Handles Ctrl+C: back to the main menu, or quit from the main menu.
    pub fn interrupt(&mut self) {
        match self.screen {
            Screen::MainMenu { .. } => self.quit(),
            _ => self.go_to_main_menu(),
        }
    }

    pub fn input_char(&mut self, c: char) {
        match &mut self.screen {
            Screen::Sequence(form) => form.focused_mut().push(c),
            Screen::ConfirmExit { yes } => match c {
                'y' | 'Y' => *yes = true,
                'n' | 'N' => *yes = false,
                _ => {}
            },
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Screen::Sequence(form) = &mut self.screen {
            form.focused_mut().pop();
        }
    }

    fn quit(&mut self) {
        self.farewell = Some(self.text("goodbye"));
        self.should_quit = true;
    }

    fn choose_language(&mut self, index: usize) {
        let language = Language::ALL[index];
        if let Err(err) = self.translator.set_language(language.code(), &self.config) {
            log::error!("{err}");
        }
    }

    fn open(&mut self, item: MenuItem) {
        if item == MenuItem::Environment && !(self.probe)("conda") {
            let text = self.text("env_conda_missing");
            self.show_message(MessageKind::Error, text);
            return;
        }

        self.screen = match item {
            MenuItem::Environment => Screen::Environment {
                selected: 0,
                installed: self.probe_tools(),
            },
            MenuItem::Sequence => Screen::Sequence(SeqForm::default()),
            MenuItem::Settings => Screen::Language {
                selected: Language::ALL
                    .iter()
                    .position(|lang| *lang == self.translator.language())
                    .unwrap_or(0),
            },
            MenuItem::Exit => Screen::ConfirmExit { yes: true },
        };
    }

    fn probe_tools(&self) -> Vec<bool> {
        BIO_TOOLS
            .iter()
            .map(|tool| (self.probe)(tool.executable))
            .collect()
    }

    fn select_tool(&mut self, selected: usize, installed: &[bool]) {
        let Some(tool) = BIO_TOOLS.get(selected) else {
            // "Back" entry
            self.go_to_main_menu();
            return;
        };

        if installed[selected] {
            let text = t!(self.translator, "env_already", tool = tool.name);
            self.show_message(MessageKind::Warning, text);
        } else {
            self.pending = Some(PendingTask::Install(tool));
        }
    }

    /// Validates the focused field and moves on; the last field queues the job.
    fn advance_form(&mut self, mut form: SeqForm) {
        match form.field {
            SeqField::Input => {
                let input = form.input.trim().to_string();
                if input.is_empty() {
                    self.go_to_main_menu();
                    return;
                }

                let path = PathBuf::from(&input);
                if !path.exists() {
                    let text = t!(self.translator, "seq_file_not_found", path = input);
                    self.show_message(MessageKind::Error, text);
                    return;
                }

                form.warning = SeqJob::with_width(&path, None, LineWidth::DEFAULT)
                    .ok()
                    .and_then(|job| job.large_file_warning(envvars::large_file_warning_mb()))
                    .map(|size| t!(self.translator, "seq_large_file_warn", size = format!("{size:.0}")));
                if form.output.trim().is_empty() {
                    form.output = default_output_path(&path).display().to_string();
                }
                form.field = SeqField::Output;
            }
            SeqField::Output => {
                if form.output.trim().is_empty() {
                    self.go_to_main_menu();
                    return;
                }
                if form.width.is_empty() {
                    form.width = LineWidth::DEFAULT.to_string();
                }
                form.field = SeqField::Width;
            }
            SeqField::Width => {
                let width = parse_width_input(&form.width);
                let output = PathBuf::from(form.output.trim());
                match SeqJob::with_width(form.input.trim(), Some(output), width) {
                    Ok(job) => self.pending = Some(PendingTask::FormatFasta(job)),
                    Err(err) => self.finish_format(Err(err)),
                }
                return;
            }
        }
        self.screen = Screen::Sequence(form);
    }

    /// Reports the outcome of a tool installation.
    pub fn finish_install(&mut self, tool: &BioTool, result: Result<(), ToolError>) {
        match result {
            Ok(()) => {
                let text = t!(self.translator, "env_install_ok", tool = tool.name);
                self.show_message(MessageKind::Success, text);
            }
            Err(err) => {
                let text = t!(self.translator, "env_install_fail", tool = tool.name, err = err);
                self.show_message(MessageKind::Error, text);
            }
        }
    }

    /// Reports the outcome of a formatting job.
    pub fn finish_format(&mut self, result: SeqResult<SeqSummary>) {
        self.progress = None;
        let (kind, text) = match result {
            Ok(summary) => (
                MessageKind::Success,
                t!(
                    self.translator,
                    "seq_done",
                    count = summary.records,
                    path = summary.output.display()
                ),
            ),
            Err(SeqError::FileNotFound(path)) => (
                MessageKind::Error,
                t!(self.translator, "seq_file_not_found", path = path.display()),
            ),
            Err(SeqError::InvalidFormat(_)) => {
                (MessageKind::Error, self.text("seq_invalid_format"))
            }
            Err(err) => (
                MessageKind::Error,
                t!(self.translator, "error_unexpected", err = err),
            ),
        };
        self.show_message(kind, text);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::tempdir;

    use super::*;

    fn nothing_installed(_: &str) -> bool {
        false
    }

    fn conda_only(executable: &str) -> bool {
        executable == "conda"
    }

    fn conda_and_bwa(executable: &str) -> bool {
        matches!(executable, "conda" | "bwa")
    }

    fn store(root: &Path) -> ConfigStore {
        ConfigStore::with_paths(root.join("cfg"), None)
    }

    /// State past the first-run picker, in English.
    fn state(root: &Path) -> AppState {
        let config = store(root);
        Translator::default().set_language("en", &config).unwrap();
        AppState::new(config).with_probe(conda_only)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.input_char(c);
        }
    }

    #[test]
    fn test_first_run_shows_welcome() {
        let tmp = tempdir().unwrap();
        let mut state = AppState::new(store(tmp.path()));
        assert_eq!(state.screen, Screen::Welcome { selected: 0 });

        state.move_down();
        state.select();

        assert_eq!(state.translator.language(), Language::Zh);
        assert_eq!(state.screen, Screen::MainMenu { selected: 0 });
        assert_eq!(store(tmp.path()).load().language(), Some("zh"));
    }

    #[test]
    fn test_configured_language_skips_welcome() {
        let tmp = tempdir().unwrap();
        let config = store(tmp.path());
        Translator::default().set_language("zh", &config).unwrap();

        let state = AppState::new(config);
        assert_eq!(state.screen, Screen::MainMenu { selected: 0 });
        assert_eq!(state.translator.language(), Language::Zh);
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let tmp = tempdir().unwrap();
        let mut state = state(tmp.path());

        state.move_up();
        assert_eq!(state.screen, Screen::MainMenu { selected: 3 });
        state.move_down();
        assert_eq!(state.screen, Screen::MainMenu { selected: 0 });
    }

    #[test]
    fn test_exit_confirmation() {
        let tmp = tempdir().unwrap();
        let mut state = state(tmp.path());

        state.screen = Screen::MainMenu { selected: 3 };
        state.select();
        assert_eq!(state.screen, Screen::ConfirmExit { yes: true });

        state.input_char('n');
        state.select();
        assert_eq!(state.screen, Screen::MainMenu { selected: 0 });
        assert!(!state.should_quit);

        state.back();
        state.select();
        assert!(state.should_quit);
        assert_eq!(state.farewell.as_deref(), Some("Goodbye!"));
    }

    #[test]
    fn test_interrupt() {
        let tmp = tempdir().unwrap();
        let mut state = state(tmp.path());

        state.screen = Screen::Sequence(SeqForm::default());
        state.interrupt();
        assert_eq!(state.screen, Screen::MainMenu { selected: 0 });
        assert!(!state.should_quit);

        state.interrupt();
        assert!(state.should_quit);
    }

    #[test]
    fn test_environment_requires_conda() {
        let tmp = tempdir().unwrap();
        let mut state = state(tmp.path()).with_probe(nothing_installed);

        state.select();
        match &state.screen {
            Screen::Message(message) => {
                assert_eq!(message.kind, MessageKind::Error);
                assert!(message.text.contains("Conda"));
            }
            other => panic!("unexpected screen: {other:?}"),
        }
    }

    #[test]
    fn test_environment_install_flow() {
        let tmp = tempdir().unwrap();
        let mut state = state(tmp.path()).with_probe(conda_and_bwa);

        state.select();
        assert_eq!(
            state.screen,
            Screen::Environment {
                selected: 0,
                installed: vec![false, false, true, false, false],
            }
        );

        // Already installed
        state.move_down();
        state.move_down();
        state.select();
        assert!(matches!(&state.screen, Screen::Message(m) if m.kind == MessageKind::Warning));
        assert!(state.pending.is_none());

        // Not installed: queued for the controller
        state.select();
        state.select();
        state.select();
        assert!(matches!(state.pending, Some(PendingTask::Install(tool)) if tool.name == "FastQC"));

        state.pending = None;
        state.finish_install(&BIO_TOOLS[0], Ok(()));
        assert!(matches!(&state.screen, Screen::Message(m) if m.text == "FastQC installed successfully."));
    }

    #[test]
    fn test_environment_back_entry() {
        let tmp = tempdir().unwrap();
        let mut state = state(tmp.path());

        state.select();
        state.move_up();
        state.select();
        assert_eq!(state.screen, Screen::MainMenu { selected: 0 });
    }

    #[test]
    fn test_language_settings() {
        let tmp = tempdir().unwrap();
        let mut state = state(tmp.path());

        state.screen = Screen::MainMenu { selected: 2 };
        state.select();
        assert_eq!(state.screen, Screen::Language { selected: 0 });

        state.move_down();
        state.select();
        assert_eq!(state.translator.language(), Language::Zh);
        assert!(matches!(&state.screen, Screen::Message(m) if m.text == "语言偏好已保存。"));
        assert_eq!(store(tmp.path()).load().language(), Some("zh"));
    }

    #[test]
    fn test_sequence_form_flow() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("reads.fasta");
        fs::write(&input, ">a\nacgt\n").unwrap();
        let mut state = state(tmp.path());

        state.screen = Screen::MainMenu { selected: 1 };
        state.select();
        assert!(state.screen.accepts_text());

        type_text(&mut state, input.to_str().unwrap());
        state.select();
        let Screen::Sequence(form) = &state.screen else {
            panic!("expected the sequence form");
        };
        assert_eq!(form.field, SeqField::Output);
        assert_eq!(form.output, tmp.path().join("reads.formatted.fasta").display().to_string());
        assert!(form.warning.is_none());

        state.select();
        state.backspace();
        state.backspace();
        type_text(&mut state, "2");
        state.select();

        match state.pending.take() {
            Some(PendingTask::FormatFasta(job)) => {
                assert_eq!(job.width().get(), 2);
                assert_eq!(job.input(), input.as_path());
            }
            other => panic!("unexpected task: {other:?}"),
        }
    }

    #[test]
    fn test_sequence_form_missing_file() {
        let tmp = tempdir().unwrap();
        let mut state = state(tmp.path());

        state.screen = Screen::Sequence(SeqForm::default());
        type_text(&mut state, &tmp.path().join("missing.fa").display().to_string());
        state.select();
        assert!(matches!(&state.screen, Screen::Message(m) if m.kind == MessageKind::Error));
    }

    #[test]
    fn test_sequence_form_empty_input_returns() {
        let tmp = tempdir().unwrap();
        let mut state = state(tmp.path());

        state.screen = Screen::Sequence(SeqForm::default());
        state.select();
        assert_eq!(state.screen, Screen::MainMenu { selected: 0 });
    }

    #[test]
    fn test_finish_format_messages() {
        let tmp = tempdir().unwrap();
        let mut state = state(tmp.path());

        state.finish_format(Err(SeqError::InvalidFormat(PathBuf::from("x.txt"))));
        assert!(matches!(&state.screen, Screen::Message(m) if m.text == "Invalid FASTA format."));

        state.finish_format(Err(SeqError::FileNotFound(PathBuf::from("gone.fa"))));
        assert!(matches!(&state.screen, Screen::Message(m) if m.text == "File not found: gone.fa"));

        state.finish_format(Ok(SeqSummary {
            input: PathBuf::from("in.fa"),
            output: PathBuf::from("out.fa"),
            records: 3,
            width: 80,
        }));
        assert!(matches!(
            &state.screen,
            Screen::Message(m) if m.text == "Done! 3 sequences formatted and saved to out.fa."
        ));
    }
}
