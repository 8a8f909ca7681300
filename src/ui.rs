//! TUI rendering module.
//!
//! Every screen shares the same frame:
//! - a banner with the program name, version and title
//! - the screen body (menu, form, message or progress gauge)
//! - a one-line key hint at the bottom

pub mod glyphs;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::i18n::Language;
use crate::model::{AppState, MenuItem, MessageKind, Screen, SeqField, SeqForm};
use crate::t;
use crate::tools::BIO_TOOLS;

/// Height of the banner, including borders.
const HEADER_HEIGHT: u16 = 4;
/// Height of the key hint line.
const FOOTER_HEIGHT: u16 = 1;
/// Shown before any language is chosen, so it is in both.
const WELCOME_TITLE: &str = "Welcome / 欢迎";

fn banner_title() -> String {
    format!("BioFlow-CLI v{}", env!("CARGO_PKG_VERSION"))
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, state, layout[0]);

    if let Some((done, total)) = state.progress {
        render_progress(frame, state, layout[1], done, total);
    } else {
        render_body(frame, state, layout[1]);
    }

    render_footer(frame, state, layout[2]);
}

fn render_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            banner_title(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(Span::styled(
            state.text("app_title"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.translator.language().label(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_body(frame: &mut Frame, state: &AppState, area: Rect) {
    let (title, lines) = match &state.screen {
        Screen::Welcome { selected } => (
            WELCOME_TITLE.to_string(),
            language_lines(state, &state.text("lang_prompt"), *selected),
        ),
        Screen::MainMenu { selected } => (String::new(), main_menu_lines(state, *selected)),
        Screen::Environment { selected, installed } => (
            state.text("env_title"),
            environment_lines(state, *selected, installed),
        ),
        Screen::Sequence(form) => (state.text("seq_title"), form_lines(state, form)),
        Screen::Language { selected } => (
            state.text("menu_settings"),
            language_lines(state, &state.text("lang_prompt"), *selected),
        ),
        Screen::ConfirmExit { yes } => (String::new(), confirm_lines(state, *yes)),
        Screen::Message(message) => (
            String::new(),
            message_lines(&message.text, message.kind, area.width.saturating_sub(4)),
        ),
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// A selectable entry, highlighted with the cursor glyph when selected.
fn entry<'a>(state: &AppState, label: String, selected: bool) -> Line<'a> {
    if selected {
        Line::from(Span::styled(
            format!("{} {}", state.glyphs.cursor, label),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(format!("  {label}"))
    }
}

fn prompt_line<'a>(text: String) -> Line<'a> {
    Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
}

fn main_menu_lines<'a>(state: &AppState, selected: usize) -> Vec<Line<'a>> {
    let mut lines = vec![prompt_line(state.text("menu_prompt")), Line::default()];
    lines.extend(
        MenuItem::ALL
            .iter()
            .enumerate()
            .map(|(i, item)| entry(state, state.text(item.label_key()), i == selected)),
    );
    lines
}

fn language_lines<'a>(state: &AppState, prompt: &str, selected: usize) -> Vec<Line<'a>> {
    let mut lines = vec![prompt_line(prompt.to_string()), Line::default()];
    lines.extend(
        Language::ALL
            .iter()
            .enumerate()
            .map(|(i, lang)| entry(state, lang.label().to_string(), i == selected)),
    );
    lines
}

fn environment_lines<'a>(state: &AppState, selected: usize, installed: &[bool]) -> Vec<Line<'a>> {
    let mut lines = vec![prompt_line(state.text("env_select_tool")), Line::default()];

    for (i, (tool, installed)) in BIO_TOOLS.iter().zip(installed).enumerate() {
        let (symbol, color) = if *installed {
            (state.glyphs.ok, Color::Green)
        } else {
            (state.glyphs.fail, Color::Red)
        };
        let mut line = entry(state, tool.name.to_string(), i == selected);
        line.spans
            .push(Span::styled(format!("  {symbol}"), Style::default().fg(color)));
        lines.push(line);
    }

    lines.push(entry(state, state.text("env_back"), selected == installed.len()));
    lines
}

fn form_lines<'a>(state: &AppState, form: &SeqForm) -> Vec<Line<'a>> {
    let fields = [
        (SeqField::Input, "seq_input_prompt", &form.input),
        (SeqField::Output, "seq_output_prompt", &form.output),
        (SeqField::Width, "seq_wrap_prompt", &form.width),
    ];

    let mut lines = Vec::new();
    for (field, prompt_key, value) in fields {
        let focused = field == form.field;
        let reached = field as usize <= form.field as usize;
        if !reached {
            lines.push(Line::from(Span::styled(
                state.text(prompt_key),
                Style::default().fg(Color::DarkGray),
            )));
            continue;
        }

        lines.push(prompt_line(state.text(prompt_key)));
        let value_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let caret = if focused { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", state.glyphs.cursor)),
            Span::styled(format!("{value}{caret}"), value_style),
        ]));
    }

    if let Some(warning) = &form.warning {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            warning.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    lines
}

fn confirm_lines<'a>(state: &AppState, yes: bool) -> Vec<Line<'a>> {
    let option = |label: String, active: bool| {
        if active {
            Span::styled(
                format!("[ {label} ]"),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            )
        } else {
            Span::raw(format!("  {label}  "))
        }
    };

    vec![
        prompt_line(state.text("confirm_exit")),
        Line::default(),
        Line::from(vec![
            option(state.text("yes"), yes),
            Span::raw("   "),
            option(state.text("no"), !yes),
        ]),
    ]
}

fn message_lines<'a>(text: &str, kind: MessageKind, width: u16) -> Vec<Line<'a>> {
    let color = match kind {
        MessageKind::Success => Color::Green,
        MessageKind::Warning => Color::Yellow,
        MessageKind::Error => Color::Red,
    };
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);

    textwrap::wrap(text, usize::from(width.max(10)))
        .into_iter()
        .map(|line| Line::from(Span::styled(line.into_owned(), style)))
        .collect()
}

fn render_progress(frame: &mut Frame, state: &AppState, area: Rect, done: usize, total: usize) {
    let ratio = if total == 0 {
        1.0
    } else {
        (done as f64 / total as f64).clamp(0.0, 1.0)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(state.text("seq_processing")),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .label(format!("{done}/{total}"))
        .ratio(ratio);

    let height = area.height.min(3);
    frame.render_widget(gauge, Rect { height, ..area });
}

fn render_footer(frame: &mut Frame, state: &AppState, area: Rect) {
    let hint = match &state.screen {
        Screen::Sequence(_) | Screen::ConfirmExit { .. } => t!(state.translator, "hint_form"),
        Screen::Message(_) => t!(state.translator, "press_enter"),
        _ => t!(state.translator, "hint_list"),
    };

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {hint}"),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, area);
}
