//! FASTA parser and formatter.
//!
//! This module turns raw FASTA text into records and writes them back in a
//! canonical layout: header line unchanged, sequence uppercased and wrapped
//! at a fixed width.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```
//!
//! Parsing never fails. Text without any header simply yields no records,
//! and callers decide how to report that.

use std::fmt;
use std::num::NonZeroUsize;

/// A single FASTA entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The full header line, including the leading '>' and any description
    pub header: String,
    /// Sequence data with all whitespace removed (may be empty)
    pub sequence: String,
}

impl Record {
    /// Creates a new record.
    pub fn new(header: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            sequence: sequence.into(),
        }
    }
}

/// Line width used when wrapping sequence data. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineWidth(NonZeroUsize);

impl LineWidth {
    /// The conventional 80-column layout.
    pub const DEFAULT: LineWidth = match NonZeroUsize::new(80) {
        Some(width) => LineWidth(width),
        None => unreachable!(),
    };

    /// Returns `None` for a zero width.
    pub fn new(width: usize) -> Option<Self> {
        NonZeroUsize::new(width).map(Self)
    }

    /// Clamps any caller-supplied value below 1 up to 1.
    pub fn clamped(width: i64) -> Self {
        let width = usize::try_from(width.max(1)).unwrap_or(usize::MAX);
        Self(NonZeroUsize::new(width).unwrap_or(NonZeroUsize::MIN))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for LineWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LineWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Characters that end a line: LF, CR, and the rarer Unicode line and
/// record separators.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Parses FASTA text into records, in file order.
///
/// Lines are split on any of the line breaks above (so `\r\n` and a lone
/// `\r` both work), trimmed, and skipped when blank. Sequence lines seen before the first header are dropped, while a
/// header with no sequence lines still produces a record with an empty
/// sequence.
///
/// # Examples
///
/// ```
/// use bioflow::fasta::parse_fasta;
///
/// let records = parse_fasta(">seq1\nAC GT\nTT\n>seq2\n");
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].sequence, "ACGTTT");
/// assert_eq!(records[1].sequence, "");
/// ```
pub fn parse_fasta(text: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut current_header: Option<&str> = None;
    let mut current_seq = String::new();

    for line in text.split(LINE_BREAKS) {
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if line.starts_with('>') {
            if let Some(header) = current_header.take() {
                records.push(Record::new(header, std::mem::take(&mut current_seq)));
            }
            current_header = Some(line);
        } else if current_header.is_some() {
            // Most lines carry no internal whitespace
            if line.chars().any(char::is_whitespace) {
                current_seq.extend(line.chars().filter(|c| !c.is_whitespace()));
            } else {
                current_seq.push_str(line);
            }
        }
    }

    // Don't forget the last record
    if let Some(header) = current_header {
        records.push(Record::new(header, current_seq));
    }

    log::debug!("parsed {} FASTA records", records.len());
    records
}

/// Splits a sequence into lines of exactly `width` characters.
///
/// The final line may be shorter. An empty sequence yields an empty string
/// (zero lines, not one blank line).
pub fn wrap_sequence(seq: &str, width: LineWidth) -> String {
    let width = width.get();
    let mut wrapped = String::with_capacity(seq.len() + seq.len() / width);

    for (i, c) in seq.chars().enumerate() {
        if i > 0 && i % width == 0 {
            wrapped.push('\n');
        }
        wrapped.push(c);
    }

    wrapped
}

/// Formats records as canonical FASTA text.
///
/// Each header is written verbatim, followed by the uppercased sequence
/// wrapped at `width`. The output ends with a single trailing newline.
pub fn format_fasta(records: &[Record], width: LineWidth) -> String {
    format_fasta_with_progress(records, width, |_, _| {})
}

/// Same as [`format_fasta`], calling `on_record(done, total)` after each
/// record is formatted.
pub fn format_fasta_with_progress<F>(records: &[Record], width: LineWidth, mut on_record: F) -> String
where
    F: FnMut(usize, usize),
{
    let total = records.len();
    let mut lines: Vec<String> = Vec::with_capacity(total * 2);

    for (i, record) in records.iter().enumerate() {
        lines.push(record.header.clone());

        let wrapped = wrap_sequence(&record.sequence.to_uppercase(), width);
        if !wrapped.is_empty() {
            lines.push(wrapped);
        }

        on_record(i + 1, total);
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
