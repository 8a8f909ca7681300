//! FASTA formatting job.
//!
//! Validates the request, reads the input, reformats it and writes the
//! result. Both the command line and the interactive menu go through
//! [`SeqJob`], so they report the same error conditions and produce the
//! same bytes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::fasta::{self, LineWidth, Record};

/// Errors that can occur while formatting a file.
#[derive(Error, Debug)]
pub enum SeqError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Width must be positive (got {0})")]
    InvalidWidth(i64),

    #[error("Invalid FASTA format: {}", .0.display())]
    InvalidFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for formatting jobs.
pub type SeqResult<T> = Result<T, SeqError>;

/// `reads.fasta` becomes `reads.formatted.fasta`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("formatted.fasta")
}

/// Interprets a width typed in the interactive form.
///
/// Anything but a plain non-negative integer means the default of 80; zero
/// is clamped up to 1.
pub fn parse_width_input(raw: &str) -> LineWidth {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return LineWidth::DEFAULT;
    }

    match raw.parse::<usize>() {
        Ok(width) => LineWidth::new(width).unwrap_or(LineWidth::clamped(1)),
        Err(_) => LineWidth::DEFAULT,
    }
}

/// What a finished job did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeqSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub records: usize,
    pub width: usize,
}

/// A validated formatting request.
#[derive(Debug, Clone)]
pub struct SeqJob {
    input: PathBuf,
    output: PathBuf,
    width: LineWidth,
    size_bytes: u64,
}

impl SeqJob {
    /// Validates a request: the input must exist, then the width must be positive.
    ///
    /// Without `output`, the result goes to [`default_output_path`].
    pub fn prepare(input: impl Into<PathBuf>, output: Option<PathBuf>, width: i64) -> SeqResult<Self> {
        let input = input.into();
        if !input.exists() {
            return Err(SeqError::FileNotFound(input));
        }

        let width = usize::try_from(width)
            .ok()
            .and_then(LineWidth::new)
            .ok_or(SeqError::InvalidWidth(width))?;

        Self::with_width(input, output, width)
    }

    /// Like [`SeqJob::prepare`] for a width that is already known to be valid.
    pub fn with_width(input: impl Into<PathBuf>, output: Option<PathBuf>, width: LineWidth) -> SeqResult<Self> {
        let input = input.into();
        let size_bytes = match fs::metadata(&input) {
            Ok(metadata) => metadata.len(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(SeqError::FileNotFound(input));
            }
            Err(err) => return Err(err.into()),
        };
        let output = output.unwrap_or_else(|| default_output_path(&input));

        Ok(Self {
            input,
            output,
            width,
            size_bytes,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn width(&self) -> LineWidth {
        self.width
    }

    /// Input size in MiB.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }

    /// Returns the size in MiB when it exceeds `threshold_mb`.
    pub fn large_file_warning(&self, threshold_mb: i64) -> Option<f64> {
        let size = self.size_mb();
        (size > threshold_mb as f64).then_some(size)
    }

    /// Reads and parses the input. No records at all is an invalid format.
    ///
    /// The input may have disappeared since the job was prepared.
    pub fn load_records(&self) -> SeqResult<Vec<Record>> {
        let text = match fs::read_to_string(&self.input) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(SeqError::FileNotFound(self.input.clone()));
            }
            Err(err) => return Err(err.into()),
        };
        let records = fasta::parse_fasta(&text);
        if records.is_empty() {
            return Err(SeqError::InvalidFormat(self.input.clone()));
        }
        Ok(records)
    }

    /// Writes formatted text to the output path, replacing any existing file.
    pub fn write(&self, formatted: &str) -> SeqResult<()> {
        fs::write(&self.output, formatted)?;
        log::debug!("wrote {} bytes to {}", formatted.len(), self.output.display());
        Ok(())
    }

    pub fn summary(&self, records: usize) -> SeqSummary {
        SeqSummary {
            input: self.input.clone(),
            output: self.output.clone(),
            records,
            width: self.width.get(),
        }
    }

    /// Loads, formats and writes in a single pass.
    pub fn run(&self) -> SeqResult<SeqSummary> {
        let records = self.load_records()?;
        let formatted = fasta::format_fasta(&records, self.width);
        self.write(&formatted)?;
        Ok(self.summary(records.len()))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    const SAMPLE: &str = ">seq1\nATCGATCG\n>seq2\nGGCCGGCC\n";

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("data/reads.fasta")),
            PathBuf::from("data/reads.formatted.fasta")
        );
        assert_eq!(
            default_output_path(Path::new("reads")),
            PathBuf::from("reads.formatted.fasta")
        );
    }

    #[test]
    fn test_parse_width_input() {
        assert_eq!(parse_width_input("60").get(), 60);
        assert_eq!(parse_width_input("").get(), 80);
        assert_eq!(parse_width_input("abc").get(), 80);
        assert_eq!(parse_width_input("-5").get(), 80);
        assert_eq!(parse_width_input("0").get(), 1);
        assert_eq!(parse_width_input(" 12 ").get(), 12);
    }

    #[test]
    fn test_missing_input() {
        let tmp = tempdir().unwrap();
        let result = SeqJob::prepare(tmp.path().join("missing.fasta"), None, 80);
        assert!(matches!(result, Err(SeqError::FileNotFound(_))));

        // Existence is checked before the width
        let result = SeqJob::prepare(tmp.path().join("missing.fasta"), None, 0);
        assert!(matches!(result, Err(SeqError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_width() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("in.fasta");
        fs::write(&input, SAMPLE).unwrap();

        assert!(matches!(SeqJob::prepare(&input, None, 0), Err(SeqError::InvalidWidth(0))));
        assert!(matches!(SeqJob::prepare(&input, None, -5), Err(SeqError::InvalidWidth(-5))));
    }

    #[test]
    fn test_run_formats_file() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("in.fasta");
        let output = tmp.path().join("out.fasta");
        fs::write(&input, SAMPLE).unwrap();

        let job = SeqJob::prepare(&input, Some(output.clone()), 4).unwrap();
        let summary = job.run().unwrap();

        assert_eq!(summary.records, 2);
        assert_eq!(summary.width, 4);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            ">seq1\nATCG\nATCG\n>seq2\nGGCC\nGGCC\n"
        );
    }

    #[test]
    fn test_run_default_output() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("reads.fasta");
        fs::write(&input, ">a\nacgt\n").unwrap();

        let job = SeqJob::prepare(&input, None, 80).unwrap();
        job.run().unwrap();

        let expected = tmp.path().join("reads.formatted.fasta");
        assert_eq!(job.output(), expected.as_path());
        assert_eq!(fs::read_to_string(expected).unwrap(), ">a\nACGT\n");
    }

    #[test]
    fn test_invalid_format_writes_nothing() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("notes.txt");
        let output = tmp.path().join("out.fasta");
        fs::write(&input, "This is not a FASTA file\nNo headers here\n").unwrap();

        let job = SeqJob::prepare(&input, Some(output.clone()), 80).unwrap();
        assert!(matches!(job.run(), Err(SeqError::InvalidFormat(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_input_removed_after_prepare() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("in.fasta");
        let output = tmp.path().join("out.fasta");
        fs::write(&input, SAMPLE).unwrap();

        let job = SeqJob::prepare(&input, Some(output.clone()), 80).unwrap();
        fs::remove_file(&input).unwrap();

        assert!(matches!(job.run(), Err(SeqError::FileNotFound(path)) if path == input));
        assert!(!output.exists());
    }

    #[test]
    fn test_large_file_warning() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("in.fasta");
        fs::write(&input, SAMPLE).unwrap();

        let job = SeqJob::prepare(&input, None, 80).unwrap();
        assert!(job.large_file_warning(500).is_none());
        assert!(job.large_file_warning(0).is_some());
        assert!(job.large_file_warning(-1).is_some());
    }
}
