//! Contracts for the two collaborators that feed the grader: a script reader
//! that pulls paragraphs out of a script document and a transcriber that turns
//! an audio file into text.
//!
//! Retry, fallback and audio decoding strategies belong to the implementations
//! behind these traits; the pipeline only sees a result or a typed error.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a [`Transcriber`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("audio file not found: {0}")]
    AudioNotFound(String),

    #[error("unsupported audio input: {0}")]
    UnsupportedAudio(String),

    #[error("transcription engine failed: {0}")]
    Engine(String),
}

/// Failure reported by a [`ScriptReader`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("script file not found: {0}")]
    ScriptNotFound(String),

    #[error("unsupported script format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read script: {0}")]
    Read(String),
}

/// A time-aligned slice of a transcript. Times are seconds from the start of
/// the audio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl TranscriptSegment {
    /// Start time as `hh:mm:ss.sss`.
    pub fn format_start(&self) -> String {
        format_timestamp(self.start)
    }

    /// End time as `hh:mm:ss.sss`.
    pub fn format_end(&self) -> String {
        format_timestamp(self.end)
    }
}

/// Renders seconds as `hh:mm:ss.sss`, rounded to the millisecond. Negative and
/// non-finite inputs render as zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total_millis = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };
    let millis = total_millis % 1000;
    let total_secs = total_millis / 1000;
    let (hours, minutes, secs) = (total_secs / 3600, (total_secs / 60) % 60, total_secs % 60);
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

/// Output of a [`Transcriber`]. Segments are optional and are passed through
/// to callers untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    pub text: String,
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Transcript without timing information. Surrounding whitespace is
    /// trimmed.
    pub fn from_text(text: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            segments: Vec::new(),
        }
    }
}

/// Speech-to-text engine.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &Path) -> Result<Transcript, TranscriptionError>;
}

/// Reads the reference script as a list of paragraphs in document order.
pub trait ScriptReader: Send + Sync {
    fn read_paragraphs(&self, script: &Path) -> Result<Vec<String>, ExtractionError>;

    /// Whole script as one string: non-blank paragraphs, trimmed and joined
    /// with single spaces.
    fn read_text(&self, script: &Path) -> Result<String, ExtractionError> {
        let paragraphs = self.read_paragraphs(script)?;
        Ok(paragraphs
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// [`ScriptReader`] for UTF-8 plain-text scripts. Every non-blank line is a
/// paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReader;

impl ScriptReader for PlainTextReader {
    fn read_paragraphs(&self, script: &Path) -> Result<Vec<String>, ExtractionError> {
        let content = fs::read_to_string(script).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ExtractionError::ScriptNotFound(script.display().to_string()),
            ErrorKind::InvalidData => ExtractionError::UnsupportedFormat(format!(
                "{} is not valid UTF-8",
                script.display()
            )),
            _ => ExtractionError::Read(err.to_string()),
        })?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn timestamps_render_hours_minutes_seconds_millis() {
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_timestamp(1.5), "00:00:01.500");
        assert_eq!(format_timestamp(61.25), "00:01:01.250");
        assert_eq!(format_timestamp(3723.0004), "01:02:03.000");
        assert_eq!(format_timestamp(-4.0), "00:00:00.000");
        assert_eq!(format_timestamp(f64::NAN), "00:00:00.000");
    }

    #[test]
    fn segment_formats_both_ends() {
        let segment = TranscriptSegment {
            start: 12.0,
            end: 14.75,
            text: "hello".into(),
        };
        assert_eq!(segment.format_start(), "00:00:12.000");
        assert_eq!(segment.format_end(), "00:00:14.750");
    }

    #[test]
    fn transcript_from_text_trims() {
        let transcript = Transcript::from_text("  spoken words \n");
        assert_eq!(transcript.text, "spoken words");
        assert!(transcript.segments.is_empty());
    }

    #[test]
    fn plain_text_reader_splits_lines() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"  First paragraph.\n\n\tSecond one\n   \n")
            .expect("write script");

        let reader = PlainTextReader;
        let paragraphs = reader.read_paragraphs(file.path()).expect("read paragraphs");
        assert_eq!(paragraphs, ["First paragraph.", "Second one"]);
        assert_eq!(
            reader.read_text(file.path()).expect("read text"),
            "First paragraph. Second one"
        );
    }

    #[test]
    fn plain_text_reader_reports_missing_file() {
        let err = PlainTextReader
            .read_paragraphs(Path::new("/definitely/not/here.txt"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ExtractionError::ScriptNotFound(_)));
    }

    #[test]
    fn plain_text_reader_rejects_non_utf8() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&[0xff, 0xfe, 0x00]).expect("write bytes");
        let err = PlainTextReader
            .read_paragraphs(file.path())
            .expect_err("binary file should fail");
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }
}
