//! Workspace umbrella crate for script-versus-transcript reading checks.
//!
//! This crate stitches together word normalization, sequence alignment and
//! grading so callers can compare a script with a speech-to-text transcript
//! through a single API entry point, at word or paragraph granularity.

mod collaborators;
mod config;

pub use align::{MatchingBlock, OpTag, Opcode, SequenceMatcher, align, similarity};
pub use canonical::{
    CanonicalError, CanonicalizeConfig, Granularity, UnitSequence, collapse_whitespace,
    normalize_and_split,
};
pub use grader::{
    AccuracyReport, ClassificationRecord, GradeConfig, GradeError, Grader, Label, MarkupConfig,
    ParagraphDiffResult, ParagraphOptions, ParagraphStatus, RecordPage, aggregate, classify,
    highlight,
};

pub use crate::collaborators::{
    ExtractionError, PlainTextReader, ScriptReader, Transcriber, Transcript, TranscriptSegment,
    TranscriptionError, format_timestamp,
};
pub use crate::config::{AnalysisConfig, ConfigLoadError};

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};
use tracing::{Level, info, warn};

/// Errors that can occur while running an analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Grade(GradeError),
    Transcription(TranscriptionError),
    Extraction(ExtractionError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Grade(err) => write!(f, "grading failure: {err}"),
            PipelineError::Transcription(err) => write!(f, "transcription failure: {err}"),
            PipelineError::Extraction(err) => write!(f, "script extraction failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Grade(err) => Some(err),
            PipelineError::Transcription(err) => Some(err),
            PipelineError::Extraction(err) => Some(err),
        }
    }
}

impl From<GradeError> for PipelineError {
    fn from(value: GradeError) -> Self {
        PipelineError::Grade(value)
    }
}

impl From<CanonicalError> for PipelineError {
    fn from(value: CanonicalError) -> Self {
        PipelineError::Grade(GradeError::Canonical(value))
    }
}

impl From<TranscriptionError> for PipelineError {
    fn from(value: TranscriptionError) -> Self {
        PipelineError::Transcription(value)
    }
}

impl From<ExtractionError> for PipelineError {
    fn from(value: ExtractionError) -> Self {
        PipelineError::Extraction(value)
    }
}

/// Metrics observer for the two analysis passes.
pub trait AnalysisMetrics: Send + Sync {
    fn record_words(&self, latency: Duration, result: Result<(), PipelineError>);
    fn record_paragraphs(&self, latency: Duration, result: Result<(), PipelineError>);
}

/// Install or clear the global analysis metrics recorder.
pub fn set_analysis_metrics(recorder: Option<Arc<dyn AnalysisMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn AnalysisMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn AnalysisMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn AnalysisMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn AnalysisMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_words<T>(self, result: &Result<T, PipelineError>) {
        self.recorder
            .record_words(self.start.elapsed(), outcome(result));
    }

    fn record_paragraphs<T>(self, result: &Result<T, PipelineError>) {
        self.recorder
            .record_paragraphs(self.start.elapsed(), outcome(result));
    }
}

fn outcome<T>(result: &Result<T, PipelineError>) -> Result<(), PipelineError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) => Err(err.clone()),
    }
}

/// Word-level comparison with default configuration.
///
/// ```
/// let report = scriptcheck::analyze_words("The quick fox.", "the slow fox").unwrap();
/// assert_eq!(report.wrong_count, 1);
/// ```
pub fn analyze_words(
    reference_text: &str,
    candidate_text: &str,
) -> Result<AccuracyReport, PipelineError> {
    analyze_words_with_config(reference_text, candidate_text, &AnalysisConfig::default())
}

/// Word-level comparison: per-word records plus aggregate accuracy.
pub fn analyze_words_with_config(
    reference_text: &str,
    candidate_text: &str,
    cfg: &AnalysisConfig,
) -> Result<AccuracyReport, PipelineError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "scriptcheck.analyze_words",
        reference_bytes = reference_text.len(),
        candidate_bytes = candidate_text.len()
    );
    let _guard = span.enter();
    let metrics = MetricsSpan::start();

    let result = cfg
        .grader()
        .map(|grader| grader.analyze_words(reference_text, candidate_text))
        .map_err(PipelineError::from);

    let elapsed_micros = start.elapsed().as_micros();
    match &result {
        Ok(report) => info!(
            total_reference_units = report.total_reference_units,
            correct = report.correct_count,
            wrong = report.wrong_count,
            missing = report.missing_count,
            extra = report.extra_count,
            accuracy = report.accuracy_percentage,
            elapsed_micros,
            "analyze_words_success"
        ),
        Err(err) => warn!(error = %err, elapsed_micros, "analyze_words_failure"),
    }
    if let Some(metrics) = metrics {
        metrics.record_words(&result);
    }
    result
}

/// Paragraph-level comparison with default configuration.
pub fn analyze_paragraphs(
    reference_text: &str,
    candidate_text: &str,
    reference_paragraphs_hint: Option<&[String]>,
) -> Result<Vec<ParagraphDiffResult>, PipelineError> {
    analyze_paragraphs_with_config(
        reference_text,
        candidate_text,
        reference_paragraphs_hint,
        &AnalysisConfig::default(),
    )
}

/// Paragraph-level comparison with highlighted markup for each pair.
///
/// `reference_paragraphs_hint` carries paragraphs read from the script
/// document; when absent the reference text is split at sentence ends and
/// newlines like the transcript.
pub fn analyze_paragraphs_with_config(
    reference_text: &str,
    candidate_text: &str,
    reference_paragraphs_hint: Option<&[String]>,
    cfg: &AnalysisConfig,
) -> Result<Vec<ParagraphDiffResult>, PipelineError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "scriptcheck.analyze_paragraphs",
        reference_bytes = reference_text.len(),
        candidate_bytes = candidate_text.len(),
        hinted = reference_paragraphs_hint.is_some(),
        single = cfg.paragraphs.force_single_paragraph
    );
    let _guard = span.enter();
    let metrics = MetricsSpan::start();

    let result = cfg
        .grader()
        .map(|grader| {
            grader.analyze_paragraphs(
                reference_text,
                candidate_text,
                reference_paragraphs_hint,
                &cfg.paragraphs,
            )
        })
        .map_err(PipelineError::from);

    let elapsed_micros = start.elapsed().as_micros();
    match &result {
        Ok(paragraphs) => {
            let mismatched = paragraphs
                .iter()
                .filter(|p| p.status != ParagraphStatus::Correct)
                .count();
            info!(
                paragraphs = paragraphs.len(),
                mismatched,
                elapsed_micros,
                "analyze_paragraphs_success"
            );
        }
        Err(err) => warn!(error = %err, elapsed_micros, "analyze_paragraphs_failure"),
    }
    if let Some(metrics) = metrics {
        metrics.record_paragraphs(&result);
    }
    result
}

/// Comparison request whose texts may be absent, e.g. when decoded from a
/// stored job before the collaborators have filled it in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub reference_text: Option<String>,
    #[serde(default)]
    pub candidate_text: Option<String>,
    /// Paragraphs read from the script document, if any.
    #[serde(default)]
    pub reference_paragraphs: Option<Vec<String>>,
}

/// Word report and paragraph review for one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisOutcome {
    pub report: AccuracyReport,
    pub paragraphs: Vec<ParagraphDiffResult>,
}

impl AnalysisRequest {
    pub fn new(reference_text: impl Into<String>, candidate_text: impl Into<String>) -> Self {
        Self {
            reference_text: Some(reference_text.into()),
            candidate_text: Some(candidate_text.into()),
            reference_paragraphs: None,
        }
    }

    pub fn with_reference_paragraphs(mut self, paragraphs: Vec<String>) -> Self {
        self.reference_paragraphs = Some(paragraphs);
        self
    }

    /// Reject absent texts before any work is done.
    pub fn validate(&self) -> Result<(&str, &str), GradeError> {
        let reference = self
            .reference_text
            .as_deref()
            .ok_or_else(|| GradeError::InvalidInput("reference_text is required".into()))?;
        let candidate = self
            .candidate_text
            .as_deref()
            .ok_or_else(|| GradeError::InvalidInput("candidate_text is required".into()))?;
        Ok((reference, candidate))
    }
}

/// Run both passes for a request. Missing texts and invalid configs are
/// rejected before any alignment.
pub fn analyze_request(
    request: &AnalysisRequest,
    cfg: &AnalysisConfig,
) -> Result<AnalysisOutcome, PipelineError> {
    let (reference_text, candidate_text) = match request.validate() {
        Ok(texts) => texts,
        Err(err) => {
            warn!(error = %err, "analyze_request_rejected");
            return Err(err.into());
        }
    };
    cfg.grader()?;

    let report = analyze_words_with_config(reference_text, candidate_text, cfg)?;
    let paragraphs = analyze_paragraphs_with_config(
        reference_text,
        candidate_text,
        request.reference_paragraphs.as_deref(),
        cfg,
    )?;
    Ok(AnalysisOutcome { report, paragraphs })
}

/// Result of grading a transcript, with the transcript's timing segments
/// passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptAnalysis {
    pub report: AccuracyReport,
    pub paragraphs: Vec<ParagraphDiffResult>,
    pub segments: Vec<TranscriptSegment>,
}

/// Grade a transcript produced by a [`Transcriber`] against the script text.
pub fn analyze_transcript(
    reference_text: &str,
    transcript: &Transcript,
    cfg: &AnalysisConfig,
) -> Result<TranscriptAnalysis, PipelineError> {
    let report = analyze_words_with_config(reference_text, &transcript.text, cfg)?;
    let paragraphs = analyze_paragraphs_with_config(reference_text, &transcript.text, None, cfg)?;
    Ok(TranscriptAnalysis {
        report,
        paragraphs,
        segments: transcript.segments.clone(),
    })
}

/// Read the script, transcribe the audio and grade the result.
///
/// The script paragraphs returned by `reader` are used as the reference
/// paragraph hint. Collaborator failures are returned unchanged inside
/// [`PipelineError`].
pub fn analyze_with_collaborators<R, T>(
    reader: &R,
    transcriber: &T,
    script: &Path,
    audio: &Path,
    cfg: &AnalysisConfig,
) -> Result<TranscriptAnalysis, PipelineError>
where
    R: ScriptReader + ?Sized,
    T: Transcriber + ?Sized,
{
    cfg.grader()?;

    let script_paragraphs = reader.read_paragraphs(script).map_err(|err| {
        warn!(error = %err, script = %script.display(), "script_extraction_failure");
        PipelineError::from(err)
    })?;
    let reference_text = script_paragraphs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let start = Instant::now();
    let transcript = transcriber.transcribe(audio).map_err(|err| {
        warn!(error = %err, audio = %audio.display(), "transcription_failure");
        PipelineError::from(err)
    })?;
    info!(
        transcript_bytes = transcript.text.len(),
        segments = transcript.segments.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "transcription_success"
    );

    let report = analyze_words_with_config(&reference_text, &transcript.text, cfg)?;
    let paragraphs = analyze_paragraphs_with_config(
        &reference_text,
        &transcript.text,
        Some(script_paragraphs.as_slice()),
        cfg,
    )?;
    Ok(TranscriptAnalysis {
        report,
        paragraphs,
        segments: transcript.segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_words_grades_transcript() {
        let report = analyze_words("The cat sat on the mat.", "the cat sat on a mat")
            .expect("analysis should succeed");
        assert_eq!(report.total_reference_units, 6);
        assert_eq!(report.correct_count, 5);
        assert_eq!(report.wrong_count, 1);
    }

    #[test]
    fn invalid_config_is_reported_as_grade_error() {
        let cfg = AnalysisConfig::default().with_threshold(-1.0);
        let err = analyze_words_with_config("a", "a", &cfg).expect_err("config is invalid");
        assert!(matches!(err, PipelineError::Grade(GradeError::InvalidConfig(_))));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("grading failure"));
    }

    #[test]
    fn canonical_error_converts_through_grade_error() {
        let err = PipelineError::from(CanonicalError::InvalidConfig("bad".into()));
        assert!(matches!(err, PipelineError::Grade(GradeError::Canonical(_))));
    }

    #[test]
    fn request_requires_both_texts() {
        let request = AnalysisRequest {
            reference_text: Some("script".into()),
            ..AnalysisRequest::default()
        };
        let err = analyze_request(&request, &AnalysisConfig::default())
            .expect_err("candidate is missing");
        match err {
            PipelineError::Grade(GradeError::InvalidInput(msg)) => {
                assert!(msg.contains("candidate_text"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn request_runs_both_passes() {
        let request = AnalysisRequest::new("One. Two", "One. Two")
            .with_reference_paragraphs(vec!["One.".into(), "Two".into()]);
        let outcome =
            analyze_request(&request, &AnalysisConfig::default()).expect("analysis succeeds");
        assert_eq!(outcome.report.accuracy_percentage, 100.0);
        // The document paragraph keeps its full stop, so it is a near match.
        assert_eq!(outcome.paragraphs.len(), 2);
        assert_eq!(outcome.paragraphs[0].status, ParagraphStatus::Correct);
        assert_eq!(outcome.paragraphs[0].similarity, 86.0);
        assert_eq!(outcome.paragraphs[1].similarity, 100.0);
    }

    #[test]
    fn transcript_segments_pass_through() {
        let transcript = Transcript {
            text: "hello world".into(),
            segments: vec![TranscriptSegment {
                start: 0.0,
                end: 1.2,
                text: "hello world".into(),
            }],
        };
        let analysis = analyze_transcript("Hello, world!", &transcript, &AnalysisConfig::default())
            .expect("analysis succeeds");
        assert_eq!(analysis.report.accuracy_percentage, 100.0);
        assert_eq!(analysis.segments, transcript.segments);
        assert_eq!(analysis.paragraphs.len(), 1);
    }

    #[derive(Default)]
    struct CountingMetrics {
        events: Arc<RwLock<Vec<&'static str>>>,
    }

    impl CountingMetrics {
        fn new() -> Self {
            Self {
                events: Arc::new(RwLock::new(Vec::new())),
            }
        }

        fn snapshot(&self) -> Vec<&'static str> {
            self.events.read().unwrap().clone()
        }
    }

    impl AnalysisMetrics for CountingMetrics {
        fn record_words(&self, _latency: Duration, result: Result<(), PipelineError>) {
            let label = if result.is_ok() {
                "words_ok"
            } else {
                "words_err"
            };
            self.events.write().unwrap().push(label);
        }

        fn record_paragraphs(&self, _latency: Duration, result: Result<(), PipelineError>) {
            let label = if result.is_ok() {
                "paragraphs_ok"
            } else {
                "paragraphs_err"
            };
            self.events.write().unwrap().push(label);
        }
    }

    #[test]
    fn metrics_recorder_tracks_analysis_outcome() {
        let metrics = Arc::new(CountingMetrics::new());
        set_analysis_metrics(Some(metrics.clone()));

        let result = analyze_request(
            &AnalysisRequest::new("metrics validation text", "metrics validation"),
            &AnalysisConfig::default(),
        );
        assert!(result.is_ok());

        let bad = AnalysisConfig::default().with_threshold(200.0);
        assert!(analyze_words_with_config("x", "x", &bad).is_err());

        let events = metrics.snapshot();
        assert!(events.contains(&"words_ok"));
        assert!(events.contains(&"paragraphs_ok"));
        assert!(events.contains(&"words_err"));

        set_analysis_metrics(None);
    }
}
