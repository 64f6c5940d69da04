use std::io::Write;
use std::path::Path;

use scriptcheck::{
    AnalysisConfig, Label, ParagraphStatus, PipelineError, PlainTextReader, Transcriber,
    Transcript, TranscriptSegment, TranscriptionError, analyze_paragraphs_with_config,
    analyze_with_collaborators,
};
use tempfile::NamedTempFile;

/// Transcriber that always returns the same take.
struct CannedTranscriber;

impl Transcriber for CannedTranscriber {
    fn transcribe(&self, _audio: &Path) -> Result<Transcript, TranscriptionError> {
        Ok(Transcript {
            text: "Good morning everyone. Today we talk about the rivers.".into(),
            segments: vec![
                TranscriptSegment {
                    start: 0.0,
                    end: 1.8,
                    text: "Good morning everyone.".into(),
                },
                TranscriptSegment {
                    start: 1.8,
                    end: 4.25,
                    text: "Today we talk about the rivers.".into(),
                },
            ],
        })
    }
}

fn script_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp script");
    file.write_all(b"Good morning everyone.\n\nToday we talk about rivers.\n")
        .expect("write script");
    file
}

#[test]
fn full_pipeline_executes_with_defaults() -> Result<(), PipelineError> {
    let script = script_file();
    let cfg = AnalysisConfig::default();

    let analysis = analyze_with_collaborators(
        &PlainTextReader,
        &CannedTranscriber,
        script.path(),
        Path::new("take-01.wav"),
        &cfg,
    )?;

    let report = &analysis.report;
    assert_eq!(report.total_reference_units, 8);
    assert_eq!(report.correct_count, 8);
    assert_eq!(report.extra_count, 1);
    assert_eq!(report.accuracy_percentage, 100.0);

    let extra = report
        .records
        .iter()
        .find(|r| r.label == Label::Extra)
        .expect("inserted word");
    assert_eq!(extra.candidate_unit.as_deref(), Some("the"));
    assert_eq!(extra.reference_index, 7);

    assert_eq!(analysis.segments.len(), 2);
    assert_eq!(analysis.segments[1].format_end(), "00:00:04.250");

    Ok(())
}

#[test]
fn document_paragraphs_drive_the_review() -> Result<(), PipelineError> {
    let script = script_file();
    let analysis = analyze_with_collaborators(
        &PlainTextReader,
        &CannedTranscriber,
        script.path(),
        Path::new("take-01.wav"),
        &AnalysisConfig::default(),
    )?;

    let paragraphs = &analysis.paragraphs;
    assert_eq!(paragraphs.len(), 2);
    assert!(paragraphs.iter().all(|p| p.status == ParagraphStatus::Correct));

    assert_eq!(paragraphs[0].similarity, 98.0);
    assert_eq!(
        paragraphs[0].highlighted_reference_markup,
        r#"Good morning <span class="wrong-word">everyone.</span>"#
    );

    assert_eq!(paragraphs[1].index, 1);
    assert_eq!(paragraphs[1].similarity, 93.0);
    assert_eq!(
        paragraphs[1].highlighted_reference_markup,
        "Today we talk about rivers."
    );
    assert_eq!(
        paragraphs[1].highlighted_candidate_markup,
        r#"Today we talk about <span class="extra-word">the</span> rivers."#
    );

    Ok(())
}

#[test]
fn stored_records_feed_single_paragraph_review() -> Result<(), PipelineError> {
    let script = script_file();
    let analysis = analyze_with_collaborators(
        &PlainTextReader,
        &CannedTranscriber,
        script.path(),
        Path::new("take-01.wav"),
        &AnalysisConfig::default(),
    )?;

    let reference = analysis.report.reference_text();
    let candidate = analysis.report.candidate_text();
    assert_eq!(reference, "good morning everyone today we talk about rivers");
    assert_eq!(candidate, "good morning everyone today we talk about the rivers");

    let cfg = AnalysisConfig::default().with_single_paragraph(true);
    let review = analyze_paragraphs_with_config(&reference, &candidate, None, &cfg)?;
    assert_eq!(review.len(), 1);
    assert_eq!(review[0].status, ParagraphStatus::Correct);
    assert_eq!(review[0].similarity, 96.0);
    assert_eq!(review[0].highlighted_reference_markup, reference);

    Ok(())
}

#[test]
fn records_paginate_by_reference_index() -> Result<(), PipelineError> {
    let script = script_file();
    let analysis = analyze_with_collaborators(
        &PlainTextReader,
        &CannedTranscriber,
        script.path(),
        Path::new("take-01.wav"),
        &AnalysisConfig::default(),
    )?;

    let first = analysis.report.page(1, 5);
    assert_eq!(first.num_pages, 2);
    assert_eq!(first.total_records, 9);
    assert!(first.has_next());

    let last = analysis.report.page(7, 5);
    assert_eq!(last.number, 2);
    let indices: Vec<usize> = last.records.iter().map(|r| r.reference_index).collect();
    assert_eq!(indices, [5, 6, 7, 7]);
    assert_eq!(last.records[2].label, Label::Extra);
    assert_eq!(last.records[3].reference_unit.as_deref(), Some("rivers"));

    Ok(())
}

#[test]
fn analysis_serializes_with_stored_labels() -> Result<(), PipelineError> {
    let script = script_file();
    let analysis = analyze_with_collaborators(
        &PlainTextReader,
        &CannedTranscriber,
        script.path(),
        Path::new("take-01.wav"),
        &AnalysisConfig::default(),
    )?;

    let json = serde_json::to_value(&analysis).expect("serialize analysis");
    assert_eq!(json["report"]["records"][7]["label"], "extra");
    assert_eq!(json["report"]["records"][0]["label"], "correct");
    assert_eq!(json["paragraphs"][0]["status"], "Correct");
    assert_eq!(json["segments"][0]["text"], "Good morning everyone.");
    Ok(())
}
