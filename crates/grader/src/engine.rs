use align::align;
use canonical::{normalize_and_split, CanonicalizeConfig, Granularity, UnitSequence};
use tracing::debug;

use crate::classify::{aligned_positions, classify, judge};
use crate::highlight::highlight;
use crate::stats::aggregate;
use crate::types::{
    AccuracyReport, GradeConfig, GradeError, Label, MarkupConfig, ParagraphDiffResult,
    ParagraphOptions, ParagraphStatus,
};


/// Grades a transcript against its script at word and paragraph granularity.
///
/// All configs are validated once in [`Grader::new`]; after that every
/// comparison is infallible. A `Grader` holds no mutable state and can be
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct Grader {
    canonical_cfg: CanonicalizeConfig,
    grade_cfg: GradeConfig,
    markup_cfg: MarkupConfig,
}

impl Grader {
    /// Construct a grader from explicit configs.
    pub fn new(
        canonical_cfg: CanonicalizeConfig,
        grade_cfg: GradeConfig,
        markup_cfg: MarkupConfig,
    ) -> Result<Self, GradeError> {
        canonical_cfg.validate()?;
        grade_cfg.validate()?;
        markup_cfg.validate()?;
        Ok(Self {
            canonical_cfg,
            grade_cfg,
            markup_cfg,
        })
    }

    pub fn canonical_config(&self) -> &CanonicalizeConfig {
        &self.canonical_cfg
    }

    pub fn grade_config(&self) -> &GradeConfig {
        &self.grade_cfg
    }

    pub fn markup_config(&self) -> &MarkupConfig {
        &self.markup_cfg
    }

    /// Word-level comparison: normalize both texts, align the word sequences,
    /// classify every aligned position and aggregate the counts.
    pub fn analyze_words(&self, reference_text: &str, candidate_text: &str) -> AccuracyReport {
        let reference = normalize_and_split(reference_text, Granularity::Word, &self.canonical_cfg);
        let candidate = normalize_and_split(candidate_text, Granularity::Word, &self.canonical_cfg);

        let opcodes = align(reference.units(), candidate.units());
        let records = classify(
            reference.units(),
            candidate.units(),
            &opcodes,
            &self.grade_cfg,
        );
        debug!(
            reference_words = reference.len(),
            candidate_words = candidate.len(),
            opcodes = opcodes.len(),
            "words_aligned"
        );

        aggregate(reference.len(), records).with_page_size(self.grade_cfg.page_size)
    }

    /// Paragraph-level comparison with word highlighting inside each pair.
    ///
    /// The reference side uses `reference_paragraphs` when given (paragraphs
    /// read from the script document) and punctuation splitting otherwise. The
    /// candidate side always uses punctuation splitting. With
    /// `force_single_paragraph` both sides are taken whole and the hint is
    /// ignored.
    ///
    /// Paired paragraphs follow the word-level policy: equal pairs are
    /// `Correct` at 100, replaced pairs are `Correct` when their similarity
    /// reaches the threshold and `Wrong` otherwise, leftovers are `Missing` or
    /// `Extra`.
    pub fn analyze_paragraphs(
        &self,
        reference_text: &str,
        candidate_text: &str,
        reference_paragraphs: Option<&[String]>,
        options: &ParagraphOptions,
    ) -> Vec<ParagraphDiffResult> {
        let (reference, candidate) = if options.force_single_paragraph {
            (
                UnitSequence::single_paragraph(reference_text),
                UnitSequence::single_paragraph(candidate_text),
            )
        } else {
            let reference = match reference_paragraphs {
                Some(paragraphs) => UnitSequence::from_paragraphs(paragraphs),
                None => normalize_and_split(
                    reference_text,
                    Granularity::Paragraph,
                    &self.canonical_cfg,
                ),
            };
            let candidate =
                normalize_and_split(candidate_text, Granularity::Paragraph, &self.canonical_cfg);
            (reference, candidate)
        };
        debug!(
            reference_paragraphs = reference.len(),
            candidate_paragraphs = candidate.len(),
            single = options.force_single_paragraph,
            "paragraphs_split"
        );

        let opcodes = align(reference.units(), candidate.units());
        aligned_positions(&opcodes)
            .map(|pos| {
                let reference_para = pos.reference.and_then(|i| reference.get(i));
                let candidate_para = pos.candidate.and_then(|j| candidate.get(j));
                let (label, similarity) = judge(
                    pos.tag,
                    reference_para,
                    candidate_para,
                    self.grade_cfg.correctness_threshold,
                );
                let (highlighted_reference_markup, highlighted_candidate_markup) = highlight(
                    reference_para.unwrap_or_default(),
                    candidate_para.unwrap_or_default(),
                    &self.markup_cfg,
                );
                ParagraphDiffResult {
                    highlighted_reference_markup,
                    highlighted_candidate_markup,
                    similarity,
                    status: paragraph_status(label),
                    index: pos.reference_index,
                }
            })
            .collect()
    }
}

impl Default for Grader {
    fn default() -> Self {
        Self {
            canonical_cfg: CanonicalizeConfig::default(),
            grade_cfg: GradeConfig::default(),
            markup_cfg: MarkupConfig::default(),
        }
    }
}

fn paragraph_status(label: Label) -> ParagraphStatus {
    match label {
        Label::Correct => ParagraphStatus::Correct,
        Label::Wrong => ParagraphStatus::Wrong,
        Label::Missing => ParagraphStatus::Missing,
        Label::Extra => ParagraphStatus::Extra,
    }
}
