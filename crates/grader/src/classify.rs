use align::{similarity, OpTag, Opcode, MAX_SIMILARITY};

use crate::types::{ClassificationRecord, GradeConfig, Label};

/// One aligned position produced by expanding an opcode.
///
/// `reference` and `candidate` are indices into the two sequences; a side is
/// `None` when the opcode has no unit left on it at this offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AlignedPosition {
    pub tag: OpTag,
    pub reference: Option<usize>,
    pub candidate: Option<usize>,
    pub reference_index: usize,
}

/// Expands opcodes into aligned positions in opcode order, then offset order.
///
/// Each opcode yields `max(m, n)` positions. Insertions are pinned to the
/// reference position they were inserted at.
pub(crate) fn aligned_positions(opcodes: &[Opcode]) -> impl Iterator<Item = AlignedPosition> + '_ {
    opcodes.iter().flat_map(|op| {
        let (m, n) = (op.reference_len(), op.candidate_len());
        (0..op.span()).map(move |k| AlignedPosition {
            tag: op.tag,
            reference: (k < m).then_some(op.i1 + k),
            candidate: (k < n).then_some(op.j1 + k),
            reference_index: match op.tag {
                OpTag::Insert => op.i1,
                _ => op.i1 + k,
            },
        })
    })
}

/// Label and similarity for one aligned pair of units.
pub(crate) fn judge(
    tag: OpTag,
    reference: Option<&str>,
    candidate: Option<&str>,
    threshold: f64,
) -> (Label, f64) {
    match (tag, reference, candidate) {
        (OpTag::Equal, _, _) => (Label::Correct, MAX_SIMILARITY),
        (_, Some(r), Some(c)) => {
            let score = similarity(r, c);
            if score >= threshold {
                (Label::Correct, score)
            } else {
                (Label::Wrong, score)
            }
        }
        (_, Some(_), None) => (Label::Missing, 0.0),
        (_, None, _) => (Label::Extra, 0.0),
    }
}

/// Turns an edit script over two unit sequences into one record per aligned
/// position.
///
/// - `Equal`: `Correct` with similarity 100.
/// - `Replace`: paired units are `Correct` when their similarity reaches
///   `cfg.correctness_threshold` and `Wrong` otherwise; the longer side's
///   leftovers are `Missing` or `Extra`.
/// - `Delete`: `Missing`.
/// - `Insert`: `Extra`, indexed at the insertion point.
///
/// Records come back in alignment order and are never reordered. Opcodes
/// should come from `align(reference, candidate)`; positions that fall outside
/// either slice are skipped rather than indexed.
///
/// ```rust
/// use align::align;
/// use grader::{classify, GradeConfig, Label};
///
/// let reference = ["the", "quick", "fox"];
/// let candidate = ["the", "slow", "fox"];
/// let records = classify(&reference, &candidate, &align(&reference, &candidate), &GradeConfig::default());
///
/// let labels: Vec<Label> = records.iter().map(|r| r.label).collect();
/// assert_eq!(labels, [Label::Correct, Label::Wrong, Label::Correct]);
/// ```
pub fn classify<S: AsRef<str>>(
    reference: &[S],
    candidate: &[S],
    opcodes: &[Opcode],
    cfg: &GradeConfig,
) -> Vec<ClassificationRecord> {
    aligned_positions(opcodes)
        .filter_map(|pos| {
            let reference_unit = unit_at(reference, pos.reference)?;
            let candidate_unit = unit_at(candidate, pos.candidate)?;
            let (label, similarity) = judge(
                pos.tag,
                reference_unit,
                candidate_unit,
                cfg.correctness_threshold,
            );
            Some(ClassificationRecord {
                reference_unit: reference_unit.map(str::to_owned),
                candidate_unit: candidate_unit.map(str::to_owned),
                reference_index: pos.reference_index,
                is_correct: label == Label::Correct,
                similarity,
                label,
            })
        })
        .collect()
}

/// `Some(None)` for an absent side, `None` when the index is out of range.
fn unit_at<S: AsRef<str>>(units: &[S], index: Option<usize>) -> Option<Option<&str>> {
    match index {
        Some(i) => units.get(i).map(|unit| Some(unit.as_ref())),
        None => Some(None),
    }
}
