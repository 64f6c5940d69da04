//! # Sequence alignment
//!
//! This crate computes edit scripts between two ordered sequences and a fuzzy
//! similarity score between two strings. It is the shared building block for
//! word-level grading, paragraph-level grading and in-paragraph highlighting.
//!
//! ## Contract
//!
//! - Inputs are borrowed slices of any `Eq + Hash` element; nothing is
//!   normalized here. Callers hand in already-canonical units.
//! - The algorithm is junk-free: no element is skipped for being frequent.
//! - For a given input the output is always the same edit script. Among equally
//!   long candidate blocks the earliest one wins.
//!
//! ## Core Pipeline
//!
//! 1. **Longest block**: find the longest run of equal elements in the current
//!    window of both sequences.
//! 2. **Recursion**: repeat on the windows left and right of that run, then
//!    sort and merge the runs into maximal matching blocks.
//! 3. **Opcodes**: the gaps between consecutive blocks become `Replace`,
//!    `Delete` or `Insert` steps; the blocks themselves become `Equal` steps.
//!
//! ## Example Usage
//!
//! ```
//! use align::{align, similarity, OpTag};
//!
//! let reference = ["alpha", "beta"];
//! let candidate = ["alpha"];
//! let ops = align(&reference, &candidate);
//!
//! assert_eq!(ops.len(), 2);
//! assert_eq!(ops[1].tag, OpTag::Delete);
//! assert_eq!(ops[1].reference_range(), 1..2);
//!
//! assert!(similarity("beta", "better") < 80.0);
//! ```

mod matcher;
mod opcode;
mod similarity;

pub use crate::matcher::{align, SequenceMatcher};
pub use crate::opcode::{MatchingBlock, OpTag, Opcode};
pub use crate::similarity::{similarity, MAX_SIMILARITY};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_alphabet() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(b'a'..=b'd', 0..32)
    }

    fn check_partition(a: &[u8], b: &[u8], ops: &[Opcode]) -> Result<(), TestCaseError> {
        let mut i = 0;
        let mut j = 0;
        for op in ops {
            prop_assert_eq!(op.i1, i, "reference gap or overlap in {:?}", ops);
            prop_assert_eq!(op.j1, j, "candidate gap or overlap in {:?}", ops);
            prop_assert!(op.i2 >= op.i1 && op.j2 >= op.j1);
            match op.tag {
                OpTag::Equal => {
                    prop_assert_eq!(op.reference_len(), op.candidate_len());
                    prop_assert_eq!(&a[op.reference_range()], &b[op.candidate_range()]);
                }
                OpTag::Replace => {
                    prop_assert!(op.reference_len() > 0 && op.candidate_len() > 0);
                }
                OpTag::Delete => {
                    prop_assert!(op.reference_len() > 0 && op.candidate_len() == 0);
                }
                OpTag::Insert => {
                    prop_assert!(op.reference_len() == 0 && op.candidate_len() > 0);
                }
            }
            i = op.i2;
            j = op.j2;
        }
        prop_assert_eq!(i, a.len());
        prop_assert_eq!(j, b.len());
        Ok(())
    }

    proptest! {
        #[test]
        fn self_alignment_is_single_equal_block(seq in small_alphabet()) {
            let ops = align(&seq, &seq);
            if seq.is_empty() {
                prop_assert!(ops.is_empty());
            } else {
                prop_assert_eq!(ops, vec![Opcode::new(OpTag::Equal, 0, seq.len(), 0, seq.len())]);
            }
        }

        #[test]
        fn opcodes_partition_both_sequences(a in small_alphabet(), b in small_alphabet()) {
            let ops = align(&a, &b);
            check_partition(&a, &b, &ops)?;
        }

        #[test]
        fn alignment_is_deterministic(a in small_alphabet(), b in small_alphabet()) {
            prop_assert_eq!(align(&a, &b), align(&a, &b));
        }

        #[test]
        fn no_adjacent_equal_steps(a in small_alphabet(), b in small_alphabet()) {
            let ops = align(&a, &b);
            for window in ops.windows(2) {
                prop_assert!(
                    !(window[0].tag == OpTag::Equal && window[1].tag == OpTag::Equal),
                    "unmerged blocks in {:?}",
                    ops
                );
            }
        }
    }
}
