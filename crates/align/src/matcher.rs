use std::hash::Hash;

use fxhash::FxHashMap;

use crate::opcode::{MatchingBlock, OpTag, Opcode};

/// Longest-matching-block sequence matcher.
///
/// The matcher finds the longest contiguous run of equal elements shared by
/// the two sequences, then recurses on the pieces to the left and to the right
/// of it. Ties go to the run that starts earliest in `a`, then earliest in
/// `b`, so the edit script is reproducible for a given input.
///
/// Nothing is treated as junk: frequent elements such as `"the"` stay
/// eligible for matching no matter how often they occur.
///
/// Worst case is O(len(a) · len(b)).
///
/// ```rust
/// use align::{OpTag, SequenceMatcher};
///
/// let a = ["the", "quick", "fox"];
/// let b = ["the", "slow", "fox"];
/// let tags: Vec<OpTag> = SequenceMatcher::new(&a, &b)
///     .opcodes()
///     .iter()
///     .map(|op| op.tag)
///     .collect();
/// assert_eq!(tags, [OpTag::Equal, OpTag::Replace, OpTag::Equal]);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceMatcher<'a, T: Eq + Hash> {
    a: &'a [T],
    b: &'a [T],
    /// Positions of every element of `b`, in increasing order.
    b2j: FxHashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: FxHashMap<&'a T, Vec<usize>> = FxHashMap::default();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest block with `a[i..i+size] == b[j..j+size]` inside
    /// `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns a block of size 0 at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> MatchingBlock {
        let mut best = MatchingBlock {
            a: alo,
            b: blo,
            size: 0,
        };
        // j2len[j] = length of the match ending at a[i-1] and b[j].
        let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();

        for i in alo..ahi {
            let mut next_j2len: FxHashMap<usize, usize> = FxHashMap::default();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let run = match j.checked_sub(1) {
                        Some(prev) => j2len.get(&prev).copied().unwrap_or(0),
                        None => 0,
                    } + 1;
                    next_j2len.insert(j, run);
                    // Strictly greater keeps the earliest block on ties.
                    if run > best.size {
                        best = MatchingBlock {
                            a: i + 1 - run,
                            b: j + 1 - run,
                            size: run,
                        };
                    }
                }
            }
            j2len = next_j2len;
        }

        best
    }

    /// All maximal matching blocks in increasing order, adjacent blocks
    /// merged, terminated by a zero-size sentinel at `(len(a), len(b))`.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut pending = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let found = self.find_longest_match(alo, ahi, blo, bhi);
            if found.size == 0 {
                continue;
            }
            blocks.push(found);
            if alo < found.a && blo < found.b {
                pending.push((alo, found.a, blo, found.b));
            }
            if found.a + found.size < ahi && found.b + found.size < bhi {
                pending.push((found.a + found.size, ahi, found.b + found.size, bhi));
            }
        }
        blocks.sort_unstable_by_key(|block| (block.a, block.b));

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            if let Some(last) = merged.last_mut() {
                if last.a + last.size == block.a && last.b + last.size == block.b {
                    last.size += block.size;
                    continue;
                }
            }
            merged.push(block);
        }
        merged.push(MatchingBlock {
            a: la,
            b: lb,
            size: 0,
        });

        merged
    }

    /// Edit script turning `a` into `b`.
    ///
    /// Empty for two empty sequences; otherwise the ranges cover both index
    /// spaces exactly once and in order.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut i = 0;
        let mut j = 0;
        let mut ops = Vec::new();

        for block in self.matching_blocks() {
            let tag = match (i < block.a, j < block.b) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                ops.push(Opcode::new(tag, i, block.a, j, block.b));
            }
            i = block.a + block.size;
            j = block.b + block.size;
            if block.size > 0 {
                ops.push(Opcode::new(OpTag::Equal, block.a, i, block.b, j));
            }
        }

        ops
    }

    /// Similarity in `[0.0, 1.0]`: `2 * M / T` where `M` is the number of
    /// matched elements and `T` the combined length. Two empty sequences are
    /// identical and score `1.0`.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches: usize = self.matching_blocks().iter().map(|block| block.size).sum();
        2.0 * matches as f64 / total as f64
    }
}

/// Edit script between a reference and a candidate sequence.
///
/// ```rust
/// use align::{align, OpTag, Opcode};
///
/// let ops = align(&["alpha"], &["alpha", "extra"]);
/// assert_eq!(
///     ops,
///     [
///         Opcode::new(OpTag::Equal, 0, 1, 0, 1),
///         Opcode::new(OpTag::Insert, 1, 1, 1, 2),
///     ]
/// );
/// ```
pub fn align<T: Eq + Hash>(reference: &[T], candidate: &[T]) -> Vec<Opcode> {
    SequenceMatcher::new(reference, candidate).opcodes()
}
