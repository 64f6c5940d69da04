//! Edit-script types.
//!
//! An edit script is an ordered list of [`Opcode`] values that partitions the
//! reference index space `[0, len(a))` and the candidate index space
//! `[0, len(b))` into contiguous, non-overlapping ranges.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Kind of edit an [`Opcode`] describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    /// `a[i1..i2] == b[j1..j2]`, both ranges have the same length.
    Equal,
    /// `a[i1..i2]` should be replaced by `b[j1..j2]`; lengths may differ.
    Replace,
    /// `a[i1..i2]` has no counterpart; `j1 == j2`.
    Delete,
    /// `b[j1..j2]` has no counterpart; `i1 == i2`.
    Insert,
}

/// One step of an edit script with half-open ranges into both sequences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Opcode {
    pub tag: OpTag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

impl Opcode {
    pub fn new(tag: OpTag, i1: usize, i2: usize, j1: usize, j2: usize) -> Self {
        Self {
            tag,
            i1,
            i2,
            j1,
            j2,
        }
    }

    /// Range of reference indices covered by this step.
    pub fn reference_range(&self) -> Range<usize> {
        self.i1..self.i2
    }

    /// Range of candidate indices covered by this step.
    pub fn candidate_range(&self) -> Range<usize> {
        self.j1..self.j2
    }

    pub fn reference_len(&self) -> usize {
        self.i2 - self.i1
    }

    pub fn candidate_len(&self) -> usize {
        self.j2 - self.j1
    }

    /// Number of aligned positions this step expands into: the longer of the
    /// two ranges.
    pub fn span(&self) -> usize {
        self.reference_len().max(self.candidate_len())
    }
}

/// A run of `size` equal elements starting at `a[a]` and `b[b]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}
