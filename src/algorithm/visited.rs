use bitvec::prelude::*;
use std::fmt;

/// Reusable visited marks over row-major cell indices
///
/// Remembers which indices were marked so [`VisitedSet::reset`] only clears
/// those, keeping repeated small searches on a large board proportional to
/// the work they did rather than to the board size.
#[derive(Clone, Debug, Default)]
pub struct VisitedSet {
    bits: BitVec,
    marked: Vec<usize>,
}

impl VisitedSet {
    /// Create a set able to hold `len` indices, all unmarked
    pub fn new(len: usize) -> Self {
        Self {
            bits: bitvec![0; len],
            marked: Vec::new(),
        }
    }

    /// Number of indices the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Resize to hold exactly `len` indices, clearing every mark
    pub fn fit(&mut self, len: usize) {
        if self.bits.len() == len {
            self.reset();
        } else {
            self.bits = bitvec![0; len];
            self.marked.clear();
        }
    }

    /// Mark an index
    ///
    /// Returns `true` if the index was previously unmarked. Indices beyond
    /// the capacity are ignored and report `false`.
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= self.bits.len() || self.contains(index) {
            return false;
        }
        self.bits.set(index, true);
        self.marked.push(index);
        true
    }

    /// Test whether an index is marked
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Number of marked indices
    pub fn count(&self) -> usize {
        self.marked.len()
    }

    /// Test if no index is marked
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Clear every mark made since the last reset
    pub fn reset(&mut self) {
        for index in self.marked.drain(..) {
            if index < self.bits.len() {
                self.bits.set(index, false);
            }
        }
    }
}

impl fmt::Display for VisitedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VisitedSet({}/{} marked)",
            self.count(),
            self.capacity()
        )
    }
}
