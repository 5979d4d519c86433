//! Pairwise (2-wise) covering enumeration.
//!
//! [`PairwiseEnumerator`] yields combinations lazily. Every row is seeded with the
//! first still-uncovered value pair in lexicographic `(i, j, a, b)` order, and the
//! remaining slots are filled in ascending slot order, each picking the value that
//! covers the most new pairs against the slots already fixed in the row (lowest
//! value index on ties). Each row covers at least its seed pair, so the
//! enumeration terminates once every pair is covered. The output is fully
//! determined by the domain sizes.
//!
//! With fewer than two domains there are no pairs; a single domain yields each
//! of its values once and an empty domain list yields nothing.

use ccg_core::errors::{CcgError, ErrorInfo};
use serde::{Deserialize, Serialize};

/// A value pair `(slot, value index)` × `(slot, value index)` with `first.0 < second.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairSlot {
    /// Lower slot and its value index.
    pub first: (usize, usize),
    /// Higher slot and its value index.
    pub second: (usize, usize),
}

#[derive(Debug, Clone)]
struct PairBlock {
    i: usize,
    j: usize,
    start: usize,
}

/// Tracks which value pairs have been covered so far.
#[derive(Debug, Clone)]
pub struct PairCoverage {
    sizes: Vec<usize>,
    blocks: Vec<PairBlock>,
    // block index for slot pair (i, j), row-major over i < j
    lookup: Vec<Vec<usize>>,
    covered: Vec<bool>,
    remaining: usize,
    cursor: usize,
}

impl PairCoverage {
    /// Creates an empty coverage map for domains of the given sizes.
    pub fn new(sizes: &[usize]) -> Self {
        let n = sizes.len();
        let mut blocks = Vec::new();
        let mut lookup = vec![vec![usize::MAX; n]; n];
        let mut start = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                lookup[i][j] = blocks.len();
                blocks.push(PairBlock { i, j, start });
                start += sizes[i] * sizes[j];
            }
        }
        Self {
            sizes: sizes.to_vec(),
            blocks,
            lookup,
            covered: vec![false; start],
            remaining: start,
            cursor: 0,
        }
    }

    /// Number of value pairs not yet covered.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Total number of value pairs.
    pub fn total(&self) -> usize {
        self.covered.len()
    }

    fn flat_index(&self, (i, a): (usize, usize), (j, b): (usize, usize)) -> usize {
        let (lo, hi) = if i < j { ((i, a), (j, b)) } else { ((j, b), (i, a)) };
        let block = &self.blocks[self.lookup[lo.0][hi.0]];
        block.start + lo.1 * self.sizes[hi.0] + hi.1
    }

    /// Whether the pair of `(slot, value index)` assignments is covered.
    pub fn is_covered(&self, first: (usize, usize), second: (usize, usize)) -> bool {
        self.covered[self.flat_index(first, second)]
    }

    /// Marks every pair present in a complete index row as covered.
    pub fn mark_row(&mut self, row: &[usize]) {
        for i in 0..row.len() {
            for j in (i + 1)..row.len() {
                let idx = self.flat_index((i, row[i]), (j, row[j]));
                if !self.covered[idx] {
                    self.covered[idx] = true;
                    self.remaining -= 1;
                }
            }
        }
    }

    /// First uncovered pair in lexicographic order.
    pub fn first_uncovered(&mut self) -> Option<PairSlot> {
        while self.cursor < self.covered.len() && self.covered[self.cursor] {
            self.cursor += 1;
        }
        if self.cursor == self.covered.len() {
            return None;
        }
        Some(self.slot_at(self.cursor))
    }

    fn slot_at(&self, idx: usize) -> PairSlot {
        let block_idx = self.blocks.partition_point(|block| block.start <= idx) - 1;
        let block = &self.blocks[block_idx];
        let local = idx - block.start;
        let width = self.sizes[block.j];
        PairSlot {
            first: (block.i, local / width),
            second: (block.j, local % width),
        }
    }

    /// All uncovered pairs in lexicographic order.
    pub fn uncovered(&self) -> Vec<PairSlot> {
        self.covered
            .iter()
            .enumerate()
            .filter(|(_, covered)| !**covered)
            .map(|(idx, _)| self.slot_at(idx))
            .collect()
    }
}

/// Lists the value pairs a set of index rows fails to cover.
pub fn uncovered_pairs(sizes: &[usize], rows: &[Vec<usize>]) -> Vec<PairSlot> {
    let mut coverage = PairCoverage::new(sizes);
    for row in rows {
        coverage.mark_row(row);
    }
    coverage.uncovered()
}

/// Lazy pairwise-covering sequence of value-index rows.
#[derive(Debug, Clone)]
pub struct IndexRows {
    sizes: Vec<usize>,
    coverage: PairCoverage,
    // only used when there are fewer than two slots
    single_next: usize,
    emitted: usize,
}

impl IndexRows {
    /// Creates the row generator. Every size must be at least one.
    pub fn new(sizes: &[usize]) -> Result<Self, CcgError> {
        if let Some(slot) = sizes.iter().position(|size| *size == 0) {
            return Err(CcgError::Config(
                ErrorInfo::new("empty_domain", "pairwise domain has no values")
                    .with_context("slot", slot.to_string()),
            ));
        }
        Ok(Self {
            sizes: sizes.to_vec(),
            coverage: PairCoverage::new(sizes),
            single_next: 0,
            emitted: 0,
        })
    }

    /// Number of rows produced so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn next_single(&mut self) -> Option<Vec<usize>> {
        let size = *self.sizes.first()?;
        if self.single_next >= size {
            return None;
        }
        self.single_next += 1;
        Some(vec![self.single_next - 1])
    }

    fn gain(&self, row: &[Option<usize>], slot: usize, value: usize) -> usize {
        row.iter()
            .enumerate()
            .filter(|(other, _)| *other != slot)
            .filter_map(|(other, assigned)| assigned.map(|v| (other, v)))
            .filter(|(other, v)| !self.coverage.is_covered((slot, value), (*other, *v)))
            .count()
    }
}

impl Iterator for IndexRows {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sizes.len() < 2 {
            let row = self.next_single();
            self.emitted += usize::from(row.is_some());
            return row;
        }
        let seed = self.coverage.first_uncovered()?;
        let mut row: Vec<Option<usize>> = vec![None; self.sizes.len()];
        row[seed.first.0] = Some(seed.first.1);
        row[seed.second.0] = Some(seed.second.1);
        for slot in 0..self.sizes.len() {
            if row[slot].is_some() {
                continue;
            }
            let mut best = (0, 0);
            for value in 0..self.sizes[slot] {
                let gain = self.gain(&row, slot, value);
                if gain > best.1 {
                    best = (value, gain);
                }
            }
            row[slot] = Some(best.0);
        }
        let row: Vec<usize> = row.into_iter().map(|v| v.unwrap_or(0)).collect();
        self.coverage.mark_row(&row);
        self.emitted += 1;
        Some(row)
    }
}

/// Lazy pairwise-covering sequence of value combinations.
///
/// One-shot: once exhausted it yields nothing further.
#[derive(Debug, Clone)]
pub struct PairwiseEnumerator<T> {
    domains: Vec<Vec<T>>,
    rows: IndexRows,
}

impl<T: Clone> PairwiseEnumerator<T> {
    /// Creates an enumerator over non-empty domains.
    pub fn new(domains: Vec<Vec<T>>) -> Result<Self, CcgError> {
        let sizes: Vec<usize> = domains.iter().map(Vec::len).collect();
        let rows = IndexRows::new(&sizes)?;
        Ok(Self { domains, rows })
    }

    /// Number of combinations produced so far.
    pub fn emitted(&self) -> usize {
        self.rows.emitted()
    }
}

impl<T: Clone> Iterator for PairwiseEnumerator<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(
            row.iter()
                .zip(&self.domains)
                .map(|(idx, domain)| domain[*idx].clone())
                .collect(),
        )
    }
}
