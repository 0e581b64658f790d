//! K-fold partitions for comparing spatial predictors.
//!
//! ## Purpose
//!
//! This module assigns the rows of a regression matrix to k folds, so that
//! the buffer-distance forest and a kriging baseline can be scored on the same
//! train/test splits.
//!
//! ## Design notes
//!
//! * **Deterministic**: without a seed the row order is kept; with a seed the
//!   order is shuffled by a small internal LCG, identical on every platform
//!   and usable without `std`.
//! * **Contiguous folds**: after shuffling, fold `f` takes positions
//!   `[f * n/k, (f + 1) * n/k)`; the last fold takes the remainder.
//! * **Site folds**: rows of one site can be kept together, so that a site
//!   observed at many times never appears in both train and test sets.
//!
//! ## Invariants
//!
//! * Training and test sets are disjoint in each fold.
//! * Every row index appears in exactly one test set.
//! * `2 <= k <= n`.
//!
//! ## Non-goals
//!
//! * This module does not fit or score models.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::BTreeMap;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::RfspError;
use crate::primitives::matrix::RegressionMatrix;

// ============================================================================
// Internal PRNG
// ============================================================================

/// Minimal PRNG for no-std shuffling.
///
/// Uses an LCG (Linear Congruential Generator) with constants from PCG/MQL.
#[derive(Debug, Clone)]
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        // LCG constants for 64-bit state
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
}

// ============================================================================
// K-Fold
// ============================================================================

/// One train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    /// Row indices to fit on.
    pub train: Vec<usize>,
    /// Row indices to score on.
    pub test: Vec<usize>,
}

/// K-fold partition configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFold {
    k: usize,
    seed: Option<u64>,
}

impl KFold {
    /// Partition into `k` folds, keeping row order.
    pub fn new(k: usize) -> Self {
        Self { k, seed: None }
    }

    /// Shuffle rows with `seed` before assigning folds.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of folds.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Fold number of each of `n` units.
    pub fn partition(&self, n: usize) -> Result<Vec<usize>, RfspError> {
        if self.k < 2 || self.k > n {
            return Err(RfspError::InvalidFolds { k: self.k, n });
        }

        let mut order: Vec<usize> = (0..n).collect();
        if let Some(s) = self.seed {
            let mut rng = SimpleRng::new(s);
            for i in (1..n).rev() {
                let j = (rng.next_u32() as usize) % (i + 1);
                order.swap(i, j);
            }
        }

        let fold_size = n / self.k;
        let mut assignment = vec![0; n];
        for (pos, &unit) in order.iter().enumerate() {
            // Last fold includes remainder
            assignment[unit] = (pos / fold_size).min(self.k - 1);
        }
        Ok(assignment)
    }

    /// Train/test splits over `n` rows.
    pub fn split(&self, n: usize) -> Result<Vec<Fold>, RfspError> {
        let assignment = self.partition(n)?;
        Ok(Self::folds_from_assignment(&assignment, self.k))
    }

    /// Train/test splits that keep all rows of a site in one fold.
    ///
    /// Folds are assigned over distinct sites (first-seen order), so `k` must
    /// not exceed the number of sites.
    pub fn split_by_site<T: Float>(&self, matrix: &RegressionMatrix<T>) -> Result<Vec<Fold>, RfspError> {
        // Site ids to first-seen position
        let mut sites: BTreeMap<&str, usize> = BTreeMap::new();
        let mut site_of_row = Vec::with_capacity(matrix.nrows());
        for row in matrix.rows() {
            let next = sites.len();
            site_of_row.push(*sites.entry(row.site.as_str()).or_insert(next));
        }

        let site_fold = self.partition(sites.len())?;
        let assignment: Vec<usize> = site_of_row.iter().map(|&s| site_fold[s]).collect();
        Ok(Self::folds_from_assignment(&assignment, self.k))
    }

    fn folds_from_assignment(assignment: &[usize], k: usize) -> Vec<Fold> {
        (0..k)
            .map(|fold| {
                let mut train = Vec::new();
                let mut test = Vec::new();
                for (row, &f) in assignment.iter().enumerate() {
                    if f == fold {
                        test.push(row);
                    } else {
                        train.push(row);
                    }
                }
                Fold { train, test }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unshuffled_partition() {
        let assignment = KFold::new(3).partition(7).unwrap();
        assert_eq!(assignment, vec![0, 0, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_seeded_partition_is_reproducible() {
        let a = KFold::new(4).seed(42).partition(20).unwrap();
        let b = KFold::new(4).seed(42).partition(20).unwrap();
        assert_eq!(a, b);
        for fold in 0..4 {
            assert!(a.iter().filter(|&&f| f == fold).count() >= 5);
        }
    }

    #[test]
    fn test_invalid_fold_counts() {
        assert_eq!(
            KFold::new(1).partition(10).unwrap_err(),
            RfspError::InvalidFolds { k: 1, n: 10 }
        );
        assert_eq!(
            KFold::new(5).partition(4).unwrap_err(),
            RfspError::InvalidFolds { k: 5, n: 4 }
        );
    }

    #[test]
    fn test_split_is_disjoint_cover() {
        let folds = KFold::new(3).seed(7).split(10).unwrap();
        let mut seen = vec![0; 10];
        for fold in &folds {
            assert_eq!(fold.train.len() + fold.test.len(), 10);
            for &i in &fold.test {
                seen[i] += 1;
                assert!(!fold.train.contains(&i));
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }
}
