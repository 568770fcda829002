//! Pooling of low-frequency alleles.
//!
//! Sparse survey data give unstable frequency estimates for rare alleles. Pooling merges such
//! alleles into a single [`Allele::Other`] bin before calculating match probabilities.

use crate::{Allele, Alleles};

/// A threshold below which alleles are pooled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cutoff {
    /// Threshold given directly as a frequency.
    Frequency(f64),
    /// Threshold given as an allele count, relative to the number of alleles sampled.
    Count {
        /// Threshold count.
        count: f64,
        /// Number of alleles sampled, i.e. twice the number of individuals.
        alleles: usize,
    },
}

impl Cutoff {
    /// Creates a cutoff from a count and the number of alleles sampled.
    ///
    /// If the number of alleles is unknown, i.e. zero, the count is used as a frequency.
    pub fn new(count: f64, alleles: usize) -> Self {
        if alleles == 0 {
            Self::Frequency(count)
        } else {
            Self::Count { count, alleles }
        }
    }

    /// Returns the cutoff as a frequency.
    pub fn limit(&self) -> f64 {
        match *self {
            Cutoff::Frequency(frequency) => frequency,
            Cutoff::Count { count, alleles } => count / alleles as f64,
        }
    }
}

impl Default for Cutoff {
    fn default() -> Self {
        Self::Frequency(0.0)
    }
}

/// Pools low-frequency alleles.
///
/// Alleles are visited in ascending order of frequency. An allele is added to the pooled bin if
/// its own frequency is below the limit, or if the bin has not yet reached the limit. All other
/// alleles are kept unchanged. The bin is included in the result under [`Allele::Other`] if it is
/// non-zero.
pub fn pool(alleles: &Alleles, cutoff: Cutoff) -> Alleles {
    let limit = cutoff.limit();

    let mut other = 0.0;
    let mut pooled = Alleles::new();
    for (allele, frequency) in alleles.sorted_ascending() {
        if frequency < limit || other < limit {
            other += frequency;
        } else {
            pooled.insert(allele.clone(), frequency);
        }
    }

    if other != 0.0 {
        pooled.insert(Allele::Other, other);
    }

    pooled
}
