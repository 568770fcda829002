//! Match probability statistics.
//!
//! Genotype probabilities follow Balding and Nichols (1994), which corrects Hardy-Weinberg
//! genotype frequencies for population subdivision by means of a coefficient θ. With θ = 0,
//! the Hardy-Weinberg frequencies are recovered.

use std::{fmt, str::FromStr};

pub mod pmp;
pub use pmp::profile_match_probability;

pub mod profile;
pub use profile::{modal_profile, AllelePair, Profile, ProfileError};

pub mod rmp;
pub use rmp::{marker_rmp, panel_rmp, PanelError, PanelRmp};

/// The population subdivision coefficient θ.
///
/// The coefficient is assumed to lie in [0, 1); this is checked when parsing, but not when
/// constructing directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Theta(pub f64);

impl Theta {
    /// No correction for population subdivision.
    pub const ZERO: Self = Self(0.0);

    fn denominator(&self) -> f64 {
        let theta = self.0;
        (1. + theta) * (1. + 2. * theta)
    }

    /// Returns the probability of a homozygous genotype for an allele with frequency `p`.
    pub fn homozygote(&self, p: f64) -> f64 {
        let theta = self.0;
        (2. * theta + (1. - theta) * p) * (3. * theta + (1. - theta) * p) / self.denominator()
    }

    /// Returns the probability of a heterozygous genotype for alleles with frequencies `p` and
    /// `q`, without the factor two accounting for the two possible orderings of the alleles.
    pub fn heterozygote_half(&self, p: f64, q: f64) -> f64 {
        let theta = self.0;
        (theta + (1. - theta) * p) * (theta + (1. - theta) * q) / self.denominator()
    }

    /// Returns the probability of a heterozygous genotype for alleles with frequencies `p` and
    /// `q`.
    pub fn heterozygote(&self, p: f64, q: f64) -> f64 {
        2. * self.heterozygote_half(p, q)
    }
}

impl fmt::Display for Theta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug formatting of floats always includes a decimal point
        write!(f, "{:?}", self.0)
    }
}

impl FromStr for Theta {
    type Err = ParseThetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let theta = f64::from_str(s.trim()).map_err(|_| ParseThetaError(s.to_string()))?;

        if (0.0..1.0).contains(&theta) {
            Ok(Self(theta))
        } else {
            Err(ParseThetaError(s.to_string()))
        }
    }
}

/// An error associated with parsing θ.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseThetaError(String);

impl fmt::Display for ParseThetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to parse '{}' as θ, expected a number in the range [0, 1)",
            self.0
        )
    }
}

impl std::error::Error for ParseThetaError {}
