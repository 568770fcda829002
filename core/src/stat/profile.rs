//! Genotype profiles.

use std::{collections::BTreeMap, fmt};

use crate::{Allele, Dataset, Panel};

/// A called genotype at a single marker, given as two alleles with their frequencies.
#[derive(Clone, Debug, PartialEq)]
pub struct AllelePair {
    first: (Allele, f64),
    second: (Allele, f64),
}

impl AllelePair {
    /// Creates a new pair of alleles.
    pub fn new<A, B>(first: (A, f64), second: (B, f64)) -> Self
    where
        A: Into<Allele>,
        B: Into<Allele>,
    {
        Self {
            first: (first.0.into(), first.1),
            second: (second.0.into(), second.1),
        }
    }

    /// Creates a new homozygous pair.
    pub fn homozygous<A>(allele: A, frequency: f64) -> Self
    where
        A: Into<Allele>,
    {
        let allele = allele.into();
        Self {
            first: (allele.clone(), frequency),
            second: (allele, frequency),
        }
    }

    /// Returns the first allele and its frequency.
    pub fn first(&self) -> (&Allele, f64) {
        (&self.first.0, self.first.1)
    }

    /// Returns `true` if both alleles are the same.
    pub fn is_homozygous(&self) -> bool {
        self.first.0 == self.second.0
    }

    /// Returns the second allele and its frequency.
    pub fn second(&self) -> (&Allele, f64) {
        (&self.second.0, self.second.1)
    }

    fn map_frequencies<F>(&self, mut op: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        Self {
            first: (self.first.0.clone(), op(self.first.1)),
            second: (self.second.0.clone(), op(self.second.1)),
        }
    }
}

impl fmt::Display for AllelePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.first.0, self.second.0)
    }
}

/// A genotype profile across markers.
///
/// Markers are kept ordered by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile(BTreeMap<String, AllelePair>);

impl Profile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the called genotype at a marker, if any.
    pub fn get(&self, marker: &str) -> Option<&AllelePair> {
        self.0.get(marker)
    }

    /// Inserts a called genotype, returning the previous genotype at the marker if any.
    pub fn insert<M>(&mut self, marker: M, pair: AllelePair) -> Option<AllelePair>
    where
        M: ToString,
    {
        self.0.insert(marker.to_string(), pair)
    }

    /// Returns `true` if no markers have been called.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over markers and genotypes, ordered by marker name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AllelePair)> + '_ {
        self.0.iter().map(|(marker, pair)| (marker.as_str(), pair))
    }

    /// Returns the number of called markers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the profile with frequencies corrected for sample size bias.
    ///
    /// The profile being matched is added to the survey sample of `individuals` individuals
    /// before estimating frequencies: with N = 2 × `individuals` alleles sampled, each frequency
    /// p becomes (Np + k) / (N + 4), where k is four for the allele of a homozygous pair, and two
    /// for each allele of a heterozygous pair.
    pub fn size_bias_corrected(&self, individuals: usize) -> Self {
        let alleles = 2. * individuals as f64;

        self.0
            .iter()
            .map(|(marker, pair)| {
                let added = if pair.is_homozygous() { 4. } else { 2. };
                let corrected = pair.map_frequencies(|p| (alleles * p + added) / (alleles + 4.));
                (marker.clone(), corrected)
            })
            .collect()
    }
}

impl<M> FromIterator<(M, AllelePair)> for Profile
where
    M: ToString,
{
    fn from_iter<T: IntoIterator<Item = (M, AllelePair)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(marker, pair)| (marker.to_string(), pair))
                .collect(),
        )
    }
}

/// Builds the modal profile of a sample.
///
/// For each record of the sample with a marker in the panel, the two most frequent alleles with
/// frequencies p ≥ q are found. The marker is called homozygous for the most frequent allele if
/// p² > 2pq, and heterozygous for the two alleles otherwise. Alleles with equal frequencies are
/// ranked in the order they appear in the record. Alleles with zero frequency are not considered
/// observed, so a marker needs at least two alleles with positive frequency.
pub fn modal_profile(
    dataset: &Dataset,
    sample: &str,
    panel: &Panel,
) -> Result<Profile, ProfileError> {
    let mut profile = Profile::new();

    for record in dataset
        .records_for(sample)
        .filter(|record| panel.contains(record.marker()))
    {
        let mut sorted = record.alleles().sorted_descending();
        sorted.retain(|&(_, frequency)| frequency > 0.0);

        let pair = match sorted.as_slice() {
            [(first, p), (second, q), ..] => {
                let (p, q) = (*p, *q);

                if p * p > 2. * p * q {
                    AllelePair::homozygous((*first).clone(), p)
                } else {
                    AllelePair::new(((*first).clone(), p), ((*second).clone(), q))
                }
            }
            _ => {
                return Err(ProfileError::TooFewAlleles {
                    sample: sample.to_string(),
                    marker: record.marker().to_string(),
                    alleles: sorted.len(),
                })
            }
        };

        log::trace!("sample '{sample}' marker {}: called {pair}", record.marker());

        profile.insert(record.marker(), pair);
    }

    Ok(profile)
}

/// An error associated with building a profile.
#[derive(Debug, Eq, PartialEq)]
pub enum ProfileError {
    /// Marker has fewer than two observed alleles, so no genotype can be called.
    TooFewAlleles {
        /// Sample name.
        sample: String,
        /// Marker name.
        marker: String,
        /// Number of observed alleles found.
        alleles: usize,
    },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::TooFewAlleles {
                sample,
                marker,
                alleles,
            } => write!(
                f,
                "cannot call genotype for sample '{sample}' at marker {marker}: \
                expected at least two observed alleles, found {alleles}"
            ),
        }
    }
}

impl std::error::Error for ProfileError {}
