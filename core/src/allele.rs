//! Alleles and allele frequencies.

use std::fmt;

use indexmap::IndexMap;

/// An allele at an STR marker.
///
/// Labels are kept as strings, since they include microvariants such as `9.3`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Allele {
    /// Allele with a label from the source data.
    Named(String),
    /// Bin of pooled low-frequency alleles.
    Other,
}

impl Allele {
    /// Creates a new named allele.
    pub fn named<S>(label: S) -> Self
    where
        S: ToString,
    {
        Self::Named(label.to_string())
    }
}

impl From<&str> for Allele {
    fn from(label: &str) -> Self {
        Self::named(label)
    }
}

impl From<String> for Allele {
    fn from(label: String) -> Self {
        Self::Named(label)
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allele::Named(label) => f.write_str(label),
            Allele::Other => f.write_str("other"),
        }
    }
}

/// Allele frequencies at a single marker.
///
/// Iteration follows insertion order. Frequencies are not required to sum to one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Alleles(IndexMap<Allele, f64>);

impl Alleles {
    /// Creates an empty set of allele frequencies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the frequency of an allele, if present.
    pub fn get(&self, allele: &Allele) -> Option<f64> {
        self.0.get(allele).copied()
    }

    /// Inserts an allele frequency, returning the previous frequency if any.
    pub fn insert(&mut self, allele: Allele, frequency: f64) -> Option<f64> {
        self.0.insert(allele, frequency)
    }

    /// Returns `true` if there are no alleles.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over alleles and frequencies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Allele, f64)> + '_ {
        self.0.iter().map(|(allele, &frequency)| (allele, frequency))
    }

    /// Returns the number of alleles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the alleles sorted by frequency, in ascending order.
    ///
    /// The sort is stable, so alleles with equal frequencies keep their relative order.
    pub fn sorted_ascending(&self) -> Vec<(&Allele, f64)> {
        let mut sorted = self.iter().collect::<Vec<_>>();
        sorted.sort_by(|(_, x), (_, y)| x.total_cmp(y));
        sorted
    }

    /// Returns the alleles sorted by frequency, in descending order.
    ///
    /// The sort is stable, so alleles with equal frequencies keep their relative order.
    pub fn sorted_descending(&self) -> Vec<(&Allele, f64)> {
        let mut sorted = self.iter().collect::<Vec<_>>();
        sorted.sort_by(|(_, x), (_, y)| y.total_cmp(x));
        sorted
    }

    /// Returns the sum of all frequencies.
    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }
}

impl<A> FromIterator<(A, f64)> for Alleles
where
    A: Into<Allele>,
{
    fn from_iter<T: IntoIterator<Item = (A, f64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(allele, frequency)| (allele.into(), frequency))
                .collect(),
        )
    }
}

impl<A, const N: usize> From<[(A, f64); N]> for Alleles
where
    A: Into<Allele>,
{
    fn from(array: [(A, f64); N]) -> Self {
        array.into_iter().collect()
    }
}

impl Extend<(Allele, f64)> for Alleles {
    fn extend<T: IntoIterator<Item = (Allele, f64)>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_distinct_from_named_other() {
        let alleles = Alleles::from([("other", 0.25), ("12", 0.75)]);

        assert_eq!(alleles.get(&Allele::named("other")), Some(0.25));
        assert_eq!(alleles.get(&Allele::Other), None);
        assert_eq!(Allele::Other.to_string(), Allele::named("other").to_string());
    }

    #[test]
    fn test_sorted_ascending_is_stable() {
        let alleles = Alleles::from([("a", 0.3), ("b", 0.1), ("c", 0.3), ("d", 0.1)]);

        let labels = alleles
            .sorted_ascending()
            .into_iter()
            .map(|(allele, _)| allele.to_string())
            .collect::<Vec<_>>();

        assert_eq!(labels, ["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sorted_descending_is_stable() {
        let alleles = Alleles::from([("a", 0.3), ("b", 0.1), ("c", 0.3), ("d", 0.1)]);

        let labels = alleles
            .sorted_descending()
            .into_iter()
            .map(|(allele, _)| allele.to_string())
            .collect::<Vec<_>>();

        assert_eq!(labels, ["a", "c", "b", "d"]);
    }
}
