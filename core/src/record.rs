//! Allele frequency survey records.

use indexmap::IndexSet;

use crate::Alleles;

/// Allele frequencies for a single marker in a single population sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    marker: String,
    sample: String,
    sample_size: usize,
    alleles: Alleles,
}

impl Record {
    /// Creates a new record.
    ///
    /// The sample size is the number of individuals sampled, or zero if unknown.
    pub fn new<M, S>(marker: M, sample: S, sample_size: usize, alleles: Alleles) -> Self
    where
        M: ToString,
        S: ToString,
    {
        Self {
            marker: marker.to_string(),
            sample: sample.to_string(),
            sample_size,
            alleles,
        }
    }

    /// Returns the allele frequencies.
    pub fn alleles(&self) -> &Alleles {
        &self.alleles
    }

    /// Returns the marker name.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Returns the sample name.
    pub fn sample(&self) -> &str {
        &self.sample
    }

    /// Returns the number of individuals sampled, or zero if unknown.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

/// An ordered collection of records.
///
/// Records are looked up by sample and marker, so the order of records does not affect any
/// statistics calculated from the dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset(Vec<Record>);

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over records in dataset order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Appends a record.
    pub fn push(&mut self, record: Record) {
        self.0.push(record)
    }

    /// Returns the records for the named sample, in dataset order.
    pub fn records_for<'a>(&'a self, sample: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.0.iter().filter(move |record| record.sample == sample)
    }

    /// Returns the number of individuals sampled for the named sample.
    ///
    /// This is taken from the first record of the sample with a known sample size.
    pub fn sample_size(&self, sample: &str) -> Option<usize> {
        self.records_for(sample)
            .map(Record::sample_size)
            .find(|&size| size > 0)
    }

    /// Returns the distinct sample names in the order they first appear.
    pub fn samples(&self) -> IndexSet<&str> {
        self.0.iter().map(|record| record.sample()).collect()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Record> for Dataset {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl IntoIterator for Dataset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // AB Cau FGA frequencies (n=200)
    pub fn fga() -> Alleles {
        Alleles::from([
            ("18", 0.015),
            ("19", 0.0625),
            ("20", 0.1625),
            ("20.2", 0.0075),
            ("21", 0.1775),
            ("22", 0.165),
            ("22.2", 0.005),
            ("23", 0.14),
            ("24", 0.1325),
            ("25", 0.1125),
            ("26", 0.015),
            ("27", 0.005),
        ])
    }

    // AB Cau TH01 frequencies (n=200)
    pub fn th01() -> Alleles {
        Alleles::from([
            ("6", 0.2525),
            ("7", 0.16),
            ("8", 0.0925),
            ("9", 0.1375),
            ("9.3", 0.35),
            ("10", 0.0075),
        ])
    }

    // AB Cau D16S539 frequencies (n=200)
    pub fn d16s539() -> Alleles {
        Alleles::from([
            ("8", 0.015),
            ("9", 0.1075),
            ("10", 0.0425),
            ("11", 0.2975),
            ("12", 0.3425),
            ("13", 0.175),
            ("14", 0.0175),
            ("15", 0.0025),
        ])
    }

    pub fn dataset_ab() -> Dataset {
        Dataset::from_iter([
            Record::new("FGA", "AB", 200, fga()),
            Record::new("TH01", "AB", 200, th01()),
            Record::new("D16S539", "AB", 200, d16s539()),
        ])
    }

    #[test]
    fn test_samples_in_first_seen_order() {
        let dataset = Dataset::from_iter([
            Record::new("FGA", "AB Cau", 200, fga()),
            Record::new("FGA", "AB Afr", 100, fga()),
            Record::new("TH01", "AB Cau", 200, th01()),
        ]);

        assert_eq!(
            dataset.samples().into_iter().collect::<Vec<_>>(),
            ["AB Cau", "AB Afr"]
        );
    }

    #[test]
    fn test_sample_size() {
        let mut dataset = Dataset::from_iter([Record::new("FGA", "AB", 0, fga())]);
        assert_eq!(dataset.sample_size("AB"), None);

        dataset.extend(dataset_ab());
        assert_eq!(dataset.sample_size("AB"), Some(200));
        assert_eq!(dataset.sample_size("CD"), None);
    }

    #[test]
    fn test_records_for_sample() {
        let mut dataset = dataset_ab();
        dataset.push(Record::new("FGA", "CD", 50, fga()));

        let markers = dataset
            .records_for("AB")
            .map(Record::marker)
            .collect::<Vec<_>>();

        assert_eq!(markers, ["FGA", "TH01", "D16S539"]);
        assert_eq!(dataset.records_for("EF").count(), 0);
    }
}
