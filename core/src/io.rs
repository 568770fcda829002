//! Reading allele frequency data.
//!
//! Allele frequency surveys are read from a matrix in CSV format. The first column holds allele
//! labels, and every other column holds the frequencies of one population sample at one marker.
//! The first row names the marker of each column; a marker may span several contiguous columns,
//! in which case only the first of them needs to be named. The second row names the sample of each
//! column, optionally preceded by the number of individuals sampled, as in `200 AB Cau`. Every
//! following row gives an allele label and its frequency in each column, where a blank cell means
//! that the allele was not observed. An example:
//!
//! ```text
//! ,FGA,,TH01,
//! ,200 AB Cau,100 AB Afr,200 AB Cau,100 AB Afr
//! 9.3,,,35.00,12.50
//! 21,17.75,14.00,,
//! ```
//!
//! Values are divided by a normalizer to obtain frequencies, e.g. 100 for percentages.

pub mod read;
pub use read::{Builder, ReadError};
