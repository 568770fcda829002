#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Match probability statistics for STR allele frequency data.
//!
//! This serves as the core library implementation for the `strprofiles` CLI, but can also be used
//! as a free-standing library for forensic match statistics.
//!
//! # Overview
//!
//! Survey data are held in a [`Dataset`] of [`Record`]s, each giving the allele frequencies of
//! one population sample at one STR marker. From a dataset, two kinds of statistics are
//! calculated:
//!
//! - The random match probability (RMP) of a sample at each marker of a [`Panel`], optionally
//!   after [pooling](pool::pool) rare alleles, and combined across the panel. See
//!   [`stat::panel_rmp`].
//! - The profile match probability (PMP) of the modal profile of a sample, i.e. the genotype
//!   made up of the most common alleles at each marker. See [`stat::modal_profile`] and
//!   [`stat::profile_match_probability`].
//!
//! Both may be corrected for population subdivision by means of a coefficient [`Theta`].
//!
//! # Example
//!
//! ```
//! use strprofiles_core::{stat, Alleles, Dataset, Panel, Record, Theta};
//!
//! let th01 = Alleles::from([("6", 0.25), ("7", 0.16), ("9", 0.14), ("9.3", 0.35), ("10", 0.1)]);
//! let dataset = Dataset::from_iter([Record::new("TH01", "AB Cau", 200, th01)]);
//! let panel = Panel::from_iter(["TH01"]);
//!
//! // Calculate random match probabilities, without pooling
//! let rmp = stat::panel_rmp(&dataset, "AB Cau", &panel, 0.0, Theta::ZERO)?;
//! assert_eq!(rmp.reciprocal(), 1.0 / rmp.combined());
//!
//! // Calculate the profile match probability of the modal profile
//! let profile = stat::modal_profile(&dataset, "AB Cau", &panel)?;
//! let pmp = stat::profile_match_probability(&profile, Theta(0.01));
//! assert!(pmp > 2.0 * 0.35 * 0.25);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[cfg(test)]
#[macro_use]
pub(crate) mod approx;

pub mod allele;
pub use allele::{Allele, Alleles};

pub mod input;
pub use input::Input;

pub mod io;

pub mod panel;
pub use panel::Panel;

pub mod pool;
pub use pool::Cutoff;

pub mod record;
pub use record::{Dataset, Record};

pub mod stat;
pub use stat::Theta;

pub mod table;
pub use table::Table;
