use anyhow::{anyhow, Error};

use clap::Parser;
use indexmap::IndexMap;
use strprofiles_core::{stat, Table, Theta};

use crate::args::{DatasetArgs, OutputArgs};

/// Calculate profile match probabilities of modal profiles.
///
/// For each sample, the modal profile is built from the most frequent alleles at each marker of
/// the panel, and the reciprocal of the probability that a random unrelated individual matches
/// the profile is output for each θ.
#[derive(Debug, Parser)]
pub struct Pmp {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Population subdivision coefficients θ.
    ///
    /// Multiple, comma-separated values can be provided, each giving a row of output.
    #[arg(
        short = 't',
        long,
        use_value_delimiter = true,
        default_values_t = [Theta::ZERO, Theta(0.01), Theta(0.03)],
        value_name = "FLOAT,..."
    )]
    theta: Vec<Theta>,

    /// Correct profile frequencies for sample size bias.
    ///
    /// The profile is counted as part of the survey sample when estimating allele frequencies.
    /// Requires sample sizes in the input.
    #[arg(short = 'b', long)]
    size_bias_correction: bool,

    #[command(flatten)]
    output: OutputArgs,
}

impl Pmp {
    pub fn run(self) -> Result<(), Error> {
        let dataset = self.dataset.read_dataset()?;
        let panel = self.dataset.panel();

        let mut results = IndexMap::new();
        for sample in self.dataset.samples(&dataset) {
            let mut profile = stat::modal_profile(&dataset, &sample, &panel)?;

            if profile.is_empty() {
                log::warn!("sample '{sample}' has no markers in panel, match probability is one");
            }

            if self.size_bias_correction {
                let individuals = dataset.sample_size(&sample).ok_or_else(|| {
                    anyhow!("size bias correction requires sample size for sample '{sample}'")
                })?;
                profile = profile.size_bias_corrected(individuals);
            }

            let pmps = self
                .theta
                .iter()
                .map(|&theta| stat::profile_match_probability(&profile, theta))
                .collect::<Vec<_>>();

            log::debug!("sample '{sample}': profile match probabilities {pmps:?}");

            results.insert(sample, pmps);
        }

        self.output
            .write(&Table::pmp(&self.theta, &results, self.output.precision))
    }
}
