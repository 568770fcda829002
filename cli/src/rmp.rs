use anyhow::Error;

use clap::Parser;
use indexmap::IndexMap;
use strprofiles_core::{stat, Table, Theta};

use crate::args::{DatasetArgs, OutputArgs};

/// Calculate random match probabilities.
///
/// For each sample, the probability that two unrelated individuals share a genotype is
/// calculated at each marker of the panel, and combined across markers.
#[derive(Debug, Parser)]
pub struct Rmp {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Pooling cutoff.
    ///
    /// Alleles are pooled into a single bin, starting from the least frequent, until the bin and
    /// all remaining alleles have a count of at least the cutoff. If the sample size is unknown,
    /// the cutoff is used as a frequency instead. By default, no alleles are pooled.
    #[arg(short = 'c', long, default_value_t = 0.0, value_name = "FLOAT")]
    cutoff: f64,

    /// Population subdivision coefficient θ.
    #[arg(short = 't', long, default_value_t = Theta::ZERO, value_name = "FLOAT")]
    theta: Theta,

    #[command(flatten)]
    output: OutputArgs,
}

impl Rmp {
    pub fn run(self) -> Result<(), Error> {
        let dataset = self.dataset.read_dataset()?;
        let panel = self.dataset.panel();

        let results = self
            .dataset
            .samples(&dataset)
            .into_iter()
            .map(|sample| {
                let rmp = stat::panel_rmp(&dataset, &sample, &panel, self.cutoff, self.theta)?;
                log::info!(
                    "sample '{sample}': combined RMP {:e} across {} markers",
                    rmp.combined(),
                    rmp.markers().count()
                );
                Ok::<_, Error>((sample, rmp))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        self.output
            .write(&Table::rmp(&results, &panel, self.output.precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::error::ErrorKind as ClapErrorKind;

    use crate::tests::{parse_subcmd, try_parse_subcmd};

    #[test]
    fn test_defaults() {
        let args = parse_subcmd::<Rmp>("strprofiles rmp data.csv");

        assert_eq!(args.cutoff, 0.0);
        assert_eq!(args.theta, Theta::ZERO);
        assert_eq!(args.output.precision, 4);
        assert_eq!(args.dataset.panel().len(), 10);
    }

    #[test]
    fn test_parse_markers_and_samples() {
        let args = parse_subcmd::<Rmp>("strprofiles rmp -m FGA,TH01 -s Cau,Afr -t 0.01 data.csv");

        assert_eq!(
            args.dataset.panel().iter().collect::<Vec<_>>(),
            ["FGA", "TH01"]
        );
        assert_eq!(
            args.dataset.samples,
            Some(vec![String::from("Cau"), String::from("Afr")])
        );
        assert_eq!(args.theta, Theta(0.01));
    }

    #[test]
    fn test_theta_out_of_range() {
        let result = try_parse_subcmd::<Rmp>("strprofiles rmp -t 1.5 data.csv");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::ValueValidation);
    }
}
