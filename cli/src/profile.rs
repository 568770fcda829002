use anyhow::Error;

use clap::Parser;
use indexmap::IndexMap;
use strprofiles_core::{stat, Table};

use crate::args::{DatasetArgs, OutputArgs};

/// Print modal profiles.
///
/// For each sample, the genotype made up of the most frequent alleles at each marker of the panel
/// is printed. A marker is called homozygous for the most frequent allele if that genotype is
/// more probable than the heterozygote of the two most frequent alleles.
#[derive(Debug, Parser)]
pub struct Profile {
    #[command(flatten)]
    dataset: DatasetArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl Profile {
    pub fn run(self) -> Result<(), Error> {
        let dataset = self.dataset.read_dataset()?;
        let panel = self.dataset.panel();

        let mut profiles = IndexMap::new();
        for sample in self.dataset.samples(&dataset) {
            let profile = stat::modal_profile(&dataset, &sample, &panel)?;
            profiles.insert(sample, profile);
        }

        self.output.write(&Table::profile(&profiles, &panel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use crate::args::OutputFormat;
    use crate::tests::parse_subcmd;

    #[test]
    fn test_parse_inputs_and_format() {
        let args = parse_subcmd::<Profile>("strprofiles profile -f csv -n 100 a.csv b.csv.gz");

        assert_eq!(
            args.dataset.inputs,
            [PathBuf::from("a.csv"), PathBuf::from("b.csv.gz")]
        );
        assert_eq!(args.dataset.normalizer, 100.0);
        assert_eq!(args.output.format, OutputFormat::Csv);
        assert_eq!(args.output.output, None);
    }
}
