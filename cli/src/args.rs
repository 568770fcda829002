use std::{
    fs,
    io::{self, Write as _},
    path::PathBuf,
};

use anyhow::{anyhow, Error};

use clap::{Args, ValueEnum};
use strprofiles_core::{io::read, table::Format, Dataset, Input, Panel, Table};

/// Arguments selecting the allele frequency data to use.
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// Input allele frequency matrices.
    ///
    /// Each file should be a CSV matrix with marker names in the first row, sample names in the
    /// second row, optionally preceded by the number of individuals sampled (e.g. "200 AB Cau"),
    /// and allele frequencies in the following rows. Gzip-compressed files are supported. If more
    /// than one file is provided, the data are combined. If no file is provided, stdin will be
    /// used.
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Normalizer for input values.
    ///
    /// Values are divided by the normalizer to obtain frequencies. Use 100 for percentages.
    #[arg(short = 'n', long, default_value_t = 1.0, value_name = "FLOAT")]
    pub normalizer: f64,

    /// Samples to use.
    ///
    /// By default, all samples in the input are used, in the order they first appear. Multiple,
    /// comma-separated values can be provided.
    #[arg(short = 's', long, use_value_delimiter = true, value_name = "SAMPLE,...")]
    pub samples: Option<Vec<String>>,

    /// Marker panel.
    ///
    /// By default, the ten markers of the SGM Plus panel are used. Multiple, comma-separated
    /// values can be provided.
    #[arg(short = 'm', long, use_value_delimiter = true, value_name = "MARKER,...")]
    pub markers: Option<Vec<String>>,
}

impl DatasetArgs {
    pub fn panel(&self) -> Panel {
        match &self.markers {
            Some(markers) => Panel::from_iter(markers),
            None => Panel::sgm_plus(),
        }
    }

    pub fn read_dataset(&self) -> Result<Dataset, Error> {
        let builder = || read::Builder::default().set_normalizer(self.normalizer);

        let mut dataset = Dataset::new();
        if self.inputs.is_empty() {
            dataset.extend(builder()?.read_from_input(&Input::new(None)?)?);
        } else {
            for path in self.inputs.iter() {
                let records = builder()?
                    .read_from_path(path)
                    .map_err(|e| anyhow!("failed to read '{}': {e}", path.display()))?;

                dataset.extend(records);
            }
        }

        log::info!(
            "read {} records for {} samples",
            dataset.len(),
            dataset.samples().len()
        );

        Ok(dataset)
    }

    pub fn samples(&self, dataset: &Dataset) -> Vec<String> {
        match &self.samples {
            Some(samples) => {
                let known = dataset.samples();
                for sample in samples.iter().filter(|s| !known.contains(s.as_str())) {
                    log::warn!("no data found for sample '{sample}'");
                }

                samples.clone()
            }
            None => dataset.samples().into_iter().map(String::from).collect(),
        }
    }
}

/// Arguments controlling how results are written.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output table format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output path.
    ///
    /// If no path is given, the table will be written to stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Precision to use when printing probabilities.
    #[arg(short = 'p', long, default_value_t = 4, value_name = "INT")]
    pub precision: usize,
}

impl OutputArgs {
    pub fn write(&self, table: &Table) -> Result<(), Error> {
        let format = Format::from(self.format);

        match &self.output {
            Some(path) => {
                let mut writer = io::BufWriter::new(fs::File::create(path)?);
                table.write(&mut writer, format)?;
                writer.flush()?;
            }
            None => table.write(&mut io::stdout().lock(), format)?,
        }

        Ok(())
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    /// Aligned plain text.
    Text,
    /// Comma-separated values.
    Csv,
    /// HTML table.
    Html,
}

impl From<OutputFormat> for Format {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Text => Format::Text,
            OutputFormat::Csv => Format::Csv,
            OutputFormat::Html => Format::Html,
        }
    }
}
