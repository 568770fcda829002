//! Utilities for reading datasets.

use std::{fmt, io, path::Path};

use flate2::bufread::MultiGzDecoder;

use crate::{input::Input, Allele, Alleles, Dataset, Record};

/// A builder to read a dataset.
#[derive(Debug)]
pub struct Builder {
    normalizer: f64,
}

impl Builder {
    /// Read dataset from reader.
    ///
    /// Gzip-compressed input is detected and decompressed automatically.
    pub fn read<R>(self, mut reader: R) -> Result<Dataset, ReadError>
    where
        R: io::BufRead,
    {
        match CompressionMethod::detect(&mut reader)? {
            Some(CompressionMethod::Gzip) => self.read_csv(MultiGzDecoder::new(reader)),
            None => self.read_csv(reader),
        }
    }

    /// Read dataset from input.
    pub fn read_from_input(self, input: &Input) -> Result<Dataset, ReadError> {
        let dataset = self.read(input.open()?)?;

        log::debug!("read {} records from {input}", dataset.len());

        Ok(dataset)
    }

    /// Read dataset from path.
    pub fn read_from_path<P>(self, path: P) -> Result<Dataset, ReadError>
    where
        P: AsRef<Path>,
    {
        self.read_from_path_or_stdin(Some(path))
    }

    /// Read dataset from path or stdin.
    ///
    /// If the provided path is `None`, read from stdin.
    pub fn read_from_path_or_stdin<P>(self, path: Option<P>) -> Result<Dataset, ReadError>
    where
        P: AsRef<Path>,
    {
        let input = Input::new_unchecked(path.map(|path| path.as_ref().to_path_buf()));
        self.read_from_input(&input)
    }

    /// Set normalizer.
    ///
    /// Values are divided by the normalizer to obtain frequencies. If unset, values are assumed to
    /// be frequencies already, i.e. a normalizer of one is used.
    pub fn set_normalizer(mut self, normalizer: f64) -> Result<Self, ReadError> {
        if normalizer.is_finite() && normalizer > 0.0 {
            self.normalizer = normalizer;
            Ok(self)
        } else {
            Err(ReadError::InvalidNormalizer { normalizer })
        }
    }

    fn read_csv<R>(&self, reader: R) -> Result<Dataset, ReadError>
    where
        R: io::Read,
    {
        let mut rows = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();

        let markers = rows.next().ok_or(ReadError::Empty)??;
        let samples = rows.next().ok_or(ReadError::MissingSamples)??;

        let mut columns = Columns::from_header(&markers, &samples)?;

        for (i, row) in rows.enumerate() {
            // Two header rows precede data, and rows are reported one-based
            columns.add_row(&row?, i + 3, self.normalizer)?;
        }

        Ok(columns.into_dataset())
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self { normalizer: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CompressionMethod {
    // Includes BGZF
    Gzip,
}

impl CompressionMethod {
    fn detect<R>(reader: &mut R) -> io::Result<Option<Self>>
    where
        R: io::BufRead,
    {
        const GZIP_MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

        let src = reader.fill_buf()?;

        if let Some(buf) = src.get(..GZIP_MAGIC_NUMBER.len()) {
            if buf == GZIP_MAGIC_NUMBER {
                return Ok(Some(CompressionMethod::Gzip));
            }
        }

        Ok(None)
    }
}

#[derive(Debug)]
struct Column {
    index: usize,
    marker: String,
    sample: String,
    sample_size: usize,
    alleles: Alleles,
}

#[derive(Debug)]
struct Columns(Vec<Column>);

impl Columns {
    fn from_header(
        markers: &csv::StringRecord,
        samples: &csv::StringRecord,
    ) -> Result<Self, ReadError> {
        let width = markers.len().max(samples.len());

        let mut columns = Vec::new();
        let mut current_marker: Option<&str> = None;
        for index in 1..width {
            let marker = markers.get(index).map(str::trim).unwrap_or_default();
            let sample = samples.get(index).map(str::trim).unwrap_or_default();

            if !marker.is_empty() {
                current_marker = Some(marker);
            }

            match (current_marker, sample.is_empty()) {
                (_, true) if marker.is_empty() => continue,
                (_, true) => return Err(ReadError::MissingSample { column: index + 1 }),
                (None, false) => return Err(ReadError::MissingMarker { column: index + 1 }),
                (Some(marker), false) => {
                    let (sample_size, sample) = parse_sample(sample);
                    columns.push(Column {
                        index,
                        marker: marker.to_string(),
                        sample: sample.to_string(),
                        sample_size,
                        alleles: Alleles::new(),
                    });
                }
            }
        }

        Ok(Self(columns))
    }

    fn add_row(
        &mut self,
        row: &csv::StringRecord,
        row_number: usize,
        normalizer: f64,
    ) -> Result<(), ReadError> {
        let label = match row.get(0).map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => {
                log::trace!("skipping row {row_number} without allele label");
                return Ok(());
            }
        };

        for column in self.0.iter_mut() {
            let cell = row.get(column.index).map(str::trim).unwrap_or_default();
            if cell.is_empty() {
                continue;
            }

            let value = cell.parse::<f64>().map_err(|_| ReadError::InvalidValue {
                row: row_number,
                column: column.index + 1,
                value: cell.to_string(),
            })?;

            if value.is_sign_negative() || !value.is_finite() {
                return Err(ReadError::InvalidValue {
                    row: row_number,
                    column: column.index + 1,
                    value: cell.to_string(),
                });
            }

            if column
                .alleles
                .insert(Allele::named(label), value / normalizer)
                .is_some()
            {
                log::warn!(
                    "allele {label} listed more than once for sample '{}' at marker {}, \
                    using last value",
                    column.sample,
                    column.marker,
                );
            }
        }

        Ok(())
    }

    fn into_dataset(self) -> Dataset {
        self.0
            .into_iter()
            .map(|column| {
                Record::new(
                    column.marker,
                    column.sample,
                    column.sample_size,
                    column.alleles,
                )
            })
            .collect()
    }
}

/// Splits a sample cell into the number of individuals sampled and the sample name.
///
/// If the cell does not start with a number, the sample size is zero.
fn parse_sample(s: &str) -> (usize, &str) {
    s.split_once(char::is_whitespace)
        .and_then(|(size, name)| {
            size.parse::<usize>()
                .ok()
                .map(|size| (size, name.trim_start()))
        })
        .unwrap_or((0, s))
}

/// An error associated with reading a dataset.
#[derive(Debug)]
pub enum ReadError {
    /// Malformed CSV.
    Csv(csv::Error),
    /// Input is empty.
    Empty,
    /// Value cell is not a non-negative number.
    InvalidValue {
        /// One-based row number.
        row: usize,
        /// One-based column number.
        column: usize,
        /// Cell contents.
        value: String,
    },
    /// Normalizer is not a positive number.
    InvalidNormalizer {
        /// Normalizer.
        normalizer: f64,
    },
    /// I/O error.
    Io(io::Error),
    /// Column has a sample but no marker.
    MissingMarker {
        /// One-based column number.
        column: usize,
    },
    /// Column has a marker but no sample.
    MissingSample {
        /// One-based column number.
        column: usize,
    },
    /// Input has no row of sample names.
    MissingSamples,
}

impl From<csv::Error> for ReadError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Csv(e) => write!(f, "{e}"),
            ReadError::Empty => f.write_str("empty input"),
            ReadError::InvalidValue { row, column, value } => write!(
                f,
                "invalid value '{value}' in row {row}, column {column}: \
                expected non-negative number"
            ),
            ReadError::InvalidNormalizer { normalizer } => write!(
                f,
                "invalid normalizer {normalizer}: expected positive number"
            ),
            ReadError::Io(e) => write!(f, "{e}"),
            ReadError::MissingMarker { column } => {
                write!(f, "no marker name found for column {column}")
            }
            ReadError::MissingSample { column } => {
                write!(f, "no sample name found for column {column}")
            }
            ReadError::MissingSamples => f.write_str("missing row of sample names"),
        }
    }
}

impl std::error::Error for ReadError {}
