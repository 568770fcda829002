//! Tables of results.
//!
//! A table has one column per sample and one row per marker or θ, and may be written as aligned
//! plain text, CSV, or HTML.

use std::{fmt, io};

use indexmap::IndexMap;

use crate::{
    stat::{PanelRmp, Profile, Theta},
    Panel,
};

const MISSING: &str = "-";

/// A table of formatted cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    corner: String,
    columns: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
}

impl Table {
    /// Creates a new table without rows.
    ///
    /// The corner is the header of the column of row labels.
    pub fn new<S, I>(corner: S, columns: I) -> Self
    where
        S: ToString,
        I: IntoIterator,
        I::Item: ToString,
    {
        Self {
            corner: corner.to_string(),
            columns: columns.into_iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Adds a row to the table.
    ///
    /// Missing cells are filled in, and surplus cells are dropped.
    pub fn push_row<S, I>(&mut self, label: S, cells: I)
    where
        S: ToString,
        I: IntoIterator,
        I::Item: ToString,
    {
        let mut cells = cells
            .into_iter()
            .map(|cell| cell.to_string())
            .collect::<Vec<_>>();
        cells.resize(self.columns.len(), String::from(MISSING));

        self.rows.push((label.to_string(), cells));
    }

    /// Creates a table of random match probabilities.
    ///
    /// Rows are the markers of the panel followed by the sample size, the combined match
    /// probability, and its reciprocal.
    pub fn rmp(results: &IndexMap<String, PanelRmp>, panel: &Panel, precision: usize) -> Self {
        let mut table = Self::new("Marker", results.keys());

        for marker in panel.iter() {
            table.push_row(
                marker,
                results.values().map(|rmp| match rmp.get(marker) {
                    Some(v) => format!("{v:.precision$}"),
                    None => String::from(MISSING),
                }),
            );
        }

        table.push_row("Count", results.values().map(|rmp| rmp.sample_size()));
        table.push_row(
            "Combined",
            results
                .values()
                .map(|rmp| format!("{:.precision$e}", rmp.combined())),
        );
        table.push_row(
            "Reciprocal",
            results
                .values()
                .map(|rmp| format!("{:.precision$e}", rmp.reciprocal())),
        );

        table
    }

    /// Creates a table of reciprocal profile match probabilities.
    ///
    /// Each sample maps to its profile match probabilities, one for each θ in order.
    pub fn pmp(thetas: &[Theta], results: &IndexMap<String, Vec<f64>>, precision: usize) -> Self {
        let mut table = Self::new("Theta", results.keys());

        for (i, theta) in thetas.iter().enumerate() {
            table.push_row(
                theta,
                results.values().map(|pmps| match pmps.get(i) {
                    Some(pmp) => format!("{:.precision$e}", 1.0 / pmp),
                    None => String::from(MISSING),
                }),
            );
        }

        table
    }

    /// Creates a table of called genotypes.
    pub fn profile(profiles: &IndexMap<String, Profile>, panel: &Panel) -> Self {
        let mut table = Self::new("Marker", profiles.keys());

        for marker in panel.iter() {
            table.push_row(
                marker,
                profiles.values().map(|profile| match profile.get(marker) {
                    Some(pair) => pair.to_string(),
                    None => String::from(MISSING),
                }),
            );
        }

        table
    }

    /// Write table to writer in the given format.
    pub fn write<W>(&self, writer: &mut W, format: Format) -> io::Result<()>
    where
        W: io::Write,
    {
        match format {
            Format::Text => self.write_text(writer),
            Format::Csv => self.write_csv(writer),
            Format::Html => self.write_html(writer),
        }
    }

    fn header(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.corner.as_str()).chain(self.columns.iter().map(String::as_str))
    }

    fn iter_rows(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.rows
            .iter()
            .map(|(label, cells)| (label.as_str(), cells.as_slice()))
    }

    fn write_text<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        fn text_width(s: &str) -> usize {
            s.chars().count()
        }

        let label_width = self
            .iter_rows()
            .map(|(label, _)| text_width(label))
            .fold(text_width(&self.corner), usize::max);

        let widths = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.iter_rows()
                    .map(|(_, cells)| text_width(&cells[i]))
                    .fold(text_width(column), usize::max)
            })
            .collect::<Vec<_>>();

        write_text_line(writer, (&self.corner, label_width), &self.columns, &widths)?;
        for (label, cells) in self.iter_rows() {
            write_text_line(writer, (label, label_width), cells, &widths)?;
        }

        Ok(())
    }

    fn write_csv<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        let mut writer = csv::Writer::from_writer(writer);

        writer.write_record(self.header())?;
        for (label, cells) in self.iter_rows() {
            writer.write_record(std::iter::once(label).chain(cells.iter().map(String::as_str)))?;
        }

        writer.flush()
    }

    fn write_html<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writeln!(writer, "<table>")?;

        writeln!(writer, "<thead>")?;
        write!(writer, "<tr>")?;
        for header in self.header() {
            write!(writer, "<th>{}</th>", Escaped(header))?;
        }
        writeln!(writer, "</tr>")?;
        writeln!(writer, "</thead>")?;

        writeln!(writer, "<tbody>")?;
        for (label, cells) in self.iter_rows() {
            write!(writer, "<tr><th>{}</th>", Escaped(label))?;
            for cell in cells {
                write!(writer, "<td>{}</td>", Escaped(cell))?;
            }
            writeln!(writer, "</tr>")?;
        }
        writeln!(writer, "</tbody>")?;

        writeln!(writer, "</table>")
    }
}

fn write_text_line<W>(
    writer: &mut W,
    (label, label_width): (&str, usize),
    cells: &[String],
    widths: &[usize],
) -> io::Result<()>
where
    W: io::Write,
{
    write!(writer, "{label:<label_width$}")?;
    for (cell, &width) in cells.iter().zip(widths) {
        write!(writer, "  {cell:>width$}")?;
    }
    writeln!(writer)
}

struct Escaped<'a>(&'a str);

impl<'a> fmt::Display for Escaped<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                c => write!(f, "{c}")?,
            }
        }

        Ok(())
    }
}

/// An output format for tables.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Format {
    /// Aligned plain text.
    #[default]
    Text,
    /// Comma-separated values.
    Csv,
    /// HTML table.
    Html,
}
