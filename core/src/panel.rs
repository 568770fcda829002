//! Marker panels.

use std::fmt;

use indexmap::IndexSet;

/// An ordered set of marker names considered in a calculation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Panel(IndexSet<String>);

impl Panel {
    /// Markers of the SGM Plus multiplex.
    pub const SGM_PLUS: [&'static str; 10] = [
        "FGA", "TH01", "VWA", "D2S1338", "D3S1358", "D8S1179", "D16S539", "D18S51", "D19S433",
        "D21S11",
    ];

    /// Creates the SGM Plus panel.
    pub fn sgm_plus() -> Self {
        Self::from_iter(Self::SGM_PLUS)
    }

    /// Returns `true` if the marker is in the panel.
    pub fn contains(&self, marker: &str) -> bool {
        self.0.contains(marker)
    }

    /// Returns `true` if the panel has no markers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over marker names in panel order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of markers.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S> FromIterator<S> for Panel
where
    S: ToString,
{
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(|marker| marker.to_string()).collect())
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, marker) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(marker)?;
        }

        Ok(())
    }
}
