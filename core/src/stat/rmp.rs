//! Random match probabilities.

use std::fmt;

use indexmap::IndexMap;

use crate::{
    pool::{pool, Cutoff},
    Alleles, Dataset, Panel,
};

use super::Theta;

/// Returns the random match probability at a single marker.
///
/// This is the probability that two unrelated individuals share the same genotype at the marker,
/// summed over all genotypes. An empty set of alleles gives zero.
pub fn marker_rmp(alleles: &Alleles, theta: Theta) -> f64 {
    alleles
        .iter()
        .map(|(i, p)| {
            alleles
                .iter()
                .map(|(j, q)| {
                    if i == j {
                        theta.homozygote(p).powi(2)
                    } else {
                        2. * theta.heterozygote_half(p, q).powi(2)
                    }
                })
                .sum::<f64>()
        })
        .sum()
}

/// Random match probabilities for a sample across a panel of markers.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelRmp {
    markers: IndexMap<String, f64>,
    sample_size: usize,
    combined: f64,
    reciprocal: f64,
}

impl PanelRmp {
    /// Returns the product of the per-marker match probabilities.
    pub fn combined(&self) -> f64 {
        self.combined
    }

    /// Returns the match probability at a marker, if the sample has data for the marker.
    pub fn get(&self, marker: &str) -> Option<f64> {
        self.markers.get(marker).copied()
    }

    /// Returns the per-marker match probabilities in dataset order.
    pub fn markers(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.markers
            .iter()
            .map(|(marker, &rmp)| (marker.as_str(), rmp))
    }

    /// Returns the markers in the panel that the sample has no data for.
    pub fn missing<'a>(&'a self, panel: &'a Panel) -> impl Iterator<Item = &'a str> + 'a {
        panel
            .iter()
            .filter(move |marker| !self.markers.contains_key(*marker))
    }

    /// Returns the reciprocal of the combined match probability.
    pub fn reciprocal(&self) -> f64 {
        self.reciprocal
    }

    /// Returns the number of individuals sampled, or zero if unknown.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

/// Calculates random match probabilities for a sample across a panel of markers.
///
/// Each record for the sample with a marker in the panel has its alleles pooled using `cutoff` as
/// a count threshold relative to the number of alleles sampled, before the match probability for
/// the marker is calculated. Markers in the panel without a matching record are left out of the
/// result, and only the first record is used if a marker is repeated.
pub fn panel_rmp(
    dataset: &Dataset,
    sample: &str,
    panel: &Panel,
    cutoff: f64,
    theta: Theta,
) -> Result<PanelRmp, PanelError> {
    let mut markers = IndexMap::new();
    let mut sample_size = None;
    let mut combined = 1.0;

    for record in dataset
        .records_for(sample)
        .filter(|record| panel.contains(record.marker()))
    {
        if markers.contains_key(record.marker()) {
            log::warn!(
                "sample '{sample}' has more than one record for marker {}, using first",
                record.marker()
            );
            continue;
        }

        match sample_size {
            Some(size) if size != record.sample_size() => log::warn!(
                "sample '{sample}' has size {size} and {} at marker {}",
                record.sample_size(),
                record.marker(),
            ),
            _ => (),
        }
        sample_size = Some(record.sample_size());

        // Each individual contributes two alleles
        let cutoff = Cutoff::new(cutoff, 2 * record.sample_size());
        let alleles = pool(record.alleles(), cutoff);
        let rmp = marker_rmp(&alleles, theta);

        log::debug!(
            "sample '{sample}' marker {}: pooled {} alleles into {}, RMP {rmp:.6}",
            record.marker(),
            record.alleles().len(),
            alleles.len(),
        );

        markers.insert(record.marker().to_string(), rmp);
        combined *= rmp;
    }

    if combined == 0.0 {
        return Err(PanelError::ZeroCombined {
            sample: sample.to_string(),
        });
    }

    let rmp = PanelRmp {
        markers,
        sample_size: sample_size.unwrap_or(0),
        combined,
        reciprocal: 1.0 / combined,
    };

    if let Some(missing) = rmp.missing(panel).next() {
        log::warn!("sample '{sample}' has no data for marker {missing}");
    }

    Ok(rmp)
}

/// An error associated with calculating match probabilities across a panel.
#[derive(Debug, Eq, PartialEq)]
pub enum PanelError {
    /// Combined match probability is zero, so the reciprocal is undefined.
    ZeroCombined {
        /// Sample name.
        sample: String,
    },
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::ZeroCombined { sample } => write!(
                f,
                "combined random match probability for sample '{sample}' is zero"
            ),
        }
    }
}

impl std::error::Error for PanelError {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        record::tests::{d16s539, dataset_ab, fga, th01},
        Record,
    };

    fn closed_form(alleles: &Alleles) -> f64 {
        let squares = alleles.iter().map(|(_, p)| p.powi(2)).sum::<f64>();
        let fourths = alleles.iter().map(|(_, p)| p.powi(4)).sum::<f64>();
        2. * squares.powi(2) - fourths
    }

    #[test]
    fn test_marker_rmp_survey_data() {
        assert_approx_eq!(marker_rmp(&th01(), Theta::ZERO), 0.094, epsilon = 5e-4);
        assert_approx_eq!(marker_rmp(&fga(), Theta::ZERO), 0.036, epsilon = 5e-4);
        assert_approx_eq!(marker_rmp(&d16s539(), Theta::ZERO), 0.103, epsilon = 5e-4);
    }

    #[test]
    fn test_marker_rmp_closed_form_at_zero() {
        for alleles in [th01(), fga(), d16s539()] {
            assert_approx_eq!(
                marker_rmp(&alleles, Theta::ZERO),
                closed_form(&alleles),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_marker_rmp_increases_with_theta() {
        let alleles = fga();

        let rmps = [0.0, 0.01, 0.03].map(|theta| marker_rmp(&alleles, Theta(theta)));

        assert!(rmps[0] < rmps[1]);
        assert!(rmps[1] < rmps[2]);
        assert_approx_eq!(rmps[1], 0.044603, epsilon = 1e-6);
    }

    #[test]
    fn test_marker_rmp_single_allele() {
        let alleles = Alleles::from([("10", 1.0)]);

        assert_approx_eq!(marker_rmp(&alleles, Theta::ZERO), 1.0);
    }

    #[test]
    fn test_marker_rmp_empty() {
        assert_eq!(marker_rmp(&Alleles::new(), Theta(0.01)), 0.0);
    }

    #[test]
    fn test_panel_rmp() {
        let rmp = panel_rmp(&dataset_ab(), "AB", &Panel::sgm_plus(), 0., Theta::ZERO).unwrap();

        assert_approx_eq!(rmp.get("FGA").unwrap(), 0.036, epsilon = 5e-4);
        assert_approx_eq!(rmp.get("TH01").unwrap(), 0.094, epsilon = 5e-4);
        assert_approx_eq!(rmp.get("D16S539").unwrap(), 0.103, epsilon = 5e-4);
        assert_eq!(rmp.sample_size(), 200);
        assert_approx_eq!(rmp.combined(), 3.449269e-4, epsilon = 1e-10);
        assert_eq!(rmp.reciprocal(), 1.0 / rmp.combined());
    }

    #[test]
    fn test_panel_rmp_missing_markers_absent() {
        let panel = Panel::sgm_plus();
        let rmp = panel_rmp(&dataset_ab(), "AB", &panel, 0., Theta::ZERO).unwrap();

        assert_eq!(rmp.markers().count(), 3);
        assert_eq!(rmp.get("VWA"), None);
        assert_eq!(
            rmp.missing(&panel).collect::<Vec<_>>(),
            [
                "VWA", "D2S1338", "D3S1358", "D8S1179", "D18S51", "D19S433", "D21S11"
            ]
        );
    }

    #[test]
    fn test_panel_rmp_skips_markers_outside_panel() {
        let mut dataset = dataset_ab();
        dataset.push(Record::new("D5S818", "AB", 200, fga()));

        let panel = Panel::from_iter(["FGA", "TH01"]);
        let rmp = panel_rmp(&dataset, "AB", &panel, 0., Theta::ZERO).unwrap();

        assert_eq!(
            rmp.markers().map(|(marker, _)| marker).collect::<Vec<_>>(),
            ["FGA", "TH01"]
        );
        assert_approx_eq!(
            rmp.combined(),
            marker_rmp(&fga(), Theta::ZERO) * marker_rmp(&th01(), Theta::ZERO)
        );
    }

    #[test]
    fn test_panel_rmp_pooling_uses_allele_count() {
        let panel = Panel::from_iter(["D16S539"]);
        let rmp = panel_rmp(&dataset_ab(), "AB", &panel, 5., Theta::ZERO).unwrap();

        let expected = marker_rmp(&pool(&d16s539(), Cutoff::new(5., 400)), Theta::ZERO);

        assert_approx_eq!(rmp.get("D16S539").unwrap(), expected);
        assert!(rmp.get("D16S539").unwrap() > marker_rmp(&d16s539(), Theta::ZERO));
    }

    #[test]
    fn test_panel_rmp_repeated_marker_uses_first_record() {
        let mut dataset = dataset_ab();
        dataset.push(Record::new("FGA", "AB", 200, th01()));
        dataset.extend(dataset_ab());

        let rmp = panel_rmp(&dataset, "AB", &Panel::sgm_plus(), 0., Theta::ZERO).unwrap();

        assert_eq!(rmp.markers().count(), 3);
        assert_eq!(rmp.get("FGA"), Some(marker_rmp(&fga(), Theta::ZERO)));
        assert_eq!(
            rmp.combined(),
            rmp.markers().map(|(_, rmp)| rmp).product::<f64>()
        );
    }

    #[test]
    fn test_panel_rmp_last_sample_size() {
        let dataset = Dataset::from_iter([
            Record::new("FGA", "AB", 200, fga()),
            Record::new("TH01", "AB", 150, th01()),
        ]);

        let rmp = panel_rmp(&dataset, "AB", &Panel::sgm_plus(), 0., Theta::ZERO).unwrap();

        assert_eq!(rmp.sample_size(), 150);
        assert_eq!(rmp.markers().count(), 2);
    }

    #[test]
    fn test_panel_rmp_unknown_sample() {
        let rmp = panel_rmp(&dataset_ab(), "CD", &Panel::sgm_plus(), 0., Theta::ZERO).unwrap();

        assert_eq!(rmp.markers().count(), 0);
        assert_eq!(rmp.sample_size(), 0);
        assert_eq!(rmp.combined(), 1.0);
        assert_eq!(rmp.reciprocal(), 1.0);
    }

    #[test]
    fn test_panel_rmp_zero_combined() {
        let dataset = Dataset::from_iter([Record::new("FGA", "AB", 0, Alleles::new())]);

        let result = panel_rmp(&dataset, "AB", &Panel::sgm_plus(), 0., Theta::ZERO);

        assert_eq!(
            result,
            Err(PanelError::ZeroCombined {
                sample: String::from("AB")
            })
        );
    }
}
