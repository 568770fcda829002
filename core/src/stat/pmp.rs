//! Profile match probabilities.

use super::{Profile, Theta};

/// Returns the probability that a random unrelated individual matches a profile.
///
/// This is the product over markers of the probability of the called genotype. An empty profile
/// gives one.
pub fn profile_match_probability(profile: &Profile, theta: Theta) -> f64 {
    profile
        .iter()
        .map(|(marker, pair)| {
            let (_, p) = pair.first();
            let (_, q) = pair.second();

            let probability = if pair.is_homozygous() {
                theta.homozygote(p)
            } else {
                theta.heterozygote(p, q)
            };

            log::trace!("marker {marker}: genotype {pair} has probability {probability:.6}");

            probability
        })
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::stat::{profile::tests::profile_counts, AllelePair};

    #[test]
    fn test_profile_match_probability() {
        let profile = Profile::from_iter([
            ("FGA", AllelePair::new(("21", 0.1775), ("22", 0.165))),
            ("TH01", AllelePair::new(("9.3", 0.35), ("6", 0.2525))),
            ("D16S539", AllelePair::new(("12", 0.3425), ("11", 0.2975))),
            ("VWA", AllelePair::homozygous("5", 0.94)),
        ]);

        let expected =
            2. * 0.1775 * 0.165 * 2. * 0.35 * 0.2525 * 2. * 0.3425 * 0.2975 * 0.94 * 0.94;

        assert_approx_eq!(
            profile_match_probability(&profile, Theta::ZERO),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_profile_match_probability_theta() {
        let profile = profile_counts();

        let pmps = [0.0, 0.01, 0.03].map(|theta| profile_match_probability(&profile, Theta(theta)));

        assert_approx_eq!(pmps[0], 7.58e-14, epsilon = 1e-16);
        assert_approx_eq!(pmps[1], 2.44e-13, epsilon = 1e-15);
        assert_approx_eq!(pmps[2], 1.614e-12, epsilon = 1e-14);
        assert!(pmps[0] < pmps[1] && pmps[1] < pmps[2]);
    }

    #[test]
    fn test_profile_match_probability_size_bias_corrected() {
        let profile = profile_counts().size_bias_corrected(200);

        assert_approx_eq!(
            profile_match_probability(&profile, Theta::ZERO),
            1.4225e-13,
            epsilon = 1e-17
        );
    }

    #[test]
    fn test_profile_match_probability_empty() {
        assert_eq!(profile_match_probability(&Profile::new(), Theta(0.01)), 1.0);
    }
}
