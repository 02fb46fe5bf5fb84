//! Binomial detection counts
//!
//! Each replicate's live ticks are independent trials with the replicate's
//! detection probability. Abundance and probability are paired by position.

use rand::Rng;
use rand_distr::{Binomial, Distribution};
use tracing::debug;

use crate::core::error::{Result, SimError};
use crate::core::types::{AbundanceSample, ByGroup, DetectionCount, DetectionProbability, Group};

/// Draw one detection count per replicate
///
/// Both series must belong to the same group and have the same length.
pub fn sample_detections<R: Rng + ?Sized>(
    abundance: &[AbundanceSample],
    probabilities: &[DetectionProbability],
    rng: &mut R,
) -> Result<Vec<DetectionCount>> {
    if abundance.len() != probabilities.len() {
        let group = abundance
            .first()
            .map(|a| a.group)
            .or_else(|| probabilities.first().map(|p| p.group))
            .unwrap_or(Group::Warm);
        return Err(SimError::SeriesMismatch {
            group,
            expected: format!("{} probabilities", abundance.len()),
            found: probabilities.len().to_string(),
        });
    }

    abundance
        .iter()
        .zip(probabilities)
        .map(|(a, p)| {
            if a.group != p.group {
                return Err(SimError::SeriesMismatch {
                    group: a.group,
                    expected: format!("{} probability at replicate {}", a.group, a.replicate),
                    found: p.group.to_string(),
                });
            }
            let binomial = Binomial::new(a.count, p.probability).map_err(|e| {
                SimError::Distribution(format!(
                    "{} replicate {}: {}",
                    a.group, a.replicate, e
                ))
            })?;
            Ok(DetectionCount {
                group: a.group,
                replicate: a.replicate,
                day: a.day,
                count: binomial.sample(rng),
            })
        })
        .collect()
}

/// Detection counts for both groups, warm first
pub fn sample_groups<R: Rng + ?Sized>(
    abundance: &ByGroup<Vec<AbundanceSample>>,
    probabilities: &ByGroup<Vec<DetectionProbability>>,
    rng: &mut R,
) -> Result<ByGroup<Vec<DetectionCount>>> {
    let warm = sample_detections(&abundance.warm, &probabilities.warm, rng)?;
    let cold = sample_detections(&abundance.cold, &probabilities.cold, rng)?;

    for (group, counts) in [(Group::Warm, &warm), (Group::Cold, &cold)] {
        let total: u64 = counts.iter().map(|c| c.count).sum();
        debug!(%group, total, "detections sampled");
    }

    Ok(ByGroup::new(warm, cold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn abundance(group: Group, counts: &[u64]) -> Vec<AbundanceSample> {
        counts
            .iter()
            .enumerate()
            .map(|(replicate, &count)| AbundanceSample {
                group,
                replicate,
                day: replicate as f64,
                count,
            })
            .collect()
    }

    fn probabilities(group: Group, values: &[f64]) -> Vec<DetectionProbability> {
        values
            .iter()
            .enumerate()
            .map(|(replicate, &probability)| DetectionProbability {
                group,
                replicate,
                day: replicate as f64,
                distance: 0.0,
                probability,
            })
            .collect()
    }

    #[test]
    fn test_detections_bounded_by_abundance() {
        let counts = [0, 1, 10, 95, 120];
        let a = abundance(Group::Warm, &counts);
        let p = probabilities(Group::Warm, &[0.3, 0.9, 0.5, 0.45, 0.99]);
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        for _ in 0..50 {
            let detections = sample_detections(&a, &p, &mut rng).unwrap();
            for (d, &n) in detections.iter().zip(&counts) {
                assert!(d.count <= n);
            }
        }
    }

    #[test]
    fn test_zero_probability_detects_nothing() {
        let a = abundance(Group::Cold, &[50, 80]);
        let p = probabilities(Group::Cold, &[0.0, 0.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(22);

        let detections = sample_detections(&a, &p, &mut rng).unwrap();
        assert!(detections.iter().all(|d| d.count == 0));
    }

    #[test]
    fn test_zero_abundance_detects_nothing() {
        let a = abundance(Group::Warm, &[0, 0, 0]);
        let p = probabilities(Group::Warm, &[0.2, 0.5, 0.8]);
        let mut rng = ChaCha8Rng::seed_from_u64(23);

        let detections = sample_detections(&a, &p, &mut rng).unwrap();
        assert!(detections.iter().all(|d| d.count == 0));
    }

    #[test]
    fn test_pairs_by_position_and_keeps_keys() {
        let a = abundance(Group::Warm, &[10, 20]);
        let p = probabilities(Group::Warm, &[0.5, 0.5]);
        let mut rng = ChaCha8Rng::seed_from_u64(24);

        let detections = sample_detections(&a, &p, &mut rng).unwrap();
        assert_eq!(detections[1].replicate, 1);
        assert_eq!(detections[1].day, 1.0);
        assert_eq!(detections[1].group, Group::Warm);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let a = abundance(Group::Warm, &[10, 20]);
        let p = probabilities(Group::Warm, &[0.5]);
        let mut rng = ChaCha8Rng::seed_from_u64(25);

        assert!(matches!(
            sample_detections(&a, &p, &mut rng),
            Err(SimError::SeriesMismatch { .. })
        ));
        assert!(sample_detections(&[], &p, &mut rng).is_err());
    }

    #[test]
    fn test_group_mismatch_is_error() {
        let a = abundance(Group::Warm, &[10]);
        let p = probabilities(Group::Cold, &[0.5]);
        let mut rng = ChaCha8Rng::seed_from_u64(26);

        assert!(matches!(
            sample_detections(&a, &p, &mut rng),
            Err(SimError::SeriesMismatch { group: Group::Warm, .. })
        ));
    }
}
