//! Distance to detection probability
//!
//! A Michaelis-Menten style curve: `distance / (offset + distance)`. Zero at
//! zero distance, strictly increasing, and approaching but never reaching 1.

use tracing::debug;

use crate::core::config::{validate_offset, DetectionConfig};
use crate::core::error::Result;
use crate::core::types::{ByGroup, DetectionProbability, Group, MovementSample};

/// Largest f64 strictly below 1.0
const MAX_PROBABILITY: f64 = 1.0 - f64::EPSILON / 2.0;

/// Saturating transform with a fixed half-saturation offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionCurve {
    offset: f64,
}

impl DetectionCurve {
    /// Fails if `offset` is not finite and strictly positive
    pub fn new(offset: f64) -> Result<Self> {
        validate_offset("detection offset", offset)?;
        Ok(Self { offset })
    }

    pub fn for_group(config: &DetectionConfig, group: Group) -> Result<Self> {
        validate_offset(&format!("detection.{}_offset", group), config.offset(group))?;
        Ok(Self {
            offset: config.offset(group),
        })
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Probability a live tick that moved `distance` is caught
    ///
    /// Negative distances are floored to zero, like movement draws. Results
    /// are capped just below 1 so rounding at enormous distances cannot
    /// produce a certain catch.
    pub fn probability(&self, distance: f64) -> f64 {
        let distance = distance.max(0.0);
        (distance / (self.offset + distance)).min(MAX_PROBABILITY)
    }

    pub fn convert(&self, samples: &[MovementSample]) -> Vec<DetectionProbability> {
        samples
            .iter()
            .map(|s| DetectionProbability {
                group: s.group,
                replicate: s.replicate,
                day: s.day,
                distance: s.distance,
                probability: self.probability(s.distance),
            })
            .collect()
    }
}

/// Convert both groups' movement with their own offsets
pub fn convert_groups(
    movement: &ByGroup<Vec<MovementSample>>,
    config: &DetectionConfig,
) -> Result<ByGroup<Vec<DetectionProbability>>> {
    let warm = DetectionCurve::for_group(config, Group::Warm)?.convert(&movement.warm);
    let cold = DetectionCurve::for_group(config, Group::Cold)?.convert(&movement.cold);

    for (group, probs) in [(Group::Warm, &warm), (Group::Cold, &cold)] {
        if !probs.is_empty() {
            let mean = probs.iter().map(|p| p.probability).sum::<f64>() / probs.len() as f64;
            debug!(%group, mean_probability = mean, "detection probabilities converted");
        }
    }

    Ok(ByGroup::new(warm, cold))
}
