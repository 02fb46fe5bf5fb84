//! Distance moved per replicate
//!
//! Warm ticks slow down linearly with elapsed day; cold ticks move a
//! day-independent amount. Negative draws are floored to exactly zero rather
//! than resampled, which leaves a point mass at zero.

use rand::Rng;
use tracing::debug;

use crate::core::config::{ColdMovementConfig, MovementConfig, WarmMovementConfig};
use crate::core::error::Result;
use crate::core::types::{ByGroup, Group, MovementSample};
use crate::simulation::sampling::draw_normals;

/// Distance for one warm replicate, floored at zero
pub fn warm_distance(intercept: f64, slope: f64, day: f64) -> f64 {
    (intercept + slope * day).max(0.0)
}

/// Draws one intercept per replicate, then one slope per replicate
pub fn simulate_warm<R: Rng + ?Sized>(
    days: &[f64],
    config: &WarmMovementConfig,
    rng: &mut R,
) -> Result<Vec<MovementSample>> {
    let n = days.len();
    let intercepts = draw_normals(rng, config.intercept, n, "movement.warm.intercept")?;
    let slopes = draw_normals(rng, config.slope, n, "movement.warm.slope")?;

    Ok(days
        .iter()
        .zip(intercepts.iter().zip(&slopes))
        .enumerate()
        .map(|(replicate, (&day, (&intercept, &slope)))| MovementSample {
            group: Group::Warm,
            replicate,
            day,
            distance: warm_distance(intercept, slope, day),
        })
        .collect())
}

pub fn simulate_cold<R: Rng + ?Sized>(
    days: &[f64],
    config: &ColdMovementConfig,
    rng: &mut R,
) -> Result<Vec<MovementSample>> {
    let distances = draw_normals(rng, config.distance, days.len(), "movement.cold.distance")?;

    Ok(days
        .iter()
        .zip(distances)
        .enumerate()
        .map(|(replicate, (&day, distance))| MovementSample {
            group: Group::Cold,
            replicate,
            day,
            distance: distance.max(0.0),
        })
        .collect())
}

/// Movement for both groups over the shared day vector, warm first
pub fn simulate_movement<R: Rng + ?Sized>(
    days: &[f64],
    config: &MovementConfig,
    rng: &mut R,
) -> Result<ByGroup<Vec<MovementSample>>> {
    let warm = simulate_warm(days, &config.warm, rng)?;
    let cold = simulate_cold(days, &config.cold, rng)?;

    for (group, samples) in [(Group::Warm, &warm), (Group::Cold, &cold)] {
        let floored = samples.iter().filter(|s| s.distance == 0.0).count();
        debug!(%group, floored, "movement simulated");
    }

    Ok(ByGroup::new(warm, cold))
}
