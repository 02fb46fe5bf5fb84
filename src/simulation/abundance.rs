//! Live ticks per replicate
//!
//! Two mortality models, one per group:
//! - Warm: linear decline from a Poisson starting count, rounded up.
//! - Cold: declining logistic curve with Normal observation noise, rounded
//!   to nearest.
//!
//! The rounding rules differ on purpose and both floor at zero.

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use tracing::debug;

use crate::core::config::{AbundanceConfig, ColdAbundanceConfig, WarmAbundanceConfig};
use crate::core::error::{Result, SimError};
use crate::core::types::{AbundanceSample, ByGroup, Group};
use crate::simulation::sampling::draw_normals;

/// `ceil(start + slope * day)`, floored at zero
pub fn warm_count(start: f64, slope: f64, day: f64) -> u64 {
    (start + slope * day).ceil().max(0.0) as u64
}

/// Expected survivors on the cold logistic curve
pub fn logistic_trend(asymptote: f64, inflection: f64, rate: f64, day: f64) -> f64 {
    asymptote / (1.0 + (-(day - inflection) / rate).exp())
}

/// `round(trend + noise)`, floored at zero
pub fn cold_count(trend: f64, noise: f64) -> u64 {
    (trend + noise).round().max(0.0) as u64
}

/// Draws the shared starting count, then one slope per replicate
pub fn simulate_warm<R: Rng + ?Sized>(
    days: &[f64],
    config: &WarmAbundanceConfig,
    rng: &mut R,
) -> Result<Vec<AbundanceSample>> {
    let poisson = Poisson::new(config.start_lambda)
        .map_err(|e| SimError::Distribution(format!("abundance.warm.start_lambda: {}", e)))?;
    let start: f64 = poisson.sample(rng);
    debug!(start, "warm starting abundance drawn");

    let slopes = draw_normals(rng, config.slope, days.len(), "abundance.warm.slope")?;

    Ok(days
        .iter()
        .zip(slopes)
        .enumerate()
        .map(|(replicate, (&day, slope))| AbundanceSample {
            group: Group::Warm,
            replicate,
            day,
            count: warm_count(start, slope, day),
        })
        .collect())
}

/// Draws asymptotes, inflections, rates and noise, each as a full batch
pub fn simulate_cold<R: Rng + ?Sized>(
    days: &[f64],
    config: &ColdAbundanceConfig,
    rng: &mut R,
) -> Result<Vec<AbundanceSample>> {
    let n = days.len();
    let asymptotes = draw_normals(rng, config.asymptote, n, "abundance.cold.asymptote")?;
    let inflections = draw_normals(rng, config.inflection, n, "abundance.cold.inflection")?;
    let rates = draw_normals(rng, config.rate, n, "abundance.cold.rate")?;
    let noise = draw_normals(rng, config.noise, n, "abundance.cold.noise")?;

    Ok((0..n)
        .map(|replicate| {
            let day = days[replicate];
            let trend = logistic_trend(
                asymptotes[replicate],
                inflections[replicate],
                rates[replicate],
                day,
            );
            AbundanceSample {
                group: Group::Cold,
                replicate,
                day,
                count: cold_count(trend, noise[replicate]),
            }
        })
        .collect())
}

/// Abundance for both groups over the shared day vector, warm first
pub fn simulate_abundance<R: Rng + ?Sized>(
    days: &[f64],
    config: &AbundanceConfig,
    rng: &mut R,
) -> Result<ByGroup<Vec<AbundanceSample>>> {
    let warm = simulate_warm(days, &config.warm, rng)?;
    let cold = simulate_cold(days, &config.cold, rng)?;

    for (group, samples) in [(Group::Warm, &warm), (Group::Cold, &cold)] {
        let extinct = samples.iter().filter(|s| s.count == 0).count();
        debug!(%group, extinct, "abundance simulated");
    }

    Ok(ByGroup::new(warm, cold))
}
