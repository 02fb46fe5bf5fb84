//! Batch draws shared by every stage
//!
//! Each helper draws a whole vector at once, one value per replicate, so the
//! order in which a stage consumes the generator is fixed by the stage and not
//! by how the replicates are later paired.

use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::core::config::{DayRange, NormalParams};
use crate::core::error::{Result, SimError};

/// Build a Normal distribution, naming the parameter on failure
pub fn normal(params: NormalParams, name: &str) -> Result<Normal<f64>> {
    Normal::new(params.mean, params.sd)
        .map_err(|e| SimError::Distribution(format!("{}: {}", name, e)))
}

/// Draw `n` values from `Normal(params.mean, params.sd)`
pub fn draw_normals<R: Rng + ?Sized>(
    rng: &mut R,
    params: NormalParams,
    n: usize,
    name: &str,
) -> Result<Vec<f64>> {
    let dist = normal(params, name)?;
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}

/// Draw `n` elapsed days uniformly from the inclusive range
pub fn draw_days<R: Rng + ?Sized>(rng: &mut R, range: DayRange, n: usize) -> Result<Vec<f64>> {
    range.validate()?;
    let dist = Uniform::new_inclusive(range.min, range.max);
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}
