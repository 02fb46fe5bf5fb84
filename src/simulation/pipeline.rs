//! Main simulation pipeline

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::simulation::output::SimulationOutput;
use crate::simulation::{abundance, detection, movement, probability, sampling};

/// Run the simulation with the config's seed, or from entropy when unset
pub fn simulate(config: &SimulationConfig) -> Result<SimulationOutput> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    simulate_with_rng(config, &mut rng)
}

/// Run the simulation, drawing replicate days from the configured range
pub fn simulate_with_rng<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationOutput> {
    config.validate()?;
    let days = sampling::draw_days(rng, config.days, config.replicates)?;
    run_stages(config, days, rng)
}

/// Run the simulation over a caller-supplied day vector
///
/// The replicate count is the length of `days`; `config.replicates` is ignored.
pub fn simulate_with_days<R: Rng + ?Sized>(
    config: &SimulationConfig,
    days: Vec<f64>,
    rng: &mut R,
) -> Result<SimulationOutput> {
    SimulationConfig {
        replicates: days.len(),
        ..config.clone()
    }
    .validate()?;

    if let Some(bad) = days
        .iter()
        .find(|d| !(d.is_finite() && config.days.contains(**d)))
    {
        return Err(SimError::InvalidConfig(format!(
            "day {} outside [{}, {}]",
            bad, config.days.min, config.days.max
        )));
    }

    run_stages(config, days, rng)
}

fn run_stages<R: Rng + ?Sized>(
    config: &SimulationConfig,
    days: Vec<f64>,
    rng: &mut R,
) -> Result<SimulationOutput> {
    let start = Instant::now();
    info!(replicates = days.len(), seed = ?config.seed, "starting simulation");

    // 1. Movement, then its detection probabilities
    let movement = movement::simulate_movement(&days, &config.movement, rng)?;
    let probabilities = probability::convert_groups(&movement, &config.detection)?;

    // 2. Abundance, independent of movement
    let abundance = abundance::simulate_abundance(&days, &config.abundance, rng)?;

    // 3. Detections from paired abundance and probability
    let detections = detection::sample_groups(&abundance, &probabilities, rng)?;

    let output = SimulationOutput::new(days, movement, probabilities, abundance, detections);

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        warm_detections = output.statistics.warm.total_detections,
        cold_detections = output.statistics.cold.total_detections,
        "simulation complete"
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_zero_replicates_fail_before_sampling() {
        let config = SimulationConfig::default().with_replicates(0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut untouched = rng.clone();

        assert!(simulate_with_rng(&config, &mut rng).is_err());
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn test_bad_offset_fails_before_sampling() {
        let mut config = SimulationConfig::default();
        config.detection.warm_offset = -185.0;
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut untouched = rng.clone();

        assert!(matches!(
            simulate_with_rng(&config, &mut rng),
            Err(SimError::InvalidConfig(_))
        ));
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn test_injected_days_out_of_range_rejected() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert!(simulate_with_days(&config, vec![0.0, 40.0], &mut rng).is_err());
        assert!(simulate_with_days(&config, vec![f64::NAN], &mut rng).is_err());
        assert!(simulate_with_days(&config, Vec::new(), &mut rng).is_err());
    }

    #[test]
    fn test_seeded_runs_match() {
        let config = SimulationConfig::default().with_replicates(25).with_seed(99);
        let a = simulate(&config).unwrap();
        let b = simulate(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_replicate_count_respected() {
        let config = SimulationConfig::default().with_replicates(7);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let output = simulate_with_rng(&config, &mut rng).unwrap();

        assert_eq!(output.days.len(), 7);
        for (_, series) in output.detections.iter() {
            assert_eq!(series.len(), 7);
        }
    }
}
