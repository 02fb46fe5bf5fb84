//! Simulation configuration with documented constants
//!
//! Every distributional parameter lives here. The defaults are fixed prior
//! beliefs about tick movement and mortality, not values estimated from data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::Group;

/// Mean and standard deviation of a Normal draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub sd: f64,
}

impl NormalParams {
    pub const fn new(mean: f64, sd: f64) -> Self {
        Self { mean, sd }
    }

    /// A zero-spread draw that always returns `mean`
    pub const fn fixed(mean: f64) -> Self {
        Self { mean, sd: 0.0 }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.mean.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "{} mean must be finite, got {}",
                name, self.mean
            )));
        }
        if !(self.sd.is_finite() && self.sd >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "{} sd must be finite and non-negative, got {}",
                name, self.sd
            )));
        }
        Ok(())
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of replicates, each with its own elapsed day
    pub replicates: usize,

    /// Seed for the run's generator; `None` seeds from entropy
    pub seed: Option<u64>,

    pub days: DayRange,
    pub movement: MovementConfig,
    pub detection: DetectionConfig,
    pub abundance: AbundanceConfig,
}

/// Inclusive range replicate days are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayRange {
    pub min: f64,
    pub max: f64,
}

impl DayRange {
    pub fn contains(&self, day: f64) -> bool {
        day >= self.min && day <= self.max
    }

    /// Bounds must be finite and ordered, with a width an f64 can hold
    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "day range must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(SimError::InvalidConfig(format!(
                "day range min ({}) must be <= max ({})",
                self.min, self.max
            )));
        }
        // Sampling scales the width up slightly, so leave headroom below f64::MAX
        let width = self.max - self.min;
        if !(width.is_finite() && width <= f64::MAX / 2.0) {
            return Err(SimError::InvalidConfig(format!(
                "day range [{}, {}] is too wide",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl Default for DayRange {
    fn default() -> Self {
        Self { min: 0.0, max: 35.0 }
    }
}

// === MOVEMENT ===

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub warm: WarmMovementConfig,
    pub cold: ColdMovementConfig,
}

/// Warm ticks slow down over time: distance = intercept + slope * day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarmMovementConfig {
    /// Distance moved at day 0, drawn per replicate
    pub intercept: NormalParams,
    /// Change in distance per elapsed day, drawn per replicate
    pub slope: NormalParams,
}

impl Default for WarmMovementConfig {
    fn default() -> Self {
        Self {
            intercept: NormalParams::new(150.0, 40.0),
            slope: NormalParams::new(-3.0, 0.4),
        }
    }
}

/// Cold ticks move the same amount regardless of day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColdMovementConfig {
    pub distance: NormalParams,
}

impl Default for ColdMovementConfig {
    fn default() -> Self {
        Self {
            distance: NormalParams::new(100.0, 40.0),
        }
    }
}

// === DETECTION PROBABILITY ===

/// Half-saturation offsets of `distance / (offset + distance)`
///
/// With the default movement means these give a typical detection probability
/// near 0.30. They are tuned by eye, so changing the movement parameters does
/// not preserve that ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub warm_offset: f64,
    pub cold_offset: f64,
}

impl DetectionConfig {
    pub fn offset(&self, group: Group) -> f64 {
        match group {
            Group::Warm => self.warm_offset,
            Group::Cold => self.cold_offset,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            warm_offset: 185.0,
            cold_offset: 210.0,
        }
    }
}

// === ABUNDANCE ===

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbundanceConfig {
    pub warm: WarmAbundanceConfig,
    pub cold: ColdAbundanceConfig,
}

/// Linear mortality observed in warm-history ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarmAbundanceConfig {
    /// Poisson mean of the starting count, drawn once per run
    pub start_lambda: f64,
    /// Deaths per day (negative), drawn per replicate
    pub slope: NormalParams,
}

impl Default for WarmAbundanceConfig {
    fn default() -> Self {
        Self {
            start_lambda: 100.0,
            slope: NormalParams::new(-2.6, 0.3),
        }
    }
}

/// Threshold mortality observed in cold-history ticks
///
/// trend(d) = asymptote / (1 + exp(-(d - inflection) / rate)), plus
/// observation noise. A negative rate makes the curve decline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColdAbundanceConfig {
    pub asymptote: NormalParams,
    /// Day at which half the population has died
    pub inflection: NormalParams,
    pub rate: NormalParams,
    pub noise: NormalParams,
}

impl Default for ColdAbundanceConfig {
    fn default() -> Self {
        Self {
            asymptote: NormalParams::new(95.0, 4.0),
            inflection: NormalParams::new(24.0, 1.0),
            rate: NormalParams::new(-4.0, 0.3),
            noise: NormalParams::new(0.0, 5.0),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            replicates: 100,
            seed: None,
            days: DayRange::default(),
            movement: MovementConfig::default(),
            detection: DetectionConfig::default(),
            abundance: AbundanceConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replicates(mut self, replicates: usize) -> Self {
        self.replicates = replicates;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration before any sampling begins
    pub fn validate(&self) -> Result<()> {
        if self.replicates == 0 {
            return Err(SimError::InvalidConfig(
                "replicates must be at least 1".into(),
            ));
        }

        self.days.validate()?;

        self.movement.warm.intercept.validate("movement.warm.intercept")?;
        self.movement.warm.slope.validate("movement.warm.slope")?;
        self.movement.cold.distance.validate("movement.cold.distance")?;

        for (name, offset) in [
            ("detection.warm_offset", self.detection.warm_offset),
            ("detection.cold_offset", self.detection.cold_offset),
        ] {
            validate_offset(name, offset)?;
        }

        let lambda = self.abundance.warm.start_lambda;
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "abundance.warm.start_lambda must be positive, got {}",
                lambda
            )));
        }
        self.abundance.warm.slope.validate("abundance.warm.slope")?;

        let cold = &self.abundance.cold;
        cold.asymptote.validate("abundance.cold.asymptote")?;
        cold.inflection.validate("abundance.cold.inflection")?;
        cold.rate.validate("abundance.cold.rate")?;
        cold.noise.validate("abundance.cold.noise")?;
        if cold.rate.mean == 0.0 && cold.rate.sd == 0.0 {
            return Err(SimError::InvalidConfig(
                "abundance.cold.rate cannot be fixed at zero".into(),
            ));
        }

        Ok(())
    }
}

pub(crate) fn validate_offset(name: &str, offset: f64) -> Result<()> {
    if !(offset.is_finite() && offset > 0.0) {
        return Err(SimError::InvalidConfig(format!(
            "{} must be finite and positive, got {}",
            name, offset
        )));
    }
    Ok(())
}
