//! Trapsim - tick trap detections under warm and cold thermal histories

pub mod core;
pub mod simulation;

pub use crate::core::config::SimulationConfig;
pub use crate::core::error::{Result, SimError};
pub use crate::core::types::{ByGroup, Group};
pub use crate::simulation::{simulate, simulate_with_days, simulate_with_rng, SimulationOutput};
