//! Tick trap detection simulation
//!
//! Four stages over a shared vector of replicate days:
//! movement → detection probability, abundance, then binomial detections
//! pairing the two by (group, replicate).

pub mod abundance;
pub mod detection;
pub mod movement;
pub mod output;
pub mod pipeline;
pub mod probability;
pub mod sampling;

pub use output::{DetectionRecord, GroupStats, SimulationOutput};
pub use pipeline::{simulate, simulate_with_days, simulate_with_rng};
pub use probability::DetectionCurve;
