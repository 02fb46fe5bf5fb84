//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prior thermal history of a tick population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Warm,
    Cold,
}

impl Group {
    /// Both groups, warm first
    pub const ALL: [Group; 2] = [Group::Warm, Group::Cold];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Warm => "warm",
            Self::Cold => "cold",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One value per group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ByGroup<T> {
    pub warm: T,
    pub cold: T,
}

impl<T> ByGroup<T> {
    pub fn new(warm: T, cold: T) -> Self {
        Self { warm, cold }
    }

    pub fn get(&self, group: Group) -> &T {
        match group {
            Group::Warm => &self.warm,
            Group::Cold => &self.cold,
        }
    }

    /// Iterate as `(group, value)` pairs in `Group::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (Group, &T)> {
        Group::ALL.into_iter().map(move |g| (g, self.get(g)))
    }

    pub fn map<U, F: FnMut(Group, &T) -> U>(&self, mut f: F) -> ByGroup<U> {
        ByGroup {
            warm: f(Group::Warm, &self.warm),
            cold: f(Group::Cold, &self.cold),
        }
    }
}

/// Elapsed day of a replicate
pub type Day = f64;

/// Distance moved by a replicate's ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementSample {
    pub group: Group,
    pub replicate: usize,
    pub day: Day,
    pub distance: f64,
}

/// Per-tick detection probability derived from a movement sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionProbability {
    pub group: Group,
    pub replicate: usize,
    pub day: Day,
    pub distance: f64,
    pub probability: f64,
}

/// Live ticks remaining at a replicate's day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbundanceSample {
    pub group: Group,
    pub replicate: usize,
    pub day: Day,
    pub count: u64,
}

/// Ticks caught at a replicate's day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionCount {
    pub group: Group,
    pub replicate: usize,
    pub day: Day,
    pub count: u64,
}
