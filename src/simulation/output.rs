//! Simulation output and serialization

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{
    AbundanceSample, ByGroup, DetectionCount, DetectionProbability, Group, MovementSample,
};

/// Complete simulation output: four tables keyed by (group, replicate, day)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Shared replicate days, indexed by replicate
    pub days: Vec<f64>,
    pub movement: ByGroup<Vec<MovementSample>>,
    pub probabilities: ByGroup<Vec<DetectionProbability>>,
    pub abundance: ByGroup<Vec<AbundanceSample>>,
    pub detections: ByGroup<Vec<DetectionCount>>,
    pub statistics: ByGroup<GroupStats>,
}

/// One joined row across the four tables
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub group: Group,
    pub replicate: usize,
    pub day: f64,
    pub distance: f64,
    pub probability: f64,
    pub abundance: u64,
    pub detected: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub replicates: usize,
    pub mean_distance: f64,
    /// Replicates whose distance was floored to zero
    pub zero_distance: usize,
    pub mean_probability: f64,
    pub mean_abundance: f64,
    /// Replicates with no live ticks left
    pub extinct: usize,
    pub total_abundance: u64,
    pub total_detections: u64,
    pub mean_detections: f64,
    /// Pooled fraction of live ticks detected
    pub detection_rate: f64,
}

impl GroupStats {
    fn compute(
        movement: &[MovementSample],
        probabilities: &[DetectionProbability],
        abundance: &[AbundanceSample],
        detections: &[DetectionCount],
    ) -> Self {
        let total_abundance: u64 = abundance.iter().map(|a| a.count).sum();
        let total_detections: u64 = detections.iter().map(|d| d.count).sum();

        Self {
            replicates: movement.len(),
            mean_distance: mean(movement.iter().map(|m| m.distance)),
            zero_distance: movement.iter().filter(|m| m.distance == 0.0).count(),
            mean_probability: mean(probabilities.iter().map(|p| p.probability)),
            mean_abundance: mean(abundance.iter().map(|a| a.count as f64)),
            extinct: abundance.iter().filter(|a| a.count == 0).count(),
            total_abundance,
            total_detections,
            mean_detections: mean(detections.iter().map(|d| d.count as f64)),
            detection_rate: if total_abundance > 0 {
                total_detections as f64 / total_abundance as f64
            } else {
                0.0
            },
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

impl SimulationOutput {
    pub fn new(
        days: Vec<f64>,
        movement: ByGroup<Vec<MovementSample>>,
        probabilities: ByGroup<Vec<DetectionProbability>>,
        abundance: ByGroup<Vec<AbundanceSample>>,
        detections: ByGroup<Vec<DetectionCount>>,
    ) -> Self {
        let statistics = movement.map(|group, m| {
            GroupStats::compute(
                m,
                probabilities.get(group),
                abundance.get(group),
                detections.get(group),
            )
        });

        Self {
            days,
            movement,
            probabilities,
            abundance,
            detections,
            statistics,
        }
    }

    /// Join the four tables by (group, replicate), warm rows first
    pub fn records(&self) -> Vec<DetectionRecord> {
        Group::ALL
            .into_iter()
            .flat_map(|group| {
                let probabilities = self.probabilities.get(group);
                let abundance = self.abundance.get(group);
                let detections = self.detections.get(group);
                probabilities
                    .iter()
                    .zip(abundance)
                    .zip(detections)
                    .map(move |((p, a), d)| DetectionRecord {
                        group,
                        replicate: p.replicate,
                        day: p.day,
                        distance: p.distance,
                        probability: p.probability,
                        abundance: a.count,
                        detected: d.count,
                    })
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Simulated {} replicates", self.days.len())];
        for (group, stats) in self.statistics.iter() {
            lines.push(format!(
                "{:>4}: distance {:>6.1} ({} floored) | p {:.3} | alive {:>5.1} ({} extinct) | detected {:>5.1} (rate {:.3})",
                group,
                stats.mean_distance,
                stats.zero_distance,
                stats.mean_probability,
                stats.mean_abundance,
                stats.extinct,
                stats.mean_detections,
                stats.detection_rate,
            ));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_output() -> SimulationOutput {
        let days = vec![2.0, 30.0];
        let movement = ByGroup::new(
            vec![
                MovementSample { group: Group::Warm, replicate: 0, day: 2.0, distance: 144.0 },
                MovementSample { group: Group::Warm, replicate: 1, day: 30.0, distance: 0.0 },
            ],
            vec![
                MovementSample { group: Group::Cold, replicate: 0, day: 2.0, distance: 210.0 },
                MovementSample { group: Group::Cold, replicate: 1, day: 30.0, distance: 90.0 },
            ],
        );
        let probabilities = movement.map(|_, samples| {
            samples
                .iter()
                .map(|m| DetectionProbability {
                    group: m.group,
                    replicate: m.replicate,
                    day: m.day,
                    distance: m.distance,
                    probability: m.distance / (200.0 + m.distance),
                })
                .collect::<Vec<_>>()
        });
        let abundance = ByGroup::new(
            vec![
                AbundanceSample { group: Group::Warm, replicate: 0, day: 2.0, count: 95 },
                AbundanceSample { group: Group::Warm, replicate: 1, day: 30.0, count: 0 },
            ],
            vec![
                AbundanceSample { group: Group::Cold, replicate: 0, day: 2.0, count: 90 },
                AbundanceSample { group: Group::Cold, replicate: 1, day: 30.0, count: 10 },
            ],
        );
        let detections = ByGroup::new(
            vec![
                DetectionCount { group: Group::Warm, replicate: 0, day: 2.0, count: 40 },
                DetectionCount { group: Group::Warm, replicate: 1, day: 30.0, count: 0 },
            ],
            vec![
                DetectionCount { group: Group::Cold, replicate: 0, day: 2.0, count: 45 },
                DetectionCount { group: Group::Cold, replicate: 1, day: 30.0, count: 5 },
            ],
        );
        SimulationOutput::new(days, movement, probabilities, abundance, detections)
    }

    #[test]
    fn test_statistics() {
        let output = tiny_output();
        let warm = &output.statistics.warm;
        assert_eq!(warm.replicates, 2);
        assert_eq!(warm.zero_distance, 1);
        assert_eq!(warm.extinct, 1);
        assert_eq!(warm.total_detections, 40);
        assert_eq!(warm.mean_distance, 72.0);

        let cold = &output.statistics.cold;
        assert_eq!(cold.total_abundance, 100);
        assert_eq!(cold.detection_rate, 0.5);
    }

    #[test]
    fn test_records_join_by_group_and_replicate() {
        let records = tiny_output().records();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].group, Group::Warm);
        assert_eq!(records[3].group, Group::Cold);
        assert_eq!(records[3].replicate, 1);
        assert_eq!(records[3].abundance, 10);
        assert_eq!(records[3].detected, 5);
        assert!(records.iter().all(|r| r.detected <= r.abundance));
    }

    #[test]
    fn test_json_uses_lowercase_groups() {
        let json = tiny_output().to_json().unwrap();
        assert!(json.contains("\"group\": \"warm\""));
        let back: SimulationOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.records().len(), 4);
        assert_eq!(back.statistics.cold.total_detections, 50);
    }

    #[test]
    fn test_summary_mentions_both_groups() {
        let summary = tiny_output().summary();
        assert!(summary.starts_with("Simulated 2 replicates"));
        assert!(summary.contains("warm"));
        assert!(summary.contains("cold"));
    }
}
