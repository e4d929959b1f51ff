//! Partition diagnostics: timing and counts for each stage.
//!
//! Permanent instrumentation for parameter experimentation and
//! performance tracking. The `*_with_diagnostics` run variants on
//! [`Partitioner`](crate::Partitioner) collect these alongside their
//! results; the plain variants skip the bookkeeping.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single partitioning run.
///
/// Stages that belong to only one of the two algorithms have `Option`
/// fields that are `None` when the stage was not executed: neighbor
/// merging runs only for connected components; edge building and forest
/// carving run only for segmentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionDiagnostics {
    /// Equal-color neighbor merging (components runs only).
    pub merge: Option<StageDiagnostics>,
    /// Weighted-edge construction and sorting (segmentation runs only).
    pub edge_build: Option<StageDiagnostics>,
    /// Truncated Kruskal forest carving (segmentation runs only).
    pub carve: Option<StageDiagnostics>,
    /// Dense component indexing.
    pub index: StageDiagnostics,
    /// Buffer recoloring.
    pub recolor: StageDiagnostics,
    /// Total wall-clock duration of the run (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
}

impl PartitionDiagnostics {
    /// Render an aligned human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<20} {:>12}  {}", "Stage", "Duration", "Metrics");
        let _ = writeln!(out, "{}", "-".repeat(60));

        let stages: [(&str, Option<&StageDiagnostics>); 5] = [
            ("Neighbor merge", self.merge.as_ref()),
            ("Edge build", self.edge_build.as_ref()),
            ("Forest carve", self.carve.as_ref()),
            ("Component index", Some(&self.index)),
            ("Recolor", Some(&self.recolor)),
        ];
        for (name, stage) in stages {
            let Some(stage) = stage else {
                continue;
            };
            let millis = stage.duration.as_secs_f64() * 1000.0;
            let _ = writeln!(out, "{name:<20} {millis:>10.3}ms  {}", stage.metrics.summary());
        }

        let total_millis = self.total_duration.as_secs_f64() * 1000.0;
        let _ = writeln!(out, "{}", "-".repeat(60));
        let _ = writeln!(out, "{:<20} {total_millis:>10.3}ms", "Total");
        out
    }
}

/// Diagnostics for a single stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics that vary by partitioning stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Equal-color neighbor merging metrics.
    MergeNeighbors {
        /// Number of unions performed.
        union_count: usize,
        /// Total pixel count.
        pixel_count: usize,
    },
    /// Weighted-edge construction metrics.
    BuildEdges {
        /// Number of adjacency edges built and sorted.
        edge_count: usize,
    },
    /// Forest carving metrics.
    CarveForest {
        /// Number of unions performed.
        union_count: usize,
        /// Region count the caller asked for.
        regions_requested: usize,
        /// Region count actually realized (saturates at the pixel count).
        regions_remaining: usize,
    },
    /// Component indexing metrics.
    IndexComponents {
        /// Number of distinct components found.
        component_count: usize,
    },
    /// Recoloring metrics.
    Recolor {
        /// Number of pixels rewritten.
        pixel_count: usize,
    },
}

impl StageMetrics {
    /// One-line rendering for the report table.
    fn summary(&self) -> String {
        match self {
            Self::MergeNeighbors {
                union_count,
                pixel_count,
            } => format!("{union_count} unions over {pixel_count} pixels"),
            Self::BuildEdges { edge_count } => format!("{edge_count} edges"),
            Self::CarveForest {
                union_count,
                regions_requested,
                regions_remaining,
            } => format!(
                "{union_count} unions, {regions_remaining} of {regions_requested} requested regions",
            ),
            Self::IndexComponents { component_count } => format!("{component_count} components"),
            Self::Recolor { pixel_count } => format!("{pixel_count} pixels"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stage(metrics: StageMetrics) -> StageDiagnostics {
        StageDiagnostics {
            duration: Duration::from_millis(5),
            metrics,
        }
    }

    fn sample() -> PartitionDiagnostics {
        PartitionDiagnostics {
            merge: Some(stage(StageMetrics::MergeNeighbors {
                union_count: 12,
                pixel_count: 16,
            })),
            edge_build: None,
            carve: None,
            index: stage(StageMetrics::IndexComponents { component_count: 4 }),
            recolor: stage(StageMetrics::Recolor { pixel_count: 16 }),
            total_duration: Duration::from_millis(17),
        }
    }

    #[test]
    fn report_lists_executed_stages_only() {
        let report = sample().report();
        assert!(report.contains("Neighbor merge"));
        assert!(report.contains("12 unions over 16 pixels"));
        assert!(report.contains("4 components"));
        assert!(report.contains("Total"));
        assert!(!report.contains("Edge build"));
        assert!(!report.contains("Forest carve"));
    }

    #[test]
    fn report_includes_segmentation_stages() {
        let diagnostics = PartitionDiagnostics {
            merge: None,
            edge_build: Some(stage(StageMetrics::BuildEdges { edge_count: 24 })),
            carve: Some(stage(StageMetrics::CarveForest {
                union_count: 11,
                regions_requested: 5,
                regions_remaining: 5,
            })),
            index: stage(StageMetrics::IndexComponents { component_count: 5 }),
            recolor: stage(StageMetrics::Recolor { pixel_count: 16 }),
            total_duration: Duration::from_millis(9),
        };
        let report = diagnostics.report();
        assert!(report.contains("24 edges"));
        assert!(report.contains("5 of 5 requested regions"));
        assert!(!report.contains("Neighbor merge"));
    }

    #[test]
    fn serde_round_trip_preserves_durations() {
        let diagnostics = sample();
        let json = serde_json::to_string(&diagnostics).unwrap();
        let deserialized: PartitionDiagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.total_duration, Duration::from_millis(17));
        assert_eq!(
            deserialized.merge.unwrap().duration,
            Duration::from_millis(5),
        );
    }

    #[test]
    fn negative_duration_seconds_fail_deserialization() {
        let json = r#"{"duration":-1.0,"metrics":{"Recolor":{"pixel_count":1}}}"#;
        let result: Result<StageDiagnostics, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
