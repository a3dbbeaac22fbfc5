//! Classification pass.
//!
//! Runs partition → per-pair scoring → best-match selection over one
//! immutable snapshot and assembles the outcome. One bad object never
//! aborts the pass: defective entries are skipped, recorded, and the
//! remaining objects are still classified.

pub mod partition;
pub mod scorer;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{
    CandidateRelation, ObjectId, ObservedObject, ReceptacleStatus, RelationLabel,
    RelationshipRecord, StateSummary,
};
use crate::snapshot::Snapshot;

pub use partition::{Partition, partition};
pub use scorer::RuleSet;

// ============================================================================
// Outcome types
// ============================================================================

/// Everything one classification pass produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyOutcome {
    /// Exactly one record per movable item, in snapshot order.
    pub records: Vec<RelationshipRecord>,
    /// Status of every receptacle, in snapshot order.
    pub receptacles: Vec<ReceptacleStatus>,
    /// Objects excluded from the pass, with the reason each was excluded.
    pub skipped: Vec<SkippedObject>,
    pub stats: ClassifyStats,
}

/// Pass-level counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassifyStats {
    pub receptacles: usize,
    pub items: usize,
    /// Fixed non-receptacle objects (walls, windows, decor) — observed but
    /// never placement candidates.
    pub scenery: usize,
    pub dropped: usize,
    pub unplaced: usize,
}

/// An object excluded from the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedObject {
    pub id: ObjectId,
    pub reason: SkipReason,
}

/// Why an object was excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No position data; the object cannot be scored.
    MissingPosition,
    /// Structurally unusable entry, e.g. a receptacle without a type.
    MalformedObject(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingPosition => write!(f, "missing position data"),
            SkipReason::MalformedObject(detail) => write!(f, "malformed object: {detail}"),
        }
    }
}

// ============================================================================
// The pass
// ============================================================================

/// Classify every movable item in the snapshot against every receptacle.
///
/// Deterministic: identical snapshots produce identical outcomes, record
/// order follows snapshot order, and score ties keep the earliest
/// receptacle.
pub fn classify(snapshot: &Snapshot, rules: &RuleSet) -> ClassifyOutcome {
    let partition = partition(&snapshot.objects);

    for skip in &partition.skipped {
        warn!(object = %skip.id, reason = %skip.reason, "skipping object");
    }
    debug!(
        scene = %snapshot.scene_name,
        receptacles = partition.receptacles.len(),
        items = partition.items.len(),
        "partitioned snapshot"
    );

    let receptacle_types: HashMap<&ObjectId, &str> = partition
        .receptacles
        .iter()
        .map(|rec| (&rec.id, rec.object_type.as_str()))
        .collect();

    let receptacles: Vec<ReceptacleStatus> = partition
        .receptacles
        .iter()
        .map(|rec| ReceptacleStatus {
            id: rec.id.clone(),
            receptacle_type: rec.object_type.clone(),
            openness: rec.state.openness,
            dirty: rec.state.dirty,
        })
        .collect();

    let mut records = Vec::with_capacity(partition.items.len());
    let mut unplaced = 0;

    for &item in &partition.items {
        let summary = StateSummary::from(&item.state);
        let record = match best_match(item, &partition.receptacles, rules) {
            Some(winner) => {
                let receptacle_type = receptacle_types
                    .get(&winner.receptacle)
                    .map(|t| t.to_string());
                RelationshipRecord {
                    item_id: winner.item,
                    item_type: item.object_type.clone(),
                    label: winner.label,
                    receptacle_id: Some(winner.receptacle),
                    receptacle_type,
                    state: summary,
                }
            }
            None => {
                unplaced += 1;
                RelationshipRecord {
                    item_id: item.id.clone(),
                    item_type: item.object_type.clone(),
                    label: RelationLabel::Unplaced,
                    receptacle_id: None,
                    receptacle_type: None,
                    state: summary,
                }
            }
        };
        records.push(record);
    }

    let stats = ClassifyStats {
        receptacles: receptacles.len(),
        items: records.len(),
        scenery: partition.scenery,
        dropped: partition.skipped.len(),
        unplaced,
    };

    ClassifyOutcome {
        records,
        receptacles,
        skipped: partition.skipped,
        stats,
    }
}

/// Scan all receptacles for one item and keep the minimum-score candidate.
///
/// Strict less-than keeps the earliest receptacle on equal scores.
fn best_match(
    item: &ObservedObject,
    receptacles: &[&ObservedObject],
    rules: &RuleSet,
) -> Option<CandidateRelation> {
    let item_pos = item.position?;
    let mut best: Option<CandidateRelation> = None;

    for rec in receptacles {
        let Some(rec_pos) = rec.position else { continue };
        let Some((label, score)) = rules.score(&item_pos, &rec_pos) else {
            continue;
        };
        if best.as_ref().is_none_or(|b| score < b.score) {
            best = Some(CandidateRelation {
                item: item.id.clone(),
                receptacle: rec.id.clone(),
                label,
                score,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, ty: &str, x: f64, y: f64, z: f64) -> ObservedObject {
        ObservedObject::new(id, ty).at(x, y, z).pickupable()
    }

    fn receptacle(id: &str, ty: &str, x: f64, y: f64, z: f64) -> ObservedObject {
        ObservedObject::new(id, ty).at(x, y, z).receptacle()
    }

    #[test]
    fn test_every_item_gets_exactly_one_record() {
        let snapshot = Snapshot::new("FloorPlan1").with_objects([
            receptacle("table", "Table", 0.0, 0.0, 0.0),
            item("apple", "Apple", 0.0, 1.0, 0.0),
            item("mug", "Mug", 10.0, 0.0, 10.0),
        ]);
        let outcome = classify(&snapshot, &RuleSet::default());
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.stats.items, 2);
        assert_eq!(outcome.stats.unplaced, 1);
    }

    #[test]
    fn test_zero_receptacles_means_all_unplaced() {
        let snapshot = Snapshot::new("FloorPlan1").with_objects([
            item("apple", "Apple", 0.0, 1.0, 0.0),
            item("mug", "Mug", 1.0, 0.0, 1.0),
        ]);
        let outcome = classify(&snapshot, &RuleSet::default());
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome
            .records
            .iter()
            .all(|r| r.label == RelationLabel::Unplaced && r.receptacle_type.is_none()));
    }

    #[test]
    fn test_tie_keeps_earliest_receptacle() {
        // Two receptacles at mirrored offsets give identical scores.
        let snapshot = Snapshot::new("FloorPlan1").with_objects([
            receptacle("left", "Counter", -1.0, 0.0, 0.0),
            receptacle("right", "Counter", 1.0, 0.0, 0.0),
            item("apple", "Apple", 0.0, 0.1, 0.0),
        ]);
        let outcome = classify(&snapshot, &RuleSet::default());
        assert_eq!(outcome.records[0].receptacle_id, Some("left".into()));
    }

    #[test]
    fn test_label_quality_beats_raw_distance() {
        // "next to" at 0.4 + 0.5 bias outranks "near" at 1.0 + 1.0 bias.
        let snapshot = Snapshot::new("FloorPlan1").with_objects([
            receptacle("counter_a", "Counter", 1.0, 3.0, 0.0),
            receptacle("counter_b", "Counter", 0.4, 0.4, 0.0),
            item("apple", "Apple", 0.0, 0.0, 0.0),
        ]);
        let outcome = classify(&snapshot, &RuleSet::default());
        let record = &outcome.records[0];
        assert_eq!(record.label, RelationLabel::NextTo);
        assert_eq!(record.receptacle_id, Some("counter_b".into()));
    }

    #[test]
    fn test_positionless_item_is_skipped_not_fatal() {
        let snapshot = Snapshot::new("FloorPlan1").with_objects([
            receptacle("table", "Table", 0.0, 0.0, 0.0),
            ObservedObject::new("ghost", "Mug").pickupable(),
            item("apple", "Apple", 0.0, 1.0, 0.0),
        ]);
        let outcome = classify(&snapshot, &RuleSet::default());
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].reason, SkipReason::MissingPosition);
        assert_eq!(outcome.stats.dropped, 1);
    }
}
