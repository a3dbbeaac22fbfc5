//! Spatial relationship labels and the records built from them.

use serde::{Deserialize, Serialize};
use super::{ObjectId, StateSummary};

/// The spatial relationship of a movable item to a receptacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationLabel {
    On,
    In,
    NextTo,
    Near,
    /// No receptacle qualified — the item is loose in the room.
    Unplaced,
}

impl RelationLabel {
    /// Preposition used in narration, e.g. `"next to"`.
    ///
    /// `Unplaced` has no preposition; its sentence is phrased differently.
    pub fn phrase(&self) -> Option<&'static str> {
        match self {
            RelationLabel::On => Some("on"),
            RelationLabel::In => Some("in"),
            RelationLabel::NextTo => Some("next to"),
            RelationLabel::Near => Some("near"),
            RelationLabel::Unplaced => None,
        }
    }
}

/// Scoring result for one (item, receptacle) pair. Lower score is better.
///
/// Lives only during one item's best-match search; never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRelation {
    pub item: ObjectId,
    pub receptacle: ObjectId,
    pub label: RelationLabel,
    pub score: f64,
}

/// Final placement verdict for one movable item.
///
/// Exactly one record exists per movable item in a snapshot. The receptacle
/// fields are `None` iff `label` is [`RelationLabel::Unplaced`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub item_id: ObjectId,
    pub item_type: String,
    pub label: RelationLabel,
    pub receptacle_id: Option<ObjectId>,
    pub receptacle_type: Option<String>,
    pub state: StateSummary,
}

/// Open/closed and cleanliness status of one receptacle, for the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptacleStatus {
    pub id: ObjectId,
    pub receptacle_type: String,
    /// Fraction open in `[0, 1]`; `None` when the receptacle is not openable.
    pub openness: Option<f64>,
    pub dirty: bool,
}
