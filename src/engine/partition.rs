//! Snapshot partitioning: receptacles vs. movable items.

use crate::model::ObservedObject;
use super::{SkipReason, SkippedObject};

/// Result of splitting a snapshot's objects. Both sequences preserve the
/// input order; every input object lands in exactly one place.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub receptacles: Vec<&'a ObservedObject>,
    pub items: Vec<&'a ObservedObject>,
    pub skipped: Vec<SkippedObject>,
    /// Fixed non-receptacle objects, counted but not carried.
    pub scenery: usize,
}

/// Split objects into receptacles and placement-candidate items.
///
/// Objects without position data cannot be scored and are dropped with a
/// recorded reason. A receptacle with an empty type is malformed and is
/// never coerced into either sequence.
pub fn partition(objects: &[ObservedObject]) -> Partition<'_> {
    let mut out = Partition::default();

    for obj in objects {
        if obj.is_receptacle {
            if obj.object_type.is_empty() {
                out.skipped.push(SkippedObject {
                    id: obj.id.clone(),
                    reason: SkipReason::MalformedObject("receptacle without a type".into()),
                });
            } else if obj.position.is_none() {
                out.skipped.push(SkippedObject {
                    id: obj.id.clone(),
                    reason: SkipReason::MissingPosition,
                });
            } else {
                out.receptacles.push(obj);
            }
        } else if obj.pickupable {
            if obj.position.is_none() {
                out.skipped.push(SkippedObject {
                    id: obj.id.clone(),
                    reason: SkipReason::MissingPosition,
                });
            } else {
                out.items.push(obj);
            }
        } else {
            out.scenery += 1;
        }
    }

    out
}
