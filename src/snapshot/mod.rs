//! # Snapshot Provider Trait
//!
//! This is THE contract between the classification engine and any scene
//! source. The engine never talks to a simulator; it consumes one
//! point-in-time, read-only [`Snapshot`] from whatever implements
//! [`SnapshotProvider`].
//!
//! ## Implementations
//!
//! | Provider | Module | Description |
//! |----------|--------|-------------|
//! | `Snapshot` | (this module) | A snapshot is its own provider — synthetic scenes for tests/embedding |
//! | `TrajectoryProvider` | `trajectory` | Replays a recorded task trajectory over a fixed scene layout |

pub mod trajectory;

use serde::{Deserialize, Serialize};

use crate::model::{ObservedObject, Position};
use crate::Result;

pub use trajectory::{SceneLayout, TrajectoryProvider, TrajectoryRecord};

/// Agent pose at snapshot time, for the report header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentPose {
    pub position: Position,
    /// Facing angle in degrees, clockwise from north.
    pub rotation: f64,
    /// Camera pitch in degrees.
    pub horizon: f64,
}

/// One point-in-time capture of a scene.
///
/// Owned by the caller, immutable for the duration of one classification
/// pass, discarded afterwards. The engine never mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub scene_name: String,
    pub random_seed: Option<i64>,
    pub agent: Option<AgentPose>,
    pub objects: Vec<ObservedObject>,
}

impl Snapshot {
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene_name: scene_name.into(),
            ..Self::default()
        }
    }

    pub fn with_objects(mut self, objects: impl IntoIterator<Item = ObservedObject>) -> Self {
        self.objects.extend(objects);
        self
    }

    pub fn with_agent(mut self, agent: AgentPose) -> Self {
        self.agent = Some(agent);
        self
    }
}

/// The universal scene-source contract.
///
/// Synchronous on purpose: a snapshot is a finished observation, and the
/// classification pass has no suspension points. Timeouts, retries, and
/// simulator lifecycle belong behind the implementation, not in front of it.
pub trait SnapshotProvider {
    fn snapshot(&self) -> Result<Snapshot>;
}

/// A snapshot is its own provider. This is the synthetic-scene path used by
/// tests and by embedders that assemble observations elsewhere.
impl SnapshotProvider for Snapshot {
    fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.clone())
    }
}
