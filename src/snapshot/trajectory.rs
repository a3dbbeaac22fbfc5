//! Trajectory replay — reconstruct a snapshot from a recorded task.
//!
//! A recorded household task ships as two JSON documents:
//!
//! - the **trajectory record** (`traj_data.json`): scene identifier, random
//!   seed, the agent's initial pose, per-object poses, toggle states, and a
//!   list of objects dirtied at task start;
//! - the **scene layout**: the simulator's object metadata dump for that
//!   floor plan — the fixed furniture, receptacle flags, and default state.
//!
//! Replay overlays the record onto the layout: posed objects move to their
//! recorded positions, toggles and dirty marks are applied, and the result
//! is an ordinary [`Snapshot`]. No simulator is involved.
//!
//! Object identity is exact: a posed object picks up layout state only when
//! the names match verbatim. Fuzzy type/position matching is a source-side
//! concern and is not done here.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{ObservedObject, Position, StateFlags, Temperature};
use crate::{Error, Result};
use super::{AgentPose, Snapshot, SnapshotProvider};

/// Seeds wider than the simulator's 32-bit RNG are reduced into range.
const MAX_SEED: i64 = i32::MAX as i64;

// ============================================================================
// Trajectory record (traj_data.json)
// ============================================================================

/// Top-level trajectory record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrajectoryRecord {
    pub scene: SceneRecord,
}

/// The `scene` section of a trajectory record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneRecord {
    pub floor_plan: String,
    pub random_seed: Option<i64>,
    pub init_action: Option<InitAction>,
    pub object_poses: Vec<ObjectPose>,
    pub object_toggles: Vec<ObjectToggle>,
    pub dirty_and_empty: Vec<String>,
}

/// Recorded pose of one movable object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectPose {
    #[serde(rename = "objectName")]
    pub object_name: String,
    pub position: Position,
    pub rotation: Option<Position>,
}

/// Recorded toggle state of one object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectToggle {
    #[serde(rename = "objectId")]
    pub object_id: String,
    #[serde(rename = "isOn")]
    pub is_on: bool,
}

/// The agent's initial teleport.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InitAction {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation: f64,
    pub horizon: f64,
}

// ============================================================================
// Scene layout (simulator metadata dump)
// ============================================================================

/// Fixed scene layout: the simulator's object metadata for one floor plan.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneLayout {
    #[serde(rename = "sceneName")]
    pub scene_name: String,
    pub objects: Vec<LayoutObject>,
}

/// One object entry from the metadata dump.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutObject {
    pub name: String,
    #[serde(rename = "objectType")]
    pub object_type: String,
    pub position: Option<Position>,
    #[serde(rename = "receptacle")]
    pub is_receptacle: bool,
    pub pickupable: bool,
    pub openable: bool,
    #[serde(rename = "isOpen")]
    pub is_open: Option<bool>,
    pub openness: Option<f64>,
    #[serde(rename = "isDirty")]
    pub dirty: bool,
    #[serde(rename = "isCooked")]
    pub cooked: bool,
    #[serde(rename = "isSliced")]
    pub sliced: bool,
    #[serde(rename = "isBroken")]
    pub broken: bool,
    #[serde(rename = "isUsedUp")]
    pub used_up: bool,
    #[serde(rename = "isFilledWithLiquid")]
    pub filled_with_liquid: bool,
    #[serde(rename = "isToggled")]
    pub toggled: Option<bool>,
    pub temperature: Temperature,
}

impl LayoutObject {
    fn state_flags(&self) -> StateFlags {
        StateFlags {
            dirty: self.dirty,
            cooked: self.cooked,
            sliced: self.sliced,
            broken: self.broken,
            used_up: self.used_up,
            filled_with_liquid: self.filled_with_liquid,
            toggled: self.toggled,
            openness: if self.openable {
                // Older dumps only carry isOpen; coerce it to a fraction.
                Some(self.openness.unwrap_or(match self.is_open {
                    Some(true) => 1.0,
                    _ => 0.0,
                }))
            } else {
                None
            },
            temperature: self.temperature,
        }
    }

    fn to_observed(&self) -> ObservedObject {
        ObservedObject {
            id: self.name.clone().into(),
            object_type: self.object_type.clone(),
            position: self.position,
            is_receptacle: self.is_receptacle,
            pickupable: self.pickupable,
            state: self.state_flags(),
        }
    }
}

// ============================================================================
// TrajectoryProvider
// ============================================================================

/// Replays a trajectory record over a fixed scene layout.
#[derive(Debug)]
pub struct TrajectoryProvider {
    layout: SceneLayout,
    record: TrajectoryRecord,
}

impl TrajectoryProvider {
    pub fn new(layout: SceneLayout, record: TrajectoryRecord) -> Result<Self> {
        if record.scene.floor_plan.is_empty() {
            return Err(Error::InvalidRecord(
                "trajectory record has no floor plan".into(),
            ));
        }
        Ok(Self { layout, record })
    }

    /// Parse both documents from JSON text.
    pub fn from_json(layout: &str, record: &str) -> Result<Self> {
        Self::new(serde_json::from_str(layout)?, serde_json::from_str(record)?)
    }

    /// Load both documents from files.
    pub fn from_files(
        layout_path: impl AsRef<std::path::Path>,
        record_path: impl AsRef<std::path::Path>,
    ) -> Result<Self> {
        let layout = std::fs::read_to_string(layout_path)?;
        let record = std::fs::read_to_string(record_path)?;
        Self::from_json(&layout, &record)
    }

    pub fn record(&self) -> &TrajectoryRecord {
        &self.record
    }

    fn replay(&self) -> Snapshot {
        let scene = &self.record.scene;

        let seed = scene.random_seed.map(normalize_seed);

        // Fixed layout objects seed the scene, in dump order.
        let mut objects: Vec<ObservedObject> =
            self.layout.objects.iter().map(LayoutObject::to_observed).collect();

        let index: HashMap<&str, usize> = self
            .layout
            .objects
            .iter()
            .enumerate()
            .map(|(i, obj)| (obj.name.as_str(), i))
            .collect();

        // Posed objects move to their recorded positions. A pose that names
        // no layout object becomes a fresh movable item with default state.
        for pose in &scene.object_poses {
            match index.get(pose.object_name.as_str()) {
                Some(&i) => {
                    objects[i].position = Some(pose.position);
                    objects[i].pickupable = true;
                }
                None => {
                    let object_type = type_of(&pose.object_name);
                    objects.push(
                        ObservedObject::new(pose.object_name.as_str(), object_type)
                            .at(pose.position.x, pose.position.y, pose.position.z)
                            .pickupable(),
                    );
                }
            }
        }

        for toggle in &scene.object_toggles {
            apply_toggle(&mut objects, toggle);
        }

        for name in &scene.dirty_and_empty {
            match objects.iter_mut().find(|obj| obj.id.as_str() == name.as_str()) {
                Some(obj) => obj.state.dirty = true,
                None => warn!(object = %name, "dirty mark names an unknown object"),
            }
        }

        let agent = scene.init_action.map(|init| AgentPose {
            position: Position::new(init.x, init.y, init.z),
            rotation: init.rotation,
            horizon: init.horizon,
        });

        debug!(
            scene = %scene.floor_plan,
            objects = objects.len(),
            poses = scene.object_poses.len(),
            toggles = scene.object_toggles.len(),
            "replayed trajectory"
        );

        Snapshot {
            scene_name: scene.floor_plan.clone(),
            random_seed: seed,
            agent,
            objects,
        }
    }
}

impl SnapshotProvider for TrajectoryProvider {
    fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.replay())
    }
}

// ============================================================================
// Replay helpers
// ============================================================================

fn normalize_seed(seed: i64) -> i64 {
    if seed > MAX_SEED { seed % MAX_SEED } else { seed }
}

/// Category prefix of a recorded object name, e.g. `"Apple_10fd6549"` → `"Apple"`.
fn type_of(object_name: &str) -> &str {
    object_name.split('_').next().unwrap_or(object_name)
}

/// Toggle ids come in simulator form (`"Microwave|+1.2|..."`). Match the
/// exact object id first, then fall back to the id's leading type segment.
fn apply_toggle(objects: &mut [ObservedObject], toggle: &ObjectToggle) {
    if let Some(obj) = objects.iter_mut().find(|o| o.id.as_str() == toggle.object_id) {
        obj.state.toggled = Some(toggle.is_on);
        return;
    }
    let type_segment = toggle.object_id.split('|').next().unwrap_or_default();
    match objects.iter_mut().find(|o| o.object_type == type_segment) {
        Some(obj) => obj.state.toggled = Some(toggle.is_on),
        None => warn!(toggle = %toggle.object_id, "toggle names an unknown object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_with(objects: Vec<LayoutObject>) -> SceneLayout {
        SceneLayout {
            scene_name: "FloorPlan1_physics".into(),
            objects,
        }
    }

    fn fridge() -> LayoutObject {
        LayoutObject {
            name: "Fridge_b1".into(),
            object_type: "Fridge".into(),
            position: Some(Position::new(1.0, 0.0, 1.0)),
            is_receptacle: true,
            openable: true,
            is_open: Some(false),
            ..LayoutObject::default()
        }
    }

    #[test]
    fn test_pose_overrides_layout_position() {
        let apple = LayoutObject {
            name: "Apple_1".into(),
            object_type: "Apple".into(),
            position: Some(Position::new(0.0, 0.0, 0.0)),
            pickupable: true,
            ..LayoutObject::default()
        };
        let record = TrajectoryRecord {
            scene: SceneRecord {
                floor_plan: "FloorPlan1".into(),
                object_poses: vec![ObjectPose {
                    object_name: "Apple_1".into(),
                    position: Position::new(2.0, 1.0, 2.0),
                    rotation: None,
                }],
                ..SceneRecord::default()
            },
        };
        let provider = TrajectoryProvider::new(layout_with(vec![apple]), record).unwrap();
        let snapshot = provider.snapshot().unwrap();
        assert_eq!(snapshot.objects[0].position, Some(Position::new(2.0, 1.0, 2.0)));
    }

    #[test]
    fn test_unmatched_pose_becomes_fresh_item() {
        let record = TrajectoryRecord {
            scene: SceneRecord {
                floor_plan: "FloorPlan1".into(),
                object_poses: vec![ObjectPose {
                    object_name: "Potato_9f".into(),
                    position: Position::new(0.5, 1.0, 0.5),
                    rotation: None,
                }],
                ..SceneRecord::default()
            },
        };
        let provider = TrajectoryProvider::new(layout_with(vec![fridge()]), record).unwrap();
        let snapshot = provider.snapshot().unwrap();
        let potato = snapshot.objects.iter().find(|o| o.id.as_str() == "Potato_9f").unwrap();
        assert_eq!(potato.object_type, "Potato");
        assert!(potato.pickupable);
    }

    #[test]
    fn test_toggle_falls_back_to_type_segment() {
        let record = TrajectoryRecord {
            scene: SceneRecord {
                floor_plan: "FloorPlan1".into(),
                object_toggles: vec![ObjectToggle {
                    object_id: "Fridge|+01.00|+00.00|+01.00".into(),
                    is_on: true,
                }],
                ..SceneRecord::default()
            },
        };
        let provider = TrajectoryProvider::new(layout_with(vec![fridge()]), record).unwrap();
        let snapshot = provider.snapshot().unwrap();
        assert_eq!(snapshot.objects[0].state.toggled, Some(true));
    }

    #[test]
    fn test_seed_wider_than_rng_is_reduced() {
        assert_eq!(normalize_seed(5), 5);
        assert_eq!(normalize_seed(MAX_SEED), MAX_SEED);
        assert_eq!(normalize_seed(MAX_SEED + 3), 3);
    }

    #[test]
    fn test_missing_floor_plan_is_rejected() {
        let record = TrajectoryRecord {
            scene: SceneRecord::default(),
        };
        let err = TrajectoryProvider::new(layout_with(vec![]), record).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }

    #[test]
    fn test_record_parses_from_json() {
        let record = r#"{
            "scene": {
                "floor_plan": "FloorPlan28",
                "random_seed": 3991491462,
                "init_action": {"x": 0.25, "y": 0.9, "z": -1.5, "rotation": 270, "horizon": 30},
                "object_poses": [
                    {"objectName": "Egg_af23", "position": {"x": 1.1, "y": 0.9, "z": 0.2},
                     "rotation": {"x": 0.0, "y": 0.0, "z": 0.0}}
                ],
                "object_toggles": [],
                "dirty_and_empty": ["Egg_af23"]
            }
        }"#;
        let provider = TrajectoryProvider::from_json(r#"{"objects": []}"#, record).unwrap();
        let snapshot = provider.snapshot().unwrap();
        assert_eq!(snapshot.scene_name, "FloorPlan28");
        assert_eq!(snapshot.random_seed, Some(3991491462 % MAX_SEED));
        assert_eq!(snapshot.agent.unwrap().rotation, 270.0);
        assert!(snapshot.objects[0].state.dirty);
    }
}
