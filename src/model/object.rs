//! Observed object in a scene snapshot.

use serde::{Deserialize, Serialize};
use super::{Position, StateFlags};

/// Stable object identifier, unique within one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One physical thing in the scene at snapshot time.
///
/// Immutable for the duration of one classification pass. Objects without a
/// position are carried here as-is; the engine drops them from scoring and
/// reports the drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedObject {
    pub id: ObjectId,
    /// Category string, e.g. `"Apple"` or `"CounterTop"`.
    pub object_type: String,
    pub position: Option<Position>,
    /// Can other objects be placed in or on it.
    pub is_receptacle: bool,
    pub pickupable: bool,
    pub state: StateFlags,
}

impl ObservedObject {
    pub fn new(id: impl Into<ObjectId>, object_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object_type: object_type.into(),
            position: None,
            is_receptacle: false,
            pickupable: false,
            state: StateFlags::default(),
        }
    }

    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Some(Position::new(x, y, z));
        self
    }

    pub fn receptacle(mut self) -> Self {
        self.is_receptacle = true;
        self
    }

    pub fn pickupable(mut self) -> Self {
        self.pickupable = true;
        self
    }

    pub fn with_state(mut self, state: StateFlags) -> Self {
        self.state = state;
        self
    }
}
