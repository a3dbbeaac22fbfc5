//! Object state flags and their narration projection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Object temperature band, as the simulator reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Temperature {
    Cold,
    #[default]
    #[serde(rename = "RoomTemp")]
    Room,
    Hot,
}

/// Full state-flag set of an observed object.
///
/// Absent flags deserialize to their defaults — an unknown or missing flag
/// is "not present", never an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateFlags {
    pub dirty: bool,
    pub cooked: bool,
    pub sliced: bool,
    pub broken: bool,
    pub used_up: bool,
    pub filled_with_liquid: bool,
    /// `None` when the object is not toggleable.
    pub toggled: Option<bool>,
    /// Fraction open in `[0, 1]`; `None` when the object is not openable.
    pub openness: Option<f64>,
    pub temperature: Temperature,
}

impl StateFlags {
    pub fn is_toggled_on(&self) -> bool {
        self.toggled == Some(true)
    }

    pub fn is_hot(&self) -> bool {
        self.temperature == Temperature::Hot
    }
}

/// The human-relevant subset of [`StateFlags`] used in narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateSummary {
    pub broken: bool,
    pub dirty: bool,
    pub cooked: bool,
    pub sliced: bool,
    pub filled_with_liquid: bool,
    pub toggled_on: bool,
    pub hot: bool,
}

impl StateSummary {
    /// Adjectives in narration order.
    pub fn adjectives(&self) -> SmallVec<[&'static str; 4]> {
        let mut out = SmallVec::new();
        if self.broken {
            out.push("broken");
        }
        if self.dirty {
            out.push("dirty");
        }
        if self.cooked {
            out.push("cooked");
        }
        if self.sliced {
            out.push("sliced");
        }
        if self.filled_with_liquid {
            out.push("filled with liquid");
        }
        if self.toggled_on {
            out.push("toggled on");
        }
        if self.hot {
            out.push("hot");
        }
        out
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&StateFlags> for StateSummary {
    fn from(flags: &StateFlags) -> Self {
        Self {
            broken: flags.broken,
            dirty: flags.dirty,
            cooked: flags.cooked,
            sliced: flags.sliced,
            filled_with_liquid: flags.filled_with_liquid,
            toggled_on: flags.is_toggled_on(),
            hot: flags.is_hot(),
        }
    }
}
