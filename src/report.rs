//! Scene report — render a classification outcome as text.
//!
//! Produces the human-readable description block:
//!
//! ```text
//! Scene: **FloorPlan28** (random seed 1844007815). The agent starts at
//!   position (0.25, 0.90, -1.50) facing 270°.
//!
//! **Receptacles present:**
//!   • The fridge is closed and clean.
//!
//! **Objects and their locations:**
//!   • A potato (cooked) is on the countertop.
//!
//! In total there is 1 movable object and 1 receptacle in the room.
//! ```
//!
//! Rendering is pure: everything comes from the assembled report, and
//! positions or relationships are never re-derived here. Callers that want
//! machine-readable output serialize the report (or the outcome) instead.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::engine::{ClassifyOutcome, ClassifyStats};
use crate::model::{ReceptacleStatus, RelationshipRecord};
use crate::snapshot::{AgentPose, Snapshot};
use crate::Result;

/// Openness below this renders as "closed".
const OPEN_EPSILON: f64 = 0.01;

/// A fully assembled scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneReport {
    pub scene_name: String,
    pub random_seed: Option<i64>,
    pub agent: Option<AgentPose>,
    pub receptacles: Vec<ReceptacleStatus>,
    pub relationships: Vec<RelationshipRecord>,
    pub stats: ClassifyStats,
}

impl SceneReport {
    /// Assemble a report from a snapshot's header fields and the outcome of
    /// classifying it.
    pub fn assemble(snapshot: &Snapshot, outcome: ClassifyOutcome) -> Self {
        Self {
            scene_name: snapshot.scene_name.clone(),
            random_seed: snapshot.random_seed,
            agent: snapshot.agent,
            receptacles: outcome.receptacles,
            relationships: outcome.records,
            stats: outcome.stats,
        }
    }

    /// Render the description block.
    pub fn render(&self, writer: &mut dyn Write) -> Result<()> {
        // Header
        write!(writer, "Scene: **{}**", self.scene_name)?;
        if let Some(seed) = self.random_seed {
            write!(writer, " (random seed {seed})")?;
        }
        write!(writer, ".")?;
        if let Some(agent) = &self.agent {
            write!(
                writer,
                " The agent starts at position {} facing {:.0}°.",
                agent.position, agent.rotation
            )?;
        }
        writeln!(writer)?;
        writeln!(writer)?;

        // Receptacle status section
        if !self.receptacles.is_empty() {
            writeln!(writer, "**Receptacles present:**")?;
            for status in &self.receptacles {
                writeln!(writer, "  • {}", receptacle_line(status))?;
            }
            writeln!(writer)?;
        }

        // Object relationship section
        if !self.relationships.is_empty() {
            writeln!(writer, "**Objects and their locations:**")?;
            for record in &self.relationships {
                writeln!(writer, "  • {}", capitalize_first(&relationship_line(record)))?;
            }
            writeln!(writer)?;
        }

        writeln!(
            writer,
            "In total there {} {} and {} in the room.",
            if self.stats.items == 1 { "is" } else { "are" },
            counted(self.stats.items, "movable object"),
            counted(self.stats.receptacles, "receptacle"),
        )?;

        Ok(())
    }

    pub fn to_text(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.render(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

// ============================================================================
// Line formatting
// ============================================================================

/// One receptacle status line, e.g. `"The fridge is 50% open and dirty."`.
fn receptacle_line(status: &ReceptacleStatus) -> String {
    let openness = status.openness.unwrap_or(0.0);
    let open_part = if openness > OPEN_EPSILON {
        format!("is {:.0}% open", openness * 100.0)
    } else {
        "is closed".to_string()
    };
    let clean_part = if status.dirty { "and dirty" } else { "and clean" };
    format!(
        "The {} {} {}.",
        status.receptacle_type.to_lowercase(),
        open_part,
        clean_part
    )
}

/// One item sentence, e.g. `"a potato (cooked) is on the countertop."`.
fn relationship_line(record: &RelationshipRecord) -> String {
    let adjectives = record.state.adjectives();
    let state_part = if adjectives.is_empty() {
        String::new()
    } else {
        format!(" ({})", adjectives.join(", "))
    };

    let place_part = match (record.label.phrase(), &record.receptacle_type) {
        (Some(phrase), Some(receptacle)) => {
            format!("{} the {}", phrase, receptacle.to_lowercase())
        }
        _ => "lying in the room".to_string(),
    };

    format!(
        "a {}{} is {}.",
        record.item_type.to_lowercase(),
        state_part,
        place_part
    )
}

fn counted(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
