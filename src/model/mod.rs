//! # Scene Data Model
//!
//! Clean DTOs shared by every stage: snapshot ↔ engine ↔ report ↔ user.
//!
//! Design rule: NO simulator types, NO JSON types here.
//! This module is pure data — no I/O, no state, no logging.

pub mod object;
pub mod position;
pub mod state;
pub mod relation;

pub use object::{ObjectId, ObservedObject};
pub use position::Position;
pub use state::{StateFlags, StateSummary, Temperature};
pub use relation::{
    CandidateRelation, ReceptacleStatus, RelationLabel, RelationshipRecord,
};
