//! # alfred-scene-rs — Household Scene Description
//!
//! Replay a recorded household-task trajectory and describe where every
//! movable object sits relative to the fixed receptacles — "the apple is on
//! the counter", rendered as structured records or as a text block.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `SnapshotProvider` is the contract between the
//!    classifier and any scene source
//! 2. **Clean DTOs**: `ObservedObject`, `RelationshipRecord`, `Snapshot`
//!    cross all boundaries
//! 3. **Engine owns nothing**: snapshot in, outcome out — the pass never
//!    mutates its input
//! 4. **One bad object never sinks the pass**: defective entries are
//!    skipped and reported alongside the results
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use alfred_scene::Scene;
//!
//! # fn example() -> alfred_scene::Result<()> {
//! // Replay a recorded trajectory over its scene layout
//! let scene = Scene::from_trajectory_files("layout.json", "traj_data.json")?;
//!
//! // Structured records…
//! let outcome = scene.classify()?;
//! for record in &outcome.records {
//!     println!("{:?}", record);
//! }
//!
//! // …or the text block
//! println!("{}", scene.describe()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Scene Sources
//!
//! | Source | Type | Description |
//! |--------|------|-------------|
//! | Synthetic | `Snapshot` | Hand-built scenes for testing/embedding |
//! | Trajectory | `TrajectoryProvider` | Recorded task replayed over a layout dump |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod snapshot;
pub mod engine;
pub mod report;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    ObjectId, ObservedObject, Position, ReceptacleStatus, RelationLabel,
    RelationshipRecord, StateFlags, StateSummary, Temperature,
};

// ============================================================================
// Re-exports: Snapshot sources
// ============================================================================

pub use snapshot::{
    AgentPose, SceneLayout, Snapshot, SnapshotProvider, TrajectoryProvider,
    TrajectoryRecord,
};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use engine::{ClassifyOutcome, ClassifyStats, RuleSet, SkipReason, SkippedObject};

// ============================================================================
// Re-exports: Report
// ============================================================================

pub use report::SceneReport;

// ============================================================================
// Top-level Scene handle
// ============================================================================

/// The primary entry point. A `Scene` wraps a snapshot source and runs the
/// classification pipeline over it.
pub struct Scene<P: SnapshotProvider> {
    provider: P,
    rules: RuleSet,
}

impl<P: SnapshotProvider> Scene<P> {
    /// Create a Scene over the given snapshot source.
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            rules: RuleSet::default(),
        }
    }

    /// Override the relationship rule constants. The defaults reproduce the
    /// recorded corpus; deviate deliberately.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Classify every movable item and return the structured outcome.
    pub fn classify(&self) -> Result<ClassifyOutcome> {
        // Phase 1: Observe
        let snapshot = self.provider.snapshot()?;

        // Phase 2: Partition + score + select
        Ok(engine::classify(&snapshot, &self.rules))
    }

    /// Classify and render the full text description.
    pub fn describe(&self) -> Result<String> {
        let snapshot = self.provider.snapshot()?;
        let outcome = engine::classify(&snapshot, &self.rules);
        SceneReport::assemble(&snapshot, outcome).to_text()
    }

    /// Classify and keep the assembled report for custom rendering.
    pub fn report(&self) -> Result<SceneReport> {
        let snapshot = self.provider.snapshot()?;
        let outcome = engine::classify(&snapshot, &self.rules);
        Ok(SceneReport::assemble(&snapshot, outcome))
    }

    /// Access the underlying provider (for advanced use).
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Trajectory replay conveniences.
impl Scene<TrajectoryProvider> {
    pub fn from_trajectory(layout: SceneLayout, record: TrajectoryRecord) -> Result<Self> {
        Ok(Self::with_provider(TrajectoryProvider::new(layout, record)?))
    }

    pub fn from_trajectory_files(
        layout_path: impl AsRef<std::path::Path>,
        record_path: impl AsRef<std::path::Path>,
    ) -> Result<Self> {
        Ok(Self::with_provider(TrajectoryProvider::from_files(
            layout_path,
            record_path,
        )?))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid trajectory record: {0}")]
    InvalidRecord(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
