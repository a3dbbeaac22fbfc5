//! Per-pair relationship scoring.
//!
//! Four rules, checked in a fixed priority order; the first satisfied rule
//! labels the pair and no further rule is consulted. Each rule's score is
//! the planar distance plus a per-label bias, so that across different
//! receptacles a better label outranks a shorter distance within a bounded
//! margin. Recorded task outputs depend on the exact constants; changing
//! them changes every downstream description.

use serde::{Deserialize, Serialize};

use crate::model::{Position, RelationLabel};

/// Threshold and bias constants for the four relationship rules.
///
/// Distances are simulator world units (roughly meters). The defaults are
/// the values the recorded corpus was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// "on": item above the receptacle, within this height band…
    pub on_max_vertical: f64,
    /// …and this planar radius.
    pub on_max_horizontal: f64,
    pub in_max_vertical: f64,
    pub in_max_horizontal: f64,
    pub next_to_max_vertical: f64,
    pub next_to_max_horizontal: f64,
    /// "near" has no vertical constraint.
    pub near_max_horizontal: f64,
    pub in_bias: f64,
    pub next_to_bias: f64,
    pub near_bias: f64,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            on_max_vertical: 1.5,
            on_max_horizontal: 1.0,
            in_max_vertical: 0.3,
            in_max_horizontal: 0.5,
            next_to_max_vertical: 0.5,
            next_to_max_horizontal: 1.5,
            near_max_horizontal: 2.5,
            in_bias: 0.1,
            next_to_bias: 0.5,
            near_bias: 1.0,
        }
    }
}

impl RuleSet {
    /// Decide whether a relationship holds between one item and one
    /// receptacle. Returns the label and its score (lower is better), or
    /// `None` when no rule's guard is satisfied — absent, not zero-scored.
    pub fn score(
        &self,
        item: &Position,
        receptacle: &Position,
    ) -> Option<(RelationLabel, f64)> {
        let h = item.horizontal_distance(receptacle);
        let v = item.vertical_distance(receptacle);

        if item.y > receptacle.y && v < self.on_max_vertical && h < self.on_max_horizontal {
            Some((RelationLabel::On, h))
        } else if v < self.in_max_vertical && h < self.in_max_horizontal {
            Some((RelationLabel::In, h + self.in_bias))
        } else if v < self.next_to_max_vertical && h < self.next_to_max_horizontal {
            Some((RelationLabel::NextTo, h + self.next_to_bias))
        } else if h < self.near_max_horizontal {
            Some((RelationLabel::Near, h + self.near_bias))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(ix: f64, iy: f64, iz: f64, rx: f64, ry: f64, rz: f64) -> Option<(RelationLabel, f64)> {
        RuleSet::default().score(&Position::new(ix, iy, iz), &Position::new(rx, ry, rz))
    }

    #[test]
    fn test_item_above_receptacle_is_on() {
        // Directly overhead: planar 0, height 1.
        let (label, s) = score(0.0, 1.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(label, RelationLabel::On);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn test_level_and_close_is_in() {
        let (label, s) = score(0.2, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(label, RelationLabel::In);
        assert!((s - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_on_outranks_in_when_both_guards_hold() {
        // 0.1 above and planar 0.2 satisfies both "on" and "in"; priority
        // order assigns "on".
        let (label, _) = score(0.2, 0.1, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(label, RelationLabel::On);
    }

    #[test]
    fn test_item_below_receptacle_is_never_on() {
        let (label, _) = score(0.2, -0.1, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(label, RelationLabel::In);
    }

    #[test]
    fn test_next_to_band() {
        let (label, s) = score(1.0, 0.4, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(label, RelationLabel::NextTo);
        assert_eq!(s, 1.5);
    }

    #[test]
    fn test_near_has_no_vertical_constraint() {
        let (label, _) = score(2.0, 40.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(label, RelationLabel::Near);
    }

    #[test]
    fn test_beyond_near_radius_is_no_relationship() {
        assert_eq!(score(3.0, 0.0, 0.0, 0.0, 0.0, 0.0), None);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        // Exactly at the "near" boundary fails the strict comparison.
        assert_eq!(score(2.5, 0.0, 0.0, 0.0, 0.0, 0.0), None);
    }
}
