//! World-space position, simulator units.

use serde::{Deserialize, Serialize};

/// A point in the scene, simulator world units. `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar distance over the floor plane (x, z), ignoring height.
    pub fn horizontal_distance(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.z - other.z).powi(2)).sqrt()
    }

    /// Height separation along y.
    pub fn vertical_distance(&self, other: &Position) -> f64 {
        (self.y - other.y).abs()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_ignores_height() {
        let a = Position::new(0.0, 5.0, 0.0);
        let b = Position::new(3.0, 0.0, 4.0);
        assert_eq!(a.horizontal_distance(&b), 5.0);
    }

    #[test]
    fn test_vertical_is_symmetric() {
        let a = Position::new(0.0, 1.25, 0.0);
        let b = Position::new(9.0, 0.25, -9.0);
        assert_eq!(a.vertical_distance(&b), 1.0);
        assert_eq!(b.vertical_distance(&a), 1.0);
    }

    #[test]
    fn test_display_two_decimals() {
        let p = Position::new(0.25, 0.901, -1.5);
        assert_eq!(p.to_string(), "(0.25, 0.90, -1.50)");
    }
}
