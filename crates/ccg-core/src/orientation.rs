//! Compass orientations and their bearing lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the eight compass directions an entity can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Facing along the positive longitudinal axis.
    North,
    /// 45° clockwise from north.
    NorthEast,
    /// 90° clockwise from north.
    East,
    /// 135° clockwise from north.
    SouthEast,
    /// Facing along the negative longitudinal axis.
    South,
    /// 225° clockwise from north.
    SouthWest,
    /// 270° clockwise from north.
    West,
    /// 315° clockwise from north.
    NorthWest,
}

impl Orientation {
    /// All orientations in bearing order, starting at north.
    pub const ALL: [Orientation; 8] = [
        Orientation::North,
        Orientation::NorthEast,
        Orientation::East,
        Orientation::SouthEast,
        Orientation::South,
        Orientation::SouthWest,
        Orientation::West,
        Orientation::NorthWest,
    ];

    /// Returns the compass bearing in degrees (north = 0°, clockwise).
    pub fn degrees(self) -> f64 {
        45.0 * f64::from(self as u8)
    }

    /// Returns the bearing in radians.
    pub fn radians(self) -> f64 {
        self.degrees().to_radians()
    }

    /// Unit heading vector `(lateral, longitudinal)` for this bearing.
    pub fn heading(self) -> (f64, f64) {
        let rad = self.radians();
        (rad.sin(), rad.cos())
    }

    /// Looks up the orientation for an exact multiple of 45°, wrapping at 360°.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        let steps = degrees / 45.0;
        if !steps.is_finite() || steps.fract() != 0.0 {
            return None;
        }
        let index = (steps as i64).rem_euclid(8) as usize;
        Some(Self::ALL[index])
    }

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Orientation::North => "north",
            Orientation::NorthEast => "north_east",
            Orientation::East => "east",
            Orientation::SouthEast => "south_east",
            Orientation::South => "south",
            Orientation::SouthWest => "south_west",
            Orientation::West => "west",
            Orientation::NorthWest => "north_west",
        }
    }

    /// Parses a canonical snake_case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.name() == name)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
