use serde::{Deserialize, Serialize};

use super::header::{HeaderSummary, Metadata};

// LAS data coordinates are stored as raw i32 values.
// The real-world coordinate is x * scale[0] + offset[0]; that step is left to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub intensity: u16,
    /// Bits 0-2 of the flag byte, index 0 is the least significant bit.
    pub return_number: [bool; 3],
    /// Bits 3-5 of the flag byte, index 0 is the least significant bit.
    pub number_of_returns: [bool; 3],
    pub scan_direction_flag: bool,
    pub edge_of_flight: bool,
    pub classification: u8,
    pub scan_angle: u8,
    pub user_data: u8,
    pub point_source_id: u16,
    pub gps_time: f64,
}

impl PointRecord {
    pub fn position(&self) -> [f64; 3] {
        [self.x as f64, self.y as f64, self.z as f64]
    }

    pub fn return_number_value(&self) -> u8 {
        fold_bits(&self.return_number)
    }

    pub fn number_of_returns_value(&self) -> u8 {
        fold_bits(&self.number_of_returns)
    }
}

fn fold_bits(bits: &[bool; 3]) -> u8 {
    bits.iter()
        .enumerate()
        .fold(0, |acc, (i, &bit)| acc | ((bit as u8) << i))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    pub summary: HeaderSummary,
    pub metadata: Metadata,
    pub points: Vec<PointRecord>,
}

impl PointCloud {
    pub fn new(summary: HeaderSummary, metadata: Metadata, points: Vec<PointRecord>) -> Self {
        PointCloud {
            summary,
            metadata,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<PointRecord> {
        self.points
    }
}

/// Axis-aligned box given by its minimum and maximum corner.
///
/// `min <= max` holds on every axis. A box whose corners coincide on all
/// three axes is degenerate, which is a valid state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingVolume {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingVolume {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        BoundingVolume { min, max }
    }

    /// Per-axis min/max reduction. Returns `None` for an empty input.
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let mut positions = positions.into_iter();
        let first = positions.next()?;
        let mut bounding_volume = BoundingVolume {
            min: first,
            max: first,
        };
        for position in positions {
            bounding_volume.expand(position);
        }
        Some(bounding_volume)
    }

    pub fn expand(&mut self, position: [f64; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(position[axis]);
            self.max[axis] = self.max[axis].max(position[axis]);
        }
    }

    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn volume(&self) -> f64 {
        let [dx, dy, dz] = self.extent();
        dx * dy * dz
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Closed containment test on every axis.
    pub fn contains(&self, position: &[f64; 3]) -> bool {
        (0..3).all(|axis| self.min[axis] <= position[axis] && position[axis] <= self.max[axis])
    }

    pub fn contains_volume(&self, other: &BoundingVolume) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }
}
