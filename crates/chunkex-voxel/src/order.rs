//! Coordinate orders: named mappings from local voxel coordinates to a linear
//! index in `[0, 65536)`.
//!
//! The order decides where each voxel's bytes land in an encoded chunk. `yzx`
//! is the canonical layout and matches the section layout of anvil region
//! files. The other orders are alternative traversals for experimentation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::voxel::{CHUNK_HEIGHT, CHUNK_WIDTH};

/// Stride of one full `y` column (256 voxels).
const COLUMN: usize = CHUNK_HEIGHT;

/// Stride of one horizontal 16 × 16 layer.
const LAYER: usize = CHUNK_WIDTH * CHUNK_WIDTH;

/// Stride of one 16 × 256 vertical slab.
const SLAB: usize = CHUNK_WIDTH * CHUNK_HEIGHT;

/// A bijection from `(x, y, z)` in a 16 × 256 × 16 chunk to `[0, 65536)`.
///
/// The name lists axes from slowest to fastest varying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateOrder {
    /// `x * 4096 + y * 16 + z`
    Xyz,
    /// `x * 4096 + z * 256 + y`
    Xzy,
    /// `y * 256 + x * 16 + z`
    Yxz,
    /// `y * 256 + z * 16 + x`
    #[default]
    Yzx,
    /// `z * 4096 + x * 256 + y`
    Zxy,
    /// `z * 4096 + y * 16 + x`
    Zyx,
}

/// Returned when a name does not match any predefined order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown coordinate order: {0}")]
pub struct UnknownOrderError(pub String);

impl CoordinateOrder {
    /// Every predefined order.
    pub const ALL: [CoordinateOrder; 6] = [
        CoordinateOrder::Xyz,
        CoordinateOrder::Xzy,
        CoordinateOrder::Yxz,
        CoordinateOrder::Yzx,
        CoordinateOrder::Zxy,
        CoordinateOrder::Zyx,
    ];

    /// Maps local voxel coordinates to a linear index.
    ///
    /// `x` and `z` must be in `[0, 16)`, `y` in `[0, 256)`.
    #[inline]
    pub fn to_index(self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < CHUNK_WIDTH && y < CHUNK_HEIGHT && z < CHUNK_WIDTH);
        match self {
            CoordinateOrder::Xyz => x * SLAB + y * CHUNK_WIDTH + z,
            CoordinateOrder::Xzy => x * SLAB + z * COLUMN + y,
            CoordinateOrder::Yxz => y * LAYER + x * CHUNK_WIDTH + z,
            CoordinateOrder::Yzx => y * LAYER + z * CHUNK_WIDTH + x,
            CoordinateOrder::Zxy => z * SLAB + x * COLUMN + y,
            CoordinateOrder::Zyx => z * SLAB + y * CHUNK_WIDTH + x,
        }
    }

    /// Lower-case name used on the command line and in export paths.
    pub fn name(self) -> &'static str {
        match self {
            CoordinateOrder::Xyz => "xyz",
            CoordinateOrder::Xzy => "xzy",
            CoordinateOrder::Yxz => "yxz",
            CoordinateOrder::Yzx => "yzx",
            CoordinateOrder::Zxy => "zxy",
            CoordinateOrder::Zyx => "zyx",
        }
    }

    /// Looks up an order by name, ignoring ASCII case.
    pub fn resolve(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|order| order.name() == lower)
    }
}

impl FromStr for CoordinateOrder {
    type Err = UnknownOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| UnknownOrderError(s.to_string()))
    }
}

impl fmt::Display for CoordinateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
