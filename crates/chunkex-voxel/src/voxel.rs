//! Voxel values as read from a world, and their 2-byte on-disk packing.
//!
//! Each voxel occupies one little-endian 16-bit field: bits `[0, 12)` hold the
//! block id and bits `[12, 16)` hold the metadata nibble. This is the same
//! 12/4 split used by the anvil world-storage format.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chunk width along the x and z axes, in voxels.
pub const CHUNK_WIDTH: usize = 16;

/// Chunk height along the y axis, in voxels.
pub const CHUNK_HEIGHT: usize = 256;

/// Total number of voxels in a chunk column (16 × 16 × 256).
pub const CHUNK_VOLUME: usize = CHUNK_WIDTH * CHUNK_WIDTH * CHUNK_HEIGHT;

/// Bytes used by one packed voxel.
pub const BYTES_PER_VOXEL: usize = 2;

/// Length of an encoded chunk file in bytes.
pub const ENCODED_CHUNK_LEN: usize = BYTES_PER_VOXEL * CHUNK_VOLUME;

/// Largest block id that fits in the 12-bit field.
pub const MAX_BLOCK_ID: u16 = 0x0FFF;

/// Largest metadata value that fits in the 4-bit field.
pub const MAX_META: u8 = 0x0F;

/// A single voxel as reported by the world: block id plus metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voxel {
    /// Block type id. Must be below 4096 to be exportable.
    pub block_id: u16,
    /// Block metadata. Must be below 16 to be exportable.
    pub meta: u8,
}

impl Voxel {
    /// The air voxel (id 0, meta 0).
    pub const AIR: Voxel = Voxel {
        block_id: 0,
        meta: 0,
    };

    /// Creates a voxel from an id and metadata value.
    pub const fn new(block_id: u16, meta: u8) -> Self {
        Self { block_id, meta }
    }
}

/// A voxel value that does not fit in the packed 12/4-bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VoxelRangeError {
    /// The block id needs more than 12 bits.
    #[error("block id {0} does not fit in 12 bits")]
    BlockIdOutOfRange(u16),
    /// The metadata needs more than 4 bits.
    #[error("metadata {0} does not fit in 4 bits")]
    MetaOutOfRange(u8),
}

/// Packing and unpacking of the 2-byte voxel field.
pub struct PackedVoxel;

impl PackedVoxel {
    /// Packs a voxel into its two output bytes.
    ///
    /// Byte 0 is the low 8 bits of the block id. Byte 1 holds the top 4 bits
    /// of the block id in its low nibble and the metadata in its high nibble.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelRangeError`] if either field exceeds its bit budget.
    /// Values are never truncated.
    pub fn pack(voxel: Voxel) -> Result<[u8; 2], VoxelRangeError> {
        if voxel.block_id > MAX_BLOCK_ID {
            return Err(VoxelRangeError::BlockIdOutOfRange(voxel.block_id));
        }
        if voxel.meta > MAX_META {
            return Err(VoxelRangeError::MetaOutOfRange(voxel.meta));
        }

        let id = voxel.block_id;
        Ok([(id & 0xFF) as u8, ((id >> 8) as u8 & 0x0F) | (voxel.meta << 4)])
    }

    /// Recovers the voxel stored in a packed field.
    pub fn unpack(bytes: [u8; 2]) -> Voxel {
        Voxel {
            block_id: u16::from(bytes[0]) | (u16::from(bytes[1] & 0x0F) << 8),
            meta: bytes[1] >> 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
