//! Chunk encoder: packs every voxel of a chunk column into a fixed-size buffer.
//!
//! ## Layout
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | `2 * order.to_index(x, y, z)` | 2 | Packed voxel (see [`PackedVoxel`]) |
//!
//! The buffer is always [`ENCODED_CHUNK_LEN`] bytes. There is no header.

use thiserror::Error;

use crate::order::CoordinateOrder;
use crate::voxel::{
    BYTES_PER_VOXEL, CHUNK_HEIGHT, CHUNK_WIDTH, ENCODED_CHUNK_LEN, PackedVoxel, VoxelRangeError,
};
use crate::world::ChunkColumn;

/// A voxel in the source world does not fit the packed format.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A block id or metadata value exceeded its bit budget.
    #[error("chunk ({chunk_x}, {chunk_z}): voxel at ({x}, {y}, {z}) cannot be packed: {source}")]
    VoxelOutOfRange {
        /// Chunk x coordinate.
        chunk_x: i32,
        /// Chunk z coordinate.
        chunk_z: i32,
        /// Local x of the offending voxel.
        x: usize,
        /// Local y of the offending voxel.
        y: usize,
        /// Local z of the offending voxel.
        z: usize,
        /// Which field overflowed.
        #[source]
        source: VoxelRangeError,
    },
}

/// One fully encoded chunk, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedChunk {
    chunk_x: i32,
    chunk_z: i32,
    bytes: Box<[u8]>,
}

impl EncodedChunk {
    /// Chunk x coordinate.
    pub fn chunk_x(&self) -> i32 {
        self.chunk_x
    }

    /// Chunk z coordinate.
    pub fn chunk_z(&self) -> i32 {
        self.chunk_z
    }

    /// The encoded bytes. Always [`ENCODED_CHUNK_LEN`] long.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the chunk and returns its buffer.
    pub fn into_bytes(self) -> Box<[u8]> {
        self.bytes
    }

    /// Output file name, `"<chunkX>_<chunkZ>.bin"`.
    pub fn file_name(&self) -> String {
        chunk_file_name(self.chunk_x, self.chunk_z)
    }
}

/// File name for the chunk at the given chunk coordinates.
pub fn chunk_file_name(chunk_x: i32, chunk_z: i32) -> String {
    format!("{chunk_x}_{chunk_z}.bin")
}

/// Encodes a chunk column using the given coordinate order.
///
/// Voxels are visited y-outer, z-middle, x-inner. The order only decides the
/// byte offset of each voxel, not the visiting sequence.
///
/// # Errors
///
/// Returns [`EncodeError::VoxelOutOfRange`] at the first voxel whose block id
/// is 4096 or above, or whose metadata is 16 or above. No partial buffer is
/// returned.
pub fn encode_chunk<C: ChunkColumn>(
    chunk: &C,
    order: CoordinateOrder,
) -> Result<EncodedChunk, EncodeError> {
    let chunk_x = chunk.chunk_x();
    let chunk_z = chunk.chunk_z();
    tracing::debug!("Exporting chunk ({}, {}) ...", chunk_x, chunk_z);

    let mut bytes = vec![0u8; ENCODED_CHUNK_LEN].into_boxed_slice();

    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_WIDTH {
            for x in 0..CHUNK_WIDTH {
                let voxel = chunk.voxel(x, y, z);
                let packed = PackedVoxel::pack(voxel).map_err(|source| {
                    EncodeError::VoxelOutOfRange {
                        chunk_x,
                        chunk_z,
                        x,
                        y,
                        z,
                        source,
                    }
                })?;

                let offset = BYTES_PER_VOXEL * order.to_index(x, y, z);
                bytes[offset..offset + BYTES_PER_VOXEL].copy_from_slice(&packed);
            }
        }
    }

    Ok(EncodedChunk {
        chunk_x,
        chunk_z,
        bytes,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::{CHUNK_VOLUME, Voxel};

    /// Chunk whose voxels encode their own position, so every voxel is distinct.
    struct GradientChunk;

    impl ChunkColumn for GradientChunk {
        fn chunk_x(&self) -> i32 {
            4
        }

        fn chunk_z(&self) -> i32 {
            -7
        }

        fn voxel(&self, x: usize, y: usize, z: usize) -> Voxel {
            Voxel::new((y * 16 + x) as u16, z as u8)
        }
    }

    /// Every voxel is the same value.
    struct UniformChunk(Voxel);

    impl ChunkColumn for UniformChunk {
        fn chunk_x(&self) -> i32 {
            0
        }

        fn chunk_z(&self) -> i32 {
            0
        }

        fn voxel(&self, _x: usize, _y: usize, _z: usize) -> Voxel {
            self.0
        }
    }

    /// Valid everywhere except one position.
    struct PoisonedChunk {
        at: (usize, usize, usize),
        bad: Voxel,
    }

    impl ChunkColumn for PoisonedChunk {
        fn chunk_x(&self) -> i32 {
            2
        }

        fn chunk_z(&self) -> i32 {
            3
        }

        fn voxel(&self, x: usize, y: usize, z: usize) -> Voxel {
            if (x, y, z) == self.at {
                self.bad
            } else {
                Voxel::new(1, 0)
            }
        }
    }

    fn read_voxel(
        encoded: &EncodedChunk,
        order: CoordinateOrder,
        x: usize,
        y: usize,
        z: usize,
    ) -> Voxel {
        let offset = 2 * order.to_index(x, y, z);
        let bytes = encoded.bytes();
        PackedVoxel::unpack([bytes[offset], bytes[offset + 1]])
    }

    #[test]
    fn test_buffer_length_for_every_order() {
        for order in CoordinateOrder::ALL {
            let encoded = encode_chunk(&GradientChunk, order).unwrap();
            assert_eq!(encoded.bytes().len(), ENCODED_CHUNK_LEN, "{order}");
        }
    }

    #[test]
    fn test_every_voxel_lands_at_its_order_index() {
        for order in CoordinateOrder::ALL {
            let encoded = encode_chunk(&GradientChunk, order).unwrap();
            for y in 0..CHUNK_HEIGHT {
                for z in 0..CHUNK_WIDTH {
                    for x in 0..CHUNK_WIDTH {
                        assert_eq!(
                            read_voxel(&encoded, order, x, y, z),
                            GradientChunk.voxel(x, y, z),
                            "{order}: mismatch at ({x}, {y}, {z})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_yzx_reference_bytes() {
        let chunk = UniformChunk(Voxel::new(0x1AB, 0xC));
        let encoded = encode_chunk(&chunk, CoordinateOrder::Yzx).unwrap();
        for pair in encoded.bytes().chunks_exact(2) {
            assert_eq!(pair, [0xAB, 0x1C]);
        }
    }

    #[test]
    fn test_yzx_matches_sequential_layout() {
        // In yzx the visiting order equals the storage order, so the n-th
        // voxel visited sits at byte 2n.
        let encoded = encode_chunk(&GradientChunk, CoordinateOrder::Yzx).unwrap();
        let mut n = 0;
        for y in 0..CHUNK_HEIGHT {
            for z in 0..CHUNK_WIDTH {
                for x in 0..CHUNK_WIDTH {
                    let bytes = [encoded.bytes()[2 * n], encoded.bytes()[2 * n + 1]];
                    assert_eq!(PackedVoxel::unpack(bytes), GradientChunk.voxel(x, y, z));
                    n += 1;
                }
            }
        }
        assert_eq!(n, CHUNK_VOLUME);
    }

    #[test]
    fn test_orders_produce_different_buffers() {
        let yzx = encode_chunk(&GradientChunk, CoordinateOrder::Yzx).unwrap();
        let xyz = encode_chunk(&GradientChunk, CoordinateOrder::Xyz).unwrap();
        assert_ne!(yzx.bytes(), xyz.bytes());
    }

    #[test]
    fn test_block_id_4096_fails() {
        let chunk = PoisonedChunk {
            at: (5, 100, 9),
            bad: Voxel::new(4096, 0),
        };
        let err = encode_chunk(&chunk, CoordinateOrder::Yzx).unwrap_err();
        match err {
            EncodeError::VoxelOutOfRange {
                chunk_x,
                chunk_z,
                x,
                y,
                z,
                source,
            } => {
                assert_eq!((chunk_x, chunk_z), (2, 3));
                assert_eq!((x, y, z), (5, 100, 9));
                assert_eq!(source, VoxelRangeError::BlockIdOutOfRange(4096));
            }
        }
    }

    #[test]
    fn test_meta_16_fails() {
        let chunk = PoisonedChunk {
            at: (15, 255, 15),
            bad: Voxel::new(1, 16),
        };
        let err = encode_chunk(&chunk, CoordinateOrder::Zyx).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::VoxelOutOfRange {
                source: VoxelRangeError::MetaOutOfRange(16),
                ..
            }
        ));
    }

    #[test]
    fn test_file_name_uses_chunk_coords() {
        let encoded = encode_chunk(&GradientChunk, CoordinateOrder::Yzx).unwrap();
        assert_eq!(encoded.file_name(), "4_-7.bin");
        assert_eq!(chunk_file_name(0, 0), "0_0.bin");
    }
}
