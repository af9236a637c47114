//! Chunk export: coordinate orders, 12/4-bit voxel packing, the chunk encoder,
//! and the job driver that writes one binary file per chunk.

pub mod command;
pub mod encoder;
pub mod export;
pub mod order;
pub mod voxel;
pub mod world;

pub use command::{ARG_COUNT, CommandResponse, ExportCommand, USAGE, handle_export};
pub use encoder::{EncodeError, EncodedChunk, chunk_file_name, encode_chunk};
pub use export::{
    ChunkRange, ExportError, ExportJob, ExportSink, ExportSummary, FsSink, InvalidRange,
    run_export,
};
pub use order::{CoordinateOrder, UnknownOrderError};
pub use voxel::{
    BYTES_PER_VOXEL, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH, ENCODED_CHUNK_LEN, MAX_BLOCK_ID,
    MAX_META, PackedVoxel, Voxel, VoxelRangeError,
};
pub use world::{ChunkColumn, FlatChunk, FlatLayer, FlatWorld, World, WorldError, WorldRegistry};
