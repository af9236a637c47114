//! World access: the traits the exporter reads voxels through, plus a
//! superflat world implementation and a name-keyed world registry.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::voxel::{CHUNK_HEIGHT, Voxel};

/// One loaded chunk column that voxels can be read from.
pub trait ChunkColumn {
    /// Chunk x coordinate in the world's chunk grid.
    fn chunk_x(&self) -> i32;

    /// Chunk z coordinate in the world's chunk grid.
    fn chunk_z(&self) -> i32;

    /// Reads the voxel at local `(x, y, z)`.
    ///
    /// `x` and `z` are in `[0, 16)`, `y` is in `[0, 256)`. The returned values
    /// are whatever the world holds; range checking is the encoder's job.
    fn voxel(&self, x: usize, y: usize, z: usize) -> Voxel;
}

/// A world that hands out chunk columns by chunk coordinate.
pub trait World {
    /// Chunk handle type.
    type Chunk: ChunkColumn;

    /// World name, used as the export directory name.
    fn name(&self) -> &str;

    /// Loads (or generates) the chunk at the given chunk coordinates.
    fn chunk_at(&self, chunk_x: i32, chunk_z: i32) -> Self::Chunk;
}

/// One horizontal layer of a superflat world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatLayer {
    /// Block id filling the layer.
    pub block_id: u16,
    /// Metadata of every voxel in the layer.
    pub meta: u8,
    /// Layer height in voxels.
    pub thickness: u16,
}

impl FlatLayer {
    /// Creates a layer.
    pub const fn new(block_id: u16, meta: u8, thickness: u16) -> Self {
        Self {
            block_id,
            meta,
            thickness,
        }
    }
}

/// Errors raised while building a world.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The layers stack higher than a chunk column.
    #[error("world {name}: layers are {height} voxels tall, limit is 256")]
    LayersTooTall {
        /// World name.
        name: String,
        /// Total layer height.
        height: usize,
    },
    /// Two worlds were registered under the same name.
    #[error("duplicate world name: {0}")]
    DuplicateName(String),
}

/// A superflat world: every chunk has the same stack of layers, air above.
#[derive(Clone, Debug)]
pub struct FlatWorld {
    name: String,
    /// Voxel at each height, shared by every chunk.
    column: Arc<[Voxel]>,
}

impl FlatWorld {
    /// Builds a flat world from layers listed bottom to top.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LayersTooTall`] if the layers exceed 256 voxels.
    pub fn new(name: impl Into<String>, layers: &[FlatLayer]) -> Result<Self, WorldError> {
        let name = name.into();
        let height: usize = layers.iter().map(|l| usize::from(l.thickness)).sum();
        if height > CHUNK_HEIGHT {
            return Err(WorldError::LayersTooTall { name, height });
        }

        let mut column = Vec::with_capacity(CHUNK_HEIGHT);
        for layer in layers {
            let voxel = Voxel::new(layer.block_id, layer.meta);
            column.extend(std::iter::repeat_n(voxel, usize::from(layer.thickness)));
        }
        column.resize(CHUNK_HEIGHT, Voxel::AIR);

        Ok(Self {
            name,
            column: column.into(),
        })
    }

    /// Height of the topmost non-air voxel plus one.
    pub fn surface_height(&self) -> usize {
        self.column
            .iter()
            .rposition(|&v| v != Voxel::AIR)
            .map_or(0, |y| y + 1)
    }
}

impl World for FlatWorld {
    type Chunk = FlatChunk;

    fn name(&self) -> &str {
        &self.name
    }

    fn chunk_at(&self, chunk_x: i32, chunk_z: i32) -> FlatChunk {
        FlatChunk {
            chunk_x,
            chunk_z,
            column: Arc::clone(&self.column),
        }
    }
}

/// A chunk of a [`FlatWorld`].
#[derive(Clone, Debug)]
pub struct FlatChunk {
    chunk_x: i32,
    chunk_z: i32,
    column: Arc<[Voxel]>,
}

impl ChunkColumn for FlatChunk {
    fn chunk_x(&self) -> i32 {
        self.chunk_x
    }

    fn chunk_z(&self) -> i32 {
        self.chunk_z
    }

    fn voxel(&self, _x: usize, y: usize, _z: usize) -> Voxel {
        self.column[y]
    }
}

/// Worlds available for export, keyed by exact name.
#[derive(Clone, Debug, Default)]
pub struct WorldRegistry {
    worlds: FxHashMap<String, FlatWorld>,
}

impl WorldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a world.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateName`] if the name is taken.
    pub fn register(&mut self, world: FlatWorld) -> Result<(), WorldError> {
        if self.worlds.contains_key(world.name()) {
            return Err(WorldError::DuplicateName(world.name().to_string()));
        }
        self.worlds.insert(world.name().to_string(), world);
        Ok(())
    }

    /// Returns the world with the given name. Names are case-sensitive.
    pub fn get(&self, name: &str) -> Option<&FlatWorld> {
        self.worlds.get(name)
    }

    /// Returns the registered world names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.worlds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered worlds.
    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    /// Returns `true` if no worlds are registered.
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
