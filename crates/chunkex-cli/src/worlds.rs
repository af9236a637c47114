//! Builds the world registry from the configured world definitions.

use chunkex_config::WorldConfig;
use chunkex_voxel::{FlatLayer, FlatWorld, WorldError, WorldRegistry};

/// Registers one flat world per configured entry.
pub fn build_registry(worlds: &[WorldConfig]) -> Result<WorldRegistry, WorldError> {
    let mut registry = WorldRegistry::new();
    for world in worlds {
        let layers: Vec<FlatLayer> = world
            .layers
            .iter()
            .map(|l| FlatLayer::new(l.block_id, l.meta, l.thickness))
            .collect();
        registry.register(FlatWorld::new(world.name.clone(), &layers)?)?;
    }
    Ok(registry)
}
