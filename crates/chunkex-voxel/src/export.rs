//! Export jobs: iterate a rectangle of chunks, encode each one and write it
//! to `<root>/<world>/<order>/<chunkX>_<chunkZ>.bin`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::encoder::{EncodeError, encode_chunk};
use crate::order::CoordinateOrder;
use crate::world::World;

/// Errors that abort an export job.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export directory could not be created.
    #[error("failed to create export directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A chunk file could not be written.
    #[error("chunk ({chunk_x}, {chunk_z}): failed to write {}: {source}", path.display())]
    WriteChunk {
        /// Chunk x coordinate.
        chunk_x: i32,
        /// Chunk z coordinate.
        chunk_z: i32,
        /// Target file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A chunk held a voxel that does not fit the packed format.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// `first_x > last_x` or `first_z > last_z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid chunk range")]
pub struct InvalidRange;

/// Inclusive rectangle of chunk coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkRange {
    first_x: i32,
    first_z: i32,
    last_x: i32,
    last_z: i32,
}

impl ChunkRange {
    /// Creates a range covering `[first_x, last_x] × [first_z, last_z]`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`] if either axis is inverted.
    pub fn new(
        first_x: i32,
        first_z: i32,
        last_x: i32,
        last_z: i32,
    ) -> Result<Self, InvalidRange> {
        if first_x > last_x || first_z > last_z {
            return Err(InvalidRange);
        }
        Ok(Self {
            first_x,
            first_z,
            last_x,
            last_z,
        })
    }

    /// Number of chunks in the range.
    pub fn len(&self) -> u64 {
        let width = (i64::from(self.last_x) - i64::from(self.first_x) + 1) as u64;
        let depth = (i64::from(self.last_z) - i64::from(self.first_z) + 1) as u64;
        width * depth
    }

    /// Always `false`: a validated range holds at least one chunk.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Yields every `(chunk_x, chunk_z)` pair, x outer and z inner.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (first_z, last_z) = (self.first_z, self.last_z);
        (self.first_x..=self.last_x).flat_map(move |x| (first_z..=last_z).map(move |z| (x, z)))
    }
}

/// Everything needed to run one export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportJob {
    /// Name of the world to export from.
    pub world_name: String,
    /// Chunks to export.
    pub range: ChunkRange,
    /// Byte layout of each chunk file.
    pub order: CoordinateOrder,
}

impl ExportJob {
    /// Directory the job writes into: `<root>/<world>/<order>`.
    pub fn export_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.world_name).join(self.order.name())
    }
}

/// Destination for exported files.
pub trait ExportSink {
    /// Creates a directory and its parents. Existing directories are fine.
    fn create_dir_all(&mut self, path: &Path) -> std::io::Result<()>;

    /// Writes a file, replacing any existing one.
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;
}

/// Writes to the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSink;

impl ExportSink for FsSink {
    fn create_dir_all(&mut self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::write(path, bytes)
    }
}

/// Result of a completed export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    /// Directory the chunk files were written to.
    pub directory: PathBuf,
    /// Number of chunk files written.
    pub chunks_written: u64,
}

/// Runs an export job against a world.
///
/// Creates the export directory once, then encodes and writes each chunk in
/// turn. Stops at the first failure; chunks already written stay on disk, and
/// the failing chunk is never written.
///
/// # Errors
///
/// Returns [`ExportError`] naming the failing chunk (or directory).
pub fn run_export<W, S>(
    world: &W,
    job: &ExportJob,
    root: &Path,
    sink: &mut S,
) -> Result<ExportSummary, ExportError>
where
    W: World,
    S: ExportSink,
{
    let directory = job.export_dir(root);
    tracing::info!(
        world = world.name(),
        order = %job.order,
        chunks = job.range.len(),
        "Exporting to {}",
        directory.display()
    );

    sink.create_dir_all(&directory)
        .map_err(|source| ExportError::CreateDir {
            path: directory.clone(),
            source,
        })?;

    let mut chunks_written = 0;
    for (chunk_x, chunk_z) in job.range.iter() {
        let chunk = world.chunk_at(chunk_x, chunk_z);
        let encoded = encode_chunk(&chunk, job.order)?;

        let path = directory.join(encoded.file_name());
        sink.write_file(&path, encoded.bytes())
            .map_err(|source| ExportError::WriteChunk {
                chunk_x,
                chunk_z,
                path,
                source,
            })?;
        chunks_written += 1;
    }

    tracing::info!(chunks_written, "Export finished");
    Ok(ExportSummary {
        directory,
        chunks_written,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::{ENCODED_CHUNK_LEN, Voxel};
    use crate::world::{ChunkColumn, FlatLayer, FlatWorld};

    /// Records sink calls in memory. Fails writes whose file name matches `fail_on`.
    #[derive(Default)]
    struct MemorySink {
        dirs: Vec<PathBuf>,
        files: Vec<(PathBuf, usize)>,
        fail_on: Option<&'static str>,
    }

    impl ExportSink for MemorySink {
        fn create_dir_all(&mut self, path: &Path) -> std::io::Result<()> {
            self.dirs.push(path.to_path_buf());
            Ok(())
        }

        fn write_file(&mut self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
            if let Some(name) = self.fail_on
                && path.file_name().is_some_and(|f| f == name)
            {
                return Err(std::io::Error::other("disk full"));
            }
            self.files.push((path.to_path_buf(), bytes.len()));
            Ok(())
        }
    }

    /// World where chunk (1, 0) holds an id that overflows 12 bits.
    struct BrokenWorld;

    struct BrokenChunk(i32, i32);

    impl ChunkColumn for BrokenChunk {
        fn chunk_x(&self) -> i32 {
            self.0
        }

        fn chunk_z(&self) -> i32 {
            self.1
        }

        fn voxel(&self, _x: usize, y: usize, _z: usize) -> Voxel {
            if (self.0, self.1) == (1, 0) && y == 64 {
                Voxel::new(4096, 0)
            } else {
                Voxel::new(1, 0)
            }
        }
    }

    impl World for BrokenWorld {
        type Chunk = BrokenChunk;

        fn name(&self) -> &str {
            "broken"
        }

        fn chunk_at(&self, chunk_x: i32, chunk_z: i32) -> BrokenChunk {
            BrokenChunk(chunk_x, chunk_z)
        }
    }

    fn flat_world() -> FlatWorld {
        FlatWorld::new("world", &[FlatLayer::new(7, 0, 1), FlatLayer::new(1, 0, 3)]).unwrap()
    }

    fn job(world: &str, range: ChunkRange) -> ExportJob {
        ExportJob {
            world_name: world.to_string(),
            range,
            order: CoordinateOrder::Yzx,
        }
    }

    #[test]
    fn test_range_rejects_inverted_axes() {
        assert_eq!(ChunkRange::new(1, 0, 0, 0), Err(InvalidRange));
        assert_eq!(ChunkRange::new(0, 1, 0, 0), Err(InvalidRange));
        assert!(ChunkRange::new(0, 0, 0, 0).is_ok());
    }

    #[test]
    fn test_range_iteration() {
        let range = ChunkRange::new(-1, 5, 0, 6).unwrap();
        let pairs: Vec<_> = range.iter().collect();
        assert_eq!(pairs, vec![(-1, 5), (-1, 6), (0, 5), (0, 6)]);
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_range_len_extreme_bounds() {
        let range = ChunkRange::new(i32::MIN, 0, i32::MAX, 0).unwrap();
        assert_eq!(range.len(), 1u64 << 32);
    }

    #[test]
    fn test_export_dir_layout() {
        let job = ExportJob {
            world_name: "world".to_string(),
            range: ChunkRange::new(0, 0, 0, 0).unwrap(),
            order: CoordinateOrder::Xzy,
        };
        assert_eq!(
            job.export_dir(Path::new("export")),
            Path::new("export").join("world").join("xzy")
        );
    }

    #[test]
    fn test_two_chunk_job_writes_two_files() {
        let mut sink = MemorySink::default();
        let job = job("world", ChunkRange::new(0, 0, 1, 0).unwrap());
        let summary = run_export(&flat_world(), &job, Path::new("export"), &mut sink).unwrap();

        let dir = Path::new("export").join("world").join("yzx");
        assert_eq!(summary.chunks_written, 2);
        assert_eq!(summary.directory, dir);
        assert_eq!(sink.dirs, vec![dir.clone()]);
        assert_eq!(
            sink.files,
            vec![
                (dir.join("0_0.bin"), ENCODED_CHUNK_LEN),
                (dir.join("1_0.bin"), ENCODED_CHUNK_LEN),
            ]
        );
    }

    #[test]
    fn test_invalid_voxel_aborts_before_writing_that_chunk() {
        let mut sink = MemorySink::default();
        let job = job("broken", ChunkRange::new(0, 0, 2, 0).unwrap());
        let err = run_export(&BrokenWorld, &job, Path::new("export"), &mut sink).unwrap_err();

        assert!(matches!(
            err,
            ExportError::Encode(EncodeError::VoxelOutOfRange {
                chunk_x: 1,
                chunk_z: 0,
                y: 64,
                ..
            })
        ));
        let written: Vec<_> = sink.files.iter().map(|(p, _)| p.file_name().unwrap()).collect();
        assert_eq!(written, vec!["0_0.bin"]);
    }

    #[test]
    fn test_write_failure_names_chunk() {
        let mut sink = MemorySink {
            fail_on: Some("0_1.bin"),
            ..Default::default()
        };
        let job = job("world", ChunkRange::new(0, 0, 0, 2).unwrap());
        let err = run_export(&flat_world(), &job, Path::new("out"), &mut sink).unwrap_err();

        match err {
            ExportError::WriteChunk {
                chunk_x,
                chunk_z,
                path,
                ..
            } => {
                assert_eq!((chunk_x, chunk_z), (0, 1));
                assert!(path.ends_with("0_1.bin"));
            }
            other => panic!("expected WriteChunk, got {other:?}"),
        }
        assert_eq!(sink.files.len(), 1);
    }

    #[test]
    fn test_fs_sink_overwrites_and_tolerates_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b");
        let mut sink = FsSink;

        sink.create_dir_all(&target).unwrap();
        sink.create_dir_all(&target).unwrap();

        let file = target.join("0_0.bin");
        sink.write_file(&file, &[1, 2, 3]).unwrap();
        sink.write_file(&file, &[4, 5]).unwrap();
        assert_eq!(std::fs::read(&file).unwrap(), vec![4, 5]);
    }

    #[test]
    fn test_run_export_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let job = job("world", ChunkRange::new(-1, -1, 0, 0).unwrap());
        let summary = run_export(&flat_world(), &job, dir.path(), &mut FsSink).unwrap();

        assert_eq!(summary.chunks_written, 4);
        for name in ["-1_-1.bin", "-1_0.bin", "0_-1.bin", "0_0.bin"] {
            let bytes = std::fs::read(summary.directory.join(name)).unwrap();
            assert_eq!(bytes.len(), ENCODED_CHUNK_LEN, "{name}");
            // y = 0 is bedrock (id 7), y = 1 is stone.
            assert_eq!(&bytes[0..2], &[7, 0]);
            assert_eq!(&bytes[512..514], &[1, 0]);
        }
    }
}
