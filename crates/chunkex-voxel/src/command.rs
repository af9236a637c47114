//! The `export` command: argument validation and the operator-facing response.
//!
//! User mistakes never touch the filesystem. They produce a response message
//! and the command does nothing else.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::export::{ChunkRange, ExportJob, ExportSink, run_export};
use crate::order::CoordinateOrder;
use crate::world::WorldRegistry;

/// Usage line printed when the argument count is wrong.
pub const USAGE: &str = "/export <world> <firstX> <firstZ> <lastX> <lastZ> <order>";

/// Number of positional arguments the command takes.
pub const ARG_COUNT: usize = 6;

/// What the command reports back to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResponse {
    /// Wrong number of arguments.
    Usage,
    /// A coordinate argument is not an integer.
    InvalidCoordinate(String),
    /// No world with the given name.
    InvalidWorld,
    /// No coordinate order with the given name.
    InvalidOrder,
    /// `firstX > lastX` or `firstZ > lastZ`.
    InvalidRange,
    /// The export completed.
    Exported {
        /// Number of chunk files written.
        chunks: u64,
        /// Directory they were written to.
        directory: PathBuf,
    },
    /// The export started but stopped at a failure.
    Failed(String),
}

impl CommandResponse {
    /// `true` only for a completed export.
    pub fn is_success(&self) -> bool {
        matches!(self, CommandResponse::Exported { .. })
    }

    /// `true` if the export was attempted and failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, CommandResponse::Failed(_))
    }
}

impl fmt::Display for CommandResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResponse::Usage => f.write_str(USAGE),
            CommandResponse::InvalidCoordinate(arg) => {
                write!(f, "Invalid chunk coordinate: {arg}")
            }
            CommandResponse::InvalidWorld => f.write_str("Invalid world name"),
            CommandResponse::InvalidOrder => f.write_str("Invalid coordinate order"),
            CommandResponse::InvalidRange => f.write_str("Invalid chunk range"),
            CommandResponse::Exported { chunks, directory } => {
                write!(f, "Exported {chunks} chunk(s) to {}", directory.display())
            }
            CommandResponse::Failed(reason) => write!(f, "Export failed: {reason}"),
        }
    }
}

/// Parser for the command's positional arguments.
pub struct ExportCommand;

impl ExportCommand {
    /// Validates `world firstX firstZ lastX lastZ order` into an [`ExportJob`].
    ///
    /// Checks run in this order: argument count, coordinates, world name,
    /// order name, range.
    ///
    /// # Errors
    ///
    /// Returns the response to send back when the arguments are invalid.
    pub fn parse<S: AsRef<str>>(
        args: &[S],
        worlds: &WorldRegistry,
    ) -> Result<ExportJob, CommandResponse> {
        let [world, first_x, first_z, last_x, last_z, order] = args else {
            return Err(CommandResponse::Usage);
        };

        let first_x = parse_coordinate(first_x.as_ref())?;
        let first_z = parse_coordinate(first_z.as_ref())?;
        let last_x = parse_coordinate(last_x.as_ref())?;
        let last_z = parse_coordinate(last_z.as_ref())?;

        let world = world.as_ref();
        if worlds.get(world).is_none() {
            return Err(CommandResponse::InvalidWorld);
        }

        let order =
            CoordinateOrder::resolve(order.as_ref()).ok_or(CommandResponse::InvalidOrder)?;

        let range = ChunkRange::new(first_x, first_z, last_x, last_z)
            .map_err(|_| CommandResponse::InvalidRange)?;

        Ok(ExportJob {
            world_name: world.to_string(),
            range,
            order,
        })
    }
}

fn parse_coordinate(arg: &str) -> Result<i32, CommandResponse> {
    arg.trim()
        .parse()
        .map_err(|_| CommandResponse::InvalidCoordinate(arg.to_string()))
}

/// Runs the `export` command end to end.
///
/// Invalid arguments produce a response without any I/O. A failing export
/// is logged and reported as [`CommandResponse::Failed`].
pub fn handle_export<S, K>(
    args: &[S],
    worlds: &WorldRegistry,
    root: &Path,
    sink: &mut K,
) -> CommandResponse
where
    S: AsRef<str>,
    K: ExportSink,
{
    let job = match ExportCommand::parse(args, worlds) {
        Ok(job) => job,
        Err(response) => {
            tracing::warn!("Export command rejected: {}", response);
            return response;
        }
    };

    let Some(world) = worlds.get(&job.world_name) else {
        return CommandResponse::InvalidWorld;
    };

    match run_export(world, &job, root, sink) {
        Ok(summary) => CommandResponse::Exported {
            chunks: summary.chunks_written,
            directory: summary.directory,
        },
        Err(e) => {
            tracing::error!("Export of world {} failed: {}", job.world_name, e);
            CommandResponse::Failed(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
