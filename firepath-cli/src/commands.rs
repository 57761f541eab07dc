//! Subcommand execution against a remote store.

use std::io::Write;

use firepath_core::{AvoidanceBox, Category, PoiRegistry};
use firepath_data::remote::{DocumentTransport, RemoteStore, RemovalOutcome};
use firepath_data::sync::SyncCoordinator;

use crate::CliError;

/// What a resolved subcommand does.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    /// Print every remote point.
    List,
    /// Remove the first remote point titled `title`.
    Remove { title: String },
    /// Print hazard avoidance boxes.
    Geofences {
        radius_meters: f64,
        exclude_index: Option<usize>,
    },
}

pub(crate) fn execute<T: DocumentTransport + 'static>(
    action: Action,
    store: RemoteStore<T>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match action {
        Action::List => run_list(&store, writer),
        Action::Remove { title } => run_remove(store, &title, writer),
        Action::Geofences {
            radius_meters,
            exclude_index,
        } => run_geofences(store, radius_meters, exclude_index, writer),
    }
}

fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    Ok(runtime.block_on(future))
}

fn run_list<T: DocumentTransport>(
    store: &RemoteStore<T>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let points = block_on(store.fetch_points())??;
    for poi in &points {
        writeln!(writer, "{poi}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

fn run_remove<T: DocumentTransport + 'static>(
    store: RemoteStore<T>,
    title: &str,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let coordinator = SyncCoordinator::new(store).map_err(CliError::Runtime)?;
    let outcome = coordinator.remove_remote_and_local(title).wait()?;
    coordinator.shutdown();
    let written = match outcome {
        RemovalOutcome::Removed { index, .. } => {
            writeln!(writer, "removed {title:?} (index {index})")
        }
        RemovalOutcome::Unmatched => {
            writeln!(writer, "no point titled {title:?}; document unchanged")
        }
    };
    written.map_err(CliError::WriteOutput)
}

fn run_geofences<T: DocumentTransport + 'static>(
    store: RemoteStore<T>,
    radius_meters: f64,
    exclude_index: Option<usize>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let coordinator = SyncCoordinator::new(store).map_err(CliError::Runtime)?;
    let mut registry = PoiRegistry::new();
    let ids = block_on(coordinator.load_from_remote(&mut registry))??;
    let exclude = exclude_index
        .map(|index| {
            ids.get(index).copied().ok_or(CliError::ExcludeIndexOutOfRange {
                index,
                len: ids.len(),
            })
        })
        .transpose()?;
    let boxes = registry.avoidance_boxes(radius_meters, exclude)?;
    log::debug!(
        "derived {} avoidance boxes from {} hazards",
        boxes.len(),
        registry.by_category(Category::Hazard).len()
    );
    for avoidance in &boxes {
        write_box(writer, avoidance)?;
    }
    Ok(())
}

fn write_box(writer: &mut dyn Write, avoidance: &AvoidanceBox) -> Result<(), CliError> {
    let south_west = avoidance.south_west();
    let north_east = avoidance.north_east();
    writeln!(
        writer,
        "south-west ({:.6}, {:.6}) north-east ({:.6}, {:.6})",
        south_west.latitude, south_west.longitude, north_east.latitude, north_east.longitude
    )
    .map_err(CliError::WriteOutput)
}
