//! Subcommand execution against an in-memory remote document.

use super::*;
use firepath_core::{Category, Coordinates};
use firepath_data::remote::PoiRecord;
use firepath_data::test_support::MemoryTransport;
use rstest::{fixture, rstest};
use std::sync::Arc;

fn record(category: Category, title: &str, latitude: f64) -> PoiRecord {
    PoiRecord {
        category,
        title: title.to_owned(),
        description: "reported".to_owned(),
        coordinates: Coordinates::new(latitude, 0.0),
        user_submitted: false,
    }
}

#[fixture]
fn transport() -> Arc<MemoryTransport> {
    Arc::new(MemoryTransport::with_records(&[
        record(Category::Hazard, "Fire", 0.0),
        record(Category::Origin, "Base", 1.0),
        record(Category::Hazard, "Flood", 60.0),
    ]))
}

fn run(action: Action, transport: &Arc<MemoryTransport>) -> Result<String, CliError> {
    let mut output = Vec::new();
    commands::execute(action, RemoteStore::new(Arc::clone(transport)), &mut output)?;
    Ok(String::from_utf8(output).expect("output is UTF-8"))
}

#[rstest]
fn list_prints_one_line_per_point(transport: Arc<MemoryTransport>) {
    let output = run(Action::List, &transport).expect("list should succeed");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Title: Fire, Desc: reported, Lat: 0.0000, Long: 0.0000"
    );
    assert!(lines[2].starts_with("Title: Flood,"));
}

#[rstest]
fn remove_reports_index_and_updates_document(transport: Arc<MemoryTransport>) {
    let output = run(
        Action::Remove {
            title: "Base".to_owned(),
        },
        &transport,
    )
    .expect("remove should succeed");

    assert_eq!(output, "removed \"Base\" (index 1)\n");
    let titles: Vec<String> = transport.records().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, ["Fire", "Flood"]);
}

#[rstest]
fn remove_of_unknown_title_is_not_an_error(transport: Arc<MemoryTransport>) {
    let output = run(
        Action::Remove {
            title: "fire".to_owned(),
        },
        &transport,
    )
    .expect("remove should succeed");

    assert_eq!(output, "no point titled \"fire\"; document unchanged\n");
    assert_eq!(transport.records().len(), 3);
    assert_eq!(transport.put_count(), 1);
}

#[rstest]
fn geofences_print_one_box_per_hazard(transport: Arc<MemoryTransport>) {
    let output = run(
        Action::Geofences {
            radius_meters: 111_320.0,
            exclude_index: None,
        },
        &transport,
    )
    .expect("geofences should succeed");

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        [
            "south-west (-1.000000, -1.000000) north-east (1.000000, 1.000000)",
            "south-west (59.000000, -2.000000) north-east (61.000000, 2.000000)",
        ]
    );
}

#[rstest]
fn geofences_skip_excluded_point(transport: Arc<MemoryTransport>) {
    let output = run(
        Action::Geofences {
            radius_meters: 15.0,
            exclude_index: Some(0),
        },
        &transport,
    )
    .expect("geofences should succeed");

    assert_eq!(output.lines().count(), 1);
    assert!(output.contains("(59.999"), "unexpected output: {output}");
}

#[rstest]
fn geofences_reject_out_of_range_exclusion(transport: Arc<MemoryTransport>) {
    let err = run(
        Action::Geofences {
            radius_meters: 15.0,
            exclude_index: Some(3),
        },
        &transport,
    )
    .expect_err("index 3 is past the end");
    match err {
        CliError::ExcludeIndexOutOfRange { index, len } => {
            assert_eq!((index, len), (3, 3));
        }
        other => panic!("expected ExcludeIndexOutOfRange, found {other:?}"),
    }
}

#[rstest]
fn geofences_reject_bad_radius(transport: Arc<MemoryTransport>) {
    let err = run(
        Action::Geofences {
            radius_meters: 0.0,
            exclude_index: None,
        },
        &transport,
    )
    .expect_err("zero radius should fail");
    assert!(matches!(err, CliError::Geofence(_)), "got {err:?}");
}

#[rstest]
fn broken_document_surfaces_parse_error() {
    let transport = Arc::new(MemoryTransport::with_raw_document(b"{}".to_vec()));
    let err = run(Action::List, &transport).expect_err("missing record should fail");
    assert!(
        err.to_string().starts_with("failed to parse remote document"),
        "unexpected message: {err}"
    );
}
