use arret::gtfs::{self, Config, GtfsReader, GtfsTable};

fn nantes_dir() -> String {
    format!("{}/tests/data/nantes", env!("CARGO_MANIFEST_DIR"))
}

fn nantes_zip() -> String {
    format!("{}/tests/data/nantes.zip", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn read_from_directory_test() {
    let data = GtfsReader::new(Config::default())
        .from_directory(nantes_dir())
        .read()
        .unwrap();

    assert_eq!(data.stops.len(), 7);
    assert_eq!(data.routes.len(), 5);
    assert_eq!(data.trips.len(), 6);
    assert_eq!(data.stop_times.len(), 12);
    for stop in data.stops.iter() {
        if !stop.contains_key("stop_id") {
            panic!("stop_id should always be a column");
        }
    }
}

#[test]
fn read_from_zip_with_folder_test() {
    let data = GtfsReader::new(Config::default())
        .from_zip(nantes_zip())
        .read()
        .unwrap();

    assert_eq!(data.stops.len(), 7);
    assert_eq!(data.routes.len(), 5);
    assert_eq!(data.trips.len(), 6);
    assert_eq!(data.stop_times.len(), 12);
}

#[test]
fn from_path_picks_storage_test() {
    let from_dir = GtfsReader::new(Config::default())
        .from_path(nantes_dir())
        .read()
        .unwrap();
    let from_zip = GtfsReader::new(Config::default())
        .from_path(nantes_zip())
        .read()
        .unwrap();
    assert_eq!(from_dir.stops, from_zip.stops);
    assert_eq!(from_dir.stop_times, from_zip.stop_times);
}

#[test]
fn byte_order_mark_is_stripped_test() {
    let records = GtfsReader::new(Config::default())
        .from_directory(nantes_dir())
        .read_table(GtfsTable::Stops)
        .unwrap();
    assert_eq!(records[1].get("stop_id").map(String::as_str), Some("COMM1"));
}

#[test]
fn values_are_trimmed_test() {
    let csv = "stop_id , stop_name,stop_lat,stop_lon\n S1 , Commerce ,47.2, -1.5\n";
    let records = gtfs::read_records(csv.as_bytes(), GtfsTable::Stops).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["stop_id"], "S1");
    assert_eq!(records[0]["stop_name"], "Commerce");
    assert_eq!(records[0]["stop_lon"], "-1.5");
}

#[test]
fn short_rows_are_kept_test() {
    let csv = "route_id,route_short_name,route_color,route_type\nR1,12\nR2,13,ff0000,3,extra\n";
    let records = gtfs::read_records(csv.as_bytes(), GtfsTable::Routes).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("route_color"), None);
    assert_eq!(records[1]["route_type"], "3");
    assert_eq!(records[1].len(), 4);
}

#[test]
fn unreadable_rows_are_skipped_test() {
    let csv = b"stop_id,stop_name,stop_lat,stop_lon\nS1,Commerce,47.2,-1.5\nS2,H\xf4tel,47.3,-1.6\nS3,Duchesse,47.4,-1.7\n";
    let records = gtfs::read_records(&csv[..], GtfsTable::Stops).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r["stop_id"].as_str()).collect();
    assert_eq!(ids, vec!["S1", "S3"]);
}

#[test]
fn missing_header_test() {
    let csv = "stop_id,stop_name,stop_lat\nS1,Commerce,47.2\n";
    let result = gtfs::read_records(csv.as_bytes(), GtfsTable::Stops);
    match result {
        Err(gtfs::Error::MissingHeader { table, column }) => {
            assert_eq!(table, GtfsTable::Stops);
            assert_eq!(column, "stop_lon");
        }
        other => panic!("expected a missing header, got {other:?}"),
    }
}

#[test]
fn empty_source_is_a_load_failure_test() {
    let result = gtfs::read_records("".as_bytes(), GtfsTable::Trips);
    assert!(matches!(result, Err(gtfs::Error::MissingHeader { .. })));
}

#[test]
fn missing_file_test() {
    let dir = format!("{}/tests/data", env!("CARGO_MANIFEST_DIR"));
    let result = GtfsReader::new(Config::default()).from_directory(dir).read();
    assert!(matches!(result, Err(gtfs::Error::FileNotFound(_))));
}

#[test]
fn missing_file_in_zip_test() {
    let result = GtfsReader::new(Config::csv())
        .from_zip(nantes_zip())
        .read_table(GtfsTable::Routes);
    match result {
        Err(gtfs::Error::FileNotFound(name)) => assert_eq!(name, "routes.csv"),
        other => panic!("expected a missing file, got {other:?}"),
    }
}

#[test]
fn missing_archive_test() {
    let result = GtfsReader::new(Config::default())
        .from_zip("does-not-exist.zip")
        .read();
    assert!(matches!(result, Err(gtfs::Error::Io(_))));
}

#[test]
fn no_storage_reads_nothing_test() {
    let data = GtfsReader::default().read().unwrap();
    assert!(data.stops.is_empty());
    assert!(data.routes.is_empty());
}
