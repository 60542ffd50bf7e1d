use arret::prelude::*;
use criterion::{Criterion, criterion_group, criterion_main};
use std::{env, hint::black_box, path::Path};

const STOPS: usize = 5_000;
const ROUTES: usize = 150;
const TRIPS: usize = 20_000;
const STOPS_PER_TRIP: usize = 25;

fn record(pairs: &[(&str, String)]) -> Record {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

// A feed roughly the size of a mid sized city network
fn synthetic_feed() -> GtfsData {
    let stops = (0..STOPS)
        .map(|i| {
            record(&[
                ("stop_id", format!("S{i}")),
                ("stop_name", format!("Stop {i}")),
                ("stop_lat", format!("{}", 47.0 + (i % 100) as f64 * 0.005)),
                ("stop_lon", format!("{}", -1.7 + (i / 100) as f64 * 0.005)),
                ("location_type", "0".into()),
            ])
        })
        .collect();
    let routes = (0..ROUTES)
        .map(|i| {
            record(&[
                ("route_id", format!("R{i}")),
                ("route_short_name", format!("{i}")),
                ("route_color", "ff0000".into()),
                ("route_type", String::from(if i % 10 == 0 { "0" } else { "3" })),
            ])
        })
        .collect();
    let trips = (0..TRIPS)
        .map(|i| {
            record(&[
                ("trip_id", format!("T{i}")),
                ("route_id", format!("R{}", i % ROUTES)),
            ])
        })
        .collect();
    let stop_times = (0..TRIPS)
        .flat_map(|trip| {
            let route = trip % ROUTES;
            (0..STOPS_PER_TRIP).map(move |seq| {
                record(&[
                    ("trip_id", format!("T{trip}")),
                    ("stop_id", format!("S{}", (route * 31 + seq * 7) % STOPS)),
                ])
            })
        })
        .collect();
    GtfsData {
        stops,
        stop_times,
        trips,
        routes,
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let data = match env::var("GTFS_DATA_PATH") {
        Ok(path_str) => {
            let reader = GtfsReader::new(Config::default()).from_path(Path::new(&path_str));
            match reader.read() {
                Ok(data) => data,
                Err(err) => {
                    println!("Failed to read {path_str}: {err}");
                    return;
                }
            }
        }
        Err(_) => synthetic_feed(),
    };
    let repository = Repository::new().with_data(&data);
    let stop_ids: Vec<String> = repository
        .stops()
        .iter()
        .take(100)
        .map(|stop| stop.id.to_string())
        .collect();

    let mut group = c.benchmark_group("Index");
    group.sample_size(10);

    group.bench_function("Normalize", |b| b.iter(|| normalize(black_box(&data))));

    group.bench_function("Build", |b| {
        b.iter(|| Repository::new().with_data(black_box(&data)))
    });

    group.bench_function("Routes for 100 stops", |b| {
        b.iter(|| {
            stop_ids
                .iter()
                .map(|stop_id| repository.routes_for_stop(black_box(stop_id)).len())
                .sum::<usize>()
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
