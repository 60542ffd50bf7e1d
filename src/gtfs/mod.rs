use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    time::Instant,
};
use thiserror::Error;
use tracing::{debug, trace, warn};
use zip::ZipArchive;

mod config;
mod data;
pub use config::*;
pub use data::*;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Anything that keeps a source from being read as a table.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Csv file for {table} is missing header {column}")]
    MissingHeader {
        table: GtfsTable,
        column: &'static str,
    },
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
}

#[derive(Default, Debug, Clone)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Directory(PathBuf),
}

/// Reads the four sources of a feed from a directory or a zip archive.
#[derive(Default, Debug, Clone)]
pub struct GtfsReader {
    config: Config,
    storage: StorageType,
}

impl GtfsReader {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_zip<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Zip(path.as_ref().to_path_buf());
        self
    }

    pub fn from_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Directory(path.as_ref().to_path_buf());
        self
    }

    /// Picks zip or directory storage from what `path` points at.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Self {
        if path.as_ref().is_dir() {
            self.from_directory(path)
        } else {
            self.from_zip(path)
        }
    }

    /// Reads all four tables concurrently.
    /// Either every table is read or the first failure is returned, there is no partial result.
    pub fn read(&self) -> Result<GtfsData, self::Error> {
        let now = Instant::now();
        let ((stops, stop_times), (trips, routes)) = rayon::join(
            || {
                rayon::join(
                    || self.read_table(GtfsTable::Stops),
                    || self.read_table(GtfsTable::StopTimes),
                )
            },
            || {
                rayon::join(
                    || self.read_table(GtfsTable::Trips),
                    || self.read_table(GtfsTable::Routes),
                )
            },
        );
        let data = GtfsData {
            stops: stops?,
            stop_times: stop_times?,
            trips: trips?,
            routes: routes?,
        };
        debug!("Reading gtfs tables took {:?}", now.elapsed());
        Ok(data)
    }

    pub fn read_table(&self, table: GtfsTable) -> Result<Vec<Record>, self::Error> {
        let file_name = self.config.file_name(table);
        match &self.storage {
            StorageType::None => Ok(Vec::new()),
            StorageType::Zip(path) => read_from_zip(path, file_name, table),
            StorageType::Directory(path) => {
                let path = path.join(file_name);
                if !path.is_file() {
                    return Err(self::Error::FileNotFound(path.display().to_string()));
                }
                read_records(File::open(path)?, table)
            }
        }
    }
}

/// Parses a CSV stream into raw records.
/// Headers and values are trimmed and rows may be shorter or longer than the header.
/// Rows the csv reader cannot decode, such as invalid UTF-8, are dropped. Only IO
/// failures and a bad header fail the whole source.
pub fn read_records<R: Read>(reader: R, table: GtfsTable) -> Result<Vec<Record>, self::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches(BYTE_ORDER_MARK).to_string())
        .collect();
    if let Some(column) = table
        .required_columns()
        .iter()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        return Err(self::Error::MissingHeader {
            table,
            column: *column,
        });
    }

    let mut records = Vec::new();
    let mut unreadable = 0;
    for (i, result) in rdr.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                trace!("Skipping unreadable {table} row {i}: {err}");
                unreadable += 1;
                continue;
            }
        };
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        records.push(record);
    }
    if unreadable > 0 {
        warn!("Skipped {unreadable} unreadable {table} rows");
    }
    debug!("Read {} rows from {table}", records.len());
    Ok(records)
}

fn read_from_zip(
    zip_path: &PathBuf,
    file_name: &str,
    table: GtfsTable,
) -> Result<Vec<Record>, self::Error> {
    let zip_file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(zip_file)?;
    let index = find_index(&archive, file_name)
        .ok_or(self::Error::FileNotFound(file_name.to_string()))?;
    let file = archive.by_index(index)?;
    read_records(file, table)
}

// Feeds are often zipped together with their parent folder, so `gtfs/stops.txt` counts too.
fn find_index(archive: &ZipArchive<File>, name: &str) -> Option<usize> {
    archive.index_for_name(name).or_else(|| {
        (0..archive.len()).find(|i| {
            archive
                .name_for_index(*i)
                .and_then(|entry| entry.rsplit('/').next())
                .is_some_and(|entry| entry == name)
        })
    })
}
