mod gtfs;
mod stops;

pub use gtfs::*;
pub use stops::*;
