pub mod csv_loader;
pub mod errors;
pub mod utils;

pub use csv_loader::VolumeProfileCsvLoader;
pub use errors::VolumeProfileLoadingError;
