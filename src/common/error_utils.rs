use crate::loader::errors::VolumeProfileLoadingError;

/// Common error mapping utilities to reduce repetitive .map_err() patterns
/// Map a failure to open a profile source, separating missing files from other IO errors
pub fn map_open_error(path: &str) -> impl Fn(std::io::Error) -> VolumeProfileLoadingError + '_ {
    move |e| match e.kind() {
        std::io::ErrorKind::NotFound => VolumeProfileLoadingError::FileNotFound {
            path: path.to_string(),
            source: e,
        },
        _ => VolumeProfileLoadingError::Io {
            path: path.to_string(),
            source: e,
        },
    }
}

/// Map CSV reader errors with the source name
pub fn map_csv_error(path: &str) -> impl Fn(csv::Error) -> VolumeProfileLoadingError + '_ {
    move |e| VolumeProfileLoadingError::Csv {
        path: path.to_string(),
        source: e,
    }
}

/// Helper trait for attaching the source name to read failures
pub trait ErrorContext<T> {
    fn with_read_context(self, path: &str) -> Result<T, VolumeProfileLoadingError>;
}

impl<T> ErrorContext<T> for Result<T, std::io::Error> {
    fn with_read_context(self, path: &str) -> Result<T, VolumeProfileLoadingError> {
        self.map_err(map_open_error(path))
    }
}

impl<T> ErrorContext<T> for Result<T, csv::Error> {
    fn with_read_context(self, path: &str) -> Result<T, VolumeProfileLoadingError> {
        self.map_err(map_csv_error(path))
    }
}
