use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Preference store error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to prepare preference store location: {0}")]
    Io(#[from] std::io::Error),
}
