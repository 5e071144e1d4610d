//! Implements a struct that holds the state of the REST server.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    expense::{ExpenseStore, SQLiteExpenseStore},
    restaurant::{RestaurantStore, SQLiteRestaurantStore},
    timezone::get_local_offset,
    upload::{BlobStore, DiskBlobStore},
};

/// The state of the REST server.
///
/// Route handlers take the narrower states ([crate::expense::ExpenseState]
/// and [crate::restaurant::RestaurantState]) which are derived from this one.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where expenses are kept.
    pub expense_store: Arc<dyn ExpenseStore>,

    /// Where restaurant visits are kept.
    pub restaurant_store: Arc<dyn RestaurantStore>,

    /// Where restaurant photos are kept.
    pub blob_store: Arc<dyn BlobStore>,

    /// The local timezone as a canonical timezone name, e.g. "Europe/Madrid".
    pub local_timezone: String,

    /// The directory holding the prebuilt frontend bundle.
    pub static_dir: PathBuf,

    /// The directory uploaded photos are written to and served from.
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models,
    /// and create `upload_dir` if it does not exist.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Europe/Madrid".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized, the timezone is
    /// unknown or the upload directory cannot be created.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        static_dir: impl Into<PathBuf>,
        upload_dir: impl Into<PathBuf>,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezone(local_timezone.to_owned()));
        }

        let upload_dir = upload_dir.into();
        let blob_store = DiskBlobStore::new(&upload_dir)?;
        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            expense_store: Arc::new(SQLiteExpenseStore::new(connection.clone())),
            restaurant_store: Arc::new(SQLiteRestaurantStore::new(connection)),
            blob_store: Arc::new(blob_store),
            local_timezone: local_timezone.to_owned(),
            static_dir: static_dir.into(),
            upload_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use crate::{AppState, Error};

    #[test]
    fn creates_upload_directory() {
        let directory = TempDir::new().unwrap();
        let upload_dir = directory.path().join("fotos");

        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            "Europe/Madrid",
            directory.path(),
            &upload_dir,
        )
        .expect("could not create app state");

        assert!(upload_dir.is_dir());
        assert_eq!(state.upload_dir, upload_dir);
        assert!(state.expense_store.list().unwrap().is_empty());
        assert!(state.restaurant_store.list().unwrap().is_empty());
    }

    #[test]
    fn rejects_unknown_timezone() {
        let directory = TempDir::new().unwrap();

        let result = AppState::new(
            Connection::open_in_memory().unwrap(),
            "Atlantis/Capital",
            directory.path(),
            directory.path().join("uploads"),
        );

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezone("Atlantis/Capital".to_owned()))
        );
    }
}
