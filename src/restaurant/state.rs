//! The state shared by the restaurant route handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{AppState, restaurant::RestaurantStore, upload::BlobStore};

/// The state needed to read and write restaurant visits and their photos.
#[derive(Debug, Clone)]
pub struct RestaurantState {
    /// Where restaurant visits are kept.
    pub store: Arc<dyn RestaurantStore>,
    /// Where photos are kept.
    pub blob_store: Arc<dyn BlobStore>,
}

impl FromRef<AppState> for RestaurantState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.restaurant_store.clone(),
            blob_store: state.blob_store.clone(),
        }
    }
}

/// A test server with only the restaurant routes, backed by an in-memory
/// database and a temporary upload directory.
///
/// The returned [tempfile::TempDir] must be kept alive for the duration of the test.
#[cfg(test)]
pub(crate) fn test_server() -> (axum_test::TestServer, RestaurantState, tempfile::TempDir) {
    use std::sync::Mutex;

    use rusqlite::Connection;

    use crate::{db::initialize, restaurant::SQLiteRestaurantStore};

    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize(&connection).expect("could not initialize test DB");

    test_server_with_store(Arc::new(SQLiteRestaurantStore::new(Arc::new(Mutex::new(
        connection,
    )))))
}

/// Like [test_server], but with the restaurant routes backed by `store`.
#[cfg(test)]
pub(crate) fn test_server_with_store(
    store: Arc<dyn RestaurantStore>,
) -> (axum_test::TestServer, RestaurantState, tempfile::TempDir) {
    use axum::{Router, routing::get};

    use crate::{
        endpoints,
        restaurant::{
            create_restaurant_endpoint, delete_restaurant_endpoint, list_restaurants_endpoint,
            update_restaurant_endpoint,
        },
        upload::DiskBlobStore,
    };

    let directory = tempfile::TempDir::new().expect("could not create temp dir");
    let blob_store =
        DiskBlobStore::new(directory.path().join("uploads")).expect("could not create blob store");

    let state = RestaurantState {
        store,
        blob_store: Arc::new(blob_store),
    };

    let app = Router::new()
        .route(
            endpoints::RESTAURANTS,
            get(list_restaurants_endpoint).post(create_restaurant_endpoint),
        )
        .route(
            endpoints::RESTAURANT,
            axum::routing::put(update_restaurant_endpoint).delete(delete_restaurant_endpoint),
        )
        .with_state(state.clone());

    let server = axum_test::TestServer::try_new(app).expect("Could not create test server.");

    (server, state, directory)
}

#[cfg(test)]
pub(crate) use failing_store::FailingRestaurantStore;
