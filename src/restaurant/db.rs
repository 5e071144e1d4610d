//! Storage for restaurant visits.

use std::{
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::RestaurantId,
    restaurant::{NewRestaurant, Restaurant},
};

/// Handles the creation, retrieval and removal of restaurant visits.
///
/// Implementations must not cache records: every call reads from or writes
/// to the backing store.
pub trait RestaurantStore: Debug + Send + Sync {
    /// Retrieve every restaurant visit, most recently created first.
    fn list(&self) -> Result<Vec<Restaurant>, Error>;

    /// Retrieve a single restaurant visit.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no restaurant with that ID.
    fn get(&self, id: RestaurantId) -> Result<Restaurant, Error>;

    /// Store `restaurant` with the photo at `image`, and return it with its
    /// generated ID and creation time.
    fn create(&self, restaurant: NewRestaurant, image: Option<String>)
    -> Result<Restaurant, Error>;

    /// Replace the scalar fields of the restaurant `id`.
    ///
    /// The stored photo is only replaced if `image` is `Some`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no restaurant with that ID.
    fn update(
        &self,
        id: RestaurantId,
        restaurant: NewRestaurant,
        image: Option<String>,
    ) -> Result<Restaurant, Error>;

    /// Remove the restaurant `id` and return what was removed, so that the
    /// caller can clean up its photo.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no restaurant with that ID.
    fn delete(&self, id: RestaurantId) -> Result<Restaurant, Error>;
}

/// Stores restaurant visits in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteRestaurantStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteRestaurantStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The restaurant table must already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl RestaurantStore for SQLiteRestaurantStore {
    fn list(&self) -> Result<Vec<Restaurant>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, name, city, rating, comment, visit_date, image, created_at
                 FROM restaurants
                 ORDER BY created_at DESC, id DESC",
            )?
            .query_map([], map_restaurant_row)?
            .map(|maybe_restaurant| maybe_restaurant.map_err(Error::from))
            .collect()
    }

    fn get(&self, id: RestaurantId) -> Result<Restaurant, Error> {
        self.lock()?
            .prepare(
                "SELECT id, name, city, rating, comment, visit_date, image, created_at
                 FROM restaurants WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], map_restaurant_row)
            .map_err(Error::from)
    }

    fn create(
        &self,
        restaurant: NewRestaurant,
        image: Option<String>,
    ) -> Result<Restaurant, Error> {
        self.lock()?
            .prepare(
                "INSERT INTO restaurants (name, city, rating, comment, visit_date, image, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING id, name, city, rating, comment, visit_date, image, created_at",
            )?
            .query_row(
                (
                    restaurant.name,
                    restaurant.city,
                    restaurant.rating,
                    restaurant.comment,
                    restaurant.visit_date,
                    image,
                    OffsetDateTime::now_utc(),
                ),
                map_restaurant_row,
            )
            .map_err(Error::from)
    }

    fn update(
        &self,
        id: RestaurantId,
        restaurant: NewRestaurant,
        image: Option<String>,
    ) -> Result<Restaurant, Error> {
        self.lock()?
            .prepare(
                "UPDATE restaurants
                 SET name = ?1, city = ?2, rating = ?3, comment = ?4, visit_date = ?5,
                     image = COALESCE(?6, image)
                 WHERE id = ?7
                 RETURNING id, name, city, rating, comment, visit_date, image, created_at",
            )?
            .query_row(
                (
                    restaurant.name,
                    restaurant.city,
                    restaurant.rating,
                    restaurant.comment,
                    restaurant.visit_date,
                    image,
                    id,
                ),
                map_restaurant_row,
            )
            .map_err(Error::from)
    }

    fn delete(&self, id: RestaurantId) -> Result<Restaurant, Error> {
        self.lock()?
            .prepare(
                "DELETE FROM restaurants WHERE id = ?1
                 RETURNING id, name, city, rating, comment, visit_date, image, created_at",
            )?
            .query_row([id], map_restaurant_row)
            .map_err(Error::from)
    }
}

/// Create the restaurant table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_restaurant_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS restaurants (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(trim(name)) > 0),
            city TEXT,
            rating INTEGER NOT NULL DEFAULT 5 CHECK (rating BETWEEN 1 AND 5),
            comment TEXT,
            visit_date TEXT NOT NULL,
            image TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f+00:00', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_restaurants_created_at ON restaurants(created_at);",
    )?;

    Ok(())
}

/// Map a database row to a [Restaurant].
pub fn map_restaurant_row(row: &Row) -> Result<Restaurant, rusqlite::Error> {
    Ok(Restaurant {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        rating: row.get(3)?,
        comment: row.get(4)?,
        visit_date: row.get(5)?,
        image: row.get(6)?,
        created_at: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        restaurant::{NewRestaurant, Rating, RestaurantStore, SQLiteRestaurantStore},
    };

    fn get_test_store() -> SQLiteRestaurantStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        SQLiteRestaurantStore::new(Arc::new(Mutex::new(connection)))
    }

    fn new_restaurant(name: &str) -> NewRestaurant {
        NewRestaurant {
            name: name.to_owned(),
            city: Some("Valencia".to_owned()),
            rating: Rating::new(4).unwrap(),
            comment: None,
            visit_date: date!(2025 - 06 - 21),
        }
    }

    #[test]
    fn create_assigns_id_and_creation_time() {
        let store = get_test_store();

        let got = store
            .create(new_restaurant("La Pepica"), Some("uploads/1-0.jpg".to_owned()))
            .expect("could not create restaurant");

        assert!(got.id > 0);
        assert_eq!(got.name, "La Pepica");
        assert_eq!(got.city.as_deref(), Some("Valencia"));
        assert_eq!(got.rating.get(), 4);
        assert_eq!(got.visit_date, date!(2025 - 06 - 21));
        assert_eq!(got.image.as_deref(), Some("uploads/1-0.jpg"));
        assert_eq!(store.get(got.id), Ok(got));
    }

    #[test]
    fn list_is_newest_first() {
        let store = get_test_store();
        let first = store.create(new_restaurant("Primero"), None).unwrap();
        let second = store.create(new_restaurant("Segundo"), None).unwrap();

        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|restaurant| restaurant.id)
            .collect();

        assert_eq!(names, vec![second.id, first.id]);
    }

    #[test]
    fn update_without_image_keeps_stored_image() {
        let store = get_test_store();
        let created = store
            .create(new_restaurant("Bar Tomate"), Some("uploads/old.jpg".to_owned()))
            .unwrap();

        let updated = store
            .update(created.id, new_restaurant("Bar Tomate II"), None)
            .unwrap();

        assert_eq!(updated.name, "Bar Tomate II");
        assert_eq!(updated.image.as_deref(), Some("uploads/old.jpg"));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_with_image_overwrites_stored_image() {
        let store = get_test_store();
        let created = store
            .create(new_restaurant("Bar Tomate"), Some("uploads/old.jpg".to_owned()))
            .unwrap();

        let updated = store
            .update(
                created.id,
                new_restaurant("Bar Tomate"),
                Some("uploads/new.jpg".to_owned()),
            )
            .unwrap();

        assert_eq!(updated.image.as_deref(), Some("uploads/new.jpg"));
    }

    #[test]
    fn update_missing_restaurant_is_not_found() {
        let store = get_test_store();

        let result = store.update(3, new_restaurant("Nadie"), None);

        assert_eq!(result, Err(Error::NotFound));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn delete_returns_removed_restaurant_then_not_found() {
        let store = get_test_store();
        let created = store
            .create(new_restaurant("Efímero"), Some("uploads/x.png".to_owned()))
            .unwrap();

        let deleted = store.delete(created.id).unwrap();

        assert_eq!(deleted, created);
        assert_eq!(store.delete(created.id), Err(Error::NotFound));
        assert_eq!(store.get(created.id), Err(Error::NotFound));
    }

    #[test]
    fn table_rejects_rating_out_of_range() {
        let store = get_test_store();
        let connection = store.connection.lock().unwrap();

        let result = connection.execute(
            "INSERT INTO restaurants (name, rating, visit_date) VALUES ('x', 6, '2025-01-01')",
            (),
        );

        assert!(result.is_err());
    }
}
