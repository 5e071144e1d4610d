//! Restaurant visits, each with an optional photo.

mod create_endpoint;
mod db;
mod delete_endpoint;
mod domain;
mod edit_endpoint;
mod form;
mod list_endpoint;
mod state;

pub use create_endpoint::create_restaurant_endpoint;
pub use db::{RestaurantStore, SQLiteRestaurantStore, create_restaurant_table};
pub use delete_endpoint::delete_restaurant_endpoint;
pub use domain::{NewRestaurant, Rating, Restaurant};
pub use edit_endpoint::update_restaurant_endpoint;
pub use list_endpoint::list_restaurants_endpoint;
pub use state::RestaurantState;

#[cfg(test)]
pub(crate) use state::{FailingRestaurantStore, test_server, test_server_with_store};
