//! Defines the endpoint for listing restaurant visits.

use axum::{Json, extract::State};

use crate::{
    Error,
    restaurant::{Restaurant, RestaurantState},
};

/// A route handler that returns every restaurant visit, most recently added first.
pub async fn list_restaurants_endpoint(
    State(state): State<RestaurantState>,
) -> Result<Json<Vec<Restaurant>>, Error> {
    state.store.list().map(Json)
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use time::macros::date;

    use crate::restaurant::{NewRestaurant, Rating, list_restaurants_endpoint, test_server};

    fn new_restaurant(name: &str) -> NewRestaurant {
        NewRestaurant {
            name: name.to_owned(),
            city: Some("Sevilla".to_owned()),
            rating: Rating::new(4).unwrap(),
            comment: None,
            visit_date: date!(2025 - 09 - 12),
        }
    }

    #[tokio::test]
    async fn empty_database_returns_empty_list() {
        let (_server, state, _directory) = test_server();

        let restaurants = list_restaurants_endpoint(State(state)).await.unwrap();

        assert!(restaurants.0.is_empty());
    }

    #[tokio::test]
    async fn returns_newest_first() {
        let (_server, state, _directory) = test_server();
        let first = state.store.create(new_restaurant("Primero"), None).unwrap();
        let second = state.store.create(new_restaurant("Segundo"), None).unwrap();
        let third = state.store.create(new_restaurant("Tercero"), None).unwrap();

        let restaurants = list_restaurants_endpoint(State(state)).await.unwrap();

        assert_eq!(restaurants.0, vec![third, second, first]);
    }
}
