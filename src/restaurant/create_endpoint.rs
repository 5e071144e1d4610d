//! Defines the endpoint for adding a restaurant visit.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
};

use crate::{
    Error,
    restaurant::{Restaurant, RestaurantState, form::RestaurantForm},
};

/// A route handler for adding a restaurant visit from a multipart form.
///
/// The photo, if any, is stored before the record. If the record cannot be
/// written, the photo is removed again.
pub async fn create_restaurant_endpoint(
    State(state): State<RestaurantState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Restaurant>), Error> {
    let (new_restaurant, image) = RestaurantForm::from_multipart(multipart?).await?.validate()?;

    let image_path = image
        .map(|image| state.blob_store.store(&image.bytes, &image.file_name))
        .transpose()?;

    let restaurant = state
        .store
        .create(new_restaurant, image_path.clone())
        .inspect_err(|_| {
            if let Some(path) = &image_path {
                state.blob_store.discard(path);
            }
        })?;
    tracing::debug!("Created restaurant {}", restaurant.id);

    Ok((StatusCode::CREATED, Json(restaurant)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use time::macros::date;

    use crate::{
        endpoints,
        response::ErrorBody,
        restaurant::{FailingRestaurantStore, Restaurant, test_server, test_server_with_store},
    };

    #[tokio::test]
    async fn can_create_restaurant_without_image() {
        let (server, state, _directory) = test_server();
        let form = MultipartForm::new()
            .add_text("name", "Casa Montaña")
            .add_text("city", "Valencia")
            .add_text("rating", "5")
            .add_text("comment", "")
            .add_text("visitDate", "2025-03-08");

        let response = server.post(endpoints::RESTAURANTS).multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        let restaurant: Restaurant = response.json();
        assert_eq!(restaurant.name, "Casa Montaña");
        assert_eq!(restaurant.city.as_deref(), Some("Valencia"));
        assert_eq!(restaurant.rating.get(), 5);
        assert_eq!(restaurant.comment, None);
        assert_eq!(restaurant.visit_date, date!(2025 - 03 - 08));
        assert_eq!(restaurant.image, None);
        assert_eq!(state.store.list().unwrap(), vec![restaurant]);
    }

    #[tokio::test]
    async fn stores_uploaded_image() {
        let (server, _state, directory) = test_server();
        let form = MultipartForm::new()
            .add_text("name", "Sushi Bar")
            .add_text("visitDate", "2025-04-01")
            .add_part(
                "image",
                Part::bytes(b"fake jpeg".to_vec())
                    .file_name("foto.JPG")
                    .mime_type("image/jpeg"),
            );

        let response = server.post(endpoints::RESTAURANTS).multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        let restaurant: Restaurant = response.json();
        let image = restaurant.image.expect("image path should be set");
        assert!(image.starts_with("uploads/"), "got {image}");
        assert!(image.ends_with(".jpg"), "got {image}");
        let stored = std::fs::read(directory.path().join(&image)).unwrap();
        assert_eq!(stored, b"fake jpeg");
    }

    #[tokio::test]
    async fn missing_name_and_date_is_bad_request() {
        let (server, state, _directory) = test_server();
        let form = MultipartForm::new().add_text("city", "Bilbao");

        let response = server.post(endpoints::RESTAURANTS).multipart(form).await;

        response.assert_status_bad_request();
        let body: ErrorBody = response.json();
        assert_eq!(body.error, "missing required fields: name, visitDate");
        assert!(state.store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rating_out_of_range_is_bad_request() {
        let (server, _state, directory) = test_server();
        let form = MultipartForm::new()
            .add_text("name", "Demasiado bueno")
            .add_text("rating", "11")
            .add_text("visitDate", "2025-04-01")
            .add_part("image", Part::bytes(b"x".to_vec()).file_name("x.png"));

        let response = server.post(endpoints::RESTAURANTS).multipart(form).await;

        response.assert_status_bad_request();
        let uploads = std::fs::read_dir(directory.path().join("uploads")).unwrap();
        assert_eq!(uploads.count(), 0, "no file should be stored for a rejected form");
    }

    #[tokio::test]
    async fn failed_write_removes_stored_image() {
        let (server, _state, directory) = test_server_with_store(Arc::new(FailingRestaurantStore));
        let form = MultipartForm::new()
            .add_text("name", "Sin Mesa")
            .add_text("visitDate", "2025-04-01")
            .add_part("image", Part::bytes(b"photo".to_vec()).file_name("mesa.jpg"));

        let response = server.post(endpoints::RESTAURANTS).multipart(form).await;

        response.assert_status_internal_server_error();
        let body: ErrorBody = response.json();
        assert!(!body.error.contains("SQL"), "got {}", body.error);
        let uploads = std::fs::read_dir(directory.path().join("uploads")).unwrap();
        assert_eq!(uploads.count(), 0, "the stored image should have been removed");
    }
}
