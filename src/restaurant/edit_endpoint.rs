//! Defines the endpoint for editing a restaurant visit.

use axum::{
    Json,
    extract::{
        Multipart, Path, State,
        multipart::MultipartRejection,
        rejection::PathRejection,
    },
};

use crate::{
    Error,
    database_id::RestaurantId,
    restaurant::{Restaurant, RestaurantState, form::RestaurantForm},
};

/// A route handler that replaces the fields of a restaurant visit.
///
/// The stored photo is kept unless the form carries a new one. When it is
/// replaced, the old file is removed from disk.
pub async fn update_restaurant_endpoint(
    State(state): State<RestaurantState>,
    path: Result<Path<RestaurantId>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Restaurant>, Error> {
    let Path(restaurant_id) = path?;
    let (new_restaurant, image) = RestaurantForm::from_multipart(multipart?).await?.validate()?;

    let existing = state.store.get(restaurant_id)?;

    let image_path = image
        .map(|image| state.blob_store.store(&image.bytes, &image.file_name))
        .transpose()?;

    let restaurant = state
        .store
        .update(restaurant_id, new_restaurant, image_path.clone())
        .inspect_err(|error| {
            tracing::debug!("Could not update restaurant {restaurant_id}: {error}");
            if let Some(path) = &image_path {
                state.blob_store.discard(path);
            }
        })?;

    if let (Some(_), Some(old_path)) = (&image_path, &existing.image) {
        state.blob_store.discard(old_path);
    }

    Ok(Json(restaurant))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use time::macros::date;

    use crate::{
        endpoints::{self, format_endpoint},
        restaurant::{
            FailingRestaurantStore, NewRestaurant, Rating, Restaurant, test_server,
            test_server_with_store,
        },
    };

    fn new_restaurant() -> NewRestaurant {
        NewRestaurant {
            name: "El Faro".to_owned(),
            city: Some("Cádiz".to_owned()),
            rating: Rating::new(3).unwrap(),
            comment: None,
            visit_date: date!(2025 - 07 - 01),
        }
    }

    fn edit_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("name", "El Faro de Cádiz")
            .add_text("city", "Cádiz")
            .add_text("rating", "4")
            .add_text("comment", "Mejor la segunda vez")
            .add_text("visitDate", "2025-07-02")
    }

    #[tokio::test]
    async fn update_without_image_preserves_image() {
        let (server, state, _directory) = test_server();
        let created = state
            .store
            .create(new_restaurant(), Some("uploads/antigua.jpg".to_owned()))
            .unwrap();

        let response = server
            .put(&format_endpoint(endpoints::RESTAURANT, created.id))
            .multipart(edit_form())
            .await;

        response.assert_status_ok();
        let updated: Restaurant = response.json();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "El Faro de Cádiz");
        assert_eq!(updated.rating.get(), 4);
        assert_eq!(updated.comment.as_deref(), Some("Mejor la segunda vez"));
        assert_eq!(updated.visit_date, date!(2025 - 07 - 02));
        assert_eq!(updated.image.as_deref(), Some("uploads/antigua.jpg"));
    }

    #[tokio::test]
    async fn update_with_image_replaces_and_removes_old_file() {
        let (server, state, directory) = test_server();
        let old_path = state.blob_store.store(b"old", "vieja.jpg").unwrap();
        let created = state
            .store
            .create(new_restaurant(), Some(old_path.clone()))
            .unwrap();
        let form = edit_form().add_part(
            "image",
            Part::bytes(b"new".to_vec())
                .file_name("nueva.png")
                .mime_type("image/png"),
        );

        let response = server
            .put(&format_endpoint(endpoints::RESTAURANT, created.id))
            .multipart(form)
            .await;

        response.assert_status_ok();
        let updated: Restaurant = response.json();
        let new_path = updated.image.expect("image should be set");
        assert_ne!(new_path, old_path);
        assert_eq!(std::fs::read(directory.path().join(&new_path)).unwrap(), b"new");
        assert!(!directory.path().join(&old_path).exists());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_and_stores_nothing() {
        let (server, state, directory) = test_server();
        let form = edit_form().add_part("image", Part::bytes(b"x".to_vec()).file_name("x.jpg"));

        let response = server
            .put(&format_endpoint(endpoints::RESTAURANT, 99))
            .multipart(form)
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(state.store.list().unwrap().is_empty());
        let uploads = std::fs::read_dir(directory.path().join("uploads")).unwrap();
        assert_eq!(uploads.count(), 0);
    }

    #[tokio::test]
    async fn failed_write_removes_new_image() {
        let (server, _state, directory) = test_server_with_store(Arc::new(FailingRestaurantStore));
        let form = edit_form().add_part(
            "image",
            Part::bytes(b"new".to_vec())
                .file_name("nueva.png")
                .mime_type("image/png"),
        );

        let response = server
            .put(&format_endpoint(endpoints::RESTAURANT, 1))
            .multipart(form)
            .await;

        response.assert_status_internal_server_error();
        let uploads = std::fs::read_dir(directory.path().join("uploads")).unwrap();
        assert_eq!(uploads.count(), 0, "the new image should have been removed");
    }
}
