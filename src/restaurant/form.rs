//! Reading and validating the multipart form used for restaurant visits.

use axum::{
    body::Bytes,
    extract::{Multipart, multipart::Field},
};

use crate::{
    Error,
    form::{non_blank, parse_date},
    restaurant::{NewRestaurant, Rating},
};

/// A photo sent along with a restaurant form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    /// The file name on the client's machine. Only its extension is kept.
    pub file_name: String,
    /// The raw file contents.
    pub bytes: Bytes,
}

/// The raw fields of the restaurant form, as sent by the client.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RestaurantForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub rating: Option<String>,
    pub comment: Option<String>,
    /// Sent by the client as `visitDate`.
    pub visit_date: Option<String>,
    pub image: Option<ImageUpload>,
}

impl RestaurantForm {
    /// Read every field of a multipart form.
    ///
    /// Unknown fields are ignored. An `image` field with no content, which
    /// browsers send when no file was picked, counts as no image.
    ///
    /// # Errors
    /// Returns an [Error::MultipartError] if the form cannot be read.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, Error> {
        let mut form = RestaurantForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|error| Error::MultipartError(error.body_text()))?
        {
            let field_name = field.name().unwrap_or_default().to_owned();

            match field_name.as_str() {
                "name" => form.name = Some(read_text(field).await?),
                "city" => form.city = Some(read_text(field).await?),
                "rating" => form.rating = Some(read_text(field).await?),
                "comment" => form.comment = Some(read_text(field).await?),
                "visitDate" | "visit_date" => form.visit_date = Some(read_text(field).await?),
                "image" => {
                    let file_name = field.file_name().unwrap_or_default().to_owned();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|error| Error::MultipartError(error.body_text()))?;

                    if !bytes.is_empty() {
                        form.image = Some(ImageUpload { file_name, bytes });
                    }
                }
                other => tracing::debug!("Ignoring unexpected form field \"{other}\""),
            }
        }

        Ok(form)
    }

    /// Check the form and split it into the scalar fields and the optional photo.
    ///
    /// A missing rating defaults to [Rating::default].
    ///
    /// # Errors
    /// Returns an:
    /// - [Error::MissingFields] if the name or visit date is absent or blank,
    /// - or [Error::InvalidField] if the rating or date cannot be parsed.
    pub fn validate(self) -> Result<(NewRestaurant, Option<ImageUpload>), Error> {
        let name = non_blank(self.name);
        let visit_date = non_blank(self.visit_date);

        let (name, visit_date) = match (name, visit_date) {
            (Some(name), Some(visit_date)) => (name, visit_date),
            (name, visit_date) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name");
                }
                if visit_date.is_none() {
                    missing.push("visitDate");
                }
                return Err(Error::MissingFields(missing));
            }
        };

        let rating = match non_blank(self.rating) {
            Some(rating) => rating.parse()?,
            None => Rating::default(),
        };

        let restaurant = NewRestaurant {
            name,
            city: non_blank(self.city),
            rating,
            comment: non_blank(self.comment),
            visit_date: parse_date("visitDate", &visit_date)?,
        };

        Ok((restaurant, self.image))
    }
}

async fn read_text(field: Field<'_>) -> Result<String, Error> {
    field
        .text()
        .await
        .map_err(|error| Error::MultipartError(error.body_text()))
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use time::macros::date;

    use crate::{
        Error,
        restaurant::{NewRestaurant, Rating, form::ImageUpload, form::RestaurantForm},
    };

    fn valid_form() -> RestaurantForm {
        RestaurantForm {
            name: Some("Casa Lucio".to_owned()),
            city: Some("Madrid".to_owned()),
            rating: Some("4".to_owned()),
            comment: Some("Huevos rotos".to_owned()),
            visit_date: Some("2025-05-17".to_owned()),
            image: None,
        }
    }

    #[test]
    fn valid_form_converts() {
        let (restaurant, image) = valid_form().validate().unwrap();

        assert_eq!(
            restaurant,
            NewRestaurant {
                name: "Casa Lucio".to_owned(),
                city: Some("Madrid".to_owned()),
                rating: Rating::new(4).unwrap(),
                comment: Some("Huevos rotos".to_owned()),
                visit_date: date!(2025 - 05 - 17),
            }
        );
        assert_eq!(image, None);
    }

    #[test]
    fn name_and_visit_date_are_required() {
        let form = RestaurantForm {
            name: Some(" ".to_owned()),
            visit_date: None,
            ..valid_form()
        };

        assert_eq!(
            form.validate().map(|(restaurant, _)| restaurant),
            Err(Error::MissingFields(vec!["name", "visitDate"]))
        );
    }

    #[test]
    fn missing_rating_defaults_to_five() {
        let form = RestaurantForm {
            rating: Some(String::new()),
            ..valid_form()
        };

        let (restaurant, _) = form.validate().unwrap();

        assert_eq!(restaurant.rating.get(), 5);
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        let form = RestaurantForm {
            rating: Some("7".to_owned()),
            ..valid_form()
        };

        assert!(matches!(
            form.validate(),
            Err(Error::InvalidField {
                field: "rating",
                ..
            })
        ));
    }

    #[test]
    fn blank_optional_fields_are_absent() {
        let form = RestaurantForm {
            city: Some(String::new()),
            comment: Some("  ".to_owned()),
            ..valid_form()
        };

        let (restaurant, _) = form.validate().unwrap();

        assert_eq!(restaurant.city, None);
        assert_eq!(restaurant.comment, None);
    }

    #[test]
    fn image_is_passed_through() {
        let image = ImageUpload {
            file_name: "plato.png".to_owned(),
            bytes: Bytes::from_static(b"\x89PNG"),
        };
        let form = RestaurantForm {
            image: Some(image.clone()),
            ..valid_form()
        };

        let (_, got_image) = form.validate().unwrap();

        assert_eq!(got_image, Some(image));
    }
}
