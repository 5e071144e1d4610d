//! Core restaurant domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, database_id::RestaurantId};

/// A score from 1 to 5 given to a restaurant visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// The lowest allowed rating.
    pub const MIN: u8 = 1;
    /// The highest allowed rating, also used when the client does not send one.
    pub const MAX: u8 = 5;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidField] if `value` is outside 1 to 5.
    pub fn new(value: i64) -> Result<Self, Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::InvalidField {
                field: "rating",
                reason: format!("{value} is not between {} and {}", Self::MIN, Self::MAX),
            })
        }
    }

    /// The rating as a plain number.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(i64::from(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i64>().map_err(|_| Error::InvalidField {
            field: "rating",
            reason: format!("\"{s}\" is not a whole number"),
        })?;

        Rating::new(value)
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for Rating {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.0)))
    }
}

impl FromSql for Rating {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Rating::new(value.as_i64()?).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A visit to a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// The ID of the restaurant visit.
    pub id: RestaurantId,
    /// The name of the restaurant.
    pub name: String,
    /// Where the restaurant is.
    pub city: Option<String>,
    /// How much the visit was enjoyed.
    pub rating: Rating,
    /// Free-form notes about the visit.
    pub comment: Option<String>,
    /// When the visit happened.
    pub visit_date: Date,
    /// The relative path of the attached photo, e.g. `uploads/1700000000-0.jpg`.
    pub image: Option<String>,
    /// When the record was created. Lists are ordered by this, newest first.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The validated scalar fields of a restaurant visit that has not been stored yet.
///
/// The photo is handled separately since it is only replaced when a new one
/// is uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRestaurant {
    /// A non-empty, trimmed name.
    pub name: String,
    /// Where the restaurant is.
    pub city: Option<String>,
    /// How much the visit was enjoyed.
    pub rating: Rating,
    /// Free-form notes about the visit.
    pub comment: Option<String>,
    /// When the visit happened.
    pub visit_date: Date,
}
