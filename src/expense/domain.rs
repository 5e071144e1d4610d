//! Core expense domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::ExpenseId};

/// Who paid for an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Person {
    /// Paid by Fran.
    Fran,
    /// Paid by Eli.
    Eli,
    /// Paid from the shared pot.
    Compartido,
}

impl Person {
    /// Every person, in display order.
    pub const ALL: [Person; 3] = [Person::Fran, Person::Eli, Person::Compartido];

    /// The name as stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Person::Fran => "Fran",
            Person::Eli => "Eli",
            Person::Compartido => "Compartido",
        }
    }
}

impl FromStr for Person {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Person::ALL
            .into_iter()
            .find(|person| person.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidField {
                field: "person",
                reason: format!("\"{s}\" is not one of Fran, Eli or Compartido"),
            })
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an expense was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Leisure.
    Ocio,
    /// Food and groceries.
    Comida,
    /// Spending filed under Boticelli.
    Boticelli,
    /// Treats and impulse buys.
    Capricho,
    /// Transport.
    Transporte,
    /// Necessities.
    Necesidad,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Category::Ocio,
        Category::Comida,
        Category::Boticelli,
        Category::Capricho,
        Category::Transporte,
        Category::Necesidad,
    ];

    /// The name as stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ocio => "Ocio",
            Category::Comida => "Comida",
            Category::Boticelli => "Boticelli",
            Category::Capricho => "Capricho",
            Category::Transporte => "Transporte",
            Category::Necesidad => "Necesidad",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidField {
                field: "category",
                reason: format!("\"{s}\" is not a known category"),
            })
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Person {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Person {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// Money spent by someone in the household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// A short description of what was bought.
    pub title: String,
    /// How much was spent. Always positive.
    pub amount: f64,
    /// Who paid.
    pub person: Person,
    /// What the money was spent on.
    pub category: Category,
    /// When the money was spent.
    pub date: Date,
}

/// A validated expense that has not been stored yet.
///
/// Create one from client input with [ExpenseForm::validate](crate::expense::ExpenseForm::validate).
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// A non-empty, trimmed description.
    pub title: String,
    /// A positive, finite amount.
    pub amount: f64,
    /// Who paid.
    pub person: Person,
    /// What the money was spent on.
    pub category: Category,
    /// When the money was spent.
    pub date: Date,
}
