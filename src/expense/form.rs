//! Validation of expense data sent by the client.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    expense::{Category, NewExpense, Person},
    form::{non_blank, parse_date},
};

/// The JSON body for creating or replacing an expense.
///
/// Every field is optional at this stage so that missing fields can be
/// reported together, instead of failing on the first one serde trips over.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExpenseForm {
    /// A short description of what was bought.
    pub title: Option<String>,
    /// How much was spent.
    pub amount: Option<f64>,
    /// Who paid, e.g. "Fran".
    pub person: Option<String>,
    /// What the money was spent on, e.g. "Comida".
    pub category: Option<String>,
    /// When the money was spent, as `YYYY-MM-DD`.
    pub date: Option<String>,
}

impl ExpenseForm {
    /// Check the form and convert it into a [NewExpense].
    ///
    /// `default_date` is used when the client did not send a date. Pass `None`
    /// to make the date required, e.g. when replacing an existing expense.
    ///
    /// # Errors
    /// Returns an:
    /// - [Error::MissingFields] listing every required field that is absent or blank,
    /// - or [Error::InvalidField] if a value is present but not acceptable.
    pub fn validate(self, default_date: Option<Date>) -> Result<NewExpense, Error> {
        let title = non_blank(self.title);
        let person = non_blank(self.person);
        let category = non_blank(self.category);
        let date = non_blank(self.date);

        let mut missing = Vec::new();
        if title.is_none() {
            missing.push("title");
        }
        if self.amount.is_none() {
            missing.push("amount");
        }
        if person.is_none() {
            missing.push("person");
        }
        if category.is_none() {
            missing.push("category");
        }
        if date.is_none() && default_date.is_none() {
            missing.push("date");
        }

        let (Some(title), Some(amount), Some(person), Some(category)) =
            (title, self.amount, person, category)
        else {
            return Err(Error::MissingFields(missing));
        };

        let date = match (date, default_date) {
            (Some(date), _) => parse_date("date", &date)?,
            (None, Some(default_date)) => default_date,
            (None, None) => return Err(Error::MissingFields(missing)),
        };

        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidField {
                field: "amount",
                reason: format!("{amount} is not a positive amount"),
            });
        }

        Ok(NewExpense {
            title,
            amount,
            person: person.parse::<Person>()?,
            category: category.parse::<Category>()?,
            date,
        })
    }
}
