//! Expense aggregation for the statistics charts.
//!
//! Provides functions to total expenses by category and by person, and to
//! bucket them by month or by day for the evolution chart. All functions are
//! pure and leave their input untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Month;

use crate::expense::{Category, Expense, Person};

/// The summed amount spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category.
    pub category: Category,
    /// The total, rounded to cents.
    pub total: f64,
}

/// The summed amount spent by one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonTotal {
    /// Who paid.
    pub person: Person,
    /// The total, rounded to cents.
    pub total: f64,
}

/// One bucket of the evolution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    /// The month abbreviation or day number the bucket covers.
    pub label: String,
    /// The total, rounded to cents.
    pub total: f64,
}

/// The period an evolution series covers, which also decides the bucket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionPeriod {
    /// One bucket per month of the year.
    Year(i32),
    /// One bucket per day of the month.
    Month(i32, Month),
}

/// Spanish month abbreviations, as shown on the chart axis.
const MONTH_LABELS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Round `value` to two decimal places.
pub(super) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sums expense amounts by category.
///
/// # Returns
/// One entry per category that has expenses, in [Category::ALL] order.
pub fn by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<Category, f64> = BTreeMap::new();

    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total: round_to_cents(total),
        })
        .collect()
}

/// Sums expense amounts by the person who paid.
///
/// # Returns
/// One entry per person that has expenses, in [Person::ALL] order.
pub fn by_person(expenses: &[Expense]) -> Vec<PersonTotal> {
    let mut totals: BTreeMap<Person, f64> = BTreeMap::new();

    for expense in expenses {
        *totals.entry(expense.person).or_insert(0.0) += expense.amount;
    }

    totals
        .into_iter()
        .map(|(person, total)| PersonTotal {
            person,
            total: round_to_cents(total),
        })
        .collect()
}

/// Sums expense amounts into time buckets within `period`.
///
/// Expenses outside `period` are ignored. Buckets without expenses are left
/// out, and the rest are in chronological order.
///
/// # Returns
/// For [EvolutionPeriod::Year], month buckets labelled with the Spanish month
/// abbreviation. For [EvolutionPeriod::Month], day buckets labelled with the
/// day number.
pub fn evolution(expenses: &[Expense], period: EvolutionPeriod) -> Vec<EvolutionPoint> {
    // Keyed by the numeric period index so buckets sort chronologically.
    let mut totals: BTreeMap<u8, f64> = BTreeMap::new();

    for expense in expenses {
        let date = expense.date;

        let bucket = match period {
            EvolutionPeriod::Year(year) if date.year() == year => u8::from(date.month()),
            EvolutionPeriod::Month(year, month) if date.year() == year && date.month() == month => {
                date.day()
            }
            _ => continue,
        };

        *totals.entry(bucket).or_insert(0.0) += expense.amount;
    }

    totals
        .into_iter()
        .map(|(bucket, total)| EvolutionPoint {
            label: match period {
                EvolutionPeriod::Year(_) => MONTH_LABELS[usize::from(bucket) - 1].to_owned(),
                EvolutionPeriod::Month(..) => bucket.to_string(),
            },
            total: round_to_cents(total),
        })
        .collect()
}
