//! Expense statistics for the charts page.
//!
//! The aggregation functions are pure and work on expenses that have already
//! been loaded, so the endpoint fetches once and derives every view from the
//! same snapshot.

mod aggregation;
mod endpoint;

pub use aggregation::{
    CategoryTotal, EvolutionPeriod, EvolutionPoint, PersonTotal, by_category, by_person, evolution,
};
pub use endpoint::{StatsQuery, StatsView, get_expense_stats_endpoint};

use serde::{Deserialize, Serialize};

use crate::expense::Expense;

/// Every chart's data for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseStats {
    /// Totals per category over all of `expenses`.
    pub by_category: Vec<CategoryTotal>,
    /// Totals per person over all of `expenses`.
    pub by_person: Vec<PersonTotal>,
    /// Totals per bucket within the requested period.
    pub evolution: Vec<EvolutionPoint>,
}

/// Compute the category, person and evolution views of `expenses`.
pub fn stats(expenses: &[Expense], period: EvolutionPeriod) -> ExpenseStats {
    ExpenseStats {
        by_category: by_category(expenses),
        by_person: by_person(expenses),
        evolution: evolution(expenses, period),
    }
}
