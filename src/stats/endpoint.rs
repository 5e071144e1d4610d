//! Defines the endpoint for the expense statistics.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use time::Month;

use crate::{
    Error,
    expense::ExpenseState,
    stats::{EvolutionPeriod, ExpenseStats, stats},
    timezone::local_today,
};

/// The granularity of the evolution chart.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsView {
    /// Day by day within one month.
    #[default]
    Month,
    /// Month by month within one year.
    Year,
}

/// The query string accepted by [get_expense_stats_endpoint].
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct StatsQuery {
    /// Defaults to [StatsView::Month].
    #[serde(default)]
    pub view: StatsView,
    /// Defaults to the current year.
    pub year: Option<i32>,
    /// Zero-based, so 0 is January. Defaults to the current month.
    pub month: Option<u8>,
}

impl StatsQuery {
    /// Resolve the query into a period, filling gaps from `today`.
    ///
    /// # Errors
    /// Returns an [Error::InvalidField] if `month` is not between 0 and 11.
    fn period(&self, today: time::Date) -> Result<EvolutionPeriod, Error> {
        let year = self.year.unwrap_or(today.year());

        match self.view {
            StatsView::Year => Ok(EvolutionPeriod::Year(year)),
            StatsView::Month => {
                let month = match self.month {
                    Some(month) => month
                        .checked_add(1)
                        .and_then(|month| Month::try_from(month).ok())
                        .ok_or_else(|| Error::InvalidField {
                            field: "month",
                            reason: format!("{month} is not between 0 and 11"),
                        })?,
                    None => today.month(),
                };

                Ok(EvolutionPeriod::Month(year, month))
            }
        }
    }
}

/// A route handler that returns the chart data for every stored expense.
pub async fn get_expense_stats_endpoint(
    State(state): State<ExpenseState>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<ExpenseStats>, Error> {
    let Query(query) = query?;
    let today = local_today(&state.local_timezone)?;
    let period = query.period(today)?;

    let expenses = state.store.list()?;
    tracing::debug!("Aggregating {} expenses for {:?}", expenses.len(), period);

    Ok(Json(stats(&expenses, period)))
}
