//! Defines the endpoint for listing expenses.

use axum::{Json, extract::State};

use crate::{
    Error,
    expense::{Expense, ExpenseState},
};

/// A route handler that returns every expense, newest first.
pub async fn list_expenses_endpoint(
    State(state): State<ExpenseState>,
) -> Result<Json<Vec<Expense>>, Error> {
    state.store.list().map(Json)
}
