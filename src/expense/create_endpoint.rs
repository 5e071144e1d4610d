//! Defines the endpoint for creating a new expense.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

use crate::{
    Error,
    expense::{Expense, ExpenseForm, ExpenseState},
    timezone::local_today,
};

/// A route handler for creating a new expense.
///
/// Responds with `201 Created` and the stored expense. If the client did not
/// send a date, the expense is dated today in the configured timezone.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    payload: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), Error> {
    let Json(form) = payload?;
    let today = local_today(&state.local_timezone)?;
    let new_expense = form.validate(Some(today))?;

    let expense = state.store.create(new_expense)?;
    tracing::debug!("Created expense {}", expense.id);

    Ok((StatusCode::CREATED, Json(expense)))
}
