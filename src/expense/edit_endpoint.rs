//! Defines the endpoint for replacing an existing expense.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{Expense, ExpenseForm, ExpenseState},
};

/// A route handler that replaces every field of an expense.
///
/// All fields, including the date, are required since this is a full replace.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseState>,
    path: Result<Path<ExpenseId>, PathRejection>,
    payload: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<Json<Expense>, Error> {
    let Path(expense_id) = path?;
    let Json(form) = payload?;
    let new_expense = form.validate(None)?;

    state
        .store
        .update(expense_id, new_expense)
        .inspect_err(|error| {
            tracing::debug!("Could not update expense {expense_id}: {error}");
        })
        .map(Json)
}
