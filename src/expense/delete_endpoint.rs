//! Defines the endpoint for deleting an expense.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::ExpenseState,
    response::SuccessBody,
};

/// A route handler for deleting an expense.
///
/// Deleting an expense that does not exist is reported as not found rather
/// than silently succeeding.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    path: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Json<SuccessBody>, Error> {
    let Path(expense_id) = path?;
    state.store.delete(expense_id)?;
    tracing::debug!("Deleted expense {expense_id}");

    Ok(SuccessBody::ok())
}
