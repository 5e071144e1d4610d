//! Shared household expenses.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and the closed `Person`/`Category` sets
//! - Validation of client input into a `NewExpense`
//! - The `ExpenseStore` trait and its SQLite implementation
//! - The JSON route handlers

mod create_endpoint;
mod db;
mod delete_endpoint;
mod domain;
mod edit_endpoint;
mod form;
mod list_endpoint;
mod state;

pub use create_endpoint::create_expense_endpoint;
pub use db::{ExpenseStore, SQLiteExpenseStore, create_expense_table};
pub use delete_endpoint::delete_expense_endpoint;
pub use domain::{Category, Expense, NewExpense, Person};
pub use edit_endpoint::update_expense_endpoint;
pub use form::ExpenseForm;
pub use list_endpoint::list_expenses_endpoint;
pub use state::ExpenseState;

#[cfg(test)]
pub(crate) use state::test_state;
