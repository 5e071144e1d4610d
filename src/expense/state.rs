//! The state shared by the expense route handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{AppState, expense::ExpenseStore};

/// The state needed to read and write expenses.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// Where expenses are kept.
    pub store: Arc<dyn ExpenseStore>,
    /// The canonical timezone used to decide what "today" is.
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.expense_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// An [ExpenseState] backed by a fresh in-memory database.
#[cfg(test)]
pub(crate) fn test_state() -> ExpenseState {
    use std::sync::Mutex;

    use rusqlite::Connection;

    use crate::{db::initialize, expense::SQLiteExpenseStore};

    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize(&connection).expect("could not initialize test DB");

    ExpenseState {
        store: Arc::new(SQLiteExpenseStore::new(Arc::new(Mutex::new(connection)))),
        local_timezone: "Etc/UTC".to_owned(),
    }
}
