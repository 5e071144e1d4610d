//! Storage for expenses.

use std::{
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{Expense, NewExpense},
};

/// Handles the creation, retrieval and removal of expenses.
///
/// Implementations must not cache records: every call reads from or writes
/// to the backing store.
pub trait ExpenseStore: Debug + Send + Sync {
    /// Retrieve every expense, newest date first with ties broken by the
    /// newest ID.
    fn list(&self) -> Result<Vec<Expense>, Error>;

    /// Store `expense` and return it with its generated ID.
    fn create(&self, expense: NewExpense) -> Result<Expense, Error>;

    /// Replace every field of the expense `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no expense with that ID.
    fn update(&self, id: ExpenseId, expense: NewExpense) -> Result<Expense, Error>;

    /// Remove the expense `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no expense with that ID.
    fn delete(&self, id: ExpenseId) -> Result<(), Error>;
}

/// Stores expenses in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The expense table must already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    fn list(&self) -> Result<Vec<Expense>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, title, amount, person, category, date FROM expenses
                 ORDER BY date DESC, id DESC",
            )?
            .query_map([], map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::from))
            .collect()
    }

    fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        self.lock()?
            .prepare(
                "INSERT INTO expenses (title, amount, person, category, date)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, title, amount, person, category, date",
            )?
            .query_row(
                (
                    expense.title,
                    expense.amount,
                    expense.person,
                    expense.category,
                    expense.date,
                ),
                map_expense_row,
            )
            .map_err(Error::from)
    }

    fn update(&self, id: ExpenseId, expense: NewExpense) -> Result<Expense, Error> {
        self.lock()?
            .prepare(
                "UPDATE expenses
                 SET title = ?1, amount = ?2, person = ?3, category = ?4, date = ?5
                 WHERE id = ?6
                 RETURNING id, title, amount, person, category, date",
            )?
            .query_row(
                (
                    expense.title,
                    expense.amount,
                    expense.person,
                    expense.category,
                    expense.date,
                    id,
                ),
                map_expense_row,
            )
            .map_err(Error::from)
    }

    fn delete(&self, id: ExpenseId) -> Result<(), Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM expenses WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

/// Create the expense table in the database.
///
/// The `CHECK` constraints repeat the rules enforced by
/// [ExpenseForm::validate](crate::expense::ExpenseForm::validate) so that rows
/// written by other tools stay valid too.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL CHECK (length(trim(title)) > 0),
            amount REAL NOT NULL CHECK (amount > 0),
            person TEXT NOT NULL CHECK (person IN ('Fran', 'Eli', 'Compartido')),
            category TEXT NOT NULL CHECK (category IN (
                'Ocio',
                'Comida',
                'Boticelli',
                'Capricho',
                'Transporte',
                'Necesidad'
            )),
            date TEXT NOT NULL DEFAULT (DATE('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);",
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        person: row.get(3)?,
        category: row.get(4)?,
        date: row.get(5)?,
    })
}
