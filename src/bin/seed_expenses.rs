use std::{
    error::Error,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use clap::Parser;
use rusqlite::Connection;
use time::Duration;

use casa_rs::{
    Category, ExpenseStore, NewExpense, Person, SQLiteExpenseStore, initialize_db, local_today,
};

/// A utility for filling a casa_rs database with sample expenses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. It is created if it does not exist.
    #[arg(long, short)]
    db_path: PathBuf,

    /// How many expenses to insert.
    #[arg(long, short, default_value_t = 120)]
    count: u32,

    /// The canonical timezone used to decide what "today" is.
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,
}

/// The number of days back from today that sample expenses are spread over.
const SPREAD_DAYS: u64 = 182;

/// Insert sample expenses for manual testing.
///
/// The same arguments on the same day always produce the same expenses.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("Opening database at {:#?}", args.db_path);
    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;
    let store = SQLiteExpenseStore::new(Arc::new(Mutex::new(conn)));

    let today = local_today(&args.timezone)?;

    for i in 0..args.count {
        store.create(sample_expense(i, today))?;
    }

    println!("Inserted {} expenses", args.count);

    Ok(())
}

/// Build the `i`th sample expense, dated within [SPREAD_DAYS] before `today`.
fn sample_expense(i: u32, today: time::Date) -> NewExpense {
    // Coprime strides so person, category and date do not repeat in lockstep.
    let i = u64::from(i);
    let person = Person::ALL[((i * 7) % Person::ALL.len() as u64) as usize];
    let category = Category::ALL[((i * 5 + 1) % Category::ALL.len() as u64) as usize];
    let days_ago = (i * 37) % SPREAD_DAYS;
    let cents = 500 + (i * 1_237) % 8_000;

    NewExpense {
        title: format!("Gasto {}", i + 1),
        amount: cents as f64 / 100.0,
        person,
        category,
        date: today - Duration::days(days_ago as i64),
    }
}
