//! Creates the application's tables and seeds a fresh database.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    auth::{PasswordHash, count_users, create_session_table, create_user, create_user_table},
    item::ItemText,
    meal::{NewMeal, create_meal, create_meal_table},
    restaurant::create_restaurant_table,
};

/// The username of the admin account created on first boot.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// The password of the admin account created on first boot.
///
/// Change it with the `reset_password` binary after deploying.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Meals added to a fresh database so the wheel has something to spin.
pub(crate) const SAMPLE_MEALS: [(&str, &str); 5] = [
    (
        "Spaghetti Bolognese",
        "Ground beef, pasta, tomato sauce, onions, garlic, herbs",
    ),
    (
        "Chicken Stir Fry",
        "Chicken breast, mixed vegetables, soy sauce, ginger, garlic",
    ),
    (
        "Grilled Salmon",
        "Salmon fillets, lemon, herbs, olive oil, vegetables",
    ),
    (
        "Taco Tuesday",
        "Ground turkey, taco shells, lettuce, tomatoes, cheese, salsa",
    ),
    (
        "Vegetable Curry",
        "Mixed vegetables, coconut milk, curry spices, rice",
    ),
];

type Migration = fn(&Connection) -> Result<(), rusqlite::Error>;

/// Table definitions, applied in order.
const MIGRATIONS: [Migration; 4] = [
    create_user_table,
    create_session_table,
    create_meal_table,
    create_restaurant_table,
];

/// Create the application tables and, on first boot, seed the admin user and sample meals.
///
/// First boot is detected by the user table being empty. Everything runs inside one exclusive
/// transaction, so a failed initialization leaves the database untouched.
///
/// # Errors
/// Returns an error if a table cannot be created, the admin password cannot be hashed, or the
/// seed rows cannot be inserted.
pub fn initialize(connection: &Connection, password_cost: u32) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    for migration in MIGRATIONS {
        migration(&transaction)?;
    }

    if count_users(&transaction)? == 0 {
        seed(&transaction, password_cost)?;
    }

    transaction.commit()?;

    Ok(())
}

fn seed(connection: &Connection, password_cost: u32) -> Result<(), Error> {
    tracing::info!("Seeding a fresh database with the admin user and sample meals");

    let password_hash = PasswordHash::new(DEFAULT_ADMIN_PASSWORD, password_cost)?;
    create_user(DEFAULT_ADMIN_USERNAME, password_hash, connection)?;

    for (name, ingredients) in SAMPLE_MEALS {
        let meal = NewMeal {
            name: ItemText::new_unchecked(name),
            ingredients: ItemText::new_unchecked(ingredients),
        };
        create_meal(&meal, connection)?;
    }

    Ok(())
}

/// Lock the shared database connection.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned.
pub(crate) fn lock_connection(
    db_connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}
