//! Database operations for meals.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    item::ItemText,
    meal::{Meal, MealId, NewMeal},
};

/// Create a meal and return it with its generated ID.
pub fn create_meal(meal: &NewMeal, connection: &Connection) -> Result<Meal, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO meals (name, ingredients, created_at) VALUES (?1, ?2, ?3);",
        (meal.name.as_ref(), meal.ingredients.as_ref(), created_at),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Meal {
        id,
        name: meal.name.clone(),
        ingredients: meal.ingredients.clone(),
        created_at,
    })
}

/// Retrieve a single meal by ID.
#[cfg(test)]
pub fn get_meal(meal_id: MealId, connection: &Connection) -> Result<Meal, Error> {
    connection
        .prepare("SELECT id, name, ingredients, created_at FROM meals WHERE id = :id;")?
        .query_row(&[(":id", &meal_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all meals ordered alphabetically by name.
pub fn get_all_meals(connection: &Connection) -> Result<Vec<Meal>, Error> {
    connection
        .prepare("SELECT id, name, ingredients, created_at FROM meals ORDER BY name ASC, id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_meal| maybe_meal.map_err(|error| error.into()))
        .collect()
}

/// Update a meal's name and ingredients. Returns an error if the meal doesn't exist.
pub fn update_meal(meal_id: MealId, meal: &NewMeal, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE meals SET name = ?1, ingredients = ?2 WHERE id = ?3",
        (meal.name.as_ref(), meal.ingredients.as_ref(), meal_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingMeal);
    }

    Ok(())
}

/// Delete a meal by ID. Returns an error if the meal doesn't exist.
pub fn delete_meal(meal_id: MealId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM meals WHERE id = ?1", [meal_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingMeal);
    }

    Ok(())
}

/// Initialize the meal table and indexes.
pub fn create_meal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            ingredients TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_meals_name ON meals(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Meal, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_ingredients: String = row.get(2)?;
    let created_at = row.get(3)?;

    Ok(Meal {
        id,
        name: ItemText::new_unchecked(&raw_name),
        ingredients: ItemText::new_unchecked(&raw_ingredients),
        created_at,
    })
}
