//! Database operations for restaurants.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    item::ItemText,
    restaurant::{CategoryFilter, NewRestaurant, Restaurant, RestaurantId},
};

/// Create a restaurant and return it with its generated ID.
pub fn create_restaurant(
    restaurant: &NewRestaurant,
    connection: &Connection,
) -> Result<Restaurant, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO restaurants (name, category, details, created_at) VALUES (?1, ?2, ?3, ?4);",
        (
            restaurant.name.as_ref(),
            restaurant.category,
            restaurant.details.as_ref(),
            created_at,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Restaurant {
        id,
        name: restaurant.name.clone(),
        category: restaurant.category,
        details: restaurant.details.clone(),
        created_at,
    })
}

/// Retrieve a single restaurant by ID.
#[cfg(test)]
pub fn get_restaurant(
    restaurant_id: RestaurantId,
    connection: &Connection,
) -> Result<Restaurant, Error> {
    connection
        .prepare(
            "SELECT id, name, category, details, created_at FROM restaurants WHERE id = :id;",
        )?
        .query_row(&[(":id", &restaurant_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve the restaurants that pass `filter`, ordered alphabetically by name.
pub fn get_restaurants(
    filter: CategoryFilter,
    connection: &Connection,
) -> Result<Vec<Restaurant>, Error> {
    connection
        .prepare(
            "SELECT id, name, category, details, created_at FROM restaurants
            WHERE (?1 IS NULL OR category = ?1)
            ORDER BY name ASC, id ASC;",
        )?
        .query_map([filter.category()], map_row)?
        .map(|maybe_restaurant| maybe_restaurant.map_err(|error| error.into()))
        .collect()
}

/// Update a restaurant. Returns an error if the restaurant doesn't exist.
pub fn update_restaurant(
    restaurant_id: RestaurantId,
    restaurant: &NewRestaurant,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE restaurants SET name = ?1, category = ?2, details = ?3 WHERE id = ?4",
        (
            restaurant.name.as_ref(),
            restaurant.category,
            restaurant.details.as_ref(),
            restaurant_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingRestaurant);
    }

    Ok(())
}

/// Delete a restaurant by ID. Returns an error if the restaurant doesn't exist.
pub fn delete_restaurant(restaurant_id: RestaurantId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM restaurants WHERE id = ?1", [restaurant_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingRestaurant);
    }

    Ok(())
}

/// Initialize the restaurant table and indexes.
pub fn create_restaurant_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS restaurants (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT NOT NULL CHECK (category IN ('formal', 'sit-down', 'quick-service')),
            details TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_restaurants_category ON restaurants(category);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Restaurant, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let category = row.get(2)?;
    let raw_details: String = row.get(3)?;
    let created_at = row.get(4)?;

    Ok(Restaurant {
        id,
        name: ItemText::new_unchecked(&raw_name),
        category,
        details: ItemText::new_unchecked(&raw_details),
        created_at,
    })
}

#[cfg(test)]
mod restaurant_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        item::ItemText,
        restaurant::{Category, CategoryFilter, NewRestaurant, Restaurant},
    };

    use super::{
        create_restaurant, create_restaurant_table, delete_restaurant, get_restaurant,
        get_restaurants, update_restaurant,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_restaurant_table(&connection).expect("Could not create restaurant table");
        connection
    }

    fn new_restaurant(name: &str, category: Category) -> NewRestaurant {
        NewRestaurant {
            name: ItemText::new_unchecked(name),
            category,
            details: ItemText::new_unchecked("Details"),
        }
    }

    fn names(restaurants: &[Restaurant]) -> Vec<&str> {
        restaurants
            .iter()
            .map(|restaurant| restaurant.name.as_ref())
            .collect()
    }

    fn insert_one_of_each(connection: &Connection) {
        for (name, category) in [
            ("Le Bistro", Category::Formal),
            ("Burger Shack", Category::QuickService),
            ("Family Diner", Category::SitDown),
            ("Chophouse", Category::Formal),
        ] {
            create_restaurant(&new_restaurant(name, category), connection).unwrap();
        }
    }

    #[test]
    fn create_and_get_restaurant() {
        let connection = get_test_db_connection();

        let inserted =
            create_restaurant(&new_restaurant("Le Bistro", Category::Formal), &connection).unwrap();
        let selected = get_restaurant(inserted.id, &connection).unwrap();

        assert_eq!(selected.id, inserted.id);
        assert_eq!(selected.name.as_ref(), "Le Bistro");
        assert_eq!(selected.category, Category::Formal);
    }

    #[test]
    fn filter_returns_only_matching_category() {
        let connection = get_test_db_connection();
        insert_one_of_each(&connection);

        let formal =
            get_restaurants(CategoryFilter::Only(Category::Formal), &connection).unwrap();

        assert_eq!(names(&formal), ["Chophouse", "Le Bistro"]);
        assert!(formal.iter().all(|r| r.category == Category::Formal));
    }

    #[test]
    fn all_filter_returns_everything_by_name() {
        let connection = get_test_db_connection();
        insert_one_of_each(&connection);

        let all = get_restaurants(CategoryFilter::All, &connection).unwrap();

        assert_eq!(
            names(&all),
            ["Burger Shack", "Chophouse", "Family Diner", "Le Bistro"]
        );
    }

    #[test]
    fn filter_with_no_matches_is_empty() {
        let connection = get_test_db_connection();
        create_restaurant(&new_restaurant("Burger Shack", Category::QuickService), &connection)
            .unwrap();

        let formal =
            get_restaurants(CategoryFilter::Only(Category::Formal), &connection).unwrap();

        assert!(formal.is_empty());
    }

    #[test]
    fn table_rejects_unknown_category() {
        let connection = get_test_db_connection();

        let result = connection.execute(
            "INSERT INTO restaurants (name, category, details, created_at)
            VALUES ('Nowhere', 'cheap', 'x', '2025-01-01T00:00:00Z')",
            [],
        );

        assert!(result.is_err());
    }

    #[test]
    fn update_restaurant_succeeds() {
        let connection = get_test_db_connection();
        let restaurant =
            create_restaurant(&new_restaurant("Old Name", Category::SitDown), &connection).unwrap();

        update_restaurant(
            restaurant.id,
            &new_restaurant("New Name", Category::Formal),
            &connection,
        )
        .unwrap();

        let updated = get_restaurant(restaurant.id, &connection).unwrap();
        assert_eq!(updated.name.as_ref(), "New Name");
        assert_eq!(updated.category, Category::Formal);
    }

    #[test]
    fn update_missing_restaurant_fails() {
        let connection = get_test_db_connection();

        let result = update_restaurant(42, &new_restaurant("X", Category::Formal), &connection);

        assert_eq!(result, Err(Error::UpdateMissingRestaurant));
    }

    #[test]
    fn delete_restaurant_twice_reports_missing_restaurant() {
        let connection = get_test_db_connection();
        let restaurant =
            create_restaurant(&new_restaurant("Gone", Category::SitDown), &connection).unwrap();

        assert_eq!(delete_restaurant(restaurant.id, &connection), Ok(()));
        assert_eq!(
            delete_restaurant(restaurant.id, &connection),
            Err(Error::DeleteMissingRestaurant)
        );
    }
}
