//! Home-cooked meals: storage, admin endpoints and the meal spin.

mod create_endpoint;
mod db;
mod delete_endpoint;
mod domain;
mod edit_endpoint;
mod list_endpoint;
mod spin_endpoint;

pub use create_endpoint::{MealState, create_meal_endpoint};
pub use db::{create_meal, create_meal_table, get_all_meals};
pub use delete_endpoint::delete_meal_endpoint;
pub use domain::{Meal, MealFormData, MealId, NewMeal};
pub use edit_endpoint::update_meal_endpoint;
pub use list_endpoint::{get_meal_wheel_endpoint, get_meals_endpoint};
pub use spin_endpoint::spin_meals_endpoint;
