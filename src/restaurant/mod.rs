//! Restaurants: categories, storage, admin endpoints and the restaurant spin.

mod category;
mod create_endpoint;
mod db;
mod delete_endpoint;
mod domain;
mod edit_endpoint;
mod list_endpoint;
mod spin_endpoint;

pub use category::{Category, CategoryFilter};
pub use create_endpoint::{RestaurantState, create_restaurant_endpoint};
pub use db::{create_restaurant_table, get_restaurants};
pub use delete_endpoint::delete_restaurant_endpoint;
pub use domain::{NewRestaurant, Restaurant, RestaurantFormData, RestaurantId};
pub use edit_endpoint::update_restaurant_endpoint;
pub use list_endpoint::{get_restaurant_wheel_endpoint, get_restaurants_endpoint};
pub use spin_endpoint::spin_restaurant_endpoint;
