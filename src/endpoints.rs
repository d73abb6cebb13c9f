//! The API endpoints URIs.
//!
//! Endpoints that take a parameter, e.g., '/api/meals/{meal_id}', need the ID substituted in.

/// The route to list and create meals.
pub const MEALS: &str = "/api/meals";
/// The route to update or delete a single meal.
pub const MEAL: &str = "/api/meals/{meal_id}";
/// The route for the sector layout of the meal wheel.
pub const MEAL_WHEEL: &str = "/api/meals/wheel";
/// The route to pick random meals.
pub const SPIN_MEALS: &str = "/api/spin";
/// The route to list and create restaurants.
pub const RESTAURANTS: &str = "/api/restaurants";
/// The route to update or delete a single restaurant.
pub const RESTAURANT: &str = "/api/restaurants/{restaurant_id}";
/// The route for the sector layout of the restaurant wheel.
pub const RESTAURANT_WHEEL: &str = "/api/restaurants/wheel";
/// The route to pick a random restaurant.
pub const SPIN_RESTAURANT: &str = "/api/restaurants/spin";
/// The route for logging in.
pub const LOG_IN: &str = "/api/login";
/// The route for logging out.
pub const LOG_OUT: &str = "/api/logout";
/// The route for checking whether the client is logged in.
pub const AUTH_STATUS: &str = "/api/auth/status";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/meals/{meal_id}', '{meal_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::MEALS);
        assert_endpoint_is_valid_uri(endpoints::MEAL);
        assert_endpoint_is_valid_uri(endpoints::MEAL_WHEEL);
        assert_endpoint_is_valid_uri(endpoints::SPIN_MEALS);
        assert_endpoint_is_valid_uri(endpoints::RESTAURANTS);
        assert_endpoint_is_valid_uri(endpoints::RESTAURANT);
        assert_endpoint_is_valid_uri(endpoints::RESTAURANT_WHEEL);
        assert_endpoint_is_valid_uri(endpoints::SPIN_RESTAURANT);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN);
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT);
        assert_endpoint_is_valid_uri(endpoints::AUTH_STATUS);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::MEAL, 1);

        assert_eq!(formatted_path, "/api/meals/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
