//! Meal editing endpoint.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    Error,
    db::lock_connection,
    item::MutationResponse,
    meal::{MealFormData, MealId, MealState, NewMeal, db::update_meal},
};

/// Handle meal updates. Responds with 404 if the meal does not exist.
pub async fn update_meal_endpoint(
    meal_id: Result<Path<MealId>, PathRejection>,
    State(state): State<MealState>,
    form: Result<Json<MealFormData>, JsonRejection>,
) -> Result<Json<MutationResponse>, Error> {
    let Path(meal_id) = meal_id?;
    let Json(form) = form?;
    let meal = NewMeal::from_form(&form)?;

    let connection = lock_connection(&state.db_connection)?;
    update_meal(meal_id, &meal, &connection)?;

    tracing::info!("updated meal {meal_id}");

    Ok(Json(MutationResponse::done("Meal updated successfully")))
}

#[cfg(test)]
mod update_meal_endpoint_tests {
    use serde_json::{Value, json};

    use crate::{
        endpoints::{self, format_endpoint},
        item::MutationResponse,
        meal::Meal,
        test_utils::{get_test_server, get_test_state, log_in},
    };

    #[tokio::test]
    async fn update_meal_succeeds() {
        let server = get_test_server(get_test_state());
        let token_cookie = log_in(&server).await;
        let meals = server.get(endpoints::MEALS).await.json::<Vec<Meal>>();
        let target = &meals[0];

        let response = server
            .put(&format_endpoint(endpoints::MEAL, target.id))
            .add_cookie(token_cookie)
            .json(&json!({"name": "Zucchini Slice", "ingredients": "Zucchini, eggs"}))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<MutationResponse>().message,
            "Meal updated successfully"
        );
        let meals = server.get(endpoints::MEALS).await.json::<Vec<Meal>>();
        let updated = meals.iter().find(|meal| meal.id == target.id).unwrap();
        assert_eq!(updated.name.as_ref(), "Zucchini Slice");
        assert_eq!(updated.ingredients.as_ref(), "Zucchini, eggs");
    }

    #[tokio::test]
    async fn update_missing_meal_is_not_found() {
        let server = get_test_server(get_test_state());
        let token_cookie = log_in(&server).await;

        let response = server
            .put(&format_endpoint(endpoints::MEAL, 999999))
            .add_cookie(token_cookie)
            .json(&json!({"name": "Ghost", "ingredients": "Nothing"}))
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>(), json!({"error": "Meal not found"}));
    }

    #[tokio::test]
    async fn update_with_missing_ingredients_is_rejected() {
        let server = get_test_server(get_test_state());
        let token_cookie = log_in(&server).await;

        let response = server
            .put(&format_endpoint(endpoints::MEAL, 1))
            .add_cookie(token_cookie)
            .json(&json!({"name": "Ghost"}))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["field"], "ingredients");
    }

    #[tokio::test]
    async fn update_requires_session() {
        let server = get_test_server(get_test_state());

        server
            .put(&format_endpoint(endpoints::MEAL, 1))
            .json(&json!({"name": "Ghost", "ingredients": "Nothing"}))
            .await
            .assert_status_unauthorized();
    }
}
