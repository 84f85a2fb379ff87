use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, instrument, warn};
use uuid::Uuid;

use super::dto::CreateLogRequest;
use super::services::{log_food, LogFoodError, LoggedFood};
use crate::state::AppState;

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id/logs", post(create_log))
}

/// POST /users/:user_id/logs
#[instrument(skip(state, body))]
pub async fn create_log(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<CreateLogRequest>,
) -> Result<(StatusCode, Json<LoggedFood>), (StatusCode, String)> {
    if body.food_name.trim().is_empty() || body.meal_type.trim().is_empty() {
        warn!(%user_id, "missing food name or meal type");
        return Err((
            StatusCode::BAD_REQUEST,
            "food_name and meal_type are required".into(),
        ));
    }

    let logged = log_food(
        &state.resolver,
        state.logs.as_ref(),
        user_id,
        &body.food_name,
        body.quantity_g,
        &body.date,
        &body.meal_type,
    )
    .await
    .map_err(|e| match e {
        LogFoodError::InvalidQuantity(_) | LogFoodError::InvalidDate(_) => {
            warn!(%user_id, error = %e, "rejected food log");
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        LogFoodError::Storage(ref inner) => {
            error!(%user_id, error = %inner, "food log insert failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to store food log".into())
        }
    })?;

    Ok((StatusCode::CREATED, Json(logged)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(food: &str, qty: f64, date: &str, meal: &str) -> Json<CreateLogRequest> {
        Json(CreateLogRequest {
            food_name: food.into(),
            quantity_g: qty,
            date: date.into(),
            meal_type: meal.into(),
        })
    }

    #[tokio::test]
    async fn creates_log_entry() {
        let state = AppState::fake();
        let (status, Json(logged)) = create_log(
            State(state),
            Path(Uuid::new_v4()),
            request("banana", 100.0, "2024-06-01", "Snack"),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(!logged.estimated);
        assert_eq!(logged.profile.calories, 89.0);
        assert_eq!(logged.id, 1);
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        for req in [
            request("banana", -5.0, "2024-06-01", "Snack"),
            request("banana", 100.0, "June 1st", "Snack"),
            request("  ", 100.0, "2024-06-01", "Snack"),
            request("banana", 100.0, "2024-06-01", ""),
        ] {
            let (status, _) = create_log(State(state.clone()), Path(user), req)
                .await
                .unwrap_err();
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }
}
