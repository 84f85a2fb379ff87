use axum::Json;
use serde::Serialize;
use tracing::instrument;

use crate::goals::{estimate_daily_calories, BodyProfile};

#[derive(Debug, Serialize)]
pub struct CalorieGoalResponse {
    pub daily_calories: u32,
}

/// POST /calorie-goal
#[instrument]
pub async fn calorie_goal_route(Json(profile): Json<BodyProfile>) -> Json<CalorieGoalResponse> {
    Json(CalorieGoalResponse {
        daily_calories: estimate_daily_calories(Some(&profile)),
    })
}
