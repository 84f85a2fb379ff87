pub mod goals;
pub mod nutrition;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nutrition/resolve", get(nutrition::resolve_route))
        .route("/calorie-goal", post(goals::calorie_goal_route))
}
