use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::dto::{CreateFoodRequest, SearchQuery};
use super::repo_types::Food;
use crate::nutrition::normalize_food_name;
use crate::state::AppState;

const MAX_SEARCH_LIMIT: i64 = 50;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/foods/search", get(search_foods))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/foods", post(create_food))
}

/// GET /foods/search?q=yog&limit=8
#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    Query(p): Query<SearchQuery>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let limit = p.limit.clamp(1, MAX_SEARCH_LIMIT);
    let names = state.foods.search(&p.q, limit).await.map_err(|e| {
        error!(error = %e, "food search failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "food search failed".to_string())
    })?;
    Ok(Json(names))
}

/// POST /foods
#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    Json(body): Json<CreateFoodRequest>,
) -> Result<(StatusCode, Json<Food>), (StatusCode, String)> {
    let name = normalize_food_name(&body.name);
    if name.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name is required".into()));
    }
    let values = [body.calories, body.carbs, body.protein, body.fat, body.fiber];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        warn!(food = %name, "rejected negative or non-finite nutrient values");
        return Err((
            StatusCode::BAD_REQUEST,
            "nutrient values must be non-negative numbers".into(),
        ));
    }

    let food = Food {
        name,
        calories: body.calories,
        carbs: body.carbs,
        protein: body.protein,
        fat: body.fat,
        fiber: body.fiber,
    };
    state.foods.upsert(&food).await.map_err(|e| {
        error!(error = %e, food = %food.name, "food upsert failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "failed to store food".to_string())
    })?;

    info!(food = %food.name, "reference food stored");
    Ok((StatusCode::CREATED, Json(food)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tempeh() -> CreateFoodRequest {
        CreateFoodRequest {
            name: " Tempeh ".into(),
            calories: 192.0,
            carbs: 7.6,
            protein: 20.0,
            fat: 11.0,
            fiber: 0.0,
        }
    }

    #[tokio::test]
    async fn created_food_feeds_search_and_resolution() {
        let state = AppState::fake();
        let (status, Json(food)) = create_food(State(state.clone()), Json(tempeh()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(food.name, "tempeh");

        let Json(names) = search_foods(
            State(state.clone()),
            Query(SearchQuery { q: "TEMP".into(), limit: 8 }),
        )
        .await
        .unwrap();
        assert_eq!(names, vec!["tempeh".to_string()]);

        let r = state.resolver.resolve("tempeh", 50.0).await.unwrap();
        assert!(!r.estimated);
        assert_eq!(r.profile.calories, 96.0);
    }

    #[tokio::test]
    async fn rejects_blank_names_and_negative_values() {
        let state = AppState::fake();
        let blank = CreateFoodRequest { name: "   ".into(), ..tempeh() };
        let negative = CreateFoodRequest { fat: -1.0, ..tempeh() };
        for req in [blank, negative] {
            let (status, _) = create_food(State(state.clone()), Json(req)).await.unwrap_err();
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }
}
