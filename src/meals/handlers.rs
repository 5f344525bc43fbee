use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::MealError;
use crate::state::AppState;

use super::dto::MealPayload;
use super::model::Meal;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route(
            "/meals/:id",
            get(get_meal).patch(update_meal).delete(delete_meal),
        )
}

#[instrument(skip(state))]
pub async fn list_meals(State(state): State<AppState>) -> Result<Json<Vec<Meal>>, MealError> {
    let meals = state.store.list().await?;
    tracing::debug!(count = meals.len(), "listed meals");
    Ok(Json(meals))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Meal>, MealError> {
    let meal = state.store.get(id).await?;
    Ok(Json(meal))
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    Json(payload): Json<MealPayload>,
) -> Result<(StatusCode, Json<Meal>), MealError> {
    let meal = state.store.create(payload.into_input()).await?;
    tracing::info!(id = %meal.id, "meal created");
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MealPayload>,
) -> Result<Json<Meal>, MealError> {
    let meal = state.store.update(id, payload.into_input()).await?;
    tracing::info!(id = %meal.id, "meal updated");
    Ok(Json(meal))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, MealError> {
    state.store.delete(id).await?;
    tracing::info!(%id, "meal deleted");
    Ok(StatusCode::OK)
}
