pub mod dto;
pub mod handlers;
pub mod model;
pub mod normalize;
pub mod store;
pub mod validate;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::router()
}
