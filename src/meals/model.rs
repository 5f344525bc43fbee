use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
}

/// Canonical meal record as stored and as served over the wire.
///
/// The mixed key naming (`userName`/`updatedAt` next to `created_at`) is part
/// of the wire contract and must not be regularized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(default)]
    pub country: String,
    pub servings: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub preparation: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "updatedAt", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Everything the caller supplies for a create or whole-record update.
/// `id` and the timestamps are assigned at the store boundary, never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealInput {
    pub name: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(default)]
    pub country: String,
    pub servings: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub preparation: Vec<String>,
}
