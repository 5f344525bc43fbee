use serde::Deserialize;
use serde_json::Value;

use super::model::MealInput;
use super::normalize::{normalize_ingredients, normalize_steps, normalize_tags};

/// Loosely-typed create/update body. The list-valued fields may arrive as
/// arrays or as JSON-encoded strings; `into_input` runs them through the
/// normalizer so the store only ever sees canonical shapes. Timestamps are
/// deliberately absent: the store assigns them and never trusts the caller.
#[derive(Debug, Deserialize)]
pub struct MealPayload {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "userName", default)]
    pub user_name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default = "default_servings")]
    pub servings: i64,
    #[serde(default)]
    pub tags: Value,
    #[serde(default)]
    pub ingredients: Value,
    #[serde(default)]
    pub preparation: Value,
}

fn default_servings() -> i64 {
    1
}

impl MealPayload {
    pub fn into_input(self) -> MealInput {
        MealInput {
            name: self.name,
            user_name: self.user_name,
            country: self.country,
            servings: self.servings,
            tags: normalize_tags(&self.tags),
            ingredients: normalize_ingredients(&self.ingredients),
            preparation: normalize_steps(&self.preparation),
        }
    }
}
