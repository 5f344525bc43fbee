//! Submission-boundary validation. Pure, all-or-nothing: either a trimmed,
//! canonical candidate comes back, or a field-keyed error map and nothing is
//! sent anywhere.

use std::collections::BTreeMap;

use super::model::{Ingredient, MealInput};

/// Field-keyed validation messages. List entries use indexed keys such as
/// `ingredients[0]` and `preparation[2]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }
}

/// Canonical tag list: trimmed, lower-cased, de-duplicated, order preserved.
pub fn canonical_tags(tags: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

/// Validates a candidate and returns it trimmed and tag-canonicalized, or the
/// full set of per-field messages. Never partially succeeds.
pub fn validate_meal_input(candidate: &MealInput) -> Result<MealInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = candidate.name.trim();
    if name.is_empty() {
        errors.insert("name", "Meal name is required");
    }

    let user_name = candidate.user_name.trim();
    if user_name.is_empty() {
        errors.insert("userName", "Your name is required");
    }

    if candidate.servings < 1 {
        errors.insert("servings", "Servings must be at least 1");
    }

    if candidate.ingredients.is_empty() {
        errors.insert("ingredients", "At least one ingredient is required");
    }
    for (i, ingredient) in candidate.ingredients.iter().enumerate() {
        if ingredient.name.trim().is_empty() || ingredient.amount.trim().is_empty() {
            errors.insert(
                format!("ingredients[{i}]"),
                "Both name and amount are required",
            );
        }
    }

    for (i, step) in candidate.preparation.iter().enumerate() {
        if step.trim().is_empty() {
            errors.insert(format!("preparation[{i}]"), "This step cannot be empty");
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(MealInput {
        name: name.to_string(),
        user_name: user_name.to_string(),
        country: candidate.country.trim().to_string(),
        servings: candidate.servings,
        tags: canonical_tags(&candidate.tags),
        ingredients: candidate
            .ingredients
            .iter()
            .map(|i| Ingredient {
                name: i.name.trim().to_string(),
                amount: i.amount.trim().to_string(),
            })
            .collect(),
        preparation: candidate
            .preparation
            .iter()
            .map(|s| s.trim().to_string())
            .collect(),
    })
}
