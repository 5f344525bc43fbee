//! Add/edit form state machine. Fields hold raw text as typed; validation
//! runs on submit and either yields a canonical `MealInput` or per-field
//! messages. A failed request drops back to editing with a single form-level
//! message and every entered value intact.

use serde_json::Value;

use crate::error::MealError;
use crate::meals::model::{Ingredient, MealInput};
use crate::meals::normalize::{normalize_ingredients, normalize_steps, normalize_tags};
use crate::meals::validate::{validate_meal_input, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

#[derive(Debug)]
pub struct MealForm {
    pub name: String,
    pub user_name: String,
    pub country: String,
    /// Raw text from the servings input; parsed on submit.
    pub servings: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    errors: ValidationErrors,
    form_error: Option<String>,
    phase: FormPhase,
}

impl Default for MealForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MealForm {
    /// Blank add form: one empty ingredient row and one empty step.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            user_name: String::new(),
            country: String::new(),
            servings: "1".into(),
            tags: Vec::new(),
            ingredients: vec![blank_ingredient()],
            steps: vec![String::new()],
            errors: ValidationErrors::default(),
            form_error: None,
            phase: FormPhase::Editing,
        }
    }

    /// Edit form seeded from a raw record. The list fields go through the
    /// normalizer, so a legacy record with string-encoded columns populates
    /// the same way a clean one does.
    pub fn from_record(record: &Value) -> Self {
        let text = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let servings = record
            .get("servings")
            .and_then(Value::as_i64)
            .unwrap_or(1)
            .to_string();

        let mut ingredients =
            normalize_ingredients(record.get("ingredients").unwrap_or(&Value::Null));
        if ingredients.is_empty() {
            ingredients.push(blank_ingredient());
        }
        let mut steps = normalize_steps(record.get("preparation").unwrap_or(&Value::Null));
        if steps.is_empty() {
            steps.push(String::new());
        }

        Self {
            name: text("name"),
            user_name: text("userName"),
            country: text("country"),
            servings,
            tags: normalize_tags(record.get("tags").unwrap_or(&Value::Null)),
            ingredients,
            steps,
            errors: ValidationErrors::default(),
            form_error: None,
            phase: FormPhase::Editing,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn add_ingredient(&mut self) {
        self.ingredients.push(blank_ingredient());
    }

    /// Rows are removable only down to one.
    pub fn remove_ingredient(&mut self, index: usize) {
        if self.ingredients.len() > 1 && index < self.ingredients.len() {
            self.ingredients.remove(index);
        }
    }

    pub fn add_step(&mut self) {
        self.steps.push(String::new());
    }

    pub fn remove_step(&mut self, index: usize) {
        if self.steps.len() > 1 && index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    /// Validates the current fields. On success the form moves to
    /// `Submitting` and the canonical input is handed back for the mutation;
    /// on failure it stays in `Editing` with per-field messages and nothing
    /// is sent.
    pub fn begin_submit(&mut self) -> Option<MealInput> {
        self.form_error = None;

        let servings = self.servings.trim().parse::<i64>().unwrap_or(0);
        let candidate = MealInput {
            name: self.name.clone(),
            user_name: self.user_name.clone(),
            country: self.country.clone(),
            servings,
            tags: self.tags.clone(),
            ingredients: self.ingredients.clone(),
            preparation: self.steps.clone(),
        };

        match validate_meal_input(&candidate) {
            Ok(validated) => {
                self.errors = ValidationErrors::default();
                self.phase = FormPhase::Submitting;
                Some(validated)
            }
            Err(errors) => {
                self.errors = errors;
                self.phase = FormPhase::Editing;
                None
            }
        }
    }

    /// Resolves the in-flight mutation: success resets and closes the form,
    /// failure returns to editing with the fields retained.
    pub fn finish_submit<T>(&mut self, result: &Result<T, MealError>) {
        match result {
            Ok(_) => *self = Self::new(),
            Err(e) => {
                self.phase = FormPhase::Editing;
                self.form_error = Some(e.to_string());
            }
        }
    }
}

fn blank_ingredient() -> Ingredient {
    Ingredient {
        name: String::new(),
        amount: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled_form() -> MealForm {
        let mut form = MealForm::new();
        form.name = "Pasta".into();
        form.user_name = "Ana".into();
        form.servings = "2".into();
        form.ingredients[0] = Ingredient {
            name: "Flour".into(),
            amount: "200g".into(),
        };
        form.steps[0] = "Boil water".into();
        form
    }

    #[test]
    fn starts_editing_with_one_blank_row_each() {
        let form = MealForm::new();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.ingredients.len(), 1);
        assert_eq!(form.steps.len(), 1);
    }

    #[test]
    fn invalid_submit_stays_editing_with_field_errors() {
        let mut form = MealForm::new();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.field_error("name"), Some("Meal name is required"));
        assert_eq!(
            form.field_error("ingredients[0]"),
            Some("Both name and amount are required")
        );
    }

    #[test]
    fn unparseable_servings_is_a_servings_error() {
        let mut form = filled_form();
        form.servings = "two".into();
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.field_error("servings"),
            Some("Servings must be at least 1")
        );
    }

    #[test]
    fn valid_submit_moves_to_submitting_with_canonical_input() {
        let mut form = filled_form();
        form.tags = vec![" Quick ".into(), "QUICK".into()];

        let input = form.begin_submit().expect("should validate");
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert_eq!(input.servings, 2);
        assert_eq!(input.tags, vec!["quick"]);
    }

    #[test]
    fn failed_mutation_keeps_entered_values() {
        let mut form = filled_form();
        form.begin_submit().unwrap();

        let result: Result<(), MealError> = Err(MealError::Store("boom".into()));
        form.finish_submit(&result);

        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.form_error(), Some("boom"));
        assert_eq!(form.name, "Pasta");
        assert_eq!(form.ingredients[0].name, "Flour");
    }

    #[test]
    fn successful_mutation_resets_the_form() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.finish_submit(&Ok::<(), MealError>(()));

        assert!(form.name.is_empty());
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn edit_form_seeds_through_the_normalizer() {
        let record = json!({
            "name": "Pasta",
            "userName": "Ana",
            "country": "Italy",
            "servings": 4,
            "tags": "[\"quick\"]",
            "ingredients": "[{\"name\":\"Flour\",\"amount\":\"200g\"}]",
            "preparation": ["Boil water"]
        });

        let form = MealForm::from_record(&record);
        assert_eq!(form.name, "Pasta");
        assert_eq!(form.servings, "4");
        assert_eq!(form.tags, vec!["quick"]);
        assert_eq!(form.ingredients[0].amount, "200g");
        assert_eq!(form.steps, vec!["Boil water"]);
    }

    #[test]
    fn legacy_garbage_lists_seed_as_blank_rows() {
        let record = json!({
            "name": "Stew",
            "userName": "Ben",
            "ingredients": "not json",
            "preparation": 7
        });

        let form = MealForm::from_record(&record);
        assert_eq!(form.ingredients.len(), 1);
        assert!(form.ingredients[0].name.is_empty());
        assert_eq!(form.steps, vec![""]);
    }

    #[test]
    fn last_ingredient_row_cannot_be_removed() {
        let mut form = MealForm::new();
        form.remove_ingredient(0);
        assert_eq!(form.ingredients.len(), 1);

        form.add_ingredient();
        form.remove_ingredient(1);
        assert_eq!(form.ingredients.len(), 1);
    }
}
