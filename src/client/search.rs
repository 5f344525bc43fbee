//! Client-side list filtering. The filter is recomputed from the full fetched
//! set on every keystroke; callers wait out `SEARCH_DEBOUNCE` between
//! keystrokes before recomputing. No server-side filtering.

use std::time::Duration;

use crate::meals::model::Meal;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Case-insensitive substring match over `name` only.
pub fn filter_by_name<'a>(meals: &'a [Meal], query: &str) -> Vec<&'a Meal> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return meals.iter().collect();
    }
    meals
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&needle))
        .collect()
}
