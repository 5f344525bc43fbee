use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::MealError;

use super::model::{Meal, MealInput};
use super::normalize::{normalize_ingredients, normalize_steps, normalize_tags};

/// CRUD seam over the meals table. `PgMealStore` is the production
/// implementation; `MemoryMealStore` backs tests and the HTTP client
/// implements the same trait on the other side of the wire.
#[async_trait]
pub trait MealStore: Send + Sync {
    /// All meals, newest `created_at` first, lists normalized.
    async fn list(&self) -> Result<Vec<Meal>, MealError>;

    async fn get(&self, id: Uuid) -> Result<Meal, MealError>;

    /// Inserts a new record, assigning `id` and both timestamps at the
    /// boundary. Single insert, never partial.
    async fn create(&self, input: MealInput) -> Result<Meal, MealError>;

    /// Whole-record replace: every field of `input` overwrites the stored
    /// value. `created_at` is preserved, `updatedAt` refreshed. Never upserts.
    async fn update(&self, id: Uuid, input: MealInput) -> Result<Meal, MealError>;

    /// Permanent removal. Deleting an absent id is `NotFound`, not a silent
    /// success.
    async fn delete(&self, id: Uuid) -> Result<(), MealError>;
}

/// Row as it comes back from Postgres. The JSONB columns stay raw here; the
/// conversion into `Meal` is the single place list coercion happens on reads,
/// so legacy string-encoded rows degrade uniformly.
#[derive(Debug, FromRow)]
struct MealRow {
    id: Uuid,
    name: String,
    user_name: String,
    country: String,
    servings: i64,
    tags: Value,
    ingredients: Value,
    preparation: Value,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<MealRow> for Meal {
    fn from(row: MealRow) -> Self {
        Meal {
            id: row.id,
            name: row.name,
            user_name: row.user_name,
            country: row.country,
            servings: row.servings,
            tags: normalize_tags(&row.tags),
            ingredients: normalize_ingredients(&row.ingredients),
            preparation: normalize_steps(&row.preparation),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgMealStore {
    db: PgPool,
}

impl PgMealStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const MEAL_COLUMNS: &str = "id, name, user_name, country, servings, tags, \
                            ingredients, preparation, created_at, updated_at";

#[async_trait]
impl MealStore for PgMealStore {
    async fn list(&self) -> Result<Vec<Meal>, MealError> {
        let rows = sqlx::query_as::<_, MealRow>(&format!(
            "SELECT {MEAL_COLUMNS} FROM meals ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Meal::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Meal, MealError> {
        let row = sqlx::query_as::<_, MealRow>(&format!(
            "SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(MealError::NotFound)?;
        Ok(row.into())
    }

    async fn create(&self, input: MealInput) -> Result<Meal, MealError> {
        let now = OffsetDateTime::now_utc();
        let row = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            INSERT INTO meals
                (name, user_name, country, servings, tags, ingredients,
                 preparation, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING {MEAL_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.user_name)
        .bind(&input.country)
        .bind(input.servings)
        .bind(serde_json::json!(input.tags))
        .bind(serde_json::json!(input.ingredients))
        .bind(serde_json::json!(input.preparation))
        .bind(now)
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, input: MealInput) -> Result<Meal, MealError> {
        let row = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            UPDATE meals
            SET name = $2, user_name = $3, country = $4, servings = $5,
                tags = $6, ingredients = $7, preparation = $8, updated_at = $9
            WHERE id = $1
            RETURNING {MEAL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.user_name)
        .bind(&input.country)
        .bind(input.servings)
        .bind(serde_json::json!(input.tags))
        .bind(serde_json::json!(input.ingredients))
        .bind(serde_json::json!(input.preparation))
        .bind(OffsetDateTime::now_utc())
        .fetch_optional(&self.db)
        .await?
        .ok_or(MealError::NotFound)?;
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), MealError> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(MealError::NotFound);
        }
        Ok(())
    }
}

/// RwLock-backed store with the same ordering and error semantics as
/// `PgMealStore`. Used by the test suites and handy for embedded demos.
#[derive(Default)]
pub struct MemoryMealStore {
    meals: RwLock<Vec<Meal>>,
}

impl MemoryMealStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Meal>>, MealError> {
        self.meals
            .read()
            .map_err(|_| MealError::Store("meal store lock poisoned".into()))
    }

    fn lock_write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Meal>>, MealError> {
        self.meals
            .write()
            .map_err(|_| MealError::Store("meal store lock poisoned".into()))
    }
}

#[async_trait]
impl MealStore for MemoryMealStore {
    async fn list(&self) -> Result<Vec<Meal>, MealError> {
        let meals = self.lock_read()?;
        // newest first; on equal timestamps the later insertion wins
        let mut out: Vec<Meal> = meals.iter().rev().cloned().collect();
        out.sort_by_key(|m| std::cmp::Reverse(m.created_at));
        Ok(out)
    }

    async fn get(&self, id: Uuid) -> Result<Meal, MealError> {
        let meals = self.lock_read()?;
        meals
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(MealError::NotFound)
    }

    async fn create(&self, input: MealInput) -> Result<Meal, MealError> {
        let now = OffsetDateTime::now_utc();
        let meal = Meal {
            id: Uuid::new_v4(),
            name: input.name,
            user_name: input.user_name,
            country: input.country,
            servings: input.servings,
            tags: input.tags,
            ingredients: input.ingredients,
            preparation: input.preparation,
            created_at: now,
            updated_at: now,
        };
        self.lock_write()?.push(meal.clone());
        Ok(meal)
    }

    async fn update(&self, id: Uuid, input: MealInput) -> Result<Meal, MealError> {
        let mut meals = self.lock_write()?;
        let meal = meals
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(MealError::NotFound)?;
        meal.name = input.name;
        meal.user_name = input.user_name;
        meal.country = input.country;
        meal.servings = input.servings;
        meal.tags = input.tags;
        meal.ingredients = input.ingredients;
        meal.preparation = input.preparation;
        meal.updated_at = OffsetDateTime::now_utc();
        Ok(meal.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), MealError> {
        let mut meals = self.lock_write()?;
        let before = meals.len();
        meals.retain(|m| m.id != id);
        if meals.len() == before {
            return Err(MealError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::model::Ingredient;

    fn pasta() -> MealInput {
        MealInput {
            name: "Pasta".into(),
            user_name: "Ana".into(),
            country: "Italy".into(),
            servings: 2,
            tags: vec!["quick".into(), "vegan".into()],
            ingredients: vec![Ingredient {
                name: "Flour".into(),
                amount: "200g".into(),
            }],
            preparation: vec!["Boil water".into(), "Add pasta".into()],
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_every_field() {
        let store = MemoryMealStore::new();
        let created = store.create(pasta()).await.unwrap();
        let fetched = store.get(created.id).await.unwrap();

        assert_eq!(fetched.name, "Pasta");
        assert_eq!(fetched.user_name, "Ana");
        assert_eq!(fetched.country, "Italy");
        assert_eq!(fetched.servings, 2);
        assert_eq!(fetched.tags, vec!["quick", "vegan"]);
        assert_eq!(fetched.ingredients, created.ingredients);
        assert_eq!(fetched.preparation, vec!["Boil water", "Add pasta"]);
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = MemoryMealStore::new();
        store.create(pasta()).await.unwrap();
        let mut second = pasta();
        second.name = "Salad".into();
        let salad = store.create(second).await.unwrap();

        let meals = store.list().await.unwrap();
        assert_eq!(meals[0].id, salad.id);
        assert_eq!(meals.len(), 2);
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_and_keeps_created_at() {
        let store = MemoryMealStore::new();
        let created = store.create(pasta()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        let mut patch = pasta();
        patch.servings = 4;
        let updated = store.update(created.id, patch).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.servings, 4);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found_and_creates_nothing() {
        let store = MemoryMealStore::new();
        let err = store.update(Uuid::new_v4(), pasta()).await.unwrap_err();
        assert!(matches!(err, MealError::NotFound));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = MemoryMealStore::new();
        let created = store.create(pasta()).await.unwrap();
        store.delete(created.id).await.unwrap();

        let err = store.get(created.id).await.unwrap_err();
        assert!(matches!(err, MealError::NotFound));
    }

    #[tokio::test]
    async fn delete_of_absent_id_is_not_found() {
        let store = MemoryMealStore::new();
        let err = store.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, MealError::NotFound));
    }
}
