//! Query façade between the UI and the transport. Tracks loading/error/data
//! for reads and a pending flag per mutation; holds no business rules. The
//! cached list is invalidated wholesale after every successful write and
//! re-fetched in full, never patched in place. Errors pass through unchanged
//! and nothing is retried.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::MealError;
use crate::meals::model::{Meal, MealInput};
use crate::meals::store::MealStore;

#[derive(Debug)]
pub enum QueryState<T> {
    Loading,
    Error(MealError),
    Ready(T),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&MealError> {
        match self {
            QueryState::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// List view read plus the three write operations.
pub struct MealsQuery {
    service: Arc<dyn MealStore>,
    list: QueryState<Vec<Meal>>,
    add_pending: bool,
    update_pending: bool,
    delete_pending: bool,
}

impl MealsQuery {
    pub fn new(service: Arc<dyn MealStore>) -> Self {
        Self {
            service,
            list: QueryState::Loading,
            add_pending: false,
            update_pending: false,
            delete_pending: false,
        }
    }

    pub fn list(&self) -> &QueryState<Vec<Meal>> {
        &self.list
    }

    pub fn add_pending(&self) -> bool {
        self.add_pending
    }

    pub fn update_pending(&self) -> bool {
        self.update_pending
    }

    pub fn delete_pending(&self) -> bool {
        self.delete_pending
    }

    /// Full re-fetch of the list. Also the invalidation path after writes.
    pub async fn refetch(&mut self) {
        self.list = match self.service.list().await {
            Ok(meals) => QueryState::Ready(meals),
            Err(e) => QueryState::Error(e),
        };
    }

    pub async fn add(&mut self, input: MealInput) -> Result<Meal, MealError> {
        self.add_pending = true;
        let result = self.service.create(input).await;
        self.add_pending = false;
        if result.is_ok() {
            self.invalidate().await;
        }
        result
    }

    pub async fn update(&mut self, id: Uuid, input: MealInput) -> Result<Meal, MealError> {
        self.update_pending = true;
        let result = self.service.update(id, input).await;
        self.update_pending = false;
        if result.is_ok() {
            self.invalidate().await;
        }
        result
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), MealError> {
        self.delete_pending = true;
        let result = self.service.delete(id).await;
        self.delete_pending = false;
        if result.is_ok() {
            self.invalidate().await;
        }
        result
    }

    async fn invalidate(&mut self) {
        self.list = QueryState::Loading;
        self.refetch().await;
    }
}

/// Detail view read for a single record.
pub struct MealQuery {
    service: Arc<dyn MealStore>,
    id: Uuid,
    state: QueryState<Meal>,
}

impl MealQuery {
    pub fn new(service: Arc<dyn MealStore>, id: Uuid) -> Self {
        Self {
            service,
            id,
            state: QueryState::Loading,
        }
    }

    pub fn state(&self) -> &QueryState<Meal> {
        &self.state
    }

    pub async fn refetch(&mut self) {
        self.state = match self.service.get(self.id).await {
            Ok(meal) => QueryState::Ready(meal),
            Err(e) => QueryState::Error(e),
        };
    }
}
