//! HTTP client over the `/meals` REST surface. Implements the same `MealStore`
//! trait as the server-side stores, so the query façade works identically
//! against a remote server or an in-process store.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{ErrorBody, MealError};
use crate::meals::model::{Meal, MealInput};
use crate::meals::store::MealStore;

pub struct HttpMealClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMealClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Maps a non-2xx response into the error taxonomy. A missing or malformed
/// body becomes a generic status message rather than a decode failure.
async fn error_from(res: Response) -> MealError {
    let status = res.status();
    if status == StatusCode::NOT_FOUND {
        return MealError::NotFound;
    }
    let message = match res.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP error! Status: {status}"),
    };
    MealError::Store(message)
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, MealError> {
    if !res.status().is_success() {
        return Err(error_from(res).await);
    }
    Ok(res.json::<T>().await?)
}

#[async_trait]
impl MealStore for HttpMealClient {
    async fn list(&self) -> Result<Vec<Meal>, MealError> {
        let res = self.http.get(self.url("/meals")).send().await?;
        decode(res).await
    }

    async fn get(&self, id: Uuid) -> Result<Meal, MealError> {
        let res = self.http.get(self.url(&format!("/meals/{id}"))).send().await?;
        decode(res).await
    }

    async fn create(&self, input: MealInput) -> Result<Meal, MealError> {
        let res = self
            .http
            .post(self.url("/meals"))
            .json(&input)
            .send()
            .await?;
        decode(res).await
    }

    async fn update(&self, id: Uuid, input: MealInput) -> Result<Meal, MealError> {
        let res = self
            .http
            .patch(self.url(&format!("/meals/{id}")))
            .json(&input)
            .send()
            .await?;
        decode(res).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), MealError> {
        let res = self
            .http
            .delete(self.url(&format!("/meals/{id}")))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(error_from(res).await);
        }
        Ok(())
    }
}
