// src/services/meal_service.rs

use reqwest::Method;

use crate::{
    api::{tags, ApiClient, CacheMode, Envelope, FetchOptions, ForwardedCookies},
    common::error::ServiceResult,
    models::{
        catalog::{Meal, MealData},
        pagination::Paginated,
    },
};

/// Filters of `GET /api/meals`; unset fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct MealParams {
    pub search: Option<String>,
    pub is_available: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub provider_id: Option<String>,
    pub category_id: Option<String>,
}

impl MealParams {
    fn query(&self) -> [(&'static str, Option<String>); 6] {
        [
            ("search", self.search.clone()),
            ("isAvailable", self.is_available.map(|v| v.to_string())),
            ("page", self.page.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("providerId", self.provider_id.clone()),
            ("categoryId", self.category_id.clone()),
        ]
    }
}

#[derive(Clone)]
pub struct MealService {
    api: ApiClient,
}

impl MealService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, params: &MealParams, mode: CacheMode) -> ServiceResult<Paginated<Meal>> {
        self.api
            .get(
                "fetch meals",
                "/api/meals",
                &params.query(),
                &ForwardedCookies::none(),
                FetchOptions::new(mode, &[tags::MEALS]),
            )
            .await
    }

    /// The detail embeds reviews, so review mutations invalidate it too.
    pub async fn get(&self, id: &str, mode: CacheMode) -> ServiceResult<Meal> {
        let meal: Envelope<Meal> = self
            .api
            .get(
                "fetch meal",
                &format!("/api/meals/{id}"),
                &[],
                &ForwardedCookies::none(),
                FetchOptions::new(mode, &[tags::MEALS, tags::REVIEWS]),
            )
            .await?;
        Ok(meal.into_inner())
    }

    pub async fn create(&self, cookies: &ForwardedCookies, data: &MealData) -> ServiceResult<Meal> {
        let meal: Envelope<Meal> = self
            .api
            .send("create meal", Method::POST, "/api/meals", cookies, data)
            .await?;
        Ok(meal.into_inner())
    }

    pub async fn update(&self, cookies: &ForwardedCookies, id: &str, data: &MealData) -> ServiceResult<Meal> {
        let meal: Envelope<Meal> = self
            .api
            .send("update meal", Method::PATCH, &format!("/api/meals/{id}"), cookies, data)
            .await?;
        Ok(meal.into_inner())
    }

    pub async fn delete(&self, cookies: &ForwardedCookies, id: &str) -> ServiceResult<()> {
        self.api
            .delete("delete meal", &format!("/api/meals/{id}"), cookies)
            .await
    }
}
