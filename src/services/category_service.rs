// src/services/category_service.rs

use reqwest::Method;

use crate::{
    api::{tags, ApiClient, CacheMode, Envelope, FetchOptions, ForwardedCookies},
    common::error::ServiceResult,
    models::catalog::{Category, CategoryData},
};

#[derive(Clone)]
pub struct CategoryService {
    api: ApiClient,
}

impl CategoryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The backend answers with a bare array.
    pub async fn list(&self, mode: CacheMode) -> ServiceResult<Vec<Category>> {
        let categories: Envelope<Vec<Category>> = self
            .api
            .get(
                "fetch categories",
                "/api/categories",
                &[],
                &ForwardedCookies::none(),
                FetchOptions::new(mode, &[tags::CATEGORIES]),
            )
            .await?;
        Ok(categories.into_inner())
    }

    /// A category embeds its meals, so the read is tagged with both.
    pub async fn get(&self, id: &str, mode: CacheMode) -> ServiceResult<Category> {
        let category: Envelope<Category> = self
            .api
            .get(
                "fetch category",
                &format!("/api/categories/{id}"),
                &[],
                &ForwardedCookies::none(),
                FetchOptions::new(mode, &[tags::CATEGORIES, tags::MEALS]),
            )
            .await?;
        Ok(category.into_inner())
    }

    pub async fn create(&self, cookies: &ForwardedCookies, data: &CategoryData) -> ServiceResult<Category> {
        let category: Envelope<Category> = self
            .api
            .send("create category", Method::POST, "/api/categories", cookies, data)
            .await?;
        Ok(category.into_inner())
    }

    pub async fn update(
        &self,
        cookies: &ForwardedCookies,
        id: &str,
        data: &CategoryData,
    ) -> ServiceResult<Category> {
        let category: Envelope<Category> = self
            .api
            .send(
                "update category",
                Method::PATCH,
                &format!("/api/categories/{id}"),
                cookies,
                data,
            )
            .await?;
        Ok(category.into_inner())
    }
}
