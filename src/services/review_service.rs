// src/services/review_service.rs

use reqwest::Method;

use crate::{
    api::{ApiClient, Envelope, ForwardedCookies},
    common::error::ServiceResult,
    models::review::{Review, ReviewData, ReviewUpdate},
};

#[derive(Clone)]
pub struct ReviewService {
    api: ApiClient,
}

impl ReviewService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, cookies: &ForwardedCookies, data: &ReviewData) -> ServiceResult<Review> {
        let review: Envelope<Review> = self
            .api
            .send("create review", Method::POST, "/api/reviews", cookies, data)
            .await?;
        Ok(review.into_inner())
    }

    pub async fn update(&self, cookies: &ForwardedCookies, id: &str, data: &ReviewUpdate) -> ServiceResult<Review> {
        let review: Envelope<Review> = self
            .api
            .send("update review", Method::PATCH, &format!("/api/reviews/{id}"), cookies, data)
            .await?;
        Ok(review.into_inner())
    }

    pub async fn delete(&self, cookies: &ForwardedCookies, id: &str) -> ServiceResult<()> {
        self.api
            .delete("delete review", &format!("/api/reviews/{id}"), cookies)
            .await
    }
}
