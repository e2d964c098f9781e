// src/services/provider_service.rs

use reqwest::Method;

use crate::{
    api::{tags, ApiClient, CacheMode, Envelope, FetchOptions, ForwardedCookies},
    common::error::ServiceResult,
    models::{
        catalog::{Provider, ProviderData},
        pagination::Paginated,
    },
};

#[derive(Debug, Clone, Default)]
pub struct ProviderParams {
    pub search: Option<String>,
    pub is_open: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Clone)]
pub struct ProviderService {
    api: ApiClient,
}

impl ProviderService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, params: &ProviderParams, mode: CacheMode) -> ServiceResult<Paginated<Provider>> {
        let query = [
            ("search", params.search.clone()),
            ("isOpen", params.is_open.map(|v| v.to_string())),
            ("page", params.page.map(|v| v.to_string())),
            ("limit", params.limit.map(|v| v.to_string())),
        ];
        self.api
            .get(
                "fetch providers",
                "/api/providers",
                &query,
                &ForwardedCookies::none(),
                FetchOptions::new(mode, &[tags::PROVIDERS]),
            )
            .await
    }

    /// Always read fresh: the page shows the live open/closed state.
    pub async fn get(&self, id: &str) -> ServiceResult<Provider> {
        let provider: Envelope<Provider> = self
            .api
            .get(
                "fetch provider",
                &format!("/api/providers/{id}"),
                &[],
                &ForwardedCookies::none(),
                FetchOptions::no_store(),
            )
            .await?;
        Ok(provider.into_inner())
    }

    pub async fn create(&self, cookies: &ForwardedCookies, data: &ProviderData) -> ServiceResult<Provider> {
        let provider: Envelope<Provider> = self
            .api
            .send("create provider profile", Method::POST, "/api/providers", cookies, data)
            .await?;
        Ok(provider.into_inner())
    }

    pub async fn update(
        &self,
        cookies: &ForwardedCookies,
        id: &str,
        data: &ProviderData,
    ) -> ServiceResult<Provider> {
        let provider: Envelope<Provider> = self
            .api
            .send(
                "update provider profile",
                Method::PATCH,
                &format!("/api/providers/{id}"),
                cookies,
                data,
            )
            .await?;
        Ok(provider.into_inner())
    }
}
