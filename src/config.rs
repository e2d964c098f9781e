// src/config.rs

pub mod settings;

pub use settings::Settings;

use crate::{
    api::{ApiClient, TagCache},
    services::{
        AuthService, CategoryService, MealService, OrderService, ProviderService, ReviewService,
        UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub cache: TagCache,
    pub auth_service: AuthService,
    pub category_service: CategoryService,
    pub meal_service: MealService,
    pub order_service: OrderService,
    pub provider_service: ProviderService,
    pub review_service: ReviewService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("foodhub-web/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // --- Dependency graph ---
        let cache = TagCache::new();
        let api = ApiClient::new(
            http,
            &settings.api_url,
            &settings.auth_url,
            &settings.frontend_api,
            cache.clone(),
            settings.revalidate,
        );

        tracing::info!("Backend at {}, auth service at {}", settings.api_url, settings.auth_url);

        Ok(Self {
            auth_service: AuthService::new(api.clone()),
            category_service: CategoryService::new(api.clone()),
            meal_service: MealService::new(api.clone()),
            order_service: OrderService::new(api.clone()),
            provider_service: ProviderService::new(api.clone()),
            review_service: ReviewService::new(api.clone()),
            user_service: UserService::new(api),
            cache,
        })
    }
}
