// src/services/order_service.rs

use reqwest::Method;

use crate::{
    api::{ApiClient, Envelope, FetchOptions, ForwardedCookies},
    common::error::ServiceResult,
    models::{
        order::{Order, OrderData, OrderStatus, OrderUpdate, StatusUpdate},
        pagination::Paginated,
    },
};

/// Filters of `GET /api/orders`. The backend scopes the result to the caller's
/// session; the ids narrow it further.
#[derive(Debug, Clone, Default)]
pub struct OrderParams {
    pub customer_id: Option<String>,
    pub provider_id: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Clone)]
pub struct OrderService {
    api: ApiClient,
}

impl OrderService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, cookies: &ForwardedCookies, data: &OrderData) -> ServiceResult<Order> {
        let order: Envelope<Order> = self
            .api
            .send("create order", Method::POST, "/api/orders", cookies, data)
            .await?;
        Ok(order.into_inner())
    }

    /// Orders are per-session data and are never cached.
    pub async fn list(&self, cookies: &ForwardedCookies, params: &OrderParams) -> ServiceResult<Paginated<Order>> {
        let query = [
            ("customerId", params.customer_id.clone()),
            ("providerId", params.provider_id.clone()),
            ("page", params.page.map(|v| v.to_string())),
            ("limit", params.limit.map(|v| v.to_string())),
        ];
        self.api
            .get("fetch orders", "/api/orders", &query, cookies, FetchOptions::no_store())
            .await
    }

    pub async fn update(&self, cookies: &ForwardedCookies, id: &str, patch: &OrderUpdate) -> ServiceResult<Order> {
        let order: Envelope<Order> = self
            .api
            .send("update order", Method::PATCH, &format!("/api/orders/{id}"), cookies, patch)
            .await?;
        Ok(order.into_inner())
    }

    pub async fn update_status(
        &self,
        cookies: &ForwardedCookies,
        id: &str,
        status: OrderStatus,
    ) -> ServiceResult<Order> {
        let order: Envelope<Order> = self
            .api
            .send(
                "update order status",
                Method::PATCH,
                &format!("/api/orders/status/{id}"),
                cookies,
                &StatusUpdate { status },
            )
            .await?;
        Ok(order.into_inner())
    }

    pub async fn delete(&self, cookies: &ForwardedCookies, id: &str) -> ServiceResult<()> {
        self.api
            .delete("delete order", &format!("/api/orders/{id}"), cookies)
            .await
    }
}
