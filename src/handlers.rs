pub mod admin;
pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod orders;
pub mod profile;
pub mod provider;
pub mod reviews;

use axum::response::{IntoResponse, Redirect, Response};

use crate::models::pagination::{overflow_redirect, Paginated};

/// Sends the visitor to the last page when `requested` lies past the end of `list`.
pub(crate) fn clamp_page<T>(list: &Paginated<T>, base: &str, requested: u32) -> Option<Response> {
    overflow_redirect(&list.meta, requested)
        .map(|last| Redirect::to(&format!("{base}?page={last}")).into_response())
}

#[cfg(test)]
mod tests {
    use reqwest::{header::LOCATION, StatusCode};
    use serde_json::{json, Value};

    use crate::{
        models::order::{Order, OrderDraft},
        test_support::{client, spawn_app, MockBackend},
    };

    fn location(response: &reqwest::Response) -> &str {
        response.headers()[LOCATION].to_str().unwrap()
    }

    #[tokio::test]
    async fn dashboards_redirect_by_role() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;
        let http = client();

        let response = http.get(format!("{app}/dashboard/orders")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");

        let response = http
            .get(format!("{app}/admin-dashboard"))
            .header("cookie", "session=customer")
            .send()
            .await
            .unwrap();
        assert_eq!(location(&response), "/unauthorized");

        let response = http
            .get(format!("{app}/provider-dashboard/meals"))
            .header("cookie", "session=provider")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn session_endpoint_reports_missing_session() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;
        let http = client();

        let response = http.get(format!("{app}/api/session")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.unwrap();
        assert!(body["data"].is_null());
        assert_eq!(mock.count("GET /auth/get-session"), 0);

        let response = http
            .get(format!("{app}/api/session"))
            .header("cookie", "session=customer")
            .send()
            .await
            .unwrap();
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["data"]["user"]["name"], "Casey");
        assert!(body["error"].is_null());
    }

    #[tokio::test]
    async fn provider_review_is_rejected_before_backend() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;

        let html = client()
            .post(format!("{app}/meals/meal-1/reviews"))
            .header("cookie", "session=provider")
            .form(&[("rating", "5"), ("comment", "Great")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(html.contains("Only customers can submit reviews"));
        assert_eq!(mock.count("POST /api/reviews"), 0);
    }

    #[tokio::test]
    async fn customer_review_is_shown_first() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;

        let response = client()
            .post(format!("{app}/meals/meal-1/reviews"))
            .header("cookie", "session=customer")
            .form(&[("rating", "5"), ("comment", "Lovely crust")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = response.text().await.unwrap();

        assert_eq!(mock.count("POST /api/reviews"), 1);
        let new = html.find("Lovely crust").expect("new review rendered");
        let old = html.find("Tasty").expect("seeded review rendered");
        assert!(new < old);
        assert!(html.contains("Review added successfully!"));
    }

    #[tokio::test]
    async fn page_past_the_end_redirects_to_last_page() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;

        let response = client().get(format!("{app}/meals?page=7")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/meals?page=1");
    }

    #[tokio::test]
    async fn admin_cannot_delete_themselves() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;

        let html = client()
            .post(format!("{app}/admin-dashboard/users/admin-1/delete"))
            .header("cookie", "session=admin")
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(html.contains("You cannot delete your own account."));
        assert_eq!(mock.count("DELETE /api/users"), 0);
    }

    #[tokio::test]
    async fn login_relays_session_cookie() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;

        let response = client()
            .post(format!("{app}/login"))
            .form(&[("email", "casey@foodhub.test"), ("password", "password123")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let cookie = response.headers()["set-cookie"].to_str().unwrap();
        assert!(cookie.starts_with("session=customer"));

        let response = client()
            .post(format!("{app}/login"))
            .form(&[("email", "nobody@foodhub.test"), ("password", "password123")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.text().await.unwrap().contains("Invalid email or password."));
    }

    async fn order_as_customer(app: &str, form: &[(&str, &str)]) -> reqwest::Response {
        client()
            .post(format!("{app}/meals/meal-1/order"))
            .header("cookie", "session=customer")
            .form(form)
            .send()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn order_body_totals_price_times_quantity() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;

        let response = order_as_customer(&app, &[("delivery_address", " 5 Elm St "), ("quantity", "3")]).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.text().await.unwrap().contains("Order placed successfully!"));

        let placed = mock.with(|d| d.orders.last().cloned().unwrap());
        assert_eq!(placed["totalPrice"], json!(37.5));
        assert_eq!(placed["paymentMethod"], "COD");
        assert_eq!(placed["deliveryAddress"], "5 Elm St");
        assert_eq!(placed["providerId"], "prov-1");
        assert_eq!(placed["items"][0]["mealId"], "meal-1");
        assert_eq!(placed["items"][0]["quantity"], 3);
    }

    #[tokio::test]
    async fn invalid_order_forms_never_reach_backend() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;

        let html = order_as_customer(&app, &[("delivery_address", "  "), ("quantity", "1")])
            .await
            .text()
            .await
            .unwrap();
        assert!(html.contains("Please enter a delivery address"));

        let html = order_as_customer(&app, &[("delivery_address", "5 Elm St"), ("quantity", "lots")])
            .await
            .text()
            .await
            .unwrap();
        assert!(html.contains("Quantity must be at least 1."));
        assert_eq!(mock.count("POST /api/orders"), 0);
    }

    #[tokio::test]
    async fn unavailable_meal_is_not_ordered() {
        let mock = MockBackend::seeded();
        mock.with(|d| d.meals[0]["isAvailable"] = json!(false));
        let app = spawn_app(&mock).await;

        let html = order_as_customer(&app, &[("delivery_address", "5 Elm St"), ("quantity", "1")])
            .await
            .text()
            .await
            .unwrap();
        assert!(html.contains("This meal is currently unavailable."));
        assert_eq!(mock.count("POST /api/orders"), 0);
    }

    #[tokio::test]
    async fn rejected_order_session_redirects_to_login() {
        let mock = MockBackend::seeded();
        mock.with(|d| d.order_failure = Some(401));
        let app = spawn_app(&mock).await;

        let response = order_as_customer(&app, &[("delivery_address", "5 Elm St"), ("quantity", "1")]).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert_eq!(mock.count("POST /api/orders"), 1);
    }

    #[tokio::test]
    async fn unreadable_rating_is_shown_inline() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;

        let response = client()
            .post(format!("{app}/meals/meal-1/reviews"))
            .header("cookie", "session=customer")
            .form(&[("rating", ""), ("comment", "Nice")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.text().await.unwrap().contains("Rating must be between 1 and 5."));
        assert_eq!(mock.count("POST /api/reviews"), 0);
    }

    fn push_back_seeded_order(mock: &MockBackend) {
        mock.with(|d| {
            for n in 0..10 {
                let filler = json!({
                    "id": format!("order-filler-{n:02}"), "customerId": "cust-1", "status": "PENDING",
                    "deliveryAddress": "1 Filler Rd", "totalPrice": 9.0,
                    "items": [{"mealId": "meal-2", "quantity": 1, "price": 9.0}]
                });
                d.orders.insert(0, filler);
            }
        });
    }

    fn seeded_draft(mock: &MockBackend) -> String {
        let raw = mock.with(|d| d.orders.iter().find(|o| o["id"] == "order-0001-abcd").cloned().unwrap());
        let order: Order = serde_json::from_value(raw).unwrap();
        OrderDraft::from_order(&order).encode()
    }

    #[tokio::test]
    async fn quantity_editor_stays_on_the_posted_page() {
        let mock = MockBackend::seeded();
        push_back_seeded_order(&mock);
        let app = spawn_app(&mock).await;
        let http = client();

        let html = http
            .get(format!("{app}/admin-dashboard/orders?page=2"))
            .header("cookie", "session=admin")
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains("order-0001-abcd"));
        assert!(html.contains(r#"<input type="hidden" name="page" value="2">"#));

        let draft = seeded_draft(&mock);
        let html = http
            .post(format!("{app}/admin-dashboard/orders/order-0001-abcd/quantity"))
            .header("cookie", "session=admin")
            .form(&[("draft", draft.as_str()), ("meal_id", "meal-1"), ("delta", "1"), ("page", "2")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains("order-0001-abcd"));
        assert!(html.contains("meal-1:3:"));
        assert_eq!(mock.count("PATCH /api/orders"), 0);

        let html = http
            .post(format!("{app}/admin-dashboard/orders/order-0001-abcd/quantity"))
            .header("cookie", "session=admin")
            .form(&[("draft", draft.as_str()), ("meal_id", "meal-1"), ("delta", "-5"), ("page", "2")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains("meal-1:1:"));
    }

    #[tokio::test]
    async fn saved_quantities_are_sent_to_backend() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;

        let draft = seeded_draft(&mock).replace("meal-1:2:", "meal-1:4:");
        let html = client()
            .post(format!("{app}/admin-dashboard/orders/order-0001-abcd/items"))
            .header("cookie", "session=admin")
            .form(&[("draft", draft.as_str()), ("page", "1")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(html.contains("Order updated successfully!"));
        assert_eq!(mock.count("PATCH /api/orders/order-0001-abcd"), 1);
        let order = mock.with(|d| d.orders[0].clone());
        assert_eq!(order["items"][0]["quantity"], 4);
        assert_eq!(order["totalPrice"], json!(50.0));
    }

    #[tokio::test]
    async fn provider_updates_order_status() {
        let mock = MockBackend::seeded();
        let app = spawn_app(&mock).await;

        let response = client()
            .post(format!("{app}/provider-dashboard/orders/order-0001-abcd/status"))
            .header("cookie", "session=provider")
            .form(&[("status", "PREPARING"), ("page", "1")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.text().await.unwrap().contains("Order status updated successfully!"));
        assert_eq!(mock.count("PATCH /api/orders/status/order-0001-abcd"), 1);
        assert_eq!(mock.with(|d| d.orders[0]["status"].clone()), "PREPARING");

        let html = client()
            .post(format!("{app}/provider-dashboard/orders/order-0001-abcd/status"))
            .header("cookie", "session=provider")
            .form(&[("status", "TELEPORTED")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains("Unknown order status"));
        assert_eq!(mock.count("PATCH /api/orders/status"), 1);
    }
}
