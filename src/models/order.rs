// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::catalog::ProviderRef;

// --- Status ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Accepted,
    Preparing,
    #[serde(alias = "OUT_FOR_DELIVERY")]
    OnTheWay,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::OnTheWay => "ON_THE_WAY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OnTheWay => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        if value == "OUT_FOR_DELIVERY" {
            return Some(OrderStatus::OnTheWay);
        }
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

// --- Orders ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRef {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSummary {
    pub name: String,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Option<String>,
    pub meal_id: String,
    pub meal: Option<MealSummary>,
    pub quantity: u32,
    #[serde(default)]
    pub price: Decimal,
}

impl OrderItem {
    pub fn meal_name(&self) -> &str {
        self.meal.as_ref().map(|m| m.name.as_str()).unwrap_or("Item")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_id: Option<String>,
    pub customer: Option<CustomerRef>,
    pub provider_id: Option<String>,
    pub provider: Option<ProviderRef>,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub payment_method: String,
    pub total_price: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }

    pub fn items_summary(&self) -> String {
        match self.items.as_slice() {
            [] => "No items".to_string(),
            [only] => format!("{} x{}", only.meal_name(), only.quantity),
            items => format!(
                "{} items ({} total)",
                items.len(),
                items.iter().map(|i| i.quantity).sum::<u32>()
            ),
        }
    }
}

// ---
// Placing an order from the meal page
// ---

fn validate_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Please enter a delivery address".into());
        return Err(err);
    }
    Ok(())
}

fn parse_quantity(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|q| *q >= 1)
}

fn validate_quantity(value: &str) -> Result<(), ValidationError> {
    if parse_quantity(value).is_none() {
        let mut err = ValidationError::new("range");
        err.message = Some("Quantity must be at least 1.".into());
        return Err(err);
    }
    Ok(())
}

/// `quantity` stays text so a blank or garbled value reaches validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceOrderPayload {
    #[validate(custom(function = "validate_address"))]
    #[serde(default)]
    pub delivery_address: String,
    #[validate(custom(function = "validate_quantity"))]
    #[serde(default)]
    pub quantity: String,
}

impl PlaceOrderPayload {
    /// The submitted quantity, never below 1.
    pub fn quantity(&self) -> u32 {
        parse_quantity(&self.quantity).unwrap_or(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub meal_id: String,
    pub quantity: u32,
}

// Body of `POST /api/orders`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub provider_id: String,
    pub delivery_address: String,
    pub payment_method: String,
    pub items: Vec<OrderLine>,
    pub total_price: Decimal,
}

pub const DEFAULT_PAYMENT_METHOD: &str = "COD";

impl OrderData {
    pub fn single_meal(provider_id: &str, meal_id: &str, unit_price: Decimal, payload: &PlaceOrderPayload) -> Self {
        let quantity = payload.quantity();
        Self {
            provider_id: provider_id.to_string(),
            delivery_address: payload.delivery_address.trim().to_string(),
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            items: vec![OrderLine {
                meal_id: meal_id.to_string(),
                quantity,
            }],
            total_price: unit_price * Decimal::from(quantity),
        }
    }
}

// Body of `PATCH /api/orders/{id}`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Decimal>,
}

// Body of `PATCH /api/orders/status/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusForm {
    pub status: String,
    #[serde(default)]
    pub page: Option<String>,
}

// ---
// Quantity editor
// ---

#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub meal_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Local copy of an order's lines while an editor adjusts quantities.
///
/// Quantities never drop below 1. The total is a display estimate; whatever the
/// backend stores after the update is authoritative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    pub lines: Vec<DraftLine>,
}

impl OrderDraft {
    pub fn from_order(order: &Order) -> Self {
        let lines = order
            .items
            .iter()
            .map(|item| DraftLine {
                meal_id: item.meal_id.clone(),
                quantity: item.quantity.max(1),
                unit_price: if item.price > Decimal::ZERO {
                    item.price
                } else {
                    item.meal.as_ref().and_then(|m| m.price).unwrap_or(Decimal::ZERO)
                },
            })
            .collect();
        Self { lines }
    }

    /// Applies `delta` to one line, clamping at 1.
    pub fn adjust(&mut self, meal_id: &str, delta: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.meal_id == meal_id) {
            let next = (i64::from(line.quantity) + delta).max(1);
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    pub fn estimated_total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum()
    }

    pub fn to_update(&self) -> OrderUpdate {
        OrderUpdate {
            items: Some(
                self.lines
                    .iter()
                    .map(|l| OrderLine {
                        meal_id: l.meal_id.clone(),
                        quantity: l.quantity,
                    })
                    .collect(),
            ),
            total_price: Some(self.estimated_total()),
            ..Default::default()
        }
    }

    /// Hidden-field form of the draft: `mealId:quantity:unitPrice` joined by `;`.
    pub fn encode(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}:{}:{}", l.meal_id, l.quantity, l.unit_price))
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let lines = raw
            .split(';')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut fields = part.rsplitn(3, ':');
                let unit_price = fields.next()?.parse().ok()?;
                let quantity: u32 = fields.next()?.parse().ok()?;
                let meal_id = fields.next()?.to_string();
                Some(DraftLine {
                    meal_id,
                    quantity: quantity.max(1),
                    unit_price,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { lines })
    }
}

// Submitted by the +/- buttons of the editor
#[derive(Debug, Clone, Deserialize)]
pub struct QuantityForm {
    pub draft: String,
    pub meal_id: String,
    pub delta: i64,
    #[serde(default)]
    pub page: Option<String>,
}
