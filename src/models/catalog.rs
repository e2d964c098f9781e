// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::review::Review;

// --- Categories ---
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: Option<String>,
    pub name: String,
}

// --- Meals ---
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRef {
    pub id: Option<String>,
    pub restaurant_name: Option<String>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub image: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
    pub category_id: Option<String>,
    pub category: Option<CategoryRef>,
    pub provider_id: Option<String>,
    pub provider: Option<ProviderRef>,
    pub total_reviews: Option<u32>,
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Meal {
    /// Restaurant that fulfils orders for this meal.
    pub fn owning_provider_id(&self) -> Option<&str> {
        self.provider
            .as_ref()
            .and_then(|p| p.id.as_deref())
            .or(self.provider_id.as_deref())
    }

    /// Image to show; the backend seeds placeholder values like `"string"`.
    pub fn image_url(&self) -> &str {
        match self.image.as_deref() {
            Some(url) if url.starts_with("http") => url,
            _ => FALLBACK_IMAGE,
        }
    }
}

pub const FALLBACK_IMAGE: &str = "https://images.unsplash.com/photo-1546069901-ba9599a7e63c";

// --- Providers ---
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub user_id: Option<String>,
    pub restaurant_name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub is_open: bool,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl Provider {
    pub fn display_name(&self) -> &str {
        self.restaurant_name.as_deref().unwrap_or("Unnamed restaurant")
    }
}

// ---
// Forms and request bodies
// ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryPayload {
    #[validate(length(min = 2, message = "Category name must be at least 2 characters."))]
    pub name: String,
}

// Body of `POST|PATCH /api/categories`
#[derive(Debug, Clone, Serialize)]
pub struct CategoryData {
    pub name: String,
}

impl From<&CategoryPayload> for CategoryData {
    fn from(payload: &CategoryPayload) -> Self {
        Self {
            name: payload.name.trim().to_string(),
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn validate_price(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<Decimal>() {
        Ok(price) if price > Decimal::ZERO => Ok(()),
        _ => {
            let mut err = ValidationError::new("range");
            err.message = Some("Please enter a valid price.".into());
            Err(err)
        }
    }
}

/// Meal dialog form. `is_available` is an HTML checkbox: present when ticked.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MealPayload {
    #[validate(custom(function = "validate_not_blank", message = "Please enter a meal name."))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank", message = "Please enter a description."))]
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    pub price: String,
    #[validate(custom(function = "validate_not_blank", message = "Please select a category."))]
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub image: String,
    pub is_available: Option<String>,
}

// Body of `POST|PATCH /api/meals`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealData {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub is_available: bool,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MealPayload {
    /// Only meaningful after `validate()` passed.
    pub fn to_data(&self) -> MealData {
        let image = self.image.trim();
        MealData {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price.trim().parse().unwrap_or(Decimal::ZERO),
            is_available: self.is_available.is_some(),
            category_id: self.category_id.trim().to_string(),
            image: (!image.is_empty()).then(|| image.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProviderPayload {
    #[validate(length(min = 2, message = "Restaurant name must be at least 2 characters."))]
    pub restaurant_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    pub is_open: Option<String>,
}

// Body of `POST|PATCH /api/providers`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderData {
    pub restaurant_name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub is_open: bool,
}

impl From<&ProviderPayload> for ProviderData {
    fn from(payload: &ProviderPayload) -> Self {
        Self {
            restaurant_name: payload.restaurant_name.trim().to_string(),
            description: payload.description.trim().to_string(),
            address: payload.address.trim().to_string(),
            phone: payload.phone.trim().to_string(),
            is_open: payload.is_open.is_some(),
        }
    }
}

// Query of the public and admin provider listings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFilter {
    pub search: Option<String>,
    pub is_open: Option<String>,
    pub page: Option<String>,
}

impl ProviderFilter {
    pub fn is_open(&self) -> Option<bool> {
        match self.is_open.as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }
}
