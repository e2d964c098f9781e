pub mod auth;
pub use auth::AuthService;
pub mod category_service;
pub use category_service::CategoryService;
pub mod meal_service;
pub use meal_service::{MealParams, MealService};
pub mod order_service;
pub use order_service::{OrderParams, OrderService};
pub mod provider_service;
pub use provider_service::{ProviderParams, ProviderService};
pub mod review_service;
pub use review_service::ReviewService;
pub mod user_service;
pub use user_service::UserService;
