//! Nutrition resolution module
//!
//! Remote provider lookups, the local food table and serving-size scaling.

pub mod food_table;
pub mod providers;
pub mod resolver;
pub mod serving;

pub use food_table::{find_by_key, foods_by_category, search_foods, suggest_foods, FOOD_TABLE};
pub use providers::{ProviderClient, ProviderError, RemoteSource};
pub use resolver::{sanitize_multiplier, NutritionResolver, Resolution, ResolutionTier};
pub use serving::{parse_serving_grams, per_100g_to_serving, DEFAULT_SERVING_GRAMS};
