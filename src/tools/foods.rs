//! Food lookup MCP tools
//!
//! Query resolution, local table browsing and daily totals.

use serde::Serialize;

use crate::models::{DailyTotals, FoodCategory, FoodRecord, NutritionFact};
use crate::nutrition::{
    foods_by_category, sanitize_multiplier, search_foods, suggest_foods, NutritionResolver,
    Resolution, ResolutionTier,
};

/// Response for resolve_food
#[derive(Debug, Serialize)]
pub struct ResolveFoodResponse {
    pub query: String,
    /// Multiplier actually applied (invalid input becomes 1)
    pub serving_multiplier: f64,
    pub resolved: bool,
    /// None when the placeholder was returned
    pub tier: Option<ResolutionTier>,
    pub fact: NutritionFact,
}

/// Response for search_local_foods / list_foods_by_category / suggest_foods
#[derive(Debug, Serialize)]
pub struct FoodListResponse {
    pub items: Vec<FoodRecord>,
    pub total: usize,
}

impl FoodListResponse {
    fn from_records(records: Vec<&'static FoodRecord>) -> Self {
        let items: Vec<FoodRecord> = records.into_iter().copied().collect();
        let total = items.len();
        Self { items, total }
    }
}

pub async fn resolve_food(
    resolver: &NutritionResolver,
    query: &str,
    serving_multiplier: Option<f64>,
) -> Result<ResolveFoodResponse, String> {
    if query.trim().is_empty() {
        return Err("Query cannot be empty".to_string());
    }
    let serving_multiplier = sanitize_multiplier(serving_multiplier.unwrap_or(1.0));

    let resolution = resolver.resolve(query, serving_multiplier).await;
    let tier = resolution.tier();
    let resolved = matches!(resolution, Resolution::Resolved { .. });

    Ok(ResolveFoodResponse {
        query: query.to_string(),
        serving_multiplier,
        resolved,
        tier,
        fact: resolution.into_fact(),
    })
}

pub fn search_local_foods(term: &str, limit: usize) -> FoodListResponse {
    let mut records = search_foods(term);
    records.truncate(limit.clamp(1, 100));
    FoodListResponse::from_records(records)
}

pub fn list_foods_by_category(category: &str) -> Result<FoodListResponse, String> {
    let category = FoodCategory::from_str(category).ok_or_else(|| {
        format!(
            "Unknown category '{}'. Use one of: fruit, vegetable, protein, grain, nuts, dairy, processed",
            category
        )
    })?;
    Ok(FoodListResponse::from_records(foods_by_category(category)))
}

pub fn suggest_local_foods(count: usize) -> FoodListResponse {
    FoodListResponse::from_records(suggest_foods(count))
}

pub fn sum_daily_totals(entries: &[NutritionFact]) -> DailyTotals {
    DailyTotals::from_facts(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FactSource;

    #[tokio::test]
    async fn test_resolve_food_reports_tier() {
        let resolver = NutritionResolver::local_only();
        let response = resolve_food(&resolver, "2 eggs", Some(1.0)).await.unwrap();
        assert_eq!(response.query, "2 eggs");
        assert!(response.resolved);
        assert_eq!(response.tier, Some(ResolutionTier::LocalTable));
        assert_eq!(response.fact.name, "Eggs");
    }

    #[tokio::test]
    async fn test_resolve_food_rejects_empty_query() {
        let resolver = NutritionResolver::local_only();
        assert!(resolve_food(&resolver, "   ", None).await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_food_placeholder() {
        let resolver = NutritionResolver::local_only();
        let response = resolve_food(&resolver, "mystery stew", None).await.unwrap();
        assert!(!response.resolved);
        assert_eq!(response.tier, None);
        assert_eq!(response.fact.source, FactSource::LocalUnknown);
    }

    #[tokio::test]
    async fn test_resolve_food_keeps_query_and_reports_applied_multiplier() {
        let resolver = NutritionResolver::local_only();
        let response = resolve_food(&resolver, "  mystery stew ", Some(-2.0)).await.unwrap();
        assert_eq!(response.query, "  mystery stew ");
        assert_eq!(response.fact.name, "  mystery stew ");
        assert_eq!(response.serving_multiplier, 1.0);

        let response = resolve_food(&resolver, "salmon", Some(f64::NAN)).await.unwrap();
        assert_eq!(response.serving_multiplier, 1.0);
        assert_eq!(response.fact.calories, 208.0);
    }

    #[test]
    fn test_search_limit() {
        let response = search_local_foods("e", 3);
        assert_eq!(response.total, 3);
        assert_eq!(response.items.len(), 3);
    }

    #[test]
    fn test_list_by_unknown_category() {
        assert!(list_foods_by_category("candy").is_err());
        assert_eq!(list_foods_by_category("Dairy").unwrap().total, 2);
    }

    #[test]
    fn test_sum_daily_totals() {
        let apple = crate::nutrition::find_by_key("apple").unwrap().to_fact();
        let totals = sum_daily_totals(&[apple.clone(), apple]);
        assert_eq!(totals.entries, 2);
        assert_eq!(totals.totals.calories, 190.0);
    }
}
