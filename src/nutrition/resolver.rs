//! Nutrition resolver
//!
//! Turns a free-text food query into a `NutritionFact` through an ordered
//! fallback chain: remote provider, then the local food table, then a
//! zero-valued placeholder. Resolution never fails; callers inspect the
//! returned `Resolution` to see which tier answered.

use serde::Serialize;

use super::food_table::{match_query, FOOD_TABLE};
use super::providers::{ProviderClient, ProviderError, RemoteSource};
use crate::config::{ProviderKind, ResolverConfig};
use crate::models::{FoodRecord, NutritionFact};

/// Tier of the fallback chain that produced a fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", content = "provider", rename_all = "snake_case")]
pub enum ResolutionTier {
    Remote(ProviderKind),
    LocalTable,
}

/// Outcome of resolving a query
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Real data, scaled by the serving multiplier
    Resolved {
        tier: ResolutionTier,
        fact: NutritionFact,
    },
    /// Nothing matched; the placeholder fact carries the query as given
    Unresolved { fact: NutritionFact },
}

impl Resolution {
    pub fn fact(&self) -> &NutritionFact {
        match self {
            Resolution::Resolved { fact, .. } | Resolution::Unresolved { fact } => fact,
        }
    }

    pub fn into_fact(self) -> NutritionFact {
        match self {
            Resolution::Resolved { fact, .. } | Resolution::Unresolved { fact } => fact,
        }
    }

    pub fn tier(&self) -> Option<ResolutionTier> {
        match self {
            Resolution::Resolved { tier, .. } => Some(*tier),
            Resolution::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }
}

/// Resolves food queries against a remote provider and the local table
pub struct NutritionResolver {
    remote: Option<Box<dyn RemoteSource>>,
    table: &'static [FoodRecord],
}

impl NutritionResolver {
    /// Build a resolver from configuration
    ///
    /// A keyed provider without credentials leaves the remote tier disabled.
    pub fn new(config: &ResolverConfig) -> Result<Self, ProviderError> {
        let remote = match ProviderClient::from_config(config) {
            Ok(client) => client.map(|c| Box::new(c) as Box<dyn RemoteSource>),
            Err(ProviderError::NotConfigured(kind)) => {
                tracing::warn!(
                    "Nutrition provider '{}' has no credentials; using local food table only",
                    kind
                );
                None
            }
            Err(e) => return Err(e),
        };

        match &remote {
            Some(r) => tracing::info!("Nutrition resolver using remote provider '{}'", r.provider()),
            None => tracing::info!("Nutrition resolver running without a remote provider"),
        }

        Ok(Self {
            remote,
            table: FOOD_TABLE,
        })
    }

    /// Resolver that never leaves the process
    pub fn local_only() -> Self {
        Self {
            remote: None,
            table: FOOD_TABLE,
        }
    }

    /// Resolver with an explicit remote source
    pub fn with_remote(remote: Box<dyn RemoteSource>) -> Self {
        Self {
            remote: Some(remote),
            table: FOOD_TABLE,
        }
    }

    /// Replace the local table (first match in slice order wins)
    pub fn with_table(mut self, table: &'static [FoodRecord]) -> Self {
        self.table = table;
        self
    }

    pub fn remote_provider(&self) -> Option<ProviderKind> {
        self.remote.as_ref().map(|r| r.provider())
    }

    /// Resolve `query` and scale the result by `serving_multiplier`
    ///
    /// At most one remote request is made. Provider failures are logged and
    /// the chain moves on to the local table.
    pub async fn resolve(&self, query: &str, serving_multiplier: f64) -> Resolution {
        let multiplier = sanitize_multiplier(serving_multiplier);

        if let Some(remote) = &self.remote {
            match remote.lookup(query).await {
                Ok(fact) => {
                    tracing::debug!("Resolved '{}' via {}", query, remote.provider());
                    return Resolution::Resolved {
                        tier: ResolutionTier::Remote(remote.provider()),
                        fact: fact.for_serving(multiplier),
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        "Nutrition API ({}) failed for '{}', falling back to local table: {}",
                        remote.provider(),
                        query,
                        e
                    );
                }
            }
        }

        if let Some(record) = match_query(self.table, query) {
            tracing::debug!("Resolved '{}' from local table entry '{}'", query, record.key);
            return Resolution::Resolved {
                tier: ResolutionTier::LocalTable,
                fact: record.to_fact().for_serving(multiplier),
            };
        }

        tracing::debug!("No nutrition data for '{}'", query);
        Resolution::Unresolved {
            fact: NutritionFact::placeholder(query),
        }
    }
}

/// Negative or non-finite multipliers fall back to one serving
pub fn sanitize_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_finite() && multiplier >= 0.0 {
        multiplier
    } else {
        tracing::warn!("Invalid serving multiplier {}, using 1", multiplier);
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FactSource, FoodCategory};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Remote source returning a canned result and counting calls
    struct FakeRemote {
        kind: ProviderKind,
        result: Option<NutritionFact>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RemoteSource for FakeRemote {
        fn provider(&self) -> ProviderKind {
            self.kind
        }

        async fn lookup(&self, _query: &str) -> Result<NutritionFact, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().ok_or(ProviderError::Status(503))
        }
    }

    fn remote_fact() -> NutritionFact {
        NutritionFact {
            name: "apple".into(),
            calories: 94.6,
            carbs: 25.13,
            protein: 0.47,
            fat: 0.31,
            fiber: 4.4,
            serving: "1 medium".into(),
            source: FactSource::Nutritionix,
        }
    }

    fn fake(result: Option<NutritionFact>) -> (NutritionResolver, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let remote = FakeRemote {
            kind: ProviderKind::Nutritionix,
            result,
            calls: calls.clone(),
        };
        (NutritionResolver::with_remote(Box::new(remote)), calls)
    }

    #[tokio::test]
    async fn test_local_match_scaled_by_multiplier() {
        let resolver = NutritionResolver::local_only();
        let resolution = resolver.resolve("1 medium apple", 2.0).await;

        assert_eq!(resolution.tier(), Some(ResolutionTier::LocalTable));
        let fact = resolution.fact();
        assert_eq!(fact.name, "Apple");
        assert_eq!(fact.calories, 190.0);
        assert_eq!(fact.carbs, 50.0);
        assert_eq!(fact.protein, 1.0);
        assert_eq!(fact.fiber, 8.0);
        assert_eq!(fact.source, FactSource::Local);
    }

    #[tokio::test]
    async fn test_unmatched_query_returns_unscaled_placeholder() {
        let resolver = NutritionResolver::local_only();
        let resolution = resolver.resolve("zzz_nonexistent_food", 3.0).await;

        assert!(!resolution.is_resolved());
        let fact = resolution.into_fact();
        assert_eq!(fact.name, "zzz_nonexistent_food");
        assert_eq!(fact.calories, 0.0);
        assert_eq!(fact.source, FactSource::LocalUnknown);
    }

    #[tokio::test]
    async fn test_remote_result_wins_and_is_scaled() {
        let (resolver, calls) = fake(Some(remote_fact()));
        let resolution = resolver.resolve("1 medium apple", 2.0).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            resolution.tier(),
            Some(ResolutionTier::Remote(ProviderKind::Nutritionix))
        );
        let fact = resolution.fact();
        assert_eq!(fact.calories, 189.0); // 189.2
        assert_eq!(fact.carbs, 50.3); // 50.26
        assert_eq!(fact.protein, 0.9); // 0.94
        assert_eq!(fact.source, FactSource::Nutritionix);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_once() {
        let (resolver, calls) = fake(None);
        let resolution = resolver.resolve("grilled chicken breast", 1.0).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolution.tier(), Some(ResolutionTier::LocalTable));
        assert_eq!(resolution.fact().name, "Chicken Breast");
    }

    #[tokio::test]
    async fn test_remote_failure_then_placeholder() {
        let (resolver, calls) = fake(None);
        let resolution = resolver.resolve("dragon fruit smoothie", 1.0).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(resolution, Resolution::Unresolved { .. }));
    }

    #[tokio::test]
    async fn test_unconfigured_keyed_provider_is_skipped() {
        let resolver = NutritionResolver::new(&ResolverConfig::default()).unwrap();
        assert_eq!(resolver.remote_provider(), None);

        let resolution = resolver.resolve("banana", 1.0).await;
        assert_eq!(resolution.tier(), Some(ResolutionTier::LocalTable));
        assert_eq!(resolution.fact().calories, 105.0);
    }

    #[tokio::test]
    async fn test_invalid_multiplier_uses_one_serving() {
        let resolver = NutritionResolver::local_only();
        let fact = resolver.resolve("salmon", -2.0).await.into_fact();
        assert_eq!(fact.calories, 208.0);

        let fact = resolver.resolve("salmon", f64::NAN).await.into_fact();
        assert_eq!(fact.calories, 208.0);

        let fact = resolver.resolve("salmon", 0.0).await.into_fact();
        assert_eq!(fact.calories, 0.0);
    }

    #[tokio::test]
    async fn test_custom_table_order() {
        static TABLE: &[FoodRecord] = &[
            FoodRecord {
                key: "peanut_butter",
                name: "Peanut Butter",
                calories: 190.0,
                carbs: 7.0,
                protein: 7.0,
                fat: 16.0,
                fiber: 2.0,
                serving: "2 tbsp (32g)",
                category: FoodCategory::Nuts,
            },
            FoodRecord {
                key: "butter",
                name: "Butter",
                calories: 102.0,
                carbs: 0.0,
                protein: 0.1,
                fat: 11.5,
                fiber: 0.0,
                serving: "1 tbsp (14g)",
                category: FoodCategory::Dairy,
            },
        ];

        let resolver = NutritionResolver::local_only().with_table(TABLE);
        let fact = resolver.resolve("Peanut Butter toast", 1.0).await.into_fact();
        assert_eq!(fact.name, "Peanut Butter");
    }

    #[test]
    fn test_tier_serialization() {
        let json = serde_json::to_value(ResolutionTier::Remote(ProviderKind::Edamam)).unwrap();
        assert_eq!(json, serde_json::json!({ "tier": "remote", "provider": "edamam" }));
        let json = serde_json::to_value(ResolutionTier::LocalTable).unwrap();
        assert_eq!(json, serde_json::json!({ "tier": "local_table" }));
    }

    #[tokio::test]
    async fn test_provider_timeout_falls_back_to_table() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let mut config = ResolverConfig::offline();
        config.provider = Some(ProviderKind::OpenFoodFacts);
        config.endpoints.openfoodfacts = format!("http://{}", addr);
        config.timeout = std::time::Duration::from_secs(1);

        let resolver = NutritionResolver::new(&config).unwrap();
        assert_eq!(resolver.remote_provider(), Some(ProviderKind::OpenFoodFacts));

        let resolution = resolver.resolve("1 medium apple", 1.0).await;
        assert_eq!(resolution.tier(), Some(ResolutionTier::LocalTable));
        assert_eq!(resolution.fact().name, "Apple");
    }
}
