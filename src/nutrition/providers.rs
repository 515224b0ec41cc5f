//! Remote nutrition providers
//!
//! One HTTP client per configured provider. Each provider has its own wire
//! contract; all of them map to a per-serving `NutritionFact`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use super::serving::{parse_serving_grams, per_100g_to_serving};
use crate::config::{Credentials, ProviderKind, ResolverConfig};
use crate::models::{FactSource, Nutrition, NutritionFact, DEFAULT_SERVING};

/// Errors that can occur when calling a remote provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} is selected but its credentials are missing")]
    NotConfigured(ProviderKind),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned status {0}")]
    Status(u16),

    #[error("Provider returned no results")]
    NoResults,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Request(err)
        }
    }
}

/// A remote source of nutrition facts (tier 1 of the resolver)
#[async_trait]
pub trait RemoteSource: Send + Sync {
    fn provider(&self) -> ProviderKind;

    async fn lookup(&self, query: &str) -> Result<NutritionFact, ProviderError>;
}

/// HTTP client for the configured provider
pub struct ProviderClient {
    kind: ProviderKind,
    endpoint: String,
    credentials: Credentials,
    http: Client,
}

impl ProviderClient {
    /// Build a client for the active provider in `config`
    ///
    /// Returns `Ok(None)` when no provider is selected.
    pub fn from_config(config: &ResolverConfig) -> Result<Option<Self>, ProviderError> {
        let Some(kind) = config.provider else {
            return Ok(None);
        };

        let (endpoint, credentials) = match kind {
            ProviderKind::OpenFoodFacts => {
                (config.endpoints.openfoodfacts.clone(), Credentials::default())
            }
            ProviderKind::Edamam => (config.endpoints.edamam.clone(), config.edamam.clone()),
            ProviderKind::Nutritionix => {
                (config.endpoints.nutritionix.clone(), config.nutritionix.clone())
            }
        };

        if kind != ProviderKind::OpenFoodFacts && !credentials.is_complete() {
            return Err(ProviderError::NotConfigured(kind));
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Some(Self {
            kind,
            endpoint,
            credentials,
            http,
        }))
    }

    async fn get_json(&self, request: reqwest::RequestBuilder) -> Result<Value, ProviderError> {
        let response = request.send().await.map_err(ProviderError::from_send)?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::InvalidResponse(e.to_string())
            }
        })
    }

    async fn search_openfoodfacts(&self, query: &str) -> Result<NutritionFact, ProviderError> {
        let url = format!("{}/cgi/search.pl", self.endpoint.trim_end_matches('/'));
        tracing::debug!("Searching OpenFoodFacts: {}", query);

        let request = self.http.get(&url).query(&[
            ("search_terms", query),
            ("search_simple", "1"),
            ("json", "1"),
            ("page_size", "1"),
        ]);
        let json = self.get_json(request).await?;

        let response: OffSearchResponse = decode(json)?;
        let product = response.products.into_iter().next().ok_or(ProviderError::NoResults)?;
        Ok(map_openfoodfacts_product(query, product))
    }

    async fn analyze_edamam(&self, query: &str) -> Result<NutritionFact, ProviderError> {
        tracing::debug!("Analyzing with Edamam: {}", query);

        let request = self.http.get(&self.endpoint).query(&[
            ("app_id", self.credentials.app_id.as_str()),
            ("app_key", self.credentials.app_key.as_str()),
            ("ingr", query),
        ]);
        let json = self.get_json(request).await?;

        let response: EdamamResponse = decode(json)?;
        map_edamam_response(query, response)
    }

    async fn natural_nutritionix(&self, query: &str) -> Result<NutritionFact, ProviderError> {
        tracing::debug!("Querying Nutritionix: {}", query);

        let request = self
            .http
            .post(&self.endpoint)
            .header("x-app-id", &self.credentials.app_id)
            .header("x-app-key", &self.credentials.app_key)
            .json(&serde_json::json!({ "query": query }));
        let json = self.get_json(request).await?;

        let response: NutritionixResponse = decode(json)?;
        let food = response.foods.into_iter().next().ok_or(ProviderError::NoResults)?;
        Ok(map_nutritionix_food(query, food))
    }
}

#[async_trait]
impl RemoteSource for ProviderClient {
    fn provider(&self) -> ProviderKind {
        self.kind
    }

    async fn lookup(&self, query: &str) -> Result<NutritionFact, ProviderError> {
        match self.kind {
            ProviderKind::OpenFoodFacts => self.search_openfoodfacts(query).await,
            ProviderKind::Edamam => self.analyze_edamam(query).await,
            ProviderKind::Nutritionix => self.natural_nutritionix(query).await,
        }
    }
}

fn decode<T: for<'de> Deserialize<'de>>(json: Value) -> Result<T, ProviderError> {
    serde_json::from_value(json).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

/// Accept numbers, numeric strings or null
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn non_negative(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// ============================================================================
// OpenFoodFacts
// ============================================================================

#[derive(Debug, Deserialize)]
struct OffSearchResponse {
    #[serde(default)]
    products: Vec<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    product_name: Option<String>,
    serving_size: Option<String>,
    #[serde(default)]
    nutriments: OffNutriments,
}

#[derive(Debug, Default, Deserialize)]
struct OffNutriments {
    #[serde(rename = "energy-kcal_serving", default, deserialize_with = "lenient_f64")]
    kcal_serving: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    carbohydrates_serving: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    proteins_serving: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    fat_serving: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    fiber_serving: Option<f64>,
    #[serde(rename = "energy-kcal_100g", default, deserialize_with = "lenient_f64")]
    kcal_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    carbohydrates_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    proteins_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    fat_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    fiber_100g: Option<f64>,
}

impl OffNutriments {
    fn has_serving_values(&self) -> bool {
        self.kcal_serving.is_some()
            || self.carbohydrates_serving.is_some()
            || self.proteins_serving.is_some()
            || self.fat_serving.is_some()
    }
}

fn map_openfoodfacts_product(query: &str, product: OffProduct) -> NutritionFact {
    let n = &product.nutriments;
    let name = non_empty(product.product_name).unwrap_or_else(|| query.to_string());
    let serving_size = non_empty(product.serving_size);

    if n.has_serving_values() {
        return NutritionFact {
            name,
            calories: non_negative(n.kcal_serving),
            carbs: non_negative(n.carbohydrates_serving),
            protein: non_negative(n.proteins_serving),
            fat: non_negative(n.fat_serving),
            fiber: non_negative(n.fiber_serving),
            serving: serving_size.unwrap_or_else(|| DEFAULT_SERVING.to_string()),
            source: FactSource::OpenFoodFacts,
        };
    }

    let per_100g = Nutrition {
        calories: non_negative(n.kcal_100g),
        protein: non_negative(n.proteins_100g),
        carbs: non_negative(n.carbohydrates_100g),
        fat: non_negative(n.fat_100g),
        fiber: non_negative(n.fiber_100g),
    };
    let grams = parse_serving_grams(serving_size.as_deref());
    let serving = per_100g_to_serving(&per_100g, grams);

    NutritionFact {
        name,
        calories: serving.calories,
        carbs: serving.carbs,
        protein: serving.protein,
        fat: serving.fat,
        fiber: serving.fiber,
        serving: serving_size.unwrap_or_else(|| format!("{} g", grams)),
        source: FactSource::OpenFoodFacts,
    }
}

// ============================================================================
// Edamam
// ============================================================================

#[derive(Debug, Deserialize)]
struct EdamamResponse {
    #[serde(default, deserialize_with = "lenient_f64")]
    calories: Option<f64>,
    #[serde(rename = "totalNutrients", default)]
    total_nutrients: std::collections::HashMap<String, EdamamNutrient>,
}

#[derive(Debug, Deserialize)]
struct EdamamNutrient {
    #[serde(default, deserialize_with = "lenient_f64")]
    quantity: Option<f64>,
}

fn map_edamam_response(query: &str, response: EdamamResponse) -> Result<NutritionFact, ProviderError> {
    if response.calories.is_none() && response.total_nutrients.is_empty() {
        return Err(ProviderError::NoResults);
    }

    let nutrient = |code: &str| {
        non_negative(response.total_nutrients.get(code).and_then(|n| n.quantity))
    };

    Ok(NutritionFact {
        name: query.to_string(),
        calories: non_negative(response.calories),
        carbs: nutrient("CHOCDF"),
        protein: nutrient("PROCNT"),
        fat: nutrient("FAT"),
        fiber: nutrient("FIBTG"),
        serving: DEFAULT_SERVING.to_string(),
        source: FactSource::Edamam,
    })
}

// ============================================================================
// Nutritionix
// ============================================================================

#[derive(Debug, Deserialize)]
struct NutritionixResponse {
    #[serde(default)]
    foods: Vec<NutritionixFood>,
}

#[derive(Debug, Deserialize)]
struct NutritionixFood {
    food_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    nf_calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    nf_total_carbohydrate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    nf_protein: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    nf_total_fat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    nf_dietary_fiber: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    serving_qty: Option<f64>,
    serving_unit: Option<String>,
}

fn map_nutritionix_food(query: &str, food: NutritionixFood) -> NutritionFact {
    let serving = match (food.serving_qty.filter(|q| *q != 0.0), non_empty(food.serving_unit)) {
        (Some(qty), Some(unit)) => format!("{} {}", qty, unit),
        _ => DEFAULT_SERVING.to_string(),
    };

    NutritionFact {
        name: non_empty(food.food_name).unwrap_or_else(|| query.to_string()),
        calories: non_negative(food.nf_calories),
        carbs: non_negative(food.nf_total_carbohydrate),
        protein: non_negative(food.nf_protein),
        fat: non_negative(food.nf_total_fat),
        fiber: non_negative(food.nf_dietary_fiber),
        serving,
        source: FactSource::Nutritionix,
    }
}
