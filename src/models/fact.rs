//! Nutrition fact model
//!
//! The result of resolving a free-text food query.

use serde::{Deserialize, Serialize};

use super::Nutrition;

/// Where a nutrition fact came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactSource {
    #[serde(rename = "openfoodfacts")]
    OpenFoodFacts,
    #[serde(rename = "edamam")]
    Edamam,
    #[serde(rename = "nutritionix")]
    Nutritionix,
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "local-unknown")]
    LocalUnknown,
}

impl FactSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactSource::OpenFoodFacts => "openfoodfacts",
            FactSource::Edamam => "edamam",
            FactSource::Nutritionix => "nutritionix",
            FactSource::Local => "local",
            FactSource::LocalUnknown => "local-unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "openfoodfacts" => Some(FactSource::OpenFoodFacts),
            "edamam" => Some(FactSource::Edamam),
            "nutritionix" => Some(FactSource::Nutritionix),
            "local" => Some(FactSource::Local),
            "local-unknown" => Some(FactSource::LocalUnknown),
            _ => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            FactSource::OpenFoodFacts | FactSource::Edamam | FactSource::Nutritionix
        )
    }
}

impl std::fmt::Display for FactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calories and macros for a named food portion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFact {
    pub name: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    pub serving: String,
    pub source: FactSource,
}

pub const DEFAULT_SERVING: &str = "1 serving";

impl NutritionFact {
    /// Zero-valued fact for a query nothing could resolve
    pub fn placeholder(query: &str) -> Self {
        Self {
            name: query.to_string(),
            calories: 0.0,
            carbs: 0.0,
            protein: 0.0,
            fat: 0.0,
            fiber: 0.0,
            serving: DEFAULT_SERVING.to_string(),
            source: FactSource::LocalUnknown,
        }
    }

    pub fn nutrition(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
        }
    }

    fn with_nutrition(mut self, n: Nutrition) -> Self {
        self.calories = n.calories;
        self.protein = n.protein;
        self.carbs = n.carbs;
        self.fat = n.fat;
        self.fiber = n.fiber;
        self
    }

    /// Apply a serving multiplier (whole kcal, macros to one decimal)
    pub fn for_serving(self, multiplier: f64) -> Self {
        let scaled = self.nutrition().scale_for_serving(multiplier);
        self.with_nutrition(scaled)
    }
}

/// Summed macros over a set of logged facts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    pub entries: usize,
    #[serde(flatten)]
    pub totals: Nutrition,
}

impl DailyTotals {
    pub fn from_facts<'a, I>(facts: I) -> Self
    where
        I: IntoIterator<Item = &'a NutritionFact>,
    {
        let mut entries = 0;
        let totals: Nutrition = facts
            .into_iter()
            .inspect(|_| entries += 1)
            .map(NutritionFact::nutrition)
            .sum();
        Self { entries, totals }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(calories: f64, carbs: f64, protein: f64, fat: f64) -> NutritionFact {
        NutritionFact {
            name: "Test".into(),
            calories,
            carbs,
            protein,
            fat,
            fiber: 1.0,
            serving: "100g".into(),
            source: FactSource::Local,
        }
    }

    #[test]
    fn test_source_serializes_to_tag() {
        let json = serde_json::to_string(&FactSource::LocalUnknown).unwrap();
        assert_eq!(json, "\"local-unknown\"");
        let parsed: FactSource = serde_json::from_str("\"openfoodfacts\"").unwrap();
        assert_eq!(parsed, FactSource::OpenFoodFacts);
        assert!(parsed.is_remote());
        assert!(!FactSource::Local.is_remote());
        assert_eq!(FactSource::from_str(" Edamam "), Some(FactSource::Edamam));
        assert_eq!(FactSource::from_str("usda"), None);
    }

    #[test]
    fn test_placeholder_keeps_query() {
        let p = NutritionFact::placeholder("zzz_nonexistent_food");
        assert_eq!(p.name, "zzz_nonexistent_food");
        assert_eq!(p.calories, 0.0);
        assert_eq!(p.serving, "1 serving");
        assert_eq!(p.source, FactSource::LocalUnknown);
    }

    #[test]
    fn test_for_serving_keeps_identity_fields() {
        let scaled = fact(165.0, 0.0, 31.0, 3.6).for_serving(2.0);
        assert_eq!(scaled.name, "Test");
        assert_eq!(scaled.serving, "100g");
        assert_eq!(scaled.calories, 330.0);
        assert_eq!(scaled.protein, 62.0);
        assert_eq!(scaled.fat, 7.2);
        assert_eq!(scaled.fiber, 2.0);
    }

    #[test]
    fn test_daily_totals() {
        let facts = vec![fact(100.0, 10.0, 5.0, 2.0), fact(250.0, 20.0, 15.0, 8.0)];
        let totals = DailyTotals::from_facts(&facts);
        assert_eq!(totals.entries, 2);
        assert_eq!(totals.totals.calories, 350.0);
        assert_eq!(totals.totals.carbs, 30.0);
        assert_eq!(totals.totals.protein, 20.0);
        assert_eq!(totals.totals.fat, 10.0);

        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["calories"], 350.0);
        assert_eq!(json["entries"], 2);
    }

    #[test]
    fn test_daily_totals_empty() {
        let totals = DailyTotals::from_facts(Vec::<NutritionFact>::new().iter());
        assert_eq!(totals, DailyTotals::default());
    }
}
