//! Local food table record
//!
//! Static per-serving reference data compiled into the binary.

use serde::Serialize;

use super::{FactSource, Nutrition, NutritionFact};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Fruit,
    Vegetable,
    Protein,
    Grain,
    Nuts,
    Dairy,
    Processed,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Fruit => "fruit",
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Protein => "protein",
            FoodCategory::Grain => "grain",
            FoodCategory::Nuts => "nuts",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Processed => "processed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fruit" => Some(FoodCategory::Fruit),
            "vegetable" => Some(FoodCategory::Vegetable),
            "protein" => Some(FoodCategory::Protein),
            "grain" => Some(FoodCategory::Grain),
            "nuts" => Some(FoodCategory::Nuts),
            "dairy" => Some(FoodCategory::Dairy),
            "processed" => Some(FoodCategory::Processed),
            _ => None,
        }
    }
}

/// One entry of the local food table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoodRecord {
    /// Lookup key, words joined by underscores (e.g. "chicken_breast")
    pub key: &'static str,
    pub name: &'static str,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub serving: &'static str,
    pub category: FoodCategory,
}

impl FoodRecord {
    /// Key with underscores turned into spaces, as matched against queries
    pub fn search_phrase(&self) -> String {
        self.key.replace('_', " ")
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

    pub fn to_fact(&self) -> NutritionFact {
        NutritionFact {
            name: self.name.to_string(),
            calories: self.calories,
            carbs: self.carbs,
            protein: self.protein,
            fat: self.fat,
            fiber: self.fiber,
            serving: self.serving.to_string(),
            source: FactSource::Local,
        }
    }
}
