//! Goal calculator result types

use serde::{Deserialize, Serialize};

/// Daily calorie and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroGoals {
    pub calories: u32,
    pub protein: u32, // grams
    pub carbs: u32,   // grams
    pub fat: u32,     // grams
}

/// BMI band with its display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BmiCategory {
    pub category: &'static str,
    pub color: &'static str,
}

/// Devine ideal weight with a +/-10% band, kilograms
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdealWeightRange {
    pub min: f64,
    pub max: f64,
    pub ideal: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaterIntake {
    pub ml: f64,
    pub liters: f64,
    pub cups: f64,
}

/// Fraction of calories from each macro
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroDistribution {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Excellent,
    Good,
    Maintaining,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyProgress {
    pub weight_change: f64,
    pub weekly_change: f64,
    pub status: ProgressStatus,
    pub message: &'static str,
}
