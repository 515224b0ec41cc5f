//! Goal calculator MCP tools
//!
//! String-typed tool inputs are parsed here; the formulas live in `goals`.

use serde::Serialize;

use crate::goals::{self, ProfileMetrics};
use crate::models::{
    ActivityLevel, BmiCategory, Gender, Goal, IdealWeightRange, MacroDistribution, MacroGoals,
    UserProfile, WaterIntake, WeeklyProgress,
};

#[derive(Debug, Serialize)]
pub struct BmrResponse {
    pub bmr: f64,
    pub gender: Gender,
}

#[derive(Debug, Serialize)]
pub struct TdeeResponse {
    pub tdee: f64,
    /// None when the requested level was not recognized
    pub activity_level: Option<ActivityLevel>,
    pub factor: f64,
}

#[derive(Debug, Serialize)]
pub struct MacroGoalsResponse {
    pub goal: Goal,
    #[serde(flatten)]
    pub goals: MacroGoals,
}

#[derive(Debug, Serialize)]
pub struct BmiResponse {
    pub bmi: f64,
    #[serde(flatten)]
    pub category: BmiCategory,
}

#[derive(Debug, Serialize)]
pub struct MacroDistributionResponse {
    pub goal: Goal,
    #[serde(flatten)]
    pub distribution: MacroDistribution,
}

/// Parse an optional activity level; unknown names map to None
fn parse_activity(level: Option<&str>) -> Option<ActivityLevel> {
    level.and_then(ActivityLevel::from_str)
}

pub fn profile_metrics(
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    gender: &str,
    activity_level: Option<&str>,
    goal: Option<&str>,
) -> Result<ProfileMetrics, String> {
    let profile = UserProfile {
        weight_kg,
        height_cm,
        age_years,
        gender: Gender::from_str(gender),
        activity_level: parse_activity(activity_level),
        goal: goal.map(Goal::from_str).unwrap_or_default(),
    };
    goals::profile_metrics(&profile).map_err(|e| format!("Invalid profile: {}", e))
}

pub fn bmr(weight_kg: f64, height_cm: f64, age_years: f64, gender: &str) -> BmrResponse {
    let gender = Gender::from_str(gender);
    BmrResponse {
        bmr: goals::calculate_bmr(weight_kg, height_cm, age_years, gender),
        gender,
    }
}

pub fn tdee(bmr: f64, activity_level: Option<&str>) -> TdeeResponse {
    let level = parse_activity(activity_level);
    TdeeResponse {
        tdee: goals::calculate_tdee(bmr, level),
        activity_level: level,
        factor: goals::calculate_tdee(1.0, level),
    }
}

pub fn macro_goals(
    tdee: f64,
    goal: Option<&str>,
    protein_ratio: Option<f64>,
    fat_ratio: Option<f64>,
) -> Result<MacroGoalsResponse, String> {
    let protein_ratio = protein_ratio.unwrap_or(goals::DEFAULT_PROTEIN_RATIO);
    let fat_ratio = fat_ratio.unwrap_or(goals::DEFAULT_FAT_RATIO);
    for (name, ratio) in [("protein_ratio", protein_ratio), ("fat_ratio", fat_ratio)] {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(format!("{} must be between 0 and 1, got {}", name, ratio));
        }
    }
    if protein_ratio + fat_ratio > 1.0 {
        return Err("protein_ratio + fat_ratio cannot exceed 1".to_string());
    }

    let goal = goal.map(Goal::from_str).unwrap_or_default();
    Ok(MacroGoalsResponse {
        goal,
        goals: goals::calculate_macro_goals_with_ratios(tdee, goal, protein_ratio, fat_ratio),
    })
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<BmiResponse, String> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(format!("height_cm must be a positive number, got {}", height_cm));
    }
    let bmi = goals::calculate_bmi(weight_kg, height_cm);
    Ok(BmiResponse {
        bmi: crate::models::rounding::round_tenths(bmi),
        category: goals::bmi_category(bmi),
    })
}

pub fn ideal_weight(height_cm: f64, gender: &str) -> IdealWeightRange {
    goals::calculate_ideal_weight_range(height_cm, Gender::from_str(gender))
}

pub fn water_intake(weight_kg: f64, activity_level: Option<&str>) -> WaterIntake {
    goals::calculate_water_intake(weight_kg, parse_activity(activity_level))
}

pub fn macro_distribution(goal: Option<&str>) -> MacroDistributionResponse {
    let goal = goal.map(Goal::from_str).unwrap_or_default();
    MacroDistributionResponse {
        goal,
        distribution: goals::macro_distribution(goal),
    }
}

pub fn weekly_progress(current_kg: f64, previous_kg: f64, goal: Option<&str>) -> WeeklyProgress {
    let goal = goal.map(Goal::from_str).unwrap_or_default();
    goals::calculate_weekly_progress(current_kg, previous_kg, goal)
}
