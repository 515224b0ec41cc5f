//! Profile metrics bundle
//!
//! Everything the profile view shows, computed from one validated profile.

use serde::Serialize;

use super::calculator::{
    bmi_category, calculate_bmi, calculate_bmr, calculate_ideal_weight_range,
    calculate_macro_goals, calculate_tdee, calculate_water_intake,
};
use crate::models::rounding::{round_half_up, round_tenths};
use crate::models::{BmiCategory, IdealWeightRange, MacroGoals, ProfileError, UserProfile, WaterIntake};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMetrics {
    pub bmr: f64,
    pub tdee: f64,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub ideal_weight: IdealWeightRange,
    pub water_intake: WaterIntake,
    /// Targets derived from the unrounded TDEE and the profile goal
    pub macro_goals: MacroGoals,
}

pub fn profile_metrics(profile: &UserProfile) -> Result<ProfileMetrics, ProfileError> {
    profile.validate()?;

    let bmr = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.gender,
    );
    let tdee = calculate_tdee(bmr, profile.activity_level);
    let bmi = calculate_bmi(profile.weight_kg, profile.height_cm);

    Ok(ProfileMetrics {
        bmr: round_half_up(bmr),
        tdee: round_half_up(tdee),
        bmi: round_tenths(bmi),
        bmi_category: bmi_category(bmi),
        ideal_weight: calculate_ideal_weight_range(profile.height_cm, profile.gender),
        water_intake: calculate_water_intake(profile.weight_kg, profile.activity_level),
        macro_goals: calculate_macro_goals(tdee, profile.goal),
    })
}
