//! Body metric and macro goal formulas
//!
//! Pure functions with no input validation: negative or NaN inputs flow
//! through to the result. Use `profile_metrics` for validated input.

use crate::models::rounding::{round_half_up, round_tenths};
use crate::models::{ActivityLevel, BmiCategory, Gender, Goal, IdealWeightRange, MacroGoals, WaterIntake};

/// Calorie floor applied to every macro goal
pub const MIN_DAILY_CALORIES: f64 = 1200.0;
/// Daily deficit/surplus for lose/gain goals (about 0.5 kg a week)
pub const GOAL_CALORIE_ADJUSTMENT: f64 = 500.0;

pub const DEFAULT_PROTEIN_RATIO: f64 = 0.25;
pub const DEFAULT_FAT_RATIO: f64 = 0.25;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// TDEE factor used when the activity level is unknown
pub const DEFAULT_TDEE_FACTOR: f64 = 1.55;

pub const WATER_ML_PER_KG: f64 = 35.0;
pub const ML_PER_CUP: f64 = 240.0;
const CM_PER_INCH: f64 = 2.54;

impl ActivityLevel {
    pub fn tdee_factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn water_factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.0,
            ActivityLevel::Light => 1.1,
            ActivityLevel::Moderate => 1.2,
            ActivityLevel::Active => 1.3,
            ActivityLevel::VeryActive => 1.4,
        }
    }
}

impl Goal {
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            Goal::Lose => -GOAL_CALORIE_ADJUSTMENT,
            Goal::Maintain => 0.0,
            Goal::Gain => GOAL_CALORIE_ADJUSTMENT,
        }
    }
}

/// Mifflin-St Jeor basal metabolic rate, kcal/day
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: f64, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// BMR scaled by activity; unknown levels use the moderate factor
pub fn calculate_tdee(bmr: f64, activity_level: Option<ActivityLevel>) -> f64 {
    let factor = activity_level
        .map(|level| level.tdee_factor())
        .unwrap_or(DEFAULT_TDEE_FACTOR);
    bmr * factor
}

/// Macro targets with the default 25% protein / 25% fat split
pub fn calculate_macro_goals(tdee: f64, goal: Goal) -> MacroGoals {
    calculate_macro_goals_with_ratios(tdee, goal, DEFAULT_PROTEIN_RATIO, DEFAULT_FAT_RATIO)
}

/// Macro targets for a goal; carbs take whatever calories remain
pub fn calculate_macro_goals_with_ratios(
    tdee: f64,
    goal: Goal,
    protein_ratio: f64,
    fat_ratio: f64,
) -> MacroGoals {
    let target = (tdee + goal.calorie_adjustment()).max(MIN_DAILY_CALORIES);

    let protein_kcal = target * protein_ratio;
    let fat_kcal = target * fat_ratio;
    let carb_kcal = target - protein_kcal - fat_kcal;

    MacroGoals {
        calories: to_whole(target),
        protein: to_whole(protein_kcal / KCAL_PER_G_PROTEIN),
        carbs: to_whole(carb_kcal / KCAL_PER_G_CARBS),
        fat: to_whole(fat_kcal / KCAL_PER_G_FAT),
    }
}

/// Round half-up and clamp into u32 (negatives become 0)
fn to_whole(value: f64) -> u32 {
    round_half_up(value).max(0.0) as u32
}

/// Body mass index; height must be non-zero
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory { category: "Underweight", color: "#2196F3" }
    } else if bmi < 25.0 {
        BmiCategory { category: "Normal weight", color: "#4CAF50" }
    } else if bmi < 30.0 {
        BmiCategory { category: "Overweight", color: "#FF9800" }
    } else {
        BmiCategory { category: "Obese", color: "#F44336" }
    }
}

/// Devine formula with a 90-110% band
pub fn calculate_ideal_weight_range(height_cm: f64, gender: Gender) -> IdealWeightRange {
    let height_in = height_cm / CM_PER_INCH;
    let base = match gender {
        Gender::Male => 50.0,
        Gender::Female => 45.5,
    };
    let ideal = base + 2.3 * (height_in - 60.0);

    IdealWeightRange {
        min: round_half_up(ideal * 0.9),
        max: round_half_up(ideal * 1.1),
        ideal: round_half_up(ideal),
    }
}

/// 35 ml per kg, scaled by activity; unknown levels use 1.0
pub fn calculate_water_intake(weight_kg: f64, activity_level: Option<ActivityLevel>) -> WaterIntake {
    let factor = activity_level.map(|level| level.water_factor()).unwrap_or(1.0);
    let total_ml = weight_kg * WATER_ML_PER_KG * factor;

    WaterIntake {
        ml: round_half_up(total_ml),
        liters: round_tenths(total_ml / 1000.0),
        cups: round_half_up(total_ml / ML_PER_CUP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_male_formula() {
        let bmr = calculate_bmr(70.0, 175.0, 25.0, Gender::Male);
        assert_eq!(bmr, 700.0 + 1093.75 - 125.0 + 5.0);
        assert!(bmr > 1500.0 && bmr < 2000.0);
    }

    #[test]
    fn test_bmr_female_formula() {
        let bmr = calculate_bmr(60.0, 165.0, 25.0, Gender::Female);
        assert_eq!(bmr, 600.0 + 1031.25 - 125.0 - 161.0);
        assert!(bmr > 1200.0 && bmr < 1600.0);
    }

    #[test]
    fn test_bmr_negative_input_propagates() {
        let bmr = calculate_bmr(-10.0, 0.0, 0.0, Gender::Male);
        assert_eq!(bmr, -95.0);
        assert!(calculate_bmr(f64::NAN, 175.0, 25.0, Gender::Male).is_nan());
    }

    #[test]
    fn test_tdee_moderate_and_unknown() {
        assert_eq!(calculate_tdee(1500.0, Some(ActivityLevel::Moderate)), 2325.0);
        assert_eq!(calculate_tdee(1500.0, None), 2325.0);
    }

    #[test]
    fn test_tdee_increases_with_activity() {
        let sedentary = calculate_tdee(1500.0, Some(ActivityLevel::Sedentary));
        let active = calculate_tdee(1500.0, Some(ActivityLevel::Active));
        assert_eq!(sedentary, 1800.0);
        assert!(active > sedentary);
    }

    #[test]
    fn test_macro_goals_lose() {
        let goals = calculate_macro_goals(2000.0, Goal::Lose);
        assert_eq!(
            goals,
            MacroGoals { calories: 1500, protein: 94, carbs: 188, fat: 42 }
        );
        assert!(goals.calories < 2000);
    }

    #[test]
    fn test_macro_goals_gain_and_maintain() {
        assert_eq!(calculate_macro_goals(2000.0, Goal::Gain).calories, 2500);
        let maintain = calculate_macro_goals(2000.0, Goal::Maintain);
        assert_eq!(
            maintain,
            MacroGoals { calories: 2000, protein: 125, carbs: 250, fat: 56 }
        );
    }

    #[test]
    fn test_macro_goals_calorie_floor() {
        let goals = calculate_macro_goals(1400.0, Goal::Lose);
        assert_eq!(goals.calories, 1200);
        assert_eq!(goals.protein, 75);
        assert_eq!(goals.fat, 33);
        assert_eq!(goals.carbs, 150);
    }

    #[test]
    fn test_macro_goals_custom_ratios() {
        let goals = calculate_macro_goals_with_ratios(2000.0, Goal::Maintain, 0.3, 0.3);
        assert_eq!(goals.protein, 150);
        assert_eq!(goals.fat, 67);
        assert_eq!(goals.carbs, 200);

        // Ratios above 100% leave nothing for carbs
        let goals = calculate_macro_goals_with_ratios(2000.0, Goal::Maintain, 0.7, 0.5);
        assert_eq!(goals.carbs, 0);
    }

    #[test]
    fn test_bmi() {
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.857).abs() < 0.001);
        assert_eq!(round_tenths(bmi), 22.9);
        assert_eq!(calculate_bmi(0.0, 175.0), 0.0);
        assert!(calculate_bmi(70.0, 0.0).is_infinite());
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(bmi_category(17.0).category, "Underweight");
        assert_eq!(bmi_category(18.5).category, "Normal weight");
        assert_eq!(bmi_category(24.9).category, "Normal weight");
        assert_eq!(bmi_category(25.0).category, "Overweight");
        assert_eq!(bmi_category(29.99).category, "Overweight");
        assert_eq!(bmi_category(30.0).category, "Obese");
        assert_eq!(bmi_category(22.0).color, "#4CAF50");
    }

    #[test]
    fn test_ideal_weight_range() {
        let male = calculate_ideal_weight_range(175.0, Gender::Male);
        assert_eq!(male.ideal, 70.0); // 70.46
        assert_eq!(male.min, 63.0);
        assert_eq!(male.max, 78.0);

        let female = calculate_ideal_weight_range(165.0, Gender::Female);
        assert_eq!(female.ideal, 57.0); // 56.91
        assert!(female.min < female.ideal && female.ideal < female.max);
    }

    #[test]
    fn test_water_intake() {
        let water = calculate_water_intake(70.0, Some(ActivityLevel::Moderate));
        assert_eq!(water.ml, 2940.0);
        assert_eq!(water.liters, 2.9);
        assert_eq!(water.cups, 12.0);

        let water = calculate_water_intake(70.0, None);
        assert_eq!(water.ml, 2450.0);
        assert_eq!(water.cups, 10.0);
    }
}
