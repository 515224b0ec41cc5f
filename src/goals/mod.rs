//! Goal calculation module
//!
//! Body metrics (BMR, TDEE, BMI, ideal weight, water) and macro targets.

pub mod calculator;
pub mod metrics;
pub mod progress;

pub use calculator::{
    bmi_category, calculate_bmi, calculate_bmr, calculate_ideal_weight_range,
    calculate_macro_goals, calculate_macro_goals_with_ratios, calculate_tdee,
    calculate_water_intake, DEFAULT_FAT_RATIO, DEFAULT_PROTEIN_RATIO,
};
pub use metrics::{profile_metrics, ProfileMetrics};
pub use progress::{calculate_weekly_progress, macro_distribution};
