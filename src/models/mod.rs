//! Data models
//!
//! Plain structs shared by the goal calculator, the resolver and the MCP tools.

mod fact;
mod food_record;
mod goals;
mod nutrition;
mod profile;
pub mod rounding;

pub use fact::{DailyTotals, FactSource, NutritionFact, DEFAULT_SERVING};
pub use food_record::{FoodCategory, FoodRecord};
pub use goals::{
    BmiCategory, IdealWeightRange, MacroDistribution, MacroGoals, ProgressStatus,
    WaterIntake, WeeklyProgress,
};
pub use nutrition::Nutrition;
pub use profile::{ActivityLevel, Gender, Goal, ProfileError, UserProfile};
