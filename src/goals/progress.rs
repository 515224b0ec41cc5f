//! Macro split presets and weekly weight progress

use crate::models::rounding::round_tenths;
use crate::models::{Goal, MacroDistribution, ProgressStatus, WeeklyProgress};

/// Recommended share of calories per macro for a goal
pub fn macro_distribution(goal: Goal) -> MacroDistribution {
    match goal {
        // Higher protein for satiety
        Goal::Lose => MacroDistribution { protein: 0.30, carbs: 0.35, fat: 0.35 },
        Goal::Maintain => MacroDistribution { protein: 0.25, carbs: 0.45, fat: 0.30 },
        // Higher carbs for energy
        Goal::Gain => MacroDistribution { protein: 0.25, carbs: 0.50, fat: 0.25 },
    }
}

/// Kg per week that counts as a healthy rate of change
const HEALTHY_WEEKLY_CHANGE: f64 = 0.5;

/// Assess a weight change against the goal
///
/// The change is spread over seven daily weigh-ins.
pub fn calculate_weekly_progress(current_kg: f64, previous_kg: f64, goal: Goal) -> WeeklyProgress {
    let weight_change = current_kg - previous_kg;
    let weekly_change = weight_change / 7.0;

    let (status, message) = match goal {
        Goal::Lose if weekly_change < -HEALTHY_WEEKLY_CHANGE => (
            ProgressStatus::Excellent,
            "Great progress! You're losing weight at a healthy rate",
        ),
        Goal::Lose if weekly_change < 0.0 => (ProgressStatus::Good, "Good progress! Keep it up"),
        Goal::Lose if weekly_change > HEALTHY_WEEKLY_CHANGE => (
            ProgressStatus::Warning,
            "You're gaining weight. Consider adjusting your calorie intake",
        ),
        Goal::Gain if weekly_change > HEALTHY_WEEKLY_CHANGE => (
            ProgressStatus::Excellent,
            "Great progress! You're gaining weight at a healthy rate",
        ),
        Goal::Gain if weekly_change > 0.0 => (ProgressStatus::Good, "Good progress! Keep it up"),
        Goal::Gain if weekly_change < -HEALTHY_WEEKLY_CHANGE => (
            ProgressStatus::Warning,
            "You're losing weight. Consider increasing your calorie intake",
        ),
        _ => (ProgressStatus::Maintaining, "You're maintaining your weight"),
    };

    WeeklyProgress {
        weight_change,
        weekly_change: round_tenths(weekly_change),
        status,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distributions_sum_to_one() {
        for goal in [Goal::Lose, Goal::Maintain, Goal::Gain] {
            let d = macro_distribution(goal);
            assert!((d.protein + d.carbs + d.fat - 1.0).abs() < 1e-9);
        }
        assert_eq!(macro_distribution(Goal::Lose).protein, 0.30);
        assert_eq!(macro_distribution(Goal::Gain).carbs, 0.50);
    }

    #[test]
    fn test_losing_fast_is_excellent() {
        let p = calculate_weekly_progress(76.0, 80.0, Goal::Lose);
        assert_eq!(p.weight_change, -4.0);
        assert_eq!(p.weekly_change, -0.6);
        assert_eq!(p.status, ProgressStatus::Excellent);
    }

    #[test]
    fn test_losing_slowly_is_good() {
        let p = calculate_weekly_progress(79.0, 80.0, Goal::Lose);
        assert_eq!(p.status, ProgressStatus::Good);
        assert_eq!(p.message, "Good progress! Keep it up");
    }

    #[test]
    fn test_gaining_while_losing_is_warning() {
        let p = calculate_weekly_progress(84.0, 80.0, Goal::Lose);
        assert_eq!(p.status, ProgressStatus::Warning);
    }

    #[test]
    fn test_small_gain_while_losing_is_maintaining() {
        let p = calculate_weekly_progress(81.0, 80.0, Goal::Lose);
        assert_eq!(p.status, ProgressStatus::Maintaining);
    }

    #[test]
    fn test_gain_goal() {
        assert_eq!(calculate_weekly_progress(84.0, 80.0, Goal::Gain).status, ProgressStatus::Excellent);
        assert_eq!(calculate_weekly_progress(81.0, 80.0, Goal::Gain).status, ProgressStatus::Good);
        assert_eq!(calculate_weekly_progress(76.0, 80.0, Goal::Gain).status, ProgressStatus::Warning);
    }

    #[test]
    fn test_maintain_goal_always_maintaining() {
        let p = calculate_weekly_progress(90.0, 80.0, Goal::Maintain);
        assert_eq!(p.status, ProgressStatus::Maintaining);
        assert_eq!(p.message, "You're maintaining your weight");
    }
}
