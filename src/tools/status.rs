//! MacroTrack Status Tool
//!
//! Provides runtime status information about the MacroTrack service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::ProviderKind;
use crate::nutrition::FOOD_TABLE;

/// Food lookup and goal calculation instructions for AI assistants
pub const NUTRITION_INSTRUCTIONS: &str = r#"
# MacroTrack Nutrition Instructions

This guide explains how to look up foods and calculate daily targets with the MacroTrack tools.

## Looking Up a Food

**Tool:** `resolve_food`
- `query` - free text, e.g. "1 medium apple" or "200g chicken breast"
- `serving_multiplier` - optional, defaults to 1 (1.5 = one and a half servings)

Resolution order:
1. The configured remote provider (Open Food Facts, Edamam or Nutritionix), one attempt
2. The built-in food table, matched by name inside the query
3. A zero-valued placeholder with `source: "local-unknown"` and `resolved: false`

The response always contains a `fact`. When `resolved` is false, ask the user for the
nutrition values instead of logging zeros.

Calories are whole numbers; carbs, protein, fat and fiber are rounded to 0.1 g.

## Browsing the Built-in Table

| Task | Tool |
|------|------|
| Search by name or category | `search_local_foods` |
| List one category | `list_foods_by_category` |
| Random ideas | `suggest_foods` |

Categories: `fruit`, `vegetable`, `protein`, `grain`, `nuts`, `dairy`, `processed`.

## Daily Totals

Pass the facts you logged today to `sum_daily_totals`. Totals are plain sums with no rounding.

## Goals

Start with `calculate_profile_metrics` (weight kg, height cm, age, gender, activity level, goal).
It returns BMR, TDEE, BMI with category, ideal weight range, water intake and macro goals.

The single-step tools are available when only one number is needed:
`calculate_bmr`, `calculate_tdee`, `calculate_macro_goals`, `calculate_bmi`,
`calculate_ideal_weight`, `calculate_water_intake`, `macro_distribution`, `weekly_progress`.

### Activity Levels

| Level | TDEE factor |
|-------|-------------|
| `sedentary` | 1.2 |
| `light` | 1.375 |
| `moderate` | 1.55 |
| `active` | 1.725 |
| `very_active` | 1.9 |

Unknown levels fall back to the moderate factor for TDEE and to no adjustment for water.

### Goals

- `lose` - TDEE - 500 kcal
- `maintain` - TDEE
- `gain` - TDEE + 500 kcal

Calorie targets never go below 1200 kcal. Unknown goals are treated as `maintain`.
"#;

/// Status information for the MacroTrack service
#[derive(Debug, Serialize)]
pub struct MacroTrackStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Nutrition provider information
    pub remote_provider: Option<ProviderKind>,
    pub local_food_count: usize,

    /// Process information
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    remote_provider: Option<ProviderKind>,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(remote_provider: Option<ProviderKind>) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            remote_provider,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> MacroTrackStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        MacroTrackStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            remote_provider: self.remote_provider,
            local_food_count: FOOD_TABLE.len(),
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_provider() {
        let tracker = StatusTracker::new(Some(ProviderKind::Nutritionix));
        let status = tracker.get_status();
        assert_eq!(status.remote_provider, Some(ProviderKind::Nutritionix));
        assert_eq!(status.local_food_count, 25);
        assert_eq!(status.process_id, std::process::id());

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["remote_provider"], "nutritionix");
    }

    #[test]
    fn test_status_local_only() {
        let status = StatusTracker::new(None).get_status();
        assert!(status.remote_provider.is_none());
        assert!(status.started_at <= Utc::now());
    }
}
