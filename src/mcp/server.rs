//! MacroTrack MCP Server Implementation
//!
//! Implements the MCP server with all MacroTrack tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::{FactSource, NutritionFact, DEFAULT_SERVING};
use crate::nutrition::NutritionResolver;
use crate::tools::foods;
use crate::tools::goals;
use crate::tools::status::StatusTracker;

/// MacroTrack MCP Service
#[derive(Clone)]
pub struct MacroTrackService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    resolver: Arc<NutritionResolver>,
    tool_router: ToolRouter<MacroTrackService>,
}

impl MacroTrackService {
    pub fn new(resolver: NutritionResolver) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(resolver.remote_provider()))),
            resolver: Arc::new(resolver),
            tool_router: Self::tool_router(),
        }
    }
}

/// Serialize a tool result as pretty JSON text content
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Food Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResolveFoodParams {
    /// Free-text food description, e.g. "1 medium apple"
    pub query: String,
    /// Portion multiplier, defaults to 1
    pub serving_multiplier: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchLocalFoodsParams {
    pub term: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize { 20 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFoodsByCategoryParams {
    /// fruit, vegetable, protein, grain, nuts, dairy or processed
    pub category: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestFoodsParams {
    #[serde(default = "default_suggest_count")]
    pub count: usize,
}

fn default_suggest_count() -> usize { 5 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DailyEntryParams {
    pub name: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    pub serving: Option<String>,
    /// Source tag as returned by resolve_food, defaults to "local"
    pub source: Option<String>,
}

impl From<DailyEntryParams> for NutritionFact {
    fn from(p: DailyEntryParams) -> Self {
        NutritionFact {
            name: p.name,
            calories: p.calories,
            carbs: p.carbs,
            protein: p.protein,
            fat: p.fat,
            fiber: p.fiber,
            serving: p.serving.unwrap_or_else(|| DEFAULT_SERVING.to_string()),
            source: p
                .source
                .as_deref()
                .and_then(FactSource::from_str)
                .unwrap_or(FactSource::Local),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SumDailyTotalsParams {
    pub entries: Vec<DailyEntryParams>,
}

// ============================================================================
// Goal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProfileMetricsParams {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    /// "male" or "female"
    pub gender: String,
    /// sedentary, light, moderate, active or very_active
    pub activity_level: Option<String>,
    /// lose, maintain or gain
    pub goal: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BmrParams {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    pub gender: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TdeeParams {
    pub bmr: f64,
    pub activity_level: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MacroGoalsParams {
    pub tdee: f64,
    pub goal: Option<String>,
    /// Share of calories from protein, defaults to 0.25
    pub protein_ratio: Option<f64>,
    /// Share of calories from fat, defaults to 0.25
    pub fat_ratio: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BmiParams {
    pub weight_kg: f64,
    pub height_cm: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IdealWeightParams {
    pub height_cm: f64,
    pub gender: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WaterIntakeParams {
    pub weight_kg: f64,
    pub activity_level: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MacroDistributionParams {
    pub goal: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WeeklyProgressParams {
    pub current_weight_kg: f64,
    pub previous_weight_kg: f64,
    pub goal: Option<String>,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl MacroTrackService {
    // --- Status ---

    #[tool(description = "Get the current status of the MacroTrack service including build info, nutrition provider, and process information")]
    async fn macrotrack_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        json_result(&status)
    }

    #[tool(description = "Get instructions for looking up foods and calculating goals. Call this when starting a nutrition session or when unsure how to use the MacroTrack tools.")]
    fn nutrition_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::NUTRITION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(NUTRITION_INSTRUCTIONS)]))
    }

    // --- Foods ---

    #[tool(description = "Resolve a free-text food query to calories, carbs, protein, fat and fiber. Tries the remote provider, then the built-in table, then returns a zero placeholder.")]
    async fn resolve_food(&self, Parameters(p): Parameters<ResolveFoodParams>) -> Result<CallToolResult, McpError> {
        let result = foods::resolve_food(&self.resolver, &p.query, p.serving_multiplier)
            .await
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Search the built-in food table by name or category")]
    fn search_local_foods(&self, Parameters(p): Parameters<SearchLocalFoodsParams>) -> Result<CallToolResult, McpError> {
        json_result(&foods::search_local_foods(&p.term, p.limit))
    }

    #[tool(description = "List built-in foods in one category (fruit, vegetable, protein, grain, nuts, dairy, processed)")]
    fn list_foods_by_category(&self, Parameters(p): Parameters<ListFoodsByCategoryParams>) -> Result<CallToolResult, McpError> {
        let result = foods::list_foods_by_category(&p.category).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Suggest random foods from the built-in table")]
    fn suggest_foods(&self, Parameters(p): Parameters<SuggestFoodsParams>) -> Result<CallToolResult, McpError> {
        json_result(&foods::suggest_local_foods(p.count))
    }

    #[tool(description = "Sum calories, carbs, protein, fat and fiber across a day's food entries")]
    fn sum_daily_totals(&self, Parameters(p): Parameters<SumDailyTotalsParams>) -> Result<CallToolResult, McpError> {
        let entries: Vec<NutritionFact> = p.entries.into_iter().map(NutritionFact::from).collect();
        json_result(&foods::sum_daily_totals(&entries))
    }

    // --- Goals ---

    #[tool(description = "Calculate BMR, TDEE, BMI, ideal weight, water intake and macro goals from a user profile")]
    fn calculate_profile_metrics(&self, Parameters(p): Parameters<ProfileMetricsParams>) -> Result<CallToolResult, McpError> {
        let result = goals::profile_metrics(
            p.weight_kg, p.height_cm, p.age_years, &p.gender,
            p.activity_level.as_deref(), p.goal.as_deref(),
        ).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Calculate basal metabolic rate (Mifflin-St Jeor)")]
    fn calculate_bmr(&self, Parameters(p): Parameters<BmrParams>) -> Result<CallToolResult, McpError> {
        json_result(&goals::bmr(p.weight_kg, p.height_cm, p.age_years, &p.gender))
    }

    #[tool(description = "Calculate total daily energy expenditure from BMR and activity level")]
    fn calculate_tdee(&self, Parameters(p): Parameters<TdeeParams>) -> Result<CallToolResult, McpError> {
        json_result(&goals::tdee(p.bmr, p.activity_level.as_deref()))
    }

    #[tool(description = "Calculate daily calorie, protein, carb and fat targets for a goal (lose, maintain, gain)")]
    fn calculate_macro_goals(&self, Parameters(p): Parameters<MacroGoalsParams>) -> Result<CallToolResult, McpError> {
        let result = goals::macro_goals(p.tdee, p.goal.as_deref(), p.protein_ratio, p.fat_ratio)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Calculate body mass index and its category")]
    fn calculate_bmi(&self, Parameters(p): Parameters<BmiParams>) -> Result<CallToolResult, McpError> {
        let result = goals::bmi(p.weight_kg, p.height_cm).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Calculate the ideal weight range (Devine formula, +/- 10%)")]
    fn calculate_ideal_weight(&self, Parameters(p): Parameters<IdealWeightParams>) -> Result<CallToolResult, McpError> {
        json_result(&goals::ideal_weight(p.height_cm, &p.gender))
    }

    #[tool(description = "Calculate recommended daily water intake in ml, liters and cups")]
    fn calculate_water_intake(&self, Parameters(p): Parameters<WaterIntakeParams>) -> Result<CallToolResult, McpError> {
        json_result(&goals::water_intake(p.weight_kg, p.activity_level.as_deref()))
    }

    #[tool(description = "Get the recommended protein/carb/fat percentage split for a goal")]
    fn macro_distribution(&self, Parameters(p): Parameters<MacroDistributionParams>) -> Result<CallToolResult, McpError> {
        json_result(&goals::macro_distribution(p.goal.as_deref()))
    }

    #[tool(description = "Evaluate a week's weight change against the goal")]
    fn weekly_progress(&self, Parameters(p): Parameters<WeeklyProgressParams>) -> Result<CallToolResult, McpError> {
        json_result(&goals::weekly_progress(p.current_weight_kg, p.previous_weight_kg, p.goal.as_deref()))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MacroTrackService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "macrotrack".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("MacroTrack Nutrition Server".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "MacroTrack - Food nutrition lookup and macro goal calculation. \
                 IMPORTANT: Call nutrition_instructions before a food logging session. \
                 Foods: resolve_food (remote provider, then built-in table, then placeholder), \
                 search_local_foods, list_foods_by_category, suggest_foods, sum_daily_totals. \
                 Goals: calculate_profile_metrics, calculate_bmr, calculate_tdee, calculate_macro_goals, \
                 calculate_bmi, calculate_ideal_weight, calculate_water_intake, macro_distribution, weekly_progress. \
                 Status: macrotrack_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_entry_defaults() {
        let p: DailyEntryParams = serde_json::from_value(serde_json::json!({
            "name": "Toast",
            "calories": 80.0,
            "carbs": 15.0,
            "protein": 3.0,
            "fat": 1.0
        }))
        .unwrap();
        let fact = NutritionFact::from(p);
        assert_eq!(fact.fiber, 0.0);
        assert_eq!(fact.serving, DEFAULT_SERVING);
        assert_eq!(fact.source, FactSource::Local);
    }

    #[test]
    fn test_daily_entry_keeps_source() {
        let p: DailyEntryParams = serde_json::from_value(serde_json::json!({
            "name": "Mystery",
            "calories": 0.0,
            "carbs": 0.0,
            "protein": 0.0,
            "fat": 0.0,
            "source": "local-unknown"
        }))
        .unwrap();
        assert_eq!(NutritionFact::from(p).source, FactSource::LocalUnknown);
    }

    #[test]
    fn test_server_info() {
        let service = MacroTrackService::new(NutritionResolver::local_only());
        let info = service.get_info();
        assert_eq!(info.server_info.name, "macrotrack");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_search_limit_default() {
        let p: SearchLocalFoodsParams =
            serde_json::from_value(serde_json::json!({ "term": "fruit" })).unwrap();
        assert_eq!(p.limit, 20);
    }
}
