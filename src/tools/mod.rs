//! MacroTrack Tools module
//!
//! MCP tool implementations for food lookup and goal calculation.

pub mod foods;
pub mod goals;
pub mod status;
