//! MacroTrack Library
//!
//! Nutrition resolution and goal calculation behind an MCP server.

pub mod build_info;
pub mod config;
pub mod goals;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
