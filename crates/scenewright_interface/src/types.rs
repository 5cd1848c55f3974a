//! Core type definitions for the scenewright interface.

use serde::{Deserialize, Serialize};

/// Definition of a tool/function that the model can call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool/function
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON Schema defining the parameters this tool accepts
    pub parameters: serde_json::Value,
}
