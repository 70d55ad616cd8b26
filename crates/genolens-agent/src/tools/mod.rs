//! Tool registration scaffold.
//!
//! Genolens exposes its data-source operations to agent hosts as
//! registered `GenolensTool` implementations behind a central
//! `ToolRegistry`. The registry is built once at startup and shared via
//! Arc with the serving layer.
//!
//! Tool lifecycle:
//!   1. Implement `GenolensTool` for your type.
//!   2. Register with `ToolRegistry::register`.
//!   3. The serving layer invokes tools via `ToolRegistry::invoke(name, params)`.

pub mod expression_tool;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use genolens_sources::FirebrowseClient;
use serde_json::Value;

// ─────────────────────────────────────────────
//  Core trait — implement for each tool
// ─────────────────────────────────────────────

/// A callable Genolens tool.
///
/// # Minimal contract
/// - `name()` must be unique across the registry (snake_case).
/// - `description()` is surfaced to the calling agent as the tool docstring.
/// - `parameters_schema()` returns a JSON Schema object for parameter validation.
/// - `invoke()` receives JSON params and returns JSON output.
#[async_trait]
pub trait GenolensTool: Send + Sync {
    /// Unique tool name (used as the function call identifier).
    fn name(&self) -> &str;

    /// Short description shown to the calling agent.
    fn description(&self) -> &str;

    /// JSON Schema describing the expected input parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool. Returns a JSON result or an anyhow error.
    async fn invoke(&self, params: Value) -> Result<Value>;

    /// Whether this tool requires human confirmation before running.
    /// Default: false. Override for destructive or externally-reaching tools.
    fn requires_approval(&self) -> bool {
        false
    }

    /// Data classification of the tool's output. Everything Genolens
    /// serves today is public-domain research data.
    fn output_data_class(&self) -> &str {
        "PUBLIC"
    }
}

// ─────────────────────────────────────────────
//  Tool registry
// ─────────────────────────────────────────────

/// Central registry mapping tool names → trait objects.
/// Build once at startup, then share via Arc.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn GenolensTool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Panics if the name is already registered.
    pub fn register<T: GenolensTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        assert!(
            !self.tools.contains_key(&name),
            "Duplicate tool name: {name}"
        );
        self.tools.insert(name, Arc::new(tool));
    }

    /// Invoke a registered tool by name.
    pub async fn invoke(&self, name: &str, params: Value) -> Result<Value> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {name}"))?;

        tracing::info!(
            tool = name,
            requires_approval = tool.requires_approval(),
            data_class = tool.output_data_class(),
            "Invoking tool"
        );

        tool.invoke(params).await
    }

    /// List all registered tools as a JSON function manifest.
    pub fn manifest(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .values()
            .map(|t| {
                serde_json::json!({
                    "name": t.name(),
                    "description": t.description(),
                    "parameters": t.parameters_schema(),
                    "requires_approval": t.requires_approval(),
                    "output_data_class": t.output_data_class(),
                })
            })
            .collect();
        serde_json::json!({ "tools": tools })
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get a reference to a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn GenolensTool>> {
        self.tools.get(name)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function: build the default Genolens tool registry.
/// Call once at startup and hand to the serving layer.
pub fn build_default_registry(firebrowse: FirebrowseClient) -> ToolRegistry {
    let mut reg = ToolRegistry::new();
    reg.register(expression_tool::GeneExpressionTool::new(firebrowse));
    tracing::info!("ToolRegistry ready with {} tools", reg.len());
    reg
}

// ─────────────────────────────────────────────
//  Tests
// ─────────────────────────────────────────────
