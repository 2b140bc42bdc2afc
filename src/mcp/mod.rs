// src/mcp/mod.rs
// MCP Server implementation

pub mod handler;
pub mod resources;
pub mod tools;

use crate::catalog::Catalog;
use crate::config::PatternConfig;
use crate::ops::SourceFilter;
use crate::store::PatternStore;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    schemars, tool, tool_router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// MCP Server state
#[derive(Clone)]
pub struct PatternServer {
    pub store: Arc<PatternStore>,
    /// Latest catalog snapshot. Replaced wholesale on every rebuild; readers
    /// only ever observe a complete snapshot.
    pub catalog: Arc<RwLock<Arc<Catalog>>>,
    tool_router: ToolRouter<Self>,
}

impl PatternServer {
    pub fn new(config: &PatternConfig) -> Self {
        Self {
            store: Arc::new(PatternStore::new(
                config.fabric_root.clone(),
                config.custom_root.clone(),
            )),
            catalog: Arc::new(RwLock::new(Arc::new(Catalog::default()))),
            tool_router: Self::tool_router(),
        }
    }

    /// Rescan both roots and swap in the fresh snapshot. Every tool and
    /// resource handler calls this before answering, so reads always reflect
    /// the latest committed writes, including external edits to fabric files.
    pub async fn rebuild(&self) -> crate::error::Result<Arc<Catalog>> {
        let catalog = Arc::new(self.store.scan()?);
        *self.catalog.write().await = Arc::clone(&catalog);
        Ok(catalog)
    }
}

// Request types for tools with parameters
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListPatternsRequest {
    #[schemars(description = "Filter patterns by source")]
    pub source: Option<SourceFilter>,
    #[schemars(description = "Filter patterns by tags (if metadata available)")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPatternRequest {
    #[schemars(description = "Name of the pattern to retrieve")]
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchPatternsRequest {
    #[schemars(description = "Search query to find in pattern content or metadata")]
    pub query: String,
    #[schemars(description = "Maximum number of results to return")]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreatePatternRequest {
    #[schemars(description = "Name for the new pattern")]
    pub name: String,
    #[schemars(description = "The pattern content/prompt")]
    pub content: String,
    #[schemars(description = "Optional metadata (tags, description, etc.)")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[tool_router]
impl PatternServer {
    #[tool(description = "List all available patterns from Fabric and custom directories")]
    async fn list_patterns(
        &self,
        Parameters(req): Parameters<ListPatternsRequest>,
    ) -> Result<String, String> {
        tools::patterns::list_patterns(
            self,
            req.source.unwrap_or_default(),
            req.tags.unwrap_or_default(),
        )
        .await
    }

    #[tool(description = "Get the content of a specific pattern")]
    async fn get_pattern(
        &self,
        Parameters(req): Parameters<GetPatternRequest>,
    ) -> Result<String, String> {
        tools::patterns::get_pattern(self, req.name).await
    }

    #[tool(description = "Search patterns by content or description")]
    async fn search_patterns(
        &self,
        Parameters(req): Parameters<SearchPatternsRequest>,
    ) -> Result<String, String> {
        tools::patterns::search_patterns(self, req.query, req.limit).await
    }

    #[tool(description = "Create a new custom pattern")]
    async fn create_pattern(
        &self,
        Parameters(req): Parameters<CreatePatternRequest>,
    ) -> Result<String, String> {
        tools::patterns::create_pattern(
            self,
            req.name,
            req.content,
            req.metadata.unwrap_or_default(),
        )
        .await
    }
}
