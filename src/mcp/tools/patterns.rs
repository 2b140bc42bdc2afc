// src/mcp/tools/patterns.rs
// Pattern tools: list, get, search, create

use crate::mcp::PatternServer;
use crate::ops::{self, CreateOutcome, SourceFilter};
use serde_json::{json, Map, Value};

/// List patterns, optionally filtered by source and tags.
pub async fn list_patterns(
    server: &PatternServer,
    source: SourceFilter,
    tags: Vec<String>,
) -> Result<String, String> {
    let catalog = server.rebuild().await.map_err(|e| e.to_string())?;
    let response = ops::list(&catalog, source, &tags);
    serde_json::to_string_pretty(&response).map_err(|e| e.to_string())
}

/// Get one pattern with rendered content.
pub async fn get_pattern(server: &PatternServer, name: String) -> Result<String, String> {
    let catalog = server.rebuild().await.map_err(|e| e.to_string())?;

    match ops::get(&catalog, &name) {
        Some(detail) => serde_json::to_string_pretty(&detail).map_err(|e| e.to_string()),
        // An absent name is a payload-level miss, not a protocol failure.
        None => Ok(json!({ "error": format!("Pattern '{name}' not found") }).to_string()),
    }
}

/// Scored substring search over the catalog.
pub async fn search_patterns(
    server: &PatternServer,
    query: String,
    limit: Option<i64>,
) -> Result<String, String> {
    let limit = limit.unwrap_or(10).max(0) as usize;
    let catalog = server.rebuild().await.map_err(|e| e.to_string())?;
    let response = ops::search(&catalog, &query, limit);
    serde_json::to_string_pretty(&response).map_err(|e| e.to_string())
}

/// Create a new custom pattern, then rebuild so the snapshot reflects the
/// committed state.
pub async fn create_pattern(
    server: &PatternServer,
    name: String,
    content: String,
    metadata: Map<String, Value>,
) -> Result<String, String> {
    let outcome =
        ops::create(&server.store, &name, &content, &metadata).map_err(|e| e.to_string())?;

    match outcome {
        CreateOutcome::AlreadyExists => {
            Ok(json!({ "error": format!("Pattern '{name}' already exists") }).to_string())
        }
        CreateOutcome::Created(response) => {
            server.rebuild().await.map_err(|e| e.to_string())?;
            serde_json::to_string(&response).map_err(|e| e.to_string())
        }
    }
}
