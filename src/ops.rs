// src/ops.rs
// Query and mutation operations over the pattern catalog

use crate::catalog::{Catalog, PatternSource};
use crate::error::Result;
use crate::store::PatternStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source filter accepted by list operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[derive(schemars::JsonSchema, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    #[default]
    All,
    Fabric,
    Custom,
}

impl SourceFilter {
    fn matches(&self, source: PatternSource) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Fabric => source == PatternSource::Fabric,
            SourceFilter::Custom => source == PatternSource::Custom,
        }
    }
}

/// Projection returned by `list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSummary {
    pub name: String,
    pub source: PatternSource,
    pub description: String,
    pub tags: Value,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub patterns: Vec<PatternSummary>,
    pub total: usize,
}

/// Full pattern payload returned by `get`.
#[derive(Debug, Serialize)]
pub struct PatternDetail {
    pub name: String,
    pub source: PatternSource,
    pub content: String,
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub source: PatternSource,
    pub score: u32,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub message: String,
    pub path: String,
}

/// Outcome of a create attempt. A name collision is a fail-soft payload for
/// the caller, not an error.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(CreateResponse),
    AlreadyExists,
}

/// List patterns in catalog order, optionally filtered by source and tags.
///
/// A non-empty tag filter excludes entries without a `tags` metadata field;
/// tag matching is a case-sensitive exact intersection.
pub fn list(catalog: &Catalog, source: SourceFilter, tags: &[String]) -> ListResponse {
    let mut patterns = Vec::new();

    for entry in catalog.iter() {
        if !source.matches(entry.source()) {
            continue;
        }
        if !tags.is_empty() && !entry.tags().any(|t| tags.iter().any(|f| f == t)) {
            continue;
        }
        patterns.push(PatternSummary {
            name: entry.name.clone(),
            source: entry.source(),
            description: entry.description().to_string(),
            tags: entry.tags_value(),
        });
    }

    ListResponse {
        total: patterns.len(),
        patterns,
    }
}

/// Fetch one pattern with rendered content. `None` means the name is absent
/// from the catalog.
pub fn get(catalog: &Catalog, name: &str) -> Option<PatternDetail> {
    let entry = catalog.get(name)?;
    Some(PatternDetail {
        name: entry.name.clone(),
        source: entry.source(),
        content: entry.render(),
        metadata: entry.metadata().cloned().unwrap_or_default(),
    })
}

/// Scored substring search. Entries scoring zero are dropped; the sort is
/// stable, so equal scores keep catalog order. `total` counts the truncated
/// result set.
pub fn search(catalog: &Catalog, query: &str, limit: usize) -> SearchResponse {
    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for entry in catalog.iter() {
        let score = score_entry(entry, &needle);
        if score > 0 {
            results.push(SearchHit {
                name: entry.name.clone(),
                source: entry.source(),
                score,
                description: entry.description().to_string(),
            });
        }
    }

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);

    SearchResponse {
        total: results.len(),
        results,
    }
}

/// Additive relevance score: +10 name, +5 content, +3 description, +2 when
/// any tag matches (once, regardless of how many tags match). All checks are
/// case-insensitive substring tests against the lowercased needle.
fn score_entry(entry: &crate::catalog::PatternEntry, needle: &str) -> u32 {
    let mut score = 0;

    if entry.name.to_lowercase().contains(needle) {
        score += 10;
    }
    if entry.search_text().to_lowercase().contains(needle) {
        score += 5;
    }
    if entry.description().to_lowercase().contains(needle) {
        score += 3;
    }
    if entry.tags().any(|t| t.to_lowercase().contains(needle)) {
        score += 2;
    }

    score
}

/// Persist a new custom pattern. The existence check only consults the
/// custom root, so a new custom pattern may shadow a same-named fabric one.
///
/// Check-then-write is not atomic; concurrent creates for the same name are
/// outside this server's guarantees.
pub fn create(
    store: &PatternStore,
    name: &str,
    content: &str,
    metadata: &Map<String, Value>,
) -> Result<CreateOutcome> {
    if store.pattern_path(name).exists() {
        return Ok(CreateOutcome::AlreadyExists);
    }

    let path = store.write_pattern(name, content, metadata)?;
    Ok(CreateOutcome::Created(CreateResponse {
        message: format!("Pattern '{name}' created successfully"),
        path: path.display().to_string(),
    }))
}
