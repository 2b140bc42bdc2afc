// src/catalog.rs
// In-memory pattern catalog, rebuilt from disk on every operation

use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;

/// Which directory tree a pattern came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSource {
    Fabric,
    Custom,
}

impl PatternSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternSource::Fabric => "fabric",
            PatternSource::Custom => "custom",
        }
    }
}

/// Source-specific pattern data. Fabric patterns are a system/user prompt
/// pair (at least one present); custom patterns are a single markdown body
/// with free-form JSON metadata.
#[derive(Debug, Clone)]
pub enum PatternPayload {
    Fabric {
        system: Option<String>,
        user: Option<String>,
    },
    Custom {
        content: String,
        metadata: Map<String, Value>,
    },
}

/// One catalog record, keyed by a unique name.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    pub name: String,
    /// Pattern directory for fabric entries, markdown file for custom ones.
    pub path: PathBuf,
    pub payload: PatternPayload,
}

impl PatternEntry {
    pub fn source(&self) -> PatternSource {
        match self.payload {
            PatternPayload::Fabric { .. } => PatternSource::Fabric,
            PatternPayload::Custom { .. } => PatternSource::Custom,
        }
    }

    /// Metadata mapping, if this entry carries one (fabric entries never do).
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        match &self.payload {
            PatternPayload::Fabric { .. } => None,
            PatternPayload::Custom { metadata, .. } => Some(metadata),
        }
    }

    /// `metadata.description`, with missing treated as empty.
    pub fn description(&self) -> &str {
        self.metadata()
            .and_then(|m| m.get("description"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// String tags from `metadata.tags`, with missing treated as empty.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.metadata()
            .and_then(|m| m.get("tags"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// The raw `metadata.tags` value, or an empty array when absent.
    pub fn tags_value(&self) -> Value {
        self.metadata()
            .and_then(|m| m.get("tags"))
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    /// Text searched for content matches: system+user for fabric (missing
    /// parts empty), the raw body for custom.
    pub fn search_text(&self) -> Cow<'_, str> {
        match &self.payload {
            PatternPayload::Fabric { system, user } => Cow::Owned(format!(
                "{}{}",
                system.as_deref().unwrap_or(""),
                user.as_deref().unwrap_or("")
            )),
            PatternPayload::Custom { content, .. } => Cow::Borrowed(content),
        }
    }

    /// Display content served to clients. Fabric pairs are rendered as
    /// headed sections; the trailing blank line after the system block is
    /// emitted even when no user block follows. Custom bodies pass through
    /// untouched.
    pub fn render(&self) -> String {
        match &self.payload {
            PatternPayload::Fabric { system, user } => {
                let mut out = String::new();
                if let Some(system) = system {
                    out.push_str(&format!("# System Prompt\n\n{system}\n\n"));
                }
                if let Some(user) = user {
                    out.push_str(&format!("# User Prompt\n\n{user}"));
                }
                out
            }
            PatternPayload::Custom { content, .. } => content.clone(),
        }
    }
}

/// Insertion-ordered mapping from pattern name to entry. Inserting an
/// existing name replaces the entry in place, keeping its original position,
/// so a custom pattern shadowing a fabric one keeps the fabric slot in
/// iteration order.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<PatternEntry>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    pub fn insert(&mut self, entry: PatternEntry) {
        match self.by_name.get(&entry.name) {
            Some(&idx) => self.entries[idx] = entry,
            None => {
                self.by_name.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PatternEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fabric(name: &str, system: Option<&str>, user: Option<&str>) -> PatternEntry {
        PatternEntry {
            name: name.to_string(),
            path: PathBuf::from(format!("/fabric/{name}")),
            payload: PatternPayload::Fabric {
                system: system.map(String::from),
                user: user.map(String::from),
            },
        }
    }

    fn custom(name: &str, content: &str, metadata: Value) -> PatternEntry {
        let metadata = match metadata {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        PatternEntry {
            name: name.to_string(),
            path: PathBuf::from(format!("/custom/{name}.md")),
            payload: PatternPayload::Custom {
                content: content.to_string(),
                metadata,
            },
        }
    }

    #[test]
    fn insert_preserves_scan_order() {
        let mut catalog = Catalog::default();
        catalog.insert(fabric("b", Some("s"), None));
        catalog.insert(fabric("a", Some("s"), None));
        catalog.insert(fabric("c", Some("s"), None));

        let names: Vec<_> = catalog.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn insert_replaces_in_place_on_name_collision() {
        let mut catalog = Catalog::default();
        catalog.insert(fabric("first", Some("s"), None));
        catalog.insert(fabric("shared", Some("fabric side"), None));
        catalog.insert(fabric("last", Some("s"), None));
        catalog.insert(custom("shared", "custom side", Value::Null));

        assert_eq!(catalog.len(), 3);
        let names: Vec<_> = catalog.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["first", "shared", "last"]);

        let entry = catalog.get("shared").unwrap();
        assert_eq!(entry.source(), PatternSource::Custom);
        assert_eq!(entry.render(), "custom side");
    }

    #[test]
    fn render_full_fabric_pair() {
        let entry = fabric("p", Some("S"), Some("U"));
        assert_eq!(entry.render(), "# System Prompt\n\nS\n\n# User Prompt\n\nU");
    }

    #[test]
    fn render_system_only_keeps_trailing_blank_line() {
        let entry = fabric("p", Some("S"), None);
        assert_eq!(entry.render(), "# System Prompt\n\nS\n\n");
    }

    #[test]
    fn render_user_only_has_no_leading_separator() {
        let entry = fabric("p", None, Some("U"));
        assert_eq!(entry.render(), "# User Prompt\n\nU");
    }

    #[test]
    fn custom_render_passes_body_through() {
        let entry = custom("p", "raw body\nwith lines", Value::Null);
        assert_eq!(entry.render(), "raw body\nwith lines");
    }

    #[test]
    fn metadata_accessors_default_when_missing() {
        let entry = custom("p", "body", Value::Null);
        assert_eq!(entry.description(), "");
        assert_eq!(entry.tags().count(), 0);
        assert_eq!(entry.tags_value(), Value::Array(Vec::new()));

        let entry = custom(
            "q",
            "body",
            serde_json::json!({"description": "desc", "tags": ["a", "b"]}),
        );
        assert_eq!(entry.description(), "desc");
        let tags: Vec<_> = entry.tags().collect();
        assert_eq!(tags, ["a", "b"]);
    }

    #[test]
    fn fabric_search_text_concatenates_parts() {
        assert_eq!(fabric("p", Some("sys"), Some("usr")).search_text(), "sysusr");
        assert_eq!(fabric("p", None, Some("usr")).search_text(), "usr");
    }
}
