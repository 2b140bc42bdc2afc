// src/mcp/resources.rs
// MCP Resource handlers — every catalog entry is browsable as pattern://<name>

use super::PatternServer;
use rmcp::{
    model::{
        AnnotateAble, Annotated, ListResourceTemplatesResult, ListResourcesResult,
        PaginatedRequestParams, RawResource, RawResourceTemplate, ReadResourceRequestParams,
        ReadResourceResult, ResourceContents,
    },
    service::{RequestContext, RoleServer},
};

const URI_SCHEME: &str = "pattern://";

/// Helper to wrap a raw resource/template without annotations.
fn no_ann<T: AnnotateAble>(raw: T) -> Annotated<T> {
    Annotated::new(raw, None)
}

impl PatternServer {
    /// Build the list of resource templates (parameterized URIs).
    fn resource_template_list() -> Vec<Annotated<RawResourceTemplate>> {
        vec![no_ann(RawResourceTemplate {
            uri_template: "pattern://{name}".into(),
            name: "pattern".into(),
            title: Some("Pattern Content".into()),
            description: Some("Rendered content of a single pattern".into()),
            mime_type: Some("text/markdown".into()),
            icons: None,
        })]
    }

    /// Handle `resources/list`: one resource per catalog entry, rebuilt from
    /// disk so the listing reflects current state.
    pub(super) async fn handle_list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, rmcp::ErrorData> {
        Ok(ListResourcesResult {
            resources: self.pattern_resource_list().await?,
            next_cursor: None,
            meta: None,
        })
    }

    /// Handle `resources/templates/list`.
    pub(super) async fn handle_list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, rmcp::ErrorData> {
        Ok(ListResourceTemplatesResult {
            resource_templates: Self::resource_template_list(),
            next_cursor: None,
            meta: None,
        })
    }

    /// Handle `resources/read`.
    pub(super) async fn handle_read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, rmcp::ErrorData> {
        self.read_pattern_resource(&request.uri).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Individual resource readers
    // ─────────────────────────────────────────────────────────────────────────

    /// One `pattern://<name>` resource per catalog entry.
    async fn pattern_resource_list(
        &self,
    ) -> Result<Vec<Annotated<RawResource>>, rmcp::ErrorData> {
        let catalog = self.rebuild().await.map_err(|e| {
            rmcp::ErrorData::internal_error(format!("Failed to scan patterns: {e}"), None)
        })?;

        Ok(catalog
            .iter()
            .map(|entry| {
                no_ann(RawResource {
                    uri: format!("{URI_SCHEME}{}", entry.name),
                    name: entry.name.clone(),
                    title: None,
                    description: Some(format!("Pattern: {}", entry.name)),
                    mime_type: Some("text/markdown".into()),
                    size: None,
                    icons: None,
                    meta: None,
                })
            })
            .collect())
    }

    /// Resolve a `pattern://` URI to the rendered content the get_pattern
    /// tool would serve for the same name.
    async fn read_pattern_resource(&self, uri: &str) -> Result<ReadResourceResult, rmcp::ErrorData> {
        let Some(name) = uri.strip_prefix(URI_SCHEME) else {
            return Err(rmcp::ErrorData::invalid_params(
                format!("Unknown resource URI: {uri}"),
                None,
            ));
        };

        let catalog = self.rebuild().await.map_err(|e| {
            rmcp::ErrorData::internal_error(format!("Failed to scan patterns: {e}"), None)
        })?;

        let Some(entry) = catalog.get(name) else {
            return Err(rmcp::ErrorData::invalid_params(
                format!("Pattern '{name}' not found"),
                None,
            ));
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some("text/markdown".into()),
                text: entry.render(),
                meta: None,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resource_template_list_has_pattern_template() {
        let templates = PatternServer::resource_template_list();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, "pattern://{name}");
        assert_eq!(templates[0].raw.name, "pattern");
        assert_eq!(templates[0].raw.mime_type.as_deref(), Some("text/markdown"));
    }

    /// Helper: server over temp roots with one fabric and one custom pattern.
    fn server_with_patterns() -> (TempDir, PatternServer) {
        let dir = TempDir::new().unwrap();
        let fabric = dir.path().join("fabric");
        let custom = dir.path().join("custom");

        let pattern_dir = fabric.join("summarize");
        fs::create_dir_all(&pattern_dir).unwrap();
        fs::write(pattern_dir.join("system.md"), "S").unwrap();

        fs::create_dir_all(&custom).unwrap();
        fs::write(custom.join("note.md"), "note body").unwrap();

        let server = PatternServer::new(&PatternConfig::with_roots(fabric, custom));
        (dir, server)
    }

    #[tokio::test]
    async fn list_exposes_every_pattern_as_markdown_resource() {
        let (_dir, server) = server_with_patterns();
        let resources = server.pattern_resource_list().await.unwrap();
        assert_eq!(resources.len(), 2);

        let uris: Vec<&str> = resources.iter().map(|r| r.raw.uri.as_str()).collect();
        assert!(uris.contains(&"pattern://summarize"));
        assert!(uris.contains(&"pattern://note"));

        for resource in &resources {
            assert_eq!(resource.raw.mime_type.as_deref(), Some("text/markdown"));
            assert_eq!(
                resource.raw.description.as_deref(),
                Some(format!("Pattern: {}", resource.raw.name).as_str())
            );
        }
    }

    #[tokio::test]
    async fn read_serves_rendered_content() {
        let (_dir, server) = server_with_patterns();

        let result = server
            .read_pattern_resource("pattern://summarize")
            .await
            .unwrap();
        let ResourceContents::TextResourceContents { text, .. } = &result.contents[0] else {
            panic!("expected text contents");
        };
        assert_eq!(text, "# System Prompt\n\nS\n\n");

        let result = server.read_pattern_resource("pattern://note").await.unwrap();
        let ResourceContents::TextResourceContents { text, .. } = &result.contents[0] else {
            panic!("expected text contents");
        };
        assert_eq!(text, "note body");
    }

    #[tokio::test]
    async fn read_rejects_unknown_scheme_and_missing_pattern() {
        let (_dir, server) = server_with_patterns();

        let err = server.read_pattern_resource("file:///etc/passwd").await;
        assert!(err.is_err(), "non-pattern URI should be rejected");

        let err = server.read_pattern_resource("pattern://missing").await;
        assert!(err.is_err(), "absent pattern should be rejected");
    }
}
