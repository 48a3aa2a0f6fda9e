use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::PortalSearchConfig;
use crate::core::error::PortalSearchError;
use crate::toolkit::search::{fuzzy, SearchService};
use crate::utils::safe_truncate;


pub const CONFIG_RESOURCE_URI: &str = "config://portal-search";


#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct ResolveSearchTermParams {
    #[schemars(description = "Free-text search query as typed by the user")]
    pub query: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct SuggestSearchTermsParams {
    #[schemars(description = "Free-text search query")]
    pub query: String,
    #[schemars(description = "Max suggestions (default: configured suggestion_limit)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct StringPairParams {
    #[schemars(description = "First string")]
    pub left: String,
    #[schemars(description = "Second string")]
    pub right: String,
}


#[derive(Clone)]
pub struct PortalSearchMcpServer {
    service: Arc<SearchService>,
    tool_router: ToolRouter<Self>,
}

impl PortalSearchMcpServer {

    pub fn new(service: SearchService) -> Self {
        Self {
            service: Arc::new(service),
            tool_router: Self::tool_router(),
        }
    }


    fn convert_error(err: PortalSearchError) -> McpError {
        if err.is_client_error() {
            McpError::invalid_params(err.to_string(), None)
        } else {
            McpError::internal_error(err.to_string(), None)
        }
    }


    fn result_to_json<T: Serialize>(result: T) -> Result<String, McpError> {
        serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    fn config_json(&self) -> String {
        let config = self.service.config();
        serde_json::to_string_pretty(&json!({
            "known_terms": self.service.vocabulary().terms(),
            "match_threshold": config.match_threshold,
            "search_route": config.search_route,
            "site_url": config.site_url,
            "max_query_chars": config.max_query_chars,
            "suggestion_limit": config.suggestion_limit,
            "tools": [
                "resolve_search_term",
                "suggest_search_terms",
                "score_similarity",
                "edit_distance",
                "list_known_terms",
            ],
        }))
        .unwrap_or_default()
    }
}

#[tool_router]
impl PortalSearchMcpServer {

    #[tool(description = "Snap a free-text portal search query onto the closest known search category (fuzzy match above the threshold), falling back to the lowercased query. Returns: {query, resolution: {resolved_term, score, matched_term, match_kind}, destination}")]
    async fn resolve_search_term(
        &self,
        Parameters(params): Parameters<ResolveSearchTermParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("🔍 Resolving: '{}'", safe_truncate(&params.query, 50));

        let outcome = self
            .service
            .submit(&params.query)
            .map_err(Self::convert_error)?;

        if outcome.resolution.is_match() {
            info!("✅ Resolved to '{}'", outcome.resolution.resolved_term);
        } else {
            info!("↩️ No known term matched, keeping query");
        }

        let json = Self::result_to_json(&outcome)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Rank known search categories against a query, best first. Only terms above the match threshold are listed. Returns: [{term, score, kind}]")]
    async fn suggest_search_terms(
        &self,
        Parameters(params): Parameters<SuggestSearchTermsParams>,
    ) -> Result<CallToolResult, McpError> {
        let suggestions = self
            .service
            .suggest(&params.query, params.limit.map(|l| l as usize))
            .map_err(Self::convert_error)?;

        info!("✅ {} suggestions", suggestions.len());

        let json = Self::result_to_json(&suggestions)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Similarity score in [0, 1] between two strings (substring containment scores 0.8, otherwise normalized edit distance). Returns: {score, kind, distance}")]
    async fn score_similarity(
        &self,
        Parameters(params): Parameters<StringPairParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = fuzzy::score_similarity(&params.left, &params.right);
        let json = Self::result_to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Levenshtein edit distance between two strings. Returns: {distance}")]
    async fn edit_distance(
        &self,
        Parameters(params): Parameters<StringPairParams>,
    ) -> Result<CallToolResult, McpError> {
        let distance = fuzzy::edit_distance(&params.left, &params.right);
        let json = Self::result_to_json(&json!({ "distance": distance }))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "List the known search categories in match priority order. Returns: [term]")]
    async fn list_known_terms(&self) -> Result<CallToolResult, McpError> {
        let json = Self::result_to_json(self.service.vocabulary().terms())?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}


#[tool_handler]
impl ServerHandler for PortalSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "portal-search".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Portal search-term resolution. Use resolve_search_term to turn a citizen's \
                 search box text into a search destination, suggest_search_terms to rank \
                 categories, and score_similarity / edit_distance to inspect the matcher."
                    .to_string(),
            ),
        }
    }


    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![
                RawResource::new(CONFIG_RESOURCE_URI, "portal-search-config".to_string())
                    .no_annotation(),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match uri.as_str() {
            CONFIG_RESOURCE_URI => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(self.config_json(), uri)],
            }),
            _ => {
                warn!("Unknown resource requested: {}", uri);
                Err(McpError::resource_not_found(
                    format!("Unknown resource: {}", uri),
                    Some(json!({ "uri": uri })),
                ))
            }
        }
    }
}


pub async fn run_server(config: PortalSearchConfig) -> anyhow::Result<()> {
    info!("🚀 Initializing portal search MCP server...");

    let service = SearchService::new(config)?;

    info!("✅ Portal search MCP server ready");
    info!("   📚 Known terms: {}", service.vocabulary().len());
    info!("   🎯 Threshold: {}", service.resolver().threshold());
    info!("   🧭 Route: {}", service.route().path());

    let server = PortalSearchMcpServer::new(service);
    let running = server.serve(stdio()).await?;
    running.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> PortalSearchMcpServer {
        PortalSearchMcpServer::new(SearchService::new(PortalSearchConfig::default()).unwrap())
    }

    fn json_body(result: &CallToolResult) -> serde_json::Value {
        let text = &result.content[0].as_text().unwrap().text;
        serde_json::from_str(text).unwrap()
    }

    fn pair(left: &str, right: &str) -> Parameters<StringPairParams> {
        Parameters(StringPairParams {
            left: left.to_string(),
            right: right.to_string(),
        })
    }

    #[test]
    fn test_convert_error_classifies() {
        let err = PortalSearchMcpServer::convert_error(PortalSearchError::EmptyQuery);
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = PortalSearchMcpServer::convert_error(PortalSearchError::Config("x".into()));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn test_config_json_lists_terms() {
        let value: serde_json::Value = serde_json::from_str(&server().config_json()).unwrap();
        assert_eq!(value["known_terms"][0], "events");
        assert_eq!(value["match_threshold"], 0.5);
        assert_eq!(value["search_route"], "/search");
        assert_eq!(value["tools"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "portal-search");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_resolve_tool_succeeds() {
        let result = server()
            .resolve_search_term(Parameters(ResolveSearchTermParams {
                query: "evnts".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_tool_rejects_blank_query() {
        let err = server()
            .resolve_search_term(Parameters(ResolveSearchTermParams {
                query: "   ".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_resolve_tool_returns_outcome() {
        let result = server()
            .resolve_search_term(Parameters(ResolveSearchTermParams {
                query: "Helth".to_string(),
            }))
            .await
            .unwrap();
        let body = json_body(&result);
        assert_eq!(body["resolution"]["resolved_term"], "health");
        assert_eq!(body["destination"], "/search?q=health");
    }

    #[tokio::test]
    async fn test_suggest_tool_honors_limit() {
        let server = server();

        let result = server
            .suggest_search_terms(Parameters(SuggestSearchTermsParams {
                query: "ent".to_string(),
                limit: Some(1),
            }))
            .await
            .unwrap();
        let body = json_body(&result);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["term"], "events");

        let result = server
            .suggest_search_terms(Parameters(SuggestSearchTermsParams {
                query: "ent".to_string(),
                limit: None,
            }))
            .await
            .unwrap();
        let body = json_body(&result);
        let terms: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["term"].as_str().unwrap())
            .collect();
        assert_eq!(terms, vec!["events", "announcements"]);
    }

    #[tokio::test]
    async fn test_score_similarity_tool() {
        let server = server();

        let body = json_body(&server.score_similarity(pair("event", "events")).await.unwrap());
        assert_eq!(body["score"], 0.8);
        assert_eq!(body["kind"], "substring");
        assert!(body.get("distance").is_none());

        let body = json_body(&server.score_similarity(pair("evnts", "events")).await.unwrap());
        assert_eq!(body["kind"], "edit_distance");
        assert_eq!(body["distance"], 1);
    }

    #[tokio::test]
    async fn test_edit_distance_tool() {
        let result = server().edit_distance(pair("kitten", "sitting")).await.unwrap();
        assert_eq!(json_body(&result)["distance"], 3);
    }

    #[tokio::test]
    async fn test_list_known_terms_tool() {
        let result = server().list_known_terms().await.unwrap();
        let body = json_body(&result);
        let terms = body.as_array().unwrap();
        assert_eq!(terms.len(), 11);
        assert_eq!(terms[0], "events");
        assert_eq!(terms[10], "community");
    }
}
