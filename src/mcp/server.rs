// Capability registration and dispatch
//
// One resource (fixed status text), two tools (echo, GET proxy), one
// prompt (slogan template). Handlers are stateless; the only shared
// object is the HTTP client.

use std::collections::HashMap;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::fetch;

pub const STATUS_URI: &str = "resource://status/server";

// The request count is a fixed demo string, not a live counter.
pub const STATUS_TEXT: &str = "服务器运行正常，自上次启动以来已处理 100 个请求。";

const ECHO_PREFIX: &str = "你说了：";
const RESULT_PREFIX: &str = "请求结果：";
const ERROR_PREFIX: &str = "请求失败：";

/// Arguments for the `echo_message` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EchoArgs {
    /// The message to echo back
    pub message: String,
}

/// Arguments for the `send-get-request` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRequestArgs {
    /// Absolute URL to fetch
    pub uri: String,
    /// Query parameters appended to the URL
    #[serde(default)]
    pub params: HashMap<String, Value>,
    /// Extra request headers
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Clone)]
pub struct DemoServer {
    http: reqwest::Client,
    tool_router: ToolRouter<Self>,
}

impl DemoServer {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            tool_router: Self::tool_router(),
        }
    }
}

/// Body of the user message produced by the `generate_slogan` prompt.
pub fn slogan_text(theme: &str) -> String {
    format!("请以“{theme}”为主题，创作一句简短、有创意的宣传口号。")
}

#[tool_router]
impl DemoServer {
    #[tool(name = "echo_message", description = "Echo the message back to the caller, verbatim")]
    async fn echo_message(
        &self,
        Parameters(args): Parameters<EchoArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(format!(
            "{ECHO_PREFIX}{}",
            args.message
        ))]))
    }

    #[tool(
        name = "send-get-request",
        description = "Send a single HTTP GET request to a URL and return the 'data' field of its JSON response"
    )]
    async fn send_get_request(
        &self,
        Parameters(args): Parameters<GetRequestArgs>,
    ) -> Result<CallToolResult, McpError> {
        // Soft failure by contract: the call always completes; errors are
        // carried in the text payload.
        let text = match fetch::send_get(&self.http, &args.uri, &args.params, args.headers.as_ref())
            .await
        {
            Ok(data) => format!("{RESULT_PREFIX}{data}"),
            Err(err) => {
                tracing::warn!(uri = %args.uri, error = %err, "GET proxy failed");
                format!("{ERROR_PREFIX}{err}")
            }
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for DemoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_prompts()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Demonstration MCP server: a status resource, an echo tool, \
                 an HTTP GET proxy tool and a slogan prompt."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut status = RawResource::new(STATUS_URI, "status");
        status.description = Some("Fixed server status report".into());
        status.mime_type = Some("text/plain".into());
        Ok(ListResourcesResult {
            resources: vec![status.no_annotation()],
            next_cursor: None,
            meta: Default::default(),
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri, .. }: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        if uri == STATUS_URI {
            Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(STATUS_TEXT, uri)],
            })
        } else {
            Err(McpError::resource_not_found(
                "resource not found",
                Some(json!({ "uri": uri })),
            ))
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            next_cursor: None,
            meta: Default::default(),
            prompts: vec![Prompt::new(
                "generate_slogan",
                Some("Generate a short, creative slogan for a theme"),
                Some(vec![PromptArgument {
                    name: "theme".into(),
                    title: None,
                    description: Some("The theme to write a slogan for".into()),
                    required: Some(true),
                }]),
            )],
        })
    }

    async fn get_prompt(
        &self,
        GetPromptRequestParam { name, arguments, .. }: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        match name.as_str() {
            "generate_slogan" => {
                let theme = arguments
                    .as_ref()
                    .and_then(|args| args.get("theme"))
                    .and_then(|value| value.as_str())
                    .ok_or_else(|| {
                        McpError::invalid_params("missing required argument: theme", None)
                    })?;
                Ok(GetPromptResult {
                    description: Some("Generate a short, creative slogan for a theme".into()),
                    messages: vec![PromptMessage::new_text(
                        PromptMessageRole::User,
                        slogan_text(theme),
                    )],
                })
            }
            _ => Err(McpError::invalid_params(
                "prompt not found",
                Some(json!({ "name": name })),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(result: &CallToolResult) -> &str {
        result.content[0]
            .as_text()
            .map(|t| t.text.as_str())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn echo_prefixes_message_verbatim() {
        let server = DemoServer::new(fetch::client().unwrap());
        let result = server
            .echo_message(Parameters(EchoArgs {
                message: "hello".into(),
            }))
            .await
            .unwrap();
        assert_eq!(text_of(&result), "你说了：hello");
    }

    #[tokio::test]
    async fn echo_does_not_transform_input() {
        let server = DemoServer::new(fetch::client().unwrap());
        let message = "  spaces & <tags> 保留 ";
        let result = server
            .echo_message(Parameters(EchoArgs {
                message: message.into(),
            }))
            .await
            .unwrap();
        assert_eq!(text_of(&result), format!("你说了：{message}"));
    }

    #[tokio::test]
    async fn get_proxy_reports_failure_as_text() {
        let server = DemoServer::new(fetch::client().unwrap());
        let result = server
            .send_get_request(Parameters(GetRequestArgs {
                uri: "http://127.0.0.1:1/".into(),
                params: HashMap::new(),
                headers: None,
            }))
            .await
            .unwrap();
        assert!(text_of(&result).starts_with("请求失败："));
    }

    #[test]
    fn slogan_embeds_theme_verbatim() {
        let text = slogan_text("清晨咖啡");
        assert!(text.contains("清晨咖啡"));
        assert!(text.contains("宣传口号"));
    }

    #[test]
    fn status_text_is_fixed() {
        assert_eq!(STATUS_TEXT, "服务器运行正常，自上次启动以来已处理 100 个请求。");
    }
}
