// Blog tool backed by the WordPress.com REST API

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, Tool};
use wp_mcp_core::BlogService;

/// Tool to list the most recent blog posts
pub struct LatestPostsTool {
    blog: BlogService,
}

impl LatestPostsTool {
    pub const NAME: &'static str = "get-latest-posts";

    pub fn new(blog: BlogService) -> Self {
        Self { blog }
    }
}

#[async_trait::async_trait]
impl Tool for LatestPostsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: format!(
                "Get the {} most recent posts from {} (WordPress.com)",
                self.blog.posts_per_page(),
                self.blog.blog_name()
            ),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    // Takes no parameters; whatever the caller sends is ignored
    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult, ToolError> {
        Ok(CallToolResult::text(self.blog.latest_posts().await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wp_mcp_core::{ApiConfig, JsonFetcher};

    fn tool(base: &str) -> LatestPostsTool {
        let config = Arc::new(ApiConfig {
            blog_base: base.to_string(),
            ..Default::default()
        });
        LatestPostsTool::new(BlogService::new(JsonFetcher::new(&config).unwrap(), config))
    }

    #[test]
    fn test_schema() {
        let schema = tool("http://127.0.0.1:9").schema();

        assert_eq!(schema.name, "get-latest-posts");
        assert_eq!(
            schema.description,
            "Get the 10 most recent posts from hafiz.blog (WordPress.com)"
        );
        assert_eq!(schema.input_schema["properties"], json!({}));
    }

    #[tokio::test]
    async fn test_failure_is_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server.uri()).execute(json!({})).await.unwrap();

        assert_eq!(
            result.content,
            vec![ToolContent::text("No posts found or failed to fetch.")]
        );
    }
}
