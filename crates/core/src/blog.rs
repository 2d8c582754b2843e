// Latest posts from the WordPress.com blog

use crate::config::ApiConfig;
use crate::fetch::JsonFetcher;
use crate::format::{format_post, join_blocks};
use crate::types::Post;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct BlogService {
    fetcher: JsonFetcher,
    config: Arc<ApiConfig>,
}

impl BlogService {
    pub fn new(fetcher: JsonFetcher, config: Arc<ApiConfig>) -> Self {
        Self { fetcher, config }
    }

    pub fn blog_name(&self) -> &str {
        &self.config.blog_name
    }

    pub fn posts_per_page(&self) -> u32 {
        self.config.posts_per_page
    }

    /// The most recent page of posts, newest first as returned upstream.
    pub async fn latest_posts(&self) -> String {
        let posts = self
            .fetcher
            .fetch::<Vec<Post>>(&self.config.posts_url(), &[])
            .await
            .unwrap_or_default();

        if posts.is_empty() {
            return "No posts found or failed to fetch.".to_string();
        }

        tracing::debug!(count = posts.len(), "Formatting posts");
        let blocks: Vec<String> = posts.iter().map(format_post).collect();
        join_blocks(&format!("Latest posts from {}:", self.config.blog_name), &blocks)
    }
}
