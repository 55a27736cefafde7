pub mod error;
pub mod types;

pub use error::{ProductHuntError, Result};
pub use types::{Connection, Edge, Media, Post, Topic};

use chrono::{DateTime, SecondsFormat, Utc};
use types::{GraphQlRequest, GraphQlResponse, PostsData, PostsVariables};

const BASE_URL: &str = "https://api.producthunt.com/v2/api/graphql";

const POSTS_QUERY: &str = r#"
query Posts($postedAfter: DateTime!, $postedBefore: DateTime!, $limit: Int!) {
  posts(order: VOTES, postedAfter: $postedAfter, postedBefore: $postedBefore, first: $limit) {
    edges {
      node {
        id
        name
        tagline
        description
        votesCount
        url
        website
        thumbnail { url }
        topics { edges { node { name } } }
      }
    }
  }
}
"#;

pub struct ProductHuntClient {
    client: reqwest::Client,
    token: String,
    endpoint: String,
}

impl ProductHuntClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            endpoint: BASE_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Posts launched in `[after, before)`, most-voted first, at most `limit`.
    pub async fn posts_by_votes(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Post>> {
        let request = GraphQlRequest {
            query: POSTS_QUERY,
            variables: PostsVariables {
                posted_after: after.to_rfc3339_opts(SecondsFormat::Secs, true),
                posted_before: before.to_rfc3339_opts(SecondsFormat::Secs, true),
                limit,
            },
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProductHuntError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let gql: GraphQlResponse<PostsData> = serde_json::from_str(&body)?;

        if !gql.errors.is_empty() {
            let messages: Vec<String> = gql.errors.into_iter().map(|e| e.message).collect();
            return Err(ProductHuntError::GraphQl(messages.join("; ")));
        }

        let data = gql
            .data
            .ok_or_else(|| ProductHuntError::Parse("response has no data".to_string()))?;

        let posts: Vec<Post> = data.posts.edges.into_iter().map(|e| e.node).collect();
        tracing::debug!(count = posts.len(), "Fetched Product Hunt posts");
        Ok(posts)
    }
}
