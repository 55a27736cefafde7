use serde::{Deserialize, Serialize};

/// A launch as returned by the `posts` connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub description: Option<String>,
    pub votes_count: i64,
    /// Product Hunt listing page.
    pub url: String,
    /// Tracking link that redirects to the product's own site.
    pub website: String,
    #[serde(default)]
    pub thumbnail: Option<Media>,
    #[serde(default)]
    pub topics: Option<Connection<Topic>>,
}

impl Post {
    pub fn topic_names(&self) -> Vec<String> {
        self.topics
            .as_ref()
            .map(|c| c.edges.iter().map(|e| e.node.name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail.as_ref().and_then(|m| m.url.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

// ---------------------------------------------------------------------------
// GraphQL envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostsVariables {
    pub posted_after: String,
    pub posted_before: String,
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostsData {
    pub posts: Connection<Post>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_with_nulls_parses() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "Quiet",
            "tagline": "Focus timer",
            "description": null,
            "votesCount": 12,
            "url": "https://www.producthunt.com/posts/quiet",
            "website": "https://www.producthunt.com/r/abc",
            "thumbnail": null,
            "topics": null
        }))
        .unwrap();

        assert!(post.description.is_none());
        assert!(post.thumbnail_url().is_none());
        assert!(post.topic_names().is_empty());
    }

    #[test]
    fn topic_names_flatten_edges() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "id": "2",
            "name": "Drafty",
            "tagline": "AI writing",
            "votesCount": 300,
            "url": "https://www.producthunt.com/posts/drafty",
            "website": "https://www.producthunt.com/r/def",
            "thumbnail": { "url": "https://ph-files.imgix.net/t.png" },
            "topics": { "edges": [
                { "node": { "name": "Artificial Intelligence" } },
                { "node": { "name": "Writing" } }
            ] }
        }))
        .unwrap();

        assert_eq!(post.topic_names(), vec!["Artificial Intelligence", "Writing"]);
        assert_eq!(post.thumbnail_url(), Some("https://ph-files.imgix.net/t.png"));
    }
}
