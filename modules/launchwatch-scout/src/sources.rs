use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use launchwatch_common::Candidate;
use producthunt_client::{Post, ProductHuntClient};

use crate::traits::CandidateSource;

/// Daily launches from Product Hunt, ordered by votes.
pub struct ProductHuntSource {
    client: ProductHuntClient,
}

impl ProductHuntSource {
    pub fn new(client: ProductHuntClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CandidateSource for ProductHuntSource {
    async fn candidates(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Candidate>> {
        let posts = self
            .client
            .posts_by_votes(after, before, limit)
            .await
            .context("Failed to fetch Product Hunt posts")?;

        info!(count = posts.len(), %after, %before, "Fetched launch candidates");
        Ok(posts.into_iter().map(candidate_from_post).collect())
    }
}

fn candidate_from_post(post: Post) -> Candidate {
    let topics = post.topic_names();
    let thumbnail_url = post.thumbnail_url().map(String::from);
    Candidate {
        id: post.id,
        name: post.name,
        tagline: post.tagline,
        description: post.description.unwrap_or_default(),
        votes: post.votes_count,
        listing_url: post.url,
        website_url: post.website,
        thumbnail_url,
        topics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_maps_to_candidate() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "id": "901",
            "name": "Briefly",
            "tagline": "Meeting notes that write themselves",
            "description": null,
            "votesCount": 412,
            "url": "https://www.producthunt.com/posts/briefly",
            "website": "https://www.producthunt.com/r/briefly",
            "thumbnail": { "url": "https://ph-files.imgix.net/briefly.png" },
            "topics": { "edges": [{ "node": { "name": "Productivity" } }] }
        }))
        .unwrap();

        let candidate = candidate_from_post(post);

        assert_eq!(candidate.name, "Briefly");
        assert_eq!(candidate.description, "");
        assert_eq!(candidate.votes, 412);
        assert_eq!(candidate.listing_url, "https://www.producthunt.com/posts/briefly");
        assert_eq!(candidate.website_url, "https://www.producthunt.com/r/briefly");
        assert_eq!(candidate.thumbnail_url.as_deref(), Some("https://ph-files.imgix.net/briefly.png"));
        assert_eq!(candidate.topics, vec!["Productivity"]);
    }
}
