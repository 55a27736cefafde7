use chrono::{TimeZone, Utc};
use producthunt_client::{ProductHuntClient, ProductHuntError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ProductHuntClient {
    ProductHuntClient::new("ph-token".to_string()).with_endpoint(server.uri())
}

fn window() -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    (
        Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap(),
    )
}

fn post(id: &str, name: &str, votes: i64) -> serde_json::Value {
    json!({
        "node": {
            "id": id,
            "name": name,
            "tagline": format!("{name} tagline"),
            "description": null,
            "votesCount": votes,
            "url": format!("https://www.producthunt.com/posts/{id}"),
            "website": format!("https://www.producthunt.com/r/{id}"),
            "thumbnail": { "url": null },
            "topics": { "edges": [] }
        }
    })
}

#[tokio::test]
async fn posts_by_votes_sends_window_and_returns_posts_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "Bearer ph-token"))
        .and(body_partial_json(json!({
            "variables": {
                "postedAfter": "2026-10-18T00:00:00Z",
                "postedBefore": "2026-10-19T00:00:00Z",
                "limit": 20
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "posts": { "edges": [post("a", "Alpha", 500), post("b", "Beta", 120)] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (after, before) = window();
    let posts = client(&server).posts_by_votes(after, before, 20).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].name, "Alpha");
    assert_eq!(posts[0].votes_count, 500);
    assert_eq!(posts[1].url, "https://www.producthunt.com/posts/b");
}

#[tokio::test]
async fn graphql_errors_are_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Invalid token" }]
        })))
        .mount(&server)
        .await;

    let (after, before) = window();
    let err = client(&server).posts_by_votes(after, before, 20).await.unwrap_err();

    match err {
        ProductHuntError::GraphQl(msg) => assert_eq!(msg, "Invalid token"),
        other => panic!("expected GraphQl error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_error_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let (after, before) = window();
    let err = client(&server).posts_by_votes(after, before, 20).await.unwrap_err();

    assert!(matches!(err, ProductHuntError::Api { status: 401, .. }));
}

#[tokio::test]
async fn unexpected_shape_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "posts": { "nodes": [] } }
        })))
        .mount(&server)
        .await;

    let (after, before) = window();
    let err = client(&server).posts_by_votes(after, before, 20).await.unwrap_err();

    assert!(matches!(err, ProductHuntError::Parse(_)));
}
