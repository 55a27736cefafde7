// Production adapters against mock HTTP servers.

use std::io::Cursor;

use ai_client::{Claude, OpenAi};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use launchwatch_common::{AnalyzedProduct, BusinessProblem};
use launchwatch_scout::extractor::VisionProblemExtractor;
use launchwatch_scout::filter::LlmProductFilter;
use launchwatch_scout::publisher::{NoopPublisher, TelegramPublisher};
use launchwatch_scout::traits::{ChannelPublisher, ProblemExtractor, ProductFilter, PublishReport};
use serde_json::json;
use telegram_client::TelegramClient;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', 0, 0];

fn product(n: u32) -> AnalyzedProduct {
    AnalyzedProduct {
        origin_url: format!("https://www.producthunt.com/posts/p{n}"),
        product_url: format!("https://p{n}.example.com"),
        name: format!("Product {n}"),
        problem: BusinessProblem {
            primary_customer: "Recruiters at staffing agencies".into(),
            core_job: "Screen inbound candidates".into(),
            main_pain: "Hundreds of resumes per opening".into(),
            success_metric: "Time to shortlist".into(),
        },
    }
}

fn problem_json() -> serde_json::Value {
    json!({
        "primary_customer": "Recruiters at staffing agencies",
        "core_job": "Screen inbound candidates",
        "main_pain": "Hundreds of resumes per opening",
        "success_metric": "Time to shortlist"
    })
}

// ---------------------------------------------------------------------------
// VisionProblemExtractor
// ---------------------------------------------------------------------------

async fn claude_replying(input: serde_json::Value) -> (MockServer, VisionProblemExtractor) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_partial_json(json!({ "max_tokens": 1024, "temperature": 0.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "tool_use", "id": "toolu_1", "name": "structured_response", "input": input }],
            "stop_reason": "tool_use"
        })))
        .mount(&server)
        .await;

    let claude = Claude::new("sk-ant-test", "claude-haiku-4-5-20251001").with_base_url(server.uri());
    (server, VisionProblemExtractor::with_claude(claude))
}

#[tokio::test]
async fn extractor_returns_validated_problem() {
    let (_server, extractor) = claude_replying(problem_json()).await;

    let problem = extractor.extract(PNG).await.unwrap();

    assert_eq!(problem.primary_customer, "Recruiters at staffing agencies");
    assert_eq!(problem.success_metric, "Time to shortlist");
}

#[tokio::test]
async fn extractor_bounds_oversized_capture() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_string_contains(r#""media_type":"image/jpeg""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "tool_use", "id": "toolu_1", "name": "structured_response", "input": problem_json() }],
            "stop_reason": "tool_use"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let claude = Claude::new("sk-ant-test", "claude-haiku-4-5-20251001").with_base_url(server.uri());
    let extractor = VisionProblemExtractor::with_claude(claude);

    let mut capture = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::from_pixel(120, 8_500, Rgb([240, 240, 240])))
        .write_to(&mut capture, ImageFormat::Png)
        .unwrap();

    let problem = extractor.extract(capture.get_ref()).await.unwrap();

    assert_eq!(problem.primary_customer, "Recruiters at staffing agencies");
}

#[tokio::test]
async fn extractor_rejects_blank_field() {
    let mut input = problem_json();
    input["main_pain"] = json!("  ");
    let (_server, extractor) = claude_replying(input).await;

    let err = extractor.extract(PNG).await.unwrap_err();

    assert!(err.to_string().contains("main_pain"));
}

#[tokio::test]
async fn extractor_rejects_overlong_field() {
    let mut input = problem_json();
    input["core_job"] = json!("x".repeat(BusinessProblem::MAX_FIELD_CHARS + 1));
    let (_server, extractor) = claude_replying(input).await;

    assert!(extractor.extract(PNG).await.is_err());
}

#[tokio::test]
async fn extractor_rejects_missing_field() {
    let (_server, extractor) = claude_replying(json!({ "primary_customer": "someone" })).await;

    assert!(extractor.extract(PNG).await.is_err());
}

// ---------------------------------------------------------------------------
// LlmProductFilter
// ---------------------------------------------------------------------------

async fn openai_replying(content: &str) -> (MockServer, LlmProductFilter) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Recruiters at staffing agencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }]
        })))
        .mount(&server)
        .await;

    let openai = OpenAi::new("sk-test", "gpt-5-mini").with_base_url(server.uri());
    (server, LlmProductFilter::with_openai(openai))
}

#[tokio::test]
async fn filter_maps_verdict_to_decision() {
    let (_server, filter) =
        openai_replying(r#"{"passed": true, "reason": "AI screening for a large B2B market"}"#).await;

    let decision = filter.decide(&product(1)).await.unwrap();

    assert!(decision.admitted);
    assert_eq!(decision.reason, "AI screening for a large B2B market");
}

#[tokio::test]
async fn filter_rejection_is_not_an_error() {
    let (_server, filter) = openai_replying(r#"{"passed": false, "reason": "no AI"}"#).await;

    let decision = filter.decide(&product(1)).await.unwrap();

    assert!(!decision.admitted);
}

#[tokio::test]
async fn filter_http_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream"))
        .mount(&server)
        .await;
    let filter = LlmProductFilter::with_openai(OpenAi::new("sk-test", "gpt-5-mini").with_base_url(server.uri()));

    assert!(filter.decide(&product(1)).await.is_err());
}

// ---------------------------------------------------------------------------
// TelegramPublisher
// ---------------------------------------------------------------------------

fn publisher(server: &MockServer) -> TelegramPublisher {
    let client = TelegramClient::new("123:abc").unwrap().with_base_url(&server.uri());
    TelegramPublisher::with_client(client, "@launches")
}

#[tokio::test]
async fn products_are_packed_into_one_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(json!({ "chat_id": "@launches", "parse_mode": "MarkdownV2" })))
        .and(body_string_contains("───"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let report = publisher(&server).publish(&[product(1), product(2), product(3)]).await;

    assert_eq!(report.messages_sent, 1);
    assert_eq!(report.messages_failed, 0);
}

#[tokio::test]
async fn empty_list_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(0)
        .mount(&server)
        .await;

    let report = publisher(&server).publish(&[]).await;

    assert_eq!(report.messages_sent, 0);
    assert_eq!(report.messages_failed, 0);
}

#[tokio::test]
async fn failed_message_does_not_stop_later_ones() {
    let server = MockServer::start().await;

    // Two oversized blocks force two messages. The first is refused.
    let mut first = product(1);
    first.problem.main_pain = "a".repeat(3000);
    let mut second = product(2);
    second.problem.main_pain = "b".repeat(3000);

    Mock::given(method("POST"))
        .and(body_string_contains("aaaa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "description": "Bad Request: can't parse entities"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("bbbb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let report = publisher(&server).publish(&[first, second]).await;

    assert_eq!(report.messages_failed, 1);
    assert_eq!(report.messages_sent, 1);
}

#[tokio::test]
async fn dry_run_counts_messages_as_skipped() {
    let report = NoopPublisher.publish(&[product(1), product(2)]).await;

    assert_eq!(report.messages_skipped, 1);
    assert_eq!(report.messages_sent, 0);
}

#[tokio::test]
async fn dry_run_with_no_products_skips_nothing() {
    let report = NoopPublisher.publish(&[]).await;

    assert_eq!(report, PublishReport::default());
}
