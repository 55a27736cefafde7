use serde_json::json;
use telegram_client::{SendMessage, TelegramClient, TelegramError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> TelegramClient {
    TelegramClient::new("123:abc").unwrap().with_base_url(&server.uri())
}

#[tokio::test]
async fn send_message_posts_to_bot_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(json!({
            "chat_id": "@launches",
            "text": "hello",
            "parse_mode": "MarkdownV2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": { "message_id": 7 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .send_message(&SendMessage::markdown_v2("@launches", "hello"))
        .await
        .expect("send should succeed");
}

#[tokio::test]
async fn ok_false_is_rejected_even_with_200() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "description": "Bad Request: can't parse entities"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .send_message(&SendMessage::markdown_v2("@launches", "bad *markup"))
        .await
        .unwrap_err();

    match err {
        TelegramError::Rejected(desc) => assert!(desc.contains("can't parse entities")),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "ok": false,
            "description": "Forbidden: bot is not a member of the channel chat"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .send_message(&SendMessage::markdown_v2("@launches", "hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, TelegramError::Api { status: 403, .. }));
}

#[tokio::test]
async fn non_json_success_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .send_message(&SendMessage::markdown_v2("@launches", "hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, TelegramError::Parse(_)));
}

#[tokio::test]
async fn network_error_does_not_expose_bot_token() {
    let client = TelegramClient::new("123456:SECRET-BOT-TOKEN")
        .unwrap()
        .with_base_url("http://127.0.0.1:1");

    let err = client
        .send_message(&SendMessage::markdown_v2("@launches", "hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, TelegramError::Network(_)));
    assert!(!err.to_string().contains("SECRET-BOT-TOKEN"), "token leaked: {err}");
    assert!(!format!("{err:?}").contains("SECRET-BOT-TOKEN"));
}
