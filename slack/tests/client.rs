//! SlackClient behaviour against a mock Web API.

use std::time::Duration;

use error::Error;
use slack::SlackClient;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SlackClient {
  SlackClient::builder()
    .bot_token("xoxb-test")
    .app_token("xapp-test")
    .api_base(format!("{}/api", server.uri()))
    .retry_attempts(2)
    .retry_delay(Duration::from_millis(10))
    .build()
    .unwrap()
}

#[tokio::test]
async fn test_post_message_in_thread() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/chat.postMessage"))
    .and(header("authorization", "Bearer xoxb-test"))
    .and(body_json(serde_json::json!({
      "channel": "C123",
      "text": "The current weather temperature in Paris is 18.200000.",
      "thread_ts": "1700000000.000100"
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  client
    .message()
    .channel("C123")
    .text("The current weather temperature in Paris is 18.200000.")
    .thread_ts("1700000000.000100")
    .send(&client)
    .await
    .unwrap();
}

#[tokio::test]
async fn test_post_message_api_error_is_not_retried() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/chat.postMessage"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({"ok": false, "error": "channel_not_found"})),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let err = client
    .message()
    .channel("CNOPE")
    .text("hi")
    .send(&client)
    .await
    .unwrap_err();

  assert_eq!(err.to_string(), "API error: channel_not_found");
}

#[tokio::test]
async fn test_post_message_retries_rate_limit() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/chat.postMessage"))
    .respond_with(ResponseTemplate::new(429).append_header("Retry-After", "1"))
    .expect(3)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let err = client
    .message()
    .channel("C1")
    .text("hi")
    .send(&client)
    .await
    .unwrap_err();

  assert_eq!(err.to_string(), "Rate limit exceeded");
}

#[tokio::test]
async fn test_auth_test_returns_user_id() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/auth.test"))
    .and(header("authorization", "Bearer xoxb-test"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
      "ok": true,
      "url": "https://example.slack.com/",
      "team": "Example",
      "user": "weatherbot",
      "team_id": "T12345",
      "user_id": "U0BOT"
    })))
    .mount(&server)
    .await;

  assert_eq!(client_for(&server).auth_test().await.unwrap(), "U0BOT");
}

#[tokio::test]
async fn test_open_connection_uses_app_token() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/apps.connections.open"))
    .and(header("authorization", "Bearer xapp-test"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
      "ok": true,
      "url": "wss://wss-primary.slack.com/link/?ticket=abc&app_id=A1"
    })))
    .mount(&server)
    .await;

  let url = client_for(&server).open_connection().await.unwrap();
  assert!(url.starts_with("wss://"));
}

#[tokio::test]
async fn test_open_connection_reports_invalid_token() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/apps.connections.open"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({"ok": false, "error": "invalid_auth"})),
    )
    .mount(&server)
    .await;

  let err = client_for(&server).open_connection().await.unwrap_err();
  assert_eq!(err.to_string(), "API error: invalid_auth");
}

#[tokio::test]
async fn test_post_message_retries_server_errors() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/chat.postMessage"))
    .respond_with(ResponseTemplate::new(503).set_body_string("upstream connect error"))
    .expect(3)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let err = client
    .message()
    .channel("C1")
    .text("hi")
    .send(&client)
    .await
    .unwrap_err();

  assert!(matches!(err, Error::UpstreamStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_post_message_response_timeout_is_not_retried() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/chat.postMessage"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({"ok": true}))
        .set_delay(Duration::from_secs(2)),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = SlackClient::builder()
    .bot_token("xoxb-test")
    .api_base(format!("{}/api", server.uri()))
    .timeout(Duration::from_millis(200))
    .retry_attempts(2)
    .retry_delay(Duration::from_millis(10))
    .build()
    .unwrap();

  let err = client
    .message()
    .channel("C1")
    .text("hi")
    .send(&client)
    .await
    .unwrap_err();

  assert!(matches!(err, Error::HttpError(ref e) if e.is_timeout()));
}
