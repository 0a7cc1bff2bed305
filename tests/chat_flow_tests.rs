use std::sync::Arc;
use std::time::{Duration, Instant};

use koa::backend::{BackendError, ChatBackend, HttpBackend};
use koa::core::action::{Action, Effect, request_reply, update};
use koa::core::banner::BANNER_REMOVE_DELAY;
use koa::core::conversation::Role;
use koa::core::prefs::Theme;
use koa::core::state::App;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Starts a mock server answering POST /chat with the given response.
async fn chat_server(response: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(response)
        .mount(&mock_server)
        .await;
    mock_server
}

/// Submits `text` and performs the resulting request, returning the app
/// after the reply (or failure) has been applied.
async fn send_through(app: &mut App, text: &str, at: Instant) {
    let effect = update(
        app,
        Action::Submit {
            text: text.to_string(),
            at,
        },
    );
    let Effect::SpawnRequest(body) = effect else {
        panic!("expected a request, got {:?}", effect);
    };
    let outcome = request_reply(app.backend.as_ref(), &body).await;
    update(app, outcome);
}

fn app_for(uri: &str) -> App {
    App::new(Arc::new(HttpBackend::new(uri)), Theme::Dark)
}

// ============================================================================
// HttpBackend
// ============================================================================

#[tokio::test]
async fn test_http_backend_posts_json_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "message": "Hi there" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "Hello" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let reply = backend.send("Hi there").await;

    assert_eq!(reply.unwrap(), "Hello");
}

#[tokio::test]
async fn test_http_backend_server_error() {
    let mock_server = chat_server(ResponseTemplate::new(500).set_body_string("boom")).await;

    let backend = HttpBackend::new(mock_server.uri());
    let result = backend.send("Hi").await;

    match result {
        Err(BackendError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_backend_malformed_body() {
    let mock_server = chat_server(ResponseTemplate::new(200).set_body_string("not json")).await;

    let backend = HttpBackend::new(mock_server.uri());
    let result = backend.send("Hi").await;

    assert!(matches!(result, Err(BackendError::Parse(_))));
}

#[tokio::test]
async fn test_http_backend_missing_reply_field() {
    let mock_server =
        chat_server(ResponseTemplate::new(200).set_body_json(json!({ "answer": "Hello" }))).await;

    let backend = HttpBackend::new(mock_server.uri());
    let result = backend.send("Hi").await;

    assert!(matches!(result, Err(BackendError::Parse(_))));
}

#[tokio::test]
async fn test_http_backend_connection_refused() {
    // Grab a free port, then close it so nothing is listening.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let backend = HttpBackend::new(format!("http://127.0.0.1:{}", port));
    let result = backend.send("Hi").await;

    assert!(matches!(result, Err(BackendError::Network(_))));
}

// ============================================================================
// Full conversation flow
// ============================================================================

#[tokio::test]
async fn test_successful_reply_appends_one_assistant_message() {
    let mock_server =
        chat_server(ResponseTemplate::new(200).set_body_json(json!({ "reply": "Hello" }))).await;
    let mut app = app_for(&mock_server.uri());

    send_through(&mut app, "  Hi  ", Instant::now()).await;

    let messages = app.conversation.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role(), Role::User);
    assert_eq!(messages[0].text(), "Hi");
    assert_eq!(messages[1].role(), Role::Assistant);
    assert_eq!(messages[1].text(), "Hello");
    assert!(!app.awaiting_reply);
    assert!(!app.error_banner.is_visible());
}

#[tokio::test]
async fn test_server_error_keeps_user_message_and_shows_banner() {
    let mock_server = chat_server(ResponseTemplate::new(500)).await;
    let mut app = app_for(&mock_server.uri());

    send_through(&mut app, "Hi", Instant::now()).await;

    assert_eq!(app.conversation.len(), 1);
    assert_eq!(app.conversation.count(Role::User), 1);
    assert!(!app.awaiting_reply);
    assert!(app.error_banner.is_visible());
}

#[tokio::test]
async fn test_next_send_dismisses_banner_after_delay() {
    let mock_server = chat_server(ResponseTemplate::new(503)).await;
    let mut app = app_for(&mock_server.uri());
    let t0 = Instant::now();
    send_through(&mut app, "first", t0).await;
    assert!(app.error_banner.is_visible());

    // Second send hides the banner at once; layout removal waits for the timer.
    let t1 = t0 + Duration::from_secs(1);
    let effect = update(
        &mut app,
        Action::Submit {
            text: "second".into(),
            at: t1,
        },
    );
    assert_eq!(effect, Effect::SpawnRequest("second".into()));
    assert!(!app.error_banner.is_visible());
    assert!(app.error_banner.in_layout());

    update(&mut app, Action::Tick(t1 + BANNER_REMOVE_DELAY));
    assert!(!app.error_banner.in_layout());
}

#[tokio::test]
async fn test_empty_input_sends_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "x" })))
        .expect(0)
        .mount(&mock_server)
        .await;
    let mut app = app_for(&mock_server.uri());

    let effect = update(
        &mut app,
        Action::Submit {
            text: " \n\t ".into(),
            at: Instant::now(),
        },
    );

    assert_eq!(effect, Effect::None);
    assert!(app.conversation.is_empty());
}
