//! Fan-out against fake ntfy and Telegram servers.

use notifier::{MockChannel, Notifier, NtfyOptions, TelegramOptions};
use serde_json::json;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

fn options(server: &MockServer) -> (NtfyOptions, TelegramOptions) {
    let ntfy = NtfyOptions {
        topic: "vacantes".to_string(),
        base_url: server.uri(),
    };
    let mut telegram = TelegramOptions::new("123:abc", "42");
    telegram.api_base_url = server.uri();
    (ntfy, telegram)
}

#[tokio::test]
async fn test_each_enabled_channel_gets_one_attempt() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/vacantes"))
        .and(matchers::body_string("Hay 1 vacantes de A disponibles\n\n• Ana | Liceo 1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (ntfy, telegram) = options(&server);
    let notifier = Notifier::from_options(&ntfy, &telegram);
    assert_eq!(notifier.len(), 2);

    notifier
        .notify("Hay 1 vacantes de A disponibles", "• Ana | Liceo 1")
        .await;
}

#[tokio::test]
async fn test_failure_on_one_channel_is_isolated() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/vacantes"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (ntfy, telegram) = options(&server);
    let extra = MockChannel::new("extra");
    let mut notifier = Notifier::from_options(&ntfy, &telegram);
    notifier.add_channel(Box::new(extra.clone()));

    notifier.notify("titulo", "cuerpo").await;

    assert_eq!(extra.sent(), ["titulo\n\ncuerpo"]);
}

#[tokio::test]
async fn test_disabled_channels_are_never_called() {
    let server = MockServer::start().await;

    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (mut ntfy, mut telegram) = options(&server);
    ntfy.topic.clear();
    telegram.chat_id.clear();

    let notifier = Notifier::from_options(&ntfy, &telegram);
    assert!(notifier.is_empty());
    notifier.notify("titulo", "cuerpo").await;
}
