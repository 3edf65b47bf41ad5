//! The `monitor` binary's exit status.

use std::path::PathBuf;

use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_env_file(name: &str, server: &MockServer) -> PathBuf {
    let file = std::env::temp_dir().join(format!("monitor-{name}-{}.env", std::process::id()));
    let contents = format!(
        "TARGET_URL={uri}/listado\n\
         TABLE_FILTER_LABEL=Especialidad\n\
         TABLE_FILTER_VALUE=A\n\
         TABLE_CELL_NAMES=Nombre\n\
         NTFY_TOPIC=vacantes\n\
         NTFY_BASE_URL={uri}\n\
         TELEGRAM_BOT_TOKEN=123:abc\n\
         TELEGRAM_CHAT_ID=42\n\
         TELEGRAM_API_BASE_URL={uri}\n",
        uri = server.uri()
    );
    std::fs::write(&file, contents).unwrap();
    file
}

async fn run_binary(env_file: &PathBuf) -> std::process::Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_monitor"))
        .arg("--env-file")
        .arg(env_file)
        .env_clear()
        .output()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_server_error_exits_non_zero_without_notifying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listado"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let env_file = write_env_file("error", &server);
    let output = run_binary(&env_file).await;
    let _ = std::fs::remove_file(&env_file);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    // The failure is reported once, with its cause chain.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("ERROR").count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("HTTP 500"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.method.as_str() == "GET"));
}

#[tokio::test]
async fn test_successful_check_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listado"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<table><tbody><tr><td data-label="Especialidad">A</td><td data-label="Nombre">Ana</td></tr></tbody></table>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vacantes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/bot.*/sendMessage$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let env_file = write_env_file("ok", &server);
    let output = run_binary(&env_file).await;
    let _ = std::fs::remove_file(&env_file);

    assert!(output.status.success());
}
