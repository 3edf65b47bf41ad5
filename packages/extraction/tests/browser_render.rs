//! Rendered fetch against a local page. Needs a Chrome install; run with
//! `cargo test -p extraction -- --ignored`.

#![cfg(feature = "browser")]

use std::time::{Duration, Instant};

use extraction::{
    extract_content, filter_table_rows, DropdownInteraction, DropdownMode, ExtractionError,
    Fetcher, InteractionError, RenderedFetcher,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<select id="especialidad">
  <option value="">--</option>
  <option value="1">Matemática</option>
  <option value="2">Física</option>
</select>
<div id="resultados"></div>
<script>
  document.getElementById('especialidad').addEventListener('change', (e) => {
    const label = e.target.options[e.target.selectedIndex].label;
    document.getElementById('resultados').innerHTML =
      '<table><tbody><tr><td data-label="Especialidad">' + label +
      '</td><td data-label="Nombre">Ana</td></tr></tbody></table>';
  });
</script>
</body></html>"#;

async fn serve() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(PAGE),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
#[ignore = "requires a local Chrome"]
async fn test_native_dropdown_renders_table() {
    let server = serve().await;
    let fetcher = RenderedFetcher::new()
        .with_content_selector("#resultados table")
        .with_dropdown(
            DropdownInteraction::new("#especialidad")
                .with_label("Matemática")
                .with_settle_delay(Duration::from_millis(200)),
        );

    let page = fetcher.fetch(&server.uri()).await.unwrap();
    let region = extract_content(&page.html, "#resultados").unwrap();
    let rows = filter_table_rows(&region, "Especialidad", "Matemática", &["Nombre".to_string()])
        .into_rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cells(), ["Ana"]);
}

#[tokio::test]
#[ignore = "requires a local Chrome"]
async fn test_unknown_option_is_interaction_error() {
    let server = serve().await;
    let fetcher = RenderedFetcher::new().with_dropdown(
        DropdownInteraction::new("#especialidad")
            .with_value("99")
            .with_settle_delay(Duration::from_millis(100)),
    );

    let err = fetcher.fetch(&server.uri()).await.unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::Interaction(InteractionError::OptionNotFound { .. })
    ));
}

const LISTBOX_PAGE: &str = r#"<!DOCTYPE html>
<html><head><style>
  #opciones { display: none; }
  #opciones.abierto { display: block; }
</style></head><body>
<div id="especialidad" class="mud-select" style="width:200px;height:30px">Elegir</div>
<ul id="opciones">
  <li role="option" data-id="1">  Matemática
     General </li>
  <li role="option" data-id="2">Física</li>
</ul>
<div id="resultados"></div>
<script>
  document.getElementById('especialidad').addEventListener('click', () => {
    document.getElementById('opciones').classList.add('abierto');
  });
  document.querySelectorAll('[role=option]').forEach((li) => {
    li.addEventListener('click', () => {
      document.getElementById('resultados').innerHTML =
        '<table><tbody><tr><td data-label="Especialidad">' + li.dataset.id +
        '</td><td data-label="Nombre">Carla</td></tr></tbody></table>';
      document.getElementById('opciones').classList.remove('abierto');
    });
  });
</script>
</body></html>"#;

async fn serve_listbox() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(LISTBOX_PAGE),
        )
        .mount(&server)
        .await;
    server
}

fn custom_dropdown(label: &str) -> DropdownInteraction {
    DropdownInteraction::new("#especialidad")
        .with_label(label)
        .with_mode(DropdownMode::Custom)
        .with_settle_delay(Duration::from_millis(200))
}

#[tokio::test]
#[ignore = "requires a local Chrome"]
async fn test_custom_dropdown_clicks_matching_option() {
    let server = serve_listbox().await;
    let fetcher = RenderedFetcher::new()
        .with_content_selector("#resultados table")
        .with_dropdown(custom_dropdown("matemática general"));

    let page = fetcher.fetch(&server.uri()).await.unwrap();
    let region = extract_content(&page.html, "#resultados").unwrap();
    let rows = filter_table_rows(&region, "Especialidad", "1", &["Nombre".to_string()])
        .into_rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cells(), ["Carla"]);
}

#[tokio::test]
#[ignore = "requires a local Chrome"]
async fn test_custom_dropdown_missing_option_times_out() {
    let server = serve_listbox().await;
    let fetcher = RenderedFetcher::new().with_dropdown(custom_dropdown("Química"));

    let err = fetcher.fetch(&server.uri()).await.unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::Interaction(InteractionError::Timeout { .. })
    ));
}

const SLOW_IMAGE_PAGE: &str =
    r#"<html><body><img src="/lento.png"><p id="listo">ok</p></body></html>"#;

#[tokio::test]
#[ignore = "requires a local Chrome"]
async fn test_slow_subresource_does_not_block_capture() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lento.png"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(60)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(SLOW_IMAGE_PAGE),
        )
        .mount(&server)
        .await;

    let started = Instant::now();
    let page = RenderedFetcher::new()
        .fetch(&format!("{}/", server.uri()))
        .await
        .unwrap();

    assert!(page.html.contains(r#"<p id="listo">ok</p>"#));
    assert!(started.elapsed() < Duration::from_secs(20));
}
