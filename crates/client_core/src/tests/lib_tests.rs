use super::*;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use shared::error::GENERIC_SERVER_ERROR;
use tokio::{net::TcpListener, sync::Mutex};

use crate::error::TRANSPORT_ERROR_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CapturedField {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

#[derive(Clone)]
struct ServerState {
    requests: Arc<Mutex<Vec<Vec<CapturedField>>>>,
    status: StatusCode,
    body: String,
}

async fn handle_process(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let body = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        fields.push(CapturedField {
            name,
            file_name,
            content_type,
            body,
        });
    }
    state.requests.lock().await.push(fields);
    (state.status, state.body.clone())
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn spawn_process_server(
    status: StatusCode,
    body: impl Into<String>,
) -> anyhow::Result<(String, ServerState)> {
    let state = ServerState {
        requests: Arc::new(Mutex::new(Vec::new())),
        status,
        body: body.into(),
    };
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/process", post(handle_process))
        .route("/api/health", get(handle_health))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api/process"), state))
}

fn success_body() -> String {
    serde_json::to_string(&ProcessResponse {
        categoria: "Fatura".to_string(),
        resposta: "Linha1\nLinha2".to_string(),
        texto_original: "oi<b>".to_string(),
    })
    .expect("encode")
}

fn temp_email_file(name: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("triage_client_test_{suffix}"));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write temp file");
    path
}

fn controller_for(endpoint: &str) -> SubmissionController<HttpProcessApi> {
    SubmissionController::new(HttpProcessApi::new(endpoint).expect("endpoint"))
}

#[tokio::test]
async fn text_submission_posts_trimmed_texto_field() {
    let (endpoint, server) = spawn_process_server(StatusCode::OK, success_body())
        .await
        .expect("server");
    let mut controller = controller_for(&endpoint);
    controller.on_text_input("  Olá, preciso de suporte no pedido 42  \n");

    let mut view = HtmlView::new();
    let state = controller.on_submit(&mut view).await;

    assert!(matches!(state, DisplayState::Result(_)));
    assert_eq!(view.transitions(), ["loading", "result"]);

    let requests = server.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0],
        vec![CapturedField {
            name: "texto".to_string(),
            file_name: None,
            content_type: None,
            body: "Olá, preciso de suporte no pedido 42".as_bytes().to_vec(),
        }]
    );
}

#[tokio::test]
async fn file_submission_posts_file_field_with_name() {
    let (endpoint, server) = spawn_process_server(StatusCode::OK, success_body())
        .await
        .expect("server");
    let path = temp_email_file("email.txt", "Assunto: status da reunião");
    let mut controller = controller_for(&endpoint);
    controller.on_text_input("rascunho que será descartado");
    controller.on_file_change(Some(SelectedFile::from_path(&path)));

    let mut view = HtmlView::new();
    controller.on_submit(&mut view).await;

    let requests = server.requests.lock().await;
    assert_eq!(requests.len(), 1);
    let fields = &requests[0];
    assert_eq!(fields.len(), 1, "exactly one multipart field expected");
    assert_eq!(fields[0].name, "file");
    assert_eq!(fields[0].file_name.as_deref(), Some("email.txt"));
    assert_eq!(fields[0].content_type.as_deref(), Some("text/plain"));
    assert_eq!(fields[0].body, "Assunto: status da reunião".as_bytes());

    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir).expect("cleanup");
    }
}

#[tokio::test]
async fn success_renders_category_reply_and_escaped_original() {
    let (endpoint, _server) = spawn_process_server(StatusCode::OK, success_body())
        .await
        .expect("server");
    let mut controller = controller_for(&endpoint);
    controller.on_text_input("oi<b>");

    let mut view = HtmlView::new();
    controller.on_submit(&mut view).await;

    let html = view.inner_html();
    assert!(html.contains("Linha1<br>Linha2"));
    assert!(html.contains("<strong>Categoria:</strong> Fatura"));
    assert!(html.contains("oi&lt;b&gt;"));
    assert!(!html.contains("oi<b>"));
}

#[tokio::test]
async fn server_error_message_is_rendered_exactly() {
    let (endpoint, _server) =
        spawn_process_server(StatusCode::TOO_MANY_REQUESTS, r#"{"error":"limite excedido"}"#)
            .await
            .expect("server");
    let mut controller = controller_for(&endpoint);
    controller.on_text_input("qualquer texto");

    let mut view = HtmlView::new();
    let state = controller.on_submit(&mut view).await;

    assert_eq!(state, DisplayState::Error("limite excedido".to_string()));
    assert_eq!(view.inner_html(), r#"<div class="erro">limite excedido</div>"#);
}

#[tokio::test]
async fn server_detail_is_used_when_error_is_absent() {
    let (endpoint, _server) = spawn_process_server(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"detail":"Nenhum conteúdo enviado"}"#,
    )
    .await
    .expect("server");
    let mut controller = controller_for(&endpoint);
    controller.on_text_input("x");

    let state = controller.on_submit(&mut HtmlView::new()).await;
    assert_eq!(
        state,
        DisplayState::Error("Nenhum conteúdo enviado".to_string())
    );
}

#[tokio::test]
async fn empty_error_body_falls_back_to_generic_message() {
    let (endpoint, _server) = spawn_process_server(StatusCode::INTERNAL_SERVER_ERROR, "")
        .await
        .expect("server");
    let mut controller = controller_for(&endpoint);
    controller.on_text_input("x");

    let state = controller.on_submit(&mut HtmlView::new()).await;
    assert_eq!(state, DisplayState::Error(GENERIC_SERVER_ERROR.to_string()));
}

#[tokio::test]
async fn malformed_success_body_is_reported_with_details() {
    let (endpoint, _server) = spawn_process_server(StatusCode::OK, "<html>oops</html>")
        .await
        .expect("server");
    let mut controller = controller_for(&endpoint);
    controller.on_text_input("x");

    let state = controller.on_submit(&mut HtmlView::new()).await;
    let DisplayState::Error(message) = &state else {
        panic!("expected error state, got {state:?}");
    };
    assert!(message.starts_with(TRANSPORT_ERROR_PREFIX), "{message}");
    assert!(message.contains("expected value"), "{message}");
}

#[tokio::test]
async fn unreachable_endpoint_is_reported_with_details() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let mut controller = controller_for(&format!("http://{addr}/api/process"));
    controller.on_text_input("x");

    let mut view = HtmlView::new();
    let state = controller.on_submit(&mut view).await;
    let DisplayState::Error(message) = &state else {
        panic!("expected error state, got {state:?}");
    };
    assert!(message.starts_with(TRANSPORT_ERROR_PREFIX), "{message}");
    assert!(message.contains("error sending request"), "{message}");
    assert_eq!(view.transitions(), ["loading", "error"]);
}

#[tokio::test]
async fn unreadable_file_is_reported_without_reaching_server() {
    let (endpoint, server) = spawn_process_server(StatusCode::OK, success_body())
        .await
        .expect("server");
    let mut controller = controller_for(&endpoint);
    controller.on_file_change(Some(SelectedFile::new(
        "sumiu.pdf",
        "/nonexistent/triage/sumiu.pdf",
    )));

    let state = controller.on_submit(&mut HtmlView::new()).await;
    let DisplayState::Error(message) = &state else {
        panic!("expected error state, got {state:?}");
    };
    assert!(message.starts_with(TRANSPORT_ERROR_PREFIX), "{message}");
    assert!(message.contains("failed to read"), "{message}");
    assert!(server.requests.lock().await.is_empty());
}

#[tokio::test]
async fn health_check_reads_status_from_sibling_route() {
    let (endpoint, _server) = spawn_process_server(StatusCode::OK, success_body())
        .await
        .expect("server");
    let api = HttpProcessApi::new(&endpoint).expect("endpoint");

    assert!(api.health_url().expect("health url").path().ends_with("/api/health"));
    let health = api.health().await.expect("health");
    assert_eq!(health.status, "ok");
}

#[test]
fn rejects_invalid_endpoint() {
    let err = HttpProcessApi::new("/api/process").expect_err("relative url must fail");
    assert!(err.to_string().contains("/api/process"));
}

#[test]
fn interpret_reply_maps_status_and_body() {
    let ok = interpret_reply(RawReply::new(StatusCode::OK, success_body())).expect("success");
    assert_eq!(ok.categoria, "Fatura");

    let err = interpret_reply(RawReply::new(
        StatusCode::BAD_REQUEST,
        r#"{"error":"Erro ao ler arquivo"}"#,
    ))
    .expect_err("non-2xx");
    assert!(matches!(err, SubmitError::Server(_)));
    assert_eq!(err.display_message(), "Erro ao ler arquivo");

    let err = interpret_reply(RawReply::new(StatusCode::CREATED, "{"))
        .expect_err("truncated json");
    assert!(matches!(err, SubmitError::Decode(_)));
}
