//! Shared helpers for driving the backend in-process

#![allow(dead_code)]

pub mod stdio;

use std::time::Duration;

use futures::StreamExt;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio::time::{Instant, timeout};
use tower::Service;
use tower_lsp::jsonrpc::Request;
use tower_lsp::lsp_types::PublishDiagnosticsParams;
use tower_lsp::{ClientSocket, LspService};

use spellcheck_language_server::lsp::Backend;

pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

pub fn create_initialize_request(id: i64) -> Request {
    Request::build("initialize")
        .params(json!({
            "processId": null,
            "rootUri": null,
            "capabilities": {}
        }))
        .id(id)
        .finish()
}

pub fn create_initialized_notification() -> Request {
    Request::build("initialized").params(json!({})).finish()
}

pub fn create_did_open_notification(uri: &str, text: &str) -> Request {
    Request::build("textDocument/didOpen")
        .params(json!({
            "textDocument": {
                "uri": uri,
                "languageId": "plaintext",
                "version": 1,
                "text": text
            }
        }))
        .finish()
}

pub fn create_did_change_notification(uri: &str, version: i32, text: &str) -> Request {
    Request::build("textDocument/didChange")
        .params(json!({
            "textDocument": { "uri": uri, "version": version },
            "contentChanges": [{ "text": text }]
        }))
        .finish()
}

pub fn create_did_close_notification(uri: &str) -> Request {
    Request::build("textDocument/didClose")
        .params(json!({ "textDocument": { "uri": uri } }))
        .finish()
}

pub fn create_completion_request(id: i64, uri: &str, line: u32, character: u32) -> Request {
    Request::build("textDocument/completion")
        .params(json!({
            "textDocument": { "uri": uri },
            "position": { "line": line, "character": character }
        }))
        .id(id)
        .finish()
}

pub fn create_execute_command_request(id: i64, command: &str, arguments: Value) -> Request {
    Request::build("workspace/executeCommand")
        .params(json!({ "command": command, "arguments": arguments }))
        .id(id)
        .finish()
}

/// Send a request and return the raw JSON-RPC response
pub async fn call(service: &mut LspService<Backend>, request: Request) -> Value {
    let response = service
        .call(request)
        .await
        .expect("service should not have exited")
        .expect("request should produce a response");
    serde_json::to_value(response).expect("response should serialize")
}

/// Initialize the server and send `initialized`
pub async fn initialize(service: &mut LspService<Backend>) {
    call(service, create_initialize_request(1)).await;
    service
        .call(create_initialized_notification())
        .await
        .expect("initialized notification");
}

/// Forward everything the server sends to the client into a channel
pub fn spawn_notification_collector(mut socket: ClientSocket) -> mpsc::UnboundedReceiver<Request> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(message) = socket.next().await {
            if tx.send(message).is_err() {
                break;
            }
        }
    });
    rx
}

/// Wait for the first notification with `method` whose params satisfy `accept`
pub async fn wait_for<F>(
    rx: &mut mpsc::UnboundedReceiver<Request>,
    method: &str,
    accept: F,
) -> Option<Value>
where
    F: Fn(&Value) -> bool,
{
    timeout(NOTIFICATION_TIMEOUT, async {
        while let Some(message) = rx.recv().await {
            if message.method() != method {
                continue;
            }
            let params = message.params().cloned().unwrap_or(Value::Null);
            if accept(&params) {
                return Some(params);
            }
        }
        None
    })
    .await
    .ok()
    .flatten()
}

pub async fn wait_for_notification(
    rx: &mut mpsc::UnboundedReceiver<Request>,
    method: &str,
) -> Option<Value> {
    wait_for(rx, method, |_| true).await
}

pub async fn wait_for_diagnostics(
    rx: &mut mpsc::UnboundedReceiver<Request>,
) -> Option<PublishDiagnosticsParams> {
    let params = wait_for_notification(rx, "textDocument/publishDiagnostics").await?;
    serde_json::from_value(params).ok()
}

/// Wait until the server reports a loaded dictionary
pub async fn wait_for_dictionary(rx: &mut mpsc::UnboundedReceiver<Request>) {
    wait_for(rx, "window/logMessage", |params| {
        params["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("Dictionary loaded"))
    })
    .await
    .expect("dictionary should load");
}

/// Collect every diagnostics notification sent during `window`
pub async fn collect_diagnostics(
    rx: &mut mpsc::UnboundedReceiver<Request>,
    window: Duration,
) -> Vec<PublishDiagnosticsParams> {
    let deadline = Instant::now() + window;
    let mut collected = Vec::new();

    while let Ok(Some(message)) = tokio::time::timeout_at(deadline, rx.recv()).await {
        if message.method() == "textDocument/publishDiagnostics" {
            if let Some(params) = message.params() {
                if let Ok(params) = serde_json::from_value(params.clone()) {
                    collected.push(params);
                }
            }
        }
    }

    collected
}

/// Send a notification, which never produces a response
pub async fn notify(service: &mut LspService<Backend>, notification: Request) {
    let response = service
        .call(notification)
        .await
        .expect("service should not have exited");
    assert!(response.is_none(), "notifications have no response");
}
