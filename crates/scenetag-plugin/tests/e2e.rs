//! End-to-end invocation tests against a scripted GraphQL endpoint.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

use scenetag_core::PluginInput;
use scenetag_plugin::run_invocation;

/// Scripted remote: canned tag/scene state plus a record of the
/// operations and scene updates it received.
#[derive(Clone, Default)]
struct Remote {
    tags: Arc<Mutex<Vec<Value>>>,
    scenes: Arc<Mutex<Vec<Value>>>,
    operations: Arc<Mutex<Vec<String>>>,
    updates: Arc<Mutex<Vec<Value>>>,
}

async fn handler(State(remote): State<Remote>, Json(body): Json<Value>) -> Json<Value> {
    let query = body["query"].as_str().unwrap_or_default();
    let variables = body["variables"].clone();

    if query.contains("allTags") {
        remote.operations.lock().unwrap().push("allTags".into());
        let tags = remote.tags.lock().unwrap().clone();
        return Json(json!({ "data": { "allTags": tags } }));
    }
    if query.contains("tagCreate") {
        remote.operations.lock().unwrap().push("tagCreate".into());
        let name = variables["input"]["name"].clone();
        remote
            .tags
            .lock()
            .unwrap()
            .push(json!({ "id": "900", "name": name }));
        return Json(json!({ "data": { "tagCreate": { "id": "900" } } }));
    }
    if query.contains("tagDestroy") {
        remote.operations.lock().unwrap().push("tagDestroy".into());
        return Json(json!({ "data": { "tagDestroy": true } }));
    }
    if query.contains("findScenes") {
        remote.operations.lock().unwrap().push("findScenes".into());
        let scenes = remote.scenes.lock().unwrap().clone();
        return Json(json!({
            "data": { "findScenes": { "count": scenes.len(), "scenes": scenes } }
        }));
    }
    if query.contains("sceneUpdate") {
        remote.operations.lock().unwrap().push("sceneUpdate".into());
        remote.updates.lock().unwrap().push(variables["input"].clone());
        return Json(json!({
            "data": { "sceneUpdate": { "id": variables["input"]["id"].clone() } }
        }));
    }

    Json(json!({ "errors": [{ "message": "unknown operation" }] }))
}

async fn spawn_remote(remote: Remote) -> u16 {
    let app = Router::new()
        .route("/graphql", post(handler))
        .with_state(remote);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    port
}

/// Build the input envelope exactly as the host would send it.
fn host_input(mode: &str, port: u16) -> PluginInput {
    serde_json::from_value(json!({
        "args": { "mode": mode },
        "server_connection": { "scheme": "http", "port": port }
    }))
    .unwrap()
}

#[tokio::test]
async fn test_add_creates_tag_and_updates_untagged_scene() {
    let remote = Remote::default();
    remote
        .scenes
        .lock()
        .unwrap()
        .push(json!({ "id": "1", "tags": [] }));
    let port = spawn_remote(remote.clone()).await;

    let output = run_invocation(host_input("add", port)).await;

    assert_eq!(output.output.as_deref(), Some("ok"));
    assert!(output.error.is_none());
    assert_eq!(
        *remote.operations.lock().unwrap(),
        vec!["allTags", "tagCreate", "findScenes", "sceneUpdate"]
    );
    assert_eq!(
        *remote.updates.lock().unwrap(),
        vec![json!({ "id": "1", "tag_ids": ["900"] })]
    );
}

#[tokio::test]
async fn test_remove_without_matching_tag_is_a_noop() {
    let remote = Remote::default();
    let port = spawn_remote(remote.clone()).await;

    let output = run_invocation(host_input("remove", port)).await;

    assert_eq!(output.output.as_deref(), Some("ok"));
    // The lookup ran, but no mutation followed.
    assert_eq!(*remote.operations.lock().unwrap(), vec!["allTags"]);
}

#[tokio::test]
async fn test_add_without_scenes_reports_error_envelope() {
    let remote = Remote::default();
    let port = spawn_remote(remote.clone()).await;

    let output = run_invocation(host_input("add", port)).await;

    assert!(output.output.is_none());
    let error = output.error.unwrap();
    assert!(error.contains("no scenes"));
    // Tag resolution ran, but the scene update never happened.
    let operations = remote.operations.lock().unwrap();
    assert!(!operations.iter().any(|op| op == "sceneUpdate"));
}

#[tokio::test]
async fn test_unrecognized_mode_reports_error_envelope() {
    // Mode parsing fails before any remote call; the port is never used.
    let output = run_invocation(host_input("frobnicate", 9)).await;

    assert!(output.output.is_none());
    assert!(output.error.unwrap().contains("unrecognized mode"));
}

#[tokio::test]
async fn test_unreachable_endpoint_reports_error_envelope() {
    // Bind and immediately drop a listener to get a closed port.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let output = run_invocation(host_input("add", port)).await;

    assert!(output.output.is_none());
    assert!(output.error.is_some());
}
