//! End-to-end router tests against the in-memory index and remote store.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use docvault_api::state::AppState;
use docvault_core::config::AppConfig;
use docvault_core::traits::remote::RemoteObjectStore;
use docvault_index::MetadataIndex;
use docvault_index::memory::MemoryMetadataIndex;
use docvault_remote::idempotent::IdempotentRemote;
use docvault_remote::memory::InMemoryRemote;

/// Test application: the real router over in-memory backends, plus a
/// handle to the raw remote store for failure injection.
struct TestApp {
    router: Router,
    remote: Arc<InMemoryRemote>,
}

impl TestApp {
    fn new() -> Self {
        let raw = Arc::new(InMemoryRemote::new());
        let remote: Arc<dyn RemoteObjectStore> = Arc::new(IdempotentRemote::new(
            Arc::clone(&raw) as Arc<dyn RemoteObjectStore>,
            2,
            Duration::from_millis(1),
        ));
        let index: Arc<dyn MetadataIndex> = Arc::new(MemoryMetadataIndex::new());
        let mut config = AppConfig::default();
        config.remote.root_folder_id = "container-root".to_string();

        let state = AppState::new(config, index, remote);
        Self {
            router: docvault_api::build_router(state),
            remote: raw,
        }
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        user: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            req = req.header("x-user-id", user.to_string());
        }
        let body = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        let req = req.body(Body::from(body)).expect("Failed to build request");

        self.send(req).await
    }

    async fn upload(
        &self,
        path: &str,
        user: Uuid,
        files: &[(&str, &[u8])],
    ) -> (StatusCode, Value) {
        const BOUNDARY: &str = "docvault-test-boundary";
        let mut body = Vec::new();
        for (name, content) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; \
                     filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("x-user-id", user.to_string())
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

fn folder_body(name: &str) -> Value {
    json!({ "folderName": name })
}

async fn create_folder(app: &TestApp, user: Uuid, name: &str) -> Value {
    let (status, body) = app
        .request("POST", "/folder", Some(user), Some(folder_body(name)))
        .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body:?}");
    body["data"].clone()
}

#[tokio::test]
async fn create_folder_returns_empty_tree_with_remote_reference() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let folder = create_folder(&app, user, "Photos").await;
    assert_eq!(folder["name"], "Photos");
    assert_eq!(folder["files"], json!([]));
    assert_eq!(folder["childFolder"], json!([]));
    assert!(!folder["remoteFolderId"].as_str().unwrap().is_empty());

    let (status, body) = app.request("GET", "/folders", Some(user), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "Photos");
}

#[tokio::test]
async fn duplicate_folder_name_is_400_and_scoped_per_owner() {
    let app = TestApp::new();
    let u1 = Uuid::new_v4();
    let u2 = Uuid::new_v4();

    create_folder(&app, u1, "Photos").await;

    let (status, body) = app
        .request("POST", "/folder", Some(u1), Some(folder_body("Photos")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Folder with the same name already exists");

    let (status, _) = app
        .request("POST", "/folder", Some(u2), Some(folder_body("Photos")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn missing_or_malformed_principal_is_401() {
    let app = TestApp::new();

    let (status, _) = app.request("GET", "/folders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .method("GET")
        .uri("/folders")
        .header("x-user-id", "not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_folder_name_is_rejected() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let (status, _) = app
        .request("POST", "/folder", Some(user), Some(folder_body("")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn foreign_folders_are_not_found_on_every_endpoint() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();

    let folder = create_folder(&app, owner, "Secret").await;
    let id = folder["id"].as_str().unwrap().to_string();

    let attempts = [
        ("GET", format!("/folder/{id}"), None),
        ("PUT", format!("/folder/{id}"), Some(json!({"name": "X"}))),
        ("DELETE", format!("/folder/{id}"), None),
        ("POST", format!("/folder/{id}"), Some(folder_body("X"))),
        ("GET", format!("/folder/{id}/files"), None),
    ];
    for (method, path, body) in attempts {
        let (status, _) = app.request(method, &path, Some(intruder), body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {path}");
    }

    // The owner still sees the folder untouched.
    let (status, body) = app
        .request("GET", &format!("/folder/{id}"), Some(owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Secret");
}

#[tokio::test]
async fn rename_is_idempotent() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let folder = create_folder(&app, user, "Old").await;
    let id = folder["id"].as_str().unwrap().to_string();
    let rename = json!({"name": "New"});

    for _ in 0..2 {
        let (status, _) = app
            .request("PUT", &format!("/folder/{id}"), Some(user), Some(rename.clone()))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = app
        .request("GET", &format!("/folder/{id}"), Some(user), None)
        .await;
    assert_eq!(body["data"]["name"], "New");
}

#[tokio::test]
async fn delete_then_get_then_delete_again_are_404() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let folder = create_folder(&app, user, "Temp").await;
    let id = folder["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .request("DELETE", &format!("/folder/{id}"), Some(user), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request("GET", &format!("/folder/{id}"), Some(user), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request("DELETE", &format!("/folder/{id}"), Some(user), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn child_folder_lifecycle_over_http() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let folder = create_folder(&app, user, "Projects").await;
    let id = folder["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .request("POST", &format!("/folder/{id}"), Some(user), Some(folder_body("Alpha")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let children = body["data"]["childFolder"].as_array().unwrap();
    assert_eq!(children.len(), 1);
    let child_id = children[0]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(
            "PUT",
            &format!("/folder/{id}/childFolder/{child_id}"),
            Some(user),
            Some(json!({"name": "Beta"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/folder/{id}/childFolder/{child_id}"),
            Some(user),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .request("GET", &format!("/folder/{id}"), Some(user), None)
        .await;
    assert_eq!(body["data"]["childFolder"], json!([]));
}

#[tokio::test]
async fn batch_upload_reports_partial_success() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let folder = create_folder(&app, user, "Docs").await;
    let id = folder["id"].as_str().unwrap().to_string();

    app.remote.fail_creates_named("two.txt");
    let (status, body) = app
        .upload(
            &format!("/folder/files/{id}"),
            user,
            &[
                ("one.txt", b"first"),
                ("two.txt", b"second"),
                ("three.txt", b"third"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::OK, "upload failed: {body:?}");

    let data = &body["data"];
    let files = data["folder"]["files"].as_array().unwrap();
    let names: Vec<_> = files.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["one.txt", "three.txt"]);
    assert_eq!(data["failed"].as_array().unwrap().len(), 1);
    assert_eq!(data["failed"][0]["name"], "two.txt");

    // The file listing exposes id, name, and a servable URL per entry.
    let (status, body) = app
        .request("GET", &format!("/folder/{id}/files"), Some(user), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    for file in body["data"].as_array().unwrap() {
        assert!(file["id"].as_str().is_some());
        assert!(file["url"].as_str().unwrap().starts_with("https://"));
    }
}

#[tokio::test]
async fn file_rename_and_delete_over_http() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let folder = create_folder(&app, user, "Docs").await;
    let id = folder["id"].as_str().unwrap().to_string();

    let (_, body) = app
        .upload(&format!("/folder/files/{id}"), user, &[("draft.txt", b"x")])
        .await;
    let file_id = body["data"]["uploaded"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(
            "PUT",
            &format!("/folder/{id}/file/{file_id}"),
            Some(user),
            Some(json!({"name": "final.txt"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/folder/{id}/file/{file_id}"),
            Some(user),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/folder/{id}/file/{file_id}"),
            Some(user),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoints_respond_without_a_principal() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = app.request("GET", "/health/detailed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["index"], "connected");
    assert_eq!(body["data"]["remote"], "reachable");
}
