//! Shared fixtures for workbench-axum integration tests.
//!
//! Builds a full `AxumContext` against a temp directory, the checked-in
//! registry, the plaintext secret store and an in-memory hub.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use workbench_axum::bootstrap::{AxumContext, CorsConfig};
use workbench_axum::chat_log::ChatLog;
use workbench_axum::routes::create_router_with_state;
use workbench_axum::state::AppState;
use workbench_core::{
    EventBus, HubClientPort, HubPortError, HubPortResult, ModelRegistry, RepoFile, SettingsService,
};
use workbench_download::DownloadManager;
use workbench_store::{JsonSettingsFile, PlaintextSecretStore};

/// Registry document shipped with the repository.
pub const REGISTRY_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../registry/models.json");

pub const CHAT_REPO: &str = "unsloth/Qwen3-Next-80B-A3B-Instruct-GGUF";

/// In-memory hub keyed by repository id.
#[derive(Default)]
pub struct FakeHub {
    repos: HashMap<String, Vec<RepoFile>>,
    gated: HashSet<String>,
    tokens_seen: Mutex<Vec<Option<String>>>,
}

impl FakeHub {
    pub fn with_repo(mut self, repo_id: &str, files: Vec<RepoFile>) -> Self {
        self.repos.insert(repo_id.to_string(), files);
        self
    }

    pub fn with_gated(mut self, repo_id: &str) -> Self {
        self.gated.insert(repo_id.to_string());
        self
    }

    pub fn tokens_seen(&self) -> Vec<Option<String>> {
        self.tokens_seen.lock().unwrap().clone()
    }

    fn lookup(&self, repo_id: &str, token: Option<&str>) -> HubPortResult<&Vec<RepoFile>> {
        self.tokens_seen
            .lock()
            .unwrap()
            .push(token.map(String::from));
        if self.gated.contains(repo_id) {
            return Err(HubPortError::AccessDenied {
                repo_id: repo_id.to_string(),
                status: 401,
            });
        }
        self.repos.get(repo_id).ok_or_else(|| HubPortError::Http {
            status: 404,
            message: "Repository not found".to_string(),
        })
    }
}

#[async_trait]
impl HubClientPort for FakeHub {
    async fn list_files(&self, repo_id: &str, token: Option<&str>) -> HubPortResult<Vec<RepoFile>> {
        self.lookup(repo_id, token).cloned()
    }

    async fn fetch_file(
        &self,
        repo_id: &str,
        path: &str,
        token: Option<&str>,
        local_dir: &Path,
    ) -> HubPortResult<PathBuf> {
        let files = self.lookup(repo_id, token)?;
        let size = files
            .iter()
            .find(|f| f.path == path)
            .map_or(0, |f| f.size);
        let dest = local_dir.join(path);
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(&dest, vec![0u8; usize::try_from(size).unwrap()]).unwrap();
        Ok(dest)
    }
}

/// Chat repository listing with one small file per quantization.
pub fn chat_repo_files() -> Vec<RepoFile> {
    vec![
        RepoFile::new("Qwen3-Next-80B-A3B-Instruct-Q3_K_L.gguf", 40),
        RepoFile::new("Qwen3-Next-80B-A3B-Instruct-Q3_K_M.gguf", 30),
        RepoFile::new("Qwen3-Next-80B-A3B-Instruct-Q2_K.gguf", 20),
        RepoFile::new("README.md", 5),
    ]
}

/// A router over a fully wired context.
pub struct TestApp {
    pub state: AppState,
    pub hub: Arc<FakeHub>,
    pub temp: TempDir,
}

impl TestApp {
    pub async fn new(hub: FakeHub) -> Self {
        let temp = tempfile::tempdir().unwrap();
        let hub = Arc::new(hub);

        let registry = ModelRegistry::load(Path::new(REGISTRY_PATH)).unwrap();
        let repo = Arc::new(JsonSettingsFile::new(
            temp.path().join("config").join("settings.json"),
            temp.path().join("models"),
        ));
        let settings = SettingsService::new(repo, Arc::new(PlaintextSecretStore));
        let cache_dir = settings.get().await.unwrap().resolved_cache_dir();

        let events = EventBus::shared();
        let downloads = Arc::new(
            DownloadManager::new(hub.clone(), events.clone(), cache_dir).unwrap(),
        );
        let chat_log = ChatLog::new(temp.path().join("logs").join("chat_history.jsonl"));

        let ctx = AxumContext::from_parts(registry, settings, downloads, events, chat_log);
        Self {
            state: Arc::new(ctx),
            hub,
            temp,
        }
    }

    pub fn router(&self) -> Router {
        create_router_with_state(self.state.clone(), &CorsConfig::AllowAll)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: &str,
        body: &'static str,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}
