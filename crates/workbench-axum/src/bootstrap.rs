//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use workbench_core::paths::{
    CHAT_LOG_FILE_NAME, default_config_dir, default_model_cache_dir, settings_file,
};
use workbench_core::{EventBus, HubClientPort, ModelRegistry, SecretStore, SettingsService};
use workbench_download::DownloadManager;
use workbench_hf::{DEFAULT_HUB_URL, DefaultHfClient, HfClientConfig};
use workbench_store::{JsonSettingsFile, select_secret_store};

use crate::chat_log::ChatLog;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Model registry document.
    pub registry_path: PathBuf,
    /// Directory holding `settings.json`.
    pub config_dir: PathBuf,
    /// Chat history file; defaults to `<config_dir>/chat_history.jsonl`.
    pub chat_log_path: Option<PathBuf>,
    /// Hub root URL.
    pub hub_url: String,
    /// Use the OS credential store for the hub token.
    pub use_keyring: bool,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            registry_path: PathBuf::from("registry/models.json"),
            config_dir: default_config_dir()?,
            chat_log_path: None,
            hub_url: DEFAULT_HUB_URL.to_string(),
            use_keyring: true,
            cors: CorsConfig::default(),
        })
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_registry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_path = path.into();
        self
    }

    #[must_use]
    pub fn with_config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_dir = path.into();
        self
    }

    #[must_use]
    pub fn with_chat_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chat_log_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_hub_url(mut self, url: impl Into<String>) -> Self {
        self.hub_url = url.into();
        self
    }

    #[must_use]
    pub const fn with_keyring(mut self, enabled: bool) -> Self {
        self.use_keyring = enabled;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    fn chat_log_path(&self) -> PathBuf {
        self.chat_log_path
            .clone()
            .unwrap_or_else(|| self.config_dir.join(CHAT_LOG_FILE_NAME))
    }
}

/// Application context for the Axum adapter.
///
/// This struct holds all initialized services for the web server.
pub struct AxumContext {
    /// Model catalog, immutable after startup.
    pub registry: Arc<ModelRegistry>,
    /// Settings and hub token.
    pub settings: Arc<SettingsService>,
    /// Hub listing, probing and downloads.
    pub downloads: Arc<DownloadManager>,
    /// Download progress fan-out for WebSocket clients.
    pub events: Arc<EventBus>,
    /// Chat stub history.
    pub chat_log: ChatLog,
}

impl AxumContext {
    /// Assemble a context from already-built parts.
    pub fn from_parts(
        registry: ModelRegistry,
        settings: SettingsService,
        downloads: Arc<DownloadManager>,
        events: Arc<EventBus>,
        chat_log: ChatLog,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            settings: Arc::new(settings),
            downloads,
            events,
            chat_log,
        }
    }
}

/// Bootstrap the Axum server with all services.
pub async fn bootstrap(config: ServerConfig) -> Result<AxumContext> {
    // 1. Registry
    let registry = ModelRegistry::load(&config.registry_path).with_context(|| {
        format!(
            "Failed to load model registry from {}",
            config.registry_path.display()
        )
    })?;

    // 2. Settings store and token backend
    let settings_path = settings_file(&config.config_dir);
    let repo = Arc::new(JsonSettingsFile::new(
        settings_path.clone(),
        default_model_cache_dir()?,
    ));
    let secrets: Arc<dyn SecretStore> = select_secret_store(config.use_keyring);
    let backend = secrets.backend_name();
    let settings = SettingsService::new(repo, secrets);
    let cache_dir = settings
        .get()
        .await
        .context("Failed to load settings")?
        .resolved_cache_dir();

    // 3. Hub client
    let hf_client = DefaultHfClient::new(&HfClientConfig::new().with_base_url(&config.hub_url))
        .with_context(|| format!("Failed to create hub client for {}", config.hub_url))?;
    let hub: Arc<dyn HubClientPort> = Arc::new(hf_client);

    // 4. Event bus and download manager
    let events = EventBus::shared();
    let downloads = Arc::new(
        DownloadManager::new(hub, Arc::clone(&events), cache_dir.clone())
            .context("Failed to prepare model cache directory")?,
    );

    let chat_log = ChatLog::new(config.chat_log_path());

    tracing::info!(
        target: "workbench.paths",
        registry = %config.registry_path.display(),
        settings = %settings_path.display(),
        model_cache_dir = %cache_dir.display(),
        chat_log = %chat_log.path().display(),
        token_backend = backend,
        hub_url = %config.hub_url,
        "Axum bootstrap resolved paths"
    );

    Ok(AxumContext::from_parts(
        registry, settings, downloads, events, chat_log,
    ))
}

/// Start the web server on the configured address.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(config.clone()).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("QwenWorkbench API listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            registry_path: PathBuf::from("registry/models.json"),
            config_dir: PathBuf::from("/cfg"),
            chat_log_path: None,
            hub_url: DEFAULT_HUB_URL.to_string(),
            use_keyring: true,
            cors: CorsConfig::default(),
        }
        .with_port(9000)
        .with_keyring(false)
        .with_allowed_origins(vec!["http://localhost:5173".to_string()]);

        assert_eq!(config.port, 9000);
        assert!(!config.use_keyring);
        assert!(matches!(config.cors, CorsConfig::AllowOrigins(ref o) if o.len() == 1));
        assert_eq!(
            config.chat_log_path(),
            PathBuf::from("/cfg/chat_history.jsonl")
        );

        let config = config.with_chat_log_path("/logs/chat.jsonl");
        assert_eq!(config.chat_log_path(), PathBuf::from("/logs/chat.jsonl"));
    }

    #[tokio::test]
    async fn test_bootstrap_missing_registry_fails() {
        let temp = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            registry_path: temp.path().join("missing.json"),
            config_dir: temp.path().join("cfg"),
            chat_log_path: None,
            hub_url: DEFAULT_HUB_URL.to_string(),
            use_keyring: false,
            cors: CorsConfig::default(),
        };
        let err = bootstrap(config).await.err().unwrap();
        assert!(err.to_string().contains("model registry"));
    }
}
