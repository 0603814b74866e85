//! Command-line interface of the `qwenworkbench` binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use workbench_hf::DEFAULT_HUB_URL;

use crate::bootstrap::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "qwenworkbench")]
#[command(about = "Local orchestration API for Qwen model variants")]
#[command(version)]
pub struct Cli {
    /// Interface to bind
    #[arg(long, env = "WORKBENCH_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "WORKBENCH_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Model registry document
    #[arg(long, env = "WORKBENCH_REGISTRY", default_value = "registry/models.json")]
    pub registry: PathBuf,

    /// Directory holding settings.json [default: ~/.config/qwenworkbench]
    #[arg(long = "config-dir", env = "WORKBENCH_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Chat history file [default: <config-dir>/chat_history.jsonl]
    #[arg(long = "chat-log", env = "WORKBENCH_CHAT_LOG")]
    pub chat_log: Option<PathBuf>,

    /// Allowed CORS origin (repeatable or comma separated)
    #[arg(
        long = "allowed-origin",
        env = "WORKBENCH_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173,http://127.0.0.1:5173"
    )]
    pub allowed_origins: Vec<String>,

    /// Hub root URL
    #[arg(long = "hub-url", env = "WORKBENCH_HUB_URL", default_value = DEFAULT_HUB_URL)]
    pub hub_url: String,

    /// Store the hub token in the settings file instead of the OS keyring
    #[arg(long = "no-keyring", env = "WORKBENCH_NO_KEYRING")]
    pub no_keyring: bool,
}

impl Cli {
    /// Turn parsed arguments into a server configuration.
    pub fn into_server_config(self) -> Result<ServerConfig> {
        let mut config = ServerConfig::with_defaults()?
            .with_host(self.host)
            .with_port(self.port)
            .with_registry_path(self.registry)
            .with_hub_url(self.hub_url)
            .with_keyring(!self.no_keyring)
            .with_allowed_origins(self.allowed_origins);
        if let Some(dir) = self.config_dir {
            config = config.with_config_dir(dir);
        }
        if let Some(path) = self.chat_log {
            config = config.with_chat_log_path(path);
        }
        Ok(config)
    }
}
