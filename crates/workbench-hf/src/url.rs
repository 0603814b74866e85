//! URL construction helpers for `HuggingFace` API.

use url::Url;

use crate::models::HfConfig;

/// Revision used for downloads.
pub const DEFAULT_REVISION: &str = "main";

fn with_path(config: &HfConfig, tail: &str) -> Url {
    let mut url = config.base_url.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/{tail}"));
    url.set_query(None);
    url
}

/// Build the model info URL, asking for blob sizes.
pub fn build_model_info_url(config: &HfConfig, repo_id: &str) -> Url {
    let mut url = with_path(config, &format!("api/models/{}", repo_id.trim_matches('/')));
    url.set_query(Some("blobs=true"));
    url
}

/// Build a URL for downloading a file from a repository.
pub fn build_download_url(
    config: &HfConfig,
    repo_id: &str,
    file_path: &str,
    revision: Option<&str>,
) -> Url {
    let rev = revision.unwrap_or(DEFAULT_REVISION);
    with_path(
        config,
        &format!(
            "{}/resolve/{rev}/{}",
            repo_id.trim_matches('/'),
            file_path.trim_start_matches('/')
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(base: &str) -> HfConfig {
        HfConfig {
            base_url: Url::parse(base).unwrap(),
            user_agent: "test".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_build_model_info_url() {
        let url = build_model_info_url(
            &config("https://huggingface.co"),
            "unsloth/Qwen3-Coder-Next-GGUF",
        );
        assert_eq!(
            url.as_str(),
            "https://huggingface.co/api/models/unsloth/Qwen3-Coder-Next-GGUF?blobs=true"
        );
    }

    #[test]
    fn test_build_download_url() {
        let url = build_download_url(
            &config("https://huggingface.co"),
            "Qwen/Qwen-Image",
            "transformer/diffusion_pytorch_model-00001-of-00009.safetensors",
            None,
        );
        assert_eq!(
            url.as_str(),
            "https://huggingface.co/Qwen/Qwen-Image/resolve/main/transformer/diffusion_pytorch_model-00001-of-00009.safetensors"
        );

        let url = build_download_url(
            &config("https://huggingface.co"),
            "org/repo",
            "model.gguf",
            Some("abc123"),
        );
        assert_eq!(
            url.as_str(),
            "https://huggingface.co/org/repo/resolve/abc123/model.gguf"
        );
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let url = build_model_info_url(&config("http://localhost:9000/mirror/"), "org/repo");
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/mirror/api/models/org/repo?blobs=true"
        );
    }
}
