//! HTTP backend abstraction for `HuggingFace` API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. Requests are made exactly once;
//! failures go straight back to the caller.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::error::{HfError, HfResult};
use crate::models::HfConfig;

/// Suffix of a file that is still being written.
pub const PARTIAL_SUFFIX: &str = ".incomplete";

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends used by the hub client.
///
/// This is an implementation detail - external code should use the
/// `HubClientPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        token: Option<&str>,
    ) -> HfResult<T>;

    /// Stream the body at `url` into `dest`. Returns the bytes written.
    ///
    /// `dest` only appears once the transfer has finished.
    async fn download_to_file(&self, url: &Url, token: Option<&str>, dest: &Path)
    -> HfResult<u64>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    timeout: std::time::Duration,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &HfConfig) -> HfResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Build a request with optional authentication.
    fn build_request(&self, url: &Url, token: Option<&str>) -> reqwest::RequestBuilder {
        let request = self.client.get(url.as_str());
        match token {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }
}

/// Turn a non-success response into [`HfError::ApiRequestFailed`].
async fn check_status(response: reqwest::Response) -> HfResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(HfError::ApiRequestFailed {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason()),
    })
}

/// Pull a human-readable message out of an error body.
///
/// The hub answers `{"error": "..."}`; anything else is used verbatim.
fn error_message(body: &str, reason: Option<&str>) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from));

    from_json
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .or_else(|| reason.map(String::from))
        .unwrap_or_else(|| "request failed".to_string())
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        token: Option<&str>,
    ) -> HfResult<T> {
        let response = self
            .build_request(url, token)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = check_status(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn download_to_file(
        &self,
        url: &Url,
        token: Option<&str>,
        dest: &Path,
    ) -> HfResult<u64> {
        let response = self.build_request(url, token).send().await?;
        let response = check_status(response).await?;
        stream_to_file(response.bytes_stream(), dest).await
    }
}

// ============================================================================
// Atomic file writes
// ============================================================================

/// Sibling path used while `dest` is being written.
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// Write a chunk stream to `<dest>.incomplete`, then rename it into place.
///
/// On any failure the partial file is removed and `dest` is left untouched.
pub async fn stream_to_file<S, C, E>(stream: S, dest: &Path) -> HfResult<u64>
where
    S: Stream<Item = Result<C, E>> + Send,
    C: AsRef<[u8]> + Send,
    E: Into<HfError> + Send,
{
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| HfError::io(parent, e))?;
    }

    let partial = partial_path(dest);
    match write_partial(stream, &partial).await {
        Ok(written) => {
            tokio::fs::rename(&partial, dest)
                .await
                .map_err(|e| HfError::io(dest, e))?;
            Ok(written)
        }
        Err(e) => {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                tracing::debug!(
                    path = %partial.display(),
                    error = %cleanup,
                    "Could not remove partial download"
                );
            }
            Err(e)
        }
    }
}

async fn write_partial<S, C, E>(stream: S, partial: &Path) -> HfResult<u64>
where
    S: Stream<Item = Result<C, E>> + Send,
    C: AsRef<[u8]> + Send,
    E: Into<HfError> + Send,
{
    let mut file = tokio::fs::File::create(partial)
        .await
        .map_err(|e| HfError::io(partial, e))?;

    let mut written: u64 = 0;
    let mut stream = std::pin::pin!(stream);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::<HfError>::into)?;
        let bytes = chunk.as_ref();
        file.write_all(bytes)
            .await
            .map_err(|e| HfError::io(partial, e))?;
        written += bytes.len() as u64;
    }

    file.flush().await.map_err(|e| HfError::io(partial, e))?;
    Ok(written)
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Canned response for the fake backend.
    #[derive(Clone)]
    pub struct CannedResponse {
        pub status: u16,
        pub json: serde_json::Value,
        pub chunks: Vec<Vec<u8>>,
        /// Fail the transfer after the chunks have been written.
        pub break_stream: bool,
    }

    impl CannedResponse {
        pub fn json(json: serde_json::Value) -> Self {
            Self {
                status: 200,
                json,
                chunks: Vec::new(),
                break_stream: false,
            }
        }

        pub fn error(status: u16, message: &str) -> Self {
            Self {
                status,
                json: serde_json::json!({ "error": message }),
                chunks: Vec::new(),
                break_stream: false,
            }
        }

        pub fn file(contents: &[u8]) -> Self {
            Self {
                status: 200,
                json: serde_json::Value::Null,
                chunks: contents.chunks(4).map(<[u8]>::to_vec).collect(),
                break_stream: false,
            }
        }

        pub fn broken_file(contents: &[u8]) -> Self {
            Self {
                break_stream: true,
                ..Self::file(contents)
            }
        }
    }

    /// A fake HTTP backend that returns canned responses.
    ///
    /// Patterns are matched in insertion order against the full URL.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Vec<(String, CannedResponse)>,
        requests: Mutex<Vec<(String, Option<String>)>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a canned response for URLs containing `url_contains`.
        pub fn with_response(mut self, url_contains: &str, response: CannedResponse) -> Self {
            self.responses.push((url_contains.to_string(), response));
            self
        }

        /// URLs and tokens seen so far.
        pub fn requests(&self) -> Vec<(String, Option<String>)> {
            self.requests.lock().unwrap().clone()
        }

        fn respond(&self, url: &Url, token: Option<&str>) -> HfResult<CannedResponse> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), token.map(String::from)));

            let response = self
                .responses
                .iter()
                .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
                .map(|(_, r)| r.clone())
                .ok_or_else(|| HfError::ApiRequestFailed {
                    status: 404,
                    message: "Repository not found".to_string(),
                })?;

            if (200..300).contains(&response.status) {
                Ok(response)
            } else {
                Err(HfError::ApiRequestFailed {
                    status: response.status,
                    message: error_message(&response.json.to_string(), None),
                })
            }
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(
            &self,
            url: &Url,
            token: Option<&str>,
        ) -> HfResult<T> {
            let response = self.respond(url, token)?;
            serde_json::from_value(response.json).map_err(Into::into)
        }

        async fn download_to_file(
            &self,
            url: &Url,
            token: Option<&str>,
            dest: &Path,
        ) -> HfResult<u64> {
            let response = self.respond(url, token)?;
            let mut items: Vec<HfResult<Vec<u8>>> =
                response.chunks.into_iter().map(Ok).collect();
            if response.break_stream {
                items.push(Err(HfError::InvalidResponse {
                    message: "connection reset".to_string(),
                }));
            }
            stream_to_file(futures_util::stream::iter(items), dest).await
        }
    }
}
