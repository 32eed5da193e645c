//! Transport for merge-and-download requests.

use std::future::Future;

use remap_core::{FileId, MergeRequest};
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::ClientSettings;
use crate::error::{MergeError, Result};

/// User agent string for merge requests.
const USER_AGENT_VALUE: &str = concat!("header-remap/", env!("CARGO_PKG_VERSION"));

/// Path segment of the merge endpoint, followed by the file id.
const MERGE_ENDPOINT: &str = "merge_and_download";

/// Something that can turn a [`MergeRequest`] into merged file bytes.
pub trait MergeTransport {
    fn merge(&self, request: &MergeRequest) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// HTTP transport posting the mapping payload as JSON.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport from client settings.
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.server_url)
            .map_err(|err| MergeError::InvalidUrl(format!("{}: {err}", settings.server_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(MergeError::InvalidUrl(settings.server_url.clone()));
        }
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(USER_AGENT_VALUE)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// URL of the merge endpoint for one file. The file id is percent-encoded
    /// as a single path segment.
    pub fn merge_url(&self, file_id: &FileId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(MERGE_ENDPOINT)
                .push(file_id.as_str());
        }
        url
    }
}

impl MergeTransport for HttpTransport {
    async fn merge(&self, request: &MergeRequest) -> Result<Vec<u8>> {
        let url = self.merge_url(&request.file_id);
        debug!(%url, "posting merge request");

        let response = self.client.post(url).json(&request.payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MergeError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "merge response received");
        Ok(bytes.to_vec())
    }
}
