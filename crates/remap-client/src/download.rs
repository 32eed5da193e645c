//! Merge-and-download flow.
//!
//! Drives one download through the controller: the control goes busy on
//! [`MappingMessage::DownloadClicked`] and is always released by a matching
//! [`MappingMessage::DownloadFinished`], whatever happened in between.

use remap_core::{DownloadOutcome, Effect, FileId, MappingController, MappingMessage, MergeRequest};
use tracing::{info, warn};

use crate::error::Result;
use crate::sink::FileSink;
use crate::transport::MergeTransport;

/// Fetch the merged file for `request` and save it.
///
/// Never fails: every error becomes [`DownloadOutcome::Failed`] carrying the
/// user-facing message.
pub async fn execute<T, S>(transport: &T, sink: &S, request: &MergeRequest) -> DownloadOutcome
where
    T: MergeTransport,
    S: FileSink,
{
    match fetch_and_save(transport, sink, request).await {
        Ok(filename) => DownloadOutcome::Saved { filename },
        Err(err) => {
            warn!(file_id = %request.file_id, error = %err, "merge download failed");
            DownloadOutcome::failed(err.user_message())
        }
    }
}

async fn fetch_and_save<T, S>(transport: &T, sink: &S, request: &MergeRequest) -> Result<String>
where
    T: MergeTransport,
    S: FileSink,
{
    let bytes = transport.merge(request).await?;
    let path = sink.save(&request.download_name, &bytes)?;
    Ok(path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| request.download_name.clone()))
}

/// Run a complete download for `file_id`.
///
/// Returns `None` when the controller did not start a request (unknown file
/// or a download for this file already in flight).
pub async fn run_download<T, S>(
    controller: &mut MappingController,
    transport: &T,
    sink: &S,
    file_id: &FileId,
) -> Option<DownloadOutcome>
where
    T: MergeTransport,
    S: FileSink,
{
    let Effect::Merge(request) = controller.update(MappingMessage::DownloadClicked(file_id.clone()))
    else {
        return None;
    };

    info!(%file_id, name = %request.download_name, "downloading merged file");
    let outcome = execute(transport, sink, &request).await;

    controller.update(MappingMessage::DownloadFinished {
        file_id: file_id.clone(),
        outcome: outcome.clone(),
    });
    Some(outcome)
}
