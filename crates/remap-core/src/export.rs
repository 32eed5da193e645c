//! Merge-and-download request types.
//!
//! The controller only describes the request; executing it and saving the
//! returned bytes belongs to the client.

use serde::{Deserialize, Serialize};

use crate::ids::FileId;
use crate::mapping::MergePayload;

/// Message shown when the merge service fails without an explanation.
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Download failed. Please try again.";

/// A merge-and-download request for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub file_id: FileId,
    /// Name the merged CSV should be saved under.
    pub download_name: String,
    pub payload: MergePayload,
}

/// How a download request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The merged file was saved under `filename`.
    Saved { filename: String },
    /// The request or the save failed.
    Failed { message: String },
}

impl DownloadOutcome {
    /// Failure with the service's message, or the generic one when blank.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            DOWNLOAD_FAILED_MESSAGE.to_string()
        } else {
            message
        };
        Self::Failed { message }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Derive the saved file name: the last extension is replaced by `.csv`,
/// or `.csv` is appended when there is none.
pub fn csv_filename(original: &str) -> String {
    match original.rfind('.') {
        Some(dot) => {
            let ext = &original[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                format!("{original}.csv")
            } else {
                format!("{}.csv", &original[..dot])
            }
        }
        None => format!("{original}.csv"),
    }
}
