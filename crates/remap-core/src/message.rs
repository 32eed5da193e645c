//! Interaction events accepted by the [`MappingController`](crate::MappingController).

use crate::export::DownloadOutcome;
use crate::ids::{FileId, HeaderSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingMessage {
    /// A drag gesture started on a header item
    DragStarted {
        file_id: FileId,
        header: String,
        source: HeaderSource,
    },

    /// The pointer entered a header item during a drag
    DragEntered {
        file_id: FileId,
        header: String,
        source: HeaderSource,
    },

    /// The pointer left a header item during a drag
    DragLeft { file_id: FileId, header: String },

    /// The dragged item was released over a header item
    Dropped {
        file_id: FileId,
        target: String,
        target_source: HeaderSource,
    },

    /// The drag ended, with or without a drop
    DragEnded,

    /// Revert the latest mapping of a file
    UndoClicked(FileId),

    /// Revert every mapping of a file
    ResetClicked(FileId),

    /// Request the merged CSV for a file
    DownloadClicked(FileId),

    /// The merge request for a file completed
    DownloadFinished {
        file_id: FileId,
        outcome: DownloadOutcome,
    },

    /// Close the current notification
    ToastDismissed,
}
