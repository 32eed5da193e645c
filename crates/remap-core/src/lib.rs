//! Header remapping sessions.
//!
//! Reconciles the "extra" and "missing" column headers of uploaded files by
//! pairing them through drag-and-drop gestures, with per-file undo, and
//! describes the merge-and-download request built from the result.
//!
//! # Overview
//!
//! - [`MappingController`] owns one [`FileSession`] per file and consumes
//!   [`MappingMessage`] events through [`MappingController::update`].
//! - [`FilePanelView`] is a pure projection of a session for rendering.
//! - [`Effect::Merge`] hands a [`MergeRequest`] to whatever executes it;
//!   the result comes back as [`MappingMessage::DownloadFinished`].
//!
//! ```
//! use remap_core::{FileId, FileSession, HeaderSource, MappingController, MappingMessage};
//!
//! let file_id = FileId::new("42").unwrap();
//! let session = FileSession::new(
//!     file_id.clone(),
//!     "data.xlsx",
//!     vec!["Email2".to_string()],
//!     vec!["Email".to_string()],
//! )
//! .unwrap();
//!
//! let mut controller = MappingController::new();
//! controller.register(session).unwrap();
//! controller.update(MappingMessage::DragStarted {
//!     file_id: file_id.clone(),
//!     header: "Email2".to_string(),
//!     source: HeaderSource::Extra,
//! });
//! controller.update(MappingMessage::Dropped {
//!     file_id: file_id.clone(),
//!     target: "Email".to_string(),
//!     target_source: HeaderSource::Missing,
//! });
//!
//! let session = controller.session(&file_id).unwrap();
//! assert_eq!(session.mapping().get("Email2"), Some("Email"));
//! ```

#![deny(unsafe_code)]

pub mod compare;
pub mod controller;
pub mod drag;
pub mod error;
pub mod export;
pub mod ids;
pub mod mapping;
pub mod message;
pub mod notification;
pub mod session;
pub mod view;

pub use compare::{HeaderComparison, compare_headers};
pub use controller::{Effect, MappingController};
pub use drag::{DragContext, DragState, DropRejection};
pub use error::{Result, SessionError};
pub use export::{DOWNLOAD_FAILED_MESSAGE, DownloadOutcome, MergeRequest, csv_filename};
pub use ids::{FileId, HeaderSource};
pub use mapping::{HeaderMapping, MergePayload};
pub use message::MappingMessage;
pub use notification::{ToastKind, ToastState};
pub use session::{DownloadControl, FileSession, HistoryEntry, MatchedEntry, PairOutcome};
pub use view::{DownloadButtonView, FilePanelView, HeaderItemView, MatchedItemView};
