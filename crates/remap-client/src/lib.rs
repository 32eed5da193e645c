//! Merge-and-download client for header remapping sessions.
//!
//! Executes the [`MergeRequest`](remap_core::MergeRequest) produced by a
//! [`MappingController`](remap_core::MappingController), saves the merged CSV
//! and reports the outcome back to the controller.
//!
//! - [`HttpTransport`] posts `{"mappings": {...}}` to
//!   `{server_url}/merge_and_download/{file_id}`.
//! - [`DirectorySink`] writes the returned bytes into the output directory.
//! - [`run_download`] ties both to the controller's busy state.

#![warn(clippy::all)]

pub mod config;
pub mod download;
pub mod error;
pub mod sink;
pub mod transport;

pub use config::{ClientSettings, SettingsError};
pub use download::{execute, run_download};
pub use error::{MergeError, Result};
pub use sink::{DirectorySink, FileSink};
pub use transport::{HttpTransport, MergeTransport};
