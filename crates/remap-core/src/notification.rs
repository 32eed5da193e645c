//! Transient notifications.
//!
//! A single toast slot: showing a new toast replaces the previous one.

/// Toast notification state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    /// The message to display.
    pub message: String,
    /// Toast kind determines icon and styling in the front end.
    pub kind: ToastKind,
}

/// Kind of toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl ToastState {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Toast for a failed merge download.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    /// Toast for a merged file that was saved.
    pub fn download_saved(filename: &str) -> Self {
        Self::new(ToastKind::Success, format!("Saved {filename}"))
    }
}
