use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Identifier of an uploaded file, as assigned by the merge service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(String);

impl FileId {
    pub fn new(value: impl Into<String>) -> Result<Self, SessionError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SessionError::InvalidFileId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which of the two unmapped header lists an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderSource {
    /// Present in the uploaded file but not expected.
    Extra,
    /// Expected but absent from the uploaded file.
    Missing,
}

impl HeaderSource {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Extra => Self::Missing,
            Self::Missing => Self::Extra,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Extra => "extra",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for HeaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
