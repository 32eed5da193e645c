//! Per-file mapping state.
//!
//! A [`FileSession`] holds the two unmapped header lists of one uploaded
//! file, the mapping built from them, and the undo history. Every header
//! name lives in exactly one place: the extra list, the missing list, or one
//! side of a mapped pair. History entries and mapping pairs are pushed and
//! popped together.

use std::collections::HashSet;

use tracing::debug;

use crate::compare::HeaderComparison;
use crate::error::{Result, SessionError};
use crate::export::{MergeRequest, csv_filename};
use crate::ids::{FileId, HeaderSource};
use crate::mapping::{HeaderMapping, MergePayload};

/// State captured right before a mapping is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub extra: Vec<String>,
    pub missing: Vec<String>,
    pub mapping: HeaderMapping,
}

/// State of the per-file download control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadControl {
    #[default]
    Ready,
    /// A merge request for this file is in flight.
    Busy,
}

/// One entry of the matched list, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedEntry {
    /// Header already present in both guideline and input.
    Preset(String),
    /// Pair created by the user in this session.
    Mapped { extra: String, missing: String },
}

impl MatchedEntry {
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Mapped { .. })
    }

    pub fn label(&self) -> String {
        match self {
            Self::Preset(header) => header.clone(),
            Self::Mapped { extra, missing } => format!("{extra} → {missing}"),
        }
    }
}

/// Result of trying to pair two headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairOutcome {
    Mapped,
    /// One of the headers is no longer in its expected list.
    Stale,
}

/// Mapping state of a single uploaded file.
#[derive(Debug, Clone)]
pub struct FileSession {
    file_id: FileId,
    filename: String,
    extra: Vec<String>,
    missing: Vec<String>,
    presets: Vec<String>,
    mapping: HeaderMapping,
    history: Vec<HistoryEntry>,
    download: DownloadControl,
}

impl FileSession {
    /// Create a session from the unmapped header lists of a file.
    ///
    /// Fails if a header is empty or appears more than once across both lists.
    pub fn new(
        file_id: FileId,
        filename: impl Into<String>,
        extra: Vec<String>,
        missing: Vec<String>,
    ) -> Result<Self> {
        let session = Self {
            file_id,
            filename: filename.into(),
            extra,
            missing,
            presets: Vec::new(),
            mapping: HeaderMapping::new(),
            history: Vec::new(),
            download: DownloadControl::Ready,
        };
        session.validate()?;
        Ok(session)
    }

    /// Session with no headers, used when a file is first touched before its
    /// lists are known. The filename defaults to the file id.
    pub fn empty(file_id: FileId) -> Self {
        let filename = file_id.to_string();
        Self {
            file_id,
            filename,
            extra: Vec::new(),
            missing: Vec::new(),
            presets: Vec::new(),
            mapping: HeaderMapping::new(),
            history: Vec::new(),
            download: DownloadControl::Ready,
        }
    }

    /// Build a session from a guideline comparison, keeping the already
    /// matched headers as presets.
    pub fn from_comparison(
        file_id: FileId,
        filename: impl Into<String>,
        comparison: &HeaderComparison,
    ) -> Result<Self> {
        Self::new(
            file_id,
            filename,
            comparison.extra.clone(),
            comparison.missing.clone(),
        )?
        .with_presets(comparison.matched.clone())
    }

    /// Attach headers that were matched before any user interaction.
    pub fn with_presets(mut self, presets: Vec<String>) -> Result<Self> {
        self.presets = presets;
        self.validate()?;
        Ok(self)
    }

    /// Add a header to one of the unmapped lists.
    ///
    /// The header is also appended to every undo snapshot, so undoing an
    /// earlier pairing keeps it.
    pub fn push_header(&mut self, source: HeaderSource, header: impl Into<String>) -> Result<()> {
        let header = header.into();
        if header.is_empty() {
            return Err(SessionError::EmptyHeader(source));
        }
        if self.locate(&header).is_some()
            || self.presets.contains(&header)
            || self.mapping.contains_extra(&header)
            || self.mapping.contains_missing(&header)
        {
            return Err(SessionError::DuplicateHeader(header));
        }
        for entry in &mut self.history {
            match source {
                HeaderSource::Extra => entry.extra.push(header.clone()),
                HeaderSource::Missing => entry.missing.push(header.clone()),
            }
        }
        self.list_mut(source).push(header);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let lists = [
            (HeaderSource::Extra, &self.extra),
            (HeaderSource::Missing, &self.missing),
        ];
        for (source, list) in lists {
            for header in list {
                if header.is_empty() {
                    return Err(SessionError::EmptyHeader(source));
                }
                if !seen.insert(header.as_str()) {
                    return Err(SessionError::DuplicateHeader(header.clone()));
                }
            }
        }
        for header in &self.presets {
            if !seen.insert(header.as_str()) {
                return Err(SessionError::DuplicateHeader(header.clone()));
            }
        }
        Ok(())
    }

    pub fn file_id(&self) -> &FileId {
        &self.file_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn list(&self, source: HeaderSource) -> &[String] {
        match source {
            HeaderSource::Extra => &self.extra,
            HeaderSource::Missing => &self.missing,
        }
    }

    fn list_mut(&mut self, source: HeaderSource) -> &mut Vec<String> {
        match source {
            HeaderSource::Extra => &mut self.extra,
            HeaderSource::Missing => &mut self.missing,
        }
    }

    pub fn presets(&self) -> &[String] {
        &self.presets
    }

    pub fn mapping(&self) -> &HeaderMapping {
        &self.mapping
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn download_control(&self) -> DownloadControl {
        self.download
    }

    pub fn contains(&self, source: HeaderSource, header: &str) -> bool {
        self.list(source).iter().any(|h| h == header)
    }

    /// Which unmapped list currently holds `header`.
    pub fn locate(&self, header: &str) -> Option<HeaderSource> {
        if self.contains(HeaderSource::Extra, header) {
            Some(HeaderSource::Extra)
        } else if self.contains(HeaderSource::Missing, header) {
            Some(HeaderSource::Missing)
        } else {
            None
        }
    }

    /// Pair an extra header with a missing header.
    ///
    /// Either header missing from its list makes this a no-op returning
    /// [`PairOutcome::Stale`].
    pub fn pair(&mut self, extra: &str, missing: &str) -> PairOutcome {
        let Some(extra_idx) = self.extra.iter().position(|h| h == extra) else {
            return PairOutcome::Stale;
        };
        let Some(missing_idx) = self.missing.iter().position(|h| h == missing) else {
            return PairOutcome::Stale;
        };
        if self.mapping.contains_extra(extra) || self.mapping.contains_missing(missing) {
            return PairOutcome::Stale;
        }

        self.history.push(HistoryEntry {
            extra: self.extra.clone(),
            missing: self.missing.clone(),
            mapping: self.mapping.clone(),
        });
        let extra = self.extra.remove(extra_idx);
        let missing = self.missing.remove(missing_idx);
        debug!(file_id = %self.file_id, %extra, %missing, "mapped header");
        self.mapping.insert(extra, missing);
        PairOutcome::Mapped
    }

    /// Revert the most recent pairing. Returns the removed pair, or `None`
    /// when there is nothing to undo.
    pub fn undo(&mut self) -> Option<(String, String)> {
        let entry = self.history.pop()?;
        let removed = self.mapping.pop_last();
        debug_assert_eq!(
            self.mapping, entry.mapping,
            "history and mapping out of step"
        );
        self.extra = entry.extra;
        self.missing = entry.missing;
        self.mapping = entry.mapping;
        if let Some((extra, missing)) = &removed {
            debug!(file_id = %self.file_id, %extra, %missing, "undid mapping");
        }
        removed
    }

    /// Undo every pairing. Returns how many were reverted.
    pub fn reset(&mut self) -> usize {
        let mut reverted = 0;
        while self.undo().is_some() {
            reverted += 1;
        }
        reverted
    }

    /// Entries of the matched list: presets first, then user pairs in the
    /// order they were made.
    pub fn matched(&self) -> Vec<MatchedEntry> {
        self.presets
            .iter()
            .cloned()
            .map(MatchedEntry::Preset)
            .chain(self.mapping.iter().map(|(extra, missing)| MatchedEntry::Mapped {
                extra: extra.to_string(),
                missing: missing.to_string(),
            }))
            .collect()
    }

    pub fn payload(&self) -> MergePayload {
        MergePayload {
            mappings: self.mapping.clone(),
        }
    }

    /// Mark the download control busy and describe the request.
    ///
    /// Returns `None` while a request for this file is already in flight.
    pub fn begin_download(&mut self) -> Option<MergeRequest> {
        if self.download == DownloadControl::Busy {
            return None;
        }
        self.download = DownloadControl::Busy;
        Some(MergeRequest {
            file_id: self.file_id.clone(),
            download_name: csv_filename(&self.filename),
            payload: self.payload(),
        })
    }

    pub fn finish_download(&mut self) {
        self.download = DownloadControl::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn session(extra: &[&str], missing: &[&str]) -> FileSession {
        FileSession::new(
            FileId::new("1").unwrap(),
            "input.xlsx",
            strings(extra),
            strings(missing),
        )
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_across_lists() {
        let err = FileSession::new(
            FileId::new("1").unwrap(),
            "f.xlsx",
            strings(&["A"]),
            strings(&["A"]),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::DuplicateHeader("A".to_string()));
    }

    #[test]
    fn rejects_empty_header() {
        let err = FileSession::new(
            FileId::new("1").unwrap(),
            "f.xlsx",
            strings(&[]),
            strings(&[""]),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::EmptyHeader(HeaderSource::Missing));
    }

    #[test]
    fn preset_overlapping_list_is_rejected() {
        let result = session(&["A"], &["B"]).with_presets(strings(&["B"]));
        assert!(matches!(result, Err(SessionError::DuplicateHeader(h)) if h == "B"));
    }

    #[test]
    fn push_header_keeps_names_unique() {
        let mut s = FileSession::empty(FileId::new("9").unwrap());
        s.push_header(HeaderSource::Extra, "A").unwrap();
        s.push_header(HeaderSource::Missing, "B").unwrap();
        assert!(s.push_header(HeaderSource::Missing, "A").is_err());
        assert_eq!(s.filename(), "9");
        assert_eq!(s.locate("A"), Some(HeaderSource::Extra));
        assert_eq!(s.locate("B"), Some(HeaderSource::Missing));
    }

    #[test]
    fn push_header_rejects_mapped_names() {
        let mut s = session(&["A"], &["B"]);
        s.pair("A", "B");
        assert_eq!(
            s.push_header(HeaderSource::Extra, "A"),
            Err(SessionError::DuplicateHeader("A".to_string()))
        );
        assert_eq!(
            s.push_header(HeaderSource::Extra, "B"),
            Err(SessionError::DuplicateHeader("B".to_string()))
        );
        assert!(s.extra().is_empty());
        assert_eq!(s.mapping().len(), 1);
    }

    #[test]
    fn pushed_header_survives_undo() {
        let mut s = FileSession::empty(FileId::new("9").unwrap());
        s.push_header(HeaderSource::Extra, "A").unwrap();
        s.push_header(HeaderSource::Missing, "B").unwrap();
        s.pair("A", "B");
        s.push_header(HeaderSource::Extra, "C").unwrap();
        s.push_header(HeaderSource::Missing, "D").unwrap();

        assert_eq!(s.undo(), Some(("A".to_string(), "B".to_string())));
        assert_eq!(s.extra(), ["A", "C"]);
        assert_eq!(s.missing(), ["B", "D"]);
        assert!(s.mapping().is_empty());
    }

    #[test]
    fn stale_pair_changes_nothing() {
        let mut s = session(&["A"], &["B"]);
        assert_eq!(s.pair("A", "Z"), PairOutcome::Stale);
        assert_eq!(s.pair("Z", "B"), PairOutcome::Stale);
        assert_eq!(s.extra(), ["A"]);
        assert_eq!(s.missing(), ["B"]);
        assert!(s.mapping().is_empty());
        assert!(!s.can_undo());
    }

    #[test]
    fn matched_lists_presets_before_pairs() {
        let mut s = session(&["A"], &["B"]).with_presets(strings(&["C"])).unwrap();
        s.pair("A", "B");
        let matched = s.matched();
        assert_eq!(matched.len(), 2);
        assert!(!matched[0].is_new());
        assert_eq!(matched[0].label(), "C");
        assert!(matched[1].is_new());
        assert_eq!(matched[1].label(), "A → B");
    }

    #[test]
    fn begin_download_is_exclusive() {
        let mut s = session(&["A"], &["B"]);
        let request = s.begin_download().unwrap();
        assert_eq!(request.download_name, "input.csv");
        assert_eq!(s.download_control(), DownloadControl::Busy);
        assert!(s.begin_download().is_none());
        s.finish_download();
        assert!(s.begin_download().is_some());
    }
}
