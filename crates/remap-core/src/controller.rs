//! The mapping controller: a registry of file sessions driven by
//! [`MappingMessage`] events.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::drag::DragState;
use crate::error::{Result, SessionError};
use crate::export::{DownloadOutcome, MergeRequest};
use crate::ids::{FileId, HeaderSource};
use crate::message::MappingMessage;
use crate::notification::ToastState;
use crate::session::{DownloadControl, FileSession, PairOutcome};
use crate::view::FilePanelView;

/// Side effect requested by [`MappingController::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Execute this merge request, then report back with
    /// [`MappingMessage::DownloadFinished`].
    Merge(MergeRequest),
}

/// Owns every file session plus the single in-progress drag and the toast
/// slot. All mutation goes through [`update`](Self::update).
#[derive(Debug, Default)]
pub struct MappingController {
    sessions: BTreeMap<FileId, FileSession>,
    drag: DragState,
    toast: Option<ToastState>,
}

impl MappingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session. A file can only be registered once.
    pub fn register(&mut self, session: FileSession) -> Result<()> {
        let file_id = session.file_id().clone();
        if self.sessions.contains_key(&file_id) {
            return Err(SessionError::AlreadyRegistered(file_id));
        }
        debug!(
            %file_id,
            extra = session.extra().len(),
            missing = session.missing().len(),
            "registered file session"
        );
        self.sessions.insert(file_id, session);
        Ok(())
    }

    /// Session for `file_id`, created empty on first touch.
    pub fn session_entry(&mut self, file_id: &FileId) -> &mut FileSession {
        self.sessions
            .entry(file_id.clone())
            .or_insert_with(|| FileSession::empty(file_id.clone()))
    }

    pub fn session(&self, file_id: &FileId) -> Option<&FileSession> {
        self.sessions.get(file_id)
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn toast(&self) -> Option<&ToastState> {
        self.toast.as_ref()
    }

    pub fn view(&self, file_id: &FileId) -> Option<FilePanelView> {
        self.sessions
            .get(file_id)
            .map(|session| FilePanelView::project(session, &self.drag))
    }

    pub fn update(&mut self, message: MappingMessage) -> Effect {
        match message {
            MappingMessage::DragStarted {
                file_id,
                header,
                source,
            } => {
                self.start_drag(file_id, header, source);
                Effect::None
            }

            MappingMessage::DragEntered {
                file_id,
                header,
                source,
            } => {
                self.drag.enter(&file_id, &header, source);
                Effect::None
            }

            MappingMessage::DragLeft { header, .. } => {
                self.drag.leave(&header);
                Effect::None
            }

            MappingMessage::Dropped {
                file_id,
                target,
                target_source,
            } => {
                self.drop_on(&file_id, &target, target_source);
                Effect::None
            }

            MappingMessage::DragEnded => {
                if self.drag.cancel() {
                    debug!("drag cancelled");
                }
                Effect::None
            }

            MappingMessage::UndoClicked(file_id) => {
                if let Some(session) = self.sessions.get_mut(&file_id) {
                    session.undo();
                }
                Effect::None
            }

            MappingMessage::ResetClicked(file_id) => {
                if let Some(session) = self.sessions.get_mut(&file_id) {
                    let reverted = session.reset();
                    debug!(%file_id, reverted, "reset mappings");
                }
                Effect::None
            }

            MappingMessage::DownloadClicked(file_id) => self.begin_download(&file_id),

            MappingMessage::DownloadFinished { file_id, outcome } => {
                self.finish_download(&file_id, outcome);
                Effect::None
            }

            MappingMessage::ToastDismissed => {
                self.toast = None;
                Effect::None
            }
        }
    }

    fn start_drag(&mut self, file_id: FileId, header: String, source: HeaderSource) {
        let known = self
            .sessions
            .get(&file_id)
            .is_some_and(|session| session.contains(source, &header));
        if !known {
            debug!(%file_id, %header, %source, "ignoring drag of unknown header");
            self.drag = DragState::Idle;
            return;
        }
        debug!(%file_id, %header, %source, "drag started");
        self.drag.start(file_id, header, source);
    }

    fn drop_on(&mut self, file_id: &FileId, target: &str, target_source: HeaderSource) {
        let resolved = match self.drag.drop_on(file_id, target, target_source) {
            Ok(resolved) => resolved,
            Err(reason) => {
                debug!(%file_id, drop_target = target, ?reason, "drop rejected");
                return;
            }
        };
        let Some(session) = self.sessions.get_mut(&resolved.file_id) else {
            return;
        };
        if session.pair(&resolved.extra, &resolved.missing) == PairOutcome::Stale {
            debug!(
                %file_id,
                extra = %resolved.extra,
                missing = %resolved.missing,
                "drop ignored, header no longer available"
            );
        }
    }

    fn begin_download(&mut self, file_id: &FileId) -> Effect {
        let Some(session) = self.sessions.get_mut(file_id) else {
            warn!(%file_id, "download requested for unknown file");
            return Effect::None;
        };
        match session.begin_download() {
            Some(request) => {
                info!(
                    %file_id,
                    mappings = request.payload.mappings.len(),
                    "requesting merged file"
                );
                Effect::Merge(request)
            }
            None => {
                debug!(%file_id, "download already in progress");
                Effect::None
            }
        }
    }

    /// Completions for unknown files or idle controls are ignored.
    fn finish_download(&mut self, file_id: &FileId, outcome: DownloadOutcome) {
        let Some(session) = self.sessions.get_mut(file_id) else {
            warn!(%file_id, "download finished for unknown file");
            return;
        };
        if session.download_control() == DownloadControl::Ready {
            debug!(%file_id, "no download in progress");
            return;
        }
        session.finish_download();
        self.toast = Some(match outcome {
            DownloadOutcome::Saved { filename } => {
                info!(%file_id, %filename, "merged file saved");
                ToastState::download_saved(&filename)
            }
            DownloadOutcome::Failed { message } => {
                warn!(%file_id, %message, "merge download failed");
                ToastState::download_failed(message)
            }
        });
    }
}
