//! Render projection of a file's mapping panel.
//!
//! Views are rebuilt from session and drag state on every call; nothing in
//! here is ever read back as state.

use serde::Serialize;

use crate::drag::DragState;
use crate::ids::{FileId, HeaderSource};
use crate::session::{DownloadControl, FileSession};

/// A draggable header item in the extra or missing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderItemView {
    pub name: String,
    pub source: HeaderSource,
    /// The item being dragged.
    pub dragging: bool,
    /// Item accepts a drop from the current drag.
    pub valid_drop_target: bool,
    /// Valid target currently under the pointer.
    pub drag_over: bool,
}

/// An entry of the matched list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedItemView {
    pub label: String,
    /// Created in this session (shown with a "New" badge).
    pub is_new: bool,
}

/// Download button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DownloadButtonView {
    pub disabled: bool,
    pub spinner: bool,
}

impl From<DownloadControl> for DownloadButtonView {
    fn from(control: DownloadControl) -> Self {
        let busy = control == DownloadControl::Busy;
        Self {
            disabled: busy,
            spinner: busy,
        }
    }
}

/// Everything a front end needs to draw one file's panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePanelView {
    pub file_id: FileId,
    pub filename: String,
    pub missing: Vec<HeaderItemView>,
    pub extra: Vec<HeaderItemView>,
    pub matched: Vec<MatchedItemView>,
    pub undo_visible: bool,
    pub download: DownloadButtonView,
}

impl FilePanelView {
    pub fn project(session: &FileSession, drag: &DragState) -> Self {
        Self {
            file_id: session.file_id().clone(),
            filename: session.filename().to_string(),
            missing: header_items(session, drag, HeaderSource::Missing),
            extra: header_items(session, drag, HeaderSource::Extra),
            matched: session
                .matched()
                .iter()
                .map(|entry| MatchedItemView {
                    label: entry.label(),
                    is_new: entry.is_new(),
                })
                .collect(),
            undo_visible: session.can_undo(),
            download: session.download_control().into(),
        }
    }

    /// Items of either list carrying a drag affordance.
    pub fn highlighted(&self) -> impl Iterator<Item = &HeaderItemView> {
        self.extra
            .iter()
            .chain(&self.missing)
            .filter(|item| item.dragging || item.valid_drop_target || item.drag_over)
    }
}

fn header_items(
    session: &FileSession,
    drag: &DragState,
    source: HeaderSource,
) -> Vec<HeaderItemView> {
    let file_id = session.file_id();
    let ctx = drag.context().filter(|ctx| &ctx.file_id == file_id);
    session
        .list(source)
        .iter()
        .map(|name| {
            let (dragging, valid, over) = match ctx {
                Some(ctx) => {
                    let valid = ctx.accepts(file_id, source);
                    (
                        ctx.source == source && &ctx.header == name,
                        valid,
                        valid && ctx.hovered.as_deref() == Some(name.as_str()),
                    )
                }
                None => (false, false, false),
            };
            HeaderItemView {
                name: name.clone(),
                source,
                dragging,
                valid_drop_target: valid,
                drag_over: over,
            }
        })
        .collect()
}
