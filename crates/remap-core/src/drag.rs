//! Drag gesture state machine.
//!
//! `Idle -> Dragging -> (Dropped | Cancelled) -> Idle`. Only one drag can be
//! in progress at a time, across all files.

use crate::ids::{FileId, HeaderSource};

/// The header being dragged and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragContext {
    pub file_id: FileId,
    pub header: String,
    pub source: HeaderSource,
    /// Valid target currently under the pointer.
    pub hovered: Option<String>,
}

impl DragContext {
    /// Whether an item of `source` in `file_id` accepts this drag.
    pub fn accepts(&self, file_id: &FileId, source: HeaderSource) -> bool {
        &self.file_id == file_id && self.source != source
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragContext),
}

/// Why a drop was not turned into a pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    NotDragging,
    SameList,
    OtherFile,
}

/// A drop resolved into an (extra, missing) pair, independent of which side
/// was dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDrop {
    pub file_id: FileId,
    pub extra: String,
    pub missing: String,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn context(&self) -> Option<&DragContext> {
        match self {
            Self::Idle => None,
            Self::Dragging(ctx) => Some(ctx),
        }
    }

    pub fn start(&mut self, file_id: FileId, header: String, source: HeaderSource) {
        *self = Self::Dragging(DragContext {
            file_id,
            header,
            source,
            hovered: None,
        });
    }

    /// Mark `header` as hovered if it is a valid target.
    pub fn enter(&mut self, file_id: &FileId, header: &str, source: HeaderSource) {
        if let Self::Dragging(ctx) = self
            && ctx.accepts(file_id, source)
        {
            ctx.hovered = Some(header.to_string());
        }
    }

    pub fn leave(&mut self, header: &str) {
        if let Self::Dragging(ctx) = self
            && ctx.hovered.as_deref() == Some(header)
        {
            ctx.hovered = None;
        }
    }

    /// Resolve a drop onto `target`. The state is back to `Idle` afterwards,
    /// whatever the result.
    pub fn drop_on(
        &mut self,
        file_id: &FileId,
        target: &str,
        target_source: HeaderSource,
    ) -> Result<ResolvedDrop, DropRejection> {
        let Self::Dragging(ctx) = std::mem::take(self) else {
            return Err(DropRejection::NotDragging);
        };
        if &ctx.file_id != file_id {
            return Err(DropRejection::OtherFile);
        }
        if ctx.source == target_source {
            return Err(DropRejection::SameList);
        }
        let (extra, missing) = match ctx.source {
            HeaderSource::Extra => (ctx.header, target.to_string()),
            HeaderSource::Missing => (target.to_string(), ctx.header),
        };
        Ok(ResolvedDrop {
            file_id: ctx.file_id,
            extra,
            missing,
        })
    }

    /// End the drag without a drop. Returns whether a drag was in progress.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(self).is_dragging()
    }
}
