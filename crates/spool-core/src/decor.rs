//! Diff annotator: overlays a marker icon on every step whose
//! definition changed since the last commit.
//!
//! The paint pass is strictly read-only; stale annotations on documents
//! that left version control are cleaned up by the separate
//! [`prune_stale_status`] step, not during painting.

use spool_git::ChangeStatus;

use crate::config::DecorConfig;
use crate::document::{ATTR_DOMAIN_GIT, PipelineDoc};

/// Marker icon drawn over a changed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Added,
    Changed,
    Removed,
}

impl MarkerIcon {
    /// Icon for a change status; unchanged steps get no marker.
    #[must_use]
    pub const fn for_status(status: ChangeStatus) -> Option<Self> {
        match status {
            ChangeStatus::Added => Some(Self::Added),
            ChangeStatus::Changed => Some(Self::Changed),
            ChangeStatus::Removed => Some(Self::Removed),
            ChangeStatus::Unchanged => None,
        }
    }

    /// Path of the icon asset relative to the image root.
    #[must_use]
    pub const fn asset(&self) -> &'static str {
        match self {
            Self::Added => "images/added.svg",
            Self::Changed => "images/changed.svg",
            Self::Removed => "images/removed.svg",
        }
    }
}

/// Drawing surface supplied by the host renderer.
pub trait Canvas {
    /// Draw a marker icon with its top-left corner at `(x, y)` in
    /// canvas coordinates.
    fn draw_icon(&mut self, icon: MarkerIcon, x: i32, y: i32);
}

/// Everything a paint call needs, passed explicitly by the host.
pub struct PaintContext<'a, C: Canvas> {
    /// Drawing surface.
    pub canvas: &'a mut C,
    /// Canvas pan offset.
    pub offset: (i32, i32),
    /// Icon sizing configuration.
    pub decor: DecorConfig,
}

/// Capability invoked by the host renderer after each paint cycle.
pub trait CanvasDecorator {
    /// Overlay decorations for `doc` onto the context's canvas.
    fn paint<C: Canvas>(&self, doc: &PipelineDoc, ctx: &mut PaintContext<'_, C>);
}

/// Decorator that marks steps carrying a change status annotation.
#[derive(Debug, Default)]
pub struct DiffDecorator;

impl CanvasDecorator for DiffDecorator {
    fn paint<C: Canvas>(&self, doc: &PipelineDoc, ctx: &mut PaintContext<'_, C>) {
        if !doc.is_git_tracked() {
            return;
        }

        let mini = ctx.decor.mini_icon_size;
        for step in &doc.steps {
            let Some(icon) = step.change_status().and_then(MarkerIcon::for_status) else {
                continue;
            };

            // Top-right corner of the step icon, compensated for pan.
            let (x, y) = step.position;
            ctx.canvas.draw_icon(
                icon,
                x + ctx.decor.icon_size + ctx.offset.0 - mini / 2,
                y + ctx.offset.1 - mini / 2,
            );
        }
    }
}

/// Remove git status annotations from every step of a document that is
/// no longer tracked.
///
/// Run this when a document is disconnected from version control (or
/// periodically); tracked documents are left untouched.
pub fn prune_stale_status(doc: &mut PipelineDoc) {
    if doc.is_git_tracked() {
        return;
    }
    for step in &mut doc.steps {
        step.remove_domain(ATTR_DOMAIN_GIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StepNode;

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<(MarkerIcon, i32, i32)>,
    }

    impl Canvas for RecordingCanvas {
        fn draw_icon(&mut self, icon: MarkerIcon, x: i32, y: i32) {
            self.calls.push((icon, x, y));
        }
    }

    fn tracked_doc() -> PipelineDoc {
        let mut doc = PipelineDoc::new("sales-load");
        doc.set_version_marker(Some("git: a1b2c3d".to_string()));
        doc
    }

    fn paint(doc: &PipelineDoc, offset: (i32, i32)) -> Vec<(MarkerIcon, i32, i32)> {
        let mut canvas = RecordingCanvas::default();
        let mut ctx = PaintContext {
            canvas: &mut canvas,
            offset,
            decor: DecorConfig::default(),
        };
        DiffDecorator.paint(doc, &mut ctx);
        canvas.calls
    }

    #[test]
    fn test_paints_marker_per_changed_step() {
        let mut doc = tracked_doc();
        let mut added = StepNode::new("Input", (0, 0));
        added.set_change_status(ChangeStatus::Added);
        let mut changed = StepNode::new("Filter", (100, 50));
        changed.set_change_status(ChangeStatus::Changed);
        let mut removed = StepNode::new("Output", (200, 100));
        removed.set_change_status(ChangeStatus::Removed);
        doc.steps.extend([added, changed, removed]);

        let calls = paint(&doc, (0, 0));
        let icons: Vec<MarkerIcon> = calls.iter().map(|(i, _, _)| *i).collect();
        assert_eq!(
            icons,
            vec![MarkerIcon::Added, MarkerIcon::Changed, MarkerIcon::Removed]
        );
    }

    #[test]
    fn test_marker_position_accounts_for_sizes_and_pan() {
        let mut doc = tracked_doc();
        let mut step = StepNode::new("Filter", (100, 50));
        step.set_change_status(ChangeStatus::Changed);
        doc.steps.push(step);

        // Defaults: icon_size 32, mini_icon_size 16.
        let calls = paint(&doc, (-30, 7));
        assert_eq!(calls, vec![(MarkerIcon::Changed, 100 + 32 - 30 - 8, 50 + 7 - 8)]);
    }

    #[test]
    fn test_unannotated_and_unchanged_steps_get_no_marker() {
        let mut doc = tracked_doc();
        doc.steps.push(StepNode::new("Plain", (0, 0)));
        let mut unchanged = StepNode::new("Same", (10, 10));
        unchanged.set_change_status(ChangeStatus::Unchanged);
        doc.steps.push(unchanged);

        assert!(paint(&doc, (0, 0)).is_empty());
    }

    #[test]
    fn test_untracked_document_is_not_painted_or_mutated() {
        let mut doc = PipelineDoc::new("sales-load");
        let mut step = StepNode::new("Input", (0, 0));
        step.set_change_status(ChangeStatus::Added);
        doc.steps.push(step);

        assert!(paint(&doc, (0, 0)).is_empty());
        // Stale annotation survives the paint; pruning is explicit.
        assert_eq!(
            doc.steps[0].change_status(),
            Some(ChangeStatus::Added)
        );
    }

    #[test]
    fn test_prune_clears_untracked_documents_only() {
        let mut untracked = PipelineDoc::new("a");
        let mut step = StepNode::new("Input", (0, 0));
        step.set_change_status(ChangeStatus::Changed);
        untracked.steps.push(step);

        prune_stale_status(&mut untracked);
        assert_eq!(untracked.steps[0].change_status(), None);

        let mut tracked = tracked_doc();
        let mut step = StepNode::new("Input", (0, 0));
        step.set_change_status(ChangeStatus::Changed);
        tracked.steps.push(step);

        prune_stale_status(&mut tracked);
        assert_eq!(
            tracked.steps[0].change_status(),
            Some(ChangeStatus::Changed)
        );
    }

    #[test]
    fn test_marker_assets_are_distinct() {
        let assets = [
            MarkerIcon::Added.asset(),
            MarkerIcon::Changed.asset(),
            MarkerIcon::Removed.asset(),
        ];
        assert_eq!(
            assets.len(),
            assets.iter().collect::<std::collections::HashSet<_>>().len()
        );
    }
}
