//! Tab strip driving a parent's magnifier.
//!
//! The strip writes through an external-mode controller on the glass surface
//! it lives in: the surface renders the shared state and the strip is the
//! only writer. Writes are skipped until that surface is mounted. Hovering a tab
//! moves the magnifier onto it, leaving a tab keeps it lit, and leaving the
//! strip (by pointer or by focus) returns it to the active tab.

use crate::config::GlassConfig;
use crate::event::GlassEvent;
use crate::geometry::GeometryResolver;
use crate::overlay::HighlightOverlayController;
use crate::scheduler::{FrameScheduler, TaskGuard, TaskId};
use crate::tree::{ElementId, ElementTree};

/// Delay before the magnifier settles on a newly selected tab.
pub const ANCHOR_DELAY_MS: f64 = 16.0;

/// A row of tabs sharing one magnifier.
#[derive(Debug)]
pub struct TabStrip {
    strip: ElementId,
    tabs: Vec<ElementId>,
    active: usize,
    hovered: Option<usize>,
    magnifier: HighlightOverlayController,
    resolver: GeometryResolver,
    anchor: Option<TaskGuard>,
}

impl TabStrip {
    /// Creates a strip over `tabs` (all descendants of `strip`) with the
    /// first tab active. `magnifier` is positioned in the glass surface
    /// around the strip, normally in external mode.
    #[must_use]
    pub fn new(
        strip: ElementId,
        tabs: Vec<ElementId>,
        magnifier: HighlightOverlayController,
        config: &GlassConfig,
    ) -> Self {
        Self {
            strip,
            tabs,
            active: 0,
            hovered: None,
            magnifier,
            resolver: GeometryResolver::new(config.geometry),
            anchor: None,
        }
    }

    /// Returns the element containing the tabs.
    #[must_use]
    pub const fn strip(&self) -> ElementId {
        self.strip
    }

    /// Returns the index of the active tab.
    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    /// Returns the index of the magnified (hovered or focused) tab.
    #[must_use]
    pub const fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Returns the tab elements.
    #[must_use]
    pub fn tabs(&self) -> &[ElementId] {
        &self.tabs
    }

    /// Returns the magnifier the strip writes to.
    #[must_use]
    pub const fn overlay(&self) -> &HighlightOverlayController {
        &self.magnifier
    }

    /// Returns the pending anchor task, if any.
    #[must_use]
    pub fn anchor_task(&self) -> Option<TaskId> {
        self.anchor
            .as_ref()
            .filter(|guard| !guard.is_cancelled())
            .map(TaskGuard::id)
    }

    /// Schedules the initial anchor onto the active tab.
    pub fn mount(&mut self, scheduler: &mut FrameScheduler) {
        self.schedule_anchor(scheduler);
    }

    /// Cancels the pending anchor. Idempotent.
    pub fn unmount(&mut self) {
        self.anchor = None;
        self.hovered = None;
    }

    /// Makes `index` the active tab. The magnifier follows after
    /// [`ANCHOR_DELAY_MS`]. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize, scheduler: &mut FrameScheduler) {
        if index >= self.tabs.len() {
            return;
        }
        tracing::debug!("active tab {} -> {}", self.active, index);
        self.active = index;
        self.schedule_anchor(scheduler);
    }

    /// Runs the anchor if it is among the `fired` tasks. Returns true if the
    /// overlay moved.
    pub fn on_tasks(&mut self, tree: &ElementTree, fired: &[TaskId]) -> bool {
        match self.anchor_task() {
            Some(task) if fired.contains(&task) => {
                self.anchor = None;
                self.move_to(tree, self.active)
            }
            _ => false,
        }
    }

    /// Handles one event delivered to the strip. Returns true if the overlay
    /// was written.
    pub fn handle_event(&mut self, tree: &ElementTree, event: &GlassEvent) -> bool {
        match event {
            GlassEvent::PointerOver { target } | GlassEvent::FocusIn { target } => {
                match self.tab_index(tree, *target) {
                    Some(index) => {
                        self.hovered = Some(index);
                        self.move_to(tree, index)
                    }
                    None => false,
                }
            }
            GlassEvent::PointerOut { related, .. } => {
                if self.is_inside(tree, *related) {
                    self.keep_visible(tree)
                } else {
                    self.restore(tree)
                }
            }
            GlassEvent::FocusOut { related, .. } => {
                if self.is_inside(tree, *related) {
                    false
                } else {
                    self.restore(tree)
                }
            }
            GlassEvent::PointerLeave => self.restore(tree),
            GlassEvent::Resize { .. } => self.move_to(tree, self.active),
            _ => false,
        }
    }

    fn restore(&mut self, tree: &ElementTree) -> bool {
        self.hovered = None;
        self.move_to(tree, self.active)
    }

    fn is_inside(&self, tree: &ElementTree, related: Option<ElementId>) -> bool {
        related.is_some_and(|id| tree.contains(self.strip, id))
    }

    fn tab_index(&self, tree: &ElementTree, target: ElementId) -> Option<usize> {
        self.tabs.iter().position(|&tab| tree.contains(tab, target))
    }

    fn schedule_anchor(&mut self, scheduler: &mut FrameScheduler) {
        self.anchor = Some(scheduler.set_timeout(ANCHOR_DELAY_MS));
    }

    fn keep_visible(&mut self, tree: &ElementTree) -> bool {
        if !self.magnifier.is_live(tree) {
            return false;
        }
        let rect = self.magnifier.state().rect;
        self.magnifier.set_state(rect, true);
        true
    }

    fn move_to(&mut self, tree: &ElementTree, index: usize) -> bool {
        let Some(&tab) = self.tabs.get(index) else {
            return false;
        };
        if !self.magnifier.is_live(tree) {
            tracing::trace!("tab {} moved before its glass surface was mounted", tab.raw());
            return false;
        }
        match self.resolver.resolve(tree, tab, self.magnifier.container()) {
            Some(rect) => {
                self.magnifier.set_external(rect);
                true
            }
            None => false,
        }
    }
}
