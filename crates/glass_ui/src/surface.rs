//! Glass surface: one mounted container with its ambient highlight and an
//! optional magnifier overlay.
//!
//! A surface owns everything it schedules. `mount` registers the frame loop
//! and the event binding, `unmount` releases both, and a surface whose
//! container disappears from the tree stops its loop on the next frame.

use crate::binding::EventBinding;
use crate::config::GlassConfig;
use crate::error::{GlassError, GlassResult};
use crate::event::GlassEvent;
use crate::highlight::{AmbientHighlight, GlobalPointer};
use crate::overlay::{ControlMode, HighlightOverlayController};
use crate::render::{GlassRenderer, RenderCommand};
use crate::scheduler::{FrameScheduler, TaskGuard, TaskId};
use crate::style::GlassTint;
use crate::tree::{ElementFlags, ElementId, ElementTree};

/// Backdrop blur on narrow viewports.
const MOBILE_BLUR: f32 = 6.0;
/// Backdrop blur on wide viewports.
const DESKTOP_BLUR: f32 = 8.0;
/// Tints every surface is drawn with.
const TINT: GlassTint = GlassTint::FROSTED;

#[derive(Debug)]
struct Magnifier {
    overlay: HighlightOverlayController,
    binding: Option<EventBinding>,
}

/// A container rendered as liquid glass.
#[derive(Debug)]
pub struct GlassSurface {
    container: ElementId,
    config: GlassConfig,
    highlight: AmbientHighlight,
    magnifier: Option<Magnifier>,
    global: Option<GlobalPointer>,
    frame_loop: Option<TaskGuard>,
    mounted: bool,
}

impl GlassSurface {
    /// Creates an unmounted surface without a magnifier.
    #[must_use]
    pub fn new(container: ElementId, config: GlassConfig) -> Self {
        Self {
            container,
            highlight: AmbientHighlight::new(config.look, config.tracker, config.reduced_motion),
            config,
            magnifier: None,
            global: None,
            frame_loop: None,
            mounted: false,
        }
    }

    /// Adds a magnifier overlay driven in `mode`.
    #[must_use]
    pub fn with_magnifier(mut self, tree: &ElementTree, mode: ControlMode) -> Self {
        self.magnifier = Some(Magnifier {
            overlay: HighlightOverlayController::new(tree, self.container, mode, &self.config),
            binding: None,
        });
        self
    }

    /// Follows a global pointer (plus `offset`) instead of local pointer
    /// moves.
    #[must_use]
    pub fn with_global_pointer(mut self, offset: (f32, f32)) -> Self {
        self.global = Some(GlobalPointer {
            position: (0.0, 0.0),
            offset,
        });
        self
    }

    /// Returns the container element.
    #[must_use]
    pub const fn container(&self) -> ElementId {
        self.container
    }

    /// Returns true between `mount` and `unmount`.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns the ambient highlight.
    #[must_use]
    pub fn highlight(&self) -> &AmbientHighlight {
        &self.highlight
    }

    /// Returns the magnifier overlay, if any.
    #[must_use]
    pub fn overlay(&self) -> Option<&HighlightOverlayController> {
        self.magnifier.as_ref().map(|m| &m.overlay)
    }

    /// Returns the magnifier's event binding while mounted.
    #[must_use]
    pub fn binding(&self) -> Option<&EventBinding> {
        self.magnifier.as_ref().and_then(|m| m.binding.as_ref())
    }

    /// Returns the frame loop task while one is scheduled.
    #[must_use]
    pub fn frame_task(&self) -> Option<TaskId> {
        self.frame_loop
            .as_ref()
            .filter(|guard| !guard.is_cancelled())
            .map(TaskGuard::id)
    }

    /// Mounts the surface on its container.
    ///
    /// Schedules the pointer-follow loop (unless reduced motion is on), binds
    /// the magnifier events and measures the container. Mounting twice is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GlassError::UnknownElement`] if the container is not in the
    /// tree.
    pub fn mount(
        &mut self,
        tree: &mut ElementTree,
        scheduler: &mut FrameScheduler,
        viewport_width: f32,
    ) -> GlassResult<()> {
        if self.mounted {
            return Ok(());
        }
        let element = tree
            .get_mut(self.container)
            .ok_or_else(|| GlassError::UnknownElement(format!("element {}", self.container.raw())))?;
        element.flags.set(ElementFlags::GLASS_SURFACE);

        if self.highlight.tracker().is_enabled() {
            self.frame_loop = Some(scheduler.request_frame_loop(self.config.tracker.frame_interval_ms));
        }
        if let Some(magnifier) = &mut self.magnifier {
            magnifier.binding = Some(EventBinding::bind(self.container));
        }
        self.mounted = true;
        self.resize(tree, viewport_width);

        tracing::debug!(
            "mounted glass surface on element {} (frame loop: {})",
            self.container.raw(),
            self.frame_loop.is_some()
        );
        Ok(())
    }

    /// Releases the frame loop and the event binding. Idempotent.
    pub fn unmount(&mut self, tree: &mut ElementTree) {
        if !self.mounted {
            return;
        }
        if let Some(guard) = self.frame_loop.take() {
            guard.cancel();
        }
        if let Some(magnifier) = &mut self.magnifier {
            if let Some(mut binding) = magnifier.binding.take() {
                binding.unbind();
            }
        }
        if let Some(element) = tree.get_mut(self.container) {
            element.flags.clear(ElementFlags::GLASS_SURFACE);
        }
        self.mounted = false;
        tracing::debug!("unmounted glass surface on element {}", self.container.raw());
    }

    /// Handles one event. Returns true if the magnifier state was written.
    pub fn handle_event(&mut self, tree: &ElementTree, event: &GlassEvent) -> bool {
        if !self.mounted {
            return false;
        }
        match event {
            GlassEvent::PointerEnter => self.highlight.pointer_enter(),
            GlassEvent::PointerLeave => self.highlight.pointer_leave(),
            GlassEvent::PointerMove { x, y } if self.global.is_none() => {
                self.highlight
                    .pointer_move(tree.bounding_rect(self.container), *x, *y);
            }
            GlassEvent::Resize { viewport_width } => self.resize(tree, *viewport_width),
            _ => {}
        }

        match &mut self.magnifier {
            Some(Magnifier {
                overlay,
                binding: Some(binding),
            }) => binding.dispatch(tree, overlay, event),
            _ => false,
        }
    }

    /// Records the latest global pointer position. Ignored unless the
    /// surface follows a global pointer.
    pub fn set_global_pointer(&mut self, x: f32, y: f32) {
        if let Some(global) = &mut self.global {
            global.position = (x, y);
        }
    }

    /// Re-measures the highlight and re-centers a resting magnifier.
    pub fn resize(&mut self, tree: &ElementTree, viewport_width: f32) {
        let bounds = tree.bounding_rect(self.container);
        self.highlight.resize(bounds, viewport_width);
        if let Some(magnifier) = &mut self.magnifier {
            magnifier.overlay.relayout(tree, self.config.geometry.min_height);
        }
    }

    /// Runs one frame if the surface's loop is among the `fired` tasks.
    ///
    /// A detached container cancels the loop instead of stepping. Returns
    /// true if the highlight moved.
    pub fn on_frame(&mut self, tree: &ElementTree, fired: &[TaskId]) -> bool {
        let Some(task) = self.frame_task() else {
            return false;
        };
        if !fired.contains(&task) {
            return false;
        }
        if !tree.is_attached(self.container) {
            tracing::debug!(
                "element {} detached, stopping frame loop",
                self.container.raw()
            );
            self.frame_loop = None;
            return false;
        }

        if let Some(global) = self.global {
            let (x, y) = global.resolved();
            self.highlight
                .pointer_move(tree.bounding_rect(self.container), x, y);
        }
        self.highlight.frame()
    }

    /// Emits the draw commands of this surface.
    pub fn render(&self, tree: &ElementTree, renderer: &mut GlassRenderer) {
        let bounds = tree.bounding_rect(self.container);
        if bounds.is_degenerate() {
            return;
        }
        renderer.push_clip(bounds);

        let (px, py) = self.highlight.tracker().current();
        let center = (
            bounds.x + bounds.width * px / 100.0,
            bounds.y + bounds.height * py / 100.0,
        );
        let opacity = self.highlight.opacity();
        renderer.push(RenderCommand::RadialHighlight {
            center,
            radius: self.highlight.radius(),
            color: TINT.halo,
            opacity,
        });
        if self.config.look.hotspot {
            renderer.push(RenderCommand::RadialHighlight {
                center,
                radius: AmbientHighlight::HOTSPOT_RADIUS,
                color: TINT.hotspot,
                opacity,
            });
        }

        if let Some(magnifier) = &self.magnifier {
            let state = magnifier.overlay.state();
            renderer.push(RenderCommand::Glass {
                bounds: state.rect.to_bounds((bounds.x, bounds.y)),
                tint: TINT.magnifier,
                rim: TINT.rim,
                corner_radius: self.config.magnifier.corner_radius,
                blur: if self.highlight.is_mobile() {
                    MOBILE_BLUR
                } else {
                    DESKTOP_BLUR
                },
                opacity: if state.visible { 1.0 } else { 0.0 },
            });
        }

        renderer.pop_clip();
    }
}
