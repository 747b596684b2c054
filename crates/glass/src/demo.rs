//! The demo page: a navigation bar, a hero card, a specs card and a
//! call-to-action card, each mounted as a glass surface, replayed against a
//! scripted session.

use std::collections::HashMap;

use glass_ui::{
    Color, ControlMode, ElementId, ElementRole, ElementState, ElementTree, FrameScheduler, GlassConfig,
    GlassError, GlassEvent, GlassRenderer, GlassResult, GlassSurface, HighlightOverlayController,
    MagnifiedButton, Rect, RenderCommand, SharedOverlay, SpecTable, Stack, TabStrip, Touch, Typewriter,
};

use crate::script::{Action, Step};

/// Page size of the demo.
const PAGE: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);
/// Navigation tabs.
const TABS: [&str; 4] = ["overview", "science", "specs", "contact"];
/// Hero headline typed by the typewriter.
const HEADLINE: [&str; 2] = ["Movement", "Intelligence"];
/// Number of rows in the specs card.
const SPEC_ROWS: usize = 3;

/// A whole page of glass components sharing one tree and one scheduler.
pub struct Demo {
    tree: ElementTree,
    scheduler: FrameScheduler,
    labels: HashMap<String, ElementId>,
    surfaces: Vec<(String, GlassSurface)>,
    tabs: TabStrip,
    specs: SpecTable,
    cta_button: MagnifiedButton,
    typewriter: Typewriter,
    headline_origin: (f32, f32),
    frame_interval_ms: f64,
    viewport_width: f32,
}

impl Demo {
    /// Builds and mounts the page.
    ///
    /// # Errors
    ///
    /// Returns an error if a surface cannot be mounted.
    pub fn build(config: GlassConfig) -> GlassResult<Self> {
        let mut tree = ElementTree::new();
        let mut labels = HashMap::new();
        let mut add = |tree: &mut ElementTree, parent: Option<ElementId>, label: &str, state: ElementState| {
            let state = state.with_label(label);
            let id = match parent {
                Some(parent) => tree.add_child(parent, state),
                None => tree.add_root(state),
            };
            labels.insert(label.to_string(), id);
            id
        };

        let id = tree.next_id();
        let page = add(&mut tree, None, "page", ElementState::new(id, PAGE));

        // Navigation bar with its tabs in a row.
        let id = tree.next_id();
        let nav = add(
            &mut tree,
            Some(page),
            "nav",
            ElementState::new(id, Rect::new(340.0, 24.0, 600.0, 56.0)),
        );
        let tab_rects = Stack::horizontal()
            .with_gap(12.0)
            .with_padding(10.0)
            .arrange(tree.bounding_rect(nav), &[(110.0, 28.0); TABS.len()]);
        let mut tab_ids = Vec::with_capacity(TABS.len());
        for (name, rect) in TABS.iter().zip(tab_rects) {
            let id = tree.next_id();
            tab_ids.push(add(
                &mut tree,
                Some(nav),
                &format!("nav.{name}"),
                ElementState::new(id, rect).with_role(ElementRole::Link),
            ));
        }

        // Hero card: the typed headline and a button.
        let id = tree.next_id();
        let hero = add(
            &mut tree,
            Some(page),
            "hero",
            ElementState::new(id, Rect::new(240.0, 140.0, 800.0, 360.0)),
        );
        let hero_bounds = tree.bounding_rect(hero);
        let rows = Stack::vertical()
            .with_gap(8.0)
            .with_padding(24.0)
            .arrange(hero_bounds, &[(752.0, 64.0), (200.0, 40.0)]);
        let id = tree.next_id();
        add(&mut tree, Some(hero), "hero.headline", ElementState::new(id, rows[0]));
        let id = tree.next_id();
        let docs = add(
            &mut tree,
            Some(hero),
            "hero.docs",
            ElementState::new(id, rows[1]).with_role(ElementRole::Button),
        );
        let id = tree.next_id();
        add(
            &mut tree,
            Some(docs),
            "hero.docs.label",
            ElementState::new(id, rows[1].shrink(8.0)),
        );

        // Specs card: rows magnified one at a time.
        let id = tree.next_id();
        let specs = add(
            &mut tree,
            Some(page),
            "specs",
            ElementState::new(id, Rect::new(1060.0, 140.0, 200.0, 180.0)),
        );
        let spec_rects = Stack::vertical()
            .with_gap(8.0)
            .with_padding(16.0)
            .arrange(tree.bounding_rect(specs), &[(168.0, 32.0); SPEC_ROWS]);
        let mut spec_ids = Vec::with_capacity(SPEC_ROWS);
        for (i, rect) in spec_rects.iter().enumerate() {
            let id = tree.next_id();
            let row = add(
                &mut tree,
                Some(specs),
                &format!("specs.row{i}"),
                ElementState::new(id, *rect).with_role(ElementRole::SpecItem),
            );
            let id = tree.next_id();
            add(
                &mut tree,
                Some(row),
                &format!("specs.row{i}.value"),
                ElementState::new(id, rect.shrink(6.0)).pass_through(),
            );
            spec_ids.push(row);
        }

        // Call-to-action card with a single magnified button.
        let id = tree.next_id();
        let cta = add(
            &mut tree,
            Some(page),
            "cta",
            ElementState::new(id, Rect::new(440.0, 560.0, 400.0, 120.0)),
        );
        let id = tree.next_id();
        let cta_button = add(
            &mut tree,
            Some(cta),
            "cta.start",
            ElementState::new(id, Rect::new(560.0, 600.0, 160.0, 40.0)).with_role(ElementRole::Button),
        );

        let mut scheduler = FrameScheduler::new();
        let viewport_width = PAGE.width;

        let nav_config = config.navigation();
        let nav_overlay = SharedOverlay::default();
        let specs_overlay = SharedOverlay::default();
        let cta_overlay = SharedOverlay::default();
        let mut surfaces = vec![
            (
                "nav".to_string(),
                GlassSurface::new(nav, nav_config)
                    .with_magnifier(&tree, ControlMode::External(nav_overlay.clone())),
            ),
            (
                "hero".to_string(),
                GlassSurface::new(hero, config).with_magnifier(&tree, ControlMode::SelfManaged),
            ),
            (
                "specs".to_string(),
                GlassSurface::new(specs, config)
                    .with_magnifier(&tree, ControlMode::External(specs_overlay.clone())),
            ),
            (
                "cta".to_string(),
                GlassSurface::new(cta, config)
                    .with_magnifier(&tree, ControlMode::External(cta_overlay.clone()))
                    .with_global_pointer((0.0, 0.0)),
            ),
        ];
        for (_, surface) in &mut surfaces {
            surface.mount(&mut tree, &mut scheduler, viewport_width)?;
        }

        let external = |container: ElementId, shared: SharedOverlay, config: &GlassConfig| {
            HighlightOverlayController::new(&tree, container, ControlMode::External(shared), config)
        };
        let mut tabs = TabStrip::new(nav, tab_ids, external(nav, nav_overlay, &nav_config), &nav_config);
        tabs.mount(&mut scheduler);
        let specs = SpecTable::new(spec_ids, external(specs, specs_overlay, &config), config.geometry);
        let cta_button = MagnifiedButton::new(cta_button, config.geometry)
            .with_magnifier(external(cta, cta_overlay, &config));

        let mut typewriter = Typewriter::new(
            HEADLINE.iter().map(|line| (*line).to_string()).collect(),
            config.typewriter,
            config.reduced_motion,
        );
        typewriter.start(&mut scheduler);

        tracing::info!(
            "demo page ready: {} elements, {} surfaces, {} tasks scheduled",
            tree.len(),
            surfaces.len(),
            scheduler.active_tasks()
        );

        Ok(Self {
            headline_origin: (rows[0].x, rows[0].y),
            tree,
            scheduler,
            labels,
            surfaces,
            tabs,
            specs,
            cta_button,
            typewriter,
            frame_interval_ms: config.tracker.frame_interval_ms.max(1.0),
            viewport_width,
        })
    }

    /// Returns the element tree.
    #[must_use]
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Returns the scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Returns the mounted surface with the given label.
    #[must_use]
    pub fn surface(&self, label: &str) -> Option<&GlassSurface> {
        self.surfaces
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, surface)| surface)
    }

    /// Returns the tab strip.
    #[must_use]
    pub fn tabs(&self) -> &TabStrip {
        &self.tabs
    }

    /// Returns the spec table.
    #[must_use]
    pub fn specs(&self) -> &SpecTable {
        &self.specs
    }

    /// Returns the last viewport width.
    #[must_use]
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Returns the typewriter.
    #[must_use]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// Resolves an element label.
    ///
    /// # Errors
    ///
    /// Returns [`GlassError::UnknownElement`] for labels not in the tree.
    pub fn lookup(&self, label: &str) -> GlassResult<ElementId> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| GlassError::UnknownElement(label.to_string()))
    }

    /// Runs every frame between the scheduler's clock and `until_ms`.
    pub fn run_until(&mut self, until_ms: f64) {
        let mut now = self.scheduler.now_ms();
        loop {
            let fired = self.scheduler.advance(now);
            for (_, surface) in &mut self.surfaces {
                surface.on_frame(&self.tree, &fired);
            }
            self.tabs.on_tasks(&self.tree, &fired);
            self.typewriter.on_tasks(&mut self.scheduler, &fired);

            if now >= until_ms {
                break;
            }
            now = (now + self.frame_interval_ms).min(until_ms);
        }
    }

    /// Replays one step. Returns the frame's render commands for render
    /// steps.
    ///
    /// # Errors
    ///
    /// Returns [`GlassError::UnknownElement`] if the step names an element
    /// that does not exist.
    pub fn apply(&mut self, step: &Step) -> GlassResult<Option<Vec<RenderCommand>>> {
        self.run_until(step.at_ms);

        match &step.action {
            Action::PointerEnter { surface } => self.to_surface(surface, &GlassEvent::PointerEnter)?,
            Action::PointerLeave { surface } => {
                self.to_surface(surface, &GlassEvent::PointerLeave)?;
                match surface.as_str() {
                    "nav" => {
                        self.tabs.handle_event(&self.tree, &GlassEvent::PointerLeave);
                    }
                    "specs" => {
                        self.specs.handle_event(&self.tree, &GlassEvent::PointerLeave);
                    }
                    _ => {}
                }
            }
            Action::PointerOver { target } => {
                let target = self.lookup(target)?;
                self.to_owner(target, &GlassEvent::PointerOver { target });
            }
            Action::PointerOut { target, related } => {
                let target = self.lookup(target)?;
                let related = related.as_deref().map(|label| self.lookup(label)).transpose()?;
                self.to_owner(target, &GlassEvent::PointerOut { target, related });
            }
            Action::FocusIn { target } => {
                let target = self.lookup(target)?;
                self.to_owner(target, &GlassEvent::FocusIn { target });
            }
            Action::FocusOut { target, related } => {
                let target = self.lookup(target)?;
                let related = related.as_deref().map(|label| self.lookup(label)).transpose()?;
                self.to_owner(target, &GlassEvent::FocusOut { target, related });
            }
            Action::PointerMove { x, y } => self.at_point(*x, *y, &GlassEvent::PointerMove { x: *x, y: *y }),
            Action::GlobalPointer { x, y } => {
                for (_, surface) in &mut self.surfaces {
                    surface.set_global_pointer(*x, *y);
                }
            }
            Action::TouchStart { target, x, y } => {
                let target = self.lookup(target)?;
                let event = GlassEvent::TouchStart {
                    target,
                    touches: vec![Touch::new(*x, *y)],
                };
                self.to_owner(target, &event);
            }
            Action::TouchMove { x, y } => {
                let event = GlassEvent::TouchMove {
                    touches: vec![Touch::new(*x, *y)],
                };
                self.broadcast(&event);
            }
            Action::TouchEnd => self.broadcast(&GlassEvent::TouchEnd),
            Action::TouchCancel => self.broadcast(&GlassEvent::TouchCancel),
            Action::Resize { viewport_width } => {
                self.viewport_width = *viewport_width;
                let event = GlassEvent::Resize {
                    viewport_width: *viewport_width,
                };
                self.broadcast(&event);
                self.tabs.handle_event(&self.tree, &event);
                self.specs.handle_event(&self.tree, &event);
            }
            Action::SelectTab { index } => self.tabs.select(*index, &mut self.scheduler),
            Action::Render => return Ok(Some(self.render())),
        }
        Ok(None)
    }

    /// Draws every surface and the headline.
    pub fn render(&self) -> Vec<RenderCommand> {
        let mut renderer = GlassRenderer::new();
        renderer.begin_frame();
        for (_, surface) in &self.surfaces {
            surface.render(&self.tree, &mut renderer);
        }
        self.typewriter
            .render(self.headline_origin, Color::WHITE, &mut renderer);
        renderer.end_frame()
    }

    /// Unmounts everything. Returns the number of tasks still scheduled,
    /// which is zero unless something leaked.
    pub fn shutdown(&mut self) -> usize {
        for (_, surface) in &mut self.surfaces {
            surface.unmount(&mut self.tree);
        }
        self.tabs.unmount();
        self.typewriter.stop();
        self.scheduler.active_tasks()
    }

    fn to_surface(&mut self, label: &str, event: &GlassEvent) -> GlassResult<()> {
        let tree = &self.tree;
        let (_, surface) = self
            .surfaces
            .iter_mut()
            .find(|(name, _)| name == label)
            .ok_or_else(|| GlassError::UnknownElement(label.to_string()))?;
        surface.handle_event(tree, event);
        Ok(())
    }

    /// Delivers a targeted event to the surface containing the target and
    /// to the widgets owning it.
    fn to_owner(&mut self, target: ElementId, event: &GlassEvent) {
        let tree = &self.tree;
        for (_, surface) in &mut self.surfaces {
            if tree.contains(surface.container(), target) {
                surface.handle_event(tree, event);
            }
        }
        if tree.contains(self.tabs.strip(), target) {
            self.tabs.handle_event(tree, event);
        }
        if tree.contains(self.specs.container(), target) {
            self.specs.handle_event(tree, event);
        }
        if target == self.cta_button.element() {
            let reported = match event {
                GlassEvent::PointerOver { .. } => self.cta_button.pointer_enter(tree),
                GlassEvent::PointerOut { .. } => self.cta_button.pointer_leave(),
                GlassEvent::FocusIn { .. } => self.cta_button.focus(tree),
                GlassEvent::FocusOut { .. } => self.cta_button.blur(),
                _ => false,
            };
            tracing::trace!("cta button {} -> {}", event.name(), reported);
        }
    }

    fn at_point(&mut self, x: f32, y: f32, event: &GlassEvent) {
        let tree = &self.tree;
        for (_, surface) in &mut self.surfaces {
            if tree.bounding_rect(surface.container()).contains(x, y) {
                surface.handle_event(tree, event);
            }
        }
    }

    fn broadcast(&mut self, event: &GlassEvent) {
        let tree = &self.tree;
        for (_, surface) in &mut self.surfaces {
            surface.handle_event(tree, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(at_ms: f64, action: Action) -> Step {
        Step { at_ms, action }
    }

    #[test]
    fn test_hover_in_hero() {
        let mut demo = Demo::build(GlassConfig::default()).unwrap();
        let over = step(
            0.0,
            Action::PointerOver {
                target: "hero.docs.label".into(),
            },
        );
        assert!(demo.apply(&over).unwrap().is_none());

        let state = demo.surface("hero").unwrap().overlay().unwrap().state();
        assert!(state.visible);
        assert_eq!((state.rect.left, state.rect.top), (400.0, 116.0));
        assert_eq!((state.rect.width, state.rect.height), (212.0, 40.0));
    }

    #[test]
    fn test_tabs_anchor_and_restore() {
        let mut demo = Demo::build(GlassConfig::default()).unwrap();
        demo.run_until(16.0);

        let nav = demo.surface("nav").unwrap().overlay().unwrap().state();
        assert!(nav.visible);
        assert_eq!(nav.rect.left, 65.0);

        demo.apply(&step(20.0, Action::PointerOver { target: "nav.specs".into() }))
            .unwrap();
        assert_eq!(demo.tabs().hovered(), Some(2));

        demo.apply(&step(
            40.0,
            Action::PointerLeave {
                surface: "nav".into(),
            },
        ))
        .unwrap();
        let nav = demo.surface("nav").unwrap().overlay().unwrap().state();
        assert_eq!(nav.rect.left, 65.0);
        assert_eq!(demo.tabs().hovered(), None);
    }

    #[test]
    fn test_spec_rows_share_card_magnifier() {
        let mut demo = Demo::build(GlassConfig::default()).unwrap();
        demo.apply(&step(0.0, Action::PointerOver { target: "specs.row0.value".into() }))
            .unwrap();

        let state = demo.surface("specs").unwrap().overlay().unwrap().state();
        assert!(state.visible);
        assert_eq!((state.rect.left, state.rect.top), (100.0, 32.0));
        assert_eq!((state.rect.width, state.rect.height), (176.0, 40.0));
        assert_eq!(demo.specs().active(), Some(0));

        demo.apply(&step(
            10.0,
            Action::PointerLeave {
                surface: "specs".into(),
            },
        ))
        .unwrap();
        let state = demo.surface("specs").unwrap().overlay().unwrap().state();
        assert!(!state.visible);
        assert_eq!(state.rect.top, 32.0);
        assert_eq!(demo.specs().active(), None);
    }

    #[test]
    fn test_unknown_label() {
        let mut demo = Demo::build(GlassConfig::default()).unwrap();
        let err = demo
            .apply(&step(0.0, Action::FocusIn { target: "nope".into() }))
            .unwrap_err();
        assert!(matches!(err, GlassError::UnknownElement(label) if label == "nope"));
    }

    #[test]
    fn test_render_and_shutdown() {
        let mut demo = Demo::build(GlassConfig::default()).unwrap();
        demo.run_until(500.0);

        let commands = demo.apply(&step(500.0, Action::Render)).unwrap().unwrap();
        let glass = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Glass { .. }))
            .count();
        assert_eq!(glass, 4);
        assert!(commands.iter().any(|c| matches!(c, RenderCommand::Text { .. })));

        assert!(demo.scheduler().active_tasks() > 0);
        assert_eq!(demo.shutdown(), 0);
    }

    #[test]
    fn test_reduced_motion_page_has_no_loops() {
        let config = GlassConfig {
            reduced_motion: true,
            ..GlassConfig::default()
        };
        let demo = Demo::build(config).unwrap();

        assert_eq!(demo.scheduler().active_frame_loops(), 0);
        assert!(demo.typewriter().is_finished());
    }
}
