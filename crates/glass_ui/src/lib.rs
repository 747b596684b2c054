//! # Glass UI
//!
//! Pointer-relative overlay positioning for "liquid glass" surfaces:
//! - A magnifier that follows hover, focus and touch over interactive
//!   descendants of a container
//! - An ambient specular highlight that eases toward the pointer every frame
//! - Components (tab strip, spec table, button, typewriter) built on the same engine
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        GLASS PIPELINE                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  GlassEvent → EventBinding → GeometryResolver → Controller   │
//! │                                                     ↓        │
//! │  FrameScheduler → SmoothedPositionTracker → RenderCommand    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine reads an [`ElementTree`] (bounding boxes, roles, parent links)
//! and never mutates it while positioning. All state is owned by a mounted
//! [`GlassSurface`]; there are no globals.
//!
//! ## Example
//!
//! ```
//! use glass_ui::{ElementRole, ElementState, ElementTree, GlassConfig, Rect};
//! use glass_ui::{ControlMode, FrameScheduler, GlassEvent, GlassSurface};
//!
//! let mut tree = ElementTree::new();
//! let id = tree.next_id();
//! let card = tree.add_root(ElementState::new(id, Rect::new(0.0, 0.0, 300.0, 100.0)));
//! let id = tree.next_id();
//! let button = tree.add_child(
//!     card,
//!     ElementState::new(id, Rect::new(100.0, 50.0, 40.0, 20.0)).with_role(ElementRole::Button),
//! );
//!
//! let mut scheduler = FrameScheduler::new();
//! let mut surface = GlassSurface::new(card, GlassConfig::default())
//!     .with_magnifier(&tree, ControlMode::SelfManaged);
//! surface.mount(&mut tree, &mut scheduler, 1280.0).unwrap();
//!
//! surface.handle_event(&tree, &GlassEvent::PointerOver { target: button });
//! let state = surface.overlay().unwrap().state();
//! assert!(state.visible);
//! assert_eq!((state.rect.left, state.rect.top), (120.0, 60.0));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod binding;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod highlight;
pub mod layout;
pub mod overlay;
pub mod render;
pub mod scheduler;
pub mod style;
pub mod surface;
pub mod target;
pub mod tracker;
pub mod tree;
pub mod widget;

pub use binding::{BindingState, EventBinding};
pub use config::{GeometryConfig, GlassConfig, LookConfig, MagnifierConfig, TrackerConfig, TypewriterConfig};
pub use error::{GlassError, GlassResult};
pub use event::{GlassEvent, Touch};
pub use geometry::{resolve_rect, GeometryResolver, OverlayRect, SPEC_ITEM_MAGNIFIED_PADDING, SPEC_ITEM_PADDING};
pub use highlight::{AmbientHighlight, GlobalPointer};
pub use layout::{Direction, Rect, Stack};
pub use overlay::{ControlMode, HighlightOverlayController, OverlayPatch, OverlayState, SharedOverlay};
pub use render::{GlassRenderer, RenderCommand};
pub use scheduler::{CancellationToken, FrameScheduler, TaskGuard, TaskId};
pub use style::{Color, GlassTint};
pub use surface::GlassSurface;
pub use target::{resolve_at_point, resolve_target, InteractiveTarget, ResolvedTarget};
pub use tracker::{SmoothedPositionTracker, TrackedPosition};
pub use tree::{ElementFlags, ElementId, ElementRole, ElementState, ElementTree};
pub use widget::{MagnifiedButton, SpecTable, TabStrip, Typewriter};
