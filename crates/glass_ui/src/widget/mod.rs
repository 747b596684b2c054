//! Components built on the overlay engine.
//!
//! Each widget either writes to a magnifier it does not own (an
//! external-mode [`crate::HighlightOverlayController`] over the surrounding
//! glass surface) or animates on the shared scheduler.

mod button;
mod spec_table;
mod tab_strip;
mod typewriter;

pub use button::MagnifiedButton;
pub use spec_table::SpecTable;
pub use tab_strip::{TabStrip, ANCHOR_DELAY_MS};
pub use typewriter::Typewriter;
