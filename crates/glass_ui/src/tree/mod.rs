//! Element tree standing in for the host document.
//!
//! The engine only ever reads bounding boxes, ancestry and point hits from
//! it, so any retained UI can feed the overlay by mirroring its layout here.

mod element;
mod element_tree;

pub use element::{ElementFlags, ElementId, ElementRole, ElementState};
pub use element_tree::ElementTree;
