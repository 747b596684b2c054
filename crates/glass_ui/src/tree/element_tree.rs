//! Retained element hierarchy with the geometry queries the engine reads.

use super::{ElementId, ElementState};
use crate::layout::Rect;
use std::collections::HashMap;

/// Owns every element and its parent/child relationships.
pub struct ElementTree {
    /// Element states indexed by ID.
    elements: HashMap<ElementId, ElementState>,
    /// Root element IDs.
    roots: Vec<ElementId>,
    /// Parent-child relationships, in paint order.
    children: HashMap<ElementId, Vec<ElementId>>,
    /// ID counter for generating unique IDs.
    next_id: u64,
}

impl ElementTree {
    /// Creates a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: HashMap::with_capacity(64),
            roots: Vec::with_capacity(4),
            children: HashMap::with_capacity(64),
            next_id: 1,
        }
    }

    /// Generates a new unique element ID.
    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a root element.
    pub fn add_root(&mut self, state: ElementState) -> ElementId {
        let id = state.id;
        self.elements.insert(id, state);
        self.roots.push(id);
        self.children.insert(id, Vec::new());
        id
    }

    /// Adds a child element to a parent.
    pub fn add_child(&mut self, parent: ElementId, mut state: ElementState) -> ElementId {
        let id = state.id;
        state.parent = Some(parent);

        self.elements.insert(id, state);
        self.children.entry(parent).or_default().push(id);
        self.children.insert(id, Vec::new());
        id
    }

    /// Removes an element and all its descendants.
    ///
    /// Ids held elsewhere become detached: they resolve to degenerate geometry.
    pub fn remove(&mut self, id: ElementId) {
        if let Some(children) = self.children.remove(&id) {
            for child in children {
                self.remove(child);
            }
        }

        if let Some(parent) = self.elements.get(&id).and_then(|state| state.parent) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|&c| c != id);
            }
        }

        self.roots.retain(|&r| r != id);
        self.elements.remove(&id);
    }

    /// Gets an element by ID.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    /// Gets mutable access to an element.
    #[must_use]
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementState> {
        self.elements.get_mut(&id)
    }

    /// Returns true if the element is still part of the tree.
    #[must_use]
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Returns the element's bounding box, or [`Rect::ZERO`] once detached.
    #[must_use]
    pub fn bounding_rect(&self, id: ElementId) -> Rect {
        self.elements.get(&id).map_or(Rect::ZERO, |state| state.rect)
    }

    /// Moves an element to new bounds (used by relayout on resize).
    ///
    /// Returns false if the element is detached.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        match self.elements.get_mut(&id) {
            Some(state) => {
                state.rect = rect;
                true
            }
            None => false,
        }
    }

    /// Returns the parent of an element.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|state| state.parent)
    }

    /// Iterates from the element itself up to its root.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let start = self.is_attached(id).then_some(id);
        std::iter::successors(start, move |&current| self.parent(current))
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    #[must_use]
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    /// Returns the nearest inclusive ancestor that satisfies `predicate`.
    #[must_use]
    pub fn closest<F>(&self, id: ElementId, mut predicate: F) -> Option<ElementId>
    where
        F: FnMut(&ElementState) -> bool,
    {
        self.ancestors(id)
            .find(|ancestor| self.elements.get(ancestor).is_some_and(&mut predicate))
    }

    /// Returns the topmost hit-testable element under the point.
    ///
    /// Later siblings paint over earlier ones and children over parents, so
    /// the reverse depth-first order is the hit order.
    #[must_use]
    pub fn element_from_point(&self, x: f32, y: f32) -> Option<ElementId> {
        self.iter_reverse().find(|id| {
            self.elements
                .get(id)
                .is_some_and(|state| state.is_hit_testable() && state.rect.contains(x, y))
        })
    }

    /// Returns the children of an element.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns all root elements.
    #[must_use]
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Returns the number of attached elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the tree has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns all element IDs in depth-first order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = ElementId> + '_ {
        ElementDfsIterator {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Returns all element IDs in reverse depth-first order (hit order).
    pub fn iter_reverse(&self) -> impl Iterator<Item = ElementId> + '_ {
        let all: Vec<_> = self.iter_dfs().collect();
        all.into_iter().rev()
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first iterator over the element tree.
struct ElementDfsIterator<'a> {
    tree: &'a ElementTree,
    stack: Vec<ElementId>,
}

impl Iterator for ElementDfsIterator<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        if let Some(children) = self.tree.children.get(&id) {
            self.stack.extend(children.iter().rev().copied());
        }

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementRole;

    fn sample() -> (ElementTree, ElementId, ElementId, ElementId) {
        let mut tree = ElementTree::new();
        let root_id = tree.next_id();
        let root = tree.add_root(ElementState::new(root_id, Rect::new(0.0, 0.0, 300.0, 100.0)));
        let button_id = tree.next_id();
        let button = tree.add_child(
            root,
            ElementState::new(button_id, Rect::new(100.0, 50.0, 40.0, 20.0))
                .with_role(ElementRole::Button),
        );
        let label_id = tree.next_id();
        let label = tree.add_child(
            button,
            ElementState::new(label_id, Rect::new(105.0, 52.0, 30.0, 16.0)),
        );
        (tree, root, button, label)
    }

    #[test]
    fn test_tree_hierarchy() {
        let (tree, root, button, label) = sample();

        assert_eq!(tree.children(root), &[button]);
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.ancestors(label).collect::<Vec<_>>(), vec![label, button, root]);
        assert!(tree.contains(root, label));
        assert!(tree.contains(label, label));
        assert!(!tree.contains(label, root));
    }

    #[test]
    fn test_closest_walks_up() {
        let (tree, _, button, label) = sample();

        let found = tree.closest(label, |el| el.role == ElementRole::Button);
        assert_eq!(found, Some(button));
    }

    #[test]
    fn test_element_from_point_prefers_deepest() {
        let (tree, root, button, label) = sample();

        assert_eq!(tree.element_from_point(110.0, 55.0), Some(label));
        assert_eq!(tree.element_from_point(101.0, 69.0), Some(button));
        assert_eq!(tree.element_from_point(5.0, 5.0), Some(root));
        assert_eq!(tree.element_from_point(500.0, 5.0), None);
    }

    #[test]
    fn test_removed_element_is_detached() {
        let (mut tree, root, button, label) = sample();

        tree.remove(button);

        assert!(!tree.is_attached(button));
        assert!(!tree.is_attached(label));
        assert_eq!(tree.bounding_rect(label), Rect::ZERO);
        assert!(tree.children(root).is_empty());
        assert!(!tree.contains(root, label));
        assert_eq!(tree.len(), 1);
    }
}
