use std::collections::HashMap;

use crate::element::{Element, ElementId};

/// The element model: a handle → element map plus the insertion order the
/// code generator walks.
///
/// The order is part of the public shape of the document, so it is kept in
/// its own list instead of relying on the map's iteration order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: HashMap<ElementId, Element>,
    order: Vec<ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. Re-inserting an existing handle replaces the element
    /// in place and keeps its original position.
    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = element.id;
        if self.elements.insert(id, element).is_none() {
            self.order.push(id);
        }
        id
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.elements.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(removed)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Handles in insertion order.
    pub fn order(&self) -> &[ElementId] {
        &self.order
    }

    /// Elements in insertion order (bottom-most first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> + '_ {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut doc = Document::new();
        let a = doc.insert(factory::create_rect(0, 0, 10, 10));
        let b = doc.insert(factory::create_text(1, 1, "b"));
        let c = doc.insert(factory::create_circle_centered(20, 20, 5));

        let ids: Vec<_> = doc.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, b, c]);

        doc.remove(b);
        let ids: Vec<_> = doc.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert_eq!(doc.order(), &[a, c]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut doc = Document::new();
        let first = factory::create_rect(0, 0, 10, 10);
        let a = doc.insert(first.clone());
        let b = doc.insert(factory::create_rect(5, 5, 10, 10));

        let mut moved = first;
        moved.x = 40;
        doc.insert(moved);

        assert_eq!(doc.order(), &[a, b]);
        assert_eq!(doc.get(a).map(|e| e.x), Some(40));
    }
}
