//! Scroll tree arena
//!
//! Scrollables live in a slot map and refer to each other by id. Parent and
//! child links, and bindings to shared scrollbar proxies, are plain ids, so a
//! removed node simply stops resolving.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::pattern::ScrollablePattern;
use crate::scrollable::Scrollable;
use crate::scrollbar::ScrollBarProxy;

new_key_type! {
    pub struct ScrollableId;
    pub struct ScrollBarProxyId;
}

#[derive(Debug)]
pub(crate) struct ScrollNode<S> {
    pub(crate) scrollable: S,
    pub(crate) parent: Option<ScrollableId>,
    pub(crate) children: SmallVec<[ScrollableId; 4]>,
    pub(crate) proxy: Option<ScrollBarProxyId>,
}

impl<S> ScrollNode<S> {
    fn new(scrollable: S) -> Self {
        Self {
            scrollable,
            parent: None,
            children: SmallVec::new(),
            proxy: None,
        }
    }
}

/// Arena of scrollables and the scrollbar proxies shared between them
#[derive(Debug)]
pub struct ScrollTree<S = ScrollablePattern> {
    pub(crate) nodes: SlotMap<ScrollableId, ScrollNode<S>>,
    pub(crate) proxies: SlotMap<ScrollBarProxyId, ScrollBarProxy>,
}

impl<S> ScrollTree<S> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            proxies: SlotMap::with_key(),
        }
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// Add a root scrollable
    pub fn insert(&mut self, scrollable: S) -> ScrollableId {
        self.nodes.insert(ScrollNode::new(scrollable))
    }

    /// Add a scrollable nested inside `parent`. A stale parent id leaves the
    /// new node at the root.
    pub fn insert_child(&mut self, parent: ScrollableId, scrollable: S) -> ScrollableId {
        let id = self.insert(scrollable);
        self.set_parent(id, Some(parent));
        id
    }

    /// Remove a scrollable. Its children become roots.
    pub fn remove(&mut self, id: ScrollableId) -> Option<S> {
        let node = self.nodes.remove(id)?;
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        for child in &node.children {
            if let Some(child) = self.nodes.get_mut(*child) {
                child.parent = None;
            }
        }
        if let Some(proxy) = node.proxy.and_then(|p| self.proxies.get_mut(p)) {
            proxy.unregister(id);
        }
        tracing::debug!(?id, "scrollable removed");
        Some(node.scrollable)
    }

    /// Re-parent `child`. Rejects stale ids and links that would form a cycle.
    pub fn set_parent(&mut self, child: ScrollableId, parent: Option<ScrollableId>) -> bool {
        if !self.nodes.contains_key(child) {
            return false;
        }
        if let Some(parent) = parent {
            if !self.nodes.contains_key(parent) || self.is_ancestor_or_self(child, parent) {
                tracing::warn!(?child, ?parent, "rejected scroll parent link");
                return false;
            }
        }

        if let Some(old) = self.nodes[child].parent.take() {
            if let Some(old) = self.nodes.get_mut(old) {
                old.children.retain(|c| *c != child);
            }
        }
        if let Some(parent) = parent {
            self.nodes[parent].children.push(child);
        }
        self.nodes[child].parent = parent;
        true
    }

    /// Whether `ancestor` is `id` or lies on its parent chain
    fn is_ancestor_or_self(&self, ancestor: ScrollableId, id: ScrollableId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(current).and_then(|n| n.parent);
        }
        false
    }

    pub fn get(&self, id: ScrollableId) -> Option<&S> {
        self.nodes.get(id).map(|n| &n.scrollable)
    }

    pub fn get_mut(&mut self, id: ScrollableId) -> Option<&mut S> {
        self.nodes.get_mut(id).map(|n| &mut n.scrollable)
    }

    pub fn contains(&self, id: ScrollableId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn parent(&self, id: ScrollableId) -> Option<ScrollableId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ScrollableId) -> &[ScrollableId] {
        self.nodes.get(id).map_or(&[][..], |n| n.children.as_slice())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ScrollableId> + '_ {
        self.nodes.keys()
    }

    // =========================================================================
    // Scrollbar proxies
    // =========================================================================

    pub fn create_scroll_bar_proxy(&mut self) -> ScrollBarProxyId {
        self.proxies.insert(ScrollBarProxy::new())
    }

    /// Drop a proxy and unbind every scrollable attached to it
    pub fn remove_scroll_bar_proxy(&mut self, proxy: ScrollBarProxyId) -> Option<ScrollBarProxy> {
        let removed = self.proxies.remove(proxy)?;
        for id in removed.scrollables() {
            if let Some(node) = self.nodes.get_mut(*id) {
                node.proxy = None;
            }
        }
        Some(removed)
    }

    pub fn scroll_bar_proxy(&self, proxy: ScrollBarProxyId) -> Option<&ScrollBarProxy> {
        self.proxies.get(proxy)
    }

    pub fn scroll_bar_proxy_mut(&mut self, proxy: ScrollBarProxyId) -> Option<&mut ScrollBarProxy> {
        self.proxies.get_mut(proxy)
    }

    /// Attach a scrollable to a proxy, leaving any previous one
    pub fn bind_scroll_bar_proxy(&mut self, id: ScrollableId, proxy: ScrollBarProxyId) -> bool {
        if !self.nodes.contains_key(id) || !self.proxies.contains_key(proxy) {
            return false;
        }
        self.unbind_scroll_bar_proxy(id);
        self.proxies[proxy].register(id);
        self.nodes[id].proxy = Some(proxy);
        true
    }

    pub fn unbind_scroll_bar_proxy(&mut self, id: ScrollableId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if let Some(proxy) = node.proxy.take().and_then(|p| self.proxies.get_mut(p)) {
            proxy.unregister(id);
        }
    }

    pub fn proxy_of(&self, id: ScrollableId) -> Option<ScrollBarProxyId> {
        self.nodes.get(id).and_then(|n| n.proxy)
    }
}

impl<S: Scrollable> ScrollTree<S> {
    /// The ancestor that takes part in nested scrolling for `id`.
    ///
    /// Ancestors scrolling along another axis are skipped; the walk stops at
    /// an ancestor whose axis is `None`.
    pub fn nested_parent(&self, id: ScrollableId) -> Option<ScrollableId> {
        let axis = self.get(id)?.axis();
        let mut cursor = self.parent(id);
        while let Some(candidate) = cursor {
            let candidate_axis = self.get(candidate)?.axis();
            if candidate_axis.is_none() {
                return None;
            }
            if candidate_axis == axis {
                return Some(candidate);
            }
            cursor = self.parent(candidate);
        }
        None
    }

    /// Chain of nested ancestors, nearest first
    pub fn nested_ancestors(&self, id: ScrollableId) -> SmallVec<[ScrollableId; 4]> {
        let mut chain = SmallVec::new();
        let mut cursor = self.nested_parent(id);
        while let Some(ancestor) = cursor {
            chain.push(ancestor);
            cursor = self.nested_parent(ancestor);
        }
        chain
    }

    /// Propagate a gesture start up the nested ancestor chain
    pub fn on_scroll_start_recursive(&mut self, id: ScrollableId) {
        for ancestor in self.nested_ancestors(id) {
            if let Some(scrollable) = self.get_mut(ancestor) {
                scrollable.on_scroll_start_recursive();
            }
        }
    }

    /// Propagate a gesture end up the nested ancestor chain
    pub fn on_scroll_end_recursive(&mut self, id: ScrollableId, velocity: f32) {
        for ancestor in self.nested_ancestors(id) {
            if let Some(scrollable) = self.get_mut(ancestor) {
                scrollable.on_scroll_end_recursive(velocity);
            }
        }
    }
}

impl<S> Default for ScrollTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_child_links_both_ways() {
        let mut tree: ScrollTree<&str> = ScrollTree::new();
        let root = tree.insert("root");
        let child = tree.insert_child(root, "child");
        assert_eq!(tree.parent(child), Some(root));
        assert_eq!(tree.children(root), &[child]);
    }

    #[test]
    fn test_cycles_rejected() {
        let mut tree: ScrollTree<&str> = ScrollTree::new();
        let a = tree.insert("a");
        let b = tree.insert_child(a, "b");
        assert!(!tree.set_parent(a, Some(b)));
        assert!(!tree.set_parent(a, Some(a)));
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_remove_orphans_children() {
        let mut tree: ScrollTree<&str> = ScrollTree::new();
        let a = tree.insert("a");
        let b = tree.insert_child(a, "b");
        assert_eq!(tree.remove(a), Some("a"));
        assert_eq!(tree.parent(b), None);
        assert!(tree.get(a).is_none());
        assert!(tree.children(a).is_empty());
    }

    #[test]
    fn test_reparent_moves_child() {
        let mut tree: ScrollTree<&str> = ScrollTree::new();
        let a = tree.insert("a");
        let b = tree.insert("b");
        let c = tree.insert_child(a, "c");
        assert!(tree.set_parent(c, Some(b)));
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[c]);
        assert!(tree.set_parent(c, None));
        assert!(tree.children(b).is_empty());
    }

    #[test]
    fn test_proxy_binding() {
        let mut tree: ScrollTree<&str> = ScrollTree::new();
        let a = tree.insert("a");
        let b = tree.insert("b");
        let proxy = tree.create_scroll_bar_proxy();
        assert!(tree.bind_scroll_bar_proxy(a, proxy));
        assert!(tree.bind_scroll_bar_proxy(b, proxy));
        assert_eq!(tree.scroll_bar_proxy(proxy).unwrap().scrollables(), &[a, b]);

        tree.remove(a);
        assert_eq!(tree.scroll_bar_proxy(proxy).unwrap().scrollables(), &[b]);

        tree.remove_scroll_bar_proxy(proxy);
        assert_eq!(tree.proxy_of(b), None);
    }
}
