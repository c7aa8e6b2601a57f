// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, mutation, traversal, portals.

use alloc::vec::Vec;

use trellis_collection::DocumentOrder;
use trellis_scope::ParentLookup;

/// Identifier for an element in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    generation: u32,
    parent: Option<ElementId>,
    /// Context ancestry override for portal-mounted content: the element the
    /// portal was declared at, which is not its structural parent.
    context_parent: Option<ElementId>,
    children: Vec<ElementId>,
    payload: T,
}

impl<T> Node<T> {
    fn new(generation: u32, payload: T) -> Self {
        Self {
            generation,
            parent: None,
            context_parent: None,
            children: Vec::new(),
            payload,
        }
    }
}

#[derive(Clone, Debug)]
struct PendingMount {
    id: ElementId,
    target: Option<ElementId>,
}

/// An ordered element tree: the structural index compound components derive
/// document order and context ancestry from.
///
/// Identifiers are generational: a freed slot's id stays dead forever, and
/// every accessor rejects stale ids. Elements created by [`insert`] with no
/// parent are document roots; everything reachable from a root is *attached*.
/// Elements created by [`defer_mount`] stay detached until [`commit`] links
/// them under their portal target, so collection queries and anything else
/// gated on [`is_attached`] ignore portal content until its mount is
/// confirmed.
///
/// [`insert`]: ElementTree::insert
/// [`defer_mount`]: ElementTree::defer_mount
/// [`commit`]: ElementTree::commit
/// [`is_attached`]: ElementTree::is_attached
///
/// ## Example
///
/// ```rust
/// use trellis_element_tree::ElementTree;
///
/// let mut tree: ElementTree<&str> = ElementTree::new();
/// let body = tree.insert(None, "body");
/// let list = tree.insert(Some(body), "list");
/// let item = tree.insert(Some(list), "item");
///
/// // Portal content is declared at `item` but will mount under `body`.
/// let content = tree.defer_mount(item, Some(body), "content");
/// assert!(!tree.is_attached(content));
///
/// assert_eq!(tree.commit(), vec![content]);
/// assert!(tree.is_attached(content));
/// assert_eq!(tree.parent_of(content), Some(body));
/// ```
pub struct ElementTree<T> {
    /// slots
    nodes: Vec<Option<Node<T>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    /// Document roots, in order; `roots[0]` is the default portal target.
    roots: Vec<ElementId>,
    pending: Vec<PendingMount>,
}

impl<T> core::fmt::Debug for ElementTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("ElementTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl<T> Default for ElementTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ElementTree<T> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Insert a new element as the last child of `parent`, or as a document
    /// root if `parent` is `None`.
    pub fn insert(&mut self, parent: Option<ElementId>, payload: T) -> ElementId {
        let id = self.alloc(payload);
        match parent {
            Some(p) => self.link_parent(id, p),
            None => self.roots.push(id),
        }
        id
    }

    /// Insert a new element immediately before `sibling` under the same
    /// parent.
    ///
    /// Returns `None` without allocating if `sibling` is stale. Inserting
    /// before a document root creates another document root before it;
    /// inserting before a detached element creates another detached element.
    pub fn insert_before(&mut self, sibling: ElementId, payload: T) -> Option<ElementId> {
        if !self.is_alive(sibling) {
            return None;
        }
        let parent = self.node(sibling).parent;
        let id = self.alloc(payload);
        match parent {
            Some(p) => {
                let pos = self
                    .node(p)
                    .children
                    .iter()
                    .position(|&c| c == sibling)
                    .expect("sibling missing from its parent's child list");
                self.node_mut(p).children.insert(pos, id);
                self.node_mut(id).parent = Some(p);
            }
            None => {
                if let Some(pos) = self.roots.iter().position(|&r| r == sibling) {
                    self.roots.insert(pos, id);
                }
            }
        }
        Some(id)
    }

    /// Allocate a detached element to be mounted under `target` on the next
    /// [`commit`](Self::commit).
    ///
    /// `host` is the element the portal is declared at: it becomes the new
    /// element's context ancestry, so scope channels provided above the host
    /// remain readable from the portaled content even though the content's
    /// structural parent ends up elsewhere. A `target` of `None` mounts under
    /// the tree's first document root.
    ///
    /// Until the mount is applied the element (and any subtree built beneath
    /// it) is alive but unattached.
    pub fn defer_mount(
        &mut self,
        host: ElementId,
        target: Option<ElementId>,
        payload: T,
    ) -> ElementId {
        let id = self.alloc(payload);
        self.node_mut(id).context_parent = Some(host);
        self.pending.push(PendingMount { id, target });
        id
    }

    /// Apply pending portal mounts, returning the ids that mounted.
    ///
    /// Each pending element is linked as the last child of its target once
    /// the target is attached. Mounts are retried within the call until no
    /// more progress is made, so portals nested inside other portals' content
    /// settle in one commit regardless of declaration order. An element whose
    /// target is alive but still detached stays queued for a later commit;
    /// one whose target died is dropped from the queue and left detached (it
    /// can be placed manually with [`reparent`](Self::reparent), or removed).
    pub fn commit(&mut self) -> Vec<ElementId> {
        let mut queue = core::mem::take(&mut self.pending);
        let mut mounted = Vec::new();
        loop {
            let mut progressed = false;
            let mut still_pending = Vec::new();
            for entry in queue {
                if !self.is_alive(entry.id) {
                    continue;
                }
                let target = match entry.target {
                    Some(t) if self.is_alive(t) => Some(t),
                    Some(_) => None,
                    None => self.roots.first().copied(),
                };
                match target {
                    Some(t) if self.is_attached(t) => {
                        self.link_parent(entry.id, t);
                        mounted.push(entry.id);
                        progressed = true;
                    }
                    // Alive but still detached: try again.
                    Some(_) => still_pending.push(entry),
                    // Unspecified target with no document root yet: wait.
                    None if entry.target.is_none() => still_pending.push(entry),
                    // Dead target: dropped from the queue, stays detached.
                    None => {}
                }
            }
            queue = still_pending;
            if !progressed || queue.is_empty() {
                break;
            }
        }
        self.pending = queue;
        mounted
    }

    /// Remove an element and its structural subtree.
    ///
    /// The ids become stale immediately and the slots are reused by later
    /// insertions. Content this element portaled elsewhere is not part of its
    /// structural subtree and is not removed; whoever declared the portal
    /// removes its content.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|&r| r != id),
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` (with its subtree) under `new_parent`, as its last child.
    ///
    /// A `new_parent` of `None` detaches the subtree: it stays alive but is
    /// no longer part of the document, which is how a host models pulling an
    /// element out before re-inserting it elsewhere. Moving an element into
    /// its own subtree is refused.
    pub fn reparent(&mut self, id: ElementId, new_parent: Option<ElementId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent {
            let cycle = p == id || self.has_ancestor(p, id);
            debug_assert!(!cycle, "reparent target is inside the moved subtree");
            if cycle {
                return;
            }
        }
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|&r| r != id),
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// An `ElementId` is live if its slot is occupied and its generation
    /// matches the slot's current generation.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Returns true if `id` is live and part of the document: its topmost
    /// structural ancestor is a document root.
    ///
    /// Deferred portal content and detached fragments are alive but not
    /// attached.
    pub fn is_attached(&self, id: ElementId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut cur = id;
        while let Some(parent) = self.node(cur).parent {
            cur = parent;
        }
        self.roots.contains(&cur)
    }

    /// The structural parent of a live element, or `None` for roots,
    /// detached elements, and stale ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.node_opt(id)?.parent
    }

    /// The context ancestry of a live element: its portal host if it was
    /// created by [`defer_mount`](Self::defer_mount), its structural parent
    /// otherwise. A dead host ends the chain.
    pub fn context_parent_of(&self, id: ElementId) -> Option<ElementId> {
        let node = self.node_opt(id)?;
        match node.context_parent {
            Some(host) => self.is_alive(host).then_some(host),
            None => node.parent,
        }
    }

    /// The children of an element, in order, or an empty slice for stale ids.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        match self.node_opt(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// The document roots, in order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// The payload of a live element.
    pub fn payload(&self, id: ElementId) -> Option<&T> {
        self.node_opt(id).map(|n| &n.payload)
    }

    /// Mutable access to the payload of a live element.
    pub fn payload_mut(&mut self, id: ElementId) -> Option<&mut T> {
        self.node_opt_mut(id).map(|n| &mut n.payload)
    }

    /// Visit the structural subtree of `root` in document order: each element
    /// before its children, children in insertion order.
    ///
    /// Stale roots visit nothing.
    pub fn visit_subtree<F: FnMut(ElementId)>(&self, root: ElementId, mut f: F) {
        if !self.is_alive(root) {
            return;
        }
        self.visit_inner(root, &mut f);
    }

    fn visit_inner(&self, id: ElementId, f: &mut impl FnMut(ElementId)) {
        f(id);
        for &child in &self.node(id).children {
            self.visit_inner(child, f);
        }
    }

    // --- internals ---

    fn alloc(&mut self, payload: T) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, payload));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, payload)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        ElementId::new(idx, generation)
    }

    /// Whether `ancestor` appears on the structural parent chain of `node`.
    fn has_ancestor(&self, node: ElementId, ancestor: ElementId) -> bool {
        let mut cur = self.node(node).parent;
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.node(p).parent;
        }
        false
    }

    fn node(&self, id: ElementId) -> &Node<T> {
        self.nodes[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node<T> {
        self.nodes[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn node_opt(&self, id: ElementId) -> Option<&Node<T>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node<T>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

/// Context ancestry for scope resolution. Portal-mounted content resolves
/// through the element its portal was declared at, not its structural parent,
/// so providers above a portal host reach the portaled content.
impl<T> ParentLookup<ElementId> for ElementTree<T> {
    fn parent_of(&self, node: ElementId) -> Option<ElementId> {
        self.context_parent_of(node)
    }
}

/// Document order for collection queries: structural, insertion-ordered,
/// attachment-gated.
impl<T> DocumentOrder<ElementId> for ElementTree<T> {
    fn is_attached(&self, node: ElementId) -> bool {
        Self::is_attached(self, node)
    }

    fn visit_in_order<F: FnMut(ElementId)>(&self, root: ElementId, f: F) {
        self.visit_subtree(root, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use trellis_collection::Collection;
    use trellis_scope::{ContextMap, ScopeRegistry};

    fn order_of(tree: &ElementTree<&'static str>, root: ElementId) -> Vec<&'static str> {
        let mut out = Vec::new();
        tree.visit_subtree(root, |id| {
            out.push(*tree.payload(id).expect("visited element is live"));
        });
        out
    }

    #[test]
    fn visits_in_document_order() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let root = tree.insert(None, "root");
        let a = tree.insert(Some(root), "a");
        tree.insert(Some(a), "a1");
        tree.insert(Some(a), "a2");
        tree.insert(Some(root), "b");

        assert_eq!(order_of(&tree, root), vec!["root", "a", "a1", "a2", "b"]);
    }

    #[test]
    fn insert_before_places_the_element_in_order() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let root = tree.insert(None, "root");
        tree.insert(Some(root), "x");
        let z = tree.insert(Some(root), "z");

        let y = tree.insert_before(z, "y").expect("z is live");
        assert_eq!(tree.parent_of(y), Some(root));
        assert_eq!(order_of(&tree, root), vec!["root", "x", "y", "z"]);
    }

    #[test]
    fn insert_before_a_document_root_creates_an_earlier_root() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let first = tree.insert(None, "first");
        let earlier = tree.insert_before(first, "earlier").expect("first is live");

        assert_eq!(tree.roots(), &[earlier, first]);
        assert!(tree.is_attached(earlier));
    }

    #[test]
    fn stale_ids_are_rejected_after_slot_reuse() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let root = tree.insert(None, "root");
        let a = tree.insert(Some(root), "a");
        tree.remove(a);

        assert!(!tree.is_alive(a));
        assert!(tree.payload(a).is_none());
        assert!(tree.children_of(a).is_empty());
        assert!(tree.insert_before(a, "b").is_none());

        // The freed slot is reused under a new generation; the old id stays
        // dead.
        let b = tree.insert(Some(root), "b");
        assert_eq!(b.0, a.0);
        assert_ne!(b.1, a.1);
        assert!(!tree.is_alive(a));
        assert!(tree.is_alive(b));
    }

    #[test]
    fn remove_takes_the_whole_subtree() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let root = tree.insert(None, "root");
        let a = tree.insert(Some(root), "a");
        let a1 = tree.insert(Some(a), "a1");
        let b = tree.insert(Some(root), "b");

        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(a1));
        assert_eq!(tree.children_of(root), &[b]);
        assert_eq!(order_of(&tree, root), vec!["root", "b"]);
    }

    #[test]
    fn reparent_moves_the_subtree() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let root = tree.insert(None, "root");
        let a = tree.insert(Some(root), "a");
        let a1 = tree.insert(Some(a), "a1");
        let b = tree.insert(Some(root), "b");

        tree.reparent(a, Some(b));
        assert_eq!(tree.parent_of(a), Some(b));
        assert_eq!(order_of(&tree, root), vec!["root", "b", "a", "a1"]);

        // Detaching keeps the subtree alive but out of the document.
        tree.reparent(a, None);
        assert!(tree.is_alive(a1));
        assert!(!tree.is_attached(a1));
        assert_eq!(order_of(&tree, root), vec!["root", "b"]);
    }

    #[test]
    #[should_panic(expected = "reparent target is inside the moved subtree")]
    fn reparent_into_own_subtree_is_refused() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let root = tree.insert(None, "root");
        let a = tree.insert(Some(root), "a");
        let a1 = tree.insert(Some(a), "a1");

        tree.reparent(a, Some(a1));
    }

    #[test]
    fn deferred_content_is_detached_until_commit() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let body = tree.insert(None, "body");
        let trigger = tree.insert(Some(body), "trigger");

        let content = tree.defer_mount(trigger, Some(body), "content");
        let item = tree.insert(Some(content), "item");
        assert!(tree.is_alive(content));
        assert!(!tree.is_attached(content));
        assert!(!tree.is_attached(item));
        assert_eq!(order_of(&tree, body), vec!["body", "trigger"]);

        assert_eq!(tree.commit(), vec![content]);
        assert!(tree.is_attached(item));
        assert_eq!(tree.parent_of(content), Some(body));
        assert_eq!(order_of(&tree, body), vec!["body", "trigger", "content", "item"]);

        // A second commit has nothing left to do.
        assert!(tree.commit().is_empty());
    }

    #[test]
    fn unspecified_target_mounts_under_the_first_root() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let body = tree.insert(None, "body");
        let host = tree.insert(Some(body), "host");

        let content = tree.defer_mount(host, None, "content");
        tree.commit();
        assert_eq!(tree.parent_of(content), Some(body));
    }

    #[test]
    fn nested_portals_settle_in_one_commit() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let body = tree.insert(None, "body");
        let host = tree.insert(Some(body), "host");

        // The inner portal is queued before the outer one, and its target
        // ends up inside the outer portal's content, so a single pass over
        // the queue would leave it pending.
        let slot = tree.insert(Some(body), "slot");
        let inner = tree.defer_mount(host, Some(slot), "inner");
        let outer = tree.defer_mount(host, Some(body), "outer");
        tree.reparent(slot, Some(outer));

        let mounted = tree.commit();
        assert_eq!(mounted, vec![outer, inner]);
        assert!(tree.is_attached(inner));
        assert_eq!(tree.parent_of(inner), Some(slot));
    }

    #[test]
    fn dead_target_leaves_the_content_detached() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let body = tree.insert(None, "body");
        let target = tree.insert(Some(body), "target");
        let host = tree.insert(Some(body), "host");

        let content = tree.defer_mount(host, Some(target), "content");
        tree.remove(target);

        assert!(tree.commit().is_empty());
        assert!(tree.is_alive(content));
        assert!(!tree.is_attached(content));

        // Manual placement is the recovery path.
        tree.reparent(content, Some(body));
        assert!(tree.is_attached(content));
    }

    #[test]
    fn collection_sees_portal_content_only_after_commit() {
        let mut tree: ElementTree<&str> = ElementTree::new();
        let body = tree.insert(None, "body");
        let host = tree.insert(Some(body), "host");

        // Menu-in-a-portal arrangement: the collection is rooted at the
        // portaled content element, items mount beneath it.
        let content = tree.defer_mount(host, Some(body), "content");
        let red = tree.insert(Some(content), "red");
        let blue = tree.insert(Some(content), "blue");

        let mut items: Collection<ElementId, &str> = Collection::new();
        items.set_root(content);
        items.insert(blue, "Blue");
        items.insert(red, "Red");

        assert!(items.entries_in_order(&tree).is_empty());

        tree.commit();
        let labels: Vec<&str> = items
            .entries_in_order(&tree)
            .into_iter()
            .map(|(_, data)| *data)
            .collect();
        assert_eq!(labels, vec!["Red", "Blue"]);
    }

    #[test]
    fn scope_resolution_crosses_portals() {
        let mut reg = ScopeRegistry::new();
        let family = reg.register_family("Dialog", &[]);
        let channel = reg.channel::<&'static str>(family, "Dialog");
        let scope = reg.create_scope(family);

        let mut tree: ElementTree<&str> = ElementTree::new();
        let body = tree.insert(None, "body");
        let dialog_root = tree.insert(Some(body), "dialog-root");

        let mut map: ContextMap<ElementId> = ContextMap::new();
        map.provide(dialog_root, &channel, Some(&scope), "open");

        // Content mounts under body, structurally outside the provider.
        let content = tree.defer_mount(dialog_root, Some(body), "content");
        let title = tree.insert(Some(content), "title");
        tree.commit();
        assert_eq!(tree.parent_of(content), Some(body));

        // Context ancestry still runs through the declaring element.
        assert_eq!(
            *map.read("DialogTitle", title, &channel, Some(&scope), &tree),
            "open"
        );
    }
}
