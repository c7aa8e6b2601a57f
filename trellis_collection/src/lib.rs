// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Collection: a live, ordered registry of descendant items.
//!
//! Compound components that navigate their children (menus, toolbars, radio
//! groups) need the parent to enumerate the items currently mounted beneath
//! it, in visual order, without walking the render tree itself. Items may be
//! wrapped in arbitrary intermediate structure, mounted through portals, or
//! inserted conditionally, so neither "direct children of the root" nor
//! "order of registration" is reliable.
//!
//! A [`Collection`] is owned by one compound-component instance. Descendant
//! items register their element handle and a data payload on mount and
//! remove it on unmount; the root part marks the traversal origin with
//! [`Collection::set_root`]. Queries do not trust any of that bookkeeping
//! for ordering: [`Collection::entries_in_order`] walks the host tree from
//! the root at read time, through the host's [`DocumentOrder`] impl, and
//! collects registered handles as the walk encounters them.
//!
//! - Document order is authoritative over registration order. Keyboard and
//!   typeahead navigation must match what the user sees, even when items
//!   registered out of visual order.
//! - A registered handle the walk never reaches (already removed from the
//!   tree, or sitting in portal content that has not mounted yet) is simply
//!   absent from the result until a later query finds it.
//!
//! ## Example
//!
//! ```rust
//! use trellis_collection::{Collection, DocumentOrder};
//! # use hashbrown::HashMap;
//! # struct Tree {
//! #     children: HashMap<u32, Vec<u32>>,
//! # }
//! # impl DocumentOrder<u32> for Tree {
//! #     fn is_attached(&self, _node: u32) -> bool {
//! #         true
//! #     }
//! #     fn visit_in_order<F: FnMut(u32)>(&self, root: u32, mut f: F) {
//! #         fn walk(tree: &Tree, node: u32, f: &mut impl FnMut(u32)) {
//! #             f(node);
//! #             for &child in tree.children.get(&node).into_iter().flatten() {
//! #                 walk(tree, child, f);
//! #             }
//! #         }
//! #         walk(self, root, &mut f);
//! #     }
//! # }
//! # let mut children = HashMap::new();
//! # children.insert(0_u32, vec![1, 2]);
//! # let tree = Tree { children };
//! // Host tree: node 0 with children [1, 2], via some `DocumentOrder` impl.
//! let mut items: Collection<u32, &str> = Collection::new();
//! items.set_root(0);
//!
//! // Registration order does not matter.
//! items.insert(2, "second");
//! items.insert(1, "first");
//!
//! let labels: Vec<&str> = items
//!     .entries_in_order(&tree)
//!     .into_iter()
//!     .map(|(_, data)| *data)
//!     .collect();
//! assert_eq!(labels, vec!["first", "second"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// Document-order view of the host rendering tree.
///
/// The host decides what "document order" means; the contract is that the
/// walk reflects visual/structural order at the time of the call, and that
/// [`is_attached`](Self::is_attached) reports whether a node is currently
/// part of the live document (detached subtrees awaiting a deferred mount
/// are not).
pub trait DocumentOrder<K> {
    /// Whether `node` is currently attached to the live document.
    fn is_attached(&self, node: K) -> bool;

    /// Visit the subtree rooted at `root` in document order: each node
    /// before its children, children in structural order.
    fn visit_in_order<F: FnMut(K)>(&self, root: K, f: F);
}

/// Registry of mounted descendant items for one compound-component instance.
///
/// `K` is the host's element handle (small and copyable, for example an
/// element id); `D` is the family-defined payload carried by each item, such
/// as a disabled flag or typeahead text.
#[derive(Clone, Debug)]
pub struct Collection<K, D> {
    root: Option<K>,
    items: HashMap<K, D>,
}

impl<K, D> Default for Collection<K, D> {
    fn default() -> Self {
        Self {
            root: None,
            items: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash, D> Collection<K, D> {
    /// Create an empty collection with no root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `node` as the traversal origin.
    ///
    /// Called when the root part mounts. Until a root is set, queries
    /// return nothing.
    pub fn set_root(&mut self, node: K) {
        self.root = Some(node);
    }

    /// Clear the traversal origin, when the root part unmounts.
    pub fn clear_root(&mut self) {
        self.root = None;
    }

    /// The current traversal origin, if any.
    pub fn root(&self) -> Option<K> {
        self.root
    }

    /// Register an item on mount, or refresh its data between renders.
    ///
    /// Returns the data previously registered under `handle`, if any.
    /// The item need not be a structural child of the root; it only has to
    /// live somewhere in the root's subtree at query time.
    pub fn insert(&mut self, handle: K, data: D) -> Option<D> {
        self.items.insert(handle, data)
    }

    /// Remove an item's registration on unmount.
    pub fn remove(&mut self, handle: K) -> Option<D> {
        self.items.remove(&handle)
    }

    /// The data registered under `handle`, ignoring order and attachment.
    pub fn get(&self, handle: K) -> Option<&D> {
        self.items.get(&handle)
    }

    /// Number of registered items, attached or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no item is registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Visit registered items in document order.
    ///
    /// Walks the host subtree under the root and calls `f` for every visited
    /// node with a registration, skipping nodes the host reports as
    /// detached. Without a root this visits nothing.
    pub fn visit_in_order<'a, O, F>(&'a self, order: &O, mut f: F)
    where
        O: DocumentOrder<K>,
        F: FnMut(K, &'a D),
    {
        let Some(root) = self.root else {
            return;
        };
        order.visit_in_order(root, |node| {
            if let Some(data) = self.items.get(&node)
                && order.is_attached(node)
            {
                f(node, data);
            }
        });
    }

    /// Registered items in document order, as `(handle, data)` pairs.
    ///
    /// Collects [`visit_in_order`](Self::visit_in_order). The order is
    /// derived from the host tree at call time; it owes nothing to the
    /// order in which items registered.
    pub fn entries_in_order<'a, O: DocumentOrder<K>>(&'a self, order: &O) -> Vec<(K, &'a D)> {
        let mut out = Vec::new();
        self.visit_in_order(order, |handle, data| out.push((handle, data)));
        out
    }
}
