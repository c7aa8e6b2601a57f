// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context bundles published at tree nodes, resolved by ancestor walk.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::registry::{Channel, ScopeHandle, ScopeId};

/// Parent links of the host rendering tree.
///
/// The context map never owns or walks a tree itself; resolution asks the
/// host for parent links one step at a time. Links must be acyclic.
pub trait ParentLookup<K> {
    /// Parent of `node`, or `None` at a root.
    fn parent_of(&self, node: K) -> Option<K>;
}

/// A lookup with no parents; every node is a root.
///
/// Useful when all providers and consumers share a single node, or in tests.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParents;

impl<K> ParentLookup<K> for NoParents {
    fn parent_of(&self, _node: K) -> Option<K> {
        None
    }
}

/// Parent links stored as a plain child-to-parent map.
impl<K: Copy + Eq + Hash> ParentLookup<K> for HashMap<K, K> {
    fn parent_of(&self, node: K) -> Option<K> {
        self.get(&node).copied()
    }
}

/// Context bundles for one host tree.
///
/// Providers publish a bundle at their node on a typed [`Channel`], under the
/// token their [`ScopeHandle`] carries for the channel's family. Consumers
/// resolve the nearest bundle by walking parent links from their own node,
/// matching the channel and token exactly.
///
/// Passing no handle selects the shared default token. Every instance of the
/// family then publishes and resolves against the same channel, so the
/// nearest provider wins regardless of which instance it belongs to. This is
/// the documented single-instance-per-subtree constraint, not a defect;
/// instances that must coexist are given handles.
pub struct ContextMap<K> {
    entries: HashMap<(K, u32, Option<ScopeId>), Box<dyn Any>>,
}

impl<K> fmt::Debug for ContextMap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMap")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<K> Default for ContextMap<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> ContextMap<K> {
    /// Create an empty context map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of published bundles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no bundle is published.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Publish `value` at `node` on `channel`.
    ///
    /// The bundle is visible to `node` and its descendants until retracted.
    /// Publishing again at the same node replaces the bundle in place and
    /// returns the previous value, which is how providers refresh state
    /// between renders.
    pub fn provide<T: 'static>(
        &mut self,
        node: K,
        channel: &Channel<T>,
        scope: Option<&ScopeHandle>,
        value: T,
    ) -> Option<T> {
        let token = resolve_token(channel, scope);
        self.entries
            .insert((node, channel.id, token), Box::new(value))
            .map(downcast_owned::<T>)
    }

    /// Remove the bundle published at `node` on `channel`, returning it.
    ///
    /// Called when the providing part unmounts. Removal is synchronous;
    /// consumers resolving afterwards see the next provider up, if any.
    pub fn retract<T: 'static>(
        &mut self,
        node: K,
        channel: &Channel<T>,
        scope: Option<&ScopeHandle>,
    ) -> Option<T> {
        let token = resolve_token(channel, scope);
        self.entries
            .remove(&(node, channel.id, token))
            .map(downcast_owned::<T>)
    }

    /// The bundle published exactly at `node`, without walking ancestors.
    pub fn provided_at<T: 'static>(
        &self,
        node: K,
        channel: &Channel<T>,
        scope: Option<&ScopeHandle>,
    ) -> Option<&T> {
        let token = resolve_token(channel, scope);
        self.entries
            .get(&(node, channel.id, token))
            .map(|v| downcast_ref::<T>(v.as_ref()))
    }

    /// Resolve the nearest bundle for `channel`, starting at `from` and
    /// walking parent links, or `None` when no matching provider encloses it.
    pub fn try_read<T: 'static>(
        &self,
        from: K,
        channel: &Channel<T>,
        scope: Option<&ScopeHandle>,
        parents: &impl ParentLookup<K>,
    ) -> Option<&T> {
        let token = resolve_token(channel, scope);
        let mut cur = Some(from);
        while let Some(node) = cur {
            if let Some(value) = self.entries.get(&(node, channel.id, token)) {
                return Some(downcast_ref::<T>(value.as_ref()));
            }
            cur = parents.parent_of(node);
        }
        None
    }

    /// Resolve the nearest bundle for `channel`, starting at `from`.
    ///
    /// `consumer` names the part doing the read and appears in the panic
    /// message.
    ///
    /// # Panics
    ///
    /// Panics if no matching provider encloses `from`. Reading outside the
    /// required provider ancestry is incorrect composition; it is reported
    /// immediately rather than handled. Use [`Self::try_read`] where absence
    /// is an expected state.
    pub fn read<T: 'static>(
        &self,
        consumer: &'static str,
        from: K,
        channel: &Channel<T>,
        scope: Option<&ScopeHandle>,
        parents: &impl ParentLookup<K>,
    ) -> &T {
        match self.try_read(from, channel, scope, parents) {
            Some(value) => value,
            None => panic!(
                "`{consumer}` must be used within `{}`",
                channel.family_name
            ),
        }
    }
}

/// Token selection: the handle's token for the channel's family, or the
/// shared default when no handle (or no token for that family) is supplied.
fn resolve_token<T>(channel: &Channel<T>, scope: Option<&ScopeHandle>) -> Option<ScopeId> {
    scope.and_then(|s| s.token_for(channel.family))
}

fn downcast_owned<T: 'static>(value: Box<dyn Any>) -> T {
    *value
        .downcast::<T>()
        .expect("context bundle type mismatch (channel from another registry?)")
}

fn downcast_ref<T: 'static>(value: &dyn Any) -> &T {
    value
        .downcast_ref::<T>()
        .expect("context bundle type mismatch (channel from another registry?)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ScopeRegistry;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Bundle {
        open: bool,
        label: &'static str,
    }

    /// Tree used throughout:
    ///
    /// ```text
    /// 0
    /// ├── 1
    /// │   └── 3
    /// └── 2
    ///     └── 4
    /// ```
    fn parents() -> HashMap<u32, u32> {
        let mut p = HashMap::new();
        p.insert(1, 0);
        p.insert(2, 0);
        p.insert(3, 1);
        p.insert(4, 2);
        p
    }

    #[test]
    fn nearest_provider_wins() {
        let mut reg = ScopeRegistry::new();
        let family = reg.register_family("Accordion", &[]);
        let channel = reg.channel::<Bundle>(family, "Accordion");
        let parents = parents();

        let mut map = ContextMap::new();
        map.provide(
            0,
            &channel,
            None,
            Bundle {
                open: false,
                label: "outer",
            },
        );
        map.provide(
            1,
            &channel,
            None,
            Bundle {
                open: true,
                label: "inner",
            },
        );

        // Under node 1 the inner bundle shadows the outer one.
        assert_eq!(
            map.read("AccordionItem", 3, &channel, None, &parents).label,
            "inner"
        );
        // Under node 2 only the outer bundle is visible.
        assert_eq!(
            map.read("AccordionItem", 4, &channel, None, &parents).label,
            "outer"
        );
    }

    #[test]
    fn distinct_handles_isolate_sibling_instances() {
        let mut reg = ScopeRegistry::new();
        let family = reg.register_family("Tabs", &[]);
        let channel = reg.channel::<Bundle>(family, "Tabs");
        let parents = parents();

        let left = reg.create_scope(family);
        let right = reg.create_scope(family);

        let mut map = ContextMap::new();
        map.provide(
            1,
            &channel,
            Some(&left),
            Bundle {
                open: true,
                label: "left",
            },
        );
        map.provide(
            2,
            &channel,
            Some(&right),
            Bundle {
                open: false,
                label: "right",
            },
        );

        // Each consumer sees only the bundle published under its own handle.
        assert_eq!(
            map.read("TabsTrigger", 3, &channel, Some(&left), &parents)
                .label,
            "left"
        );
        assert_eq!(
            map.read("TabsTrigger", 4, &channel, Some(&right), &parents)
                .label,
            "right"
        );
        // Crossing handles finds nothing, even inside the other's subtree.
        assert!(map.try_read(3, &channel, Some(&right), &parents).is_none());
        assert!(map.try_read(4, &channel, Some(&left), &parents).is_none());
    }

    #[test]
    fn omitted_handles_share_the_default_channel() {
        let mut reg = ScopeRegistry::new();
        let family = reg.register_family("Tabs", &[]);
        let channel = reg.channel::<Bundle>(family, "Tabs");
        let parents = parents();

        let mut map = ContextMap::new();
        map.provide(
            0,
            &channel,
            None,
            Bundle {
                open: true,
                label: "shared",
            },
        );

        // Two sibling consumers without handles observe the same
        // nearest-ancestor bundle.
        let a = map.read("TabsTrigger", 3, &channel, None, &parents);
        let b = map.read("TabsTrigger", 4, &channel, None, &parents);
        assert_eq!(a, b);
        assert_eq!(a.label, "shared");
    }

    #[test]
    fn one_handle_parameterizes_composed_families() {
        let mut reg = ScopeRegistry::new();
        let dialog = reg.register_family("Dialog", &[]);
        let alert = reg.register_family("AlertDialog", &[dialog]);
        let dialog_channel = reg.channel::<&'static str>(dialog, "Dialog");
        let alert_channel = reg.channel::<&'static str>(alert, "AlertDialog");
        let parents = parents();

        let handle = reg.create_scope(alert);
        let mut map = ContextMap::new();
        map.provide(0, &dialog_channel, Some(&handle), "dialog state");
        map.provide(0, &alert_channel, Some(&handle), "cancel handle");

        assert_eq!(
            *map.read("DialogContent", 3, &dialog_channel, Some(&handle), &parents),
            "dialog state"
        );
        assert_eq!(
            *map.read("AlertDialogCancel", 3, &alert_channel, Some(&handle), &parents),
            "cancel handle"
        );
    }

    #[test]
    fn provide_replaces_in_place_and_retract_unshadows() {
        let mut reg = ScopeRegistry::new();
        let family = reg.register_family("Popover", &[]);
        let channel = reg.channel::<u32>(family, "Popover");
        let parents = parents();

        let mut map = ContextMap::new();
        map.provide(0, &channel, None, 1);
        map.provide(1, &channel, None, 2);

        let replaced = map.provide(1, &channel, None, 3);
        assert_eq!(replaced, Some(2));
        assert_eq!(*map.read("PopoverTrigger", 3, &channel, None, &parents), 3);

        let removed = map.retract(1, &channel, None);
        assert_eq!(removed, Some(3));
        // With the inner provider gone, the outer one is visible again.
        assert_eq!(*map.read("PopoverTrigger", 3, &channel, None, &parents), 1);
    }

    #[test]
    fn resolution_starts_at_the_consumer_node() {
        let mut reg = ScopeRegistry::new();
        let family = reg.register_family("Toggle", &[]);
        let channel = reg.channel::<u32>(family, "Toggle");

        let mut map = ContextMap::new();
        map.provide(5, &channel, None, 7);

        // A consumer on the providing node itself resolves the bundle even
        // with no parent links at all.
        assert_eq!(*map.read("ToggleIndicator", 5, &channel, None, &NoParents), 7);
    }

    #[test]
    #[should_panic(expected = "`MenuItem` must be used within `Menu`")]
    fn missing_provider_names_consumer_and_family() {
        let mut reg = ScopeRegistry::new();
        let family = reg.register_family("Menu", &[]);
        let channel = reg.channel::<Bundle>(family, "MenuContent");
        let parents = parents();

        let map: ContextMap<u32> = ContextMap::new();
        let _ = map.read("MenuItem", 3, &channel, None, &parents);
    }
}
