// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Direction: the reading-direction channel.
//!
//! Direction-aware components (toolbars, menus, sliders) need to know
//! whether the surrounding content reads left-to-right or right-to-left.
//! An application sets this once near the root of its tree with
//! [`DirectionContext::provide`]; any part below resolves it with
//! [`DirectionContext::resolve`], which also honors a per-part local
//! override and falls back to [`Direction::Ltr`] when nothing is provided.
//!
//! Unlike the component families, direction is deliberately unscoped: every
//! consumer reads the same nearest provider, so the channel is always used
//! with the shared default token.
//!
//! ```rust
//! use trellis_direction::{Direction, DirectionContext};
//! use trellis_scope::{ContextMap, NoParents, ScopeRegistry};
//!
//! let mut registry = ScopeRegistry::new();
//! let dir = DirectionContext::register(&mut registry);
//!
//! let mut map: ContextMap<u32> = ContextMap::new();
//!
//! // Nothing provided: the default is left-to-right.
//! assert_eq!(dir.resolve(None, &map, 0, &NoParents), Direction::Ltr);
//!
//! dir.provide(&mut map, 0, Direction::Rtl);
//! assert_eq!(dir.resolve(None, &map, 0, &NoParents), Direction::Rtl);
//!
//! // A local override beats the provided value.
//! assert_eq!(
//!     dir.resolve(Some(Direction::Ltr), &map, 0, &NoParents),
//!     Direction::Ltr,
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use core::hash::Hash;

use trellis_scope::{Channel, ContextMap, ParentLookup, ScopeRegistry};

/// Reading direction of the surrounding content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl Direction {
    /// Whether this is right-to-left.
    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }
}

/// The registered direction channel.
#[derive(Copy, Clone, Debug)]
pub struct DirectionContext {
    channel: Channel<Direction>,
}

impl DirectionContext {
    /// Register the direction family and its channel.
    pub fn register(registry: &mut ScopeRegistry) -> Self {
        let family = registry.register_family("Direction", &[]);
        Self {
            channel: registry.channel::<Direction>(family, "DirectionProvider"),
        }
    }

    /// The underlying channel.
    pub fn channel(&self) -> &Channel<Direction> {
        &self.channel
    }

    /// Provide `direction` at `node` for the subtree below it.
    pub fn provide<K: Copy + Eq + Hash>(
        &self,
        map: &mut ContextMap<K>,
        node: K,
        direction: Direction,
    ) {
        map.provide(node, &self.channel, None, direction);
    }

    /// Withdraw the direction provided at `node`.
    pub fn retract<K: Copy + Eq + Hash>(&self, map: &mut ContextMap<K>, node: K) {
        map.retract(node, &self.channel, None);
    }

    /// Resolve the effective direction at `from`.
    ///
    /// Precedence: the part's `local` override, then the nearest provider
    /// above `from`, then [`Direction::Ltr`]. Absence of a provider is an
    /// ordinary state here, not misuse, which is why this resolves through
    /// [`ContextMap::try_read`].
    pub fn resolve<K: Copy + Eq + Hash>(
        &self,
        local: Option<Direction>,
        map: &ContextMap<K>,
        from: K,
        parents: &impl ParentLookup<K>,
    ) -> Direction {
        local
            .or_else(|| map.try_read(from, &self.channel, None, parents).copied())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_scope::NoParents;

    /// The chain 0 -> 1 -> 2 -> ..., parent of `n` is `n - 1`.
    struct Chain;

    impl ParentLookup<u32> for Chain {
        fn parent_of(&self, node: u32) -> Option<u32> {
            (node > 0).then(|| node - 1)
        }
    }

    #[test]
    fn resolves_local_then_context_then_default() {
        let mut registry = ScopeRegistry::new();
        let dir = DirectionContext::register(&mut registry);
        let mut map: ContextMap<u32> = ContextMap::new();

        assert_eq!(dir.resolve(None, &map, 5, &NoParents), Direction::Ltr);

        dir.provide(&mut map, 5, Direction::Rtl);
        assert_eq!(dir.resolve(None, &map, 5, &NoParents), Direction::Rtl);
        assert_eq!(
            dir.resolve(Some(Direction::Ltr), &map, 5, &NoParents),
            Direction::Ltr
        );
    }

    #[test]
    fn nearest_provider_wins_through_the_tree() {
        let mut registry = ScopeRegistry::new();
        let dir = DirectionContext::register(&mut registry);

        let mut map: ContextMap<u32> = ContextMap::new();
        dir.provide(&mut map, 0, Direction::Rtl);
        dir.provide(&mut map, 1, Direction::Ltr);

        assert_eq!(dir.resolve(None, &map, 2, &Chain), Direction::Ltr);

        dir.retract(&mut map, 1);
        assert_eq!(dir.resolve(None, &map, 2, &Chain), Direction::Rtl);
    }
}
