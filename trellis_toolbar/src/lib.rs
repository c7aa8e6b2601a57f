// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_toolbar --heading-base-level=0

//! Trellis Toolbar: orientation, roving focus, and item wiring for toolbars.
//!
//! A toolbar is a strip of controls sharing one tab stop. This crate owns
//! the keyboard and layout policy; rendering and actual focus movement stay
//! with the host:
//!
//! - [`ToolbarState`] — orientation, reading direction, and the roving
//!   focus group (wrapping on by default), with a composed key entry point
//!   that maps arrows, Home, and End onto the item list.
//! - [`ItemData`] — the payload items register in a
//!   `trellis_collection::Collection`; buttons are focusable unless
//!   disabled, links always. [`candidates`] maps a document-ordered query
//!   onto the focus group. Separators do not register at all.
//! - [`link_key_down`] — the link quirk: Space activates a link the way a
//!   button activates, since only Enter does natively.
//! - [`separator_orientation`] — separators render across the toolbar's
//!   axis.
//! - [`ToolbarContext`] / [`ToolbarBundle`] — the scope channel a toolbar
//!   publishes its orientation and direction on, which nested groups read
//!   instead of carrying their own.
//!
//! ## Example
//!
//! ```rust
//! use trellis_direction::Direction;
//! use trellis_events::{Key, KeyEvent};
//! use trellis_focus::Orientation;
//! use trellis_toolbar::{ItemData, ToolbarState, candidates};
//!
//! let bold = ItemData::button(false);
//! let italic = ItemData::button(false);
//! let docs = ItemData::link();
//! let entries = [(1_u32, &bold), (2, &italic), (3, &docs)];
//! let items = candidates(&entries);
//!
//! let mut toolbar: ToolbarState<u32> = ToolbarState::new();
//! assert_eq!(toolbar.entry(&items), Some(1));
//!
//! // ArrowRight moves along a horizontal toolbar and consumes the key.
//! let mut key = KeyEvent::new(Key::ArrowRight, 0);
//! assert_eq!(toolbar.key_down(None, &mut key, &items), Some(2));
//! assert!(key.default_prevented);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use trellis_direction::Direction;
use trellis_events::{Key, KeyEvent, compose_handlers};
use trellis_focus::{Candidate, FocusGroup, Orientation, navigation_for_key};
use trellis_scope::{Channel, FamilyId, ScopeHandle, ScopeRegistry};

/// Per-item payload toolbars register in their item collection.
///
/// Separators are not items; they take no tab stop and are skipped by
/// simply never registering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemData {
    /// Whether the item can take the toolbar's tab stop.
    pub focusable: bool,
}

impl ItemData {
    /// A button item; disabled buttons stay in the layout but lose their
    /// tab stop.
    pub fn button(disabled: bool) -> Self {
        Self {
            focusable: !disabled,
        }
    }

    /// A link item. Links stay focusable even when visually disabled, so
    /// keyboard users can still discover them.
    pub fn link() -> Self {
        Self { focusable: true }
    }
}

/// Build the focus candidate list from collected items.
pub fn candidates<K: Copy>(entries: &[(K, &ItemData)]) -> Vec<Candidate<K>> {
    entries
        .iter()
        .map(|(id, data)| Candidate {
            id: *id,
            disabled: !data.focusable,
        })
        .collect()
}

/// The orientation a separator renders with inside a toolbar: across the
/// toolbar's own axis.
pub fn separator_orientation(toolbar: Orientation) -> Orientation {
    match toolbar {
        Orientation::Horizontal => Orientation::Vertical,
        Orientation::Vertical => Orientation::Horizontal,
    }
}

/// Route a key press on a link item.
///
/// Returns `true` when the link should activate: Space presses synthesize
/// the click a native link only performs on Enter. The caller's handler
/// composes in front and can prevent the activation.
pub fn link_key_down(
    caller: Option<&mut dyn FnMut(&mut KeyEvent)>,
    event: &mut KeyEvent,
) -> bool {
    let mut activate = false;
    let mut ours = |ev: &mut KeyEvent| {
        if ev.key == Key::Space {
            activate = true;
        }
    };
    compose_handlers(caller, Some(&mut ours))(event);
    activate
}

/// Keyboard and focus state for one toolbar.
///
/// Defaults to a horizontal, left-to-right toolbar whose navigation wraps
/// past the ends. The item list is not owned here; every operation takes a
/// fresh document-ordered snapshot, so items may come and go freely.
#[derive(Clone, Debug)]
pub struct ToolbarState<K> {
    orientation: Orientation,
    direction: Direction,
    group: FocusGroup<K>,
}

impl<K: Copy + Eq> Default for ToolbarState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq> ToolbarState<K> {
    /// A horizontal, left-to-right toolbar with wrapping on.
    pub fn new() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            direction: Direction::Ltr,
            group: FocusGroup::new().with_wrap(true),
        }
    }

    /// Set the toolbar's layout axis.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the reading direction arrows follow.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set whether navigation wraps past the ends.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.group = self.group.with_wrap(wrap);
        self
    }

    /// The toolbar's layout axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The reading direction arrows follow.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The item holding the toolbar's tab stop, if any.
    pub fn focused(&self) -> Option<K> {
        self.group.current()
    }

    /// Record that `id` was focused directly, as by a pointer press.
    pub fn focus(&mut self, id: K) {
        self.group.focus(id);
    }

    /// Where focus lands when the toolbar is tabbed into.
    pub fn entry(&mut self, candidates: &[Candidate<K>]) -> Option<K> {
        self.group.entry(candidates)
    }

    /// Route a key press on a toolbar item.
    ///
    /// Arrows along the toolbar's axis, Home, and End move the tab stop
    /// over `candidates` and consume the key. Arrows across the axis and
    /// presses carrying a modifier are left for the host. The caller's
    /// handler composes in front and can prevent the movement.
    ///
    /// # Returns
    ///
    /// The newly focused item, or `None` when the key did not move it.
    pub fn key_down(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut KeyEvent)>,
        event: &mut KeyEvent,
        candidates: &[Candidate<K>],
    ) -> Option<K> {
        let orientation = self.orientation;
        let direction = self.direction;
        let mut intent = None;
        let mut ours = |ev: &mut KeyEvent| {
            if !ev.modifiers.is_empty() {
                return;
            }
            if let Some(nav) = navigation_for_key(ev.key, orientation, direction) {
                ev.prevent_default();
                intent = Some(nav);
            }
        };
        compose_handlers(caller, Some(&mut ours))(event);
        let nav = intent?;
        self.group.navigate(candidates, nav)
    }
}

/// Scope wiring for the toolbar family.
#[derive(Clone, Copy, Debug)]
pub struct ToolbarContext {
    family: FamilyId,
    channel: Channel<ToolbarBundle>,
}

impl ToolbarContext {
    /// Register the toolbar family and its bundle channel.
    pub fn register(registry: &mut ScopeRegistry) -> Self {
        let family = registry.register_family("Toolbar", &[]);
        let channel = registry.channel(family, "ToolbarProvider");
        Self { family, channel }
    }

    /// The toolbar family id, for extension families to build on.
    pub fn family(&self) -> FamilyId {
        self.family
    }

    /// The channel toolbars publish their [`ToolbarBundle`] on.
    pub fn channel(&self) -> &Channel<ToolbarBundle> {
        &self.channel
    }

    /// Mint a scope handle isolating one toolbar instance.
    pub fn create_scope(&self, registry: &mut ScopeRegistry) -> ScopeHandle {
        registry.create_scope(self.family)
    }
}

/// Layout snapshot a toolbar publishes for its descendant parts.
///
/// Nested groups read this instead of carrying their own orientation and
/// direction, so they always agree with the toolbar around them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolbarBundle {
    /// The toolbar's layout axis.
    pub orientation: Orientation,
    /// The reading direction the toolbar follows.
    pub direction: Direction,
}

impl ToolbarBundle {
    /// Snapshot `state` for publishing.
    pub fn from_state<K: Copy + Eq>(state: &ToolbarState<K>) -> Self {
        Self {
            orientation: state.orientation(),
            direction: state.direction(),
        }
    }
}
