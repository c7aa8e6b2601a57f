// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu state machine, item descriptors, and scope wiring.
//!
//! [`MenuState`] owns the open flag, the anchor point, the roving highlight,
//! and the typeahead search for one menu instance. Content-level entry
//! points accept the caller's handler for the same interaction and merge it
//! via [`compose_handlers`], so a caller calling `prevent_default` cancels
//! the transition without any extra protocol. The trigger-side entry points
//! live in the trigger machines, which drive a `MenuState` they borrow.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use trellis_events::{Key, KeyEvent, PointerEvent, Preventable, caller_allows, compose_handlers};
use trellis_focus::{Candidate, FocusGroup, Navigation};
use trellis_scope::{Channel, FamilyId, ScopeHandle, ScopeRegistry};

use crate::typeahead::Typeahead;

/// Per-item payload menus register in their item collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemData {
    /// Disabled items stay in the list but are skipped by the highlight
    /// and by typeahead.
    pub disabled: bool,
    /// Text the item matches against during typeahead.
    pub text_value: String,
}

impl ItemData {
    /// An enabled item matching against `text_value`.
    pub fn new(text_value: impl Into<String>) -> Self {
        Self {
            disabled: false,
            text_value: text_value.into(),
        }
    }

    /// Set whether the item is disabled.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Build the highlight candidate list from collected items.
///
/// `entries` is a document-ordered collection query; disabled items keep
/// their position so the visual order and the navigation order agree.
pub fn candidates<K: Copy>(entries: &[(K, &ItemData)]) -> Vec<Candidate<K>> {
    entries
        .iter()
        .map(|(id, data)| Candidate {
            id: *id,
            disabled: data.disabled,
        })
        .collect()
}

/// Build the typeahead corpus from collected items.
///
/// Disabled items are dropped entirely; typeahead never lands on them.
pub fn typeahead_entries<'c, K: Copy>(entries: &[(K, &'c ItemData)]) -> Vec<(K, &'c str)> {
    entries
        .iter()
        .filter(|(_, data)| !data.disabled)
        .map(|(id, data)| (*id, data.text_value.as_str()))
        .collect()
}

/// Open/close and highlight state machine for one menu instance.
///
/// The open flag is either *uncontrolled* (owned by this machine) or
/// *controlled* (owned by the host); entry points report a requested change
/// as `Some(next_open)` and controlled machines wait for the host to write
/// it back through [`MenuState::sync_open`]. Context menus open at a pointer
/// position recorded as the anchor; trigger-anchored menus leave it `None`.
///
/// Closing forgets the highlight and the typeahead buffer, so a reopened
/// menu starts fresh.
#[derive(Clone, Debug)]
pub struct MenuState<K> {
    open: bool,
    controlled: bool,
    modal: bool,
    anchor: Option<Point>,
    focus: FocusGroup<K>,
    search: Typeahead,
}

impl<K: Copy + Eq> Default for MenuState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq> MenuState<K> {
    /// A closed, uncontrolled, modal menu with highlight wrapping off.
    pub fn new() -> Self {
        Self {
            open: false,
            controlled: false,
            modal: true,
            anchor: None,
            focus: FocusGroup::new(),
            search: Typeahead::new(),
        }
    }

    /// An uncontrolled menu seeded with an initial open value.
    pub fn with_default_open(open: bool) -> Self {
        Self {
            open,
            ..Self::new()
        }
    }

    /// A controlled menu mirroring a host-owned open value.
    pub fn controlled(open: bool) -> Self {
        Self {
            open,
            controlled: true,
            ..Self::new()
        }
    }

    /// Set whether the menu is modal.
    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Set whether highlight navigation wraps past the ends.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.focus = self.focus.with_wrap(wrap);
        self
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the menu is modal.
    pub fn is_modal(&self) -> bool {
        self.modal
    }

    /// Whether the host owns the open flag.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// The pointer position the menu is anchored to, when opened by a
    /// position-taking trigger.
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    /// The currently highlighted item, if any.
    pub fn highlighted(&self) -> Option<K> {
        self.focus.current()
    }

    /// Write a host-owned open value back into a controlled machine.
    pub fn sync_open(&mut self, open: bool) {
        if self.open && !open {
            self.reset_interaction();
        }
        self.open = open;
    }

    /// Request a change to the open flag.
    ///
    /// Returns `Some(open)` when this is an actual change, after applying it
    /// if the machine is uncontrolled. Redundant requests return `None`.
    pub fn request_open(&mut self, open: bool) -> Option<bool> {
        if self.open == open {
            return None;
        }
        if !self.controlled {
            self.open = open;
            if !open {
                self.reset_interaction();
            }
        }
        Some(open)
    }

    /// Request the opposite of the current open flag.
    pub fn toggle(&mut self) -> Option<bool> {
        self.request_open(!self.open)
    }

    /// Record `point` as the anchor and request the menu open.
    ///
    /// The anchor moves even when the menu is already open (and the return
    /// is `None`), so a repeated context-menu gesture repositions in place.
    pub fn open_at(&mut self, point: Point) -> Option<bool> {
        self.anchor = Some(point);
        self.request_open(true)
    }

    /// Move the highlight directly, as when the pointer enters an item.
    ///
    /// Pass `None` when the pointer rests on a disabled item or leaves the
    /// items entirely, so keyboard navigation starts over from the edge.
    pub fn highlight(&mut self, item: Option<K>) {
        match item {
            Some(id) => self.focus.focus(id),
            None => self.focus.blur(),
        }
    }

    /// Where the highlight lands when the content receives focus.
    pub fn entry(&mut self, candidates: &[Candidate<K>]) -> Option<K> {
        self.focus.entry(candidates)
    }

    /// Apply a navigation intent over `candidates` and remember the result.
    pub fn navigate(&mut self, candidates: &[Candidate<K>], nav: Navigation) -> Option<K> {
        self.focus.navigate(candidates, nav)
    }

    /// Feed a typed character into the typeahead search.
    ///
    /// `items` is the typeahead corpus (see [`typeahead_entries`]) and `now`
    /// the key press timestamp in milliseconds. A match becomes the new
    /// highlight and is returned; `None` leaves the highlight alone.
    pub fn typeahead(&mut self, ch: char, now: u64, items: &[(K, &str)]) -> Option<K> {
        let hit = self.search.on_character(ch, now, items, self.focus.current());
        if let Some(id) = hit {
            self.focus.focus(id);
        }
        hit
    }

    /// Route an Escape key press from the content.
    ///
    /// Consumes the key and requests close unless the caller prevents it.
    pub fn escape_key_down(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut KeyEvent)>,
        event: &mut KeyEvent,
    ) -> Option<bool> {
        let mut dismissed = false;
        let mut ours = |ev: &mut KeyEvent| {
            if ev.key == Key::Escape {
                ev.prevent_default();
                dismissed = true;
            }
        };
        compose_handlers(caller, Some(&mut ours))(event);
        if dismissed { self.request_open(false) } else { None }
    }

    /// Route a pointer press that landed outside the menu parts.
    pub fn pointer_down_outside(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) -> Option<bool> {
        if caller_allows(caller, event) {
            self.request_open(false)
        } else {
            None
        }
    }

    /// Route focus moving outside the menu parts.
    pub fn focus_outside<E: Preventable>(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut E)>,
        event: &mut E,
    ) -> Option<bool> {
        if caller_allows(caller, event) {
            self.request_open(false)
        } else {
            None
        }
    }

    /// Route an item selection (click or Enter on a highlighted item).
    ///
    /// The menu closes after selection unless the caller's handler prevents
    /// it, which keeps the menu open for multi-select style items.
    pub fn item_selected<E: Preventable>(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut E)>,
        event: &mut E,
    ) -> Option<bool> {
        if caller_allows(caller, event) {
            self.request_open(false)
        } else {
            None
        }
    }

    fn reset_interaction(&mut self) {
        self.anchor = None;
        self.focus.blur();
        self.search.clear();
    }
}

/// Scope wiring for the menu family.
///
/// Registered once per registry; every menu instance then mints its own
/// [`ScopeHandle`] so sibling menus stay isolated.
pub struct MenuContext<K> {
    family: FamilyId,
    channel: Channel<MenuBundle<K>>,
}

impl<K: 'static> MenuContext<K> {
    /// Register the menu family and its bundle channel.
    pub fn register(registry: &mut ScopeRegistry) -> Self {
        let family = registry.register_family("Menu", &[]);
        let channel = registry.channel(family, "MenuProvider");
        Self { family, channel }
    }

    /// The menu family id, for extension families to build on.
    pub fn family(&self) -> FamilyId {
        self.family
    }

    /// The channel menu roots publish their [`MenuBundle`] on.
    pub fn channel(&self) -> &Channel<MenuBundle<K>> {
        &self.channel
    }

    /// Mint a scope handle isolating one menu instance.
    pub fn create_scope(&self, registry: &mut ScopeRegistry) -> ScopeHandle {
        registry.create_scope(self.family)
    }
}

impl<K> Clone for MenuContext<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for MenuContext<K> {}

impl<K> fmt::Debug for MenuContext<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuContext")
            .field("family", &self.family)
            .field("channel", &self.channel)
            .finish()
    }
}

/// Snapshot a menu root publishes for its descendant parts.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuBundle<K> {
    /// Whether the menu is open.
    pub open: bool,
    /// Whether the menu is modal.
    pub modal: bool,
    /// The pointer position the content is anchored to, for menus opened by
    /// a position-taking trigger.
    pub anchor: Option<Point>,
    /// The trigger part, once mounted.
    pub trigger: Option<K>,
    /// The content part, once mounted.
    pub content: Option<K>,
}

impl<K: Copy + Eq> MenuBundle<K> {
    /// Snapshot `state` with no parts recorded yet.
    pub fn from_state(state: &MenuState<K>) -> Self {
        Self {
            open: state.is_open(),
            modal: state.is_modal(),
            anchor: state.anchor(),
            trigger: None,
            content: None,
        }
    }

    /// Record the trigger part.
    pub fn with_trigger(mut self, part: K) -> Self {
        self.trigger = Some(part);
        self
    }

    /// Record the content part.
    pub fn with_content(mut self, part: K) -> Self {
        self.content = Some(part);
        self
    }
}
