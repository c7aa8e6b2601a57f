// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dialog state machine, scope wiring, and accessibility advisories.
//!
//! [`DialogState`] owns the open flag for one dialog instance and exposes
//! the event entry points its parts route through. Every entry point accepts
//! the caller's handler for the same interaction and merges it with the
//! internal transition via [`compose_handlers`], so a caller calling
//! `prevent_default` cancels the transition without any extra protocol.
//!
//! The machine never reads a clock and never renders; hosts feed it events
//! and apply the returned open-flag changes.

use core::fmt;

use trellis_events::{
    BUTTON_MAIN, FocusEvent, Key, KeyEvent, PointerEvent, Preventable, caller_allows,
    compose_handlers,
};
use trellis_scope::{Channel, FamilyId, ScopeHandle, ScopeRegistry};

/// Open/close state machine for one dialog instance.
///
/// The open flag is either *uncontrolled* (owned by this machine, seeded
/// with an initial value) or *controlled* (owned by the host). Event entry
/// points report a requested change as `Some(next_open)`; uncontrolled
/// machines also apply it immediately, controlled machines wait for the host
/// to write the new value back through [`DialogState::sync_open`].
///
/// Modal dialogs expect the host to block interaction with the rest of the
/// document while open; non-modal dialogs leave it reachable. The machine
/// carries the flag so parts can read it from the published [`DialogBundle`],
/// it does not enforce it.
#[derive(Clone, Debug)]
pub struct DialogState {
    open: bool,
    controlled: bool,
    modal: bool,
}

impl DialogState {
    /// Create a closed, uncontrolled, modal dialog.
    pub fn new() -> Self {
        Self {
            open: false,
            controlled: false,
            modal: true,
        }
    }

    /// Create an uncontrolled dialog with an initial open value.
    pub fn with_default_open(open: bool) -> Self {
        Self {
            open,
            controlled: false,
            modal: true,
        }
    }

    /// Create a controlled dialog mirroring a host-owned open flag.
    ///
    /// Entry points report requested changes without applying them; the host
    /// decides and writes the result back via [`Self::sync_open`].
    pub fn controlled(open: bool) -> Self {
        Self {
            open,
            controlled: true,
            modal: true,
        }
    }

    /// Set whether the dialog is modal. Defaults to `true`.
    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Whether the dialog is open (the last synced value when controlled).
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the dialog is modal.
    pub fn is_modal(&self) -> bool {
        self.modal
    }

    /// Whether the open flag is host-owned.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Write the host-owned open value back into the machine.
    pub fn sync_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Request the open flag become `open`.
    ///
    /// Returns `Some(open)` if that is a change from the current value,
    /// `None` otherwise. Uncontrolled machines apply the change before
    /// returning.
    pub fn request_open(&mut self, open: bool) -> Option<bool> {
        if self.open == open {
            return None;
        }
        if !self.controlled {
            self.open = open;
        }
        Some(open)
    }

    /// Request the open flag flip.
    pub fn toggle(&mut self) -> Option<bool> {
        self.request_open(!self.open)
    }

    /// Process a pointer press on the trigger.
    ///
    /// The caller handler runs first; if it leaves the event's default
    /// behavior alone and the press is a main-button press, the dialog
    /// toggles.
    ///
    /// # Returns
    /// `Some(next_open)` if the open flag should change, `None` otherwise.
    pub fn trigger_pointer_down(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) -> Option<bool> {
        let mut toggled = false;
        let mut ours = |ev: &mut PointerEvent| {
            if ev.button == BUTTON_MAIN {
                toggled = true;
            }
        };
        compose_handlers(caller, Some(&mut ours))(event);
        if toggled { self.toggle() } else { None }
    }

    /// Process a key press on the trigger.
    ///
    /// Enter and Space toggle the dialog and consume the key, mirroring
    /// native button activation.
    pub fn trigger_key_down(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut KeyEvent)>,
        event: &mut KeyEvent,
    ) -> Option<bool> {
        let mut toggled = false;
        let mut ours = |ev: &mut KeyEvent| {
            if matches!(ev.key, Key::Enter | Key::Space) {
                ev.prevent_default();
                toggled = true;
            }
        };
        compose_handlers(caller, Some(&mut ours))(event);
        if toggled { self.toggle() } else { None }
    }

    /// Process Escape pressed while the content has focus.
    ///
    /// Closes the dialog and consumes the key unless the caller handler
    /// prevented the default behavior first.
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

    /// Process a pointer press that landed outside the content.
    ///
    /// Closes the dialog unless the caller handler prevented it.
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

    /// Process focus moving outside the content.
    pub fn focus_outside(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut FocusEvent)>,
        event: &mut FocusEvent,
    ) -> Option<bool> {
        if caller_allows(caller, event) {
            self.request_open(false)
        } else {
            None
        }
    }

    /// Process an activation of a close part, from any event type.
    pub fn close_activated<E: Preventable>(
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

    /// Whether focus should move into the content when the dialog opens.
    ///
    /// `false` when the caller handler took the move over by preventing the
    /// default behavior.
    pub fn open_auto_focus(
        &self,
        caller: Option<&mut dyn FnMut(&mut FocusEvent)>,
        event: &mut FocusEvent,
    ) -> bool {
        caller_allows(caller, event)
    }

    /// Whether focus should return to the trigger when the dialog closes.
    pub fn close_auto_focus(
        &self,
        caller: Option<&mut dyn FnMut(&mut FocusEvent)>,
        event: &mut FocusEvent,
    ) -> bool {
        caller_allows(caller, event)
    }
}

impl Default for DialogState {
    fn default() -> Self {
        Self::new()
    }
}

/// Channels a dialog family publishes, created once against a registry.
///
/// One `DialogContext` serves every dialog instance in the application;
/// instances are told apart by the [`ScopeHandle`] passed when providing and
/// reading the bundle.
pub struct DialogContext<K> {
    family: FamilyId,
    channel: Channel<DialogBundle<K>>,
}

impl<K: 'static> DialogContext<K> {
    /// Register the dialog family and its bundle channel.
    pub fn register(registry: &mut ScopeRegistry) -> Self {
        let family = registry.register_family("Dialog", &[]);
        let channel = registry.channel(family, "DialogProvider");
        Self { family, channel }
    }

    /// The dialog family id, for extension families to build on.
    pub fn family(&self) -> FamilyId {
        self.family
    }

    /// The channel dialog roots publish their [`DialogBundle`] on.
    pub fn channel(&self) -> &Channel<DialogBundle<K>> {
        &self.channel
    }

    /// Mint a scope handle isolating one dialog instance.
    pub fn create_scope(&self, registry: &mut ScopeRegistry) -> ScopeHandle {
        registry.create_scope(self.family)
    }
}

impl<K> Copy for DialogContext<K> {}

impl<K> Clone for DialogContext<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> fmt::Debug for DialogContext<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogContext")
            .field("family", &self.family)
            .field("channel", &self.channel)
            .finish()
    }
}

/// Snapshot of one dialog instance, published on the dialog channel.
///
/// The root re-provides a fresh snapshot whenever the state or part ids
/// change; parts read it to drive visibility and accessibility wiring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogBundle<K> {
    /// Whether the dialog is open.
    pub open: bool,
    /// Whether the dialog is modal.
    pub modal: bool,
    /// The trigger part, once mounted.
    pub trigger: Option<K>,
    /// The content part, once mounted.
    pub content: Option<K>,
    /// The title part, labelling the content.
    pub title: Option<K>,
    /// The description part, describing the content.
    pub description: Option<K>,
}

impl<K> DialogBundle<K> {
    /// Snapshot `state` with no parts mounted yet.
    pub fn from_state(state: &DialogState) -> Self {
        Self {
            open: state.is_open(),
            modal: state.is_modal(),
            trigger: None,
            content: None,
            title: None,
            description: None,
        }
    }

    /// Set the trigger part.
    pub fn with_trigger(mut self, part: K) -> Self {
        self.trigger = Some(part);
        self
    }

    /// Set the content part.
    pub fn with_content(mut self, part: K) -> Self {
        self.content = Some(part);
        self
    }

    /// Set the title part.
    pub fn with_title(mut self, part: K) -> Self {
        self.title = Some(part);
        self
    }

    /// Set the description part.
    pub fn with_description(mut self, part: K) -> Self {
        self.description = Some(part);
        self
    }
}

/// Part names used in accessibility advisories.
///
/// Extension families reuse the dialog advisories under their own part names
/// by passing their own set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartNames {
    /// Name of the content part.
    pub content: &'static str,
    /// Name of the title part.
    pub title: &'static str,
    /// Name of the description part.
    pub description: &'static str,
}

/// Part names for the plain dialog family.
pub const DIALOG_PART_NAMES: PartNames = PartNames {
    content: "DialogContent",
    title: "DialogTitle",
    description: "DialogDescription",
};

/// Warn when an open content has no title part labelling it.
///
/// Advisory only, debug builds only; behavior never changes.
pub fn warn_missing_title(names: PartNames, has_title: bool) {
    if cfg!(debug_assertions) && !has_title {
        log::warn!(
            "`{}` requires a `{}` for it to be accessible to screen reader users; \
             wrap the title in a visually hidden part if it should stay unseen",
            names.content,
            names.title
        );
    }
}

/// Warn when an open content has no description part and no explicit
/// described-by wiring.
pub fn warn_missing_description(names: PartNames, has_description: bool) {
    if cfg!(debug_assertions) && !has_description {
        log::warn!(
            "`{}` requires a description for it to be accessible to screen reader users; \
             add a `{}` part or an explicit described-by id",
            names.content,
            names.description
        );
    }
}
