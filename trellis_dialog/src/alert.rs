// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alert dialog: the interruption-grade extension of the dialog family.
//!
//! An alert dialog interrupts the user and expects an explicit response. It
//! reuses the dialog machinery wholesale but registers its own family with
//! the dialog family as an extension, so a single scope handle minted for
//! the alert family parameterizes the parts of both families. Policy
//! differences from the plain dialog:
//!
//! - always modal;
//! - pointer presses and focus moves outside the content never dismiss, and
//!   the caller cannot opt back in (those entry points are not composed);
//! - Escape keeps its composed close behavior;
//! - when the content opens, focus is redirected to the cancel part
//!   published on the content channel.

use core::fmt;

use trellis_events::{FocusEvent, KeyEvent, PointerEvent, Preventable, compose_handlers};
use trellis_scope::{Channel, FamilyId, ScopeHandle, ScopeRegistry};

use crate::dialog::{DialogContext, DialogState, PartNames};

/// Part names for the alert dialog family.
pub const ALERT_DIALOG_PART_NAMES: PartNames = PartNames {
    content: "AlertDialogContent",
    title: "AlertDialogTitle",
    description: "AlertDialogDescription",
};

/// Open/close state machine for one alert dialog instance.
///
/// Wraps [`DialogState`] with the alert policy applied: the modal flag is
/// forced on and outside interactions never dismiss. Everything else
/// delegates.
#[derive(Clone, Debug)]
pub struct AlertDialogState {
    inner: DialogState,
}

impl AlertDialogState {
    /// Create a closed, uncontrolled alert dialog.
    pub fn new() -> Self {
        Self {
            inner: DialogState::new(),
        }
    }

    /// Create an uncontrolled alert dialog with an initial open value.
    pub fn with_default_open(open: bool) -> Self {
        Self {
            inner: DialogState::with_default_open(open),
        }
    }

    /// Create a controlled alert dialog mirroring a host-owned open flag.
    pub fn controlled(open: bool) -> Self {
        Self {
            inner: DialogState::controlled(open),
        }
    }

    /// The wrapped dialog state. Always modal.
    pub fn dialog(&self) -> &DialogState {
        &self.inner
    }

    /// Whether the alert dialog is open.
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Write the host-owned open value back into the machine.
    pub fn sync_open(&mut self, open: bool) {
        self.inner.sync_open(open);
    }

    /// Request the open flag become `open`.
    pub fn request_open(&mut self, open: bool) -> Option<bool> {
        self.inner.request_open(open)
    }

    /// Process a pointer press on the trigger.
    pub fn trigger_pointer_down(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) -> Option<bool> {
        self.inner.trigger_pointer_down(caller, event)
    }

    /// Process a key press on the trigger.
    pub fn trigger_key_down(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut KeyEvent)>,
        event: &mut KeyEvent,
    ) -> Option<bool> {
        self.inner.trigger_key_down(caller, event)
    }

    /// Process Escape pressed while the content has focus.
    ///
    /// Escape keeps its composed close behavior even for alerts; hosts that
    /// want to require an explicit choice pass a caller handler that
    /// prevents it.
    pub fn escape_key_down(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut KeyEvent)>,
        event: &mut KeyEvent,
    ) -> Option<bool> {
        self.inner.escape_key_down(caller, event)
    }

    /// Process an activation of an action or cancel part.
    pub fn close_activated<E: Preventable>(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut E)>,
        event: &mut E,
    ) -> Option<bool> {
        self.inner.close_activated(caller, event)
    }

    /// Refuse a pointer press outside the content.
    ///
    /// Not composed: the alert content owns this interaction outright, so a
    /// caller handler cannot re-enable outside dismissal. The event is
    /// marked consumed and the dialog stays open.
    pub fn pointer_down_outside(&self, event: &mut PointerEvent) -> Option<bool> {
        event.prevent_default();
        None
    }

    /// Refuse focus moving outside the content.
    pub fn focus_outside(&self, event: &mut FocusEvent) -> Option<bool> {
        event.prevent_default();
        None
    }

    /// Redirect the opening focus move to the cancel part.
    ///
    /// The caller handler runs first and may take the move over by
    /// preventing the default behavior, in which case nothing is focused
    /// here. Otherwise the default move into the content is suppressed and
    /// the cancel part (if one is published) is returned as the focus
    /// target.
    pub fn open_auto_focus<K: Copy>(
        &self,
        caller: Option<&mut dyn FnMut(&mut FocusEvent)>,
        event: &mut FocusEvent,
        cancel: Option<K>,
    ) -> Option<K> {
        let mut redirect = None;
        let mut ours = |ev: &mut FocusEvent| {
            ev.prevent_default();
            redirect = cancel;
        };
        compose_handlers(caller, Some(&mut ours))(event);
        redirect
    }

    /// Whether focus should return to the trigger when the alert closes.
    pub fn close_auto_focus(
        &self,
        caller: Option<&mut dyn FnMut(&mut FocusEvent)>,
        event: &mut FocusEvent,
    ) -> bool {
        self.inner.close_auto_focus(caller, event)
    }
}

impl Default for AlertDialogState {
    fn default() -> Self {
        Self::new()
    }
}

/// Channels the alert dialog family publishes.
///
/// Registered with the dialog family in its extension list: a handle from
/// [`Self::create_scope`] carries tokens for both families, so alert parts
/// provide and read the plain dialog channel through the same handle they
/// use for the cancel slot.
pub struct AlertDialogContext<K> {
    family: FamilyId,
    content: Channel<AlertContentBundle<K>>,
}

impl<K: 'static> AlertDialogContext<K> {
    /// Register the alert dialog family as an extension of `dialog`.
    pub fn register(registry: &mut ScopeRegistry, dialog: &DialogContext<K>) -> Self {
        let family = registry.register_family("AlertDialog", &[dialog.family()]);
        let content = registry.channel(family, "AlertDialogContent");
        Self { family, content }
    }

    /// The alert dialog family id.
    pub fn family(&self) -> FamilyId {
        self.family
    }

    /// The channel the content publishes its [`AlertContentBundle`] on.
    pub fn content_channel(&self) -> &Channel<AlertContentBundle<K>> {
        &self.content
    }

    /// Mint a scope handle carrying tokens for both the alert and the
    /// dialog family.
    pub fn create_scope(&self, registry: &mut ScopeRegistry) -> ScopeHandle {
        registry.create_scope(self.family)
    }
}

impl<K> Copy for AlertDialogContext<K> {}

impl<K> Clone for AlertDialogContext<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> fmt::Debug for AlertDialogContext<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertDialogContext")
            .field("family", &self.family)
            .field("content", &self.content)
            .finish()
    }
}

/// Slot the alert content publishes for parts beneath it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertContentBundle<K> {
    /// The cancel part, once mounted. Receives the opening focus move.
    pub cancel: Option<K>,
}

impl<K> AlertContentBundle<K> {
    /// An empty slot; the cancel part fills it when it mounts.
    pub fn new() -> Self {
        Self { cancel: None }
    }

    /// Set the cancel part.
    pub fn with_cancel(mut self, part: K) -> Self {
        self.cancel = Some(part);
        self
    }
}

impl<K> Default for AlertContentBundle<K> {
    fn default() -> Self {
        Self::new()
    }
}
