// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger machines that open a [`MenuState`].
//!
//! [`DropdownTrigger`] is the button-anchored kind: presses and keys on the
//! trigger toggle the menu. [`ContextTrigger`] is the position-taking kind:
//! a context-menu gesture opens at the pointer, and a touch or pen press
//! held for [`ContextTrigger::LONG_PRESS_MS`] does the same. Long-press
//! timing uses host-supplied millisecond timestamps; hosts drive the clock
//! through [`ContextTrigger::poll`].

use kurbo::Point;
use trellis_events::{
    BUTTON_MAIN, BUTTON_SECONDARY, Key, KeyEvent, Modifiers, PointerEvent, caller_allows,
    compose_handlers,
};

use crate::state::MenuState;

/// Whether a mouse press is the conventional context-menu gesture: the
/// secondary button, or the main button with Control held.
pub fn is_context_click(event: &PointerEvent) -> bool {
    event.button == BUTTON_SECONDARY
        || (event.button == BUTTON_MAIN && event.modifiers.contains(Modifiers::CTRL))
}

/// What a dropdown trigger key press asks of the menu.
enum KeyAction {
    Toggle,
    Open,
}

/// Trigger machine for a button-anchored menu.
///
/// Stateless apart from the disabled flag; it drives the [`MenuState`] it
/// borrows per call. When disabled, caller handlers still run but the
/// internal transition does nothing.
#[derive(Clone, Debug)]
pub struct DropdownTrigger {
    disabled: bool,
}

impl Default for DropdownTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl DropdownTrigger {
    /// An enabled trigger.
    pub fn new() -> Self {
        Self { disabled: false }
    }

    /// Whether the trigger is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the trigger.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Route a pointer press on the trigger.
    ///
    /// A main-button press without Control toggles the menu. The press's
    /// default is prevented only when this opens the menu, so the content
    /// can take focus without the trigger competing for it; closing presses
    /// keep their default and return focus to the trigger.
    ///
    /// # Returns
    ///
    /// The requested open change, or `None` when the press did not toggle
    /// or the caller prevented it.
    pub fn pointer_down<K: Copy + Eq>(
        &self,
        menu: &mut MenuState<K>,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) -> Option<bool> {
        let disabled = self.disabled;
        let was_open = menu.is_open();
        let mut toggled = false;
        let mut ours = |ev: &mut PointerEvent| {
            if !disabled && ev.button == BUTTON_MAIN && !ev.modifiers.contains(Modifiers::CTRL) {
                toggled = true;
                if !was_open {
                    ev.prevent_default();
                }
            }
        };
        compose_handlers(caller, Some(&mut ours))(event);
        if toggled { menu.toggle() } else { None }
    }

    /// Route a key press on the trigger.
    ///
    /// Enter and Space toggle the menu; the down arrow opens it. All three
    /// consume the key.
    pub fn key_down<K: Copy + Eq>(
        &self,
        menu: &mut MenuState<K>,
        caller: Option<&mut dyn FnMut(&mut KeyEvent)>,
        event: &mut KeyEvent,
    ) -> Option<bool> {
        let disabled = self.disabled;
        let mut action = None;
        let mut ours = |ev: &mut KeyEvent| {
            if disabled {
                return;
            }
            action = match ev.key {
                Key::Enter | Key::Space => Some(KeyAction::Toggle),
                Key::ArrowDown => Some(KeyAction::Open),
                _ => None,
            };
            if action.is_some() {
                ev.prevent_default();
            }
        };
        compose_handlers(caller, Some(&mut ours))(event);
        match action {
            Some(KeyAction::Toggle) => menu.toggle(),
            Some(KeyAction::Open) => menu.request_open(true),
            None => None,
        }
    }
}

/// A touch or pen press waiting out the long-press delay.
#[derive(Clone, Copy, Debug)]
struct LongPress {
    deadline: u64,
    origin: Point,
}

/// Trigger machine for a position-taking menu.
///
/// Two paths open the menu: [`context_menu`](Self::context_menu) for the
/// platform's context gesture, and a touch or pen press held past the
/// long-press delay. A disabled trigger passes caller handlers through
/// untouched and never arms a press.
#[derive(Clone, Debug)]
pub struct ContextTrigger {
    disabled: bool,
    long_press: Option<LongPress>,
}

impl Default for ContextTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextTrigger {
    /// How long a touch or pen press must hold before the menu opens, in
    /// milliseconds.
    pub const LONG_PRESS_MS: u64 = 700;

    /// An enabled trigger with no pending press.
    pub fn new() -> Self {
        Self {
            disabled: false,
            long_press: None,
        }
    }

    /// Whether the trigger is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the trigger. Disabling drops any pending press.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.long_press = None;
        }
    }

    /// When the pending press will open the menu, if one is held.
    ///
    /// Hosts that schedule wakeups rather than polling every frame can use
    /// this as the wake deadline.
    pub fn pending_deadline(&self) -> Option<u64> {
        self.long_press.map(|press| press.deadline)
    }

    /// Route the platform's context-menu gesture.
    ///
    /// Mouse hosts without a synthesized gesture event can route presses
    /// matching [`is_context_click`] here. Opens the menu at the event
    /// position and consumes the event, unless the caller prevents it.
    pub fn context_menu<K: Copy + Eq>(
        &mut self,
        menu: &mut MenuState<K>,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) -> Option<bool> {
        if self.disabled {
            if let Some(f) = caller {
                f(event);
            }
            return None;
        }
        let mut opened_at = None;
        let mut ours = |ev: &mut PointerEvent| {
            ev.prevent_default();
            opened_at = Some(ev.position);
        };
        compose_handlers(caller, Some(&mut ours))(event);
        if let Some(point) = opened_at {
            self.long_press = None;
            menu.open_at(point)
        } else {
            None
        }
    }

    /// Route a pointer press on the trigger.
    ///
    /// Touch and pen presses arm the long-press timer at the press
    /// position; a new press replaces a pending one, so only the latest
    /// touch point counts. Mouse presses are ignored here, context gestures
    /// included; those arrive through [`context_menu`](Self::context_menu).
    pub fn pointer_down(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) {
        if self.disabled {
            if let Some(f) = caller {
                f(event);
            }
            return;
        }
        if !event.kind.is_touch_or_pen() {
            return;
        }
        let mut armed = None;
        let mut ours = |ev: &mut PointerEvent| {
            armed = Some(LongPress {
                deadline: ev.time + Self::LONG_PRESS_MS,
                origin: ev.position,
            });
        };
        compose_handlers(caller, Some(&mut ours))(event);
        if let Some(press) = armed {
            self.long_press = Some(press);
        }
    }

    /// Route pointer movement; any touch or pen movement drops the pending
    /// press.
    pub fn pointer_move(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) {
        self.clear_on_touch(caller, event);
    }

    /// Route a pointer lift; a touch or pen lift drops the pending press.
    pub fn pointer_up(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) {
        self.clear_on_touch(caller, event);
    }

    /// Route a pointer cancellation; a touch or pen cancel drops the
    /// pending press.
    pub fn pointer_cancel(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) {
        self.clear_on_touch(caller, event);
    }

    /// Advance the long-press clock to `now`.
    ///
    /// Returns the open request when a pending press has held through its
    /// deadline; the menu opens at the press position.
    pub fn poll<K: Copy + Eq>(&mut self, menu: &mut MenuState<K>, now: u64) -> Option<bool> {
        if let Some(press) = self.long_press
            && now >= press.deadline
        {
            self.long_press = None;
            return menu.open_at(press.origin);
        }
        None
    }

    fn clear_on_touch(
        &mut self,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) {
        if self.disabled {
            if let Some(f) = caller {
                f(event);
            }
            return;
        }
        if !event.kind.is_touch_or_pen() {
            return;
        }
        if caller_allows(caller, event) {
            self.long_press = None;
        }
    }
}
