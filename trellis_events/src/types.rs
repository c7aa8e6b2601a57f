// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads shared by the composition crates: pointer, key, and focus.
//!
//! Timestamps are `u64` milliseconds from an arbitrary host epoch; the crates
//! in this workspace never read a clock themselves. Positions use
//! [`kurbo::Point`] in whatever coordinate space the host routes events in.

use kurbo::Point;

use crate::compose::Preventable;

/// Pointer button identifier.
///
/// Follows the convention of pointer input systems: `0` is the main button,
/// `1` auxiliary (wheel), `2` secondary (context menu).
pub type Button = u8;

/// The main (usually left) pointer button.
pub const BUTTON_MAIN: Button = 0;
/// The auxiliary (usually wheel) pointer button.
pub const BUTTON_AUXILIARY: Button = 1;
/// The secondary (usually right) pointer button.
pub const BUTTON_SECONDARY: Button = 2;

/// The kind of device a pointer event originated from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A mouse or mouse-like device.
    #[default]
    Mouse,
    /// A touch contact.
    Touch,
    /// A stylus.
    Pen,
}

impl PointerKind {
    /// True for coarse pointers (touch or pen) that use press-and-hold
    /// instead of a secondary button.
    pub fn is_touch_or_pen(self) -> bool {
        matches!(self, Self::Touch | Self::Pen)
    }
}

bitflags::bitflags! {
    /// Keyboard modifier state carried on pointer and key events.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control key.
        const CTRL  = 0b0000_0001;
        /// Shift key.
        const SHIFT = 0b0000_0010;
        /// Alt/Option key.
        const ALT   = 0b0000_0100;
        /// Meta/Command/Windows key.
        const META  = 0b0000_1000;
    }
}

/// A key identity, covering the navigation keys the compositions react to
/// plus printable characters for typeahead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Enter/Return.
    Enter,
    /// The space bar.
    Space,
    /// Tab.
    Tab,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// A printable character.
    Character(char),
}

impl Key {
    /// The printable character for this key, if any.
    ///
    /// [`Key::Space`] reports `' '` so typeahead can treat it as input when a
    /// search is already in progress.
    pub fn character(self) -> Option<char> {
        match self {
            Self::Character(c) => Some(c),
            Self::Space => Some(' '),
            _ => None,
        }
    }
}

/// A pointer event payload.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in the host's event coordinate space.
    pub position: Point,
    /// Button associated with the event (`BUTTON_MAIN` for moves).
    pub button: Button,
    /// Originating device kind.
    pub kind: PointerKind,
    /// Modifier state at event time.
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds.
    pub time: u64,
    /// Whether the default behavior has been suppressed.
    pub default_prevented: bool,
}

impl PointerEvent {
    /// Create a main-button mouse event at `position`.
    pub fn new(position: Point, time: u64) -> Self {
        Self {
            position,
            button: BUTTON_MAIN,
            kind: PointerKind::Mouse,
            modifiers: Modifiers::empty(),
            time,
            default_prevented: false,
        }
    }

    /// Set the button.
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    /// Set the device kind.
    pub fn with_kind(mut self, kind: PointerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Suppress the default behavior for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

impl Preventable for PointerEvent {
    fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// A keyboard event payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The pressed key.
    pub key: Key,
    /// Modifier state at event time.
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds.
    pub time: u64,
    /// Whether the default behavior has been suppressed.
    pub default_prevented: bool,
}

impl KeyEvent {
    /// Create an unmodified key event.
    pub fn new(key: Key, time: u64) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            time,
            default_prevented: false,
        }
    }

    /// Set the modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Suppress the default behavior for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

impl Preventable for KeyEvent {
    fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// A focus transition payload.
///
/// Used by parts that let the caller veto an automatic focus move, for
/// example when a dialog opens and would focus its first interactive child.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusEvent {
    /// Event timestamp in milliseconds.
    pub time: u64,
    /// Whether the default behavior has been suppressed.
    pub default_prevented: bool,
}

impl FocusEvent {
    /// Create a focus event.
    pub fn new(time: u64) -> Self {
        Self {
            time,
            default_prevented: false,
        }
    }

    /// Suppress the default behavior for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

impl Preventable for FocusEvent {
    fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_event_builders() {
        let ev = PointerEvent::new(Point::new(4.0, 8.0), 100)
            .with_button(BUTTON_SECONDARY)
            .with_kind(PointerKind::Pen)
            .with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);

        assert_eq!(ev.position, Point::new(4.0, 8.0));
        assert_eq!(ev.button, BUTTON_SECONDARY);
        assert!(ev.kind.is_touch_or_pen());
        assert!(ev.modifiers.contains(Modifiers::CTRL));
        assert!(!ev.default_prevented);
    }

    #[test]
    fn key_characters() {
        assert_eq!(Key::Character('a').character(), Some('a'));
        assert_eq!(Key::Space.character(), Some(' '));
        assert_eq!(Key::Escape.character(), None);
        assert_eq!(Key::ArrowDown.character(), None);
    }

    #[test]
    fn prevent_default_is_sticky() {
        let mut ev = KeyEvent::new(Key::Escape, 0);
        assert!(!Preventable::default_prevented(&ev));
        ev.prevent_default();
        assert!(Preventable::default_prevented(&ev));
        ev.prevent_default();
        assert!(ev.default_prevented);
    }
}
