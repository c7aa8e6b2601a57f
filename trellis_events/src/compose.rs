// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler composition: merge a caller handler with an internal handler.
//!
//! Every interactive part of a compound component accepts a handler from the
//! consuming application *and* carries an internal handler of its own. The
//! composed handler runs the caller first; the internal handler only runs if
//! the caller left the default behavior alone. The caller canceling the
//! interaction is an ordinary, supported outcome, not an error.

/// Read and suppress the default behavior of an event.
///
/// Event payloads that carry a real flag ([`PointerEvent`](crate::PointerEvent),
/// [`KeyEvent`](crate::KeyEvent), [`FocusEvent`](crate::FocusEvent)) forward
/// it here. Payload types without one can participate in composition by
/// adopting the defaults: they report `false` and ignore suppression, so the
/// internal handler always runs for them.
pub trait Preventable {
    /// Whether the default behavior for this event has been suppressed.
    fn default_prevented(&self) -> bool {
        false
    }

    /// Suppress the default behavior for this event.
    ///
    /// Types without a real flag ignore this.
    fn prevent_default(&mut self) {}
}

/// Options for [`compose_handlers_with`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComposeOptions {
    /// When `true` (the default), the internal handler is skipped if the
    /// caller handler suppressed the event's default behavior.
    pub check_for_default_prevented: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            check_for_default_prevented: true,
        }
    }
}

/// Compose a caller handler and an internal handler with default options.
///
/// Equivalent to [`compose_handlers_with`] with
/// [`ComposeOptions::default()`]: the caller runs first, and the internal
/// handler is skipped when the caller suppressed the default behavior.
///
/// Either side may be absent; the composed handler then simply runs the
/// other.
///
/// ```rust
/// use core::cell::RefCell;
/// use trellis_events::{Key, KeyEvent, compose_handlers};
///
/// let order: RefCell<Vec<&str>> = RefCell::new(Vec::new());
/// let mut caller = |_: &mut KeyEvent| order.borrow_mut().push("caller");
/// let mut internal = |_: &mut KeyEvent| order.borrow_mut().push("internal");
///
/// let mut ev = KeyEvent::new(Key::Space, 0);
/// compose_handlers(Some(&mut caller), Some(&mut internal))(&mut ev);
/// assert_eq!(order.into_inner(), vec!["caller", "internal"]);
/// ```
pub fn compose_handlers<'a, 'b, E: Preventable>(
    original: Option<&'a mut dyn FnMut(&mut E)>,
    ours: Option<&'b mut dyn FnMut(&mut E)>,
) -> impl FnMut(&mut E) + use<'a, 'b, E> {
    compose_handlers_with(original, ours, ComposeOptions::default())
}

/// Compose a caller handler and an internal handler.
///
/// The returned handler:
///
/// 1. Invokes `original` first, if present. Side effects run; this is where
///    the caller may call [`Preventable::prevent_default`].
/// 2. Invokes `ours` if `options.check_for_default_prevented` is `false`, or
///    if the event's default-prevented flag is `false`.
/// 3. Otherwise skips `ours`.
///
/// The flag is read after `original` ran, so both a flag set by the caller
/// handler and a flag already set on the incoming event suppress the internal
/// handler.
pub fn compose_handlers_with<'a, 'b, E: Preventable>(
    mut original: Option<&'a mut dyn FnMut(&mut E)>,
    mut ours: Option<&'b mut dyn FnMut(&mut E)>,
    options: ComposeOptions,
) -> impl FnMut(&mut E) + use<'a, 'b, E> {
    move |event| {
        if let Some(f) = original.as_mut() {
            f(event);
        }
        if (!options.check_for_default_prevented || !event.default_prevented())
            && let Some(g) = ours.as_mut()
        {
            g(event);
        }
    }
}

/// Run `caller` in composed position and report whether an internal handler
/// would have run after it.
///
/// For transitions whose internal handler has no per-event logic of its own
/// (close on outside press, dismiss on blur), all that matters is whether
/// the caller let the event through. This composes `caller` in front of a
/// marker and returns the marker's verdict.
pub fn caller_allows<E: Preventable>(
    caller: Option<&mut dyn FnMut(&mut E)>,
    event: &mut E,
) -> bool {
    let mut allowed = false;
    let mut ours = |_: &mut E| allowed = true;
    compose_handlers(caller, Some(&mut ours))(event);
    allowed
}
