// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Events: the shared event vocabulary for compound UI parts.
//!
//! Compound components (Root/Trigger/Content/...) receive two handlers for the
//! same interaction: one supplied by the consuming application and one that
//! drives the part's internal behavior (open a menu, toggle a dialog, move a
//! highlight). This crate provides:
//!
//! - **Handler composition** ([`compose_handlers`]): merge both handlers into
//!   one, running the caller's handler first and skipping the internal one
//!   when the caller prevented the default behavior.
//! - **Event payloads** ([`PointerEvent`], [`KeyEvent`], [`FocusEvent`]) with
//!   positions in [`kurbo::Point`], host-supplied millisecond timestamps, and
//!   a `default_prevented` flag.
//! - The [`Preventable`] trait, which lets composition work over any event
//!   type; types without a real flag report `false` and are never skipped.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::cell::RefCell;
//! use trellis_events::{Key, KeyEvent, compose_handlers};
//!
//! let log: RefCell<Vec<&str>> = RefCell::new(Vec::new());
//!
//! let mut caller = |ev: &mut KeyEvent| {
//!     log.borrow_mut().push("caller");
//!     // The application decides this key press is handled.
//!     ev.prevent_default();
//! };
//! let mut internal = |_: &mut KeyEvent| log.borrow_mut().push("internal");
//!
//! let mut ev = KeyEvent::new(Key::Enter, 0);
//! compose_handlers(Some(&mut caller), Some(&mut internal))(&mut ev);
//!
//! // The internal transition was suppressed by the caller.
//! assert_eq!(log.into_inner(), vec!["caller"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compose;
mod types;

pub use compose::{
    ComposeOptions, Preventable, caller_allows, compose_handlers, compose_handlers_with,
};
pub use types::{
    BUTTON_AUXILIARY, BUTTON_MAIN, BUTTON_SECONDARY, Button, FocusEvent, Key, KeyEvent, Modifiers,
    PointerEvent, PointerKind,
};
