// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_menu --heading-base-level=0

//! Trellis Menu: state machines for dropdown and context menus.
//!
//! A menu is a popup list of actions with a roving highlight. This crate
//! owns the state and policy; rendering, positioning, and focus movement
//! stay with the host:
//!
//! - [`MenuState`] — the per-instance machine: open flag (uncontrolled or
//!   controlled), anchor point, roving highlight, typeahead search, and
//!   composed entry points for dismissal and item selection.
//! - [`ItemData`] — the payload items register in a
//!   `trellis_collection::Collection`, with [`candidates`] and
//!   [`typeahead_entries`] mapping a document-ordered query onto the
//!   highlight and the typeahead.
//! - [`Typeahead`] — incremental text search with a one second window and
//!   repeated-character cycling, driven by host timestamps.
//! - [`DropdownTrigger`] / [`ContextTrigger`] — the two trigger machines: a
//!   button that toggles, and a position-taking gesture with a touch/pen
//!   long press.
//! - [`MenuContext`] / [`MenuBundle`] — the scope channel a menu root
//!   publishes its snapshot on, parameterized per instance by a
//!   [`trellis_scope::ScopeHandle`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use trellis_events::{BUTTON_SECONDARY, PointerEvent};
//! use trellis_menu::{ContextTrigger, ItemData, MenuState, candidates, is_context_click};
//!
//! let mut menu: MenuState<u32> = MenuState::new();
//! let mut trigger = ContextTrigger::new();
//!
//! // A right click opens the menu at the pointer.
//! let mut gesture =
//!     PointerEvent::new(Point::new(160.0, 80.0), 0).with_button(BUTTON_SECONDARY);
//! assert!(is_context_click(&gesture));
//! assert_eq!(trigger.context_menu(&mut menu, None, &mut gesture), Some(true));
//! assert_eq!(menu.anchor(), Some(Point::new(160.0, 80.0)));
//!
//! // Collected items feed the highlight; typing walks matching items.
//! let back = ItemData::new("Back");
//! let reload = ItemData::new("Reload");
//! let entries = [(1_u32, &back), (2, &reload)];
//! let items = candidates(&entries);
//! assert_eq!(menu.entry(&items), Some(1));
//! assert_eq!(menu.typeahead('r', 10, &[(1, "Back"), (2, "Reload")]), Some(2));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod state;
mod trigger;
mod typeahead;

pub use state::{ItemData, MenuBundle, MenuContext, MenuState, candidates, typeahead_entries};
pub use trigger::{ContextTrigger, DropdownTrigger, is_context_click};
pub use typeahead::Typeahead;
