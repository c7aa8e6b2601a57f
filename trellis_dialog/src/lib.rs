// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_dialog --heading-base-level=0

//! Trellis Dialog: open/close machinery for dialog and alert-dialog parts.
//!
//! A dialog is a window overlaid on the primary content. This crate owns the
//! state and policy; rendering, focus trapping, and portal placement stay
//! with the host:
//!
//! - [`DialogState`] — the per-instance open/close machine, uncontrolled or
//!   controlled, with composed event entry points for the trigger, the
//!   content's dismissal interactions, and close parts.
//! - [`DialogContext`] / [`DialogBundle`] — the scope channel a dialog root
//!   publishes its snapshot on, parameterized per instance by a
//!   [`trellis_scope::ScopeHandle`].
//! - [`AlertDialogState`] / [`AlertDialogContext`] — the alert extension:
//!   always modal, outside interactions refused, opening focus redirected to
//!   the cancel part published on the content channel.
//! - [`warn_missing_title`] / [`warn_missing_description`] — debug-build
//!   accessibility advisories emitted through the `log` facade.
//!
//! Dialog content is typically portal-mounted near the document root; pair
//! this crate with an element tree that defers those mounts to its commit.
//!
//! ## Example
//!
//! ```rust
//! use trellis_dialog::{DialogBundle, DialogContext, DialogState};
//! use trellis_events::{Key, KeyEvent};
//! use trellis_scope::{ContextMap, NoParents, ScopeRegistry};
//!
//! let mut registry = ScopeRegistry::new();
//! let dialog: DialogContext<u32> = DialogContext::register(&mut registry);
//! let scope = dialog.create_scope(&mut registry);
//!
//! // Enter on the trigger opens the dialog.
//! let mut state = DialogState::new();
//! let mut enter = KeyEvent::new(Key::Enter, 0);
//! assert_eq!(state.trigger_key_down(None, &mut enter), Some(true));
//!
//! // The root publishes a snapshot for parts to read.
//! let mut map: ContextMap<u32> = ContextMap::new();
//! let snapshot = DialogBundle::from_state(&state).with_content(8);
//! map.provide(7, dialog.channel(), Some(&scope), snapshot);
//!
//! let bundle = map.read("DialogContent", 7, dialog.channel(), Some(&scope), &NoParents);
//! assert!(bundle.open);
//! assert_eq!(bundle.content, Some(8));
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod alert;
mod dialog;

pub use alert::{ALERT_DIALOG_PART_NAMES, AlertContentBundle, AlertDialogContext, AlertDialogState};
pub use dialog::{
    DIALOG_PART_NAMES, DialogBundle, DialogContext, DialogState, PartNames,
    warn_missing_description, warn_missing_title,
};
