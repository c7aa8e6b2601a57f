// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dialog's full lifecycle: trigger press, portal-mounted content, scoped
//! bundle reads, and the accessibility advisory.
//!
//! This example shows how to combine:
//! - `trellis_dialog` for the open/close machine and the published bundle,
//! - `trellis_element_tree` for deferred portal mounts at commit,
//! - `trellis_scope` for reading the bundle from the portaled content.
//!
//! Run:
//! - `RUST_LOG=warn cargo run -p trellis_demos --example dialog_portal`

use kurbo::Point;
use trellis_dialog::{
    DIALOG_PART_NAMES, DialogBundle, DialogContext, DialogState, warn_missing_description,
    warn_missing_title,
};
use trellis_element_tree::{ElementId, ElementTree};
use trellis_events::{FocusEvent, Key, KeyEvent, PointerEvent};
use trellis_scope::{ContextMap, ScopeRegistry};

fn main() {
    env_logger::init();

    // One registry for the whole app; one scope per dialog instance.
    let mut registry = ScopeRegistry::new();
    let dialog: DialogContext<ElementId> = DialogContext::register(&mut registry);
    let scope = dialog.create_scope(&mut registry);

    // A small document with the dialog declared inside the app content.
    let mut tree: ElementTree<&str> = ElementTree::new();
    let document = tree.insert(None, "document");
    let app = tree.insert(Some(document), "app");
    let root = tree.insert(Some(app), "dialog-root");
    let trigger = tree.insert(Some(root), "dialog-trigger");

    let mut state = DialogState::new();
    let mut map: ContextMap<ElementId> = ContextMap::new();
    map.provide(
        root,
        dialog.channel(),
        Some(&scope),
        DialogBundle::from_state(&state).with_trigger(trigger),
    );

    // Press the trigger.
    let mut press = PointerEvent::new(Point::new(32.0, 20.0), 0);
    if state.trigger_pointer_down(None, &mut press) == Some(true) {
        println!("trigger press opened the dialog");
    }

    // The content renders in a portal near the document root. Nothing is
    // attached until the host commits.
    let content = tree.defer_mount(root, None, "dialog-content");
    println!("content declared, attached = {}", tree.is_attached(content));

    let mounted = tree.commit();
    println!(
        "commit mounted {} element(s); content now sits under {:?}",
        mounted.len(),
        tree.parent_of(content).and_then(|p| tree.payload(p)),
    );

    // Republish the bundle so parts see the open state and the content id.
    map.provide(
        root,
        dialog.channel(),
        Some(&scope),
        DialogBundle::from_state(&state).with_trigger(trigger).with_content(content),
    );

    // The content reads through its declaring host, not its mounted parent,
    // so the scoped bundle resolves across the portal.
    let bundle = map.read("DialogContent", content, dialog.channel(), Some(&scope), &tree);
    println!("content sees open = {}, modal = {}", bundle.open, bundle.modal);

    // Opening moves focus into the content unless a caller handler took over.
    let mut focus_in = FocusEvent::new(5);
    if state.open_auto_focus(None, &mut focus_in) {
        println!("focus moves into {:?}", tree.payload(content));
    }

    // No title or description part was mounted; debug builds advise.
    warn_missing_title(DIALOG_PART_NAMES, false);
    warn_missing_description(DIALOG_PART_NAMES, false);

    // Escape closes, and the host tears the portal content down.
    let mut esc = KeyEvent::new(Key::Escape, 40);
    if state.escape_key_down(None, &mut esc) == Some(false) {
        tree.remove(content);
        map.provide(
            root,
            dialog.channel(),
            Some(&scope),
            DialogBundle::from_state(&state).with_trigger(trigger),
        );
        println!("escape closed the dialog; content alive = {}", tree.is_alive(content));
    }
}
