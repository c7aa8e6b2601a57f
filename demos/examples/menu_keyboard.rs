// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A context menu driven from the keyboard: collection-ordered items,
//! roving highlight, and typeahead.
//!
//! This example shows how to combine:
//! - `trellis_menu` for the open state, the highlight, and the search,
//! - `trellis_collection` + `trellis_element_tree` for document-ordered
//!   items,
//! - `trellis_focus` navigation intents.
//!
//! Run:
//! - `cargo run -p trellis_demos --example menu_keyboard`

use kurbo::Point;
use trellis_collection::Collection;
use trellis_element_tree::{ElementId, ElementTree};
use trellis_events::{BUTTON_SECONDARY, Key, KeyEvent, PointerEvent};
use trellis_focus::Navigation;
use trellis_menu::{
    ContextTrigger, ItemData, MenuState, candidates, is_context_click, typeahead_entries,
};

fn main() {
    let mut tree: ElementTree<&str> = ElementTree::new();
    let document = tree.insert(None, "document");

    let mut menu: MenuState<ElementId> = MenuState::new();
    let mut trigger = ContextTrigger::new();

    // Right-click somewhere on the page.
    let mut press = PointerEvent::new(Point::new(240.0, 120.0), 0).with_button(BUTTON_SECONDARY);
    if is_context_click(&press)
        && trigger.context_menu(&mut menu, None, &mut press) == Some(true)
    {
        println!("context menu opened at {:?}", menu.anchor());
    }

    // The host mounts the content and registers each item as it appears.
    let content = tree.insert(Some(document), "menu-content");
    let mut items: Collection<ElementId, ItemData> = Collection::new();
    items.set_root(content);
    for (label, disabled) in [
        ("Back", false),
        ("Forward", true),
        ("Reload", false),
        ("Bookmarks", false),
    ] {
        let id = tree.insert(Some(content), label);
        items.insert(id, ItemData::new(label).with_disabled(disabled));
    }

    let entries = items.entries_in_order(&tree);
    let nav = candidates(&entries);
    let corpus = typeahead_entries(&entries);

    // Focus enters the content: the highlight starts at the first enabled
    // item.
    let first = menu.entry(&nav);
    println!("entry highlights {:?}", first.and_then(|id| tree.payload(id)));

    // Arrow down skips the disabled Forward item.
    let next = menu.navigate(&nav, Navigation::Next);
    println!("arrow-down lands on {:?}", next.and_then(|id| tree.payload(id)));

    // Typing jumps by prefix, resuming after the highlight.
    let hit = menu.typeahead('b', 400, &corpus);
    println!("typing 'b' matches {:?}", hit.and_then(|id| tree.payload(id)));

    // Escape closes and the interaction state resets with it.
    let mut esc = KeyEvent::new(Key::Escape, 600);
    if menu.escape_key_down(None, &mut esc) == Some(false) {
        println!(
            "escape closed; highlight = {:?}, anchor = {:?}",
            menu.highlighted(),
            menu.anchor(),
        );
    }
}
