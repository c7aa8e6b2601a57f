// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Focus: roving focus over an ordered candidate list.
//!
//! Composite widgets (menus, toolbars, radio groups) hold a single tab stop
//! and move focus among their items with arrow keys. This crate models that
//! as a [`FocusGroup`] state machine over a snapshot of candidates in
//! document order — typically the result of a
//! `trellis_collection` query — plus a key-to-intent mapping that respects
//! widget orientation and reading direction.
//!
//! - **Navigation intents** ([`Navigation`]): next, previous, first, last.
//! - **Candidates** ([`Candidate`]): an id and a disabled flag; disabled
//!   candidates are skipped, never landed on.
//! - **Memory**: the group remembers the last focused item so tabbing back
//!   into the widget restores it ([`FocusGroup::entry`]).
//! - **Key mapping** ([`navigation_for_key`]): arrows along the widget's
//!   orientation, with left/right swapped under right-to-left reading, and
//!   Home/End jumping to the ends.
//!
//! ## Minimal example
//!
//! A vertical list with a disabled middle item:
//!
//! ```rust
//! use trellis_focus::{Candidate, FocusGroup, Navigation};
//!
//! let items = [
//!     Candidate { id: 1_u32, disabled: false },
//!     Candidate { id: 2, disabled: true },
//!     Candidate { id: 3, disabled: false },
//! ];
//!
//! let mut group = FocusGroup::new().with_wrap(true);
//!
//! // Entering the group lands on the first enabled item…
//! assert_eq!(group.navigate(&items, Navigation::Next), Some(1));
//! // …the disabled item is skipped…
//! assert_eq!(group.navigate(&items, Navigation::Next), Some(3));
//! // …and wrapping returns to the start.
//! assert_eq!(group.navigate(&items, Navigation::Next), Some(1));
//! ```
//!
//! The group is generic over the candidate identifier `K`, so callers can
//! use any small, copyable handle (an element id, an index, a custom key).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use trellis_direction::Direction;
use trellis_events::Key;

/// Direction of roving-focus navigation within a group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next enabled candidate in document order.
    Next,
    /// Move to the previous enabled candidate in document order.
    Prev,
    /// Move to the first enabled candidate.
    First,
    /// Move to the last enabled candidate.
    Last,
}

/// Axis along which a composite widget lays out its items.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Items flow along the reading direction; left/right arrows navigate.
    Horizontal,
    /// Items are stacked; up/down arrows navigate.
    Vertical,
}

/// One focusable candidate, in document order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Candidate<K> {
    /// Identifier for this candidate.
    pub id: K,
    /// Disabled candidates stay in the list (they occupy a position) but are
    /// skipped by navigation.
    pub disabled: bool,
}

/// Roving focus state for one composite widget.
///
/// The group does not own its candidate list; every operation takes a fresh
/// snapshot in document order, so items may mount, unmount, or move between
/// calls without any registration protocol.
#[derive(Clone, Debug)]
pub struct FocusGroup<K> {
    current: Option<K>,
    wrap: bool,
}

impl<K> Default for FocusGroup<K> {
    fn default() -> Self {
        Self {
            current: None,
            wrap: false,
        }
    }
}

impl<K: Copy + Eq> FocusGroup<K> {
    /// Create a group with wrapping disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether navigation wraps past the ends.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// The item currently holding the group's tab stop, if any.
    ///
    /// This persists while focus is elsewhere; it is the memory
    /// [`entry`](Self::entry) restores.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Record that `id` was focused directly (for example by pointer).
    pub fn focus(&mut self, id: K) {
        self.current = Some(id);
    }

    /// Forget the remembered item; the next [`entry`](Self::entry) starts
    /// over from the first enabled candidate.
    pub fn blur(&mut self) {
        self.current = None;
    }

    /// Where focus lands when the group is entered from outside.
    ///
    /// The remembered item wins if it is still present and enabled;
    /// otherwise the first enabled candidate. Returns `None` (and keeps the
    /// memory) when every candidate is disabled or the list is empty.
    pub fn entry(&mut self, candidates: &[Candidate<K>]) -> Option<K> {
        let id = self
            .current
            .filter(|cur| candidates.iter().any(|c| c.id == *cur && !c.disabled))
            .or_else(|| candidates.iter().find(|c| !c.disabled).map(|c| c.id));
        if let Some(id) = id {
            self.current = Some(id);
        }
        id
    }

    /// Apply a navigation intent over `candidates`, in their given order.
    ///
    /// Returns the newly focused id and remembers it. Returns `None` without
    /// moving when there is nowhere to go: no enabled candidates, or an edge
    /// reached with wrapping off. With no current item (or one that is gone
    /// or disabled), [`Navigation::Next`] starts at the first enabled
    /// candidate and [`Navigation::Prev`] at the last.
    pub fn navigate(&mut self, candidates: &[Candidate<K>], nav: Navigation) -> Option<K> {
        let enabled: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter_map(|(i, c)| (!c.disabled).then_some(i))
            .collect();
        if enabled.is_empty() {
            return None;
        }
        let pos = self
            .current
            .and_then(|cur| enabled.iter().position(|&i| candidates[i].id == cur));

        let target = match nav {
            Navigation::First => Some(0),
            Navigation::Last => Some(enabled.len() - 1),
            Navigation::Next => match pos {
                Some(p) if p + 1 < enabled.len() => Some(p + 1),
                Some(_) if self.wrap => Some(0),
                Some(_) => None,
                None => Some(0),
            },
            Navigation::Prev => match pos {
                Some(p) if p > 0 => Some(p - 1),
                Some(_) if self.wrap => Some(enabled.len() - 1),
                Some(_) => None,
                None => Some(enabled.len() - 1),
            },
        };

        let id = target.map(|t| candidates[enabled[t]].id);
        if let Some(id) = id {
            self.current = Some(id);
        }
        id
    }
}

/// Map a key press to a navigation intent for a group with the given
/// orientation and reading direction.
///
/// Arrows across the orientation are not focus navigation (a horizontal
/// toolbar leaves up/down to the page; a vertical menu leaves left/right to
/// submenus) and map to `None`. Under [`Direction::Rtl`], left and right
/// swap meaning so "next" always follows the reading direction.
pub fn navigation_for_key(
    key: Key,
    orientation: Orientation,
    direction: Direction,
) -> Option<Navigation> {
    match key {
        Key::Home => Some(Navigation::First),
        Key::End => Some(Navigation::Last),
        Key::ArrowRight if orientation == Orientation::Horizontal => Some(if direction.is_rtl() {
            Navigation::Prev
        } else {
            Navigation::Next
        }),
        Key::ArrowLeft if orientation == Orientation::Horizontal => Some(if direction.is_rtl() {
            Navigation::Next
        } else {
            Navigation::Prev
        }),
        Key::ArrowDown if orientation == Orientation::Vertical => Some(Navigation::Next),
        Key::ArrowUp if orientation == Orientation::Vertical => Some(Navigation::Prev),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(flags: &[bool]) -> Vec<Candidate<u32>> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &disabled)| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "test fixtures are tiny"
                )]
                let id = i as u32;
                Candidate { id, disabled }
            })
            .collect()
    }

    #[test]
    fn skips_disabled_candidates() {
        let items = items(&[false, true, false, true, false]);
        let mut group = FocusGroup::new();

        assert_eq!(group.navigate(&items, Navigation::Next), Some(0));
        assert_eq!(group.navigate(&items, Navigation::Next), Some(2));
        assert_eq!(group.navigate(&items, Navigation::Next), Some(4));
        assert_eq!(group.navigate(&items, Navigation::Prev), Some(2));
    }

    #[test]
    fn stops_at_edges_without_wrap() {
        let items = items(&[false, false]);
        let mut group = FocusGroup::new();

        assert_eq!(group.navigate(&items, Navigation::Last), Some(1));
        assert_eq!(group.navigate(&items, Navigation::Next), None);
        // The failed move does not lose the current item.
        assert_eq!(group.current(), Some(1));
    }

    #[test]
    fn wraps_past_edges_when_enabled() {
        let items = items(&[false, true, false]);
        let mut group = FocusGroup::new().with_wrap(true);

        assert_eq!(group.navigate(&items, Navigation::Last), Some(2));
        assert_eq!(group.navigate(&items, Navigation::Next), Some(0));
        assert_eq!(group.navigate(&items, Navigation::Prev), Some(2));
    }

    #[test]
    fn first_and_last_ignore_the_current_item() {
        let items = items(&[true, false, false, true]);
        let mut group = FocusGroup::new();

        assert_eq!(group.navigate(&items, Navigation::First), Some(1));
        assert_eq!(group.navigate(&items, Navigation::Last), Some(2));
    }

    #[test]
    fn prev_from_nothing_starts_at_the_end() {
        let items = items(&[false, false, false]);
        let mut group = FocusGroup::new();
        assert_eq!(group.navigate(&items, Navigation::Prev), Some(2));
    }

    #[test]
    fn all_disabled_yields_nowhere_to_go() {
        let items = items(&[true, true]);
        let mut group: FocusGroup<u32> = FocusGroup::new();
        assert_eq!(group.navigate(&items, Navigation::Next), None);
        assert_eq!(group.entry(&items), None);
        assert_eq!(group.navigate(&[], Navigation::Next), None);
    }

    #[test]
    fn entry_restores_the_remembered_item() {
        let items = items(&[false, false, false]);
        let mut group = FocusGroup::new();

        group.focus(1);
        assert_eq!(group.entry(&items), Some(1));

        // A remembered item that is now disabled falls back to the first
        // enabled one.
        let changed = [
            Candidate { id: 0_u32, disabled: false },
            Candidate { id: 1, disabled: true },
            Candidate { id: 2, disabled: false },
        ];
        assert_eq!(group.entry(&changed), Some(0));
        assert_eq!(group.current(), Some(0));
    }

    #[test]
    fn navigation_resumes_from_a_pointer_focus() {
        let items = items(&[false, false, false]);
        let mut group = FocusGroup::new();

        group.focus(1);
        assert_eq!(group.navigate(&items, Navigation::Next), Some(2));
    }

    #[test]
    fn blur_forgets_the_remembered_item() {
        let items = items(&[false, false, false]);
        let mut group = FocusGroup::new();

        group.focus(2);
        group.blur();
        assert_eq!(group.current(), None);
        assert_eq!(group.entry(&items), Some(0));
    }

    #[test]
    fn horizontal_arrows_follow_reading_direction() {
        use Orientation::Horizontal;

        assert_eq!(
            navigation_for_key(Key::ArrowRight, Horizontal, Direction::Ltr),
            Some(Navigation::Next)
        );
        assert_eq!(
            navigation_for_key(Key::ArrowRight, Horizontal, Direction::Rtl),
            Some(Navigation::Prev)
        );
        assert_eq!(
            navigation_for_key(Key::ArrowLeft, Horizontal, Direction::Rtl),
            Some(Navigation::Next)
        );
        assert_eq!(
            navigation_for_key(Key::ArrowUp, Horizontal, Direction::Ltr),
            None
        );
    }

    #[test]
    fn vertical_groups_ignore_horizontal_arrows() {
        use Orientation::Vertical;

        assert_eq!(
            navigation_for_key(Key::ArrowDown, Vertical, Direction::Ltr),
            Some(Navigation::Next)
        );
        assert_eq!(
            navigation_for_key(Key::ArrowUp, Vertical, Direction::Rtl),
            Some(Navigation::Prev)
        );
        assert_eq!(
            navigation_for_key(Key::ArrowLeft, Vertical, Direction::Ltr),
            None
        );
    }

    #[test]
    fn home_and_end_work_in_any_orientation() {
        assert_eq!(
            navigation_for_key(Key::Home, Orientation::Horizontal, Direction::Rtl),
            Some(Navigation::First)
        );
        assert_eq!(
            navigation_for_key(Key::End, Orientation::Vertical, Direction::Ltr),
            Some(Navigation::Last)
        );
        assert_eq!(
            navigation_for_key(Key::Enter, Orientation::Vertical, Direction::Ltr),
            None
        );
    }
}
