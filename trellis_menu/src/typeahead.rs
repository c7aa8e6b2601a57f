// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead matching over a menu's visible item text.

use alloc::string::String;

/// Incremental text search over an open menu's items.
///
/// Characters typed within one second of each other accumulate into a
/// search buffer and the first item whose text starts with the buffer is
/// highlighted. A pause of [`Typeahead::WINDOW_MS`] or longer starts a fresh
/// search. Timing uses host-supplied millisecond timestamps; the machine
/// never reads a clock.
///
/// Repeating a single character cycles: `"aaa"` matches as `"a"` while
/// stepping past the current item, so tapping a letter walks every item
/// starting with it.
#[derive(Clone, Debug, Default)]
pub struct Typeahead {
    buffer: String,
    deadline: u64,
}

impl Typeahead {
    /// Pause, in milliseconds, after which the search buffer resets.
    pub const WINDOW_MS: u64 = 1000;

    /// Create an empty search.
    pub fn new() -> Self {
        Self::default()
    }

    /// The text accumulated so far.
    pub fn search(&self) -> &str {
        &self.buffer
    }

    /// Drop any accumulated text, as when the menu closes.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.deadline = 0;
    }

    /// Feed one typed character and return the item to highlight.
    ///
    /// # Arguments
    ///
    /// * `ch` - The printable character typed.
    /// * `now` - Timestamp of the key press, in milliseconds.
    /// * `items` - Enabled items with their text, in document order.
    /// * `current` - The currently highlighted item, if any.
    ///
    /// # Returns
    ///
    /// The first matching item after `current` in wrapped document order,
    /// or `None` when nothing new matches. Matching is case-insensitive
    /// prefix matching; a multi-character buffer keeps matching the current
    /// item so typing a longer word refines in place rather than jumping.
    pub fn on_character<K: Copy + Eq>(
        &mut self,
        ch: char,
        now: u64,
        items: &[(K, &str)],
        current: Option<K>,
    ) -> Option<K> {
        if now >= self.deadline {
            self.buffer.clear();
        }
        self.buffer.push(ch);
        self.deadline = now + Self::WINDOW_MS;
        next_match(items, &self.buffer, current)
    }
}

/// Find the item whose text the search should land on.
///
/// Candidates are considered starting at `current` and wrapping around, so
/// repeated searches walk forward through the list. A one-character search
/// (including a repeated character collapsed to one) skips `current` itself;
/// longer searches may stay on it. Returns `None` rather than re-reporting
/// `current`.
fn next_match<K: Copy + Eq>(items: &[(K, &str)], search: &str, current: Option<K>) -> Option<K> {
    let first = search.chars().next()?;
    let multi = search.chars().nth(1).is_some();
    let repeated = multi && search.chars().all(|c| c == first);
    let needle: String = if repeated {
        first.to_lowercase().collect()
    } else {
        search.to_lowercase()
    };

    let start = current
        .and_then(|cur| items.iter().position(|(id, _)| *id == cur))
        .unwrap_or(0);
    let exclude_current = repeated || !multi;

    let hit = (0..items.len())
        .map(|offset| &items[(start + offset) % items.len()])
        .filter(|(id, _)| !(exclude_current && Some(*id) == current))
        .find(|(_, text)| text.to_lowercase().starts_with(needle.as_str()))
        .map(|(id, _)| *id);
    hit.filter(|id| Some(*id) != current)
}
