// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tooltip open/close machine driven by trigger events and host
//! timestamps.

use trellis_events::{
    FocusEvent, Key, KeyEvent, PointerEvent, PointerKind, caller_allows, compose_handlers,
};

use crate::provider::{TooltipConfig, TooltipWarmup};

/// Open/close state machine for one tooltip.
///
/// Hover opens wait out the open delay: a pointer move over the trigger arms
/// a deadline, the host polls with [`TooltipState::poll`] when it passes, and
/// [`TooltipState::pending_deadline`] tells the host when to wake up. While
/// the shared [`TooltipWarmup`] is warm the delay is skipped and the move
/// opens immediately. Keyboard focus always opens immediately, and a press
/// on the trigger closes (a tooltip over a pressed control hides what the
/// press did).
///
/// The open flag is either *uncontrolled* (owned by this machine) or
/// *controlled* (owned by the host); entry points report a requested change
/// as `Some(next_open)` and controlled machines wait for the host to write
/// it back through [`TooltipState::sync_open`].
///
/// The machine never reads a clock; every entry point takes its time from
/// the event or from an explicit `now`.
#[derive(Clone, Debug)]
pub struct TooltipState {
    open: bool,
    controlled: bool,
    delay_ms: u64,
    open_deadline: Option<u64>,
    hover_opened: bool,
    pointer_down: bool,
    opened_after_delay: bool,
}

impl TooltipState {
    /// A closed, uncontrolled tooltip using `config`'s open delay.
    pub fn new(config: &TooltipConfig) -> Self {
        Self {
            open: false,
            controlled: false,
            delay_ms: config.open_delay_ms,
            open_deadline: None,
            hover_opened: false,
            pointer_down: false,
            opened_after_delay: false,
        }
    }

    /// A controlled tooltip mirroring a host-owned open value.
    pub fn controlled(config: &TooltipConfig, open: bool) -> Self {
        Self {
            open,
            controlled: true,
            ..Self::new(config)
        }
    }

    /// Seed an uncontrolled tooltip with an initial open value.
    pub fn with_default_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Override the open delay for this tooltip alone.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Whether the tooltip is open (the last synced value when controlled).
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the open flag is host-owned.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Whether the last open waited out the delay.
    ///
    /// Hosts that animate delayed and instant opens differently read this
    /// while the tooltip is open.
    pub fn opened_after_delay(&self) -> bool {
        self.opened_after_delay
    }

    /// The armed open deadline, if a hover open is pending.
    ///
    /// Hosts schedule a wakeup for this time and call
    /// [`TooltipState::poll`].
    pub fn pending_deadline(&self) -> Option<u64> {
        self.open_deadline
    }

    /// Write the host-owned open value back into the machine.
    pub fn sync_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Process a pointer move over the trigger.
    ///
    /// The first move of a hover opens immediately when `warmup` is warm and
    /// arms the open deadline otherwise; later moves of the same hover do
    /// nothing until [`TooltipState::pointer_leave`] resets it. Touch
    /// contacts never hover (a finger resting on a control is a press, not
    /// curiosity), pens do.
    ///
    /// # Returns
    /// `Some(next_open)` if the open flag should change, `None` otherwise.
    pub fn pointer_move(
        &mut self,
        warmup: &mut TooltipWarmup,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) -> Option<bool> {
        let hovered = self.hover_opened;
        let mut entered = false;
        let mut ours = |ev: &mut PointerEvent| {
            if ev.kind != PointerKind::Touch && !hovered {
                entered = true;
            }
        };
        compose_handlers(caller, Some(&mut ours))(event);
        if !entered {
            return None;
        }
        self.hover_opened = true;
        if warmup.is_warm(event.time) {
            self.open_now(warmup, false)
        } else {
            self.open_deadline = Some(event.time + self.delay_ms);
            None
        }
    }

    /// Process the pointer leaving the trigger.
    ///
    /// Cancels a pending open, closes an open tooltip, and lets the next
    /// move over the trigger start a fresh hover.
    pub fn pointer_leave(
        &mut self,
        warmup: &mut TooltipWarmup,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) -> Option<bool> {
        if caller_allows(caller, event) {
            self.hover_opened = false;
            self.close_now(warmup, event.time)
        } else {
            None
        }
    }

    /// Process the trigger receiving keyboard focus.
    ///
    /// Opens immediately, unless the focus arrived from a pointer press
    /// still in progress.
    pub fn focus(
        &mut self,
        warmup: &mut TooltipWarmup,
        caller: Option<&mut dyn FnMut(&mut FocusEvent)>,
        event: &mut FocusEvent,
    ) -> Option<bool> {
        let pressed = self.pointer_down;
        let mut opened = false;
        let mut ours = |_: &mut FocusEvent| {
            if !pressed {
                opened = true;
            }
        };
        compose_handlers(caller, Some(&mut ours))(event);
        if opened { self.open_now(warmup, false) } else { None }
    }

    /// Process the trigger losing keyboard focus.
    pub fn blur(
        &mut self,
        warmup: &mut TooltipWarmup,
        caller: Option<&mut dyn FnMut(&mut FocusEvent)>,
        event: &mut FocusEvent,
    ) -> Option<bool> {
        if caller_allows(caller, event) {
            self.close_now(warmup, event.time)
        } else {
            None
        }
    }

    /// Process a pointer press on the trigger.
    ///
    /// Closes an open tooltip, cancels a pending open, and suppresses the
    /// focus-opens behavior until [`TooltipState::pointer_up`].
    pub fn pointer_down(
        &mut self,
        warmup: &mut TooltipWarmup,
        caller: Option<&mut dyn FnMut(&mut PointerEvent)>,
        event: &mut PointerEvent,
    ) -> Option<bool> {
        if caller_allows(caller, event) {
            self.pointer_down = true;
            self.close_now(warmup, event.time)
        } else {
            None
        }
    }

    /// Note the press ended.
    ///
    /// Hosts route this from wherever the release lands, not just the
    /// trigger; until it arrives, focus does not open the tooltip.
    pub fn pointer_up(&mut self) {
        self.pointer_down = false;
    }

    /// Process Escape pressed while the tooltip shows.
    ///
    /// Closes the tooltip and consumes the key unless the caller handler
    /// prevented the default behavior first.
    pub fn escape_key_down(
        &mut self,
        warmup: &mut TooltipWarmup,
        caller: Option<&mut dyn FnMut(&mut KeyEvent)>,
        event: &mut KeyEvent,
    ) -> Option<bool> {
        let mut dismissed = false;
        let mut ours = |ev: &mut KeyEvent| {
            if ev.key == Key::Escape {
                ev.prevent_default();
                dismissed = true;
            }
        };
        compose_handlers(caller, Some(&mut ours))(event);
        if dismissed {
            self.close_now(warmup, event.time)
        } else {
            None
        }
    }

    /// Check the armed open deadline against the current time.
    ///
    /// # Returns
    /// `Some(true)` if the delay elapsed and the tooltip should open,
    /// `None` otherwise.
    pub fn poll(&mut self, warmup: &mut TooltipWarmup, now: u64) -> Option<bool> {
        if let Some(deadline) = self.open_deadline
            && now >= deadline
        {
            self.open_now(warmup, true)
        } else {
            None
        }
    }

    /// Close because some other tooltip opened, or the trigger scrolled
    /// away.
    ///
    /// Hosts keeping one tooltip visible at a time call this on the old one
    /// when a new one opens.
    pub fn dismiss(&mut self, warmup: &mut TooltipWarmup, now: u64) -> Option<bool> {
        self.close_now(warmup, now)
    }

    fn open_now(&mut self, warmup: &mut TooltipWarmup, delayed: bool) -> Option<bool> {
        self.open_deadline = None;
        let changed = self.request_open(true);
        if changed.is_some() {
            self.opened_after_delay = delayed;
            warmup.note_open();
        }
        changed
    }

    fn close_now(&mut self, warmup: &mut TooltipWarmup, now: u64) -> Option<bool> {
        self.open_deadline = None;
        let changed = self.request_open(false);
        if changed.is_some() {
            warmup.note_close(now);
        }
        changed
    }

    fn request_open(&mut self, open: bool) -> Option<bool> {
        if self.open == open {
            return None;
        }
        if !self.controlled {
            self.open = open;
        }
        Some(open)
    }
}

impl Default for TooltipState {
    fn default() -> Self {
        Self::new(&TooltipConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn fixture() -> (TooltipState, TooltipWarmup) {
        let config = TooltipConfig::default();
        (TooltipState::new(&config), TooltipWarmup::from_config(&config))
    }

    fn hover(time: u64) -> PointerEvent {
        PointerEvent::new(Point::new(12.0, 6.0), time)
    }

    #[test]
    fn hover_opens_after_the_delay() {
        let (mut tip, mut warmup) = fixture();

        assert_eq!(tip.pointer_move(&mut warmup, None, &mut hover(0)), None);
        assert_eq!(tip.pending_deadline(), Some(700));

        assert_eq!(tip.poll(&mut warmup, 699), None);
        assert!(!tip.is_open());

        assert_eq!(tip.poll(&mut warmup, 700), Some(true));
        assert!(tip.is_open());
        assert!(tip.opened_after_delay());
        assert_eq!(tip.pending_deadline(), None);
        assert!(warmup.is_warm(700));
    }

    #[test]
    fn repeated_moves_do_not_restart_the_timer() {
        let (mut tip, mut warmup) = fixture();

        tip.pointer_move(&mut warmup, None, &mut hover(0));
        tip.pointer_move(&mut warmup, None, &mut hover(400));
        assert_eq!(tip.pending_deadline(), Some(700));
    }

    #[test]
    fn leaving_cancels_the_pending_open() {
        let (mut tip, mut warmup) = fixture();

        tip.pointer_move(&mut warmup, None, &mut hover(0));
        assert_eq!(tip.pointer_leave(&mut warmup, None, &mut hover(100)), None);
        assert_eq!(tip.pending_deadline(), None);
        assert_eq!(tip.poll(&mut warmup, 700), None);
        assert!(!tip.is_open());
    }

    #[test]
    fn a_vetoed_move_leaves_the_next_move_live() {
        let (mut tip, mut warmup) = fixture();

        let mut caller = |ev: &mut PointerEvent| ev.prevent_default();
        assert_eq!(tip.pointer_move(&mut warmup, Some(&mut caller), &mut hover(0)), None);
        assert_eq!(tip.pending_deadline(), None);

        // The hover never started, so the next move still arms.
        assert_eq!(tip.pointer_move(&mut warmup, None, &mut hover(50)), None);
        assert_eq!(tip.pending_deadline(), Some(750));
    }

    #[test]
    fn a_recent_close_opens_the_next_instantly() {
        let config = TooltipConfig::default();
        let mut warmup = TooltipWarmup::from_config(&config);
        let mut first = TooltipState::new(&config);
        let mut second = TooltipState::new(&config);

        first.pointer_move(&mut warmup, None, &mut hover(0));
        assert_eq!(first.poll(&mut warmup, 700), Some(true));
        assert_eq!(first.pointer_leave(&mut warmup, None, &mut hover(1_000)), Some(false));

        // Within the skip window the second trigger opens on the first move.
        assert_eq!(second.pointer_move(&mut warmup, None, &mut hover(1_100)), Some(true));
        assert!(!second.opened_after_delay());
    }

    #[test]
    fn the_skip_window_expires() {
        let config = TooltipConfig::default();
        let mut warmup = TooltipWarmup::from_config(&config);
        let mut first = TooltipState::new(&config);
        let mut second = TooltipState::new(&config);

        first.pointer_move(&mut warmup, None, &mut hover(0));
        first.poll(&mut warmup, 700);
        first.pointer_leave(&mut warmup, None, &mut hover(1_000));

        assert_eq!(second.pointer_move(&mut warmup, None, &mut hover(1_300)), None);
        assert_eq!(second.pending_deadline(), Some(2_000));
    }

    #[test]
    fn focus_opens_immediately_and_blur_closes() {
        let (mut tip, mut warmup) = fixture();

        assert_eq!(tip.focus(&mut warmup, None, &mut FocusEvent::new(5)), Some(true));
        assert!(!tip.opened_after_delay());
        assert!(warmup.is_warm(5));

        assert_eq!(tip.blur(&mut warmup, None, &mut FocusEvent::new(50)), Some(false));
        assert!(warmup.is_warm(349));
        assert!(!warmup.is_warm(350));
    }

    #[test]
    fn focus_after_a_press_does_not_open() {
        let (mut tip, mut warmup) = fixture();

        tip.pointer_down(&mut warmup, None, &mut hover(10));
        assert_eq!(tip.focus(&mut warmup, None, &mut FocusEvent::new(20)), None);

        tip.pointer_up();
        assert_eq!(tip.focus(&mut warmup, None, &mut FocusEvent::new(30)), Some(true));
    }

    #[test]
    fn a_press_closes_and_cancels_the_pending_open() {
        let (mut tip, mut warmup) = fixture();

        tip.focus(&mut warmup, None, &mut FocusEvent::new(0));
        assert_eq!(tip.pointer_down(&mut warmup, None, &mut hover(100)), Some(false));

        let (mut tip, mut warmup) = fixture();
        tip.pointer_move(&mut warmup, None, &mut hover(0));
        assert_eq!(tip.pointer_down(&mut warmup, None, &mut hover(100)), None);
        assert_eq!(tip.pending_deadline(), None);
        assert_eq!(tip.poll(&mut warmup, 700), None);
    }

    #[test]
    fn escape_closes_unless_the_caller_prevents_it() {
        let (mut tip, mut warmup) = fixture();
        tip.focus(&mut warmup, None, &mut FocusEvent::new(0));

        let mut caller = |ev: &mut KeyEvent| ev.prevent_default();
        let mut esc = KeyEvent::new(Key::Escape, 5);
        assert_eq!(tip.escape_key_down(&mut warmup, Some(&mut caller), &mut esc), None);
        assert!(tip.is_open());

        let mut esc = KeyEvent::new(Key::Escape, 6);
        assert_eq!(tip.escape_key_down(&mut warmup, None, &mut esc), Some(false));
        assert!(esc.default_prevented);
        assert!(!tip.is_open());
    }

    #[test]
    fn touch_never_hovers_but_a_pen_does() {
        let (mut tip, mut warmup) = fixture();

        let mut touch = hover(0).with_kind(PointerKind::Touch);
        assert_eq!(tip.pointer_move(&mut warmup, None, &mut touch), None);
        assert_eq!(tip.pending_deadline(), None);

        let mut pen = hover(10).with_kind(PointerKind::Pen);
        assert_eq!(tip.pointer_move(&mut warmup, None, &mut pen), None);
        assert_eq!(tip.pending_deadline(), Some(710));
    }

    #[test]
    fn dismissal_cools_the_warmup_even_while_another_stays_open() {
        let config = TooltipConfig::default();
        let mut warmup = TooltipWarmup::from_config(&config);
        let mut first = TooltipState::new(&config);
        let mut second = TooltipState::new(&config);

        first.focus(&mut warmup, None, &mut FocusEvent::new(0));
        second.focus(&mut warmup, None, &mut FocusEvent::new(50));
        assert_eq!(first.dismiss(&mut warmup, 50), Some(false));

        // The close started the cooling window no matter what else shows.
        assert!(second.is_open());
        assert!(!warmup.is_warm(350));
    }

    #[test]
    fn controlled_state_reports_without_applying() {
        let config = TooltipConfig::default();
        let mut warmup = TooltipWarmup::from_config(&config);
        let mut tip = TooltipState::controlled(&config, false);

        assert_eq!(tip.focus(&mut warmup, None, &mut FocusEvent::new(0)), Some(true));
        assert!(!tip.is_open());

        tip.sync_open(true);
        assert_eq!(tip.blur(&mut warmup, None, &mut FocusEvent::new(10)), Some(false));
        assert!(tip.is_open());
    }

    #[test]
    fn per_tooltip_delay_overrides_the_config() {
        let config = TooltipConfig::default();
        let mut warmup = TooltipWarmup::from_config(&config);
        let mut tip = TooltipState::new(&config).with_delay(150);

        tip.pointer_move(&mut warmup, None, &mut hover(0));
        assert_eq!(tip.pending_deadline(), Some(150));
        assert_eq!(tip.poll(&mut warmup, 150), Some(true));
    }
}
