// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two tooltips sharing one warmup: the first waits for the open delay, the
//! next opens instantly while the provider is still warm.
//!
//! This example shows how to combine:
//! - `trellis_tooltip` state machines with a shared [`TooltipWarmup`],
//! - host-driven timers via `pending_deadline` and `poll`,
//! - pointer, focus, and keyboard triggers on the same tooltip.
//!
//! Run:
//! - `cargo run -p trellis_demos --example tooltip_warmup`

use kurbo::Point;
use trellis_events::{FocusEvent, Key, KeyEvent, PointerEvent};
use trellis_tooltip::{TooltipConfig, TooltipState, TooltipWarmup};

fn main() {
    let config = TooltipConfig::default();
    let mut warmup = TooltipWarmup::from_config(&config);
    let mut bold = TooltipState::new(&config);
    let mut italic = TooltipState::new(&config);

    // Rest the pointer on the Bold button; the first move arms the delay.
    let mut enter = PointerEvent::new(Point::new(40.0, 12.0), 0);
    bold.pointer_move(&mut warmup, None, &mut enter);
    println!("hovering Bold, tooltip due at {:?} ms", bold.pending_deadline());

    // The host wakes up at the deadline.
    if bold.poll(&mut warmup, 700) == Some(true) {
        println!("Bold opened after its delay = {}", bold.opened_after_delay());
    }

    // Sweep over to Italic: closing Bold starts the skip window.
    let mut leave = PointerEvent::new(Point::new(70.0, 12.0), 900);
    bold.pointer_leave(&mut warmup, None, &mut leave);
    println!("left Bold at 900 ms; warm at 1000 ms = {}", warmup.is_warm(1_000));

    let mut enter = PointerEvent::new(Point::new(90.0, 12.0), 1_000);
    if italic.pointer_move(&mut warmup, None, &mut enter) == Some(true) {
        println!("Italic opened instantly, delayed = {}", italic.opened_after_delay());
    }

    // A press hides the tooltip so it does not sit over the click.
    let mut press = PointerEvent::new(Point::new(90.0, 12.0), 1_500);
    if italic.pointer_down(&mut warmup, None, &mut press) == Some(false) {
        println!("pressing Italic closed its tooltip");
    }
    italic.pointer_up();

    // Much later the provider has gone cold, but keyboard focus never waits.
    println!("warm at 5000 ms = {}", warmup.is_warm(5_000));
    let mut focus = FocusEvent::new(5_000);
    if bold.focus(&mut warmup, None, &mut focus) == Some(true) {
        println!("focusing Bold opened it, delayed = {}", bold.opened_after_delay());
    }

    // Escape dismisses from the keyboard.
    let mut esc = KeyEvent::new(Key::Escape, 5_200);
    if bold.escape_key_down(&mut warmup, None, &mut esc) == Some(false) {
        println!("escape closed the Bold tooltip");
    }
}
