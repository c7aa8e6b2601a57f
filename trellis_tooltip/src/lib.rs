// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_tooltip --heading-base-level=0

//! Trellis Tooltip: delay and warmup machinery for tooltip parts.
//!
//! A tooltip labels a control when the pointer rests on it or keyboard
//! focus reaches it. This crate owns the timing policy; rendering and
//! positioning stay with the host:
//!
//! - [`TooltipConfig`] / [`TooltipContext`] — the delay configuration a
//!   provider publishes on its scope channel for the roots below it.
//! - [`TooltipWarmup`] — warm/cold state shared by every tooltip under one
//!   provider, so sweeping the pointer along a row of triggers skips the
//!   open delay after the first.
//! - [`TooltipState`] — the per-tooltip machine: hover opens after the
//!   delay, focus opens instantly, presses and Escape close. No timers
//!   inside; hosts poll with the timestamps they already have.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use trellis_events::PointerEvent;
//! use trellis_tooltip::{TooltipConfig, TooltipState, TooltipWarmup};
//!
//! let config = TooltipConfig::default();
//! let mut warmup = TooltipWarmup::from_config(&config);
//! let mut tip = TooltipState::new(&config);
//!
//! // A hover arms the open delay; the host polls once it passes.
//! let mut move_in = PointerEvent::new(Point::new(40.0, 12.0), 0);
//! assert_eq!(tip.pointer_move(&mut warmup, None, &mut move_in), None);
//! assert_eq!(tip.pending_deadline(), Some(700));
//! assert_eq!(tip.poll(&mut warmup, 700), Some(true));
//!
//! // Just after a close, the next trigger opens on the first move.
//! let mut leave = PointerEvent::new(Point::new(0.0, 0.0), 900);
//! assert_eq!(tip.pointer_leave(&mut warmup, None, &mut leave), Some(false));
//!
//! let mut sibling = TooltipState::new(&config);
//! let mut move_in = PointerEvent::new(Point::new(90.0, 12.0), 1_000);
//! assert_eq!(sibling.pointer_move(&mut warmup, None, &mut move_in), Some(true));
//! assert!(!sibling.opened_after_delay());
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod provider;
mod tooltip;

pub use provider::{TooltipConfig, TooltipContext, TooltipWarmup};
pub use tooltip::TooltipState;
