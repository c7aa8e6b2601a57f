// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Provider-level tooltip state: delay configuration and shared warmup.

use trellis_scope::{Channel, FamilyId, ScopeHandle, ScopeRegistry};

/// Delay configuration a tooltip provider publishes for the roots below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TooltipConfig {
    /// How long a pointer must rest on a trigger before its tooltip opens,
    /// in milliseconds.
    pub open_delay_ms: u64,
    /// How long after a tooltip closes the next one opens without waiting,
    /// in milliseconds.
    pub skip_delay_ms: u64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            open_delay_ms: 700,
            skip_delay_ms: 300,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    /// No tooltip has opened recently; hover opens wait out the full delay.
    Cold,
    /// A tooltip open was requested and no close has followed yet.
    Open,
    /// The last tooltip closed at some point; instant opens last until the
    /// recorded deadline.
    Cooling { until: u64 },
}

/// Warmup state shared by every tooltip under one provider.
///
/// While any tooltip is open, and for the skip window after one closes,
/// moving onto another trigger opens its tooltip immediately instead of
/// waiting out the open delay. This is what makes sweeping the pointer
/// along a toolbar feel continuous.
///
/// [`TooltipState`](crate::TooltipState) entry points keep this updated;
/// hosts only construct it and pass it back in.
#[derive(Clone, Copy, Debug)]
pub struct TooltipWarmup {
    skip_delay_ms: u64,
    phase: Phase,
}

impl TooltipWarmup {
    /// A cold warmup with the given skip window.
    pub fn new(skip_delay_ms: u64) -> Self {
        Self {
            skip_delay_ms,
            phase: Phase::Cold,
        }
    }

    /// A cold warmup using `config`'s skip window.
    pub fn from_config(config: &TooltipConfig) -> Self {
        Self::new(config.skip_delay_ms)
    }

    /// Whether a tooltip opening at `now` skips the open delay.
    pub fn is_warm(&self, now: u64) -> bool {
        match self.phase {
            Phase::Cold => false,
            Phase::Open => true,
            Phase::Cooling { until } => now < until,
        }
    }

    /// Record that a tooltip open was requested.
    pub(crate) fn note_open(&mut self) {
        self.phase = Phase::Open;
    }

    /// Record that a tooltip close was requested at `now`.
    ///
    /// The cooling window starts even if another tooltip is still open;
    /// the next open re-warms it.
    pub(crate) fn note_close(&mut self, now: u64) {
        self.phase = Phase::Cooling {
            until: now + self.skip_delay_ms,
        };
    }
}

/// Scope wiring for the tooltip family.
///
/// The provider publishes its [`TooltipConfig`] on the channel; roots below
/// read it to pick their delays. Each provider mints its own scope handle,
/// so nested providers can shorten delays for a region.
#[derive(Clone, Copy, Debug)]
pub struct TooltipContext {
    family: FamilyId,
    channel: Channel<TooltipConfig>,
}

impl TooltipContext {
    /// Register the tooltip family and its config channel.
    pub fn register(registry: &mut ScopeRegistry) -> Self {
        let family = registry.register_family("Tooltip", &[]);
        let channel = registry.channel(family, "TooltipProvider");
        Self { family, channel }
    }

    /// The tooltip family id, for extension families to build on.
    pub fn family(&self) -> FamilyId {
        self.family
    }

    /// The channel providers publish their [`TooltipConfig`] on.
    pub fn channel(&self) -> &Channel<TooltipConfig> {
        &self.channel
    }

    /// Mint a scope handle isolating one provider.
    pub fn create_scope(&self, registry: &mut ScopeRegistry) -> ScopeHandle {
        registry.create_scope(self.family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_scope::{ContextMap, ParentLookup};

    #[test]
    fn warmup_phases_follow_open_and_close() {
        let mut warmup = TooltipWarmup::new(300);
        assert!(!warmup.is_warm(0));

        warmup.note_open();
        assert!(warmup.is_warm(5_000));

        warmup.note_close(1_000);
        assert!(warmup.is_warm(1_299));
        assert!(!warmup.is_warm(1_300));

        // A new open re-warms a cooling provider.
        warmup.note_open();
        assert!(warmup.is_warm(10_000));
    }

    #[test]
    fn config_reaches_roots_through_the_scope() {
        struct Parents;

        impl ParentLookup<u32> for Parents {
            fn parent_of(&self, node: u32) -> Option<u32> {
                (node > 0).then(|| node - 1)
            }
        }

        let mut registry = ScopeRegistry::new();
        let tooltips = TooltipContext::register(&mut registry);
        let scope = tooltips.create_scope(&mut registry);

        let mut map: ContextMap<u32> = ContextMap::new();
        map.provide(
            0,
            tooltips.channel(),
            Some(&scope),
            TooltipConfig {
                open_delay_ms: 150,
                skip_delay_ms: 300,
            },
        );

        let config = map.read("Tooltip", 3, tooltips.channel(), Some(&scope), &Parents);
        assert_eq!(config.open_delay_ms, 150);
    }
}
