// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Family registration, typed channels, and per-instance scope handles.

use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use smallvec::SmallVec;

/// Identifier of a registered compound-component family.
///
/// Produced by [`ScopeRegistry::register_family`]; only meaningful for the
/// registry that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FamilyId(pub(crate) u32);

impl FamilyId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Instance-isolation token for one family inside a [`ScopeHandle`].
///
/// Two handles never share a token, which is what keeps sibling or nested
/// instances of the same family from observing each other's bundles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) u32);

/// A typed context channel owned by one family.
///
/// A channel is a lightweight, copyable key. The value type `T` is fixed at
/// creation; [`ContextMap`](crate::ContextMap) accepts and returns `T` for
/// this channel without the caller ever naming a type at the read site.
pub struct Channel<T> {
    pub(crate) id: u32,
    pub(crate) family: FamilyId,
    pub(crate) name: &'static str,
    pub(crate) family_name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Channel<T> {
    /// The part name this channel was created under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The family that owns this channel.
    pub fn family(&self) -> FamilyId {
        self.family
    }
}

// Manual impls: `Channel<T>` is a key and is copyable regardless of `T`.
impl<T> Copy for Channel<T> {}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("id", &self.id)
            .field("family", &self.family)
            .field("name", &self.name)
            .finish()
    }
}

/// The per-instance union record: one fresh [`ScopeId`] for a family and for
/// every family in its resolved extension union.
///
/// A single handle parameterizes nested parts of all composed families, so a
/// component built on top of another (an alert dialog on a dialog, a toolbar
/// on a focus group) threads one handle through both layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeHandle {
    entries: SmallVec<[(FamilyId, ScopeId); 4]>,
}

impl ScopeHandle {
    /// The token for `family`, or `None` if the handle was not created for a
    /// union containing it.
    pub fn token_for(&self, family: FamilyId) -> Option<ScopeId> {
        self.entries
            .iter()
            .find(|(f, _)| *f == family)
            .map(|(_, s)| *s)
    }

    /// The families this handle carries tokens for.
    pub fn families(&self) -> impl Iterator<Item = FamilyId> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }

    /// Number of families in the union.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the handle is empty (never true for registry-created handles).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug)]
struct FamilyRecord {
    name: &'static str,
    /// The family itself plus every family it transitively extends,
    /// de-duplicated, in registration-discovery order.
    union: Vec<FamilyId>,
}

/// Explicit registry of compound-component families.
///
/// There is no process-wide instance; the host creates one registry (usually
/// at startup, alongside its other long-lived state) and registers each
/// family once. Records are immutable after registration and are looked up by
/// every instance.
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    families: Vec<FamilyRecord>,
    next_channel: u32,
    next_scope: u32,
}

impl ScopeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a family under `name`, extending the given families.
    ///
    /// The extension list is flattened transitively into the family's union
    /// here, once; nothing is resolved dynamically later. Extensions must
    /// already be registered (they are, in practice: a family names the
    /// families it is built on top of).
    pub fn register_family(&mut self, name: &'static str, extensions: &[FamilyId]) -> FamilyId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "family ids use 32-bit indices by design"
        )]
        let id = FamilyId(self.families.len() as u32);
        let mut union = Vec::with_capacity(1 + extensions.len());
        union.push(id);
        for &ext in extensions {
            for &member in self.union_of(ext) {
                if !union.contains(&member) {
                    union.push(member);
                }
            }
        }
        self.families.push(FamilyRecord { name, union });
        id
    }

    /// The name a family was registered under.
    ///
    /// # Panics
    ///
    /// Panics if `family` does not belong to this registry.
    pub fn family_name(&self, family: FamilyId) -> &'static str {
        self.record(family).name
    }

    /// The resolved union for a family: itself first, then every family it
    /// transitively extends.
    pub fn union_of(&self, family: FamilyId) -> &[FamilyId] {
        &self.record(family).union
    }

    /// Create a typed context channel owned by `family`.
    ///
    /// `name` is the part the channel is provided by; it appears in the
    /// missing-provider panic message so misuse reads as "`X` must be used
    /// within `Y`".
    pub fn channel<T: 'static>(&mut self, family: FamilyId, name: &'static str) -> Channel<T> {
        let family_name = self.record(family).name;
        let id = self.next_channel;
        self.next_channel += 1;
        Channel {
            id,
            family,
            name,
            family_name,
            _marker: PhantomData,
        }
    }

    /// Create a fresh per-instance handle for `family`.
    ///
    /// The handle carries a new token for the family and for each member of
    /// its union, so one handle isolates a whole composed stack from sibling
    /// instances.
    pub fn create_scope(&mut self, family: FamilyId) -> ScopeHandle {
        let union = self.record(family).union.clone();
        let mut entries = SmallVec::new();
        for member in union {
            let token = ScopeId(self.next_scope);
            self.next_scope += 1;
            entries.push((member, token));
        }
        ScopeHandle { entries }
    }

    /// Number of registered families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Whether no family has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    fn record(&self, family: FamilyId) -> &FamilyRecord {
        self.families
            .get(family.idx())
            .expect("unknown FamilyId (from another registry?)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn union_resolves_transitively_and_dedupes() {
        let mut reg = ScopeRegistry::new();
        let a = reg.register_family("A", &[]);
        let b = reg.register_family("B", &[a]);
        let c = reg.register_family("C", &[b, a]);

        assert_eq!(reg.union_of(a), &[a]);
        assert_eq!(reg.union_of(b), &[b, a]);
        // `a` appears once even though it is reachable through `b` and
        // listed directly.
        assert_eq!(reg.union_of(c), &[c, b, a]);
        assert_eq!(reg.family_name(c), "C");
    }

    #[test]
    fn scope_handles_are_distinct_per_instance() {
        let mut reg = ScopeRegistry::new();
        let dialog = reg.register_family("Dialog", &[]);

        let one = reg.create_scope(dialog);
        let two = reg.create_scope(dialog);

        assert_ne!(one.token_for(dialog), two.token_for(dialog));
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn extension_handle_carries_both_families() {
        let mut reg = ScopeRegistry::new();
        let dialog = reg.register_family("Dialog", &[]);
        let alert = reg.register_family("AlertDialog", &[dialog]);

        let handle = reg.create_scope(alert);
        assert_eq!(handle.len(), 2);
        let alert_token = handle.token_for(alert).expect("alert token");
        let dialog_token = handle.token_for(dialog).expect("dialog token");
        assert_ne!(alert_token, dialog_token);

        let families: Vec<_> = handle.families().collect();
        assert_eq!(families, vec![alert, dialog]);
    }

    #[test]
    fn handle_has_no_token_for_unrelated_family() {
        let mut reg = ScopeRegistry::new();
        let dialog = reg.register_family("Dialog", &[]);
        let menu = reg.register_family("Menu", &[]);

        let handle = reg.create_scope(dialog);
        assert!(handle.token_for(menu).is_none());
    }

    #[test]
    #[should_panic(expected = "unknown FamilyId")]
    fn foreign_family_id_is_rejected() {
        let reg = ScopeRegistry::new();
        let _ = reg.family_name(FamilyId(3));
    }
}
