// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_scope --heading-base-level=0

//! Trellis Scope: scoped context resolution for compound UI parts.
//!
//! ## Overview
//!
//! A compound component is a family of parts (Root, Trigger, Content, Item)
//! that coordinate through shared state rather than through props threaded
//! from part to part. This crate is the plumbing for that coordination:
//!
//! - A [`ScopeRegistry`] holds one record per component family and resolves
//!   each family's extension union once, at registration.
//! - A family owns typed [`Channel`]s. A channel fixes the bundle type `T`,
//!   so providing and reading are type-checked with no casts at call sites.
//! - A [`ContextMap`] stores the bundles providers publish at host-tree
//!   nodes, and resolves reads by walking parent links supplied by the host
//!   through [`ParentLookup`].
//!
//! ## Instance isolation
//!
//! Two instances of the same family must not observe each other's bundles
//! even when nested. [`ScopeRegistry::create_scope`] mints a [`ScopeHandle`]
//! carrying a fresh token per family in the union; a bundle published under
//! one handle is invisible to reads under another. When a component is built
//! on top of an existing family (an alert dialog on a dialog), the one handle
//! parameterizes the nested parts of both families.
//!
//! Passing no handle selects the shared default token for the channel, so
//! untokenized instances of a family within one subtree observe the same
//! bundle. That is the supported single-instance-per-subtree arrangement;
//! hand out handles where instances must coexist.
//!
//! ## Resolution
//!
//! Reads start at the consumer's own node and walk rootward; the nearest
//! matching bundle wins. [`ContextMap::read`] panics when no provider
//! encloses the consumer, naming both ends of the broken pairing:
//!
//! ```text
//! `MenuItem` must be used within `Menu`
//! ```
//!
//! [`ContextMap::try_read`] is the non-panicking form for channels where
//! absence is a legitimate state.
//!
//! ## Example
//!
//! ```rust
//! use hashbrown::HashMap;
//! use trellis_scope::{ContextMap, ScopeRegistry};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct DialogState {
//!     open: bool,
//! }
//!
//! let mut registry = ScopeRegistry::new();
//! let dialog = registry.register_family("Dialog", &[]);
//! let channel = registry.channel::<DialogState>(dialog, "Dialog");
//!
//! // Host tree: node 1 is a child of node 0.
//! let mut parents: HashMap<u32, u32> = HashMap::new();
//! parents.insert(1, 0);
//!
//! let scope = registry.create_scope(dialog);
//! let mut map = ContextMap::new();
//! map.provide(0, &channel, Some(&scope), DialogState { open: true });
//!
//! let state = map.read("DialogContent", 1, &channel, Some(&scope), &parents);
//! assert!(state.open);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod registry;

pub use context::{ContextMap, NoParents, ParentLookup};
pub use registry::{Channel, FamilyId, ScopeHandle, ScopeId, ScopeRegistry};
