// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_element_tree --heading-base-level=0

//! Trellis Element Tree: the host tree the other Trellis crates plug into.
//!
//! The scope and collection mechanisms deliberately know nothing about how a
//! host arranges its elements; they only ask for parent links
//! ([`trellis_scope::ParentLookup`]) and for a document-order walk
//! ([`trellis_collection::DocumentOrder`]). This crate is a concrete host
//! tree answering both: an arena of elements with generational ids, ordered
//! child lists, structural mutation, and deferred portal mounting.
//!
//! ## Structure and identity
//!
//! Elements live in slots addressed by [`ElementId`], a `(index, generation)`
//! pair. Removing an element frees its slot for reuse under a bumped
//! generation, so stale ids held by anyone are rejected by every accessor
//! rather than aliasing the new occupant.
//!
//! Each element carries a caller-defined payload (a tag, a widget handle,
//! whatever the host wants); the tree itself never interprets it.
//!
//! ## Attachment and portals
//!
//! Elements inserted under a live parent, or as document roots, are
//! *attached*. [`ElementTree::defer_mount`] instead allocates content that
//! stays detached until [`ElementTree::commit`] links it under its portal
//! target, which is how "render nothing until the mount is confirmed" is
//! expressed: collection queries gate on [`ElementTree::is_attached`] and so
//! skip the content until the commit.
//!
//! Portaled content keeps two ancestries. Its structural parent (after the
//! commit) is the portal target and drives document order; its context
//! ancestry runs through the element the portal was declared at, so scope
//! channels provided above the declaring element stay readable from inside
//! the portal.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;

pub use tree::{ElementId, ElementTree};
