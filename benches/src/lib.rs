// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Criterion benchmarks for the trellis crates; the targets live under
//! `benches/`.
