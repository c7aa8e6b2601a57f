// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the per-frame queries: document-ordered collection reads,
//! subtree walks, and typeahead scans.
//!
//! Run with: `cargo bench -p trellis_benches`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use trellis_collection::Collection;
use trellis_element_tree::{ElementId, ElementTree};
use trellis_menu::Typeahead;

/// A ten-section tree with `leaves` leaf nodes spread across the sections,
/// every third leaf registered in the collection.
fn populated(leaves: u32) -> (ElementTree<u32>, ElementId, Collection<ElementId, u32>) {
    let mut tree = ElementTree::new();
    let root = tree.insert(None, 0);
    let sections: Vec<ElementId> = (0..10).map(|n| tree.insert(Some(root), n)).collect();
    let mut items = Collection::new();
    items.set_root(root);
    for n in 0..leaves {
        let section = sections[(n as usize) % sections.len()];
        let leaf = tree.insert(Some(section), n);
        if n % 3 == 0 {
            items.insert(leaf, n);
        }
    }
    (tree, root, items)
}

fn bench_entries_in_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("entries_in_order");
    for leaves in [100_u32, 1_000, 10_000] {
        let (tree, _, items) = populated(leaves);
        group.bench_with_input(BenchmarkId::from_parameter(leaves), &leaves, |b, _| {
            b.iter(|| black_box(&items).entries_in_order(black_box(&tree)));
        });
    }
    group.finish();
}

fn bench_visit_subtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("visit_subtree");
    for leaves in [100_u32, 1_000, 10_000] {
        let (tree, root, _) = populated(leaves);
        group.bench_with_input(BenchmarkId::from_parameter(leaves), &leaves, |b, _| {
            b.iter(|| {
                let mut visited = 0_u32;
                tree.visit_subtree(black_box(root), |_| visited += 1);
                visited
            });
        });
    }
    group.finish();
}

fn bench_typeahead_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("typeahead_scan");
    for count in [10_u32, 100, 1_000] {
        let labels: Vec<String> = (0..count).map(|n| format!("Item {n:04}")).collect();
        let corpus: Vec<(u32, &str)> = labels
            .iter()
            .enumerate()
            .map(|(n, text)| (n as u32, text.as_str()))
            .collect();
        // A prefix with no match scans (and lowercases) every entry.
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let mut search = Typeahead::new();
                search.on_character('z', 0, black_box(&corpus), None)
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_entries_in_order,
    bench_visit_subtree,
    bench_typeahead_scan
);
criterion_main!(benches);
