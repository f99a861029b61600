//! Property-based tests for pagination liveness and ordering

use super::support::{client_for, records, PageServer};
use proptest::prelude::*;
use serde_json::Value;
use tokio::runtime::Runtime;
use v7go::pagination::Paginator;

fn collect(server: std::sync::Arc<PageServer>, page_size: usize) -> Vec<Value> {
    let runtime = Runtime::new().unwrap();
    let paginator = Paginator::new(client_for(server), "/api/workspaces/ws/entities");
    runtime.block_on(paginator.collect_all(page_size)).unwrap()
}

/// Strictly decreasing non-zero page sizes.
fn decreasing_sizes() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::btree_set(1usize..40, 0..8)
        .prop_map(|set| set.into_iter().rev().collect::<Vec<_>>())
}

/// Iteration terminates and yields every non-empty page in order
#[test]
fn test_iterate_yields_concatenation_of_pages() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(decreasing_sizes(), 1usize..50), |(sizes, page_size)| {
            let pages: Vec<Vec<Value>> = sizes
                .iter()
                .enumerate()
                .map(|(i, n)| records(&format!("page{}", i), *n))
                .collect();
            let expected: Vec<Value> = pages.iter().flatten().cloned().collect();
            let server = PageServer::new(pages, None);

            let items = collect(server.clone(), page_size);

            prop_assert_eq!(items, expected);
            // One request per non-empty page plus the terminating empty page.
            prop_assert_eq!(server.requests().len(), sizes.len() + 1);
            Ok(())
        })
        .unwrap();
}

/// Each offset equals the previous offset plus the previous page's length
#[test]
fn test_offsets_advance_by_returned_count() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(1usize..30, 0..8), 1usize..30),
            |(sizes, page_size)| {
                let pages = sizes.iter().map(|n| records("r", *n)).collect();
                let server = PageServer::new(pages, None);

                collect(server.clone(), page_size);

                let log = server.cursor_log();
                let mut expected_offset = 0;
                for (i, (offset, limit)) in log.iter().enumerate() {
                    prop_assert_eq!(*offset, expected_offset);
                    prop_assert_eq!(*limit, page_size);
                    expected_offset += sizes.get(i).copied().unwrap_or(0);
                }
                Ok(())
            },
        )
        .unwrap();
}

/// A total of zero never stops iteration while pages keep arriving
#[test]
fn test_zero_total_relies_on_empty_page() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(1usize..10, 1..6), |sizes| {
            let pages: Vec<Vec<Value>> = sizes.iter().map(|n| records("z", *n)).collect();
            let expected: usize = sizes.iter().sum();
            let server = PageServer::new(pages, Some(0));

            let items = collect(server.clone(), 10);

            prop_assert_eq!(items.len(), expected);
            prop_assert_eq!(server.requests().len(), sizes.len() + 1);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_two_two_zero_with_zero_total_yields_four() {
    let server = PageServer::new(vec![records("a", 2), records("b", 2), vec![]], Some(0));

    let items = collect(server.clone(), 2);

    assert_eq!(items.len(), 4);
    assert_eq!(server.requests().len(), 3);
}
