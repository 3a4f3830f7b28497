//! Tests for pagination module

use super::testing::{ScriptedPages, SimulatedCollection};
use super::*;
use crate::error::Error;
use crate::query::RequestOptions;
use futures::TryStreamExt;
use test_case::test_case;

// ============================================================================
// PaginationItem Tests
// ============================================================================

#[test]
fn test_pagination_item_from_xml() {
    let body = r#"<tsResponse xmlns="http://tableau.com/api">
        <pagination pageNumber="2" pageSize="50" totalAvailable="120"/>
    </tsResponse>"#;
    let item = PaginationItem::from_xml(body, 50).unwrap();
    assert_eq!(item.page_number(), 2);
    assert_eq!(item.page_size(), 50);
    assert_eq!(item.total_available(), 120);
}

#[test]
fn test_pagination_item_missing_element_is_single_page() {
    let body = r#"<tsResponse xmlns="http://tableau.com/api"><groups/></tsResponse>"#;
    let item = PaginationItem::from_xml(body, 3).unwrap();
    assert_eq!(item, PaginationItem::single_page(3));
    assert_eq!(item.total_available(), 3);
}

// ============================================================================
// Pager Tests
// ============================================================================

#[test_case(5, 2, 3 ; "partial last page")]
#[test_case(6, 2, 3 ; "exact pages")]
#[test_case(1, 100, 1 ; "single item")]
#[test_case(250, 100, 3 ; "default sized pages")]
#[test_case(1000, 1000, 1 ; "max page size")]
#[tokio::test]
async fn test_pager_yields_total_in_ceil_pages(total: u32, page_size: i64, expected_fetches: usize) {
    let collection = SimulatedCollection::new(total, 100);
    let options = RequestOptions::new().with_page_size(page_size).unwrap();
    let pager = Pager::with_options(&collection, options).unwrap();

    let items = pager.collect().await.unwrap();

    assert_eq!(items, (1..=total).collect::<Vec<_>>());
    assert_eq!(collection.call_count(), expected_fetches);
}

#[tokio::test]
async fn test_pager_empty_collection_fetches_once() {
    let collection = SimulatedCollection::new(0, 100);
    let mut pager = Pager::new(&collection);

    assert!(pager.next().await.unwrap().is_none());
    assert!(pager.next().await.unwrap().is_none());
    assert_eq!(collection.call_count(), 1);
    assert_eq!(pager.pages_fetched(), 1);
}

#[tokio::test]
async fn test_pager_is_lazy() {
    let collection = SimulatedCollection::new(10, 2);
    let mut pager = Pager::new(&collection);
    assert_eq!(collection.call_count(), 0);

    assert_eq!(pager.next().await.unwrap(), Some(1));
    assert_eq!(pager.next().await.unwrap(), Some(2));
    assert_eq!(collection.call_count(), 1);

    assert_eq!(pager.next().await.unwrap(), Some(3));
    assert_eq!(collection.call_count(), 2);

    drop(pager);
    assert_eq!(collection.call_count(), 2);
}

#[tokio::test]
async fn test_pager_advances_page_number() {
    let collection = SimulatedCollection::new(5, 2);
    Pager::new(&collection).collect().await.unwrap();

    let pages: Vec<u32> = collection.calls().iter().map(RequestOptions::page_number).collect();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_independent_pagers_yield_identical_sequences() {
    let a = SimulatedCollection::new(7, 3);
    let b = SimulatedCollection::new(7, 3);

    let first = Pager::new(&a).collect().await.unwrap();
    let second = Pager::new(&b).collect().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(a.call_count(), b.call_count());
}

#[tokio::test]
async fn test_pager_scripted_two_two_one() {
    let fetcher = ScriptedPages::new(vec![Ok(vec![1, 2]), Ok(vec![3, 4]), Ok(vec![5])], 2, 5);

    let items = Pager::new(&fetcher).collect().await.unwrap();

    assert_eq!(items, vec![1, 2, 3, 4, 5]);
    assert_eq!(fetcher.call_count(), 3);
}

#[tokio::test]
async fn test_pager_tolerates_short_pages() {
    // Server under-fills page 1 but still reports 4 items in total
    let fetcher = ScriptedPages::new(vec![Ok(vec![1]), Ok(vec![2, 3]), Ok(vec![4])], 2, 4);

    let items = Pager::new(&fetcher).collect().await.unwrap();

    assert_eq!(items, vec![1, 2, 3, 4]);
    assert_eq!(fetcher.call_count(), 3);
}

#[tokio::test]
async fn test_pager_empty_page_below_total_is_count_mismatch() {
    let fetcher = ScriptedPages::new(vec![Ok(vec![1, 2]), Ok(vec![])], 2, 5);
    let mut pager = Pager::new(&fetcher);

    assert_eq!(pager.next().await.unwrap(), Some(1));
    assert_eq!(pager.next().await.unwrap(), Some(2));
    let err = pager.next().await.unwrap_err();
    assert!(matches!(
        err,
        Error::CountMismatch {
            expected: 5,
            received: 2
        }
    ));

    // Iteration has ended; no further fetches
    assert!(pager.next().await.unwrap().is_none());
    assert_eq!(fetcher.call_count(), 2);
}

#[tokio::test]
async fn test_pager_propagates_fetch_error() {
    let fetcher = ScriptedPages::new(
        vec![
            Ok(vec![1, 2]),
            Err(Error::Timeout { timeout_ms: 1000 }),
            Ok(vec![3]),
        ],
        2,
        5,
    );
    let mut pager = Pager::new(&fetcher);

    assert_eq!(pager.next().await.unwrap(), Some(1));
    assert_eq!(pager.next().await.unwrap(), Some(2));
    assert!(matches!(
        pager.next().await,
        Err(Error::Timeout { timeout_ms: 1000 })
    ));
    assert!(pager.next().await.unwrap().is_none());
    assert_eq!(fetcher.call_count(), 2);
}

#[tokio::test]
async fn test_pager_starting_mid_collection() {
    let collection = SimulatedCollection::new(7, 100);
    let options = RequestOptions::new()
        .with_page_size(3)
        .unwrap()
        .with_page_number(2)
        .unwrap();

    let items = Pager::with_options(&collection, options)
        .unwrap()
        .collect()
        .await
        .unwrap();

    assert_eq!(items, vec![4, 5, 6, 7]);
    assert_eq!(collection.call_count(), 2);
}

#[tokio::test]
async fn test_pager_into_stream() {
    let collection = SimulatedCollection::new(5, 2);
    let items: Vec<u32> = Pager::new(&collection)
        .into_stream()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(items, vec![1, 2, 3, 4, 5]);
}
