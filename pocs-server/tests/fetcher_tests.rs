
use std::sync::Arc;
use std::time::Duration;

use pocs_server::cache::MemoCache;
use pocs_server::fetcher::{FetchError, fetch_all, fetch_pages};
use test_helpers::*;
use tokio_test::{assert_err, assert_ok};

fn count_cache() -> MemoCache<String, u64> {
    MemoCache::new(Duration::from_secs(60))
}

#[tokio::test]
async fn test_250_records_make_three_pages() {
    let source = Arc::new(MockPageSource::with_total(250));
    let records = assert_ok!(fetch_all(source.clone(), &count_cache()).await);

    assert_eq!(source.page_calls(), 3);
    assert_eq!(records.len(), 100 + 100 + 50);
    assert_eq!(records, (0..250).collect::<Vec<u32>>());
}

#[tokio::test]
async fn test_order_is_page_order_not_completion_order() {
    // Page 0 answers last, page 2 first
    let source = Arc::new(MockPageSource::with_total(250).with_delays(&[80, 40, 0]));
    let records = assert_ok!(fetch_all(source, &count_cache()).await);

    assert_eq!(records[0], 0);
    assert_eq!(records[100], 100);
    assert_eq!(records[249], 249);
    assert!(records.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_empty_dataset_fetches_one_empty_page() {
    let source = Arc::new(MockPageSource::with_total(0));
    let records = assert_ok!(fetch_all(source.clone(), &count_cache()).await);

    assert!(records.is_empty());
    assert_eq!(source.page_calls(), 1);
}

#[tokio::test]
async fn test_exact_multiple_has_no_trailing_page() {
    let source = Arc::new(MockPageSource::with_total(300));
    let records = assert_ok!(fetch_all(source.clone(), &count_cache()).await);

    assert_eq!(records.len(), 300);
    assert_eq!(source.page_calls(), 3);
}

#[tokio::test]
async fn test_large_dataset_is_capped_at_100_pages() {
    let source = Arc::new(MockPageSource::with_total(25_000));
    let records = assert_ok!(fetch_all(source.clone(), &count_cache()).await);

    assert_eq!(source.page_calls(), 100);
    assert_eq!(records.len(), 10_000);
}

#[tokio::test]
async fn test_one_failed_page_fails_everything() {
    let source = Arc::new(MockPageSource::with_total(250).failing_at(1));
    let error = assert_err!(fetch_all(source, &count_cache()).await);

    assert!(matches!(error, FetchError::Page { page: 1, .. }));
}

#[tokio::test]
async fn test_failure_does_not_wait_for_slow_pages() {
    let source = Arc::new(
        MockPageSource::with_total(250)
            .with_delays(&[5_000, 0, 5_000])
            .failing_at(1),
    );

    let started = std::time::Instant::now();
    let result = fetch_pages(source, 3).await;

    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_total_count_is_memoized() {
    let source = Arc::new(MockPageSource::with_total(150));
    let counts = count_cache();

    assert_ok!(fetch_all(source.clone(), &counts).await);
    assert_ok!(fetch_all(source.clone(), &counts).await);

    assert_eq!(source.count_calls(), 1);
    assert_eq!(source.page_calls(), 4);
}
