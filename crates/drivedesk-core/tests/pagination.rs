use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use drivedesk_core::pagination::{
    PageParameter, PageRequest, PageSource, PaginationError, SliceSource, fetch_page, paginate,
};

/// Slice-backed source that records how often it is queried.
struct CountingSource {
    items: Vec<i32>,
    calls: AtomicUsize,
}

impl CountingSource {
    fn new(items: Vec<i32>) -> Self {
        Self {
            items,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for CountingSource {
    type Item = i32;
    type Error = PaginationError;

    async fn fetch_range(&self, offset: i64, limit: i64) -> Result<Vec<i32>, PaginationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SliceSource::new(&self.items).fetch_range(offset, limit).await
    }
}

#[derive(Debug, PartialEq)]
enum StoreError {
    InvalidPage(PaginationError),
    Unavailable,
}

impl From<PaginationError> for StoreError {
    fn from(err: PaginationError) -> Self {
        StoreError::InvalidPage(err)
    }
}

struct BrokenSource;

#[async_trait]
impl PageSource for BrokenSource {
    type Item = i32;
    type Error = StoreError;

    async fn fetch_range(&self, _offset: i64, _limit: i64) -> Result<Vec<i32>, StoreError> {
        Err(StoreError::Unavailable)
    }
}

fn sequential(n: i32) -> Vec<i32> {
    (1..=n).collect()
}

#[tokio::test]
async fn test_full_page_without_next() {
    let items = sequential(10);
    let page = paginate(&SliceSource::new(&items), 1, 10).await.unwrap();

    assert_eq!(page.items(), items.as_slice());
    assert!(!page.has_next_page());
}

#[tokio::test]
async fn test_single_item_page_with_next() {
    let items = sequential(10);
    let page = paginate(&SliceSource::new(&items), 1, 1).await.unwrap();

    assert_eq!(page.items(), &[1]);
    assert!(page.has_next_page());
}

#[tokio::test]
async fn test_empty_source() {
    let items: Vec<i32> = Vec::new();
    let page = paginate(&SliceSource::new(&items), 1, 1).await.unwrap();

    assert!(page.is_empty());
    assert!(!page.has_next_page());
}

#[tokio::test]
async fn test_last_partial_page() {
    let items = sequential(10);
    let page = paginate(&SliceSource::new(&items), 4, 3).await.unwrap();

    assert_eq!(page.items(), &[10]);
    assert!(!page.has_next_page());
    assert_eq!(page.page_index(), 4);
    assert_eq!(page.page_size(), 3);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let items = sequential(10);
    let page = paginate(&SliceSource::new(&items), 500, 10).await.unwrap();

    assert!(page.is_empty());
    assert!(!page.has_next_page());
}

#[tokio::test]
async fn test_huge_page_index_does_not_error() {
    let source = CountingSource::new(sequential(5));
    let page = paginate(&source, i64::MAX, 10).await.unwrap();

    assert!(page.is_empty());
    assert!(!page.has_next_page());
}

#[tokio::test]
async fn test_item_count_and_next_flag_match_formula() {
    for len in 0..=12 {
        let items = sequential(len);
        let source = SliceSource::new(&items);
        let len = i64::from(len);

        for page_size in 1..=5 {
            for page_index in 1..=6 {
                let page = paginate(&source, page_index, page_size).await.unwrap();

                let remaining = (len - (page_index - 1) * page_size).max(0);
                let expected_len = remaining.min(page_size);
                assert_eq!(
                    page.len() as i64,
                    expected_len,
                    "len={len} index={page_index} size={page_size}"
                );
                assert_eq!(
                    page.has_next_page(),
                    len > page_index * page_size,
                    "len={len} index={page_index} size={page_size}"
                );

                let first = (page_index - 1) * page_size + 1;
                let expected: Vec<i32> = (first..first + expected_len)
                    .map(|n| n as i32)
                    .collect();
                assert_eq!(page.items(), expected.as_slice());
            }
        }
    }
}

#[tokio::test]
async fn test_issues_exactly_one_fetch() {
    let source = CountingSource::new(sequential(30));
    paginate(&source, 2, 10).await.unwrap();

    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_invalid_arguments_fail_before_fetch() {
    let cases = [
        (0, 10, PageParameter::PageIndex),
        (-3, 10, PageParameter::PageIndex),
        (1, 0, PageParameter::PageSize),
        (1, -1, PageParameter::PageSize),
        (0, 0, PageParameter::PageIndex),
    ];

    for (page_index, page_size, parameter) in cases {
        for source in [CountingSource::new(Vec::new()), CountingSource::new(sequential(3))] {
            let err = paginate(&source, page_index, page_size).await.unwrap_err();

            assert_eq!(err, PaginationError::ValueMustBeGreaterThanZero { parameter });
            assert_eq!(source.calls(), 0);
        }
    }
}

#[tokio::test]
async fn test_invalid_arguments_reach_caller_error_type() {
    let err = paginate(&BrokenSource, 1, 0).await.unwrap_err();

    assert_eq!(
        err,
        StoreError::InvalidPage(PaginationError::ValueMustBeGreaterThanZero {
            parameter: PageParameter::PageSize
        })
    );
}

#[tokio::test]
async fn test_source_errors_propagate_unchanged() {
    let err = paginate(&BrokenSource, 1, 10).await.unwrap_err();
    assert_eq!(err, StoreError::Unavailable);
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let items = sequential(17);
    let source = SliceSource::new(&items);

    let first = paginate(&source, 2, 5).await.unwrap();
    let second = paginate(&source, 2, 5).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_fetch_page_with_validated_request() {
    let items = sequential(7);
    let request = PageRequest::new(2, 4).unwrap();
    let page = fetch_page(&SliceSource::new(&items), request).await.unwrap();

    assert_eq!(page.items(), &[5, 6, 7]);
    assert!(!page.has_next_page());
}
