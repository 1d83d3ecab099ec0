//! Paginated aggregation over the remote list endpoints.

use async_trait::async_trait;

use crate::error::ApiError;

/// One pageable remote resource.
#[async_trait]
pub trait PageSource {
    type Item: Send;

    async fn fetch_page(&self, page: usize, per_page: usize) -> Result<Vec<Self::Item>, ApiError>;
}

/// Result of draining a paginated resource.
#[derive(Debug)]
pub struct Aggregation<T> {
    pub items: Vec<T>,
    /// False when a fetch error cut the loop short; `items` then holds
    /// only the pages fetched before the failure.
    pub complete: bool,
}

/// Drain `source` page by page, starting at page 0.
///
/// Stops on an empty page, or on a page strictly shorter than `per_page`.
/// The remote reports no total, so a short page reads as the last one,
/// even though a transient server-side under-fill looks identical. A fetch
/// error stops the loop and keeps what was accumulated so far.
pub async fn fetch_all<S: PageSource>(source: &S, per_page: usize) -> Aggregation<S::Item> {
    let mut items = Vec::new();
    let mut page = 0;
    loop {
        let batch = match source.fetch_page(page, per_page).await {
            Ok(batch) => batch,
            Err(err) => {
                tracing::warn!(page, error = %err, "page fetch failed, keeping partial result");
                return Aggregation { items, complete: false };
            }
        };
        let fetched = batch.len();
        if fetched == 0 {
            break;
        }
        items.extend(batch);
        if fetched < per_page {
            break;
        }
        page += 1;
    }
    tracing::debug!(total = items.len(), pages = page + 1, "pagination complete");
    Aggregation { items, complete: true }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves a scripted sequence of page sizes, recording every call.
    struct ScriptedSource {
        pages: Vec<Result<usize, ApiError>>,
        calls: Mutex<Vec<usize>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<usize, ApiError>>) -> Self {
            Self { pages, calls: Mutex::new(Vec::new()) }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PageSource for ScriptedSource {
        type Item = u64;

        async fn fetch_page(&self, page: usize, _per_page: usize) -> Result<Vec<u64>, ApiError> {
            self.calls.lock().unwrap().push(page);
            match self.pages.get(page) {
                Some(Ok(count)) => Ok(vec![0; *count]),
                Some(Err(err)) => Err(err.clone()),
                None => Ok(Vec::new()),
            }
        }
    }

    #[tokio::test]
    async fn test_short_final_page_stops_the_loop() {
        let source = ScriptedSource::new(vec![Ok(50), Ok(50), Ok(50), Ok(37)]);
        let aggregation = fetch_all(&source, 50).await;

        assert!(aggregation.complete);
        assert_eq!(aggregation.items.len(), 187);
        assert_eq!(source.call_count(), 4);
        assert_eq!(*source.calls.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_page_stops_without_an_extra_call() {
        let source = ScriptedSource::new(vec![Ok(50), Ok(50), Ok(0)]);
        let aggregation = fetch_all(&source, 50).await;

        assert!(aggregation.complete);
        assert_eq!(aggregation.items.len(), 100);
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn test_single_short_page() {
        let source = ScriptedSource::new(vec![Ok(12)]);
        let aggregation = fetch_all(&source, 50).await;

        assert!(aggregation.complete);
        assert_eq!(aggregation.items.len(), 12);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_no_items_at_all() {
        let source = ScriptedSource::new(vec![Ok(0)]);
        let aggregation = fetch_all(&source, 50).await;

        assert!(aggregation.complete);
        assert!(aggregation.items.is_empty());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_error_mid_loop_keeps_the_partial_result() {
        let source = ScriptedSource::new(vec![Ok(50), Ok(50), Err(ApiError::Timeout)]);
        let aggregation = fetch_all(&source, 50).await;

        assert!(!aggregation.complete);
        assert_eq!(aggregation.items.len(), 100);
        assert_eq!(source.call_count(), 3);
    }
}
