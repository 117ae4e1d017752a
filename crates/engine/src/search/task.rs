//! Background search with advisory cancellation
//!
//! Long queries can run on a worker thread so the caller stays free.
//! Cancellation is cooperative and advisory only: it never interrupts the
//! evaluation, it just discards the result once the worker finishes. The
//! index is read-only to the worker, so a cancelled search leaves no trace.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

use super::index::EntryIndex;
use super::types::{SearchRequest, SearchResponse};

/// Handle to a search running on a worker thread.
pub struct SearchJob {
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<SearchResponse>,
}

impl SearchJob {
    /// Run `request` against `index` on a new thread.
    pub fn spawn(index: Arc<EntryIndex>, request: SearchRequest) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let handle = thread::spawn(move || {
            // Bail before evaluating if the caller already gave up.
            if flag.load(Ordering::Acquire) {
                return SearchResponse::default();
            }
            index.search(&request)
        });
        SearchJob { cancelled, handle }
    }

    /// Mark the job cancelled. The running evaluation completes normally;
    /// its result is dropped at [`SearchJob::join`].
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        debug!("search job cancelled");
    }

    /// Whether [`SearchJob::cancel`] was called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Wait for the worker and take the response, or `None` if the job was
    /// cancelled (or the worker panicked).
    pub fn join(self) -> Option<SearchResponse> {
        let response = self.handle.join().ok()?;
        if self.cancelled.load(Ordering::Acquire) {
            None
        } else {
            Some(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot_core::Entry;

    fn seeded_index() -> Arc<EntryIndex> {
        let index = Arc::new(EntryIndex::new());
        index.add(&Entry::new("1", "background test", "worker thread"));
        index.add(&Entry::new("2", "foreground", "other"));
        index
    }

    #[test]
    fn test_background_search_returns_results() {
        let index = seeded_index();
        let job = SearchJob::spawn(Arc::clone(&index), SearchRequest::new("background"));

        let response = job.join().expect("not cancelled");
        assert_eq!(response.ids(), vec!["1"]);
    }

    #[test]
    fn test_cancelled_job_discards_result() {
        let index = seeded_index();
        let job = SearchJob::spawn(Arc::clone(&index), SearchRequest::new("background"));

        job.cancel();
        assert!(job.is_cancelled());
        assert!(job.join().is_none());

        // Cancellation had no side effect on the index.
        assert_eq!(index.stats().entries, 2);
    }

    #[test]
    fn test_worker_observes_cancellation_flag() {
        let index = seeded_index();
        let job = SearchJob::spawn(Arc::clone(&index), SearchRequest::new("background"));

        // Whether the worker bails before evaluating or finishes first, a
        // cancelled job never surfaces a result.
        job.cancel();
        assert!(job.join().is_none());
    }

    #[test]
    fn test_job_runs_against_live_index() {
        let index = seeded_index();
        index.add(&Entry::new("3", "background extra", ""));

        let job = SearchJob::spawn(Arc::clone(&index), SearchRequest::new("background"));
        let response = job.join().expect("not cancelled");
        assert_eq!(response.len(), 2);
    }
}
