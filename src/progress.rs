//! Progress-callback trait for per-file conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! real-time events as the pipeline processes each input file.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a channel, a UI element, or a terminal progress bar
//! without the library knowing anything about how the host application
//! communicates. The trait is `Send + Sync` so the same implementation works
//! if the caller moves the conversion onto another task.

use std::sync::Arc;

/// Called by the conversion pipeline as it processes each input file.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Files are processed strictly one at a time, in
/// selection order, so events for file *n* always arrive before events for
/// file *n + 1*.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once before any file is processed.
    ///
    /// # Arguments
    /// * `total_files` — number of files that will be processed
    fn on_conversion_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a file is decoded and embedded.
    ///
    /// # Arguments
    /// * `file_num`    — 1-indexed position in the selection order
    /// * `total_files` — total files in the run
    /// * `name`        — display name of the file
    fn on_file_start(&self, file_num: usize, total_files: usize, name: &str) {
        let _ = (file_num, total_files, name);
    }

    /// Called when a file has been embedded on its own page.
    fn on_file_complete(&self, file_num: usize, total_files: usize, name: &str) {
        let _ = (file_num, total_files, name);
    }

    /// Called when a file cannot be embedded.
    ///
    /// The conversion continues with the remaining files; this event exists
    /// so the failure can be shown to the user while the run is still going.
    fn on_file_error(&self, file_num: usize, total_files: usize, name: &str, error: String) {
        let _ = (file_num, total_files, name, error);
    }

    /// Called once after every file has been attempted.
    ///
    /// # Arguments
    /// * `total_files`   — total files in the run
    /// * `success_count` — files that embedded without error
    fn on_conversion_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        started_total: AtomicUsize,
        completed_total: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_conversion_start(&self, total_files: usize) {
            self.started_total.store(total_files, Ordering::SeqCst);
        }

        fn on_file_start(&self, _file_num: usize, _total: usize, _name: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _file_num: usize, _total: usize, _name: &str) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, _file_num: usize, _total: usize, _name: &str, _error: String) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, _total: usize, success_count: usize) {
            self.completed_total.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(3);
        cb.on_file_start(1, 3, "a.png");
        cb.on_file_complete(1, 3, "a.png");
        cb.on_file_error(2, 3, "b.gif", "unsupported".into());
        cb.on_conversion_complete(3, 2);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            started_total: AtomicUsize::new(0),
            completed_total: AtomicUsize::new(0),
        };

        tracker.on_conversion_start(3);
        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 3);

        tracker.on_file_start(1, 3, "a.png");
        tracker.on_file_complete(1, 3, "a.png");
        tracker.on_file_start(2, 3, "b.jpg");
        tracker.on_file_complete(2, 3, "b.jpg");
        tracker.on_file_start(3, 3, "c.txt");
        tracker.on_file_error(3, 3, "c.txt", "unsupported file type".into());

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);

        tracker.on_conversion_complete(3, 2);
        assert_eq!(tracker.completed_total.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ConversionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(10);
        cb.on_file_start(1, 10, "photo.jpg");
        cb.on_file_complete(1, 10, "photo.jpg");
    }
}
