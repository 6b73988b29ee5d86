use dashmap::DashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Side effect run the first time an image URL is seen
pub trait Preloader: Send + Sync {
    fn preload(&self, image_url: &str);
}

/// Preloader that only records the request in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPreloader;

impl Preloader for LogPreloader {
    fn preload(&self, image_url: &str) {
        debug!(image_url, "preloading thumbnail image");
    }
}

/// Set of image URLs whose preload has been requested.
///
/// Shared by every session of one application context. Entries are never
/// removed, so the set grows with the number of distinct images seen.
pub struct PreloadTracker {
    seen: DashSet<String>,
    requests: AtomicUsize,
    preloader: Box<dyn Preloader>,
}

impl PreloadTracker {
    pub fn new(preloader: impl Preloader + 'static) -> Self {
        Self {
            seen: DashSet::new(),
            requests: AtomicUsize::new(0),
            preloader: Box::new(preloader),
        }
    }

    /// Request a preload of `image_url`. Returns `true` if this call
    /// triggered the preload, `false` if it had already been requested.
    pub fn request(&self, image_url: &str) -> bool {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if self.seen.contains(image_url) || !self.seen.insert(image_url.to_string()) {
            return false;
        }
        self.preloader.preload(image_url);
        true
    }

    pub fn is_requested(&self, image_url: &str) -> bool {
        self.seen.contains(image_url)
    }

    pub fn stats(&self) -> PreloadStats {
        PreloadStats {
            images: self.seen.len(),
            requests: self.requests.load(Ordering::Relaxed),
        }
    }
}

impl Default for PreloadTracker {
    fn default() -> Self {
        Self::new(LogPreloader)
    }
}

impl std::fmt::Debug for PreloadTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadTracker")
            .field("images", &self.seen.len())
            .finish_non_exhaustive()
    }
}

/// Statistics about preload requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadStats {
    /// Distinct images preloaded
    pub images: usize,
    /// Requests made, including repeats
    pub requests: usize,
}

impl std::fmt::Display for PreloadStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Images: {}, Requests: {}", self.images, self.requests)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Preloader that records every URL it is asked to fetch
    #[derive(Clone, Default)]
    pub(crate) struct RecordingPreloader {
        pub calls: Arc<Mutex<Vec<String>>>,
    }

    impl Preloader for RecordingPreloader {
        fn preload(&self, image_url: &str) {
            self.calls.lock().unwrap().push(image_url.to_string());
        }
    }

    #[test]
    fn test_same_url_preloads_once() {
        let recorder = RecordingPreloader::default();
        let tracker = PreloadTracker::new(recorder.clone());

        assert!(tracker.request("http://a.com/sheet.jpg"));
        assert!(!tracker.request("http://a.com/sheet.jpg"));

        assert_eq!(*recorder.calls.lock().unwrap(), vec!["http://a.com/sheet.jpg"]);
        assert!(tracker.is_requested("http://a.com/sheet.jpg"));
    }

    #[test]
    fn test_stats() {
        let tracker = PreloadTracker::default();
        tracker.request("a.jpg");
        tracker.request("b.jpg");
        tracker.request("a.jpg");

        let stats = tracker.stats();
        assert_eq!(stats.images, 2);
        assert_eq!(stats.requests, 3);
        assert_eq!(stats.to_string(), "Images: 2, Requests: 3");
    }

    #[test]
    fn test_concurrent_requests_are_idempotent() {
        let recorder = RecordingPreloader::default();
        let tracker = Arc::new(PreloadTracker::new(recorder.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || tracker.request("shared.jpg"))
            })
            .collect();
        let triggered = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|t| *t)
            .count();

        assert_eq!(triggered, 1);
        assert_eq!(recorder.calls.lock().unwrap().len(), 1);
    }
}
