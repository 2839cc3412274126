//! Counting candidate source for pick slot tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use qotd::{Candidate, CandidateSource, CandidateStream, SourceError, SourceResult};

#[derive(Debug, Default)]
pub struct SpyCounters {
    pub enumerate_count: AtomicUsize,
    pub exists_count: AtomicUsize,
}

impl SpyCounters {
    pub fn reset(&self) {
        self.enumerate_count.store(0, Ordering::SeqCst);
        self.exists_count.store(0, Ordering::SeqCst);
    }
}

/// In-memory source that counts calls and can be switched into a failing
/// state. Clones share items, counters and the failure switch.
#[derive(Clone)]
pub struct SpySource<T> {
    items: Arc<Mutex<Vec<T>>>,
    counters: Arc<SpyCounters>,
    failing: Arc<AtomicBool>,
    delay: Option<Duration>,
}

impl<T: Candidate> SpySource<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items.into_iter().collect())),
            counters: Arc::new(SpyCounters::default()),
            failing: Arc::new(AtomicBool::new(false)),
            delay: None,
        }
    }

    /// Delays every enumeration pass by `delay` before the first item.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push(&self, item: T) {
        self.items.lock().unwrap().push(item);
    }

    pub fn remove(&self, item: &T) -> bool {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|existing| existing != item);
        items.len() != before
    }

    pub fn clear(&self) {
        self.items.lock().unwrap().clear();
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn enumerate_count(&self) -> usize {
        self.counters.enumerate_count.load(Ordering::SeqCst)
    }

    pub fn exists_count(&self) -> usize {
        self.counters.exists_count.load(Ordering::SeqCst)
    }

    pub fn reset_counts(&self) {
        self.counters.reset();
    }

    fn snapshot(&self) -> Vec<T> {
        self.items.lock().unwrap().clone()
    }
}

fn outage() -> SourceError {
    SourceError::unavailable("source is down")
}

#[async_trait]
impl<T: Candidate> CandidateSource for SpySource<T> {
    type Candidate = T;

    fn enumerate_all(&self) -> CandidateStream<'_, T> {
        self.counters.enumerate_count.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return stream::once(async { Err(outage()) }).boxed();
        }
        let items = self.snapshot();
        match self.delay {
            None => stream::iter(items.into_iter().map(Ok)).boxed(),
            Some(delay) => stream::once(async move {
                tokio::time::sleep(delay).await;
                stream::iter(items.into_iter().map(Ok))
            })
            .flatten()
            .boxed(),
        }
    }

    async fn exists(&self, candidate: &T) -> SourceResult<bool> {
        self.counters.exists_count.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(outage());
        }
        Ok(self.items.lock().unwrap().contains(candidate))
    }

    fn name(&self) -> &str {
        "spy"
    }
}
