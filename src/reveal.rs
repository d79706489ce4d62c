use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::surface::{ClassList, Viewport, REVEALED_CLASS, REVEAL_PENDING_CLASS};

pub const REVEAL_SELECTORS: [&str; 9] = [
    ".about-content",
    ".product-card",
    ".contact-method",
    ".contact-form-container",
    ".map-container",
    ".stats",
    ".value-item",
    ".mission-box",
    ".vision-box",
];

/// Cancel-and-reschedule deferred call.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Outside a tokio runtime there is no timer to defer on, so `f` runs
    /// straight away.
    pub fn call<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No runtime available, running debounced call immediately");
                self.cancel();
                f();
                return;
            }
        };

        let delay = self.delay;
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        });
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    pub fn cancel(&self) {
        if let Some(task) = self.pending.lock().unwrap_or_else(PoisonError::into_inner).take() {
            task.abort();
        }
    }
}

pub struct ScrollReveal<V> {
    page: Arc<V>,
    threshold: f64,
    debouncer: Debouncer,
}

impl<V> ScrollReveal<V>
where
    V: Viewport + ClassList + 'static,
{
    pub fn new(page: Arc<V>, threshold: f64, debounce: Duration) -> Self {
        Self {
            page,
            threshold,
            debouncer: Debouncer::new(debounce),
        }
    }

    fn targets(&self) -> Vec<String> {
        REVEAL_SELECTORS
            .iter()
            .flat_map(|selector| self.page.query_all(selector))
            .collect()
    }

    /// Hides every reveal target until it scrolls into range.
    pub fn prepare(&self) {
        for element in self.targets() {
            self.page.add_class(&element, REVEAL_PENDING_CLASS);
        }
    }

    /// Reveals targets whose top edge is above the threshold line.
    pub fn check(&self) -> usize {
        let line = self.page.inner_height() * self.threshold;
        let mut revealed = 0;
        for element in self.targets() {
            if self.page.has_class(&element, REVEALED_CLASS) {
                continue;
            }
            match self.page.element_top(&element) {
                Some(top) if top < line => {
                    self.page.remove_class(&element, REVEAL_PENDING_CLASS);
                    self.page.add_class(&element, REVEALED_CLASS);
                    revealed += 1;
                }
                _ => {}
            }
        }
        if revealed > 0 {
            tracing::debug!("Revealed {} elements", revealed);
        }
        revealed
    }

    pub fn on_scroll(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.debouncer.call(move || {
            this.check();
        });
    }
}
