use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::models::{Banner, BannerKind};
use crate::surface::BannerAnchor;

#[derive(Default)]
struct Slot {
    current: Option<u64>,
    dismiss: Option<JoinHandle<()>>,
}

/// Success/error notice above the contact form. One at a time; each one
/// fades out and unmounts on its own.
pub struct BannerPresenter {
    anchor: Arc<dyn BannerAnchor>,
    display: Duration,
    fade: Duration,
    next_id: AtomicU64,
    slot: Arc<Mutex<Slot>>,
}

impl BannerPresenter {
    pub fn new(anchor: Arc<dyn BannerAnchor>, display: Duration, fade: Duration) -> Self {
        Self {
            anchor,
            display,
            fade,
            next_id: AtomicU64::new(1),
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub fn show(&self, kind: BannerKind, message: &str) -> Banner {
        let banner = Banner {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            kind,
            message: message.to_string(),
        };

        let mut slot = self.slot();
        if let Some(timer) = slot.dismiss.take() {
            timer.abort();
        }
        if let Some(previous) = slot.current.take() {
            self.anchor.unmount(previous);
        }

        self.anchor.mount(&banner);
        slot.current = Some(banner.id);
        slot.dismiss = self.schedule_dismiss(banner.id);
        banner
    }

    pub fn current(&self) -> Option<u64> {
        self.slot().current
    }

    fn schedule_dismiss(&self, id: u64) -> Option<JoinHandle<()>> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No runtime available, banner {} will not auto-dismiss", id);
                return None;
            }
        };

        let anchor = self.anchor.clone();
        let slot = self.slot.clone();
        let display = self.display;
        let fade = self.fade;
        Some(handle.spawn(async move {
            sleep(display).await;
            anchor.begin_fade(id);
            sleep(fade).await;
            anchor.unmount(id);

            let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.current == Some(id) {
                slot.current = None;
                slot.dismiss = None;
            }
        }))
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
