use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::models::SubmissionState;
use crate::surface::SubmitControl;

/// Latch that lets one submission through at a time and keeps the submit
/// control's busy look in step with it.
pub struct SubmissionGate {
    submitting: AtomicBool,
    control: Arc<dyn SubmitControl>,
    busy_label: String,
    idle_label: Mutex<Option<String>>,
}

impl SubmissionGate {
    pub fn new(control: Arc<dyn SubmitControl>, busy_label: &str) -> Self {
        Self {
            submitting: AtomicBool::new(false),
            control,
            busy_label: busy_label.to_string(),
            idle_label: Mutex::new(None),
        }
    }

    pub fn state(&self) -> SubmissionState {
        if self.submitting.load(Ordering::Acquire) {
            SubmissionState::Submitting
        } else {
            SubmissionState::Idle
        }
    }

    /// Returns false without touching anything if a submission is already
    /// in flight.
    pub fn try_enter(&self) -> bool {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Submit ignored, another submission is in flight");
            return false;
        }

        *self.idle_label.lock().unwrap_or_else(PoisonError::into_inner) = Some(self.control.label());
        self.control.set_disabled(true);
        self.control.set_label(&self.busy_label);
        self.control.set_busy(true);
        true
    }

    pub fn exit(&self) {
        let label = self.idle_label.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(label) = label {
            self.control.set_label(&label);
        }
        self.control.set_disabled(false);
        self.control.set_busy(false);
        self.submitting.store(false, Ordering::Release);
    }

    /// Scoped form of [`try_enter`](Self::try_enter): the gate reopens when
    /// the permit is dropped, whichever way the holder exits.
    pub fn enter(&self) -> Option<SubmissionPermit<'_>> {
        if self.try_enter() {
            Some(SubmissionPermit { gate: self })
        } else {
            None
        }
    }
}

pub struct SubmissionPermit<'a> {
    gate: &'a SubmissionGate,
}

impl Drop for SubmissionPermit<'_> {
    fn drop(&mut self) {
        self.gate.exit();
    }
}
