use std::sync::Arc;

use crate::models::{FieldError, FormField};
use crate::surface::ErrorSurface;

/// Keeps at most one inline error per field.
pub struct FieldErrorPresenter {
    surface: Arc<dyn ErrorSurface>,
}

impl FieldErrorPresenter {
    pub fn new(surface: Arc<dyn ErrorSurface>) -> Self {
        Self { surface }
    }

    /// Replaces whatever annotation the field had with `message`.
    pub fn show_error(&self, field: &str, message: &str) -> FieldError {
        self.clear_error(field);
        self.surface.insert_annotation(field, message);
        self.surface.set_errored(field, true);
        tracing::debug!("Field {} marked invalid: {}", field, message);
        FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn clear_error(&self, field: &str) {
        // Annotations may have been stacked by markup we did not render.
        while self.surface.remove_annotation(field) {}
        self.surface.set_errored(field, false);
    }

    pub fn clear_all(&self, fields: &[FormField]) {
        for field in fields {
            self.clear_error(&field.name);
        }
    }
}
