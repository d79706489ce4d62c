//! DOM-facing seams. Components receive these at construction so a page
//! binding and the in-memory [`crate::page::MemoryPage`] are interchangeable.

use futures::future::BoxFuture;

use crate::error::DispatchError;
use crate::models::{Banner, FormField};

pub const ERROR_CLASS: &str = "error";
pub const BUSY_CLASS: &str = "is-busy";
pub const FADING_CLASS: &str = "fading";
pub const ACTIVE_CLASS: &str = "active";
pub const NO_SCROLL_CLASS: &str = "no-scroll";
pub const REVEAL_PENDING_CLASS: &str = "reveal-pending";
pub const REVEALED_CLASS: &str = "revealed";

pub trait FieldAccess: Send + Sync {
    fn fields(&self) -> Vec<FormField>;
    fn field(&self, name: &str) -> Option<FormField>;
    fn set_value(&self, name: &str, value: &str);
    fn focus(&self, name: &str);
}

/// Inline annotations next to form inputs.
pub trait ErrorSurface: Send + Sync {
    fn insert_annotation(&self, field: &str, message: &str);
    /// Returns false when the field had no annotation.
    fn remove_annotation(&self, field: &str) -> bool;
    fn set_errored(&self, field: &str, errored: bool);
}

pub trait SubmitControl: Send + Sync {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
    fn set_busy(&self, busy: bool);
}

pub trait BannerAnchor: Send + Sync {
    fn mount(&self, banner: &Banner);
    fn begin_fade(&self, id: u64);
    fn unmount(&self, id: u64);
}

pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str, target: &str);
}

pub trait ClassList: Send + Sync {
    fn add_class(&self, element: &str, class: &str);
    fn remove_class(&self, element: &str, class: &str);
    fn has_class(&self, element: &str, class: &str) -> bool;

    /// Returns whether the class is present afterwards.
    fn toggle_class(&self, element: &str, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            true
        }
    }
}

pub trait Viewport: Send + Sync {
    fn scroll_y(&self) -> f64;
    fn inner_height(&self) -> f64;
    /// Element keys matching a selector, in document order.
    fn query_all(&self, selector: &str) -> Vec<String>;
    /// Top edge relative to the viewport.
    fn element_top(&self, element: &str) -> Option<f64>;
    fn scroll_to(&self, top: f64);
    fn scroll_into_view(&self, element: &str);
}

/// Everything the page wiring needs from a document.
pub trait Document:
    FieldAccess + ErrorSurface + SubmitControl + BannerAnchor + LinkOpener + ClassList + Viewport
{
    fn has_element(&self, selector: &str) -> bool;
}

/// HTTP leg of the contact dispatch. Resolves to the response status.
#[cfg_attr(test, mockall::automock)]
pub trait RelayTransport: Send + Sync {
    fn post_json(&self, url: &str, body: String) -> BoxFuture<'static, Result<u16, DispatchError>>;
}
