//! Interaction layer for the marketing site: the contact form (live
//! validation, guarded submission over WhatsApp and a form relay, result
//! banners), the mobile menu, anchor scrolling and scroll reveal.

pub mod banner;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod field_errors;
pub mod gate;
pub mod models;
pub mod nav;
pub mod page;
pub mod reveal;
pub mod site;
pub mod surface;
pub mod telemetry;
pub mod validator;

pub use config::SiteConfig;
pub use controller::{FormController, FormHandles, SubmitEvent, SubmitOutcome};
pub use dispatcher::{DualChannelDispatcher, HttpRelayTransport};
pub use error::{ConfigError, DispatchError, FormError};
pub use page::MemoryPage;
pub use site::{EventResult, PageEvent, Site};
