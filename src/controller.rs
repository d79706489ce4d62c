use std::sync::Arc;

use crate::banner::BannerPresenter;
use crate::config::SiteConfig;
use crate::dispatcher::DualChannelDispatcher;
use crate::field_errors::FieldErrorPresenter;
use crate::gate::SubmissionGate;
use crate::models::{BannerKind, SubmissionRequest, SubmissionState};
use crate::page::CONTACT_SECTION_SELECTOR;
use crate::surface::{
    BannerAnchor, ErrorSurface, FieldAccess, LinkOpener, RelayTransport, SubmitControl, Viewport,
};
use crate::validator::validate;

pub const SUCCESS_MESSAGE: &str = "Your message has been sent successfully! We'll get back to you soon.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Input,
    Blur,
}

/// The parts of the submit event the controller touches.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was in flight.
    Ignored,
    /// Names of the fields that failed validation.
    Invalid(Vec<String>),
    Sent,
    Failed,
}

/// Handles the page elements the contact form is built from.
pub struct FormHandles {
    pub fields: Arc<dyn FieldAccess>,
    pub errors: Arc<dyn ErrorSurface>,
    pub submit: Arc<dyn SubmitControl>,
    pub banner: Arc<dyn BannerAnchor>,
    pub opener: Arc<dyn LinkOpener>,
    pub viewport: Arc<dyn Viewport>,
    pub transport: Arc<dyn RelayTransport>,
}

impl FormHandles {
    pub fn from_page<P>(page: Arc<P>, transport: Arc<dyn RelayTransport>) -> Self
    where
        P: FieldAccess + ErrorSurface + SubmitControl + BannerAnchor + LinkOpener + Viewport + 'static,
    {
        Self {
            fields: page.clone(),
            errors: page.clone(),
            submit: page.clone(),
            banner: page.clone(),
            opener: page.clone(),
            viewport: page,
            transport,
        }
    }
}

pub struct FormController {
    config: Arc<SiteConfig>,
    fields: Arc<dyn FieldAccess>,
    viewport: Arc<dyn Viewport>,
    errors: FieldErrorPresenter,
    gate: SubmissionGate,
    dispatcher: DualChannelDispatcher,
    banner: BannerPresenter,
}

impl FormController {
    pub fn new(config: Arc<SiteConfig>, handles: FormHandles) -> Self {
        Self {
            errors: FieldErrorPresenter::new(handles.errors),
            gate: SubmissionGate::new(handles.submit, &config.busy_label),
            dispatcher: DualChannelDispatcher::new(config.clone(), handles.opener, handles.transport),
            banner: BannerPresenter::new(handles.banner, config.banner_display, config.banner_fade),
            fields: handles.fields,
            viewport: handles.viewport,
            config,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.gate.state()
    }

    /// Live validation on input and blur. Returns whether the field is valid.
    pub fn handle_field_event(&self, name: &str, event: FieldEvent) -> bool {
        let field = match self.fields.field(name) {
            Some(field) => field,
            None => {
                tracing::debug!("{:?} event for unknown field {}", event, name);
                return true;
            }
        };

        let result = validate(&field);
        match result.message {
            Some(message) if !result.valid => {
                self.errors.show_error(name, message);
            }
            _ => self.errors.clear_error(name),
        }
        result.valid
    }

    pub async fn handle_submit(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();

        let _permit = match self.gate.enter() {
            Some(permit) => permit,
            None => return SubmitOutcome::Ignored,
        };

        let fields = self.fields.fields();
        let mut invalid = Vec::new();
        for field in fields.iter().filter(|f| f.required) {
            let result = validate(field);
            if let Some(message) = result.message {
                self.errors.show_error(&field.name, message);
                invalid.push(field.name.clone());
            }
        }
        if !invalid.is_empty() {
            tracing::debug!("Submit blocked by invalid fields: {}", invalid.join(", "));
            return SubmitOutcome::Invalid(invalid);
        }

        let request = match SubmissionRequest::from_fields(&fields) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!("Could not snapshot contact form: {}", e);
                self.banner.show(BannerKind::Error, FAILURE_MESSAGE);
                return SubmitOutcome::Failed;
            }
        };

        let outcome = self.dispatcher.dispatch(&request).await;
        if outcome.success {
            self.banner.show(BannerKind::Success, SUCCESS_MESSAGE);
            for field in &fields {
                self.fields.set_value(&field.name, "");
            }
            self.errors.clear_all(&fields);
            SubmitOutcome::Sent
        } else {
            self.banner.show(BannerKind::Error, FAILURE_MESSAGE);
            SubmitOutcome::Failed
        }
    }

    /// Pre-fills the message with an enquiry about `product` and brings the
    /// contact section into view. Returns false when there is no message
    /// field to fill.
    pub fn enquire_about_product(&self, product: &str) -> bool {
        if self.fields.field("message").is_none() {
            return false;
        }

        let message = format!("I'm interested in {}. Please provide more details.", product);
        self.fields.set_value("message", &message);
        self.fields.focus("message");

        let viewport = self.viewport.clone();
        let delay = self.config.enquiry_scroll_delay;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    viewport.scroll_into_view(CONTACT_SECTION_SELECTOR);
                });
            }
            Err(_) => viewport.scroll_into_view(CONTACT_SECTION_SELECTOR),
        }
        true
    }
}
