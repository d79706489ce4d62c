use std::sync::Arc;

use crate::config::SiteConfig;
use crate::controller::{FieldEvent, FormController, FormHandles, SubmitEvent, SubmitOutcome};
use crate::nav::{AnchorClick, MobileMenu, SmoothScroll};
use crate::page::{FORM_SELECTOR, HAMBURGER_SELECTOR};
use crate::reveal::ScrollReveal;
use crate::surface::{Document, RelayTransport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    HamburgerClick,
    NavLinkClick,
    DocumentClick { inside_menu: bool },
    AnchorClick { href: String },
    FieldInput { name: String },
    FieldBlur { name: String },
    Submit,
    Scroll,
    EnquireAboutProduct { product: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventResult {
    /// No component is wired for the event.
    Unhandled,
    Handled,
    Field { valid: bool },
    Anchor(AnchorClick),
    Submit(SubmitOutcome),
}

/// Every interactive piece of the page, wired against one document.
pub struct Site<D> {
    form: Option<FormController>,
    menu: Option<MobileMenu>,
    scroll: SmoothScroll,
    reveal: Arc<ScrollReveal<D>>,
}

impl<D> Site<D>
where
    D: Document + 'static,
{
    /// Wires whatever the document has hooks for and runs the first reveal
    /// pass.
    pub fn wire(document: Arc<D>, config: SiteConfig, transport: Arc<dyn RelayTransport>) -> Self {
        let config = Arc::new(config);

        let form = if document.has_element(FORM_SELECTOR) {
            Some(FormController::new(
                config.clone(),
                FormHandles::from_page(document.clone(), transport),
            ))
        } else {
            tracing::debug!("No contact form on page, skipping form wiring");
            None
        };

        let menu = if document.has_element(HAMBURGER_SELECTOR) {
            Some(MobileMenu::new(document.clone()))
        } else {
            None
        };

        let scroll = SmoothScroll::new(document.clone(), config.header_offset);
        let reveal = Arc::new(ScrollReveal::new(
            document,
            config.reveal_threshold,
            config.scroll_debounce,
        ));
        reveal.prepare();
        reveal.check();

        tracing::info!(
            "Site wired (form: {}, menu: {})",
            form.is_some(),
            menu.is_some()
        );
        Self {
            form,
            menu,
            scroll,
            reveal,
        }
    }

    pub fn form(&self) -> Option<&FormController> {
        self.form.as_ref()
    }

    pub fn menu(&self) -> Option<&MobileMenu> {
        self.menu.as_ref()
    }

    pub async fn handle(&self, event: PageEvent) -> EventResult {
        match event {
            PageEvent::HamburgerClick => match &self.menu {
                Some(menu) => {
                    menu.toggle();
                    EventResult::Handled
                }
                None => EventResult::Unhandled,
            },
            PageEvent::NavLinkClick => match &self.menu {
                Some(menu) => {
                    menu.close();
                    EventResult::Handled
                }
                None => EventResult::Unhandled,
            },
            PageEvent::DocumentClick { inside_menu } => match &self.menu {
                Some(menu) => {
                    menu.handle_document_click(inside_menu);
                    EventResult::Handled
                }
                None => EventResult::Unhandled,
            },
            PageEvent::AnchorClick { href } => {
                EventResult::Anchor(self.scroll.handle_anchor_click(&href, self.menu.as_ref()))
            }
            PageEvent::FieldInput { name } => self.field_event(&name, FieldEvent::Input),
            PageEvent::FieldBlur { name } => self.field_event(&name, FieldEvent::Blur),
            PageEvent::Submit => match &self.form {
                Some(form) => {
                    let mut submit = SubmitEvent::new();
                    EventResult::Submit(form.handle_submit(&mut submit).await)
                }
                None => EventResult::Unhandled,
            },
            PageEvent::Scroll => {
                self.reveal.on_scroll();
                EventResult::Handled
            }
            PageEvent::EnquireAboutProduct { product } => match &self.form {
                Some(form) if form.enquire_about_product(&product) => EventResult::Handled,
                _ => EventResult::Unhandled,
            },
        }
    }

    fn field_event(&self, name: &str, event: FieldEvent) -> EventResult {
        match &self.form {
            Some(form) => EventResult::Field {
                valid: form.handle_field_event(name, event),
            },
            None => EventResult::Unhandled,
        }
    }
}
