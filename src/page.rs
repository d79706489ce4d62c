use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::{Banner, FieldKind, FormField};
use crate::surface::{
    BannerAnchor, ClassList, Document, ErrorSurface, FieldAccess, LinkOpener, SubmitControl,
    Viewport, BUSY_CLASS, ERROR_CLASS, FADING_CLASS,
};

pub const FORM_SELECTOR: &str = "#contactForm";
pub const SUBMIT_SELECTOR: &str = "#contactForm button[type=submit]";
pub const HAMBURGER_SELECTOR: &str = ".hamburger";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";
pub const BODY_SELECTOR: &str = "body";
pub const CONTACT_SECTION_SELECTOR: &str = ".contact";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPlacement {
    AfterTitle,
    FormStart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedBanner {
    pub banner: Banner,
    pub placement: BannerPlacement,
    pub fading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedLink {
    pub url: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Element {
    key: String,
    selector: String,
    top: f64,
}

#[derive(Debug, Default)]
struct PageState {
    fields: Vec<FormField>,
    annotations: Vec<Annotation>,
    classes: HashMap<String, BTreeSet<String>>,
    submit_label: String,
    submit_disabled: bool,
    form_title: Option<String>,
    banners: Vec<MountedBanner>,
    opened: Vec<OpenedLink>,
    focused: Option<String>,
    scroll_y: f64,
    inner_height: f64,
    elements: Vec<Element>,
    scroll_calls: Vec<f64>,
    scrolled_into_view: Vec<String>,
}

/// In-memory document that records every mutation made through the
/// surface traits.
#[derive(Debug, Default)]
pub struct MemoryPage {
    state: Mutex<PageState>,
}

impl MemoryPage {
    /// A page with nothing on it but a body.
    pub fn blank() -> Self {
        let page = Self::default();
        page.state().inner_height = 800.0;
        page.add_element(BODY_SELECTOR, BODY_SELECTOR, 0.0);
        page
    }

    /// The marketing page: navigation, contact form and the sections that
    /// animate in on scroll.
    pub fn contact_page() -> Self {
        let page = Self::blank();
        {
            let mut state = page.state();
            state.fields = vec![
                FormField::new("name", FieldKind::Text, true),
                FormField::new("email", FieldKind::Email, true),
                FormField::new("phone", FieldKind::Phone, false),
                FormField::new("subject", FieldKind::Text, true),
                FormField::new("contact-method", FieldKind::Select, false),
                FormField::new("message", FieldKind::Textarea, true),
            ];
            state.submit_label = "Send Message".to_string();
            state.form_title = Some("Send Us a Message".to_string());
        }
        page.add_element(HAMBURGER_SELECTOR, HAMBURGER_SELECTOR, 0.0);
        page.add_element(NAV_LINKS_SELECTOR, NAV_LINKS_SELECTOR, 0.0);
        page.add_element("#about", "#about", 700.0);
        page.add_element("about-content", ".about-content", 760.0);
        page.add_element("product-card-1", ".product-card", 1400.0);
        page.add_element("product-card-2", ".product-card", 1400.0);
        page.add_element("#products", "#products", 1350.0);
        page.add_element(CONTACT_SECTION_SELECTOR, CONTACT_SECTION_SELECTOR, 2200.0);
        page.add_element("contact-form-container", ".contact-form-container", 2260.0);
        page.add_element(FORM_SELECTOR, FORM_SELECTOR, 2280.0);
        page.add_element("#message", "#message", 2500.0);
        page
    }

    pub fn add_element(&self, key: &str, selector: &str, top: f64) {
        self.state().elements.push(Element {
            key: key.to_string(),
            selector: selector.to_string(),
            top,
        });
    }

    pub fn set_element_top(&self, key: &str, top: f64) {
        if let Some(element) = self.state().elements.iter_mut().find(|e| e.key == key) {
            element.top = top;
        }
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.state().scroll_y = y;
    }

    pub fn remove_form_title(&self) {
        self.state().form_title = None;
    }

    pub fn fill(&self, name: &str, value: &str) {
        self.set_value(name, value);
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.field(name).map(|f| f.value)
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.state().annotations.clone()
    }

    pub fn annotations_for(&self, field: &str) -> Vec<String> {
        self.state()
            .annotations
            .iter()
            .filter(|a| a.field == field)
            .map(|a| a.message.clone())
            .collect()
    }

    pub fn is_errored(&self, field: &str) -> bool {
        self.has_class(&field_key(field), ERROR_CLASS)
    }

    pub fn submit_disabled(&self) -> bool {
        self.state().submit_disabled
    }

    pub fn submit_busy(&self) -> bool {
        self.has_class(SUBMIT_SELECTOR, BUSY_CLASS)
    }

    pub fn banners(&self) -> Vec<MountedBanner> {
        self.state().banners.clone()
    }

    pub fn current_banner(&self) -> Option<MountedBanner> {
        self.state().banners.last().cloned()
    }

    pub fn opened_links(&self) -> Vec<OpenedLink> {
        self.state().opened.clone()
    }

    pub fn focused(&self) -> Option<String> {
        self.state().focused.clone()
    }

    pub fn scroll_calls(&self) -> Vec<f64> {
        self.state().scroll_calls.clone()
    }

    pub fn scrolled_into_view(&self) -> Vec<String> {
        self.state().scrolled_into_view.clone()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn field_key(name: &str) -> String {
    format!("#{}", name)
}

impl FieldAccess for MemoryPage {
    fn fields(&self) -> Vec<FormField> {
        self.state().fields.clone()
    }

    fn field(&self, name: &str) -> Option<FormField> {
        self.state().fields.iter().find(|f| f.name == name).cloned()
    }

    fn set_value(&self, name: &str, value: &str) {
        if let Some(field) = self.state().fields.iter_mut().find(|f| f.name == name) {
            field.value = value.to_string();
        }
    }

    fn focus(&self, name: &str) {
        self.state().focused = Some(name.to_string());
    }
}

impl ErrorSurface for MemoryPage {
    fn insert_annotation(&self, field: &str, message: &str) {
        self.state().annotations.push(Annotation {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    fn remove_annotation(&self, field: &str) -> bool {
        let mut state = self.state();
        let position = state.annotations.iter().position(|a| a.field == field);
        match position {
            Some(index) => {
                state.annotations.remove(index);
                true
            }
            None => false,
        }
    }

    fn set_errored(&self, field: &str, errored: bool) {
        let key = field_key(field);
        if errored {
            self.add_class(&key, ERROR_CLASS);
        } else {
            self.remove_class(&key, ERROR_CLASS);
        }
    }
}

impl SubmitControl for MemoryPage {
    fn label(&self) -> String {
        self.state().submit_label.clone()
    }

    fn set_label(&self, label: &str) {
        self.state().submit_label = label.to_string();
    }

    fn set_disabled(&self, disabled: bool) {
        self.state().submit_disabled = disabled;
    }

    fn set_busy(&self, busy: bool) {
        if busy {
            self.add_class(SUBMIT_SELECTOR, BUSY_CLASS);
        } else {
            self.remove_class(SUBMIT_SELECTOR, BUSY_CLASS);
        }
    }
}

impl BannerAnchor for MemoryPage {
    fn mount(&self, banner: &Banner) {
        let mut state = self.state();
        let placement = if state.form_title.is_some() {
            BannerPlacement::AfterTitle
        } else {
            BannerPlacement::FormStart
        };
        state.banners.push(MountedBanner {
            banner: banner.clone(),
            placement,
            fading: false,
        });
    }

    fn begin_fade(&self, id: u64) {
        if let Some(mounted) = self.state().banners.iter_mut().find(|m| m.banner.id == id) {
            mounted.fading = true;
        }
        self.add_class(&banner_key(id), FADING_CLASS);
    }

    fn unmount(&self, id: u64) {
        self.state().banners.retain(|m| m.banner.id != id);
        self.state().classes.remove(&banner_key(id));
    }
}

fn banner_key(id: u64) -> String {
    format!("form-message-{}", id)
}

impl LinkOpener for MemoryPage {
    fn open(&self, url: &str, target: &str) {
        self.state().opened.push(OpenedLink {
            url: url.to_string(),
            target: target.to_string(),
        });
    }
}

impl ClassList for MemoryPage {
    fn add_class(&self, element: &str, class: &str) {
        self.state()
            .classes
            .entry(element.to_string())
            .or_default()
            .insert(class.to_string());
    }

    fn remove_class(&self, element: &str, class: &str) {
        if let Some(classes) = self.state().classes.get_mut(element) {
            classes.remove(class);
        }
    }

    fn has_class(&self, element: &str, class: &str) -> bool {
        self.state()
            .classes
            .get(element)
            .map(|classes| classes.contains(class))
            .unwrap_or(false)
    }
}

impl Viewport for MemoryPage {
    fn scroll_y(&self) -> f64 {
        self.state().scroll_y
    }

    fn inner_height(&self) -> f64 {
        self.state().inner_height
    }

    fn query_all(&self, selector: &str) -> Vec<String> {
        self.state()
            .elements
            .iter()
            .filter(|e| e.selector == selector || e.key == selector)
            .map(|e| e.key.clone())
            .collect()
    }

    fn element_top(&self, element: &str) -> Option<f64> {
        let state = self.state();
        state
            .elements
            .iter()
            .find(|e| e.key == element || e.selector == element)
            .map(|e| e.top - state.scroll_y)
    }

    fn scroll_to(&self, top: f64) {
        let mut state = self.state();
        state.scroll_calls.push(top);
        state.scroll_y = top.max(0.0);
    }

    fn scroll_into_view(&self, element: &str) {
        self.state().scrolled_into_view.push(element.to_string());
    }
}

impl Document for MemoryPage {
    fn has_element(&self, selector: &str) -> bool {
        self.state()
            .elements
            .iter()
            .any(|e| e.selector == selector || e.key == selector)
    }
}
