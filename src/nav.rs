use std::sync::Arc;

use crate::page::{BODY_SELECTOR, HAMBURGER_SELECTOR, NAV_LINKS_SELECTOR};
use crate::surface::{ClassList, Viewport, ACTIVE_CLASS, NO_SCROLL_CLASS};

pub struct MobileMenu {
    classes: Arc<dyn ClassList>,
}

impl MobileMenu {
    pub fn new(classes: Arc<dyn ClassList>) -> Self {
        Self { classes }
    }

    pub fn is_open(&self) -> bool {
        self.classes.has_class(HAMBURGER_SELECTOR, ACTIVE_CLASS)
    }

    pub fn toggle(&self) -> bool {
        let open = self.classes.toggle_class(HAMBURGER_SELECTOR, ACTIVE_CLASS);
        self.set_open_marks(open);
        open
    }

    pub fn close(&self) {
        self.classes.remove_class(HAMBURGER_SELECTOR, ACTIVE_CLASS);
        self.set_open_marks(false);
    }

    /// Clicks anywhere outside the menu and its toggle close it.
    pub fn handle_document_click(&self, inside_menu: bool) {
        if !inside_menu {
            self.close();
        }
    }

    fn set_open_marks(&self, open: bool) {
        if open {
            self.classes.add_class(NAV_LINKS_SELECTOR, ACTIVE_CLASS);
            self.classes.add_class(BODY_SELECTOR, NO_SCROLL_CLASS);
        } else {
            self.classes.remove_class(NAV_LINKS_SELECTOR, ACTIVE_CLASS);
            self.classes.remove_class(BODY_SELECTOR, NO_SCROLL_CLASS);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnchorClick {
    /// `#` or `#0`: the browser handles it.
    Ignored,
    /// Default prevented but nothing matches the target.
    Missing,
    Scrolled { top: f64 },
}

pub struct SmoothScroll {
    viewport: Arc<dyn Viewport>,
    header_offset: f64,
}

impl SmoothScroll {
    pub fn new(viewport: Arc<dyn Viewport>, header_offset: f64) -> Self {
        Self {
            viewport,
            header_offset,
        }
    }

    pub fn handle_anchor_click(&self, href: &str, menu: Option<&MobileMenu>) -> AnchorClick {
        if href == "#" || href == "#0" {
            return AnchorClick::Ignored;
        }

        let element_top = match self.viewport.element_top(href) {
            Some(top) => top,
            None => {
                tracing::debug!("No element for anchor {}", href);
                return AnchorClick::Missing;
            }
        };

        if let Some(menu) = menu {
            if menu.is_open() {
                menu.close();
            }
        }

        let top = element_top + self.viewport.scroll_y() - self.header_offset;
        self.viewport.scroll_to(top);
        AnchorClick::Scrolled { top }
    }
}
