//! Mobile navigation toggle.

use crate::primitives::ACTIVE_CLASS;
use crate::{ElementId, Page, PawfectError};

/// The hamburger button and the navigation list it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileMenu {
    button: ElementId,
    list: ElementId,
}

impl MobileMenu {
    /// Attach to the `.VET` button and the first `ul` inside `nav`.
    ///
    /// Returns `None` when either is missing.
    #[must_use]
    pub fn attach(page: &Page) -> Option<Self> {
        let button = page.first_by_class(page.root(), "VET")?;
        let list = page
            .by_tag(page.root(), "nav")
            .into_iter()
            .find_map(|nav| page.by_tag(nav, "ul").into_iter().next())?;
        Some(Self { button, list })
    }

    #[must_use]
    pub fn button(&self) -> ElementId {
        self.button
    }

    #[must_use]
    pub fn list(&self) -> ElementId {
        self.list
    }

    /// Click handler: flip `active` on both the list and the button.
    ///
    /// Returns whether the menu is now open.
    pub fn toggle(&self, page: &mut Page) -> Result<bool, PawfectError> {
        let open = page.toggle_class(self.list, ACTIVE_CLASS)?;
        page.toggle_class(self.button, ACTIVE_CLASS)?;
        Ok(open)
    }

    #[must_use]
    pub fn is_open(&self, page: &Page) -> bool {
        page.has_class(self.list, ACTIVE_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Element;

    fn page_with_nav() -> Page {
        let mut page = Page::new();
        let body = page.body();
        let nav = page.append(body, Element::new("nav")).expect("nav");
        let container = page
            .append(nav, Element::new("div").with_class("container"))
            .expect("container");
        page.append(container, Element::new("ul")).expect("ul");
        page.append(container, Element::new("button").with_class("VET"))
            .expect("button");
        page
    }

    #[test]
    fn toggle_flips_both() {
        let mut page = page_with_nav();
        let menu = MobileMenu::attach(&page).expect("menu");

        assert!(menu.toggle(&mut page).expect("toggle"));
        assert!(menu.is_open(&page));
        assert!(page.has_class(menu.button(), ACTIVE_CLASS));

        assert!(!menu.toggle(&mut page).expect("toggle"));
        assert!(!page.has_class(menu.button(), ACTIVE_CLASS));
    }

    #[test]
    fn missing_button_means_no_menu() {
        let mut page = Page::new();
        let body = page.body();
        let nav = page.append(body, Element::new("nav")).expect("nav");
        page.append(nav, Element::new("ul")).expect("ul");
        assert_eq!(MobileMenu::attach(&page), None);
    }
}
